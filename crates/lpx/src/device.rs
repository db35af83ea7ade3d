//! LaunchpadX - the device façade.

use std::collections::HashMap;

use launchpad_core::{
    encode_batch, encode_mode_switch, frame, Command, CoordinateMapper, EventDispatcher,
    EventError, EventKind, EventRecord, GridCell, GridPosition, GridRenderer, HandlerFailure,
    HandlerResult, LightingSpec,
};
use thiserror::Error;

use crate::config::DeviceConfig;
use crate::midi::{normalize, InputSource, MidiMessage};
use crate::transport::{InputReceiver, OutputPort, PortRole, Transport, TransportError};

#[derive(Debug, Error)]
pub enum DeviceError {
    /// Failure reported by the transport, unchanged
    #[error(transparent)]
    Transport(TransportError),

    #[error("{role} port '{name}' not found")]
    PortNotFound { role: PortRole, name: String },

    #[error("{0} port is not bound, call setup first")]
    PortUnavailable(PortRole),
}

/// Setup progress. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Novation Launchpad X driver.
///
/// Combines the pad mapper, grid renderer and event dispatcher with a
/// [`Transport`]. Pads and control buttons arrive on the MIDI pair, notes
/// from a sequencing application on the DAW pair. Lighting commands go out
/// on the DAW output, single-pad notes on the MIDI output.
pub struct LaunchpadX<T: Transport> {
    transport: T,
    config: DeviceConfig,
    state: DeviceState,

    mapper: CoordinateMapper,
    renderer: GridRenderer,
    dispatcher: EventDispatcher,

    midi_in: Option<InputReceiver>,
    midi_out: Option<Box<dyn OutputPort>>,
    daw_in: Option<InputReceiver>,
    daw_out: Option<Box<dyn OutputPort>>,

    status: HashMap<String, String>,
}

impl<T: Transport> LaunchpadX<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DeviceConfig::default())
    }

    pub fn with_config(transport: T, config: DeviceConfig) -> Self {
        let mapper = CoordinateMapper::new();
        let renderer = GridRenderer::from_mapper(&mapper);

        let mut status = HashMap::new();
        status.insert("state".to_string(), "uninitialized".to_string());

        Self {
            transport,
            config,
            state: DeviceState::Uninitialized,
            mapper,
            renderer,
            dispatcher: EventDispatcher::new(),
            midi_in: None,
            midi_out: None,
            daw_in: None,
            daw_out: None,
            status,
        }
    }

    /// Enable the transport, bind ports, switch to programmer mode and
    /// publish `ready`. Does nothing once the device is ready.
    pub async fn setup(&mut self) -> Result<(), DeviceError> {
        if self.state == DeviceState::Ready {
            return Ok(());
        }

        tracing::info!("Initializing Launchpad X");
        self.set_state(DeviceState::Initializing);

        let result = self.initialize().await;
        if let Err(e) = &result {
            tracing::warn!("Launchpad X setup failed: {}", e);
            self.set_state(DeviceState::Uninitialized);
        }
        result
    }

    async fn initialize(&mut self) -> Result<(), DeviceError> {
        self.transport
            .enable()
            .await
            .map_err(DeviceError::Transport)?;

        self.init_ports()?;
        self.use_programmer_layout()?;
        self.publish(EventKind::Ready, 0, 0);

        self.set_state(DeviceState::Ready);
        tracing::info!("Launchpad X ready");
        Ok(())
    }

    /// Bind all four ports or none of them.
    fn init_ports(&mut self) -> Result<(), DeviceError> {
        let midi_in = self.bind_input(PortRole::MidiIn, self.config.midi_in_name.clone())?;
        let midi_out = self.bind_output(PortRole::MidiOut, self.config.midi_out_name.clone())?;
        let daw_in = self.bind_input(PortRole::DawIn, self.config.daw_in_name.clone())?;
        let daw_out = self.bind_output(PortRole::DawOut, self.config.daw_out_name.clone())?;

        self.midi_in = Some(midi_in);
        self.midi_out = Some(midi_out);
        self.daw_in = Some(daw_in);
        self.daw_out = Some(daw_out);
        Ok(())
    }

    fn bind_input(&mut self, role: PortRole, name: String) -> Result<InputReceiver, DeviceError> {
        let port = self.transport.input(&name);
        self.record_port(role, &name, port.is_some());
        port.ok_or(DeviceError::PortNotFound { role, name })
    }

    fn bind_output(
        &mut self,
        role: PortRole,
        name: String,
    ) -> Result<Box<dyn OutputPort>, DeviceError> {
        let port = self.transport.output(&name);
        self.record_port(role, &name, port.is_some());
        port.ok_or(DeviceError::PortNotFound { role, name })
    }

    fn record_port(&mut self, role: PortRole, name: &str, found: bool) {
        let value = if found {
            tracing::info!("Bound {} port '{}'", role, name);
            "connected"
        } else {
            tracing::warn!("{} port '{}' not found", role, name);
            "not_found"
        };
        self.status.insert(role.to_string(), value.to_string());
    }

    fn use_programmer_layout(&mut self) -> Result<(), DeviceError> {
        for command in encode_mode_switch() {
            self.send_command(&command)?;
        }
        tracing::info!("Launchpad X switched to programmer mode");
        Ok(())
    }

    fn set_state(&mut self, state: DeviceState) {
        self.state = state;
        let name = match state {
            DeviceState::Uninitialized => "uninitialized",
            DeviceState::Initializing => "initializing",
            DeviceState::Ready => "ready",
        };
        self.status.insert("state".to_string(), name.to_string());
    }

    // === Events ===

    /// Register a handler for an event kind.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(u8, u8) -> HandlerResult + Send + 'static,
    {
        self.dispatcher.subscribe(kind, handler);
    }

    /// Register a handler by event name, e.g. `"padTouch"`.
    pub fn on_named<F>(&mut self, name: &str, handler: F) -> Result<(), EventError>
    where
        F: FnMut(u8, u8) -> HandlerResult + Send + 'static,
    {
        self.dispatcher.subscribe_named(name, handler)
    }

    pub fn publish(&mut self, kind: EventKind, index: u8, value: u8) -> Vec<HandlerFailure> {
        self.dispatcher.publish(kind, index, value)
    }

    /// Normalize one raw input message and publish it.
    ///
    /// Returns the published event, or `None` for messages that map to no
    /// event.
    pub fn handle_message(&mut self, source: InputSource, bytes: &[u8]) -> Option<EventRecord> {
        let Some(message) = MidiMessage::parse(bytes) else {
            tracing::trace!("Ignoring {} input {:02X?}", source, bytes);
            return None;
        };
        let Some(record) = normalize(source, message) else {
            tracing::trace!("Ignoring {} input {:?}", source, message);
            return None;
        };

        self.dispatcher.publish_record(record);
        Some(record)
    }

    /// Publish every message already waiting on the inputs.
    ///
    /// Returns the number of events published.
    pub fn pump(&mut self) -> usize {
        let mut pending = Vec::new();
        for (source, rx) in [
            (InputSource::Primary, self.midi_in.as_mut()),
            (InputSource::Paired, self.daw_in.as_mut()),
        ] {
            if let Some(rx) = rx {
                while let Ok(bytes) = rx.try_recv() {
                    pending.push((source, bytes));
                }
            }
        }

        pending
            .into_iter()
            .filter(|(source, bytes)| self.handle_message(*source, bytes).is_some())
            .count()
    }

    /// Publish input messages as they arrive until both inputs close.
    pub async fn run(&mut self) {
        let mut midi_in = self.midi_in.take();
        let mut daw_in = self.daw_in.take();

        tracing::info!("Launchpad X input loop running");

        loop {
            tokio::select! {
                message = recv(&mut midi_in), if midi_in.is_some() => match message {
                    Some(bytes) => {
                        self.handle_message(InputSource::Primary, &bytes);
                    }
                    None => {
                        tracing::info!("{} closed", PortRole::MidiIn);
                        midi_in = None;
                    }
                },
                message = recv(&mut daw_in), if daw_in.is_some() => match message {
                    Some(bytes) => {
                        self.handle_message(InputSource::Paired, &bytes);
                    }
                    None => {
                        tracing::info!("{} closed", PortRole::DawIn);
                        daw_in = None;
                    }
                },
                else => break,
            }
        }
    }

    // === Output ===

    /// Send a framed command on the DAW output.
    pub fn send_command(&mut self, command: &Command) -> Result<(), DeviceError> {
        let port = self
            .daw_out
            .as_mut()
            .ok_or(DeviceError::PortUnavailable(PortRole::DawOut))?;
        port.send(command.status(), command.data())
            .map_err(DeviceError::Transport)
    }

    /// Frame and send a raw command.
    pub fn cmd(&mut self, opcode: u8, payload: &[u8]) -> Result<(), DeviceError> {
        self.send_command(&frame(opcode, payload))
    }

    /// Send several lighting specs as one bulk command.
    pub fn bulk(&mut self, specs: &[LightingSpec]) -> Result<(), DeviceError> {
        self.send_command(&encode_batch(specs))
    }

    pub fn color(&mut self, index: i32, color: i32) -> Result<(), DeviceError> {
        self.bulk(&[LightingSpec::Color { index, color }])
    }

    pub fn flash(&mut self, index: i32, color_a: i32, color_b: i32) -> Result<(), DeviceError> {
        self.bulk(&[LightingSpec::Flash {
            index,
            color_a,
            color_b,
        }])
    }

    pub fn pulse(&mut self, index: i32, color: i32) -> Result<(), DeviceError> {
        self.bulk(&[LightingSpec::Pulse { index, color }])
    }

    pub fn rgb(&mut self, index: i32, r: i32, g: i32, b: i32) -> Result<(), DeviceError> {
        self.bulk(&[LightingSpec::Rgb { index, r, g, b }])
    }

    /// Light a single pad with a note on, publishing `update` first.
    pub fn light(&mut self, note: u8, velocity: u8) -> Result<(), DeviceError> {
        self.publish(EventKind::Update, note, velocity);

        let channel = self.config.note_channel;
        let port = self
            .midi_out
            .as_mut()
            .ok_or(DeviceError::PortUnavailable(PortRole::MidiOut))?;
        port.play_note(note, channel, velocity)
            .map_err(DeviceError::Transport)
    }

    /// Render an 8x8 frame of cells, top row first.
    pub fn grid<R: AsRef<[GridCell]>>(&mut self, rows: &[R]) -> Result<(), DeviceError> {
        let command = self.renderer.render(rows);
        self.send_command(&command)
    }

    /// Set every pad to `color` and publish `clear`.
    pub fn clear(&mut self, color: i32) -> Result<(), DeviceError> {
        let command = self.renderer.clear(color);
        self.send_command(&command)?;
        self.publish(EventKind::Clear, 0, color.rem_euclid(128) as u8);
        Ok(())
    }

    // === Queries ===

    /// Logical index of a native pad number.
    pub fn to_id(&self, note: u8) -> Option<u8> {
        self.mapper.to_logical(note)
    }

    /// Native pad number of a logical index.
    pub fn to_note(&self, id: u8) -> Option<u8> {
        self.mapper.to_native(id)
    }

    /// Grid position of a native pad number.
    pub fn pos_of(&self, note: u8) -> Option<GridPosition> {
        self.mapper.pos_of(note)
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }

    pub fn status(&self) -> HashMap<String, String> {
        self.status.clone()
    }
}

async fn recv(rx: &mut Option<InputReceiver>) -> Option<Vec<u8>> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use launchpad_core::{colors, uniform_grid, ControlButton};
    use tokio::sync::mpsc;
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    type SentLog = Arc<Mutex<Vec<(String, u8, Vec<u8>)>>>;

    struct MockOutput {
        name: String,
        sent: SentLog,
    }

    impl OutputPort for MockOutput {
        fn send(&mut self, status: u8, data: &[u8]) -> Result<(), TransportError> {
            self.sent
                .lock()
                .unwrap()
                .push((self.name.clone(), status, data.to_vec()));
            Ok(())
        }
    }

    struct MockTransport {
        enable_error: Option<String>,
        enable_calls: Arc<Mutex<usize>>,
        inputs: HashMap<String, InputReceiver>,
        outputs: Vec<String>,
        sent: SentLog,
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn enable(&mut self) -> Result<(), TransportError> {
            *self.enable_calls.lock().unwrap() += 1;
            match &self.enable_error {
                Some(message) => Err(message.clone().into()),
                None => Ok(()),
            }
        }

        fn input(&mut self, name: &str) -> Option<InputReceiver> {
            self.inputs.remove(name)
        }

        fn output(&mut self, name: &str) -> Option<Box<dyn OutputPort>> {
            self.outputs.iter().find(|n| *n == name).map(|n| {
                Box::new(MockOutput {
                    name: n.clone(),
                    sent: self.sent.clone(),
                }) as Box<dyn OutputPort>
            })
        }
    }

    struct Harness {
        device: LaunchpadX<MockTransport>,
        midi_tx: mpsc::UnboundedSender<Vec<u8>>,
        daw_tx: mpsc::UnboundedSender<Vec<u8>>,
        sent: SentLog,
        enable_calls: Arc<Mutex<usize>>,
    }

    fn harness() -> Harness {
        let config = DeviceConfig::default();
        let (midi_tx, midi_rx) = mpsc::unbounded_channel();
        let (daw_tx, daw_rx) = mpsc::unbounded_channel();

        let mut inputs = HashMap::new();
        inputs.insert(config.midi_in_name.clone(), midi_rx);
        inputs.insert(config.daw_in_name.clone(), daw_rx);

        let sent = SentLog::default();
        let enable_calls = Arc::new(Mutex::new(0));
        let transport = MockTransport {
            enable_error: None,
            enable_calls: enable_calls.clone(),
            inputs,
            outputs: vec![config.midi_out_name.clone(), config.daw_out_name.clone()],
            sent: sent.clone(),
        };

        Harness {
            device: LaunchpadX::with_config(transport, config),
            midi_tx,
            daw_tx,
            sent,
            enable_calls,
        }
    }

    fn events(device: &mut LaunchpadX<MockTransport>) -> Arc<Mutex<Vec<EventRecord>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for kind in EventKind::ALL {
            let log = log.clone();
            device.on(kind, move |index, value| {
                log.lock().unwrap().push(EventRecord::new(kind, index, value));
                Ok(())
            });
        }
        log
    }

    #[tokio::test]
    async fn test_setup_switches_to_programmer_mode() {
        let mut h = harness();
        let seen = events(&mut h.device);

        assert_eq!(h.device.state(), DeviceState::Uninitialized);
        assert_ok!(h.device.setup().await);
        assert!(h.device.is_ready());

        let sent = h.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "Launchpad X LPX DAW In");
        assert_eq!(sent[0].1, 0xF0);
        assert_eq!(sent[0].2, vec![0x00, 0x20, 0x29, 0x02, 0x0C, 0x00, 0x7F, 0xF7]);
        assert_eq!(sent[1].2, vec![0x00, 0x20, 0x29, 0x02, 0x0C, 0x0E, 0x01, 0xF7]);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventRecord::new(EventKind::Ready, 0, 0)]
        );
        assert_eq!(h.device.status().get("state").map(String::as_str), Some("ready"));
    }

    #[tokio::test]
    async fn test_setup_is_idempotent() {
        let mut h = harness();
        let seen = events(&mut h.device);

        assert_ok!(h.device.setup().await);
        assert_ok!(h.device.setup().await);

        assert_eq!(*h.enable_calls.lock().unwrap(), 1);
        assert_eq!(h.sent.lock().unwrap().len(), 2);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_enable_failure_is_propagated() {
        let mut h = harness();
        h.device.transport.enable_error = Some("MIDI access denied".to_string());

        let err = tokio_test::block_on(h.device.setup()).unwrap_err();
        assert!(matches!(err, DeviceError::Transport(_)));
        assert_eq!(err.to_string(), "MIDI access denied");
        assert_eq!(h.device.state(), DeviceState::Uninitialized);
        assert!(h.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_port_fails_setup() {
        let mut h = harness();
        h.device.transport.outputs.retain(|name| !name.contains("DAW"));

        let err = h.device.setup().await.unwrap_err();
        match err {
            DeviceError::PortNotFound { role, name } => {
                assert_eq!(role, PortRole::DawOut);
                assert_eq!(name, "Launchpad X LPX DAW In");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(h.device.state(), DeviceState::Uninitialized);
        assert_eq!(
            h.device.status().get("DAW output").map(String::as_str),
            Some("not_found")
        );
    }

    #[test]
    fn test_commands_before_setup() {
        let mut h = harness();

        assert!(matches!(
            h.device.clear(0),
            Err(DeviceError::PortUnavailable(PortRole::DawOut))
        ));
        assert!(matches!(
            h.device.light(81, 5),
            Err(DeviceError::PortUnavailable(PortRole::MidiOut))
        ));
    }

    #[tokio::test]
    async fn test_pump_normalizes_inputs() {
        let mut h = harness();
        assert_ok!(h.device.setup().await);
        let seen = events(&mut h.device);

        h.midi_tx.send(vec![0x90, 81, 100]).unwrap();
        h.midi_tx.send(vec![0x90, 81, 0]).unwrap();
        h.midi_tx.send(vec![0xB0, 91, 127]).unwrap();
        h.midi_tx.send(vec![0xF0, 0x7E, 0xF7]).unwrap();
        h.daw_tx.send(vec![0x90, 36, 90]).unwrap();
        h.daw_tx.send(vec![0x80, 36, 0]).unwrap();

        assert_eq!(h.device.pump(), 5);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                EventRecord::new(EventKind::PadTouch, 81, 100),
                EventRecord::new(EventKind::PadRelease, 81, 0),
                EventRecord::new(EventKind::ControlChange, 91, 127),
                EventRecord::new(EventKind::NoteActive, 36, 90),
                EventRecord::new(EventKind::NoteRelease, 36, 0),
            ]
        );
        assert_eq!(h.device.pump(), 0);
        assert_eq!(ControlButton::from_cc(91), Some(ControlButton::Up));
    }

    #[tokio::test]
    async fn test_run_stops_when_inputs_close() {
        let mut h = harness();
        assert_ok!(h.device.setup().await);
        let seen = events(&mut h.device);

        h.midi_tx.send(vec![0x90, 11, 64]).unwrap();
        h.daw_tx.send(vec![0x90, 60, 64]).unwrap();
        drop(h.midi_tx);
        drop(h.daw_tx);

        h.device.run().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&EventRecord::new(EventKind::PadTouch, 11, 64)));
        assert!(seen.contains(&EventRecord::new(EventKind::NoteActive, 60, 64)));
    }

    #[tokio::test]
    async fn test_light_publishes_update_then_plays_note() {
        let mut h = harness();
        assert_ok!(h.device.setup().await);
        let seen = events(&mut h.device);

        assert_ok!(h.device.light(81, colors::LIGHT_BLUE));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventRecord::new(EventKind::Update, 81, colors::LIGHT_BLUE)]
        );
        let sent = h.sent.lock().unwrap();
        let last = sent.last().unwrap();
        assert_eq!(last.0, "Launchpad X LPX MIDI In");
        assert_eq!((last.1, last.2.clone()), (0x90, vec![81, 37]));
    }

    #[tokio::test]
    async fn test_clear_sends_grid_and_publishes() {
        let mut h = harness();
        assert_ok!(h.device.setup().await);
        let seen = events(&mut h.device);

        assert_ok!(h.device.clear(5));

        let expected = GridRenderer::new().render(&uniform_grid(GridCell::Color(5)));
        let sent = h.sent.lock().unwrap();
        assert_eq!(sent.last().unwrap().2, expected.data());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventRecord::new(EventKind::Clear, 0, 5)]
        );
    }

    #[tokio::test]
    async fn test_single_effect_helpers() {
        let mut h = harness();
        assert_ok!(h.device.setup().await);

        assert_ok!(h.device.flash(81, 5, 9));
        assert_ok!(h.device.pulse(82, 72));
        assert_ok!(h.device.rgb(83, 127, 0, 0));
        assert_ok!(h.device.cmd(0x0E, &[0x00]));

        let sent = h.sent.lock().unwrap();
        let payloads: Vec<&[u8]> = sent[2..]
            .iter()
            .map(|(_, _, data)| &data[6..data.len() - 1])
            .collect();
        assert_eq!(payloads[0], &[1, 81, 5, 9]);
        assert_eq!(payloads[1], &[2, 82, 72]);
        assert_eq!(payloads[2], &[3, 83, 127, 0, 0]);
        assert_eq!(payloads[3], &[0x00]);
        assert_eq!(sent[5].2[5], 0x0E);
    }

    #[test]
    fn test_queries() {
        let h = harness();

        assert_eq!(h.device.to_id(81), Some(1));
        assert_eq!(h.device.to_note(64), Some(18));
        assert_eq!(h.device.pos_of(11), Some(GridPosition::new(0, 7)));
        assert_eq!(h.device.to_id(91), None);
    }

    #[test]
    fn test_on_named_rejects_typos() {
        let mut h = harness();
        assert_err!(h.device.on_named("pad_touch", |_, _| Ok(())));
        assert_ok!(h.device.on_named("padTouch", |_, _| Ok(())));
    }
}
