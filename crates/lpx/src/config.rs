use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port names and note output settings for one Launchpad X.
///
/// Port names are as seen from the host: the device's "MIDI Out" port is our
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub midi_in_name: String,
    pub midi_out_name: String,
    pub daw_in_name: String,
    pub daw_out_name: String,
    /// MIDI channel for `light` note messages (1-16)
    pub note_channel: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            midi_in_name: "Launchpad X LPX MIDI Out".to_string(),
            midi_out_name: "Launchpad X LPX MIDI In".to_string(),
            daw_in_name: "Launchpad X LPX DAW Out".to_string(),
            daw_out_name: "Launchpad X LPX DAW In".to_string(),
            note_channel: 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("note_channel must be between 1 and 16, got {0}")]
    InvalidChannel(u8),
}

impl DeviceConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ConfigError::Write)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(ConfigError::Write)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=16).contains(&self.note_channel) {
            return Err(ConfigError::InvalidChannel(self.note_channel));
        }
        Ok(())
    }
}
