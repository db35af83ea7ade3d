//! Device event publish/subscribe.

mod dispatcher;
mod kind;

pub use dispatcher::{EventDispatcher, HandlerError, HandlerFailure, HandlerResult};
pub use kind::{EventError, EventKind, EventRecord};
