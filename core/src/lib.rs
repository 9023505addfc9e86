//! Detector configuration editing: the backend wire model, an async client for
//! the config routes, client-side export links, and the editor state machine
//! that a front end drives.

pub mod client;
pub mod export;
pub mod model;
pub mod prelude;
pub mod session;
pub mod telemetry;

pub use prelude::{EditorError, EditorResult};
