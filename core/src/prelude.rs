pub use crate::client::{ApiEndpoint, ConfigClient};
pub use crate::export::{ExportFormat, ExportLink};
pub use crate::model::{Camera, CameraConfig, ConfigDocument, Detector, DetectorType};
pub use crate::session::{Action, Effect, EditorSession, Overlay};

/// Common error type for backend calls.
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("{endpoint} unreachable: {source}")]
    Transport {
        endpoint: ApiEndpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: ApiEndpoint,
        status: u16,
        body: String,
    },
    #[error("{endpoint} sent an unreadable body: {reason}")]
    Decode { endpoint: ApiEndpoint, reason: String },
    #[error("backend refused to create detector '{name}'")]
    CreationRejected { name: String },
}

pub type EditorResult<T> = Result<T, EditorError>;
