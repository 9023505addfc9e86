pub mod config_client;
pub mod endpoint;

pub use config_client::{ConfigClient, CREATE_FAILED_SENTINEL, DEFAULT_BACKEND_URL};
pub use endpoint::ApiEndpoint;
