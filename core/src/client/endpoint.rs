use reqwest::Method;
use std::fmt;

/// Routes served by the detector backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    Config,
    AvailableDetectors,
    ConfigJsonPretty,
    ConfigYamlPretty,
    SaveDetectors,
    SaveApiKey,
    NewDetector,
    Cameras,
    RefreshCameras,
    RefreshCamera,
}

impl ApiEndpoint {
    pub fn method(self) -> Method {
        match self {
            Self::SaveDetectors | Self::SaveApiKey | Self::NewDetector | Self::RefreshCamera => {
                Method::POST
            }
            _ => Method::GET,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Config => "/api/config",
            Self::AvailableDetectors => "/api/detectors",
            Self::ConfigJsonPretty => "/api/config-json-pretty",
            Self::ConfigYamlPretty => "/api/config-yaml-pretty",
            Self::SaveDetectors => "/api/config/detectors",
            Self::SaveApiKey => "/api/config/api_key",
            Self::NewDetector => "/api/new-detector",
            Self::Cameras => "/api/cameras",
            Self::RefreshCameras => "/api/refresh-cameras",
            Self::RefreshCamera => "/api/refresh-camera",
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
