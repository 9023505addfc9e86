use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::Decoded;

/// Serial numbers come back from frame grabbers either as text or as a bare integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerialNumber {
    Number(u64),
    Text(String),
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Video source reference shared by cameras and detector configs.
///
/// The backend matches cameras by whole-object equality, so grabber keys this
/// type does not model (`input_type`, resolution hints, ...) ride along in
/// `extra` and are written back untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<SerialNumber>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CameraConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for CameraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(idx) = self.idx {
            write!(f, " #{idx}")?;
        }
        if let Some(serial) = &self.serial_number {
            write!(f, " (s/n {serial})")?;
        }
        Ok(())
    }
}

/// A camera discovered by the backend together with its latest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Base64 JPEG snapshot, possibly empty.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub config: CameraConfig,
}

impl Camera {
    pub fn list_from_value(value: Value) -> Decoded<Vec<Camera>> {
        Decoded::<Vec<Camera>>::list("cameras", value)
    }
}
