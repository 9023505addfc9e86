use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::Decoded;

/// Detector template offered by the backend's detector service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorType {
    pub name: String,
    pub id: String,
    pub query: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: String,
    pub group_name: String,
    pub confidence_threshold: f64,
}

impl DetectorType {
    pub fn list_from_value(value: Value) -> Decoded<Vec<DetectorType>> {
        Decoded::<Vec<DetectorType>>::list("detector types", value)
    }
}

impl fmt::Display for DetectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
