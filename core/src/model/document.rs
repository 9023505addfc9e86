use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{kind, Decoded, Detector};

/// Number of api-key characters revealed by [`api_key_preview`].
pub const API_KEY_PREVIEW_CHARS: usize = 15;

/// Whole backend configuration as returned by `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub detectors: Vec<Detector>,
    /// Detector entries this build cannot read. Sent back unchanged on every
    /// save so the backend never loses them.
    #[serde(skip)]
    pub unreadable_detectors: Vec<Value>,
}

impl ConfigDocument {
    /// Builds a document from whatever JSON the backend sent. Missing or
    /// wrong-typed sections become empty and are reported as problems.
    pub fn from_value(value: Value) -> Decoded<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Decoded {
                    value: Self::default(),
                    problems: vec![format!("expected a config object, got {}", kind(&other))],
                }
            }
        };

        let mut problems = Vec::new();
        let api_key = match object.remove("api_key") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(key)) => key,
            Some(other) => {
                problems.push(format!("ignored api_key of type {}", kind(&other)));
                String::new()
            }
        };
        let endpoint = match object.remove("endpoint") {
            Some(Value::String(endpoint)) => Some(endpoint),
            _ => None,
        };
        let (detectors, unreadable_detectors) = match object.remove("detectors") {
            None => (Vec::new(), Vec::new()),
            Some(raw) => {
                let (decoded, unreadable) =
                    Decoded::<Vec<Detector>>::list_keeping("detector", raw);
                problems.extend(decoded.problems);
                (decoded.value, unreadable)
            }
        };

        Decoded {
            value: Self {
                api_key,
                endpoint,
                detectors,
                unreadable_detectors,
            },
            problems,
        }
    }
}

/// Text shown in the api-key field: the first characters of the key and an ellipsis.
pub fn api_key_preview(key: &str) -> String {
    let mut preview: String = key.chars().take(API_KEY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
