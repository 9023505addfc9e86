//! Wire types exchanged with the detector backend.

pub mod camera;
pub mod catalog;
pub mod detector;
pub mod document;

pub use camera::{Camera, CameraConfig, SerialNumber};
pub use catalog::DetectorType;
pub use detector::{Detector, DetectorConfig, PinState, TriggerType};
pub use document::{api_key_preview, ConfigDocument};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Result of a lenient decode: the best value we could build plus what was wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub problems: Vec<String>,
}

impl<T> Decoded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            problems: Vec::new(),
        }
    }

    /// Forwards every problem to the log and hands back the value.
    pub fn logged(self, source: &str) -> T {
        for problem in &self.problems {
            log::warn!("{source}: {problem}");
        }
        self.value
    }
}

impl<T: DeserializeOwned> Decoded<Vec<T>> {
    /// Decodes a JSON array entry by entry, dropping entries that do not fit `T`.
    pub(crate) fn list(what: &str, value: Value) -> Self {
        Self::list_keeping(what, value).0
    }

    /// Like [`Decoded::list`], but hands back the entries that did not fit `T`
    /// untouched so they can be written back later.
    pub(crate) fn list_keeping(what: &str, value: Value) -> (Self, Vec<Value>) {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Null => return (Self::clean(Vec::new()), Vec::new()),
            other => {
                let decoded = Self {
                    value: Vec::new(),
                    problems: vec![format!("expected a list of {what}, got {}", kind(&other))],
                };
                return (decoded, Vec::new());
            }
        };

        let mut decoded = Self::clean(Vec::with_capacity(entries.len()));
        let mut rejected = Vec::new();
        for (position, entry) in entries.into_iter().enumerate() {
            match T::deserialize(&entry) {
                Ok(item) => decoded.value.push(item),
                Err(err) => {
                    decoded
                        .problems
                        .push(format!("unreadable {what} entry {position}: {err}"));
                    rejected.push(entry);
                }
            }
        }
        (decoded, rejected)
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
