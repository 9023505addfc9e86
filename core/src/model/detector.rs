use serde::{Deserialize, Serialize};
use std::fmt;

use super::camera::CameraConfig;

/// Active level for a GPIO-triggered detector. Encoded on the wire as 1 / 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum PinState {
    Low = 0,
    High = 1,
}

impl PinState {
    pub const ALL: [PinState; 2] = [PinState::High, PinState::Low];
}

impl TryFrom<u8> for PinState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(format!("pin state must be 0 or 1, got {other}")),
        }
    }
}

impl From<PinState> for u8 {
    fn from(state: PinState) -> Self {
        state as u8
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("LOW"),
            Self::High => f.write_str("HIGH"),
        }
    }
}

/// What makes a detector submit a frame. Unknown trigger names are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TriggerType {
    #[default]
    Time,
    Pin,
    Other(String),
}

impl TriggerType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Time => "time",
            Self::Pin => "pin",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for TriggerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "time" => Self::Time,
            "pin" => Self::Pin,
            _ => Self::Other(value),
        }
    }
}

impl From<TriggerType> for String {
    fn from(trigger: TriggerType) -> Self {
        match trigger {
            TriggerType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime settings of one detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub vid_config: CameraConfig,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub trigger_type: TriggerType,
    /// Seconds between submissions for `time` triggers.
    #[serde(default)]
    pub cycle_time: Option<u32>,
    #[serde(default)]
    pub pin: Option<u32>,
    #[serde(default)]
    pub pin_active_state: Option<PinState>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            vid_config: CameraConfig::named("webcam"),
            image: String::new(),
            trigger_type: TriggerType::Time,
            cycle_time: Some(30),
            pin: None,
            pin_active_state: None,
        }
    }
}

/// A configured detector: a query bound to a camera and a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    #[serde(default)]
    pub name: String,
    /// Backend-assigned identifier; empty until the detector has been created.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub config: DetectorConfig,
}

impl Detector {
    pub const PLACEHOLDER_NAME: &'static str = "New Detector";
    pub const PLACEHOLDER_QUERY: &'static str = "New Query?";

    /// The entry appended by the "Add Detector" action.
    pub fn placeholder() -> Self {
        Self {
            name: Self::PLACEHOLDER_NAME.into(),
            id: String::new(),
            query: Self::PLACEHOLDER_QUERY.into(),
            config: DetectorConfig::default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn trigger_summary(&self) -> String {
        let config = &self.config;
        match &config.trigger_type {
            TriggerType::Time => match config.cycle_time {
                Some(seconds) => format!("every {seconds}s"),
                None => "on a timer".into(),
            },
            TriggerType::Pin => {
                let pin = config
                    .pin
                    .map(|pin| pin.to_string())
                    .unwrap_or_else(|| "?".into());
                match config.pin_active_state {
                    Some(state) => format!("pin {pin} active {state}"),
                    None => format!("pin {pin}"),
                }
            }
            TriggerType::Other(name) => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholder_matches_add_defaults() {
        let detector = Detector::placeholder();
        assert!(detector.is_new());
        assert_eq!(detector.name, "New Detector");
        assert_eq!(detector.query, "New Query?");
        assert!(detector.config.enabled);
        assert_eq!(detector.config.vid_config.name, "webcam");
        assert_eq!(detector.config.trigger_type, TriggerType::Time);
        assert_eq!(detector.config.cycle_time, Some(30));
    }

    #[test]
    fn detector_serializes_absent_options_as_null() {
        let value = serde_json::to_value(Detector::placeholder()).unwrap();
        assert_eq!(value["config"]["trigger_type"], json!("time"));
        assert_eq!(value["config"]["pin"], json!(null));
        assert_eq!(value["config"]["pin_active_state"], json!(null));
        assert_eq!(value["config"]["vid_config"], json!({"name": "webcam"}));
    }

    #[test]
    fn pin_trigger_decodes_integer_state() {
        let detector: Detector = serde_json::from_value(json!({
            "name": "gate",
            "id": "det_9",
            "query": "Is the gate closed?",
            "config": {
                "enabled": false,
                "vid_config": {"name": "rtsp", "idx": 1},
                "image": "",
                "trigger_type": "pin",
                "pin": 17,
                "pin_active_state": 0
            }
        }))
        .unwrap();
        assert_eq!(detector.config.pin_active_state, Some(PinState::Low));
        assert_eq!(detector.config.cycle_time, None);
        assert_eq!(detector.trigger_summary(), "pin 17 active LOW");
    }

    #[test]
    fn out_of_range_pin_state_is_rejected() {
        let result = serde_json::from_value::<DetectorConfig>(json!({
            "trigger_type": "pin",
            "pin_active_state": 3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_trigger_survives_round_trip() {
        let config: DetectorConfig =
            serde_json::from_value(json!({"trigger_type": "motion"})).unwrap();
        assert_eq!(config.trigger_type, TriggerType::Other("motion".into()));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["trigger_type"], json!("motion"));
    }
}
