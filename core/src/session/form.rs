use crate::model::{Camera, CameraConfig, Detector, DetectorConfig, DetectorType, PinState, TriggerType};

/// Free-text fields of the edit overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Query,
    CycleTime,
    Pin,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Query => "query",
            Self::CycleTime => "cycle time",
            Self::Pin => "pin",
        }
    }
}

/// One user edit inside the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Text(FormField, String),
    ToggleEnabled,
    ToggleCreateNew,
    Trigger(TriggerType),
    PinState(PinState),
    Camera(CameraConfig),
    CatalogEntry(DetectorType),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{} must not be empty", .0.label())]
    Empty(FormField),
    #[error("{} must be a whole number, got '{value}'", .field.label())]
    InvalidNumber { field: FormField, value: String },
    #[error("time triggers need a cycle time above zero")]
    MissingCycleTime,
    #[error("pin triggers need a pin number")]
    MissingPin,
}

/// What the overlay hands back on save.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub detector: Detector,
    /// The detector still has to be created on the detector service.
    pub is_new: bool,
}

/// Transient edit buffer for one detector. Dropped when the overlay closes.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorForm {
    pub name: String,
    pub id: String,
    pub query: String,
    pub enabled: bool,
    pub camera: CameraConfig,
    pub trigger_type: TriggerType,
    pub cycle_time: String,
    pub pin: String,
    pub pin_active_state: Option<PinState>,
    pub create_new: bool,
    image: String,
}

impl DetectorForm {
    pub fn from_detector(detector: &Detector) -> Self {
        let config = &detector.config;
        Self {
            name: detector.name.clone(),
            id: detector.id.clone(),
            query: detector.query.clone(),
            enabled: config.enabled,
            camera: config.vid_config.clone(),
            trigger_type: config.trigger_type.clone(),
            cycle_time: number_text(config.cycle_time),
            pin: number_text(config.pin),
            pin_active_state: config.pin_active_state,
            create_new: detector.is_new(),
            image: config.image.clone(),
        }
    }

    /// Camera snapshot stored with the detector.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Adopts `camera`'s snapshot if it is the camera this form points at.
    pub fn take_snapshot(&mut self, camera: &Camera) -> bool {
        if camera.config != self.camera || camera.image.is_empty() {
            return false;
        }
        self.image = camera.image.clone();
        true
    }

    pub fn apply(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Text(FormField::Name, value) => self.name = value,
            FormEdit::Text(FormField::Query, value) => self.query = value,
            FormEdit::Text(FormField::CycleTime, value) => self.cycle_time = value,
            FormEdit::Text(FormField::Pin, value) => self.pin = value,
            FormEdit::ToggleEnabled => self.enabled = !self.enabled,
            FormEdit::ToggleCreateNew => self.create_new = !self.create_new,
            FormEdit::Trigger(trigger) => self.trigger_type = trigger,
            FormEdit::PinState(state) => self.pin_active_state = Some(state),
            FormEdit::Camera(camera) => self.camera = camera,
            FormEdit::CatalogEntry(entry) => {
                self.name = entry.name;
                self.id = entry.id;
                self.query = entry.query;
                self.create_new = false;
            }
        }
    }

    pub fn submit(&self) -> Result<Submission, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Empty(FormField::Name));
        }
        if self.query.trim().is_empty() {
            return Err(FormError::Empty(FormField::Query));
        }

        let cycle_time = parse_number(FormField::CycleTime, &self.cycle_time)?;
        let pin = parse_number(FormField::Pin, &self.pin)?;
        match self.trigger_type {
            TriggerType::Time if cycle_time.unwrap_or(0) == 0 => {
                return Err(FormError::MissingCycleTime)
            }
            TriggerType::Pin if pin.is_none() => return Err(FormError::MissingPin),
            _ => {}
        }

        let is_new = self.create_new || self.id.is_empty();
        let id = if is_new { String::new() } else { self.id.clone() };
        Ok(Submission {
            detector: Detector {
                name: self.name.trim().to_string(),
                id,
                query: self.query.trim().to_string(),
                config: DetectorConfig {
                    enabled: self.enabled,
                    vid_config: self.camera.clone(),
                    image: self.image.clone(),
                    trigger_type: self.trigger_type.clone(),
                    cycle_time,
                    pin,
                    pin_active_state: self.pin_active_state,
                },
            },
            is_new,
        })
    }
}

fn number_text(value: Option<u32>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn parse_number(field: FormField, text: &str) -> Result<Option<u32>, FormError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}
