use crate::export::{ExportFormat, ExportLink, ExportLinks};
use crate::model::{api_key_preview, Camera, CameraConfig, ConfigDocument, Detector, DetectorType};
use crate::session::form::Submission;
use crate::session::overlay::Overlay;
use crate::telemetry::ActivityLog;
use serde_json::Value;
use std::fmt;

/// Backend round trips whose outcome is reported back as an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadConfig,
    LoadCatalog,
    LoadCameras,
    RefreshCameras,
    RefreshCamera,
    FetchExport(ExportFormat),
    SaveDetectors,
    SaveApiKey,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadConfig => f.write_str("Loading config"),
            Self::LoadCatalog => f.write_str("Loading detector catalog"),
            Self::LoadCameras => f.write_str("Loading cameras"),
            Self::RefreshCameras => f.write_str("Refreshing cameras"),
            Self::RefreshCamera => f.write_str("Refreshing camera"),
            Self::FetchExport(format) => write!(f, "Fetching {format} export"),
            Self::SaveDetectors => f.write_str("Saving detectors"),
            Self::SaveApiKey => f.write_str("Saving api key"),
        }
    }
}

/// Everything that can happen to the editor: user intents and backend replies.
#[derive(Debug, Clone)]
pub enum Action {
    ConfigLoaded(ConfigDocument),
    CatalogLoaded(Vec<DetectorType>),
    CamerasLoaded(Vec<Camera>),
    CameraRefreshed(Option<Camera>),
    ExportLoaded(ExportLink),
    AddDetector,
    SelectDetector(usize),
    Save(Submission),
    DetectorCreated { index: usize, detector: Detector },
    CreationFailed { index: usize, reason: String },
    Delete,
    Back,
    ApiKeyDraftChanged(String),
    SaveApiKey,
    RefreshCameras,
    RefreshCamera(CameraConfig),
    Synced(Operation),
    RequestFailed { operation: Operation, reason: String },
}

/// Backend work requested by a transition. Executed by [`super::driver::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadConfig,
    LoadCatalog,
    LoadCameras,
    RefreshCameras,
    RefreshCamera(CameraConfig),
    FetchExport(ExportFormat),
    /// Replaces the backend list. `unreadable` entries are written back after `detectors`.
    PersistDetectors {
        detectors: Vec<Detector>,
        unreadable: Vec<Value>,
    },
    PersistApiKey(String),
    CreateDetector { index: usize, detector: Detector },
}

/// In-memory working copy of the backend config plus the overlay state.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    detectors: Vec<Detector>,
    unreadable: Vec<Value>,
    loaded: bool,
    catalog: Vec<DetectorType>,
    cameras: Vec<Camera>,
    api_key: String,
    api_key_draft: String,
    overlay: Overlay,
    overlay_error: Option<String>,
    exports: ExportLinks,
    activity: ActivityLog,
}

impl EditorSession {
    pub fn boot() -> (Self, Vec<Effect>) {
        let mut session = Self::default();
        session.activity.info("Loading detector configs...");
        (
            session,
            vec![Effect::LoadConfig, Effect::LoadCatalog, Effect::LoadCameras],
        )
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// False until the first config arrives; edits are refused meanwhile.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Entries the backend holds that could not be decoded.
    pub fn unreadable(&self) -> &[Value] {
        &self.unreadable
    }

    pub fn catalog(&self) -> &[DetectorType] {
        &self.catalog
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_key_draft(&self) -> &str {
        &self.api_key_draft
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Backend error belonging to the open overlay, such as a refused creation.
    pub fn overlay_error(&self) -> Option<&str> {
        self.overlay_error.as_deref()
    }

    pub fn exports(&self) -> &ExportLinks {
        &self.exports
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// The entry the overlay is bound to. `None` when closed or the index is stale,
    /// so an empty list never renders an overlay.
    pub fn overlay_detector(&self) -> Option<(usize, &Detector)> {
        let index = self.overlay.index()?;
        self.detectors.get(index).map(|detector| (index, detector))
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::ConfigLoaded(document) => {
                if self.overlay.is_open() {
                    self.activity
                        .error("Ignored a config reload while a detector is open");
                    return Vec::new();
                }
                self.api_key_draft = api_key_preview(&document.api_key);
                self.api_key = document.api_key;
                self.detectors = document.detectors;
                self.unreadable = document.unreadable_detectors;
                self.loaded = true;
                self.activity
                    .info(format!("Loaded {} detector(s)", self.detectors.len()));
                if !self.unreadable.is_empty() {
                    self.activity.error(format!(
                        "{} detector(s) could not be read; they are kept unchanged on save",
                        self.unreadable.len()
                    ));
                }
                fetch_exports()
            }
            Action::CatalogLoaded(catalog) => {
                self.catalog = catalog;
                Vec::new()
            }
            Action::CamerasLoaded(cameras) => {
                self.cameras = cameras;
                Vec::new()
            }
            Action::CameraRefreshed(Some(camera)) => {
                match self
                    .cameras
                    .iter()
                    .position(|known| known.config == camera.config)
                {
                    Some(position) => self.cameras[position] = camera,
                    None => self.cameras.push(camera),
                }
                Vec::new()
            }
            Action::CameraRefreshed(None) => {
                self.activity.error("Backend does not know that camera");
                Vec::new()
            }
            Action::ExportLoaded(link) => {
                self.exports.set(link);
                Vec::new()
            }
            Action::AddDetector => self.add_detector(),
            Action::SelectDetector(index) => self.select_detector(index),
            Action::Save(submission) => self.save(submission),
            Action::DetectorCreated { index, detector } => self.detector_created(index, detector),
            Action::CreationFailed { index, reason } => {
                let message = format!("Could not create detector: {reason}");
                if self.overlay.index() == Some(index) && self.overlay.is_creating() {
                    self.overlay = self.overlay.with_creating(false);
                    self.overlay_error = Some(message.clone());
                }
                self.activity.error(message);
                Vec::new()
            }
            Action::Delete => self.delete(),
            Action::Back => self.back(),
            Action::ApiKeyDraftChanged(draft) => {
                self.api_key_draft = draft;
                Vec::new()
            }
            Action::SaveApiKey => self.save_api_key(),
            Action::RefreshCameras => vec![Effect::RefreshCameras],
            Action::RefreshCamera(config) => vec![Effect::RefreshCamera(config)],
            Action::Synced(operation) => {
                self.activity.info(format!("{operation}: done"));
                match operation {
                    Operation::SaveDetectors | Operation::SaveApiKey => fetch_exports(),
                    _ => Vec::new(),
                }
            }
            Action::RequestFailed { operation, reason } => {
                self.activity.error(format!("{operation} failed: {reason}"));
                Vec::new()
            }
        }
    }

    fn add_detector(&mut self) -> Vec<Effect> {
        if !self.ready_for_edits() {
            return Vec::new();
        }
        if self.overlay.is_open() {
            self.activity.info("Finish the open detector first");
            return Vec::new();
        }
        self.detectors.push(Detector::placeholder());
        self.open(Overlay::adding(self.detectors.len() - 1));
        Vec::new()
    }

    fn select_detector(&mut self, index: usize) -> Vec<Effect> {
        if !self.ready_for_edits() {
            return Vec::new();
        }
        if self.overlay.is_open() {
            self.activity.info("Finish the open detector first");
        } else if index >= self.detectors.len() {
            self.activity
                .error(format!("No detector at position {}", index + 1));
        } else {
            self.open(Overlay::editing(index));
        }
        Vec::new()
    }

    fn save(&mut self, submission: Submission) -> Vec<Effect> {
        if !self.ready_for_edits() {
            return Vec::new();
        }
        let Some((index, _)) = self.overlay_detector() else {
            return Vec::new();
        };
        if self.overlay.is_creating() {
            return Vec::new();
        }

        if submission.is_new {
            self.overlay = self.overlay.with_creating(true);
            self.overlay_error = None;
            self.activity
                .info(format!("Creating detector '{}'...", submission.detector.name));
            return vec![Effect::CreateDetector {
                index,
                detector: submission.detector,
            }];
        }
        self.commit(index, submission.detector)
    }

    fn detector_created(&mut self, index: usize, detector: Detector) -> Vec<Effect> {
        if self.overlay.index() != Some(index) || !self.overlay.is_creating() {
            self.activity.error(format!(
                "Detector '{}' ({}) was created but its editor is gone",
                detector.name, detector.id
            ));
            return Vec::new();
        }
        self.activity
            .info(format!("Created detector '{}' ({})", detector.name, detector.id));
        self.commit(index, detector)
    }

    fn commit(&mut self, index: usize, detector: Detector) -> Vec<Effect> {
        self.close();
        self.detectors[index] = detector;
        self.persist()
    }

    fn delete(&mut self) -> Vec<Effect> {
        if !self.ready_for_edits() {
            return Vec::new();
        }
        let Some((index, _)) = self.overlay_detector() else {
            return Vec::new();
        };
        if self.overlay.is_creating() {
            return Vec::new();
        }
        self.close();
        let removed = self.detectors.remove(index);
        self.activity.info(format!("Deleted detector '{}'", removed.name));
        self.persist()
    }

    fn back(&mut self) -> Vec<Effect> {
        if self.overlay.is_creating() {
            return Vec::new();
        }
        if let Some((index, _)) = self.overlay_detector() {
            if self.overlay.was_add() {
                self.detectors.remove(index);
            }
        }
        self.close();
        Vec::new()
    }

    fn save_api_key(&mut self) -> Vec<Effect> {
        if !self.ready_for_edits() {
            return Vec::new();
        }
        if self.api_key_draft == api_key_preview(&self.api_key) {
            self.activity.info("Api key unchanged");
            return Vec::new();
        }
        self.api_key = self.api_key_draft.clone();
        vec![Effect::PersistApiKey(self.api_key.clone())]
    }

    /// Writes that start from an unloaded working copy would wipe the backend list.
    fn ready_for_edits(&mut self) -> bool {
        if !self.loaded {
            self.activity
                .error("Detector configs are not loaded yet; nothing was changed");
        }
        self.loaded
    }

    fn open(&mut self, overlay: Overlay) {
        self.overlay = overlay;
        self.overlay_error = None;
    }

    fn close(&mut self) {
        self.overlay = Overlay::Idle;
        self.overlay_error = None;
    }

    fn persist(&self) -> Vec<Effect> {
        vec![Effect::PersistDetectors {
            detectors: self.detectors.clone(),
            unreadable: self.unreadable.clone(),
        }]
    }
}

fn fetch_exports() -> Vec<Effect> {
    ExportFormat::ALL
        .into_iter()
        .map(Effect::FetchExport)
        .collect()
}
