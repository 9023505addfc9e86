use crate::client::endpoint::ApiEndpoint;
use crate::export::{ExportFormat, ExportLink};
use crate::model::{Camera, CameraConfig, ConfigDocument, Detector, DetectorType};
use crate::prelude::{EditorError, EditorResult};
use crate::telemetry::SyncMetrics;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Reply of `POST /api/new-detector` when the detector service refused the request.
pub const CREATE_FAILED_SENTINEL: &str = "Failed";

/// Thin async wrapper around the backend's config routes.
///
/// Each call is attempted exactly once. Failures come back as [`EditorError`]
/// and are counted in [`SyncMetrics`]; nothing is retried.
pub struct ConfigClient {
    http: reqwest::Client,
    base_url: String,
    metrics: SyncMetrics,
}

impl ConfigClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            metrics: SyncMetrics::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn metrics(&self) -> &SyncMetrics {
        &self.metrics
    }

    /// `GET /api/config`; malformed sections come back empty.
    pub async fn get_config(&self) -> EditorResult<ConfigDocument> {
        let value = self.fetch::<(), Value>(ApiEndpoint::Config, None).await;
        self.track(
            ApiEndpoint::Config,
            value.map(|value| ConfigDocument::from_value(value).logged("config")),
        )
    }

    /// `GET /api/detectors`; anything but a list of detector types becomes an empty catalog.
    pub async fn get_available_detectors(&self) -> EditorResult<Vec<DetectorType>> {
        let value = self
            .fetch::<(), Value>(ApiEndpoint::AvailableDetectors, None)
            .await;
        self.track(
            ApiEndpoint::AvailableDetectors,
            value.map(|value| DetectorType::list_from_value(value).logged("detector catalog")),
        )
    }

    pub async fn get_cameras(&self) -> EditorResult<Vec<Camera>> {
        let value = self.fetch::<(), Value>(ApiEndpoint::Cameras, None).await;
        self.track(
            ApiEndpoint::Cameras,
            value.map(|value| Camera::list_from_value(value).logged("cameras")),
        )
    }

    /// Asks the backend to rediscover every attached camera.
    pub async fn refresh_cameras(&self) -> EditorResult<Vec<Camera>> {
        let value = self
            .fetch::<(), Value>(ApiEndpoint::RefreshCameras, None)
            .await;
        self.track(
            ApiEndpoint::RefreshCameras,
            value.map(|value| Camera::list_from_value(value).logged("cameras")),
        )
    }

    /// Takes a fresh snapshot from one camera. `None` when the backend does not know it.
    pub async fn refresh_camera(&self, config: &CameraConfig) -> EditorResult<Option<Camera>> {
        let camera = self.fetch(ApiEndpoint::RefreshCamera, Some(config)).await;
        self.track(ApiEndpoint::RefreshCamera, camera)
    }

    /// Pretty-printed server-side config, ready to wrap in a download link.
    pub async fn get_export(&self, format: ExportFormat) -> EditorResult<ExportLink> {
        let body = self.fetch::<(), String>(format.endpoint(), None).await;
        self.track(format.endpoint(), body.map(|body| ExportLink::new(format, body)))
    }

    /// Replaces the whole detector list on the backend. `unreadable` entries are
    /// appended verbatim after the decoded ones.
    pub async fn save_detectors(
        &self,
        detectors: &[Detector],
        unreadable: &[Value],
    ) -> EditorResult<()> {
        let body = DetectorList {
            detectors: detectors
                .iter()
                .map(DetectorEntry::Decoded)
                .chain(unreadable.iter().map(DetectorEntry::Raw))
                .collect(),
        };
        let sent = self.send(ApiEndpoint::SaveDetectors, Some(&body)).await;
        self.track(ApiEndpoint::SaveDetectors, sent.map(drop))
    }

    pub async fn save_api_key(&self, api_key: &str) -> EditorResult<()> {
        let body = json!({ "api_key": api_key });
        let sent = self.send(ApiEndpoint::SaveApiKey, Some(&body)).await;
        self.track(ApiEndpoint::SaveApiKey, sent.map(drop))
    }

    /// Registers a detector with the detector service and returns its new id.
    pub async fn create_detector(&self, detector: &Detector) -> EditorResult<String> {
        let created = self
            .fetch::<Detector, String>(ApiEndpoint::NewDetector, Some(detector))
            .await
            .and_then(|id| {
                if id == CREATE_FAILED_SENTINEL || id.trim().is_empty() {
                    warn!("detector service refused '{}'", detector.name);
                    Err(EditorError::CreationRejected {
                        name: detector.name.clone(),
                    })
                } else {
                    Ok(id)
                }
            });
        self.track(ApiEndpoint::NewDetector, created)
    }

    fn track<T>(&self, endpoint: ApiEndpoint, result: EditorResult<T>) -> EditorResult<T> {
        match &result {
            Ok(_) => self.metrics.record_success(endpoint),
            Err(err) => {
                debug!("request failed: {err}");
                self.metrics.record_failure(endpoint, err.to_string());
            }
        }
        result
    }

    async fn fetch<B, T>(&self, endpoint: ApiEndpoint, body: Option<&B>) -> EditorResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(endpoint, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| EditorError::Decode {
                endpoint,
                reason: err.to_string(),
            })
    }

    async fn send<B>(
        &self,
        endpoint: ApiEndpoint,
        body: Option<&B>,
    ) -> EditorResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!("{} {}", endpoint.method(), url);

        let mut request = self.http.request(endpoint.method(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| EditorError::Transport { endpoint, source })?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(EditorError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Body of `POST /api/config/detectors`.
#[derive(Serialize)]
struct DetectorList<'a> {
    detectors: Vec<DetectorEntry<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DetectorEntry<'a> {
    Decoded(&'a Detector),
    Raw(&'a Value),
}
