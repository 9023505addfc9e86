use crate::client::ConfigClient;
use crate::session::reducer::{Action, Effect, Operation};
use std::sync::Arc;

/// Runs one effect against the backend and reports the outcome as the next action.
///
/// Failures never escape: they come back as `RequestFailed` / `CreationFailed`
/// so the session can show them.
pub async fn execute(client: Arc<ConfigClient>, effect: Effect) -> Action {
    match effect {
        Effect::LoadConfig => match client.get_config().await {
            Ok(document) => Action::ConfigLoaded(document),
            Err(err) => failed(Operation::LoadConfig, err),
        },
        Effect::LoadCatalog => match client.get_available_detectors().await {
            Ok(catalog) => Action::CatalogLoaded(catalog),
            Err(err) => failed(Operation::LoadCatalog, err),
        },
        Effect::LoadCameras => match client.get_cameras().await {
            Ok(cameras) => Action::CamerasLoaded(cameras),
            Err(err) => failed(Operation::LoadCameras, err),
        },
        Effect::RefreshCameras => match client.refresh_cameras().await {
            Ok(cameras) => Action::CamerasLoaded(cameras),
            Err(err) => failed(Operation::RefreshCameras, err),
        },
        Effect::RefreshCamera(config) => match client.refresh_camera(&config).await {
            Ok(camera) => Action::CameraRefreshed(camera),
            Err(err) => failed(Operation::RefreshCamera, err),
        },
        Effect::FetchExport(format) => match client.get_export(format).await {
            Ok(link) => Action::ExportLoaded(link),
            Err(err) => failed(Operation::FetchExport(format), err),
        },
        Effect::PersistDetectors {
            detectors,
            unreadable,
        } => match client.save_detectors(&detectors, &unreadable).await {
            Ok(()) => Action::Synced(Operation::SaveDetectors),
            Err(err) => failed(Operation::SaveDetectors, err),
        },
        Effect::PersistApiKey(api_key) => match client.save_api_key(&api_key).await {
            Ok(()) => Action::Synced(Operation::SaveApiKey),
            Err(err) => failed(Operation::SaveApiKey, err),
        },
        Effect::CreateDetector {
            index,
            mut detector,
        } => match client.create_detector(&detector).await {
            Ok(id) => {
                detector.id = id;
                Action::DetectorCreated { index, detector }
            }
            Err(err) => Action::CreationFailed {
                index,
                reason: err.to_string(),
            },
        },
    }
}

fn failed(operation: Operation, err: impl std::fmt::Display) -> Action {
    Action::RequestFailed {
        operation,
        reason: err.to_string(),
    }
}
