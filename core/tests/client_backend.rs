mod support;

use detcfg::client::{ApiEndpoint, ConfigClient};
use detcfg::export::ExportFormat;
use detcfg::model::{CameraConfig, Detector, TriggerType};
use detcfg::EditorError;
use serde_json::json;
use support::{sample_config, spawn, BackendState};

#[tokio::test]
async fn get_config_reads_detectors_and_key() {
    let backend = spawn(BackendState {
        config: sample_config(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let document = client.get_config().await.unwrap();
    assert_eq!(document.api_key, "k1");
    assert_eq!(document.detectors.len(), 1);
    let detector = &document.detectors[0];
    assert_eq!(detector.name, "Cam1");
    assert_eq!(detector.config.trigger_type, TriggerType::Time);
    assert_eq!(
        detector.config.vid_config.extra.get("input_type"),
        Some(&json!("webcam"))
    );
    assert_eq!(client.metrics().totals(), (1, 0));
}

#[tokio::test]
async fn malformed_payloads_fall_back_to_empty() {
    let backend = spawn(BackendState {
        config: json!({"detectors": 7}),
        catalog: json!({"detail": "unauthorized"}),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let document = client.get_config().await.unwrap();
    assert_eq!(document.api_key, "");
    assert!(document.detectors.is_empty());
    assert!(client.get_available_detectors().await.unwrap().is_empty());
}

#[tokio::test]
async fn save_detectors_posts_whole_list() {
    let backend = spawn(BackendState {
        config: sample_config(),
        ..Default::default()
    });
    let client = ConfigClient::new(format!("{}/", backend.base_url()));

    let detectors = vec![Detector::placeholder()];
    client.save_detectors(&detectors, &[]).await.unwrap();

    let saved = backend.saved_detectors();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0][0]["name"], json!("New Detector"));
    assert_eq!(saved[0][0]["config"]["cycle_time"], json!(30));
}

#[tokio::test]
async fn save_detectors_writes_unreadable_entries_back_verbatim() {
    let backend = spawn(BackendState {
        config: sample_config(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let kept = json!({"name": "Gate", "id": "d2", "config": {"cycle_time": -1}});
    client
        .save_detectors(&[Detector::placeholder()], &[kept.clone()])
        .await
        .unwrap();

    let saved = backend.saved_detectors();
    assert_eq!(saved[0].as_array().unwrap().len(), 2);
    assert_eq!(saved[0][0]["name"], json!("New Detector"));
    assert_eq!(saved[0][1], kept);
}

#[tokio::test]
async fn save_api_key_posts_key() {
    let backend = spawn(BackendState {
        config: sample_config(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    client.save_api_key("k2").await.unwrap();
    assert_eq!(backend.state.lock().unwrap().saved_keys, vec!["k2".to_string()]);
}

#[tokio::test]
async fn create_detector_returns_backend_id() {
    let backend = spawn(BackendState {
        config: sample_config(),
        create_reply: "det_abc".into(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let id = client.create_detector(&Detector::placeholder()).await.unwrap();
    assert_eq!(id, "det_abc");
    let created = backend.state.lock().unwrap().created.clone();
    assert_eq!(created[0]["query"], json!("New Query?"));
}

#[tokio::test]
async fn failed_sentinel_becomes_error() {
    let backend = spawn(BackendState {
        config: sample_config(),
        create_reply: "Failed".into(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let err = client
        .create_detector(&Detector::placeholder())
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::CreationRejected { ref name } if name == "New Detector"));
    let health = client.metrics().route(ApiEndpoint::NewDetector);
    assert_eq!(health.failed, 1);
    assert_eq!(
        health.last_error.as_deref(),
        Some("backend refused to create detector 'New Detector'")
    );
}

#[tokio::test]
async fn exports_are_wrapped_as_data_uris() {
    let backend = spawn(BackendState {
        config: sample_config(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let json_link = client.get_export(ExportFormat::Json).await.unwrap();
    assert!(json_link.body.contains("\"api_key\": \"k1\""));
    assert!(json_link.data_uri.starts_with("data:application/json,%7B"));

    let yaml_link = client.get_export(ExportFormat::Yaml).await.unwrap();
    assert_eq!(yaml_link.body, "api_key: k1\n");
    assert_eq!(yaml_link.data_uri, "data:application/yaml,api_key%3A%20k1%0A");
}

fn attached_cameras() -> serde_json::Value {
    json!([
        {"image": "data:image/jpeg;base64,AAAA", "config": {"name": "webcam", "idx": 0}},
        {"image": "", "config": {"name": "rtsp", "address": "rtsp://10.0.0.4/stream"}}
    ])
}

#[tokio::test]
async fn refresh_cameras_rescans_backend() {
    let backend = spawn(BackendState {
        cameras: attached_cameras(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let cameras = client.refresh_cameras().await.unwrap();
    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[1].config.name, "rtsp");
    assert_eq!(backend.state.lock().unwrap().camera_scans, 1);
}

#[tokio::test]
async fn refresh_camera_returns_known_camera() {
    let backend = spawn(BackendState {
        cameras: attached_cameras(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let mut webcam = CameraConfig::named("webcam");
    webcam.idx = Some(0);
    let camera = client.refresh_camera(&webcam).await.unwrap().unwrap();
    assert_eq!(camera.config, webcam);
    assert_eq!(camera.image, "data:image/jpeg;base64,AAAA");
}

#[tokio::test]
async fn refresh_camera_of_unknown_config_is_none() {
    let backend = spawn(BackendState {
        cameras: attached_cameras(),
        ..Default::default()
    });
    let client = ConfigClient::new(backend.base_url());

    let camera = client
        .refresh_camera(&CameraConfig::named("usb-3"))
        .await
        .unwrap();
    assert!(camera.is_none());
    assert!(client.metrics().failing().is_empty());
}

#[tokio::test]
async fn wrong_base_path_reports_status() {
    let backend = spawn(BackendState {
        config: sample_config(),
        ..Default::default()
    });
    let client = ConfigClient::new(format!("{}/v2", backend.base_url()));

    let err = client.get_config().await.unwrap_err();
    assert!(matches!(err, EditorError::Status { status: 404, .. }));
    let failing = client.metrics().failing();
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].0, ApiEndpoint::Config);
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let client = ConfigClient::new("http://127.0.0.1:1");

    let err = client.get_config().await.unwrap_err();
    assert!(matches!(err, EditorError::Transport { .. }));
    assert_eq!(client.metrics().totals(), (0, 1));
}
