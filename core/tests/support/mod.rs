#![allow(dead_code)]

//! In-process stand-in for the detector backend, bound to an ephemeral port.

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::Filter;

#[derive(Debug, Default)]
pub struct BackendState {
    pub config: Value,
    pub catalog: Value,
    pub cameras: Value,
    pub camera_scans: usize,
    pub create_reply: String,
    pub created: Vec<Value>,
    pub saved_detectors: Vec<Value>,
    pub saved_keys: Vec<String>,
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn saved_detectors(&self) -> Vec<Value> {
        self.state.lock().unwrap().saved_detectors.clone()
    }
}

pub fn sample_config() -> Value {
    json!({
        "api_key": "k1",
        "endpoint": "https://api.example.com",
        "detectors": [{
            "name": "Cam1",
            "id": "d1",
            "query": "q",
            "config": {
                "enabled": true,
                "vid_config": {"name": "webcam", "idx": 0, "input_type": "webcam"},
                "image": "",
                "trigger_type": "time",
                "cycle_time": 30,
                "pin": null,
                "pin_active_state": null
            }
        }]
    })
}

pub fn spawn(state: BackendState) -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(state));
    let shared = state.clone();
    let with_state = warp::any().map(move || shared.clone());

    let config = warp::path!("api" / "config")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: Shared| warp::reply::json(&state.lock().unwrap().config));

    let catalog = warp::path!("api" / "detectors")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: Shared| warp::reply::json(&state.lock().unwrap().catalog));

    let cameras = warp::path!("api" / "cameras")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: Shared| warp::reply::json(&state.lock().unwrap().cameras));

    let refresh_cameras = warp::path!("api" / "refresh-cameras")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: Shared| {
            let mut state = state.lock().unwrap();
            state.camera_scans += 1;
            warp::reply::json(&state.cameras)
        });

    // Echoes the known camera whose config matches the posted one, else `null`.
    let refresh_camera = warp::path!("api" / "refresh-camera")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .map(|config: Value, state: Shared| {
            let state = state.lock().unwrap();
            let camera = state
                .cameras
                .as_array()
                .and_then(|cameras| cameras.iter().find(|camera| camera["config"] == config))
                .cloned()
                .unwrap_or(Value::Null);
            warp::reply::json(&camera)
        });

    let json_pretty = warp::path!("api" / "config-json-pretty")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: Shared| {
            let text = serde_json::to_string_pretty(&state.lock().unwrap().config).unwrap();
            warp::reply::json(&text)
        });

    let yaml_pretty = warp::path!("api" / "config-yaml-pretty")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: Shared| {
            let key = state.lock().unwrap().config["api_key"].clone();
            let text = format!("api_key: {}\n", key.as_str().unwrap_or_default());
            warp::reply::json(&text)
        });

    let save_detectors = warp::path!("api" / "config" / "detectors")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .map(|body: Value, state: Shared| {
            let mut state = state.lock().unwrap();
            state.config["detectors"] = body["detectors"].clone();
            state.saved_detectors.push(body["detectors"].clone());
            warp::reply::json(&state.config)
        });

    let save_key = warp::path!("api" / "config" / "api_key")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .map(|body: Value, state: Shared| {
            let mut state = state.lock().unwrap();
            let key = body["api_key"].as_str().unwrap_or_default().to_string();
            state.config["api_key"] = json!(key);
            state.saved_keys.push(key);
            warp::reply::json(&state.config)
        });

    let new_detector = warp::path!("api" / "new-detector")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state)
        .map(|body: Value, state: Shared| {
            let mut state = state.lock().unwrap();
            state.created.push(body);
            warp::reply::json(&state.create_reply)
        });

    let routes = config
        .or(catalog)
        .or(cameras)
        .or(refresh_cameras)
        .or(refresh_camera)
        .or(json_pretty)
        .or(yaml_pretty)
        .or(save_detectors)
        .or(save_key)
        .or(new_detector);

    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    MockBackend { addr, state }
}
