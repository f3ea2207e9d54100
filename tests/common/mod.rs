// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Shared test harness: an in-process fake backend plus core wiring helpers.

use alerta_client::config::Config;
use alerta_client::store::{KeyValueStore, MemoryStore, SessionStore};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Session token the fake backend hands out on login.
pub const TEST_TOKEN: &str = "test-session-token";
/// Password the fake backend accepts.
pub const TEST_PASSWORD: &str = "hunter2";

/// One request as it arrived at an authenticated endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// Mutable state behind the fake backend.
#[derive(Default)]
pub struct BackendState {
    pub alerts: Mutex<Vec<RecordedRequest>>,
    pub push_tokens: Mutex<Vec<RecordedRequest>>,
    /// When set, every authenticated endpoint answers 401.
    pub reject_authed: AtomicBool,
}

pub struct FakeBackend {
    pub state: Arc<BackendState>,
    pub base_url: String,
}

impl FakeBackend {
    #[allow(dead_code)]
    pub fn alert_count(&self) -> usize {
        self.state.alerts.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn reject_authed(&self, reject: bool) {
        self.state.reject_authed.store(reject, Ordering::SeqCst);
    }
}

/// Spawn the fake backend on an ephemeral port.
pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(BackendState::default());

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/panic/alerta", post(alert))
        .route("/users/token", post(push_token))
        .route("/users/", get(users))
        .route("/media/packages/list", get(media_packages))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        state,
        base_url: format!("http://{}", addr),
    }
}

/// Config pointed at the fake backend, with short dispatcher timings.
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        ..Config::test_default()
    }
}

/// Fresh in-memory storage and a session store over it.
#[allow(dead_code)]
pub fn memory_session() -> (Arc<dyn KeyValueStore>, Arc<SessionStore>) {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionStore::open(storage.clone()).unwrap());
    (storage, session)
}

/// Short pause for spawned tasks to make progress.
#[allow(dead_code)]
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn test_user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "email": "ana@example.com",
        "phone": "60001234",
        "name": "Ana",
        "maxSubscriptionLimit": 3,
        "role": "user"
    })
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(String::from)
}

fn authorized(state: &BackendState, auth: &Option<String>) -> bool {
    !state.reject_authed.load(Ordering::SeqCst)
        && auth.as_deref() == Some(&format!("Bearer {}", TEST_TOKEN))
}

async fn login(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
    if body["password"] == TEST_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "token": TEST_TOKEN, "user": test_user_json() })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
    }
}

async fn alert(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let authorization = bearer_of(&headers);
    state.alerts.lock().unwrap().push(RecordedRequest {
        authorization: authorization.clone(),
        body,
    });

    if authorized(&state, &authorization) {
        (StatusCode::OK, Json(json!({})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        )
    }
}

async fn push_token(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let authorization = bearer_of(&headers);
    state.push_tokens.lock().unwrap().push(RecordedRequest {
        authorization: authorization.clone(),
        body,
    });

    if authorized(&state, &authorization) {
        (StatusCode::OK, Json(json!({})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        )
    }
}

async fn users(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&state, &bearer_of(&headers)) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "users": [
                test_user_json(),
                {
                    "id": "a1",
                    "email": "root@example.com",
                    "phone": "60009999",
                    "name": "Root",
                    "maxSubscriptionLimit": 99,
                    "role": "admin"
                }
            ]
        })),
    )
}

async fn media_packages(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    if !authorized(&state, &bearer_of(&headers)) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            { "id": "m1", "url": "https://cdn.example/a1.png", "type": "avatar", "status": true },
            { "id": "m2", "url": "https://cdn.example/a2.png", "type": "avatar", "status": false },
            { "id": "m3", "url": "https://cdn.example/ad.png", "type": "advertising", "status": true }
        ])),
    )
}
