//! Shared fixtures for scifair-server integration tests
//!
//! - `RecordingStore`: SQLite store that records every write
//! - `ScriptedAdvisor`: advisor returning canned answers
//! - `TestApp`: router over an in-memory database plus request helpers

#![allow(dead_code)]

pub mod recording_store;
pub mod scripted_advisor;

pub use recording_store::{RecordingStore, StoreWrite};
pub use scripted_advisor::{volcano_idea, AdvisorCall, ScriptedAdvisor};

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use scifair_common::db::init_memory_database;
use scifair_server::blobs::BlobStore;
use scifair_server::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

pub const BASE_URL: &str = "http://127.0.0.1:5740";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub store: Arc<RecordingStore>,
    pub advisor: Arc<ScriptedAdvisor>,
    pub blob_dir: TempDir,
}

pub struct TestOptions {
    pub advisor: ScriptedAdvisor,
    pub client_api_key: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            advisor: ScriptedAdvisor::new(),
            client_api_key: None,
            max_upload_bytes: None,
        }
    }
}

pub async fn test_app() -> TestApp {
    test_app_with(TestOptions::default()).await
}

pub async fn test_app_with(options: TestOptions) -> TestApp {
    let pool = init_memory_database().await.expect("in-memory database");
    let store = Arc::new(RecordingStore::new(pool.clone()));
    let advisor = Arc::new(options.advisor);
    let blob_dir = tempfile::tempdir().expect("blob dir");

    let mut state = AppState::new(
        pool.clone(),
        advisor.clone(),
        BlobStore::new(blob_dir.path().to_path_buf(), BASE_URL),
    )
    .with_store(store.clone())
    .with_client_api_key(options.client_api_key);
    if let Some(bytes) = options.max_upload_bytes {
        state = state.with_max_upload_bytes(bytes);
    }

    TestApp {
        router: build_router(state),
        pool,
        store,
        advisor,
        blob_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sign up and sign in, returning the session token
    pub async fn sign_in_new_user(&self, email: &str) -> String {
        let signup = json_request(
            "POST",
            "/auth/signup",
            None,
            json!({"email": email, "password": "secret-pass", "full_name": "Test Student"}),
        );
        let response = self.send(signup).await;
        assert_eq!(response.status(), 201, "signup failed for {}", email);

        let signin = json_request(
            "POST",
            "/auth/signin",
            None,
            json!({"email": email, "password": "secret-pass"}),
        );
        let response = self.send(signin).await;
        assert_eq!(response.status(), 200);
        let body = extract_json(response.into_body()).await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Generate a project through the API and return its JSON
    pub async fn create_project(&self, token: &str) -> Value {
        let request = json_request(
            "POST",
            "/api/projects/generate",
            Some(token),
            json!({"interests": "volcanoes", "ageGroup": "middle"}),
        );
        let response = self.send(request).await;
        assert_eq!(response.status(), 201);
        extract_json(response.into_body()).await
    }
}

/// Request with an optional bearer token and no body
pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Request with an optional bearer token and a JSON body
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn extract_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = extract_bytes(body).await;
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
