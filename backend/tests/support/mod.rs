#![allow(dead_code)]
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use aulabot_backend::app::build_router;
use aulabot_backend::config::Config;
use aulabot_backend::services::audio::FsAudioStore;
use aulabot_backend::services::llm::LlmClient;
use aulabot_backend::services::session::SessionService;
use aulabot_backend::services::session_store::InMemorySessionStore;
use aulabot_backend::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_ORIGIN: &str = "http://localhost:3000";
pub const TEST_USER_AGENT: &str = "Mozilla/5.0 (pruebas)";
pub const TEST_LANGUAGE: &str = "es-ES,es;q=0.9";

/// Directories backing one test instance. Keep the struct alive for
/// the whole test; dropping it deletes the files.
pub struct TestDirs {
    pub prompts: TempDir,
    pub uploads: TempDir,
}

pub fn test_dirs() -> TestDirs {
    TestDirs {
        prompts: tempfile::tempdir().expect("prompts dir"),
        uploads: tempfile::tempdir().expect("uploads dir"),
    }
}

pub fn test_config(dirs: &TestDirs) -> Config {
    Config {
        port: 0,
        api_secret_key: Some(TEST_API_KEY.into()),
        user_jwt_secret: "una_clave_de_prueba_suficientemente_larga_123".into(),
        session_ttl_days: 30,
        allowed_origins: vec![TEST_ORIGIN.into()],
        database_url: None,
        openai_api_key: "sk-test".into(),
        // Unroutable unless a test points it at a stub server.
        openai_base_url: "http://127.0.0.1:9/v1".into(),
        chatbot_model: "gpt-4".into(),
        chatbot_max_tokens: 1000,
        chatbot_temperature: 0.7,
        audio_enabled: true,
        audio_volume: 0.7,
        prompts_dir: dirs.prompts.path().to_path_buf(),
        uploads_dir: dirs.uploads.path().to_path_buf(),
        insecure_dev_mode: false,
        production_mode: false,
    }
}

pub fn test_state(config: Config) -> AppState {
    let sessions = SessionService::new(Arc::new(InMemorySessionStore::new()), &config);
    let llm = LlmClient::new(&config);
    let audio =
        Arc::new(FsAudioStore::new(config.uploads_dir.clone()).expect("uploads store"));
    AppState::new(config, sessions, None, llm, audio)
}

pub fn test_app(dirs: &TestDirs) -> Router {
    build_router(test_state(test_config(dirs)))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("send request")
}

/// GET with the full browser-shaped header set the middleware expects.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::USER_AGENT, TEST_USER_AGENT)
        .header(header::ACCEPT_LANGUAGE, TEST_LANGUAGE)
        .header(header::ORIGIN, TEST_ORIGIN)
        .header("x-api-key", TEST_API_KEY)
        .body(Body::empty())
        .unwrap()
}

/// POST with JSON body, API key, origin and the same-origin marker.
pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::USER_AGENT, TEST_USER_AGENT)
        .header(header::ACCEPT_LANGUAGE, TEST_LANGUAGE)
        .header(header::ORIGIN, TEST_ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-api-key", TEST_API_KEY)
        .header("x-requested-with", "XMLHttpRequest")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_session(mut request: Request<Body>, user_id: &str, token: &str) -> Request<Body> {
    let headers = request.headers_mut();
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    headers.insert("x-user-id", user_id.parse().unwrap());
    request
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json body")
}

/// Issue a session through the real endpoint and hand back
/// `(user_id, token)`.
pub async fn issue_session(app: &Router, username: &str) -> (String, String) {
    let response = send(app, post_json("/api/auth/issue", json!({ "username": username }))).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let body = body_json(response).await;
    let user_id = body["userId"].as_str().expect("userId").to_string();
    let token = body["token"].as_str().expect("token").to_string();
    (user_id, token)
}
