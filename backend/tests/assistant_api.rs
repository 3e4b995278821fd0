use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use aulabot_backend::app::build_router;

mod support;

use support::{
    body_json, issue_session, post_json, send, test_config, test_dirs, test_state, with_session,
    TestDirs, TEST_API_KEY, TEST_LANGUAGE, TEST_ORIGIN, TEST_USER_AGENT,
};

/// Minimal OpenAI-shaped upstream on a random local port. Records every
/// request body it sees.
struct StubUpstream {
    base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl StubUpstream {
    async fn start(status: StatusCode, reply: Value) -> Self {
        let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(body): Json<Value>| {
                let seen = seen.clone();
                let reply = reply.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    (status, Json(reply))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub upstream");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        StubUpstream {
            base_url: format!("http://{addr}/v1"),
            requests,
        }
    }

    fn last_request(&self) -> Value {
        self.requests.lock().unwrap().last().expect("request").clone()
    }
}

fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "content": content } }] })
}

fn app_against(dirs: &TestDirs, base_url: &str) -> Router {
    let mut config = test_config(dirs);
    config.openai_base_url = base_url.to_string();
    build_router(test_state(config))
}

#[tokio::test]
async fn assistant_turns_proxy_the_upstream_reply() {
    let dirs = test_dirs();
    let upstream = StubUpstream::start(
        StatusCode::OK,
        completion("Claro, veamos redes neuronales."),
    )
    .await;
    let app = app_against(&dirs, &upstream.base_url);
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    let request = with_session(
        post_json("/api/openai", json!({ "prompt": "¿Qué es una red neuronal?" })),
        &user_id,
        &token,
    );
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response"], "Claro, veamos redes neuronales.");

    let sent = upstream.last_request();
    assert_eq!(sent["model"], "gpt-4");
    assert_eq!(sent["max_tokens"], 1000);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(
        sent["messages"].as_array().unwrap().last().unwrap()["content"],
        "¿Qué es una red neuronal?"
    );
}

#[tokio::test]
async fn prompt_sheets_and_context_shape_the_system_messages() {
    let dirs = test_dirs();
    for (name, content) in [
        ("system.es.md", "Eres AulaBot."),
        ("style.es.md", "Responde breve."),
        ("safety.es.md", "No compartas datos personales."),
        ("tools.es.md", "Sugiere el menú cuando ayude."),
        ("examples.es.md", "Usuario: hola\nBot: ¡Hola!"),
    ] {
        std::fs::write(dirs.prompts.path().join(name), content).expect("write prompt sheet");
    }

    let upstream = StubUpstream::start(StatusCode::OK, completion("Vale.")).await;
    let app = app_against(&dirs, &upstream.base_url);
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    let request = with_session(
        post_json(
            "/api/openai",
            json!({
                "prompt": "Explícame las CNN",
                "context": "- CNN: redes para imágenes",
            }),
        ),
        &user_id,
        &token,
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let messages = upstream.last_request()["messages"].clone();
    assert_eq!(
        messages[0]["content"],
        "Eres AulaBot.\n\nResponde breve.\n\nNo compartas datos personales.\n\n\
         Sugiere el menú cuando ayude.\n\nContexto adicional (BD/UI):\n- CNN: redes para imágenes"
    );
    assert_eq!(messages[1]["role"], "system");
    assert_eq!(
        messages[1]["content"],
        "Ejemplos de estilo:\n\nUsuario: hola\nBot: ¡Hola!"
    );
    assert_eq!(
        messages[2],
        json!({ "role": "user", "content": "Explícame las CNN" })
    );
}

#[tokio::test]
async fn upstream_rejections_map_to_a_spanish_500_with_details() {
    let dirs = test_dirs();
    let upstream = StubUpstream::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "boom" }),
    )
    .await;
    let app = app_against(&dirs, &upstream.base_url);
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    let request = with_session(
        post_json("/api/openai", json!({ "prompt": "hola" })),
        &user_id,
        &token,
    );
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Error procesando la solicitud");
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(body["details"]["upstreamStatus"], 500);
}

#[tokio::test]
async fn production_mode_hides_upstream_details() {
    let dirs = test_dirs();
    let upstream =
        StubUpstream::start(StatusCode::BAD_GATEWAY, json!({ "error": "boom" })).await;
    let mut config = test_config(&dirs);
    config.openai_base_url = upstream.base_url.clone();
    config.production_mode = true;
    let app = build_router(test_state(config));
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    let request = with_session(
        post_json("/api/openai", json!({ "prompt": "hola" })),
        &user_id,
        &token,
    );
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Error procesando la solicitud");
    assert!(body["details"].is_null());
}

#[tokio::test]
async fn an_unreachable_upstream_maps_to_the_same_spanish_500() {
    let dirs = test_dirs();
    // Default test config points at an unroutable local port.
    let app = build_router(test_state(test_config(&dirs)));
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    let request = with_session(
        post_json("/api/openai", json!({ "prompt": "hola" })),
        &user_id,
        &token,
    );
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Error procesando la solicitud");
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(body["details"].is_null());
}

#[tokio::test]
async fn missing_or_blank_prompts_are_rejected() {
    let dirs = test_dirs();
    let app = build_router(test_state(test_config(&dirs)));
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    for payload in [json!({}), json!({ "prompt": "   " }), json!({ "prompt": 7 })] {
        let request = with_session(post_json("/api/openai", payload), &user_id, &token);
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Prompt requerido");
    }
}

#[tokio::test]
async fn a_body_that_is_not_json_is_rejected() {
    let dirs = test_dirs();
    let app = build_router(test_state(test_config(&dirs)));
    let (user_id, token) = issue_session(&app, "Ana Gómez").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/openai")
        .header(header::USER_AGENT, TEST_USER_AGENT)
        .header(header::ACCEPT_LANGUAGE, TEST_LANGUAGE)
        .header(header::ORIGIN, TEST_ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-api-key", TEST_API_KEY)
        .header("x-requested-with", "XMLHttpRequest")
        .body(Body::from("{nope"))
        .unwrap();
    let request = with_session(request, &user_id, &token);
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Solicitud inválida");
}
