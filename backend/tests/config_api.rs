use axum::http::StatusCode;

mod support;

use support::{body_json, get, send, test_app, test_dirs};

#[tokio::test]
async fn config_exposes_runtime_settings_in_camel_case() {
    let dirs = test_dirs();
    let app = test_app(&dirs);

    let response = send(&app, get("/api/config")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["openaiModel"], "gpt-4");
    assert_eq!(body["maxTokens"], 1000);
    assert_eq!(body["audioEnabled"], true);
    assert!(body["temperature"].is_number());
    assert!(body["audioVolume"].is_number());
    assert!(body["prompts"].is_object());
}

#[tokio::test]
async fn config_includes_the_prompt_sheets_from_disk() {
    let dirs = test_dirs();
    std::fs::write(dirs.prompts.path().join("system.es.md"), "Eres AulaBot.\n")
        .expect("write sheet");
    std::fs::write(dirs.prompts.path().join("safety.es.md"), "No inventes datos.")
        .expect("write sheet");
    let app = test_app(&dirs);

    let response = send(&app, get("/api/config")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["prompts"]["system"], "Eres AulaBot.");
    assert_eq!(body["prompts"]["style"], "");
    assert_eq!(
        body["prompts"]["combined"],
        "Eres AulaBot.\n\nNo inventes datos."
    );
}

#[tokio::test]
async fn prompts_answers_with_the_full_catalog() {
    let dirs = test_dirs();
    for (name, content) in [
        ("system.es.md", "Eres AulaBot."),
        ("style.es.md", "Responde breve."),
        ("safety.es.md", "No inventes datos."),
        ("tools.es.md", "Sugiere el menú."),
        ("examples.es.md", "P: hola\nR: ¡Hola!"),
    ] {
        std::fs::write(dirs.prompts.path().join(name), content).expect("write sheet");
    }
    let app = test_app(&dirs);

    let response = send(&app, get("/api/prompts")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["system"], "Eres AulaBot.");
    assert_eq!(body["examples"], "P: hola\nR: ¡Hola!");
    // Safety outranks tools in the combined sheet.
    assert_eq!(
        body["combined"],
        "Eres AulaBot.\n\nResponde breve.\n\nNo inventes datos.\n\nSugiere el menú."
    );
}

#[tokio::test]
async fn prompt_edits_show_up_without_a_restart() {
    let dirs = test_dirs();
    let app = test_app(&dirs);

    let response = send(&app, get("/api/prompts")).await;
    assert_eq!(body_json(response).await["combined"], "");

    std::fs::write(dirs.prompts.path().join("system.es.md"), "Versión nueva.")
        .expect("write sheet");

    let response = send(&app, get("/api/prompts")).await;
    assert_eq!(body_json(response).await["combined"], "Versión nueva.");
}
