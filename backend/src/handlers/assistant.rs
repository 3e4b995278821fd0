use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::llm::LlmError;
use crate::services::prompts::PromptCatalog;
use crate::services::session::AuthenticatedUser;
use crate::state::AppState;

const DEFAULT_SYSTEM_PROMPT: &str = "Eres un asistente educativo en español.";

/// Proxies one chat turn to the upstream LLM. The widget never sees the
/// upstream key; it only ever talks to this endpoint.
pub async fn ask_assistant(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::BadRequest("Solicitud inválida".to_string()))?;

    let prompt = payload
        .get("prompt")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Prompt requerido".to_string()))?;

    let context = payload
        .get("context")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let prompts = PromptCatalog::load(&state.config.prompts_dir);
    let mut system_prompt = if prompts.combined.is_empty() {
        DEFAULT_SYSTEM_PROMPT.to_string()
    } else {
        prompts.combined.clone()
    };
    if let Some(context) = context {
        system_prompt.push_str("\n\nContexto adicional (BD/UI):\n");
        system_prompt.push_str(context);
    }

    let answer = state
        .llm
        .chat(&system_prompt, &prompts.examples, prompt)
        .await
        .map_err(|err| upstream_error(err, state.config.production_mode))?;

    tracing::info!(user_id = %user.user_id, chars = answer.len(), "assistant turn served");

    Ok(Json(json!({ "response": answer })))
}

fn upstream_error(err: LlmError, production_mode: bool) -> AppError {
    let details = match &err {
        LlmError::Upstream { status, body } => {
            let preview: String = body.chars().take(300).collect();
            tracing::error!(status, body = %preview, "upstream LLM rejected the request");
            (!production_mode).then(|| json!({ "upstreamStatus": status }))
        }
        other => {
            tracing::error!("assistant call failed: {}", other);
            None
        }
    };

    AppError::Upstream {
        message: "Error procesando la solicitud".to_string(),
        details,
    }
}
