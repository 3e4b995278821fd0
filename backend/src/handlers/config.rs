use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::prompts::PromptCatalog;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfigResponse {
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub audio_enabled: bool,
    pub audio_volume: f32,
    pub prompts: PromptCatalog,
}

/// Runtime settings the widget needs before its first turn.
pub async fn runtime_config(State(state): State<AppState>) -> Json<RuntimeConfigResponse> {
    Json(RuntimeConfigResponse {
        openai_model: state.config.chatbot_model.clone(),
        max_tokens: state.config.chatbot_max_tokens,
        temperature: state.config.chatbot_temperature,
        audio_enabled: state.config.audio_enabled,
        audio_volume: state.config.audio_volume,
        prompts: PromptCatalog::load(&state.config.prompts_dir),
    })
}
