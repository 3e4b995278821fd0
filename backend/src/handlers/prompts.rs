use axum::{extract::State, Json};

use crate::services::prompts::PromptCatalog;
use crate::state::AppState;

/// Exposes the prompt sheets so course editors can inspect what the
/// assistant is actually told.
pub async fn prompt_catalog(State(state): State<AppState>) -> Json<PromptCatalog> {
    Json(PromptCatalog::load(&state.config.prompts_dir))
}
