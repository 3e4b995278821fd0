use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// First gate on every API route: the shared widget key must match.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config.insecure_dev_mode {
        return Ok(next.run(request).await);
    }

    let Some(expected) = state.config.api_secret_key.as_deref() else {
        tracing::error!("API_SECRET_KEY is not configured, rejecting request");
        return Err(AppError::Unauthorized("No autorizado".to_string()));
    };

    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    if provided != Some(expected) {
        return Err(AppError::Unauthorized("No autorizado".to_string()));
    }

    Ok(next.run(request).await)
}
