use crate::error::AppError;
use crate::state::AppState;
use crate::utils::security::verify_request_origin;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

pub async fn check_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config.insecure_dev_mode {
        return Ok(next.run(request).await);
    }

    verify_request_origin(request.headers(), &state.config.allowed_origins)?;
    Ok(next.run(request).await)
}
