use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

/// Unsafe methods must carry the `x-requested-with: XMLHttpRequest`
/// marker the widget always sets. Cross-site form posts cannot attach
/// custom headers.
pub async fn ajax_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config.insecure_dev_mode {
        return Ok(next.run(request).await);
    }

    if matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return Ok(next.run(request).await);
    }

    let marker = request
        .headers()
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok());

    if marker != Some("XMLHttpRequest") {
        return Err(AppError::Forbidden("Solicitud no permitida".to_string()));
    }

    Ok(next.run(request).await)
}
