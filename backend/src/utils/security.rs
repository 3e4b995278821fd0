use crate::error::AppError;
use axum::http::HeaderMap;

/// Checks `Origin` (exact, trailing slash ignored) falling back to
/// `Referer` (prefix match). Requests that carry neither header pass:
/// non-browser clients identify themselves with the API key instead.
pub fn verify_request_origin(headers: &HeaderMap, allowed: &[String]) -> Result<(), AppError> {
    if let Some(origin) = headers.get("origin").and_then(|v| v.to_str().ok()) {
        let origin = origin.trim_end_matches('/');
        if allowed.iter().any(|o| o == origin) {
            return Ok(());
        }
        return Err(AppError::Forbidden("Origen no permitido".to_string()));
    }

    if let Some(referer) = headers.get("referer").and_then(|v| v.to_str().ok()) {
        if allowed.iter().any(|o| referer.starts_with(o.as_str())) {
            return Ok(());
        }
        return Err(AppError::Forbidden("Origen no permitido".to_string()));
    }

    Ok(())
}
