use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 2048;

/// Records diagnostics whenever a handler answers 4xx or 5xx. The body
/// is buffered so the same payload still reaches the caller.
pub async fn log_error_responses(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let latency_ms = start.elapsed().as_millis() as u64;
    let (mut parts, body) = response.into_parts();

    match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => {
            let preview = if bytes.len() > MAX_LOGGED_BODY_BYTES {
                format!(
                    "{}... (truncated, {} bytes total)",
                    String::from_utf8_lossy(&bytes.slice(0..MAX_LOGGED_BODY_BYTES)),
                    bytes.len()
                )
            } else {
                String::from_utf8_lossy(&bytes).to_string()
            };

            if status.is_server_error() {
                tracing::error!(status = status.as_u16(), method, uri, latency_ms, body = %preview, "request failed");
            } else {
                tracing::warn!(status = status.as_u16(), method, uri, latency_ms, body = %preview, "request rejected");
            }

            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            parts.headers.remove(axum::http::header::CONTENT_LENGTH);
            tracing::error!(status = status.as_u16(), method, uri, latency_ms, error = ?err, "failed to buffer error response body");
            Response::from_parts(parts, Body::empty())
        }
    }
}
