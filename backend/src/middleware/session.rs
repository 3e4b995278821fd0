use crate::error::AppError;
use crate::middleware::client_ip::ClientIp;
use crate::services::session::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::fingerprint::Fingerprint;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// Session gate for endpoints that spend money or touch data. Requires
/// a bearer token plus the matching `x-user-id`, both bound to the
/// caller's device fingerprint.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config.insecure_dev_mode {
        request.extensions_mut().insert(AuthenticatedUser {
            user_id: "dev".to_string(),
            username: "dev".to_string(),
        });
        return Ok(next.run(request).await);
    }

    let (token, claimed_user_id, fingerprint) = {
        let headers = request.headers();
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_bearer_token)
            .map(|t| t.to_string());
        let claimed_user_id = headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let peer_ip = request
            .extensions()
            .get::<ClientIp>()
            .and_then(|client| client.0);
        (token, claimed_user_id, Fingerprint::compute(headers, peer_ip))
    };

    let token = token.ok_or_else(|| AppError::Unauthorized("Sesión requerida".to_string()))?;
    let claimed_user_id =
        claimed_user_id.ok_or_else(|| AppError::Unauthorized("Sesión requerida".to_string()))?;

    let user = state
        .sessions
        .verify(&token, &claimed_user_id, &fingerprint)
        .await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        let rest = rest.trim_start();
        if !rest.is_empty() {
            return Some(rest);
        }
    }
    None
}
