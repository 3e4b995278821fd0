use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::client_ip::ClientIp;
use crate::state::AppState;
use crate::utils::fingerprint::Fingerprint;
use crate::validation::rules;

#[derive(Debug, Deserialize, Validate)]
pub struct IssueSessionRequest {
    #[validate(custom(function = "rules::validate_display_name"))]
    pub username: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSessionResponse {
    pub user_id: String,
    pub token: String,
    pub expires_in_days: i64,
}

/// Registers a display name and hands back a fingerprint-bound bearer
/// session for this device.
pub async fn issue_session(
    State(state): State<AppState>,
    Extension(client_ip): Extension<ClientIp>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IssueSessionResponse>, AppError> {
    let Json(payload) =
        payload.map_err(|_| AppError::BadRequest("Usuario inválido".to_string()))?;
    let request: IssueSessionRequest = serde_json::from_value(payload)
        .map_err(|_| AppError::BadRequest("Usuario inválido".to_string()))?;
    request
        .validate()
        .map_err(|_| AppError::BadRequest("Usuario inválido".to_string()))?;

    let fingerprint = Fingerprint::compute(&headers, client_ip.0);
    let issued = state
        .sessions
        .issue(&request.username, &fingerprint)
        .await?;

    Ok(Json(IssueSessionResponse {
        user_id: issued.user_id,
        token: issued.token,
        expires_in_days: issued.expires_in_days,
    }))
}
