use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::db::query;
use crate::error::AppError;
use crate::services::session::AuthenticatedUser;
use crate::state::AppState;

/// Runs a parameterized query against the course database. Configuring
/// the database at all is opt-in, so the missing-pool answer comes
/// first, whatever the body says.
pub async fn run_query(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Some(pool) = state.db.as_ref() else {
        return Err(AppError::NotConfigured(
            "Base de datos no configurada".to_string(),
        ));
    };

    let Json(payload) =
        payload.map_err(|_| AppError::BadRequest("Query requerida".to_string()))?;

    let sql = payload
        .get("query")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query requerida".to_string()))?;

    let params = payload
        .get("params")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let rows = query::run_query(pool, sql, &params).await.map_err(|err| {
        tracing::error!(user_id = %user.user_id, error = %err, "database query failed");
        AppError::Upstream {
            message: "Error consultando la base de datos".to_string(),
            details: None,
        }
    })?;

    Ok(Json(json!({ "data": rows })))
}

/// Best-effort course context for a student question. Never fails: the
/// assistant works without context, so every problem collapses to an
/// empty list.
pub async fn course_context(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthenticatedUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Json<Value> {
    let empty = Json(json!({ "data": [] }));

    let Some(pool) = state.db.as_ref() else {
        return empty;
    };
    let Ok(Json(payload)) = payload else {
        return empty;
    };
    let Some(question) = payload
        .get("userQuestion")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
    else {
        return empty;
    };

    match query::course_context(pool, question).await {
        Ok(rows) => Json(json!({ "data": rows })),
        Err(err) => {
            tracing::warn!(error = %err, "context lookup failed, continuing without it");
            empty
        }
    }
}
