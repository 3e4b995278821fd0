use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::handlers;
use crate::middleware as guard;
use crate::state::AppState;

/// Matches the widget's upload cap; voice notes stay well under it.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/config", get(handlers::config::runtime_config))
        .route("/api/prompts", get(handlers::prompts::prompt_catalog))
        .route("/api/auth/issue", post(handlers::auth::issue_session))
        .route("/api/audio/upload", post(handlers::audio::upload_audio));

    let session_routes = Router::new()
        .route("/api/openai", post(handlers::assistant::ask_assistant))
        .route("/api/database", post(handlers::database::run_query))
        .route("/api/context", post(handlers::database::course_context))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::require_session,
        ));

    // route_layer ordering: the layer added last runs first, so requests
    // pass api key -> origin -> ajax marker -> (per-route) session.
    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::ajax_guard,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::check_origin,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            guard::require_api_key,
        ))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(guard::request_id))
                .layer(axum_middleware::from_fn(guard::client_ip))
                .layer(axum_middleware::from_fn(guard::log_error_responses))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Ruta no encontrada".to_string())
}
