use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aulabot_backend::app::build_router;
use aulabot_backend::config::Config;
use aulabot_backend::db::connection::create_pool;
use aulabot_backend::services::audio::{AudioStore, FsAudioStore};
use aulabot_backend::services::llm::LlmClient;
use aulabot_backend::services::session::SessionService;
use aulabot_backend::services::session_store::InMemorySessionStore;
use aulabot_backend::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aulabot_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        port = config.port,
        api_secret_key = %config
            .api_secret_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "<unset>".into()),
        user_jwt_secret = %mask_secret(&config.user_jwt_secret),
        session_ttl_days = config.session_ttl_days,
        allowed_origins = ?config.allowed_origins,
        chatbot_model = %config.chatbot_model,
        database_configured = config.database_url.is_some(),
        "Loaded configuration from environment/.env"
    );

    if config.insecure_dev_mode {
        tracing::warn!(
            "INSECURE_DEV_MODE is enabled: API key, origin, AJAX and session checks are all OFF. \
             Local development only."
        );
    }

    // Optional course database
    let db = match config.database_url.as_deref() {
        Some(url) => Some(create_pool(url).await?),
        None => {
            tracing::info!("DATABASE_URL not set, database endpoints will answer as unconfigured");
            None
        }
    };

    let sessions = SessionService::new(Arc::new(InMemorySessionStore::new()), &config);
    let llm = LlmClient::new(&config);
    let audio: Arc<dyn AudioStore> = Arc::new(FsAudioStore::new(config.uploads_dir.clone())?);

    let state = AppState::new(config.clone(), sessions.clone(), db, llm, audio);

    // Periodic sweep for sessions nobody refreshed again; reads already
    // drop expired records lazily.
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.sweep_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "swept expired sessions");
            }
        }
    });

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
