use crate::config::Config;
use crate::db::connection::DbPool;
use crate::services::audio::AudioStore;
use crate::services::llm::LlmClient;
use crate::services::session::SessionService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionService,
    /// Absent when DATABASE_URL is not set; the proxy endpoints degrade
    /// instead of failing startup.
    pub db: Option<DbPool>,
    pub llm: LlmClient,
    pub audio: Arc<dyn AudioStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        sessions: SessionService,
        db: Option<DbPool>,
        llm: LlmClient,
        audio: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            config,
            sessions,
            db,
            llm,
            audio,
        }
    }
}
