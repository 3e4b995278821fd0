use rand::RngCore;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Shared secret every widget request must present in `x-api-key`.
    /// When unset, the API rejects everything except in dev mode.
    pub api_secret_key: Option<String>,
    pub user_jwt_secret: String,
    pub session_ttl_days: i64,
    pub allowed_origins: Vec<String>,
    pub database_url: Option<String>,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chatbot_model: String,
    pub chatbot_max_tokens: u32,
    pub chatbot_temperature: f32,
    pub audio_enabled: bool,
    pub audio_volume: f32,
    pub prompts_dir: PathBuf,
    pub uploads_dir: PathBuf,
    /// Skips the API key, origin, AJAX and session checks. Never enable
    /// outside a local workstation.
    pub insecure_dev_mode: bool,
    pub production_mode: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let api_secret_key = env::var("API_SECRET_KEY").ok().filter(|k| !k.is_empty());

        let user_jwt_secret = env::var("USER_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("USER_JWT_SECRET not set, generating an ephemeral secret; sessions will not survive a restart");
            random_secret()
        });

        let session_ttl_days = env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());

        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let chatbot_model = env::var("CHATBOT_MODEL").unwrap_or_else(|_| "gpt-4".to_string());
        let chatbot_max_tokens = env::var("CHATBOT_MAX_TOKENS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);
        let chatbot_temperature = env::var("CHATBOT_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse()
            .unwrap_or(0.7);

        let audio_enabled = env::var("AUDIO_ENABLED")
            .map(|v| v == "true")
            .unwrap_or(true);
        let audio_volume = env::var("AUDIO_VOLUME")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse()
            .unwrap_or(0.7);

        let prompts_dir = PathBuf::from(env::var("PROMPTS_DIR").unwrap_or_else(|_| "prompts".to_string()));
        let uploads_dir = PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let insecure_dev_mode = env::var("INSECURE_DEV_MODE")
            .map(|v| v == "true")
            .unwrap_or(false);

        let production_mode = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        Ok(Config {
            port,
            api_secret_key,
            user_jwt_secret,
            session_ttl_days,
            allowed_origins,
            database_url,
            openai_api_key,
            openai_base_url,
            chatbot_model,
            chatbot_max_tokens,
            chatbot_temperature,
            audio_enabled,
            audio_volume,
            prompts_dir,
            uploads_dir,
            insecure_dev_mode,
            production_mode,
        })
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
