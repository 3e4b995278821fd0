//! HTTP client for the aulabot backend. Every call carries the shared
//! API key; session-scoped calls add the bearer token and user id, and
//! state-changing calls add the same-origin marker header.

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("fallo de red: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with its JSON error envelope.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("no hay sesión activa")]
    NoSession,
    #[error("respuesta del servidor con formato inesperado")]
    MalformedResponse,
}

/// Credentials from `POST /api/auth/issue`, attached to later calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCredentials {
    pub user_id: String,
    pub token: String,
    pub expires_in_days: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptSheets {
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub tools: String,
    #[serde(default)]
    pub safety: String,
    #[serde(default)]
    pub examples: String,
    #[serde(default)]
    pub combined: String,
}

/// Non-secret knobs served by `GET /api/config`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub audio_enabled: bool,
    pub audio_volume: f32,
    #[serde(default)]
    pub prompts: PromptSheets,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            openai_model: "gpt-4".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            audio_enabled: true,
            audio_volume: 0.7,
            prompts: PromptSheets::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAudio {
    pub url: String,
    pub size: u64,
    pub mimetype: String,
}

/// Backend operations the chat runtime depends on. Tests drive the
/// runtime with an in-memory fake.
#[async_trait]
pub trait ChatApi {
    async fn fetch_config(&self) -> Result<RuntimeConfig, ProxyError>;
    async fn issue_session(&mut self, username: &str) -> Result<IssuedCredentials, ProxyError>;
    async fn assistant_reply(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<String, ProxyError>;
    /// Course rows matching the question. Empty on any failure.
    async fn context_snippets(&self, question: &str) -> Vec<Value>;
    async fn prompt_sheets(&self) -> Result<PromptSheets, ProxyError>;
    async fn upload_audio(
        &self,
        bytes: Vec<u8>,
        mimetype: &str,
    ) -> Result<UploadedAudio, ProxyError>;
}

pub struct ProxyClient {
    http: Client,
    base_url: String,
    api_key: String,
    credentials: Option<IssuedCredentials>,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            credentials: None,
        }
    }

    pub fn credentials(&self) -> Option<&IssuedCredentials> {
        self.credentials.as_ref()
    }

    /// Restore credentials persisted from an earlier visit.
    pub fn set_credentials(&mut self, credentials: IssuedCredentials) {
        self.credentials = Some(credentials);
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
            .header("x-requested-with", "XMLHttpRequest")
    }

    fn post_with_session(&self, path: &str) -> Result<RequestBuilder, ProxyError> {
        let credentials = self.credentials.as_ref().ok_or(ProxyError::NoSession)?;
        Ok(self
            .post(path)
            .bearer_auth(&credentials.token)
            .header("x-user-id", &credentials.user_id))
    }
}

#[async_trait]
impl ChatApi for ProxyClient {
    async fn fetch_config(&self) -> Result<RuntimeConfig, ProxyError> {
        let response = self.get("/api/config").send().await?;
        parse_json(response).await
    }

    async fn issue_session(&mut self, username: &str) -> Result<IssuedCredentials, ProxyError> {
        let response = self
            .post("/api/auth/issue")
            .json(&json!({ "username": username }))
            .send()
            .await?;
        let issued: IssuedCredentials = parse_json(response).await?;
        self.credentials = Some(issued.clone());
        Ok(issued)
    }

    async fn assistant_reply(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<String, ProxyError> {
        let mut body = json!({ "prompt": prompt });
        if let Some(context) = context {
            body["context"] = json!(context);
        }

        let response = self
            .post_with_session("/api/openai")?
            .json(&body)
            .send()
            .await?;
        let payload: Value = parse_json(response).await?;
        payload
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ProxyError::MalformedResponse)
    }

    async fn context_snippets(&self, question: &str) -> Vec<Value> {
        let request = match self.post_with_session("/api/context") {
            Ok(request) => request,
            Err(_) => return Vec::new(),
        };

        let response = match request
            .json(&json!({ "userQuestion": question }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                log::debug!("context fetch failed: {err}");
                return Vec::new();
            }
        };

        match parse_json::<Value>(response).await {
            Ok(payload) => payload
                .get("data")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            Err(err) => {
                log::debug!("context payload unusable: {err}");
                Vec::new()
            }
        }
    }

    async fn prompt_sheets(&self) -> Result<PromptSheets, ProxyError> {
        let response = self.get("/api/prompts").send().await?;
        parse_json(response).await
    }

    async fn upload_audio(
        &self,
        bytes: Vec<u8>,
        mimetype: &str,
    ) -> Result<UploadedAudio, ProxyError> {
        let part = multipart::Part::bytes(bytes)
            .file_name("nota_de_voz.webm")
            .mime_str(mimetype)?;
        let form = multipart::Form::new().part("audio", part);

        let response = self
            .post("/api/audio/upload")
            .multipart(form)
            .send()
            .await?;
        parse_json(response).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProxyError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|_| ProxyError::MalformedResponse)
    } else {
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error,
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        Err(ProxyError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
