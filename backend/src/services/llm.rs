use crate::config::Config;
use serde_json::{json, Value};

/// Upper bound on the examples sheet sent upstream per request.
const MAX_EXAMPLES_CHARS: usize = 4000;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream response missing message content")]
    MalformedResponse,
}

/// Thin client for an OpenAI-compatible chat completions API.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.openai_api_key.clone(),
            api_base: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.chatbot_model.clone(),
            max_tokens: config.chatbot_max_tokens,
            temperature: config.chatbot_temperature,
        }
    }

    /// Sends one user turn with the combined system prompt and optional
    /// style examples, returning the assistant's text.
    pub async fn chat(
        &self,
        system_prompt: &str,
        examples: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        let mut messages = vec![json!({ "role": "system", "content": system_prompt })];

        if !examples.is_empty() {
            let clipped: String = examples.chars().take(MAX_EXAMPLES_CHARS).collect();
            messages.push(json!({
                "role": "system",
                "content": format!("Ejemplos de estilo:\n\n{}", clipped),
            }));
        }

        messages.push(json!({ "role": "user", "content": user_prompt }));

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": messages,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(LlmError::MalformedResponse)
    }
}
