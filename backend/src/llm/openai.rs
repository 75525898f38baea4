//! OpenAI-compatible chat completions client.
//!
//! Works against any provider exposing `POST {base_url}/chat/completions`
//! with the OpenAI request/response shape (Groq, OpenAI, local servers).
//! Non-streaming: the planner needs the whole text before it can extract
//! anything from it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::error::LlmError;
use super::provider::{CompletionRequest, GenerativeModel};

/// Default endpoint (Groq's OpenAI-compatible API).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model served at [`DEFAULT_BASE_URL`].
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Connection settings for [`OpenAiCompatibleClient`].
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Bearer token; omitted from requests when `None` (local servers)
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiCompatibleConfig {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Build the JSON body for a chat completion request.
pub fn build_completions_request(model: &str, request: &CompletionRequest) -> serde_json::Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.user },
        ],
    })
}

pub struct OpenAiCompatibleClient {
    config: OpenAiCompatibleConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl OpenAiCompatibleClient {
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    fn map_http_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        LlmError::Http {
            status: status.as_u16(),
            message: extract_error_message(body),
        }
    }
}

/// Pull `error.message` out of an OpenAI-style error body, else the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl GenerativeModel for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = build_completions_request(&self.config.model, request);

        let mut http_request = self.client.post(self.config.completions_url()).json(&body);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(format!("no response within {:?}", self.config.timeout))
            } else {
                LlmError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::map_http_error(status, &body_text));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("not a chat completion: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                LlmError::MalformedResponse("completion contained no message content".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAiCompatibleConfig::new(Some("key".into()), DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(
            config.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let config = OpenAiCompatibleConfig::new(None, "local").with_base_url("http://localhost:11434/v1/");
        assert_eq!(config.completions_url(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_completions_request("m", &CompletionRequest::new("sys", "usr"));
        assert_eq!(body["model"], "m");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "usr");
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#;
        assert_eq!(extract_error_message(body), "Rate limit reached");
        assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_debug_omits_api_key() {
        let client = OpenAiCompatibleClient::new(OpenAiCompatibleConfig::new(
            Some("secret-key".into()),
            DEFAULT_MODEL,
        ))
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains(DEFAULT_MODEL));
        assert!(!debug.contains("secret-key"));
    }
}
