//! OpenAI chat-completions translator.
//!
//! Sends the corpus-aware prompt from [`prompt`](super::prompt) to a
//! chat-completions endpoint and parses the reply with
//! [`parse_translation`]. Transient failures (rate limits, 5xx, timeouts)
//! are retried with exponential backoff up to a configured count; the
//! default is a single attempt.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tunescout_core::CorpusDescription;

use super::prompt::{build_messages, ChatMessage};
use super::{parse_translation, QueryTranslator, Translation};
use crate::config::Config;
use crate::error::{TranslateError, TranslateResult};

const SOURCE_NAME: &str = "OpenAI";

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Chat-completions client used as a [`QueryTranslator`].
///
/// The API key is held by the client instance; nothing is read from or
/// written to process-wide state.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    http: Client,
    api_key: String,
    api_base: String,
    model: String,
    sampling: Sampling,
    max_retries: usize,
}

impl OpenAiTranslator {
    /// Create a translator with default model, endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> TranslateResult<Self> {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> TranslateResult<Self> {
        let defaults = Config::default();
        Ok(Self {
            http: Client::builder()
                .user_agent("tunescout/0.1.0 (https://github.com/oxur/tunescout)")
                .timeout(timeout)
                .build()?,
            api_key: api_key.into(),
            api_base: defaults.api_base,
            model: defaults.model,
            sampling: Sampling::default(),
            max_retries: defaults.max_retries,
        })
    }

    /// Create a translator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::MissingApiKey`] if no key is configured.
    pub fn from_config(config: &Config) -> TranslateResult<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TranslateError::MissingApiKey {
                source_name: SOURCE_NAME.to_string(),
            })?;
        let translator = Self::with_timeout(api_key, Duration::from_secs(config.request_timeout_secs))?
            .with_model(config.model.clone())
            .with_api_base(config.api_base.clone())
            .with_max_retries(config.max_retries);
        Ok(translator)
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.sampling.temperature,
            "max_tokens": self.sampling.max_tokens,
            "top_p": self.sampling.top_p,
            "frequency_penalty": self.sampling.frequency_penalty,
            "presence_penalty": self.sampling.presence_penalty,
        })
    }

    /// Send one chat-completions request and return the reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> TranslateResult<String> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status, message));
        }

        let body: ChatResponse = response.json().await.map_err(|e| TranslateError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| TranslateError::EmptyResponse {
                source_name: SOURCE_NAME.to_string(),
            })
    }
}

fn status_error(status: StatusCode, message: String) -> TranslateError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        TranslateError::RateLimited {
            source_name: SOURCE_NAME.to_string(),
        }
    } else if status.is_server_error() {
        TranslateError::Http {
            source_name: SOURCE_NAME.to_string(),
            message: format!("{status}: {message}"),
        }
    } else {
        TranslateError::Rejected {
            source_name: SOURCE_NAME.to_string(),
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl QueryTranslator for OpenAiTranslator {
    async fn translate(
        &self,
        query: &str,
        corpus: &CorpusDescription,
    ) -> TranslateResult<Translation> {
        let messages = build_messages(corpus, query);

        let content = (|| self.complete(&messages))
            .retry(ExponentialBuilder::default().with_max_times(self.max_retries))
            .when(TranslateError::is_transient)
            .notify(|err: &TranslateError, delay: Duration| {
                log::warn!("Retrying {} translation in {:?}: {}", SOURCE_NAME, delay, err);
            })
            .await?;

        log::debug!("Translator replied: {}", content);
        parse_translation(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::prompt::Role;

    fn description() -> CorpusDescription {
        CorpusDescription {
            tune_count: 1,
            types: vec!["jig".to_string()],
            keys: vec!["D".to_string()],
            modes: vec!["major".to_string()],
            meters: vec!["6/8".to_string()],
        }
    }

    #[test]
    fn test_from_config_requires_key() {
        let err = OpenAiTranslator::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, TranslateError::MissingApiKey { .. }));

        let blank = Config {
            openai_api_key: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(OpenAiTranslator::from_config(&blank).is_err());
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = Config {
            openai_api_key: Some("sk-test".to_string()),
            model: "gpt-4".to_string(),
            api_base: "http://localhost:8080/v1/".to_string(),
            max_retries: 2,
            ..Config::default()
        };
        let translator = OpenAiTranslator::from_config(&config).unwrap();
        assert_eq!(translator.model(), "gpt-4");
        assert_eq!(translator.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(translator.max_retries, 2);
    }

    #[test]
    fn test_request_body() {
        let translator = OpenAiTranslator::new("sk-test").unwrap();
        let messages = build_messages(&description(), "a jig");
        let body = translator.request_body(&messages);
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"].as_array().unwrap().len(), messages.len());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(messages[0].role, Role::System);
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            TranslateError::RateLimited { .. }
        ));
        assert!(status_error(StatusCode::BAD_GATEWAY, String::new()).is_transient());
        let rejected = status_error(StatusCode::UNAUTHORIZED, "bad key".to_string());
        assert!(matches!(rejected, TranslateError::Rejected { status: 401, .. }));
        assert!(!rejected.is_transient());
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "[{\"type\": \"jig\"}]"}}]}"#;
        let body: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.choices[0].message.content.as_deref(),
            Some(r#"[{"type": "jig"}]"#)
        );
    }
}
