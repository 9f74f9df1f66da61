//! OpenAiAgent - Direct REST API implementation for OpenAI chat completions.
//!
//! This agent issues exactly one Chat Completions request per extraction
//! attempt. Configuration priority: ~/.config/nudge/secret.json > environment
//! variables.

use crate::config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The model call is biased toward deterministic extraction.
const TEMPERATURE: f32 = 0.3;
/// Bounded output size; the structured reply is short.
const DEFAULT_MAX_TOKENS: u32 = 300;
/// A stalled completion must not stall the user's dialog turn.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised by a completion agent.
///
/// The extraction pipeline absorbs all of these into the fallback path; they
/// never reach the end user.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("completion request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("completion response could not be decoded: {0}")]
    Decode(String),

    /// A well-formed response carried no message content.
    #[error("completion response contained no content")]
    NoContent,

    /// No usable credential was found.
    #[error("agent configuration error: {0}")]
    Config(String),
}

/// One text completion given a system instruction and a user turn.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, AgentError>;
}

/// Agent implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiAgent {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Loads configuration from ~/.config/nudge/secret.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/nudge/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, NUDGE_OPENAI_MODEL)
    ///
    /// Model name defaults to `gpt-4.1` if not specified.
    pub fn try_from_env() -> Result<Self, AgentError> {
        if let Ok(secrets) = config::load_secret_config() {
            if let Some(openai) = secrets.openai {
                let model = openai
                    .model_name
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
                return Ok(Self::new(openai.api_key, model));
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            AgentError::Config(
                "OPENAI_API_KEY not found in ~/.config/nudge/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = env::var("NUDGE_OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, AgentError> {
        let response = self
            .client
            .post(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::Transport(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AgentError::Decode(format!("Failed to parse OpenAI response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionAgent for OpenAiAgent {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, AgentError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_text.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens,
        };

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AgentError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(AgentError::NoContent)
}

fn map_http_error(status: StatusCode, body: String) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    AgentError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_error_reads_structured_body() {
        let body = r#"{"error": {"message": "invalid api key"}}"#.to_string();
        let err = map_http_error(StatusCode::UNAUTHORIZED, body);
        match err {
            AgentError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        match err {
            AgentError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_response_empty_choices() {
        let response = ChatCompletionResponse { choices: vec![] };
        assert!(matches!(
            extract_text_response(response),
            Err(AgentError::NoContent)
        ));
    }
}
