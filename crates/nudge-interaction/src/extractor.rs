//! Task extraction pipeline.
//!
//! Orchestrates one completion call against the configured agent and parses
//! its structured reply. Every infrastructure failure (transport, HTTP,
//! malformed output) degrades into the regex fallback extractor, which cannot
//! itself fail; callers only ever see an error for semantically rejected
//! input or a missing credential.

use crate::agent::CompletionAgent;
use crate::prompt::build_system_prompt;
use chrono::Local;
use nudge_core::extract::{Extraction, ExtractionError, UNSPECIFIED_TIME, fallback};
use serde::Deserialize;
use std::sync::Arc;

/// The structured record the model is instructed to reply with.
#[derive(Debug, Deserialize)]
struct ModelReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    description: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    explanation: String,
}

/// Natural-language task extractor.
///
/// The completion agent is injected at construction; when none is configured
/// (no credential), every call reports [`ExtractionError::NotInitialized`]
/// and the guided entry path remains the only way to add tasks.
pub struct TaskExtractor {
    agent: Option<Arc<dyn CompletionAgent>>,
}

impl TaskExtractor {
    pub fn new(agent: Option<Arc<dyn CompletionAgent>>) -> Self {
        Self { agent }
    }

    /// An extractor with a configured completion agent.
    pub fn with_agent(agent: Arc<dyn CompletionAgent>) -> Self {
        Self::new(Some(agent))
    }

    /// An extractor with no language-model pathway.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_configured(&self) -> bool {
        self.agent.is_some()
    }

    /// Extracts a task from free-form user text.
    ///
    /// Exactly one model attempt is made; there are no retries. Transport and
    /// parse failures are logged and silently replaced by the fallback
    /// extractor's result.
    pub async fn extract(&self, text: &str) -> Result<Extraction, ExtractionError> {
        let Some(agent) = &self.agent else {
            return Err(ExtractionError::NotInitialized);
        };

        let system_prompt = build_system_prompt(Local::now());

        let raw = match agent.complete(&system_prompt, text).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("completion request failed, using fallback extraction: {err}");
                return Ok(fallback::extract(text));
            }
        };

        let reply: ModelReply = match serde_json::from_str(raw.trim()) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("unparseable model reply, using fallback extraction: {err}");
                return Ok(fallback::extract(text));
            }
        };

        if !reply.success {
            let explanation = if reply.explanation.trim().is_empty() {
                "the model could not process the task".to_string()
            } else {
                reply.explanation.trim().to_string()
            };
            return Err(ExtractionError::ModelRejected { explanation });
        }

        let description = reply.description.trim();
        if description.is_empty() {
            return Err(ExtractionError::EmptyDescription);
        }

        let time = reply.time.trim();
        let time_phrase = if time.is_empty() {
            UNSPECIFIED_TIME.to_string()
        } else {
            time.to_string()
        };

        Ok(Extraction {
            description: description.to_string(),
            time_phrase,
            explanation: reply.explanation.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentError;
    use async_trait::async_trait;

    /// Agent that always answers with a canned reply.
    struct CannedAgent {
        reply: Result<String, ()>,
    }

    impl CannedAgent {
        fn ok(reply: &str) -> Arc<dyn CompletionAgent> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
            })
        }

        fn failing() -> Arc<dyn CompletionAgent> {
            Arc::new(Self { reply: Err(()) })
        }
    }

    #[async_trait]
    impl CompletionAgent for CannedAgent {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, AgentError> {
            self.reply
                .clone()
                .map_err(|_| AgentError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unconfigured_extractor_reports_not_initialized() {
        let extractor = TaskExtractor::disabled();
        for input in ["Buy milk tomorrow", "", "anything at all"] {
            assert_eq!(
                extractor.extract(input).await,
                Err(ExtractionError::NotInitialized)
            );
        }
    }

    #[tokio::test]
    async fn test_successful_extraction() {
        let agent = CannedAgent::ok(
            r#"{"success": true, "description": " Meet Ivan ", "time": "tomorrow at 14:00", "explanation": "meeting"}"#,
        );
        let extractor = TaskExtractor::with_agent(agent);

        let extraction = extractor.extract("Meet Ivan tomorrow at 14:00").await.unwrap();
        assert_eq!(extraction.description, "Meet Ivan");
        assert_eq!(extraction.time_phrase, "tomorrow at 14:00");
        assert_eq!(extraction.explanation, "meeting");
    }

    #[tokio::test]
    async fn test_blank_time_becomes_sentinel() {
        let agent = CannedAgent::ok(
            r#"{"success": true, "description": "Buy milk", "time": "  ", "explanation": ""}"#,
        );
        let extractor = TaskExtractor::with_agent(agent);

        let extraction = extractor.extract("Buy milk").await.unwrap();
        assert_eq!(extraction.time_phrase, UNSPECIFIED_TIME);
    }

    #[tokio::test]
    async fn test_model_rejection_carries_explanation() {
        let agent = CannedAgent::ok(
            r#"{"success": false, "description": "", "time": "", "explanation": "not a task"}"#,
        );
        let extractor = TaskExtractor::with_agent(agent);

        assert_eq!(
            extractor.extract("how are you?").await,
            Err(ExtractionError::ModelRejected {
                explanation: "not a task".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_description_is_an_error() {
        let agent = CannedAgent::ok(
            r#"{"success": true, "description": "   ", "time": "tomorrow", "explanation": ""}"#,
        );
        let extractor = TaskExtractor::with_agent(agent);

        assert_eq!(
            extractor.extract("do it tomorrow").await,
            Err(ExtractionError::EmptyDescription)
        );
    }

    #[tokio::test]
    async fn test_malformed_reply_equals_direct_fallback() {
        let agent = CannedAgent::ok("Sure! Here is the task you asked about.");
        let extractor = TaskExtractor::with_agent(agent);

        let input = "Meet Ivan tomorrow at 14:00 in the evening";
        let extraction = extractor.extract(input).await.unwrap();
        assert_eq!(extraction, fallback::extract(input));
    }

    #[tokio::test]
    async fn test_transport_failure_equals_direct_fallback() {
        let extractor = TaskExtractor::with_agent(CannedAgent::failing());

        let input = "Call the doctor next week";
        let extraction = extractor.extract(input).await.unwrap();
        assert_eq!(extraction, fallback::extract(input));
    }
}
