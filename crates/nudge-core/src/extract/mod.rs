//! Task extraction domain types.
//!
//! # Module Structure
//!
//! - `fallback`: regex-based best-effort extraction used when the
//!   language-model pathway is unavailable
//! - `normalize`: relative time-phrase annotation with absolute dates

pub mod fallback;
pub mod normalize;

use thiserror::Error;

/// Placeholder used when no time information can be extracted from the text.
pub const UNSPECIFIED_TIME: &str = "unspecified";

/// A successfully extracted task: what, when, and how it was understood.
///
/// Produced by the extraction pipeline or the fallback extractor and consumed
/// immediately by the conversational layer; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// What to do. Non-empty after trimming.
    pub description: String,
    /// When to do it. Never empty; [`UNSPECIFIED_TIME`] when unknown.
    pub time_phrase: String,
    /// The extractor's short note on how it understood the task. May be empty.
    pub explanation: String,
}

/// Ways the extraction pipeline can reject an input.
///
/// Infrastructure failures (transport, malformed model output) never appear
/// here; those degrade silently into a fallback-extractor result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No language-model credential was configured. Guided entry is
    /// unaffected.
    #[error("natural-language extraction is not configured")]
    NotInitialized,

    /// The model explicitly declined to extract a task.
    #[error("the model declined the task: {explanation}")]
    ModelRejected { explanation: String },

    /// The model claimed success but produced no usable description.
    #[error("the model returned no usable task description")]
    EmptyDescription,
}
