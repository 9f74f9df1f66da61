//! Task domain model.
//!
//! This module contains the core Task entities that represent a single
//! reminder registered by a chat user.

use serde::{Deserialize, Serialize};

/// A single reminder belonging to one owner.
///
/// Tasks are created through the guided dialog or the natural-language
/// pipeline and live in the store until deleted; there is no completed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, monotonically increasing in creation order.
    pub id: i64,
    /// Chat user identifier that scopes every query touching this task.
    pub owner: i64,
    /// What to do. Non-empty after trimming.
    pub description: String,
    /// Free-text description of when. Never empty; falls back to the
    /// "unspecified" sentinel when extraction yields nothing.
    pub time_phrase: String,
    /// RFC 3339 timestamp assigned at insertion. Defines list ordering.
    pub created_at: String,
}

/// The list projection of a task: what and when, without identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub description: String,
    pub time_phrase: String,
}

impl TaskEntry {
    pub fn new(description: impl Into<String>, time_phrase: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            time_phrase: time_phrase.into(),
        }
    }
}

/// Store-wide statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total number of tasks across all owners.
    pub total_tasks: u64,
    /// Number of distinct owners with at least one task.
    pub unique_owners: u64,
}
