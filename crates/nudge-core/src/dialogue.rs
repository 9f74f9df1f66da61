//! Per-user dialog state for the guided entry flow.
//!
//! Each user has exactly one pending-dialog slot; their messages are
//! processed sequentially, so every transition reads the previous state.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where a user currently is in the guided dialog.
///
/// Matched exhaustively by the conversational controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// No dialog in progress. Free text in this state is routed to the
    /// natural-language pipeline.
    #[default]
    Idle,
    /// The user chose smart add; the next message is pipeline input.
    AwaitingSmartInput,
    /// The user chose guided add; the next message is the description.
    AwaitingDescription,
    /// The description has been collected; the next message is the time.
    AwaitingTime { description: String },
}

/// In-memory map of pending dialog state, one slot per owner.
///
/// Cloning is cheap and shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct DialogStateStore {
    states: Arc<RwLock<HashMap<i64, DialogState>>>,
}

impl DialogStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the owner's current state, `Idle` if none was recorded.
    pub async fn get(&self, owner: i64) -> DialogState {
        self.states
            .read()
            .await
            .get(&owner)
            .cloned()
            .unwrap_or_default()
    }

    /// Records a new pending state for the owner, replacing any previous one.
    pub async fn set(&self, owner: i64, state: DialogState) {
        self.states.write().await.insert(owner, state);
    }

    /// Resets the owner's slot back to `Idle`.
    pub async fn reset(&self, owner: i64) {
        self.states.write().await.remove(&owner);
    }
}
