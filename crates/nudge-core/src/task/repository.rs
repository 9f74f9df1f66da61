//! Task repository trait.
//!
//! Defines the interface for task persistence operations.

use super::model::{StoreStats, Task, TaskEntry};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing task persistence.
///
/// This trait defines the contract for persisting and retrieving reminders,
/// decoupling the conversational layer from the specific storage mechanism.
/// Every operation is scoped to one owner; tasks of other owners must never
/// be visible through any of them.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Concurrent invocation from different owners
/// - Per-operation atomicity (no cross-operation transactions are required,
///   each dialog step performs exactly one store operation)
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task with a store-assigned id and creation timestamp.
    ///
    /// # Arguments
    ///
    /// * `owner` - The chat user the task belongs to
    /// * `description` - What to do; stored trimmed
    /// * `time_phrase` - When to do it; stored trimmed
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Task saved successfully
    /// - `Err(_)`: Underlying storage fault
    async fn append(&self, owner: i64, description: &str, time_phrase: &str) -> Result<()>;

    /// Lists the owner's tasks in ascending creation order.
    ///
    /// Returns an empty vector if the owner has no tasks.
    async fn list(&self, owner: i64) -> Result<Vec<TaskEntry>>;

    /// Lists the owner's tasks with their ids, in ascending creation order.
    ///
    /// Used for targeted deletion.
    async fn list_with_id(&self, owner: i64) -> Result<Vec<Task>>;

    /// Returns the number of tasks the owner currently has.
    async fn count(&self, owner: i64) -> Result<u64>;

    /// Deletes all of the owner's tasks.
    ///
    /// # Returns
    ///
    /// The number of tasks that were deleted.
    async fn clear(&self, owner: i64) -> Result<u64>;

    /// Deletes exactly one task if it belongs to the owner.
    ///
    /// # Returns
    ///
    /// `true` iff a row was removed. A well-formed id belonging to another
    /// owner returns `false`, not an error.
    async fn delete_one(&self, owner: i64, id: i64) -> Result<bool>;

    /// Returns store-wide statistics across all owners.
    async fn stats(&self) -> Result<StoreStats>;
}
