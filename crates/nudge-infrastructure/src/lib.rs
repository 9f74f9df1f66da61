//! Persistence layer for nudge.
//!
//! Provides the SQLite-backed task repository and platform path resolution.

pub mod paths;
pub mod sqlite_task_repository;

pub use paths::NudgePaths;
pub use sqlite_task_repository::SqliteTaskRepository;
