//! Task domain module.
//!
//! # Module Structure
//!
//! - `model`: Task entities and value objects
//! - `repository`: Repository trait for task persistence

pub mod model;
pub mod repository;

// Re-export public API
pub use model::{StoreStats, Task, TaskEntry};
pub use repository::TaskRepository;
