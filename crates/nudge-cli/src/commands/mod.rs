pub mod chat;
pub mod extract;
pub mod tasks;

use anyhow::Result;
use nudge_infrastructure::{NudgePaths, SqliteTaskRepository};
use nudge_interaction::{OpenAiAgent, TaskExtractor};
use std::path::Path;
use std::sync::Arc;

/// Opens the task store at the given path, or the platform default.
pub(crate) fn open_store(db: Option<&Path>) -> Result<Arc<SqliteTaskRepository>> {
    let path = match db {
        Some(path) => path.to_path_buf(),
        None => NudgePaths::default_db_path()?,
    };
    Ok(Arc::new(SqliteTaskRepository::open(path)?))
}

/// Builds the extraction pipeline from the configured credential.
///
/// A missing credential is not fatal: the pipeline reports itself as
/// unconfigured and guided entry keeps working.
pub(crate) fn build_extractor() -> TaskExtractor {
    match OpenAiAgent::try_from_env() {
        Ok(agent) => TaskExtractor::with_agent(Arc::new(agent)),
        Err(err) => {
            tracing::warn!("natural-language pathway disabled: {err}");
            TaskExtractor::disabled()
        }
    }
}
