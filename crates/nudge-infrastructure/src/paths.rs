//! Unified path management for nudge data files.
//!
//! Secrets live under `~/.config/nudge/`, the task database under
//! `~/.local/share/nudge/`.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for nudge.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/nudge/             # Config directory
/// └── secret.json              # API keys and the chat platform token
///
/// ~/.local/share/nudge/        # Data directory
/// └── tasks.db                 # SQLite task store
/// ```
pub struct NudgePaths;

impl NudgePaths {
    /// Returns the nudge configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join("nudge"))
    }

    /// Returns the nudge data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".local").join("share").join("nudge"))
    }

    /// Returns the default task database path.
    pub fn default_db_path() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("tasks.db"))
    }
}
