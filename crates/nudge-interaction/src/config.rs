//! Configuration file management for nudge.
//!
//! Secrets live in `~/.config/nudge/secret.json`. The file carries two
//! independent credentials: the language-model API key (its absence disables
//! the natural-language pathway, guided entry keeps working) and the chat
//! platform token consumed by whatever transport hosts the bot.
//!
//! ```json
//! {
//!     "openai": { "api_key": "sk-...", "model_name": "gpt-4.1" },
//!     "transport": { "bot_token": "..." }
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Root structure of secret.json. Both sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
    #[serde(default)]
    pub transport: Option<TransportConfig>,
}

/// OpenAI API credential and optional model override.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Chat platform credential, passed through to the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    pub bot_token: String,
}

/// Loads the secret configuration from ~/.config/nudge/secret.json.
///
/// Error messages name the path, never the file contents.
pub fn load_secret_config() -> Result<SecretConfig, String> {
    let path = secret_file_path()?;

    if !path.exists() {
        return Err(format!("Secret file not found at: {}", path.display()));
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read secret file at {}: {}", path.display(), e))?;

    parse_secret_config(&content)
        .map_err(|e| format!("Failed to parse secret file at {}: {}", path.display(), e))
}

fn parse_secret_config(content: &str) -> Result<SecretConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Returns the path to the secret file: ~/.config/nudge/secret.json
fn secret_file_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home.join(".config").join("nudge").join("secret.json"))
}
