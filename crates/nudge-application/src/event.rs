//! Transport-facing event types.
//!
//! The chat transport (out of scope here) delivers inbound events tagged
//! with a user identifier and renders outbound replies and their keyboards.

use serde::{Deserialize, Serialize};

/// Main menu button labels. The transport renders these as reply-keyboard
/// buttons; the controller recognizes them verbatim in message text.
pub const BTN_ADD: &str = "Add task";
pub const BTN_LIST: &str = "My tasks";
pub const BTN_SMART: &str = "Smart add";
pub const BTN_CLEAR: &str = "Clear all";
pub const BTN_HELP: &str = "Help";
pub const BTN_CANCEL: &str = "Cancel";

/// Callback payloads for the clear-all inline confirmation.
pub const CB_CONFIRM_CLEAR: &str = "confirm_clear";
pub const CB_CANCEL_CLEAR: &str = "cancel_clear";

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserCommand {
    Start,
    Help,
}

/// One inbound event from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    /// A slash command.
    Command { command: UserCommand },
    /// Plain message text (including menu button presses).
    Text { text: String },
    /// An inline-keyboard callback.
    Callback { data: String },
    /// Media the bot does not handle (photos, voice, stickers, ...).
    Unsupported,
}

impl Inbound {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn command(command: UserCommand) -> Self {
        Self::Command { command }
    }

    pub fn callback(data: impl Into<String>) -> Self {
        Self::Callback { data: data.into() }
    }
}

/// Keyboard the transport should attach to a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyboard {
    /// The five-button main menu.
    MainMenu,
    /// A single cancel button shown during a pending dialog step.
    CancelOnly,
    /// Inline yes/no confirmation for clear-all.
    ConfirmClear,
    #[default]
    None,
}

/// One outbound reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn menu(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::MainMenu)
    }

    pub fn cancelable(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::CancelOnly)
    }
}
