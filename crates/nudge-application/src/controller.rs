//! Conversational controller.
//!
//! Routes inbound chat events through the per-user dialog state: menu button
//! presses drive the guided flows, free text goes to the natural-language
//! pipeline, and every store effect is a single repository call.

use crate::event::{
    BTN_ADD, BTN_CANCEL, BTN_CLEAR, BTN_HELP, BTN_LIST, BTN_SMART, CB_CANCEL_CLEAR,
    CB_CONFIRM_CLEAR, Inbound, Keyboard, Reply, UserCommand,
};
use nudge_core::dialogue::{DialogState, DialogStateStore};
use nudge_core::extract::normalize::normalize_now;
use nudge_core::task::TaskRepository;
use nudge_interaction::TaskExtractor;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static EXACT_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").unwrap());

const TIME_WORDS: &[&str] = &["morning", "afternoon", "evening", "night", "noon", "tonight"];

/// Accepts `HH:MM`, a day-part word, or any free-form phrase short enough to
/// be a time description.
fn validate_time(time: &str) -> bool {
    if EXACT_TIME.is_match(time) {
        return true;
    }
    if TIME_WORDS.contains(&time.to_lowercase().as_str()) {
        return true;
    }
    !time.is_empty() && time.len() < 50
}

/// The conversational controller.
///
/// Holds the injected store and extraction pipeline plus the per-user dialog
/// state map. Safe to share across concurrent users; each owner's dialog is
/// a single pending slot.
pub struct Controller {
    tasks: Arc<dyn TaskRepository>,
    extractor: Arc<TaskExtractor>,
    dialogs: DialogStateStore,
}

impl Controller {
    pub fn new(tasks: Arc<dyn TaskRepository>, extractor: Arc<TaskExtractor>) -> Self {
        Self {
            tasks,
            extractor,
            dialogs: DialogStateStore::new(),
        }
    }

    /// Handles one inbound event for `owner` and returns the replies the
    /// transport should render, in order.
    pub async fn handle(&self, owner: i64, event: Inbound) -> Vec<Reply> {
        match event {
            Inbound::Command { command } => match command {
                UserCommand::Start => vec![Reply::menu(start_text())],
                UserCommand::Help => vec![Reply::menu(help_text())],
            },
            Inbound::Callback { data } => self.handle_callback(owner, &data).await,
            Inbound::Unsupported => vec![Reply::menu(
                "I only work with text messages.\n\
                 Describe the task in words and I'll understand!\n\
                 Pick an action from the menu:",
            )],
            Inbound::Text { text } => self.handle_text(owner, text.trim()).await,
        }
    }

    async fn handle_text(&self, owner: i64, text: &str) -> Vec<Reply> {
        if text == BTN_CANCEL {
            self.dialogs.reset(owner).await;
            return vec![Reply::menu("Operation cancelled.")];
        }

        // Menu buttons take precedence over a pending dialog step; the
        // pending slot is left untouched.
        match text {
            BTN_ADD => {
                self.dialogs.set(owner, DialogState::AwaitingDescription).await;
                return vec![Reply::cancelable("Enter the task description:")];
            }
            BTN_SMART => {
                self.dialogs.set(owner, DialogState::AwaitingSmartInput).await;
                return vec![Reply::cancelable(smart_prompt_text())];
            }
            BTN_LIST => return self.list_tasks(owner).await,
            BTN_CLEAR => return self.confirm_clear(owner).await,
            BTN_HELP => return vec![Reply::menu(help_text())],
            _ => {}
        }

        match self.dialogs.get(owner).await {
            DialogState::Idle | DialogState::AwaitingSmartInput => {
                self.smart_add(owner, text).await
            }
            DialogState::AwaitingDescription => {
                if text.is_empty() {
                    return vec![Reply::cancelable("Enter the task description:")];
                }
                self.dialogs
                    .set(
                        owner,
                        DialogState::AwaitingTime {
                            description: text.to_string(),
                        },
                    )
                    .await;
                vec![Reply::cancelable(
                    "When should it happen? (e.g. 14:30, morning, tomorrow evening):",
                )]
            }
            DialogState::AwaitingTime { description } => {
                if !validate_time(text) {
                    return vec![Reply::cancelable(
                        "Invalid time format. Try again:\n\
                         Examples: 14:30, 9:00, morning, evening",
                    )];
                }

                self.dialogs.reset(owner).await;
                let time_phrase = normalize_now(text);
                match self.tasks.append(owner, &description, &time_phrase).await {
                    Ok(()) => vec![Reply::menu(format!(
                        "Task added!\n\nWhat: {description}\nWhen: {time_phrase}"
                    ))],
                    Err(err) => {
                        tracing::error!("failed to save task for owner {owner}: {err}");
                        vec![Reply::menu("Could not save the task. Please try again.")]
                    }
                }
            }
        }
    }

    /// Runs the natural-language pipeline on free text and stores the result.
    async fn smart_add(&self, owner: i64, text: &str) -> Vec<Reply> {
        let outcome = self.extractor.extract(text).await;
        self.dialogs.reset(owner).await;

        let extraction = match outcome {
            Ok(extraction) => extraction,
            Err(err) => {
                return vec![Reply::menu(format!(
                    "Could not process the task: {err}\n\n\
                     Try rephrasing it or use the guided add."
                ))];
            }
        };

        let time_phrase = normalize_now(&extraction.time_phrase);
        match self
            .tasks
            .append(owner, &extraction.description, &time_phrase)
            .await
        {
            Ok(()) => {
                let mut text = format!(
                    "Task added!\n\nWhat: {}\nWhen: {}",
                    extraction.description, time_phrase
                );
                if !extraction.explanation.is_empty() {
                    text.push_str(&format!("\n\nNote: {}", extraction.explanation));
                }
                vec![Reply::menu(text)]
            }
            Err(err) => {
                tracing::error!("failed to save task for owner {owner}: {err}");
                vec![Reply::menu("Could not save the task. Please try again.")]
            }
        }
    }

    async fn list_tasks(&self, owner: i64) -> Vec<Reply> {
        let tasks = match self.tasks.list(owner).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!("failed to list tasks for owner {owner}: {err}");
                return vec![Reply::menu("Could not load your tasks. Please try again.")];
            }
        };

        if tasks.is_empty() {
            return vec![Reply::menu(
                "You have no tasks yet.\nTry the smart add!",
            )];
        }

        let mut text = String::from("Your tasks:\n\n");
        for (index, task) in tasks.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} - {}\n",
                index + 1,
                task.time_phrase,
                task.description
            ));
        }

        vec![Reply::menu(text)]
    }

    async fn confirm_clear(&self, owner: i64) -> Vec<Reply> {
        let count = match self.tasks.count(owner).await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!("failed to count tasks for owner {owner}: {err}");
                return vec![Reply::menu("Could not load your tasks. Please try again.")];
            }
        };

        if count == 0 {
            return vec![Reply::menu("You have no tasks to delete.")];
        }

        vec![Reply::new(
            format!("Delete all {count} of your tasks?"),
            Keyboard::ConfirmClear,
        )]
    }

    async fn handle_callback(&self, owner: i64, data: &str) -> Vec<Reply> {
        match data {
            CB_CONFIRM_CLEAR => match self.tasks.clear(owner).await {
                Ok(deleted) => {
                    tracing::info!("cleared {deleted} tasks for owner {owner}");
                    vec![
                        Reply::new("All tasks deleted!", Keyboard::None),
                        Reply::menu("You can add new ones whenever you like."),
                    ]
                }
                Err(err) => {
                    tracing::error!("failed to clear tasks for owner {owner}: {err}");
                    vec![Reply::menu("Could not delete your tasks. Please try again.")]
                }
            },
            CB_CANCEL_CLEAR => vec![
                Reply::new("Deletion cancelled.", Keyboard::None),
                Reply::menu("Your tasks are safe."),
            ],
            other => {
                tracing::warn!("ignoring unknown callback '{other}' from owner {owner}");
                vec![]
            }
        }
    }
}

fn start_text() -> String {
    "Hi! I'm a task reminder bot with natural-language smarts.\n\
     I can read a plain sentence and turn it into a task.\n\n\
     Try writing something like:\n\
     - 'Remind me to meet Ivan tomorrow at 14:00'\n\
     - 'Call the doctor next week'\n\
     - 'Buy groceries in the evening'\n\n\
     Pick an action from the menu:"
        .to_string()
}

fn help_text() -> String {
    format!(
        "How to use the bot:\n\n\
         {BTN_ADD} - classic two-step entry: description, then time\n\
         {BTN_SMART} - describe the task in one plain sentence\n\
         {BTN_LIST} - show everything you saved\n\
         {BTN_CLEAR} - delete all your tasks\n\
         {BTN_HELP} - show this message\n\n\
         Smart add examples:\n\
         - 'Meeting with a client tomorrow at 15:30'\n\
         - 'Buy milk on the way home'\n\
         - 'Prepare the presentation by Monday'\n\n\
         The description and the time are picked out automatically!"
    )
}

fn smart_prompt_text() -> String {
    "Describe the task in plain English!\n\n\
     Examples:\n\
     - 'Meet Peter tomorrow at 10 in the morning'\n\
     - 'Buy groceries in the evening'\n\
     - 'Call the bank next week'\n\
     - 'Prepare the report by Friday'\n\n\
     Write your task:"
        .to_string()
}
