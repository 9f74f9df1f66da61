//! Instruction prompt for the extraction model.

use chrono::{DateTime, Local};

/// Builds the system prompt for one extraction attempt.
///
/// The prompt pins the current date, time, and weekday so the model can
/// resolve relative expressions, fixes the JSON-only reply contract, and
/// anchors the expected splits with worked examples.
pub fn build_system_prompt(now: DateTime<Local>) -> String {
    let current_date = now.format("%Y-%m-%d");
    let current_time = now.format("%H:%M");
    let weekday = now.format("%A");

    format!(
        r#"You are a smart assistant that analyzes task reminders written in English. Extract from the user's text the description of the task and the time it should happen.

Current date: {current_date}
Current time: {current_time}
Day of week: {weekday}

IMPORTANT RULES:
1. Always respond ONLY with JSON
2. If the time is not stated precisely, make a reasonable assumption
3. For relative dates (tomorrow, day after tomorrow, in a week) compute the exact date
4. Phrase the time in plain, readable English

Response format (JSON):
{{
    "success": true/false,
    "description": "what to do",
    "time": "when to do it",
    "explanation": "a short note on how you understood the task"
}}

Worked examples:
- "Meet Ivan tomorrow at 14:00" -> description: "Meet Ivan", time: "tomorrow at 14:00"
- "Buy groceries in the evening" -> description: "Buy groceries", time: "in the evening"
- "Call the doctor next week" -> description: "Call the doctor", time: "next week"
- "Prepare the presentation by Friday" -> description: "Prepare the presentation", time: "by Friday"

If you cannot understand the task, return success: false with an explanation of the problem."#
    )
}
