//! Regex fallback extractor.
//!
//! Best-effort split of free text into (description, time-phrase) used when
//! the language-model pathway is unavailable or returns malformed output.
//! This is the last-resort path: it always succeeds.

use super::{Extraction, UNSPECIFIED_TIME};
use once_cell::sync::Lazy;
use regex::Regex;

/// Explanation attached to every fallback result.
pub const FALLBACK_EXPLANATION: &str = "Processed by the basic analyzer";

/// Ordered time-expression rules. The first rule with a match wins; later
/// rules are not tried even if they would also match.
///
/// Priority order:
/// 1. exact time, with an optional leading "at" (the captured phrase is the
///    bare `HH:MM`, the removed span includes the "at")
/// 2. day-part words
/// 3. relative-day words
/// 4. spoken hour expressions
/// 5. week-relative phrases
/// 6. "on <weekday>"
/// 7. "by <weekday>"
static TIME_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(?:at\s+)?(\d{1,2}:\d{2})\b").unwrap(),
        Regex::new(r"(?i)\b(morning|afternoon|evening|night)\b").unwrap(),
        Regex::new(r"(?i)\b(day after tomorrow|tomorrow|today)\b").unwrap(),
        Regex::new(r"(?i)\b(at \d{1,2} in the (?:morning|afternoon|evening))\b").unwrap(),
        Regex::new(r"(?i)\b(next week|in a week)\b").unwrap(),
        Regex::new(r"(?i)\b(on (?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b")
            .unwrap(),
        Regex::new(r"(?i)\b(by (?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b")
            .unwrap(),
    ]
});

/// Filler removed from the description after time extraction. The trailing
/// preposition rule only fires immediately before end-of-string.
static CLEANUP_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(remind me to|remind me|remind)\b").unwrap(),
        Regex::new(r"(?i)\b(i need to|i have to|i must)\b").unwrap(),
        Regex::new(r"(?i)\b(at|on|by|in|to|until|after)(\s+the)?\s*$").unwrap(),
    ]
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Splits `text` into a description and a time-phrase without calling the
/// language model.
///
/// The matched time span is removed from the text and whitespace collapsed to
/// produce the description; when no rule matches, the time-phrase is the
/// "unspecified" sentinel and the full trimmed text becomes the description.
/// A second pass strips filler words; if that empties the description, the
/// original trimmed text is restored.
pub fn extract(text: &str) -> Extraction {
    let trimmed = text.trim();
    let mut time_phrase = UNSPECIFIED_TIME.to_string();
    let mut description = trimmed.to_string();

    for rule in TIME_RULES.iter() {
        if let Some(captures) = rule.captures(trimmed) {
            if let Some(found) = captures.get(1) {
                time_phrase = found.as_str().to_lowercase();
                description = collapse(&rule.replace_all(trimmed, ""));
                break;
            }
        }
    }

    for rule in CLEANUP_RULES.iter() {
        description = rule.replace_all(&description, "").trim().to_string();
    }
    description = collapse(&description);

    if description.is_empty() {
        description = trimmed.to_string();
    }

    Extraction {
        description,
        time_phrase,
        explanation: FALLBACK_EXPLANATION.to_string(),
    }
}

fn collapse(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_time_wins_over_day_part() {
        // Pattern order, not semantic merging: HH:MM fires first and only its
        // span (with the leading "at") is removed.
        let result = extract("Meet Ivan tomorrow at 14:00 in the evening");
        assert_eq!(result.time_phrase, "14:00");
        assert_eq!(result.description, "Meet Ivan tomorrow in the evening");
    }

    #[test]
    fn test_day_part_word() {
        let result = extract("Buy groceries in the evening");
        assert_eq!(result.time_phrase, "evening");
        assert_eq!(result.description, "Buy groceries");
    }

    #[test]
    fn test_day_part_beats_relative_day() {
        let result = extract("Go to the gym tomorrow morning");
        assert_eq!(result.time_phrase, "morning");
        assert_eq!(result.description, "Go to the gym tomorrow");
    }

    #[test]
    fn test_relative_day() {
        let result = extract("Call the bank tomorrow");
        assert_eq!(result.time_phrase, "tomorrow");
        assert_eq!(result.description, "Call the bank");
    }

    #[test]
    fn test_day_after_tomorrow_is_not_shadowed() {
        let result = extract("Water the plants day after tomorrow");
        assert_eq!(result.time_phrase, "day after tomorrow");
        assert_eq!(result.description, "Water the plants");
    }

    #[test]
    fn test_week_relative_phrase() {
        let result = extract("Call the doctor next week");
        assert_eq!(result.time_phrase, "next week");
        assert_eq!(result.description, "Call the doctor");
    }

    #[test]
    fn test_on_weekday() {
        let result = extract("Submit the report on friday");
        assert_eq!(result.time_phrase, "on friday");
        assert_eq!(result.description, "Submit the report");
    }

    #[test]
    fn test_by_weekday() {
        let result = extract("Prepare the presentation by Friday");
        assert_eq!(result.time_phrase, "by friday");
        assert_eq!(result.description, "Prepare the presentation");
    }

    #[test]
    fn test_no_match_yields_sentinel() {
        let result = extract("Pay the bills before the end of the month");
        assert_eq!(result.time_phrase, UNSPECIFIED_TIME);
        assert_eq!(
            result.description,
            "Pay the bills before the end of the month"
        );
    }

    #[test]
    fn test_filler_words_are_stripped() {
        let result = extract("Remind me to call mom tomorrow");
        assert_eq!(result.time_phrase, "tomorrow");
        assert_eq!(result.description, "call mom");
    }

    #[test]
    fn test_leading_at_is_removed_with_the_time() {
        let result = extract("Buy milk at 18:30");
        assert_eq!(result.time_phrase, "18:30");
        assert_eq!(result.description, "Buy milk");
    }

    #[test]
    fn test_empty_description_reverts_to_original() {
        let result = extract("remind me");
        assert_eq!(result.time_phrase, UNSPECIFIED_TIME);
        assert_eq!(result.description, "remind me");
    }

    #[test]
    fn test_total_on_arbitrary_input() {
        for input in ["", "   ", "?!", "a", "remind"] {
            let result = extract(input);
            assert!(!result.time_phrase.is_empty());
            assert_eq!(result.explanation, FALLBACK_EXPLANATION);
        }
    }

    #[test]
    fn test_spoken_hour_expression() {
        // The day-part rule runs earlier but "in the morning" contains the
        // bare word, so it fires first; this documents the literal priority.
        let result = extract("Wake me at 7 in the morning");
        assert_eq!(result.time_phrase, "morning");
        assert_eq!(result.description, "Wake me at 7");
    }
}
