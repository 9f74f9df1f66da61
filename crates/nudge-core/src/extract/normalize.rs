//! Time-phrase normalization.
//!
//! Rewrites recognized relative-date markers into phrase+absolute-date form,
//! e.g. "tomorrow at 5" becomes "tomorrow (11.01) at 5" when today is
//! January 10th. Phrases without a recognized marker pass through unchanged.

use chrono::{Days, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Relative markers in priority order, paired with their day offsets.
///
/// "day after tomorrow" must be tried before "tomorrow": the shorter marker
/// is a substring of the longer one.
static MARKERS: Lazy<Vec<(Regex, u64)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)\bday after tomorrow\b").unwrap(), 2),
        (Regex::new(r"(?i)\btomorrow\b").unwrap(), 1),
        (Regex::new(r"(?i)\bin a week\b").unwrap(), 7),
    ]
});

/// Annotates the first recognized relative marker in `phrase` with the
/// absolute calendar date (day.month) it resolves to, relative to `today`.
///
/// Only one marker is processed per phrase; the rest of the string, including
/// its casing, is left untouched. Returns the input unchanged when no marker
/// is found.
pub fn normalize_time_phrase(phrase: &str, today: NaiveDate) -> String {
    for (marker, days) in MARKERS.iter() {
        if let Some(found) = marker.find(phrase) {
            let date = today + Days::new(*days);
            let mut out = String::with_capacity(phrase.len() + 8);
            out.push_str(&phrase[..found.end()]);
            out.push_str(&format!(" ({})", date.format("%d.%m")));
            out.push_str(&phrase[found.end()..]);
            return out;
        }
    }

    phrase.to_string()
}

/// [`normalize_time_phrase`] against the current local date.
pub fn normalize_now(phrase: &str) -> String {
    normalize_time_phrase(phrase, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_tomorrow_gets_absolute_date() {
        let result = normalize_time_phrase("tomorrow at 5", reference_date());
        assert_eq!(result, "tomorrow (11.01) at 5");
    }

    #[test]
    fn test_day_after_tomorrow_is_not_shadowed() {
        let result = normalize_time_phrase("day after tomorrow at noon", reference_date());
        assert_eq!(result, "day after tomorrow (12.01) at noon");
    }

    #[test]
    fn test_in_a_week() {
        let result = normalize_time_phrase("in a week", reference_date());
        assert_eq!(result, "in a week (17.01)");
    }

    #[test]
    fn test_detection_is_case_insensitive_and_preserves_casing() {
        let result = normalize_time_phrase("Tomorrow morning", reference_date());
        assert_eq!(result, "Tomorrow (11.01) morning");
    }

    #[test]
    fn test_only_first_marker_is_processed() {
        let result = normalize_time_phrase("tomorrow or in a week", reference_date());
        assert_eq!(result, "tomorrow (11.01) or in a week");
    }

    #[test]
    fn test_unrecognized_phrase_passes_through() {
        let result = normalize_time_phrase("next Friday at 9", reference_date());
        assert_eq!(result, "next Friday at 9");
    }

    #[test]
    fn test_month_rollover() {
        let end_of_month = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let result = normalize_time_phrase("tomorrow", end_of_month);
        assert_eq!(result, "tomorrow (01.02)");
    }
}
