//! Shared utility functions used across multiple modules.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("Invalid regex")
});

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Format a UTC instant the way notes store it: `2024-05-01T09:30:00.000Z`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts full RFC 3339 values as well as bare `YYYY-MM-DD` dates, which are
/// read as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Split comma-separated tag input, trimming entries and dropping blanks.
///
/// Order and duplicates are preserved.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Check whether a value is a hex color token (`#rgb`, `#rrggbb` or `#rrggbbaa`).
pub fn is_color_token(value: &str) -> bool {
    COLOR_TOKEN.is_match(value.trim())
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" Work ".to_string())),
            Some("Work".to_string())
        );
    }

    #[test]
    fn format_timestamp_uses_millis_and_zulu() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(instant), "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_dates() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T02:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01"), Some(expected));
        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn parse_tag_list_splits_and_trims() {
        assert_eq!(
            parse_tag_list(" urgent, work,, urgent ,"),
            vec!["urgent", "work", "urgent"]
        );
        assert!(parse_tag_list("  ").is_empty());
    }

    #[test]
    fn is_color_token_accepts_hex_forms() {
        assert!(is_color_token("#fff"));
        assert!(is_color_token("#ffffff"));
        assert!(is_color_token("#ff0037ff"));
        assert!(!is_color_token("red"));
        assert!(!is_color_token("#ff00"));
        assert!(!is_color_token("ffffff"));
    }
}
