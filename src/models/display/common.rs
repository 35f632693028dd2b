//! Common display utilities and helpers

use chrono::{DateTime, Utc};

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `--` for empty cells
pub fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        "--".to_string()
    } else {
        s.to_string()
    }
}

/// Checkmark for true, blank for false
pub fn check(value: bool) -> String {
    if value {
        "\u{2713}".to_string()
    } else {
        String::new()
    }
}

/// Format a provider timestamp as `YYYY-MM-DD HH:MM UTC`.
///
/// Accepts RFC 3339 text or epoch milliseconds; anything else is returned as-is.
pub fn format_match_time(timestamp: &str) -> String {
    if let Ok(dt) = timestamp.parse::<DateTime<Utc>>() {
        return dt.format("%Y-%m-%d %H:%M UTC").to_string();
    }

    if let Ok(ts_ms) = timestamp.trim().parse::<i64>()
        && let Some(dt) = DateTime::from_timestamp_millis(ts_ms)
    {
        return dt.format("%Y-%m-%d %H:%M UTC").to_string();
    }

    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer headline", 10), "a longe...");
        assert_eq!(truncate_string("Kohli’s century today", 9), "Kohli’...");
    }

    #[test]
    fn test_or_dash_and_check() {
        assert_eq!(or_dash(" "), "--");
        assert_eq!(or_dash("MCG"), "MCG");
        assert_eq!(check(true), "\u{2713}");
        assert_eq!(check(false), "");
    }

    #[test]
    fn test_format_match_time() {
        assert_eq!(format_match_time("1736942400000"), "2025-01-15 12:00 UTC");
        assert_eq!(
            format_match_time("2025-01-15T12:00:00Z"),
            "2025-01-15 12:00 UTC"
        );
        assert_eq!(format_match_time("Today, 7:30 PM"), "Today, 7:30 PM");
    }
}
