//! Reusable formatting utilities for CLI output
//!
//! Sizes, ages and local timestamps shown by the cache and status commands.

use chrono::{DateTime, Local, Utc};

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format epoch milliseconds as local `YYYY-MM-DD HH:MM`.
///
/// Returns "N/A" if the timestamp is zero or out of range.
pub fn format_millis_local(millis: i64) -> String {
    if millis == 0 {
        return "N/A".to_string();
    }
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// Format a span of seconds as `2h 15m`, `5m 10s` or `45s`
pub fn format_duration_secs(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let rem = secs % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, rem)
    } else {
        format!("{}s", rem)
    }
}

/// Age of an epoch-millisecond timestamp relative to `now`, e.g. `3m 5s ago`
pub fn format_age(millis: i64, now: DateTime<Utc>) -> String {
    let elapsed = (now.timestamp_millis() - millis) / 1000;
    format!("{} ago", format_duration_secs(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_format_millis_local() {
        assert_eq!(format_millis_local(0), "N/A");
        assert!(format_millis_local(1_736_942_400_000).starts_with("2025-01-1"));
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration_secs(45), "45s");
        assert_eq!(format_duration_secs(310), "5m 10s");
        assert_eq!(format_duration_secs(8130), "2h 15m");
        assert_eq!(format_duration_secs(-5), "0s");
    }

    #[test]
    fn test_format_age() {
        let now = DateTime::from_timestamp_millis(1_000_000).unwrap();
        assert_eq!(format_age(1_000_000 - 65_000, now), "1m 5s ago");
    }
}
