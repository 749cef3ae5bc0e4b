//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Duration, Utc};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Format a timestamp for user display (relative time)
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let diff = now.signed_duration_since(timestamp);

    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        format!("{} minutes ago", diff.num_minutes())
    } else if diff < Duration::days(1) {
        format!("{} hours ago", diff.num_hours())
    } else if diff < Duration::weeks(1) {
        format!("{} days ago", diff.num_days())
    } else {
        format_timestamp(timestamp)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        format!("{}...", &text[..max_length.saturating_sub(3)])
    }
}

/// Calculate pagination offset
pub fn calculate_offset(page: i64, page_size: i64) -> i64 {
    (page - 1).max(0) * page_size
}

/// Total number of pages for a result set
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total_items + page_size - 1) / page_size
}

/// Percentage of an allocation that has been consumed.
///
/// Rounded to the nearest integer and clamped to 0..=100. A zero or negative
/// allocation yields 0 rather than a division error.
pub fn percent_used(used: i64, allocated: i64) -> i32 {
    if allocated <= 0 {
        return 0;
    }
    let pct = (used as f64 / allocated as f64) * 100.0;
    pct.round().clamp(0.0, 100.0) as i32
}

/// Average of progress values, rounded to the nearest integer. Empty input is 0.
pub fn average_progress(values: &[i32]) -> i32 {
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().map(|&v| v as i64).sum();
    (sum as f64 / values.len() as f64).round() as i32
}

/// Escape `%` and `_` so user input matches literally inside a LIKE pattern
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 8), "hello...");
    }

    #[test]
    fn test_percent_used() {
        assert_eq!(percent_used(18500, 25000), 74);
        assert_eq!(percent_used(0, 25000), 0);
        assert_eq!(percent_used(25000, 25000), 100);
        assert_eq!(percent_used(30000, 25000), 100);
        assert_eq!(percent_used(10, 0), 0);
    }

    #[test]
    fn test_average_progress() {
        assert_eq!(average_progress(&[]), 0);
        assert_eq!(average_progress(&[50]), 50);
        assert_eq!(average_progress(&[25, 50, 100]), 58);
    }

    #[test]
    fn test_calculate_offset() {
        assert_eq!(calculate_offset(1, 20), 0);
        assert_eq!(calculate_offset(3, 20), 40);
        assert_eq!(calculate_offset(0, 20), 0);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("100%"), r"100\%");
        assert_eq!(escape_like_pattern("youth_team"), r"youth\_team");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  grace   chapel "), "grace chapel");
    }

    #[test]
    fn test_generate_random_string() {
        let s = generate_random_string(12);
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
