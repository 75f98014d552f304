use chrono::{DateTime, Datelike, Utc};

/// Format timestamp with tiered display:
/// - Relative for <7 days: "2h ago", "3d ago"
/// - Absolute for ≥7 days: "Jan 15", "Dec 3, 2024"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, &Utc::now())
}

pub(crate) fn format_timestamp_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_days() < 7 {
        format_relative(duration.num_seconds())
    } else {
        format_absolute(timestamp, now)
    }
}

/// Whole days elapsed since `timestamp` (never negative)
pub fn days_since(timestamp: &DateTime<Utc>) -> i64 {
    Utc::now().signed_duration_since(*timestamp).num_days().max(0)
}

/// Format with a user-supplied strftime pattern
pub fn format_with(timestamp: &DateTime<Utc>, format: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    // chrono reports invalid patterns as a fmt error instead of panicking here
    if write!(out, "{}", timestamp.format(format)).is_err() {
        return timestamp.format(crate::models::DEFAULT_DATE_FORMAT).to_string();
    }
    out
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}

fn format_absolute(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_formats() {
        let now = now();
        assert_eq!(format_timestamp_at(&(now - Duration::seconds(30)), &now), "just now");
        assert_eq!(format_timestamp_at(&(now - Duration::minutes(45)), &now), "45m ago");
        assert_eq!(format_timestamp_at(&(now - Duration::hours(3)), &now), "3h ago");
        assert_eq!(format_timestamp_at(&(now - Duration::days(5)), &now), "5d ago");
    }

    #[test]
    fn test_absolute_same_year() {
        let now = now();
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        assert_eq!(format_timestamp_at(&ts, &now), "Jan 15");
    }

    #[test]
    fn test_absolute_other_year() {
        let now = now();
        let ts = Utc.with_ymd_and_hms(2023, 12, 3, 8, 0, 0).unwrap();
        assert_eq!(format_timestamp_at(&ts, &now), "Dec 3, 2023");
    }

    #[test]
    fn test_days_since() {
        assert_eq!(days_since(&(Utc::now() - Duration::days(10))), 10);
        assert_eq!(days_since(&(Utc::now() + Duration::days(2))), 0);
    }

    #[test]
    fn test_format_with_pattern() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        assert_eq!(format_with(&ts, "%Y-%m-%d"), "2024-06-15");
        assert_eq!(format_with(&ts, "%d.%m.%Y %H:%M"), "15.06.2024 12:30");
    }
}
