// ABOUTME: Core types for happy-tui
// ABOUTME: Focus state and timestamp formatting shared by the TUI and CLI output

use chrono::{DateTime, Local, Utc};

/// Which pane receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing a new thought
    #[default]
    Compose,
    /// Moving through the feed and toggling likes
    Feed,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Compose => Focus::Feed,
            Focus::Feed => Focus::Compose,
        }
    }
}

/// Human-friendly age of a timestamp relative to `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }

    let (amount, unit) = if secs < 3_600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else {
        (secs / 86_400, "day")
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{} {}{} ago", amount, unit, plural)
}

/// `2024-05-01 14:00 (3 hours ago)`, in local time.
pub fn format_created(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        relative_time(created_at, now)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs_ago: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        (now - Duration::seconds(secs_ago), now)
    }

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::default(), Focus::Compose);
        assert_eq!(Focus::Compose.toggle(), Focus::Feed);
        assert_eq!(Focus::Feed.toggle(), Focus::Compose);
    }

    #[test]
    fn test_relative_time_buckets() {
        let cases = [
            (0, "just now"),
            (59, "just now"),
            (60, "1 minute ago"),
            (5 * 60, "5 minutes ago"),
            (3_600, "1 hour ago"),
            (3 * 3_600 + 59, "3 hours ago"),
            (86_400, "1 day ago"),
            (10 * 86_400, "10 days ago"),
        ];
        for (secs, expected) in cases {
            let (then, now) = at(secs);
            assert_eq!(relative_time(then, now), expected, "{} seconds", secs);
        }
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let (then, now) = at(-120);
        assert_eq!(relative_time(then, now), "just now");
    }

    #[test]
    fn test_format_created_has_relative_suffix() {
        let (then, now) = at(2 * 3_600);
        let formatted = format_created(then, now);
        assert!(formatted.ends_with("(2 hours ago)"));
    }
}
