//! Human-readable durations.

/// Formats minutes as `"45m"` or `"2h 5m"`.
pub fn format_minutes(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a countdown as zero-padded `"MM:SS"`.
pub fn format_countdown(remaining_secs: u64) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}
