//! Reminder status relative to the current time.

use chrono::{DateTime, Duration, Utc};

use crate::types::reminder::{Reminder, ReminderStatus, ReminderView};

/// How far ahead a reminder counts as upcoming.
pub fn upcoming_window() -> Duration {
    Duration::hours(24)
}

/// Overdue before `now`, upcoming within the next 24 hours, normal after that.
pub fn status(reminder: &Reminder, now: DateTime<Utc>) -> ReminderStatus {
    if reminder.completed {
        return ReminderStatus::Completed;
    }
    let at = reminder.reminder_date_time;
    if at < now {
        ReminderStatus::Overdue
    } else if at < now + upcoming_window() {
        ReminderStatus::Upcoming
    } else {
        ReminderStatus::Normal
    }
}

/// Sorts by reminder time (earliest first) and attaches statuses.
pub fn with_statuses(mut reminders: Vec<Reminder>, now: DateTime<Utc>) -> Vec<ReminderView> {
    reminders.sort_by(|a, b| a.reminder_date_time.cmp(&b.reminder_date_time));
    reminders
        .into_iter()
        .map(|reminder| {
            let status = status(&reminder, now);
            ReminderView { reminder, status }
        })
        .collect()
}

/// Incomplete reminders that fell due during the last hour.
pub fn recently_due(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<&Reminder> {
    let hour_ago = now - Duration::hours(1);
    reminders
        .iter()
        .filter(|r| !r.completed && r.reminder_date_time <= now && r.reminder_date_time > hour_ago)
        .collect()
}
