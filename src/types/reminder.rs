use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A one-shot reminder at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub reminder_date_time: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
    pub completed: bool,
    pub notified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Display status derived from the reminder time and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Overdue,
    Upcoming,
    Normal,
    Completed,
}

/// A reminder paired with its status at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderView {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub status: ReminderStatus,
}

/// Input for creating a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub reminder_date_time: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
}
