//! Reminder Manager for StudyFlow.
//!
//! Reminders are stored in SQLite. Adding one asks the background service to
//! schedule an alarm; completing one awards XP.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::services::messaging::{Message, MessageSender};
use crate::services::reminder_status;
use crate::types::errors::ReminderError;
use crate::types::reminder::{NewReminder, Reminder, ReminderView};

pub trait ReminderManagerTrait {
    fn add_reminder(&mut self, reminder: NewReminder, now: DateTime<Utc>) -> Result<Reminder, ReminderError>;
    fn get_reminder(&self, id: &str) -> Result<Reminder, ReminderError>;
    fn list_reminders(&self) -> Result<Vec<Reminder>, ReminderError>;
    fn list_with_status(&self, now: DateTime<Utc>) -> Result<Vec<ReminderView>, ReminderError>;
    fn complete_reminder(&mut self, id: &str) -> Result<Reminder, ReminderError>;
    fn delete_reminder(&mut self, id: &str) -> Result<(), ReminderError>;
}

pub struct ReminderManager<'a> {
    conn: &'a Connection,
    sender: &'a dyn MessageSender,
    reminder_xp: u32,
}

impl<'a> ReminderManager<'a> {
    pub fn new(conn: &'a Connection, sender: &'a dyn MessageSender, reminder_xp: u32) -> Self {
        Self {
            conn,
            sender,
            reminder_xp,
        }
    }

    fn row_to_reminder(row: &rusqlite::Row) -> rusqlite::Result<Reminder> {
        Ok(Reminder {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            reminder_date_time: row.get(3)?,
            category: row.get(4)?,
            completed: row.get(5)?,
            notified: row.get(6)?,
            created_at: row.get(7)?,
            completed_at: row.get(8)?,
        })
    }
}

fn db_err(e: rusqlite::Error) -> ReminderError {
    ReminderError::DatabaseError(e.to_string())
}

impl<'a> ReminderManagerTrait for ReminderManager<'a> {
    /// The title is required and the time must be strictly after `now`.
    fn add_reminder(&mut self, reminder: NewReminder, now: DateTime<Utc>) -> Result<Reminder, ReminderError> {
        let title = reminder.title.trim();
        if title.is_empty() {
            return Err(ReminderError::InvalidInput("title is required".to_string()));
        }
        if reminder.reminder_date_time <= now {
            return Err(ReminderError::InvalidInput(
                "reminder time must be in the future".to_string(),
            ));
        }

        let created = Reminder {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: reminder.description.trim().to_string(),
            reminder_date_time: reminder.reminder_date_time,
            category: reminder.category.trim().to_string(),
            completed: false,
            notified: false,
            created_at: now,
            completed_at: None,
        };

        self.conn
            .execute(
                "INSERT INTO reminders (id, title, description, reminder_date_time, category, completed, notified, created_at, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    created.id,
                    created.title,
                    created.description,
                    created.reminder_date_time,
                    created.category,
                    created.completed,
                    created.notified,
                    created.created_at,
                    created.completed_at,
                ],
            )
            .map_err(db_err)?;

        if let Err(e) = self.sender.send(&Message::SetReminderAlarm {
            reminder: created.clone(),
        }) {
            tracing::warn!(reminder = %created.id, "failed to schedule reminder alarm: {}", e);
        }
        Ok(created)
    }

    fn get_reminder(&self, id: &str) -> Result<Reminder, ReminderError> {
        self.conn
            .query_row(
                "SELECT id, title, description, reminder_date_time, category, completed, notified, created_at, completed_at
                 FROM reminders WHERE id = ?1",
                params![id],
                Self::row_to_reminder,
            )
            .optional()
            .map_err(db_err)?
            .ok_or_else(|| ReminderError::NotFound(id.to_string()))
    }

    /// Earliest first.
    fn list_reminders(&self) -> Result<Vec<Reminder>, ReminderError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, description, reminder_date_time, category, completed, notified, created_at, completed_at
                 FROM reminders ORDER BY reminder_date_time ASC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::row_to_reminder)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(rows)
    }

    fn list_with_status(&self, now: DateTime<Utc>) -> Result<Vec<ReminderView>, ReminderError> {
        Ok(reminder_status::with_statuses(self.list_reminders()?, now))
    }

    /// One-way. Completing an already completed reminder changes nothing and
    /// awards nothing.
    fn complete_reminder(&mut self, id: &str) -> Result<Reminder, ReminderError> {
        let mut reminder = self.get_reminder(id)?;
        if reminder.completed {
            return Ok(reminder);
        }

        reminder.completed = true;
        reminder.completed_at = Some(Utc::now());
        self.conn
            .execute(
                "UPDATE reminders SET completed = 1, completed_at = ?1 WHERE id = ?2",
                params![reminder.completed_at, reminder.id],
            )
            .map_err(db_err)?;

        if let Err(e) = self.sender.send(&Message::UpdateXp {
            amount: self.reminder_xp,
        }) {
            tracing::warn!("failed to award reminder XP: {}", e);
        }
        Ok(reminder)
    }

    fn delete_reminder(&mut self, id: &str) -> Result<(), ReminderError> {
        self.conn
            .execute("DELETE FROM reminders WHERE id = ?1", params![id])
            .map_err(db_err)?;
        Ok(())
    }
}
