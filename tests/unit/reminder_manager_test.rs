//! Unit tests for the ReminderManager public API.

use chrono::{DateTime, Duration, TimeZone, Utc};

use studyflow::database::Database;
use studyflow::managers::reminder_manager::{ReminderManager, ReminderManagerTrait};
use studyflow::services::messaging::{Message, Outbox};
use studyflow::types::errors::ReminderError;
use studyflow::types::reminder::{NewReminder, ReminderStatus};

const XP: u32 = 10;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
}

fn new_reminder(title: &str, at: DateTime<Utc>) -> NewReminder {
    NewReminder {
        title: title.to_string(),
        description: String::new(),
        reminder_date_time: at,
        category: "deadline".to_string(),
    }
}

#[test]
fn test_add_schedules_alarm() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);

    let reminder = manager
        .add_reminder(new_reminder(" Essay due ", now() + Duration::hours(3)), now())
        .unwrap();
    assert_eq!(reminder.title, "Essay due");
    assert!(!reminder.completed);
    assert!(!reminder.notified);
    assert_eq!(reminder.created_at, now());
    assert_eq!(outbox.sent(), vec![Message::SetReminderAlarm { reminder: reminder.clone() }]);
    assert_eq!(manager.get_reminder(&reminder.id).unwrap(), reminder);
}

#[test]
fn test_add_rejects_past_time_and_blank_title() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);

    assert!(matches!(
        manager.add_reminder(new_reminder("Late", now()), now()),
        Err(ReminderError::InvalidInput(_))
    ));
    assert!(matches!(
        manager.add_reminder(new_reminder("Late", now() - Duration::minutes(1)), now()),
        Err(ReminderError::InvalidInput(_))
    ));
    assert!(matches!(
        manager.add_reminder(new_reminder(" ", now() + Duration::hours(1)), now()),
        Err(ReminderError::InvalidInput(_))
    ));
    assert!(outbox.sent().is_empty());
    assert!(manager.list_reminders().unwrap().is_empty());
}

#[test]
fn test_alarm_failure_still_stores_reminder() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    outbox.fail_with(
        "SET_REMINDER_ALARM",
        studyflow::types::errors::CommunicationError::Disconnected,
    );
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);

    manager
        .add_reminder(new_reminder("Call tutor", now() + Duration::days(1)), now())
        .unwrap();
    assert_eq!(manager.list_reminders().unwrap().len(), 1);
}

#[test]
fn test_list_with_status_sorted_by_time() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);
    manager
        .add_reminder(new_reminder("Later", now() + Duration::days(3)), now())
        .unwrap();
    manager
        .add_reminder(new_reminder("Soon", now() + Duration::hours(2)), now())
        .unwrap();

    let views = manager.list_with_status(now()).unwrap();
    assert_eq!(views[0].reminder.title, "Soon");
    assert_eq!(views[0].status, ReminderStatus::Upcoming);
    assert_eq!(views[1].status, ReminderStatus::Normal);

    // Two days later the first one is overdue.
    let later = manager.list_with_status(now() + Duration::hours(50)).unwrap();
    assert_eq!(later[0].status, ReminderStatus::Overdue);
    assert_eq!(later[1].status, ReminderStatus::Upcoming);
}

#[test]
fn test_complete_awards_once() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);
    let reminder = manager
        .add_reminder(new_reminder("Return books", now() + Duration::hours(5)), now())
        .unwrap();
    outbox.take_sent();

    let done = manager.complete_reminder(&reminder.id).unwrap();
    assert!(done.completed);
    assert!(done.completed_at.is_some());
    let again = manager.complete_reminder(&reminder.id).unwrap();
    assert_eq!(again, done);
    assert_eq!(outbox.sent(), vec![Message::UpdateXp { amount: XP }]);

    let views = manager.list_with_status(now()).unwrap();
    assert_eq!(views[0].status, ReminderStatus::Completed);
}

#[test]
fn test_complete_unknown_reminder() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);
    assert_eq!(
        manager.complete_reminder("ghost").unwrap_err(),
        ReminderError::NotFound("ghost".to_string())
    );
    assert!(outbox.sent().is_empty());
}

#[test]
fn test_delete_reminder() {
    let db = Database::open_in_memory().unwrap();
    let outbox = Outbox::new();
    let mut manager = ReminderManager::new(db.connection(), &outbox, XP);
    let reminder = manager
        .add_reminder(new_reminder("Gym", now() + Duration::hours(1)), now())
        .unwrap();

    manager.delete_reminder(&reminder.id).unwrap();
    manager.delete_reminder(&reminder.id).unwrap();
    assert!(manager.list_reminders().unwrap().is_empty());
}
