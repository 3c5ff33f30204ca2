//! Display strings and error-trait behavior of every error type.

use studyflow::types::errors::*;

// === CommunicationError ===

#[test]
fn communication_error_display() {
    assert_eq!(CommunicationError::Disconnected.to_string(), "Background service disconnected");
    assert_eq!(
        CommunicationError::Rejected("quota".to_string()).to_string(),
        "Background service rejected request: quota"
    );
    assert_eq!(
        CommunicationError::UnexpectedResponse("bad".to_string()).to_string(),
        "Unexpected background response: bad"
    );
}

// === BookmarkError ===

#[test]
fn bookmark_error_display() {
    assert_eq!(BookmarkError::NotFound("b1".to_string()).to_string(), "Bookmark not found: b1");
    assert_eq!(
        BookmarkError::InvalidInput("title and URL are required".to_string()).to_string(),
        "Invalid bookmark: title and URL are required"
    );
    assert_eq!(
        BookmarkError::InvalidFormat("missing 'bookmarks' field".to_string()).to_string(),
        "Invalid bookmark file format: missing 'bookmarks' field"
    );
}

#[test]
fn bookmark_error_wraps_communication_error() {
    let err: BookmarkError = CommunicationError::Disconnected.into();
    assert_eq!(err, BookmarkError::Communication(CommunicationError::Disconnected));
    assert_eq!(err.to_string(), "Bookmark request failed: Background service disconnected");
}

// === Goal / Reminder / Note / Blocker ===

#[test]
fn goal_error_display() {
    assert_eq!(GoalError::NotFound("g".to_string()).to_string(), "Goal not found: g");
    assert_eq!(GoalError::InvalidInput("x".to_string()).to_string(), "Invalid goal: x");
    assert_eq!(GoalError::DatabaseError("locked".to_string()).to_string(), "Goal database error: locked");
}

#[test]
fn reminder_error_display() {
    assert_eq!(ReminderError::NotFound("r".to_string()).to_string(), "Reminder not found: r");
    assert_eq!(
        ReminderError::InvalidInput("reminder time must be in the future".to_string()).to_string(),
        "Invalid reminder: reminder time must be in the future"
    );
}

#[test]
fn note_and_blocker_error_display() {
    assert_eq!(NoteError::InvalidInput("empty".to_string()).to_string(), "Invalid note: empty");
    assert_eq!(BlockerError::InvalidInput("site is empty".to_string()).to_string(), "Invalid blocked site: site is empty");
    assert_eq!(BlockerError::DatabaseError("io".to_string()).to_string(), "Blocker database error: io");
}

// === FocusError ===

#[test]
fn focus_error_display() {
    assert_eq!(FocusError::AlreadyRunning.to_string(), "Focus session already running");
    assert_eq!(FocusError::NotRunning.to_string(), "No focus session running");
    assert_eq!(FocusError::NotStarted("busy".to_string()).to_string(), "Focus session not started: busy");
    let err: FocusError = CommunicationError::Rejected("no tabs".to_string()).into();
    assert_eq!(err.to_string(), "Focus request failed: Background service rejected request: no tabs");
}

// === SettingsError ===

#[test]
fn settings_error_display() {
    assert_eq!(SettingsError::InvalidKey("a.b".to_string()).to_string(), "Invalid settings key: a.b");
    assert_eq!(SettingsError::IoError("denied".to_string()).to_string(), "Settings I/O error: denied");
}

#[test]
fn errors_implement_error_trait() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(CommunicationError::Disconnected),
        Box::new(BookmarkError::NotFound("id".to_string())),
        Box::new(GoalError::NotFound("id".to_string())),
        Box::new(ReminderError::NotFound("id".to_string())),
        Box::new(NoteError::NotFound("id".to_string())),
        Box::new(BlockerError::InvalidInput("".to_string())),
        Box::new(FocusError::NotRunning),
        Box::new(SettingsError::InvalidValue("v".to_string())),
    ];
    for err in errors {
        assert!(err.source().is_none());
        assert!(!err.to_string().is_empty());
    }
}
