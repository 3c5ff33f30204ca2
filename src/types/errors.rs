use std::fmt;

// === CommunicationError ===

/// Errors talking to the background service.
#[derive(Debug, Clone, PartialEq)]
pub enum CommunicationError {
    /// The channel to the background service is closed.
    Disconnected,
    /// The background service answered with an error.
    Rejected(String),
    /// The reply could not be decoded into the expected shape.
    UnexpectedResponse(String),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Disconnected => write!(f, "Background service disconnected"),
            CommunicationError::Rejected(msg) => write!(f, "Background service rejected request: {}", msg),
            CommunicationError::UnexpectedResponse(msg) => {
                write!(f, "Unexpected background response: {}", msg)
            }
        }
    }
}

impl std::error::Error for CommunicationError {}

// === BookmarkError ===

/// Errors related to bookmark operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// Title, URL or category failed validation.
    InvalidInput(String),
    /// The import file is malformed.
    InvalidFormat(String),
    /// The background service call failed.
    Communication(CommunicationError),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::InvalidInput(msg) => write!(f, "Invalid bookmark: {}", msg),
            BookmarkError::InvalidFormat(msg) => {
                write!(f, "Invalid bookmark file format: {}", msg)
            }
            BookmarkError::Communication(e) => write!(f, "Bookmark request failed: {}", e),
        }
    }
}

impl std::error::Error for BookmarkError {}

impl From<CommunicationError> for BookmarkError {
    fn from(e: CommunicationError) -> Self {
        BookmarkError::Communication(e)
    }
}

// === GoalError ===

/// Errors related to goal tracking.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalError {
    /// Goal with the given ID was not found.
    NotFound(String),
    /// Title or target failed validation.
    InvalidInput(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for GoalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalError::NotFound(id) => write!(f, "Goal not found: {}", id),
            GoalError::InvalidInput(msg) => write!(f, "Invalid goal: {}", msg),
            GoalError::DatabaseError(msg) => write!(f, "Goal database error: {}", msg),
        }
    }
}

impl std::error::Error for GoalError {}

// === ReminderError ===

/// Errors related to reminders.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderError {
    /// Reminder with the given ID was not found.
    NotFound(String),
    /// Title or time failed validation.
    InvalidInput(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for ReminderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderError::NotFound(id) => write!(f, "Reminder not found: {}", id),
            ReminderError::InvalidInput(msg) => write!(f, "Invalid reminder: {}", msg),
            ReminderError::DatabaseError(msg) => write!(f, "Reminder database error: {}", msg),
        }
    }
}

impl std::error::Error for ReminderError {}

// === NoteError ===

/// Errors related to notes.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteError {
    /// Note with the given ID was not found.
    NotFound(String),
    /// The note content is empty.
    InvalidInput(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::NotFound(id) => write!(f, "Note not found: {}", id),
            NoteError::InvalidInput(msg) => write!(f, "Invalid note: {}", msg),
            NoteError::DatabaseError(msg) => write!(f, "Note database error: {}", msg),
        }
    }
}

impl std::error::Error for NoteError {}

// === BlockerError ===

/// Errors related to the site blocker.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockerError {
    /// The site entry is empty.
    InvalidInput(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for BlockerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockerError::InvalidInput(msg) => write!(f, "Invalid blocked site: {}", msg),
            BlockerError::DatabaseError(msg) => write!(f, "Blocker database error: {}", msg),
        }
    }
}

impl std::error::Error for BlockerError {}

// === FocusError ===

/// Errors related to focus sessions.
#[derive(Debug, Clone, PartialEq)]
pub enum FocusError {
    /// A session is already running.
    AlreadyRunning,
    /// No session is running.
    NotRunning,
    /// The background service refused to start the session.
    NotStarted(String),
    /// The background service call failed.
    Communication(CommunicationError),
}

impl fmt::Display for FocusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusError::AlreadyRunning => write!(f, "Focus session already running"),
            FocusError::NotRunning => write!(f, "No focus session running"),
            FocusError::NotStarted(status) => write!(f, "Focus session not started: {}", status),
            FocusError::Communication(e) => write!(f, "Focus request failed: {}", e),
        }
    }
}

impl std::error::Error for FocusError {}

impl From<CommunicationError> for FocusError {
    fn from(e: CommunicationError) -> Self {
        FocusError::Communication(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
