// StudyFlow state managers
// Bookmarks are synced with the background service; goals, reminders, notes
// and blocked sites are kept in SQLite.

pub mod blocker_manager;
pub mod bookmark_manager;
pub mod goal_manager;
pub mod note_manager;
pub mod reminder_manager;
