//! StudyFlow database layer.
//!
//! Goals, reminders, notes and the blocked-site list live in SQLite. Bookmarks
//! and site-time stats are owned by the background service and never stored here.
//!
//! ```no_run
//! use studyflow::database::Database;
//!
//! let db = Database::open("studyflow.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
