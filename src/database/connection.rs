//! SQLite connection for StudyFlow.

use std::path::Path;

use rusqlite::Connection;

use super::migrations;

/// Owns the SQLite connection; migrations run on open.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                // A failure here surfaces as an open error below.
                let _ = std::fs::create_dir_all(parent);
            }
        }
        Self::with_connection(Connection::open(path)?)
    }

    /// In-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        tracing::debug!(version = migrations::get_schema_version(&conn), "database ready");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
