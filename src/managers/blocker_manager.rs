//! Blocked-site list for StudyFlow.
//!
//! The list is kept in insertion order. Every change is broadcast to the
//! background service with the full list in `UPDATE_BLOCKED_SITES`.

use rusqlite::{params, Connection};

use crate::services::messaging::{Message, MessageSender};
use crate::types::errors::BlockerError;

pub trait BlockerManagerTrait {
    fn list_sites(&self) -> Result<Vec<String>, BlockerError>;
    /// Returns the updated list. Adding a site already present is a no-op.
    fn add_site(&mut self, site: &str) -> Result<Vec<String>, BlockerError>;
    fn remove_site(&mut self, site: &str) -> Result<Vec<String>, BlockerError>;
}

pub struct BlockerManager<'a> {
    conn: &'a Connection,
    sender: &'a dyn MessageSender,
}

/// Trimmed, lowercased form used for storage and comparison.
pub fn normalize_site(site: &str) -> String {
    site.trim().to_lowercase()
}

impl<'a> BlockerManager<'a> {
    pub fn new(conn: &'a Connection, sender: &'a dyn MessageSender) -> Self {
        Self { conn, sender }
    }

    fn broadcast(&self, sites: &[String]) {
        let message = Message::UpdateBlockedSites {
            sites: sites.to_vec(),
        };
        if let Err(e) = self.sender.send(&message) {
            tracing::warn!("failed to push blocked sites: {}", e);
        }
    }
}

impl<'a> BlockerManagerTrait for BlockerManager<'a> {
    fn list_sites(&self) -> Result<Vec<String>, BlockerError> {
        let mut stmt = self
            .conn
            .prepare("SELECT site FROM blocked_sites ORDER BY position ASC")
            .map_err(|e| BlockerError::DatabaseError(e.to_string()))?;
        let sites = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| BlockerError::DatabaseError(e.to_string()))?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| BlockerError::DatabaseError(e.to_string()))?;
        Ok(sites)
    }

    fn add_site(&mut self, site: &str) -> Result<Vec<String>, BlockerError> {
        let site = normalize_site(site);
        if site.is_empty() {
            return Err(BlockerError::InvalidInput("site is empty".to_string()));
        }

        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO blocked_sites (site, position)
                 VALUES (?1, (SELECT COALESCE(MAX(position), -1) + 1 FROM blocked_sites))",
                params![site],
            )
            .map_err(|e| BlockerError::DatabaseError(e.to_string()))?;

        let sites = self.list_sites()?;
        if inserted > 0 {
            tracing::info!(site = %site, "site blocked");
            self.broadcast(&sites);
        }
        Ok(sites)
    }

    fn remove_site(&mut self, site: &str) -> Result<Vec<String>, BlockerError> {
        let site = normalize_site(site);
        self.conn
            .execute("DELETE FROM blocked_sites WHERE site = ?1", params![site])
            .map_err(|e| BlockerError::DatabaseError(e.to_string()))?;

        let sites = self.list_sites()?;
        self.broadcast(&sites);
        Ok(sites)
    }
}
