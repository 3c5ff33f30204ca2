//! Bookmark Manager for StudyFlow.
//!
//! Bookmarks are owned by the background service. The manager keeps a local
//! copy in sync with it: every change is sent first and applied locally only
//! once the service confirms it.

use chrono::{DateTime, Utc};

use crate::services::bookmark_transfer::{self, favicon_url};
use crate::services::messaging::{
    request, BookmarksReply, Message, MessageSender, StatusReply, STATUS_BOOKMARK_ADDED,
    STATUS_BOOKMARK_REMOVED, STATUS_BOOKMARK_UPDATED,
};
use crate::services::site_classifier::extract_domain;
use crate::types::bookmark::{Bookmark, BookmarkCategory, BookmarkUpdate, ExportDocument};
use crate::types::errors::{BookmarkError, CommunicationError};

pub trait BookmarkManagerTrait {
    /// Replaces the local copy with the service's list.
    fn load(&mut self) -> Result<Vec<Bookmark>, BookmarkError>;
    fn bookmarks(&self) -> &[Bookmark];
    fn add_custom(&mut self, title: &str, url: &str, category: BookmarkCategory) -> Result<Bookmark, BookmarkError>;
    fn edit_bookmark(&mut self, id: &str, title: &str, url: &str, category: BookmarkCategory) -> Result<Bookmark, BookmarkError>;
    fn record_visit(&mut self, id: &str, now: DateTime<Utc>) -> Result<Bookmark, BookmarkError>;
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError>;
    /// Asks the service to rebuild auto-bookmarks, then reloads.
    fn refresh(&mut self) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Imports new bookmarks from an export file; returns how many were added.
    fn import(&mut self, text: &str, now: DateTime<Utc>) -> Result<usize, BookmarkError>;
    fn export(&self, now: DateTime<Utc>) -> ExportDocument;
}

pub struct BookmarkManager<'a> {
    sender: &'a dyn MessageSender,
    bookmarks: &'a mut Vec<Bookmark>,
}

/// Title and URL are required; the URL must parse and have a host.
fn validate(title: &str, url: &str) -> Result<(String, String), BookmarkError> {
    let title = title.trim();
    let url = url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(BookmarkError::InvalidInput("title and URL are required".to_string()));
    }
    if extract_domain(url).is_none() {
        return Err(BookmarkError::InvalidInput(format!("not a valid URL: {}", url)));
    }
    Ok((title.to_string(), url.to_string()))
}

fn expect_status(reply: &StatusReply, expected: &str) -> Result<(), BookmarkError> {
    if reply.status == expected {
        Ok(())
    } else {
        Err(BookmarkError::Communication(CommunicationError::Rejected(format!(
            "expected status '{}', got '{}'",
            expected, reply.status
        ))))
    }
}

impl<'a> BookmarkManager<'a> {
    pub fn new(sender: &'a dyn MessageSender, bookmarks: &'a mut Vec<Bookmark>) -> Self {
        Self { sender, bookmarks }
    }

    fn position(&self, id: &str) -> Result<usize, BookmarkError> {
        self.bookmarks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    fn send_update(&mut self, id: &str, updates: BookmarkUpdate) -> Result<Bookmark, BookmarkError> {
        let index = self.position(id)?;
        let message = Message::UpdateBookmark {
            bookmark_id: id.to_string(),
            updates: updates.clone(),
        };
        let reply: StatusReply = request(self.sender, &message).map_err(|e| {
            tracing::warn!(bookmark = id, "update failed: {}", e);
            BookmarkError::from(e)
        })?;
        expect_status(&reply, STATUS_BOOKMARK_UPDATED)?;

        let bookmark = &mut self.bookmarks[index];
        updates.apply_to(bookmark);
        Ok(bookmark.clone())
    }

    fn send_add(&self, title: &str, url: &str, category: BookmarkCategory) -> Result<Option<Bookmark>, BookmarkError> {
        let message = Message::AddCustomBookmark {
            title: title.to_string(),
            url: url.to_string(),
            category,
        };
        let reply: StatusReply = request(self.sender, &message)?;
        expect_status(&reply, STATUS_BOOKMARK_ADDED)?;
        Ok(reply.bookmark)
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    fn load(&mut self) -> Result<Vec<Bookmark>, BookmarkError> {
        let reply: BookmarksReply = request(self.sender, &Message::GetBookmarks).map_err(|e| {
            tracing::warn!("loading bookmarks failed: {}", e);
            BookmarkError::from(e)
        })?;
        *self.bookmarks = reply.bookmarks;
        tracing::debug!(count = self.bookmarks.len(), "bookmarks loaded");
        Ok(self.bookmarks.clone())
    }

    fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.as_slice()
    }

    fn add_custom(&mut self, title: &str, url: &str, category: BookmarkCategory) -> Result<Bookmark, BookmarkError> {
        let (title, url) = validate(title, url)?;
        let added = self.send_add(&title, &url, category).map_err(|e| {
            tracing::warn!("adding bookmark failed: {}", e);
            e
        })?;
        let bookmark = added.ok_or_else(|| {
            BookmarkError::Communication(CommunicationError::UnexpectedResponse(
                "bookmark missing from reply".to_string(),
            ))
        })?;
        self.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    /// Domain and favicon are recomputed from the new URL.
    fn edit_bookmark(&mut self, id: &str, title: &str, url: &str, category: BookmarkCategory) -> Result<Bookmark, BookmarkError> {
        let (title, url) = validate(title, url)?;
        let updates = BookmarkUpdate {
            domain: extract_domain(&url),
            favicon: favicon_url(&url),
            title: Some(title),
            url: Some(url),
            category: Some(category),
            ..Default::default()
        };
        self.send_update(id, updates)
    }

    fn record_visit(&mut self, id: &str, now: DateTime<Utc>) -> Result<Bookmark, BookmarkError> {
        let index = self.position(id)?;
        let updates = BookmarkUpdate {
            last_visited: Some(now),
            visit_count: Some(self.bookmarks[index].visit_count.saturating_add(1)),
            ..Default::default()
        };
        self.send_update(id, updates)
    }

    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError> {
        self.position(id)?;
        let message = Message::RemoveBookmark {
            bookmark_id: id.to_string(),
        };
        let reply: StatusReply = request(self.sender, &message).map_err(|e| {
            tracing::warn!(bookmark = id, "remove failed: {}", e);
            BookmarkError::from(e)
        })?;
        expect_status(&reply, STATUS_BOOKMARK_REMOVED)?;
        self.bookmarks.retain(|b| b.id != id);
        Ok(())
    }

    fn refresh(&mut self) -> Result<Vec<Bookmark>, BookmarkError> {
        self.sender.send(&Message::UpdateBookmarks).map_err(|e| {
            tracing::warn!("refreshing auto-bookmarks failed: {}", e);
            BookmarkError::from(e)
        })?;
        self.load()
    }

    /// The file is validated completely before anything is sent. New
    /// records are added one at a time; a failure stops the import, and the
    /// bookmarks added before it stay.
    fn import(&mut self, text: &str, now: DateTime<Utc>) -> Result<usize, BookmarkError> {
        let records = bookmark_transfer::parse_import(text)?;
        self.load()?;
        let outcome = bookmark_transfer::merge(self.bookmarks.as_slice(), &records, now);

        let mut added = 0;
        for candidate in outcome.to_add {
            let confirmed = self
                .send_add(&candidate.title, &candidate.url, candidate.category)
                .map_err(|e| {
                    tracing::warn!(added, "import stopped: {}", e);
                    e
                })?;
            self.bookmarks.push(confirmed.unwrap_or(candidate));
            added += 1;
        }

        tracing::info!(added, skipped = records.len() - added, "bookmarks imported");
        Ok(added)
    }

    fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        bookmark_transfer::export(self.bookmarks.as_slice(), now)
    }
}
