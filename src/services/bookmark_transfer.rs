//! Bookmark import/export.
//!
//! Import is a two-step affair: [`parse_import`] validates the whole file up
//! front, then [`merge`] decides which records are new. Nothing is merged from
//! a file that fails validation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::services::site_classifier::{extract_domain, normalize_domain};
use crate::types::bookmark::{Bookmark, BookmarkCategory, ExportDocument, ImportRecord};
use crate::types::errors::BookmarkError;

/// Version string written into export files.
pub const EXPORT_VERSION: &str = "1.0";

/// Result of merging an import into the existing collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub to_add: Vec<Bookmark>,
    pub added_count: usize,
}

/// Favicon service URL for the host of `url`.
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    Some(format!("https://www.google.com/s2/favicons?domain={}&sz=32", host))
}

/// Validates an import file and returns its records.
///
/// The document must be an object with a `bookmarks` array of objects.
pub fn parse_import(text: &str) -> Result<Vec<ImportRecord>, BookmarkError> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| BookmarkError::InvalidFormat(format!("not valid JSON: {}", e)))?;
    parse_import_value(&document)
}

/// Same as [`parse_import`] for an already-decoded document.
pub fn parse_import_value(document: &Value) -> Result<Vec<ImportRecord>, BookmarkError> {
    let entries = document
        .get("bookmarks")
        .ok_or_else(|| BookmarkError::InvalidFormat("missing 'bookmarks' field".to_string()))?
        .as_array()
        .ok_or_else(|| BookmarkError::InvalidFormat("'bookmarks' is not a list".to_string()))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                return Err(BookmarkError::InvalidFormat(format!(
                    "entry {} is not an object",
                    index
                )));
            }
            serde_json::from_value(entry.clone()).map_err(|e| {
                BookmarkError::InvalidFormat(format!("entry {}: {}", index, e))
            })
        })
        .collect()
}

/// Dedup key of an import record: explicit `domain`, else the host of `url`.
fn record_domain(record: &ImportRecord) -> Option<String> {
    match &record.domain {
        Some(domain) if !domain.trim().is_empty() => normalize_domain(domain),
        _ => record.url.as_deref().and_then(extract_domain),
    }
}

fn accept_record(record: &ImportRecord, domain: String, now: DateTime<Utc>) -> Bookmark {
    let url = record.url.clone().unwrap_or_else(|| format!("https://{}", domain));
    let category = record
        .category
        .as_deref()
        .and_then(|c| c.parse::<BookmarkCategory>().ok())
        .unwrap_or_default();
    let favicon = record
        .favicon
        .clone()
        .or_else(|| favicon_url(&url))
        .unwrap_or_default();

    Bookmark {
        id: Uuid::new_v4().to_string(),
        title: record.title.clone().unwrap_or_else(|| domain.clone()),
        url,
        domain,
        category,
        favicon,
        added_at: now,
        last_visited: record.last_visited,
        visit_count: record.visit_count.unwrap_or(0),
        time_spent: record.time_spent.unwrap_or(0),
        is_auto_bookmarked: false,
        is_custom: true,
    }
}

/// Selects the incoming records whose domain is not already bookmarked.
///
/// Existing bookmarks are never replaced. Records without any resolvable
/// domain are keyed by the empty string.
pub fn merge(existing: &[Bookmark], incoming: &[ImportRecord], now: DateTime<Utc>) -> MergeOutcome {
    let known: HashSet<String> = existing
        .iter()
        .map(|b| normalize_domain(&b.domain).unwrap_or_default())
        .collect();

    let to_add: Vec<Bookmark> = incoming
        .iter()
        .filter_map(|record| {
            let domain = record_domain(record).unwrap_or_default();
            if known.contains(&domain) {
                None
            } else {
                Some(accept_record(record, domain, now))
            }
        })
        .collect();

    MergeOutcome {
        added_count: to_add.len(),
        to_add,
    }
}

/// Builds the export document for `bookmarks`.
pub fn export(bookmarks: &[Bookmark], now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        bookmarks: bookmarks.to_vec(),
        export_date: now,
        version: EXPORT_VERSION.to_string(),
    }
}

/// File name for an export taken at `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("studyflow-bookmarks-{}.json", now.format("%Y-%m-%d"))
}
