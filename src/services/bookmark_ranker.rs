//! Bookmark filtering, sorting and summary numbers.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use icu_collator::{Collator, CollatorOptions};

use crate::types::bookmark::{Bookmark, BookmarkCategory, BookmarkStats};

/// Category filter applied before the text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(BookmarkCategory),
}

impl CategoryFilter {
    /// `"all"` (or an empty string) passes everything through.
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        value.parse().map(CategoryFilter::Only)
    }

    fn accepts(&self, bookmark: &Bookmark) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => bookmark.category == *category,
        }
    }
}

/// Sort order of the ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    TimeSpent,
    AddedAt,
    Title,
    VisitCount,
    /// Keeps the input order.
    Unsorted,
}

impl SortKey {
    /// Unknown keys map to [`SortKey::Unsorted`].
    pub fn parse(value: &str) -> Self {
        match value {
            "timeSpent" => SortKey::TimeSpent,
            "addedAt" => SortKey::AddedAt,
            "title" => SortKey::Title,
            "visitCount" => SortKey::VisitCount,
            _ => SortKey::Unsorted,
        }
    }
}

fn matches_query(bookmark: &Bookmark, query: &str) -> bool {
    bookmark.title.to_lowercase().contains(query)
        || bookmark.domain.to_lowercase().contains(query)
        || bookmark.category.as_str().contains(query)
}

/// Locale-aware title ordering using the root collation.
///
/// Accented letters sort next to their base letter and lowercase comes
/// before uppercase on otherwise equal titles.
pub struct TitleOrder {
    collator: Option<Collator>,
}

impl TitleOrder {
    pub fn new() -> Self {
        let collator = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!("collation data unavailable, sorting titles by case-folded text: {}", e);
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
        }
    }
}

impl Default for TitleOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Filters by category and query, then sorts by `sort`.
///
/// The input is left untouched; equal elements keep their relative order.
pub fn rank(bookmarks: &[Bookmark], filter: CategoryFilter, query: &str, sort: SortKey) -> Vec<Bookmark> {
    let query = query.trim().to_lowercase();

    let mut ranked: Vec<Bookmark> = bookmarks
        .iter()
        .filter(|b| filter.accepts(b))
        .filter(|b| query.is_empty() || matches_query(b, &query))
        .cloned()
        .collect();

    match sort {
        SortKey::TimeSpent => ranked.sort_by(|a, b| b.time_spent.cmp(&a.time_spent)),
        SortKey::VisitCount => ranked.sort_by(|a, b| b.visit_count.cmp(&a.visit_count)),
        SortKey::AddedAt => ranked.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        SortKey::Title => {
            let order = TitleOrder::new();
            ranked.sort_by(|a, b| order.compare(&a.title, &b.title));
        }
        SortKey::Unsorted => {}
    }

    ranked
}

/// Totals for the bookmark stats panel.
pub fn summarize(bookmarks: &[Bookmark], now: DateTime<Utc>) -> BookmarkStats {
    let week_ago = now - Duration::days(7);
    BookmarkStats {
        total: bookmarks.len(),
        auto: bookmarks.iter().filter(|b| b.is_auto_bookmarked).count(),
        custom: bookmarks.iter().filter(|b| b.is_custom).count(),
        total_time: bookmarks.iter().map(|b| b.time_spent).sum(),
        added_this_week: bookmarks.iter().filter(|b| b.added_at > week_ago).count(),
    }
}
