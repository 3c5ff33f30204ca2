use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category a bookmark is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkCategory {
    #[default]
    Learning,
    Work,
    Reference,
    Other,
}

impl BookmarkCategory {
    pub const ALL: [BookmarkCategory; 4] = [
        BookmarkCategory::Learning,
        BookmarkCategory::Work,
        BookmarkCategory::Reference,
        BookmarkCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkCategory::Learning => "learning",
            BookmarkCategory::Work => "work",
            BookmarkCategory::Reference => "reference",
            BookmarkCategory::Other => "other",
        }
    }
}

impl fmt::Display for BookmarkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookmarkCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "learning" => Ok(BookmarkCategory::Learning),
            "work" => Ok(BookmarkCategory::Work),
            "reference" => Ok(BookmarkCategory::Reference),
            "other" => Ok(BookmarkCategory::Other),
            other => Err(format!("unknown bookmark category: {}", other)),
        }
    }
}

/// A bookmark as stored by the background service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub url: String,
    pub domain: String,
    pub category: BookmarkCategory,
    #[serde(default)]
    pub favicon: String,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visit_count: u32,
    /// Minutes spent on the site.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub is_auto_bookmarked: bool,
    #[serde(default)]
    pub is_custom: bool,
}

/// Partial update sent with `UPDATE_BOOKMARK`. Only populated fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BookmarkCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,
}

impl BookmarkUpdate {
    /// Applies the populated fields to a local copy of the bookmark.
    pub fn apply_to(&self, bookmark: &mut Bookmark) {
        if let Some(title) = &self.title {
            bookmark.title = title.clone();
        }
        if let Some(url) = &self.url {
            bookmark.url = url.clone();
        }
        if let Some(category) = self.category {
            bookmark.category = category;
        }
        if let Some(domain) = &self.domain {
            bookmark.domain = domain.clone();
        }
        if let Some(favicon) = &self.favicon {
            bookmark.favicon = favicon.clone();
        }
        if let Some(last_visited) = self.last_visited {
            bookmark.last_visited = Some(last_visited);
        }
        if let Some(visit_count) = self.visit_count {
            bookmark.visit_count = visit_count;
        }
    }
}

/// A bookmark-like record read from an import file.
///
/// Every field is optional: exports from older versions omit some of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visit_count: Option<u32>,
    #[serde(default)]
    pub time_spent: Option<u64>,
}

/// Bookmark export file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub bookmarks: Vec<Bookmark>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// Summary numbers shown above the bookmark list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStats {
    pub total: usize,
    pub auto: usize,
    pub custom: usize,
    /// Sum of `time_spent` in minutes.
    pub total_time: u64,
    pub added_this_week: usize,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
