//! Unit tests for the BookmarkManager public API.
//!
//! The background service is played by an `Outbox` with queued replies, so
//! each test controls exactly what the service answers.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use studyflow::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use studyflow::services::messaging::{Message, Outbox};
use studyflow::types::bookmark::{Bookmark, BookmarkCategory, BookmarkUpdate};
use studyflow::types::errors::{BookmarkError, CommunicationError};

fn bookmark_json(id: &str, title: &str, domain: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "url": format!("https://{}/", domain),
        "domain": domain,
        "category": "learning",
        "addedAt": "2024-05-01T09:00:00Z",
        "visitCount": 2,
        "timeSpent": 40,
        "isCustom": true
    })
}

/// Outbox whose first GET_BOOKMARKS answers with two bookmarks.
fn seeded() -> Outbox {
    let outbox = Outbox::new();
    outbox.reply_with(
        "GET_BOOKMARKS",
        json!({"bookmarks": [
            bookmark_json("1", "Rust Book", "doc.rust-lang.org"),
            bookmark_json("2", "GitHub", "github.com"),
        ]}),
    );
    outbox
}

#[test]
fn test_load_replaces_local_copy() {
    let outbox = seeded();
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(manager.bookmarks()[1].domain, "github.com");
    assert_eq!(outbox.sent(), vec![Message::GetBookmarks]);
}

#[test]
fn test_load_accepts_numeric_ids() {
    let outbox = Outbox::new();
    let mut raw = bookmark_json("x", "Numbered", "a.io");
    raw["id"] = json!(1714550400000u64);
    outbox.reply_with("GET_BOOKMARKS", json!({"bookmarks": [raw]}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    let loaded = manager.load().unwrap();
    assert_eq!(loaded[0].id, "1714550400000");
}

#[test]
fn test_load_failure_keeps_cache() {
    let outbox = seeded();
    let mut cache = vec![];
    {
        let mut manager = BookmarkManager::new(&outbox, &mut cache);
        manager.load().unwrap();
    }
    outbox.fail_with("GET_BOOKMARKS", CommunicationError::Disconnected);
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    let err = manager.load().unwrap_err();
    assert_eq!(err, BookmarkError::Communication(CommunicationError::Disconnected));
    assert_eq!(manager.bookmarks().len(), 2);
}

#[test]
fn test_add_custom_appends_confirmed_bookmark() {
    let outbox = Outbox::new();
    outbox.reply_with(
        "ADD_CUSTOM_BOOKMARK",
        json!({"status": "bookmark added", "bookmark": bookmark_json("9", "MDN", "developer.mozilla.org")}),
    );
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    let added = manager
        .add_custom(" MDN ", "https://developer.mozilla.org/", BookmarkCategory::Reference)
        .unwrap();
    assert_eq!(added.id, "9");
    assert_eq!(manager.bookmarks().len(), 1);
    assert_eq!(
        outbox.sent(),
        vec![Message::AddCustomBookmark {
            title: "MDN".to_string(),
            url: "https://developer.mozilla.org/".to_string(),
            category: BookmarkCategory::Reference,
        }]
    );
}

#[test]
fn test_add_custom_validates_before_sending() {
    let outbox = Outbox::new();
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    assert!(matches!(
        manager.add_custom("", "https://a.io", BookmarkCategory::Work),
        Err(BookmarkError::InvalidInput(_))
    ));
    assert!(matches!(
        manager.add_custom("Title", "not a url", BookmarkCategory::Work),
        Err(BookmarkError::InvalidInput(_))
    ));
    assert!(outbox.sent().is_empty());
}

#[test]
fn test_add_custom_rejected_status_changes_nothing() {
    let outbox = Outbox::new();
    outbox.reply_with("ADD_CUSTOM_BOOKMARK", json!({"status": "quota exceeded"}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    let err = manager
        .add_custom("Docs", "https://docs.rs", BookmarkCategory::Reference)
        .unwrap_err();
    assert!(matches!(err, BookmarkError::Communication(CommunicationError::Rejected(_))));
    assert!(manager.bookmarks().is_empty());
}

#[test]
fn test_edit_recomputes_domain_and_favicon() {
    let outbox = seeded();
    outbox.reply_with("UPDATE_BOOKMARK", json!({"status": "bookmark updated"}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();

    let edited = manager
        .edit_bookmark("2", "GitLab", "https://www.gitlab.com/explore", BookmarkCategory::Work)
        .unwrap();
    assert_eq!(edited.title, "GitLab");
    assert_eq!(edited.domain, "gitlab.com");
    assert_eq!(edited.category, BookmarkCategory::Work);
    assert!(edited.favicon.contains("www.gitlab.com"));
    assert_eq!(manager.bookmarks()[1], edited);

    match outbox.sent().last() {
        Some(Message::UpdateBookmark { bookmark_id, updates }) => {
            assert_eq!(bookmark_id, "2");
            assert_eq!(updates.domain.as_deref(), Some("gitlab.com"));
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[test]
fn test_edit_unknown_id() {
    let outbox = seeded();
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();

    let err = manager
        .edit_bookmark("missing", "x", "https://x.io", BookmarkCategory::Other)
        .unwrap_err();
    assert_eq!(err, BookmarkError::NotFound("missing".to_string()));
    assert_eq!(outbox.sent().len(), 1);
}

#[test]
fn test_record_visit_bumps_count() {
    let outbox = seeded();
    outbox.reply_with("UPDATE_BOOKMARK", json!({"status": "bookmark updated"}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 5, 8, 10, 0, 0).unwrap();

    let visited = manager.record_visit("1", now).unwrap();
    assert_eq!(visited.visit_count, 3);
    assert_eq!(visited.last_visited, Some(now));
    assert_eq!(
        outbox.sent().last(),
        Some(&Message::UpdateBookmark {
            bookmark_id: "1".to_string(),
            updates: BookmarkUpdate {
                last_visited: Some(now),
                visit_count: Some(3),
                ..Default::default()
            },
        })
    );
}

#[test]
fn test_update_failure_leaves_local_copy() {
    let outbox = seeded();
    outbox.fail_with("UPDATE_BOOKMARK", CommunicationError::Disconnected);
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();
    let before: Vec<Bookmark> = manager.bookmarks().to_vec();

    assert!(manager.record_visit("1", Utc::now()).is_err());
    assert_eq!(manager.bookmarks(), before.as_slice());
}

#[test]
fn test_remove_bookmark() {
    let outbox = seeded();
    outbox.reply_with("REMOVE_BOOKMARK", json!({"status": "bookmark removed"}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();

    manager.remove_bookmark("1").unwrap();
    assert_eq!(manager.bookmarks().len(), 1);
    assert_eq!(manager.bookmarks()[0].id, "2");
}

#[test]
fn test_refresh_requests_rebuild_then_reloads() {
    let outbox = seeded();
    outbox.reply_with("GET_BOOKMARKS", json!({"bookmarks": []}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();

    let refreshed = manager.refresh().unwrap();
    assert!(refreshed.is_empty());
    let sent = outbox.sent();
    assert_eq!(sent[1], Message::UpdateBookmarks);
    assert_eq!(sent[2], Message::GetBookmarks);
}

#[test]
fn test_import_adds_only_unknown_domains() {
    let outbox = seeded();
    outbox.reply_with("ADD_CUSTOM_BOOKMARK", json!({"status": "bookmark added"}));
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    let text = json!({"bookmarks": [
        {"title": "GitHub", "url": "https://github.com", "domain": "github.com"},
        {"title": "Crates", "url": "https://crates.io", "domain": "crates.io", "category": "reference"},
    ]})
    .to_string();

    let added = manager.import(&text, Utc::now()).unwrap();
    assert_eq!(added, 1);
    assert_eq!(manager.bookmarks().len(), 3);
    assert_eq!(manager.bookmarks()[2].domain, "crates.io");
    let adds: Vec<Message> = outbox
        .sent()
        .into_iter()
        .filter(|m| matches!(m, Message::AddCustomBookmark { .. }))
        .collect();
    assert_eq!(adds.len(), 1);
}

#[test]
fn test_import_invalid_file_sends_nothing() {
    let outbox = Outbox::new();
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);

    let err = manager.import(r#"{"nope": true}"#, Utc::now()).unwrap_err();
    assert!(matches!(err, BookmarkError::InvalidFormat(_)));
    assert!(outbox.sent().is_empty());
}

#[test]
fn test_import_stops_at_first_failure() {
    let outbox = Outbox::new();
    outbox.reply_with("GET_BOOKMARKS", json!({"bookmarks": []}));
    outbox.reply_with("ADD_CUSTOM_BOOKMARK", json!({"status": "bookmark added"}));
    outbox.fail_with("ADD_CUSTOM_BOOKMARK", CommunicationError::Disconnected);
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    let text = json!({"bookmarks": [
        {"url": "https://a.io"},
        {"url": "https://b.io"},
        {"url": "https://c.io"},
    ]})
    .to_string();

    assert!(manager.import(&text, Utc::now()).is_err());
    assert_eq!(manager.bookmarks().len(), 1);
    assert_eq!(manager.bookmarks()[0].domain, "a.io");
}

#[test]
fn test_export_uses_local_copy() {
    let outbox = seeded();
    let mut cache = vec![];
    let mut manager = BookmarkManager::new(&outbox, &mut cache);
    manager.load().unwrap();

    let document = manager.export(Utc::now());
    assert_eq!(document.bookmarks.len(), 2);
    assert_eq!(document.version, "1.0");
}
