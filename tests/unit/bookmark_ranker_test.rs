//! Unit tests for bookmark ranking, summaries and import/export.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

use studyflow::services::bookmark_ranker::{rank, summarize, CategoryFilter, SortKey};
use studyflow::services::bookmark_transfer::{export, export_file_name, merge, parse_import, EXPORT_VERSION};
use studyflow::types::bookmark::{Bookmark, BookmarkCategory};
use studyflow::types::errors::BookmarkError;

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

fn bookmark(id: &str, title: &str, domain: &str, category: BookmarkCategory, time_spent: u64, visits: u32, added: u32) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://{}/", domain),
        domain: domain.to_string(),
        category,
        favicon: String::new(),
        added_at: at(added),
        last_visited: None,
        visit_count: visits,
        time_spent,
        is_auto_bookmarked: false,
        is_custom: true,
    }
}

fn library() -> Vec<Bookmark> {
    vec![
        bookmark("1", "Rust Book", "doc.rust-lang.org", BookmarkCategory::Learning, 120, 4, 1),
        bookmark("2", "issue tracker", "github.com", BookmarkCategory::Work, 300, 9, 3),
        bookmark("3", "MDN", "developer.mozilla.org", BookmarkCategory::Reference, 45, 12, 2),
        bookmark("4", "Algebra", "khanacademy.org", BookmarkCategory::Learning, 300, 1, 5),
    ]
}

fn ids(bookmarks: &[Bookmark]) -> Vec<&str> {
    bookmarks.iter().map(|b| b.id.as_str()).collect()
}

#[rstest]
#[case(SortKey::TimeSpent, vec!["2", "4", "1", "3"])]
#[case(SortKey::VisitCount, vec!["3", "2", "1", "4"])]
#[case(SortKey::AddedAt, vec!["4", "2", "3", "1"])]
#[case(SortKey::Title, vec!["4", "2", "3", "1"])]
#[case(SortKey::Unsorted, vec!["1", "2", "3", "4"])]
fn rank_sort_orders(#[case] sort: SortKey, #[case] expected: Vec<&str>) {
    let ranked = rank(&library(), CategoryFilter::All, "", sort);
    assert_eq!(ids(&ranked), expected);
}

#[rstest]
#[case(vec!["Zebra", "Éclair", "apple"], vec!["apple", "Éclair", "Zebra"])]
#[case(vec!["Rust", "rust", "Ångström", "angle"], vec!["angle", "Ångström", "rust", "Rust"])]
#[case(vec!["über", "Uber", "ubuntu"], vec!["Uber", "über", "ubuntu"])]
fn rank_title_sort_is_locale_aware(#[case] titles: Vec<&str>, #[case] expected: Vec<&str>) {
    let input: Vec<Bookmark> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| bookmark(&i.to_string(), title, "example.com", BookmarkCategory::Other, 0, 0, 1))
        .collect();
    let ranked = rank(&input, CategoryFilter::All, "", SortKey::Title);
    let sorted: Vec<&str> = ranked.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(sorted, expected);
}

#[test]
fn rank_filters_category_then_query() {
    let ranked = rank(
        &library(),
        CategoryFilter::Only(BookmarkCategory::Learning),
        "  ALG ",
        SortKey::TimeSpent,
    );
    assert_eq!(ids(&ranked), vec!["4"]);
}

#[test]
fn rank_query_matches_domain_and_category_name() {
    let by_domain = rank(&library(), CategoryFilter::All, "github", SortKey::Unsorted);
    assert_eq!(ids(&by_domain), vec!["2"]);
    let by_category = rank(&library(), CategoryFilter::All, "reference", SortKey::Unsorted);
    assert_eq!(ids(&by_category), vec!["3"]);
}

#[test]
fn rank_leaves_input_untouched() {
    let input = library();
    let before = input.clone();
    let _ = rank(&input, CategoryFilter::All, "", SortKey::Title);
    assert_eq!(input, before);
}

#[test]
fn summarize_counts() {
    let mut bookmarks = library();
    bookmarks[0].is_auto_bookmarked = true;
    bookmarks[0].is_custom = false;
    let stats = summarize(&bookmarks, at(6));
    assert_eq!(stats.total, 4);
    assert_eq!(stats.auto, 1);
    assert_eq!(stats.custom, 3);
    assert_eq!(stats.total_time, 765);
    assert_eq!(stats.added_this_week, 4);
    assert_eq!(summarize(&bookmarks, at(6) + Duration::days(4)).added_this_week, 1);
}

// ─── Import / export ───

#[test]
fn import_scenario_skips_known_domain() {
    let existing = vec![bookmark("e", "GitHub", "github.com", BookmarkCategory::Work, 0, 0, 1)];
    let text = json!({"bookmarks": [
        {"title": "GitHub again", "url": "https://github.com", "domain": "github.com"},
        {"title": "New", "url": "https://new.io", "domain": "new.io"},
    ]})
    .to_string();

    let records = parse_import(&text).unwrap();
    let outcome = merge(&existing, &records, at(10));
    assert_eq!(outcome.added_count, 1);
    let added = &outcome.to_add[0];
    assert_eq!(added.domain, "new.io");
    assert!(added.is_custom);
    assert!(!added.is_auto_bookmarked);
    assert_eq!(added.added_at, at(10));
    assert_eq!(added.category, BookmarkCategory::Learning);
}

#[test]
fn import_derives_domain_from_url_when_missing() {
    let existing = vec![bookmark("e", "GitHub", "github.com", BookmarkCategory::Work, 0, 0, 1)];
    let records = parse_import(r#"{"bookmarks": [{"title": "x", "url": "https://www.GitHub.com/rust"}]}"#).unwrap();
    assert_eq!(merge(&existing, &records, at(10)).added_count, 0);
}

#[test]
fn import_normalizes_explicit_www_domain() {
    let existing = vec![bookmark("e", "Docs", "x.com", BookmarkCategory::Reference, 0, 0, 1)];
    let records = parse_import(r#"{"bookmarks": [{"title": "Docs again", "domain": "www.X.com"}]}"#).unwrap();
    assert_eq!(merge(&existing, &records, at(10)).added_count, 0);

    let outcome = merge(&[], &records, at(10));
    assert_eq!(outcome.to_add[0].domain, "x.com");
}

#[test]
fn import_keeps_duplicates_within_file() {
    let records = parse_import(
        r#"{"bookmarks": [{"url": "https://a.io", "category": "work", "visitCount": 3}, {"url": "https://a.io"}]}"#,
    )
    .unwrap();
    let outcome = merge(&[], &records, at(10));
    assert_eq!(outcome.added_count, 2);
    assert_ne!(outcome.to_add[0].id, outcome.to_add[1].id);
    assert_eq!(outcome.to_add[0].category, BookmarkCategory::Work);
    assert_eq!(outcome.to_add[0].visit_count, 3);
}

#[rstest]
#[case("not json")]
#[case("[]")]
#[case(r#"{"items": []}"#)]
#[case(r#"{"bookmarks": {}}"#)]
#[case(r#"{"bookmarks": [1, 2]}"#)]
fn import_rejects_malformed_documents(#[case] text: &str) {
    assert!(matches!(parse_import(text), Err(BookmarkError::InvalidFormat(_))));
}

#[test]
fn export_document_shape() {
    let document = export(&library(), at(7));
    assert_eq!(document.version, EXPORT_VERSION);
    assert_eq!(document.bookmarks.len(), 4);
    let value = serde_json::to_value(&document).unwrap();
    assert!(value.get("exportDate").is_some());
    assert_eq!(value["bookmarks"][0]["timeSpent"], 120);
    assert_eq!(export_file_name(at(7)), "studyflow-bookmarks-2024-05-07.json");
}

#[test]
fn export_then_import_into_same_set_adds_nothing() {
    let bookmarks = library();
    let text = serde_json::to_string(&export(&bookmarks, at(7))).unwrap();
    let records = parse_import(&text).unwrap();
    assert_eq!(merge(&bookmarks, &records, at(8)).added_count, 0);
}
