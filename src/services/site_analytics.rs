//! Per-site analytics: today's most visited sites and the active tab.

use serde::Serialize;

use crate::services::site_classifier::{extract_domain, SiteClassifier};
use crate::services::time_format::format_minutes;
use crate::types::stats::{SiteCategory, SiteTime};

/// How many sites the analytics list shows.
pub const TOP_SITES_LIMIT: usize = 10;

/// One row of the visited-sites list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRow {
    pub domain: String,
    pub time_spent: u64,
    pub time_text: String,
    pub category: SiteCategory,
}

/// The analytics page: a visited-site count and the top of the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalytics {
    pub sites_visited: usize,
    pub top_sites: Vec<SiteRow>,
}

/// Domain and class of the active tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentTab {
    pub domain: String,
    pub category: SiteCategory,
}

/// The `limit` sites with the most time, longest first.
///
/// Ties keep their input order. A site without a category from the
/// background service is classified with `classifier`.
pub fn top_sites(sites: &[SiteTime], classifier: &SiteClassifier, limit: usize) -> Vec<SiteRow> {
    let mut sorted: Vec<&SiteTime> = sites.iter().collect();
    sorted.sort_by(|a, b| b.time_spent.cmp(&a.time_spent));
    sorted
        .into_iter()
        .take(limit)
        .map(|site| SiteRow {
            domain: site.domain.clone(),
            time_spent: site.time_spent,
            time_text: format_minutes(site.time_spent),
            category: site.category.unwrap_or_else(|| classifier.classify(&site.domain)),
        })
        .collect()
}

/// Count of sites tracked today. Every entry counts, not only the listed ones.
pub fn sites_visited(sites: &[SiteTime]) -> usize {
    sites.len()
}

pub fn analyze(sites: &[SiteTime], classifier: &SiteClassifier, limit: usize) -> SiteAnalytics {
    SiteAnalytics {
        sites_visited: sites_visited(sites),
        top_sites: top_sites(sites, classifier, limit),
    }
}

/// Classifies the active tab. A URL without a host gives an empty, neutral domain.
pub fn current_tab(url: &str, classifier: &SiteClassifier) -> CurrentTab {
    let domain = extract_domain(url).unwrap_or_default();
    let category = classifier.classify(&domain);
    CurrentTab { domain, category }
}
