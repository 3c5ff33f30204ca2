//! Site classifier for StudyFlow.
//!
//! Maps a hostname to productive, distracting or neutral by matching it
//! against two static site lists.

use url::Url;

use crate::types::settings::{DEFAULT_DISTRACTING_SITES, DEFAULT_PRODUCTIVE_SITES};
use crate::types::stats::SiteCategory;

/// Classifies `domain` against the built-in site lists.
pub fn classify(domain: &str) -> SiteCategory {
    classify_with(domain, DEFAULT_PRODUCTIVE_SITES, DEFAULT_DISTRACTING_SITES)
}

/// Lowercased hostname of `url` without a leading `www.`.
///
/// Returns `None` when `url` does not parse or has no host.
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    normalize_domain(parsed.host_str()?)
}

/// Canonical form of a bare host: trimmed, lowercased, one `www.` removed.
pub fn normalize_domain(host: &str) -> Option<String> {
    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("www.").map(str::to_string).unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Two-way containment: covers subdomains and partial hosts in either direction.
fn entry_matches(domain: &str, entry: &str) -> bool {
    let entry = entry.to_lowercase();
    domain.contains(&entry) || entry.contains(domain)
}

fn classify_with<S: AsRef<str>>(domain: &str, productive: &[S], distracting: &[S]) -> SiteCategory {
    let domain = domain.trim().to_lowercase();
    // An empty string is contained in every entry.
    if domain.is_empty() {
        return SiteCategory::Neutral;
    }

    if productive.iter().any(|site| entry_matches(&domain, site.as_ref())) {
        SiteCategory::Productive
    } else if distracting.iter().any(|site| entry_matches(&domain, site.as_ref())) {
        SiteCategory::Distracting
    } else {
        SiteCategory::Neutral
    }
}

/// Classifier over configurable site lists.
#[derive(Debug, Clone)]
pub struct SiteClassifier {
    productive: Vec<String>,
    distracting: Vec<String>,
}

impl SiteClassifier {
    pub fn new(productive: Vec<String>, distracting: Vec<String>) -> Self {
        Self {
            productive,
            distracting,
        }
    }

    /// Productive list is checked first; the first match wins.
    pub fn classify(&self, domain: &str) -> SiteCategory {
        classify_with(domain, &self.productive, &self.distracting)
    }

    /// Classifies the host of a full URL. Unparseable URLs are neutral.
    pub fn classify_url(&self, url: &str) -> SiteCategory {
        match extract_domain(url) {
            Some(domain) => self.classify(&domain),
            None => SiteCategory::Neutral,
        }
    }
}

impl Default for SiteClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRODUCTIVE_SITES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_DISTRACTING_SITES.iter().map(|s| s.to_string()).collect(),
        )
    }
}
