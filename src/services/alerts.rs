//! Alerts shown on the popup's home page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::reminder_status::recently_due;
use crate::services::site_classifier::{extract_domain, SiteClassifier};
use crate::types::reminder::Reminder;
use crate::types::stats::SiteCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Info,
}

/// What the UI offers to do about an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertAction {
    StartFocusSession,
    ViewCalendar,
}

impl AlertAction {
    pub fn label(&self) -> &'static str {
        match self {
            AlertAction::StartFocusSession => "Start Focus Session",
            AlertAction::ViewCalendar => "View Calendar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub action: AlertAction,
}

/// Builds the alert list for the active tab.
///
/// Without an active tab URL there are no alerts at all. A distracting
/// domain produces one warning; every incomplete reminder that fell due in
/// the last hour produces an info alert.
pub fn current_alerts(
    active_url: Option<&str>,
    classifier: &SiteClassifier,
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let url = match active_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => return Vec::new(),
    };

    let mut alerts = Vec::new();
    if let Some(domain) = extract_domain(url) {
        if classifier.classify(&domain) == SiteCategory::Distracting {
            alerts.push(Alert {
                kind: AlertKind::Warning,
                message: format!("You're on a distracting site: {}", domain),
                action: AlertAction::StartFocusSession,
            });
        }
    }

    alerts.extend(recently_due(reminders, now).into_iter().map(|reminder| Alert {
        kind: AlertKind::Info,
        message: format!("Reminder: {}", reminder.title),
        action: AlertAction::ViewCalendar,
    }));
    alerts
}
