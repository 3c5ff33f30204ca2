use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Productivity class of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteCategory {
    Productive,
    Distracting,
    Neutral,
}

impl SiteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteCategory::Productive => "productive",
            SiteCategory::Distracting => "distracting",
            SiteCategory::Neutral => "neutral",
        }
    }
}

/// Colour band of a focus score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreClass {
    Good,
    Average,
    Poor,
}

/// One day of site-time totals, produced by the background service.
///
/// Times are minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub productive_time: u64,
    #[serde(default)]
    pub distracting_time: u64,
    #[serde(default)]
    pub neutral_time: u64,
    #[serde(default)]
    pub focus_score: u32,
}

impl DailyStat {
    /// Builds a day whose neutral time is the remainder of the total.
    pub fn new(date: NaiveDate, total_time: u64, productive_time: u64, distracting_time: u64, focus_score: u32) -> Self {
        Self {
            date,
            total_time,
            productive_time,
            distracting_time,
            neutral_time: 0,
            focus_score,
        }
        .normalized()
    }

    /// Restores the category invariant: neutral is whatever the total leaves
    /// after productive and distracting time, and the score stays within 0..=100.
    pub fn normalized(mut self) -> Self {
        let classified = self.productive_time.saturating_add(self.distracting_time);
        if classified > self.total_time {
            self.total_time = classified;
        }
        self.neutral_time = self.total_time - classified;
        self.focus_score = self.focus_score.min(100);
        self
    }
}

/// Today's running totals from `getCurrentStats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStats {
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub productive_time: u64,
    #[serde(default)]
    pub distracting_time: u64,
    #[serde(default)]
    pub focus_score: u32,
}

/// Gamification counters from `GET_STATS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub streak: u32,
}

impl UserStats {
    /// Every 100 XP is one level, starting at level 1.
    pub fn level(&self) -> u64 {
        self.xp / 100 + 1
    }
}

/// Today's time on one site, as listed by `getTabData`. Minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTime {
    pub domain: String,
    #[serde(default)]
    pub time_spent: u64,
    /// Category assigned by the background service, if it sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SiteCategory>,
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(day) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.date_naive())
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}
