use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A counted goal, e.g. "Read 5 chapters".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub target: u32,
    pub progress: u32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Progress as a percentage of the target, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (f64::from(self.progress) / f64::from(self.target) * 100.0).min(100.0)
    }
}

/// Input for creating a goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub target: i64,
}
