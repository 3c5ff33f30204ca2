//! Chart bucketing and focus-score classification for the dashboard.
//!
//! Bar heights are percentages of the chart area; every value produced here
//! lies in `0.0..=100.0`.

use serde::{Deserialize, Serialize};

use crate::services::time_format::format_minutes;
use crate::types::stats::{CurrentStats, DailyStat, ScoreClass};

/// Smallest bar drawn, so empty days stay visible.
pub const MIN_BAR_HEIGHT: f64 = 10.0;

/// One bar of the focus-score chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusBar {
    pub height_percent: f64,
    pub score: u32,
    pub score_class: ScoreClass,
}

/// One stacked bar of the productivity chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityBar {
    pub height_percent: f64,
    pub productive_percent: f64,
    pub distracting_percent: f64,
    pub neutral_percent: f64,
}

/// Both weekly charts plus their shared labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub focus_bars: Vec<FocusBar>,
    pub productivity_bars: Vec<ProductivityBar>,
    pub labels: Vec<String>,
}

/// Today's headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub focus_score: u32,
    pub score_class: ScoreClass,
    pub progress_percent: f64,
    pub total_time: String,
    pub productive_time: String,
}

/// `>= 75` good, `>= 50` average, otherwise poor.
pub fn score_class(score: u32) -> ScoreClass {
    if score >= 75 {
        ScoreClass::Good
    } else if score >= 50 {
        ScoreClass::Average
    } else {
        ScoreClass::Poor
    }
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn focus_bar(day: &DailyStat) -> FocusBar {
    let score = day.focus_score.min(100);
    FocusBar {
        height_percent: clamp_percent(f64::from(score).max(MIN_BAR_HEIGHT)),
        score,
        score_class: score_class(score),
    }
}

fn productivity_bar(day: &DailyStat, max_total: u64) -> ProductivityBar {
    let height = clamp_percent((day.total_time as f64 / max_total as f64 * 100.0).max(MIN_BAR_HEIGHT));

    if day.total_time == 0 {
        return ProductivityBar {
            height_percent: height,
            productive_percent: 0.0,
            distracting_percent: 0.0,
            neutral_percent: 0.0,
        };
    }

    let total = day.total_time as f64;
    let productive = clamp_percent(day.productive_time as f64 / total * height);
    let distracting = clamp_percent(day.distracting_time as f64 / total * height).min(height - productive);
    let neutral = (height - productive - distracting).max(0.0);

    ProductivityBar {
        height_percent: height,
        productive_percent: productive,
        distracting_percent: distracting,
        neutral_percent: neutral,
    }
}

/// Weekday abbreviation, e.g. `"Mon"`.
fn weekday_label(day: &DailyStat) -> String {
    day.date.format("%a").to_string()
}

/// Builds both charts from `days`, keeping the caller's order.
pub fn aggregate_chart(days: &[DailyStat]) -> ChartData {
    let days: Vec<DailyStat> = days.iter().cloned().map(DailyStat::normalized).collect();
    let max_total = days.iter().map(|d| d.total_time).max().unwrap_or(0).max(1);

    ChartData {
        focus_bars: days.iter().map(focus_bar).collect(),
        productivity_bars: days.iter().map(|d| productivity_bar(d, max_total)).collect(),
        labels: days.iter().map(weekday_label).collect(),
    }
}

/// Headline numbers for today's stats card.
pub fn dashboard_summary(current: &CurrentStats) -> DashboardSummary {
    let score = current.focus_score.min(100);
    DashboardSummary {
        focus_score: score,
        score_class: score_class(score),
        progress_percent: f64::from(score),
        total_time: format_minutes(current.total_time),
        productive_time: format_minutes(current.productive_time),
    }
}
