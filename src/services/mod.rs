// StudyFlow services
// Pure analytics, the focus countdown, configuration and the background-service boundary.

pub mod alerts;
pub mod bookmark_ranker;
pub mod bookmark_transfer;
pub mod focus_timer;
pub mod goal_tracker;
pub mod line_bridge;
pub mod messaging;
pub mod reminder_status;
pub mod settings_engine;
pub mod site_analytics;
pub mod site_classifier;
pub mod stats_aggregator;
pub mod time_format;
