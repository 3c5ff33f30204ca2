use serde::{Deserialize, Serialize};

/// Productive sites used by the classifier when nothing is configured.
pub const DEFAULT_PRODUCTIVE_SITES: &[&str] = &[
    "khanacademy.org", "coursera.org", "edx.org", "udemy.com", "github.com",
    "stackoverflow.com", "mdn.mozilla.org", "w3schools.com", "scholar.google.com",
    "wikipedia.org", "britannica.com", "ted.com", "brilliant.org",
];

/// Distracting sites used by the classifier and blocked during focus sessions.
pub const DEFAULT_DISTRACTING_SITES: &[&str] = &[
    "youtube.com", "facebook.com", "instagram.com", "twitter.com", "reddit.com",
    "tiktok.com", "snapchat.com", "discord.com", "twitch.tv", "netflix.com",
];

/// Suggestions offered by the site blocker.
pub const DEFAULT_COMMON_BLOCKED_SITES: &[&str] = &[
    "youtube.com", "facebook.com", "instagram.com", "twitter.com", "reddit.com",
    "tiktok.com", "snapchat.com", "discord.com", "twitch.tv", "netflix.com",
    "amazon.com", "ebay.com", "pinterest.com", "buzzfeed.com", "9gag.com",
];

fn to_strings(sites: &[&str]) -> Vec<String> {
    sites.iter().map(|s| s.to_string()).collect()
}

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub focus: FocusSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub rewards: RewardSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub blocker: BlockerSettings,
}

/// Focus session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusSettings {
    pub duration_minutes: u32,
    pub tick_interval_ms: u64,
    /// Sites the background service blocks for the length of a session.
    pub additional_sites: Vec<String>,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            duration_minutes: 25,
            tick_interval_ms: 1000,
            additional_sites: to_strings(DEFAULT_DISTRACTING_SITES),
        }
    }
}

/// Site lists for productive/distracting classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierSettings {
    pub productive_sites: Vec<String>,
    pub distracting_sites: Vec<String>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            productive_sites: to_strings(DEFAULT_PRODUCTIVE_SITES),
            distracting_sites: to_strings(DEFAULT_DISTRACTING_SITES),
        }
    }
}

/// XP amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardSettings {
    pub goal_xp: u32,
    pub reminder_xp: u32,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            goal_xp: 25,
            reminder_xp: 10,
        }
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSettings {
    pub chart_days: u32,
    pub goals_preview: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            chart_days: 7,
            goals_preview: 3,
        }
    }
}

/// Site blocker settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockerSettings {
    pub common_sites: Vec<String>,
}

impl Default for BlockerSettings {
    fn default() -> Self {
        Self {
            common_sites: to_strings(DEFAULT_COMMON_BLOCKED_SITES),
        }
    }
}
