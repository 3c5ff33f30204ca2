//! Property-based tests for Settings persistence.
//!
//! Any valid settings value written by the engine must load back unchanged,
//! and a dot-path update must be visible through `get_value`.

use proptest::prelude::*;
use tempfile::TempDir;

use studyflow::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use studyflow::types::settings::{
    BlockerSettings, ClassifierSettings, DashboardSettings, FocusSettings, RewardSettings, Settings,
};

fn arb_site() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9-]{1,12}", prop_oneof![Just(".com"), Just(".org"), Just(".io"), Just(".tv")])
        .prop_map(|(name, tld)| format!("{}{}", name, tld))
}

fn arb_sites() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_site(), 0..8)
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        (1u32..240, 1u64..5000, arb_sites()),
        (arb_sites(), arb_sites()),
        (0u32..500, 0u32..500),
        (1u32..31, 0usize..10),
        arb_sites(),
    )
        .prop_map(|((minutes, tick, additional), (productive, distracting), (goal_xp, reminder_xp), (days, preview), common)| {
            Settings {
                focus: FocusSettings {
                    duration_minutes: minutes,
                    tick_interval_ms: tick,
                    additional_sites: additional,
                },
                classifier: ClassifierSettings {
                    productive_sites: productive,
                    distracting_sites: distracting,
                },
                rewards: RewardSettings { goal_xp, reminder_xp },
                dashboard: DashboardSettings {
                    chart_days: days,
                    goals_preview: preview,
                },
                blocker: BlockerSettings { common_sites: common },
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn saved_settings_load_back_unchanged(settings in arb_settings()) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, json).unwrap();

        let mut engine = SettingsEngine::new(Some(path));
        engine.load().unwrap();
        prop_assert_eq!(engine.get_settings(), &settings);
    }

    #[test]
    fn set_value_persists_across_engines(minutes in 1u32..600, xp in 0u32..1000) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.set_value("focus.duration_minutes", serde_json::json!(minutes)).unwrap();
        engine.set_value("rewards.goal_xp", serde_json::json!(xp)).unwrap();
        prop_assert_eq!(engine.get_value("focus.duration_minutes").unwrap(), serde_json::json!(minutes));

        let mut reloaded = SettingsEngine::new(Some(path));
        reloaded.load().unwrap();
        prop_assert_eq!(reloaded.get_settings().focus.duration_minutes, minutes);
        prop_assert_eq!(reloaded.get_settings().rewards.goal_xp, xp);
    }
}
