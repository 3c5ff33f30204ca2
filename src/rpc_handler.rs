//! RPC method handler for the StudyFlow JSON-lines protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdio.
//! `handle_method` dispatches a method call to the managers and services on
//! [`App`] and renders the result as JSON.

use std::sync::Mutex;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::blocker_manager::BlockerManagerTrait;
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::managers::goal_manager::GoalManagerTrait;
use crate::managers::note_manager::NoteManagerTrait;
use crate::managers::reminder_manager::ReminderManagerTrait;
use crate::services::alerts::current_alerts;
use crate::services::bookmark_ranker::{rank, summarize, CategoryFilter, SortKey};
use crate::services::bookmark_transfer::export_file_name;
use crate::services::goal_tracker::GoalProgress;
use crate::services::messaging::{request, safe_lock, DataReply, Message};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::site_analytics::{analyze, current_tab, TOP_SITES_LIMIT};
use crate::services::site_classifier::extract_domain;
use crate::services::stats_aggregator::{aggregate_chart, dashboard_summary};
use crate::services::time_format::{format_countdown, format_minutes};
use crate::types::bookmark::BookmarkCategory;
use crate::types::goal::NewGoal;
use crate::types::reminder::NewReminder;
use crate::types::stats::{CurrentStats, DailyStat, SiteTime, UserStats};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", key))
}

fn opt_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn category_param(params: &Value) -> Result<BookmarkCategory, String> {
    match opt_str(params, "category") {
        Some(c) => c.parse(),
        None => Ok(BookmarkCategory::default()),
    }
}

fn decode<T: DeserializeOwned>(params: &Value) -> Result<T, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn goal_progress_json(outcome: &GoalProgress) -> Value {
    let awarded = if outcome.was_completed { None } else { outcome.xp_award };
    json!({"goal": outcome.goal, "xpAwarded": awarded})
}

/// Dispatch one method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with a message for the caller.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),

        // ─── Classification & formatting ───
        "site.classify" => {
            let domain = match (opt_str(params, "url"), opt_str(params, "domain")) {
                (Some(url), _) => extract_domain(url).unwrap_or_default(),
                (None, Some(domain)) => domain.trim().to_lowercase(),
                (None, None) => return Err("missing url or domain".to_string()),
            };
            let a = safe_lock(app);
            let category = a.classifier().classify(&domain);
            Ok(json!({"domain": domain, "category": category}))
        }
        "time.format" => {
            if let Some(secs) = params.get("seconds").and_then(Value::as_u64) {
                return Ok(json!({"text": format_countdown(secs)}));
            }
            let minutes = params.get("minutes").and_then(Value::as_u64).ok_or("missing minutes")?;
            Ok(json!({"text": format_minutes(minutes)}))
        }

        // ─── Bookmarks ───
        "bookmarks.load" => {
            let mut a = safe_lock(app);
            let bookmarks = a.bookmark_manager().load().map_err(|e| e.to_string())?;
            to_json(&bookmarks)
        }
        "bookmarks.rank" => {
            let filter = CategoryFilter::parse(opt_str(params, "category").unwrap_or("all"))?;
            let query = opt_str(params, "query").unwrap_or("");
            let sort = SortKey::parse(opt_str(params, "sort").unwrap_or(""));
            let a = safe_lock(app);
            to_json(&rank(&a.bookmarks, filter, query, sort))
        }
        "bookmarks.stats" => {
            let a = safe_lock(app);
            to_json(&summarize(&a.bookmarks, Utc::now()))
        }
        "bookmarks.add" => {
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            let category = category_param(params)?;
            let mut a = safe_lock(app);
            let bookmark = a
                .bookmark_manager()
                .add_custom(title, url, category)
                .map_err(|e| e.to_string())?;
            to_json(&bookmark)
        }
        "bookmarks.update" => {
            let id = str_param(params, "id")?;
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            let category = category_param(params)?;
            let mut a = safe_lock(app);
            let bookmark = a
                .bookmark_manager()
                .edit_bookmark(id, title, url, category)
                .map_err(|e| e.to_string())?;
            to_json(&bookmark)
        }
        "bookmarks.visit" => {
            let id = str_param(params, "id")?;
            let mut a = safe_lock(app);
            let bookmark = a
                .bookmark_manager()
                .record_visit(id, Utc::now())
                .map_err(|e| e.to_string())?;
            to_json(&bookmark)
        }
        "bookmarks.remove" => {
            let id = str_param(params, "id")?;
            let mut a = safe_lock(app);
            a.bookmark_manager().remove_bookmark(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmarks.refresh" => {
            let mut a = safe_lock(app);
            let bookmarks = a.bookmark_manager().refresh().map_err(|e| e.to_string())?;
            to_json(&bookmarks)
        }
        "bookmarks.export" => {
            let now = Utc::now();
            let mut a = safe_lock(app);
            let document = a.bookmark_manager().export(now);
            Ok(json!({"fileName": export_file_name(now), "document": document}))
        }
        "bookmarks.import" => {
            let text = match params.get("document") {
                Some(document) => document.to_string(),
                None => str_param(params, "text")?.to_string(),
            };
            let mut a = safe_lock(app);
            let added = a
                .bookmark_manager()
                .import(&text, Utc::now())
                .map_err(|e| e.to_string())?;
            Ok(json!({"added": added}))
        }

        // ─── Stats ───
        "stats.dashboard" => {
            let a = safe_lock(app);
            let dashboard = &a.settings().dashboard;
            let sender = a.sender.as_ref();

            let current: DataReply<CurrentStats> =
                request(sender, &Message::GetCurrentStats).map_err(|e| e.to_string())?;
            let current = current.into_data("getCurrentStats").map_err(|e| e.to_string())?;
            let daily: DataReply<Vec<DailyStat>> = request(
                sender,
                &Message::GetDailyStats {
                    days: dashboard.chart_days,
                },
            )
            .map_err(|e| e.to_string())?;
            let daily = daily.into_data("getDailyStats").map_err(|e| e.to_string())?;
            let goals = a
                .goal_manager()
                .preview_goals(dashboard.goals_preview)
                .map_err(|e| e.to_string())?;

            Ok(json!({
                "summary": dashboard_summary(&current),
                "chart": aggregate_chart(&daily),
                "goals": goals,
            }))
        }
        "stats.user" => {
            let a = safe_lock(app);
            let stats: UserStats = request(a.sender.as_ref(), &Message::GetStats).map_err(|e| e.to_string())?;
            Ok(json!({"xp": stats.xp, "streak": stats.streak, "level": stats.level()}))
        }

        // ─── Analytics ───
        "analytics.sites" => {
            let limit = params
                .get("limit")
                .and_then(Value::as_u64)
                .map(|l| l as usize)
                .unwrap_or(TOP_SITES_LIMIT);
            let a = safe_lock(app);
            let reply: DataReply<Vec<SiteTime>> =
                request(a.sender.as_ref(), &Message::GetTabData).map_err(|e| e.to_string())?;
            let sites = reply.into_data("getTabData").map_err(|e| e.to_string())?;
            to_json(&analyze(&sites, &a.classifier(), limit))
        }
        "analytics.current" => {
            let url = str_param(params, "url")?;
            let a = safe_lock(app);
            to_json(&current_tab(url, &a.classifier()))
        }
        "analytics.refresh" => {
            let a = safe_lock(app);
            a.sender.send(&Message::SaveData).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "analytics.reset" => {
            let a = safe_lock(app);
            a.sender.send(&Message::ForceReset).map_err(|e| e.to_string())?;
            tracing::info!("today's tracking data reset");
            Ok(json!({"ok": true}))
        }

        // ─── Goals ───
        "goals.list" => {
            let a = safe_lock(app);
            let goals = a.goal_manager().list_goals().map_err(|e| e.to_string())?;
            to_json(&goals)
        }
        "goals.preview" => {
            let a = safe_lock(app);
            let limit = params
                .get("limit")
                .and_then(Value::as_u64)
                .map(|l| l as usize)
                .unwrap_or(a.settings().dashboard.goals_preview);
            let goals = a.goal_manager().preview_goals(limit).map_err(|e| e.to_string())?;
            to_json(&goals)
        }
        "goals.add" => {
            let new_goal: NewGoal = decode(params)?;
            let a = safe_lock(app);
            let goal = a.goal_manager().add_goal(new_goal).map_err(|e| e.to_string())?;
            to_json(&goal)
        }
        "goals.increment" => {
            let id = str_param(params, "id")?;
            let delta = params.get("delta").and_then(Value::as_i64).unwrap_or(1);
            let a = safe_lock(app);
            let outcome = a
                .goal_manager()
                .increment_progress(id, delta)
                .map_err(|e| e.to_string())?;
            Ok(goal_progress_json(&outcome))
        }
        "goals.complete" => {
            let id = str_param(params, "id")?;
            let a = safe_lock(app);
            let outcome = a.goal_manager().complete_goal(id).map_err(|e| e.to_string())?;
            Ok(goal_progress_json(&outcome))
        }
        "goals.delete" => {
            let id = str_param(params, "id")?;
            let a = safe_lock(app);
            a.goal_manager().delete_goal(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Notes ───
        "notes.list" => {
            let a = safe_lock(app);
            let notes = a.note_manager().list_notes().map_err(|e| e.to_string())?;
            to_json(&notes)
        }
        "notes.add" => {
            let content = str_param(params, "content")?;
            let a = safe_lock(app);
            let note = a.note_manager().add_note(content).map_err(|e| e.to_string())?;
            to_json(&note)
        }
        "notes.delete" => {
            let id = str_param(params, "id")?;
            let a = safe_lock(app);
            a.note_manager().delete_note(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Reminders ───
        "reminders.list" => {
            let a = safe_lock(app);
            let reminders = a
                .reminder_manager()
                .list_with_status(Utc::now())
                .map_err(|e| e.to_string())?;
            to_json(&reminders)
        }
        "reminders.add" => {
            let new_reminder: NewReminder = decode(params)?;
            let a = safe_lock(app);
            let reminder = a
                .reminder_manager()
                .add_reminder(new_reminder, Utc::now())
                .map_err(|e| e.to_string())?;
            to_json(&reminder)
        }
        "reminders.complete" => {
            let id = str_param(params, "id")?;
            let a = safe_lock(app);
            let reminder = a.reminder_manager().complete_reminder(id).map_err(|e| e.to_string())?;
            to_json(&reminder)
        }
        "reminders.delete" => {
            let id = str_param(params, "id")?;
            let a = safe_lock(app);
            a.reminder_manager().delete_reminder(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Site blocker ───
        "blocker.list" => {
            let a = safe_lock(app);
            let sites = a.blocker_manager().list_sites().map_err(|e| e.to_string())?;
            Ok(json!(sites))
        }
        "blocker.add" => {
            let site = str_param(params, "site")?;
            let a = safe_lock(app);
            let sites = a.blocker_manager().add_site(site).map_err(|e| e.to_string())?;
            Ok(json!(sites))
        }
        "blocker.remove" => {
            let site = str_param(params, "site")?;
            let a = safe_lock(app);
            let sites = a.blocker_manager().remove_site(site).map_err(|e| e.to_string())?;
            Ok(json!(sites))
        }
        "blocker.common" => {
            let a = safe_lock(app);
            Ok(json!(a.settings().blocker.common_sites))
        }

        // ─── Focus ───
        "focus.start" => {
            let mut a = safe_lock(app);
            let status = a.start_focus().map_err(|e| e.to_string())?;
            to_json(&status)
        }
        "focus.stop" => {
            let mut a = safe_lock(app);
            let xp = a.stop_focus().map_err(|e| e.to_string())?;
            Ok(json!({"xpEarned": xp}))
        }
        "focus.status" => {
            let a = safe_lock(app);
            match a.focus_status() {
                Some(status) => to_json(&status),
                None => Ok(json!({"running": false})),
            }
        }

        // ─── Alerts ───
        "alerts.current" => {
            let url = opt_str(params, "url");
            let a = safe_lock(app);
            let reminders = a.reminder_manager().list_reminders().map_err(|e| e.to_string())?;
            to_json(&current_alerts(url, &a.classifier(), &reminders, Utc::now()))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = safe_lock(app);
            match opt_str(params, "key") {
                Some(key) => a.settings_engine.get_value(key).map_err(|e| e.to_string()),
                None => to_json(a.settings()),
            }
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = safe_lock(app);
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
