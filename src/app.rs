//! App Core for StudyFlow.
//!
//! Holds the store, settings, the background-service sender, the local
//! bookmark copy and the running focus countdown.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::database::connection::Database;
use crate::managers::blocker_manager::BlockerManager;
use crate::managers::bookmark_manager::BookmarkManager;
use crate::managers::goal_manager::GoalManager;
use crate::managers::note_manager::NoteManager;
use crate::managers::reminder_manager::ReminderManager;
use crate::services::focus_timer::{FocusStatus, FocusTimer};
use crate::services::messaging::{
    request, FocusEndReply, Message, MessageSender, StatusReply, STATUS_FOCUS_STARTED,
};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::site_classifier::SiteClassifier;
use crate::types::bookmark::Bookmark;
use crate::types::errors::FocusError;
use crate::types::settings::Settings;

/// Called on the timer thread when a focus session runs out.
pub type FocusListener = Arc<dyn Fn() + Send + Sync>;

/// Central application state.
///
/// Managers borrow from the app and are created on demand, e.g.
/// `app.goal_manager().list_goals()`.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub sender: Arc<dyn MessageSender>,
    /// Last bookmark list received from the background service.
    pub bookmarks: Vec<Bookmark>,
    focus: Option<FocusTimer>,
    focus_listener: Option<FocusListener>,
}

impl App {
    pub fn new(db: Database, settings_engine: SettingsEngine, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            db: Arc::new(db),
            settings_engine,
            sender,
            bookmarks: Vec::new(),
            focus: None,
            focus_listener: None,
        }
    }

    /// Opens the database at `db_path` and loads settings.
    ///
    /// A malformed settings file is logged and replaced by defaults in memory;
    /// it is not overwritten until a setting is changed.
    pub fn open(
        db_path: &Path,
        settings_path: Option<PathBuf>,
        sender: Arc<dyn MessageSender>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            tracing::warn!(path = %settings_engine.get_config_path().display(), "using default settings: {}", e);
        }
        Ok(Self::new(db, settings_engine, sender))
    }

    pub fn settings(&self) -> &Settings {
        self.settings_engine.get_settings()
    }

    pub fn set_focus_listener(&mut self, listener: FocusListener) {
        self.focus_listener = Some(listener);
    }

    pub fn classifier(&self) -> SiteClassifier {
        let lists = &self.settings().classifier;
        SiteClassifier::new(lists.productive_sites.clone(), lists.distracting_sites.clone())
    }

    pub fn bookmark_manager(&mut self) -> BookmarkManager<'_> {
        BookmarkManager::new(self.sender.as_ref(), &mut self.bookmarks)
    }

    pub fn goal_manager(&self) -> GoalManager<'_> {
        GoalManager::new(self.db.connection(), self.sender.as_ref(), self.settings().rewards.goal_xp)
    }

    pub fn reminder_manager(&self) -> ReminderManager<'_> {
        ReminderManager::new(self.db.connection(), self.sender.as_ref(), self.settings().rewards.reminder_xp)
    }

    pub fn note_manager(&self) -> NoteManager<'_> {
        NoteManager::new(self.db.connection())
    }

    pub fn blocker_manager(&self) -> BlockerManager<'_> {
        BlockerManager::new(self.db.connection(), self.sender.as_ref())
    }

    /// Asks the background service to block the configured sites, then
    /// starts the countdown.
    pub fn start_focus(&mut self) -> Result<FocusStatus, FocusError> {
        if self.focus.as_ref().map_or(false, FocusTimer::is_running) {
            return Err(FocusError::AlreadyRunning);
        }

        let focus = self.settings().focus.clone();
        let message = Message::StartFocusSession {
            additional_sites: focus.additional_sites,
        };
        let reply: StatusReply = request(self.sender.as_ref(), &message).map_err(|e| {
            tracing::warn!("focus session not started: {}", e);
            FocusError::from(e)
        })?;
        if reply.status != STATUS_FOCUS_STARTED {
            return Err(FocusError::NotStarted(reply.status));
        }

        let listener = self.focus_listener.clone();
        let timer = FocusTimer::start(
            Duration::from_secs(u64::from(focus.duration_minutes) * 60),
            Duration::from_millis(focus.tick_interval_ms.max(1)),
            |remaining| tracing::trace!(remaining, "focus tick"),
            move || {
                tracing::info!("focus session finished");
                if let Some(listener) = listener {
                    listener();
                }
            },
        );
        tracing::info!(minutes = focus.duration_minutes, "focus session started");

        let status = timer.status();
        self.focus = Some(timer);
        Ok(status)
    }

    /// Ends the session, running or expired. The countdown is only cancelled
    /// once the background service has acknowledged the end.
    ///
    /// Returns the XP the service reports for the session.
    pub fn stop_focus(&mut self) -> Result<Option<u32>, FocusError> {
        if self.focus.is_none() {
            return Err(FocusError::NotRunning);
        }
        let reply: FocusEndReply = request(self.sender.as_ref(), &Message::EndFocusSession).map_err(|e| {
            tracing::warn!("focus session not ended: {}", e);
            FocusError::from(e)
        })?;
        if let Some(mut timer) = self.focus.take() {
            timer.cancel();
        }
        tracing::info!(xp = ?reply.xp_earned, "focus session ended");
        Ok(reply.xp_earned)
    }

    pub fn focus_status(&self) -> Option<FocusStatus> {
        self.focus.as_ref().map(FocusTimer::status)
    }
}
