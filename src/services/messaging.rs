//! Message boundary to the extension background service.
//!
//! Requests are typed [`Message`] values serialized with a `type` tag, the same
//! shape the background service's message handlers expect. Replies come back as
//! raw JSON and are decoded with [`request`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::bookmark::{Bookmark, BookmarkCategory, BookmarkUpdate};
use crate::types::errors::CommunicationError;
use crate::types::reminder::Reminder;

pub const STATUS_BOOKMARK_ADDED: &str = "bookmark added";
pub const STATUS_BOOKMARK_UPDATED: &str = "bookmark updated";
pub const STATUS_BOOKMARK_REMOVED: &str = "bookmark removed";
pub const STATUS_FOCUS_STARTED: &str = "focus session started";

/// Requests understood by the background service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    #[serde(rename = "GET_BOOKMARKS")]
    GetBookmarks,
    #[serde(rename = "ADD_CUSTOM_BOOKMARK")]
    AddCustomBookmark {
        title: String,
        url: String,
        category: BookmarkCategory,
    },
    #[serde(rename = "UPDATE_BOOKMARK", rename_all = "camelCase")]
    UpdateBookmark {
        bookmark_id: String,
        updates: BookmarkUpdate,
    },
    #[serde(rename = "REMOVE_BOOKMARK", rename_all = "camelCase")]
    RemoveBookmark { bookmark_id: String },
    #[serde(rename = "UPDATE_BOOKMARKS")]
    UpdateBookmarks,
    #[serde(rename = "getCurrentStats")]
    GetCurrentStats,
    #[serde(rename = "getDailyStats")]
    GetDailyStats { days: u32 },
    #[serde(rename = "GET_STATS")]
    GetStats,
    #[serde(rename = "getTabData")]
    GetTabData,
    #[serde(rename = "saveData")]
    SaveData,
    #[serde(rename = "forceReset")]
    ForceReset,
    #[serde(rename = "UPDATE_XP")]
    UpdateXp { amount: u32 },
    #[serde(rename = "SET_REMINDER_ALARM")]
    SetReminderAlarm { reminder: Reminder },
    #[serde(rename = "UPDATE_BLOCKED_SITES")]
    UpdateBlockedSites { sites: Vec<String> },
    #[serde(rename = "START_FOCUS_SESSION", rename_all = "camelCase")]
    StartFocusSession { additional_sites: Vec<String> },
    #[serde(rename = "END_FOCUS_SESSION")]
    EndFocusSession,
}

impl Message {
    /// The wire `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::GetBookmarks => "GET_BOOKMARKS",
            Message::AddCustomBookmark { .. } => "ADD_CUSTOM_BOOKMARK",
            Message::UpdateBookmark { .. } => "UPDATE_BOOKMARK",
            Message::RemoveBookmark { .. } => "REMOVE_BOOKMARK",
            Message::UpdateBookmarks => "UPDATE_BOOKMARKS",
            Message::GetCurrentStats => "getCurrentStats",
            Message::GetDailyStats { .. } => "getDailyStats",
            Message::GetStats => "GET_STATS",
            Message::GetTabData => "getTabData",
            Message::SaveData => "saveData",
            Message::ForceReset => "forceReset",
            Message::UpdateXp { .. } => "UPDATE_XP",
            Message::SetReminderAlarm { .. } => "SET_REMINDER_ALARM",
            Message::UpdateBlockedSites { .. } => "UPDATE_BLOCKED_SITES",
            Message::StartFocusSession { .. } => "START_FOCUS_SESSION",
            Message::EndFocusSession => "END_FOCUS_SESSION",
        }
    }

    /// Fire-only notifications get no reply.
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            Message::UpdateXp { .. } | Message::SetReminderAlarm { .. } | Message::UpdateBlockedSites { .. }
        )
    }
}

/// Reply to `GET_BOOKMARKS`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarksReply {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

/// Reply carrying a status string, e.g. `ADD_CUSTOM_BOOKMARK`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub bookmark: Option<Bookmark>,
}

/// `{success, data}` envelope used by the stats and tab-data handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct DataReply<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> DataReply<T> {
    pub fn into_data(self, kind: &str) -> Result<T, CommunicationError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(CommunicationError::Rejected(format!("{} returned no data", kind))),
        }
    }
}

/// Reply to `END_FOCUS_SESSION`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FocusEndReply {
    #[serde(default, rename = "xpEarned")]
    pub xp_earned: Option<u32>,
}

/// Transport to the background service.
pub trait MessageSender: Send + Sync {
    /// Delivers `message` and returns the raw reply (`Null` for fire-only messages).
    fn send(&self, message: &Message) -> Result<Value, CommunicationError>;
}

/// Sends `message` and decodes the reply. A `null` reply decodes as `{}`.
pub fn request<T: DeserializeOwned>(sender: &dyn MessageSender, message: &Message) -> Result<T, CommunicationError> {
    let value = sender.send(message)?;
    let value = if value.is_null() { json!({}) } else { value };
    serde_json::from_value(value)
        .map_err(|e| CommunicationError::UnexpectedResponse(format!("{}: {}", message.kind(), e)))
}

/// Lock a mutex, recovering from poisoning if necessary.
pub(crate) fn safe_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// In-process sender that records every message and answers from queued replies.
///
/// Messages without a queued reply get `null`.
#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<Message>>,
    replies: Mutex<HashMap<String, VecDeque<Result<Value, CommunicationError>>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `reply` for the next message of type `kind`.
    pub fn reply_with(&self, kind: &str, reply: Value) {
        safe_lock(&self.replies).entry(kind.to_string()).or_default().push_back(Ok(reply));
    }

    /// Queues a failure for the next message of type `kind`.
    pub fn fail_with(&self, kind: &str, error: CommunicationError) {
        safe_lock(&self.replies).entry(kind.to_string()).or_default().push_back(Err(error));
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<Message> {
        safe_lock(&self.sent).clone()
    }

    /// Drains the sent messages.
    pub fn take_sent(&self) -> Vec<Message> {
        std::mem::take(&mut *safe_lock(&self.sent))
    }
}

impl MessageSender for Outbox {
    fn send(&self, message: &Message) -> Result<Value, CommunicationError> {
        safe_lock(&self.sent).push(message.clone());
        let reply = safe_lock(&self.replies)
            .get_mut(message.kind())
            .and_then(VecDeque::pop_front);
        reply.unwrap_or(Ok(Value::Null))
    }
}
