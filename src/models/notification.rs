//! Locally synthesized activity notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of activity produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Answer,
    Vote,
    Comment,
    Other,
}

/// A record informing the current user of activity on their own content.
///
/// Notifications never travel over the wire; they exist only in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Locally generated, time-based, unique within the list.
    pub id: i64,
    pub kind: NotificationKind,
    pub message: String,
    pub question_id: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}
