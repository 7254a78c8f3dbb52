//! Notification derivation.
//!
//! Pure logic: decides when activity on content should notify its owner and
//! renders the fixed message for each event. Insertion into the store's list
//! is the store's job.

use chrono::Utc;

use crate::models::{Notification, NotificationKind};

/// Activity only notifies when someone other than the owner acted.
pub fn should_notify(actor_id: &str, owner_id: &str) -> bool {
    actor_id != owner_id
}

/// Message for an answer posted on the owner's question.
pub fn answer_message(actor_name: &str, question_title: &str) -> String {
    format!("{} answered your question: \"{}\"", actor_name, question_title)
}

/// Message for an upvote on the owner's question.
pub fn question_vote_message(actor_name: &str, question_title: &str) -> String {
    format!("{} upvoted your question: \"{}\"", actor_name, question_title)
}

/// Message for an upvote on the owner's answer.
pub fn answer_vote_message(actor_name: &str, question_title: &str) -> String {
    format!("{} upvoted your answer on: \"{}\"", actor_name, question_title)
}

/// Build a notification stamped now.
///
/// Ids are millisecond timestamps. `newest_id` is the id at the head of the
/// list; the new id is bumped past it so two events landing in the same
/// millisecond stay individually addressable.
pub fn build(
    kind: NotificationKind,
    message: String,
    question_id: String,
    newest_id: Option<i64>,
) -> Notification {
    let now = Utc::now();
    let mut id = now.timestamp_millis();
    if let Some(newest) = newest_id {
        if id <= newest {
            id = newest + 1;
        }
    }

    Notification {
        id,
        kind,
        message,
        question_id,
        timestamp: now,
        read: false,
    }
}
