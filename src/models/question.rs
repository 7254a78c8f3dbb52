//! Question and answer models matching the backend wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::user::Author;

/// An answer embedded in its parent question's answer list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub content: String,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

/// A question with its embedded answers.
///
/// List endpoints omit `answers` and `updated_at`; detail responses carry both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub answer_count: i64,
    #[serde(default)]
    pub is_solved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub author: Author,
    /// Tag names. The backend sends either bare strings or tag records.
    #[serde(default, deserialize_with = "deserialize_tag_names")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Tag entries arrive as `"css"` or `{"name": "css", ...}`; both collapse to
/// the name.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Name(String),
    Record { name: String },
}

fn deserialize_tag_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<TagEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            TagEntry::Name(name) | TagEntry::Record { name } => name,
        })
        .collect())
}

/// Body for `POST /questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub tag_names: Vec<String>,
}

/// Body for `POST /answers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnswerRequest {
    pub question_id: String,
    pub content: String,
}

/// Body for `POST /votes`. Exactly one target id is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<String>,
    pub vote_type: i32,
}

/// Outcome of a vote. `total_votes` is the authoritative aggregate; the
/// client never does its own vote arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub success: bool,
    pub message: String,
    pub vote_type: i32,
    pub total_votes: i64,
}

/// Plain acknowledgement body, e.g. from `POST /answers/{id}/accept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAck {
    pub message: String,
    #[serde(default = "default_true")]
    pub success: bool,
}

fn default_true() -> bool {
    true
}
