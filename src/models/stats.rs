//! Site-wide aggregate statistics.

use serde::{Deserialize, Serialize};

/// Aggregate counters from `GET /stats/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteStats {
    pub total_users: i64,
    pub total_questions: i64,
    pub total_answers: i64,
    pub total_votes: i64,
    pub total_tags: i64,
    pub solved_questions: i64,
}
