//! Tag model matching the backend wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag with its backend-maintained usage counter.
///
/// Tags are read-only from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}
