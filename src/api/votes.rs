//! Vote endpoint.

use serde_json::json;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{VoteOutcome, VoteRequest};

impl ApiClient {
    /// POST /votes - cast, switch, or toggle off a vote.
    ///
    /// The response's `total_votes` is the authoritative aggregate for the
    /// target, whatever the backend decided the vote meant.
    pub async fn cast_vote(&self, request: &VoteRequest) -> Result<VoteOutcome, ApiError> {
        self.post("/votes", json!(request)).await
    }
}
