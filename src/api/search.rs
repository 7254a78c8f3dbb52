//! Search endpoint.

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::Question;

impl ApiClient {
    /// GET /search/questions?q= - full-text question search.
    pub async fn search_questions(&self, query: &str) -> Result<Vec<Question>, ApiError> {
        self.get_with_query("/search/questions", &[("q", query)])
            .await
    }
}
