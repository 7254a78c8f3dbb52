//! Stats endpoint.

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::SiteStats;

impl ApiClient {
    /// GET /stats/ - site-wide aggregate counters.
    pub async fn get_stats(&self) -> Result<SiteStats, ApiError> {
        self.get("/stats/").await
    }
}
