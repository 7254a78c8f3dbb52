//! Tag endpoints.

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{Question, Tag};

impl ApiClient {
    /// GET /tags/ - list all tags.
    pub async fn get_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.get("/tags/").await
    }

    /// GET /tags/{name}/questions - questions carrying a tag.
    pub async fn questions_by_tag(&self, tag_name: &str) -> Result<Vec<Question>, ApiError> {
        self.get(&format!("/tags/{}/questions", tag_name)).await
    }
}
