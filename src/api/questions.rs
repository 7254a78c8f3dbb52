//! Question and answer endpoints.

use serde_json::json;

use super::ApiClient;
use crate::errors::ApiError;
use crate::models::{Answer, CreateAnswerRequest, CreateQuestionRequest, MessageAck, Question};

impl ApiClient {
    /// GET /questions/ - list recent questions.
    pub async fn get_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.get("/questions/").await
    }

    /// GET /questions/{id} - fetch one question with its answers.
    ///
    /// The backend increments the question's view counter as a side effect.
    pub async fn get_question(&self, question_id: &str) -> Result<Question, ApiError> {
        self.get(&format!("/questions/{}", question_id)).await
    }

    /// POST /questions - create a question.
    pub async fn create_question(
        &self,
        request: &CreateQuestionRequest,
    ) -> Result<Question, ApiError> {
        self.post("/questions", json!(request)).await
    }

    /// GET /questions/me/questions - questions asked by the current user.
    pub async fn my_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.get("/questions/me/questions").await
    }

    /// GET /questions/user/{id} - questions asked by another user.
    pub async fn user_questions(&self, user_id: &str) -> Result<Vec<Question>, ApiError> {
        self.get(&format!("/questions/user/{}", user_id)).await
    }

    /// POST /answers - create an answer on a question.
    pub async fn create_answer(&self, request: &CreateAnswerRequest) -> Result<Answer, ApiError> {
        self.post("/answers", json!(request)).await
    }

    /// POST /answers/{id}/accept - accept an answer (question owner only).
    pub async fn accept_answer(&self, answer_id: &str) -> Result<MessageAck, ApiError> {
        self.post_empty(&format!("/answers/{}/accept", answer_id))
            .await
    }

    /// GET /answers/me/answers - answers written by the current user.
    pub async fn my_answers(&self) -> Result<Vec<Answer>, ApiError> {
        self.get("/answers/me/answers").await
    }

    /// GET /answers/user/{id} - answers written by another user.
    pub async fn user_answers(&self, user_id: &str) -> Result<Vec<Answer>, ApiError> {
        self.get(&format!("/answers/user/{}", user_id)).await
    }
}
