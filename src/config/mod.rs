//! Configuration module for the StackIt client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the StackIt REST backend, including the `/api` prefix
    pub api_base_url: String,
    /// Identity-provider publishable key (required)
    pub publishable_key: String,
    /// Path of the durable saved-questions file
    pub saved_questions_path: PathBuf,
    /// Log level (trace, debug, info, warn, error) for the embedding
    /// application's subscriber
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics when `STACKIT_PUBLISHABLE_KEY` is unset: without the
    /// identity-provider key the client cannot start.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("STACKIT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());

        let publishable_key =
            env::var("STACKIT_PUBLISHABLE_KEY").expect("STACKIT_PUBLISHABLE_KEY must be set");

        let saved_questions_path = env::var("STACKIT_SAVED_PATH")
            .unwrap_or_else(|_| "./data/saved_questions.json".to_string())
            .into();

        let log_level = env::var("STACKIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            publishable_key,
            saved_questions_path,
            log_level,
        }
    }
}
