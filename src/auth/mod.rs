//! Identity-provider seam.
//!
//! Sign-in state and bearer tokens come from an external provider; this
//! module defines only the contract the store and API client consume. Token
//! issuance and session lifecycle belong to the provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Session data the provider exposes for the signed-in user.
#[derive(Debug, Clone)]
pub struct SessionProfile {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

/// Sign-in state and token retrieval contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, or `None` when signed out.
    fn session(&self) -> Option<SessionProfile>;

    /// Bearer token for API requests. `None` is tolerated; the request then
    /// goes out unauthenticated.
    async fn bearer_token(&self) -> Option<String>;

    fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }
}
