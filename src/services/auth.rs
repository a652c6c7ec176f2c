//! Auth Service
//!
//! Credential login against the backend session. The session cookie is
//! kept by the client's cookie store.

use tracing::info;

use crate::api::{ApiClient, Query};
use crate::cache::ResponseCache;
use crate::error::Result;
use crate::models::{LoginRequest, LoginResponse, LogoutResponse, SessionStatus};

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    cache: ResponseCache,
}

impl AuthService {
    pub fn new(api: ApiClient, cache: ResponseCache) -> Self {
        Self { api, cache }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .api
            .post("login-credentials/", &LoginRequest { email, password })
            .await?;

        info!(user = %response.user.username, "Logged in");
        Ok(response)
    }

    pub async fn check_session(&self) -> Result<SessionStatus> {
        self.api.get("check-session/", &Query::new()).await
    }

    /// Ends the session.
    ///
    /// The response cache is cleared whether or not the backend call
    /// succeeds, so no tenant data outlives the session locally.
    pub async fn logout(&self) -> Result<LogoutResponse> {
        let result = self.api.post("logout/", &serde_json::json!({})).await;
        self.cache.clear().await;
        info!("Session closed, response cache cleared");
        result
    }
}
