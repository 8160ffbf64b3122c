//! Login, refresh rotation and logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::rest::RestClient;

/// The signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: SessionUser,
}

#[derive(Default)]
struct SessionState {
    refresh_token: Option<String>,
    user: Option<SessionUser>,
    access_expires_at: Option<DateTime<Utc>>,
}

/// An authenticated session bound to a [`RestClient`].
///
/// The access token is installed on the client, so every request made
/// through [`AuthSession::client`] (or a clone of it) is authenticated.
pub struct AuthSession {
    client: RestClient,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, ClientError> {
        let response: TokenResponse = self
            .client
            .post("/auth/login", &LoginRequest { username, password })
            .await?;
        tracing::info!(username, "Logged in");
        Ok(self.install(response).await)
    }

    /// Exchange the refresh token for a new pair. The old token is spent.
    pub async fn refresh(&self) -> Result<SessionUser, ClientError> {
        let refresh_token = self
            .state
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or(ClientError::NotAuthenticated)?;

        let request = RefreshRequest {
            refresh_token: &refresh_token,
        };
        match self
            .client
            .post::<_, TokenResponse>("/auth/refresh", &request)
            .await
        {
            Ok(response) => Ok(self.install(response).await),
            Err(e) => {
                if e.is_unauthorized() {
                    self.clear().await;
                }
                Err(e)
            }
        }
    }

    /// Revoke server-side sessions and forget local tokens.
    ///
    /// Local state is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .client
            .post_empty("/auth/logout", &serde_json::json!({}))
            .await;
        self.clear().await;
        result
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    /// Whether the access token expires within `margin` of now.
    pub async fn needs_refresh(&self, margin: chrono::Duration) -> bool {
        match self.state.read().await.access_expires_at {
            Some(expires_at) => expires_at - margin <= Utc::now(),
            None => false,
        }
    }

    async fn install(&self, response: TokenResponse) -> SessionUser {
        self.client
            .set_access_token(Some(response.access_token))
            .await;
        let mut state = self.state.write().await;
        state.refresh_token = Some(response.refresh_token);
        state.user = Some(response.user.clone());
        state.access_expires_at = Some(Utc::now() + chrono::Duration::seconds(response.expires_in));
        response.user
    }

    async fn clear(&self) {
        self.client.set_access_token(None).await;
        *self.state.write().await = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use assert_matches::assert_matches;

    fn session() -> AuthSession {
        // Unroutable address; these tests never reach the network.
        let client = RestClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        AuthSession::new(client)
    }

    fn token_response(expires_in: i64) -> TokenResponse {
        TokenResponse {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_in,
            user: SessionUser {
                id: 7,
                username: "ada".into(),
                email: "ada@example.com".into(),
                role: "manager".into(),
                is_active: true,
                last_login_at: None,
                created_at: Utc::now(),
            },
        }
    }

    #[tokio::test]
    async fn refresh_without_session_is_not_authenticated() {
        let session = session();
        assert_matches!(session.refresh().await, Err(ClientError::NotAuthenticated));
    }

    #[tokio::test]
    async fn install_sets_token_and_user() {
        let session = session();
        let user = session.install(token_response(900)).await;

        assert_eq!(user.username, "ada");
        assert!(session.is_authenticated().await);
        assert_eq!(session.client().access_token().await.as_deref(), Some("access"));
        assert!(!session.needs_refresh(chrono::Duration::seconds(60)).await);
        assert!(session.needs_refresh(chrono::Duration::seconds(1000)).await);
    }

    #[tokio::test]
    async fn clear_forgets_everything() {
        let session = session();
        session.install(token_response(900)).await;
        session.clear().await;

        assert!(session.current_user().await.is_none());
        assert!(session.client().access_token().await.is_none());
    }
}
