//! Session data types: configuration, credentials, and API response structures.

use std::fmt;

use qb_auth::UserCredentials;
use serde::{Deserialize, Serialize};

/// Endpoint configuration for a [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for the REST API (e.g. `https://api.quickblox.com`).
    pub api_endpoint: String,
    /// Path of the session resource, without the `.json` suffix.
    pub session_path: String,
}

impl ClientConfig {
    /// Path of the session endpoint relative to `api_endpoint`.
    pub fn session_url_path(&self) -> String {
        format!("{}.json", self.session_path.trim_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.quickblox.com".to_string(),
            session_path: "session".to_string(),
        }
    }
}

/// Application credentials from the admin panel.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
    /// Application id. Must be non-zero.
    pub app_id: u64,
    /// Auth key identifying the API key.
    pub auth_key: Option<String>,
    /// Auth secret used to sign session requests.
    pub auth_secret: Option<String>,
}

impl AppCredentials {
    /// Credentials with all three values set.
    pub fn new(app_id: u64, auth_key: impl Into<String>, auth_secret: impl Into<String>) -> Self {
        Self {
            app_id,
            auth_key: Some(auth_key.into()),
            auth_secret: Some(auth_secret.into()),
        }
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("auth_key", &self.auth_key)
            .field("auth_secret", &self.auth_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// What to authenticate with when calling [`SessionClient::auth`](crate::SessionClient::auth).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Application session with read-only rights.
    #[default]
    Application,
    /// Resume an existing session by its token.
    Token(String),
    /// User session with read/write rights.
    User(UserCredentials),
}

/// Session state issued by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token sent as `QB-Token` on later requests.
    pub token: String,
    /// Owning user, or `None` for an application-only session.
    pub user_id: Option<u64>,
}

/// Response body of the session endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The session object.
    pub session: SessionPayload,
}

/// The `session` object returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Session token.
    pub token: String,
    /// User id; `0` means no user is attached.
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl From<SessionPayload> for Session {
    fn from(payload: SessionPayload) -> Self {
        Self {
            token: payload.token,
            user_id: payload.user_id.filter(|&id| id != 0),
        }
    }
}
