//! Session client: creates, syncs, and stores the REST API session.

use std::sync::{Arc, PoisonError, RwLock};

use qb_auth::{AuthMessage, UserCredentials};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::events::{EventBus, SessionEvent};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{AppCredentials, ClientConfig, Credentials, Session, SessionResponse};

/// Header carrying the session token on authenticated requests.
pub const TOKEN_HEADER: &str = "QB-Token";

/// Client for the session endpoint of the REST API.
///
/// Holds the most recent session. Every successful call replaces it, so
/// concurrent calls race and the last response to arrive wins.
#[derive(Debug)]
pub struct SessionClient<T = ReqwestTransport> {
    /// Application credentials.
    credentials: AppCredentials,
    /// Endpoint configuration.
    config: ClientConfig,
    /// HTTP transport.
    transport: T,
    /// Current session, if any.
    session: RwLock<Option<Session>>,
    /// Observers of session changes.
    events: Arc<EventBus>,
}

impl SessionClient<ReqwestTransport> {
    /// Create a client that talks to `config.api_endpoint` over `reqwest`.
    pub fn new(credentials: AppCredentials, config: ClientConfig) -> Result<Self, SessionError> {
        let transport = ReqwestTransport::new(config.api_endpoint.clone());
        Self::with_transport(credentials, config, transport)
    }
}

impl<T: HttpTransport> SessionClient<T> {
    /// Create a client over a custom transport.
    ///
    /// Fails if `credentials.app_id` is zero.
    pub fn with_transport(
        credentials: AppCredentials,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self, SessionError> {
        if credentials.app_id == 0 {
            return Err(SessionError::Configuration(
                "application id is required".into(),
            ));
        }

        Ok(Self {
            credentials,
            config,
            transport,
            session: RwLock::new(None),
            events: Arc::new(EventBus::new()),
        })
    }

    /// Use `events` instead of the client's own bus.
    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    /// The bus session events are published on.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// The application credentials.
    pub fn credentials(&self) -> &AppCredentials {
        &self.credentials
    }

    /// The endpoint configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The current session, if one has been established.
    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The current session token.
    pub fn session_token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    /// The user owning the current session, if it is a user session.
    pub fn user_id(&self) -> Option<u64> {
        self.session().and_then(|s| s.user_id)
    }

    /// Forget the current session.
    pub fn clear_session(&self) {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            self.events.emit(&SessionEvent::Cleared);
        }
    }

    /// Authenticate and return the session token.
    ///
    /// - [`Credentials::Application`]: signed application session (read-only).
    /// - [`Credentials::Token`]: sync an existing session token.
    /// - [`Credentials::User`]: signed user session (read/write).
    ///
    /// Issues exactly one request.
    pub async fn auth(&self, credentials: Credentials) -> Result<String, SessionError> {
        match credentials {
            Credentials::Application => self.create_application_session().await,
            Credentials::Token(token) => self.sync_session(&token).await,
            Credentials::User(user) => self.create_user_session(user).await,
        }
    }

    /// Create an application session with a signed auth message.
    pub async fn create_application_session(&self) -> Result<String, SessionError> {
        let message = self.signed_message(None)?;
        self.create_session(message).await
    }

    /// Create a user session with a signed auth message carrying `user`.
    pub async fn create_user_session(&self, user: UserCredentials) -> Result<String, SessionError> {
        let message = self.signed_message(Some(user))?;
        self.create_session(message).await
    }

    /// Fetch the state of an existing session and adopt it.
    pub async fn sync_session(&self, token: &str) -> Result<String, SessionError> {
        if token.is_empty() {
            return Err(SessionError::Configuration("session token is empty".into()));
        }

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(token).map_err(|_| {
            SessionError::Configuration("session token is not a valid header value".into())
        })?;
        headers.insert(TOKEN_HEADER, value);

        let path = self.config.session_url_path();
        debug!(path = %path, "syncing session");

        let body = self.transport.get(&path, headers).await?;
        let session = parse_session(&body)?;
        Ok(self.store(session, SessionEvent::Synced))
    }

    /// Build and sign a fresh auth message.
    fn signed_message(&self, user: Option<UserCredentials>) -> Result<AuthMessage, SessionError> {
        let mut message = AuthMessage::new(self.credentials.app_id, self.credentials.auth_key.clone());
        if let Some(user) = user {
            message = message.with_user(user);
        }

        let secret = self.credentials.auth_secret.as_deref().unwrap_or_default();
        Ok(message.signed(secret)?)
    }

    /// POST a signed auth message and adopt the resulting session.
    async fn create_session(&self, message: AuthMessage) -> Result<String, SessionError> {
        let path = self.config.session_url_path();
        debug!(
            app_id = message.application_id,
            nonce = message.nonce,
            timestamp = message.timestamp,
            user_session = message.user.is_some(),
            path = %path,
            "creating session"
        );

        let body = message.to_value()?;
        let response = self.transport.post_json(&path, &body).await?;
        let session = parse_session(&response)?;
        Ok(self.store(session, SessionEvent::Created))
    }

    /// Replace the stored session, notify observers, and return the token.
    fn store(&self, session: Session, event: fn(Session) -> SessionEvent) -> String {
        info!(user_id = ?session.user_id, "session established");

        let token = session.token.clone();
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        self.events.emit(&event(session));
        token
    }
}

/// Parse a session endpoint response body, normalizing `user_id == 0` to `None`.
pub fn parse_session(body: &str) -> Result<Session, SessionError> {
    let response: SessionResponse = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "malformed session response");
        SessionError::Protocol(e.to_string())
    })?;

    if response.session.token.is_empty() {
        warn!("session response carried an empty token");
        return Err(SessionError::Protocol("session token is empty".into()));
    }

    Ok(response.session.into())
}
