//! Auth message and credential types.

use std::fmt;
use std::time::SystemTime;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SigningError;
use crate::signer;
use crate::utils::{random_nonce, random_nonce_with, unix_time, unix_time_at};

/// How a user identifies themselves when opening a user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Login {
    /// The user's login name.
    Login(String),
    /// The user's email address.
    Email(String),
}

/// End-user credentials carried inside a signed auth message.
///
/// Serialized as a flat `{login|email, password}` mapping so it signs as
/// `user[login]=...&user[password]=...`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    /// Login name or email.
    #[serde(flatten)]
    pub login: Login,
    /// The user's password.
    pub password: String,
}

impl UserCredentials {
    /// Credentials identified by login name.
    pub fn with_login(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: Login::Login(login.into()),
            password: password.into(),
        }
    }

    /// Credentials identified by email address.
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: Login::Email(email.into()),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The payload that proves possession of the application's auth secret.
///
/// Its JSON form is both the request body and the signing input, so the
/// fields the server sees are exactly the fields that were signed. Absent
/// optional fields are left out of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMessage {
    /// Tenant application identifier.
    pub application_id: u64,
    /// API key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
    /// Random value in `0..10000`.
    pub nonce: u16,
    /// Creation time in Unix seconds.
    pub timestamp: u64,
    /// User credentials, present only for user sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserCredentials>,
    /// Hex HMAC-SHA1 signature, set by [`AuthMessage::signed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl AuthMessage {
    /// Build an unsigned message with a fresh nonce and the current time.
    pub fn new(application_id: u64, auth_key: Option<String>) -> Self {
        Self::from_parts(application_id, auth_key, random_nonce(), unix_time())
    }

    /// Build an unsigned message from an explicit random source and clock reading.
    pub fn generate_with<R: Rng + ?Sized>(
        application_id: u64,
        auth_key: Option<String>,
        rng: &mut R,
        now: SystemTime,
    ) -> Self {
        Self::from_parts(
            application_id,
            auth_key,
            random_nonce_with(rng),
            unix_time_at(now),
        )
    }

    /// Build an unsigned message from fixed field values.
    pub fn from_parts(
        application_id: u64,
        auth_key: Option<String>,
        nonce: u16,
        timestamp: u64,
    ) -> Self {
        Self {
            application_id,
            auth_key,
            nonce,
            timestamp,
            user: None,
            signature: None,
        }
    }

    /// Attach end-user credentials for a user session.
    pub fn with_user(mut self, user: UserCredentials) -> Self {
        self.user = Some(user);
        self
    }

    /// The message as a JSON object, as it is sent on the wire.
    pub fn to_value(&self) -> Result<serde_json::Value, SigningError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The canonical string the signature is computed over.
    pub fn canonical_string(&self) -> Result<String, SigningError> {
        signer::canonical_string(&self.to_value()?)
    }

    /// Sign the message with `secret`, replacing any previous signature.
    pub fn signed(mut self, secret: &str) -> Result<Self, SigningError> {
        let signature = signer::sign(&self.to_value()?, secret)?;
        self.signature = Some(signature);
        Ok(self)
    }

    /// Whether a signature has been attached.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}
