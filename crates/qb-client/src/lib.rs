#![deny(missing_docs)]

//! # qb-client
//!
//! Session client for the QuickBlox REST API.
//!
//! A session is obtained in one of three ways:
//! - an application session, from a signed auth message (read-only rights);
//! - a user session, from a signed auth message that also carries the
//!   user's login or email and password (read/write rights);
//! - an existing session token, synced with the server.
//!
//! The client keeps the latest session and publishes changes on an
//! [`EventBus`].
//!
//! # Example
//!
//! ```no_run
//! use qb_client::{AppCredentials, ClientConfig, Credentials, SessionClient};
//!
//! # async fn example() -> Result<(), qb_client::SessionError> {
//! let client = SessionClient::new(
//!     AppCredentials::new(5, "KnUm1", "MKmn-asd1"),
//!     ClientConfig::default(),
//! )?;
//!
//! let token = client.auth(Credentials::Application).await?;
//! println!("Auth successful with token {token}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod events;
pub mod transport;
pub mod types;


pub use client::{SessionClient, TOKEN_HEADER};
pub use error::{SessionError, TransportError};
pub use events::{EventBus, SessionEvent, SubscriptionId};
pub use transport::{HttpTransport, ReqwestTransport};
pub use types::{AppCredentials, ClientConfig, Credentials, Session, SessionResponse};
pub use qb_auth::{Login, UserCredentials};
