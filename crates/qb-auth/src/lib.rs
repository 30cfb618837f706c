#![deny(missing_docs)]

//! # qb-auth
//!
//! Auth message construction and signing for the QuickBlox REST API.
//!
//! A session request carries the application id, an optional auth key, a
//! nonce, and a timestamp, plus an HMAC-SHA1 signature over the canonical
//! form of those fields. The server recomputes the signature with its copy
//! of the auth secret, so the secret itself never leaves the client.
//!
//! # Example
//!
//! ```
//! use qb_auth::AuthMessage;
//!
//! let message = AuthMessage::from_parts(5, Some("KnUm1".to_string()), 1234, 1_000_000)
//!     .signed("MKmn-asd1")
//!     .unwrap();
//!
//! assert_eq!(
//!     message.canonical_string().unwrap(),
//!     "application_id=5&auth_key=KnUm1&nonce=1234&timestamp=1000000"
//! );
//! assert!(message.is_signed());
//! ```

pub mod error;
pub mod hash;
pub mod signer;
pub mod types;
pub mod utils;

pub use error::SigningError;
pub use signer::{canonical_string, sign};
pub use types::{AuthMessage, Login, UserCredentials};
