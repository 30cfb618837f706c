#![deny(missing_docs)]

//! QuickBlox SDK - Complete SDK.
//!
//! Re-exports all QuickBlox SDK components for convenient single-crate usage.

pub use qb_auth as auth;
pub use qb_client as client;

pub use qb_client::{AppCredentials, ClientConfig, Credentials, SessionClient, SessionError};

/// SDK version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
