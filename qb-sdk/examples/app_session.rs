//! Obtain an application session and sync it back.
//!
//! ```text
//! QB_APP_ID=5 QB_AUTH_KEY=... QB_AUTH_SECRET=... RUST_LOG=debug \
//!     cargo run -p qb-sdk --example app_session
//! ```

use qb_sdk::client::SessionEvent;
use qb_sdk::{AppCredentials, ClientConfig, Credentials, SessionClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app_id = std::env::var("QB_APP_ID")?.parse()?;
    let credentials = AppCredentials {
        app_id,
        auth_key: std::env::var("QB_AUTH_KEY").ok(),
        auth_secret: std::env::var("QB_AUTH_SECRET").ok(),
    };

    let mut config = ClientConfig::default();
    if let Ok(endpoint) = std::env::var("QB_API_ENDPOINT") {
        config.api_endpoint = endpoint;
    }

    let client = SessionClient::new(credentials, config)?;
    client.events().subscribe(|event| match event {
        SessionEvent::Created(s) | SessionEvent::Synced(s) => {
            println!("session event, user: {:?}", s.user_id)
        }
        SessionEvent::Cleared => println!("session cleared"),
    });

    let token = client.auth(Credentials::Application).await?;
    println!("application session established");

    client.auth(Credentials::Token(token)).await?;
    println!("session synced, user: {:?}", client.user_id());

    Ok(())
}
