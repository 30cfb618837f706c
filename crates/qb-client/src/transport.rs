//! HTTP transport used by the session client.

use std::future::Future;

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::TransportError;

/// Minimal HTTP capability the session client needs.
///
/// Both calls resolve to the body of a 2xx response. Anything else is a
/// [`TransportError`]; interpreting the body is left to the caller.
pub trait HttpTransport: Send + Sync {
    /// POST `body` as JSON to `path`.
    fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// GET `path` with the given extra headers.
    fn get(
        &self,
        path: &str,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// Base URL every request path is appended to.
    base_url: String,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a transport that reuses an existing client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<String, TransportError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        read_body(resp).await
    }

    async fn get(&self, path: &str, headers: HeaderMap) -> Result<String, TransportError> {
        let resp = self.client.get(self.url(path)).headers(headers).send().await?;
        read_body(resp).await
    }
}

/// Return the body of a successful response, or the status and body of a failed one.
async fn read_body(resp: reqwest::Response) -> Result<String, TransportError> {
    let status = resp.status();

    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(TransportError::ServerError {
            status_code: status.as_u16(),
            message,
        });
    }

    Ok(resp.text().await?)
}
