//! HTTP client used for update checks.
//!
//! Requests are plain GETs whose body is read as text. The client remembers
//! the tokio runtime it was created on so callers without an async context
//! (the update tick) can start a request and poll the returned handle later.

use rust_i18n::t;
use std::time::Duration;
use tokio::runtime::Handle;
use url::Url;

use super::error::{HttpError, HttpResult};
use crate::libs::pending::Pending;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client implementation backed by `reqwest`.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    runtime: Handle,
}

impl HttpClient {
    /// Creates a new HTTP client instance with the default timeout.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> HttpResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client instance with a custom request timeout.
    ///
    /// # Arguments
    /// * `timeout` - Limit for the whole request, connect through body
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Config` when called outside a tokio runtime or when
    /// the underlying `reqwest` client cannot be built.
    pub fn with_timeout(timeout: Duration) -> HttpResult<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            HttpError::Config(t!("http.no_runtime", error = e.to_string()).to_string())
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, runtime })
    }

    /// Sends a GET request and returns the response body as text.
    ///
    /// # Arguments
    /// * `url` - The full URL, query included
    ///
    /// # Returns
    /// The body of a 2xx response. Other status codes are reported as
    /// `HttpError::Response`.
    pub async fn get_text(&self, url: Url) -> HttpResult<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await.map_err(|e| {
            HttpError::Response(t!("http.read_response_failed", error = e.to_string()).to_string())
        })?;
        Ok(body)
    }

    /// Starts a GET request in the background and returns a handle to poll.
    ///
    /// The request is skipped if the handle is dropped before the task runs.
    pub fn spawn_get_text(&self, url: Url) -> Pending<HttpResult<String>> {
        let (completer, pending) = Pending::channel();
        let this = self.clone();
        self.runtime.spawn(async move {
            if completer.is_abandoned() {
                log::debug!("GET {} dropped before it was sent", url);
                return;
            }
            let result = this.get_text(url).await;
            completer.complete(result);
        });
        pending
    }
}
