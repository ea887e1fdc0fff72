//! The network transport seam.
//!
//! The fetcher talks to the network through the [`Transport`] trait so that
//! tests can substitute canned responses. [`HttpTransport`] is the
//! production implementation on top of reqwest.

use crate::config::RequestOptions;
use crate::error::FetchError;
use bytes::Bytes;
use futures::future::BoxFuture;
use reqwest::Client;

/// A raw transport response before any decoding primitive is applied.
///
/// The status is recorded for diagnostics only; the fetcher never branches
/// on it. An HTTP error page decodes like any other body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// The raw response body.
    pub body: Bytes,
}

/// Issues one request and yields the raw response.
pub trait Transport: Send + Sync {
    /// Fetch `url` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when no response body could be
    /// obtained (connection refused, DNS failure, interrupted body read).
    fn fetch<'a>(
        &'a self,
        url: &'a str,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<TransportResponse, FetchError>>;
}

/// reqwest-backed transport reusing a single [`Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Transport with a fresh default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport reusing an already configured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<TransportResponse, FetchError>> {
        Box::pin(async move {
            let mut request = self.client.request(options.method.clone(), url);
            for (name, value) in &options.headers {
                request = request.header(name, value);
            }
            if let Some(body) = &options.body {
                request = request.body(body.clone());
            }

            let response = request
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            tracing::debug!(url, status, bytes = body.len(), "response received");

            Ok(TransportResponse { status, body })
        })
    }
}
