//! The fetcher factory.
//!
//! [`make_fetcher`] closes over a naming prefix and a configuration
//! provider and yields a [`Fetcher`]. Each [`Fetcher::run`] walks one
//! invocation through `IDLE → REQUESTED → {SUCCEEDED | FAILED | DEFERRED}`:
//! request action, transport call, decode, then success or failure.
//!
//! Invocations are fully independent: no retries, no deduplication, no
//! ordering guarantees across keys. The only shared resource is the
//! dispatch sink.

use crate::action::FetchAction;
use crate::body::FetchBody;
use crate::config::{FetcherConfig, RequestOptions};
use crate::dispatch::{Dispatch, SuccessDispatch};
use crate::transport::{HttpTransport, Transport};
use std::fmt;
use std::sync::Arc;

/// Produces a [`FetcherConfig`] for one invocation, given the invocation's
/// success-dispatch capability.
pub type ConfigProvider<K> = Arc<dyn Fn(SuccessDispatch<K>) -> FetcherConfig<K> + Send + Sync>;

/// A dispatchable fetch operation for one resource family.
///
/// Created by [`make_fetcher`]. Cloning is cheap; clones share the prefix,
/// provider and transport.
pub struct Fetcher<K> {
    prefix: String,
    provider: ConfigProvider<K>,
    transport: Arc<dyn Transport>,
}

/// Build a fetcher for the given action-kind prefix.
///
/// The provider is called once per invocation with that invocation's
/// [`SuccessDispatch`] capability and returns the configuration to use.
/// The default transport is [`HttpTransport`]; swap it with
/// [`Fetcher::with_transport`].
///
/// # Example
///
/// ```no_run
/// use fetchkit_core::{make_fetcher, FetcherConfig, SuccessDispatch};
///
/// let fetch_friends = make_fetcher("FETCH_FRIENDS", |_success: SuccessDispatch<String>| {
///     FetcherConfig::new(|key: &String| format!("/api/{key}/friends/"))
/// });
/// ```
pub fn make_fetcher<K, F>(prefix: impl Into<String>, provider: F) -> Fetcher<K>
where
    F: Fn(SuccessDispatch<K>) -> FetcherConfig<K> + Send + Sync + 'static,
{
    Fetcher {
        prefix: prefix.into(),
        provider: Arc::new(provider),
        transport: Arc::new(HttpTransport::new()),
    }
}

impl<K> Fetcher<K>
where
    K: Clone + fmt::Debug + Send + Sync + 'static,
{
    /// Replace the transport (tests, demos, custom clients).
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// The action-kind prefix this fetcher was built with.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run one invocation for `key`, dispatching lifecycle actions into
    /// `dispatch`.
    ///
    /// Resolves once the terminal action has been dispatched, or
    /// immediately when soft validation fails. Malformed configuration
    /// (empty prefix, missing URL function) is a diagnostic-logged no-op:
    /// no action is dispatched, no network call is made, and nothing is
    /// returned for the caller to handle, so this is safe to call
    /// defensively.
    #[tracing::instrument(skip(self, dispatch), fields(prefix = %self.prefix))]
    pub async fn run(&self, key: K, dispatch: Arc<dyn Dispatch<K>>) {
        let success = SuccessDispatch::new(&self.prefix, key.clone(), Arc::clone(&dispatch));
        let config = (self.provider)(success);

        if self.prefix.is_empty() {
            tracing::error!(?key, "fetcher prefix is empty, skipping fetch");
            return;
        }
        let Some(fetch_url) = config.fetch_url else {
            tracing::error!(
                ?key,
                "fetcher config has no URL function, skipping fetch"
            );
            return;
        };

        dispatch.dispatch(FetchAction::request(&self.prefix, key.clone()));

        let url = fetch_url(&key);
        let options = config
            .fetch_options
            .map_or_else(RequestOptions::default, |f| f(&key));
        tracing::debug!(?key, url, method = %options.method, "fetch started");

        let response = match self.transport.fetch(&url, &options).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(?key, url, %error, "transport failed");
                dispatch.dispatch(FetchAction::failure(&self.prefix, key, error));
                return;
            },
        };

        let decoded = match FetchBody::decode(response.body, config.response_type) {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::warn!(?key, url, %error, "response body failed to decode");
                dispatch.dispatch(FetchAction::failure(&self.prefix, key, error));
                return;
            },
        };

        if let Some(deferred) = config.deferred_success {
            tracing::debug!(?key, "success dispatch deferred to caller");
            deferred(decoded);
            return;
        }

        let result = match config.parse_response {
            Some(parse) => parse(decoded),
            None => decoded,
        };
        dispatch.dispatch(FetchAction::success(&self.prefix, key, result));
    }
}

impl<K> Clone for Fetcher<K> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            provider: Arc::clone(&self.provider),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<K> fmt::Debug for Fetcher<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
