//! Per-invocation fetch configuration.
//!
//! A [`FetcherConfig`] is produced fresh by the caller's configuration
//! provider on every invocation. It has one required field (the URL
//! function) and four optional fields with defaults:
//!
//! | field              | default                        |
//! |--------------------|--------------------------------|
//! | `fetch_options`    | GET, no headers, no body       |
//! | `response_type`    | [`ResponseType::Json`]         |
//! | `parse_response`   | identity                       |
//! | `deferred_success` | unset (immediate success)      |

use crate::body::FetchBody;
use bytes::Bytes;
use reqwest::Method;

/// The decoding primitive applied to the raw response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseType {
    /// Raw bytes, untouched.
    Bytes,
    /// Binary payload; decodes identically to [`ResponseType::Bytes`].
    Blob,
    /// URL-encoded form fields.
    FormData,
    /// A JSON document.
    #[default]
    Json,
    /// UTF-8 text.
    Text,
}

/// Transport options for one request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Headers applied in order.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<Bytes>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    /// Options for a bare GET request.
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Maps a key to the URL to fetch.
pub type UrlFn<K> = Box<dyn Fn(&K) -> String + Send + Sync>;

/// Maps a key to the transport options for its request.
pub type OptionsFn<K> = Box<dyn Fn(&K) -> RequestOptions + Send + Sync>;

/// Transforms the decoded body into the success action's result.
pub type ParseFn = Box<dyn Fn(FetchBody) -> FetchBody + Send + Sync>;

/// Receives the decoded body instead of an immediate success dispatch.
pub type DeferredFn = Box<dyn FnOnce(FetchBody) + Send>;

/// Configuration for one fetch invocation.
///
/// Produced by the configuration provider, which receives the invocation's
/// [`SuccessDispatch`](crate::dispatch::SuccessDispatch) capability so that a
/// deferred-success closure can capture it.
///
/// # Example
///
/// ```
/// use fetchkit_core::config::FetcherConfig;
///
/// let config: FetcherConfig<String> =
///     FetcherConfig::new(|key: &String| format!("/api/{key}/friends/"));
/// ```
pub struct FetcherConfig<K> {
    /// Required: key to URL. `None` trips soft validation and the
    /// invocation becomes a logged no-op.
    pub fetch_url: Option<UrlFn<K>>,
    /// Optional: key to transport options.
    pub fetch_options: Option<OptionsFn<K>>,
    /// Which decoding primitive to apply to the response body.
    pub response_type: ResponseType,
    /// Optional transform applied to the decoded body before the success
    /// action is built.
    pub parse_response: Option<ParseFn>,
    /// When set, receives the decoded body; the fetcher then emits no
    /// success action of its own.
    pub deferred_success: Option<DeferredFn>,
}

impl<K> FetcherConfig<K> {
    /// Configuration with the required URL function and every default.
    #[must_use]
    pub fn new<F>(fetch_url: F) -> Self
    where
        F: Fn(&K) -> String + Send + Sync + 'static,
    {
        Self {
            fetch_url: Some(Box::new(fetch_url)),
            fetch_options: None,
            response_type: ResponseType::default(),
            parse_response: None,
            deferred_success: None,
        }
    }

    /// Set the transport-options function.
    #[must_use]
    pub fn with_options<F>(mut self, fetch_options: F) -> Self
    where
        F: Fn(&K) -> RequestOptions + Send + Sync + 'static,
    {
        self.fetch_options = Some(Box::new(fetch_options));
        self
    }

    /// Set the response type.
    #[must_use]
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Set the parse transform.
    #[must_use]
    pub fn with_parse<F>(mut self, parse_response: F) -> Self
    where
        F: Fn(FetchBody) -> FetchBody + Send + Sync + 'static,
    {
        self.parse_response = Some(Box::new(parse_response));
        self
    }

    /// Take over success dispatching: `deferred` receives the decoded body
    /// and the fetcher emits no success action itself.
    #[must_use]
    pub fn with_deferred_success<F>(mut self, deferred: F) -> Self
    where
        F: FnOnce(FetchBody) + Send + 'static,
    {
        self.deferred_success = Some(Box::new(deferred));
        self
    }
}

impl<K> Default for FetcherConfig<K> {
    /// A configuration with no URL function. Running a fetcher with this
    /// configuration is a logged no-op; it exists so providers can bail out
    /// without panicking.
    fn default() -> Self {
        Self {
            fetch_url: None,
            fetch_options: None,
            response_type: ResponseType::default(),
            parse_response: None,
            deferred_success: None,
        }
    }
}

impl<K> std::fmt::Debug for FetcherConfig<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("fetch_url", &self.fetch_url.as_ref().map(|_| "<fn>"))
            .field("fetch_options", &self.fetch_options.as_ref().map(|_| "<fn>"))
            .field("response_type", &self.response_type)
            .field("parse_response", &self.parse_response.as_ref().map(|_| "<fn>"))
            .field(
                "deferred_success",
                &self.deferred_success.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_options_default_is_bare_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn response_type_defaults_to_json() {
        assert_eq!(ResponseType::default(), ResponseType::Json);
    }

    #[test]
    fn new_config_has_defaults() {
        let config = FetcherConfig::new(|key: &String| format!("/api/{key}"));
        assert!(config.fetch_url.is_some());
        assert!(config.fetch_options.is_none());
        assert_eq!(config.response_type, ResponseType::Json);
        assert!(config.parse_response.is_none());
        assert!(config.deferred_success.is_none());
    }

    #[test]
    fn default_config_has_no_url_fn() {
        let config = FetcherConfig::<String>::default();
        assert!(config.fetch_url.is_none());
    }
}
