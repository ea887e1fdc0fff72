//! Error types for fetch invocations.

use thiserror::Error;

/// Errors surfaced through the failure action.
///
/// Configuration problems are not represented here: they are reported on the
/// diagnostic channel before any action is dispatched (see
/// [`Fetcher::run`](crate::fetcher::Fetcher::run)).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The transport failed before a response body was available
    /// (connection refused, DNS failure, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the configured response type.
    #[error("decode error: {0}")]
    Decode(String),
}
