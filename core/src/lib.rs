//! # Fetchkit Core
//!
//! Boilerplate elimination for reflecting a remote fetch's lifecycle into a
//! unidirectional state store.
//!
//! For a logical resource identified by a prefix, [`make_fetcher`] derives
//! three lifecycle actions — `<PREFIX>_REQUEST`, `<PREFIX>_SUCCESS`,
//! `<PREFIX>_FAILURE` — and a single dispatchable operation that performs
//! the fetch and emits the appropriate action depending on outcome.
//!
//! ## Core Concepts
//!
//! - **Action**: immutable lifecycle message dispatched to the store
//! - **Dispatch**: the store seam, the fetcher's only observable effect
//! - **Key**: opaque caller value correlating one fetch's three actions
//! - **Transport**: the network seam, reqwest in production
//! - **Deferred success**: the caller takes over success dispatching via a
//!   capability handed to the configuration provider
//!
//! ## Example
//!
//! ```no_run
//! use fetchkit_core::{make_fetcher, Dispatch, FetchAction, FetcherConfig, SuccessDispatch};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let fetch_friends = make_fetcher("FETCH_FRIENDS", |_success: SuccessDispatch<String>| {
//!     FetcherConfig::new(|key: &String| format!("https://example.com/api/{key}/friends/"))
//! });
//!
//! // Any store front-end works; a closure is enough here.
//! let dispatch: Arc<dyn Dispatch<String>> = Arc::new(|action: FetchAction<String>| {
//!     println!("{} for {}", action.kind(), action.key());
//! });
//!
//! fetch_friends.run("alice".to_string(), dispatch).await;
//! # }
//! ```
//!
//! No retries, no caching, no cancellation, no cross-key ordering: each
//! invocation is independent and every failure is terminal for that
//! invocation alone.

/// Lifecycle actions and their derived kind strings.
pub mod action;

/// Decoded response payloads.
pub mod body;

/// Per-invocation configuration with defaults.
pub mod config;

/// The dispatch seam and the success-dispatch capability.
pub mod dispatch;

/// Error types surfaced through failure actions.
pub mod error;

/// The fetcher factory.
pub mod fetcher;

/// The network transport seam.
pub mod transport;

pub use action::{FetchAction, FetchPhase};
pub use body::FetchBody;
pub use config::{FetcherConfig, RequestOptions, ResponseType};
pub use dispatch::{Dispatch, SuccessDispatch};
pub use error::FetchError;
pub use fetcher::{make_fetcher, ConfigProvider, Fetcher};
pub use transport::{HttpTransport, Transport, TransportResponse};

// Re-export the types callers meet in our signatures.
pub use bytes::Bytes;
pub use reqwest::Method;
