//! # Fetchkit Testing
//!
//! Deterministic doubles for the two seams a fetcher touches: the dispatch
//! sink and the network transport.
//!
//! ## Example
//!
//! ```
//! use fetchkit_core::{make_fetcher, FetcherConfig, SuccessDispatch};
//! use fetchkit_testing::{RecordingDispatch, StubTransport};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let transport = Arc::new(StubTransport::ok_json(serde_json::json!(["bob", "carol"])));
//! let dispatch = Arc::new(RecordingDispatch::new());
//!
//! let fetcher = make_fetcher("FETCH_FRIENDS", |_success: SuccessDispatch<String>| {
//!     FetcherConfig::new(|key: &String| format!("/api/{key}/friends/"))
//! })
//! .with_transport(transport);
//!
//! fetcher.run("alice".to_string(), dispatch.clone()).await;
//! assert_eq!(dispatch.kinds(), ["FETCH_FRIENDS_REQUEST", "FETCH_FRIENDS_SUCCESS"]);
//! # }
//! ```

/// Mock implementations of the fetcher's seams.
pub mod mocks {
    use bytes::Bytes;
    use fetchkit_core::config::RequestOptions;
    use fetchkit_core::transport::{Transport, TransportResponse};
    use fetchkit_core::{Dispatch, FetchAction, FetchError};
    use futures::future::BoxFuture;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Dispatch sink that records every action for later assertion.
    #[derive(Debug, Default)]
    pub struct RecordingDispatch<K> {
        actions: Mutex<Vec<FetchAction<K>>>,
    }

    impl<K: Clone> RecordingDispatch<K> {
        /// Empty recorder.
        #[must_use]
        pub fn new() -> Self {
            Self {
                actions: Mutex::new(Vec::new()),
            }
        }

        /// All actions dispatched so far, in order.
        ///
        /// # Panics
        ///
        /// Panics if a previous test thread panicked while recording.
        #[must_use]
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        pub fn actions(&self) -> Vec<FetchAction<K>> {
            self.actions.lock().unwrap().clone()
        }

        /// The kind strings of all recorded actions, in order.
        ///
        /// # Panics
        ///
        /// Panics if a previous test thread panicked while recording.
        #[must_use]
        pub fn kinds(&self) -> Vec<String> {
            self.actions()
                .iter()
                .map(|a| a.kind().to_string())
                .collect()
        }

        /// Number of recorded actions.
        ///
        /// # Panics
        ///
        /// Panics if a previous test thread panicked while recording.
        #[must_use]
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        pub fn len(&self) -> usize {
            self.actions.lock().unwrap().len()
        }

        /// True when nothing has been dispatched.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl<K: Clone + Send + Sync> Dispatch<K> for RecordingDispatch<K> {
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        fn dispatch(&self, action: FetchAction<K>) {
            self.actions.lock().unwrap().push(action);
        }
    }

    /// Transport double serving a queue of canned outcomes.
    ///
    /// Counts calls so tests can assert that soft-validation failures made
    /// no network activity at all. An exhausted queue yields a transport
    /// error naming the problem.
    #[derive(Debug, Default)]
    pub struct StubTransport {
        responses: Mutex<VecDeque<Result<TransportResponse, FetchError>>>,
        calls: AtomicUsize,
    }

    impl StubTransport {
        /// Transport that answers every call from the given queue.
        #[must_use]
        pub fn with_responses(
            responses: impl IntoIterator<Item = Result<TransportResponse, FetchError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        /// Transport answering one 200 response with the given raw body.
        #[must_use]
        pub fn ok_bytes(body: impl Into<Bytes>) -> Self {
            Self::with_responses([Ok(TransportResponse {
                status: 200,
                body: body.into(),
            })])
        }

        /// Transport answering one 200 response with the given JSON document.
        ///
        /// # Panics
        ///
        /// Panics if the value fails to serialize, which cannot happen for
        /// values built with `serde_json::json!`.
        #[must_use]
        #[allow(clippy::expect_used)] // json! values always serialize
        pub fn ok_json(value: serde_json::Value) -> Self {
            let body = serde_json::to_vec(&value).expect("serde_json::Value always serializes");
            Self::ok_bytes(body)
        }

        /// Transport answering one transport-level failure.
        #[must_use]
        pub fn err(message: impl Into<String>) -> Self {
            Self::with_responses([Err(FetchError::Transport(message.into()))])
        }

        /// How many times the fetcher reached for the network.
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for StubTransport {
        fn fetch<'a>(
            &'a self,
            _url: &'a str,
            _options: &'a RequestOptions,
        ) -> BoxFuture<'a, Result<TransportResponse, FetchError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
            let next = self.responses.lock().unwrap().pop_front();
            Box::pin(async move {
                next.unwrap_or_else(|| {
                    Err(FetchError::Transport(
                        "StubTransport: no stubbed response left".to_string(),
                    ))
                })
            })
        }
    }
}

// Re-export commonly used items
pub use mocks::{RecordingDispatch, StubTransport};
