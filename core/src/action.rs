//! Lifecycle actions dispatched to the store.
//!
//! Every fetch produces actions from a single family derived from the
//! fetcher's prefix: `<PREFIX>_REQUEST`, `<PREFIX>_SUCCESS`,
//! `<PREFIX>_FAILURE`. The key travels unchanged through all three so
//! reducers can correlate a response with the request that caused it.

use crate::body::FetchBody;
use crate::error::FetchError;

/// The three phases of a fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchPhase {
    /// Emitted before any network activity starts.
    Request,
    /// Emitted when the response body decoded (and parsed) successfully.
    Success,
    /// Emitted on a transport or decoding failure.
    Failure,
}

impl FetchPhase {
    /// The suffix appended to the prefix to form the action kind.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Request => "_REQUEST",
            Self::Success => "_SUCCESS",
            Self::Failure => "_FAILURE",
        }
    }
}

impl std::fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request => write!(f, "request"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// A lifecycle action for one fetch invocation.
///
/// Actions are plain immutable data. The `kind` string is derived from the
/// fetcher prefix and the phase, so a prefix of `FETCH_FRIENDS` produces the
/// kinds `FETCH_FRIENDS_REQUEST`, `FETCH_FRIENDS_SUCCESS` and
/// `FETCH_FRIENDS_FAILURE`.
///
/// # Type Parameters
///
/// - `K`: the caller's key type, opaque to this crate
#[derive(Debug, Clone, PartialEq)]
pub struct FetchAction<K> {
    kind: String,
    phase: FetchPhase,
    key: K,
    result: Option<FetchBody>,
    error: Option<FetchError>,
}

impl<K> FetchAction<K> {
    fn new(prefix: &str, phase: FetchPhase, key: K) -> Self {
        Self {
            kind: format!("{prefix}{}", phase.suffix()),
            phase,
            key,
            result: None,
            error: None,
        }
    }

    /// Build the request action for `key`.
    #[must_use]
    pub fn request(prefix: &str, key: K) -> Self {
        Self::new(prefix, FetchPhase::Request, key)
    }

    /// Build the success action carrying the (parsed) response payload.
    #[must_use]
    pub fn success(prefix: &str, key: K, result: FetchBody) -> Self {
        let mut action = Self::new(prefix, FetchPhase::Success, key);
        action.result = Some(result);
        action
    }

    /// Build the failure action carrying the underlying error.
    #[must_use]
    pub fn failure(prefix: &str, key: K, error: FetchError) -> Self {
        let mut action = Self::new(prefix, FetchPhase::Failure, key);
        action.error = Some(error);
        action
    }

    /// The derived action kind, e.g. `FETCH_FRIENDS_REQUEST`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Which lifecycle phase this action belongs to.
    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// The key this invocation was started with.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The response payload; present only on success actions.
    #[must_use]
    pub const fn result(&self) -> Option<&FetchBody> {
        self.result.as_ref()
    }

    /// The underlying error; present only on failure actions.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }
}
