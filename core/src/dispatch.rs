//! The dispatch seam between the fetcher and the store.
//!
//! [`Dispatch`] is the fetcher's only way of effecting observable state
//! change. Stores implement it by feeding the action into their reducer
//! pipeline; tests implement it by recording.

use crate::action::FetchAction;
use crate::body::FetchBody;
use std::sync::Arc;

/// A sink accepting lifecycle actions.
///
/// Ordering guarantees across concurrent invocations, if any, belong to the
/// implementation, not to the fetcher.
pub trait Dispatch<K>: Send + Sync {
    /// Submit one action to the store.
    fn dispatch(&self, action: FetchAction<K>);
}

impl<K, F> Dispatch<K> for F
where
    F: Fn(FetchAction<K>) + Send + Sync,
{
    fn dispatch(&self, action: FetchAction<K>) {
        self(action);
    }
}

/// The "dispatch success" capability for one invocation.
///
/// Handed to the configuration provider before the request starts. A
/// deferred-success closure can capture it and emit the success action at a
/// time of its choosing; the fetcher builds one fresh per invocation, so the
/// prefix and key are fixed for its lifetime.
pub struct SuccessDispatch<K> {
    prefix: Arc<str>,
    key: K,
    sink: Arc<dyn Dispatch<K>>,
}

impl<K: Clone> SuccessDispatch<K> {
    pub(crate) fn new(prefix: &str, key: K, sink: Arc<dyn Dispatch<K>>) -> Self {
        Self {
            prefix: Arc::from(prefix),
            key,
            sink,
        }
    }

    /// Emit the success action `{<PREFIX>_SUCCESS, key, result}`.
    pub fn send(&self, result: FetchBody) {
        self.sink
            .dispatch(FetchAction::success(&self.prefix, self.key.clone(), result));
    }

    /// The key this capability is bound to.
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Clone> Clone for SuccessDispatch<K> {
    fn clone(&self) -> Self {
        Self {
            prefix: Arc::clone(&self.prefix),
            key: self.key.clone(),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for SuccessDispatch<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuccessDispatch")
            .field("prefix", &self.prefix)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
