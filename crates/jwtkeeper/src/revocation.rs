//! Revocation registry
//!
//! Verification consults a [`RevocationRegistry`] for every token. The
//! registry is written to by whoever decides a token must die early (logout,
//! password change, an operator); the signer and verifier only ever read it.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Set of revoked token identifiers
///
/// Implementations must tolerate concurrent `contains` and `insert` calls.
/// `contains` must observe every `insert` that completed before it started.
pub trait RevocationRegistry: Send + Sync {
    /// Whether `token_id` has been revoked
    fn contains(&self, token_id: &str) -> bool;

    /// Revoke `token_id`
    fn insert(&self, token_id: String);
}

impl<R: RevocationRegistry + ?Sized> RevocationRegistry for Arc<R> {
    fn contains(&self, token_id: &str) -> bool {
        (**self).contains(token_id)
    }

    fn insert(&self, token_id: String) {
        (**self).insert(token_id)
    }
}

/// In-memory revocation list backed by a concurrent cache
///
/// By default entries are kept forever. [`RevocationList::with_retention`]
/// drops entries after a fixed window; the window must be at least the
/// longest token lifetime, or a revoked token becomes valid again once its
/// entry ages out.
#[derive(Clone)]
pub struct RevocationList {
    revoked: Cache<String, ()>,
}

impl RevocationList {
    /// Create an empty, unbounded list
    pub fn new() -> Self {
        Self {
            revoked: Cache::builder().build(),
        }
    }

    /// Create an empty list whose entries expire `retention` after insertion
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            revoked: Cache::builder().time_to_live(retention).build(),
        }
    }
}

impl Default for RevocationList {
    fn default() -> Self {
        Self::new()
    }
}

impl RevocationRegistry for RevocationList {
    fn contains(&self, token_id: &str) -> bool {
        self.revoked.contains_key(token_id)
    }

    fn insert(&self, token_id: String) {
        tracing::debug!(token_id = %token_id, "token revoked");
        self.revoked.insert(token_id, ());
    }
}

impl<S: Into<String>> FromIterator<S> for RevocationList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let list = Self::new();
        for token_id in iter {
            list.revoked.insert(token_id.into(), ());
        }
        list
    }
}

impl std::fmt::Debug for RevocationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationList")
            .field("entries", &self.revoked.entry_count())
            .finish()
    }
}
