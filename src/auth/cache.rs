//! Token cache abstraction and the in-process implementation.
//!
//! The client does not own the cache's eviction policy: it only reads,
//! writes, and removes entries with an absolute expiry. Implementations must
//! be internally synchronized since one cache is shared by every request.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::auth::CachedToken;

/// Key under which the client stores its access token.
pub const ACCESS_TOKEN_KEY: &str = "accessTokenKey";

/// A key/value store for access tokens with per-entry absolute expiry.
///
/// Implementations must never return an entry whose expiry has passed.
pub trait TokenCache: Send + Sync {
    /// Returns the token stored under `key` if it has not expired.
    fn get(&self, key: &str) -> Option<CachedToken>;

    /// Stores `token` under `key` until `expires_at`, replacing any previous entry.
    fn insert(&self, key: &str, token: CachedToken, expires_at: DateTime<Utc>);

    /// Removes the entry stored under `key`, if any.
    fn remove(&self, key: &str);
}

struct CacheEntry {
    token: CachedToken,
    expires_at: DateTime<Utc>,
}

/// In-memory [`TokenCache`] guarded by a read/write lock.
///
/// Expired entries are dropped lazily when looked up.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use storm_api::auth::{CachedToken, MemoryTokenCache, TokenCache};
///
/// let cache = MemoryTokenCache::new();
/// let token = CachedToken {
///     access_token: "abc".to_string(),
///     expires_in: 3600,
///     token_type: "Bearer".to_string(),
///     scope: "stage".to_string(),
/// };
///
/// cache.insert("key", token, Utc::now() + Duration::minutes(5));
/// assert_eq!(cache.get("key").unwrap().access_token, "abc");
///
/// cache.remove("key");
/// assert!(cache.get("key").is_none());
/// ```
#[derive(Default)]
pub struct MemoryTokenCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryTokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the absolute expiry of the entry under `key`, if present.
    #[must_use]
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(|entry| entry.expires_at)
    }
}

impl TokenCache for MemoryTokenCache {
    fn get(&self, key: &str) -> Option<CachedToken> {
        let now = Utc::now();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.token.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Entry is stale; re-check under the write lock since another caller
        // may have replaced it in between.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        None
    }

    fn insert(&self, key: &str, token: CachedToken, expires_at: DateTime<Utc>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), CacheEntry { token, expires_at });
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl fmt::Debug for MemoryTokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTokenCache")
            .field("entries", &self.len())
            .finish()
    }
}

// Verify MemoryTokenCache is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryTokenCache>();
};
