//! Session-scoped runtime API key.
//!
//! The key is resolved at most once per page lifetime: the first `get` reads
//! the session store (falling back to the build-time default), later calls
//! serve the cached result. `persist` and `clear` write through to the store
//! so the value survives reloads within the same browser session but not
//! across sessions.

use std::cell::RefCell;

use crate::constants::{API_KEY_PLACEHOLDER, API_KEY_STORAGE_KEY};
use crate::storage::{BrowserSessionStore, SessionStore};

#[derive(Debug, Clone, PartialEq)]
enum CacheState {
    Unresolved,
    Resolved(Option<String>),
}

/// The single credential cell. All mutation of the key goes through
/// `get` / `persist` / `clear`; nothing else touches the cache or the store.
pub struct ApiKeyStore<S: SessionStore> {
    store: S,
    build_time_default: Option<String>,
    cache: RefCell<CacheState>,
}

impl<S: SessionStore> ApiKeyStore<S> {
    pub fn new(store: S, build_time_default: Option<String>) -> Self {
        Self {
            store,
            build_time_default,
            cache: RefCell::new(CacheState::Unresolved),
        }
    }

    /// The resolved key, reading the session store at most once per
    /// resolution. The `YOUR_API_KEY` placeholder inherited from an
    /// unmodified example configuration counts as absent.
    pub fn get(&self) -> Option<String> {
        if let CacheState::Resolved(value) = &*self.cache.borrow() {
            return value.clone();
        }

        let candidate = self
            .store
            .get(API_KEY_STORAGE_KEY)
            .or_else(|| self.build_time_default.clone());
        let resolved = candidate.filter(|v| v != API_KEY_PLACEHOLDER);

        *self.cache.borrow_mut() = CacheState::Resolved(resolved.clone());
        resolved
    }

    /// Cache `value` and write it through to the session store.
    pub fn persist(&self, value: &str) {
        *self.cache.borrow_mut() = CacheState::Resolved(Some(value.to_string()));
        self.store.set(API_KEY_STORAGE_KEY, value);
    }

    /// Drop the cached key and its stored copy. The next `get` resolves from
    /// scratch, so a build-time default becomes visible again.
    pub fn clear(&self) {
        *self.cache.borrow_mut() = CacheState::Unresolved;
        self.store.remove(API_KEY_STORAGE_KEY);
    }
}

thread_local! {
    static RUNTIME_API_KEY: ApiKeyStore<BrowserSessionStore> = ApiKeyStore::new(
        BrowserSessionStore,
        option_env!("API_KEY").map(str::to_string),
    );
}

/// The runtime API key for this session, if any.
pub fn get_runtime_api_key() -> Option<String> {
    RUNTIME_API_KEY.with(|store| store.get())
}

/// Replace the runtime API key for the rest of this browser session.
pub fn persist_runtime_api_key(value: &str) {
    RUNTIME_API_KEY.with(|store| store.persist(value));
}

/// Forget the runtime API key, both cached and stored.
pub fn clear_runtime_api_key() {
    RUNTIME_API_KEY.with(|store| store.clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn get_reads_store_at_most_once() {
        let mem = MemoryStore::with_entry(API_KEY_STORAGE_KEY, "abc");
        let store = ApiKeyStore::new(&mem, None);
        assert_eq!(store.get(), Some("abc".to_string()));
        assert_eq!(store.get(), Some("abc".to_string()));
        assert_eq!(mem.reads(), 1);
    }

    #[test]
    fn empty_store_falls_back_to_build_time_default() {
        let mem = MemoryStore::default();
        let store = ApiKeyStore::new(&mem, Some("default".to_string()));
        assert_eq!(store.get(), Some("default".to_string()));
    }

    #[test]
    fn stored_value_wins_over_build_time_default() {
        let mem = MemoryStore::with_entry(API_KEY_STORAGE_KEY, "stored");
        let store = ApiKeyStore::new(&mem, Some("default".to_string()));
        assert_eq!(store.get(), Some("stored".to_string()));
    }

    #[test]
    fn persist_writes_through_to_the_store() {
        let mem = MemoryStore::default();
        let store = ApiKeyStore::new(&mem, None);
        store.persist("abc");
        assert_eq!(mem.get(API_KEY_STORAGE_KEY), Some("abc".to_string()));
    }

    #[test]
    fn cache_wins_over_external_store_clearing() {
        let mem = MemoryStore::default();
        let store = ApiKeyStore::new(&mem, None);
        store.persist("abc");
        mem.remove(API_KEY_STORAGE_KEY);
        assert_eq!(store.get(), Some("abc".to_string()));
    }

    #[test]
    fn clear_removes_the_stored_entry() {
        let mem = MemoryStore::with_entry(API_KEY_STORAGE_KEY, "stored");
        let store = ApiKeyStore::new(&mem, None);
        store.clear();
        assert_eq!(mem.get(API_KEY_STORAGE_KEY), None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn clear_falls_back_to_build_time_default() {
        let mem = MemoryStore::with_entry(API_KEY_STORAGE_KEY, "stored");
        let store = ApiKeyStore::new(&mem, Some("default".to_string()));
        assert_eq!(store.get(), Some("stored".to_string()));
        store.clear();
        assert_eq!(store.get(), Some("default".to_string()));
    }

    #[test]
    fn placeholder_in_store_resolves_to_absent() {
        let mem = MemoryStore::with_entry(API_KEY_STORAGE_KEY, API_KEY_PLACEHOLDER);
        let store = ApiKeyStore::new(&mem, None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn placeholder_build_time_default_resolves_to_absent() {
        let mem = MemoryStore::default();
        let store = ApiKeyStore::new(&mem, Some(API_KEY_PLACEHOLDER.to_string()));
        assert_eq!(store.get(), None);
    }
}
