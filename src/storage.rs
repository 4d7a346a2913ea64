//! Injected browser capabilities: the current origin and a session-scoped
//! key-value store.
//!
//! Non-browser contexts (unit tests, server-side rendering) get the same
//! interface with no-op behaviour, instead of scattering environment checks
//! through the call sites.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Session-scoped string key-value store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

fn session_storage() -> Option<web_sys::Storage> {
    #[cfg(target_arch = "wasm32")]
    {
        return web_sys::window()?.session_storage().ok().flatten();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Origin of the current page with any trailing slash stripped, or `None`
/// outside a browser.
pub fn window_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let origin = web_sys::window()?.location().origin().ok()?;
        return Some(crate::urls::normalize_base(&origin).to_string());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// `window.sessionStorage`-backed store. Every operation degrades to a no-op
/// (or `None`) when no window or storage object exists.
#[derive(Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = session_storage() {
            // Quota or access errors just leave the key un-persisted for
            // this session.
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for native tests and embedders without a browser. Tracks
/// how many times `get` was called so callers can assert single-read
/// behaviour.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    reads: Cell<usize>,
}

impl MemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `get` calls seen so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.reads.set(self.reads.get() + 1);
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_counts_reads() {
        let store = MemoryStore::default();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.remove("k");
        assert_eq!(store.get("k"), None);
        assert_eq!(store.reads(), 3);
    }

    #[test]
    fn browser_store_is_safe_without_a_window() {
        let store = BrowserSessionStore;
        store.set("k", "v");
        assert_eq!(store.get("k"), None);
        store.remove("k");
    }
}

// Browser-only coverage; runs under wasm-pack test.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn browser_store_round_trip() {
        let store = BrowserSessionStore;
        store.set("test.roundTrip", "v");
        assert_eq!(store.get("test.roundTrip"), Some("v".to_string()));
        store.remove("test.roundTrip");
        assert_eq!(store.get("test.roundTrip"), None);
    }
}
