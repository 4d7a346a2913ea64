//! Environment and session configuration for the Pilot web UI.
//!
//! The rest of the frontend only ever consumes configuration through this
//! crate: resolved API / artifact / WebSocket base URLs (build-time
//! environment variables with the window origin as fallback) and the
//! session-scoped runtime API key.
//!
//! All of the resolution logic is plain string work and runs on any target;
//! only the thin capability layer in [`storage`] touches the browser, so the
//! crate stays testable under a normal `cargo test`.

use wasm_bindgen::prelude::*;

pub mod api_key;
pub mod constants;
pub mod env;
pub mod storage;
pub mod urls;

pub use api_key::{
    clear_runtime_api_key, get_runtime_api_key, persist_runtime_api_key, ApiKeyStore,
};
pub use constants::{StorageKeys, STORAGE_KEYS, USE_NEW_RUNS_URL};
pub use env::{env, init_env, Env, EnvError, Overrides};
pub use storage::{BrowserSessionStore, MemoryStore, SessionStore};

/// Bootstrap hook for the host application.
///
/// Installs readable panic messages and resolves the environment once. A
/// fatal misconfiguration (no way to determine the API base URL) is returned
/// to the caller so startup aborts with a descriptive error instead of
/// limping along with empty endpoints.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    env::init_env().map_err(|e| JsValue::from_str(&e.to_string()))
}
