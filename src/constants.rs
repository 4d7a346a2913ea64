// Fixed configuration constants shared by the env resolver and the key store.

/// Session storage key for the runtime API key.
pub const API_KEY_STORAGE_KEY: &str = "pilot.apiKey";

/// Session storage key for the persistent browser session id.
pub const BROWSER_SESSION_ID_STORAGE_KEY: &str = "pilot.browserSessionId";

/// Placeholder inherited from `.env.example` when the build was configured
/// without a real credential. Never treated as a usable key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

pub const DEFAULT_ENVIRONMENT: &str = "production";

// Path suffixes joined onto the window origin when no override is set.
pub const API_V1_PATH: &str = "/api/v1";
pub const ARTIFACTS_PATH: &str = "/artifacts";

/// Rollout toggle: route run reads through the runs API base URL rather than
/// the legacy `/api`-prefixed one.
pub const USE_NEW_RUNS_URL: bool = true;

/// The full set of storage key names, so consumers don't hard-code strings.
pub struct StorageKeys {
    pub api_key: &'static str,
    pub browser_session_id: &'static str,
}

pub const STORAGE_KEYS: StorageKeys = StorageKeys {
    api_key: API_KEY_STORAGE_KEY,
    browser_session_id: BROWSER_SESSION_ID_STORAGE_KEY,
};
