//! Resolution of API, artifact and WebSocket base URLs.
//!
//! Each value comes from a build-time environment variable when one was
//! baked in, and otherwise falls back to the window origin plus a fixed path
//! suffix (the common deployment where the backend is served behind the same
//! host as the UI). Resolution happens once at startup; the resulting [`Env`]
//! is immutable.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::constants::{API_V1_PATH, ARTIFACTS_PATH, DEFAULT_ENVIRONMENT};
use crate::storage::window_origin;
use crate::urls::{
    ensure_leading_slash, http_to_ws, join_base_and_path, normalize_base, strip_api_prefix,
    strip_api_prefix_keep_url,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("API_BASE_URL was not set and the UI is not served from the same origin as the API")]
    ApiBaseUrlUnset,
}

/// Build-time overrides, one per environment variable.
///
/// Kept as a plain struct so tests can drive [`Env::resolve`] directly
/// instead of recompiling with different `option_env!` values.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub environment: Option<String>,
    pub api_key: Option<String>,
    pub artifact_api_base_url: Option<String>,
    pub api_path_prefix: Option<String>,
    pub wss_base_url: Option<String>,
}

impl Overrides {
    /// Capture the values baked in at compile time.
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("API_BASE_URL").map(str::to_string),
            environment: option_env!("ENVIRONMENT").map(str::to_string),
            api_key: option_env!("API_KEY").map(str::to_string),
            artifact_api_base_url: option_env!("ARTIFACT_API_BASE_URL").map(str::to_string),
            api_path_prefix: option_env!("API_PATH_PREFIX").map(str::to_string),
            wss_base_url: option_env!("WSS_BASE_URL").map(str::to_string),
        }
    }
}

/// Immutable configuration resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    pub api_base_url: String,
    /// `api_base_url` with a leading `/api` path segment stripped
    /// (`/api/v1` becomes `/v1`).
    pub runs_api_base_url: String,
    pub environment: String,
    /// Empty when neither an override nor a window origin is available;
    /// consumers treat artifacts as unavailable in that case.
    pub artifact_api_base_url: String,
    pub api_path_prefix: String,
    /// Empty when unresolvable, same contract as `artifact_api_base_url`.
    pub wss_base_url: String,
    /// `wss_base_url` with a leading `/api` path segment stripped.
    pub new_wss_base_url: String,
    /// Raw build-time key; placeholder normalization happens in the key
    /// store, not here.
    pub build_time_api_key: Option<String>,
}

/// An override counts only when it is non-empty after trimming.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&message.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("warning: {message}");
    }
}

impl Env {
    /// Resolve every base URL from the given origin and overrides.
    ///
    /// Only the primary API URL is mandatory; artifact and WebSocket URLs
    /// degrade to an empty string with a console warning, since those
    /// features may go unused.
    pub fn resolve(origin: Option<&str>, overrides: &Overrides) -> Result<Self, EnvError> {
        let origin = origin.map(|o| normalize_base(o).to_string());

        let api_base_url = match non_empty(overrides.api_base_url.as_ref()) {
            Some(value) => value.to_string(),
            None => origin
                .as_deref()
                .map(|o| join_base_and_path(o, API_V1_PATH))
                .ok_or(EnvError::ApiBaseUrlUnset)?,
        };

        let environment = non_empty(overrides.environment.as_ref())
            .unwrap_or(DEFAULT_ENVIRONMENT)
            .to_string();

        let artifact_api_base_url = match non_empty(overrides.artifact_api_base_url.as_ref()) {
            Some(value) => value.to_string(),
            None => match origin.as_deref() {
                Some(o) => join_base_and_path(o, ARTIFACTS_PATH),
                None => {
                    warn("ARTIFACT_API_BASE_URL was not set; artifact links will be unavailable");
                    String::new()
                }
            },
        };

        let api_path_prefix = non_empty(overrides.api_path_prefix.as_ref())
            .map(ensure_leading_slash)
            .unwrap_or_default();

        let wss_base_url = match non_empty(overrides.wss_base_url.as_ref()) {
            Some(value) => value.to_string(),
            None => match origin.as_deref() {
                Some(o) => join_base_and_path(&http_to_ws(o), API_V1_PATH),
                None => {
                    warn("WSS_BASE_URL was not set; live streaming will be unavailable");
                    String::new()
                }
            },
        };

        let new_wss_base_url = if wss_base_url.is_empty() {
            String::new()
        } else {
            strip_api_prefix_keep_url(&wss_base_url)
        };

        let runs_api_base_url = strip_api_prefix(&api_base_url);

        Ok(Self {
            api_base_url,
            runs_api_base_url,
            environment,
            artifact_api_base_url,
            api_path_prefix,
            wss_base_url,
            new_wss_base_url,
            build_time_api_key: overrides.api_key.clone(),
        })
    }

    /// Resolve from the variables baked in at build time and the current
    /// window origin.
    pub fn from_build_env() -> Result<Self, EnvError> {
        Env::resolve(window_origin().as_deref(), &Overrides::from_build_env())
    }
}

thread_local! {
    static ENV: RefCell<Option<Rc<Env>>> = RefCell::new(None);
}

/// Resolve the environment once and make it available through [`env`].
pub fn init_env() -> Result<(), EnvError> {
    let resolved = Env::from_build_env()?;
    ENV.with(|cell| *cell.borrow_mut() = Some(Rc::new(resolved)));
    Ok(())
}

/// The resolved environment.
///
/// Panics when [`init_env`] has not run; the application entry point must
/// call it before anything touches configuration.
pub fn env() -> Rc<Env> {
    ENV.with(|cell| {
        cell.borrow()
            .clone()
            .expect("init_env() must succeed before env() is used")
    })
}
