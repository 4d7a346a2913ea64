//! Pure URL helpers used by environment resolution.
//!
//! Every function here is total: malformed input degrades to literal string
//! manipulation instead of an error, so URL derivation can never abort
//! startup on its own.

use url::Url;

/// Strip a single trailing `/` from a base URL.
pub fn normalize_base(value: &str) -> &str {
    value.strip_suffix('/').unwrap_or(value)
}

/// Guarantee the path begins with `/`; paths that already do are untouched.
pub fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_base_and_path(base: &str, path: &str) -> String {
    format!("{}{}", normalize_base(base), ensure_leading_slash(path))
}

/// Turn an `http(s)` origin into its `ws(s)` counterpart. Non-http input is
/// returned unchanged.
pub fn http_to_ws(origin: &str) -> String {
    match origin.strip_prefix("http") {
        Some(rest) => format!("ws{rest}"),
        None => origin.to_string(),
    }
}

/// Drop a leading `/api` path segment (`/api/v1` becomes `/v1`) and
/// re-serialize as `origin + path`, dropping any query or fragment.
///
/// Unparsable input falls back to removing the first literal `/api`
/// substring.
pub fn strip_api_prefix(value: &str) -> String {
    match Url::parse(value) {
        Ok(mut url) => {
            if let Some(stripped) = url.path().strip_prefix("/api").map(str::to_string) {
                url.set_path(&stripped);
            }
            format!("{}{}", url.origin().ascii_serialization(), url.path())
        }
        Err(_) => value.replacen("/api", "", 1),
    }
}

/// Same stripping rule as [`strip_api_prefix`], but the whole URL is kept
/// (query, fragment). Used for the WebSocket base URL.
pub fn strip_api_prefix_keep_url(value: &str) -> String {
    match Url::parse(value) {
        Ok(mut url) => {
            if let Some(stripped) = url.path().strip_prefix("/api").map(str::to_string) {
                url.set_path(&stripped);
            }
            url.to_string()
        }
        Err(_) => value.replacen("/api", "", 1),
    }
}
