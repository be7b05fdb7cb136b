//! Centralized constants for default endpoints and UA.

/// Default desktop UA; the exchange rejects some bare library agents.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// CSE JSON API base (endpoint name is appended).
pub(crate) const DEFAULT_BASE_API: &str = "https://www.cse.lk/api/";

/// CDN serving announcement attachments (relative `path` is appended).
pub(crate) const DEFAULT_BASE_CDN: &str = "https://cdn.cse.lk/";

/// Per-request timeout.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
