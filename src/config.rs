//! Runtime settings for the tools, read from the environment (and an optional `.env`).

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::core::{CseClient, CseError};

/// Default location of the cached company roster.
pub const DEFAULT_DATA_FILE: &str = "company_data/data.json";
/// Default location of the cached announcement categories.
pub const DEFAULT_CATEGORIES_FILE: &str = crate::dividends::DEFAULT_CATEGORIES_FILE;
/// Default directory for analysis artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "analysis";
/// Default directory for downloaded reports and download logs.
pub const DEFAULT_REPORTS_DIR: &str = "reports";
/// Default pause between consecutive API calls.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Settings shared by the command-line tools.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Overrides the API base URL.
    pub base_api: Option<Url>,
    /// Overrides the attachment CDN base URL.
    pub base_cdn: Option<Url>,
    /// Cached company roster.
    pub data_file: PathBuf,
    /// Cached announcement categories.
    pub categories_file: PathBuf,
    /// Where analysis artifacts are written.
    pub output_dir: PathBuf,
    /// Where downloaded reports and logs are written.
    pub reports_dir: PathBuf,
    /// Pause between consecutive API calls in any loop.
    pub delay: Duration,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_api: None,
            base_cdn: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            categories_file: PathBuf::from(DEFAULT_CATEGORIES_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            delay: DEFAULT_DELAY,
            timeout: None,
        }
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the `CSE_*` variables.
    ///
    /// # Errors
    ///
    /// Returns `CseError::InvalidParams` when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, CseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unset keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `CseError::InvalidParams` when a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Self::default();

        if let Some(v) = lookup("CSE_BASE_URL") {
            s.base_api = Some(parse_url("CSE_BASE_URL", &v)?);
        }
        if let Some(v) = lookup("CSE_CDN_URL") {
            s.base_cdn = Some(parse_url("CSE_CDN_URL", &v)?);
        }
        if let Some(v) = lookup("CSE_DATA_FILE") {
            s.data_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("CSE_CATEGORIES_FILE") {
            s.categories_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("CSE_OUTPUT_DIR") {
            s.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CSE_REPORTS_DIR") {
            s.reports_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CSE_REQUEST_DELAY_MS") {
            let ms: u64 = v.trim().parse().map_err(|_| {
                CseError::InvalidParams(format!("CSE_REQUEST_DELAY_MS must be an integer, got `{v}`"))
            })?;
            s.delay = Duration::from_millis(ms);
        }
        if let Some(v) = lookup("CSE_TIMEOUT_SECS") {
            let secs: u64 = v.trim().parse().map_err(|_| {
                CseError::InvalidParams(format!("CSE_TIMEOUT_SECS must be an integer, got `{v}`"))
            })?;
            s.timeout = Some(Duration::from_secs(secs));
        }

        Ok(s)
    }

    /// Builds a client honoring the URL and timeout overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn client(&self) -> Result<CseClient, CseError> {
        let mut b = CseClient::builder();
        if let Some(u) = &self.base_api {
            b = b.base_api(u.clone());
        }
        if let Some(u) = &self.base_cdn {
            b = b.base_cdn(u.clone());
        }
        if let Some(t) = self.timeout {
            b = b.timeout(t);
        }
        b.build()
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, CseError> {
    Url::parse(value.trim())
        .map_err(|e| CseError::InvalidParams(format!("{key} is not a valid URL ({e}): `{value}`")))
}
