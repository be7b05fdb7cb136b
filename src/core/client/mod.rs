//! Public client surface + builder.
//! Defaults live in `constants` (UA, base URLs, timeout).

mod constants;

use crate::core::CseError;
use constants::{DEFAULT_BASE_API, DEFAULT_BASE_CDN, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Handle to the exchange API. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CseClient {
    http: Client,
    base_api: Url,
    base_cdn: Url,
}

impl Default for CseClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl CseClient {
    /// Create a new builder.
    pub fn builder() -> CseClientBuilder {
        CseClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Base URL that endpoint names are joined onto.
    pub fn base_api(&self) -> &Url {
        &self.base_api
    }

    /// Base URL that attachment paths are joined onto.
    pub fn base_cdn(&self) -> &Url {
        &self.base_cdn
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct CseClientBuilder {
    user_agent: Option<String>,
    base_api: Option<Url>,
    base_cdn: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl CseClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://www.cse.lk/api/`).
    pub fn base_api(mut self, url: Url) -> Self {
        self.base_api = Some(url);
        self
    }

    /// Override the attachment CDN base (e.g., `https://cdn.cse.lk/`).
    pub fn base_cdn(mut self, url: Url) -> Self {
        self.base_cdn = Some(url);
        self
    }

    /// Set a global request timeout. Default: 30 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<CseClient, CseError> {
        let base_api = with_trailing_slash(match self.base_api {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_API)?,
        });
        let base_cdn = with_trailing_slash(match self.base_cdn {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CDN)?,
        });

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            );

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(CseClient {
            http,
            base_api,
            base_cdn,
        })
    }
}

// `Url::join` drops the last segment unless the base ends in '/'.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
