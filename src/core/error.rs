use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum CseError {
    /// An error occurred during an HTTP request (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The requested endpoint or resource does not exist (HTTP 404).
    #[error("Not found at {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The remote service is throttling requests (HTTP 429).
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that returned 429.
        url: String,
    },

    /// The remote service failed with a 5xx status.
    #[error("Server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The response body was not valid JSON.
    #[error("Failed to decode JSON response (status {status}): {message}")]
    Decode {
        /// The HTTP status of the otherwise successful response.
        status: u16,
        /// The parser's message.
        message: String,
    },

    /// A successful response did not carry the expected nested key.
    #[error("Missing `{key}` in response from {endpoint}")]
    MissingData {
        /// The endpoint that was called.
        endpoint: String,
        /// The key that was expected.
        key: String,
    },

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a CSV artifact failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing a spreadsheet artifact failed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Serializing or deserializing a local JSON document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A parameter supplied by the caller was invalid.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// An invalid date range was provided (start must not be after end).
    #[error("invalid date range: start must not be after end")]
    InvalidDates,

    /// The requested capability was not compiled into this build.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl CseError {
    /// Maps a non-2xx status code to the matching error variant.
    pub(crate) fn from_status(status: u16, url: impl Into<String>) -> Self {
        let url = url.into();
        match status {
            404 => Self::NotFound { url },
            429 => Self::RateLimited { url },
            500..=599 => Self::ServerError { status, url },
            _ => Self::Status { status, url },
        }
    }

    /// The HTTP status code carried by this error, if one is known.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. }
            | Self::ServerError { status, .. }
            | Self::Decode { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(feature = "xlsx")]
impl From<rust_xlsxwriter::XlsxError> for CseError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        CseError::Spreadsheet(e.to_string())
    }
}
