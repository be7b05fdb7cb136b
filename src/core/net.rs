use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{CseClient, CseError, payload::Payload};

/// A decoded, successful API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Endpoint name the response came from (e.g. `companyInfoSummery`).
    pub endpoint: String,
    /// HTTP status code of the response.
    pub status: u16,
    /// The decoded JSON body.
    pub body: Value,
}

impl ApiResponse {
    /// Resolves the response shape once: nested under `key`, or the bare payload.
    #[must_use]
    pub fn into_payload(self, key: &str) -> Payload {
        Payload::resolve(self.body, key)
    }

    /// Returns the value nested under `key`, or `MissingData` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `CseError::MissingData` if the body is not an object carrying `key`.
    pub fn require(self, key: &str) -> Result<Value, CseError> {
        let endpoint = self.endpoint.clone();
        match self.into_payload(key) {
            Payload::Nested { value, .. } => Ok(value),
            Payload::Bare(_) => Err(CseError::MissingData {
                endpoint,
                key: key.to_string(),
            }),
        }
    }

    /// Deserializes the whole body into `T`.
    ///
    /// # Errors
    ///
    /// Returns `CseError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, CseError> {
        let status = self.status;
        serde_json::from_value(self.body).map_err(|e| CseError::Decode {
            status,
            message: e.to_string(),
        })
    }
}

/// Issues a form-encoded POST to `endpoint` and decodes the JSON body.
///
/// Every exchange endpoint is a POST with `application/x-www-form-urlencoded` parameters.
/// The client performs no retries; callers decide what to do with a failure.
///
/// # Errors
///
/// - `CseError::Http` for transport failures and timeouts.
/// - `CseError::NotFound` / `RateLimited` / `ServerError` / `Status` for non-2xx responses.
/// - `CseError::Decode` when the body is not valid JSON.
#[tracing::instrument(skip(client, params), level = "debug", err)]
pub async fn call(
    client: &CseClient,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<ApiResponse, CseError> {
    let url = client.base_api().join(endpoint)?;

    let resp = client.http().post(url.clone()).form(params).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(CseError::from_status(status.as_u16(), url.as_str()));
    }

    let text = resp.text().await?;
    let body: Value = serde_json::from_str(&text).map_err(|e| CseError::Decode {
        status: status.as_u16(),
        message: e.to_string(),
    })?;

    tracing::trace!(endpoint, status = status.as_u16(), "response decoded");

    Ok(ApiResponse {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}
