// src/utils/http.rs
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{LeakerError, LeakerResult, SourceError};

/// HTTP client shared by every source adapter.
///
/// Holds no per-request state, so one instance is cloned into each source and
/// used concurrently. Per-query deadlines are enforced by the scan session.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(user_agent: Option<String>) -> LeakerResult<Self> {
        let user_agent = user_agent
            .filter(|agent| !agent.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        let client = Client::builder()
            .user_agent(&user_agent)
            .build()
            .map_err(|e| LeakerError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, user_agent })
    }

    /// GET `base` with the given query parameters and decode a JSON body.
    ///
    /// Returns `Ok(None)` on 404 so adapters can map it to "no match".
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        base: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, SourceError> {
        let url = Url::parse_with_params(base, params)
            .map_err(|e| SourceError::Parse(format!("invalid URL {}: {}", base, e)))?;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.text().await?;
                Ok(Some(serde_json::from_str(&body)?))
            }
            status => Err(SourceError::Status(status.as_u16())),
        }
    }

    /// Get the user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

pub fn default_user_agent() -> String {
    format!("leaker/{}", env!("CARGO_PKG_VERSION"))
}
