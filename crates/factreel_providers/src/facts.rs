//! API Ninjas fact source.

use async_trait::async_trait;
use factreel_core::Fact;
use factreel_error::{FactreelResult, HttpError, ProviderError, ProviderErrorKind};
use factreel_interface::FactSource;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, instrument};

const PROVIDER: &str = "api-ninjas";

/// One entry of the facts endpoint response.
#[derive(Debug, Deserialize)]
struct FactEntry {
    fact: String,
}

/// Fetches random facts from the API Ninjas facts endpoint.
#[derive(Debug, Clone)]
pub struct ApiNinjasFactSource {
    client: Client,
    api_key: String,
    url: String,
}

impl ApiNinjasFactSource {
    /// Creates a new fact source.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API Ninjas key, sent as `X-Api-Key`
    /// * `url` - Facts endpoint
    pub fn new(api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            url: url.into(),
        }
    }
}

/// Parse a facts endpoint body (`[{"fact": "..."}]`) into the first fact.
///
/// # Errors
///
/// Returns `ProviderErrorKind::SchemaValidation` if the body is not a list of
/// fact objects or the list is empty.
pub fn parse_fact_body(body: &str) -> FactreelResult<Fact> {
    let entries: Vec<FactEntry> = serde_json::from_str(body).map_err(|e| {
        ProviderError::with_provider(
            PROVIDER,
            ProviderErrorKind::SchemaValidation(format!("Malformed facts response: {}", e)),
        )
    })?;

    entries
        .into_iter()
        .next()
        .map(|entry| Fact::new(entry.fact))
        .ok_or_else(|| {
            ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::SchemaValidation("Facts response was empty".to_string()),
            )
            .into()
        })
}

#[async_trait]
impl FactSource for ApiNinjasFactSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_fact(&self) -> FactreelResult<Fact> {
        debug!("Requesting fact");

        let response = self
            .client
            .get(&self.url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to fact source");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read fact response: {}", e)))?;

        if status != StatusCode::OK {
            error!(status = %status, body = %body, "Fact source returned error");
            return Err(ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::Network {
                    status: status.as_u16(),
                    body,
                },
            )
            .into());
        }

        let fact = parse_fact_body(&body)?;
        debug!(fact = %fact, "Received fact");
        Ok(fact)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
