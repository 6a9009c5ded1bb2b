//! Text-to-speech on Azure OpenAI.

use async_trait::async_trait;
use factreel_core::SpeechRequest;
use factreel_error::{FactreelResult, HttpError, ProviderError, ProviderErrorKind};
use factreel_interface::SpeechService;
use factreel_rate_limit::retry_after_from_headers;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument, warn};

const PROVIDER: &str = "azure-speech";

/// Azure OpenAI speech client.
///
/// A single request per call. Waiting out rate limits is the caller's job;
/// this client only reports them with the provider's `Retry-After` hint.
#[derive(Debug, Clone)]
pub struct AzureSpeechClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl AzureSpeechClient {
    /// Creates a new speech client for a full speech endpoint URL.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SpeechService for AzureSpeechClient {
    #[instrument(skip(self, request), fields(voice = %request.voice(), chars = request.input().len()))]
    async fn synthesize(&self, request: &SpeechRequest) -> FactreelResult<Vec<u8>> {
        debug!("Requesting speech");

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send speech request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();

        if status == StatusCode::OK {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| HttpError::new(format!("Failed to read speech audio: {}", e)))?;
            debug!(size = bytes.len(), "Received speech audio");
            return Ok(bytes.to_vec());
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = retry_after_from_headers(response.headers());
            warn!(retry_after = ?retry_after, "Speech synthesis rate limited");
            return Err(ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::RateLimited {
                    retry_after_secs: retry_after.map(|d| d.as_secs()),
                },
            )
            .into());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Speech API returned error");
        Err(ProviderError::with_provider(
            PROVIDER,
            ProviderErrorKind::Network {
                status: status.as_u16(),
                body,
            },
        )
        .into())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
