//! DALL-E image generation on Azure OpenAI.

use async_trait::async_trait;
use factreel_core::{GeneratedImage, ImageRequest};
use factreel_error::{FactreelResult, HttpError, ProviderError, ProviderErrorKind};
use factreel_interface::ImageService;
use factreel_rate_limit::retry_after_from_headers;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

const PROVIDER: &str = "azure-images";

/// Error code Azure uses for prompts rejected by the safety system.
const CONTENT_POLICY_CODE: &str = "content_policy_violation";

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

/// Error body, either wrapped in `{"error": ...}` or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorEnvelope {
    Wrapped { error: ErrorBody },
    Bare(ErrorBody),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    inner_error: Option<InnerError>,
}

#[derive(Debug, Deserialize)]
struct InnerError {
    #[serde(default)]
    revised_prompt: Option<String>,
}

/// Classify a non-success image generation response.
///
/// A body whose error code names a content-policy violation becomes
/// [`ProviderErrorKind::ContentPolicyViolation`], carrying
/// `inner_error.revised_prompt` when present. HTTP 429 becomes
/// [`ProviderErrorKind::RateLimited`]. Everything else is
/// [`ProviderErrorKind::Unhandled`].
///
/// # Examples
///
/// ```
/// use factreel_error::ProviderErrorKind;
/// use factreel_providers::classify_image_error;
///
/// let body = r#"{"error": {"code": "content_policy_violation",
///     "message": "Your request was rejected",
///     "inner_error": {"revised_prompt": "A friendly octopus"}}}"#;
/// let kind = classify_image_error(400, body);
/// assert_eq!(kind.revised_prompt(), Some("A friendly octopus"));
/// ```
pub fn classify_image_error(status: u16, body: &str) -> ProviderErrorKind {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| match envelope {
            ErrorEnvelope::Wrapped { error } => error,
            ErrorEnvelope::Bare(error) => error,
        });

    let policy_error = parsed.filter(|error| {
        error
            .code
            .as_deref()
            .is_some_and(|code| code.contains(CONTENT_POLICY_CODE))
    });

    if let Some(error) = policy_error {
        return ProviderErrorKind::ContentPolicyViolation {
            message: error.message.unwrap_or_else(|| body.to_string()),
            revised_prompt: error
                .inner_error
                .and_then(|inner| inner.revised_prompt)
                .filter(|prompt| !prompt.trim().is_empty()),
        };
    }

    if status == StatusCode::TOO_MANY_REQUESTS.as_u16() {
        return ProviderErrorKind::RateLimited {
            retry_after_secs: None,
        };
    }

    ProviderErrorKind::Unhandled(format!("HTTP {}: {}", status, body))
}

/// Azure OpenAI image generation client.
#[derive(Debug, Clone)]
pub struct AzureImageClient {
    client: Client,
    api_key: String,
    generation_url: String,
}

impl AzureImageClient {
    /// Creates a new image client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Azure OpenAI key, sent as `api-key`
    /// * `generation_url` - Full deployment URL including `api-version`
    pub fn new(api_key: impl Into<String>, generation_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            generation_url: generation_url.into(),
        }
    }
}

#[async_trait]
impl ImageService for AzureImageClient {
    #[instrument(skip(self, request), fields(size = %request.size()))]
    async fn generate(&self, request: &ImageRequest) -> FactreelResult<GeneratedImage> {
        debug!(prompt = %request.prompt(), "Requesting image");

        let response = self
            .client
            .post(&self.generation_url)
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send image request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let retry_after = retry_after_from_headers(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read image response: {}", e)))?;

        if !status.is_success() {
            let kind = match classify_image_error(status.as_u16(), &body) {
                ProviderErrorKind::RateLimited { .. } => ProviderErrorKind::RateLimited {
                    retry_after_secs: retry_after.map(|d| d.as_secs()),
                },
                other => other,
            };
            match &kind {
                ProviderErrorKind::ContentPolicyViolation { .. } => {
                    warn!(status = %status, "Image prompt rejected by content policy")
                }
                _ => error!(status = %status, body = %body, "Image API returned error"),
            }
            return Err(ProviderError::with_provider(PROVIDER, kind).into());
        }

        let parsed: ImageResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::SchemaValidation(format!("Malformed image response: {}", e)),
            )
        })?;

        let data = parsed.data.into_iter().next().ok_or_else(|| {
            ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::SchemaValidation("Image response had no data".to_string()),
            )
        })?;

        let url = data.url.ok_or_else(|| {
            ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::SchemaValidation("Image response had no url".to_string()),
            )
        })?;

        Ok(GeneratedImage {
            url,
            revised_prompt: data.revised_prompt,
        })
    }

    #[instrument(skip(self, image))]
    async fn download(&self, image: &GeneratedImage) -> FactreelResult<Vec<u8>> {
        let response = self.client.get(&image.url).send().await.map_err(|e| {
            error!(error = ?e, "Failed to download image");
            HttpError::new(format!("Download failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Image download returned error");
            return Err(ProviderError::with_provider(
                PROVIDER,
                ProviderErrorKind::Network {
                    status: status.as_u16(),
                    body,
                },
            )
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read image bytes: {}", e)))?;
        debug!(size = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
