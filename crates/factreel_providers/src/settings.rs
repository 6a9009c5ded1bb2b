//! Provider endpoints, model names and credentials.

use factreel_error::{ConfigError, FactreelResult};
use serde::{Deserialize, Serialize};

/// Endpoint and model configuration for every adapter.
///
/// # Example
///
/// ```toml
/// [providers.completion]
/// url = "https://api.openai.com/v1/chat/completions"
/// model = "gpt-4o-2024-08-06"
///
/// [providers.images]
/// endpoint = "https://my-resource.openai.azure.com"
/// deployment = "dall-e-3"
/// api_version = "2024-05-01-preview"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Fact source
    #[serde(default)]
    pub facts: FactSettings,
    /// Chat completion
    #[serde(default)]
    pub completion: CompletionSettings,
    /// Image synthesis
    #[serde(default)]
    pub images: ImageSettings,
    /// Speech synthesis
    #[serde(default)]
    pub speech: SpeechSettings,
    /// Local encoder binaries
    #[serde(default)]
    pub ffmpeg: FfmpegSettings,
}

/// Fact source settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FactSettings {
    /// Facts endpoint
    pub url: String,
}

impl Default for FactSettings {
    fn default() -> Self {
        Self {
            url: "https://api.api-ninjas.com/v1/facts".to_string(),
        }
    }
}

/// Chat completion settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompletionSettings {
    /// Chat completions endpoint
    pub url: String,
    /// Default model
    pub model: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-2024-08-06".to_string(),
        }
    }
}

/// Azure OpenAI image settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageSettings {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    /// Deployment name of the image model
    pub deployment: String,
    /// REST API version
    pub api_version: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            deployment: "dall-e-3".to_string(),
            api_version: "2024-05-01-preview".to_string(),
        }
    }
}

impl ImageSettings {
    /// Full image-generation URL.
    pub fn generation_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/images/generations?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

/// Azure OpenAI speech settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SpeechSettings {
    /// Full speech endpoint URL; falls back to `AZURE_OPENAI_ENDPOINT_SPEECH`
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Paths to the ffmpeg tools.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FfmpegSettings {
    /// ffmpeg binary
    pub ffmpeg: String,
    /// ffprobe binary
    pub ffprobe: String,
    /// Video codec passed to ffmpeg
    pub video_codec: String,
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            video_codec: "libx264".to_string(),
        }
    }
}

/// API keys and secret endpoints read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// `API_NINJAS_KEY`
    pub api_ninjas_key: String,
    /// `OPENAI_API_KEY`
    pub openai_api_key: String,
    /// `AZURE_OPENAI_API_KEY`
    pub azure_openai_api_key: String,
    /// `AZURE_OPENAI_ENDPOINT_SPEECH`, if set
    pub azure_speech_endpoint: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_ninjas_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("azure_openai_api_key", &"<redacted>")
            .field("azure_speech_endpoint", &self.azure_speech_endpoint)
            .finish()
    }
}

/// Read one required, non-blank environment variable.
///
/// # Errors
///
/// Returns a configuration error naming `key` if it is unset or blank.
pub fn required_var(key: &str) -> FactreelResult<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::new(format!("{} environment variable not set", key)).into())
}

impl Credentials {
    /// Read credentials from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing key.
    pub fn from_env() -> FactreelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FactreelResult<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::new(format!("{} environment variable not set", key)))
        };

        Ok(Self {
            api_ninjas_key: required("API_NINJAS_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            azure_openai_api_key: required("AZURE_OPENAI_API_KEY")?,
            azure_speech_endpoint: lookup("AZURE_OPENAI_ENDPOINT_SPEECH")
                .filter(|value| !value.trim().is_empty()),
        })
    }
}
