//! Request types for external services.

use serde::{Deserialize, Serialize};

/// Structured-output completion request.
///
/// # Examples
///
/// ```
/// use factreel_core::{CompletionRequest, ScriptBundle};
///
/// let request = CompletionRequest::builder()
///     .system("You are a scriptwriter")
///     .user("Write about octopuses")
///     .schema_name("script_bundle")
///     .schema(ScriptBundle::json_schema(3))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.schema_name(), "script_bundle");
/// assert!(request.model().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// System instruction
    system: String,
    /// User request
    user: String,
    /// Name of the response schema
    schema_name: String,
    /// JSON schema the response must satisfy
    schema: serde_json::Value,
    /// Model override; the service default applies when unset
    #[builder(default, setter(into, strip_option))]
    model: Option<String>,
}

impl CompletionRequest {
    /// Creates a new builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// Output dimensions accepted by the image service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum ImageSize {
    /// 1024x1024
    #[serde(rename = "1024x1024")]
    #[strum(serialize = "1024x1024")]
    Square,
    /// 1024x1792, vertical short-video format
    #[default]
    #[serde(rename = "1024x1792")]
    #[strum(serialize = "1024x1792")]
    Portrait,
    /// 1792x1024
    #[serde(rename = "1792x1024")]
    #[strum(serialize = "1792x1024")]
    Landscape,
}

/// Image synthesis request body.
///
/// # Examples
///
/// ```
/// use factreel_core::{ImageRequest, ImageSize};
///
/// let request = ImageRequest::builder().prompt("A reef at dawn").build().unwrap();
/// assert_eq!(*request.count(), 1);
/// assert_eq!(*request.size(), ImageSize::Portrait);
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["n"], 1);
/// assert_eq!(body["size"], "1024x1792");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Text prompt
    prompt: String,
    /// Number of images to generate
    #[serde(rename = "n")]
    #[builder(default = "1")]
    count: u32,
    /// Output dimensions
    #[builder(default)]
    size: ImageSize,
}

impl ImageRequest {
    /// Creates a new builder.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }

    /// Same parameters with a different prompt.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }
}

/// A successfully generated image, not yet downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Where the image can be fetched
    pub url: String,
    /// Prompt the provider actually rendered, when reported
    pub revised_prompt: Option<String>,
}

/// Speech synthesis request body.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct SpeechRequest {
    /// Synthesis model or deployment name
    model: String,
    /// Text to speak
    input: String,
    /// Voice name
    voice: String,
}

impl SpeechRequest {
    /// Creates a new builder.
    pub fn builder() -> SpeechRequestBuilder {
        SpeechRequestBuilder::default()
    }
}
