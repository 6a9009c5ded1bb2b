//! Capability traits for external services.

use async_trait::async_trait;
use factreel_core::{
    CompletionRequest, EncodePlan, Fact, GeneratedImage, ImageRequest, SpeechRequest,
};
use factreel_error::FactreelResult;
use std::path::Path;

/// Source of seed facts.
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Fetch one fact.
    ///
    /// Non-success responses surface as `ProviderErrorKind::Network`.
    async fn fetch_fact(&self) -> FactreelResult<Fact>;

    /// Provider name (e.g., "api-ninjas").
    fn provider_name(&self) -> &'static str;
}

/// Language-model completion with structured output.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run a completion and return the raw JSON document the model produced.
    ///
    /// Callers parse the document; a refusal surfaces as
    /// `ProviderErrorKind::Unhandled`.
    async fn complete(&self, request: &CompletionRequest) -> FactreelResult<String>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when the request does not override it.
    fn model_name(&self) -> &str;
}

/// Image synthesis.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Generate one image.
    ///
    /// A policy refusal surfaces as `ProviderErrorKind::ContentPolicyViolation`
    /// carrying the provider's revised prompt when one was supplied.
    async fn generate(&self, request: &ImageRequest) -> FactreelResult<GeneratedImage>;

    /// Download a generated image.
    async fn download(&self, image: &GeneratedImage) -> FactreelResult<Vec<u8>>;

    /// Provider name (e.g., "azure-openai").
    fn provider_name(&self) -> &'static str;
}

/// Text-to-speech synthesis.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesize speech, returning the encoded audio bytes.
    ///
    /// Quota exhaustion surfaces as `ProviderErrorKind::RateLimited`, any other
    /// non-success status as `ProviderErrorKind::Network`.
    async fn synthesize(&self, request: &SpeechRequest) -> FactreelResult<Vec<u8>>;

    /// Provider name (e.g., "azure-openai").
    fn provider_name(&self) -> &'static str;
}

/// Reads media metadata from local files.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Duration of an audio or video file in seconds.
    async fn duration_seconds(&self, path: &Path) -> FactreelResult<f64>;
}

/// Encodes still clips and an audio track into a video file.
#[async_trait]
pub trait VideoEncoder: Send + Sync {
    /// Encode `plan` into `plan.output`.
    async fn encode(&self, plan: &EncodePlan) -> FactreelResult<()>;

    /// Encoder name (e.g., "ffmpeg").
    fn encoder_name(&self) -> &'static str;
}
