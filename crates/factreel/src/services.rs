//! Wiring of concrete providers into a pipeline.

use crate::FactreelConfig;
use factreel_error::{ConfigError, FactreelResult};
use factreel_pipeline::{Pipeline, PipelineServices};
use factreel_providers::{
    ApiNinjasFactSource, AzureImageClient, AzureSpeechClient, Credentials, FfmpegToolkit,
    OpenAiCompletionClient,
};
use factreel_rate_limit::BackoffPolicy;
use std::sync::Arc;
use tracing::debug;

/// Speech endpoint: configuration first, then `AZURE_OPENAI_ENDPOINT_SPEECH`.
///
/// # Errors
///
/// Returns a configuration error if neither is set.
pub fn speech_endpoint(config: &FactreelConfig, credentials: &Credentials) -> FactreelResult<String> {
    config
        .providers
        .speech
        .endpoint
        .clone()
        .filter(|endpoint| !endpoint.trim().is_empty())
        .or_else(|| credentials.azure_speech_endpoint.clone())
        .ok_or_else(|| {
            ConfigError::new(
                "Speech endpoint not configured: set providers.speech.endpoint or AZURE_OPENAI_ENDPOINT_SPEECH",
            )
            .into()
        })
}

/// Build the production adapters.
///
/// # Errors
///
/// Returns a configuration error if an endpoint is missing.
pub fn build_services(
    config: &FactreelConfig,
    credentials: &Credentials,
) -> FactreelResult<PipelineServices> {
    let providers = &config.providers;

    if providers.images.endpoint.trim().is_empty() {
        return Err(ConfigError::new("providers.images.endpoint must be set").into());
    }
    let speech_endpoint = speech_endpoint(config, credentials)?;

    debug!(
        completion_model = %providers.completion.model,
        image_deployment = %providers.images.deployment,
        "Building provider adapters"
    );

    let toolkit = Arc::new(FfmpegToolkit::new(providers.ffmpeg.clone()));

    Ok(PipelineServices {
        facts: Arc::new(ApiNinjasFactSource::new(
            credentials.api_ninjas_key.as_str(),
            providers.facts.url.as_str(),
        )),
        completion: Arc::new(OpenAiCompletionClient::new(
            credentials.openai_api_key.as_str(),
            providers.completion.url.as_str(),
            providers.completion.model.as_str(),
        )),
        images: Arc::new(AzureImageClient::new(
            credentials.azure_openai_api_key.as_str(),
            providers.images.generation_url(),
        )),
        speech: Arc::new(AzureSpeechClient::new(
            credentials.azure_openai_api_key.as_str(),
            speech_endpoint,
        )),
        probe: toolkit.clone(),
        encoder: toolkit,
    })
}

/// Build a pipeline against the production adapters.
///
/// # Errors
///
/// Configuration errors from [`build_services`] and [`Pipeline::new`].
pub fn build_pipeline(
    config: &FactreelConfig,
    credentials: &Credentials,
    policy: BackoffPolicy,
) -> FactreelResult<Pipeline> {
    let services = build_services(config, credentials)?;
    Pipeline::new(services, &config.pipeline, policy)
}
