//! Narration stage.

use factreel_core::{AudioAsset, SpeechRequest};
use factreel_error::{
    ConfigError, FactreelError, FactreelResult, PipelineError, PipelineErrorKind,
    ProviderErrorKind,
};
use factreel_interface::{MediaProbe, SpeechService};
use factreel_rate_limit::BackoffPolicy;
use factreel_storage::{MediaMetadata, MediaStorage, MediaType};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// File name of the narration track inside the run directory.
pub const NARRATION_FILE_NAME: &str = "narration.mp3";

/// Synthesizes the narration, waiting out rate limits.
#[derive(Clone)]
pub struct SpeechSynthesizer {
    service: Arc<dyn SpeechService>,
    probe: Arc<dyn MediaProbe>,
    policy: BackoffPolicy,
    voice: String,
    model: String,
}

impl SpeechSynthesizer {
    /// Create a synthesizer.
    ///
    /// # Arguments
    ///
    /// * `service` - Speech backend
    /// * `probe` - Reads the duration of the stored narration
    /// * `policy` - Rate-limit waiting and attempt budget
    /// * `voice` - Voice name (e.g., "nova")
    /// * `model` - Speech model (e.g., "tts")
    pub fn new(
        service: Arc<dyn SpeechService>,
        probe: Arc<dyn MediaProbe>,
        policy: BackoffPolicy,
        voice: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            service,
            probe,
            policy,
            voice: voice.into(),
            model: model.into(),
        }
    }

    /// Backoff policy in effect.
    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Synthesize `text`, store it as the run's narration and probe its length.
    ///
    /// On a rate limit the identical request is resent after the provider's
    /// `Retry-After` interval (or the policy default) until it succeeds or the
    /// policy's attempt budget is spent.
    ///
    /// # Errors
    ///
    /// - `PipelineErrorKind::RateLimitExhausted` when every allowed attempt was rate limited
    /// - `PipelineErrorKind::SpeechSynthesisFailed` for any other non-success status
    /// - transport, storage and probe errors propagate unchanged
    #[instrument(skip_all, fields(voice = %self.voice, model = %self.model, chars = text.len()))]
    pub async fn synthesize(
        &self,
        text: &str,
        storage: &dyn MediaStorage,
    ) -> FactreelResult<AudioAsset> {
        let request = SpeechRequest::builder()
            .model(self.model.as_str())
            .input(text)
            .voice(self.voice.as_str())
            .build()
            .map_err(|e| {
                FactreelError::from(ConfigError::new(format!("Invalid speech request: {}", e)))
            })?;

        let audio = self.synthesize_with_backoff(&request).await?;

        let metadata = MediaMetadata::new(MediaType::Audio, NARRATION_FILE_NAME);
        let reference = storage.store(&audio, &metadata).await?;
        let duration = self.probe.duration_seconds(&reference.storage_path).await?;

        info!(
            path = %reference.storage_path.display(),
            size = reference.size_bytes,
            duration,
            "Narration saved"
        );
        Ok(AudioAsset {
            path: reference.storage_path,
            duration,
        })
    }

    async fn synthesize_with_backoff(&self, request: &SpeechRequest) -> FactreelResult<Vec<u8>> {
        let mut attempt: u32 = 1;
        loop {
            debug!(attempt, "Sending speech request");

            let err = match self.service.synthesize(request).await {
                Ok(audio) => return Ok(audio),
                Err(err) => err,
            };

            let kind = err.as_provider().map(|provider| provider.kind.clone());
            match kind {
                Some(kind @ ProviderErrorKind::RateLimited { .. }) => {
                    if !self.policy.allows_attempt(attempt.saturating_add(1)) {
                        error!(attempts = attempt, "Speech synthesis rate limit budget exhausted");
                        return Err(PipelineError::new(PipelineErrorKind::RateLimitExhausted {
                            attempts: attempt,
                        })
                        .into());
                    }

                    let delay = self.policy.delay_for(kind.retry_after());
                    warn!(
                        attempt,
                        delay_secs = delay.as_secs_f64(),
                        "Speech synthesis rate limited, waiting before retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
                Some(ProviderErrorKind::Network { status, body }) => {
                    error!(status, body = %body, "Speech synthesis failed");
                    return Err(PipelineError::new(PipelineErrorKind::SpeechSynthesisFailed {
                        status,
                        body,
                    })
                    .into());
                }
                _ => return Err(err),
            }
        }
    }
}

impl std::fmt::Debug for SpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesizer")
            .field("provider", &self.service.provider_name())
            .field("policy", &self.policy)
            .field("voice", &self.voice)
            .field("model", &self.model)
            .finish()
    }
}
