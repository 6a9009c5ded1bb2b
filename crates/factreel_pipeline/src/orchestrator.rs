//! Sequences the stages of one run.

use crate::{
    FactProvider, ImageGenerator, PipelineSettings, ScriptGenerator, SpeechSynthesizer,
    VideoAssembler,
};
use factreel_core::PipelineOutput;
use factreel_error::{FactreelResult, PipelineError, PipelineErrorKind};
use factreel_interface::{
    CompletionService, FactSource, ImageService, MediaProbe, SpeechService, VideoEncoder,
};
use factreel_rate_limit::BackoffPolicy;
use factreel_storage::{FileSystemStorage, new_run_id};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The external capabilities a pipeline runs against.
#[derive(Clone)]
pub struct PipelineServices {
    /// Seed fact source
    pub facts: Arc<dyn FactSource>,
    /// Structured-output language model
    pub completion: Arc<dyn CompletionService>,
    /// Image synthesis
    pub images: Arc<dyn ImageService>,
    /// Speech synthesis
    pub speech: Arc<dyn SpeechService>,
    /// Audio duration probe
    pub probe: Arc<dyn MediaProbe>,
    /// Video encoder
    pub encoder: Arc<dyn VideoEncoder>,
}

/// Produces a narrated video from a fact.
///
/// Stages run strictly in order: fact, script, images, narration, video.
/// The first failing stage aborts the run and no later stage is invoked.
///
/// # Example
///
/// ```rust,ignore
/// use factreel_pipeline::{Pipeline, PipelineServices, PipelineSettings};
/// use factreel_rate_limit::BackoffPolicy;
///
/// let pipeline = Pipeline::new(services, &PipelineSettings::default(), BackoffPolicy::default())?;
/// let output = pipeline.run().await?;
/// println!("{} {}", output.video_path().display(), output.caption);
/// ```
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct Pipeline {
    fact_provider: FactProvider,
    script_generator: ScriptGenerator,
    image_generator: ImageGenerator,
    speech_synthesizer: SpeechSynthesizer,
    video_assembler: VideoAssembler,
    output_dir: PathBuf,
    keep_intermediates: bool,
}

impl Pipeline {
    /// Wire the stages to `services`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `settings` or `policy` is invalid.
    pub fn new(
        services: PipelineServices,
        settings: &PipelineSettings,
        policy: BackoffPolicy,
    ) -> FactreelResult<Self> {
        settings.validate()?;
        policy.validate()?;

        Ok(Self {
            fact_provider: FactProvider::new(services.facts),
            script_generator: ScriptGenerator::new(services.completion, settings.prompt_count),
            image_generator: ImageGenerator::new(services.images, settings.image_size),
            speech_synthesizer: SpeechSynthesizer::new(
                services.speech,
                services.probe,
                policy,
                settings.voice.as_str(),
                settings.speech_model.as_str(),
            ),
            video_assembler: VideoAssembler::new(
                services.encoder,
                settings.output_dir.clone(),
                settings.fps,
                settings.audio_codec.as_str(),
            ),
            output_dir: settings.output_dir.clone(),
            keep_intermediates: settings.keep_intermediates,
        })
    }

    /// Fetch a fact and turn it into a video.
    ///
    /// # Errors
    ///
    /// The first stage failure, unchanged.
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn run(&self) -> FactreelResult<PipelineOutput> {
        let run_id = new_run_id();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!("Starting pipeline run");

        let fact = self.fact_provider.fetch().await?;
        self.produce(run_id, fact.as_str()).await
    }

    /// Turn a caller-supplied topic into a video, skipping the fact stage.
    ///
    /// # Errors
    ///
    /// `PipelineErrorKind::EmptyFact` for a blank topic, otherwise the first
    /// stage failure.
    #[instrument(skip(self, topic), fields(run_id = tracing::field::Empty))]
    pub async fn run_with_topic(&self, topic: &str) -> FactreelResult<PipelineOutput> {
        if topic.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyFact).into());
        }
        let run_id = new_run_id();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!(topic = %topic, "Starting pipeline run with topic");

        self.produce(run_id, topic).await
    }

    async fn produce(&self, run_id: String, topic: &str) -> FactreelResult<PipelineOutput> {
        let bundle = self.script_generator.generate(topic).await?;

        let storage = FileSystemStorage::for_run(&self.output_dir, &run_id)?;
        let images = self
            .image_generator
            .generate(&bundle.prompts, &storage)
            .await?;
        let audio = self
            .speech_synthesizer
            .synthesize(&bundle.script, &storage)
            .await?;
        let video = self.video_assembler.assemble(&images, &audio).await?;

        if !self.keep_intermediates {
            if let Err(e) = storage.purge().await {
                warn!(error = %e, "Failed to remove run directory");
            }
        }

        info!(video = %video.path.display(), "Pipeline run complete");
        Ok(PipelineOutput {
            run_id,
            video,
            caption: bundle.caption,
        })
    }
}
