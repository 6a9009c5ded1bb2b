//! Script, caption and image prompt generation.

use factreel_core::{CompletionRequest, ScriptBundle};
use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
use factreel_interface::CompletionService;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Instruction given to the scriptwriting model.
pub const SYSTEM_PROMPT: &str = "You are a creative AI scriptwriter, your scripts only include what the narrator will say, no stage directions and always start with 'Did you know'";

/// Name of the structured-output schema.
pub const SCRIPT_SCHEMA_NAME: &str = "script_bundle";

/// User request for a script about `topic` with `prompt_count` image prompts.
pub fn user_prompt(topic: &str, prompt_count: usize) -> String {
    format!(
        "Create a 30 second script based on the following: {topic}. \
         The script should only include what the narrator will say in plain text. \
         As well return a caption for a video produced from the script and \
         {prompt_count} prompts that will be used to generate AI images, \
         ensure the prompts have high levels of detail and are relevant to the \
         script, the theme of the images should be consistent."
    )
}

/// Parse and validate the model's JSON document.
///
/// # Errors
///
/// Returns `ProviderErrorKind::SchemaValidation` if the document does not
/// have the bundle shape or carries the wrong number of prompts.
pub fn parse_script_bundle(content: &str, prompt_count: usize) -> FactreelResult<ScriptBundle> {
    let bundle: ScriptBundle = serde_json::from_str(content).map_err(|e| {
        ProviderError::new(ProviderErrorKind::SchemaValidation(format!(
            "Completion is not a script bundle: {}",
            e
        )))
    })?;

    bundle
        .validate(prompt_count)
        .map_err(|reason| ProviderError::new(ProviderErrorKind::SchemaValidation(reason)))?;

    Ok(bundle)
}

/// Turns a topic into a narration script, caption and image prompts.
#[derive(Clone)]
pub struct ScriptGenerator {
    service: Arc<dyn CompletionService>,
    prompt_count: usize,
}

impl ScriptGenerator {
    /// Create a generator asking for `prompt_count` image prompts.
    pub fn new(service: Arc<dyn CompletionService>, prompt_count: usize) -> Self {
        Self {
            service,
            prompt_count,
        }
    }

    /// Number of image prompts requested.
    pub fn prompt_count(&self) -> usize {
        self.prompt_count
    }

    /// The completion request sent for `topic`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the request cannot be built.
    pub fn request_for(&self, topic: &str) -> FactreelResult<CompletionRequest> {
        CompletionRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(user_prompt(topic, self.prompt_count))
            .schema_name(SCRIPT_SCHEMA_NAME)
            .schema(ScriptBundle::json_schema(self.prompt_count))
            .build()
            .map_err(|e| {
                factreel_error::ConfigError::new(format!("Invalid completion request: {}", e))
                    .into()
            })
    }

    /// Generate the bundle for `topic`. No retry.
    ///
    /// # Errors
    ///
    /// Provider failures propagate; a malformed document is
    /// `ProviderErrorKind::SchemaValidation`.
    #[instrument(skip(self, topic), fields(model = self.service.model_name(), prompt_count = self.prompt_count))]
    pub async fn generate(&self, topic: &str) -> FactreelResult<ScriptBundle> {
        let request = self.request_for(topic)?;
        let content = self.service.complete(&request).await?;
        debug!(content_len = content.len(), "Received script document");

        let bundle = parse_script_bundle(&content, self.prompt_count).inspect_err(|e| {
            error!(error = %e, "Script document failed validation");
        })?;

        info!(
            script_len = bundle.script.len(),
            caption = %bundle.caption,
            "Generated script"
        );
        Ok(bundle)
    }
}

impl std::fmt::Debug for ScriptGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptGenerator")
            .field("provider", &self.service.provider_name())
            .field("model", &self.service.model_name())
            .field("prompt_count", &self.prompt_count)
            .finish()
    }
}
