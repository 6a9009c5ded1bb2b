//! Pipeline tunables.

use factreel_core::{DEFAULT_PROMPT_COUNT, ImageSize};
use factreel_error::{ConfigError, FactreelResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output shape and stage parameters for one pipeline.
///
/// # Example
///
/// ```toml
/// [pipeline]
/// prompt_count = 3
/// image_size = "1024x1792"
/// voice = "nova"
/// speech_model = "tts"
/// fps = 24
/// audio_codec = "aac"
/// output_dir = "./output"
/// keep_intermediates = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Number of image prompts, and therefore images, per video
    pub prompt_count: usize,
    /// Image dimensions
    pub image_size: ImageSize,
    /// Narration voice
    pub voice: String,
    /// Speech synthesis model or deployment
    pub speech_model: String,
    /// Output frame rate
    pub fps: u32,
    /// Audio codec for the final video
    pub audio_codec: String,
    /// Directory receiving final videos and the `runs/` tree
    pub output_dir: PathBuf,
    /// Keep the run directory after a successful run
    pub keep_intermediates: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            prompt_count: DEFAULT_PROMPT_COUNT,
            image_size: ImageSize::default(),
            voice: "nova".to_string(),
            speech_model: "tts".to_string(),
            fps: 24,
            audio_codec: "aac".to_string(),
            output_dir: PathBuf::from("./output"),
            keep_intermediates: true,
        }
    }
}

impl PipelineSettings {
    /// Rejects settings no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending field.
    pub fn validate(&self) -> FactreelResult<()> {
        if self.prompt_count == 0 {
            return Err(ConfigError::new("pipeline.prompt_count must be at least 1").into());
        }
        if self.fps == 0 {
            return Err(ConfigError::new("pipeline.fps must be at least 1").into());
        }
        if self.voice.trim().is_empty() {
            return Err(ConfigError::new("pipeline.voice must not be empty").into());
        }
        if self.speech_model.trim().is_empty() {
            return Err(ConfigError::new("pipeline.speech_model must not be empty").into());
        }
        Ok(())
    }
}
