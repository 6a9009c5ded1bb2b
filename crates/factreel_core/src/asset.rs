//! Assets produced by pipeline stages.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One generated image, persisted to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Location of the image file
    pub path: PathBuf,
    /// Position of the originating prompt (0-based)
    pub index: usize,
    /// True when produced from a provider-suggested replacement prompt
    pub revised: bool,
    /// Prompt text actually sent for the successful request
    pub prompt: String,
}

/// Narration audio, persisted to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAsset {
    /// Location of the audio file
    pub path: PathBuf,
    /// Duration in seconds
    pub duration: f64,
}

/// The finished video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoArtifact {
    /// Location of the encoded video
    pub path: PathBuf,
    /// Time the assembly started, also embedded in the filename
    pub created_at: DateTime<Local>,
}

/// What a completed run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Identifier of the run (names its intermediate directory)
    pub run_id: String,
    /// The encoded video
    pub video: VideoArtifact,
    /// Caption to post with the video
    pub caption: String,
}

impl PipelineOutput {
    /// Path of the encoded video.
    pub fn video_path(&self) -> &std::path::Path {
        &self.video.path
    }
}
