//! Encoder input description.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A still image shown for a fixed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StillClip {
    /// Image file
    pub path: PathBuf,
    /// Display time in seconds
    pub duration: f64,
}

/// Everything an encoder needs to produce one video.
///
/// Clips are concatenated in order and the audio track is laid over the
/// result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodePlan {
    /// Still clips in display order
    pub clips: Vec<StillClip>,
    /// Narration audio file
    pub audio: PathBuf,
    /// Output frame rate
    pub fps: u32,
    /// Audio codec name (e.g. "aac")
    pub audio_codec: String,
    /// Destination file
    pub output: PathBuf,
}

impl EncodePlan {
    /// Total video length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(|clip| clip.duration).sum()
    }
}
