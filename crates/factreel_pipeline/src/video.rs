//! Video assembly stage.

use chrono::{DateTime, Local};
use factreel_core::{AudioAsset, EncodePlan, ImageAsset, StillClip, VideoArtifact};
use factreel_error::{FactreelResult, PipelineError, PipelineErrorKind};
use factreel_interface::VideoEncoder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Split `total` seconds evenly across `count` images.
///
/// # Errors
///
/// - `PipelineErrorKind::NoImages` if `count` is zero
/// - `PipelineErrorKind::InvalidDuration` if `total` is not a positive finite number
///
/// # Examples
///
/// ```
/// use factreel_pipeline::clip_durations;
///
/// let clips = clip_durations(12.0, 3).unwrap();
/// assert_eq!(clips, vec![4.0, 4.0, 4.0]);
/// ```
pub fn clip_durations(total: f64, count: usize) -> FactreelResult<Vec<f64>> {
    if count == 0 {
        return Err(PipelineError::new(PipelineErrorKind::NoImages).into());
    }
    if !total.is_finite() || total <= 0.0 {
        return Err(PipelineError::new(PipelineErrorKind::InvalidDuration(total)).into());
    }
    let per_image = total / count as f64;
    Ok(vec![per_image; count])
}

/// Name of the final video for a run assembled at `created_at`.
pub fn video_file_name(created_at: &DateTime<Local>) -> String {
    format!("output_video_{}.mp4", created_at.format("%Y%m%d_%H%M%S"))
}

/// Combines the images and narration into the final video.
#[derive(Clone)]
pub struct VideoAssembler {
    encoder: Arc<dyn VideoEncoder>,
    output_dir: PathBuf,
    fps: u32,
    audio_codec: String,
}

impl VideoAssembler {
    /// Create an assembler writing into `output_dir`.
    pub fn new(
        encoder: Arc<dyn VideoEncoder>,
        output_dir: impl Into<PathBuf>,
        fps: u32,
        audio_codec: impl Into<String>,
    ) -> Self {
        Self {
            encoder,
            output_dir: output_dir.into(),
            fps,
            audio_codec: audio_codec.into(),
        }
    }

    /// Directory receiving finished videos.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Encoder input for `images` shown in order over `audio`.
    ///
    /// # Errors
    ///
    /// Fails without touching the encoder when there are no images or the
    /// audio duration is unusable.
    pub fn plan(
        &self,
        images: &[ImageAsset],
        audio: &AudioAsset,
        created_at: &DateTime<Local>,
    ) -> FactreelResult<EncodePlan> {
        let durations = clip_durations(audio.duration, images.len())?;
        let clips = images
            .iter()
            .zip(durations)
            .map(|(image, duration)| StillClip {
                path: image.path.clone(),
                duration,
            })
            .collect();

        Ok(EncodePlan {
            clips,
            audio: audio.path.clone(),
            fps: self.fps,
            audio_codec: self.audio_codec.clone(),
            output: self.output_dir.join(video_file_name(created_at)),
        })
    }

    /// Encode the video.
    ///
    /// # Errors
    ///
    /// Validation errors from [`VideoAssembler::plan`] and encoder errors.
    #[instrument(skip_all, fields(images = images.len(), duration = audio.duration, encoder = self.encoder.encoder_name()))]
    pub async fn assemble(
        &self,
        images: &[ImageAsset],
        audio: &AudioAsset,
    ) -> FactreelResult<VideoArtifact> {
        let created_at = Local::now();
        let plan = self.plan(images, audio, &created_at)?;

        self.encoder.encode(&plan).await?;

        info!(path = %plan.output.display(), "Video assembled");
        Ok(VideoArtifact {
            path: plan.output,
            created_at,
        })
    }
}

impl std::fmt::Debug for VideoAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoAssembler")
            .field("encoder", &self.encoder.encoder_name())
            .field("output_dir", &self.output_dir)
            .field("fps", &self.fps)
            .field("audio_codec", &self.audio_codec)
            .finish()
    }
}
