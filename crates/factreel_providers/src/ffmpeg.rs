//! ffprobe duration probing and ffmpeg slideshow encoding.

use async_trait::async_trait;
use factreel_core::EncodePlan;
use factreel_error::{FactreelResult, MediaError, MediaErrorKind};
use factreel_interface::{MediaProbe, VideoEncoder};
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

use crate::FfmpegSettings;

/// Probing reads only the container header, so it should finish quickly.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Arguments for `ffprobe` to print a file's duration in seconds.
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(path.as_os_str().to_owned());
    args
}

/// Parse the duration printed by `ffprobe` with [`probe_args`].
///
/// # Errors
///
/// Returns `MediaErrorKind::Probe` unless the output is a finite, positive
/// number.
pub fn parse_probe_output(stdout: &str) -> FactreelResult<f64> {
    let trimmed = stdout.trim();
    let duration: f64 = trimmed.parse().map_err(|_| {
        MediaError::new(MediaErrorKind::Probe(format!(
            "Failed to parse duration from ffprobe output: {:?}",
            trimmed
        )))
    })?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::new(MediaErrorKind::Probe(format!(
            "ffprobe reported unusable duration {}",
            duration
        )))
        .into());
    }
    Ok(duration)
}

/// Clip length for `-t`, rounded up to the millisecond.
///
/// Rounding up keeps the concatenated video at least as long as the
/// narration; `-shortest` then ends the output with the audio.
fn format_clip_seconds(duration: f64) -> String {
    format!("{:.3}", (duration * 1000.0).ceil() / 1000.0)
}

/// Arguments for `ffmpeg` to render `plan` as a slideshow over the narration.
///
/// Each still is looped for its clip duration, normalised to the target frame
/// rate, concatenated in order and muxed with the audio track. The output
/// ends with the audio track.
pub fn encode_args(plan: &EncodePlan, video_codec: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-hide_banner".into()];

    for clip in &plan.clips {
        args.push("-loop".into());
        args.push("1".into());
        args.push("-t".into());
        args.push(format_clip_seconds(clip.duration).into());
        args.push("-i".into());
        args.push(clip.path.as_os_str().to_owned());
    }

    args.push("-i".into());
    args.push(plan.audio.as_os_str().to_owned());

    let clip_count = plan.clips.len();
    let mut filter = String::new();
    for index in 0..clip_count {
        filter.push_str(&format!(
            "[{index}:v]setsar=1,fps={fps},format=yuv420p[v{index}];",
            fps = plan.fps
        ));
    }
    for index in 0..clip_count {
        filter.push_str(&format!("[v{index}]"));
    }
    filter.push_str(&format!("concat=n={clip_count}:v=1:a=0[v]"));

    args.push("-filter_complex".into());
    args.push(filter.into());
    args.push("-map".into());
    args.push("[v]".into());
    args.push("-map".into());
    args.push(format!("{clip_count}:a").into());
    args.push("-r".into());
    args.push(plan.fps.to_string().into());
    args.push("-c:v".into());
    args.push(video_codec.into());
    args.push("-pix_fmt".into());
    args.push("yuv420p".into());
    args.push("-c:a".into());
    args.push(plan.audio_codec.as_str().into());
    args.push("-shortest".into());
    args.push(plan.output.as_os_str().to_owned());
    args
}

/// Runs the ffmpeg and ffprobe binaries.
#[derive(Debug, Clone, Default)]
pub struct FfmpegToolkit {
    settings: FfmpegSettings,
}

impl FfmpegToolkit {
    /// Creates a toolkit using the configured binaries.
    pub fn new(settings: FfmpegSettings) -> Self {
        Self { settings }
    }

    fn spawn_error(tool: &str, err: std::io::Error) -> MediaError {
        error!(tool, error = %err, "Failed to launch media tool");
        MediaError::new(MediaErrorKind::Spawn {
            tool: tool.to_string(),
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl MediaProbe for FfmpegToolkit {
    #[instrument(skip(self))]
    async fn duration_seconds(&self, path: &Path) -> FactreelResult<f64> {
        let output = tokio::time::timeout(
            PROBE_TIMEOUT,
            Command::new(&self.settings.ffprobe)
                .kill_on_drop(true)
                .args(probe_args(path))
                .output(),
        )
        .await
        .map_err(|_| {
            MediaError::new(MediaErrorKind::Probe(format!(
                "ffprobe timed out after {:?}",
                PROBE_TIMEOUT
            )))
        })?
        .map_err(|e| Self::spawn_error(&self.settings.ffprobe, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(status = ?output.status, stderr = %stderr, "ffprobe failed");
            return Err(MediaError::new(MediaErrorKind::Probe(stderr)).into());
        }

        let duration = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
        debug!(duration, "Probed media duration");
        Ok(duration)
    }
}

#[async_trait]
impl VideoEncoder for FfmpegToolkit {
    #[instrument(skip(self, plan), fields(clips = plan.clips.len(), output = %plan.output.display()))]
    async fn encode(&self, plan: &EncodePlan) -> FactreelResult<()> {
        info!(
            duration = plan.total_duration(),
            fps = plan.fps,
            "Encoding video"
        );

        let output = Command::new(&self.settings.ffmpeg)
            .kill_on_drop(true)
            .args(encode_args(plan, &self.settings.video_codec))
            .output()
            .await
            .map_err(|e| Self::spawn_error(&self.settings.ffmpeg, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(code = ?output.status.code(), stderr = %stderr, "ffmpeg failed");
            return Err(MediaError::new(MediaErrorKind::Encode {
                code: output.status.code(),
                stderr,
            })
            .into());
        }

        info!("Video encoded");
        Ok(())
    }

    fn encoder_name(&self) -> &'static str {
        "ffmpeg"
    }
}
