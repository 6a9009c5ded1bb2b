//! VideoAssembler planning and encoder hand-off.

mod test_utils;

use factreel_core::{AudioAsset, ImageAsset};
use factreel_error::{FactreelErrorKind, MediaErrorKind, PipelineErrorKind};
use factreel_pipeline::VideoAssembler;
use std::path::PathBuf;
use std::sync::Arc;
use test_utils::MockEncoder;

fn images(n: usize) -> Vec<ImageAsset> {
    (0..n)
        .map(|index| ImageAsset {
            path: PathBuf::from(format!("/run/image_{}.png", index + 1)),
            index,
            revised: false,
            prompt: format!("prompt {}", index + 1),
        })
        .collect()
}

fn audio(duration: f64) -> AudioAsset {
    AudioAsset {
        path: PathBuf::from("/run/narration.mp3"),
        duration,
    }
}

#[tokio::test]
async fn test_zero_images_fails_before_encoding() {
    let encoder = Arc::new(MockEncoder::new());
    let assembler = VideoAssembler::new(encoder.clone(), "/out", 24, "aac");

    let err = assembler.assemble(&[], &audio(10.0)).await.unwrap_err();

    assert_eq!(
        err.as_pipeline().map(|p| &p.kind),
        Some(&PipelineErrorKind::NoImages)
    );
    assert_eq!(encoder.call_count(), 0);
}

#[tokio::test]
async fn test_bad_duration_fails_before_encoding() {
    let encoder = Arc::new(MockEncoder::new());
    let assembler = VideoAssembler::new(encoder.clone(), "/out", 24, "aac");

    for duration in [0.0, -3.0, f64::NAN] {
        let err = assembler
            .assemble(&images(3), &audio(duration))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_pipeline().map(|p| &p.kind),
            Some(PipelineErrorKind::InvalidDuration(_))
        ));
    }
    assert_eq!(encoder.call_count(), 0);
}

#[tokio::test]
async fn test_plan_splits_duration_evenly() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let encoder = Arc::new(MockEncoder::new());
    let assembler = VideoAssembler::new(encoder.clone(), dir.path(), 24, "aac");

    let video = assembler.assemble(&images(3), &audio(13.5)).await?;

    let plans = encoder.plans();
    assert_eq!(plans.len(), 1);
    let plan = &plans[0];
    assert_eq!(plan.fps, 24);
    assert_eq!(plan.audio_codec, "aac");
    assert_eq!(plan.audio, PathBuf::from("/run/narration.mp3"));
    assert_eq!(plan.clips.len(), 3);
    for (position, clip) in plan.clips.iter().enumerate() {
        assert_eq!(clip.path, PathBuf::from(format!("/run/image_{}.png", position + 1)));
        assert!((clip.duration - 4.5).abs() < 1e-9);
    }
    assert!((plan.total_duration() - 13.5).abs() < 1e-9);

    assert_eq!(video.path, plan.output);
    assert_eq!(video.path.parent(), Some(dir.path()));
    let expected = format!(
        "output_video_{}.mp4",
        video.created_at.format("%Y%m%d_%H%M%S")
    );
    assert_eq!(
        video.path.file_name().and_then(|f| f.to_str()),
        Some(expected.as_str())
    );
    Ok(())
}

#[tokio::test]
async fn test_encoder_failure_propagates() {
    let encoder = Arc::new(MockEncoder::new_failing(MediaErrorKind::Encode {
        code: Some(1),
        stderr: "Invalid data found when processing input".to_string(),
    }));
    let assembler = VideoAssembler::new(encoder.clone(), "/out", 24, "aac");

    let err = assembler
        .assemble(&images(2), &audio(8.0))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FactreelErrorKind::Media(_)));
}
