use factreel_core::{EncodePlan, StillClip};
use factreel_error::{FactreelErrorKind, MediaErrorKind, ProviderErrorKind};
use factreel_providers::{classify_image_error, encode_args, parse_fact_body};
use std::ffi::OsString;
use std::path::PathBuf;

#[test]
fn test_fact_body_takes_first_entry() {
    let fact = parse_fact_body(
        r#"[{"fact": "Octopuses have three hearts."}, {"fact": "Second"}]"#,
    )
    .unwrap();
    assert_eq!(fact.as_str(), "Octopuses have three hearts.");
}

#[test]
fn test_fact_body_empty_list_is_schema_error() {
    let err = parse_fact_body("[]").unwrap_err();
    let provider = err.as_provider().expect("provider error");
    assert_eq!(provider.provider, "api-ninjas");
    assert!(matches!(provider.kind, ProviderErrorKind::SchemaValidation(_)));
}

#[test]
fn test_fact_body_wrong_shape_is_schema_error() {
    let err = parse_fact_body(r#"{"fact": "not a list"}"#).unwrap_err();
    assert!(matches!(
        err.as_provider().map(|p| &p.kind),
        Some(ProviderErrorKind::SchemaValidation(_))
    ));
}

#[test]
fn test_content_policy_with_revised_prompt() {
    let body = r#"{
        "error": {
            "code": "content_policy_violation",
            "message": "Your request was rejected as a result of our safety system.",
            "inner_error": {
                "code": "ResponsibleAIPolicyViolation",
                "revised_prompt": "A cartoon octopus waving"
            }
        }
    }"#;

    match classify_image_error(400, body) {
        ProviderErrorKind::ContentPolicyViolation {
            message,
            revised_prompt,
        } => {
            assert!(message.contains("safety system"));
            assert_eq!(revised_prompt.as_deref(), Some("A cartoon octopus waving"));
        }
        other => panic!("expected content policy violation, got {other:?}"),
    }
}

#[test]
fn test_content_policy_without_revised_prompt() {
    let body = r#"{"code": "content_policy_violation", "message": "Rejected"}"#;
    let kind = classify_image_error(400, body);
    assert!(matches!(
        kind,
        ProviderErrorKind::ContentPolicyViolation {
            revised_prompt: None,
            ..
        }
    ));
}

#[test]
fn test_other_bad_request_is_unhandled() {
    let body = r#"{"error": {"code": "invalid_size", "message": "Bad size"}}"#;
    match classify_image_error(400, body) {
        ProviderErrorKind::Unhandled(message) => assert!(message.starts_with("HTTP 400")),
        other => panic!("expected unhandled, got {other:?}"),
    }
}

#[test]
fn test_image_rate_limit() {
    assert!(classify_image_error(429, "Too Many Requests").is_rate_limited());
}

#[test]
fn test_encode_args_layout() {
    let plan = EncodePlan {
        clips: (1..=3)
            .map(|i| StillClip {
                path: PathBuf::from(format!("/run/image_{i}.png")),
                duration: 4.0,
            })
            .collect(),
        audio: PathBuf::from("/run/narration.mp3"),
        fps: 24,
        audio_codec: "aac".to_string(),
        output: PathBuf::from("/out/output_video.mp4"),
    };

    let args: Vec<String> = encode_args(&plan, "libx264")
        .into_iter()
        .map(|a: OsString| a.to_string_lossy().into_owned())
        .collect();

    let inputs: Vec<&str> = args
        .windows(2)
        .filter(|pair| pair[0] == "-i")
        .map(|pair| pair[1].as_str())
        .collect();
    assert_eq!(
        inputs,
        [
            "/run/image_1.png",
            "/run/image_2.png",
            "/run/image_3.png",
            "/run/narration.mp3"
        ]
    );

    let durations = args
        .windows(2)
        .filter(|pair| pair[0] == "-t")
        .map(|pair| pair[1].as_str())
        .collect::<Vec<_>>();
    assert_eq!(durations, ["4.000", "4.000", "4.000"]);

    let filter_pos = args.iter().position(|a| a == "-filter_complex").unwrap();
    assert!(args[filter_pos + 1].ends_with("[v0][v1][v2]concat=n=3:v=1:a=0[v]"));
    assert!(args.windows(2).any(|p| p[0] == "-map" && p[1] == "3:a"));
    assert!(args.windows(2).any(|p| p[0] == "-c:a" && p[1] == "aac"));
    assert!(args.windows(2).any(|p| p[0] == "-r" && p[1] == "24"));
    assert_eq!(args[args.len() - 2], "-shortest");
    assert_eq!(args.last().unwrap(), "/out/output_video.mp4");
}

#[test]
fn test_encoded_clips_cover_the_narration() {
    let narration = 10.0;
    let plan = EncodePlan {
        clips: (1..=3)
            .map(|i| StillClip {
                path: PathBuf::from(format!("/run/image_{i}.png")),
                duration: narration / 3.0,
            })
            .collect(),
        audio: PathBuf::from("/run/narration.mp3"),
        fps: 24,
        audio_codec: "aac".to_string(),
        output: PathBuf::from("/out/output_video.mp4"),
    };

    let args: Vec<String> = encode_args(&plan, "libx264")
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let encoded: f64 = args
        .windows(2)
        .filter(|pair| pair[0] == "-t")
        .map(|pair| pair[1].parse::<f64>().unwrap())
        .sum();
    assert!(encoded >= narration);
    assert!(encoded - narration < 0.003 + 1e-9);
    assert!(args.iter().any(|a| a == "-shortest"));
}

#[tokio::test]
async fn test_missing_ffprobe_binary_is_spawn_error() {
    use factreel_interface::MediaProbe;
    use factreel_providers::{FfmpegSettings, FfmpegToolkit};

    let toolkit = FfmpegToolkit::new(FfmpegSettings {
        ffprobe: "factreel-no-such-ffprobe".to_string(),
        ..FfmpegSettings::default()
    });

    let err = toolkit
        .duration_seconds(std::path::Path::new("narration.mp3"))
        .await
        .unwrap_err();
    match err.kind() {
        FactreelErrorKind::Media(media) => {
            assert!(matches!(media.kind, MediaErrorKind::Spawn { .. }))
        }
        other => panic!("expected media error, got {other}"),
    }
}
