//! SpeechSynthesizer rate-limit handling.

mod test_utils;

use factreel_error::{PipelineErrorKind, ProviderErrorKind};
use factreel_pipeline::{NARRATION_FILE_NAME, SpeechSynthesizer};
use factreel_rate_limit::BackoffPolicy;
use factreel_storage::FileSystemStorage;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockProbe, MockResponse, MockSpeechService};

const NARRATION: &str = "Did you know octopuses have three hearts?";

fn rate_limited(secs: Option<u64>) -> MockResponse {
    MockResponse::Error(ProviderErrorKind::RateLimited {
        retry_after_secs: secs,
    })
}

fn synthesizer(service: Arc<MockSpeechService>, policy: BackoffPolicy) -> SpeechSynthesizer {
    SpeechSynthesizer::new(service, Arc::new(MockProbe::new(9.5)), policy, "nova", "tts")
}

#[tokio::test]
async fn test_success_stores_narration_and_probes_duration() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let service = Arc::new(MockSpeechService::new_success());
    let probe = Arc::new(MockProbe::new(9.5));
    let speech = SpeechSynthesizer::new(
        service.clone(),
        probe.clone(),
        BackoffPolicy::default(),
        "nova",
        "tts",
    );

    let audio = speech.synthesize(NARRATION, &storage).await?;

    assert_eq!(audio.duration, 9.5);
    assert!(audio.path.ends_with(NARRATION_FILE_NAME));
    assert_eq!(std::fs::read(&audio.path)?, test_utils::mock_services::MOCK_AUDIO);
    assert_eq!(probe.probed(), vec![audio.path.clone()]);

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].input(), NARRATION);
    assert_eq!(requests[0].voice(), "nova");
    assert_eq!(requests[0].model(), "tts");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_is_honoured_once() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let service = Arc::new(MockSpeechService::new_sequence(vec![
        rate_limited(Some(5)),
        MockResponse::Success,
    ]));

    synthesizer(service.clone(), BackoffPolicy::default())
        .synthesize(NARRATION, &storage)
        .await?;

    assert_eq!(service.call_count(), 2);
    assert_eq!(service.gaps(), vec![Duration::from_secs(5)]);
    let requests = service.requests();
    assert_eq!(requests[0], requests[1], "retry must resend the identical request");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_missing_hint_uses_policy_default() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let service = Arc::new(MockSpeechService::new_sequence(vec![
        rate_limited(None),
        MockResponse::Success,
    ]));

    synthesizer(service.clone(), BackoffPolicy::default())
        .synthesize(NARRATION, &storage)
        .await?;

    assert_eq!(service.gaps(), vec![Duration::from_secs(60)]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_policy_retries_until_success() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let mut responses = vec![rate_limited(Some(2)); 15];
    responses.push(MockResponse::Success);
    let service = Arc::new(MockSpeechService::new_sequence(responses));

    synthesizer(service.clone(), BackoffPolicy::unbounded())
        .synthesize(NARRATION, &storage)
        .await?;

    assert_eq!(service.call_count(), 16);
    assert!(service.gaps().iter().all(|gap| *gap == Duration::from_secs(2)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_attempt_budget_exhausted() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let service = Arc::new(MockSpeechService::new_always_rate_limited(Some(1), 10));
    let policy = BackoffPolicy::default().with_max_attempts(3);

    let err = synthesizer(service.clone(), policy)
        .synthesize(NARRATION, &storage)
        .await
        .unwrap_err();

    assert_eq!(
        err.as_pipeline().map(|p| &p.kind),
        Some(&PipelineErrorKind::RateLimitExhausted { attempts: 3 })
    );
    assert_eq!(service.call_count(), 3);
    assert_eq!(service.gaps().len(), 2);
    assert!(!dir.path().join(NARRATION_FILE_NAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_other_status_is_fatal() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let service = Arc::new(MockSpeechService::new_sequence(vec![MockResponse::Error(
        ProviderErrorKind::Network {
            status: 500,
            body: "upstream error".to_string(),
        },
    )]));

    let err = synthesizer(service.clone(), BackoffPolicy::default())
        .synthesize(NARRATION, &storage)
        .await
        .unwrap_err();

    assert_eq!(
        err.as_pipeline().map(|p| &p.kind),
        Some(&PipelineErrorKind::SpeechSynthesisFailed {
            status: 500,
            body: "upstream error".to_string(),
        })
    );
    assert_eq!(service.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unclassified_errors_propagate() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileSystemStorage::new(dir.path())?;
    let service = Arc::new(MockSpeechService::new_sequence(vec![MockResponse::Error(
        ProviderErrorKind::Unhandled("boom".to_string()),
    )]));

    let err = synthesizer(service.clone(), BackoffPolicy::default())
        .synthesize(NARRATION, &storage)
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_provider().map(|p| &p.kind),
        Some(ProviderErrorKind::Unhandled(_))
    ));
    Ok(())
}
