//! Mock service implementations.

#![allow(dead_code)]

use async_trait::async_trait;
use factreel_core::{
    CompletionRequest, EncodePlan, Fact, GeneratedImage, ImageRequest, SpeechRequest,
};
use factreel_error::{
    FactreelError, FactreelResult, MediaError, MediaErrorKind, ProviderError, ProviderErrorKind,
};
use factreel_interface::{
    CompletionService, FactSource, ImageService, MediaProbe, SpeechService, VideoEncoder,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// A single mock response (success or provider error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success,
    Error(ProviderErrorKind),
}

fn provider_error(provider: &'static str, kind: ProviderErrorKind) -> FactreelError {
    FactreelError::from(ProviderError::with_provider(provider, kind))
}

/// Pick the response for call number `index` from a sequence.
fn sequence_response(
    provider: &'static str,
    responses: &[MockResponse],
    index: usize,
) -> FactreelResult<()> {
    match responses.get(index) {
        Some(MockResponse::Success) => Ok(()),
        Some(MockResponse::Error(kind)) => Err(provider_error(provider, kind.clone())),
        None => Err(provider_error(
            provider,
            ProviderErrorKind::Unhandled(format!(
                "Mock sequence exhausted (call {} beyond {} responses)",
                index + 1,
                responses.len()
            )),
        )),
    }
}

/// Mock fact source.
pub struct MockFactSource {
    result: Result<String, ProviderErrorKind>,
    call_count: Arc<Mutex<usize>>,
}

impl MockFactSource {
    pub fn new_success(fact: impl Into<String>) -> Self {
        Self {
            result: Ok(fact.into()),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self {
            result: Err(kind),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl FactSource for MockFactSource {
    async fn fetch_fact(&self) -> FactreelResult<Fact> {
        *self.call_count.lock().unwrap() += 1;
        match &self.result {
            Ok(fact) => Ok(Fact::new(fact.as_str())),
            Err(kind) => Err(provider_error("mock-facts", kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-facts"
    }
}

/// Mock completion service returning a fixed document.
pub struct MockCompletionService {
    result: Result<String, ProviderErrorKind>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionService {
    pub fn new_success(content: impl Into<String>) -> Self {
        Self {
            result: Ok(content.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new_error(kind: ProviderErrorKind) -> Self {
        Self {
            result: Err(kind),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(&self, request: &CompletionRequest) -> FactreelResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.result {
            Ok(content) => Ok(content.clone()),
            Err(kind) => Err(provider_error("mock-completion", kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-completion"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock image service.
///
/// Successful generations return a URL derived from the prompt, and
/// downloads return that URL's bytes, so tests can tell which prompt produced
/// a stored image.
pub struct MockImageService {
    responses: Option<Vec<MockResponse>>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
    downloads: Arc<Mutex<usize>>,
}

impl MockImageService {
    /// Every request succeeds.
    pub fn new_success() -> Self {
        Self {
            responses: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(0)),
        }
    }

    /// Responses in call order; calls past the end fail.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Some(responses),
            requests: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn download_count(&self) -> usize {
        *self.downloads.lock().unwrap()
    }

    /// Prompts in the order they were requested.
    pub fn requested_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt().clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn url_for(prompt: &str) -> String {
        format!("https://images.test/{}", prompt.replace(' ', "_"))
    }
}

#[async_trait]
impl ImageService for MockImageService {
    async fn generate(&self, request: &ImageRequest) -> FactreelResult<GeneratedImage> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        if let Some(responses) = &self.responses {
            sequence_response("mock-images", responses, index)?;
        }

        Ok(GeneratedImage {
            url: Self::url_for(request.prompt()),
            revised_prompt: None,
        })
    }

    async fn download(&self, image: &GeneratedImage) -> FactreelResult<Vec<u8>> {
        *self.downloads.lock().unwrap() += 1;
        Ok(image.url.clone().into_bytes())
    }

    fn provider_name(&self) -> &'static str {
        "mock-images"
    }
}

/// Bytes returned by a successful mock speech call.
pub const MOCK_AUDIO: &[u8] = b"ID3-mock-narration";

/// Mock speech service recording when each request arrived.
pub struct MockSpeechService {
    responses: Option<Vec<MockResponse>>,
    requests: Arc<Mutex<Vec<(Instant, SpeechRequest)>>>,
}

impl MockSpeechService {
    pub fn new_success() -> Self {
        Self {
            responses: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Some(responses),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always rate limited with the given hint.
    pub fn new_always_rate_limited(retry_after_secs: Option<u64>, calls: usize) -> Self {
        Self::new_sequence(vec![
            MockResponse::Error(ProviderErrorKind::RateLimited { retry_after_secs });
            calls
        ])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Time elapsed between consecutive requests.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        let requests = self.requests.lock().unwrap();
        requests
            .windows(2)
            .map(|pair| pair[1].0.duration_since(pair[0].0))
            .collect()
    }
}

#[async_trait]
impl SpeechService for MockSpeechService {
    async fn synthesize(&self, request: &SpeechRequest) -> FactreelResult<Vec<u8>> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((Instant::now(), request.clone()));
            requests.len() - 1
        };

        if let Some(responses) = &self.responses {
            sequence_response("mock-speech", responses, index)?;
        }
        Ok(MOCK_AUDIO.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "mock-speech"
    }
}

/// Mock probe reporting a fixed duration.
pub struct MockProbe {
    duration: f64,
    probed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockProbe {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            probed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaProbe for MockProbe {
    async fn duration_seconds(&self, path: &Path) -> FactreelResult<f64> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        Ok(self.duration)
    }
}

/// Mock encoder that records plans and writes a placeholder output file.
pub struct MockEncoder {
    failure: Option<MediaErrorKind>,
    plans: Arc<Mutex<Vec<EncodePlan>>>,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self {
            failure: None,
            plans: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new_failing(kind: MediaErrorKind) -> Self {
        Self {
            failure: Some(kind),
            plans: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.plans.lock().unwrap().len()
    }

    pub fn plans(&self) -> Vec<EncodePlan> {
        self.plans.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoEncoder for MockEncoder {
    async fn encode(&self, plan: &EncodePlan) -> FactreelResult<()> {
        self.plans.lock().unwrap().push(plan.clone());
        if let Some(kind) = &self.failure {
            return Err(MediaError::new(kind.clone()).into());
        }
        std::fs::write(&plan.output, b"mock-mp4").map_err(|e| {
            MediaError::new(MediaErrorKind::Encode {
                code: None,
                stderr: e.to_string(),
            })
        })?;
        Ok(())
    }

    fn encoder_name(&self) -> &'static str {
        "mock-encoder"
    }
}
