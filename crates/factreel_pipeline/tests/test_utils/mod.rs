//! Test utilities for pipeline tests.
//!
//! Mock implementations of every capability trait plus helpers to wire them
//! into a [`Pipeline`](factreel_pipeline::Pipeline).

pub mod mock_services;

#[allow(unused_imports)]
pub use mock_services::{
    MockCompletionService, MockEncoder, MockFactSource, MockImageService, MockProbe,
    MockResponse, MockSpeechService,
};

use factreel_pipeline::PipelineServices;
use std::sync::Arc;

/// Completion document for the octopus fact.
#[allow(dead_code)]
pub const OCTOPUS_BUNDLE: &str = r#"{
    "script": "Did you know octopuses have three hearts? Two pump blood to the gills and one to the rest of the body.",
    "caption": "🐙 Fact!",
    "prompts": [
        "An octopus gliding over a coral reef",
        "A cutaway illustration of three glowing hearts",
        "An octopus waving goodbye in blue water"
    ]
}"#;

/// All mocks for one pipeline, kept so tests can inspect them afterwards.
#[allow(dead_code)]
pub struct MockStack {
    pub facts: Arc<MockFactSource>,
    pub completion: Arc<MockCompletionService>,
    pub images: Arc<MockImageService>,
    pub speech: Arc<MockSpeechService>,
    pub probe: Arc<MockProbe>,
    pub encoder: Arc<MockEncoder>,
}

#[allow(dead_code)]
impl MockStack {
    /// Every service succeeds; the narration is 12 seconds long.
    pub fn happy() -> Self {
        Self {
            facts: Arc::new(MockFactSource::new_success("Octopuses have three hearts.")),
            completion: Arc::new(MockCompletionService::new_success(OCTOPUS_BUNDLE)),
            images: Arc::new(MockImageService::new_success()),
            speech: Arc::new(MockSpeechService::new_success()),
            probe: Arc::new(MockProbe::new(12.0)),
            encoder: Arc::new(MockEncoder::new()),
        }
    }

    /// Trait-object handles for [`Pipeline::new`](factreel_pipeline::Pipeline::new).
    pub fn services(&self) -> PipelineServices {
        PipelineServices {
            facts: self.facts.clone(),
            completion: self.completion.clone(),
            images: self.images.clone(),
            speech: self.speech.clone(),
            probe: self.probe.clone(),
            encoder: self.encoder.clone(),
        }
    }
}
