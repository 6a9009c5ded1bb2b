//! Core data types for the factreel pipeline.
//!
//! This crate holds the entities that flow between pipeline stages
//! (fact → script bundle → image/audio assets → video artifact) and the
//! request types handed to external services.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod encode;
mod fact;
mod request;
mod script;

pub use asset::{AudioAsset, ImageAsset, PipelineOutput, VideoArtifact};
pub use encode::{EncodePlan, StillClip};
pub use fact::Fact;
pub use request::{
    CompletionRequest, CompletionRequestBuilder, CompletionRequestBuilderError, GeneratedImage,
    ImageRequest, ImageRequestBuilder, ImageRequestBuilderError, ImageSize, SpeechRequest,
    SpeechRequestBuilder, SpeechRequestBuilderError,
};
pub use script::{DEFAULT_PROMPT_COUNT, ScriptBundle};
