//! Trait definitions for the external capabilities the pipeline consumes.
//!
//! Each pipeline stage receives its collaborator as one of these traits, so
//! providers are swappable and stages are testable against in-memory fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{
    CompletionService, FactSource, ImageService, MediaProbe, SpeechService, VideoEncoder,
};
