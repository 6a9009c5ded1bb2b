//! Fact-to-video generation pipeline.
//!
//! A run fetches a fact, has a language model turn it into a narration
//! script with a caption and image prompts, renders one image per prompt,
//! synthesizes the narration and encodes the images over the narration into
//! a video.
//!
//! # Architecture
//!
//! - [`FactProvider`] - seed fact
//! - [`ScriptGenerator`] - script, caption and image prompts
//! - [`ImageGenerator`] - one stored image per prompt, with content-policy recovery
//! - [`SpeechSynthesizer`] - stored narration, waiting out rate limits
//! - [`VideoAssembler`] - even split of narration time across images, encoding
//! - [`Pipeline`] - runs the stages in order
//!
//! Every external capability is injected as a trait object from
//! `factreel_interface`, so the stages run unchanged against real providers
//! or test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fact;
mod images;
mod orchestrator;
mod script;
mod settings;
mod speech;
mod video;

pub use fact::FactProvider;
pub use images::{ImageGenerator, image_file_name};
pub use orchestrator::{Pipeline, PipelineServices};
pub use script::{
    SCRIPT_SCHEMA_NAME, SYSTEM_PROMPT, ScriptGenerator, parse_script_bundle, user_prompt,
};
pub use settings::PipelineSettings;
pub use speech::{NARRATION_FILE_NAME, SpeechSynthesizer};
pub use video::{VideoAssembler, clip_durations, video_file_name};
