//! External service adapters for factreel.
//!
//! Each adapter implements one capability trait from `factreel_interface` and
//! translates provider responses into tagged `ProviderErrorKind` values. The
//! adapters hold no pipeline logic; retries and recovery live in
//! `factreel_pipeline`.
//!
//! # Available Adapters
//!
//! - [`ApiNinjasFactSource`] - seed facts from API Ninjas
//! - [`OpenAiCompletionClient`] - chat completions with JSON-schema output
//! - [`AzureImageClient`] - DALL-E image generation on Azure OpenAI
//! - [`AzureSpeechClient`] - text-to-speech on Azure OpenAI
//! - [`FfmpegToolkit`] - ffprobe duration probing and ffmpeg encoding

mod azure_images;
mod azure_speech;
mod facts;
mod ffmpeg;
mod openai;
mod settings;

pub use azure_images::{AzureImageClient, classify_image_error};
pub use azure_speech::AzureSpeechClient;
pub use facts::{ApiNinjasFactSource, parse_fact_body};
pub use ffmpeg::{FfmpegToolkit, encode_args, parse_probe_output, probe_args};
pub use openai::{OpenAiCompletionClient, extract_completion_content};
pub use settings::{
    CompletionSettings, Credentials, FactSettings, FfmpegSettings, ImageSettings,
    ProviderSettings, SpeechSettings, required_var,
};
