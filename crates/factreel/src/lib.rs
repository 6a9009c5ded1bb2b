//! Factreel - narrated short videos from random facts.
//!
//! A run fetches a fact, asks a language model for a narration script, a
//! caption and image prompts, renders the images, synthesizes the narration
//! and encodes everything into a vertical video.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use factreel::{Credentials, FactreelConfig, build_pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FactreelConfig::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let pipeline = build_pipeline(&config, &credentials, config.backoff)?;
//!
//!     let output = pipeline.run().await?;
//!     println!("{}\n{}", output.video_path().display(), output.caption);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - export spans through OpenTelemetry to stdout
//! - `api` - enable tests that call the real services
//!
//! # Architecture
//!
//! - `factreel_error` - error types
//! - `factreel_core` - data types passed between stages
//! - `factreel_interface` - capability traits
//! - `factreel_rate_limit` - `Retry-After` parsing and backoff policy
//! - `factreel_storage` - per-run media storage
//! - `factreel_providers` - HTTP and ffmpeg adapters
//! - `factreel_pipeline` - stages and orchestrator
//!
//! This crate re-exports the public surface of each.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;
mod services;
mod settings;

pub use observability::{ObservabilityConfig, init_observability};
pub use services::{build_pipeline, build_services, speech_endpoint};
pub use settings::{DEFAULT_CONFIG, ENV_PREFIX, FactreelConfig};

pub use factreel_core::*;
pub use factreel_error::*;
pub use factreel_interface::*;
pub use factreel_pipeline::*;
pub use factreel_providers::*;
pub use factreel_rate_limit::*;
pub use factreel_storage::{
    FileSystemStorage, MediaMetadata, MediaReference, MediaStorage, MediaType, new_run_id,
};
