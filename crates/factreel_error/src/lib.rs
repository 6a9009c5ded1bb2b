//! Error types for the factreel pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Provider failures are tagged at the adapter boundary (see
//! [`ProviderErrorKind`]); a content-policy rejection or a rate limit is a
//! variant, never a substring of a message.
//!
//! # Examples
//!
//! ```
//! use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
//!
//! fn fetch_fact() -> FactreelResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::Network {
//!         status: 502,
//!         body: "Bad Gateway".to_string(),
//!     }))?
//! }
//!
//! assert!(fetch_fact().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod media;
mod pipeline;
mod provider;
mod storage;

pub use config::ConfigError;
pub use error::{FactreelError, FactreelErrorKind, FactreelResult};
pub use http::HttpError;
pub use json::JsonError;
pub use media::{MediaError, MediaErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use storage::{StorageError, StorageErrorKind};
