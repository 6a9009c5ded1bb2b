//! Top-level error wrapper types.

use crate::{
    ConfigError, HttpError, JsonError, MediaError, PipelineError, ProviderError, StorageError,
};

/// Every error a pipeline run can surface.
///
/// # Examples
///
/// ```
/// use factreel_error::{FactreelError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: FactreelError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FactreelErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// External provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Pipeline stage error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Probe/encode tool error
    #[from(MediaError)]
    Media(MediaError),
}

/// Factreel error with kind discrimination.
///
/// # Examples
///
/// ```
/// use factreel_error::{FactreelErrorKind, FactreelResult, PipelineError, PipelineErrorKind};
///
/// fn assemble() -> FactreelResult<()> {
///     Err(PipelineError::new(PipelineErrorKind::NoImages))?
/// }
///
/// let err = assemble().unwrap_err();
/// assert!(matches!(err.kind(), FactreelErrorKind::Pipeline(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Factreel Error: {}", _0)]
pub struct FactreelError(Box<FactreelErrorKind>);

impl FactreelError {
    /// Create a new error from a kind.
    pub fn new(kind: FactreelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FactreelErrorKind {
        &self.0
    }

    /// Provider error details, if this error came from an external service.
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self.kind() {
            FactreelErrorKind::Provider(err) => Some(err),
            _ => None,
        }
    }

    /// Pipeline error details, if a stage raised this error.
    pub fn as_pipeline(&self) -> Option<&PipelineError> {
        match self.kind() {
            FactreelErrorKind::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to FactreelErrorKind
impl<T> From<T> for FactreelError
where
    T: Into<FactreelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for factreel operations.
pub type FactreelResult<T> = std::result::Result<T, FactreelError>;
