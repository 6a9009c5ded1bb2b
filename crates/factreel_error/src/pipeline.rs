//! Pipeline stage error types.

/// Pipeline failure conditions raised by the stages themselves.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Fact source returned an empty string
    #[display("Fact source returned an empty fact")]
    EmptyFact,
    /// Video assembly was asked to run without images
    #[display("Cannot assemble a video from zero images")]
    NoImages,
    /// Narration audio has a duration that cannot be split
    #[display("Invalid audio duration: {}", _0)]
    InvalidDuration(f64),
    /// Speech synthesis failed with a non-retryable status
    #[display("Speech synthesis failed with HTTP {}: {}", status, body)]
    SpeechSynthesisFailed {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },
    /// Speech synthesis stayed rate limited for the whole retry budget
    #[display("Speech synthesis still rate limited after {} attempts", attempts)]
    RateLimitExhausted {
        /// Number of requests sent
        attempts: u32,
    },
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use factreel_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::NoImages);
/// assert!(format!("{}", err).contains("zero images"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
