//! Media tooling error types.

/// Failures of the local probe/encode tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MediaErrorKind {
    /// Tool binary could not be spawned
    #[display("Failed to launch {}: {}", tool, message)]
    Spawn {
        /// Tool name (e.g. "ffmpeg")
        tool: String,
        /// Underlying error message
        message: String,
    },
    /// Probing a media file failed
    #[display("Probe failed: {}", _0)]
    Probe(String),
    /// Encoder exited unsuccessfully
    #[display("Encoding failed (exit code {:?}): {}", code, stderr)]
    Encode {
        /// Process exit code, if any
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
}

/// Media error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
