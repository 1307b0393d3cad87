use thiserror::Error;

/// Unified error type for release version operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid branch given: {0}")]
    InvalidBranchName(String),

    #[error("Invalid type given: {0}")]
    InvalidReleaseType(String),

    #[error("Invalid path given: {0}")]
    InvalidPath(String),

    #[error("Path cannot be written to: {0}")]
    PathNotWritable(String),

    #[error("{0}")]
    InvalidVersionFile(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("Invalid date given: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in moodle-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a version file error with context
    pub fn version_file(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersionFile(msg.into())
    }

    /// Create a transition error with context
    pub fn transition(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidTransition(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Every variant maps to its own non-zero code so wrapper scripts can tell
    /// failures apart without parsing the message.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::InvalidBranchName(_) => 10,
            ReleaseError::InvalidReleaseType(_) => 11,
            ReleaseError::InvalidPath(_) => 12,
            ReleaseError::PathNotWritable(_) => 13,
            ReleaseError::InvalidVersionFile(_) => 14,
            ReleaseError::InvalidTransition(_) => 15,
            ReleaseError::InvalidDate(_) => 16,
            ReleaseError::Config(_) => 17,
            ReleaseError::Io(_) => 18,
        }
    }
}
