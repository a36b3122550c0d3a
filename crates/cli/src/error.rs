use std::path::PathBuf;

/// scour error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid.
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments.
    #[error("argument error: {0}")]
    Argument(String),

    /// Pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] crate::pattern::PatternError),

    /// File I/O error.
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug).
    #[error("internal error: {0}")]
    Internal(String),

    /// File exceeds maximum size limit.
    #[error("file too large: {} ({} bytes, max: {} bytes)", .path.display(), .size, .max_size)]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Directory traversal error.
    #[error("walk error: {message}")]
    Walk { message: String },
}

/// Result type using scour's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes, mirroring grep's convention rather than a check-runner's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// At least one match was found.
    Match = 0,
    /// The search completed but found no matches.
    NoMatch = 1,
    /// Bad arguments or config.
    ConfigError = 2,
    /// Unexpected internal failure.
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::Pattern(_) => {
                ExitCode::ConfigError
            }
            Error::Io { .. } | Error::Internal(_) | Error::Walk { .. } => ExitCode::InternalError,
            Error::FileTooLarge { .. } => ExitCode::NoMatch,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
