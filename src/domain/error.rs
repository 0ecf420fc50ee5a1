use std::io;

use thiserror::Error;

/// Library-wide error type for dsput operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Input rejected before any I/O was attempted.
    #[error("{0}")]
    Validation(String),

    /// Local or workspace file could not be read.
    #[error("Failed to read source '{path}': {details}")]
    SourceRead { path: String, details: String },

    /// Gateway answered with a non-2xx status.
    #[error("z/OSMF request failed{}: {message}", fmt_status(.status))]
    Remote { message: String, status: Option<u16> },

    /// Request never reached the gateway (network failure or timeout).
    #[error("Connection to z/OSMF gateway failed: {0}")]
    Connection(String),

    /// Gateway rejected the supplied credentials.
    #[error("z/OSMF rejected credentials (status {status})")]
    Auth { status: u16 },

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// The step was interrupted between blocking calls.
    #[error("Operation cancelled")]
    Cancelled,

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

impl AppError {
    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Validation(_)
            | AppError::Configuration(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::SourceRead { .. } | AppError::EnvironmentVariableMissing(_) => {
                io::ErrorKind::NotFound
            }
            AppError::Auth { .. } => io::ErrorKind::PermissionDenied,
            AppError::Connection(_) => io::ErrorKind::ConnectionRefused,
            AppError::Cancelled => io::ErrorKind::Interrupted,
            AppError::Remote { .. } => io::ErrorKind::Other,
        }
    }
}
