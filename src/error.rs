//! Error types for tua.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=parse, 6=remote, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Every error is fatal to the current run. Nothing in the crate retries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tua operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Remote (exit 6)
    FetchError,
    AuthError,

    // Not Found (exit 3)
    ArchiveNotFound,

    // Parse (exit 4)
    ParseError,

    // Validation (exit 5)
    InvalidArgument,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::FetchError => "FETCH_ERROR",
            Self::AuthError => "AUTH_ERROR",
            Self::ArchiveNotFound => "ARCHIVE_NOT_FOUND",
            Self::ParseError => "PARSE_ERROR",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::FetchError | Self::AuthError => 6,
            Self::ArchiveNotFound => 3,
            Self::ParseError => 4,
            Self::InvalidArgument => 5,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while archiving a timeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Archive not found or empty: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid record at {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Fetch(_) => ErrorCode::FetchError,
            Self::Auth(_) => ErrorCode::AuthError,
            Self::NotFound { .. } => ErrorCode::ArchiveNotFound,
            Self::Parse { .. } => ErrorCode::ParseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotFound { path } => Some(format!(
                "'{}' must exist and contain at least one record. \
                 Run without `-a` to create a full archive first.",
                path.display()
            )),

            Self::Parse { .. } => Some(
                "The first line of an archive must be a JSON object with an integer `id`."
                    .to_string(),
            ),

            Self::Auth(_) => Some(
                "Check TWITTER_CONSUMER_KEY / TWITTER_CONSUMER_SECRET or set TWITTER_BEARER_TOKEN."
                    .to_string(),
            ),

            Self::Config(msg) if msg.contains("credentials") => Some(
                "Provide credentials in the config file (`-c`) or via TWITTER_* environment variables."
                    .to_string(),
            ),

            Self::Fetch(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
