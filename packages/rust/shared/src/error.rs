//! Error types for customsplit.
//!
//! Extraction never fails; every variant here comes from reconstruction,
//! registry assembly, configuration, or transport decoding.

use std::path::PathBuf;

/// Top-level error type for all customsplit operations.
#[derive(Debug, thiserror::Error)]
pub enum SplitConversionError {
    /// A converter recognized the payload but failed to rebuild its split.
    #[error("split converter {converter} failed to create file split: {source}")]
    UnsupportedFormat {
        converter: String,
        source: std::io::Error,
    },

    /// Strict mode: no converter claimed a non-empty payload.
    #[error("no split converter claimed custom split info for {path} (keys: {})", .keys.join(", "))]
    UnclaimedSplitInfo { path: String, keys: Vec<String> },

    /// A configured converter name has no registered factory.
    #[error("unknown split converter: {name}")]
    UnknownConverter { name: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Transport record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SplitConversionError>;

impl SplitConversionError {
    /// Wrap a converter's reconstruction failure.
    pub fn unsupported_format(converter: impl Into<String>, source: std::io::Error) -> Self {
        Self::UnsupportedFormat {
            converter: converter.into(),
            source,
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Name of the converter that failed, for `UnsupportedFormat`.
    pub fn converter(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFormat { converter, .. } => Some(converter),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SplitConversionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
