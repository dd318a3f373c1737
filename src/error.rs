//! Error types for nsig-probe

use thiserror::Error;

/// Main error type for nsig-probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid argument: --player must be a https://www.youtube.com/s/player/.../base.js URL")]
    InvalidPlayerUrl(String),

    /// The library refused to decode the input (yt-dlp `ExtractorError`)
    #[error("{message}")]
    Extractor {
        message: String,
        traceback: Option<String>,
    },

    /// Any other exception raised inside the library
    #[error("{message}")]
    Library {
        exception: String,
        message: String,
        traceback: Option<String>,
    },

    #[error("Bridge error: {0}")]
    Bridge(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

impl ProbeError {
    /// Check if error is the library's own decode failure
    pub fn is_extractor_error(&self) -> bool {
        matches!(self, ProbeError::Extractor { .. })
    }

    /// Check if error happened before any library call
    pub fn is_usage_error(&self) -> bool {
        matches!(self, ProbeError::InvalidPlayerUrl(_))
    }

    /// Library-side traceback, when the bridge captured one
    pub fn traceback(&self) -> Option<&str> {
        match self {
            ProbeError::Extractor { traceback, .. } | ProbeError::Library { traceback, .. } => {
                traceback.as_deref()
            }
            _ => None,
        }
    }
}
