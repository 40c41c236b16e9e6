// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for inlinehashes
//!
//! Usage errors (bad target, bad algorithm) are kept apart from input and
//! retrieval errors so callers can report them before doing any work.

use thiserror::Error;

/// Result type alias for inlinehashes operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for inlinehashes
#[derive(Error, Debug)]
pub enum Error {
    /// Target filter is not `all` or a known directive
    #[error("Invalid target '{0}': expected one of all, script-src, style-src")]
    InvalidTarget(String),

    /// Digest algorithm name is not supported
    #[error("Invalid algorithm '{0}': expected one of sha256, sha384, sha512")]
    InvalidAlgorithm(String),

    /// Output format name is not supported
    #[error("Invalid output format '{0}': expected one of json, table, plain")]
    InvalidFormat(String),

    /// HTML parser could not build a tree
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote source answered with a non-success status
    #[error("Failed to get source {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid target error
    pub fn invalid_target(target: impl Into<String>) -> Self {
        Error::InvalidTarget(target.into())
    }

    /// Create a malformed input error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedInput(msg.into())
    }

    /// Check if this error was caused by a bad request from the caller
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidTarget(_) | Error::InvalidAlgorithm(_) | Error::InvalidFormat(_)
        )
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::HttpStatus { .. })
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_target_is_usage_error() {
        let err = Error::invalid_target("bogus");

        assert!(err.is_usage_error());
        assert!(!err.is_network());
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_http_status_error() {
        let err = Error::HttpStatus {
            url: "https://example.com".to_string(),
            status: 404,
        };

        assert!(err.is_network());
        assert!(!err.is_usage_error());
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.html");
        let err: Error = io.into();

        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.status_code(), None);
    }
}
