//! Error type definitions.
//!
//! This module defines the error types used throughout the crate. Only
//! validation and initialization errors ever reach a caller as `Err`; fetch
//! failures are recorded in the chain as data.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejection of an inspection request before any fetch happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The `url` field was missing or blank.
    #[error("url is required")]
    MissingUrl,

    /// The URL could not be parsed.
    #[error("Invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL parsed but does not use http or https.
    #[error("Unsupported url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// The URL exceeds `MAX_URL_LENGTH`.
    #[error("url exceeds maximum length ({length} > {max})")]
    UrlTooLong { length: usize, max: usize },

    /// A header override has a name that is not a valid HTTP token.
    #[error("Invalid header name '{0}'")]
    InvalidHeaderName(String),

    /// A header override has a value that cannot be sent.
    #[error("Invalid value for header '{0}'")]
    InvalidHeaderValue(String),

    /// A CLI header argument was not of the form `Name: value`.
    #[error("Malformed header '{0}', expected 'Name: value'")]
    MalformedHeader(String),

    /// `--user-agent-preset` named no known preset.
    #[error("Unknown user agent preset '{0}'")]
    UnknownUserAgentPreset(String),
}

/// JSON body returned for a rejected request: `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

/// Message payload of an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            error: ErrorMessage {
                message: err.to_string(),
            },
        }
    }
}

/// Transport-level failure of a single hop.
///
/// Never retried; the resolver turns it into a synthetic "Fetch failed" hop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The transport timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// DNS resolution, TCP connect, or TLS handshake failed.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The response arrived but its body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other request failure.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<ReqwestError> for FetchError {
    fn from(error: ReqwestError) -> Self {
        let message = error.to_string();
        if error.is_timeout() {
            FetchError::Timeout(message)
        } else if error.is_connect() {
            FetchError::Connect(message)
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(message)
        } else {
            FetchError::Request(message)
        }
    }
}

/// Errors raised while writing exported hop lists.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization or write failure.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),
}
