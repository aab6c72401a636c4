/*!
 * Error types for the ytscribe application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::caption_metadata::LanguageOption;

/// Errors that can occur while fetching a remote page
#[derive(Error, Debug)]
pub enum FetchError {
    /// Error when sending the request or reading the response body fails
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// Error when the remote host answers with a non-success status
    #[error("HTTP status {status_code} fetching {url}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// URL that was being fetched
        url: String,
    },
}

/// Errors that can occur during caption extraction
///
/// Every variant maps to one failure class of the extraction pipeline and
/// is converted into a failed `ExtractionResult` at the `extract()` boundary;
/// none of them ever reaches the caller as a raw error.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Network or HTTP-layer failure reaching either host
    #[error("Fetch failed: {0}")]
    Transport(#[from] FetchError),

    /// The video page carries no captions metadata block at all
    #[error("No captions data found in the video page")]
    NoCaptionsData,

    /// The embedded metadata block was found but could not be decoded
    #[error("Malformed captions metadata: {0}")]
    MetadataMalformed(String),

    /// The metadata decoded cleanly but lists no caption tracks
    #[error("No caption tracks available")]
    NoCaptionTracks,

    /// The requested language code is not among the available tracks
    #[error("Requested language '{requested}' not available")]
    LanguageUnavailable {
        /// Language code the caller asked for
        requested: String,
        /// Tracks that actually exist on the video
        available: Vec<LanguageOption>,
    },

    /// The caption body was fetched but parsed to zero usable entries
    #[error("Could not extract transcript text")]
    EmptyTranscript,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration layer
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the HTTP server
    #[error("Server error: {0}")]
    Server(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
