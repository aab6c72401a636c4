/*!
 * # ytscribe - YouTube caption extraction service
 *
 * A Rust library and service for retrieving a video's subtitle/caption
 * text as structured, time-coded entries.
 *
 * ## Features
 *
 * - Scrape the caption track listing embedded in a video's watch page
 * - Select among available tracks by exact language code, with a
 *   configurable policy when the requested language is missing
 * - Parse timed caption bodies into chronological transcript entries
 * - Serve extraction over HTTP (POST /transcribe) or run it one-shot
 *   from the command line
 * - Structured failure reporting: every outcome is a well-formed result,
 *   never a raised error
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `caption_extractor`: The extraction pipeline and its result types
 * - `caption_metadata`: Locating and decoding the embedded track listing
 * - `transcript_parser`: Caption body parsing
 * - `fetcher`: Page fetching abstraction and its reqwest implementation
 * - `service`: HTTP routing for the service binary
 * - `language_utils`: ISO language name lookup
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod caption_extractor;
pub mod caption_metadata;
pub mod errors;
pub mod fetcher;
pub mod language_utils;
pub mod service;
pub mod transcript_parser;

// Re-export main types for easier usage
pub use app_config::{Config, LanguageMissingPolicy};
pub use caption_extractor::{CaptionExtractor, ExtractionResult};
pub use caption_metadata::{CaptionTrack, LanguageOption};
pub use errors::{AppError, ExtractionError, FetchError};
pub use transcript_parser::TranscriptEntry;
