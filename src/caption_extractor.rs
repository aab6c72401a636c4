/*!
 * The caption extraction pipeline.
 *
 * Given a video identifier and an optional language preference, the
 * extractor fetches the video's watch page, locates the embedded caption
 * metadata, selects a track, fetches its content and parses it into timed
 * transcript entries. Both network reads are strictly sequential: the
 * caption URL is only known after the page metadata has been decoded.
 *
 * `extract()` never returns an error. Every failure class is folded into
 * the `ExtractionResult` it hands back, so callers always receive a
 * well-formed result object.
 */

use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app_config::{ExtractionConfig, LanguageMissingPolicy};
use crate::caption_metadata::{self, CaptionTrack, LanguageOption};
use crate::errors::ExtractionError;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::transcript_parser::{self, TranscriptEntry};

/// Outcome of one extraction call
///
/// `success == true` iff `transcript` is non-empty and `language` is set;
/// otherwise `error` carries a human-readable failure message and, when
/// the failure is a missing language, `available_languages` lists the
/// tracks the video actually has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Video identifier, echoed from the request
    pub video_id: String,

    /// Whether a transcript was extracted
    pub success: bool,

    /// Timed caption lines in chronological order, empty on failure
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transcript: Vec<TranscriptEntry>,

    /// Language code of the selected track, present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Failure description, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Languages actually available, populated only when the requested
    /// language had no track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<LanguageOption>>,
}

impl ExtractionResult {
    /// Build a successful result
    pub fn success(video_id: &str, language: &str, transcript: Vec<TranscriptEntry>) -> Self {
        ExtractionResult {
            video_id: video_id.to_string(),
            success: true,
            transcript,
            language: Some(language.to_string()),
            error: None,
            available_languages: None,
        }
    }

    /// Build a failed result from an extraction error
    pub fn failure(video_id: &str, error: ExtractionError) -> Self {
        let available_languages = match &error {
            ExtractionError::LanguageUnavailable { available, .. } => Some(available.clone()),
            _ => None,
        };

        ExtractionResult {
            video_id: video_id.to_string(),
            success: false,
            transcript: Vec::new(),
            language: None,
            error: Some(error.to_string()),
            available_languages,
        }
    }
}

/// Caption extractor service
pub struct CaptionExtractor {
    /// Extraction settings
    config: ExtractionConfig,

    /// Fetcher override; when unset, each call builds its own HTTP client
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl CaptionExtractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractionConfig) -> Self {
        CaptionExtractor {
            config,
            fetcher: None,
        }
    }

    /// Create an extractor that routes all fetches through `fetcher` -
    /// used by tests and external consumers
    #[allow(dead_code)]
    pub fn with_fetcher(config: ExtractionConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        CaptionExtractor {
            config,
            fetcher: Some(fetcher),
        }
    }

    /// Extract the transcript for a video
    ///
    /// The identifier is passed through opaquely; a malformed one simply
    /// surfaces as a fetch or metadata failure downstream.
    pub async fn extract(&self, video_id: &str, language: Option<&str>) -> ExtractionResult {
        let outcome = match &self.fetcher {
            Some(fetcher) => self.run(fetcher.as_ref(), video_id, language).await,
            None => {
                // One client per call, dropped on every exit path
                let fetcher = HttpFetcher::new(&self.config, language);
                self.run(&fetcher, video_id, language).await
            }
        };

        match outcome {
            Ok((language, transcript)) => {
                info!(
                    "Extracted {} caption entries for video {} ({})",
                    transcript.len(),
                    video_id,
                    language
                );
                ExtractionResult::success(video_id, &language, transcript)
            }
            Err(error) => {
                debug!("Extraction failed for video {}: {}", video_id, error);
                ExtractionResult::failure(video_id, error)
            }
        }
    }

    /// Run the pipeline, returning the selected language and its entries
    async fn run(
        &self,
        fetcher: &dyn PageFetcher,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<(String, Vec<TranscriptEntry>), ExtractionError> {
        let html = fetcher.fetch_text(&self.watch_url(video_id)).await?;

        let captions_json = caption_metadata::locate_captions_json(&html)?;
        let tracks = caption_metadata::parse_caption_tracks(captions_json)?;

        let track = self.select_track(&tracks, language)?;
        let language_code = track.language_code.clone();
        debug!(
            "Selected {} track '{}' for video {}",
            if track.is_generated() { "generated" } else { "authored" },
            language_code,
            video_id
        );

        let body = fetcher.fetch_text(&track.base_url).await?;

        let transcript = transcript_parser::parse_transcript(&body, &language_code);
        if transcript.is_empty() {
            return Err(ExtractionError::EmptyTranscript);
        }

        Ok((language_code, transcript))
    }

    /// Select the caption track for a requested language
    ///
    /// Matching is exact-string on the track's language code, no
    /// normalization. With no preference, the first track in metadata
    /// order wins. On a miss, the configured policy decides between
    /// falling back to the first track and reporting the available ones.
    fn select_track<'a>(
        &self,
        tracks: &'a [CaptionTrack],
        language: Option<&str>,
    ) -> Result<&'a CaptionTrack, ExtractionError> {
        // parse_caption_tracks guarantees a non-empty list
        let first = &tracks[0];

        let requested = match language {
            Some(code) => code,
            None => return Ok(first),
        };

        if let Some(track) = tracks.iter().find(|t| t.language_code == requested) {
            return Ok(track);
        }

        match self.config.on_language_missing {
            LanguageMissingPolicy::Fallback => {
                debug!(
                    "No '{}' track, falling back to '{}'",
                    requested, first.language_code
                );
                Ok(first)
            }
            LanguageMissingPolicy::Report => Err(ExtractionError::LanguageUnavailable {
                requested: requested.to_string(),
                available: tracks.iter().map(LanguageOption::from).collect(),
            }),
        }
    }

    /// Canonical watch page URL for a video
    fn watch_url(&self, video_id: &str) -> String {
        format!(
            "{}/watch?v={}",
            self.config.endpoint.trim_end_matches('/'),
            video_id
        )
    }
}
