/*!
 * Locating and decoding the caption metadata embedded in a video page.
 *
 * The watch page inlines a large player-response object in a script tag;
 * the captions block sits under a `"captions":` key with `"videoDetails"`
 * as its next sibling. The locator slices the JSON between those two
 * markers rather than parsing the surrounding script, which assumes that
 * key ordering and is the single place that breaks if the host page
 * changes shape.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ExtractionError;
use crate::language_utils;

/// Marker preceding the captions metadata block
const CAPTIONS_MARKER: &str = "\"captions\":";

/// Sibling key terminating the captions metadata block
const SIBLING_MARKER: &str = ",\"videoDetails";

/// One selectable caption track listed in the video metadata
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionTrack {
    /// Location of the raw caption content
    #[serde(rename = "baseUrl")]
    pub base_url: String,

    /// ISO-ish language code, e.g. "en" or "pt-BR"
    #[serde(rename = "languageCode")]
    pub language_code: String,

    /// Display name as listed by the host
    #[serde(default)]
    pub name: Option<TrackName>,

    /// Track kind; "asr" marks an auto-generated track
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    /// Whether this track was machine-generated rather than authored
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// Human-readable track name
    ///
    /// Prefers the name carried in the metadata, then the ISO name for the
    /// track's code, then the bare code.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_ref().and_then(TrackName::text) {
            return name;
        }

        language_utils::get_language_name(&self.language_code)
            .unwrap_or_else(|_| self.language_code.clone())
    }
}

/// Track display name, either a plain string or a list of text runs
#[derive(Debug, Clone, Deserialize)]
pub struct TrackName {
    #[serde(rename = "simpleText")]
    simple_text: Option<String>,

    #[serde(default)]
    runs: Vec<NameRun>,
}

#[derive(Debug, Clone, Deserialize)]
struct NameRun {
    text: String,
}

impl TrackName {
    fn text(&self) -> Option<String> {
        if let Some(text) = &self.simple_text {
            return Some(text.clone());
        }

        if self.runs.is_empty() {
            return None;
        }

        Some(self.runs.iter().map(|r| r.text.as_str()).collect())
    }
}

/// A language available on a video, reported back to the caller when the
/// requested language has no track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageOption {
    /// Language code of the track
    pub code: String,
    /// Display name of the track
    pub name: String,
}

impl From<&CaptionTrack> for LanguageOption {
    fn from(track: &CaptionTrack) -> Self {
        LanguageOption {
            code: track.language_code.clone(),
            name: track.display_name(),
        }
    }
}

/// Captions section of the embedded player response
#[derive(Debug, Deserialize)]
struct CaptionsMetadata {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct TracklistRenderer {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// Slice the captions JSON object out of a watch page body
///
/// A page without the captions marker is the normal shape for videos that
/// simply have no captions, and reports as such; a marker without the
/// expected sibling key means the embedding changed and reports as
/// malformed metadata instead.
pub fn locate_captions_json(html: &str) -> Result<&str, ExtractionError> {
    let start = html
        .find(CAPTIONS_MARKER)
        .ok_or(ExtractionError::NoCaptionsData)?
        + CAPTIONS_MARKER.len();

    let rest = &html[start..];
    let end = rest.find(SIBLING_MARKER).ok_or_else(|| {
        ExtractionError::MetadataMalformed(
            "captions block has no videoDetails sibling".to_string(),
        )
    })?;

    Ok(rest[..end].trim())
}

/// Decode a captions JSON slice into its track list
pub fn parse_caption_tracks(json: &str) -> Result<Vec<CaptionTrack>, ExtractionError> {
    let metadata: CaptionsMetadata = serde_json::from_str(json)
        .map_err(|e| ExtractionError::MetadataMalformed(e.to_string()))?;

    let tracks = metadata
        .renderer
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(ExtractionError::NoCaptionTracks);
    }

    Ok(tracks)
}
