use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @module: Caption body parsing

// @const: Timed text entry regex
static TEXT_ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<text start="([^"]*)" dur="([^"]*)">([^<]*)</text>"#).unwrap()
});

// @struct: Single timed caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    // @field: Caption text
    pub text: String,

    // @field: Start offset in seconds
    pub offset: f64,

    // @field: Duration in seconds
    pub duration: f64,

    // @field: Language code of the owning track
    pub lang: String,
}

/// Parse a caption body into timed entries
///
/// The body is a flat sequence of `<text start="…" dur="…">…</text>`
/// entries with no nesting, matched structurally in document order. An
/// entry whose numeric attributes do not parse is skipped with a warning
/// so one bad line does not lose the rest of the transcript. Entity
/// references in the text are decoded.
pub fn parse_transcript(body: &str, lang: &str) -> Vec<TranscriptEntry> {
    let mut entries = Vec::new();

    for captures in TEXT_ENTRY_REGEX.captures_iter(body) {
        let offset: f64 = match captures[1].parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Skipping caption entry with bad start offset: {}", &captures[1]);
                continue;
            }
        };

        let duration: f64 = match captures[2].parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Skipping caption entry with bad duration: {}", &captures[2]);
                continue;
            }
        };

        let text = html_escape::decode_html_entities(&captures[3]).into_owned();

        entries.push(TranscriptEntry {
            text,
            offset,
            duration,
            lang: lang.to_string(),
        });
    }

    entries
}
