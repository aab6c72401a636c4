use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Caption track metadata usually carries a display name, but not always;
/// these helpers derive one from the track's ISO code instead. Track
/// matching itself stays exact-string and never goes through here.
/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    // Regional variants ("en-US", "pt-BR") resolve through their base code
    let base = normalized.split('-').next().unwrap_or(&normalized);

    let language = match base.len() {
        2 => Language::from_639_1(base),
        3 => Language::from_639_3(base),
        _ => None,
    };

    language
        .map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}
