/*!
 * Language code utilities.
 *
 * Target languages arrive as ISO 639-1 (2-letter) or ISO 639-3 (3-letter)
 * codes; they are validated up front, turned into a column suffix for the
 * derived translation column, and expanded to an English name for the
 * translation prompt.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Validate an ISO 639-1 or ISO 639-3 language code.
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();
    let valid = match normalized.len() {
        2 => Language::from_639_1(&normalized).is_some(),
        3 => Language::from_639_3(&normalized).is_some(),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// English name of a language, when the code is recognized.
pub fn language_name(code: &str) -> Option<&'static str> {
    let normalized = code.trim().to_lowercase();
    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }?;
    Some(language.to_name())
}

/// Suffix used for the derived translation column (`VALUE_EN` for `en`).
pub fn column_suffix(code: &str) -> String {
    code.trim().to_uppercase()
}
