/*!
 * Translatable-text extraction and markup normalization.
 *
 * Two extraction policies coexist and are offered as explicit modes:
 *
 * - Strip mode removes every tag and returns the concatenated text runs.
 *   This is the raw translatable payload view of a cell value.
 * - Selective-inline mode unwraps only the configured inline-capable tags'
 *   own inner text, one level, leaving all other markup literal. It is
 *   used when recovering the textual content of a single wrapper during
 *   reconstruction, not on whole documents.
 *
 * Both modes are pure functions of their input.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::tokenize;

/// Tag names whose own textual content is eligible for re-wrapping after
/// translation. Anchors are handled separately by the reconstructor.
pub const DEFAULT_INLINE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "p", "span", "strong", "b", "i", "button", "label", "title",
];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Presentation-only attributes stripped during normalization.
static NOISE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(<[^>]+)\s(?:target|rel|class|id|style)="[^"]*""#)
        .expect("Invalid attribute regex")
});

static ANCHOR_PAIR: Lazy<Regex> = Lazy::new(|| {
    // The attribute part must start with whitespace so that <article> and
    // friends are not mistaken for anchors.
    Regex::new(r"(?is)<a(?:\s[^>]*)?>(.*?)</a>").expect("Invalid anchor regex")
});

/// Extractor over a configured inline-capable tag set.
///
/// The unwrap patterns are compiled once per tag name at construction;
/// the regex crate has no backreferences, so each tag gets its own
/// open/close pair pattern.
#[derive(Debug)]
pub struct TextExtractor {
    inline_pairs: Vec<Regex>,
}

impl TextExtractor {
    /// Build an extractor for the given inline-capable tag names.
    pub fn new<S: AsRef<str>>(inline_tags: &[S]) -> Self {
        let inline_pairs = inline_tags
            .iter()
            .filter_map(|tag| {
                let name = regex::escape(tag.as_ref().trim());
                if name.is_empty() {
                    return None;
                }
                // `(?:\s[^>]*)?` keeps <b> from matching <br> or <button>.
                Regex::new(&format!(r"(?is)<{0}(?:\s[^>]*)?>(.*?)</{0}>", name)).ok()
            })
            .collect();
        Self { inline_pairs }
    }

    /// Extractor over the default inline tag set.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_INLINE_TAGS)
    }

    /// Selective-inline mode: unwrap the configured tags' own inner text,
    /// one level, and the text inside anchors, leaving other markup as-is.
    pub fn unwrap_inline(&self, content: &str) -> String {
        let mut result = content.to_string();
        for pattern in &self.inline_pairs {
            result = pattern.replace_all(&result, "$1").into_owned();
        }
        ANCHOR_PAIR.replace_all(&result, "$1").into_owned()
    }
}

/// Strip mode: remove every tag and comment, concatenate the remaining
/// text runs, and trim the ends.
pub fn strip_tags(content: &str) -> String {
    let joined: String = tokenize(content)
        .iter()
        .filter(|t| !t.is_markup)
        .map(|t| t.raw.as_str())
        .collect();
    joined.trim().to_string()
}

/// Standardize markup formatting to reduce structural mismatches:
/// newlines and tabs become spaces, whitespace runs collapse, inter-tag
/// gaps tighten, spacing around `<br>` is removed, and presentation-only
/// attributes are stripped.
///
/// The attribute strip removes at most one attribute per tag per pass, so
/// it iterates to a fixpoint; the whole function is idempotent.
pub fn normalize(content: &str) -> String {
    let mut s = content.replace(['\n', '\t', '\r'], " ");
    s = WHITESPACE_RUN.replace_all(&s, " ").into_owned();
    s = s.replace("> <", "><");
    s = s.replace(" <br>", "<br>").replace("<br> ", "<br>");
    loop {
        let next = NOISE_ATTRIBUTE.replace_all(&s, "$1").into_owned();
        if next == s {
            break;
        }
        s = next;
    }
    s.trim().to_string()
}
