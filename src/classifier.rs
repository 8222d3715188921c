/*!
 * Content classification for cell values.
 *
 * Classification is a pure rule lookup over fixed tag-name vocabularies,
 * computed once per cell and used to decide whether a value is routed
 * through the preservation engine at all. Priority: CSS/JS content beats
 * structural HTML beats inline rich text.
 */

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::anyhow;
use once_cell::sync::Lazy;

use crate::engine::tokenize;

/// Inline formatting and readable-text tags.
static RICH_TEXT_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "b", "i", "u", "strong", "em", "mark", "span", "a", "h1", "h2", "h3", "h4", "h5", "h6",
        "ul", "li", "p", "br", "blockquote", "hr", "code", "cite",
    ]
    .into_iter()
    .collect()
});

/// Heavy structural tags.
static FULL_HTML_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "div", "section", "table", "header", "footer", "article", "aside", "form", "iframe",
        "colgroup", "fieldset", "nav",
    ]
    .into_iter()
    .collect()
});

static CSS_JS_TAGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["style", "script"].into_iter().collect());

/// Classification of one cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClassification {
    /// Empty or whitespace-only value
    Empty,
    /// No HTML elements at all
    PlainText,
    /// Readable text with inline HTML
    RichText,
    /// Structured HTML (div, table, section, ...)
    FullHtml,
    /// Contains style or script content
    CssJs,
    /// Markup present but fitting no category
    Unknown,
}

impl ContentClassification {
    /// The CSV column vocabulary for this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::PlainText => "PLAIN_TEXT",
            Self::RichText => "RICH_TEXT",
            Self::FullHtml => "FULL_HTML",
            Self::CssJs => "CSS_JS",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether values of this classification are routed through the
    /// preservation engine.
    pub fn is_routed(&self) -> bool {
        matches!(
            self,
            Self::RichText | Self::FullHtml | Self::CssJs | Self::Unknown
        )
    }
}

impl std::fmt::Display for ContentClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentClassification {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EMPTY" => Ok(Self::Empty),
            "PLAIN_TEXT" => Ok(Self::PlainText),
            "RICH_TEXT" => Ok(Self::RichText),
            "FULL_HTML" => Ok(Self::FullHtml),
            // The original corpus wrote this category with a slash.
            "CSS_JS" | "CSS/JS" => Ok(Self::CssJs),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(anyhow!("Invalid content classification: {}", other)),
        }
    }
}

/// Classify one cell value by the tags it contains.
pub fn classify(text: &str) -> ContentClassification {
    if text.trim().is_empty() {
        return ContentClassification::Empty;
    }

    let tokens = tokenize(text);
    let names: Vec<String> = tokens
        .iter()
        .filter(|t| t.is_markup && !t.is_comment())
        .filter_map(|t| t.tag_name())
        .collect();

    if names.iter().any(|n| CSS_JS_TAGS.contains(n.as_str())) {
        return ContentClassification::CssJs;
    }
    if names.iter().any(|n| FULL_HTML_TAGS.contains(n.as_str())) {
        return ContentClassification::FullHtml;
    }
    if names.iter().any(|n| RICH_TEXT_TAGS.contains(n.as_str())) {
        return ContentClassification::RichText;
    }
    // An image or rule on its own still counts as rich text.
    if names
        .iter()
        .any(|n| matches!(n.as_str(), "img" | "hr" | "br"))
    {
        return ContentClassification::RichText;
    }
    if !tokens.iter().any(|t| t.is_markup && !t.is_comment()) {
        return ContentClassification::PlainText;
    }
    ContentClassification::Unknown
}
