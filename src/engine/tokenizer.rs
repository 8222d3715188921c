/*!
 * Markup tokenizer.
 *
 * Splits a raw markup string into an ordered sequence of typed segments:
 * tags and comments on one side, runs of plain text on the other. This is
 * a single-pass finite-state scanner, not an HTML parser: it tracks no
 * nesting depth, knows nothing about the defined HTML tag grammar, and
 * treats a `<` with no following `>` as plain text.
 *
 * Known limitation: an attribute value containing a literal `>` inside a
 * quoted string prematurely terminates the tag match. The expected input
 * corpus (scraped site HTML) rarely carries such attributes; the behavior
 * is documented and tested rather than patched.
 */

/// One tokenized segment of a markup string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The exact source text of the segment.
    pub raw: String,

    /// True for tags (`<...>`) and comments (`<!--...-->`), false for text runs.
    pub is_markup: bool,

    /// Byte offset just past this segment in the source string.
    pub end_offset: usize,
}

impl Token {
    /// Lowercased prefix up to the first whitespace or `>`, keeping the
    /// leading `<` and any `/`. Two markup tokens describe the same tag
    /// iff their name keys compare equal.
    pub fn name_key(&self) -> String {
        let end = self
            .raw
            .find(|c: char| c.is_whitespace() || c == '>')
            .unwrap_or(self.raw.len());
        self.raw[..end].to_lowercase()
    }

    /// Bare element name for a tag token (`<h2 class="x">` yields `h2`,
    /// `</p>` yields `p`). None for comments and text runs.
    pub fn tag_name(&self) -> Option<String> {
        if !self.is_markup || self.is_comment() {
            return None;
        }
        let inner = self.raw.trim_start_matches('<').trim_start_matches('/');
        let name: String = inner
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if name.is_empty() {
            None
        } else {
            Some(name.to_lowercase())
        }
    }

    /// True for closing tags (`</p>`).
    pub fn is_closing(&self) -> bool {
        self.is_markup && self.raw.starts_with("</")
    }

    /// True for comments (`<!--...-->`).
    pub fn is_comment(&self) -> bool {
        self.raw.starts_with("<!--")
    }
}

/// Tokenize a markup string into tags/comments and text runs.
///
/// The grammar has three alternatives, tried in priority order at each
/// position: an HTML comment, a generic tag matched non-greedily up to the
/// next `>`, or a maximal run of characters containing no `<`.
///
/// Whitespace-only text runs are dropped, but their consumed length is
/// still reflected in the `end_offset` values of subsequent tokens, so
/// offset-based cursor logic downstream stays correct. Concatenating all
/// raws in order reconstructs the source exactly whenever no run was
/// whitespace-only.
pub fn tokenize(content: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let len = content.len();
    let mut pos = 0usize;

    while pos < len {
        let rest = &content[pos..];
        let (end, is_markup) = if rest.starts_with('<') {
            if rest.starts_with("<!--") {
                match rest[4..].find("-->") {
                    Some(rel) => (pos + 4 + rel + 3, true),
                    // Unterminated comment: fall back to the generic tag rule.
                    None => match rest.find('>') {
                        Some(rel) => (pos + rel + 1, true),
                        None => (len, false),
                    },
                }
            } else {
                match rest.find('>') {
                    Some(rel) => (pos + rel + 1, true),
                    // A `<` with no closing `>` is plain text to the end.
                    None => (len, false),
                }
            }
        } else {
            match rest.find('<') {
                Some(rel) => (pos + rel, false),
                None => (len, false),
            }
        };

        let raw = &content[pos..end];
        if is_markup || !raw.trim().is_empty() {
            tokens.push(Token {
                raw: raw.to_string(),
                is_markup,
                end_offset: end,
            });
        }
        pos = end;
    }

    tokens
}
