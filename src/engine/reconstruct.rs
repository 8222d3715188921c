/*!
 * Reconstruction of translated text into the original tag skeleton.
 *
 * The reconstructor walks the original token sequence in order and
 * re-weaves the translated text around it: translated text flows through
 * untouched, while every tag the translator emitted is replaced by the
 * corresponding ORIGINAL tag, verbatim. Markup is never translated,
 * never reordered, never dropped by this walk.
 *
 * Reconstruction never raises. On any local inconsistency (tag not found
 * where expected, unparsable tag) the substitution for that token is
 * skipped and the walk continues, trading strict correctness for
 * robustness against partially broken translator output.
 */

use log::debug;

use super::extract::TextExtractor;
use super::repair;
use super::tokenizer::Token;

/// Options selecting the composable reconstruction stages.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Re-wrap the content of inline-capable tags (tag-wrapping variant).
    pub rewrite_inline: bool,

    /// Run the structural repair post-pass over the assembled string.
    pub repair: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            rewrite_inline: true,
            repair: true,
        }
    }
}

/// Re-weaves translated text into an original token sequence.
#[derive(Debug)]
pub struct Reconstructor {
    inline_tags: Vec<String>,
    extractor: TextExtractor,
    options: ReconstructOptions,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new(super::extract::DEFAULT_INLINE_TAGS, ReconstructOptions::default())
    }
}

impl Reconstructor {
    /// Build a reconstructor over the given inline-capable tag set.
    pub fn new<S: AsRef<str>>(inline_tags: &[S], options: ReconstructOptions) -> Self {
        let inline_tags: Vec<String> = inline_tags
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let extractor = TextExtractor::new(&inline_tags);
        Self {
            inline_tags,
            extractor,
            options,
        }
    }

    /// Reconstruct the translated counterpart of `original`, substituting
    /// translated text runs while keeping every original tag intact.
    pub fn reconstruct(&self, original: &[Token], translated: &str) -> String {
        let mut out = String::new();
        let mut cursor = 0usize;
        let mut i = 0usize;

        while i < original.len() {
            let token = &original[i];
            if !token.is_markup {
                // Text runs flow through with the surrounding tag handling.
                i += 1;
                continue;
            }

            if self.options.rewrite_inline && !token.is_closing() && !token.is_comment() {
                if let Some(name) = token.tag_name() {
                    if self.is_wrappable(&name) {
                        if let Some(close_idx) = find_matching_close(original, i, &name) {
                            // The tag-wrapping variant applies only when a
                            // single text run is the wrapper's entire
                            // content; anything richer goes through the
                            // base splice untouched.
                            let single_text = close_idx == i + 2 && !original[i + 1].is_markup;
                            if single_text || close_idx == i + 1 {
                                if let Some((fragment, new_cursor)) = self.rewrap(
                                    token,
                                    &original[close_idx],
                                    &name,
                                    translated,
                                    cursor,
                                ) {
                                    out.push_str(&fragment);
                                    cursor = new_cursor;
                                    i = close_idx + 1;
                                    continue;
                                }
                            }
                        }
                    }
                }
            }

            match splice_tag(translated, cursor, &token.raw) {
                Some((fragment, new_cursor)) => {
                    out.push_str(&fragment);
                    cursor = new_cursor;
                }
                None => {
                    debug!(
                        "reconstruct: no insertion point for {:?}, leaving stream unchanged",
                        token.raw
                    );
                }
            }
            i += 1;
        }

        out.push_str(&translated[cursor..]);

        if self.options.repair {
            out = repair::repair_markup(&out);
        }
        out
    }

    fn is_wrappable(&self, name: &str) -> bool {
        name == "a" || self.inline_tags.iter().any(|t| t == name)
    }

    /// Handle one inline-capable wrapper pair. Returns the output fragment
    /// (preceding text plus the re-emitted wrapper, or just the preceding
    /// text when an empty wrapper is dropped) and the new cursor, or None
    /// when the translated stream cannot be reconciled here and the base
    /// splice should run instead.
    fn rewrap(
        &self,
        open: &Token,
        close: &Token,
        name: &str,
        translated: &str,
        cursor: usize,
    ) -> Option<(String, usize)> {
        let rest = &translated[cursor..];

        let (preceding, inner_segment, end) = match rest.find('<') {
            // No markup left at all: extraction unwrapped the pair and the
            // remaining text is the wrapper's content.
            None => (String::new(), rest.to_string(), translated.len()),
            Some(rel) => {
                let tag_start = cursor + rel;
                let (found_raw, found_end) = parse_tag_at(translated, tag_start)?;
                let found = Token {
                    raw: found_raw,
                    is_markup: true,
                    end_offset: found_end,
                };
                let found_name = found.tag_name();

                if found_name.as_deref() == Some(name) && !found.is_closing() {
                    // Preserved pair: content runs to the matching close.
                    let close_start = find_closing(translated, found_end, name)?;
                    let (_, close_end) = parse_tag_at(translated, close_start)?;
                    (
                        translated[cursor..tag_start].to_string(),
                        translated[found_end..close_start].to_string(),
                        close_end,
                    )
                } else if found_name.as_deref() == Some(name) && found.is_closing() {
                    // Opening tag was dropped but the close survived.
                    (
                        String::new(),
                        translated[cursor..tag_start].to_string(),
                        found_end,
                    )
                } else {
                    // A foreign tag follows: the bare text before it is the
                    // wrapper's content; do not consume the foreign tag.
                    // With no text at all this is more likely a renamed
                    // tag than an unwrapped pair, so let the base splice
                    // handle it.
                    let inner = &translated[cursor..tag_start];
                    if inner.trim().is_empty() {
                        return None;
                    }
                    (String::new(), inner.to_string(), tag_start)
                }
            }
        };

        let inner_text = self.extractor.unwrap_inline(&inner_segment);

        // Anchors are never split apart: the pair stays intact and only
        // the text between the tags is substituted. For other wrappers an
        // empty translation drops the pair entirely; an empty wrapper is a
        // sign the original content had no independently meaningful text.
        let fragment = if name != "a" && inner_text.trim().is_empty() {
            debug!("reconstruct: dropping empty <{name}> wrapper");
            preceding
        } else {
            format!("{}{}{}{}", preceding, open.raw, inner_text, close.raw)
        };

        Some((fragment, end))
    }
}

/// Base splice: flush the text before the next `<` and replace the tag
/// found there with the original raw. None when no `<` remains or the tag
/// there is unterminated.
fn splice_tag(translated: &str, cursor: usize, raw: &str) -> Option<(String, usize)> {
    let rel = translated[cursor..].find('<')?;
    let tag_start = cursor + rel;
    let (_, after) = parse_tag_at(translated, tag_start)?;

    let mut fragment = String::with_capacity(tag_start - cursor + raw.len());
    fragment.push_str(&translated[cursor..tag_start]);
    fragment.push_str(raw);
    Some((fragment, after))
}

/// Parse the tag starting at `pos` (which must point at `<`); returns the
/// raw tag text and the offset just past its `>`.
fn parse_tag_at(s: &str, pos: usize) -> Option<(String, usize)> {
    let rel = s[pos..].find('>')?;
    let end = pos + rel + 1;
    Some((s[pos..end].to_string(), end))
}

/// Nearest following closing token `</name>` in the original sequence.
fn find_matching_close(tokens: &[Token], open_idx: usize, name: &str) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(open_idx + 1)
        .find(|(_, t)| t.is_closing() && t.tag_name().as_deref() == Some(name))
        .map(|(i, _)| i)
}

/// Case-insensitive search for a closing tag `</name` (followed by `>` or
/// whitespace) starting at `from`. Returns the byte offset of its `<`.
fn find_closing(s: &str, from: usize, name: &str) -> Option<usize> {
    let mut i = from;
    while let Some(rel) = s[i..].find("</") {
        let start = i + rel;
        let rest = &s[start + 2..];
        if let Some(prefix) = rest.get(..name.len()) {
            if prefix.eq_ignore_ascii_case(name) {
                if let Some(after) = rest.get(name.len()..) {
                    if after.starts_with('>') || after.starts_with(char::is_whitespace) {
                        return Some(start);
                    }
                }
            }
        }
        i = start + 2;
    }
    None
}
