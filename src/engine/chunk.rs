/*!
 * Chunk coordination and structural validation for oversized content.
 *
 * Content longer than the configured threshold is split into consecutive
 * payload windows; the tail of each window travels with the next one as
 * translation context only, so window outputs never duplicate material.
 * Each translated window is reconciled against the slice of the original
 * token sequence it is expected to replace before it joins the merged
 * output.
 *
 * Chunk boundaries frequently fall inside a sentence rather than at a tag
 * boundary. A window whose final token is unterminated text is therefore
 * not an error: that trailing fragment is carried forward as `leftover`
 * and re-tokenized together with the next window, so the continuation is
 * reconciled instead of rejected.
 */

use log::{debug, error};

use super::tokenizer::{Token, tokenize};

/// Cursor/leftover state threaded through successive window validations.
///
/// One instance exists per chunked translation job; it must never be
/// shared between concurrently processed rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkState {
    /// Number of original tokens structurally accepted so far.
    pub cursor: usize,

    /// Unterminated trailing text carried into the next window.
    pub leftover: String,
}

/// Description of a structural disagreement between a translated window
/// and the original token slice it was expected to replace.
#[derive(Debug, Clone)]
pub struct StructuralMismatch {
    /// Original token range that was under comparison (half-open).
    pub original_range: (usize, usize),

    /// Translated token range that was under comparison (half-open).
    pub translated_range: (usize, usize),

    /// Name key of the original token at the mismatch point.
    pub expected: String,

    /// Name key of the translated token at the mismatch point.
    pub found: String,
}

impl std::fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "structure mismatch: original {}..{} vs translated {}..{} (expected {:?}, found {:?})",
            self.original_range.0,
            self.original_range.1,
            self.translated_range.0,
            self.translated_range.1,
            self.expected,
            self.found
        )
    }
}

/// Outcome of validating one translated window.
///
/// Rejection is a normal result, not an error: the caller decides whether
/// to retry the window or fall back to the raw translated text.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// The window's structure agrees with the original slice.
    Accepted {
        /// State after consuming the window.
        state: ChunkState,
        /// Number of original tokens confirmed by this window.
        confirmed: usize,
        /// Translated text confirmed for the merged output.
        consumed: String,
    },

    /// The window disagrees structurally; state is left unchanged.
    Rejected {
        /// What disagreed, and where.
        mismatch: StructuralMismatch,
        /// The state exactly as it was before this window.
        state: ChunkState,
    },
}

impl ValidationOutcome {
    /// True for the accepted variant.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// One translation window: the payload to translate plus the preceding
/// overlap handed to the translator as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkWindow {
    /// Tail of the previous payload, for cross-window context. Empty for
    /// the first window.
    pub context: String,

    /// The text the translator must actually translate.
    pub payload: String,
}

/// Split content into consecutive payload windows of at most `max_size`
/// characters, each carrying the previous payload's trailing `overlap`
/// characters as context. Windows are contiguous and non-overlapping in
/// payload; boundaries are plain character boundaries.
pub fn plan_windows(content: &str, max_size: usize, overlap: usize) -> Vec<ChunkWindow> {
    let max_size = max_size.max(1);
    let mut windows: Vec<ChunkWindow> = Vec::new();
    let mut start = 0usize;

    while start < content.len() {
        let end = offset_after_chars(content, start, max_size);
        let payload = &content[start..end];
        let context = windows
            .last()
            .map(|prev| tail_chars(&prev.payload, overlap).to_string())
            .unwrap_or_default();
        windows.push(ChunkWindow {
            context,
            payload: payload.to_string(),
        });
        start = end;
    }

    if windows.is_empty() {
        windows.push(ChunkWindow {
            context: String::new(),
            payload: String::new(),
        });
    }
    windows
}

/// Byte offset after advancing `count` characters from `start`.
fn offset_after_chars(s: &str, start: usize, count: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(count)
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}

/// The last `count` characters of a string.
fn tail_chars(s: &str, count: usize) -> &str {
    let total = s.chars().count();
    if total <= count {
        return s;
    }
    let skip = total - count;
    match s.char_indices().nth(skip) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}

/// Reconcile one translated window against the original structure.
///
/// Tokenizes `leftover + translated_window` and pairwise-compares it, in
/// order, with the original sequence starting at `state.cursor`. Two
/// tokens match iff both are markup or both are text; markup additionally
/// requires case-insensitively equal name keys.
///
/// On full match the cursor advances by the matched count; a final text
/// token is held back as the new leftover (the window ended mid-text).
/// On the first mismatch the window is rejected and state is unchanged.
pub fn validate_window(
    original: &[Token],
    state: &ChunkState,
    translated_window: &str,
) -> ValidationOutcome {
    let combined = format!("{}{}", state.leftover, translated_window);
    let translated = tokenize(&combined);

    if translated.is_empty() {
        return ValidationOutcome::Accepted {
            state: state.clone(),
            confirmed: 0,
            consumed: String::new(),
        };
    }

    let remaining = &original[state.cursor.min(original.len())..];
    for (i, (orig, trans)) in remaining.iter().zip(translated.iter()).enumerate() {
        let matches = orig.is_markup == trans.is_markup
            && (!orig.is_markup || orig.name_key() == trans.name_key());
        if !matches {
            let mismatch = StructuralMismatch {
                original_range: (state.cursor, state.cursor + i),
                translated_range: (0, i),
                expected: orig.name_key(),
                found: trans.name_key(),
            };
            error!("{mismatch}");
            return ValidationOutcome::Rejected {
                mismatch,
                state: state.clone(),
            };
        }
    }

    let matched = remaining.len().min(translated.len());
    if matched == 0 {
        // Original structure already exhausted; nothing left to confirm.
        debug!("chunk validation: original exhausted at cursor {}", state.cursor);
        return ValidationOutcome::Accepted {
            state: state.clone(),
            confirmed: 0,
            consumed: String::new(),
        };
    }

    let last = &translated[matched - 1];
    let (confirmed, leftover) = if last.is_markup {
        (matched, String::new())
    } else {
        // The window ended mid-text; hold the trailing fragment back so
        // the next window is reconciled as a continuation.
        (matched - 1, last.raw.clone())
    };

    let consumed: String = translated[..confirmed]
        .iter()
        .map(|t| t.raw.as_str())
        .collect();

    ValidationOutcome::Accepted {
        state: ChunkState {
            cursor: state.cursor + confirmed,
            leftover,
        },
        confirmed,
        consumed,
    }
}

/// Drives window validation for one chunked job and accumulates the
/// structurally confirmed output.
#[derive(Debug)]
pub struct ChunkCoordinator<'a> {
    original: &'a [Token],
    state: ChunkState,
    merged: String,
}

impl<'a> ChunkCoordinator<'a> {
    /// New coordinator over the original token sequence of one content
    /// string.
    pub fn new(original: &'a [Token]) -> Self {
        Self {
            original,
            state: ChunkState::default(),
            merged: String::new(),
        }
    }

    /// Current cursor/leftover state.
    pub fn state(&self) -> &ChunkState {
        &self.state
    }

    /// Validate one translated window. On acceptance the confirmed text
    /// joins the merged output and state advances; on rejection nothing
    /// changes and the outcome carries the mismatch.
    pub fn accept(&mut self, translated_window: &str) -> ValidationOutcome {
        let outcome = validate_window(self.original, &self.state, translated_window);
        if let ValidationOutcome::Accepted { state, consumed, .. } = &outcome {
            self.merged.push_str(consumed);
            self.state = state.clone();
        }
        outcome
    }

    /// Finish the job: flush any trailing leftover and return the merged
    /// translated content.
    pub fn finish(mut self) -> String {
        self.merged.push_str(&self.state.leftover);
        self.merged
    }
}
