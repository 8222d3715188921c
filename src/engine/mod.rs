/*!
 * HTML structural preservation engine.
 *
 * This is the core of the application: everything needed to push a markup
 * string through an external translator without letting the translator
 * touch the markup itself. It is split into several submodules:
 *
 * - `tokenizer`: single-pass scanner producing tag/comment and text tokens
 * - `extract`: translatable-text extraction and markup normalization
 * - `chunk`: overlapping-window coordination and structural validation
 * - `reconstruct`: re-weaving translated text into the original skeleton
 * - `repair`: post-pass fixing known degenerate translator output
 *
 * Every component is a pure function or an explicit state machine over
 * its inputs; the only state threaded between calls is `ChunkState`,
 * owned by a single chunked job.
 */

// Re-export main types for easier usage
pub use self::chunk::{
    ChunkCoordinator, ChunkState, ChunkWindow, StructuralMismatch, ValidationOutcome,
    plan_windows, validate_window,
};
pub use self::extract::{DEFAULT_INLINE_TAGS, TextExtractor, normalize, strip_tags};
pub use self::reconstruct::{ReconstructOptions, Reconstructor};
pub use self::repair::repair_markup;
pub use self::tokenizer::{Token, tokenize};

// Submodules
pub mod chunk;
pub mod extract;
pub mod reconstruct;
pub mod repair;
pub mod tokenizer;
