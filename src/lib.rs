/*!
 * # tagloom - structure-preserving CSV content translation
 *
 * A Rust library for translating web-page content stored in CSV cells
 * while guaranteeing that the surrounding markup is never altered - only
 * the human-readable text inside it is replaced.
 *
 * ## Features
 *
 * - Finite-state markup tokenizer (tags, comments, text runs)
 * - Translatable-text extraction with strip and selective-inline modes
 * - Overlapping-window chunking with structural validation for long content
 * - Reconstruction of translated text into the original tag skeleton,
 *   with repair of known degenerate translator output
 * - Content classification for routing rows to translation
 * - Translation via OpenAI or Anthropic APIs
 * - Concurrent batch processing over CSV tables
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `engine`: the structural preservation core:
 *   - `engine::tokenizer`: markup tokenization
 *   - `engine::extract`: text extraction and normalization
 *   - `engine::chunk`: chunk coordination and validation
 *   - `engine::reconstruct`: reconstruction of translated output
 *   - `engine::repair`: structural repair post-pass
 * - `classifier`: content classification by tag vocabulary
 * - `csv_store`: tabular store adapter
 * - `translation`: translation service over the configured provider
 * - `providers`: client implementations for LLM providers:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: deterministic provider for tests
 * - `app_config`: configuration management
 * - `app_controller`: batch pipeline controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod csv_store;
pub mod engine;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use classifier::{ContentClassification, classify};
pub use csv_store::CsvTable;
pub use engine::{ChunkState, Reconstructor, Token, normalize, strip_tags, tokenize};
pub use errors::{AppError, ProviderError, TranslationError};
pub use translation::{TRANSLATION_FAILED_SENTINEL, TranslationService};
