/*!
 * Application controller.
 *
 * Orchestrates the batch pipeline over a CSV table: load rows, classify
 * cell values, route eligible rows through the preservation engine and
 * the translation service, and write the table back out with the derived
 * columns filled in. Rows are processed concurrently; no engine state is
 * shared between them.
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use tokio::sync::Semaphore;
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::classifier::{ContentClassification, classify};
use crate::csv_store::CsvTable;
use crate::engine::{
    ChunkCoordinator, ReconstructOptions, Reconstructor, ValidationOutcome, normalize,
    plan_windows, strip_tags, tokenize,
};
use crate::translation::{TRANSLATION_FAILED_SENTINEL, TranslationService};

/// Summary of a classification run
#[derive(Debug, Default, Clone)]
pub struct ProcessSummary {
    /// Total data rows in the table
    pub rows: usize,
    /// Rows that would be routed to translation
    pub routed: usize,
}

/// Summary of a translation run
#[derive(Debug, Default, Clone)]
pub struct TranslateSummary {
    /// Total data rows in the table
    pub rows: usize,
    /// Rows routed through the engine
    pub routed: usize,
    /// Rows translated successfully
    pub translated: usize,
    /// Rows that ended with the failure sentinel
    pub failed: usize,
    /// Chunk windows rejected by structural validation
    pub rejected_windows: usize,
}

/// Per-row translation result, gathered from the concurrent stream.
struct RowOutcome {
    row: usize,
    output: String,
    rejected_windows: usize,
}

/// Main application controller
pub struct Controller {
    config: Config,
    service: TranslationService,
    reconstructor: Reconstructor,
}

impl Controller {
    /// Create a controller from the application configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(config.translation.clone())
            .context("Failed to create translation service")?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller with an explicit translation service - used by
    /// tests with mock providers.
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        let reconstructor = Reconstructor::new(
            &config.engine.inline_tags,
            ReconstructOptions {
                rewrite_inline: config.engine.rewrite_inline,
                repair: config.engine.repair,
            },
        );
        Self {
            config,
            service,
            reconstructor,
        }
    }

    /// Classify every row and fill the self-check columns, without
    /// translating anything.
    pub fn process_file<P: AsRef<Path>>(&self, input: P, output: P) -> Result<ProcessSummary> {
        let input = input.as_ref();
        let mut table = CsvTable::read_from(input)?;
        let value_col = self.require_value_column(&table, input)?;

        let type_idx = table.ensure_column(&self.config.columns.content_type);
        let translatable_idx =
            table.ensure_column(&format!("{}_translatable", self.config.columns.value));
        let processed_idx =
            table.ensure_column(&format!("{}_processed", self.config.columns.value));

        let mut summary = ProcessSummary {
            rows: table.len(),
            ..Default::default()
        };

        for row in 0..table.len() {
            let value = table.get(row, &value_col).unwrap_or("").to_string();
            let classification = classify(&value);
            if classification.is_routed() {
                summary.routed += 1;
            }

            let normalized = normalize(&value);
            let tokens = tokenize(&normalized);
            // Identity reconstruction doubles as a per-row self check: for
            // well-formed values it must reproduce the normalized input.
            let processed = self.reconstructor.reconstruct(&tokens, &normalized);

            table.set(row, type_idx, classification.to_string());
            table.set(row, translatable_idx, strip_tags(&normalized));
            table.set(row, processed_idx, processed);
        }

        table.write_to(output.as_ref())?;
        info!(
            "Classified {} rows ({} routable) into {:?}",
            summary.rows,
            summary.routed,
            output.as_ref()
        );
        Ok(summary)
    }

    /// Translate every routed row of a CSV file and write the result.
    pub async fn translate_file<P: AsRef<Path>>(
        &self,
        input: P,
        output: P,
    ) -> Result<TranslateSummary> {
        let input = input.as_ref();
        let mut table = CsvTable::read_from(input)?;
        let value_col = self.require_value_column(&table, input)?;

        let type_idx = table.ensure_column(&self.config.columns.content_type);
        let translated_idx = table.ensure_column(&self.config.translated_column());

        let mut summary = TranslateSummary {
            rows: table.len(),
            ..Default::default()
        };

        // Classify up front where the column is empty, then decide routing.
        let mut jobs: Vec<(usize, String)> = Vec::new();
        for row in 0..table.len() {
            let value = table.get(row, &value_col).unwrap_or("").to_string();

            let mut classification = table
                .get(row, &self.config.columns.content_type)
                .and_then(|s| ContentClassification::from_str(s).ok());
            if classification.is_none() {
                let computed = classify(&value);
                table.set(row, type_idx, computed.to_string());
                classification = Some(computed);
            }
            let classification = classification.unwrap_or(ContentClassification::Unknown);

            if !self.row_matches_context(&table, row) || !classification.is_routed() {
                // Rows outside the routing set keep their source value.
                table.set(row, translated_idx, value);
                continue;
            }
            jobs.push((row, value));
        }
        summary.routed = jobs.len();

        if jobs.is_empty() {
            warn!("No rows to translate in {input:?}");
            table.write_to(output.as_ref())?;
            return Ok(summary);
        }

        info!(
            "Translating {} of {} rows ({} -> {})",
            summary.routed, summary.rows, self.config.source_language, self.config.target_language
        );

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result);

        // Process rows concurrently; each row owns its engine state.
        let semaphore = Arc::new(Semaphore::new(self.config.translation.concurrent_rows));
        let outcomes: Vec<RowOutcome> = stream::iter(jobs.into_iter())
            .map(|(row, value)| {
                let semaphore = semaphore.clone();
                let progress_bar = progress_bar.clone();
                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");
                    let outcome = self.translate_value(row, &value).await;
                    progress_bar.inc(1);
                    outcome
                }
            })
            .buffer_unordered(self.config.translation.concurrent_rows)
            .collect()
            .await;
        progress_bar.finish_and_clear();

        for outcome in outcomes {
            if outcome.output == TRANSLATION_FAILED_SENTINEL {
                summary.failed += 1;
            } else {
                summary.translated += 1;
            }
            summary.rejected_windows += outcome.rejected_windows;
            table.set(outcome.row, translated_idx, outcome.output);
        }

        table.write_to(output.as_ref())?;
        info!(
            "Translated {}/{} routed rows ({} failed, {} windows rejected) into {:?}",
            summary.translated,
            summary.routed,
            summary.failed,
            summary.rejected_windows,
            output.as_ref()
        );
        Ok(summary)
    }

    /// Translate every CSV file under a directory.
    pub async fn translate_folder<P: AsRef<Path>>(&self, input_dir: P) -> Result<usize> {
        let input_dir = input_dir.as_ref();
        let mut processed = 0usize;

        for entry in WalkDir::new(input_dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            // Skip our own outputs from a previous run.
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            let suffix = format!(".{}", self.config.target_language);
            if stem.ends_with(&suffix) {
                continue;
            }

            let output = self.output_path_for(path);
            info!("Processing {:?}", path);
            match self.translate_file(path, output.as_path()).await {
                Ok(_) => processed += 1,
                Err(e) => error!("Failed to process {:?}: {}", path, e),
            }
        }

        info!("Finished processing {} files", processed);
        Ok(processed)
    }

    /// Output path for a translated CSV (`input.csv` -> `input.en.csv`).
    fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{}.{}.csv", stem, self.config.target_language);
        input.with_file_name(file_name)
    }

    /// Run the full preservation pipeline for one cell value. Never
    /// fails: translation errors yield the sentinel string so the batch
    /// can continue.
    async fn translate_value(&self, row: usize, value: &str) -> RowOutcome {
        let normalized = normalize(value);
        if normalized.is_empty() {
            return RowOutcome {
                row,
                output: String::new(),
                rejected_windows: 0,
            };
        }

        let tokens = tokenize(&normalized);
        let oversized = normalized.chars().count() > self.config.engine.chunk_max_size;

        if !oversized {
            return match self
                .service
                .translate(&normalized, None, &self.config.target_language)
                .await
            {
                Ok(translated) => RowOutcome {
                    row,
                    output: self.reconstructor.reconstruct(&tokens, &translated),
                    rejected_windows: 0,
                },
                Err(e) => {
                    error!("Row {}: translation failed: {}", row, e);
                    RowOutcome {
                        row,
                        output: TRANSLATION_FAILED_SENTINEL.to_string(),
                        rejected_windows: 0,
                    }
                }
            };
        }

        // Oversized content: overlapping windows with structural
        // validation; ChunkState lives entirely within this call.
        let windows = plan_windows(
            &normalized,
            self.config.engine.chunk_max_size,
            self.config.engine.chunk_overlap,
        );
        debug!("Row {}: split into {} windows", row, windows.len());

        let mut coordinator = ChunkCoordinator::new(&tokens);
        let mut raw_windows: Vec<String> = Vec::with_capacity(windows.len());
        let mut rejected_windows = 0usize;

        for window in &windows {
            let context = if window.context.is_empty() {
                None
            } else {
                Some(window.context.as_str())
            };
            let translated = match self
                .service
                .translate(&window.payload, context, &self.config.target_language)
                .await
            {
                Ok(translated) => translated,
                Err(e) => {
                    error!("Row {}: window translation failed: {}", row, e);
                    return RowOutcome {
                        row,
                        output: TRANSLATION_FAILED_SENTINEL.to_string(),
                        rejected_windows,
                    };
                }
            };

            if rejected_windows == 0 {
                if let ValidationOutcome::Rejected { mismatch, .. } =
                    coordinator.accept(&translated)
                {
                    // Non-fatal: keep translating, fall back to the raw
                    // concatenation for this row.
                    warn!("Row {}: window rejected ({})", row, mismatch);
                    rejected_windows += 1;
                }
            }
            raw_windows.push(translated);
        }

        let merged = if rejected_windows == 0 {
            coordinator.finish()
        } else {
            raw_windows.concat()
        };

        RowOutcome {
            row,
            output: self.reconstructor.reconstruct(&tokens, &merged),
            rejected_windows,
        }
    }

    /// True when the row passes the optional context filter.
    fn row_matches_context(&self, table: &CsvTable, row: usize) -> bool {
        match &self.config.context_filter {
            None => true,
            Some(wanted) => table
                .get(row, &self.config.columns.context)
                .is_some_and(|c| c == wanted),
        }
    }

    fn require_value_column(&self, table: &CsvTable, input: &Path) -> Result<String> {
        let name = self.config.columns.value.clone();
        if table.column_index(&name).is_none() {
            return Err(anyhow!("CSV {input:?} is missing the {name:?} column"));
        }
        Ok(name)
    }
}
