/*!
 * Tabular store adapter.
 *
 * Cell values are opaque strings to the rest of the application; this
 * module only knows how to load a CSV into memory, look cells up by
 * column name, append derived columns, and write the table back out.
 * Ragged rows are tolerated on read and padded to the header width.
 */

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};

/// An in-memory CSV table with named columns.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl CsvTable {
    /// Create an empty table with the given headers - used by tests.
    pub fn with_headers<S: Into<String>>(headers: Vec<S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Load a table from a CSV file.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {path:?}"))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read CSV headers: {path:?}"))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("Failed to read CSV record: {path:?}"))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            records.push(row);
        }

        Ok(Self { headers, records })
    }

    /// Write the table to a CSV file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .with_context(|| format!("Failed to create CSV file: {path:?}"))?;

        writer
            .write_record(&self.headers)
            .context("Failed to write CSV headers")?;
        for row in &self.records {
            writer.write_record(row).context("Failed to write CSV record")?;
        }
        writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column headers, in order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.records.get(row).and_then(|r| r.get(idx)).map(String::as_str)
    }

    /// Append a data row - used by tests.
    pub fn push_row<S: Into<String>>(&mut self, row: Vec<S>) {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.records.push(row);
    }

    /// Index of a column, appending it (and padding every row) when it
    /// does not exist yet.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        let width = self.headers.len();
        for row in &mut self.records {
            row.resize(width, String::new());
        }
        width - 1
    }

    /// Set a cell by row and column index.
    pub fn set(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self.records.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }
}
