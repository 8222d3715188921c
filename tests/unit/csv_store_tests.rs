/*!
 * Tests for the tabular store adapter
 */

use anyhow::Result;
use tagloom::csv_store::CsvTable;

use crate::common;

#[test]
fn test_read_from_withSampleExport_shouldExposeCells() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_csv(&dir.path().to_path_buf(), "export.csv")?;

    let table = CsvTable::read_from(&path)?;

    assert_eq!(table.len(), 5);
    assert_eq!(table.get(0, "KEY"), Some("home.title"));
    assert_eq!(table.get(0, "VALUE"), Some("<h1>Welcome to our site</h1>"));
    // Quoted field with embedded quotes parses back to clean markup.
    assert_eq!(
        table.get(1, "VALUE"),
        Some("<p>Some <b>useful</b> content with <a href=\"/more\">a link</a>.</p>")
    );
    assert_eq!(table.get(4, "VALUE"), Some(""));
    Ok(())
}

#[test]
fn test_derived_column_workflow_shouldSurviveRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_csv(&dir.path().to_path_buf(), "export.csv")?;
    let output = dir.path().join("out.csv");

    let mut table = CsvTable::read_from(&input)?;
    let idx = table.ensure_column("VALUE_EN");
    for row in 0..table.len() {
        let value = table.get(row, "VALUE").unwrap_or("").to_string();
        table.set(row, idx, value);
    }
    table.write_to(&output)?;

    let reloaded = CsvTable::read_from(&output)?;
    assert_eq!(reloaded.headers().last().map(String::as_str), Some("VALUE_EN"));
    assert_eq!(reloaded.get(0, "VALUE_EN"), reloaded.get(0, "VALUE"));
    Ok(())
}

#[test]
fn test_read_from_withMissingFile_shouldError() {
    let result = CsvTable::read_from("/definitely/not/here.csv");
    assert!(result.is_err());
}
