/*!
 * End-to-end CSV classification and folder workflow tests
 */

use anyhow::Result;
use tagloom::csv_store::CsvTable;
use tagloom::providers::mock::MockProvider;

use crate::common;

#[test]
fn test_process_file_shouldFillClassificationAndSelfCheckColumns() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_csv(&dir.path().to_path_buf(), "export.csv")?;
    let output = dir.path().join("export.processed.csv");

    let controller = common::controller_with_mock(common::test_config(), MockProvider::identity());
    let summary = controller.process_file(&input, &output)?;

    assert_eq!(summary.rows, 5);
    assert_eq!(summary.routed, 3);

    let table = CsvTable::read_from(&output)?;
    assert_eq!(table.get(0, "CONTENT_TYPE"), Some("RICH_TEXT"));
    assert_eq!(table.get(2, "CONTENT_TYPE"), Some("PLAIN_TEXT"));
    assert_eq!(table.get(3, "CONTENT_TYPE"), Some("CSS_JS"));
    assert_eq!(table.get(4, "CONTENT_TYPE"), Some("EMPTY"));

    // Strip-mode view of the markup.
    assert_eq!(table.get(0, "VALUE_translatable"), Some("Welcome to our site"));
    assert_eq!(
        table.get(1, "VALUE_translatable"),
        Some("Some useful content with a link.")
    );

    // Identity reconstruction must reproduce the normalized value.
    assert_eq!(table.get(0, "VALUE_processed"), Some("<h1>Welcome to our site</h1>"));
    assert_eq!(
        table.get(1, "VALUE_processed"),
        Some("<p>Some <b>useful</b> content with <a href=\"/more\">a link</a>.</p>")
    );
    Ok(())
}

#[tokio::test]
async fn test_translate_folder_shouldProcessEveryCsv() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();
    common::create_test_file(&dir_path, "one.csv", "KEY,VALUE\nk,<b>x</b>\n")?;
    common::create_test_file(&dir_path, "two.csv", "KEY,VALUE\nk,<i>y</i>\n")?;
    common::create_test_file(&dir_path, "notes.txt", "not a csv")?;

    let controller = common::controller_with_mock(common::test_config(), MockProvider::identity());
    let processed = controller.translate_folder(dir.path()).await?;
    assert_eq!(processed, 2);

    let one = CsvTable::read_from(dir_path.join("one.en.csv"))?;
    assert_eq!(one.get(0, "VALUE_EN"), Some("<b>x</b>"));
    let two = CsvTable::read_from(dir_path.join("two.en.csv"))?;
    assert_eq!(two.get(0, "VALUE_EN"), Some("<i>y</i>"));
    Ok(())
}

#[tokio::test]
async fn test_translate_folder_shouldSkipPreviousOutputs() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();
    common::create_test_file(&dir_path, "one.csv", "KEY,VALUE\nk,<b>x</b>\n")?;
    // A leftover output from an earlier run must not be re-translated.
    common::create_test_file(&dir_path, "one.en.csv", "KEY,VALUE,VALUE_EN\nk,<b>x</b>,<b>x</b>\n")?;

    let controller = common::controller_with_mock(common::test_config(), MockProvider::identity());
    let processed = controller.translate_folder(dir.path()).await?;
    assert_eq!(processed, 1);
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withMissingValueColumn_shouldError() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();
    let input = common::create_test_file(&dir_path, "bad.csv", "KEY,TEXT\nk,x\n")?;
    let output = dir.path().join("out.csv");

    let controller = common::controller_with_mock(common::test_config(), MockProvider::identity());
    let result = controller.translate_file(&input, &output).await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withPreclassifiedColumn_shouldRespectIt() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();
    // CONTENT_TYPE says PLAIN_TEXT even though the value carries markup;
    // the precomputed classification wins and the row is not routed.
    let input = common::create_test_file(
        &dir_path,
        "pre.csv",
        "KEY,VALUE,CONTENT_TYPE\nk,<b>keep me</b>,PLAIN_TEXT\n",
    )?;
    let output = dir.path().join("out.csv");

    let controller = common::controller_with_mock(common::test_config(), MockProvider::failing());
    let summary = controller.translate_file(&input, &output).await?;

    assert_eq!(summary.routed, 0);
    let table = CsvTable::read_from(&output)?;
    assert_eq!(table.get(0, "VALUE_EN"), Some("<b>keep me</b>"));
    Ok(())
}
