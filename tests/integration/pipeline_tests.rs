/*!
 * Full pipeline tests against mock providers
 */

use anyhow::Result;
use tagloom::csv_store::CsvTable;
use tagloom::providers::mock::MockProvider;
use tagloom::translation::TRANSLATION_FAILED_SENTINEL;

use crate::common;

#[tokio::test]
async fn test_translate_file_withIdentityProvider_shouldPreserveStructure() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_csv(&dir.path().to_path_buf(), "export.csv")?;
    let output = dir.path().join("export.en.csv");

    let controller = common::controller_with_mock(common::test_config(), MockProvider::identity());
    let summary = controller.translate_file(&input, &output).await?;

    assert_eq!(summary.rows, 5);
    // Markup and CSS rows are routed; plain text and empty rows are not.
    assert_eq!(summary.routed, 3);
    assert_eq!(summary.translated, 3);
    assert_eq!(summary.failed, 0);

    let table = CsvTable::read_from(&output)?;
    // Identity translation + structure preservation = normalized input.
    assert_eq!(table.get(0, "VALUE_EN"), Some("<h1>Welcome to our site</h1>"));
    assert_eq!(
        table.get(1, "VALUE_EN"),
        Some("<p>Some <b>useful</b> content with <a href=\"/more\">a link</a>.</p>")
    );
    // Unrouted rows keep their source value.
    assert_eq!(table.get(2, "VALUE_EN"), Some("plain text without markup"));
    assert_eq!(table.get(4, "VALUE_EN"), Some(""));
    // Classification landed in the content type column.
    assert_eq!(table.get(0, "CONTENT_TYPE"), Some("RICH_TEXT"));
    assert_eq!(table.get(2, "CONTENT_TYPE"), Some("PLAIN_TEXT"));
    assert_eq!(table.get(3, "CONTENT_TYPE"), Some("CSS_JS"));
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withTagStrippingProvider_shouldRestoreWrappers() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();
    let input = common::create_test_file(
        &dir_path,
        "in.csv",
        "KEY,VALUE\nk1,<h2>Title</h2>\nk2,\"<a href=\"\"/x\"\">Click here</a>\"\n",
    )?;
    let output = dir.path().join("out.csv");

    // This "translator" throws all markup away; the engine rebuilds it.
    let controller =
        common::controller_with_mock(common::test_config(), MockProvider::tag_stripping());
    let summary = controller.translate_file(&input, &output).await?;
    assert_eq!(summary.translated, 2);

    let table = CsvTable::read_from(&output)?;
    assert_eq!(table.get(0, "VALUE_EN"), Some("<h2>Title</h2>"));
    assert_eq!(table.get(1, "VALUE_EN"), Some("<a href=\"/x\">Click here</a>"));
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withTagRenamingProvider_shouldRestoreOriginalTags() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();
    let input = common::create_test_file(&dir_path, "in.csv", "KEY,VALUE\nk1,<p>Hello</p>\n")?;
    let output = dir.path().join("out.csv");

    let controller =
        common::controller_with_mock(common::test_config(), MockProvider::tag_renaming());
    controller.translate_file(&input, &output).await?;

    let table = CsvTable::read_from(&output)?;
    // The provider renamed <p> to <div>; reconstruction puts <p> back.
    assert_eq!(table.get(0, "VALUE_EN"), Some("<p>Hello</p>"));
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withFailingProvider_shouldWriteSentinelAndContinue() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_csv(&dir.path().to_path_buf(), "export.csv")?;
    let output = dir.path().join("out.csv");

    let controller = common::controller_with_mock(common::test_config(), MockProvider::failing());
    let summary = controller.translate_file(&input, &output).await?;

    assert_eq!(summary.failed, summary.routed);
    assert_eq!(summary.translated, 0);

    let table = CsvTable::read_from(&output)?;
    assert_eq!(table.get(0, "VALUE_EN"), Some(TRANSLATION_FAILED_SENTINEL));
    // Unrouted rows are untouched by the failure.
    assert_eq!(table.get(2, "VALUE_EN"), Some("plain text without markup"));
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withContextFilter_shouldSkipOtherContexts() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let input = common::create_test_csv(&dir.path().to_path_buf(), "export.csv")?;
    let output = dir.path().join("out.csv");

    let mut config = common::test_config();
    config.context_filter = Some("PAGE".to_string());
    let controller = common::controller_with_mock(config, MockProvider::identity());
    let summary = controller.translate_file(&input, &output).await?;

    // The CSS row sits in the LAYOUT context and is filtered out.
    assert_eq!(summary.routed, 2);

    let table = CsvTable::read_from(&output)?;
    assert_eq!(table.get(3, "VALUE_EN"), Some("<style>.a{}</style>"));
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withChunkedContent_shouldReassembleExactly() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();

    // Long paragraph, comfortably above the tiny chunk threshold below.
    let sentence = "This clause keeps the paragraph going and going. ";
    let long_value = format!("<p>{}</p>", sentence.repeat(10).trim_end());
    let input = common::create_test_file(
        &dir_path,
        "in.csv",
        &format!("KEY,VALUE\nk1,\"{}\"\n", long_value),
    )?;
    let output = dir.path().join("out.csv");

    let mut config = common::test_config();
    config.engine.chunk_max_size = 80;
    config.engine.chunk_overlap = 20;
    let controller = common::controller_with_mock(config, MockProvider::identity());
    let summary = controller.translate_file(&input, &output).await?;

    assert_eq!(summary.translated, 1);
    assert_eq!(summary.rejected_windows, 0);

    let table = CsvTable::read_from(&output)?;
    let translated = table.get(0, "VALUE_EN").unwrap();
    // The wrapper appears exactly once; the sentence text is complete.
    assert_eq!(translated.matches("<p>").count(), 1);
    assert_eq!(translated.matches("</p>").count(), 1);
    assert_eq!(translated, long_value);
    Ok(())
}

#[tokio::test]
async fn test_translate_file_withChunkedRenamingProvider_shouldFallBackAndRestore() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let dir_path = dir.path().to_path_buf();

    let sentence = "Another clause to stretch the content past the threshold. ";
    let long_value = format!("<p>{}</p>", sentence.repeat(8).trim_end());
    let input = common::create_test_file(
        &dir_path,
        "in.csv",
        &format!("KEY,VALUE\nk1,\"{}\"\n", long_value),
    )?;
    let output = dir.path().join("out.csv");

    let mut config = common::test_config();
    config.engine.chunk_max_size = 80;
    config.engine.chunk_overlap = 20;
    let controller = common::controller_with_mock(config, MockProvider::tag_renaming());
    let summary = controller.translate_file(&input, &output).await?;

    // The first window's <p> arrives renamed, so validation rejects it and
    // the row falls back to the raw concatenation; reconstruction still
    // restores the original tags.
    assert_eq!(summary.rejected_windows, 1);

    let table = CsvTable::read_from(&output)?;
    let translated = table.get(0, "VALUE_EN").unwrap();
    assert_eq!(translated, long_value);
    Ok(())
}
