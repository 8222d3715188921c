/*!
 * Common test utilities for the tagloom test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use tagloom::app_config::Config;
use tagloom::app_controller::Controller;
use tagloom::providers::mock::MockProvider;
use tagloom::translation::TranslationService;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample CSV export for testing
pub fn create_test_csv(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "\
KEY,VALUE,CONTEXT
home.title,<h1>Welcome to our site</h1>,PAGE
home.intro,\"<p>Some <b>useful</b> content with <a href=\"\"/more\"\">a link</a>.</p>\",PAGE
home.note,plain text without markup,PAGE
footer.style,<style>.a{}</style>,LAYOUT
empty.value,,PAGE
";
    create_test_file(dir, filename, content)
}

/// Controller wired to a mock provider with the given behavior
pub fn controller_with_mock(config: Config, provider: MockProvider) -> Controller {
    let service = TranslationService::with_mock(provider, config.translation.clone());
    Controller::with_service(config, service)
}

/// Default configuration for tests (identity-friendly: no context filter)
pub fn test_config() -> Config {
    Config::default()
}
