/*!
 * Common test utilities for the yaltwai test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use yaltwai::app_config::Config;
use yaltwai::app_controller::Controller;
use yaltwai::providers::Provider;
use yaltwai::translation::{BatchTranslator, TranslationOptions, TranslationService};

// Re-export the mock providers module
pub mod mock_providers;

/// Route library logs to the test output; `RUST_LOG` picks the level
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample `.strings` file with two entries
pub const SAMPLE_STRINGS: &str = r#"/* Greetings */
"hello" = "Hello";
"bye" = "Goodbye";
"#;

/// Sample ARB file with a described message and a placeholder
pub const SAMPLE_ARB: &str = r#"{
  "@@locale": "en",
  "title": "Inbox",
  "@title": {
    "description": "Screen title"
  },
  "greeting": "Hello {name}",
  "@greeting": {
    "placeholders": {
      "name": { "type": "String" }
    }
  }
}"#;

/// Sample Electron locale file
pub const SAMPLE_ELECTRON: &str = r#"{
  "menu.file": "File",
  "menu.quit": "Quit",
  "window.count": 3
}"#;

/// Sample string catalog with one untranslatable entry
pub const SAMPLE_CATALOG: &str = r#"{
  "sourceLanguage" : "en",
  "strings" : {
    "cancel" : {
      "localizations" : {
        "en" : { "stringUnit" : { "state" : "translated", "value" : "Cancel" } }
      }
    },
    "ok" : {
      "localizations" : {
        "en" : { "stringUnit" : { "state" : "translated", "value" : "OK" } }
      }
    },
    "version" : {
      "shouldTranslate" : false
    }
  },
  "version" : "1.0"
}"#;

/// Batch translator over `provider` without pauses between requests
pub fn test_translator(provider: Arc<dyn Provider>, batch_size: usize) -> BatchTranslator {
    let service = TranslationService::with_provider(provider, TranslationOptions::default());
    BatchTranslator::new(service)
        .with_batch_size(batch_size)
        .with_delay(Duration::ZERO)
}

/// Controller over `provider` with the default configuration and no progress bars
pub fn test_controller(provider: Arc<dyn Provider>) -> Controller {
    Controller::with_translator(Config::default(), test_translator(provider, 10)).without_progress()
}

/// Read a file written by a test
pub fn read_output(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("missing output {}: {}", path.display(), e))
}
