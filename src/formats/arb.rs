/*!
 * Flutter Application Resource Bundles (`.arb`).
 *
 * ARB files are JSON objects where plain keys hold messages, `@key` blocks
 * hold metadata for the message of the same name and `@@` keys are file
 * attributes such as `@@locale`. Message values and metadata descriptions
 * are translated; placeholders and attributes are copied.
 */

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::FormatError;
use super::json_tree::LocNode;
use super::TranslationState;

/// Attribute recording the review state of a generated file
pub const STATE_ATTRIBUTE: &str = "@@x-translation-state";

/// Parsed ARB document
#[derive(Debug, Clone, PartialEq)]
pub struct ArbDocument {
    root: LocNode,
}

impl ArbDocument {
    /// Parse ARB JSON
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(content).map_err(|e| FormatError::Parse {
            format: "arb",
            message: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// Classify an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        Ok(Self { root: LocNode::from_document(value, "arb")? })
    }

    /// Locale declared by the file
    pub fn locale(&self) -> Option<&str> {
        self.root.locale()
    }

    /// Messages and descriptions, in document order
    pub fn extract(&self) -> Vec<String> {
        self.root.leaves()
    }

    /// Document for `language` with the translations substituted in order
    pub fn assemble(&self, translations: &[String], language: &str) -> Result<Self, FormatError> {
        let root = self
            .root
            .fill(translations)?
            .with_locale(language)
            .with_attribute(STATE_ATTRIBUTE, Value::from(TranslationState::Translated.as_str()));
        Ok(Self { root })
    }

    /// Document for `language` with every translatable value emptied
    pub fn needs_review(&self, language: &str) -> Self {
        let root = self
            .root
            .map_leaves(&mut |_| String::new())
            .with_locale(language)
            .with_attribute(STATE_ATTRIBUTE, Value::from(TranslationState::NeedsReview.as_str()));
        Self { root }
    }

    /// Review state recorded in the file, if any
    pub fn state(&self) -> Option<String> {
        self.to_value()
            .get(STATE_ATTRIBUTE)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// JSON value with the original member order
    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }

    /// Pretty-printed JSON
    pub fn render(&self) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(&self.to_value())?;
        json.push('\n');
        Ok(json)
    }
}

/// `<output_dir>/app_<code>.arb`
pub fn arb_path(output_dir: &Path, language: &str) -> PathBuf {
    output_dir.join(format!("app_{}.arb", language))
}
