/*!
 * Electron locale files (`.json`).
 *
 * A flat JSON object mapping message keys to strings. Non-string values
 * are copied unchanged and never translated.
 */

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::FormatError;

/// Parsed Electron locale document, in file order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElectronDocument {
    entries: Map<String, Value>,
}

impl ElectronDocument {
    /// Parse locale JSON; the root must be an object
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(content).map_err(|e| FormatError::Parse {
            format: "json",
            message: e.to_string(),
        })?;

        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(FormatError::Parse {
                format: "json",
                message: "top-level value must be an object".to_string(),
            }),
        }
    }

    /// Keys of translatable entries, in file order
    pub fn translatable_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, value)| matches!(value, Value::String(text) if !text.is_empty()))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// String values, in file order
    pub fn extract(&self) -> Vec<String> {
        self.entries
            .values()
            .filter_map(|value| match value {
                Value::String(text) if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Same keys with the translated values, positionally
    pub fn assemble(&self, translations: &[String]) -> Result<Self, FormatError> {
        let expected = self.translatable_keys().len();
        if translations.len() != expected {
            return Err(FormatError::Structure(format!(
                "expected {} translations, got {}",
                expected,
                translations.len()
            )));
        }

        let mut next = translations.iter();
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(text) if !text.is_empty() => {
                        next.next().map(|t| Value::String(t.clone())).unwrap_or_else(|| value.clone())
                    }
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Same keys with every string value emptied
    pub fn needs_review(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| match value {
                Value::String(_) => (key.clone(), Value::String(String::new())),
                other => (key.clone(), other.clone()),
            })
            .collect();
        Self { entries }
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON
    pub fn render(&self) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(&self.entries)?;
        json.push('\n');
        Ok(json)
    }
}

/// `<output_dir>/locale-<code>.json`
pub fn electron_path(output_dir: &Path, language: &str) -> PathBuf {
    output_dir.join(format!("locale-{}.json", language))
}
