/*!
 * Apple `.strings` files.
 *
 * A `.strings` file is a list of `"key" = "value";` pairs with C-style
 * comments. One file holds one language; translated output goes to
 * `<code>.lproj/Localizable.strings` under the output directory.
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FormatError;
use super::TranslationState;

static PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#)
        .expect("strings pair pattern is valid")
});

const HEADER: &str = "/* Generated by yaltwai */";
const NEEDS_REVIEW_MARKER: &str = "/* needs_review: translation failed, values were left empty */";

/// Parsed `.strings` document, keyed and ordered by key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringsDocument {
    /// Key to (unescaped) value
    pub entries: BTreeMap<String, String>,
    /// Review state of every value, when the document is a translation output
    pub state: Option<TranslationState>,
}

impl StringsDocument {
    /// Parse the text of a `.strings` file
    ///
    /// Blank lines, `//` line comments and `/* */` block comments are skipped;
    /// a key defined twice keeps its last value.
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        let mut entries = BTreeMap::new();
        let mut in_block_comment = false;

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim().trim_start_matches('\u{feff}');

            if in_block_comment {
                if trimmed.contains("*/") {
                    in_block_comment = false;
                }
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            if trimmed.starts_with("/*") {
                in_block_comment = !trimmed.contains("*/");
                continue;
            }

            match PAIR_RE.captures(trimmed) {
                Some(caps) => {
                    let key = unescape(&caps[1]);
                    let value = unescape(&caps[2]);
                    entries.insert(key, value);
                }
                None => debug!("Skipping unrecognized .strings line {}: {}", line_no + 1, trimmed),
            }
        }

        if entries.is_empty() && !content.trim().is_empty() && !in_block_comment {
            let has_pairs = content.contains('=');
            if has_pairs {
                return Err(FormatError::Parse {
                    format: "strings",
                    message: "no \"key\" = \"value\"; pairs found".to_string(),
                });
            }
        }

        Ok(Self { entries, state: None })
    }

    /// Keys with a non-empty value, in key order
    pub fn translatable_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Translatable values, in key order
    pub fn extract(&self) -> Vec<String> {
        self.entries
            .values()
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Same keys with the translated values, positionally in key order
    ///
    /// Entries whose source value is empty stay empty.
    pub fn assemble(&self, translations: &[String]) -> Result<Self, FormatError> {
        let keys = self.translatable_keys();
        if translations.len() != keys.len() {
            return Err(FormatError::Structure(format!(
                "expected {} translations, got {}",
                keys.len(),
                translations.len()
            )));
        }

        let mut entries: BTreeMap<String, String> = self
            .entries
            .keys()
            .map(|key| (key.clone(), String::new()))
            .collect();
        for (key, translation) in keys.into_iter().zip(translations) {
            entries.insert(key.to_string(), translation.clone());
        }

        Ok(Self { entries, state: Some(TranslationState::Translated) })
    }

    /// Same keys with empty values, flagged for review
    pub fn needs_review(&self) -> Self {
        Self {
            entries: self.entries.keys().map(|key| (key.clone(), String::new())).collect(),
            state: Some(TranslationState::NeedsReview),
        }
    }

    /// Render as `.strings` text, one sorted pair per line
    pub fn render(&self) -> String {
        let mut content = String::from(HEADER);
        content.push('\n');
        if self.state == Some(TranslationState::NeedsReview) {
            content.push_str(NEEDS_REVIEW_MARKER);
            content.push('\n');
        }
        content.push('\n');

        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("\"{}\" = \"{}\";", escape(key), escape(value)))
            .collect();
        content.push_str(&lines.join("\n"));

        if !content.ends_with('\n') {
            content.push('\n');
        }
        content
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `<output_dir>/<code>.lproj/Localizable.strings`
pub fn lproj_path(output_dir: &Path, language: &str) -> PathBuf {
    output_dir
        .join(format!("{}.lproj", language))
        .join("Localizable.strings")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}
