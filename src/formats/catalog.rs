/*!
 * Xcode string catalogs (`.xcstrings`).
 *
 * A catalog is a JSON document holding every language in one file:
 *
 * ```json
 * { "sourceLanguage": "en", "version": "1.0",
 *   "strings": { "Hello": { "localizations": {
 *       "fr": { "stringUnit": { "state": "translated", "value": "Bonjour" } } } } } }
 * ```
 *
 * Fields this module does not interpret (comments, extraction state,
 * plural variations, substitutions) are carried through untouched.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::FormatError;
use super::strings::StringsDocument;
use super::TranslationState;

/// Root of an `.xcstrings` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringCatalog {
    /// Language the keys and source values are written in
    pub source_language: String,

    /// Entries keyed by source string
    #[serde(default)]
    pub strings: BTreeMap<String, CatalogEntry>,

    /// Catalog format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Unknown top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Per-language values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localizations: BTreeMap<String, Localization>,

    /// `false` marks entries that must never be translated
    #[serde(rename = "shouldTranslate", default, skip_serializing_if = "Option::is_none")]
    pub should_translate: Option<bool>,

    /// Comment, extraction state and other untouched fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Value of one entry in one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Localization {
    /// Plain string value
    #[serde(rename = "stringUnit", default, skip_serializing_if = "Option::is_none")]
    pub string_unit: Option<StringUnit>,

    /// Variations, substitutions and other untouched fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// State and value pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringUnit {
    /// `translated`, `needs_review`, or another Xcode state
    pub state: String,
    /// Localized text
    pub value: String,
}

impl Localization {
    /// Whether the value is split into plural or device variations
    pub fn has_variations(&self) -> bool {
        self.extra.contains_key("variations")
    }
}

impl StringUnit {
    /// Unit with one of our states
    pub fn new(state: TranslationState, value: impl Into<String>) -> Self {
        Self { state: state.as_str().to_string(), value: value.into() }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StringCatalog {
    /// Empty catalog
    pub fn new(source_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            strings: BTreeMap::new(),
            version: default_version(),
            extra: Map::new(),
        }
    }

    /// Parse catalog JSON
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        serde_json::from_str(content).map_err(|e| FormatError::Parse {
            format: "xcstrings",
            message: e.to_string(),
        })
    }

    /// Render as pretty-printed JSON
    pub fn render(&self) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Catalog whose every key is its own source value
    pub fn skeleton<I, S>(keys: I, source_language: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::new(source_language);
        for key in keys {
            let key = key.into();
            let entry = source_entry(source_language, &key);
            catalog.strings.insert(key, entry);
        }
        catalog
    }

    /// Catalog holding the pairs of a `.strings` file as source values
    pub fn from_strings(document: &StringsDocument, source_language: &str) -> Self {
        let mut catalog = Self::new(source_language);
        for (key, value) in &document.entries {
            catalog.strings.insert(key.clone(), source_entry(source_language, value));
        }
        catalog
    }

    /// Keys whose entries take part in translation, in catalog order
    ///
    /// Entries whose source value is a set of plural or device variations
    /// are left as they are.
    pub fn translatable_keys(&self) -> Vec<&str> {
        self.strings
            .iter()
            .filter(|(key, entry)| {
                entry.should_translate != Some(false)
                    && !entry
                        .localizations
                        .get(&self.source_language)
                        .is_some_and(Localization::has_variations)
                    && !self.source_text(key, entry).is_empty()
            })
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Source text of every translatable entry, in catalog order
    ///
    /// The source-language value wins; entries without one use their key.
    pub fn extract(&self) -> Vec<String> {
        self.translatable_keys()
            .into_iter()
            .filter_map(|key| self.strings.get(key).map(|entry| self.source_text(key, entry).to_string()))
            .collect()
    }

    /// Copy of the catalog with `language` set to the translations, positionally
    pub fn assemble(&self, translations: &[String], language: &str) -> Result<Self, FormatError> {
        let keys: Vec<String> = self.translatable_keys().into_iter().map(str::to_string).collect();
        if translations.len() != keys.len() {
            return Err(FormatError::Structure(format!(
                "expected {} translations, got {}",
                keys.len(),
                translations.len()
            )));
        }

        let mut catalog = self.clone();
        for (key, translation) in keys.iter().zip(translations) {
            catalog.set_unit(key, language, StringUnit::new(TranslationState::Translated, translation.clone()));
        }
        Ok(catalog)
    }

    /// Copy of the catalog with every translatable value of `language` emptied and flagged
    pub fn mark_needs_review(&self, language: &str) -> Self {
        let keys: Vec<String> = self.translatable_keys().into_iter().map(str::to_string).collect();
        let mut catalog = self.clone();
        for key in &keys {
            catalog.set_unit(key, language, StringUnit::new(TranslationState::NeedsReview, ""));
        }
        catalog
    }

    /// Value of `key` in `language`, if present
    pub fn value(&self, key: &str, language: &str) -> Option<&StringUnit> {
        self.strings
            .get(key)
            .and_then(|entry| entry.localizations.get(language))
            .and_then(|localization| localization.string_unit.as_ref())
    }

    fn source_text<'a>(&self, key: &'a str, entry: &'a CatalogEntry) -> &'a str {
        entry
            .localizations
            .get(&self.source_language)
            .and_then(|localization| localization.string_unit.as_ref())
            .map(|unit| unit.value.as_str())
            .unwrap_or(key)
    }

    // A localization holds either a string unit or variations, never both
    fn set_unit(&mut self, key: &str, language: &str, unit: StringUnit) {
        if let Some(entry) = self.strings.get_mut(key) {
            let localization = entry.localizations.entry(language.to_string()).or_default();
            if !localization.has_variations() {
                localization.string_unit = Some(unit);
            }
        }
    }
}

fn source_entry(source_language: &str, value: &str) -> CatalogEntry {
    let mut entry = CatalogEntry::default();
    entry.localizations.insert(
        source_language.to_string(),
        Localization {
            string_unit: Some(StringUnit::new(TranslationState::Translated, value)),
            extra: Map::new(),
        },
    );
    entry
}
