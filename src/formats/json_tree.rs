/*!
 * Classified JSON tree for localization documents.
 *
 * A JSON localization document is classified once into `LocNode`s. After
 * that, every walk is an exhaustive match over node kinds instead of a
 * key-prefix check at each recursion level.
 *
 * Classification rules:
 * - `@@`-prefixed keys are document attributes; `@@locale` becomes `Locale`
 * - other `@`-prefixed keys holding an object are metadata blocks
 * - inside a metadata block only non-empty `description` strings are
 *   translatable; nested objects are nested metadata, `placeholders` and
 *   everything else are kept verbatim
 * - outside metadata, non-empty strings are translatable leaves and objects
 *   are containers
 */

use serde_json::{Map, Value};

use crate::errors::FormatError;

const LOCALE_KEY: &str = "@@locale";
const DESCRIPTION_KEY: &str = "description";
const PLACEHOLDERS_KEY: &str = "placeholders";

/// A node of a classified localization document
#[derive(Debug, Clone, PartialEq)]
pub enum LocNode {
    /// Translatable text
    Leaf(String),
    /// Ordinary object whose members are classified recursively
    Container(Vec<(String, LocNode)>),
    /// Metadata block (`@key`); only descriptions are translatable
    Metadata(Vec<(String, LocNode)>),
    /// Locale marker (`@@locale`)
    Locale(String),
    /// Anything carried through untouched
    Opaque(Value),
}

/// One step of a depth-first walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visit<'a> {
    /// A translatable string; `in_metadata` is set for descriptions
    Leaf { key: &'a str, text: &'a str, in_metadata: bool },
    /// Entering a container
    Container { key: &'a str },
    /// Entering a metadata block
    Metadata { key: &'a str },
    /// Leaving the container or metadata block entered last
    Exit,
    /// The locale marker
    Locale { value: &'a str },
    /// An untouched value
    Opaque { key: &'a str },
}

impl LocNode {
    /// Classify a document root; the root must be a JSON object
    pub fn from_document(value: &Value, format: &'static str) -> Result<Self, FormatError> {
        match value {
            Value::Object(map) => Ok(Self::Container(classify_members(map))),
            _ => Err(FormatError::Parse {
                format,
                message: "top-level value must be an object".to_string(),
            }),
        }
    }

    /// Depth-first walk in document order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(Visit<'a>)) {
        self.walk_node("", false, visit);
    }

    fn walk_node<'a>(&'a self, key: &'a str, in_metadata: bool, visit: &mut impl FnMut(Visit<'a>)) {
        match self {
            Self::Leaf(text) => visit(Visit::Leaf { key, text, in_metadata }),
            Self::Container(members) => {
                visit(Visit::Container { key });
                for (child_key, child) in members {
                    child.walk_node(child_key, false, visit);
                }
                visit(Visit::Exit);
            }
            Self::Metadata(members) => {
                visit(Visit::Metadata { key });
                for (child_key, child) in members {
                    child.walk_node(child_key, true, visit);
                }
                visit(Visit::Exit);
            }
            Self::Locale(value) => visit(Visit::Locale { value }),
            Self::Opaque(_) => visit(Visit::Opaque { key }),
        }
    }

    /// Translatable strings in document order
    pub fn leaves(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        self.walk(&mut |visit| {
            if let Visit::Leaf { text, .. } = visit {
                leaves.push(text.to_string());
            }
        });
        leaves
    }

    /// Number of translatable positions
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |visit| {
            if matches!(visit, Visit::Leaf { .. }) {
                count += 1;
            }
        });
        count
    }

    /// Value of the locale marker, if the document has one
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Container(members) => members.iter().find_map(|(_, node)| match node {
                Self::Locale(value) => Some(value.as_str()),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Rebuild the tree with every leaf replaced by `f(leaf)`, in document order
    pub fn map_leaves(&self, f: &mut impl FnMut(&str) -> String) -> Self {
        match self {
            Self::Leaf(text) => Self::Leaf(f(text)),
            Self::Container(members) => Self::Container(
                members.iter().map(|(key, node)| (key.clone(), node.map_leaves(f))).collect(),
            ),
            Self::Metadata(members) => Self::Metadata(
                members.iter().map(|(key, node)| (key.clone(), node.map_leaves(f))).collect(),
            ),
            Self::Locale(value) => Self::Locale(value.clone()),
            Self::Opaque(value) => Self::Opaque(value.clone()),
        }
    }

    /// Substitute translations for the leaves, positionally
    pub fn fill(&self, translations: &[String]) -> Result<Self, FormatError> {
        let expected = self.leaf_count();
        if translations.len() != expected {
            return Err(FormatError::Structure(format!(
                "expected {} translations, got {}",
                expected,
                translations.len()
            )));
        }

        let mut next = translations.iter();
        Ok(self.map_leaves(&mut |original| {
            next.next().cloned().unwrap_or_else(|| original.to_string())
        }))
    }

    /// Replace the locale marker, inserting one first when absent
    pub fn with_locale(&self, locale: &str) -> Self {
        match self {
            Self::Container(members) => {
                let mut replaced = false;
                let mut members: Vec<(String, LocNode)> = members
                    .iter()
                    .map(|(key, node)| match node {
                        Self::Locale(_) => {
                            replaced = true;
                            (key.clone(), Self::Locale(locale.to_string()))
                        }
                        other => (key.clone(), other.clone()),
                    })
                    .collect();
                if !replaced {
                    members.insert(0, (LOCALE_KEY.to_string(), Self::Locale(locale.to_string())));
                }
                Self::Container(members)
            }
            other => other.clone(),
        }
    }

    /// Set or add a top-level attribute that is never translated
    pub fn with_attribute(&self, key: &str, value: Value) -> Self {
        match self {
            Self::Container(members) => {
                let mut members = members.clone();
                match members.iter_mut().find(|(existing, _)| existing == key) {
                    Some((_, node)) => *node = Self::Opaque(value),
                    None => members.push((key.to_string(), Self::Opaque(value))),
                }
                Self::Container(members)
            }
            other => other.clone(),
        }
    }

    /// Convert back into JSON, preserving member order
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(text) => Value::String(text.clone()),
            Self::Container(members) | Self::Metadata(members) => {
                let mut map = Map::new();
                for (key, node) in members {
                    map.insert(key.clone(), node.to_value());
                }
                Value::Object(map)
            }
            Self::Locale(value) => Value::String(value.clone()),
            Self::Opaque(value) => value.clone(),
        }
    }
}

fn classify_members(map: &Map<String, Value>) -> Vec<(String, LocNode)> {
    map.iter()
        .map(|(key, value)| (key.clone(), classify(key, value)))
        .collect()
}

fn classify(key: &str, value: &Value) -> LocNode {
    if key.starts_with("@@") {
        return match value {
            Value::String(locale) if key == LOCALE_KEY => LocNode::Locale(locale.clone()),
            other => LocNode::Opaque(other.clone()),
        };
    }

    if key.starts_with('@') {
        return match value {
            Value::Object(map) => LocNode::Metadata(classify_metadata(map)),
            other => LocNode::Opaque(other.clone()),
        };
    }

    match value {
        Value::String(text) if !text.is_empty() => LocNode::Leaf(text.clone()),
        Value::Object(map) => LocNode::Container(classify_members(map)),
        other => LocNode::Opaque(other.clone()),
    }
}

fn classify_metadata(map: &Map<String, Value>) -> Vec<(String, LocNode)> {
    map.iter()
        .map(|(key, value)| {
            let node = match value {
                Value::String(text) if key == DESCRIPTION_KEY && !text.is_empty() => {
                    LocNode::Leaf(text.clone())
                }
                _ if key == PLACEHOLDERS_KEY => LocNode::Opaque(value.clone()),
                Value::Object(nested) => LocNode::Metadata(classify_metadata(nested)),
                other => LocNode::Opaque(other.clone()),
            };
            (key.clone(), node)
        })
        .collect()
}
