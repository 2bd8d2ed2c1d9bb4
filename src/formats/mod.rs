/*!
 * Localization file formats.
 *
 * Every supported format has an adapter that extracts the ordered list of
 * translatable strings from a parsed document and assembles a translated
 * document from the original structure plus a flat list of translations:
 *
 * - `strings`: Apple `.strings` key/value files
 * - `catalog`: Xcode string catalogs (`.xcstrings`)
 * - `arb`: Flutter Application Resource Bundles (`.arb`)
 * - `electron`: flat Electron locale JSON (`.json`)
 *
 * `json_tree` holds the classified JSON node type shared by the JSON based
 * formats and `key_scan` the CJK key scanner used to seed new catalogs.
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

pub mod arb;
pub mod catalog;
pub mod electron;
pub mod json_tree;
pub mod key_scan;
pub mod strings;

pub use self::arb::ArbDocument;
pub use self::catalog::StringCatalog;
pub use self::electron::ElectronDocument;
pub use self::json_tree::LocNode;
pub use self::strings::StringsDocument;

/// Supported localization file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalizationFormat {
    /// Xcode string catalog (`.xcstrings`)
    XcStrings,
    /// Apple strings file (`.strings`)
    Strings,
    /// Flutter ARB file (`.arb`)
    Arb,
    /// Electron locale file (`.json`)
    Electron,
}

impl LocalizationFormat {
    /// Detect the format from a file extension (case-insensitive, no dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "xcstrings" => Some(Self::XcStrings),
            "strings" => Some(Self::Strings),
            "arb" => Some(Self::Arb),
            "json" => Some(Self::Electron),
            _ => None,
        }
    }

    /// Detect the format of a file from its path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::XcStrings => "xcstrings",
            Self::Strings => "strings",
            Self::Arb => "arb",
            Self::Electron => "json",
        }
    }

    /// Platform the format belongs to
    pub fn platform(&self) -> Platform {
        match self {
            Self::XcStrings | Self::Strings => Platform::Ios,
            Self::Arb => Platform::Flutter,
            Self::Electron => Platform::Electron,
        }
    }
}

impl fmt::Display for LocalizationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for LocalizationFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::from_extension(s.trim_start_matches('.'))
            .ok_or_else(|| anyhow!("Invalid localization format: {}", s))
    }
}

/// Target platform of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS / macOS (`.strings`, `.xcstrings`)
    Ios,
    /// Flutter (`.arb`)
    Flutter,
    /// Electron (`.json`)
    Electron,
}

impl Platform {
    /// File extensions accepted as input for this platform
    pub fn file_types(&self) -> &'static [&'static str] {
        match self {
            Self::Ios => &["strings", "xcstrings"],
            Self::Flutter => &["arb"],
            Self::Electron => &["json"],
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ios => "iOS (.strings/.xcstrings)",
            Self::Flutter => "Flutter (.arb)",
            Self::Electron => "Electron (.json)",
        }
    }

    /// Whether a file extension is accepted for this platform
    pub fn accepts(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.file_types().iter().any(|ext| *ext == extension)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ios => "iOS",
            Self::Flutter => "Flutter",
            Self::Electron => "Electron",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "ios" | "macos" | "apple" => Ok(Self::Ios),
            "flutter" => Ok(Self::Flutter),
            "electron" => Ok(Self::Electron),
            _ => Err(anyhow!("Invalid platform: {}", s)),
        }
    }
}

/// Review state attached to every per-language value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    /// Value was copied from the source or translated successfully
    Translated,
    /// Translation failed or is missing; value left empty for a human
    NeedsReview,
}

impl TranslationState {
    /// Serialized tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translated => "translated",
            Self::NeedsReview => "needs_review",
        }
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
