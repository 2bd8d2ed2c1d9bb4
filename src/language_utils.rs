use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;

/// Language utilities
///
/// This module holds the static set of languages offered for translation and
/// the helpers that validate and compare free-form language identifiers
/// (`fr`, `pt-BR`, `zh-Hans`, `fra`).

/// A language offered as a translation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Locale identifier as used in file names (`pt-BR`, `zh-Hans`)
    pub code: &'static str,
    /// English display name
    pub display_name: &'static str,
    /// Name of the language in the language itself
    pub localized_name: &'static str,
}

static SUPPORTED_LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    vec![
        Language { code: "zh-Hans", display_name: "Chinese, Simplified", localized_name: "简体中文" },
        Language { code: "en", display_name: "English", localized_name: "English" },
        Language { code: "fr", display_name: "French", localized_name: "Français" },
        Language { code: "es", display_name: "Spanish", localized_name: "Español" },
        Language { code: "de", display_name: "German", localized_name: "Deutsch" },
        Language { code: "it", display_name: "Italian", localized_name: "Italiano" },
        Language { code: "pt-BR", display_name: "Portuguese, Brazil", localized_name: "Português (Brasil)" },
        Language { code: "ru", display_name: "Russian", localized_name: "Русский" },
        Language { code: "ja", display_name: "Japanese", localized_name: "日本語" },
        Language { code: "ko", display_name: "Korean", localized_name: "한국어" },
        Language { code: "ar", display_name: "Arabic", localized_name: "العربية" },
    ]
});

/// The reference set of languages, in presentation order
pub fn supported_languages() -> &'static [Language] {
    &SUPPORTED_LANGUAGES
}

/// Find a supported language by code, ignoring case and `_`/`-` differences
pub fn find_language(code: &str) -> Option<&'static Language> {
    supported_languages().iter().find(|lang| same_tag(lang.code, code))
}

/// Language code type of the primary subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// One of the supported languages
    Supported,
    /// ISO 639-1 (2-letter) primary subtag
    Part1,
    /// ISO 639-2/T or 639-3 (3-letter) primary subtag
    Part3,
    /// ISO 639-2/B (3-letter bibliographic) primary subtag
    Part2B,
}

/// Validate a language identifier
///
/// Accepts the supported codes and BCP-47 style tags whose primary subtag is
/// an ISO 639 code (`en`, `en-GB`, `sr-Latn`, `fil`).
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    if find_language(code).is_some() {
        return Ok(LanguageCodeType::Supported);
    }

    let primary = primary_subtag(code);
    match primary.len() {
        2 if isolang::Language::from_639_1(&primary).is_some() => Ok(LanguageCodeType::Part1),
        3 if isolang::Language::from_639_3(&primary).is_some() => Ok(LanguageCodeType::Part3),
        3 if bibliographic_to_terminology(&primary).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize the primary subtag of a code to ISO 639-3
pub fn normalize_to_part3(code: &str) -> Result<String> {
    let primary = primary_subtag(code);

    if primary.len() == 2 {
        if let Some(lang) = isolang::Language::from_639_1(&primary) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if primary.len() == 3 {
        if isolang::Language::from_639_3(&primary).is_some() {
            return Ok(primary);
        }
        if let Some(part3) = bibliographic_to_terminology(&primary) {
            return Ok(part3.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language identifiers denote the same locale
///
/// The primary subtag is compared after ISO normalization (`en` == `eng`),
/// the remaining subtags case-insensitively (`pt-BR` == `pt_br`, `pt-BR` != `pt`).
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let (primary1, rest1) = split_tag(code1);
    let (primary2, rest2) = split_tag(code2);

    if rest1 != rest2 {
        return false;
    }

    match (normalize_to_part3(&primary1), normalize_to_part3(&primary2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => primary1 == primary2,
    }
}

/// Human readable name used in prompts and listings
pub fn get_language_name(code: &str) -> Result<String> {
    if let Some(lang) = find_language(code) {
        return Ok(lang.display_name.to_string());
    }

    let part3 = normalize_to_part3(code)?;
    let lang = isolang::Language::from_639_3(&part3)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", part3))?;

    Ok(lang.to_name().to_string())
}

/// Name to put in a translation prompt; free-form identifiers pass through
pub fn prompt_language_name(code: &str) -> String {
    get_language_name(code).unwrap_or_else(|_| code.trim().to_string())
}

fn same_tag(a: &str, b: &str) -> bool {
    normalize_tag(a) == normalize_tag(b)
}

fn normalize_tag(code: &str) -> String {
    code.trim().replace('_', "-").to_lowercase()
}

fn primary_subtag(code: &str) -> String {
    split_tag(code).0
}

fn split_tag(code: &str) -> (String, String) {
    let normalized = normalize_tag(code);
    match normalized.split_once('-') {
        Some((primary, rest)) => (primary.to_string(), rest.to_string()),
        None => (normalized, String::new()),
    }
}

// ISO 639-2/B codes that differ from their 639-2/T counterpart
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}
