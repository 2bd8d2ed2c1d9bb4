/*!
 * Tests for language utility functions
 */

use yaltwai::language_utils::{
    find_language, get_language_name, language_codes_match, normalize_to_part3, prompt_language_name,
    supported_languages, validate_language_code, LanguageCodeType,
};

#[test]
fn test_supportedLanguages_shouldStartWithSimplifiedChinese() {
    let languages = supported_languages();
    assert_eq!(languages.len(), 11);
    assert_eq!(languages[0].code, "zh-Hans");
    assert!(languages.iter().any(|l| l.code == "pt-BR" && l.display_name == "Portuguese, Brazil"));
}

#[test]
fn test_validateLanguageCode_withVariousCodes_shouldClassify() {
    assert_eq!(validate_language_code("fr").unwrap(), LanguageCodeType::Supported);
    assert_eq!(validate_language_code("nl").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("en-GB").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fil").unwrap(), LanguageCodeType::Part3);
    assert!(validate_language_code("ger").is_ok());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalizeToPart3_shouldMapAllForms() {
    assert_eq!(normalize_to_part3("de").unwrap(), "deu");
    assert_eq!(normalize_to_part3("deu").unwrap(), "deu");
    assert!(normalize_to_part3("zz").is_err());
}

#[test]
fn test_languageCodesMatch_withEquivalentForms_shouldMatch() {
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("zh-Hans", "zh_hans"));
    assert!(!language_codes_match("fr", "de"));
}

#[test]
fn test_getLanguageName_shouldPreferReferenceNames() {
    assert_eq!(get_language_name("zh-Hans").unwrap(), "Chinese, Simplified");
    assert_eq!(get_language_name("nl").unwrap(), "Dutch");
    assert!(find_language("nl").is_none());
}

#[test]
fn test_promptLanguageName_withUnknownCode_shouldPassThrough() {
    assert_eq!(prompt_language_name("ja"), "Japanese");
    assert_eq!(prompt_language_name(" klingon "), "klingon");
}
