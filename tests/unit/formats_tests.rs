/*!
 * Tests for localization format adapters
 */

use std::path::Path;

use serde_json::json;
use yaltwai::formats::arb::{arb_path, STATE_ATTRIBUTE};
use yaltwai::formats::electron::electron_path;
use yaltwai::formats::key_scan::{collect_han_keys, contains_han};
use yaltwai::formats::strings::lproj_path;
use yaltwai::formats::{
    ArbDocument, ElectronDocument, LocNode, LocalizationFormat, Platform, StringCatalog, StringsDocument,
    TranslationState,
};

use crate::common::{SAMPLE_ARB, SAMPLE_CATALOG, SAMPLE_ELECTRON, SAMPLE_STRINGS};

#[test]
fn test_formatDetection_withEveryExtension_shouldMapToPlatform() {
    let cases = [
        ("Localizable.strings", LocalizationFormat::Strings, Platform::Ios),
        ("Localizable.xcstrings", LocalizationFormat::XcStrings, Platform::Ios),
        ("app_en.arb", LocalizationFormat::Arb, Platform::Flutter),
        ("en.json", LocalizationFormat::Electron, Platform::Electron),
    ];
    for (file, format, platform) in cases {
        let detected = LocalizationFormat::from_path(Path::new(file)).unwrap();
        assert_eq!(detected, format, "{}", file);
        assert_eq!(detected.platform(), platform, "{}", file);
        assert!(platform.accepts(detected.extension()));
    }
    assert_eq!(LocalizationFormat::from_path(Path::new("strings.txt")), None);
    assert_eq!(LocalizationFormat::from_path(Path::new("README")), None);
}

#[test]
fn test_platform_accepts_shouldRejectForeignExtensions() {
    assert!(Platform::Ios.accepts("XCSTRINGS"));
    assert!(!Platform::Flutter.accepts("json"));
    assert!(!Platform::Electron.accepts("arb"));
    assert_eq!("macos".parse::<Platform>().unwrap(), Platform::Ios);
    assert!("android".parse::<Platform>().is_err());
}

#[test]
fn test_arb_extract_shouldSkipAttributesAndPlaceholders() {
    let doc = ArbDocument::parse(SAMPLE_ARB).unwrap();
    assert_eq!(doc.extract(), vec!["Inbox", "Screen title", "Hello {name}"]);
}

#[test]
fn test_arb_nestedMetadata_shouldTranslateDescriptionsOnly() {
    let value = json!({
        "@@locale": "en",
        "@@last_modified": "2024-01-01",
        "section": { "label": "Label", "@label": { "description": "Nested description", "type": "text" } },
        "empty": ""
    });
    let doc = ArbDocument::from_value(&value).unwrap();
    assert_eq!(doc.extract(), vec!["Label", "Nested description"]);

    let translated = doc.assemble(&["Etiquette".to_string(), "Description".to_string()], "fr").unwrap();
    let out = translated.to_value();
    assert_eq!(out["@@last_modified"], "2024-01-01");
    assert_eq!(out["section"]["@label"]["type"], "text");
    assert_eq!(out["section"]["label"], "Etiquette");
    assert_eq!(out["empty"], "");
}

#[test]
fn test_arb_assemble_withWrongCount_shouldFail() {
    let doc = ArbDocument::parse(SAMPLE_ARB).unwrap();
    assert!(doc.assemble(&["only one".to_string()], "fr").is_err());
}

#[test]
fn test_arb_needsReview_shouldEmptyValuesAndTagState() {
    let doc = ArbDocument::parse(SAMPLE_ARB).unwrap();
    let review = doc.needs_review("ja");
    let value = review.to_value();
    assert_eq!(value["@@locale"], "ja");
    assert_eq!(value["title"], "");
    assert_eq!(value["@title"]["description"], "");
    assert_eq!(value["@greeting"]["placeholders"]["name"]["type"], "String");
    assert_eq!(value[STATE_ATTRIBUTE], TranslationState::NeedsReview.as_str());
}

#[test]
fn test_arb_render_shouldKeepMemberOrder() {
    let doc = ArbDocument::parse(SAMPLE_ARB).unwrap();
    let rendered = doc.render().unwrap();
    let locale = rendered.find("@@locale").unwrap();
    let title = rendered.find("\"title\"").unwrap();
    let greeting = rendered.find("\"greeting\"").unwrap();
    assert!(locale < title && title < greeting);
}

#[test]
fn test_arb_parse_withArrayRoot_shouldFail() {
    assert!(ArbDocument::parse("[1, 2]").is_err());
    assert!(ArbDocument::parse("{ broken").is_err());
}

#[test]
fn test_locNode_leafCount_shouldMatchExtract() {
    let value: serde_json::Value = serde_json::from_str(SAMPLE_ARB).unwrap();
    let node = LocNode::from_document(&value, "arb").unwrap();
    assert_eq!(node.leaf_count(), node.leaves().len());
    assert_eq!(node.locale(), Some("en"));
}

#[test]
fn test_electron_extract_shouldSkipNonStrings() {
    let doc = ElectronDocument::parse(SAMPLE_ELECTRON).unwrap();
    assert_eq!(doc.extract(), vec!["File", "Quit"]);
    assert_eq!(doc.translatable_keys(), vec!["menu.file", "menu.quit"]);

    let fr = doc.assemble(&["Fichier".to_string(), "Quitter".to_string()]).unwrap();
    assert_eq!(fr.get("menu.quit"), Some(&json!("Quitter")));
    assert_eq!(fr.get("window.count"), Some(&json!(3)));
    assert_eq!(fr.len(), 3);
}

#[test]
fn test_electron_parse_withNonObjectRoot_shouldFail() {
    assert!(ElectronDocument::parse("\"text\"").is_err());
    assert!(ElectronDocument::parse("{}").unwrap().is_empty());
}

#[test]
fn test_catalog_extract_shouldSkipShouldTranslateFalse() {
    let catalog = StringCatalog::parse(SAMPLE_CATALOG).unwrap();
    assert_eq!(catalog.translatable_keys(), vec!["cancel", "ok"]);
    assert_eq!(catalog.extract(), vec!["Cancel", "OK"]);
}

#[test]
fn test_catalog_assembleTwoLanguages_shouldAccumulate() {
    let catalog = StringCatalog::parse(SAMPLE_CATALOG).unwrap();
    let with_fr = catalog.assemble(&["Annuler".to_string(), "D'accord".to_string()], "fr").unwrap();
    let with_ja = with_fr.mark_needs_review("ja");

    assert_eq!(with_ja.value("cancel", "fr").unwrap().value, "Annuler");
    assert_eq!(with_ja.value("ok", "ja").unwrap().state, "needs_review");
    assert_eq!(with_ja.value("ok", "en").unwrap().value, "OK");
    assert!(with_ja.value("version", "fr").is_none());
}

#[test]
fn test_strings_extract_shouldFollowKeyOrder() {
    let doc = StringsDocument::parse(SAMPLE_STRINGS).unwrap();
    assert_eq!(doc.extract(), vec!["Goodbye", "Hello"]);
    assert_eq!(
        lproj_path(Path::new("out"), "fr"),
        Path::new("out").join("fr.lproj").join("Localizable.strings")
    );
}

#[test]
fn test_assemble_withExtractedValues_shouldReproduceEveryAdapter() {
    let strings = StringsDocument::parse(SAMPLE_STRINGS).unwrap();
    assert_eq!(strings.assemble(&strings.extract()).unwrap().entries, strings.entries);

    let catalog = StringCatalog::parse(SAMPLE_CATALOG).unwrap();
    let same = catalog.assemble(&catalog.extract(), "en").unwrap();
    assert_eq!(same.extract(), catalog.extract());

    let arb = ArbDocument::parse(SAMPLE_ARB).unwrap();
    let same = arb.assemble(&arb.extract(), "en").unwrap();
    assert_eq!(same.extract(), arb.extract());
    assert_eq!(same.locale(), Some("en"));

    let electron = ElectronDocument::parse(SAMPLE_ELECTRON).unwrap();
    assert_eq!(electron.assemble(&electron.extract()).unwrap(), electron);
}

#[test]
fn test_outputPaths_shouldFollowPlatformConventions() {
    assert_eq!(arb_path(Path::new("l10n"), "pt-BR"), Path::new("l10n/app_pt-BR.arb"));
    assert_eq!(electron_path(Path::new("locales"), "ko"), Path::new("locales/locale-ko.json"));
}

#[test]
fn test_keyScan_shouldCollectHanKeysRecursively() {
    let value = json!({
        "确定": "OK",
        "plain": { "取消": 1, "nested": [ { "设置": true } ] },
        "ascii": "值"
    });
    assert_eq!(collect_han_keys(&value), vec!["取消", "确定", "设置"]);
    assert!(contains_han("设置 page"));
    assert!(!contains_han("settings"));
}
