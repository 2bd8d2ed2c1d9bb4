/*!
 * Tests for file utility functions
 */

use std::fs;
use yaltwai::file_utils::FileManager;

use crate::common;

#[test]
fn test_ensureDir_withNestedPath_shouldCreateAll() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested).unwrap();

    assert!(FileManager::dir_exists(&nested));
    assert!(!FileManager::file_exists(&nested));
}

#[test]
fn test_writeAtomic_shouldLeaveNoTemporaryFiles() {
    let temp_dir = common::create_temp_dir().unwrap();
    let target = temp_dir.path().join("locale-fr.json");

    FileManager::write_atomic(&target, "{}\n").unwrap();

    let names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["locale-fr.json"]);
    assert_eq!(FileManager::read_to_string(&target).unwrap(), "{}\n");
}

#[test]
fn test_readToString_withMissingFile_shouldNamePath() {
    let temp_dir = common::create_temp_dir().unwrap();
    let missing = temp_dir.path().join("nope.strings");

    let error = FileManager::read_to_string(&missing).unwrap_err();
    assert!(format!("{:#}", error).contains("nope.strings"));
}
