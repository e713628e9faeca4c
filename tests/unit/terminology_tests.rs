/*!
 * Tests for glossary loading and export
 */

use std::io::Cursor;
use std::path::Path;

use termlock::errors::TerminologyError;
use termlock::terminology::{ExportFormat, TermListing, TerminologyStore, export_terminology, save_sample_terminology};

use crate::common;

#[test]
fn test_load_withSampleGlossaryFile_shouldLoadAllTerms() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_glossary(temp_dir.path()).unwrap();

    let store = TerminologyStore::load(&path).unwrap();

    assert_eq!(store.len(), 5);
    assert_eq!(store.lookup("big house"), Some("efie kɛse"));
    assert_eq!(store.lookup("water"), Some("nsu"));
}

#[test]
fn test_load_withSemicolonFile_shouldDetectDelimiter() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "terms.csv",
        "text;text_translated\nSchool;sukuu\nBig House;efie kɛse\n",
    )
    .unwrap();

    let store = TerminologyStore::load(&path).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup("school"), Some("sukuu"));
    assert_eq!(store.lookup("big house"), Some("efie kɛse"));
}

#[test]
fn test_fromDelimited_withTranslationContainingComma_shouldKeepQuotedField() {
    let content = "term,translation\n\"house\",\"efie, fie\"\n";
    let store = TerminologyStore::from_delimited(content).unwrap();

    assert_eq!(store.lookup("house"), Some("efie, fie"));
}

#[test]
fn test_fromDelimited_withRaggedRows_shouldKeepCompleteOnes() {
    let content = "term,translation,notes\nhouse,efie\ncar\nwater,nsu,drink\n";
    let store = TerminologyStore::from_delimited(content).unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.contains("house"));
    assert!(store.contains("water"));
    assert!(!store.contains("car"));
}

#[test]
fn test_fromDelimited_withHeaderOnly_shouldBeEmpty() {
    let store = TerminologyStore::from_delimited("term,translation\n").unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_fromDelimited_withEmptyContent_shouldFail() {
    let result = TerminologyStore::from_delimited("");
    assert!(result.is_err());
}

#[test]
fn test_fromReader_shouldMatchFileLoading() {
    let store = TerminologyStore::from_reader(Cursor::new(common::SAMPLE_GLOSSARY)).unwrap();

    assert_eq!(store.len(), 5);
    assert_eq!(store.lookup("market"), Some("dwabea"));
}

#[test]
fn test_lookup_shouldBeCaseInsensitiveOnKeysOnly() {
    let store = TerminologyStore::from_delimited("term,translation\nHOUSE,Efie\n").unwrap();

    assert_eq!(store.lookup("house"), Some("Efie"));
    assert!(store.lookup("HOUSE").is_none());
}

#[test]
fn test_load_withMissingFile_shouldReturnIoError() {
    let result = TerminologyStore::load("/nonexistent/dir/terms.csv");
    assert!(matches!(result, Err(TerminologyError::Io(_))));
}

#[test]
fn test_loadOrEmpty_withDirectoryPath_shouldDegradeToEmpty() {
    let temp_dir = common::create_temp_dir().unwrap();
    let store = TerminologyStore::load_or_empty(Some(temp_dir.path()));
    assert!(store.is_empty());
}

#[test]
fn test_termListing_shouldCountSortedKeys() {
    let listing = TermListing::from_store(&common::sample_store());

    assert_eq!(listing.term_count, 5);
    assert_eq!(listing.terms, vec!["big house", "car", "house", "market", "water"]);
}

#[test]
fn test_exportJson_shouldContainEveryTerm() {
    let json = export_terminology(&common::sample_store(), ExportFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["term"], "big house");
    assert_eq!(records[0]["translation"], "efie kɛse");
}

#[test]
fn test_exportCsv_shouldReloadIntoEquivalentStore() {
    let csv = export_terminology(&common::sample_store(), ExportFormat::Csv).unwrap();
    let reloaded = TerminologyStore::from_delimited(&csv).unwrap();

    assert_eq!(reloaded.terms(), common::sample_store().terms());
}

#[test]
fn test_saveSampleTerminology_shouldCreateLoadableFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested").join("sample.csv");

    save_sample_terminology(&path).unwrap();

    assert!(Path::new(&path).exists());
    let store = TerminologyStore::load(&path).unwrap();
    assert_eq!(store.lookup("school"), Some("sukuu"));
}
