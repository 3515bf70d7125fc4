//! Vocabulary store integration tests: lookup, conversion, persistence.

use tempfile::TempDir;

use takeoff::vocabulary::{TermCategory, VocabularyStore, VocabularyTerm};

#[test]
fn test_abbreviation_normalizes_and_converts() {
    let store = VocabularyStore::with_default_vocabulary();

    assert_eq!(store.normalize_term("LF"), Some("linear_feet"));

    let meters = store.convert_units(100.0, "linear_feet", "meters").unwrap();
    assert!((meters - 30.48).abs() < 1e-6);
}

#[test]
fn test_conversion_not_available() {
    let store = VocabularyStore::with_default_vocabulary();
    assert!(store.convert_units(100.0, "linear_feet", "bogus_unit").is_none());
    assert!(store.convert_units(100.0, "bogus_unit", "meters").is_none());
}

#[test]
fn test_synonym_and_case_insensitive_lookup() {
    let store = VocabularyStore::with_default_vocabulary();
    assert_eq!(store.normalize_term("track hoe"), Some("excavator"));
    assert_eq!(store.normalize_term("Sheetrock"), Some("gypsum_board"));
    assert_eq!(store.normalize_term("CY"), Some("cubic_yards"));
    assert_eq!(store.normalize_term("definitely not a term"), None);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vocabulary.json");

    let mut store = VocabularyStore::with_default_vocabulary();
    store.add_term(
        VocabularyTerm::new("shotcrete", TermCategory::Material, "Pneumatically applied concrete")
            .with_synonyms(["gunite"]),
    );
    store.save_to_file(&path).unwrap();

    let loaded = VocabularyStore::load_from_file(&path).unwrap();
    assert_eq!(loaded.len(), store.len());
    assert_eq!(loaded.normalize_term("gunite"), Some("shotcrete"));
    assert_eq!(loaded.normalize_term("track hoe"), Some("excavator"));

    // A second export of the loaded store is identical.
    assert_eq!(loaded.export(), store.export());
}

#[test]
fn test_load_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vocabulary.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(VocabularyStore::load_from_file(&path).is_err());
}

#[test]
fn test_load_missing_file_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.json");
    assert!(VocabularyStore::load_from_file(&path).is_err());
}
