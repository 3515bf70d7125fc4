//! Error types for the takeoff analysis core.

use thiserror::Error;

/// Main error type for takeoff operations.
#[derive(Error, Debug)]
pub enum TakeoffError {
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Vocabulary-related errors (persistence, malformed exports).
///
/// Lookup misses are not errors: `normalize_term`, `get_term`, and
/// `convert_units` return `Option` for absent entries.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to write vocabulary file: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("Malformed vocabulary export: {0}")]
    MalformedExport(#[source] serde_json::Error),
}

/// Extraction-related errors (external collaborators).
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("External recognizer failed: {0}")]
    Recognizer(String),

    #[error("Syntax annotator failed: {0}")]
    Annotator(String),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Result type alias for takeoff operations.
pub type Result<T> = std::result::Result<T, TakeoffError>;
