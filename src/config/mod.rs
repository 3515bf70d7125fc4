//! Configuration for the takeoff analysis core.

mod settings;

pub use settings::{Config, CostSettings, ExtractionSettings, VocabularySettings};
