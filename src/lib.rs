//! Takeoff: Construction Scope Analysis
//!
//! A rule-based NLP core for construction estimating: a synonym-aware
//! vocabulary of construction terms, entity extraction over scope sentences,
//! work-type classification with quantity consolidation, structured export,
//! cost estimation, and reviewer correction records.

pub mod analysis;
pub mod config;
pub mod corrections;
pub mod cost;
pub mod error;
pub mod extraction;
pub mod vocabulary;

pub use analysis::{
    classify_work_type, AlignedTerm, AnalysisMetadata, ExportedEntity, OntologyAlignmentGroups,
    ScopeAnalysis, ScopeAnalyzer, StructuredExporter, StructuredOutput, SyntaxAnnotator,
    TokenAnnotation,
};
pub use config::{Config, CostSettings, ExtractionSettings, VocabularySettings};
pub use corrections::{
    CorrectionLog, CorrectionStatistics, CorrectionType, Priority, UserCorrection,
};
pub use cost::{CostEstimate, CostEstimator, VarianceReport, VARIANCE_TARGET};
pub use error::{ConfigError, ExtractionError, Result, TakeoffError, VocabularyError};
pub use extraction::{
    EntityExtraction, EntityExtractor, EntityLabel, EntityRecognizer, OntologyAlignment,
    RecognizedSpan,
};
pub use vocabulary::{
    fold_surface_form, TermCategory, TermRecord, VocabularyExport, VocabularyStore, VocabularyTerm,
};
