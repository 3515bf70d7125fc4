//! Scope analysis: work-type classification, operation detection, and
//! quantity/unit consolidation over extracted entities.
//!
//! Analysis is a pure function over an immutable vocabulary snapshot: every
//! call builds a fresh [`ScopeAnalysis`], nothing is shared or mutated
//! across calls, and absence (no work type, no operation, no quantity) is an
//! `Option`, never an error.

mod export;

pub use export::{
    AlignedTerm, AnalysisMetadata, ExportedEntity, OntologyAlignmentGroups, StructuredExporter,
    StructuredOutput,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ExtractionSettings;
use crate::error::Result;
use crate::extraction::{EntityExtraction, EntityExtractor, EntityLabel, EntityRecognizer, RecognizedSpan};
use crate::vocabulary::VocabularyStore;

// ============================================================================
// Analysis record
// ============================================================================

/// Complete analysis of one construction scope sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeAnalysis {
    /// The analyzed text, verbatim.
    pub original_text: String,
    /// Extracted entities, sorted by start offset, non-overlapping.
    pub entities: Vec<EntityExtraction>,
    /// Classified work type (canonical name), when any keyword matched.
    pub work_type: Option<String>,
    /// Detected operation verb.
    pub operation: Option<String>,
    /// First parseable quantity value, commas stripped.
    pub total_quantity: Option<f64>,
    /// Literal text of the first unit entity.
    pub primary_unit: Option<String>,
    /// Material entity texts, in extraction order, not deduplicated.
    #[serde(default)]
    pub materials: Vec<String>,
    /// Equipment entity texts, in extraction order.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Modifier entity texts, in extraction order.
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Mean of entity confidences; exactly 0.0 when no entities were found.
    pub confidence_score: f32,
}

// ============================================================================
// Syntax collaborator
// ============================================================================

/// Per-token annotation from an external linguistic collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// The token text.
    pub text: String,
    /// Lemmatized form.
    pub lemma: String,
    /// Part-of-speech tag (e.g. "VERB").
    pub pos: String,
    /// Syntactic dependency relation (e.g. "ROOT", "ccomp", "xcomp").
    pub dependency: String,
}

impl TokenAnnotation {
    /// Whether this token is a main verb: VERB part-of-speech with a root or
    /// clausal-complement dependency.
    pub fn is_main_verb(&self) -> bool {
        self.pos.eq_ignore_ascii_case("verb")
            && matches!(
                self.dependency.to_ascii_lowercase().as_str(),
                "root" | "ccomp" | "xcomp"
            )
    }
}

/// Capability interface for an external linguistic-analysis collaborator.
///
/// The core only consumes the main-verb signal for operation detection and
/// falls back to a fixed verb list when the collaborator is absent or errors.
pub trait SyntaxAnnotator: Send + Sync {
    /// Annotate each token of the text with part-of-speech, dependency, and
    /// lemma.
    fn annotate(&self, text: &str) -> Result<Vec<TokenAnnotation>>;
}

// ============================================================================
// Work type and operation tables
// ============================================================================

/// Work-type keyword table, scanned in order; the first work type with any
/// matching keyword wins. Keyword collisions across work types (e.g. "pour"
/// appears under concrete_work, "pipe" under plumbing) are resolved purely
/// by this order.
const WORK_TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    ("concrete_work", &["concrete", "pour", "footing", "slab", "foundation"]),
    ("excavation", &["excavate", "dig", "grade", "trench", "soil"]),
    ("framing", &["frame", "lumber", "stud", "joist", "beam"]),
    ("electrical", &["electrical", "wire", "conduit", "panel", "circuit"]),
    ("plumbing", &["plumbing", "pipe", "water", "drain", "sewer"]),
    ("roofing", &["roof", "shingle", "membrane", "flashing"]),
    ("masonry", &["brick", "block", "masonry", "mortar"]),
    ("drywall", &["drywall", "sheetrock", "gypsum", "hang", "tape"]),
    ("insulation", &["insulation", "insulate", "batt", "foam"]),
    ("flooring", &["floor", "flooring", "tile", "carpet", "hardwood"]),
];

/// Fallback operation verbs, checked in order as substrings of the
/// lower-cased text when no syntactic main verb is available.
const FALLBACK_VERBS: &[&str] = &[
    "install", "pour", "frame", "excavate", "apply", "set", "place", "mount", "run", "lay",
];

// ============================================================================
// Scope Analyzer
// ============================================================================

/// Analyzes construction scope sentences into structured records.
pub struct ScopeAnalyzer {
    extractor: EntityExtractor,
    recognizer: Option<Box<dyn EntityRecognizer>>,
    annotator: Option<Box<dyn SyntaxAnnotator>>,
}

impl ScopeAnalyzer {
    /// Create an analyzer over the given vocabulary with default extraction
    /// settings.
    pub fn new(store: Arc<VocabularyStore>) -> Self {
        Self::with_settings(store, ExtractionSettings::default())
    }

    /// Create an analyzer with explicit extraction settings.
    pub fn with_settings(store: Arc<VocabularyStore>, settings: ExtractionSettings) -> Self {
        Self {
            extractor: EntityExtractor::with_settings(store, settings),
            recognizer: None,
            annotator: None,
        }
    }

    /// Attach an external entity recognizer consulted on every analysis.
    pub fn with_recognizer(mut self, recognizer: Box<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Attach an external syntax annotator for operation-verb detection.
    pub fn with_annotator(mut self, annotator: Box<dyn SyntaxAnnotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// The vocabulary this analyzer resolves against.
    pub fn store(&self) -> &Arc<VocabularyStore> {
        self.extractor.store()
    }

    /// Analyze a scope sentence, consulting the attached recognizer if any.
    pub fn analyze(&self, text: &str) -> ScopeAnalysis {
        let external = match &self.recognizer {
            Some(recognizer) => match recognizer.recognize(text) {
                Ok(spans) => spans,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "External recognizer unavailable, analyzing rule-based only"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.analyze_with_spans(text, &external)
    }

    /// Analyze a scope sentence, merging externally recognized spans supplied
    /// by the caller.
    pub fn analyze_with_spans(&self, text: &str, external: &[RecognizedSpan]) -> ScopeAnalysis {
        let entities = self.extractor.extract(text, external);

        let work_type = classify_work_type(text).map(|w| w.to_string());
        let operation = self.detect_operation(text);

        let mut quantities: Vec<f64> = Vec::new();
        let mut units: Vec<String> = Vec::new();
        let mut materials: Vec<String> = Vec::new();
        let mut equipment: Vec<String> = Vec::new();
        let mut modifiers: Vec<String> = Vec::new();

        for entity in &entities {
            match entity.label {
                EntityLabel::Quantity => {
                    // Malformed numeric text stays in the entity list but is
                    // excluded from quantity aggregation.
                    if let Ok(value) = entity.text.replace(',', "").parse::<f64>() {
                        quantities.push(value);
                    }
                }
                EntityLabel::Unit => units.push(entity.text.clone()),
                EntityLabel::Material => materials.push(entity.text.clone()),
                EntityLabel::Equipment => equipment.push(entity.text.clone()),
                EntityLabel::Modifier => modifiers.push(entity.text.clone()),
                _ => {}
            }
        }

        let confidence_score = if entities.is_empty() {
            0.0
        } else {
            entities.iter().map(|e| e.confidence).sum::<f32>() / entities.len() as f32
        };

        ScopeAnalysis {
            original_text: text.to_string(),
            entities,
            work_type,
            operation,
            total_quantity: quantities.first().copied(),
            primary_unit: units.into_iter().next(),
            materials,
            equipment,
            modifiers,
            confidence_score,
        }
    }

    /// Detect the operation verb: syntactic main verb from the annotator when
    /// available, otherwise the first fallback verb found in the text.
    fn detect_operation(&self, text: &str) -> Option<String> {
        if let Some(annotator) = &self.annotator {
            match annotator.annotate(text) {
                Ok(tokens) => {
                    if let Some(verb) = tokens.iter().find(|t| t.is_main_verb()) {
                        return Some(verb.lemma.to_lowercase());
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "Syntax annotator unavailable, falling back to verb list"
                    );
                }
            }
        }

        let lower = text.to_lowercase();
        FALLBACK_VERBS
            .iter()
            .find(|verb| lower.contains(**verb))
            .map(|verb| verb.to_string())
    }
}

/// Classify the work type of a sentence by ordered keyword-table scan.
/// Deterministic: same input always yields the same result.
pub fn classify_work_type(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    WORK_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(work_type, _)| *work_type)
}
