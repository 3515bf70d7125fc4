//! Entity extraction for construction scope text.
//!
//! Extraction combines two candidate tiers:
//!
//! - spans from an optional external recognizer (a trained NER model or any
//!   other collaborator behind the [`EntityRecognizer`] capability trait),
//!   accepted with their original confidence scores;
//! - rule-based spans from matchers compiled out of the vocabulary
//!   (materials, units, equipment) plus fixed numeric and operation-verb
//!   patterns.
//!
//! Overlapping candidates are resolved deterministically: a single
//! left-to-right sweep over start-sorted spans keeps the higher-confidence
//! one, ties keeping the first seen. The sweep is a greedy approximation, not
//! full interval scheduling; for three or more chain-overlapping spans it can
//! retain a locally rather than globally optimal set.

mod extractor;
mod patterns;

pub use extractor::EntityExtractor;
pub use patterns::{CompiledPatterns, PatternCompiler, TermMatcher};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vocabulary::TermCategory;

// ============================================================================
// Labels
// ============================================================================

/// Label attached to an extracted entity span.
///
/// The rule-based extractor only produces the closed variants; spans from an
/// external recognizer whose tag is not one of them keep their raw label in
/// the `External` variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Material,
    Unit,
    Equipment,
    Quantity,
    Operation,
    Modifier,
    /// A label from an external model outside the core taxonomy.
    External(String),
}

impl EntityLabel {
    /// The wire representation of the label.
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Material => "MATERIAL",
            EntityLabel::Unit => "UNIT",
            EntityLabel::Equipment => "EQUIPMENT",
            EntityLabel::Quantity => "QUANTITY",
            EntityLabel::Operation => "OPERATION",
            EntityLabel::Modifier => "MODIFIER",
            EntityLabel::External(raw) => raw,
        }
    }

    /// Parse a raw label string, folding unknown tags into `External`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "MATERIAL" => EntityLabel::Material,
            "UNIT" => EntityLabel::Unit,
            "EQUIPMENT" => EntityLabel::Equipment,
            "QUANTITY" => EntityLabel::Quantity,
            "OPERATION" => EntityLabel::Operation,
            "MODIFIER" => EntityLabel::Modifier,
            other => EntityLabel::External(other.to_string()),
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityLabel {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EntityLabel::from_raw(&raw))
    }
}

// ============================================================================
// Spans
// ============================================================================

/// Ontology alignment attached to a span whose text resolves in the
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyAlignment {
    /// Canonical name of the resolved term.
    pub ontology_id: String,
    /// Category of the resolved term.
    pub ontology_category: TermCategory,
    /// Normalized value (the canonical name).
    pub normalized_value: String,
}

/// An extracted entity span.
///
/// Offsets are byte positions into the source text with
/// `0 <= start < end <= text.len()`, on UTF-8 character boundaries.
/// Immutable once produced: overlap resolution selects between candidates,
/// it never edits a surviving span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityExtraction {
    /// Start byte offset into the source text.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Entity label.
    pub label: EntityLabel,
    /// The literal matched text.
    pub text: String,
    /// Confidence score in [0, 1].
    pub confidence: f32,
    /// Ontology alignment, when the text resolves in the vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<OntologyAlignment>,
}

impl EntityExtraction {
    /// Whether this span's byte range overlaps another's.
    pub fn overlaps(&self, other: &EntityExtraction) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A span produced by an external recognizer collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub text: String,
    pub confidence: f32,
}

// ============================================================================
// External recognizer capability
// ============================================================================

/// Capability interface for external entity recognizers (trained NER models,
/// linguistic pipelines, remote services).
///
/// The core never depends on a concrete model: it consumes recognized spans
/// as an optional first extraction tier and degrades gracefully to
/// rule-based-only extraction when the collaborator errors. Latency, retry,
/// and timeout policy for a slow collaborator belong to the caller.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entity spans in the given text.
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>>;
}
