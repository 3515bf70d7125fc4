//! Core types for the controlled construction vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// Category of a vocabulary term.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    /// A construction trade or activity (concrete_work, framing, ...).
    WorkType,
    /// A construction material (concrete, rebar, lumber, ...).
    Material,
    /// A unit of measure (linear_feet, cubic_yards, ...).
    Unit,
    /// A labor crew specialty (concrete_crew, electricians, ...).
    CrewType,
    /// Construction equipment (excavator, crane, ...).
    Equipment,
}

impl TermCategory {
    /// All categories, in the order they appear in persisted exports.
    pub const ALL: [TermCategory; 5] = [
        TermCategory::WorkType,
        TermCategory::Material,
        TermCategory::Unit,
        TermCategory::CrewType,
        TermCategory::Equipment,
    ];

    /// The snake_case name used in exports and alignment records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermCategory::WorkType => "work_type",
            TermCategory::Material => "material",
            TermCategory::Unit => "unit",
            TermCategory::CrewType => "crew_type",
            TermCategory::Equipment => "equipment",
        }
    }
}

impl std::fmt::Display for TermCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Vocabulary Term
// ============================================================================

/// A term in the controlled construction vocabulary.
///
/// The canonical name is the single authoritative identifier for the concept;
/// synonyms and abbreviations are alternate surface forms that fold onto it.
/// Related terms are weak references by name and may point outside the
/// vocabulary; callers must re-resolve them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyTerm {
    /// Unique snake_case identifier, globally unique across categories.
    pub canonical_name: String,
    /// The category this term belongs to.
    pub category: TermCategory,
    /// Human-readable description.
    pub description: String,
    /// Alternate names that resolve to this term.
    #[serde(default)]
    pub synonyms: BTreeSet<String>,
    /// Short forms that resolve to this term.
    #[serde(default)]
    pub abbreviations: BTreeSet<String>,
    /// Names of related concepts (weak references, may dangle).
    #[serde(default)]
    pub related_terms: BTreeSet<String>,
    /// Direct conversion factors to other units (unit terms only).
    #[serde(default)]
    pub unit_conversions: BTreeMap<String, f64>,
    /// Free-form key/value properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl VocabularyTerm {
    /// Create a new term with the given canonical name, category, and description.
    pub fn new(
        canonical_name: impl Into<String>,
        category: TermCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            category,
            description: description.into(),
            synonyms: BTreeSet::new(),
            abbreviations: BTreeSet::new(),
            related_terms: BTreeSet::new(),
            unit_conversions: BTreeMap::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Add synonyms to the term.
    pub fn with_synonyms(mut self, synonyms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.synonyms.extend(synonyms.into_iter().map(|s| s.into()));
        self
    }

    /// Add abbreviations to the term.
    pub fn with_abbreviations(
        mut self,
        abbreviations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.abbreviations
            .extend(abbreviations.into_iter().map(|a| a.into()));
        self
    }

    /// Add related term names.
    pub fn with_related_terms(
        mut self,
        related: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.related_terms
            .extend(related.into_iter().map(|r| r.into()));
        self
    }

    /// Add a direct unit conversion factor.
    pub fn with_conversion(mut self, to_unit: impl Into<String>, factor: f64) -> Self {
        self.unit_conversions.insert(to_unit.into(), factor);
        self
    }

    /// Add a free-form property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// All surface forms of this term: canonical name, synonyms, abbreviations.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_name.as_str())
            .chain(self.synonyms.iter().map(|s| s.as_str()))
            .chain(self.abbreviations.iter().map(|a| a.as_str()))
    }
}
