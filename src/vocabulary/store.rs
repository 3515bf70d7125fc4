//! Vocabulary storage: canonical terms, surface-form index, persistence.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabularyError};
use crate::vocabulary::{TermCategory, VocabularyTerm};

// ============================================================================
// Persistence records
// ============================================================================

/// A term as it appears in the persisted vocabulary format.
///
/// `description` is required; a persisted vocabulary missing it fails to load
/// as a whole. Every other field defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub description: String,
    #[serde(default)]
    pub synonyms: BTreeSet<String>,
    #[serde(default)]
    pub abbreviations: BTreeSet<String>,
    #[serde(default)]
    pub related_terms: BTreeSet<String>,
    #[serde(default)]
    pub unit_conversions: BTreeMap<String, f64>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Full vocabulary export: category -> canonical_name -> term fields.
pub type VocabularyExport = BTreeMap<TermCategory, BTreeMap<String, TermRecord>>;

impl From<&VocabularyTerm> for TermRecord {
    fn from(term: &VocabularyTerm) -> Self {
        Self {
            description: term.description.clone(),
            synonyms: term.synonyms.clone(),
            abbreviations: term.abbreviations.clone(),
            related_terms: term.related_terms.clone(),
            unit_conversions: term.unit_conversions.clone(),
            properties: term.properties.clone(),
        }
    }
}

// ============================================================================
// Vocabulary Store
// ============================================================================

/// Owns the controlled vocabulary and its surface-form index.
///
/// The store is populated at construction (seed table or persisted export)
/// and is read-only afterwards from the analyzers' point of view: readers
/// share an immutable reference, and replacing the vocabulary means building
/// a fresh store and swapping the reference, never mutating under readers.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    /// Canonical name -> term.
    terms: HashMap<String, VocabularyTerm>,
    /// Folded surface form -> canonical name. Many-to-one; on collision the
    /// last-registered term wins (logged at WARN).
    surface_index: HashMap<String, String>,
    /// Per-category canonical names, sorted for deterministic iteration.
    categories: BTreeMap<TermCategory, BTreeSet<String>>,
}

impl VocabularyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated with the built-in construction seed
    /// vocabulary.
    pub fn with_default_vocabulary() -> Self {
        let mut store = Self::new();
        for term in super::seed::default_terms() {
            store.add_term(term);
        }
        tracing::info!(terms = store.len(), "Loaded default construction vocabulary");
        store
    }

    /// Build a store from a persisted export. Fails as a whole on malformed
    /// input; the result is never partially loaded.
    pub fn from_export(export: VocabularyExport) -> Self {
        let mut store = Self::new();
        for (category, terms) in export {
            for (canonical_name, record) in terms {
                store.add_term(VocabularyTerm {
                    canonical_name,
                    category,
                    description: record.description,
                    synonyms: record.synonyms,
                    abbreviations: record.abbreviations,
                    related_terms: record.related_terms,
                    unit_conversions: record.unit_conversions,
                    properties: record.properties,
                });
            }
        }
        store
    }

    /// Load a store from a JSON vocabulary file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(VocabularyError::ReadFile)?;
        let export: VocabularyExport =
            serde_json::from_str(&content).map_err(VocabularyError::MalformedExport)?;
        let store = Self::from_export(export);
        tracing::info!(
            path = %path.as_ref().display(),
            terms = store.len(),
            "Loaded vocabulary"
        );
        Ok(store)
    }

    /// Save the vocabulary to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.export())?;
        std::fs::write(path.as_ref(), json).map_err(VocabularyError::WriteFile)?;
        Ok(())
    }

    /// Number of terms in the store.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the store holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Register or replace a term.
    ///
    /// Idempotent per canonical name: re-adding replaces the previous entry.
    /// Every surface form (canonical name, synonyms, abbreviations) is folded
    /// and indexed; a surface form already claimed by a different term is
    /// overwritten, last registration wins.
    pub fn add_term(&mut self, term: VocabularyTerm) {
        // A replaced term may have changed category; drop the stale entry.
        if let Some(previous) = self.terms.get(&term.canonical_name) {
            if previous.category != term.category {
                if let Some(names) = self.categories.get_mut(&previous.category) {
                    names.remove(&term.canonical_name);
                }
            }
        }

        self.categories
            .entry(term.category)
            .or_default()
            .insert(term.canonical_name.clone());

        for form in term.surface_forms() {
            let folded = fold_surface_form(form);
            if folded.is_empty() {
                continue;
            }
            if let Some(existing) = self.surface_index.get(&folded) {
                if existing != &term.canonical_name {
                    tracing::warn!(
                        surface = %form,
                        previous = %existing,
                        replacement = %term.canonical_name,
                        "Surface form remapped to a different canonical term"
                    );
                }
            }
            self.surface_index
                .insert(folded, term.canonical_name.clone());
        }

        self.terms.insert(term.canonical_name.clone(), term);
    }

    /// Resolve an arbitrary surface form to its canonical name.
    ///
    /// Case-insensitive; internal whitespace and dashes are treated as
    /// interchangeable with underscores.
    pub fn normalize_term(&self, input: &str) -> Option<&str> {
        self.surface_index
            .get(&fold_surface_form(input))
            .map(|s| s.as_str())
    }

    /// Resolve a surface form and dereference to the owning term.
    pub fn get_term(&self, input: &str) -> Option<&VocabularyTerm> {
        let canonical = self.normalize_term(input)?;
        self.terms.get(canonical)
    }

    /// All terms in a category, sorted by canonical name.
    pub fn terms_in_category(&self, category: TermCategory) -> Vec<&VocabularyTerm> {
        self.categories
            .get(&category)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| self.terms.get(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names related to the resolved term. May include names that are not in
    /// the store; callers must re-resolve each.
    pub fn related_terms(&self, input: &str) -> BTreeSet<String> {
        self.get_term(input)
            .map(|term| term.related_terms.clone())
            .unwrap_or_default()
    }

    /// Convert a value between units using the factors registered on the
    /// source unit.
    ///
    /// Tries the target name verbatim first, then its normalized canonical
    /// form. Conversions are not symmetric or transitive: only directly
    /// registered factors resolve, there is no traversal across unit hops.
    pub fn convert_units(&self, value: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
        let from_term = self.get_term(from_unit)?;

        if let Some(factor) = from_term.unit_conversions.get(to_unit) {
            return Some(value * factor);
        }

        let to_canonical = self.normalize_term(to_unit)?;
        from_term
            .unit_conversions
            .get(to_canonical)
            .map(|factor| value * factor)
    }

    /// Export the vocabulary to the persisted nested-map format.
    ///
    /// Every category appears in the output, empty or not, and terms are
    /// keyed by canonical name. Lossless: `from_export(export())` yields a
    /// store with a structurally equal export.
    pub fn export(&self) -> VocabularyExport {
        let mut export = VocabularyExport::new();
        for category in TermCategory::ALL {
            let terms: BTreeMap<String, TermRecord> = self
                .terms_in_category(category)
                .into_iter()
                .map(|term| (term.canonical_name.clone(), TermRecord::from(term)))
                .collect();
            export.insert(category, terms);
        }
        export
    }
}

/// Fold a surface form for indexing and lookup: lowercase, trim, and collapse
/// every internal run of whitespace, dashes, or underscores into a single
/// underscore.
pub fn fold_surface_form(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    let mut pending_separator = false;
    for ch in input.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        } else {
            if pending_separator && !folded.is_empty() {
                folded.push('_');
            }
            pending_separator = false;
            folded.extend(ch.to_lowercase());
        }
    }
    folded
}
