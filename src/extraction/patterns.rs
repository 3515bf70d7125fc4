//! Matchers compiled from the vocabulary for rule-based extraction.
//!
//! Compilation is pure: it reads a store snapshot and produces data. The
//! output holds no reference back to the store, and there is no caching
//! across store mutations; callers recompile whenever the vocabulary
//! changes.

use regex::Regex;

use crate::vocabulary::{TermCategory, VocabularyStore};

/// A single literal matcher derived from one surface form of one term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    /// Compiled case-insensitive matcher for the surface form.
    pub regex: Regex,
    /// The surface form the matcher was built from, underscores rendered as
    /// spaces.
    pub surface: String,
}

/// The full set of compiled matchers consumed by the extractor.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// Numeric quantity matchers: thousands-comma-grouped, decimal, integer,
    /// in that order.
    pub quantities: Vec<Regex>,
    /// Unit-of-measure matchers.
    pub units: Vec<TermMatcher>,
    /// Material matchers.
    pub materials: Vec<TermMatcher>,
    /// Equipment matchers.
    pub equipment: Vec<TermMatcher>,
    /// Construction operation verbs.
    pub operations: Regex,
}

/// Derives matchers from the current contents of a [`VocabularyStore`].
pub struct PatternCompiler;

/// Verbs matched as OPERATION spans by the rule-based extractor.
const OPERATION_VERBS: &[&str] = &[
    "install", "pour", "frame", "excavate", "apply", "set", "place", "mount", "run", "lay",
    "hang", "finish",
];

impl PatternCompiler {
    /// Compile matchers for every material, unit, and equipment surface form
    /// in the store, plus the fixed numeric and operation patterns.
    ///
    /// Ordering is deterministic: terms in canonical-name order within each
    /// category, and for each term the canonical name first, then synonyms,
    /// then abbreviations.
    pub fn compile(store: &VocabularyStore) -> CompiledPatterns {
        CompiledPatterns {
            quantities: quantity_patterns(),
            units: Self::category_matchers(store, TermCategory::Unit),
            materials: Self::category_matchers(store, TermCategory::Material),
            equipment: Self::category_matchers(store, TermCategory::Equipment),
            operations: operation_pattern(),
        }
    }

    fn category_matchers(store: &VocabularyStore, category: TermCategory) -> Vec<TermMatcher> {
        let mut matchers = Vec::new();
        for term in store.terms_in_category(category) {
            for form in term.surface_forms() {
                if let Some(matcher) = surface_matcher(form) {
                    matchers.push(matcher);
                }
            }
        }
        matchers
    }
}

/// Build a word-bounded, case-insensitive matcher for one surface form.
/// Underscores are rendered as spaces so canonical names match prose.
/// Returns None for forms with no matchable content.
fn surface_matcher(form: &str) -> Option<TermMatcher> {
    let surface = form.replace('_', " ");
    if surface.trim().is_empty() {
        return None;
    }

    // \b only works next to word characters; a form like "#" would otherwise
    // compile into a pattern that can never match.
    let first = surface.chars().next()?;
    let last = surface.chars().last()?;
    let prefix = if first.is_alphanumeric() { r"\b" } else { "" };
    let suffix = if last.is_alphanumeric() { r"\b" } else { "" };

    let pattern = format!("(?i){}{}{}", prefix, regex::escape(&surface), suffix);
    let regex = Regex::new(&pattern).ok()?;
    Some(TermMatcher { regex, surface })
}

fn quantity_patterns() -> Vec<Regex> {
    [
        r"\b\d{1,3}(?:,\d{3})*(?:\.\d+)?\b", // numbers with thousands commas
        r"\b\d+\.\d+\b",                     // decimals
        r"\b\d+\b",                          // integers
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid quantity pattern"))
    .collect()
}

fn operation_pattern() -> Regex {
    let pattern = format!(r"(?i)\b(?:{})\b", OPERATION_VERBS.join("|"));
    Regex::new(&pattern).expect("invalid operation pattern")
}
