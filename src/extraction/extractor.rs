//! Rule-based entity extraction with deterministic overlap resolution.

use std::sync::Arc;

use crate::config::ExtractionSettings;
use crate::extraction::{
    CompiledPatterns, EntityExtraction, EntityLabel, EntityRecognizer, OntologyAlignment,
    PatternCompiler, RecognizedSpan, TermMatcher,
};
use crate::vocabulary::VocabularyStore;

/// Extracts entity spans from scope text.
///
/// Holds a read-only vocabulary snapshot and the matchers compiled from it.
/// Extraction is pure and synchronous; independent extractions may run in
/// parallel as long as each thread holds its own `Arc` to the store.
pub struct EntityExtractor {
    store: Arc<VocabularyStore>,
    patterns: CompiledPatterns,
    settings: ExtractionSettings,
}

impl EntityExtractor {
    /// Create an extractor over the given vocabulary with default settings.
    pub fn new(store: Arc<VocabularyStore>) -> Self {
        Self::with_settings(store, ExtractionSettings::default())
    }

    /// Create an extractor with explicit per-label confidence settings.
    pub fn with_settings(store: Arc<VocabularyStore>, settings: ExtractionSettings) -> Self {
        let patterns = PatternCompiler::compile(&store);
        Self {
            store,
            patterns,
            settings,
        }
    }

    /// The vocabulary this extractor aligns against.
    pub fn store(&self) -> &Arc<VocabularyStore> {
        &self.store
    }

    /// Extract entities from text, merging externally recognized spans with
    /// rule-based matches.
    ///
    /// External spans are accepted as a first tier with their original
    /// confidence. The result is sorted ascending by start offset and
    /// contains no overlapping spans: a left-to-right sweep keeps the
    /// higher-confidence span of any overlapping pair, ties keeping the
    /// first seen. No matches is an empty list, never an error.
    pub fn extract(&self, text: &str, external: &[RecognizedSpan]) -> Vec<EntityExtraction> {
        let mut candidates: Vec<EntityExtraction> = Vec::new();

        for span in external {
            if !valid_span(text, span) {
                tracing::warn!(
                    start = span.start,
                    end = span.end,
                    label = %span.label,
                    "Skipping external span with invalid offsets"
                );
                continue;
            }
            candidates.push(EntityExtraction {
                start: span.start,
                end: span.end,
                label: EntityLabel::from_raw(&span.label),
                text: span.text.clone(),
                confidence: span.confidence,
                alignment: None,
            });
        }

        for regex in &self.patterns.quantities {
            for m in regex.find_iter(text) {
                candidates.push(EntityExtraction {
                    start: m.start(),
                    end: m.end(),
                    label: EntityLabel::Quantity,
                    text: m.as_str().to_string(),
                    confidence: self.settings.quantity_confidence,
                    alignment: None,
                });
            }
        }

        self.scan_terms(
            text,
            &self.patterns.units,
            EntityLabel::Unit,
            self.settings.unit_confidence,
            &mut candidates,
        );
        self.scan_terms(
            text,
            &self.patterns.materials,
            EntityLabel::Material,
            self.settings.term_confidence,
            &mut candidates,
        );
        self.scan_terms(
            text,
            &self.patterns.equipment,
            EntityLabel::Equipment,
            self.settings.term_confidence,
            &mut candidates,
        );

        for m in self.patterns.operations.find_iter(text) {
            candidates.push(EntityExtraction {
                start: m.start(),
                end: m.end(),
                label: EntityLabel::Operation,
                text: m.as_str().to_string(),
                confidence: self.settings.operation_confidence,
                alignment: None,
            });
        }

        // Stable sort keeps the external tier ahead of rule-based candidates
        // at equal starts, so ties favor the first tier.
        candidates.sort_by_key(|e| e.start);
        resolve_overlaps(candidates)
    }

    /// Extract with an external recognizer, degrading to rule-based-only
    /// extraction if the collaborator errors.
    pub fn extract_with(
        &self,
        text: &str,
        recognizer: &dyn EntityRecognizer,
    ) -> Vec<EntityExtraction> {
        match recognizer.recognize(text) {
            Ok(spans) => self.extract(text, &spans),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "External recognizer unavailable, falling back to rule-based extraction"
                );
                self.extract(text, &[])
            }
        }
    }

    fn scan_terms(
        &self,
        text: &str,
        matchers: &[TermMatcher],
        label: EntityLabel,
        confidence: f32,
        candidates: &mut Vec<EntityExtraction>,
    ) {
        for matcher in matchers {
            for m in matcher.regex.find_iter(text) {
                let alignment = self.store.get_term(m.as_str()).map(|term| OntologyAlignment {
                    ontology_id: term.canonical_name.clone(),
                    ontology_category: term.category,
                    normalized_value: term.canonical_name.clone(),
                });
                candidates.push(EntityExtraction {
                    start: m.start(),
                    end: m.end(),
                    label: label.clone(),
                    text: m.as_str().to_string(),
                    confidence,
                    alignment,
                });
            }
        }
    }
}

fn valid_span(text: &str, span: &RecognizedSpan) -> bool {
    span.start < span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end)
}

/// Greedy left-to-right overlap resolution over start-sorted candidates.
///
/// Each candidate is compared against the last survivor: on overlap the
/// strictly higher-confidence span wins, a tie keeps the earlier one. This
/// is a known approximation — with three or more chain-overlapping spans the
/// kept set may not maximize total confidence.
fn resolve_overlaps(candidates: Vec<EntityExtraction>) -> Vec<EntityExtraction> {
    let mut resolved: Vec<EntityExtraction> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match resolved.last_mut() {
            Some(last) if candidate.start < last.end => {
                if candidate.confidence > last.confidence {
                    *last = candidate;
                }
            }
            _ => resolved.push(candidate),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(Arc::new(VocabularyStore::with_default_vocabulary()))
    }

    fn assert_sorted_non_overlapping(entities: &[EntityExtraction]) {
        for pair in entities.windows(2) {
            assert!(pair[0].start <= pair[1].start, "not sorted by start");
            assert!(pair[0].end <= pair[1].start, "overlapping spans survived");
        }
    }

    #[test]
    fn test_quantity_extraction() {
        let extractor = extractor();
        let entities = extractor.extract("Install 500 linear feet of concrete footing", &[]);
        let quantities: Vec<_> = entities
            .iter()
            .filter(|e| e.label == EntityLabel::Quantity)
            .collect();
        assert_eq!(quantities.len(), 1);
        assert_eq!(quantities[0].text, "500");
    }

    #[test]
    fn test_comma_grouped_quantity() {
        let extractor = extractor();
        let entities = extractor.extract("Frame 1,200 SF of exterior walls", &[]);
        let quantity = entities
            .iter()
            .find(|e| e.label == EntityLabel::Quantity)
            .unwrap();
        assert_eq!(quantity.text, "1,200");
    }

    #[test]
    fn test_unit_and_material_alignment() {
        let extractor = extractor();
        let entities = extractor.extract("Install 500 linear feet of concrete footing", &[]);

        let unit = entities.iter().find(|e| e.label == EntityLabel::Unit).unwrap();
        assert_eq!(unit.text.to_lowercase(), "linear feet");
        assert_eq!(unit.alignment.as_ref().unwrap().ontology_id, "linear_feet");

        let material = entities
            .iter()
            .find(|e| e.label == EntityLabel::Material)
            .unwrap();
        assert_eq!(material.alignment.as_ref().unwrap().ontology_id, "concrete");
    }

    #[test]
    fn test_equipment_synonym_alignment() {
        let extractor = extractor();
        let entities = extractor.extract("Excavate 25 cubic yards of soil using track hoe", &[]);
        let equipment = entities
            .iter()
            .find(|e| e.label == EntityLabel::Equipment)
            .unwrap();
        assert_eq!(equipment.text, "track hoe");
        assert_eq!(equipment.alignment.as_ref().unwrap().ontology_id, "excavator");
    }

    #[test]
    fn test_operation_span() {
        let extractor = extractor();
        let entities = extractor.extract("Pour 15 CY of concrete for slab", &[]);
        let operation = entities
            .iter()
            .find(|e| e.label == EntityLabel::Operation)
            .unwrap();
        assert_eq!(operation.text, "Pour");
    }

    #[test]
    fn test_result_sorted_and_non_overlapping() {
        let extractor = extractor();
        for text in [
            "Install 500 linear feet of concrete footing with #4 rebar at 12 inch centers",
            "Excavate 25 cubic yards of soil for foundation using track hoe",
            "Hang and finish 2,400 SF of 5/8 inch drywall on interior walls",
        ] {
            let entities = extractor.extract(text, &[]);
            assert!(!entities.is_empty());
            assert_sorted_non_overlapping(&entities);
        }
    }

    #[test]
    fn test_empty_text_yields_empty_list() {
        let extractor = extractor();
        assert!(extractor.extract("", &[]).is_empty());
    }

    #[test]
    fn test_higher_confidence_overlap_wins() {
        let extractor = extractor();
        let text = "concrete footing";
        let external = vec![
            RecognizedSpan {
                start: 0,
                end: 8,
                label: "MATERIAL".to_string(),
                text: "concrete".to_string(),
                confidence: 0.9,
            },
            RecognizedSpan {
                start: 0,
                end: 16,
                label: "MATERIAL".to_string(),
                text: "concrete footing".to_string(),
                confidence: 0.95,
            },
        ];
        let entities = extractor.extract(text, &external);
        assert_eq!(entities.len(), 1);
        assert!((entities[0].confidence - 0.95).abs() < 1e-6);
        assert_eq!(entities[0].text, "concrete footing");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let extractor = extractor();
        let text = "concrete";
        let external = vec![
            RecognizedSpan {
                start: 0,
                end: 8,
                label: "FIRST".to_string(),
                text: "concrete".to_string(),
                confidence: 0.8,
            },
            RecognizedSpan {
                start: 0,
                end: 8,
                label: "SECOND".to_string(),
                text: "concrete".to_string(),
                confidence: 0.8,
            },
        ];
        let entities = extractor.extract(text, &external);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, EntityLabel::External("FIRST".to_string()));
    }

    #[test]
    fn test_external_unknown_label_preserved() {
        let extractor = extractor();
        let external = vec![RecognizedSpan {
            start: 0,
            end: 7,
            label: "PERSON".to_string(),
            text: "Unknown".to_string(),
            confidence: 0.99,
        }];
        let entities = extractor.extract("Unknown text", &external);
        assert!(entities
            .iter()
            .any(|e| e.label == EntityLabel::External("PERSON".to_string())));
    }

    #[test]
    fn test_invalid_external_span_skipped() {
        let extractor = extractor();
        let external = vec![RecognizedSpan {
            start: 10,
            end: 4,
            label: "MATERIAL".to_string(),
            text: "bogus".to_string(),
            confidence: 0.99,
        }];
        let entities = extractor.extract("concrete", &external);
        // Only the rule-based material span survives.
        assert!(entities.iter().all(|e| (e.confidence - 0.99).abs() > 1e-6));
        assert!(entities.iter().any(|e| e.label == EntityLabel::Material));
    }

    #[test]
    fn test_recognizer_error_degrades_to_rules() {
        struct Failing;
        impl EntityRecognizer for Failing {
            fn recognize(&self, _text: &str) -> crate::error::Result<Vec<RecognizedSpan>> {
                Err(crate::error::ExtractionError::Recognizer("model offline".to_string()).into())
            }
        }

        let extractor = extractor();
        let entities = extractor.extract_with("Install 500 linear feet of concrete", &Failing);
        assert!(entities.iter().any(|e| e.label == EntityLabel::Quantity));
        assert!(entities.iter().any(|e| e.label == EntityLabel::Material));
    }
}
