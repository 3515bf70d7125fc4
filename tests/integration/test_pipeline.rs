//! End-to-end pipeline tests: scope text in, structured output out.

use std::sync::Arc;

use takeoff::analysis::{ScopeAnalyzer, StructuredExporter};
use takeoff::extraction::{EntityLabel, EntityRecognizer, RecognizedSpan};
use takeoff::vocabulary::VocabularyStore;

fn analyzer() -> ScopeAnalyzer {
    ScopeAnalyzer::new(Arc::new(VocabularyStore::with_default_vocabulary()))
}

#[test]
fn test_concrete_footing_scope() {
    let analysis = analyzer()
        .analyze("Install 500 linear feet of concrete footing with #4 rebar at 12 inch centers");

    assert_eq!(analysis.work_type.as_deref(), Some("concrete_work"));
    assert_eq!(analysis.operation.as_deref(), Some("install"));
    assert!(analysis
        .entities
        .iter()
        .any(|e| e.label == EntityLabel::Quantity && e.text == "500"));
    assert!(analysis.entities.iter().any(|e| {
        e.label == EntityLabel::Material
            && e.alignment.as_ref().is_some_and(|a| a.ontology_id == "concrete")
    }));
}

#[test]
fn test_excavation_scope_resolves_equipment_synonym() {
    let analysis =
        analyzer().analyze("Excavate 25 cubic yards of soil for foundation using track hoe");

    assert_eq!(analysis.work_type.as_deref(), Some("excavation"));
    assert!(analysis.entities.iter().any(|e| {
        e.label == EntityLabel::Equipment
            && e.alignment.as_ref().is_some_and(|a| a.ontology_id == "excavator")
    }));
}

#[test]
fn test_empty_input_yields_empty_analysis() {
    let analysis = analyzer().analyze("");
    assert!(analysis.entities.is_empty());
    assert_eq!(analysis.work_type, None);
    assert_eq!(analysis.operation, None);
    assert_eq!(analysis.confidence_score, 0.0);
}

#[test]
fn test_overlapping_spans_keep_higher_confidence() {
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

    let analysis = analyzer().analyze_with_spans(text, &external);
    assert_eq!(analysis.entities.len(), 1);
    assert!((analysis.entities[0].confidence - 0.95).abs() < 1e-6);
}

#[test]
fn test_structured_export_of_drywall_scope() {
    let analysis = analyzer().analyze("Hang and finish 2,400 SF of 5/8 inch drywall on interior walls");
    let output = StructuredExporter::export(&analysis);

    assert_eq!(output.analysis_metadata.work_type.as_deref(), Some("drywall"));
    assert_eq!(output.analysis_metadata.total_quantity, Some(2400.0));
    assert!(output
        .ontology_alignment
        .materials
        .iter()
        .any(|m| m.canonical == "gypsum_board"));

    // The record serializes to JSON and back without loss.
    let json = serde_json::to_string_pretty(&output).unwrap();
    let back: takeoff::analysis::StructuredOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back.entities.len(), output.entities.len());
}

#[test]
fn test_external_recognizer_spans_merge_into_analysis() {
    struct WallRecognizer;
    impl EntityRecognizer for WallRecognizer {
        fn recognize(&self, text: &str) -> takeoff::Result<Vec<RecognizedSpan>> {
            let needle = "fire-rated";
            Ok(text
                .find(needle)
                .map(|start| RecognizedSpan {
                    start,
                    end: start + needle.len(),
                    label: "MODIFIER".to_string(),
                    text: needle.to_string(),
                    confidence: 0.92,
                })
                .into_iter()
                .collect())
        }
    }

    let analyzer = analyzer().with_recognizer(Box::new(WallRecognizer));
    let analysis = analyzer.analyze("Install fire-rated drywall on the corridor walls");
    assert_eq!(analysis.modifiers, vec!["fire-rated".to_string()]);
    assert!(analysis
        .entities
        .iter()
        .any(|e| e.label == EntityLabel::Modifier));
}

#[test]
fn test_failing_recognizer_degrades_to_rules() {
    struct Offline;
    impl EntityRecognizer for Offline {
        fn recognize(&self, _text: &str) -> takeoff::Result<Vec<RecognizedSpan>> {
            Err(takeoff::ExtractionError::Recognizer("model offline".to_string()).into())
        }
    }

    let analyzer = analyzer().with_recognizer(Box::new(Offline));
    let analysis = analyzer.analyze("Pour 15 CY of concrete for slab on grade");
    assert_eq!(analysis.work_type.as_deref(), Some("concrete_work"));
    assert!(analysis
        .entities
        .iter()
        .any(|e| e.label == EntityLabel::Quantity));
}

#[test]
fn test_entities_sorted_and_non_overlapping() {
    let analysis = analyzer()
        .analyze("Excavate 1,250 CY of soil with excavator and dump truck, then pour concrete");
    assert!(!analysis.entities.is_empty());
    for pair in analysis.entities.windows(2) {
        assert!(pair[0].start <= pair[1].start);
        assert!(pair[0].end <= pair[1].start);
    }
}
