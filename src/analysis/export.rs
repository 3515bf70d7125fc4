//! Serializable structured output assembled from a scope analysis.

use serde::{Deserialize, Serialize};

use crate::analysis::ScopeAnalysis;
use crate::extraction::{EntityExtraction, EntityLabel};
use crate::vocabulary::TermCategory;

/// Downstream-facing record for one analyzed scope sentence.
///
/// The shape is stable: every field is always present, with empty vectors
/// and `None` standing in for absent data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredOutput {
    /// The analyzed text, verbatim.
    pub input_text: String,
    /// Sentence-level classification and consolidation results.
    pub analysis_metadata: AnalysisMetadata,
    /// All extracted entities, in offset order.
    pub entities: Vec<ExportedEntity>,
    /// Vocabulary-aligned entities grouped by category.
    pub ontology_alignment: OntologyAlignmentGroups,
}

/// Sentence-level metadata block of a [`StructuredOutput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub work_type: Option<String>,
    pub operation: Option<String>,
    pub confidence_score: f32,
    pub total_quantity: Option<f64>,
    pub primary_unit: Option<String>,
}

/// One entity in the structured output. Alignment fields are omitted from
/// serialized form when the entity did not resolve against the vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEntity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ontology_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ontology_category: Option<TermCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<String>,
}

impl From<&EntityExtraction> for ExportedEntity {
    fn from(entity: &EntityExtraction) -> Self {
        Self {
            text: entity.text.clone(),
            label: entity.label.clone(),
            start: entity.start,
            end: entity.end,
            confidence: entity.confidence,
            ontology_id: entity.alignment.as_ref().map(|a| a.ontology_id.clone()),
            ontology_category: entity.alignment.as_ref().map(|a| a.ontology_category),
            normalized_value: entity
                .alignment
                .as_ref()
                .map(|a| a.normalized_value.clone()),
        }
    }
}

/// Vocabulary-aligned entities grouped by category. Only entities that
/// resolved against the vocabulary appear here; modifiers are passed through
/// as literal text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyAlignmentGroups {
    pub materials: Vec<AlignedTerm>,
    pub equipment: Vec<AlignedTerm>,
    pub units: Vec<AlignedTerm>,
    pub modifiers: Vec<String>,
}

/// An original surface text paired with its canonical vocabulary term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedTerm {
    /// Surface text as it appeared in the input.
    pub original: String,
    /// Canonical name in the vocabulary.
    pub canonical: String,
    pub category: TermCategory,
}

/// Assembles [`StructuredOutput`] records from analyses.
pub struct StructuredExporter;

impl StructuredExporter {
    /// Build the structured record for one analysis.
    pub fn export(analysis: &ScopeAnalysis) -> StructuredOutput {
        let mut alignment = OntologyAlignmentGroups {
            modifiers: analysis.modifiers.clone(),
            ..Default::default()
        };

        for entity in &analysis.entities {
            let Some(aligned) = entity.alignment.as_ref() else {
                continue;
            };
            let term = AlignedTerm {
                original: entity.text.clone(),
                canonical: aligned.ontology_id.clone(),
                category: aligned.ontology_category,
            };
            match entity.label {
                EntityLabel::Material => alignment.materials.push(term),
                EntityLabel::Equipment => alignment.equipment.push(term),
                EntityLabel::Unit => alignment.units.push(term),
                _ => {}
            }
        }

        StructuredOutput {
            input_text: analysis.original_text.clone(),
            analysis_metadata: AnalysisMetadata {
                work_type: analysis.work_type.clone(),
                operation: analysis.operation.clone(),
                confidence_score: analysis.confidence_score,
                total_quantity: analysis.total_quantity,
                primary_unit: analysis.primary_unit.clone(),
            },
            entities: analysis.entities.iter().map(ExportedEntity::from).collect(),
            ontology_alignment: alignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::ScopeAnalyzer;
    use crate::vocabulary::VocabularyStore;

    fn analyze(text: &str) -> ScopeAnalysis {
        ScopeAnalyzer::new(Arc::new(VocabularyStore::with_default_vocabulary())).analyze(text)
    }

    #[test]
    fn test_export_groups_aligned_entities() {
        let analysis = analyze("Excavate 25 cubic yards of soil using track hoe");
        let output = StructuredExporter::export(&analysis);

        assert_eq!(output.input_text, analysis.original_text);
        assert_eq!(output.analysis_metadata.work_type.as_deref(), Some("excavation"));

        let equipment = &output.ontology_alignment.equipment;
        assert_eq!(equipment.len(), 1);
        assert_eq!(equipment[0].original, "track hoe");
        assert_eq!(equipment[0].canonical, "excavator");
        assert_eq!(equipment[0].category, TermCategory::Equipment);

        assert!(output
            .ontology_alignment
            .units
            .iter()
            .any(|u| u.canonical == "cubic_yards"));
    }

    #[test]
    fn test_unaligned_entities_have_no_ontology_fields() {
        let analysis = analyze("Install 500 linear feet of concrete footing");
        let output = StructuredExporter::export(&analysis);

        let quantity = output
            .entities
            .iter()
            .find(|e| e.label == EntityLabel::Quantity)
            .unwrap();
        assert!(quantity.ontology_id.is_none());

        let json = serde_json::to_value(quantity).unwrap();
        assert!(json.get("ontology_id").is_none());
    }

    #[test]
    fn test_export_shape_is_stable_for_empty_analysis() {
        let output = StructuredExporter::export(&analyze(""));
        assert!(output.entities.is_empty());
        assert!(output.ontology_alignment.materials.is_empty());
        assert_eq!(output.analysis_metadata.confidence_score, 0.0);

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("ontology_alignment").is_some());
        assert!(json.get("analysis_metadata").is_some());
    }

    #[test]
    fn test_round_trip_serialization() {
        let output =
            StructuredExporter::export(&analyze("Pour 15 CY of concrete for slab on grade"));
        let json = serde_json::to_string(&output).unwrap();
        let back: StructuredOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.input_text, output.input_text);
        assert_eq!(back.entities.len(), output.entities.len());
    }
}
