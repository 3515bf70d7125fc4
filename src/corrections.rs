//! User correction records and in-memory aggregation.
//!
//! Corrections capture the delta between what the analyzer produced and what
//! a reviewer says it should have produced. The log is an in-memory
//! collection point; persistence and retraining live outside this crate.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// What kind of analyzer output a correction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionType {
    /// Right span, wrong label.
    EntityLabel,
    /// Right entity, wrong start or end offset.
    EntityBoundary,
    /// An entity the extractor should have found but did not.
    MissedEntity,
    /// An extracted span that is not a real entity.
    FalsePositive,
    /// Wrong work-type classification.
    WorkType,
    /// Wrong consolidated quantity or unit.
    Quantity,
    /// Wrong cost estimate.
    Cost,
}

impl CorrectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityLabel => "entity_label",
            Self::EntityBoundary => "entity_boundary",
            Self::MissedEntity => "missed_entity",
            Self::FalsePositive => "false_positive",
            Self::WorkType => "work_type",
            Self::Quantity => "quantity",
            Self::Cost => "cost",
        }
    }
}

impl std::fmt::Display for CorrectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review priority of a correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

/// One reviewer correction against one analyzed text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCorrection {
    pub correction_id: String,
    pub user_id: String,
    pub session_id: String,
    /// The text the analyzer ran on, verbatim.
    pub original_text: String,
    pub correction_type: CorrectionType,
    /// What the analyzer produced, as loose JSON so any output shape
    /// (entity, work type, cost figure) fits.
    pub original_prediction: Value,
    /// What the reviewer says it should have been.
    pub corrected_prediction: Value,
    /// Analyzer confidence at the time of the prediction.
    pub confidence_score: f32,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl UserCorrection {
    /// Build a correction with a fresh id and the current timestamp.
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        original_text: impl Into<String>,
        correction_type: CorrectionType,
        original_prediction: Value,
        corrected_prediction: Value,
        confidence_score: f32,
    ) -> Self {
        Self {
            correction_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            original_text: original_text.into(),
            correction_type,
            original_prediction,
            corrected_prediction,
            confidence_score,
            feedback_text: None,
            priority: Priority::Normal,
            created_at: Utc::now(),
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback_text = Some(feedback.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Summary statistics over a correction log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionStatistics {
    pub total_corrections: usize,
    pub corrections_by_type: BTreeMap<String, usize>,
    /// Corrections recorded within the last 30 days.
    pub recent_corrections: usize,
}

/// In-memory collection of corrections.
#[derive(Debug, Default)]
pub struct CorrectionLog {
    corrections: Vec<UserCorrection>,
}

impl CorrectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a correction, returning its id.
    pub fn record(&mut self, correction: UserCorrection) -> String {
        tracing::debug!(
            correction_type = %correction.correction_type,
            session = %correction.session_id,
            "Recording correction"
        );
        let id = correction.correction_id.clone();
        self.corrections.push(correction);
        id
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// All corrections, in recording order.
    pub fn corrections(&self) -> &[UserCorrection] {
        &self.corrections
    }

    /// Corrections recorded under one session, in recording order.
    pub fn for_session(&self, session_id: &str) -> Vec<&UserCorrection> {
        self.corrections
            .iter()
            .filter(|c| c.session_id == session_id)
            .collect()
    }

    /// Corrections of one type, in recording order.
    pub fn of_type(&self, correction_type: CorrectionType) -> Vec<&UserCorrection> {
        self.corrections
            .iter()
            .filter(|c| c.correction_type == correction_type)
            .collect()
    }

    /// Aggregate counts across the whole log.
    pub fn statistics(&self) -> CorrectionStatistics {
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for correction in &self.corrections {
            *by_type
                .entry(correction.correction_type.as_str().to_string())
                .or_default() += 1;
        }

        let cutoff = Utc::now() - Duration::days(30);
        let recent = self
            .corrections
            .iter()
            .filter(|c| c.created_at > cutoff)
            .count();

        CorrectionStatistics {
            total_corrections: self.corrections.len(),
            corrections_by_type: by_type,
            recent_corrections: recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(correction_type: CorrectionType, session: &str) -> UserCorrection {
        UserCorrection::new(
            "estimator-1",
            session,
            "Install 500 linear feet of concrete footing",
            correction_type,
            json!({"label": "MATERIAL", "text": "footing"}),
            json!({"label": "MODIFIER", "text": "footing"}),
            0.8,
        )
    }

    #[test]
    fn test_record_and_group_by_session() {
        let mut log = CorrectionLog::new();
        log.record(sample(CorrectionType::EntityLabel, "session-a"));
        log.record(sample(CorrectionType::WorkType, "session-a"));
        log.record(sample(CorrectionType::Cost, "session-b"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.for_session("session-a").len(), 2);
        assert_eq!(log.for_session("session-b").len(), 1);
        assert!(log.for_session("session-c").is_empty());
    }

    #[test]
    fn test_statistics_counts_by_type() {
        let mut log = CorrectionLog::new();
        log.record(sample(CorrectionType::EntityLabel, "s"));
        log.record(sample(CorrectionType::EntityLabel, "s"));
        log.record(sample(CorrectionType::MissedEntity, "s"));

        let stats = log.statistics();
        assert_eq!(stats.total_corrections, 3);
        assert_eq!(stats.corrections_by_type.get("entity_label"), Some(&2));
        assert_eq!(stats.corrections_by_type.get("missed_entity"), Some(&1));
        // Fresh corrections are always recent.
        assert_eq!(stats.recent_corrections, 3);
    }

    #[test]
    fn test_of_type_filter() {
        let mut log = CorrectionLog::new();
        log.record(sample(CorrectionType::Quantity, "s"));
        log.record(sample(CorrectionType::FalsePositive, "s"));
        assert_eq!(log.of_type(CorrectionType::Quantity).len(), 1);
        assert!(log.of_type(CorrectionType::EntityBoundary).is_empty());
    }

    #[test]
    fn test_correction_type_serializes_snake_case() {
        let json = serde_json::to_string(&CorrectionType::FalsePositive).unwrap();
        assert_eq!(json, "\"false_positive\"");
        let back: CorrectionType = serde_json::from_str("\"entity_boundary\"").unwrap();
        assert_eq!(back, CorrectionType::EntityBoundary);
    }

    #[test]
    fn test_builder_fields() {
        let correction = sample(CorrectionType::Cost, "s")
            .with_feedback("estimate ignored the crane")
            .with_priority(Priority::High);
        assert_eq!(correction.priority, Priority::High);
        assert!(correction.feedback_text.is_some());
        assert!(!correction.correction_id.is_empty());
    }
}
