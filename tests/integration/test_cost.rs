//! Cost estimation tests over full analyses.

use std::sync::Arc;

use takeoff::analysis::{ScopeAnalyzer, StructuredExporter, StructuredOutput};
use takeoff::cost::{CostEstimator, VARIANCE_TARGET};
use takeoff::vocabulary::VocabularyStore;

fn output_for(text: &str) -> StructuredOutput {
    let analyzer = ScopeAnalyzer::new(Arc::new(VocabularyStore::with_default_vocabulary()));
    StructuredExporter::export(&analyzer.analyze(text))
}

#[test]
fn test_estimate_prices_all_components() {
    let output = output_for("Excavate 25 cubic yards of soil for foundation using track hoe");
    let estimate = CostEstimator::new().estimate_at(&output, "suburban");

    assert_eq!(estimate.work_type.as_deref(), Some("excavation"));
    // 25 CY at 8.50, excavator for 4 h at 125, excavation crew for 8 h at
    // 155, then the 25% overhead multiplier.
    let expected: f64 = (25.0 * 8.50 + 125.0 * 4.0 + 155.0 * 8.0) * 1.25;
    assert!((estimate.total_cost - (expected * 100.0).round() / 100.0).abs() < 1e-9);
}

#[test]
fn test_estimate_is_deterministic() {
    let output = output_for("Pour 15 CY of concrete for slab on grade");
    let estimator = CostEstimator::new();
    let first = estimator.estimate_at(&output, "rural");
    let second = estimator.estimate_at(&output, "rural");
    assert_eq!(first.total_cost, second.total_cost);
    assert_ne!(first.estimate_id, second.estimate_id);
}

#[test]
fn test_regional_multipliers_order_totals() {
    let output = output_for("Frame 1,200 SF of exterior walls with lumber");
    let estimator = CostEstimator::new();
    let remote = estimator.estimate_at(&output, "remote");
    let suburban = estimator.estimate_at(&output, "suburban");
    let urban = estimator.estimate_at(&output, "urban_high");
    assert!(remote.total_cost < suburban.total_cost);
    assert!(suburban.total_cost < urban.total_cost);
}

#[test]
fn test_variance_report_against_historical_cost() {
    let output = output_for("Pour 15 CY of concrete for slab on grade");
    let estimator = CostEstimator::new();
    let shadow = estimator.estimate_at(&output, "suburban");

    let historical = shadow.total_cost * 1.04;
    let report = estimator.compare(historical, &shadow);
    assert!(report.within_target);
    assert!(report.variance_percentage.abs() <= VARIANCE_TARGET);
    assert!((report.variance_amount - (shadow.total_cost - historical)).abs() < 1e-9);

    let outlier = estimator.compare(shadow.total_cost * 1.5, &shadow);
    assert!(!outlier.within_target);
}
