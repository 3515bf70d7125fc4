//! Cost estimation over structured scope analyses.
//!
//! Rates are a built-in table keyed by work type. Estimates derive entirely
//! from the structured output of an analysis plus a regional location tag,
//! so two runs over the same analysis always price identically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::StructuredOutput;
use crate::config::CostSettings;

/// Target absolute variance between a historical cost and a shadow estimate.
pub const VARIANCE_TARGET: f64 = 0.05;

/// Equipment usage assumed per line item, in hours.
const EQUIPMENT_HOURS: f64 = 4.0;

/// Crew time assumed per line item, in hours.
const CREW_HOURS: f64 = 8.0;

/// Unit cost table by work type. Keys encode the priced item and its unit
/// (e.g. `concrete_footing_per_lf`); entry order matters because unit
/// matching scans keys in order.
const UNIT_COSTS: &[(&str, &[(&str, f64)])] = &[
    (
        "concrete_work",
        &[
            ("concrete_per_cy", 145.00),
            ("concrete_footing_per_lf", 12.50),
            ("concrete_slab_per_sf", 8.75),
            ("rebar_per_lb", 1.25),
            ("formwork_per_sf", 6.50),
        ],
    ),
    (
        "excavation",
        &[
            ("excavation_per_cy", 8.50),
            ("backfill_per_cy", 6.25),
            ("grading_per_sy", 3.75),
            ("trenching_per_lf", 4.50),
        ],
    ),
    (
        "framing",
        &[
            ("lumber_framing_per_bf", 2.85),
            ("exterior_wall_per_sf", 12.50),
            ("interior_wall_per_sf", 8.75),
            ("roof_framing_per_sf", 15.25),
        ],
    ),
    (
        "electrical",
        &[
            ("conduit_per_lf", 8.50),
            ("wire_per_lf", 2.25),
            ("outlet_installation_ea", 125.00),
            ("panel_installation_ea", 850.00),
        ],
    ),
    (
        "plumbing",
        &[
            ("pipe_per_lf", 12.50),
            ("fixture_installation_ea", 325.00),
            ("water_line_per_lf", 15.75),
        ],
    ),
    (
        "masonry",
        &[
            ("brick_per_sf", 18.50),
            ("cmu_per_sf", 12.25),
            ("mortar_per_bag", 8.50),
        ],
    ),
    (
        "drywall",
        &[
            ("drywall_per_sf", 4.25),
            ("tape_finish_per_sf", 2.75),
            ("texture_per_sf", 1.50),
        ],
    ),
    (
        "roofing",
        &[
            ("shingles_per_square", 285.00),
            ("underlayment_per_square", 45.00),
            ("flashing_per_lf", 8.50),
        ],
    ),
    (
        "insulation",
        &[
            ("batt_insulation_per_sf", 2.85),
            ("blown_insulation_per_sf", 1.95),
        ],
    ),
    (
        "flooring",
        &[
            ("tile_per_sf", 12.50),
            ("hardwood_per_sf", 18.75),
            ("carpet_per_sf", 6.25),
        ],
    ),
];

/// Preferred unit cost key per work type, used when the analyzed unit text
/// matches no key.
const FALLBACK_KEYS: &[(&str, &str)] = &[
    ("concrete_work", "concrete_per_cy"),
    ("excavation", "excavation_per_cy"),
    ("framing", "lumber_framing_per_bf"),
    ("electrical", "conduit_per_lf"),
    ("plumbing", "pipe_per_lf"),
    ("masonry", "brick_per_sf"),
    ("drywall", "drywall_per_sf"),
    ("roofing", "shingles_per_square"),
    ("insulation", "batt_insulation_per_sf"),
    ("flooring", "tile_per_sf"),
];

/// Hourly equipment rates by canonical equipment name.
const EQUIPMENT_RATES: &[(&str, f64)] = &[
    ("excavator", 125.00),
    ("bulldozer", 145.00),
    ("concrete_mixer", 85.00),
    ("crane", 185.00),
    ("compactor", 65.00),
    ("forklift", 45.00),
    ("skid_steer", 75.00),
    ("dump_truck", 95.00),
];

/// Hourly crew rates by crew key.
const CREW_RATES: &[(&str, f64)] = &[
    ("concrete_crew", 185.00),
    ("framing_crew", 165.00),
    ("electrical_crew", 225.00),
    ("plumbing_crew", 195.00),
    ("masonry_crew", 175.00),
    ("drywall_crew", 145.00),
    ("roofing_crew", 185.00),
    ("excavation_crew", 155.00),
    ("general_laborers", 125.00),
    ("finish_crew", 165.00),
];

/// Regional cost multipliers by location tag. Unknown locations price at 1.0.
const REGIONAL_MULTIPLIERS: &[(&str, f64)] = &[
    ("urban_high", 1.25),
    ("urban_medium", 1.15),
    ("suburban", 1.00),
    ("rural", 0.85),
    ("remote", 0.75),
];

/// One priced estimate for an analyzed scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Unique id for this estimate.
    pub estimate_id: String,
    /// Work type the pricing was keyed on, if any was classified.
    pub work_type: Option<String>,
    /// Location tag the regional multiplier was taken from.
    pub location: String,
    /// Quantity times unit cost, before regional adjustment.
    pub base_cost: f64,
    pub regional_multiplier: f64,
    /// Priced equipment time across all aligned equipment entities.
    pub equipment_cost: f64,
    /// Priced crew time for the work type's crew, when one exists.
    pub crew_cost: f64,
    /// Final cost including overhead and profit, rounded to cents.
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

/// Comparison of a historical cost against a freshly priced shadow estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceReport {
    pub report_id: String,
    pub original_cost: f64,
    pub shadow_cost: f64,
    /// Shadow minus original, signed.
    pub variance_amount: f64,
    /// Signed variance as a fraction of the original; 0.0 when the original
    /// cost is not positive.
    pub variance_percentage: f64,
    /// Whether the absolute variance is within [`VARIANCE_TARGET`].
    pub within_target: bool,
    pub created_at: DateTime<Utc>,
}

/// Prices structured scope analyses against the built-in rate tables.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    settings: CostSettings,
}

impl CostEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CostSettings) -> Self {
        Self { settings }
    }

    /// Price an analysis at the configured default location.
    pub fn estimate(&self, output: &StructuredOutput) -> CostEstimate {
        self.estimate_at(output, &self.settings.location)
    }

    /// Price an analysis at an explicit location tag.
    pub fn estimate_at(&self, output: &StructuredOutput, location: &str) -> CostEstimate {
        let metadata = &output.analysis_metadata;
        let work_type = metadata.work_type.as_deref();
        let quantity = metadata.total_quantity.unwrap_or(1.0);
        let unit = metadata.primary_unit.as_deref().unwrap_or("ea");

        let base_cost = match work_type.and_then(work_type_costs) {
            Some(unit_costs) => unit_cost(work_type.unwrap_or_default(), unit, unit_costs) * quantity,
            // Unclassified scopes price at a flat per-quantity rate.
            None => 100.0 * quantity,
        };

        let regional_multiplier = table_get(REGIONAL_MULTIPLIERS, location).unwrap_or(1.0);
        let adjusted_cost = base_cost * regional_multiplier;

        let equipment_cost: f64 = output
            .ontology_alignment
            .equipment
            .iter()
            .filter_map(|term| table_get(EQUIPMENT_RATES, &term.canonical))
            .map(|rate| rate * EQUIPMENT_HOURS)
            .sum();

        let crew_cost = work_type
            .map(|w| format!("{}_crew", w.replace("_work", "")))
            .and_then(|key| table_get(CREW_RATES, &key))
            .map(|rate| rate * CREW_HOURS)
            .unwrap_or(0.0);

        let total = (adjusted_cost + equipment_cost + crew_cost) * self.settings.overhead_multiplier;

        CostEstimate {
            estimate_id: Uuid::new_v4().to_string(),
            work_type: metadata.work_type.clone(),
            location: location.to_string(),
            base_cost,
            regional_multiplier,
            equipment_cost,
            crew_cost,
            total_cost: round_cents(total),
            created_at: Utc::now(),
        }
    }

    /// Compare a historical cost against a shadow estimate.
    pub fn compare(&self, original_cost: f64, shadow: &CostEstimate) -> VarianceReport {
        let variance_amount = shadow.total_cost - original_cost;
        let variance_percentage = if original_cost > 0.0 {
            variance_amount / original_cost
        } else {
            0.0
        };

        VarianceReport {
            report_id: Uuid::new_v4().to_string(),
            original_cost,
            shadow_cost: shadow.total_cost,
            variance_amount,
            variance_percentage,
            within_target: variance_percentage.abs() <= VARIANCE_TARGET,
            created_at: Utc::now(),
        }
    }
}

fn work_type_costs(work_type: &str) -> Option<&'static [(&'static str, f64)]> {
    UNIT_COSTS
        .iter()
        .find(|(name, _)| *name == work_type)
        .map(|(_, costs)| *costs)
}

/// Resolve the unit cost for a work type: the first key containing the
/// lower-cased unit text, else the work type's fallback key, else the first
/// key in the table.
fn unit_cost(work_type: &str, unit: &str, unit_costs: &[(&str, f64)]) -> f64 {
    let unit_lower = unit.to_lowercase();
    if let Some((_, cost)) = unit_costs.iter().find(|(key, _)| key.contains(&unit_lower)) {
        return *cost;
    }

    table_get(FALLBACK_KEYS, work_type)
        .and_then(|key| unit_costs.iter().find(|(k, _)| *k == key))
        .or_else(|| unit_costs.first())
        .map(|(_, cost)| *cost)
        .unwrap_or(50.0)
}

fn table_get<V: Copy>(table: &[(&str, V)], key: &str) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
