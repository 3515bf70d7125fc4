//! Built-in construction seed vocabulary.
//!
//! An explicit, immutable seed table loaded into a freshly constructed store
//! per call. Keeping it a plain function (no process-wide mutable state)
//! allows test isolation and multiple simultaneous vocabularies, e.g.
//! regional variants layered over the defaults.

use crate::vocabulary::{TermCategory, VocabularyTerm};

/// The default construction vocabulary: work types, materials, units of
/// measure, crew types, and equipment, each with synonyms and abbreviations.
///
/// Registration order matters for surface-form collisions (last registration
/// wins): work types, then materials, units, crew types, equipment.
pub(crate) fn default_terms() -> Vec<VocabularyTerm> {
    let mut terms = Vec::with_capacity(50);
    terms.extend(work_types());
    terms.extend(materials());
    terms.extend(units());
    terms.extend(crew_types());
    terms.extend(equipment());
    terms
}

fn work_types() -> Vec<VocabularyTerm> {
    use TermCategory::WorkType;
    vec![
        VocabularyTerm::new("excavation", WorkType, "Earth removal and site preparation work")
            .with_synonyms(["digging", "earth_work", "site_prep"])
            .with_abbreviations(["EXCV", "EXC"])
            .with_related_terms(["grading", "trenching", "backfill"]),
        VocabularyTerm::new(
            "concrete_work",
            WorkType,
            "Concrete placement, finishing, and related work",
        )
        .with_synonyms(["concrete_placement", "concrete_pour", "concrete_finishing"])
        .with_abbreviations(["CONC", "CNC"])
        .with_related_terms(["formwork", "reinforcement", "curing"]),
        VocabularyTerm::new("framing", WorkType, "Structural framing including wood and steel")
            .with_synonyms(["rough_carpentry", "structural_framing"])
            .with_abbreviations(["FRAM", "RC"])
            .with_related_terms(["lumber", "fasteners", "structural_engineering"]),
        VocabularyTerm::new("roofing", WorkType, "Roof installation and waterproofing")
            .with_synonyms(["roof_installation", "roof_work"])
            .with_abbreviations(["ROOF", "RF"])
            .with_related_terms(["shingles", "underlayment", "flashing"]),
        VocabularyTerm::new("electrical", WorkType, "Electrical system installation and wiring")
            .with_synonyms(["electrical_work", "wiring"])
            .with_abbreviations(["ELEC", "EL"])
            .with_related_terms(["conduit", "wire", "panel"]),
        VocabularyTerm::new("plumbing", WorkType, "Plumbing system installation")
            .with_synonyms(["plumbing_work", "pipe_work"])
            .with_abbreviations(["PLMB", "PL"])
            .with_related_terms(["pipe", "fittings", "fixtures"]),
        VocabularyTerm::new("masonry", WorkType, "Brick, block, and stone work")
            .with_synonyms(["brick_work", "block_work", "stone_work"])
            .with_abbreviations(["MASN", "MAS"])
            .with_related_terms(["mortar", "brick", "concrete_block"]),
        VocabularyTerm::new("drywall", WorkType, "Drywall installation and finishing")
            .with_synonyms(["gypsum_board", "sheetrock"])
            .with_abbreviations(["DW", "GWB"])
            .with_related_terms(["tape", "mud", "texture"]),
        VocabularyTerm::new(
            "insulation",
            WorkType,
            "Thermal and acoustic insulation installation",
        )
        .with_synonyms(["insulation_work"])
        .with_abbreviations(["INSUL", "INS"])
        .with_related_terms(["batt_insulation", "spray_foam", "vapor_barrier"]),
        VocabularyTerm::new("flooring", WorkType, "Floor covering installation")
            .with_synonyms(["floor_installation", "floor_covering"])
            .with_abbreviations(["FLR", "FLRG"])
            .with_related_terms(["underlayment", "adhesive", "transition_strips"]),
    ]
}

fn materials() -> Vec<VocabularyTerm> {
    use TermCategory::Material;
    vec![
        VocabularyTerm::new("concrete", Material, "Portland cement concrete")
            .with_synonyms(["cement", "concrete_mix"])
            .with_abbreviations(["CONC", "CNC"])
            .with_related_terms(["aggregate", "cement", "water"])
            .with_property("strength", "variable")
            .with_property("curing_time", "28_days"),
        VocabularyTerm::new("rebar", Material, "Reinforcing steel bar")
            .with_synonyms(["reinforcing_steel", "reinforcement"])
            .with_abbreviations(["RB", "REINF"])
            .with_related_terms(["concrete", "ties", "chairs"]),
        VocabularyTerm::new("lumber", Material, "Dimensional lumber for framing")
            .with_synonyms(["wood", "framing_lumber"])
            .with_abbreviations(["LBR", "WD"])
            .with_related_terms(["nails", "screws", "brackets"]),
        VocabularyTerm::new(
            "concrete_masonry_unit",
            Material,
            "Concrete block for masonry construction",
        )
        .with_synonyms(["concrete_block", "cinder_block", "block"])
        .with_abbreviations(["CMU", "BLK"])
        .with_related_terms(["mortar", "grout", "reinforcement"]),
        VocabularyTerm::new("brick", Material, "Clay brick for masonry")
            .with_synonyms(["clay_brick", "face_brick"])
            .with_abbreviations(["BRK", "BR"])
            .with_related_terms(["mortar", "ties", "flashing"]),
        VocabularyTerm::new("gypsum_board", Material, "Drywall panels")
            .with_synonyms(["drywall", "sheetrock", "wallboard"])
            .with_abbreviations(["GWB", "DW"])
            .with_related_terms(["screws", "tape", "compound"]),
        VocabularyTerm::new("insulation_batt", Material, "Fiberglass batt insulation")
            .with_synonyms(["fiberglass_insulation", "batt_insulation"])
            .with_abbreviations(["INSUL", "FG"])
            .with_related_terms(["vapor_barrier", "staples"]),
        VocabularyTerm::new("roofing_shingle", Material, "Asphalt roofing shingles")
            .with_synonyms(["shingles", "roof_shingles"])
            .with_abbreviations(["SHGL", "RS"])
            .with_related_terms(["underlayment", "nails", "ridge_cap"]),
        VocabularyTerm::new("conduit", Material, "Electrical conduit piping")
            .with_synonyms(["electrical_conduit", "pipe"])
            .with_abbreviations(["COND", "EMT"])
            .with_related_terms(["fittings", "wire", "connectors"]),
        VocabularyTerm::new("pipe", Material, "Plumbing pipe")
            .with_synonyms(["plumbing_pipe", "water_pipe"])
            .with_abbreviations(["PP", "PVC"])
            .with_related_terms(["fittings", "joints", "sealant"]),
    ]
}

fn units() -> Vec<VocabularyTerm> {
    use TermCategory::Unit;
    vec![
        VocabularyTerm::new("linear_feet", Unit, "Linear measurement in feet")
            .with_synonyms(["linear_foot", "running_feet", "running_foot"])
            .with_abbreviations(["LF", "LIN FT", "RF"])
            .with_conversion("inches", 12.0)
            .with_conversion("yards", 0.333)
            .with_conversion("meters", 0.3048),
        VocabularyTerm::new("square_feet", Unit, "Area measurement in square feet")
            .with_synonyms(["square_foot"])
            .with_abbreviations(["SF", "SQ FT", "FT2"])
            .with_conversion("square_inches", 144.0)
            .with_conversion("square_yards", 0.111)
            .with_conversion("square_meters", 0.0929),
        VocabularyTerm::new("cubic_feet", Unit, "Volume measurement in cubic feet")
            .with_synonyms(["cubic_foot"])
            .with_abbreviations(["CF", "CU FT", "FT3"])
            .with_conversion("cubic_inches", 1728.0)
            .with_conversion("cubic_yards", 0.037)
            .with_conversion("cubic_meters", 0.0283),
        VocabularyTerm::new("cubic_yards", Unit, "Volume measurement in cubic yards")
            .with_synonyms(["cubic_yard"])
            .with_abbreviations(["CY", "CU YD", "YD3"])
            .with_conversion("cubic_feet", 27.0)
            .with_conversion("cubic_meters", 0.765),
        VocabularyTerm::new("each", Unit, "Individual count unit")
            .with_synonyms(["piece", "item", "unit"])
            .with_abbreviations(["EA", "PC", "PCS"]),
        VocabularyTerm::new("tons", Unit, "Weight measurement in tons")
            .with_synonyms(["ton"])
            .with_abbreviations(["TON", "T"])
            .with_conversion("pounds", 2000.0)
            .with_conversion("kilograms", 907.185),
        VocabularyTerm::new("pounds", Unit, "Weight measurement in pounds")
            .with_synonyms(["pound"])
            .with_abbreviations(["LB", "LBS", "#"])
            .with_conversion("tons", 0.0005)
            .with_conversion("kilograms", 0.453592),
        VocabularyTerm::new("gallons", Unit, "Volume measurement in gallons")
            .with_synonyms(["gallon"])
            .with_abbreviations(["GAL", "G"])
            .with_conversion("liters", 3.78541)
            .with_conversion("cubic_feet", 0.133681),
        VocabularyTerm::new("hours", Unit, "Time measurement in hours")
            .with_synonyms(["hour", "labor_hours"])
            .with_abbreviations(["HR", "HRS", "LH"])
            .with_conversion("days", 0.125)
            .with_conversion("minutes", 60.0),
        VocabularyTerm::new("man_hours", Unit, "Labor time measurement")
            .with_synonyms(["labor_hours", "person_hours"])
            .with_abbreviations(["MH", "LH"])
            .with_conversion("hours", 1.0),
    ]
}

fn crew_types() -> Vec<VocabularyTerm> {
    use TermCategory::CrewType;
    vec![
        VocabularyTerm::new("concrete_crew", CrewType, "Crew specializing in concrete work")
            .with_synonyms(["concrete_team", "cement_crew"])
            .with_abbreviations(["CC", "CONC_CREW"])
            .with_related_terms(["concrete", "formwork", "finishing"]),
        VocabularyTerm::new("framing_crew", CrewType, "Crew specializing in structural framing")
            .with_synonyms(["framing_team", "carpentry_crew"])
            .with_abbreviations(["FC", "FRAM_CREW"])
            .with_related_terms(["lumber", "fasteners", "tools"]),
        VocabularyTerm::new("electrical_crew", CrewType, "Licensed electricians")
            .with_synonyms(["electrical_team", "electricians"])
            .with_abbreviations(["EC", "ELEC_CREW"])
            .with_related_terms(["conduit", "wire", "panels"]),
        VocabularyTerm::new("plumbing_crew", CrewType, "Licensed plumbers")
            .with_synonyms(["plumbing_team", "plumbers"])
            .with_abbreviations(["PC", "PLMB_CREW"])
            .with_related_terms(["pipe", "fittings", "fixtures"]),
        VocabularyTerm::new("masonry_crew", CrewType, "Crew specializing in masonry work")
            .with_synonyms(["masonry_team", "masons"])
            .with_abbreviations(["MC", "MAS_CREW"])
            .with_related_terms(["brick", "block", "mortar"]),
        VocabularyTerm::new("drywall_crew", CrewType, "Crew specializing in drywall installation")
            .with_synonyms(["drywall_team", "taping_crew"])
            .with_abbreviations(["DC", "DW_CREW"])
            .with_related_terms(["gypsum_board", "tape", "compound"]),
        VocabularyTerm::new("roofing_crew", CrewType, "Crew specializing in roofing work")
            .with_synonyms(["roofing_team", "roofers"])
            .with_abbreviations(["RC", "ROOF_CREW"])
            .with_related_terms(["shingles", "underlayment", "flashing"]),
        VocabularyTerm::new(
            "excavation_crew",
            CrewType,
            "Crew specializing in excavation and earthwork",
        )
        .with_synonyms(["excavation_team", "earthwork_crew"])
        .with_abbreviations(["XC", "EXCV_CREW"])
        .with_related_terms(["excavator", "grading", "compaction"]),
        VocabularyTerm::new("general_laborers", CrewType, "General construction laborers")
            .with_synonyms(["laborers", "helpers", "construction_workers"])
            .with_abbreviations(["GL", "LAB"])
            .with_related_terms(["cleanup", "material_handling", "site_prep"]),
        VocabularyTerm::new("finish_crew", CrewType, "Crew specializing in finish work")
            .with_synonyms(["finish_team", "trim_crew"])
            .with_abbreviations(["FN", "FINISH_CREW"])
            .with_related_terms(["trim", "paint", "flooring"]),
    ]
}

fn equipment() -> Vec<VocabularyTerm> {
    use TermCategory::Equipment;
    vec![
        VocabularyTerm::new("excavator", Equipment, "Tracked excavating machine")
            .with_synonyms(["track_hoe", "digger"])
            .with_abbreviations(["EXC", "EXCV"])
            .with_related_terms(["bucket", "tracks", "hydraulics"]),
        VocabularyTerm::new("bulldozer", Equipment, "Tracked earthmoving machine with blade")
            .with_synonyms(["dozer", "track_dozer"])
            .with_abbreviations(["BULL", "DOZ"])
            .with_related_terms(["blade", "ripper", "tracks"]),
        VocabularyTerm::new("concrete_mixer", Equipment, "Truck-mounted concrete mixing drum")
            .with_synonyms(["ready_mix_truck", "cement_truck"])
            .with_abbreviations(["MX", "RMT"])
            .with_related_terms(["chute", "drum", "concrete"]),
        VocabularyTerm::new("crane", Equipment, "Mobile lifting equipment")
            .with_synonyms(["mobile_crane", "lifting_crane"])
            .with_abbreviations(["CR", "CRN"])
            .with_related_terms(["boom", "hook", "outriggers"]),
        VocabularyTerm::new("compactor", Equipment, "Soil and asphalt compacting equipment")
            .with_synonyms(["roller", "vibrating_compactor"])
            .with_abbreviations(["COMP", "ROLL"])
            .with_related_terms(["vibration", "drum", "compaction"]),
        VocabularyTerm::new("forklift", Equipment, "Material handling lift truck")
            .with_synonyms(["lift_truck", "fork_truck"])
            .with_abbreviations(["FL", "LIFT"])
            .with_related_terms(["forks", "mast", "material_handling"]),
        VocabularyTerm::new("skid_steer", Equipment, "Compact wheeled loader")
            .with_synonyms(["skid_loader", "bobcat"])
            .with_abbreviations(["SS", "SKID"])
            .with_related_terms(["bucket", "attachment", "compact"]),
        VocabularyTerm::new("dump_truck", Equipment, "Truck with hydraulic dump bed")
            .with_synonyms(["dumper", "tipper_truck"])
            .with_abbreviations(["DT", "DUMP"])
            .with_related_terms(["bed", "hydraulics", "hauling"]),
        VocabularyTerm::new("generator", Equipment, "Portable electrical power generator")
            .with_synonyms(["portable_generator", "genset"])
            .with_abbreviations(["GEN", "GENR"])
            .with_related_terms(["fuel", "power", "electrical"]),
        VocabularyTerm::new("scaffold", Equipment, "Temporary work platform structure")
            .with_synonyms(["scaffolding", "work_platform"])
            .with_abbreviations(["SCAF", "PLAT"])
            .with_related_terms(["planks", "frames", "safety"]),
    ]
}
