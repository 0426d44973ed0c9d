//! # Feeder Sizing
//!
//! The full single-pass pipeline for one panel:
//!
//! ```text
//! loads ──► derating ──► cable selection ──► terminals ──┐
//!               └──────► breaker selection ──────────────┼──► bill of materials
//! panel ──► wiring estimate ─────────────────────────────┘
//! ```
//!
//! [`calculate`] trusts its input to be within the documented bounds (the
//! input layer enforces them). [`calculate_checked`] runs
//! [`FeederInput::validate`] first.
//!
//! ## Example
//!
//! ```rust
//! use airside_core::calculations::feeder::{calculate, FeederInput};
//! use airside_core::equipment::CableSection;
//! use airside_core::loads::MotorLoad;
//!
//! let mut input = FeederInput::default();
//! input.motors = vec![MotorLoad::new("Fan", 10.0)];
//! input.installation.ambient_temp_c = 25.0;
//!
//! let result = calculate(&input);
//! assert_eq!(result.sizing.total_current_a, 13.16);
//! assert_eq!(result.sizing.cable.section(), CableSection::S2_5);
//! assert_eq!(result.bom.len(), 8);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use crate::bom::{build_bom, BillOfMaterials};
use crate::calculations::derating::{derate, sum_currents_a, InstallationParameters};
use crate::calculations::wiring::{estimate_wiring, PanelGeometry, WiringEstimate};
use crate::equipment::breakers::{select_breaker, SelectedBreaker};
use crate::equipment::cables::{select_cable, CableSelection};
use crate::equipment::terminals::{main_terminal_count, TerminalSize};
use crate::errors::{CalcError, CalcResult};
use crate::input_file::SCHEMA_VERSION;
use crate::loads::{MotorLoad, ResistiveLoad};
use crate::project::ProjectInfo;
use crate::units::round2;

/// Maximum number of motors a panel may feed
pub const MAX_MOTORS: usize = 10;

/// Complete input set for one sizing run.
///
/// Every section has defaults, so a document only needs the values that
/// differ from the standard form.
///
/// ## TOML Example
///
/// ```toml
/// [project]
/// client = "Acme Foods"
/// order_number = "OS-2291"
///
/// [[motors]]
/// label = "Supply fan"
/// power_cv = 10.0
///
/// [resistive]
/// power_kw = 12.0
///
/// [installation]
/// method = "PerforatedTray"
/// ambient_temp_c = 35.0
/// breaker_curve = "C"
///
/// [panel]
/// height_mm = 1800.0
/// width_mm = 800.0
/// voltage = "V380"
/// routing = "Organized"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeederInput {
    /// Input document schema version
    pub version: String,
    pub project: ProjectInfo,
    /// Motors in panel order; BOM rows follow this order
    pub motors: Vec<MotorLoad>,
    pub resistive: ResistiveLoad,
    pub installation: InstallationParameters,
    pub panel: PanelGeometry,
}

impl Default for FeederInput {
    fn default() -> Self {
        FeederInput {
            version: SCHEMA_VERSION.to_string(),
            project: ProjectInfo::default(),
            motors: vec![MotorLoad::new("Motor 1", 5.0)],
            resistive: ResistiveLoad::default(),
            installation: InstallationParameters::default(),
            panel: PanelGeometry::default(),
        }
    }
}

impl FeederInput {
    /// Validate every field against the bounds of the input form.
    pub fn validate(&self) -> CalcResult<()> {
        if self.motors.len() > MAX_MOTORS {
            return Err(CalcError::invalid_input(
                "motors",
                self.motors.len().to_string(),
                format!("At most {} motors per panel", MAX_MOTORS),
            ));
        }
        for (i, motor) in self.motors.iter().enumerate() {
            check_range(&format!("motors[{}].power_cv", i), motor.power_cv, 0.0, 200.0, "CV")?;
        }
        check_range("resistive.power_kw", self.resistive.power_kw, 0.0, 500.0, "kW")?;

        let inst = &self.installation;
        check_range("installation.ambient_temp_c", inst.ambient_temp_c, 10.0, 60.0, "°C")?;
        check_range("installation.grouping_factor", inst.grouping_factor, 0.5, 1.0, "")?;
        check_range("installation.safety_margin_pct", inst.safety_margin_pct, 0.0, 50.0, "%")?;

        let panel = &self.panel;
        check_range("panel.height_mm", panel.height_mm, 100.0, 5000.0, "mm")?;
        check_range("panel.width_mm", panel.width_mm, 100.0, 5000.0, "mm")?;
        check_range("panel.depth_mm", panel.depth_mm, 100.0, 5000.0, "mm")?;

        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64, unit: &str) -> CalcResult<()> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(CalcError::invalid_input(
        field,
        value.to_string(),
        format!("Must be between {} and {} {}", min, max, unit).trim_end().to_string(),
    ))
}

/// Sizing of one motor or heater branch circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSizing {
    pub label: String,
    /// Estimated load current (A)
    pub current_a: f64,
    /// Current with margin, used for branch protection (A)
    pub design_current_a: f64,
    /// Current after grouping and temperature derating (A)
    pub derated_current_a: f64,
    pub cable: CableSelection,
}

impl BranchSizing {
    fn size(label: String, current_a: f64, installation: &InstallationParameters) -> Self {
        let stages = derate(current_a, installation);
        BranchSizing {
            label,
            current_a,
            design_current_a: stages.design_current_a,
            derated_current_a: stages.derated_current_a,
            cable: select_cable(stages.derated_current_a, installation.method),
        }
    }

    pub fn terminal(&self) -> TerminalSize {
        TerminalSize::for_section(self.cable.section())
    }
}

/// Electrical sizing of the main feeder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Estimated current per motor, in input order (A)
    pub motor_currents_a: Vec<f64>,

    /// Estimated heater current (A), zero without a heater
    pub resistive_current_a: f64,

    /// Sum of all load currents (A)
    pub total_current_a: f64,

    /// Total with safety margin (A); drives breaker selection
    pub design_current_a: f64,

    /// Temperature correction factor applied
    pub temperature_factor: f64,

    /// Design current after grouping and temperature derating (A); drives cable selection
    pub derated_current_a: f64,

    /// Main feed cable
    pub cable: CableSelection,

    /// General breaker
    pub breaker: SelectedBreaker,

    /// Main feed ring terminal
    pub terminal: TerminalSize,

    /// Main feed terminal count (two per conductor)
    pub terminal_count: u32,

    /// Per-motor branch circuits, in input order
    pub motor_branches: Vec<BranchSizing>,

    /// Heater branch circuit, when a heater is fitted
    pub resistive_branch: Option<BranchSizing>,
}

impl SizingResult {
    /// Whether any selected cable (feed or branch) is undersized
    pub fn has_undersized_cable(&self) -> bool {
        self.cable.is_undersized()
            || self.motor_branches.iter().any(|b| b.cable.is_undersized())
            || self.resistive_branch.as_ref().is_some_and(|b| b.cable.is_undersized())
    }
}

/// Headline figures, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingSummary {
    pub total_current_a: f64,
    pub design_current_a: f64,
    pub cable_section: String,
    pub breaker: String,
    /// Set when the main feed demand exceeds the largest tabulated section
    pub cable_undersized: bool,
}

/// Everything one sizing run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederResult {
    pub sizing: SizingResult,
    pub wiring: WiringEstimate,
    pub bom: BillOfMaterials,
}

impl FeederResult {
    pub fn summary(&self) -> SizingSummary {
        SizingSummary {
            total_current_a: round2(self.sizing.total_current_a),
            design_current_a: round2(self.sizing.design_current_a),
            cable_section: self.sizing.cable.section().display_name().to_string(),
            breaker: self.sizing.breaker.display_name(),
            cable_undersized: self.sizing.cable.is_undersized(),
        }
    }
}

/// Size the feeder's electrical components without building the BOM.
pub fn size_feeder(input: &FeederInput) -> SizingResult {
    let installation = &input.installation;

    let motor_currents_a: Vec<f64> = input.motors.iter().map(MotorLoad::estimated_current_a).collect();
    let resistive_current_a = input.resistive.estimated_current_a();
    let total_current_a = sum_currents_a(motor_currents_a.iter().copied().chain([resistive_current_a]));
    debug!(
        motors = motor_currents_a.len(),
        resistive_current_a,
        total_current_a,
        "load currents estimated"
    );

    let stages = derate(total_current_a, installation);
    debug!(
        design_current_a = stages.design_current_a,
        derated_current_a = stages.derated_current_a,
        temperature_factor = stages.temperature_factor,
        "derating applied"
    );

    let cable = select_cable(stages.derated_current_a, installation.method);
    let breaker = select_breaker(stages.design_current_a, installation.breaker_curve);
    let terminal = TerminalSize::for_section(cable.section());
    let terminal_count = main_terminal_count(input.panel.voltage.conductor_count());
    debug!(
        section = cable.section().display_name(),
        breaker = %breaker.display_name(),
        terminal = terminal.code(),
        "main feeder selected"
    );

    let motor_branches: Vec<BranchSizing> = input
        .motors
        .iter()
        .zip(&motor_currents_a)
        .enumerate()
        .map(|(i, (motor, &current))| BranchSizing::size(motor.display_label(i), current, installation))
        .collect();

    let resistive_branch = input
        .resistive
        .is_present()
        .then(|| BranchSizing::size("Heater".to_string(), resistive_current_a, installation));

    SizingResult {
        motor_currents_a,
        resistive_current_a,
        total_current_a,
        design_current_a: stages.design_current_a,
        temperature_factor: stages.temperature_factor,
        derated_current_a: stages.derated_current_a,
        cable,
        breaker,
        terminal,
        terminal_count,
        motor_branches,
        resistive_branch,
    }
}

/// Run the complete pipeline: sizing, wiring estimate and BOM.
pub fn calculate(input: &FeederInput) -> FeederResult {
    let span = info_span!("feeder", client = %input.project.client, order = %input.project.order_number);
    let _guard = span.enter();

    let sizing = size_feeder(input);
    let wiring = estimate_wiring(&input.panel);
    debug!(
        run_per_circuit_m = wiring.run_per_circuit_m,
        total_feed_length_m = wiring.total_feed_length_m,
        "wiring estimated"
    );

    let bom = build_bom(input, &sizing, &wiring);
    if sizing.has_undersized_cable() {
        warn!("one or more cables exceed the tabulated ampacity range");
    }
    debug!(rows = bom.len(), "bill of materials built");

    FeederResult { sizing, wiring, bom }
}

/// Validate the input, then run [`calculate`].
pub fn calculate_checked(input: &FeederInput) -> CalcResult<FeederResult> {
    input.validate()?;
    Ok(calculate(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{BreakerCurve, BreakerRating, CableSection, InstallationMethod};

    fn single_motor_input(power_cv: f64, ambient_temp_c: f64) -> FeederInput {
        let mut input = FeederInput::default();
        input.motors = vec![MotorLoad::new("Fan", power_cv)];
        input.installation = InstallationParameters {
            method: InstallationMethod::EmbeddedConduit,
            ambient_temp_c,
            grouping_factor: 1.0,
            safety_margin_pct: 20.0,
            breaker_curve: BreakerCurve::C,
        };
        input
    }

    #[test]
    fn test_single_motor_scenario() {
        let result = calculate(&single_motor_input(10.0, 25.0));
        let sizing = &result.sizing;

        assert_eq!(sizing.motor_currents_a, vec![13.16]);
        assert_eq!(sizing.total_current_a, 13.16);
        assert!((sizing.design_current_a - 15.792).abs() < 1e-9);
        assert!((sizing.derated_current_a - 15.792).abs() < 1e-9);
        assert_eq!(sizing.cable.section(), CableSection::S2_5);
        assert_eq!(sizing.cable.ampacity_a(), 21.0);
        assert_eq!(sizing.breaker.rating, BreakerRating::A32);
        assert_eq!(sizing.terminal, TerminalSize::M6);
        assert_eq!(sizing.terminal_count, 8);
        assert!(!sizing.has_undersized_cable());
    }

    #[test]
    fn test_hot_ambient_keeps_section() {
        let result = calculate(&single_motor_input(10.0, 35.0));
        assert!((result.sizing.derated_current_a - 16.8).abs() < 1e-9);
        assert_eq!(result.sizing.cable.section(), CableSection::S2_5);
    }

    #[test]
    fn test_open_air_overload_is_undersized() {
        // 120 CV ≈ 157.87 A, × 1.2 ≈ 189.4 A > 168 A
        let mut input = single_motor_input(120.0, 25.0);
        input.installation.method = InstallationMethod::OpenAir;
        let result = calculate(&input);

        assert!(result.sizing.cable.is_undersized());
        assert_eq!(result.sizing.cable.section(), CableSection::S50);
        assert_eq!(result.sizing.breaker.rating, BreakerRating::A125);
        assert!(result.summary().cable_undersized);
    }

    #[test]
    fn test_breaker_uses_design_not_derated_current() {
        // 20 CV = 26.31 A, × 1.2 = 31.572 A; grouping 0.5 doubles the derated current
        let mut input = single_motor_input(20.0, 25.0);
        input.installation.grouping_factor = 0.5;
        let result = calculate(&input);

        assert_eq!(result.sizing.breaker.rating, BreakerRating::A32);
        assert!(result.sizing.derated_current_a > 63.0);
        assert_eq!(result.sizing.cable.section(), CableSection::S16);
    }

    #[test]
    fn test_total_includes_resistive() {
        let mut input = single_motor_input(10.0, 25.0);
        input.resistive = ResistiveLoad::new(10.0);
        let result = calculate(&input);

        assert_eq!(result.sizing.resistive_current_a, 15.19);
        assert_eq!(result.sizing.total_current_a, 28.35);
        assert!(result.sizing.resistive_branch.is_some());
    }

    #[test]
    fn test_no_loads() {
        let mut input = FeederInput::default();
        input.motors.clear();
        let result = calculate(&input);

        assert_eq!(result.sizing.total_current_a, 0.0);
        assert_eq!(result.sizing.cable.section(), CableSection::S2_5);
        assert_eq!(result.bom.len(), 4);
    }

    #[test]
    fn test_branch_sizing_per_motor() {
        let mut input = single_motor_input(10.0, 25.0);
        input.motors.push(MotorLoad::new("Compressor", 40.0));
        let result = calculate(&input);
        let branches = &result.sizing.motor_branches;

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].label, "Fan");
        assert_eq!(branches[0].cable.section(), CableSection::S2_5);
        // 40 CV = 52.62 A, × 1.2 = 63.14 A → 16 mm² (68 A) in B1
        assert_eq!(branches[1].current_a, 52.62);
        assert_eq!(branches[1].cable.section(), CableSection::S16);
    }

    #[test]
    fn test_summary_rounding() {
        let summary = calculate(&single_motor_input(10.0, 25.0)).summary();
        assert_eq!(summary.total_current_a, 13.16);
        assert_eq!(summary.design_current_a, 15.79);
        assert_eq!(summary.cable_section, "2.5 mm²");
        assert_eq!(summary.breaker, "32 A - Curve C");
    }

    #[test]
    fn test_validate_bounds() {
        assert!(FeederInput::default().validate().is_ok());

        let mut input = FeederInput::default();
        input.installation.grouping_factor = 0.4;
        let err = input.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut input = FeederInput::default();
        input.motors = (0..11).map(|i| MotorLoad::new(format!("M{}", i), 1.0)).collect();
        assert!(input.validate().is_err());

        let mut input = FeederInput::default();
        input.installation.ambient_temp_c = f64::NAN;
        assert!(calculate_checked(&input).is_err());
    }

    #[test]
    fn test_partial_document_defaults() {
        let input: FeederInput = serde_json::from_str(r#"{"motors": [{"power_cv": 10.0}]}"#).unwrap();
        assert_eq!(input.version, SCHEMA_VERSION);
        assert_eq!(input.installation, InstallationParameters::default());
        assert_eq!(input.panel, PanelGeometry::default());
    }
}
