//! # Bill of Materials
//!
//! Turns a sizing result into an ordered list of line items. Generation is
//! deterministic and rows are never reordered:
//!
//! 1. General breaker, main feed cable, busbar, main terminals
//! 2. Per motor, in input order: contactor, thermal relay, branch cable, terminals
//! 3. If a heater is fitted: contactor, breaker (always curve C), branch cable, terminals
//!
//! So a panel with `n` motors has `4 + 4n` rows, plus 4 with a heater.
//!
//! ## Example
//!
//! ```rust
//! use airside_core::calculations::feeder::{calculate, FeederInput};
//! use airside_core::loads::{MotorLoad, ResistiveLoad};
//!
//! let mut input = FeederInput::default();
//! input.motors = vec![MotorLoad::new("Fan", 5.0), MotorLoad::new("Pump", 3.0)];
//! input.resistive = ResistiveLoad::new(6.0);
//!
//! let bom = calculate(&input).bom;
//! assert_eq!(bom.len(), 4 + 4 * 2 + 4);
//! assert_eq!(bom.lines()[0].item, "General breaker");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::feeder::{BranchSizing, FeederInput, SizingResult};
use crate::calculations::wiring::WiringEstimate;
use crate::equipment::breakers::{breaker_rating_for, BreakerCurve, SelectedBreaker};
use crate::equipment::terminals::BRANCH_TERMINAL_COUNT;
use crate::units::round2;

/// Column headers, in table order
pub const COLUMNS: [&str; 4] = ["Item", "Specification", "Quantity", "Unit"];

/// Rows emitted for the main feeder regardless of loads
pub const FEEDER_ROWS: usize = 4;

/// Rows emitted per motor and for the heater
pub const ROWS_PER_BRANCH: usize = 4;

/// Heater breakers are always curve C, independent of the general breaker curve
pub const RESISTIVE_BREAKER_CURVE: BreakerCurve = BreakerCurve::C;

/// Counting unit for a BOM line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BomUnit {
    Piece,
    Meter,
    Set,
}

impl BomUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            BomUnit::Piece => "pc",
            BomUnit::Meter => "m",
            BomUnit::Set => "set",
        }
    }
}

/// One line of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub item: String,
    pub specification: String,
    pub quantity: f64,
    pub unit: BomUnit,
}

impl BomLine {
    pub fn new(item: impl Into<String>, specification: impl Into<String>, quantity: f64, unit: BomUnit) -> Self {
        BomLine {
            item: item.into(),
            specification: specification.into(),
            quantity,
            unit,
        }
    }

    /// Quantity as displayed: counts as integers, lengths with two decimals
    pub fn quantity_display(&self) -> String {
        match self.unit {
            BomUnit::Meter => format!("{:.2}", self.quantity),
            BomUnit::Piece | BomUnit::Set => format!("{:.0}", self.quantity),
        }
    }

    /// Cells in [`COLUMNS`] order
    pub fn cells(&self) -> [String; 4] {
        [
            self.item.clone(),
            self.specification.clone(),
            self.quantity_display(),
            self.unit.symbol().to_string(),
        ]
    }
}

/// Ordered bill of materials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillOfMaterials {
    lines: Vec<BomLine>,
}

impl BillOfMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line; order of pushes is the table order
    pub fn push(&mut self, line: BomLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[BomLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Table rows (without header) in [`COLUMNS`] order
    pub fn rows(&self) -> Vec<[String; 4]> {
        self.lines.iter().map(BomLine::cells).collect()
    }
}

/// Expected row count for a panel
pub fn expected_row_count(motor_count: usize, has_resistive: bool) -> usize {
    FEEDER_ROWS + ROWS_PER_BRANCH * motor_count + if has_resistive { ROWS_PER_BRANCH } else { 0 }
}

/// Build the bill of materials for a sized feeder.
pub fn build_bom(input: &FeederInput, sizing: &SizingResult, wiring: &WiringEstimate) -> BillOfMaterials {
    let mut bom = BillOfMaterials::new();
    let feed_section = sizing.cable.section();
    let branch_length_m = round2(wiring.run_per_circuit_m);

    // Main feeder
    bom.push(BomLine::new("General breaker", sizing.breaker.display_name(), 1.0, BomUnit::Piece));
    bom.push(BomLine::new(
        "Main feed cable",
        feed_section.display_name(),
        round2(wiring.total_feed_length_m),
        BomUnit::Meter,
    ));
    bom.push(BomLine::new(
        "Busbar",
        format!("{}-pole, rated ≥ {} A", wiring.conductor_count, sizing.breaker.rating.amps()),
        1.0,
        BomUnit::Set,
    ));
    bom.push(BomLine::new(
        "Main terminals",
        sizing.terminal.specification(),
        f64::from(sizing.terminal_count),
        BomUnit::Piece,
    ));

    for branch in &sizing.motor_branches {
        push_motor_branch(&mut bom, branch, branch_length_m);
    }

    if input.resistive.is_present() {
        if let Some(branch) = &sizing.resistive_branch {
            push_resistive_branch(&mut bom, branch, branch_length_m);
        }
    }

    bom
}

fn push_motor_branch(bom: &mut BillOfMaterials, branch: &BranchSizing, length_m: f64) {
    let label = &branch.label;
    bom.push(BomLine::new(
        format!("Contactor - {}", label),
        format!("AC-3, ≥ {:.2} A", branch.current_a),
        1.0,
        BomUnit::Piece,
    ));
    bom.push(BomLine::new(
        format!("Thermal relay - {}", label),
        format!("Set to {:.2} A", branch.current_a),
        1.0,
        BomUnit::Piece,
    ));
    bom.push(BomLine::new(
        format!("Motor cable - {}", label),
        branch.cable.section().display_name(),
        length_m,
        BomUnit::Meter,
    ));
    bom.push(BomLine::new(
        format!("Motor terminals - {}", label),
        branch.terminal().specification(),
        f64::from(BRANCH_TERMINAL_COUNT),
        BomUnit::Piece,
    ));
}

fn push_resistive_branch(bom: &mut BillOfMaterials, branch: &BranchSizing, length_m: f64) {
    let breaker = SelectedBreaker::new(breaker_rating_for(branch.design_current_a), RESISTIVE_BREAKER_CURVE);
    bom.push(BomLine::new(
        "Contactor - Heater",
        format!("AC-1, ≥ {:.2} A", branch.current_a),
        1.0,
        BomUnit::Piece,
    ));
    bom.push(BomLine::new("Breaker - Heater", breaker.display_name(), 1.0, BomUnit::Piece));
    bom.push(BomLine::new(
        "Heater cable",
        branch.cable.section().display_name(),
        length_m,
        BomUnit::Meter,
    ));
    bom.push(BomLine::new(
        "Heater terminals",
        branch.terminal().specification(),
        f64::from(BRANCH_TERMINAL_COUNT),
        BomUnit::Piece,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::feeder::calculate;
    use crate::equipment::BreakerCurve;
    use crate::loads::{MotorLoad, ResistiveLoad};

    fn input_with(motors: usize, resistive_kw: f64) -> FeederInput {
        let mut input = FeederInput::default();
        input.motors = (0..motors).map(|i| MotorLoad::new(format!("M{}", i + 1), 5.0)).collect();
        input.resistive = ResistiveLoad::new(resistive_kw);
        input
    }

    #[test]
    fn test_row_count() {
        for motors in 0..=10 {
            for kw in [0.0, 9.0] {
                let bom = calculate(&input_with(motors, kw)).bom;
                assert_eq!(bom.len(), expected_row_count(motors, kw > 0.0));
            }
        }
    }

    #[test]
    fn test_row_order() {
        let bom = calculate(&input_with(2, 9.0)).bom;
        let items: Vec<&str> = bom.lines().iter().map(|l| l.item.as_str()).collect();
        assert_eq!(
            items,
            vec![
                "General breaker",
                "Main feed cable",
                "Busbar",
                "Main terminals",
                "Contactor - M1",
                "Thermal relay - M1",
                "Motor cable - M1",
                "Motor terminals - M1",
                "Contactor - M2",
                "Thermal relay - M2",
                "Motor cable - M2",
                "Motor terminals - M2",
                "Contactor - Heater",
                "Breaker - Heater",
                "Heater cable",
                "Heater terminals",
            ]
        );
    }

    #[test]
    fn test_feed_cable_uses_total_length() {
        // Default panel: 2.8 m per circuit × 4 conductors
        let result = calculate(&input_with(1, 0.0));
        let feed = &result.bom.lines()[1];
        assert_eq!(feed.quantity, 11.2);
        assert_eq!(feed.unit, BomUnit::Meter);
        assert_eq!(feed.quantity_display(), "11.20");

        let branch = &result.bom.lines()[6];
        assert_eq!(branch.quantity, 2.8);
    }

    #[test]
    fn test_heater_breaker_always_curve_c() {
        let mut input = input_with(1, 9.0);
        input.installation.breaker_curve = BreakerCurve::D;
        let bom = calculate(&input).bom;

        assert_eq!(bom.lines()[0].specification, "32 A - Curve D");
        let heater_breaker = bom.lines().iter().find(|l| l.item == "Breaker - Heater").unwrap();
        assert!(heater_breaker.specification.ends_with("Curve C"));
    }

    #[test]
    fn test_branch_terminal_quantity() {
        let bom = calculate(&input_with(1, 9.0)).bom;
        for line in bom.lines().iter().filter(|l| l.item.contains("terminals") && l.item != "Main terminals") {
            assert_eq!(line.quantity, 6.0);
        }
        assert_eq!(bom.lines()[3].quantity, 8.0);
    }

    #[test]
    fn test_cells_follow_column_order() {
        let bom = calculate(&input_with(0, 0.0)).bom;
        let rows = bom.rows();
        assert_eq!(rows[0], ["General breaker".to_string(), "32 A - Curve B".to_string(), "1".to_string(), "pc".to_string()]);
        assert_eq!(COLUMNS, ["Item", "Specification", "Quantity", "Unit"]);
    }

    #[test]
    fn test_serializes_as_array() {
        let bom = calculate(&input_with(0, 0.0)).bom;
        let json = serde_json::to_value(&bom).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 4);
    }
}
