//! # Equation Registry
//!
//! Every formula the sizing pipeline applies, with the metadata needed to
//! print a calculation memo in the PDF report.
//!
//! ## Usage
//!
//! ```rust
//! use airside_core::equations::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for(Equation::MotorCurrent, "Supply fan");
//! tracker.record(Equation::DesignCurrent);
//!
//! let typst = tracker.generate_appendix_typst();
//! assert!(typst.contains("Motor Line Current"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calculations::feeder::{FeederInput, SizingResult};
use crate::export::pdf::escape_typst;

// ============================================================================
// References
// ============================================================================

/// Source of an equation or table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    /// ABNT NBR 5410 (simplified tables)
    Nbr5410 { table: &'static str },
    /// Three-phase power relation P = √3·V·I·cosφ
    ThreePhasePower,
    /// Workshop practice (allowances, ladders)
    ShopPractice,
}

impl Reference {
    pub fn citation(&self) -> String {
        match self {
            Reference::Nbr5410 { table } => format!("NBR 5410 (simplified), {}", table),
            Reference::ThreePhasePower => "Three-phase power, P = √3·V·I·cos φ".to_string(),
            Reference::ShopPractice => "Panel shop practice".to_string(),
        }
    }
}

/// Grouping for the appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    LoadCurrents,
    Derating,
    Selection,
    Wiring,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::LoadCurrents => "Load Currents",
            EquationCategory::Derating => "Derating",
            EquationCategory::Selection => "Component Selection",
            EquationCategory::Wiring => "Internal Wiring",
        }
    }

    /// Sort order for the appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::LoadCurrents => 1,
            EquationCategory::Derating => 2,
            EquationCategory::Selection => 3,
            EquationCategory::Wiring => 4,
        }
    }
}

/// A symbol used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Typst math markup
    pub formula_typst: &'static str,
    /// Plain text form for logs and terminals
    pub formula_plain: &'static str,
    pub reference: Reference,
    pub variables: Vec<Variable>,
    pub category: EquationCategory,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used in feeder sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    MotorCurrent,
    ResistiveCurrent,
    TotalCurrent,
    DesignCurrent,
    TemperatureFactor,
    DeratedCurrent,
    CableSelection,
    BreakerSelection,
    WiringRunPerCircuit,
    WiringTotalFeed,
}

impl Equation {
    pub const ALL: [Equation; 10] = [
        Equation::MotorCurrent,
        Equation::ResistiveCurrent,
        Equation::TotalCurrent,
        Equation::DesignCurrent,
        Equation::TemperatureFactor,
        Equation::DeratedCurrent,
        Equation::CableSelection,
        Equation::BreakerSelection,
        Equation::WiringRunPerCircuit,
        Equation::WiringTotalFeed,
    ];

    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::MotorCurrent => EquationMetadata {
                name: "Motor Line Current",
                description: "Estimated three-phase line current from nameplate power",
                formula_typst: r#"$I_m = (P_"cv" dot 736) / (sqrt(3) dot 380 dot 0.85)$"#,
                formula_plain: "Im = (P_cv * 736) / (sqrt(3) * 380 * 0.85)",
                reference: Reference::ThreePhasePower,
                variables: vec![
                    Variable::new("P_\"cv\"", "Motor nameplate power", "CV"),
                    Variable::new("I_m", "Motor line current, rounded to 0.01", "A"),
                ],
                category: EquationCategory::LoadCurrents,
            },
            Equation::ResistiveCurrent => EquationMetadata {
                name: "Heater Line Current",
                description: "Line current of a balanced three-phase resistive load",
                formula_typst: r#"$I_r = (P_"kw" dot 1000) / (sqrt(3) dot 380)$"#,
                formula_plain: "Ir = (P_kw * 1000) / (sqrt(3) * 380)",
                reference: Reference::ThreePhasePower,
                variables: vec![
                    Variable::new("P_\"kw\"", "Heater power", "kW"),
                    Variable::new("I_r", "Heater line current, rounded to 0.01", "A"),
                ],
                category: EquationCategory::LoadCurrents,
            },
            Equation::TotalCurrent => EquationMetadata {
                name: "Total Load Current",
                description: "Sum of all motor and heater currents",
                formula_typst: r#"$I_t = sum I_m + I_r$"#,
                formula_plain: "It = sum(Im) + Ir",
                reference: Reference::ShopPractice,
                variables: vec![Variable::new("I_t", "Total load current", "A")],
                category: EquationCategory::LoadCurrents,
            },
            Equation::DesignCurrent => EquationMetadata {
                name: "Design Current",
                description: "Total current with safety margin; sizes the general breaker",
                formula_typst: r#"$I_p = I_t dot (1 + m / 100)$"#,
                formula_plain: "Ip = It * (1 + m/100)",
                reference: Reference::ShopPractice,
                variables: vec![
                    Variable::new("m", "Safety margin", "%"),
                    Variable::new("I_p", "Design current", "A"),
                ],
                category: EquationCategory::Derating,
            },
            Equation::TemperatureFactor => EquationMetadata {
                name: "Temperature Correction Factor",
                description: "Two-point step: 0.94 above 30 °C ambient, else 1.0",
                formula_typst: r#"$k_t = cases(0.94 "if" theta > 30, 1.0 "otherwise")$"#,
                formula_plain: "kt = 0.94 if theta > 30 else 1.0",
                reference: Reference::Nbr5410 { table: "temperature correction (PVC)" },
                variables: vec![Variable::new("theta", "Ambient temperature", "°C")],
                category: EquationCategory::Derating,
            },
            Equation::DeratedCurrent => EquationMetadata {
                name: "Derated Current",
                description: "Design current corrected for grouping and ambient temperature; sizes the cable",
                formula_typst: r#"$I_c = I_p / (k_g dot k_t)$"#,
                formula_plain: "Ic = Ip / (kg * kt)",
                reference: Reference::Nbr5410 { table: "grouping correction" },
                variables: vec![
                    Variable::new("k_g", "Grouping factor", "-"),
                    Variable::new("k_t", "Temperature factor", "-"),
                    Variable::new("I_c", "Derated current", "A"),
                ],
                category: EquationCategory::Derating,
            },
            Equation::CableSelection => EquationMetadata {
                name: "Cable Section",
                description: "Smallest tabulated section whose ampacity covers the derated current",
                formula_typst: r#"$S = min { S_i : I_z (S_i) >= I_c }$"#,
                formula_plain: "S = min{ Si : Iz(Si) >= Ic }",
                reference: Reference::Nbr5410 { table: "ampacity, methods B1/C/E" },
                variables: vec![
                    Variable::new("I_z", "Tabulated ampacity", "A"),
                    Variable::new("S", "Selected section", "mm²"),
                ],
                category: EquationCategory::Selection,
            },
            Equation::BreakerSelection => EquationMetadata {
                name: "General Breaker Rating",
                description: "Smallest rating of the 32/63/100/125 A ladder covering the design current",
                formula_typst: r#"$I_n = min { I_i in {32, 63, 100, 125} : I_i >= I_p }$"#,
                formula_plain: "In = min{ Ii in {32,63,100,125} : Ii >= Ip }, capped at 125",
                reference: Reference::ShopPractice,
                variables: vec![Variable::new("I_n", "Breaker rating", "A")],
                category: EquationCategory::Selection,
            },
            Equation::WiringRunPerCircuit => EquationMetadata {
                name: "Branch Circuit Length",
                description: "Panel height plus width with a routing allowance",
                formula_typst: r#"$L_c = (H + W) / 1000 dot f_r$"#,
                formula_plain: "Lc = (H + W) / 1000 * fr",
                reference: Reference::ShopPractice,
                variables: vec![
                    Variable::new("H", "Panel height", "mm"),
                    Variable::new("W", "Panel width", "mm"),
                    Variable::new("f_r", "Routing factor (1.4 simple, 1.8 organized)", "-"),
                ],
                category: EquationCategory::Wiring,
            },
            Equation::WiringTotalFeed => EquationMetadata {
                name: "Main Feed Length",
                description: "Branch length times the number of feed conductors",
                formula_typst: r#"$L_f = L_c dot n$"#,
                formula_plain: "Lf = Lc * n",
                reference: Reference::ShopPractice,
                variables: vec![Variable::new("n", "Conductors (3 at 220 V, 4 at 380 V)", "-")],
                category: EquationCategory::Wiring,
            },
        }
    }
}

// ============================================================================
// Usage Tracking
// ============================================================================

/// Record of an equation being applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Load or circuit the equation was applied to, if any
    pub applied_to: Option<String>,
}

/// Collector for equation usage during a sizing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation) {
        self.usages.push(EquationUsage { equation, applied_to: None });
    }

    /// Record equation usage for a specific load or circuit
    pub fn record_for(&mut self, equation: Equation, applied_to: impl Into<String>) {
        self.usages.push(EquationUsage {
            equation,
            applied_to: Some(applied_to.into()),
        });
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Unique equations grouped by category, categories in appendix order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }
        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    fn applied_to(&self, equation: Equation) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .usages
            .iter()
            .filter(|u| u.equation == equation)
            .filter_map(|u| u.applied_to.as_deref())
            .collect();
        labels.dedup();
        labels
    }

    /// Typst markup for the calculation memo appendix.
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::from(
            r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: Calculation Memo]
  ]
]

#v(12pt)
"##,
        );

        let by_category = self.by_category();
        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No equations recorded.]\n");
            return output;
        }

        for (category, equations) in by_category {
            output.push_str(&format!("\n== {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();
                output.push_str(&format!("=== {}\n\n", meta.name));
                output.push_str(&format!("#text(size: 10pt)[{}]\n\n", meta.description));
                output.push_str(&format!("*Formula:* {}\n\n", meta.formula_typst));
                output.push_str(&format!("*Reference:* {}\n\n", meta.reference.citation()));

                if !meta.variables.is_empty() {
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");
                    for var in &meta.variables {
                        output.push_str(&format!("  [${}$], [{}], [{}],\n", var.symbol, var.description, var.units));
                    }
                    output.push_str(")\n\n");
                }

                let labels: Vec<String> = self.applied_to(equation).into_iter().map(escape_typst).collect();
                if !labels.is_empty() {
                    output.push_str(&format!("*Applied to:* {}\n\n", labels.join(", ")));
                }

                output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n\n");
            }
        }

        output
    }
}

/// Record the equations a sizing run applied.
pub fn track_feeder(input: &FeederInput, sizing: &SizingResult) -> EquationTracker {
    let mut tracker = EquationTracker::new();

    for branch in &sizing.motor_branches {
        tracker.record_for(Equation::MotorCurrent, branch.label.clone());
    }
    if let Some(branch) = &sizing.resistive_branch {
        tracker.record_for(Equation::ResistiveCurrent, branch.label.clone());
    }

    tracker.record(Equation::TotalCurrent);
    tracker.record(Equation::DesignCurrent);
    tracker.record(Equation::TemperatureFactor);
    tracker.record_for(Equation::DeratedCurrent, "Main feed");
    tracker.record_for(Equation::CableSelection, "Main feed");
    for branch in sizing.motor_branches.iter().chain(&sizing.resistive_branch) {
        tracker.record_for(Equation::DeratedCurrent, branch.label.clone());
        tracker.record_for(Equation::CableSelection, branch.label.clone());
    }
    tracker.record_for(Equation::BreakerSelection, "General breaker");
    if input.resistive.is_present() {
        tracker.record_for(Equation::BreakerSelection, "Heater");
    }

    tracker.record(Equation::WiringRunPerCircuit);
    tracker.record(Equation::WiringTotalFeed);
    tracker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::feeder::size_feeder;
    use crate::loads::{MotorLoad, ResistiveLoad};

    #[test]
    fn test_every_equation_has_metadata() {
        for eq in Equation::ALL {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty());
            assert!(meta.formula_typst.starts_with('$'));
        }
    }

    #[test]
    fn test_unique_equations_deduplicated() {
        let mut tracker = EquationTracker::new();
        tracker.record_for(Equation::MotorCurrent, "M1");
        tracker.record_for(Equation::MotorCurrent, "M2");
        tracker.record(Equation::TotalCurrent);
        assert_eq!(tracker.unique_equations(), vec![Equation::MotorCurrent, Equation::TotalCurrent]);
        assert_eq!(tracker.usages().len(), 3);
    }

    #[test]
    fn test_categories_sorted() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::WiringTotalFeed);
        tracker.record(Equation::MotorCurrent);
        let cats: Vec<EquationCategory> = tracker.by_category().into_iter().map(|(c, _)| c).collect();
        assert_eq!(cats, vec![EquationCategory::LoadCurrents, EquationCategory::Wiring]);
    }

    #[test]
    fn test_track_feeder_without_heater() {
        let mut input = FeederInput::default();
        input.motors = vec![MotorLoad::new("Fan", 5.0)];
        let sizing = size_feeder(&input);
        let tracker = track_feeder(&input, &sizing);

        let unique = tracker.unique_equations();
        assert!(unique.contains(&Equation::MotorCurrent));
        assert!(!unique.contains(&Equation::ResistiveCurrent));
        assert!(tracker.generate_appendix_typst().contains("*Applied to:* Fan"));
    }

    #[test]
    fn test_track_feeder_with_heater() {
        let mut input = FeederInput::default();
        input.resistive = ResistiveLoad::new(4.0);
        let sizing = size_feeder(&input);
        let tracker = track_feeder(&input, &sizing);
        assert!(tracker.unique_equations().contains(&Equation::ResistiveCurrent));
    }

    #[test]
    fn test_empty_appendix() {
        let typst = EquationTracker::new().generate_appendix_typst();
        assert!(typst.contains("No equations recorded"));
    }
}
