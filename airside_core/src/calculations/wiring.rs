//! # Internal Wiring Estimate
//!
//! Estimates cable length inside the panel from its front dimensions. The
//! routing factor is a flat allowance for bends and slack, not a path
//! computation.
//!
//! ```text
//! base_run        = (height + width) / 1000        [m]
//! run_per_circuit = base_run × routing_factor      (1.4 simple, 1.8 organized)
//! total_feed      = run_per_circuit × conductors   (3 at 220 V, 4 at 380 V)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use airside_core::calculations::wiring::{estimate_wiring, PanelGeometry, RoutingStyle, SupplyVoltage};
//!
//! let panel = PanelGeometry {
//!     height_mm: 1000.0,
//!     width_mm: 500.0,
//!     depth_mm: 300.0,
//!     voltage: SupplyVoltage::V380,
//!     routing: RoutingStyle::Simple,
//! };
//! let wiring = estimate_wiring(&panel);
//! assert!((wiring.run_per_circuit_m - 2.1).abs() < 1e-9);
//! assert!((wiring.total_feed_length_m - 8.4).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Meters, Millimeters};

/// Panel supply voltage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SupplyVoltage {
    /// 220 V three-phase, three conductors
    #[serde(alias = "220")]
    V220,
    /// 380 V three-phase with neutral, four conductors
    #[default]
    #[serde(alias = "380")]
    V380,
}

impl SupplyVoltage {
    pub fn volts(&self) -> u32 {
        match self {
            SupplyVoltage::V220 => 220,
            SupplyVoltage::V380 => 380,
        }
    }

    /// Number of feed conductors
    pub fn conductor_count(&self) -> u32 {
        match self {
            SupplyVoltage::V220 => 3,
            SupplyVoltage::V380 => 4,
        }
    }
}

/// Cable routing style inside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoutingStyle {
    /// Direct runs
    #[default]
    Simple,
    /// Ducted, bundled and labelled runs
    Organized,
}

impl RoutingStyle {
    /// Length allowance multiplier
    pub fn factor(&self) -> f64 {
        match self {
            RoutingStyle::Simple => 1.4,
            RoutingStyle::Organized => 1.8,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoutingStyle::Simple => "Simple",
            RoutingStyle::Organized => "Organized",
        }
    }
}

/// Panel enclosure dimensions and supply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelGeometry {
    pub height_mm: f64,
    pub width_mm: f64,
    /// Recorded for the report; does not affect the estimate
    pub depth_mm: f64,
    pub voltage: SupplyVoltage,
    pub routing: RoutingStyle,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        PanelGeometry {
            height_mm: 1200.0,
            width_mm: 800.0,
            depth_mm: 300.0,
            voltage: SupplyVoltage::V380,
            routing: RoutingStyle::Simple,
        }
    }
}

/// Estimated internal cable lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WiringEstimate {
    /// (height + width) in meters
    pub base_run_m: f64,
    pub routing_factor: f64,
    /// Length of one branch circuit (each motor or heater cable)
    pub run_per_circuit_m: f64,
    pub conductor_count: u32,
    /// Main feed length across all conductors
    pub total_feed_length_m: f64,
}

/// Estimate internal wiring lengths for a panel.
pub fn estimate_wiring(panel: &PanelGeometry) -> WiringEstimate {
    let base_run: Meters = Meters::from(Millimeters(panel.height_mm)) + Meters::from(Millimeters(panel.width_mm));
    let routing_factor = panel.routing.factor();
    let run_per_circuit = base_run * routing_factor;
    let conductor_count = panel.voltage.conductor_count();
    let total_feed = run_per_circuit * f64::from(conductor_count);

    WiringEstimate {
        base_run_m: base_run.0,
        routing_factor,
        run_per_circuit_m: run_per_circuit.0,
        conductor_count,
        total_feed_length_m: total_feed.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductor_counts() {
        assert_eq!(SupplyVoltage::V220.conductor_count(), 3);
        assert_eq!(SupplyVoltage::V380.conductor_count(), 4);
    }

    #[test]
    fn test_default_panel_estimate() {
        // (1200 + 800) / 1000 = 2.0 m, × 1.4 = 2.8 m, × 4 = 11.2 m
        let wiring = estimate_wiring(&PanelGeometry::default());
        assert!((wiring.base_run_m - 2.0).abs() < 1e-9);
        assert!((wiring.run_per_circuit_m - 2.8).abs() < 1e-9);
        assert_eq!(wiring.conductor_count, 4);
        assert!((wiring.total_feed_length_m - 11.2).abs() < 1e-9);
    }

    #[test]
    fn test_organized_220v() {
        let panel = PanelGeometry {
            voltage: SupplyVoltage::V220,
            routing: RoutingStyle::Organized,
            ..Default::default()
        };
        let wiring = estimate_wiring(&panel);
        assert!((wiring.run_per_circuit_m - 3.6).abs() < 1e-9);
        assert!((wiring.total_feed_length_m - 10.8).abs() < 1e-9);
    }

    #[test]
    fn test_depth_ignored() {
        let shallow = PanelGeometry { depth_mm: 200.0, ..Default::default() };
        let deep = PanelGeometry { depth_mm: 600.0, ..Default::default() };
        assert_eq!(estimate_wiring(&shallow), estimate_wiring(&deep));
    }

    #[test]
    fn test_voltage_from_number_alias() {
        let voltage: SupplyVoltage = serde_json::from_str("\"220\"").unwrap();
        assert_eq!(voltage, SupplyVoltage::V220);
    }
}
