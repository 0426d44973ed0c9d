//! # Load Estimation
//!
//! Converts nameplate power into estimated steady-state three-phase line
//! currents.
//!
//! ## Formulas
//!
//! ```text
//! Motor:     I = (P_cv * 736) / (√3 * 380 * 0.85)
//! Resistive: I = (P_kw * 1000) / (√3 * 380)
//! ```
//!
//! The 0.85 term combines power factor and efficiency for a typical HVAC
//! motor; resistive heaters are taken at unity power factor. Currents are
//! always estimated at 380 V line voltage and rounded to two decimals.
//!
//! ## Example
//!
//! ```rust
//! use airside_core::loads::{MotorLoad, ResistiveLoad};
//!
//! let fan = MotorLoad::new("Supply fan", 10.0);
//! assert_eq!(fan.estimated_current_a(), 13.16);
//!
//! let heater = ResistiveLoad::new(0.0);
//! assert_eq!(heater.estimated_current_a(), 0.0);
//! assert!(!heater.is_present());
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Amperes, Cv, Kilowatts, Watts};

/// Line voltage used for current estimation (V)
pub const ESTIMATION_VOLTAGE_V: f64 = 380.0;

/// Combined power factor and efficiency assumed for motors
pub const MOTOR_PF_EFFICIENCY: f64 = 0.85;

/// Estimated three-phase line current for a motor, in amperes.
///
/// Rounded to two decimals. Zero power yields zero current.
pub fn motor_current_a(power_cv: f64) -> f64 {
    let watts: Watts = Cv(power_cv).into();
    Amperes(watts.0 / (3f64.sqrt() * ESTIMATION_VOLTAGE_V * MOTOR_PF_EFFICIENCY)).rounded().0
}

/// Estimated three-phase line current for a resistive load, in amperes.
///
/// Rounded to two decimals. Zero (or negative) power yields zero current.
pub fn resistive_current_a(power_kw: f64) -> f64 {
    if power_kw <= 0.0 {
        return 0.0;
    }
    let watts: Watts = Kilowatts(power_kw).into();
    Amperes(watts.0 / (3f64.sqrt() * ESTIMATION_VOLTAGE_V)).rounded().0
}

/// A three-phase motor entry (fan, compressor, pump).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorLoad {
    /// User label (e.g., "Motor 1", "Supply fan")
    #[serde(default)]
    pub label: String,

    /// Nameplate power in CV
    pub power_cv: f64,
}

impl MotorLoad {
    pub fn new(label: impl Into<String>, power_cv: f64) -> Self {
        MotorLoad {
            label: label.into(),
            power_cv,
        }
    }

    /// Estimated line current (A)
    pub fn estimated_current_a(&self) -> f64 {
        motor_current_a(self.power_cv)
    }

    /// Label used in reports, falling back to "Motor {n}" (1-based)
    pub fn display_label(&self, index: usize) -> String {
        if self.label.trim().is_empty() {
            format!("Motor {}", index + 1)
        } else {
            self.label.clone()
        }
    }
}

/// The three-phase resistive heater bank.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResistiveLoad {
    /// Total heater power in kW
    #[serde(default)]
    pub power_kw: f64,
}

impl ResistiveLoad {
    pub fn new(power_kw: f64) -> Self {
        ResistiveLoad { power_kw }
    }

    /// Estimated line current (A), zero when no heater is fitted
    pub fn estimated_current_a(&self) -> f64 {
        resistive_current_a(self.power_kw)
    }

    /// Whether the panel feeds a heater bank at all
    pub fn is_present(&self) -> bool {
        self.power_kw > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_current_formula() {
        // 10 CV: 7360 / (1.7320508 * 380 * 0.85) = 13.1557 A
        assert_eq!(motor_current_a(10.0), 13.16);
        assert_eq!(motor_current_a(5.0), 6.58);
        assert_eq!(motor_current_a(20.0), 26.31);
    }

    #[test]
    fn test_zero_power_is_zero_current() {
        assert_eq!(motor_current_a(0.0), 0.0);
        assert_eq!(resistive_current_a(0.0), 0.0);
    }

    #[test]
    fn test_motor_current_monotonic() {
        let mut previous = 0.0;
        let mut p = 0.0;
        while p <= 200.0 {
            let current = motor_current_a(p);
            assert!(current >= previous, "current decreased at {} CV", p);
            previous = current;
            p += 0.5;
        }
    }

    #[test]
    fn test_resistive_current_formula() {
        // 10 kW: 10000 / (1.7320508 * 380) = 15.193 A
        assert_eq!(resistive_current_a(10.0), 15.19);
        assert!(ResistiveLoad::new(10.0).is_present());
    }

    #[test]
    fn test_motor_display_label() {
        assert_eq!(MotorLoad::new("", 5.0).display_label(2), "Motor 3");
        assert_eq!(MotorLoad::new("Compressor", 5.0).display_label(0), "Compressor");
    }

    #[test]
    fn test_motor_deserialize_without_label() {
        let motor: MotorLoad = serde_json::from_str(r#"{"power_cv": 7.5}"#).unwrap();
        assert_eq!(motor.power_cv, 7.5);
        assert_eq!(motor.estimated_current_a(), 9.87);
    }
}
