//! # Unit Types
//!
//! Type-safe wrappers for the electrical and dimensional units used in
//! feeder sizing. They are plain `f64` newtypes that serialize as bare
//! numbers.
//!
//! ## Units
//!
//! - Power: metric horsepower (CV, 1 CV = 736 W for nameplate purposes),
//!   kilowatts, watts
//! - Current: amperes
//! - Length: millimeters (panel dimensions), meters (cable runs)
//!
//! ## Example
//!
//! ```rust
//! use airside_core::units::{Cv, Meters, Millimeters, Watts};
//!
//! let motor = Cv(10.0);
//! let watts: Watts = motor.into();
//! assert_eq!(watts.0, 7360.0);
//!
//! let height: Meters = Millimeters(1800.0).into();
//! assert_eq!(height.0, 1.8);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Watts per CV used for motor nameplate conversion
pub const WATTS_PER_CV: f64 = 736.0;

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

/// Motor power in CV (cavalo-vapor)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cv(pub f64);

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

impl From<Cv> for Watts {
    fn from(cv: Cv) -> Self {
        Watts(cv.0 * WATTS_PER_CV)
    }
}

// ============================================================================
// Current Units
// ============================================================================

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amperes(pub f64);

impl Amperes {
    /// Round to two decimals, the precision shown on nameplates and reports
    pub fn rounded(self) -> Amperes {
        Amperes(round2(self.0))
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl Add for Meters {
    type Output = Meters;
    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;
    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_conversions() {
        let w: Watts = Kilowatts(2.5).into();
        assert_eq!(w.0, 2500.0);

        let w: Watts = Cv(1.0).into();
        assert_eq!(w.0, 736.0);
    }

    #[test]
    fn test_length_conversion() {
        let m: Meters = Millimeters(800.0).into();
        assert!((m.0 - 0.8).abs() < 1e-12);
        let sum = Meters(1.8) + Meters(0.8);
        assert!((sum.0 - 2.6).abs() < 1e-12);
    }

    #[test]
    fn test_current_rounding() {
        assert_eq!(Amperes(13.1579).rounded(), Amperes(13.16));
        assert_eq!(Amperes(0.0).rounded(), Amperes(0.0));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(13.1449), 13.14);
        assert_eq!(round2(15.768), 15.77);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_transparent_serialization() {
        let json = serde_json::to_string(&Amperes(13.14)).unwrap();
        assert_eq!(json, "13.14");
    }
}
