//! # Derating Pipeline
//!
//! Aggregates load currents and applies, in order:
//!
//! ```text
//! total    = Σ motor currents + resistive current
//! design   = total × (1 + margin% / 100)
//! derated  = design / grouping_factor / temperature_factor
//! ```
//!
//! The temperature factor is a two-point step (0.94 above 30 °C, else 1.0),
//! not a continuous curve.

use serde::{Deserialize, Serialize};

use crate::equipment::{BreakerCurve, InstallationMethod};

/// Ambient temperature above which the cable is derated (°C)
pub const REFERENCE_AMBIENT_C: f64 = 30.0;

/// Correction factor applied above the reference ambient
pub const HOT_AMBIENT_FACTOR: f64 = 0.94;

/// Installation and protection parameters.
///
/// Defaults match the standard input form: B1, 30 °C, grouping 1.0, 20 % margin,
/// curve B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallationParameters {
    /// Reference installation method
    pub method: InstallationMethod,

    /// Ambient temperature (°C)
    pub ambient_temp_c: f64,

    /// Grouping correction factor, in (0, 1]
    pub grouping_factor: f64,

    /// Safety margin applied to the load current (%)
    pub safety_margin_pct: f64,

    /// Trip curve of the general breaker
    pub breaker_curve: BreakerCurve,
}

impl Default for InstallationParameters {
    fn default() -> Self {
        InstallationParameters {
            method: InstallationMethod::EmbeddedConduit,
            ambient_temp_c: REFERENCE_AMBIENT_C,
            grouping_factor: 1.0,
            safety_margin_pct: 20.0,
            breaker_curve: BreakerCurve::B,
        }
    }
}

/// Currents at each stage of the pipeline (A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeratingResult {
    /// Sum of all load currents
    pub total_current_a: f64,

    /// Total with safety margin; drives breaker selection
    pub design_current_a: f64,

    /// Temperature factor that was applied
    pub temperature_factor: f64,

    /// Design current after grouping and temperature derating; drives cable selection
    pub derated_current_a: f64,
}

/// Temperature correction factor for an ambient temperature.
///
/// # Example
///
/// ```rust
/// use airside_core::calculations::derating::temperature_factor;
///
/// assert_eq!(temperature_factor(30.0), 1.0);
/// assert_eq!(temperature_factor(30.5), 0.94);
/// ```
pub fn temperature_factor(ambient_temp_c: f64) -> f64 {
    if ambient_temp_c > REFERENCE_AMBIENT_C {
        HOT_AMBIENT_FACTOR
    } else {
        1.0
    }
}

/// Sum currents that are already rounded to two decimals.
///
/// Summed in whole centiamperes so the total is exact and independent of
/// order.
pub fn sum_currents_a<I>(currents: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let centiamps: i64 = currents.into_iter().map(|c| (c * 100.0).round() as i64).sum();
    centiamps as f64 / 100.0
}

/// Apply margin, grouping and temperature derating to a total load current.
///
/// `grouping_factor` must be > 0; the input layer bounds it to [0.5, 1.0].
///
/// # Example
///
/// ```rust
/// use airside_core::calculations::derating::{derate, InstallationParameters};
///
/// let params = InstallationParameters { ambient_temp_c: 25.0, ..Default::default() };
/// let result = derate(13.16, &params);
/// assert!((result.design_current_a - 15.792).abs() < 1e-9);
/// assert_eq!(result.temperature_factor, 1.0);
/// ```
pub fn derate(total_current_a: f64, params: &InstallationParameters) -> DeratingResult {
    let design_current_a = total_current_a * (1.0 + params.safety_margin_pct / 100.0);
    let temperature_factor = temperature_factor(params.ambient_temp_c);
    let derated_current_a = design_current_a / params.grouping_factor / temperature_factor;

    DeratingResult {
        total_current_a,
        design_current_a,
        temperature_factor,
        derated_current_a,
    }
}
