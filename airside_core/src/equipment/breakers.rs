//! Breaker Ratings and Trip Curves
//!
//! The general breaker is picked from a fixed ladder using the design
//! current (load current plus safety margin, before grouping and
//! temperature derating). The ladder saturates at 125 A: no larger frame
//! is stocked, so any demand above 100 A maps to 125 A.

use serde::{Deserialize, Serialize};

/// Standard breaker rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BreakerRating {
    A32,
    A63,
    A100,
    A125,
}

impl BreakerRating {
    /// Ladder in ascending order
    pub const LADDER: [BreakerRating; 4] = [
        BreakerRating::A32,
        BreakerRating::A63,
        BreakerRating::A100,
        BreakerRating::A125,
    ];

    /// Rated current in amperes
    pub fn amps(&self) -> u32 {
        match self {
            BreakerRating::A32 => 32,
            BreakerRating::A63 => 63,
            BreakerRating::A100 => 100,
            BreakerRating::A125 => 125,
        }
    }
}

/// Instantaneous trip characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BreakerCurve {
    /// 3-5 × In, resistive loads
    #[default]
    B,
    /// 5-10 × In, general and light motor loads
    C,
    /// 10-20 × In, high inrush loads
    D,
}

impl BreakerCurve {
    pub const ALL: [BreakerCurve; 3] = [BreakerCurve::B, BreakerCurve::C, BreakerCurve::D];

    pub fn code(&self) -> &'static str {
        match self {
            BreakerCurve::B => "B",
            BreakerCurve::C => "C",
            BreakerCurve::D => "D",
        }
    }
}

/// A breaker rating paired with its trip curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedBreaker {
    pub rating: BreakerRating,
    pub curve: BreakerCurve,
}

impl SelectedBreaker {
    pub fn new(rating: BreakerRating, curve: BreakerCurve) -> Self {
        SelectedBreaker { rating, curve }
    }

    /// Display form used in summaries and the BOM (e.g., "32 A - Curve C")
    pub fn display_name(&self) -> String {
        format!("{} A - Curve {}", self.rating.amps(), self.curve.code())
    }
}

/// Map a design current onto the breaker ladder.
///
/// Upper bounds are inclusive: ≤32 → 32 A, ≤63 → 63 A, ≤100 → 100 A,
/// anything larger → 125 A.
///
/// # Example
///
/// ```rust
/// use airside_core::equipment::breakers::{breaker_rating_for, BreakerRating};
///
/// assert_eq!(breaker_rating_for(32.0), BreakerRating::A32);
/// assert_eq!(breaker_rating_for(32.01), BreakerRating::A63);
/// assert_eq!(breaker_rating_for(400.0), BreakerRating::A125);
/// ```
pub fn breaker_rating_for(design_current_a: f64) -> BreakerRating {
    if design_current_a <= 32.0 {
        BreakerRating::A32
    } else if design_current_a <= 63.0 {
        BreakerRating::A63
    } else if design_current_a <= 100.0 {
        BreakerRating::A100
    } else {
        BreakerRating::A125
    }
}

/// Select the general breaker for a design current and the chosen curve.
pub fn select_breaker(design_current_a: f64, curve: BreakerCurve) -> SelectedBreaker {
    SelectedBreaker::new(breaker_rating_for(design_current_a), curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_boundaries() {
        assert_eq!(breaker_rating_for(0.0), BreakerRating::A32);
        assert_eq!(breaker_rating_for(32.0), BreakerRating::A32);
        assert_eq!(breaker_rating_for(32.01), BreakerRating::A63);
        assert_eq!(breaker_rating_for(63.0), BreakerRating::A63);
        assert_eq!(breaker_rating_for(63.01), BreakerRating::A100);
        assert_eq!(breaker_rating_for(100.0), BreakerRating::A100);
        assert_eq!(breaker_rating_for(100.01), BreakerRating::A125);
    }

    #[test]
    fn test_ladder_saturates() {
        assert_eq!(breaker_rating_for(1000.0), BreakerRating::A125);
    }

    #[test]
    fn test_display_name() {
        let breaker = select_breaker(15.79, BreakerCurve::C);
        assert_eq!(breaker.display_name(), "32 A - Curve C");
        let breaker = select_breaker(70.0, BreakerCurve::D);
        assert_eq!(breaker.display_name(), "100 A - Curve D");
    }

    #[test]
    fn test_ladder_is_ascending() {
        for pair in BreakerRating::LADDER.windows(2) {
            assert!(pair[0].amps() < pair[1].amps());
        }
    }
}
