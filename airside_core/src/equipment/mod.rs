//! # Equipment Tables
//!
//! Fixed catalogs the sizing pipeline selects from. All tables are static
//! and ordered ascending; selection is a linear first-match scan.
//!
//! ## Modules
//!
//! - [`cables`] - Cable sections, installation methods and ampacity tables
//! - [`breakers`] - Breaker rating ladder and trip curves
//! - [`terminals`] - Ring terminal stud sizes

pub mod breakers;
pub mod cables;
pub mod terminals;

pub use breakers::{select_breaker, BreakerCurve, BreakerRating, SelectedBreaker};
pub use cables::{select_cable, CableSection, CableSelection, InstallationMethod};
pub use terminals::TerminalSize;
