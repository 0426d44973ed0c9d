//! # airside_core - HVAC Panel Feeder Sizing Engine
//!
//! `airside_core` sizes the low-voltage feeder of an HVAC equipment panel:
//! motor and heater currents, derating, cable section, general breaker,
//! ring terminals and internal wiring length. The result is summarized and
//! expanded into an ordered bill of materials that can be exported as a
//! spreadsheet or a PDF report.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Single pass**: One deterministic pipeline, no iteration
//! - **JSON/TOML-First**: All inputs and results implement Serialize/Deserialize
//! - **Explicit outcomes**: An undersized cable is a result variant, not a silent fallback
//!
//! ## Quick Start
//!
//! ```rust
//! use airside_core::calculations::feeder::{calculate, FeederInput};
//! use airside_core::loads::MotorLoad;
//!
//! let mut input = FeederInput::default();
//! input.motors = vec![MotorLoad::new("Fan", 10.0)];
//!
//! let result = calculate(&input);
//! assert_eq!(result.sizing.cable.section().display_name(), "2.5 mm²");
//! assert_eq!(result.sizing.breaker.display_name(), "32 A - Curve B");
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Motor and resistive load current estimation
//! - [`calculations`] - Derating, wiring estimate and the feeder pipeline
//! - [`equipment`] - Cable, breaker and terminal tables and selectors
//! - [`bom`] - Bill-of-materials builder
//! - [`export`] - CSV spreadsheet and Typst PDF rendering
//! - [`equations`] - Formula registry for the report appendix
//! - [`input_file`] - Loading input documents and writing artifacts
//! - [`project`] - Project metadata
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod bom;
pub mod calculations;
pub mod equations;
pub mod equipment;
pub mod errors;
pub mod export;
pub mod input_file;
pub mod loads;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use bom::{BillOfMaterials, BomLine};
pub use calculations::feeder::{calculate, calculate_checked, FeederInput, FeederResult, SizingResult};
pub use errors::{CalcError, CalcResult};
pub use project::ProjectInfo;
