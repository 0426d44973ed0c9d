//! # Sizing Calculations
//!
//! Each stage follows the pattern used across the crate:
//!
//! - plain input structs (JSON/TOML-serializable)
//! - plain result structs (JSON-serializable)
//! - pure functions from one to the other
//!
//! ## Available Calculations
//!
//! - [`derating`] - Margin, grouping and temperature derating
//! - [`wiring`] - Internal panel cable length estimate
//! - [`feeder`] - The complete pipeline from loads to bill of materials

pub mod derating;
pub mod feeder;
pub mod wiring;

// Re-export commonly used types
pub use derating::{DeratingResult, InstallationParameters};
pub use feeder::{calculate, calculate_checked, FeederInput, FeederResult, SizingResult, SizingSummary};
pub use wiring::{PanelGeometry, RoutingStyle, SupplyVoltage, WiringEstimate};
