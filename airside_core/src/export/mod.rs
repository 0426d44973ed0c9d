//! # Report Export
//!
//! - [`spreadsheet`] - Bill of materials and summary as CSV
//! - [`pdf`] - Technical report with calculation memo, rendered through Typst
//!
//! Both renderers return bytes; writing them to disk goes through
//! [`crate::input_file::write_artifact`].

pub mod pdf;
pub mod spreadsheet;

pub use pdf::{render_report_pdf, report_source};
pub use spreadsheet::render_bom_csv;
