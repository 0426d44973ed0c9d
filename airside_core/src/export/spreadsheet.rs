//! Spreadsheet Export
//!
//! Writes the bill of materials as CSV: a header row in column order, one
//! record per BOM line, an empty record, then the scalar summary as
//! label/value pairs. Opens directly in any spreadsheet application.

use csv::WriterBuilder;

use crate::bom::{BillOfMaterials, COLUMNS};
use crate::calculations::feeder::SizingSummary;
use crate::errors::{CalcError, CalcResult};

const FORMAT: &str = "csv";

fn csv_error(e: impl std::fmt::Display) -> CalcError {
    CalcError::export_failed(FORMAT, e.to_string())
}

/// Render the BOM and summary to CSV bytes.
///
/// # Example
///
/// ```rust
/// use airside_core::calculations::feeder::{calculate, FeederInput};
/// use airside_core::export::spreadsheet::render_bom_csv;
///
/// let result = calculate(&FeederInput::default());
/// let bytes = render_bom_csv(&result.bom, &result.summary()).unwrap();
/// let text = String::from_utf8(bytes).unwrap();
/// assert!(text.starts_with("Item,Specification,Quantity,Unit"));
/// ```
pub fn render_bom_csv(bom: &BillOfMaterials, summary: &SizingSummary) -> CalcResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    wtr.write_record(COLUMNS).map_err(csv_error)?;
    for row in bom.rows() {
        wtr.write_record(&row).map_err(csv_error)?;
    }

    wtr.write_record([""]).map_err(csv_error)?;
    wtr.write_record(["Total current (A)", format!("{:.2}", summary.total_current_a).as_str()])
        .map_err(csv_error)?;
    wtr.write_record(["Design current (A)", format!("{:.2}", summary.design_current_a).as_str()])
        .map_err(csv_error)?;
    wtr.write_record(["Cable section", summary.cable_section.as_str()])
        .map_err(csv_error)?;
    wtr.write_record(["General breaker", summary.breaker.as_str()])
        .map_err(csv_error)?;
    if summary.cable_undersized {
        wtr.write_record(["Warning", "Feed current exceeds the largest tabulated cable section"])
            .map_err(csv_error)?;
    }

    wtr.into_inner().map_err(|e| csv_error(e.error()))
}
