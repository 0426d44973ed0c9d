//! # PDF Report
//!
//! Generates the technical report for a sizing run using Typst.
//!
//! ## Architecture
//!
//! - The report is assembled as Typst markup with `format!`
//! - User text is escaped before injection
//! - Compilation runs in a minimal in-memory [`World`] with bundled fonts
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use airside_core::calculations::feeder::{calculate, FeederInput};
//! use airside_core::export::pdf::render_report_pdf;
//!
//! let input = FeederInput::default();
//! let result = calculate(&input);
//! let pdf_bytes = render_report_pdf(&input, &result).unwrap();
//! std::fs::write("report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::bom::COLUMNS;
use crate::calculations::feeder::{FeederInput, FeederResult};
use crate::equations::track_feeder;
use crate::errors::{CalcError, CalcResult};

const FORMAT: &str = "pdf";

/// Fonts bundled with typst-assets, parsed once per process
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
        .collect()
});

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling a single in-memory document.
struct ReportWorld {
    main: Source,
    book: LazyHash<FontBook>,
    library: LazyHash<Library>,
}

impl ReportWorld {
    fn new(source: String) -> Self {
        ReportWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Report Source
// ============================================================================

/// Build the Typst markup for a sizing report.
pub fn report_source(input: &FeederInput, result: &FeederResult) -> String {
    let project = &input.project;
    let inst = &input.installation;
    let panel = &input.panel;
    let sizing = &result.sizing;
    let summary = result.summary();
    let date = Utc::now().format("%Y-%m-%d").to_string();

    let mut source = format!(
        r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[AirSide HVAC Feeder Sizing]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Order: {order}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{date}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[AirSide - Technical Report]
    #v(4pt)
    #text(size: 14pt)[{title}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Client:], [{client}],
      [Order:], [{order}],
      [Engineer:], [{engineer}],
      [Equipment:], [{equipment}],
      [Date:], [{date}],
    )
  ],
  [
    *Installation*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Method:], [{method}],
      [Ambient:], [{ambient:.0} °C],
      [Grouping:], [{grouping:.2}],
      [Margin:], [{margin:.0} %],
      [Supply:], [{volts} V, {conductors} conductors],
      [Panel:], [{height:.0} × {width:.0} × {depth:.0} mm, {routing}],
    )
  ]
)

#v(12pt)

== Loads

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, right),
  table.header([*Load*], [*Power*], [*Current*]),
{load_rows}
)

#v(12pt)

== Sizing Summary

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  table.header([*Quantity*], [*Value*]),
  [Total current], [{total:.2} A],
  [Design current (with margin)], [{design:.2} A],
  [Temperature factor], [{temp_factor:.2}],
  [Derated current], [{derated:.2} A],
  [Feed cable], [{cable} ({ampacity:.0} A)],
  [General breaker], [{breaker}],
  [Main terminals], [{terminal_count} × {terminal}],
  [Feed length], [{feed_length:.2} m],
)
"##,
        order = escape_typst(&project.order_number),
        date = date,
        title = escape_typst(&project.display_title()),
        client = escape_typst(&project.client),
        engineer = escape_typst(&project.engineer),
        equipment = escape_typst(&project.equipment_model),
        method = escape_typst(&inst.method.to_string()),
        ambient = inst.ambient_temp_c,
        grouping = inst.grouping_factor,
        margin = inst.safety_margin_pct,
        volts = panel.voltage.volts(),
        conductors = panel.voltage.conductor_count(),
        height = panel.height_mm,
        width = panel.width_mm,
        depth = panel.depth_mm,
        routing = panel.routing.display_name(),
        load_rows = load_rows(input, result),
        total = summary.total_current_a,
        design = summary.design_current_a,
        temp_factor = sizing.temperature_factor,
        derated = sizing.derated_current_a,
        cable = summary.cable_section,
        ampacity = sizing.cable.ampacity_a(),
        breaker = summary.breaker,
        terminal_count = sizing.terminal_count,
        terminal = sizing.terminal.specification(),
        feed_length = result.wiring.total_feed_length_m,
    );

    if sizing.has_undersized_cable() {
        source.push_str(
            r##"
#v(12pt)
#align(center)[
  #block(width: auto, fill: rgb("#f8d7da"), inset: 16pt, radius: 4pt)[
    #text(size: 14pt, weight: "bold")[CABLE UNDERSIZED]
    #v(4pt)
    #text(size: 11pt)[The demand exceeds the largest tabulated section. Review the feeder design.]
  ]
]
"##,
        );
    }

    source.push_str(&format!(
        r##"
#pagebreak()

== Bill of Materials

#table(
  columns: (1fr, 1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  fill: (_, y) => if y == 0 {{ rgb("#d0d0d0") }},
  align: (left, left, right, left),
  table.header({header}),
{bom_rows}
)
"##,
        header = COLUMNS.iter().map(|c| format!("[*{}*]", c)).collect::<Vec<_>>().join(", "),
        bom_rows = bom_rows(result),
    ));

    source.push_str(&track_feeder(input, sizing).generate_appendix_typst());

    source.push_str(
        r##"
#v(24pt)
#text(size: 9pt, fill: gray)[
  Generated by AirSide \
  Simplified ampacity tables; the design must be checked by a qualified electrician.
]
"##,
    );

    source
}

fn load_rows(input: &FeederInput, result: &FeederResult) -> String {
    let mut rows: Vec<String> = input
        .motors
        .iter()
        .zip(&result.sizing.motor_currents_a)
        .enumerate()
        .map(|(i, (motor, current))| {
            format!(
                "  [{}], [{:.1} CV], [{:.2} A],",
                escape_typst(&motor.display_label(i)),
                motor.power_cv,
                current
            )
        })
        .collect();

    if input.resistive.is_present() {
        rows.push(format!(
            "  [Heater], [{:.1} kW], [{:.2} A],",
            input.resistive.power_kw, result.sizing.resistive_current_a
        ));
    }

    if rows.is_empty() {
        rows.push("  table.cell(colspan: 3)[_No loads_],".to_string());
    }
    rows.join("\n")
}

fn bom_rows(result: &FeederResult) -> String {
    result
        .bom
        .rows()
        .iter()
        .map(|cells| {
            let escaped: Vec<String> = cells.iter().map(|c| format!("[{}]", escape_typst(c))).collect();
            format!("  {},", escaped.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special Typst characters in user-provided text
pub(crate) fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            '~' => "\\~".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a sizing run to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::ExportFailed)` - If Typst compilation or PDF output fails
pub fn render_report_pdf(input: &FeederInput, result: &FeederResult) -> CalcResult<Vec<u8>> {
    let source = report_source(input, result);
    debug!(bytes = source.len(), "compiling report");

    let world = ReportWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::export_failed(FORMAT, format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::export_failed(FORMAT, format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::feeder::calculate;
    use crate::loads::{MotorLoad, ResistiveLoad};
    use crate::project::ProjectInfo;

    fn sample_input() -> FeederInput {
        let mut input = FeederInput::default();
        input.project = ProjectInfo::new("Acme #1", "OS-2291", "J. Silva", "AHU_40");
        input.motors = vec![MotorLoad::new("Supply fan", 10.0), MotorLoad::new("Return fan", 7.5)];
        input.resistive = ResistiveLoad::new(12.0);
        input
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("AHU_40"), "AHU\\_40");
        assert_eq!(escape_typst("#1 [a]"), "\\#1 \\[a\\]");
        assert_eq!(escape_typst("2.5 mm²"), "2.5 mm²");
        assert_eq!(escape_typst("AHU // 2"), "AHU \\/\\/ 2");
    }

    #[test]
    fn test_report_source_contents() {
        let input = sample_input();
        let result = calculate(&input);
        let source = report_source(&input, &result);

        assert!(source.contains("Acme \\#1"));
        assert!(source.contains("AHU\\_40"));
        assert!(source.contains("[Supply fan], [10.0 CV], [13.16 A],"));
        assert!(source.contains("[Heater], [12.0 kW]"));
        assert!(source.contains("[*Item*], [*Specification*], [*Quantity*], [*Unit*]"));
        assert!(source.contains("Appendix: Calculation Memo"));
        assert!(!source.contains("CABLE UNDERSIZED"));
    }

    #[test]
    fn test_undersized_banner() {
        let mut input = sample_input();
        input.motors = vec![MotorLoad::new("Chiller", 150.0)];
        let result = calculate(&input);
        assert!(report_source(&input, &result).contains("CABLE UNDERSIZED"));
    }

    #[test]
    fn test_pdf_generation() {
        let input = sample_input();
        let result = calculate(&input);
        let pdf = render_report_pdf(&input, &result);

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
