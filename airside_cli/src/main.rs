//! # AirSide CLI
//!
//! Command-line front end for the feeder sizing engine.
//!
//! ```text
//! airside template > panel.toml
//! airside size panel.toml
//! airside export panel.toml --csv panel.csv --pdf panel.pdf
//! ```

use std::path::{Path, PathBuf};

use airside_core::calculations::feeder::{calculate_checked, FeederInput, FeederResult};
use airside_core::export::{render_bom_csv, render_report_pdf};
use airside_core::input_file::{default_input_toml, load_input, write_artifact};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// HVAC panel feeder sizing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Size a feeder and print the summary and bill of materials
    Size {
        /// Input document (.toml or .json)
        input: PathBuf,
        /// Print the full result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Size a feeder and write the spreadsheet and/or PDF report
    Export {
        /// Input document (.toml or .json)
        input: PathBuf,
        /// Spreadsheet (CSV) output path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// PDF report output path
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Print a default input document
    Template,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Size { input, json } => {
            let (feeder, result) = size(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&feeder, &result);
            }
        }
        Command::Export { input, csv, pdf } => {
            if csv.is_none() && pdf.is_none() {
                bail!("nothing to export: pass --csv and/or --pdf");
            }
            let (feeder, result) = size(&input)?;

            if let Some(path) = csv {
                let bytes = render_bom_csv(&result.bom, &result.summary())?;
                write_artifact(&bytes, &path).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "spreadsheet written");
            }
            if let Some(path) = pdf {
                let bytes = render_report_pdf(&feeder, &result)?;
                write_artifact(&bytes, &path).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "report written");
            }
        }
        Command::Template => {
            print!("{}", default_input_toml()?);
        }
    }

    Ok(())
}

fn size(path: &Path) -> Result<(FeederInput, FeederResult)> {
    let input = load_input(path).with_context(|| format!("loading {}", path.display()))?;
    let result = calculate_checked(&input).context("input out of range")?;
    if result.sizing.has_undersized_cable() {
        warn!("a cable demand exceeds the largest tabulated section; review the design");
    }
    Ok((input, result))
}

fn print_result(input: &FeederInput, result: &FeederResult) {
    let summary = result.summary();
    println!("{}", input.project.display_title());

    let mut table = Table::new();
    table.set_header(["Quantity", "Value"]);
    table.add_row(["Total current".to_string(), format!("{:.2} A", summary.total_current_a)]);
    table.add_row(["Design current".to_string(), format!("{:.2} A", summary.design_current_a)]);
    table.add_row(["Cable section".to_string(), summary.cable_section.clone()]);
    table.add_row(["General breaker".to_string(), summary.breaker.clone()]);
    table.add_row([
        "Feed length".to_string(),
        format!("{:.2} m", result.wiring.total_feed_length_m),
    ]);
    println!("{table}");

    let mut bom = Table::new();
    bom.set_header(airside_core::bom::COLUMNS);
    for row in result.bom.rows() {
        bom.add_row(row);
    }
    println!("{bom}");

    if summary.cable_undersized {
        println!("WARNING: cable undersized");
    }
}
