//! # Input Documents and Artifacts
//!
//! Sizing runs are described by an input document, either TOML (`.toml`) or
//! JSON (any other extension). Every field has a default, so a document only
//! lists what differs from the standard form.
//!
//! - **Version validation**: the document's `version` must be compatible with [`SCHEMA_VERSION`]
//! - **Atomic writes**: exported artifacts go to a `.tmp` file, are synced, then renamed
//!
//! ## Example
//!
//! ```rust,no_run
//! use airside_core::calculations::feeder::calculate_checked;
//! use airside_core::export::render_report_pdf;
//! use airside_core::input_file::{load_input, write_artifact};
//! use std::path::Path;
//!
//! let input = load_input(Path::new("panel.toml")).unwrap();
//! let result = calculate_checked(&input).unwrap();
//! let pdf = render_report_pdf(&input, &result).unwrap();
//! write_artifact(&pdf, Path::new("panel.pdf")).unwrap();
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::calculations::feeder::FeederInput;
use crate::errors::{CalcError, CalcResult};

/// Current input document schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Load and version-check an input document.
///
/// # Returns
///
/// * `Ok(FeederInput)` - Parsed input (not yet range-validated)
/// * `Err(CalcError::VersionMismatch)` - Document version is incompatible
/// * `Err(CalcError::SerializationError)` - Malformed TOML or JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_input(path: &Path) -> CalcResult<FeederInput> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    debug!(path = %path.display(), toml = is_toml, "loading input document");

    if is_toml {
        parse_input_toml(&text)
    } else {
        parse_input_json(&text)
    }
}

/// Parse a TOML input document.
pub fn parse_input_toml(text: &str) -> CalcResult<FeederInput> {
    let input: FeederInput = toml::from_str(text).map_err(|e| CalcError::serialization(e.to_string()))?;
    validate_version(&input.version)?;
    Ok(input)
}

/// Parse a JSON input document.
pub fn parse_input_json(text: &str) -> CalcResult<FeederInput> {
    let input: FeederInput = serde_json::from_str(text).map_err(|e| CalcError::serialization(e.to_string()))?;
    validate_version(&input.version)?;
    Ok(input)
}

/// Default input document, as written by `airside template`
pub fn default_input_toml() -> CalcResult<String> {
    toml::to_string_pretty(&FeederInput::default()).map_err(|e| CalcError::serialization(e.to_string()))
}

/// Write an exported artifact atomically.
///
/// The bytes land in `<path>.tmp` first and are synced before the rename, so
/// an interrupted export never leaves a truncated report behind.
pub fn write_artifact(bytes: &[u8], path: &Path) -> CalcResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}

/// Validate that a document version is compatible with the current schema
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor version may carry fields we do not understand
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
