//! # Project Metadata
//!
//! Descriptive information about the panel being sized. None of these
//! fields take part in the calculation; they are carried through to the
//! report header and the CLI summary.
//!
//! ## Example
//!
//! ```rust
//! use airside_core::project::ProjectInfo;
//!
//! let info = ProjectInfo::new("Acme Foods", "OS-2291", "J. Silva", "AHU-40");
//! assert_eq!(info.order_number, "OS-2291");
//! assert_eq!(info.display_title(), "Acme Foods / OS-2291");
//! ```

use serde::{Deserialize, Serialize};

/// Project metadata entered alongside the engineering inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    /// Client name
    pub client: String,

    /// Service/work order number
    pub order_number: String,

    /// Responsible engineer or technician
    pub engineer: String,

    /// Equipment (machine) model
    pub equipment_model: String,
}

impl ProjectInfo {
    /// Create project metadata.
    ///
    /// # Arguments
    ///
    /// * `client` - Client name
    /// * `order_number` - Work order number
    /// * `engineer` - Responsible engineer
    /// * `equipment_model` - Machine model being supplied
    pub fn new(
        client: impl Into<String>,
        order_number: impl Into<String>,
        engineer: impl Into<String>,
        equipment_model: impl Into<String>,
    ) -> Self {
        ProjectInfo {
            client: client.into(),
            order_number: order_number.into(),
            engineer: engineer.into(),
            equipment_model: equipment_model.into(),
        }
    }

    /// Short title for report headers ("client / order"), skipping empty parts
    pub fn display_title(&self) -> String {
        let parts: Vec<&str> = [self.client.as_str(), self.order_number.as_str()]
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        if parts.is_empty() {
            "Untitled project".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let info = ProjectInfo::new("Client", "OS-1", "Engineer", "Model X");
        assert_eq!(info.client, "Client");
        assert_eq!(info.engineer, "Engineer");
        assert_eq!(info.equipment_model, "Model X");
    }

    #[test]
    fn test_display_title_skips_empty() {
        let info = ProjectInfo::new("", "OS-7", "", "");
        assert_eq!(info.display_title(), "OS-7");
        assert_eq!(ProjectInfo::default().display_title(), "Untitled project");
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let info: ProjectInfo = serde_json::from_str(r#"{"client": "Acme"}"#).unwrap();
        assert_eq!(info.client, "Acme");
        assert!(info.order_number.is_empty());
    }
}
