//! Cable Sections and Ampacity
//!
//! Simplified NBR 5410-style ampacity tables for copper PVC cables, three
//! loaded conductors, one table per installation method.
//!
//! ## Table Invariant
//!
//! Every table is ordered by ascending cross-section. [`select_cable`] relies
//! on this: the first section whose ampacity meets the demand is the
//! smallest adequate one.
//!
//! | Section (mm²) | B1 | C | E |
//! |---------------|----|---|---|
//! | 2.5 | 21 | 24 | 27 |
//! | 4 | 28 | 32 | 36 |
//! | 6 | 36 | 41 | 46 |
//! | 10 | 50 | 57 | 63 |
//! | 16 | 68 | 76 | 85 |
//! | 25 | 89 | 101 | 112 |
//! | 35 | 110 | 125 | 138 |
//! | 50 | 134 | 151 | 168 |

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Standard copper cable cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CableSection {
    /// 2.5 mm²
    S2_5,
    /// 4 mm²
    S4,
    /// 6 mm²
    S6,
    /// 10 mm²
    S10,
    /// 16 mm²
    S16,
    /// 25 mm²
    S25,
    /// 35 mm²
    S35,
    /// 50 mm²
    S50,
}

impl CableSection {
    /// All tabulated sections, ascending
    pub const ALL: [CableSection; 8] = [
        CableSection::S2_5,
        CableSection::S4,
        CableSection::S6,
        CableSection::S10,
        CableSection::S16,
        CableSection::S25,
        CableSection::S35,
        CableSection::S50,
    ];

    /// Largest tabulated section, used when the demand exceeds every table entry
    pub const LARGEST: CableSection = CableSection::S50;

    /// Cross-section in mm²
    pub fn mm2(&self) -> f64 {
        match self {
            CableSection::S2_5 => 2.5,
            CableSection::S4 => 4.0,
            CableSection::S6 => 6.0,
            CableSection::S10 => 10.0,
            CableSection::S16 => 16.0,
            CableSection::S25 => 25.0,
            CableSection::S35 => 35.0,
            CableSection::S50 => 50.0,
        }
    }

    /// Display name (e.g., "2.5 mm²")
    pub fn display_name(&self) -> &'static str {
        match self {
            CableSection::S2_5 => "2.5 mm²",
            CableSection::S4 => "4 mm²",
            CableSection::S6 => "6 mm²",
            CableSection::S10 => "10 mm²",
            CableSection::S16 => "16 mm²",
            CableSection::S25 => "25 mm²",
            CableSection::S35 => "35 mm²",
            CableSection::S50 => "50 mm²",
        }
    }
}

impl std::fmt::Display for CableSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Reference installation method (NBR 5410 nomenclature)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InstallationMethod {
    /// B1 - insulated conductors in conduit embedded in masonry
    #[default]
    #[serde(alias = "B1")]
    EmbeddedConduit,
    /// C - cables on a perforated tray
    #[serde(alias = "C")]
    PerforatedTray,
    /// E - multicore cable in open air
    #[serde(alias = "E")]
    OpenAir,
}

const AMPACITY_B1: [(CableSection, f64); 8] = [
    (CableSection::S2_5, 21.0),
    (CableSection::S4, 28.0),
    (CableSection::S6, 36.0),
    (CableSection::S10, 50.0),
    (CableSection::S16, 68.0),
    (CableSection::S25, 89.0),
    (CableSection::S35, 110.0),
    (CableSection::S50, 134.0),
];

const AMPACITY_C: [(CableSection, f64); 8] = [
    (CableSection::S2_5, 24.0),
    (CableSection::S4, 32.0),
    (CableSection::S6, 41.0),
    (CableSection::S10, 57.0),
    (CableSection::S16, 76.0),
    (CableSection::S25, 101.0),
    (CableSection::S35, 125.0),
    (CableSection::S50, 151.0),
];

const AMPACITY_E: [(CableSection, f64); 8] = [
    (CableSection::S2_5, 27.0),
    (CableSection::S4, 36.0),
    (CableSection::S6, 46.0),
    (CableSection::S10, 63.0),
    (CableSection::S16, 85.0),
    (CableSection::S25, 112.0),
    (CableSection::S35, 138.0),
    (CableSection::S50, 168.0),
];

impl InstallationMethod {
    pub const ALL: [InstallationMethod; 3] = [
        InstallationMethod::EmbeddedConduit,
        InstallationMethod::PerforatedTray,
        InstallationMethod::OpenAir,
    ];

    /// NBR 5410 reference method code
    pub fn code(&self) -> &'static str {
        match self {
            InstallationMethod::EmbeddedConduit => "B1",
            InstallationMethod::PerforatedTray => "C",
            InstallationMethod::OpenAir => "E",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InstallationMethod::EmbeddedConduit => "Embedded conduit",
            InstallationMethod::PerforatedTray => "Perforated tray",
            InstallationMethod::OpenAir => "Open air",
        }
    }

    /// Ampacity table for this method, ascending by section
    pub fn ampacity_table(&self) -> &'static [(CableSection, f64)] {
        match self {
            InstallationMethod::EmbeddedConduit => &AMPACITY_B1,
            InstallationMethod::PerforatedTray => &AMPACITY_C,
            InstallationMethod::OpenAir => &AMPACITY_E,
        }
    }

    /// Ampacity (A) of a section under this method
    pub fn ampacity_a(&self, section: CableSection) -> f64 {
        self.ampacity_table()
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, a)| *a)
            .unwrap_or(0.0)
    }

    /// Highest tabulated ampacity (A) for this method
    pub fn max_ampacity_a(&self) -> f64 {
        self.ampacity_a(CableSection::LARGEST)
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code(), self.description())
    }
}

/// Outcome of cable selection.
///
/// `Undersized` means the demand exceeds the largest tabulated ampacity and
/// the largest section was returned anyway. Callers must surface it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum CableSelection {
    /// Smallest section whose ampacity meets the demand
    Sized {
        section: CableSection,
        ampacity_a: f64,
    },
    /// Table exhausted; largest section returned, demand not covered
    Undersized {
        section: CableSection,
        ampacity_a: f64,
        demand_a: f64,
    },
}

impl CableSelection {
    pub fn section(&self) -> CableSection {
        match self {
            CableSelection::Sized { section, .. } | CableSelection::Undersized { section, .. } => *section,
        }
    }

    pub fn ampacity_a(&self) -> f64 {
        match self {
            CableSelection::Sized { ampacity_a, .. } | CableSelection::Undersized { ampacity_a, .. } => *ampacity_a,
        }
    }

    pub fn is_undersized(&self) -> bool {
        matches!(self, CableSelection::Undersized { .. })
    }
}

/// Select the smallest cable section for a derated current.
///
/// Scans the method's table in ascending order; the first section whose
/// ampacity is ≥ the demand wins. If none qualifies, returns
/// [`CableSelection::Undersized`] with the largest section.
///
/// # Example
///
/// ```rust
/// use airside_core::equipment::cables::{select_cable, CableSection, InstallationMethod};
///
/// let selection = select_cable(15.79, InstallationMethod::EmbeddedConduit);
/// assert_eq!(selection.section(), CableSection::S2_5);
///
/// let selection = select_cable(200.0, InstallationMethod::OpenAir);
/// assert!(selection.is_undersized());
/// assert_eq!(selection.section(), CableSection::S50);
/// ```
pub fn select_cable(derated_current_a: f64, method: InstallationMethod) -> CableSelection {
    let table = method.ampacity_table();

    if let Some(&(section, ampacity_a)) = table.iter().find(|(_, ampacity)| *ampacity >= derated_current_a) {
        return CableSelection::Sized { section, ampacity_a };
    }

    let ampacity_a = method.max_ampacity_a();
    warn!(
        demand_a = derated_current_a,
        max_ampacity_a = ampacity_a,
        method = method.code(),
        "derated current exceeds largest tabulated section; cable is undersized"
    );
    CableSelection::Undersized {
        section: CableSection::LARGEST,
        ampacity_a,
        demand_a: derated_current_a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_ascending() {
        for method in InstallationMethod::ALL {
            let table = method.ampacity_table();
            for pair in table.windows(2) {
                assert!(pair[0].0 < pair[1].0, "{:?} sections not ascending", method);
                assert!(pair[0].1 < pair[1].1, "{:?} ampacities not ascending", method);
            }
            let sections: Vec<CableSection> = table.iter().map(|(s, _)| *s).collect();
            assert_eq!(sections, CableSection::ALL.to_vec());
        }
    }

    #[test]
    fn test_max_ampacity() {
        assert_eq!(InstallationMethod::EmbeddedConduit.max_ampacity_a(), 134.0);
        assert_eq!(InstallationMethod::PerforatedTray.max_ampacity_a(), 151.0);
        assert_eq!(InstallationMethod::OpenAir.max_ampacity_a(), 168.0);
    }

    #[test]
    fn test_first_match_wins() {
        let b1 = InstallationMethod::EmbeddedConduit;
        assert_eq!(select_cable(0.0, b1).section(), CableSection::S2_5);
        assert_eq!(select_cable(21.0, b1).section(), CableSection::S2_5);
        assert_eq!(select_cable(21.01, b1).section(), CableSection::S4);
        assert_eq!(select_cable(134.0, b1).section(), CableSection::S50);
        assert!(!select_cable(134.0, b1).is_undersized());
    }

    #[test]
    fn test_undersized_fallback() {
        let selection = select_cable(200.0, InstallationMethod::OpenAir);
        assert_eq!(
            selection,
            CableSelection::Undersized {
                section: CableSection::S50,
                ampacity_a: 168.0,
                demand_a: 200.0,
            }
        );
        assert!(select_cable(134.5, InstallationMethod::EmbeddedConduit).is_undersized());
    }

    #[test]
    fn test_selection_monotonic() {
        for method in InstallationMethod::ALL {
            let mut previous = CableSection::S2_5;
            let mut demand = 0.0;
            while demand < 220.0 {
                let section = select_cable(demand, method).section();
                assert!(section >= previous, "{:?} decreased at {} A", method, demand);
                previous = section;
                demand += 0.25;
            }
        }
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&InstallationMethod::PerforatedTray).unwrap();
        assert_eq!(json, "\"PerforatedTray\"");
        let parsed: InstallationMethod = serde_json::from_str("\"E\"").unwrap();
        assert_eq!(parsed, InstallationMethod::OpenAir);
    }

    #[test]
    fn test_selection_serialization() {
        let json = serde_json::to_string(&select_cable(10.0, InstallationMethod::PerforatedTray)).unwrap();
        assert!(json.contains("\"status\":\"Sized\""));
        assert!(json.contains("\"section\":\"S2_5\""));
    }
}
