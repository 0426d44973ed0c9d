//! Ring Terminals
//!
//! Stud size follows the cable section; the main feed gets two terminals per
//! conductor (one at each end).

use serde::{Deserialize, Serialize};

use super::cables::CableSection;

/// Terminals fitted per motor or heater branch
pub const BRANCH_TERMINAL_COUNT: u32 = 6;

/// Ring terminal stud size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerminalSize {
    M6,
    M8,
    M10,
}

impl TerminalSize {
    /// Terminal for a cable section: ≤6 mm² → M6, ≤16 mm² → M8, else M10
    pub fn for_section(section: CableSection) -> TerminalSize {
        let mm2 = section.mm2();
        if mm2 <= 6.0 {
            TerminalSize::M6
        } else if mm2 <= 16.0 {
            TerminalSize::M8
        } else {
            TerminalSize::M10
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TerminalSize::M6 => "M6",
            TerminalSize::M8 => "M8",
            TerminalSize::M10 => "M10",
        }
    }

    /// BOM specification text (e.g., "M8 ring terminal")
    pub fn specification(&self) -> String {
        format!("{} ring terminal", self.code())
    }
}

/// Main feed terminals: two per conductor
pub fn main_terminal_count(conductor_count: u32) -> u32 {
    conductor_count * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_for_section() {
        assert_eq!(TerminalSize::for_section(CableSection::S2_5), TerminalSize::M6);
        assert_eq!(TerminalSize::for_section(CableSection::S6), TerminalSize::M6);
        assert_eq!(TerminalSize::for_section(CableSection::S10), TerminalSize::M8);
        assert_eq!(TerminalSize::for_section(CableSection::S16), TerminalSize::M8);
        assert_eq!(TerminalSize::for_section(CableSection::S25), TerminalSize::M10);
        assert_eq!(TerminalSize::for_section(CableSection::S50), TerminalSize::M10);
    }

    #[test]
    fn test_main_terminal_count() {
        assert_eq!(main_terminal_count(3), 6);
        assert_eq!(main_terminal_count(4), 8);
    }
}
