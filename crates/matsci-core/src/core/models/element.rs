use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    Nonmetal,
    Halogen,
    NobleGas,
    Lanthanide,
    Actinide,
    Unknown,
}

static CATEGORY_NAMES: Map<&'static str, ElementCategory> = phf_map! {
    "alkali metal" => ElementCategory::AlkaliMetal,
    "alkaline earth metal" => ElementCategory::AlkalineEarthMetal,
    "transition metal" => ElementCategory::TransitionMetal,
    "post-transition metal" => ElementCategory::PostTransitionMetal,
    "metalloid" => ElementCategory::Metalloid,
    "nonmetal" => ElementCategory::Nonmetal,
    "diatomic nonmetal" => ElementCategory::Nonmetal,
    "polyatomic nonmetal" => ElementCategory::Nonmetal,
    "halogen" => ElementCategory::Halogen,
    "noble gas" => ElementCategory::NobleGas,
    "lanthanide" => ElementCategory::Lanthanide,
    "actinide" => ElementCategory::Actinide,
    "unknown" => ElementCategory::Unknown,
};

impl ElementCategory {
    pub const ALL: [ElementCategory; 11] = [
        ElementCategory::AlkaliMetal,
        ElementCategory::AlkalineEarthMetal,
        ElementCategory::TransitionMetal,
        ElementCategory::PostTransitionMetal,
        ElementCategory::Metalloid,
        ElementCategory::Nonmetal,
        ElementCategory::Halogen,
        ElementCategory::NobleGas,
        ElementCategory::Lanthanide,
        ElementCategory::Actinide,
        ElementCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::AlkaliMetal => "alkali metal",
            ElementCategory::AlkalineEarthMetal => "alkaline earth metal",
            ElementCategory::TransitionMetal => "transition metal",
            ElementCategory::PostTransitionMetal => "post-transition metal",
            ElementCategory::Metalloid => "metalloid",
            ElementCategory::Nonmetal => "nonmetal",
            ElementCategory::Halogen => "halogen",
            ElementCategory::NobleGas => "noble gas",
            ElementCategory::Lanthanide => "lanthanide",
            ElementCategory::Actinide => "actinide",
            ElementCategory::Unknown => "unknown",
        }
    }

    pub fn is_f_block(&self) -> bool {
        matches!(self, ElementCategory::Lanthanide | ElementCategory::Actinide)
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseElementFieldError {
    #[error("Unknown element category: '{0}'")]
    Category(String),
    #[error("Unknown phase: '{0}'")]
    Phase(String),
}

impl FromStr for ElementCategory {
    type Err = ParseElementFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        CATEGORY_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ParseElementFieldError::Category(s.to_string()))
    }
}

/// Standard state at room temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
    Unknown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Solid => "Solid",
            Phase::Liquid => "Liquid",
            Phase::Gas => "Gas",
            Phase::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for Phase {
    type Err = ParseElementFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(Phase::Solid),
            "liquid" => Ok(Phase::Liquid),
            "gas" => Ok(Phase::Gas),
            "" | "unknown" => Ok(Phase::Unknown),
            _ => Err(ParseElementFieldError::Phase(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub number: u8,
    pub symbol: String,
    pub name: String,
    pub category: ElementCategory,
    pub period: u8,
    /// IUPAC group 1-18; `None` for the f-block series.
    pub group: Option<u8>,
    pub phase: Phase,
    pub electronegativity: Option<f64>,
    pub atomic_mass: f64,
    pub melting_point: Option<f64>,
    pub boiling_point: Option<f64>,
    pub electron_configuration: String,
    pub shells: Vec<u8>,
}

impl Element {
    pub fn electron_count(&self) -> u32 {
        self.shells.iter().map(|&s| u32::from(s)).sum()
    }
}
