//! Periodic table layout, coloring and search.
//!
//! The main block sits at `(period, group)`. The f-block is pulled out into two
//! synthetic rows under the table: lanthanides on row 8 from column `Z - 56`, actinides
//! on row 9 from column `Z - 88`. Rows past 7 get an extra half-cell gap so the two
//! blocks read as separate.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::models::element::{Element, ElementCategory, Phase};

pub const CELL_SIZE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: u8,
    pub column: u8,
}

impl GridPosition {
    /// `(left, top)` pixel offset of the cell's corner.
    pub fn pixel_offset(&self, cell: u32) -> (u32, u32) {
        let gap = if self.row > 7 { cell / 2 } else { 0 };
        let top = u32::from(self.row - 1) * cell + gap;
        let left = u32::from(self.column - 1) * cell;
        (left, top)
    }
}

/// Grid cell for `element`, or `None` for a main-block element without a group.
pub fn grid_position(element: &Element) -> Option<GridPosition> {
    match element.category {
        ElementCategory::Lanthanide => Some(GridPosition {
            row: 8,
            column: element.number.checked_sub(56)?,
        }),
        ElementCategory::Actinide => Some(GridPosition {
            row: 9,
            column: element.number.checked_sub(88)?,
        }),
        _ => element.group.map(|group| GridPosition {
            row: element.period,
            column: group,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Category,
    State,
    Electronegativity,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Category => "category",
            ColorMode::State => "state",
            ColorMode::Electronegativity => "electronegativity",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown color mode '{0}' (expected category, state or electronegativity)")]
pub struct ParseColorModeError(String);

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(ColorMode::Category),
            "state" | "phase" => Ok(ColorMode::State),
            "electronegativity" | "en" => Ok(ColorMode::Electronegativity),
            _ => Err(ParseColorModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Indigo,
    Purple,
    Pink,
    Rose,
    DeepBlue,
    Gray,
}

impl PaletteColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PaletteColor::Red => (0xef, 0x44, 0x44),
            PaletteColor::Orange => (0xf9, 0x73, 0x16),
            PaletteColor::Yellow => (0xea, 0xb3, 0x08),
            PaletteColor::Green => (0x22, 0xc5, 0x5e),
            PaletteColor::Teal => (0x14, 0xb8, 0xa6),
            PaletteColor::Blue => (0x3b, 0x82, 0xf6),
            PaletteColor::Indigo => (0x63, 0x66, 0xf1),
            PaletteColor::Purple => (0xa8, 0x55, 0xf7),
            PaletteColor::Pink => (0xec, 0x48, 0x99),
            PaletteColor::Rose => (0xf4, 0x3f, 0x5e),
            PaletteColor::DeepBlue => (0x1e, 0x3a, 0x8a),
            PaletteColor::Gray => (0x6b, 0x72, 0x80),
        }
    }

    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

pub fn category_color(category: ElementCategory) -> PaletteColor {
    match category {
        ElementCategory::AlkaliMetal => PaletteColor::Red,
        ElementCategory::AlkalineEarthMetal => PaletteColor::Orange,
        ElementCategory::TransitionMetal => PaletteColor::Yellow,
        ElementCategory::PostTransitionMetal => PaletteColor::Green,
        ElementCategory::Metalloid => PaletteColor::Teal,
        ElementCategory::Nonmetal => PaletteColor::Blue,
        ElementCategory::Halogen => PaletteColor::Indigo,
        ElementCategory::NobleGas => PaletteColor::Purple,
        ElementCategory::Lanthanide => PaletteColor::Pink,
        ElementCategory::Actinide => PaletteColor::Rose,
        ElementCategory::Unknown => PaletteColor::Gray,
    }
}

pub fn phase_color(phase: Phase) -> PaletteColor {
    match phase {
        Phase::Gas => PaletteColor::Red,
        Phase::Liquid => PaletteColor::Blue,
        Phase::Solid => PaletteColor::Green,
        Phase::Unknown => PaletteColor::Gray,
    }
}

/// Breakpoints at 1.0, 2.0, 3.0 and 4.0; a missing (or zero) value is gray.
pub fn electronegativity_color(en: Option<f64>) -> PaletteColor {
    match en {
        None => PaletteColor::Gray,
        Some(v) if v == 0.0 => PaletteColor::Gray,
        Some(v) if v < 1.0 => PaletteColor::DeepBlue,
        Some(v) if v < 2.0 => PaletteColor::Blue,
        Some(v) if v < 3.0 => PaletteColor::Green,
        Some(v) if v < 4.0 => PaletteColor::Yellow,
        Some(_) => PaletteColor::Red,
    }
}

pub fn element_color(element: &Element, mode: ColorMode) -> PaletteColor {
    match mode {
        ColorMode::Category => category_color(element.category),
        ColorMode::State => phase_color(element.phase),
        ColorMode::Electronegativity => electronegativity_color(element.electronegativity),
    }
}

pub fn legend(mode: ColorMode) -> Vec<(PaletteColor, &'static str)> {
    match mode {
        ColorMode::Category => vec![
            (PaletteColor::Red, "Alkali Metals"),
            (PaletteColor::Orange, "Alkaline Earth"),
            (PaletteColor::Yellow, "Transition Metals"),
            (PaletteColor::Green, "Post-Transition"),
            (PaletteColor::Teal, "Metalloids"),
            (PaletteColor::Blue, "Nonmetals"),
            (PaletteColor::Indigo, "Halogens"),
            (PaletteColor::Purple, "Noble Gases"),
            (PaletteColor::Pink, "Lanthanides"),
            (PaletteColor::Rose, "Actinides"),
            (PaletteColor::Gray, "Unknown"),
        ],
        ColorMode::State => vec![
            (PaletteColor::Red, "Gas"),
            (PaletteColor::Blue, "Liquid"),
            (PaletteColor::Green, "Solid"),
            (PaletteColor::Gray, "Unknown"),
        ],
        ColorMode::Electronegativity => vec![
            (PaletteColor::DeepBlue, "< 1.0"),
            (PaletteColor::Blue, "1.0 - 2.0"),
            (PaletteColor::Green, "2.0 - 3.0"),
            (PaletteColor::Yellow, "3.0 - 4.0"),
            (PaletteColor::Red, "> 4.0"),
            (PaletteColor::Gray, "Unknown"),
        ],
    }
}

/// Elements whose name, symbol, atomic number or category contains `query`.
pub fn search_elements<'a>(elements: &'a [Element], query: &str) -> Vec<&'a Element> {
    let needle = query.trim().to_lowercase();
    elements
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.name.to_lowercase().contains(&needle)
                || e.symbol.to_lowercase().contains(&needle)
                || e.number.to_string().contains(&needle)
                || e.category.as_str().contains(&needle)
        })
        .collect()
}

/// Typical uses shown on the detail panel's applications tab.
pub fn typical_applications(category: ElementCategory) -> [&'static str; 3] {
    match category {
        ElementCategory::TransitionMetal => [
            "Used in alloys for construction and manufacturing",
            "Catalyst in chemical reactions and industrial processes",
            "Component in high-strength structural materials",
        ],
        ElementCategory::Nonmetal => [
            "Essential component in various chemical compounds",
            "Used in laboratory reagents and experiments",
            "Critical element in biological processes",
        ],
        ElementCategory::NobleGas => [
            "Used in lighting and display technologies",
            "Cryogenic applications and cooling systems",
            "Protective atmospheres for sensitive materials",
        ],
        ElementCategory::AlkaliMetal => [
            "Battery and energy storage technologies",
            "Heat transfer media in certain systems",
            "Component in specialized alloys",
        ],
        _ => [
            "Component in various industrial processes",
            "Used in specific technical applications",
            "Research and experimental purposes",
        ],
    }
}

pub fn conductivity_rating(category: ElementCategory) -> &'static str {
    match category {
        ElementCategory::TransitionMetal
        | ElementCategory::AlkaliMetal
        | ElementCategory::AlkalineEarthMetal => "High",
        ElementCategory::Metalloid => "Moderate",
        _ => "Low",
    }
}

pub fn reactivity_rating(category: ElementCategory) -> &'static str {
    match category {
        ElementCategory::AlkaliMetal | ElementCategory::Halogen => "High",
        ElementCategory::NobleGas => "Very Low",
        _ => "Moderate",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeriodicTableEvent {
    SetColorMode(ColorMode),
    SetSearch(String),
    /// Clicking the selected element again closes the detail panel.
    Select(u8),
    ClearSelection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodicTableState {
    pub color_mode: ColorMode,
    pub search: String,
    pub selected: Option<u8>,
}

impl PeriodicTableState {
    pub fn apply(mut self, event: PeriodicTableEvent) -> Self {
        match event {
            PeriodicTableEvent::SetColorMode(mode) => self.color_mode = mode,
            PeriodicTableEvent::SetSearch(search) => self.search = search,
            PeriodicTableEvent::Select(number) => {
                self.selected = if self.selected == Some(number) {
                    None
                } else {
                    Some(number)
                };
            }
            PeriodicTableEvent::ClearSelection => self.selected = None,
        }
        self
    }

    pub fn visible<'a>(&self, elements: &'a [Element]) -> Vec<&'a Element> {
        search_elements(elements, &self.search)
    }

    pub fn selected_element<'a>(&self, elements: &'a [Element]) -> Option<&'a Element> {
        self.selected
            .and_then(|n| elements.iter().find(|e| e.number == n))
    }
}
