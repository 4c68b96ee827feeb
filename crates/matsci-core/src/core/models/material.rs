use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialCategory {
    Metal,
    Polymer,
    Ceramic,
    Composite,
    Semiconductor,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 5] = [
        MaterialCategory::Metal,
        MaterialCategory::Polymer,
        MaterialCategory::Ceramic,
        MaterialCategory::Composite,
        MaterialCategory::Semiconductor,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MaterialCategory::Metal => "metal",
            MaterialCategory::Polymer => "polymer",
            MaterialCategory::Ceramic => "ceramic",
            MaterialCategory::Composite => "composite",
            MaterialCategory::Semiconductor => "semiconductor",
        }
    }

    /// Heading used by the category filter bar.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Metal => "Metals & Alloys",
            MaterialCategory::Polymer => "Polymers",
            MaterialCategory::Ceramic => "Ceramics",
            MaterialCategory::Composite => "Composites",
            MaterialCategory::Semiconductor => "Semiconductors",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialCategory::Metal => "Metal",
            MaterialCategory::Polymer => "Polymer",
            MaterialCategory::Ceramic => "Ceramic",
            MaterialCategory::Composite => "Composite",
            MaterialCategory::Semiconductor => "Semiconductor",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown material category: '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for MaterialCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        MaterialCategory::ALL
            .into_iter()
            .find(|c| c.id() == normalized || c.id() == singular)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Category constraint of the materials list: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MaterialCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: MaterialCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.id(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Density,
    MeltingPoint,
    BoilingPoint,
    ThermalConductivity,
    ThermalExpansion,
    TensileStrength,
    YoungsModulus,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 7] = [
        PropertyKind::Density,
        PropertyKind::MeltingPoint,
        PropertyKind::BoilingPoint,
        PropertyKind::ThermalConductivity,
        PropertyKind::ThermalExpansion,
        PropertyKind::TensileStrength,
        PropertyKind::YoungsModulus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::Density => "Density",
            PropertyKind::MeltingPoint => "Melting Point",
            PropertyKind::BoilingPoint => "Boiling Point",
            PropertyKind::ThermalConductivity => "Thermal Conductivity",
            PropertyKind::ThermalExpansion => "Thermal Expansion",
            PropertyKind::TensileStrength => "Tensile Strength",
            PropertyKind::YoungsModulus => "Young's Modulus",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            PropertyKind::Density => "g/cm³",
            PropertyKind::MeltingPoint | PropertyKind::BoilingPoint => "K",
            PropertyKind::ThermalConductivity => "W/m·K",
            PropertyKind::ThermalExpansion => "µm/m·K",
            PropertyKind::TensileStrength => "MPa",
            PropertyKind::YoungsModulus => "GPa",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialProperties {
    pub density: Option<f64>,
    pub melting_point: Option<f64>,
    pub boiling_point: Option<f64>,
    pub thermal_conductivity: Option<f64>,
    pub thermal_expansion: Option<f64>,
    pub tensile_strength: Option<f64>,
    pub youngs_modulus: Option<f64>,
}

impl MaterialProperties {
    pub fn get(&self, kind: PropertyKind) -> Option<f64> {
        match kind {
            PropertyKind::Density => self.density,
            PropertyKind::MeltingPoint => self.melting_point,
            PropertyKind::BoilingPoint => self.boiling_point,
            PropertyKind::ThermalConductivity => self.thermal_conductivity,
            PropertyKind::ThermalExpansion => self.thermal_expansion,
            PropertyKind::TensileStrength => self.tensile_strength,
            PropertyKind::YoungsModulus => self.youngs_modulus,
        }
    }
}

/// Weight-percent composition keyed by element symbol, kept in insertion order.
///
/// The shares are not required to add up to 100.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    entries: Vec<(String, f64)>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, percent: f64) -> Self {
        self.insert(symbol, percent);
        self
    }

    pub fn insert(&mut self, symbol: &str, percent: f64) {
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some(entry) => entry.1 = percent,
            None => self.entries.push((symbol.to_string(), percent)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(s, p)| (s.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: MaterialCategory,
    pub description: String,
    pub color: String,
    pub properties: Option<MaterialProperties>,
    pub composition: Option<Composition>,
    pub applications: Option<Vec<String>>,
}

impl Material {
    pub fn property(&self, kind: PropertyKind) -> Option<f64> {
        self.properties.as_ref().and_then(|p| p.get(kind))
    }

    /// Case-insensitive substring match on name or description.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
