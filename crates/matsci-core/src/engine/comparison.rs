//! Side-by-side comparison of two materials, A (the primary selection) against B.

use std::fmt;

use crate::core::models::material::{Material, PropertyKind};

/// Differences under this many percent render as "about equal".
pub const SIMILARITY_THRESHOLD: f64 = 1.0;
/// Bars are scaled against the larger of the two values times this headroom.
pub const BAR_HEADROOM: f64 = 1.2;

pub const INSUFFICIENT_DATA: &str = "Insufficient data for comparison";

/// Properties shown as bars, in display order.
pub const COMPARED_PROPERTIES: [PropertyKind; 4] = [
    PropertyKind::Density,
    PropertyKind::MeltingPoint,
    PropertyKind::ThermalConductivity,
    PropertyKind::TensileStrength,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Similar,
    /// B exceeds A by the given rounded percentage.
    Higher(u64),
    /// B falls short of A by the given rounded percentage.
    Lower(u64),
    InsufficientData,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Similar => f.write_str("≈"),
            Indicator::Higher(p) => write!(f, "▲ {p}%"),
            Indicator::Lower(p) => write!(f, "▼ {p}%"),
            Indicator::InsufficientData => f.write_str(INSUFFICIENT_DATA),
        }
    }
}

/// Relative difference of `b` against `a`, in percent.
pub fn percent_difference(a: f64, b: f64) -> f64 {
    (b - a) / a * 100.0
}

pub fn indicator(a: Option<f64>, b: Option<f64>) -> Indicator {
    let (Some(a), Some(b)) = (a, b) else {
        return Indicator::InsufficientData;
    };
    let diff = percent_difference(a, b);
    // a zero baseline gives an infinite ratio; there is no percentage to show
    if !diff.is_finite() {
        Indicator::InsufficientData
    } else if diff.abs() < SIMILARITY_THRESHOLD {
        Indicator::Similar
    } else if diff > 0.0 {
        Indicator::Higher(diff.round() as u64)
    } else {
        Indicator::Lower(diff.abs().round() as u64)
    }
}

/// One row of the bar chart. Percentages are of the shared scale, so they never
/// exceed `100 / BAR_HEADROOM`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonBar {
    pub property: PropertyKind,
    pub a_percent: f64,
    pub b_percent: f64,
    pub indicator: Indicator,
}

pub fn bar(property: PropertyKind, a: &Material, b: &Material) -> Option<ComparisonBar> {
    let (va, vb) = (a.property(property)?, b.property(property)?);
    let scale = va.max(vb) * BAR_HEADROOM;
    let percent = |v: f64| if scale > 0.0 { v / scale * 100.0 } else { 0.0 };
    Some(ComparisonBar {
        property,
        a_percent: percent(va),
        b_percent: percent(vb),
        indicator: indicator(Some(va), Some(vb)),
    })
}

/// Bars for [`COMPARED_PROPERTIES`]; `None` marks a row with insufficient data.
pub fn bars(a: &Material, b: &Material) -> Vec<(PropertyKind, Option<ComparisonBar>)> {
    COMPARED_PROPERTIES
        .iter()
        .map(|&kind| (kind, bar(kind, a, b)))
        .collect()
}

/// Plain-language differences between `b` and `a`, for the properties both define.
pub fn key_differences(a: &Material, b: &Material) -> Vec<String> {
    let pair = |kind| a.property(kind).zip(b.property(kind));
    let mut lines = Vec::new();

    if let Some((da, db)) = pair(PropertyKind::Density) {
        let relation = if db > da { "denser than" } else { "less dense than" };
        lines.push(format!(
            "{} is {relation} {} by {:.1}%.",
            b.name,
            a.name,
            percent_difference(da, db).abs()
        ));
    }
    if let Some((ka, kb)) = pair(PropertyKind::ThermalConductivity) {
        let relation = if kb > ka { "better" } else { "worse" };
        lines.push(format!("{} conducts heat {relation} than {}.", b.name, a.name));
    }
    if let Some((sa, sb)) = pair(PropertyKind::TensileStrength) {
        let relation = if sb > sa { "higher" } else { "lower" };
        lines.push(format!(
            "{} has {relation} tensile strength than {}.",
            b.name, a.name
        ));
    }
    lines
}
