//! Display helpers shared by the screens.

/// Placeholder for a missing optional value.
pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";

/// Formats a calculator result the way the display shows it.
///
/// Integral values lose their fractional part, non-finite values become
/// `Infinity`, `-Infinity` or `NaN`, and everything else uses the shortest
/// representation that round-trips, capped at 12 significant digits.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    if !(-7..21).contains(&magnitude) {
        return format!("{value:e}");
    }
    let decimals = (11 - magnitude).clamp(0, 16) as usize;
    let rounded = format!("{value:.decimals$}");
    if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rounded
    }
}

pub fn or_not_available(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit.is_empty() => format_number(v),
        Some(v) => format!("{} {unit}", format_number(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn or_unknown(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(_) => or_not_available(value, unit),
        None => UNKNOWN.to_string(),
    }
}
