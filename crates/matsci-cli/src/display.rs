//! Plain-text renderings of the screen states, shared by the subcommands.

use chrono::{DateTime, Local};
use matsci::core::models::calculation::{CalculationResult, RelaxationStep};
use matsci::core::models::chat::{ChatMessage, Role};
use matsci::core::models::element::Element;
use matsci::core::models::formula::Formula;
use matsci::core::models::material::{Material, PropertyKind};
use matsci::core::utils::format::{NOT_AVAILABLE, format_number, or_not_available, or_unknown};
use matsci::engine::calculator::CalculatorState;
use matsci::engine::comparison::{self, INSUFFICIENT_DATA};
use matsci::engine::environment::{Change, Derived, EnvironmentParams, SimulatedProperties};
use matsci::engine::materials::Listing;
use matsci::engine::periodic::{
    self, ColorMode, PaletteColor, PeriodicTableState, conductivity_rating, element_color,
    grid_position, reactivity_rating, typical_applications,
};
use matsci::engine::status::{Gauges, LoadLevel};
use std::collections::HashSet;
use std::fmt::Write;

const BAR_WIDTH: usize = 30;
const GRID_ROWS: u8 = 9;
const GRID_COLUMNS: u8 = 18;
const EMPTY_CELL: &str = "    ";

fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn material_row(material: &Material) -> String {
    format!(
        "{:<3} {:<28} {:<14} {}",
        material.id,
        material.name,
        material.category.to_string(),
        or_not_available(material.property(PropertyKind::Density), PropertyKind::Density.unit())
    )
}

pub fn listing(listing: &Listing<'_>) -> String {
    match listing {
        Listing::Items(items) => {
            let mut out = format!("{:<3} {:<28} {:<14} {}\n", "ID", "NAME", "CATEGORY", "DENSITY");
            for m in items {
                out.push_str(&material_row(m));
                out.push('\n');
            }
            out
        }
        Listing::Empty { title, hint } => format!("{title}\n{hint}\n"),
    }
}

pub fn material_details(material: &Material) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", material.name, material.category);
    let _ = writeln!(out, "{}", material.description);

    let _ = writeln!(out, "\nProperties");
    if material.properties.is_some() {
        for kind in PropertyKind::ALL {
            let _ = writeln!(
                out,
                "  {:<22} {}",
                kind.label(),
                or_not_available(material.property(kind), kind.unit())
            );
        }
    } else {
        let _ = writeln!(out, "  {NOT_AVAILABLE}");
    }

    if let Some(composition) = material.composition.as_ref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "\nComposition");
        for (symbol, percent) in composition.iter() {
            let _ = writeln!(out, "  {symbol:<4} {}%", format_number(percent));
        }
    }

    if let Some(applications) = material.applications.as_ref().filter(|a| !a.is_empty()) {
        let _ = writeln!(out, "\nApplications");
        for application in applications {
            let _ = writeln!(out, "  - {application}");
        }
    }
    out
}

pub fn comparison(a: &Material, b: &Material) -> String {
    let mut out = format!("{}  vs  {}\n\n", a.name, b.name);
    for (kind, row) in comparison::bars(a, b) {
        match row {
            Some(row) => {
                let _ = writeln!(out, "{:<22} {}", kind.label(), row.indicator);
                let _ = writeln!(
                    out,
                    "  A {} {}",
                    bar(row.a_percent, BAR_WIDTH),
                    or_not_available(a.property(kind), kind.unit())
                );
                let _ = writeln!(
                    out,
                    "  B {} {}",
                    bar(row.b_percent, BAR_WIDTH),
                    or_not_available(b.property(kind), kind.unit())
                );
            }
            None => {
                let _ = writeln!(out, "{:<22} {INSUFFICIENT_DATA}", kind.label());
            }
        }
    }

    let differences = comparison::key_differences(a, b);
    if !differences.is_empty() {
        let _ = writeln!(out, "\nKey differences");
        for line in differences {
            let _ = writeln!(out, "  - {line}");
        }
    }
    out
}

fn change_arrow(change: Change) -> &'static str {
    match change {
        Change::Increase => "↑",
        Change::Decrease => "↓",
        Change::Unchanged => "→",
    }
}

fn derived_row(kind: PropertyKind, derived: Option<Derived>) -> String {
    match derived {
        Some(d) => format!(
            "  {:<22} {:>10.2} → {:>10.2} {} {}",
            kind.label(),
            d.base,
            d.current,
            kind.unit(),
            change_arrow(d.change())
        ),
        None => format!("  {:<22} {NOT_AVAILABLE}", kind.label()),
    }
}

pub fn simulation(material: &Material, env: &EnvironmentParams, props: &SimulatedProperties) -> String {
    let mut out = format!(
        "{} at {} K, {} kPa, {}% humidity\n\n",
        material.name,
        format_number(env.temperature()),
        format_number(env.pressure()),
        format_number(env.humidity())
    );
    let rows = [
        (PropertyKind::Density, props.density),
        (PropertyKind::ThermalConductivity, props.thermal_conductivity),
        (PropertyKind::TensileStrength, props.tensile_strength),
    ];
    for (kind, derived) in rows {
        out.push_str(&derived_row(kind, derived));
        out.push('\n');
    }
    if let Some(warning) = props.state_warning {
        let _ = writeln!(out, "\n⚠ {}", warning.message());
    }
    out
}

fn paint(text: &str, color: PaletteColor) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[48;2;{r};{g};{b}m\x1b[38;2;255;255;255m{text}\x1b[0m")
}

fn swatch(color: PaletteColor, ansi: bool) -> String {
    if ansi {
        paint("  ", color)
    } else {
        format!("[{}]", color.hex())
    }
}

/// Draws the 18-column grid with the f-block rows below. Elements outside the
/// current search are blanked to dots; `ansi` adds truecolor cell backgrounds.
pub fn periodic_table(elements: &[Element], state: &PeriodicTableState, ansi: bool) -> String {
    let visible: HashSet<u8> = state.visible(elements).iter().map(|e| e.number).collect();
    let mut cells = vec![vec![EMPTY_CELL.to_string(); GRID_COLUMNS as usize]; GRID_ROWS as usize];

    for element in elements {
        let Some(pos) = grid_position(element) else {
            continue;
        };
        let (row, column) = (usize::from(pos.row - 1), usize::from(pos.column - 1));
        let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(column)) else {
            continue;
        };
        let label = format!(" {:<3}", element.symbol);
        *cell = if !visible.contains(&element.number) {
            " ·  ".to_string()
        } else if ansi {
            paint(&label, element_color(element, state.color_mode))
        } else {
            label
        };
    }

    let mut out = String::new();
    for (index, row) in cells.iter().enumerate() {
        if index == 7 {
            out.push('\n');
        }
        out.push_str(row.concat().trim_end());
        out.push('\n');
    }
    out.push_str(&legend(state.color_mode, ansi));
    out
}

pub fn legend(mode: ColorMode, ansi: bool) -> String {
    let entries: Vec<String> = periodic::legend(mode)
        .into_iter()
        .map(|(color, label)| format!("{} {label}", swatch(color, ansi)))
        .collect();
    format!("\nColored by {mode}: {}\n", entries.join("  "))
}

pub fn element_details(element: &Element) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}) #{}", element.name, element.symbol, element.number);
    let _ = writeln!(out, "  Category:            {}", element.category);
    let _ = writeln!(out, "  Atomic mass:         {}", format_number(element.atomic_mass));
    let _ = writeln!(out, "  Period / group:      {} / {}", element.period, element.group.map_or_else(|| NOT_AVAILABLE.to_string(), |g| g.to_string()));
    let _ = writeln!(out, "  Standard state:      {}", element.phase);
    let _ = writeln!(out, "  Electronegativity:   {}", or_unknown(element.electronegativity, ""));
    let _ = writeln!(out, "  Melting point:       {}", or_unknown(element.melting_point, "K"));
    let _ = writeln!(out, "  Boiling point:       {}", or_unknown(element.boiling_point, "K"));
    let _ = writeln!(out, "  Electron config:     {}", element.electron_configuration);
    let shells: Vec<String> = element.shells.iter().map(u8::to_string).collect();
    let _ = writeln!(out, "  Shells:              {} ({} electrons)", shells.join(", "), element.electron_count());
    let _ = writeln!(out, "  Conductivity:        {}", conductivity_rating(element.category));
    let _ = writeln!(out, "  Reactivity:          {}", reactivity_rating(element.category));
    let _ = writeln!(out, "\nTypical applications");
    for application in typical_applications(element.category) {
        let _ = writeln!(out, "  - {application}");
    }
    out
}

pub fn calculator(state: &CalculatorState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", state.angle_mode(), state.formula());
    let _ = writeln!(out, "{:>24}", state.display());
    if let Some(memory) = state.memory() {
        let _ = writeln!(out, "M = {}", format_number(memory));
    }
    if !state.latex().is_empty() {
        let _ = writeln!(out, "LaTeX: {}", state.latex());
    }
    if !state.history().is_empty() {
        let _ = writeln!(out, "History");
        for line in state.history() {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

pub fn formula(formula: &Formula) -> String {
    let mut out = format!(
        "{} [{} / {}]\n  {}\n  {}\n",
        formula.name, formula.category, formula.subcategory, formula.latex, formula.description
    );
    for var in &formula.variables {
        let unit = var.unit.as_deref().map(|u| format!(" ({u})")).unwrap_or_default();
        let _ = writeln!(out, "    {} = {}{unit}", var.symbol, var.name);
    }
    out
}

pub fn chat_message(message: &ChatMessage) -> String {
    let speaker = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    format!("[{}] {speaker}: {}", message.time_label(), message.content)
}

pub fn gauge_line(label: &str, percent: u8) -> String {
    format!(
        "{label:<7} {} {percent:>3}% ({})",
        bar(f64::from(percent), 20),
        LoadLevel::from_percent(percent)
    )
}

pub fn dashboard(now: DateTime<Local>, gauges: Gauges) -> String {
    format!(
        "{}\n{}\n{}\n",
        now.format("%A, %B %-d %Y  %H:%M:%S"),
        gauge_line("CPU", gauges.cpu),
        gauge_line("Memory", gauges.memory)
    )
}

pub fn results_table(results: &[CalculationResult], relaxation: &[RelaxationStep]) -> String {
    let mut out = format!(
        "{:>4} {:>14} {:>12} {:>12} {:>10} {:>12}\n",
        "STEP", "E_total (Ry)", "E_kin (Ry)", "converg.", "max |F|", "E_relax (Ry)"
    );
    for (result, relax) in results.iter().zip(relaxation) {
        let _ = writeln!(
            out,
            "{:>4} {:>14.6} {:>12.6} {:>12.3e} {:>10.5} {:>12.6}",
            result.step,
            result.total_energy,
            result.kinetic_energy,
            result.convergence,
            result.max_force(),
            relax.energy
        );
    }
    out
}
