use crate::cli::{CalcArgs, CalcCommands};
use crate::config::AppConfig;
use crate::display;
use crate::error::{CliError, Result};
use crate::render;
use matsci::core::data::formulas::{formula_categories, formula_library, search_formulas};
use matsci::engine::calculator::{AngleMode, CalculatorEvent, CalculatorState};
use matsci::engine::plot::{sample_curve, sample_surface};
use tracing::info;

pub async fn run(args: CalcArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        CalcCommands::Keys { keys, angle_mode } => {
            let state = press(&keys, angle_mode.unwrap_or(config.session.angle_mode))?;
            print!("{}", display::calculator(&state));
        }
        CalcCommands::Plot {
            expression,
            surface,
            output,
        } => {
            if surface {
                let sampled = sample_surface(&expression).map_err(CliError::core)?;
                render::render_surface_svg(&sampled, &output)?;
            } else {
                let sampled = sample_curve(&expression).map_err(CliError::core)?;
                render::render_curve_svg(&sampled, &output)?;
            }
            println!("✓ Plot written to {}", output.display());
        }
        CalcCommands::Formulas { query, category } => {
            print!("{}", formulas(&query, category.as_deref())?);
        }
    }
    Ok(())
}

/// Presses `keys` in order on a fresh calculator.
pub fn press(keys: &[String], angle_mode: AngleMode) -> Result<CalculatorState> {
    let events = keys
        .iter()
        .map(|key| {
            key.parse::<CalculatorEvent>()
                .map_err(|e| CliError::Argument(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    info!(keys = events.len(), %angle_mode, "Pressing calculator keys");
    Ok(CalculatorState::new(angle_mode).apply_all(events))
}

pub fn formulas(query: &str, category: Option<&str>) -> Result<String> {
    let library = formula_library().map_err(CliError::core)?;
    let found = search_formulas(library, query, category);
    if found.is_empty() {
        return Ok(format!(
            "No formulas found. Categories: {}\n",
            formula_categories(library).join(", ")
        ));
    }
    Ok(found
        .into_iter()
        .map(display::formula)
        .collect::<Vec<_>>()
        .join("\n"))
}
