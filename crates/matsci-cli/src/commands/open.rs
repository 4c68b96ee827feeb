use crate::commands::entropy_rng;
use crate::config::AppConfig;
use crate::display;
use crate::error::{CliError, Result};
use chrono::Local;
use matsci::core::data::elements::periodic_table;
use matsci::core::data::materials::materials;
use matsci::engine::chat::SUGGESTED_QUESTIONS;
use matsci::engine::router::Route;
use matsci::workflows::session::{Screen, Session};
use rand::{Rng, SeedableRng};
use std::fmt::Write;
use std::io::IsTerminal;

pub async fn run(path: &str, config: &AppConfig) -> Result<()> {
    let mut session = Session::new(config.session.clone(), entropy_rng());
    let route = session.navigate(path);
    print!("{}", render(&session, route, std::io::stdout().is_terminal())?);
    Ok(())
}

/// Shows the freshly opened screen the way it first appears.
pub fn render<R: Rng + SeedableRng>(session: &Session<R>, route: Route, ansi: bool) -> Result<String> {
    let mut out = format!("== {} ({}) ==\n\n", route.title(), route.path());

    match session.screen() {
        Screen::Dashboard(monitor) => {
            out.push_str(&display::dashboard(Local::now(), monitor.gauges()));
        }
        Screen::Materials { catalog, simulation } => {
            out.push_str(&display::listing(&catalog.listing(materials())));
            let _ = writeln!(
                out,
                "\nEnvironment: {} K, {} kPa, {}% RH (simulation {})",
                simulation.params.temperature(),
                simulation.params.pressure(),
                simulation.params.humidity(),
                if simulation.active { "on" } else { "off" }
            );
        }
        Screen::PeriodicTable(state) => {
            let elements = periodic_table().map_err(CliError::core)?;
            out.push_str(&display::periodic_table(elements, state, ansi));
        }
        Screen::Calculator(state) => {
            out.push_str(&display::calculator(state));
        }
        Screen::Chatbot(chat) => {
            for message in chat.messages() {
                let _ = writeln!(out, "{}", display::chat_message(message));
            }
            out.push_str("\nSuggested questions:\n");
            for question in SUGGESTED_QUESTIONS {
                let _ = writeln!(out, "  - {question}");
            }
        }
        Screen::Computation(state) => {
            let files: Vec<&str> = state
                .workspace()
                .files()
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            let _ = writeln!(out, "Input files:  {}", files.join(", "));
            let _ = writeln!(out, "Active file:  {}", state.workspace().active().name);
            let params = state.params();
            let _ = writeln!(
                out,
                "Parameters:   {} K, {} atm, ecut {} Ry, k-points {}x{}x{}, {}",
                params.temperature,
                params.pressure,
                params.cutoff_energy,
                params.k_points[0],
                params.k_points[1],
                params.k_points[2],
                params.exchange_correlation
            );
            match state.inspect_active() {
                Ok(summary) => {
                    let _ = writeln!(out, "\n{summary}");
                }
                Err(e) => {
                    let _ = writeln!(out, "\nCould not read the active file: {e}");
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matsci::workflows::session::SessionConfig;
    use rand::rngs::StdRng;

    fn open(path: &str) -> (Route, String) {
        let mut session = Session::new(SessionConfig::default(), StdRng::seed_from_u64(11));
        let route = session.navigate(path);
        let text = render(&session, route, false).unwrap();
        (route, text)
    }

    #[test]
    fn root_opens_the_computation_screen() {
        let (route, text) = open("/");
        assert_eq!(route, Route::Computation);
        assert!(text.starts_with("== Materials Computation (/computation) =="));
        assert!(text.contains("Active file:"));
        assert!(text.contains("Calculation:"));
    }

    #[test]
    fn unknown_paths_fall_back_to_the_default() {
        assert_eq!(open("/nowhere").0, Route::DEFAULT);
    }

    #[test]
    fn chatbot_shows_welcome_and_suggestions() {
        let (_, text) = open("/chatbot");
        assert!(text.contains("Material Science Agent Assistant"));
        assert!(text.contains(SUGGESTED_QUESTIONS[0]));
    }

    #[test]
    fn materials_lists_the_catalogue() {
        let (_, text) = open("/Materials/");
        assert!(text.contains("Titanium Alloy"));
        assert!(text.contains("simulation off"));
    }

    #[test]
    fn periodic_table_and_dashboard_render() {
        assert!(open("/periodic-table").1.contains("Fe"));
        assert!(open("/dashboard").1.contains("CPU"));
        assert!(open("/calculator").1.contains("[DEG]"));
    }
}
