use crate::cli::{ElementsArgs, ElementsCommands};
use crate::display;
use crate::error::{CliError, Result};
use matsci::core::data::elements::{find_element, periodic_table};
use matsci::engine::periodic::{PeriodicTableEvent, PeriodicTableState};
use std::io::IsTerminal;
use tracing::debug;

pub async fn run(args: ElementsArgs) -> Result<()> {
    let elements = periodic_table().map_err(CliError::core)?;
    match args.command {
        ElementsCommands::Table { color_by, search } => {
            let mut state = PeriodicTableState::default()
                .apply(PeriodicTableEvent::SetColorMode(color_by));
            if let Some(search) = search {
                state = state.apply(PeriodicTableEvent::SetSearch(search));
            }
            let ansi = std::io::stdout().is_terminal();
            debug!(mode = %color_by, ansi, "Drawing periodic table");
            print!("{}", display::periodic_table(elements, &state, ansi));
        }
        ElementsCommands::Show { key } => {
            let element = find_element(elements, &key).map_err(CliError::core)?;
            let state =
                PeriodicTableState::default().apply(PeriodicTableEvent::Select(element.number));
            if let Some(selected) = state.selected_element(elements) {
                print!("{}", display::element_details(selected));
            }
        }
    }
    Ok(())
}
