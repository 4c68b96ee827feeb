use crate::cli::{EnvironmentArgs, MaterialsArgs, MaterialsCommands};
use crate::config::{AppConfig, with_overrides};
use crate::display;
use crate::error::{CliError, Result};
use matsci::core::data::materials::{find_material, materials};
use matsci::core::models::material::{CategoryFilter, Material};
use matsci::engine::environment::{EnvironmentParams, SimulationState};
use matsci::engine::materials::{MaterialsEvent, MaterialsState};
use tracing::{debug, info};

pub async fn run(args: MaterialsArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        MaterialsCommands::List { query, category } => {
            print!("{}", list(&query, category));
        }
        MaterialsCommands::Show { id } => {
            let material = find_material(&id).map_err(CliError::core)?;
            print!("{}", display::material_details(material));
        }
        MaterialsCommands::Compare { first, second } => {
            let (a, b) = compare(&first, &second)?;
            print!("{}", display::comparison(a, b));
        }
        MaterialsCommands::Simulate { id, environment } => {
            let material = find_material(&id).map_err(CliError::core)?;
            let params = environment_for(&environment, config.session.environment);
            info!(
                material = %material.name,
                temperature = params.temperature(),
                "Simulating environment"
            );
            let state = SimulationState {
                params,
                active: false,
            }
            .toggle();
            if let Some(props) = state.simulate(material) {
                print!("{}", display::simulation(material, &state.params, &props));
            }
        }
    }
    Ok(())
}

pub fn list(query: &str, category: CategoryFilter) -> String {
    let state = MaterialsState::default()
        .apply(MaterialsEvent::SetQuery(query.to_string()))
        .apply(MaterialsEvent::SetFilter(category));
    debug!(query, category = category.id(), "Listing materials");
    display::listing(&state.listing(materials()))
}

/// Runs the selection the way the screen does: pick A, enter comparison mode, pick B.
pub fn compare(first: &str, second: &str) -> Result<(&'static Material, &'static Material)> {
    let a = find_material(first).map_err(CliError::core)?;
    let b = find_material(second).map_err(CliError::core)?;
    let state = MaterialsState::default()
        .apply(MaterialsEvent::Select(a.id.clone()))
        .apply(MaterialsEvent::ToggleComparison)
        .apply(MaterialsEvent::Select(b.id.clone()));
    state.comparison_pair(materials()).ok_or_else(|| {
        CliError::Argument(format!(
            "Pick two different materials to compare (got '{}' twice)",
            a.name
        ))
    })
}

/// A preset replaces the configured conditions; explicit values then override it.
pub fn environment_for(args: &EnvironmentArgs, configured: EnvironmentParams) -> EnvironmentParams {
    let base = args.preset.map_or(configured, |preset| preset.params());
    with_overrides(base, args.temperature, args.pressure, args.humidity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matsci::core::models::material::MaterialCategory;
    use matsci::engine::environment::Preset;

    #[test]
    fn list_filters_by_category() {
        let text = list("", CategoryFilter::Only(MaterialCategory::Metal));
        assert!(text.contains("Aluminum 6061"));
        assert!(!text.contains("Carbon Fiber"));
    }

    #[test]
    fn list_reports_empty_results() {
        assert!(list("adamantium", CategoryFilter::All).starts_with("No materials found"));
    }

    #[test]
    fn compare_orders_pair_as_given() {
        let (a, b) = compare("silicon", "5").unwrap();
        assert_eq!(a.name, "Silicon");
        assert_eq!(b.id, "5");
    }

    #[test]
    fn comparing_a_material_with_itself_is_rejected() {
        assert!(matches!(compare("1", "Silicon"), Err(CliError::Argument(_))));
    }

    #[test]
    fn unknown_material_is_a_lookup_error() {
        assert!(matches!(compare("1", "mithril"), Err(CliError::Core(_))));
    }

    #[test]
    fn preset_then_overrides() {
        let args = EnvironmentArgs {
            preset: Some(Preset::Vacuum),
            temperature: Some(10.0),
            ..Default::default()
        };
        let params = environment_for(&args, EnvironmentParams::default());
        assert_eq!(params.temperature(), 77.0);
        assert_eq!(params.pressure(), 0.1);
    }

    #[test]
    fn no_flags_keep_configured_conditions() {
        let configured = Preset::HighTemperature.params();
        let params = environment_for(&EnvironmentArgs::default(), configured);
        assert_eq!(params, configured);
    }
}
