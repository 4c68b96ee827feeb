use clap::{Args, Parser, Subcommand};
use matsci::core::models::material::CategoryFilter;
use matsci::engine::calculator::AngleMode;
use matsci::engine::environment::Preset;
use matsci::engine::periodic::ColorMode;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "matsci",
    version,
    about = "Material Science Agent - browse materials and elements, run a scientific calculator, chat with the materials assistant and drive mock quantum calculations from the terminal.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file in TOML format. Defaults to the per-user config location.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S workflow.iterations=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a route (e.g. /materials) and print a summary of that screen.
    Open {
        /// Route path. Unknown paths open the default screen.
        #[arg(default_value = "/")]
        path: String,
    },
    /// Search, inspect, compare and simulate materials from the built-in database.
    Materials(MaterialsArgs),
    /// Browse the periodic table.
    Elements(ElementsArgs),
    /// Scientific calculator, function plotting and the formula library.
    Calc(CalcArgs),
    /// Talk to the materials assistant.
    Chat(ChatArgs),
    /// Inspect, run and upload Quantum ESPRESSO calculations.
    Workflow(WorkflowArgs),
    /// Show the dashboard clock and system gauges.
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug)]
pub struct MaterialsArgs {
    #[command(subcommand)]
    pub command: MaterialsCommands,
}

#[derive(Subcommand, Debug)]
pub enum MaterialsCommands {
    /// List materials matching a search query and category.
    List {
        /// Case-insensitive text matched against name and description.
        #[arg(long, default_value = "")]
        query: String,
        /// Category filter: all, metal, polymer, ceramic, composite or semiconductor.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Show the full record of one material.
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Compare two materials side by side.
    Compare {
        #[arg(value_name = "ID")]
        first: String,
        #[arg(value_name = "ID")]
        second: String,
    },
    /// Estimate how a material's properties change with its environment.
    Simulate {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        environment: EnvironmentArgs,
    },
}

/// Environment overrides, applied on top of a preset (or the configured defaults).
#[derive(Args, Debug, Clone, Default)]
pub struct EnvironmentArgs {
    /// Start from a preset: room, liquid-nitrogen, high-temperature or vacuum.
    #[arg(long)]
    pub preset: Option<Preset>,
    /// Temperature in kelvin (77-2000).
    #[arg(long, value_name = "K")]
    pub temperature: Option<f64>,
    /// Pressure in kPa (0.1-1000).
    #[arg(long, value_name = "KPA")]
    pub pressure: Option<f64>,
    /// Relative humidity in percent (0-100).
    #[arg(long, value_name = "PERCENT")]
    pub humidity: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ElementsArgs {
    #[command(subcommand)]
    pub command: ElementsCommands,
}

#[derive(Subcommand, Debug)]
pub enum ElementsCommands {
    /// Draw the periodic table grid.
    Table {
        /// Coloring: category, state or electronegativity.
        #[arg(long = "color-by", default_value = "category")]
        color_by: ColorMode,
        /// Highlight only elements whose name, symbol, number or category matches.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the details of one element.
    Show {
        /// Symbol, name or atomic number.
        #[arg(value_name = "SYMBOL|NUMBER")]
        key: String,
    },
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(subcommand)]
    pub command: CalcCommands,
}

#[derive(Subcommand, Debug)]
pub enum CalcCommands {
    /// Press calculator keys in order and print the resulting state.
    Keys {
        /// Keypad labels or numbers, e.g. `2 + 3 =` or `30 sin`.
        #[arg(required = true, value_name = "KEY", allow_hyphen_values = true)]
        keys: Vec<String>,
        /// Angle unit for trigonometric keys. Defaults to the configured mode.
        #[arg(long = "angle-mode")]
        angle_mode: Option<AngleMode>,
    },
    /// Plot y = f(x), or z = f(x, y) with --surface, to an SVG file.
    Plot {
        #[arg(value_name = "EXPR")]
        expression: String,
        #[arg(long)]
        surface: bool,
        #[arg(short, long, value_name = "FILE.svg")]
        output: PathBuf,
    },
    /// Search the formula library.
    Formulas {
        #[arg(long, default_value = "")]
        query: String,
        /// Formula category, e.g. "Quantum Mechanics". Defaults to all.
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Send this message. Can be repeated. Without any, read messages from stdin.
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,
}

#[derive(Args, Debug)]
pub struct WorkflowArgs {
    #[command(subcommand)]
    pub command: WorkflowCommands,
}

#[derive(Subcommand, Debug)]
pub enum WorkflowCommands {
    /// Run the mock calculation with a live progress bar. Ctrl-C cancels.
    Run(RunArgs),
    /// Summarise a Quantum ESPRESSO input file.
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Upload an input file through the upload endpoint.
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Upload endpoint URL. Overrides `upload.endpoint`.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
        /// Target repository. Overrides `upload.repository`.
        #[arg(long)]
        repository: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input deck to load and make active instead of the built-in scf.in.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Override `workflow.iterations`.
    #[arg(short = 'n', long, value_name = "INT")]
    pub iterations: Option<usize>,
    /// Override `workflow.tick-period-ms`.
    #[arg(long = "tick-ms", value_name = "MS")]
    pub tick_ms: Option<u64>,
    /// Monkhorst-Pack grid, e.g. 4x4x4.
    #[arg(long = "k-points", value_name = "KxKxK")]
    pub k_points: Option<String>,
    /// Save the calculation under this name when the run ends.
    #[arg(long)]
    pub name: Option<String>,
    /// Write the result and relaxation series to a CSV file.
    #[arg(long, value_name = "FILE.csv")]
    pub export: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Number of gauge refreshes to show before exiting. Runs until Ctrl-C if omitted.
    #[arg(long, value_name = "N")]
    pub ticks: Option<usize>,
}
