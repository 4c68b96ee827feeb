mod cli;
mod commands;
mod config;
mod display;
mod error;
mod logging;
mod render;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!(
        "🚀 Material Science Agent CLI v{} starting up.",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::load_app_config(cli.config.as_deref(), &cli.set_values)?;
    debug!("Resolved configuration: {:?}", config);

    let command_result = match cli.command {
        Commands::Open { path } => {
            info!("Dispatching to 'open' command.");
            commands::open::run(&path, &config).await
        }
        Commands::Materials(args) => {
            info!("Dispatching to 'materials' command.");
            commands::materials::run(args, &config).await
        }
        Commands::Elements(args) => {
            info!("Dispatching to 'elements' command.");
            commands::elements::run(args).await
        }
        Commands::Calc(args) => {
            info!("Dispatching to 'calc' command.");
            commands::calc::run(args, &config).await
        }
        Commands::Chat(args) => {
            info!("Dispatching to 'chat' command.");
            commands::chat::run(args).await
        }
        Commands::Workflow(args) => {
            info!("Dispatching to 'workflow' command.");
            commands::workflow::run(args, &config, cli.quiet).await
        }
        Commands::Dashboard(args) => {
            info!("Dispatching to 'dashboard' command.");
            commands::dashboard::run(args).await
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            if !cli.quiet {
                println!("✅ Command completed successfully.");
            }
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
            eprintln!("❌ Command failed: {}", e);
        }
    }

    command_result
}
