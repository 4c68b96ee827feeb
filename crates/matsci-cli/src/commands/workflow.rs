use crate::cli::{RunArgs, WorkflowArgs, WorkflowCommands};
use crate::commands::{entropy_rng, shutdown_signal};
use crate::config::AppConfig;
use crate::display;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use anyhow::Context;
use matsci::core::io::export::write_series;
use matsci::core::io::files::InputFile;
use matsci::core::io::qe::QeInput;
use matsci::engine::config::{SimulationParamsBuilder, WorkflowConfig, WorkflowConfigBuilder};
use matsci::engine::progress::ProgressReporter;
use matsci::engine::scheduler::ScheduledTask;
use matsci::engine::upload::{UPLOAD_FAILED, UploadEvent, UploadRequest, UploadStatus};
use matsci::workflows::quantum::{ComputationEvent, ComputationState, RunOutcome, SAVE_SUCCEEDED};
use rand::Rng;
use reqwest::Url;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, warn};

pub async fn run(args: WorkflowArgs, config: &AppConfig, quiet: bool) -> Result<()> {
    match args.command {
        WorkflowCommands::Run(run_args) => handle_run(run_args, config, quiet).await,
        WorkflowCommands::Inspect { file } => {
            print!("{}", inspect(&file)?);
            println!();
            Ok(())
        }
        WorkflowCommands::Upload {
            file,
            endpoint,
            repository,
        } => {
            let endpoint = endpoint.unwrap_or_else(|| config.upload.endpoint.clone());
            let repository = repository.unwrap_or_else(|| config.upload.repository.clone());
            handle_upload(&file, &endpoint, &repository).await
        }
    }
}

pub fn inspect(path: &Path) -> Result<String> {
    let file = InputFile::load(path).map_err(CliError::core)?;
    let input = QeInput::parse(&file.content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(format!("{}\n{}", file.name, input.summary()))
}

/// CLI flags win over the configured timing.
fn workflow_config(args: &RunArgs, configured: WorkflowConfig) -> Result<WorkflowConfig> {
    WorkflowConfigBuilder::new()
        .iterations(args.iterations.unwrap_or(configured.iterations))
        .tick_period(
            args.tick_ms
                .map(Duration::from_millis)
                .unwrap_or(configured.tick_period),
        )
        .build()
        .map_err(CliError::core)
}

/// Builds the computation screen the run starts from.
pub fn prepare<R: Rng>(args: &RunArgs, workflow: &WorkflowConfig, rng: R) -> Result<ComputationState<R>> {
    let mut state = ComputationState::new(workflow, rng);

    if let Some(path) = &args.input {
        let file = InputFile::load(path).map_err(CliError::core)?;
        let name = file.name.clone();
        info!("Loaded input file {:?}", path);
        state = state
            .apply(ComputationEvent::AddFile(file))
            .apply(ComputationEvent::SelectFile(name));
    }

    if let Some(grid) = &args.k_points {
        let k_points =
            parser::parse_k_points(grid).map_err(|e| CliError::Argument(e.to_string()))?;
        let params = SimulationParamsBuilder::from_defaults()
            .k_points(k_points)
            .build()
            .map_err(CliError::core)?;
        state = state.apply(ComputationEvent::SetParams(params));
    }

    if let Some(name) = &args.name {
        state = state.apply(ComputationEvent::SetName(name.clone()));
    }
    Ok(state)
}

/// Ticks the calculation on a tokio interval until it completes or `shutdown` resolves.
///
/// The first tick lands one period after the start, like a browser interval.
pub async fn drive<R: Rng>(
    state: &mut ComputationState<R>,
    reporter: &ProgressReporter<'_>,
    shutdown: impl Future<Output = ()>,
) -> RunOutcome {
    state.begin(reporter);
    let period = state.calculation().schedule().period;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                warn!("Interrupted; cancelling the calculation.");
                return state.cancel(reporter);
            }
            _ = ticker.tick() => {
                if let Some(outcome) = state.advance(reporter) {
                    return outcome;
                }
            }
        }
    }
}

async fn handle_run(args: RunArgs, config: &AppConfig, quiet: bool) -> Result<()> {
    let workflow = workflow_config(&args, config.session.workflow)?;
    let mut state = prepare(&args, &workflow, entropy_rng())?;

    match state.inspect_active() {
        Ok(summary) => println!("{}\n{}\n", state.workspace().active().name, summary),
        Err(e) => warn!("Could not summarise the active input: {}", e),
    }

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Starting calculation: {} iterations, one every {} ms (Ctrl-C to cancel)...",
        workflow.iterations,
        workflow.tick_period.as_millis()
    );
    let outcome = drive(&mut state, &reporter, shutdown_signal()).await;

    let calculation = state.calculation();
    print!(
        "\n{}",
        display::results_table(calculation.results(), calculation.relaxation_steps())
    );
    match outcome {
        RunOutcome::Completed { steps } => println!("✓ Calculation complete after {steps} iterations."),
        RunOutcome::Cancelled { steps } => println!("✗ Calculation cancelled after {steps} iterations."),
    }

    if args.name.is_some() {
        let saved = state.save()?;
        println!("{SAVE_SUCCEEDED} ({}: {})", saved.name, saved.file.name);
    }

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)?;
        let rows = write_series(file, calculation.results(), calculation.relaxation_steps())
            .with_context(|| format!("Failed to write CSV export to {:?}", path))?;
        println!("✓ Exported {rows} rows to {}", path.display());
    }
    Ok(())
}

/// POSTs the upload request as JSON. Any non-success status counts as a failure.
pub async fn upload(client: &reqwest::Client, url: Url, request: &UploadRequest) -> Result<()> {
    info!(file = %request.file_name, repo = %request.repo, "Uploading input file");
    let response = client.post(url).json(request).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(%status, %body, "Upload rejected");
        return Err(CliError::Other(anyhow::anyhow!("{UPLOAD_FAILED} (HTTP {status})")));
    }
    Ok(())
}

async fn handle_upload(path: &Path, endpoint: &str, repository: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| {
        CliError::Config(format!(
            "Upload endpoint '{endpoint}' is not an absolute URL ({e}). Set upload.endpoint or pass --endpoint."
        ))
    })?;
    let file = InputFile::load(path).map_err(CliError::core)?;
    let request = UploadRequest::new(file.name, file.content).with_repository(repository);

    let (status, result) = tracked_upload(&reqwest::Client::new(), url, &request, |status| {
        println!("{status}")
    })
    .await;
    debug!(?status, "Upload finished");
    result
}

/// Runs [`upload`] through the status reducer. A failure keeps the underlying error text.
pub async fn tracked_upload(
    client: &reqwest::Client,
    url: Url,
    request: &UploadRequest,
    mut on_status: impl FnMut(&UploadStatus),
) -> (UploadStatus, Result<()>) {
    let status = UploadStatus::default().apply(UploadEvent::Start);
    on_status(&status);
    let result = upload(client, url, request).await;
    let status = status.apply(match &result {
        Ok(()) => UploadEvent::Succeeded,
        Err(e) => UploadEvent::Failed(e.to_string()),
    });
    on_status(&status);
    (status, result)
}
