use crate::core::io::files::{FileWorkspace, InputFile};
use crate::core::io::qe::{QeInput, QeParseError, QeSummary};
use crate::engine::calculation::MockCalculation;
use crate::engine::config::{ConfigError, SimulationParams, WorkflowConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scheduler::{ScheduledTask, TickOutcome, TickerState};
use crate::engine::upload::{UploadEvent, UploadRequest, UploadStatus};
use rand::Rng;
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const CALCULATION_PHASE: &str = "SCF Calculation";
pub const SAVE_SUCCEEDED: &str = "Calculation saved successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { steps: usize },
    /// Stopped early; the rows produced so far are kept.
    Cancelled { steps: usize },
}

impl RunOutcome {
    pub fn steps(&self) -> usize {
        match self {
            RunOutcome::Completed { steps } | RunOutcome::Cancelled { steps } => *steps,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedCalculation {
    pub name: String,
    pub file: InputFile,
    pub params: SimulationParams,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComputationEvent {
    SelectFile(String),
    EditActive(String),
    AddFile(InputFile),
    SetName(String),
    SetParams(SimulationParams),
    Start,
    Tick,
    Cancel,
    Upload(UploadEvent),
}

/// State of the computation screen: the input editor, the simulation parameters, the
/// mock calculation and the upload status.
pub struct ComputationState<R: Rng> {
    workspace: FileWorkspace,
    params: SimulationParams,
    calculation: MockCalculation<R>,
    name: String,
    upload: UploadStatus,
}

impl<R: Rng> ComputationState<R> {
    pub fn new(config: &WorkflowConfig, rng: R) -> Self {
        Self {
            workspace: FileWorkspace::default(),
            params: SimulationParams::default(),
            calculation: MockCalculation::new(config, rng),
            name: String::new(),
            upload: UploadStatus::default(),
        }
    }

    pub fn workspace(&self) -> &FileWorkspace {
        &self.workspace
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn calculation(&self) -> &MockCalculation<R> {
        &self.calculation
    }

    pub fn calculation_mut(&mut self) -> &mut MockCalculation<R> {
        &mut self.calculation
    }

    pub fn calculation_name(&self) -> &str {
        &self.name
    }

    pub fn upload_status(&self) -> &UploadStatus {
        &self.upload
    }

    /// Selecting a file that is not open leaves the editor unchanged.
    pub fn apply(mut self, event: ComputationEvent) -> Self {
        match event {
            ComputationEvent::SelectFile(name) => {
                if let Err(e) = self.workspace.set_active(&name) {
                    warn!("{e}");
                }
            }
            ComputationEvent::EditActive(content) => self.workspace.edit_active(content),
            ComputationEvent::AddFile(file) => self.workspace.add(file),
            ComputationEvent::SetName(name) => self.name = name,
            ComputationEvent::SetParams(params) => self.params = params,
            ComputationEvent::Start => self.calculation.start(),
            ComputationEvent::Tick => {
                self.calculation.tick();
            }
            ComputationEvent::Cancel => {
                self.calculation.cancel();
            }
            ComputationEvent::Upload(event) => self.upload = self.upload.apply(event),
        }
        self
    }

    /// Summary of the file currently in the editor.
    pub fn inspect_active(&self) -> Result<QeSummary, QeParseError> {
        QeInput::parse(&self.workspace.active().content).map(|input| input.summary())
    }

    /// Snapshot of the active file under the calculation name. The name must not be blank.
    pub fn save(&self) -> Result<SavedCalculation, EngineError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigError::MissingParameter("calculation name").into());
        }
        info!(name, file = %self.workspace.active().name, "Calculation saved");
        Ok(SavedCalculation {
            name: name.to_string(),
            file: self.workspace.active().clone(),
            params: self.params.clone(),
        })
    }

    pub fn upload_request(&self) -> UploadRequest {
        let file = self.workspace.active();
        UploadRequest::new(file.name.clone(), file.content.clone())
    }

    /// Starts (or restarts) the calculation and opens its progress phase.
    pub fn begin(&mut self, reporter: &ProgressReporter) {
        self.calculation.start();
        reporter.report(Progress::PhaseStart {
            name: CALCULATION_PHASE,
        });
        let total = self.calculation.schedule().limit.unwrap_or(0) as u64;
        reporter.report(Progress::TaskStart { total_steps: total });
        if let Ok(summary) = self.inspect_active() {
            reporter.message(format!(
                "Input: {} calculation, {} atom(s)",
                summary.calculation, summary.atom_count
            ));
        }
    }

    /// Advances one tick. Returns the outcome once the schedule runs out.
    pub fn advance(&mut self, reporter: &ProgressReporter) -> Option<RunOutcome> {
        match self.calculation.tick() {
            TickOutcome::Fired { last, .. } => {
                reporter.report(Progress::TaskIncrement);
                if last {
                    Some(self.finish(reporter))
                } else {
                    None
                }
            }
            TickOutcome::Inactive => match self.calculation.state() {
                TickerState::Completed => Some(RunOutcome::Completed {
                    steps: self.calculation.results().len(),
                }),
                _ => Some(RunOutcome::Cancelled {
                    steps: self.calculation.results().len(),
                }),
            },
        }
    }

    pub fn cancel(&mut self, reporter: &ProgressReporter) -> RunOutcome {
        self.calculation.cancel();
        let steps = self.calculation.results().len();
        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        info!(steps, "Calculation cancelled");
        RunOutcome::Cancelled { steps }
    }

    fn finish(&self, reporter: &ProgressReporter) -> RunOutcome {
        let steps = self.calculation.results().len();
        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        if let Some((result, _)) = self.calculation.latest() {
            reporter.message(format!("Final total energy: {:.6} Ry", result.total_energy));
        }
        info!(steps, "Calculation complete");
        RunOutcome::Completed { steps }
    }
}

/// Runs the calculation to the end of its schedule on the caller's thread.
///
/// `pause` is called with the tick period before every tick; returning
/// `ControlFlow::Break` cancels the run.
#[instrument(skip_all, name = "quantum_workflow")]
pub fn run<R: Rng>(
    state: &mut ComputationState<R>,
    reporter: &ProgressReporter,
    mut pause: impl FnMut(Duration) -> ControlFlow<()>,
) -> RunOutcome {
    state.begin(reporter);
    let period = state.calculation.schedule().period;
    loop {
        if pause(period).is_break() {
            return state.cancel(reporter);
        }
        if let Some(outcome) = state.advance(reporter) {
            return outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::WorkflowConfigBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::{Arc, Mutex};

    fn state() -> ComputationState<StdRng> {
        ComputationState::new(&WorkflowConfig::default(), StdRng::seed_from_u64(3))
    }

    fn recording() -> (Arc<Mutex<Vec<Progress>>>, ProgressReporter<'static>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter =
            ProgressReporter::with_callback(Box::new(move |e| sink.lock().unwrap().push(e)));
        (events, reporter)
    }

    #[test]
    fn run_completes_after_twenty_ticks() {
        let mut s = state();
        let (events, reporter) = recording();
        let mut pauses = 0;
        let outcome = run(&mut s, &reporter, |period| {
            assert_eq!(period, Duration::from_secs(1));
            pauses += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(outcome, RunOutcome::Completed { steps: 20 });
        assert_eq!(pauses, 20);
        assert_eq!(s.calculation().results().len(), 20);
        assert!(!s.calculation().is_running());

        let events = events.lock().unwrap();
        assert_eq!(events[0], Progress::PhaseStart { name: CALCULATION_PHASE });
        assert_eq!(events[1], Progress::TaskStart { total_steps: 20 });
        let increments = events
            .iter()
            .filter(|e| **e == Progress::TaskIncrement)
            .count();
        assert_eq!(increments, 20);
        assert!(events.contains(&Progress::PhaseFinish));
    }

    #[test]
    fn break_cancels_and_keeps_rows() {
        let config = WorkflowConfigBuilder::new()
            .iterations(10)
            .tick_period(Duration::from_millis(5))
            .build()
            .unwrap();
        let mut s = ComputationState::new(&config, StdRng::seed_from_u64(1));
        let mut remaining = 4;
        let outcome = run(&mut s, &ProgressReporter::new(), |_| {
            if remaining == 0 {
                ControlFlow::Break(())
            } else {
                remaining -= 1;
                ControlFlow::Continue(())
            }
        });
        assert_eq!(outcome, RunOutcome::Cancelled { steps: 4 });
        assert_eq!(s.calculation().state(), TickerState::Cancelled);
        assert_eq!(s.calculation().results().len(), 4);
    }

    #[test]
    fn save_requires_a_name() {
        let s = state();
        assert!(matches!(
            s.save(),
            Err(EngineError::Config(ConfigError::MissingParameter(_)))
        ));
        let s = s.apply(ComputationEvent::SetName("   ".into()));
        assert!(s.save().is_err());
        let s = s.apply(ComputationEvent::SetName(" si-bulk ".into()));
        let saved = s.save().unwrap();
        assert_eq!(saved.name, "si-bulk");
        assert_eq!(saved.file.name, "scf.in");
    }

    #[test]
    fn editor_events_target_the_active_file() {
        let s = state()
            .apply(ComputationEvent::SelectFile("relax.in".into()))
            .apply(ComputationEvent::EditActive("&CONTROL\n  calculation = 'relax'\n/\n".into()))
            .apply(ComputationEvent::SelectFile("missing.in".into()));
        assert_eq!(s.workspace().active().name, "relax.in");
        assert_eq!(s.inspect_active().unwrap().calculation, "relax");
        assert_eq!(s.upload_request().file_name, "relax.in");
    }

    #[test]
    fn added_files_can_become_active() {
        let s = state()
            .apply(ComputationEvent::AddFile(InputFile::new("custom.in", "&SYSTEM\n ecutwfc = 30\n/\n")))
            .apply(ComputationEvent::SelectFile("custom.in".into()));
        assert_eq!(s.workspace().files().len(), 5);
        assert_eq!(s.inspect_active().unwrap().ecutwfc, Some(30.0));
    }

    #[test]
    fn reducer_drives_calculation_and_upload() {
        let mut s = state().apply(ComputationEvent::Start);
        for _ in 0..3 {
            s = s.apply(ComputationEvent::Tick);
        }
        s = s.apply(ComputationEvent::Cancel);
        assert_eq!(s.calculation().results().len(), 3);
        assert_eq!(s.calculation().state(), TickerState::Cancelled);

        let s = s
            .apply(ComputationEvent::Upload(UploadEvent::Start))
            .apply(ComputationEvent::Upload(UploadEvent::Succeeded));
        assert_eq!(s.upload_status(), &UploadStatus::Success);
    }

    #[test]
    fn advancing_a_finished_run_reports_completion() {
        let mut s = state();
        run(&mut s, &ProgressReporter::new(), |_| ControlFlow::Continue(()));
        assert_eq!(
            s.advance(&ProgressReporter::new()),
            Some(RunOutcome::Completed { steps: 20 })
        );
    }
}
