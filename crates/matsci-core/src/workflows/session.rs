use crate::engine::calculator::{AngleMode, CalculatorState};
use crate::engine::chat::ChatSession;
use crate::engine::config::WorkflowConfig;
use crate::engine::environment::{EnvironmentParams, SimulationState};
use crate::engine::materials::MaterialsState;
use crate::engine::periodic::PeriodicTableState;
use crate::engine::router::Route;
use crate::engine::scheduler::ScheduledTask;
use crate::engine::status::SystemMonitor;
use crate::workflows::quantum::ComputationState;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Settings a fresh screen is created with.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub workflow: WorkflowConfig,
    pub angle_mode: AngleMode,
    pub environment: EnvironmentParams,
}

/// The state of whichever screen is showing. Each variant is created fresh on navigation.
pub enum Screen<R: Rng> {
    Dashboard(SystemMonitor<R>),
    Materials {
        catalog: MaterialsState,
        simulation: SimulationState,
    },
    PeriodicTable(PeriodicTableState),
    Calculator(CalculatorState),
    Chatbot(ChatSession),
    Computation(Box<ComputationState<R>>),
}

impl<R: Rng> Screen<R> {
    pub fn route(&self) -> Route {
        match self {
            Screen::Dashboard(_) => Route::Dashboard,
            Screen::Materials { .. } => Route::Materials,
            Screen::PeriodicTable(_) => Route::PeriodicTable,
            Screen::Calculator(_) => Route::Calculator,
            Screen::Chatbot(_) => Route::Chatbot,
            Screen::Computation(_) => Route::Computation,
        }
    }

    /// The timer-driven task this screen owns, if any.
    pub fn task_mut(&mut self) -> Option<&mut dyn ScheduledTask> {
        match self {
            Screen::Dashboard(monitor) => Some(monitor),
            Screen::Computation(state) => Some(state.calculation_mut()),
            _ => None,
        }
    }
}

/// Owns the current route and its screen state.
///
/// Navigating tears the old screen down (cancelling its timer) and builds the new one
/// from scratch, so nothing survives a round trip between screens.
pub struct Session<R: Rng + SeedableRng> {
    config: SessionConfig,
    seeds: R,
    screen: Screen<R>,
}

impl<R: Rng + SeedableRng> Session<R> {
    /// Opens the default screen.
    pub fn new(config: SessionConfig, mut seeds: R) -> Self {
        let screen = build_screen(Route::DEFAULT, &config, &mut seeds);
        Self {
            config,
            seeds,
            screen,
        }
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn screen(&self) -> &Screen<R> {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen<R> {
        &mut self.screen
    }

    /// Resolves `path` and switches to that screen. Unknown paths land on the default.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = Route::resolve(path);
        let from = self.screen.route();
        if let Some(task) = self.screen.task_mut() {
            if task.cancel() {
                debug!(%from, "Cancelled screen timer on navigation");
            }
        }
        self.screen = build_screen(route, &self.config, &mut self.seeds);
        info!(%route, "Navigated");
        route
    }
}

fn build_screen<R: Rng + SeedableRng>(
    route: Route,
    config: &SessionConfig,
    seeds: &mut R,
) -> Screen<R> {
    let mut fresh = || R::seed_from_u64(seeds.next_u64());
    match route {
        Route::Dashboard => Screen::Dashboard(SystemMonitor::new(fresh())),
        Route::Materials => Screen::Materials {
            catalog: MaterialsState::default(),
            simulation: SimulationState {
                params: config.environment,
                active: false,
            },
        },
        Route::PeriodicTable => Screen::PeriodicTable(PeriodicTableState::default()),
        Route::Calculator => Screen::Calculator(CalculatorState::new(config.angle_mode)),
        Route::Chatbot => Screen::Chatbot(ChatSession::new()),
        Route::Computation => {
            Screen::Computation(Box::new(ComputationState::new(&config.workflow, fresh())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::chat::ChatEvent;
    use crate::engine::scheduler::TickerState;
    use crate::engine::progress::ProgressReporter;
    use rand::rngs::StdRng;

    fn session() -> Session<StdRng> {
        Session::new(SessionConfig::default(), StdRng::seed_from_u64(11))
    }

    #[test]
    fn starts_on_the_computation_screen() {
        let s = session();
        assert_eq!(s.route(), Route::Computation);
        assert!(matches!(s.screen(), Screen::Computation(_)));
    }

    #[test]
    fn unknown_paths_fall_back_to_default() {
        let mut s = session();
        s.navigate("/chatbot");
        assert_eq!(s.navigate("/nowhere"), Route::Computation);
        assert_eq!(s.navigate("/"), Route::Computation);
    }

    #[test]
    fn navigation_discards_the_running_calculation() {
        let mut s = session();
        if let Screen::Computation(state) = s.screen_mut() {
            let reporter = ProgressReporter::new();
            state.begin(&reporter);
            state.advance(&reporter);
        }
        assert!(s.screen_mut().task_mut().unwrap().is_running());

        s.navigate("/calculator");
        s.navigate("/computation");
        let Screen::Computation(state) = s.screen() else {
            panic!("expected computation screen");
        };
        assert!(state.calculation().results().is_empty());
        assert_eq!(state.calculation().state(), TickerState::Idle);
    }

    #[test]
    fn chat_history_does_not_survive_a_round_trip() {
        let mut s = session();
        s.navigate("/chatbot");
        if let Screen::Chatbot(chat) = s.screen_mut() {
            let sent = std::mem::take(chat).apply(ChatEvent::Send("steel".into()));
            *chat = sent;
        }
        s.navigate("/materials");
        s.navigate("/chatbot");
        let Screen::Chatbot(chat) = s.screen() else {
            panic!("expected chat screen");
        };
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn screens_without_timers_expose_no_task() {
        let mut s = session();
        for path in ["/materials", "/periodic-table", "/calculator", "/chatbot"] {
            s.navigate(path);
            assert!(s.screen_mut().task_mut().is_none(), "{path}");
        }
        s.navigate("/dashboard");
        assert!(s.screen_mut().task_mut().unwrap().is_running());
    }

    #[test]
    fn calculator_uses_configured_angle_mode() {
        let config = SessionConfig {
            angle_mode: AngleMode::Rad,
            ..Default::default()
        };
        let mut s = Session::new(config, StdRng::seed_from_u64(1));
        s.navigate("/calculator");
        let Screen::Calculator(calc) = s.screen() else {
            panic!("expected calculator");
        };
        assert_eq!(calc.angle_mode(), AngleMode::Rad);
    }
}
