use rand::Rng;
use tracing::debug;

use super::config::WorkflowConfig;
use super::scheduler::{ScheduledTask, TickOutcome, TickSchedule, Ticker, TickerState};
use crate::core::models::calculation::{CalculationResult, RelaxationStep};

/// Decay of the convergence series for a zero-based step: `exp(-step / 3)`.
pub fn convergence_envelope(step: usize) -> f64 {
    (-(step as f64) / 3.0).exp()
}

fn force_envelope(step: usize) -> f64 {
    (-(step as f64) / 4.0).exp()
}

pub fn generate_result<R: Rng + ?Sized>(step: usize, rng: &mut R) -> CalculationResult {
    CalculationResult {
        step: step + 1,
        total_energy: -100.0 - rng.gen_range(0.0..5.0),
        kinetic_energy: 50.0 + rng.gen_range(0.0..2.0),
        convergence: convergence_envelope(step),
        forces: [
            rng.gen_range(0.0..0.1),
            rng.gen_range(0.0..0.1),
            rng.gen_range(0.0..0.1),
        ],
    }
}

pub fn generate_relaxation<R: Rng + ?Sized>(step: usize, rng: &mut R) -> RelaxationStep {
    RelaxationStep {
        step: step + 1,
        energy: -100.0 - rng.gen_range(0.0..2.0),
        max_force: 0.5 * force_envelope(step),
        avg_force: 0.3 * force_envelope(step),
    }
}

/// The placeholder SCF/relaxation run: one row of each series per tick.
///
/// Nothing is computed. The rows are drawn from `rng` so they look plausible on a
/// chart, and the run ends after the configured number of ticks.
pub struct MockCalculation<R: Rng> {
    rng: R,
    ticker: Ticker,
    results: Vec<CalculationResult>,
    relaxation: Vec<RelaxationStep>,
}

impl<R: Rng> MockCalculation<R> {
    pub fn new(config: &WorkflowConfig, rng: R) -> Self {
        Self {
            rng,
            ticker: Ticker::new(TickSchedule::finite(config.tick_period, config.iterations)),
            results: Vec::with_capacity(config.iterations),
            relaxation: Vec::with_capacity(config.iterations),
        }
    }

    /// Clears both series and starts ticking from step 1.
    pub fn start(&mut self) {
        self.results.clear();
        self.relaxation.clear();
        self.ticker.start();
        debug!(limit = ?self.ticker.schedule().limit, "Mock calculation started");
    }

    pub fn state(&self) -> TickerState {
        self.ticker.state()
    }

    pub fn results(&self) -> &[CalculationResult] {
        &self.results
    }

    pub fn relaxation_steps(&self) -> &[RelaxationStep] {
        &self.relaxation
    }

    pub fn latest(&self) -> Option<(&CalculationResult, &RelaxationStep)> {
        self.results.last().zip(self.relaxation.last())
    }
}

impl<R: Rng> ScheduledTask for MockCalculation<R> {
    fn schedule(&self) -> TickSchedule {
        self.ticker.schedule()
    }

    fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    fn tick(&mut self) -> TickOutcome {
        let outcome = self.ticker.tick();
        if let TickOutcome::Fired { index, .. } = outcome {
            self.results.push(generate_result(index, &mut self.rng));
            self.relaxation
                .push(generate_relaxation(index, &mut self.rng));
        }
        outcome
    }

    fn cancel(&mut self) -> bool {
        self.ticker.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn calculation() -> MockCalculation<StdRng> {
        MockCalculation::new(&WorkflowConfig::default(), StdRng::seed_from_u64(7))
    }

    fn run_to_end<R: Rng>(calc: &mut MockCalculation<R>) -> usize {
        let mut ticks = 0;
        while calc.is_running() {
            calc.tick();
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn started_calculation_produces_exactly_twenty_rows() {
        let mut calc = calculation();
        calc.start();
        assert_eq!(run_to_end(&mut calc), 20);
        assert_eq!(calc.results().len(), 20);
        assert_eq!(calc.relaxation_steps().len(), 20);
        assert_eq!(calc.state(), TickerState::Completed);
        assert_eq!(calc.tick(), TickOutcome::Inactive);
        assert_eq!(calc.results().len(), 20);
    }

    #[test]
    fn convergence_envelope_is_strictly_decreasing() {
        let mut calc = calculation();
        calc.start();
        run_to_end(&mut calc);
        let conv: Vec<f64> = calc.results().iter().map(|r| r.convergence).collect();
        assert_eq!(conv[0], 1.0);
        assert!(conv.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn rows_are_well_formed_and_within_ranges() {
        let mut calc = calculation();
        calc.start();
        run_to_end(&mut calc);
        for (i, (r, s)) in calc
            .results()
            .iter()
            .zip(calc.relaxation_steps())
            .enumerate()
        {
            assert_eq!(r.step, i + 1);
            assert_eq!(s.step, i + 1);
            assert!(r.total_energy <= -100.0 && r.total_energy > -105.0);
            assert!(r.kinetic_energy >= 50.0 && r.kinetic_energy < 52.0);
            assert!(r.forces.iter().all(|f| (0.0..0.1).contains(f)));
            assert!(s.energy <= -100.0 && s.energy > -102.0);
            assert!((s.max_force / s.avg_force - 0.5 / 0.3).abs() < 1e-12);
            assert!(r.total_energy.is_finite() && s.max_force.is_finite());
        }
    }

    #[test]
    fn restart_discards_previous_series() {
        let mut calc = calculation();
        calc.start();
        for _ in 0..5 {
            calc.tick();
        }
        calc.start();
        assert!(calc.results().is_empty());
        calc.tick();
        assert_eq!(calc.results()[0].step, 1);
    }

    #[test]
    fn cancellation_keeps_rows_produced_so_far() {
        let mut calc = calculation();
        calc.start();
        for _ in 0..4 {
            calc.tick();
        }
        assert!(calc.cancel());
        assert_eq!(calc.state(), TickerState::Cancelled);
        assert_eq!(calc.results().len(), 4);
        assert_eq!(calc.tick(), TickOutcome::Inactive);
    }

    #[test]
    fn same_seed_gives_same_series() {
        let config = WorkflowConfig {
            iterations: 3,
            tick_period: Duration::from_millis(1),
        };
        let mut a = MockCalculation::new(&config, StdRng::seed_from_u64(1));
        let mut b = MockCalculation::new(&config, StdRng::seed_from_u64(1));
        a.start();
        b.start();
        run_to_end(&mut a);
        run_to_end(&mut b);
        assert_eq!(a.results(), b.results());
        assert_eq!(a.latest().unwrap().0.step, 3);
    }
}
