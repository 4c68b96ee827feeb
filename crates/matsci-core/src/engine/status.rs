use rand::Rng;
use std::fmt;
use std::time::Duration;

use super::scheduler::{ScheduledTask, TickOutcome, TickSchedule, Ticker};

pub const STATUS_REFRESH_PERIOD: Duration = Duration::from_secs(3);

const CPU_RANGE: (i32, i32) = (5, 95);
const MEMORY_RANGE: (i32, i32) = (10, 90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadLevel {
    Normal,
    Elevated,
    Critical,
}

impl LoadLevel {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            p if p > 80 => LoadLevel::Critical,
            p if p > 50 => LoadLevel::Elevated,
            _ => LoadLevel::Normal,
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadLevel::Normal => "normal",
            LoadLevel::Elevated => "elevated",
            LoadLevel::Critical => "critical",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauges {
    pub cpu: u8,
    pub memory: u8,
}

/// Decorative CPU/memory gauges for the dashboard, random-walked every refresh.
pub struct SystemMonitor<R: Rng> {
    rng: R,
    ticker: Ticker,
    gauges: Gauges,
}

fn walk<R: Rng>(rng: &mut R, value: u8, step: (i32, i32), bounds: (i32, i32)) -> u8 {
    let delta = rng.gen_range(step.0..=step.1);
    // bounds lie inside 0..=100, so the cast is lossless
    (i32::from(value) + delta).clamp(bounds.0, bounds.1) as u8
}

impl<R: Rng> SystemMonitor<R> {
    pub fn new(mut rng: R) -> Self {
        let gauges = Gauges {
            cpu: rng.gen_range(10..40),
            memory: rng.gen_range(20..60),
        };
        let mut ticker = Ticker::new(TickSchedule::unbounded(STATUS_REFRESH_PERIOD));
        ticker.start();
        Self { rng, ticker, gauges }
    }

    pub fn gauges(&self) -> Gauges {
        self.gauges
    }

    pub fn tick_count(&self) -> usize {
        self.ticker.tick_count()
    }
}

impl<R: Rng> ScheduledTask for SystemMonitor<R> {
    fn schedule(&self) -> TickSchedule {
        self.ticker.schedule()
    }

    fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    fn tick(&mut self) -> TickOutcome {
        let outcome = self.ticker.tick();
        if let TickOutcome::Fired { .. } = outcome {
            self.gauges.cpu = walk(&mut self.rng, self.gauges.cpu, (-5, 4), CPU_RANGE);
            self.gauges.memory = walk(&mut self.rng, self.gauges.memory, (-4, 3), MEMORY_RANGE);
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

    #[test]
    fn initial_gauges_start_in_their_seed_ranges() {
        for seed in 0..50 {
            let m = SystemMonitor::new(StdRng::seed_from_u64(seed));
            let g = m.gauges();
            assert!((10..40).contains(&g.cpu));
            assert!((20..60).contains(&g.memory));
        }
    }

    #[test]
    fn gauges_stay_clamped_over_long_walks() {
        let mut m = SystemMonitor::new(StdRng::seed_from_u64(99));
        let mut previous = m.gauges();
        for _ in 0..2_000 {
            m.tick();
            let g = m.gauges();
            assert!((5..=95).contains(&g.cpu));
            assert!((10..=90).contains(&g.memory));
            let dc = i32::from(g.cpu) - i32::from(previous.cpu);
            let dm = i32::from(g.memory) - i32::from(previous.memory);
            assert!((-5..=4).contains(&dc));
            assert!((-4..=3).contains(&dm));
            previous = g;
        }
        assert_eq!(m.tick_count(), 2_000);
    }

    #[test]
    fn cancelled_monitor_freezes() {
        let mut m = SystemMonitor::new(StdRng::seed_from_u64(3));
        assert!(m.cancel());
        let before = m.gauges();
        assert_eq!(m.tick(), TickOutcome::Inactive);
        assert_eq!(m.gauges(), before);
    }

    #[test]
    fn load_levels_use_exclusive_thresholds() {
        assert_eq!(LoadLevel::from_percent(50), LoadLevel::Normal);
        assert_eq!(LoadLevel::from_percent(51), LoadLevel::Elevated);
        assert_eq!(LoadLevel::from_percent(80), LoadLevel::Elevated);
        assert_eq!(LoadLevel::from_percent(81), LoadLevel::Critical);
    }
}
