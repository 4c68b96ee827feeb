//! Cancellable, tick-counted timers.
//!
//! Screens that refresh on a timer own a [`Ticker`]. The ticker never sleeps: a front
//! end reads the [`TickSchedule`] to decide how often to call [`Ticker::tick`], and
//! calls [`Ticker::stop`] when the screen is torn down. Tests drive it directly.

use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub period: Duration,
    /// Number of ticks before the ticker completes on its own; `None` runs until stopped.
    pub limit: Option<usize>,
}

impl TickSchedule {
    pub fn finite(period: Duration, ticks: usize) -> Self {
        Self {
            period,
            limit: Some(ticks),
        }
    }

    pub fn unbounded(period: Duration) -> Self {
        Self {
            period,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Idle,
    Running,
    /// Every scheduled tick fired.
    Completed,
    /// Stopped before the schedule ran out.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick `index` (zero-based) fired. `last` is set when it exhausted the schedule.
    Fired { index: usize, last: bool },
    /// The ticker was not running, so nothing happened.
    Inactive,
}

#[derive(Debug, Clone)]
pub struct Ticker {
    schedule: TickSchedule,
    state: TickerState,
    ticks: usize,
}

impl Ticker {
    pub fn new(schedule: TickSchedule) -> Self {
        Self {
            schedule,
            state: TickerState::Idle,
            ticks: 0,
        }
    }

    pub fn schedule(&self) -> TickSchedule {
        self.schedule
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    pub fn tick_count(&self) -> usize {
        self.ticks
    }

    /// (Re)starts from zero ticks, whatever the current state.
    pub fn start(&mut self) {
        self.ticks = 0;
        self.state = match self.schedule.limit {
            Some(0) => TickerState::Completed,
            _ => TickerState::Running,
        };
    }

    /// Cancels a running ticker. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        if self.is_running() {
            trace!(ticks = self.ticks, "Ticker cancelled");
            self.state = TickerState::Cancelled;
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Inactive;
        }
        let index = self.ticks;
        self.ticks += 1;
        let last = self.schedule.limit.is_some_and(|limit| self.ticks >= limit);
        if last {
            trace!(ticks = self.ticks, "Ticker completed");
            self.state = TickerState::Completed;
        }
        TickOutcome::Fired { index, last }
    }
}

/// A screen-owned task advanced by an external clock.
pub trait ScheduledTask {
    fn schedule(&self) -> TickSchedule;
    fn is_running(&self) -> bool;
    fn tick(&mut self) -> TickOutcome;
    /// Returns `false` if the task was not running.
    fn cancel(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_ticks() -> Ticker {
        Ticker::new(TickSchedule::finite(Duration::from_millis(10), 3))
    }

    #[test]
    fn idle_ticker_ignores_ticks() {
        let mut t = three_ticks();
        assert_eq!(t.tick(), TickOutcome::Inactive);
        assert_eq!(t.tick_count(), 0);
        assert_eq!(t.state(), TickerState::Idle);
    }

    #[test]
    fn finite_ticker_completes_on_its_last_tick() {
        let mut t = three_ticks();
        t.start();
        assert_eq!(t.tick(), TickOutcome::Fired { index: 0, last: false });
        assert_eq!(t.tick(), TickOutcome::Fired { index: 1, last: false });
        assert_eq!(t.tick(), TickOutcome::Fired { index: 2, last: true });
        assert_eq!(t.state(), TickerState::Completed);
        assert_eq!(t.tick(), TickOutcome::Inactive);
        assert_eq!(t.tick_count(), 3);
    }

    #[test]
    fn stop_cancels_and_keeps_the_count() {
        let mut t = three_ticks();
        t.start();
        t.tick();
        assert!(t.stop());
        assert_eq!(t.state(), TickerState::Cancelled);
        assert_eq!(t.tick_count(), 1);
        assert!(!t.stop());
        assert_eq!(t.tick(), TickOutcome::Inactive);
    }

    #[test]
    fn restart_resets_the_count() {
        let mut t = three_ticks();
        t.start();
        t.tick();
        t.tick();
        t.start();
        assert_eq!(t.tick_count(), 0);
        assert_eq!(t.tick(), TickOutcome::Fired { index: 0, last: false });
    }

    #[test]
    fn unbounded_ticker_runs_until_stopped() {
        let mut t = Ticker::new(TickSchedule::unbounded(Duration::from_secs(3)));
        t.start();
        for i in 0..500 {
            assert_eq!(t.tick(), TickOutcome::Fired { index: i, last: false });
        }
        assert!(t.is_running());
        assert!(t.stop());
    }

    #[test]
    fn zero_tick_schedule_completes_immediately() {
        let mut t = Ticker::new(TickSchedule::finite(Duration::from_secs(1), 0));
        t.start();
        assert_eq!(t.state(), TickerState::Completed);
        assert_eq!(t.tick(), TickOutcome::Inactive);
    }
}
