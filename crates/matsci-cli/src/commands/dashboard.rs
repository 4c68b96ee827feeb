use crate::cli::DashboardArgs;
use crate::commands::{entropy_rng, shutdown_signal};
use crate::display;
use crate::error::Result;
use chrono::Local;
use matsci::engine::scheduler::{ScheduledTask, TickOutcome};
use matsci::engine::status::{Gauges, SystemMonitor};
use rand::Rng;
use std::future::Future;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

pub async fn run(args: DashboardArgs) -> Result<()> {
    let monitor = SystemMonitor::new(entropy_rng());
    let refreshes = watch(monitor, args.ticks, shutdown_signal(), |gauges| {
        println!("{}", display::dashboard(Local::now(), gauges));
    })
    .await;
    info!(refreshes, "Dashboard closed");
    Ok(())
}

/// Shows the gauges once, then again on every refresh until `ticks` refreshes have
/// happened or `shutdown` resolves. Returns the number of refreshes.
pub async fn watch<R: Rng>(
    mut monitor: SystemMonitor<R>,
    ticks: Option<usize>,
    shutdown: impl Future<Output = ()>,
    mut on_refresh: impl FnMut(Gauges),
) -> usize {
    on_refresh(monitor.gauges());
    let period = monitor.schedule().period;
    let mut ticker = interval_at(Instant::now() + period, period);
    tokio::pin!(shutdown);

    let mut refreshes = 0;
    while ticks.is_none_or(|limit| refreshes < limit) {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if let TickOutcome::Fired { index, .. } = monitor.tick() {
                    debug!(index, "Gauges refreshed");
                    refreshes += 1;
                    on_refresh(monitor.gauges());
                }
            }
        }
    }
    monitor.cancel();
    refreshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use matsci::engine::status::STATUS_REFRESH_PERIOD;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn refreshes_every_period_until_the_limit() {
        let start = Instant::now();
        let mut seen = Vec::new();
        let refreshes = watch(
            SystemMonitor::new(StdRng::seed_from_u64(3)),
            Some(2),
            std::future::pending(),
            |g| seen.push(g),
        )
        .await;
        assert_eq!(refreshes, 2);
        assert_eq!(seen.len(), 3);
        assert_eq!(start.elapsed(), STATUS_REFRESH_PERIOD * 2);
        for gauges in seen {
            assert!((5..=95).contains(&gauges.cpu));
            assert!((10..=90).contains(&gauges.memory));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_an_unbounded_watch() {
        let shutdown = tokio::time::sleep(Duration::from_secs(10));
        let refreshes = watch(
            SystemMonitor::new(StdRng::seed_from_u64(3)),
            None,
            shutdown,
            |_| {},
        )
        .await;
        assert_eq!(refreshes, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ticks_shows_a_single_frame() {
        let mut frames = 0;
        let refreshes = watch(
            SystemMonitor::new(StdRng::seed_from_u64(3)),
            Some(0),
            std::future::pending(),
            |_| frames += 1,
        )
        .await;
        assert_eq!((refreshes, frames), (0, 1));
    }
}
