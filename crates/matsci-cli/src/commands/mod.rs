pub mod calc;
pub mod chat;
pub mod dashboard;
pub mod elements;
pub mod materials;
pub mod open;
pub mod workflow;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

/// Resolves when the user presses Ctrl-C. If the handler cannot be installed it
/// never resolves, so the command simply runs to its natural end.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}
