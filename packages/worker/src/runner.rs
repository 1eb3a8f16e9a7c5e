use std::fmt::Display;
use std::future::Future;

use tracing::{error, info};

/// Why the consumer loop stopped.
#[derive(Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The broker loop returned on its own.
    ConsumerExited,
    Shutdown,
}

/// Drive `consume` until it returns or `shutdown` resolves, whichever is first.
pub async fn run_until_shutdown<C, S, E>(consume: C, shutdown: S) -> StopReason
where
    C: Future<Output = Result<(), E>>,
    S: Future<Output = ()>,
    E: Display,
{
    tokio::select! {
        result = consume => {
            if let Err(e) = result {
                error!(error = %e, "Worker stopped unexpectedly");
            }
            StopReason::ConsumerExited
        }
        _ = shutdown => {
            info!("Stopping worker");
            StopReason::Shutdown
        }
    }
}
