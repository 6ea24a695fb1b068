//! Daily reset scheduler
//!
//! A perpetual background task that sleeps until the next local midnight and
//! then purges every record dated before the new day. The deadline is
//! recomputed from the wall clock on each iteration, and the wait can be cut
//! short through a [`CancellationToken`].

use crate::clock::{next_midnight, until_next_midnight, Clock};
use crate::ports::AttendanceStore;
use crate::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub struct ResetScheduler {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl ResetScheduler {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Run the loop on its own task until `shutdown` is cancelled.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(self, shutdown: CancellationToken) {
        info!("Daily reset scheduler started");

        loop {
            let now = self.clock.now();
            let deadline = next_midnight(&now);
            let wait = until_next_midnight(&now);
            debug!(
                "Next reset at {} (in {}s)",
                deadline.to_rfc3339(),
                wait.as_secs()
            );

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Daily reset scheduler stopping");
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            // Failures wait for the next midnight; the loop never exits on them
            match self.purge_stale().await {
                Ok(removed) => info!("Roster reset for the new day, removed {} record(s)", removed),
                Err(e) => error!("Error resetting roster: {}", e),
            }
        }
    }

    /// Purge everything dated before today, with today read at call time.
    pub async fn purge_stale(&self) -> Result<u64> {
        let today = self.clock.today();
        debug!("Purging records before {}", today);
        self.store.purge_before(&today).await
    }
}
