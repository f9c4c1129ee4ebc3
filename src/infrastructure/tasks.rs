//! Handler tasks spawned by the polling loop, kept so shutdown can wait on them

use std::future::Future;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};

/// Set of running per-update handlers
#[derive(Default)]
pub struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Forget handlers that already finished
    pub fn reap(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            log_outcome(result);
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait up to `grace` for running handlers, then abort whatever is left.
    /// Returns the number of aborted handlers.
    pub async fn drain(mut self, grace: Duration) -> usize {
        if self.is_empty() {
            return 0;
        }
        tracing::info!(running = self.len(), "Waiting for in-flight handlers");

        let finished = tokio::time::timeout(grace, async {
            while let Some(result) = self.tasks.join_next().await {
                log_outcome(result);
            }
        })
        .await;
        if finished.is_ok() {
            return 0;
        }

        let aborted = self.tasks.len();
        tracing::warn!(aborted, grace = ?grace, "Handlers still running after grace period, aborting");
        self.tasks.shutdown().await;
        aborted
    }
}

fn log_outcome(result: Result<(), JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            tracing::error!("Handler panicked: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_drain_waits_for_running_handler() {
        let done = Arc::new(AtomicBool::new(false));
        let mut in_flight = InFlight::new();
        let flag = Arc::clone(&done);
        in_flight.spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(in_flight.drain(Duration::from_secs(10)).await, 0);
        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_aborts_hung_handler() {
        let mut in_flight = InFlight::new();
        in_flight.spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        in_flight.spawn(async {});

        assert_eq!(in_flight.drain(Duration::from_secs(5)).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_drops_finished_handlers() {
        let mut in_flight = InFlight::new();
        in_flight.spawn(async {});
        in_flight.spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        in_flight.reap();
        assert_eq!(in_flight.len(), 1);
    }

    #[tokio::test]
    async fn test_drain_with_nothing_running() {
        assert_eq!(InFlight::new().drain(Duration::from_secs(1)).await, 0);
    }
}
