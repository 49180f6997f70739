//! Cancellable handles for frame-cadence tasks.
//!
//! The animation sampler and the readout cycler both run as spawned tasks
//! that sleep a frame, check elapsed time, and either continue or finish.
//! Owning them through a handle makes cancellation explicit: `cancel()`
//! stops the task between frames, and dropping the handle does the same, so
//! a superseded spin can never leave a ticker running.

use tokio::task::JoinHandle;
use tracing::debug;

/// Owning handle to a spawned ticker task.
///
/// The task is aborted when the handle is cancelled or dropped. Abort takes
/// effect at the task's next suspension point (its frame sleep), so no
/// further ticks are emitted after cancellation.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Wraps a spawned ticker task.
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stops the ticker; no further ticks fire.
    pub fn cancel(&self) {
        debug!("Ticker cancelled");
        self.task.abort();
    }

    /// Returns whether the ticker has finished or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the ticker's task has fully stopped, whether it ran to
    /// completion or was cancelled.
    ///
    /// Cancel-safe: dropping the returned future and calling again resumes
    /// waiting.
    pub async fn wait(&mut self) {
        // JoinError covers both abort and panic; tickers hold no state worth
        // recovering either way.
        let _ = (&mut self.task).await;
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{Duration, sleep};

    #[tokio::test]
    async fn test_wait_resolves_after_completion() {
        let mut handle = TickerHandle::new(tokio::spawn(async {
            sleep(Duration::from_millis(10)).await;
        }));
        handle.wait().await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_cancel_stops_ticking() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let mut handle = TickerHandle::new(tokio::spawn(async move {
            loop {
                sleep(Duration::from_millis(5)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        sleep(Duration::from_millis(30)).await;
        handle.cancel();
        handle.wait().await;

        let at_cancel = ticks.load(Ordering::SeqCst);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), at_cancel);
    }
}
