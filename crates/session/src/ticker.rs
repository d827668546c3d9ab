//! Elapsed-time progress ticker.
//!
//! A cancellable side task spawned while a turn is in flight. It publishes
//! a status line through a watch channel at decreasing frequency — every
//! 500 ms at first, then 1 s after 10 s, 2 s after 30 s, 5 s after 60 s —
//! and is aborted unconditionally when the guard drops. Cancellation is
//! best effort: no final update is guaranteed.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Spawns and owns the progress side task.
pub struct ProgressTicker;

/// Aborts the ticker task on drop.
pub struct TickerGuard {
    handle: JoinHandle<()>,
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl ProgressTicker {
    /// Start the ticker. The receiver yields human-readable status lines;
    /// drop the guard to stop the task.
    pub fn spawn() -> (watch::Receiver<String>, TickerGuard) {
        let (tx, rx) = watch::channel(String::from("Thinking..."));

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            loop {
                let elapsed = started.elapsed();
                tokio::time::sleep(interval_for(elapsed)).await;

                let elapsed = started.elapsed();
                let status = format!("Still thinking... ({}s elapsed)", elapsed.as_secs());
                if tx.send(status).is_err() {
                    break; // display side went away
                }
            }
        });

        (rx, TickerGuard { handle })
    }
}

/// Update interval as a function of elapsed wall-clock time.
pub(crate) fn interval_for(elapsed: Duration) -> Duration {
    let secs = elapsed.as_secs();
    if secs < 10 {
        Duration::from_millis(500)
    } else if secs < 30 {
        Duration::from_secs(1)
    } else if secs < 60 {
        Duration::from_secs(2)
    } else {
        Duration::from_secs(5)
    }
}
