//! Host-side animation loop.
//!
//! Desktop hosts have no `requestAnimationFrame`; this ticker plays that
//! role, driving a callback at a fixed period from a tokio task. The
//! handle carries the cancellation token: flipping it stops the loop, and
//! awaiting [`TickerHandle::stopped`] guarantees no further callback runs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running ticker task.
///
/// Dropping the handle also requests shutdown, so a forgotten ticker
/// cannot keep a session animating in the background.
pub struct TickerHandle {
    shutdown: watch::Sender<bool>,
    // taken by `stopped`; `None` only after the task has been awaited
    task: Option<JoinHandle<()>>,
}

/// Fixed-period frame callback scheduler.
pub struct Ticker;

impl Ticker {
    /// Spawns a task invoking `on_tick` with the current time every
    /// `period`.
    ///
    /// Missed ticks are skipped, not bursted, matching a render loop that
    /// drops frames under load. Must be called within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> TickerHandle
    where
        F: FnMut(DateTime<Utc>) + Send + 'static,
    {
        let (shutdown, mut watch_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    changed = watch_rx.changed() => {
                        if changed.is_err() || *watch_rx.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => on_tick(Utc::now()),
                }
            }
        });
        TickerHandle {
            shutdown,
            task: Some(task),
        }
    }
}

impl TickerHandle {
    /// Requests shutdown without waiting for the task to finish.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Stops the ticker and waits until the task has exited.
    ///
    /// After this returns, `on_tick` will never be invoked again.
    pub async fn stopped(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
