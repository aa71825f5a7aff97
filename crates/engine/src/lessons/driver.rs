use chrono::{DateTime, Utc};

use lesson_core::time::seconds_between;

//
// ─── ANIMATION DRIVER ──────────────────────────────────────────────────────────
//

/// State of the per-frame animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running {
        started_at: DateTime<Utc>,
    },
}

/// Gate between host frame callbacks and the sampler.
///
/// The host delivers ticks unconditionally (its render loop does not know
/// about lesson state); the driver decides whether a tick samples. Ticks
/// arriving while stopped are dropped, never buffered, so stopping is
/// effective for every tick delivered after `stop` returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationDriver {
    state: DriverState,
}

impl AnimationDriver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DriverState::Stopped,
        }
    }

    /// Enters the running state, recording the start instant.
    ///
    /// Idempotent: starting while already running keeps the original start
    /// instant, so elapsed time stays continuous.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if let DriverState::Stopped = self.state {
            self.state = DriverState::Running { started_at: now };
        }
    }

    /// Leaves the running state. Idempotent.
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Seconds since the driver entered running, or `None` while stopped.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<f64> {
        match self.state {
            DriverState::Stopped => None,
            DriverState::Running { started_at } => Some(seconds_between(started_at, now)),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
