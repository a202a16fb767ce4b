//! Recurring tick timer with explicit stop/restart bracketing.
//!
//! The timer itself does not sleep; the ticker task asks it whether it is
//! armed and reports each expiry through [`TickTimer::fire`]. Firing disarms
//! the timer, so a tick in progress can never overlap the next one until the
//! handler calls [`TickTimer::start`] again.

use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Armed,
    Disposed,
}

#[derive(Debug)]
pub struct TickTimer {
    interval: Duration,
    state: TimerState,
}

impl TickTimer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: TimerState::Idle,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TimerState::Armed
    }

    pub fn is_disposed(&self) -> bool {
        self.state == TimerState::Disposed
    }

    /// Arm the timer. No-op once disposed.
    pub fn start(&mut self) {
        if self.state == TimerState::Idle {
            self.state = TimerState::Armed;
        }
    }

    /// Disarm the timer. No-op unless armed.
    pub fn stop(&mut self) {
        if self.state == TimerState::Armed {
            self.state = TimerState::Idle;
        }
    }

    /// Report an expiry. Returns `true` if a tick should run, in which case
    /// the timer has been stopped and must be restarted by the caller.
    pub fn fire(&mut self) -> bool {
        if self.state != TimerState::Armed {
            debug!(state = ?self.state, "timer fired while not armed; ignoring");
            return false;
        }
        self.stop();
        true
    }

    /// Release the timer for good. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.state = TimerState::Disposed;
    }
}
