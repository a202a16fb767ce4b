//! Binds the collage to its tick timer.

use std::time::Duration;

use tracing::{debug, info};

use crate::collage::Collage;
use crate::error::Error;
use crate::events::CollageFrame;
use crate::timer::{TickTimer, TimerState};

pub struct CollageController {
    collage: Collage,
    timer: TickTimer,
}

impl CollageController {
    pub fn new(collage: Collage, interval: Duration) -> Self {
        Self {
            collage,
            timer: TickTimer::new(interval),
        }
    }

    /// Populate the first photo, then arm the timer.
    ///
    /// Only acts once, from the idle state before the timer was ever armed.
    /// Later calls return `Ok(None)`.
    pub fn first_render(&mut self) -> Result<Option<CollageFrame>, Error> {
        if self.timer.state() != TimerState::Idle || self.collage.last_sequence() > 0 {
            return Ok(None);
        }
        self.collage.advance()?;
        self.timer.start();
        info!(interval = ?self.timer.interval(), "collage started");
        Ok(Some(self.collage.snapshot()))
    }

    /// Handle one timer expiry: stop, advance, restart.
    ///
    /// Returns the frame to repaint, or `None` when the timer was not armed
    /// (never started, mid-tick, or disposed).
    pub fn on_tick(&mut self) -> Result<Option<CollageFrame>, Error> {
        if !self.timer.fire() {
            return Ok(None);
        }
        self.collage.advance()?;
        self.timer.start();
        debug!(
            last_sequence = self.collage.last_sequence(),
            len = self.collage.window().len(),
            "tick"
        );
        Ok(Some(self.collage.snapshot()))
    }

    /// Stop and release the timer. Tolerates repeated calls.
    pub fn dispose(&mut self) {
        if !self.timer.is_disposed() {
            info!("collage disposed");
        }
        self.timer.dispose();
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub const fn interval(&self) -> Duration {
        self.timer.interval()
    }

    pub const fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn collage(&self) -> &Collage {
        &self.collage
    }
}

impl Drop for CollageController {
    fn drop(&mut self) {
        self.dispose();
    }
}
