//! Wall-clock capture backend.
//!
//! `TimedCapture` measures elapsed capture time without touching audio
//! hardware. Real microphone capture is an external collaborator that
//! implements [`AudioCapture`] the same way and plugs into the session
//! controller unchanged.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use parking_lot::Mutex;

use crate::domain::traits::AudioCapture;

/// Capture backend backed by a wall clock.
#[derive(Default)]
pub struct TimedCapture {
    started: Mutex<Option<Instant>>,
}

impl TimedCapture {
    pub fn new() -> Self {
        Self {
            started: Mutex::new(None),
        }
    }
}

impl AudioCapture for TimedCapture {
    fn start(&self) -> Result<()> {
        let mut started = self.started.lock();
        if started.is_some() {
            bail!("capture already in progress");
        }
        *started = Some(Instant::now());
        Ok(())
    }

    fn stop(&self) -> Duration {
        match self.started.lock().take() {
            Some(t) => t.elapsed(),
            None => Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match *self.started.lock() {
            Some(t) => t.elapsed(),
            None => Duration::ZERO,
        }
    }

    fn is_capturing(&self) -> bool {
        self.started.lock().is_some()
    }
}
