//! System clock adapter.
//!
//! Implements [`ClockPort`] with the host's UTC wall clock.  Wall time
//! (not a monotonic counter) is required because vent timers are stored
//! as absolute timestamps and must stay meaningful across restarts.

use chrono::{DateTime, Utc};

use crate::app::ports::ClockPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
