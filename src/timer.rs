//! The idle deadline of the session.

use std::time::Duration;

use nix::unistd::alarm;

/// A deadline that ends the session when no command is entered in time.
pub trait SessionTimer {
    /// Restart the countdown from the full interval.
    fn rearm(&mut self);
}

/// Session timer backed by the process alarm clock.
///
/// Expiry is delivered as SIGALRM and handled by [`crate::signals`]. The
/// alarm is not inherited by forked children.
#[derive(Debug, Clone, Copy)]
pub struct AlarmTimer {
    seconds: u32,
}

impl AlarmTimer {
    /// `interval` is rounded down to whole seconds, with a floor of one
    /// second since a zero alarm cancels instead of arming.
    pub fn new(interval: Duration) -> Self {
        let seconds = u32::try_from(interval.as_secs()).unwrap_or(u32::MAX).max(1);
        Self { seconds }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

impl SessionTimer for AlarmTimer {
    fn rearm(&mut self) {
        let previous = alarm::set(self.seconds);
        tracing::trace!(seconds = self.seconds, ?previous, "idle alarm re-armed");
    }
}

/// Timer that only counts how often it was re-armed.
///
/// Used to drive the loop without touching the process alarm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingTimer {
    rearms: usize,
}

impl CountingTimer {
    pub fn rearms(&self) -> usize {
        self.rearms
    }
}

impl SessionTimer for CountingTimer {
    fn rearm(&mut self) {
        self.rearms += 1;
    }
}
