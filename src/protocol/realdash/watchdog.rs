//! Stall detection for partially received messages.
//!
//! The decoder has no notion of time. A link that dies mid-message would
//! leave it waiting forever for the missing bytes, so the polling loop
//! tracks progress here and resets the decoder once a message has been
//! stuck for longer than the timeout.
use embassy_time::{Duration, Instant};

use super::RECEIVE_TIMEOUT_MS;

/// Tracks how long a message has been in progress without new bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallWatchdog {
    timeout: Duration,
    last_progress: Option<Instant>,
}

impl Default for StallWatchdog {
    fn default() -> Self {
        Self::new(Duration::from_millis(RECEIVE_TIMEOUT_MS))
    }
}

impl StallWatchdog {
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_progress: None,
        }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Observe the decoder at `now`.
    ///
    /// `progressed` tells whether bytes were consumed since the previous
    /// call, `in_progress` whether a message is partially decoded. Returns
    /// `true` once the pending message has stalled; the caller then resets
    /// the decoder.
    pub fn check(&mut self, now: Instant, progressed: bool, in_progress: bool) -> bool {
        if !in_progress {
            self.last_progress = None;
            return false;
        }
        let since = match self.last_progress {
            Some(since) if !progressed => since,
            _ => {
                self.last_progress = Some(now);
                return false;
            }
        };
        let stalled = now
            .checked_duration_since(since)
            .is_some_and(|elapsed| elapsed >= self.timeout);
        if stalled {
            #[cfg(feature = "defmt")]
            defmt::warn!("realdash: message stalled for {} ms", self.timeout.as_millis());
            self.last_progress = None;
        }
        stalled
    }
}
