//! Progress polling
//!
//! Elapsed time and duration are sampled from the active surface on a fixed
//! interval. Sampling is suspended while the user drags the seek control so
//! asynchronous position updates never fight the user's input.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One progress sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Elapsed playback time
    pub position: Duration,

    /// Total duration, when known
    pub duration: Option<Duration>,
}

impl Progress {
    /// Elapsed fraction in percent (0.0-100.0)
    pub fn percent(&self) -> f64 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                (self.position.as_secs_f64() / duration.as_secs_f64() * 100.0).clamp(0.0, 100.0)
            }
            _ => 0.0,
        }
    }
}

/// Polling state
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    /// User is dragging the seek control
    dragging: bool,

    /// Last sample taken (reset to zero on track change)
    last: Progress,
}

impl ProgressTracker {
    /// Create a tracker showing zero progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether sampling is currently allowed
    pub fn accepts_samples(&self) -> bool {
        !self.dragging
    }

    /// Record a sample
    ///
    /// Returns `false` (and drops the sample) while dragging.
    pub fn record(&mut self, sample: Progress) -> bool {
        if self.dragging {
            return false;
        }
        self.last = sample;
        true
    }

    /// Suspend sampling
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Resume sampling at the released position
    pub fn end_drag(&mut self, position: Duration) {
        self.dragging = false;
        self.last.position = position;
    }

    /// Whether the user is dragging
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Return the display to zero
    pub fn reset(&mut self) {
        self.last = Progress::default();
    }

    /// Last recorded sample
    pub fn last(&self) -> Progress {
        self.last
    }
}

/// Format a duration as `m:ss`
pub fn format_time(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
