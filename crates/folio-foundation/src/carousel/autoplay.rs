//! Autoplay progress timer.
//!
//! Progress is polled on a fixed tick rather than driven by a single end
//! timer, so progress bars can render intermediate fractions.

use folio_core::{Duration, Instant};

/// Time each item stays on screen while autoplay runs.
pub const DEFAULT_AUTOPLAY_DURATION: Duration = Duration::from_millis(5_000);

/// Polling interval of the autoplay tick.
pub const AUTOPLAY_TICK: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoplayTick {
    pub progress: f32,
    /// The current item has been shown for the full duration.
    pub due: bool,
}

/// Progress fraction for the current item plus the enabled toggle.
///
/// Internally the timer keeps the moment it was last (re)started and the
/// fraction it had at that moment. Resuming at fraction `p` is equivalent to
/// a start time of `now - p * duration`, so toggling autoplay off and back on
/// continues from where it paused.
#[derive(Clone, Copy, Debug)]
pub struct AutoplayTimer {
    duration: Duration,
    enabled: bool,
    progress: f32,
    baseline: f32,
    resumed_at: Instant,
}

impl AutoplayTimer {
    pub fn new(duration: Duration, enabled: bool, now: Instant) -> Self {
        Self {
            duration: duration.max(AUTOPLAY_TICK),
            enabled,
            progress: 0.0,
            baseline: 0.0,
            resumed_at: now,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Progress of the current item in `[0, 1]`, as of the last tick.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Returns true when the state actually changed.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) -> bool {
        if self.enabled == enabled {
            return false;
        }
        if enabled {
            self.baseline = self.progress;
            self.resumed_at = now;
        }
        self.enabled = enabled;
        true
    }

    pub fn tick(&mut self, now: Instant) -> AutoplayTick {
        if self.enabled {
            let elapsed = now.saturating_duration_since(self.resumed_at);
            let fraction = elapsed.as_secs_f32() / self.duration.as_secs_f32();
            self.progress = (self.baseline + fraction).min(1.0);
        }
        AutoplayTick {
            progress: self.progress,
            due: self.enabled && self.progress >= 1.0,
        }
    }

    /// Resets progress to zero for a freshly shown item.
    pub fn restart(&mut self, now: Instant) {
        self.progress = 0.0;
        self.baseline = 0.0;
        self.resumed_at = now;
    }
}

/// Story-bar fills: complete before `current`, partial for it, empty after.
pub fn segments(current: usize, len: usize, progress: f32) -> impl Iterator<Item = f32> {
    let progress = progress.clamp(0.0, 1.0);
    (0..len).map(move |index| match index.cmp(&current) {
        std::cmp::Ordering::Less => 1.0,
        std::cmp::Ordering::Equal => progress,
        std::cmp::Ordering::Greater => 0.0,
    })
}
