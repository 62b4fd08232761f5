//! 12/24 hour preference
//!
//! Re-read on the throttled schedule and whenever the face enters ambient.

use embassy_time::Duration;

use super::Throttle;

/// Platform query for the user's hour format preference
pub trait FormatSource {
    fn is_24_hour_format(&mut self) -> bool;
}

pub struct FormatMonitor {
    throttle: Throttle,
    is_24h: bool,
    ambient: bool,
    stale: bool,
}

impl Default for FormatMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatMonitor {
    pub const fn new() -> Self {
        Self {
            throttle: Throttle::new(),
            is_24h: false,
            ambient: false,
            stale: true,
        }
    }

    pub fn is_24_hour(&self) -> bool {
        self.is_24h
    }

    /// Force a read on the next frame, e.g. after the clock was set
    pub fn notify_time_set(&mut self) {
        self.stale = true;
    }

    /// Advance one frame drawn in the given platform mode and return the
    /// preference to draw with
    pub fn sample<S: FormatSource>(
        &mut self,
        source: &mut S,
        ambient: bool,
        interval: Duration,
        frame_period: Duration,
    ) -> bool {
        let entering_ambient = ambient && !self.ambient;
        self.ambient = ambient;

        let due = self.throttle.tick(interval, frame_period);
        if due || entering_ambient || self.stale {
            self.is_24h = source.is_24_hour_format();
            self.stale = false;
        }
        self.is_24h
    }
}
