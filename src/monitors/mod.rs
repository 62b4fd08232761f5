//! Side-channel observers that steer the frame cadence and content

use embassy_time::Duration;

use crate::system::config::FaceConfig;

pub mod battery;
pub mod format;
pub mod lock;

/// Period between two frames
///
/// A low battery always selects the slow period; the low power setting does
/// the same while the battery is fine.
pub fn frame_period(config: &FaceConfig, battery_low: bool, low_power: bool) -> Duration {
    if battery_low || low_power {
        config.frame_period_low_battery
    } else {
        config.frame_period_default
    }
}

/// Counts frames and fires once per poll interval of wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    counter: u32,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new()
    }
}

impl Throttle {
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Advance one frame drawn at `frame_period`
    ///
    /// Fires on the first frame and then every `interval / frame_period`
    /// frames.
    pub fn tick(&mut self, interval: Duration, frame_period: Duration) -> bool {
        let frames = (interval.as_millis() / frame_period.as_millis().max(1)).max(1) as u32;
        let fire = self.counter % frames == 0;
        self.counter = self.counter.wrapping_add(1);
        fire
    }
}
