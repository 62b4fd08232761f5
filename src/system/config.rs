//! General watch face configuration

use embassy_time::Duration;

use crate::ui::renderer::FaceVariant;

/// Frame period while the battery is fine and low power mode is off
pub const FRAME_PERIOD_DEFAULT: Duration = Duration::from_millis(64);
/// Frame period on low battery or with low power mode enabled
pub const FRAME_PERIOD_LOW_BATTERY: Duration = Duration::from_millis(1000);
/// Wall clock interval between two lock/format checks
pub const MONITOR_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Charge level at or below which the battery counts as low
pub const BATTERY_LOW_PERCENT: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceConfig {
    pub frame_period_default: Duration,
    pub frame_period_low_battery: Duration,
    pub monitor_poll_interval: Duration,
    pub battery_low_percent: u8,
    pub variant: FaceVariant,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            frame_period_default: FRAME_PERIOD_DEFAULT,
            frame_period_low_battery: FRAME_PERIOD_LOW_BATTERY,
            monitor_poll_interval: MONITOR_POLL_INTERVAL,
            battery_low_percent: BATTERY_LOW_PERCENT,
            variant: FaceVariant::CONCENTRIC,
        }
    }
}

impl FaceConfig {
    /// Create new configuration for the given face variant
    pub fn new(variant: FaceVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn with_frame_periods(mut self, default: Duration, low_battery: Duration) -> Self {
        self.frame_period_default = default;
        self.frame_period_low_battery = low_battery;
        self
    }

    pub fn with_monitor_poll_interval(mut self, interval: Duration) -> Self {
        self.monitor_poll_interval = interval;
        self
    }

    pub fn with_battery_low_percent(mut self, percent: u8) -> Self {
        self.battery_low_percent = percent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_watch_face_cadence() {
        let config = FaceConfig::default();
        assert_eq!(config.frame_period_default.as_millis(), 64);
        assert_eq!(config.frame_period_low_battery.as_millis(), 1000);
        assert_eq!(config.variant, FaceVariant::CONCENTRIC);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = FaceConfig::new(FaceVariant::REVEAL_ANALOG)
            .with_frame_periods(Duration::from_millis(100), Duration::from_millis(2000))
            .with_battery_low_percent(20);
        assert_eq!(config.variant, FaceVariant::REVEAL_ANALOG);
        assert_eq!(config.frame_period_default.as_millis(), 100);
        assert_eq!(config.frame_period_low_battery.as_millis(), 2000);
        assert_eq!(config.battery_low_percent, 20);
        assert_eq!(config.monitor_poll_interval, MONITOR_POLL_INTERVAL);
    }
}
