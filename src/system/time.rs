//! Time keeping for the watch face

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use embassy_time::Instant;

/// Clock time split into the fields the renderer needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Fraction of the current second, in `[0, 1)`
    pub subsecond: f32,
    pub weekday: Weekday,
    /// Month, 1-based
    pub month: u32,
    pub day: u32,
}

impl ClockTime {
    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        // Leap seconds report nanos above one billion
        let nanos = time.nanosecond() % 1_000_000_000;
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            subsecond: nanos as f32 / 1_000_000_000.0,
            weekday: time.weekday(),
            month: time.month(),
            day: time.day(),
        }
    }

    /// Fraction of the current minute, in `[0, 1)`
    pub fn minute_fraction(&self) -> f32 {
        (self.second as f32 + self.subsecond) / 60.0
    }

    pub fn weekday_abbreviation(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn month_abbreviation(&self) -> &'static str {
        match self.month {
            1 => "Jan",
            2 => "Feb",
            3 => "Mar",
            4 => "Apr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Aug",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            _ => "Dec",
        }
    }
}

impl From<NaiveDateTime> for ClockTime {
    fn from(time: NaiveDateTime) -> Self {
        Self::from_datetime(&time)
    }
}

/// Wall clock time paired with the system instant it was taken at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    time: NaiveDateTime,
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    pub fn new(time: NaiveDateTime, instant: Instant) -> Self {
        Self { time, instant }
    }

    /// Create new time reference from Current Time Service data
    ///
    /// Returns `None` for short or out-of-range payloads.
    pub fn from_cts_bytes(bytes: &[u8], instant: Instant) -> Option<Self> {
        if bytes.len() < 9 {
            return None;
        }
        let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
        let month = bytes[2] as u32;
        let day = bytes[3] as u32;
        let hour = bytes[4] as u32;
        let min = bytes[5] as u32;
        let sec = bytes[6] as u32;
        // fractions_256 to milliseconds
        let milli = bytes[8] as u32 * 1000 / 256;

        let time = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(hour, min, sec, milli)?;
        Some(Self { time, instant })
    }
}

#[derive(Debug, Default)]
pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    pub fn new(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Wall clock time at `now`
    pub fn time_at(&self, now: Instant) -> Option<NaiveDateTime> {
        let elapsed = now.checked_duration_since(self.reference.instant)?;
        self.reference
            .time
            .checked_add_signed(ChronoDuration::microseconds(elapsed.as_micros() as i64))
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn clock_time_splits_fields() {
        let clock = ClockTime::from_datetime(&datetime(13, 45, 30, 500));
        assert_eq!((clock.hour, clock.minute, clock.second), (13, 45, 30));
        assert!((clock.subsecond - 0.5).abs() < 1e-6);
        assert_eq!(clock.weekday_abbreviation(), "Sun");
        assert_eq!(clock.month_abbreviation(), "Mar");
        assert_eq!(clock.day, 3);
        assert!((clock.minute_fraction() - 30.5 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn cts_bytes_are_decoded() {
        let bytes = [0xe8, 0x07, 3, 3, 12, 34, 56, 7, 128];
        let reference = TimeReference::from_cts_bytes(&bytes, Instant::from_ticks(0)).unwrap();
        assert_eq!(reference.time, datetime(12, 34, 56, 500));
    }

    #[test]
    fn invalid_cts_bytes_are_rejected() {
        assert!(TimeReference::from_cts_bytes(&[0xe8, 0x07, 13], Instant::from_ticks(0)).is_none());
        let bad_month = [0xe8, 0x07, 13, 3, 12, 34, 56, 7, 0];
        assert!(TimeReference::from_cts_bytes(&bad_month, Instant::from_ticks(0)).is_none());
    }

    #[test]
    fn manager_advances_from_reference() {
        let manager = TimeManager::new(TimeReference::new(
            datetime(23, 59, 59, 0),
            Instant::from_millis(1_000),
        ));
        let later = manager.time_at(Instant::from_millis(2_500)).unwrap();
        assert_eq!(later, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_milli_opt(0, 0, 0, 500).unwrap());
        assert!(manager.time_at(Instant::from_millis(0)).is_none());
    }
}
