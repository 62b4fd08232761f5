//! Battery status
//!
//! Conversion based upon https://wiki.pine64.org/wiki/PineTime: the charge
//! estimate uses fixed data points with linear interpolation in between.

use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

use crate::error::Error;

/// Latest battery broadcast
pub type BatterySignal<M> = Signal<M, BatteryInfo>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct BatteryInfo {
    /// Charging state
    pub charging: bool,
    /// Battery percentage
    pub percent: u8,
}

impl Default for BatteryInfo {
    fn default() -> Self {
        Self {
            charging: false,
            percent: 100,
        }
    }
}

impl BatteryInfo {
    /// Build a reading from a raw 12 bit SAADC sample of the divided cell voltage
    pub fn from_adc(raw_measurement: i16, charging: bool) -> Result<Self, Error> {
        let millivolts = convert_adc_measurement(raw_measurement)?;
        Ok(Self {
            charging,
            percent: percent_from_millivolts(millivolts),
        })
    }
}

/// Convert an ADC measurement into a battery voltage in millivolts
pub fn convert_adc_measurement(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // keep as 32 bit for multiplication
            let adc_val = raw_measurement as u32;
            // 2 * 1000 for mV, divided by 2^12 / 3.3V reference
            Ok((adc_val * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Battery capacity in percent
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Tracks the last battery broadcast and whether the battery counts as low
pub struct BatteryMonitor {
    info: BatteryInfo,
    low_percent: u8,
    low: bool,
}

impl BatteryMonitor {
    pub fn new(low_percent: u8) -> Self {
        let info = BatteryInfo::default();
        Self {
            info,
            low_percent,
            low: Self::evaluate(&info, low_percent),
        }
    }

    /// Return the stored reading. To apply a new one, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    pub fn is_low(&self) -> bool {
        self.low
    }

    /// Store a new reading. Return whether the low flag changed.
    pub fn update(&mut self, info: BatteryInfo) -> bool {
        self.info = info;
        let low = Self::evaluate(&info, self.low_percent);
        if low == self.low {
            return false;
        }
        self.low = low;
        if low {
            info!("battery low at {} percent", info.percent);
        } else {
            info!("battery no longer low");
        }
        true
    }

    /// Apply the newest broadcast, if one arrived since the last poll
    pub fn poll<M: RawMutex>(&mut self, signal: &BatterySignal<M>) -> bool {
        match signal.try_take() {
            Some(info) => self.update(info),
            None => false,
        }
    }

    fn evaluate(info: &BatteryInfo, low_percent: u8) -> bool {
        !info.charging && info.percent <= low_percent
    }
}
