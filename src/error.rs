//! Crate error type

use core::fmt;

use crate::ui::state::SettingKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum Error {
    /// Raw battery ADC sample outside the 12 bit range
    InvalidMeasurement,
    /// A known setting arrived with a value of the wrong kind
    ValueTypeMismatch(SettingKey),
    /// The style update channel has no free slot
    UpdateQueueFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMeasurement => f.write_str("invalid battery measurement"),
            Error::ValueTypeMismatch(key) => {
                write!(f, "unexpected value type for setting {}", key.id())
            }
            Error::UpdateQueueFull => f.write_str("style update queue is full"),
        }
    }
}
