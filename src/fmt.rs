//! Logging macros
//!
//! Forward to `defmt` on the watch, to `log` on a host, or to nothing.
//! Only plain `{}` placeholders are used so both backends accept the same
//! format strings.

#![allow(unused_macros)]

macro_rules! log_event {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::$level!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => { log_event!(trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { log_event!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { log_event!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { log_event!(warn, $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { log_event!(error, $($arg)*) };
}
