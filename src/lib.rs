//! Concentric watch face core
//!
//! Style catalog, watch face state and its update reducer, palette
//! resolution and frame rendering onto any `embedded-graphics` draw target.
//! Battery, lock and 12/24-hour format monitors feed the renderer with the
//! auxiliary flags it needs each frame.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod error;
pub mod monitors;
pub mod system;
pub mod ui;

pub use error::Error;
pub use monitors::battery::{BatteryInfo, BatteryMonitor};
pub use system::config::FaceConfig;
pub use system::time::{ClockTime, TimeManager, TimeReference};
pub use ui::catalog::{LayoutKind, LayoutOption, StyleCatalog, StyleOption};
pub use ui::palette::ResolvedPalette;
pub use ui::renderer::{Appearance, DrawMode, FaceVariant, RenderContext, WatchFaceRenderer};
pub use ui::state::{SettingKey, SettingValue, UserStyle, WatchFaceState};
