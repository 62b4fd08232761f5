//! Watch face state and the user style settings that change it

use alloc::{string::String, vec::Vec};

use super::catalog::{LayoutOption, StyleCatalog, StyleOption, LAYOUT_OPTIONS};

pub const DRAW_COMPLICATION_CIRCLES_DEFAULT: bool = true;
pub const TIME_ALWAYS_ON_DEFAULT: bool = true;
pub const DRAW_DATE_DEFAULT: bool = true;
pub const COMPLICATIONS_ALWAYS_ON_DEFAULT: bool = true;
pub const MINUTE_DIAL_ALWAYS_ON_DEFAULT: bool = true;
pub const ACTIVE_AS_AMBIENT_DEFAULT: bool = false;
pub const STYLE_ICON_DEFAULT: bool = true;
pub const LOW_POWER_DEFAULT: bool = false;

/// Ambient burn-in shift distance, in pixels
pub const SHIFT_PIXEL_DEFAULT: f32 = 5.0;
pub const SHIFT_PIXEL_MINIMUM: f32 = 0.0;

/// Settings the reducer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum SettingKey {
    ColorStyle,
    LayoutStyle,
    StyleIcon,
    DrawTimeAlwaysOn,
    DrawDate,
    DrawComplicationCircles,
    ComplicationsAlwaysOn,
    ActiveAsAmbient,
    MinuteDialAlwaysOn,
    ShiftPixels,
    LowPower,
}

impl SettingKey {
    pub const ALL: [SettingKey; 11] = [
        SettingKey::ColorStyle,
        SettingKey::LayoutStyle,
        SettingKey::StyleIcon,
        SettingKey::DrawTimeAlwaysOn,
        SettingKey::DrawDate,
        SettingKey::DrawComplicationCircles,
        SettingKey::ComplicationsAlwaysOn,
        SettingKey::ActiveAsAmbient,
        SettingKey::MinuteDialAlwaysOn,
        SettingKey::ShiftPixels,
        SettingKey::LowPower,
    ];

    /// Setting identifier used by the style framework
    pub const fn id(self) -> &'static str {
        match self {
            SettingKey::ColorStyle => "color_style_setting",
            SettingKey::LayoutStyle => "layout_style_setting",
            SettingKey::StyleIcon => "style_icon_style_setting",
            SettingKey::DrawTimeAlwaysOn => "draw_time_aod_style_setting",
            SettingKey::DrawDate => "draw_date_style_setting",
            SettingKey::DrawComplicationCircles => "draw_comp_circles_style_setting",
            SettingKey::ComplicationsAlwaysOn => "compaod_style_setting",
            SettingKey::ActiveAsAmbient => "active_as_ambient_style_setting",
            SettingKey::MinuteDialAlwaysOn => "minutedialaod_style_setting",
            SettingKey::ShiftPixels => "shift_pixels_style_setting",
            SettingKey::LowPower => "low_power_style_setting",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.id() == id)
    }
}

/// Value carried by one setting
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    /// Id of a list option, e.g. a color or layout style
    Choice(String),
    Double(f64),
}

/// Collection of `(setting id, value)` pairs delivered by the style framework
///
/// Order is preserved; the reducer applies entries in this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStyle {
    entries: Vec<(String, SettingValue)>,
}

impl UserStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, value: SettingValue) -> Self {
        self.push(id, value);
        self
    }

    pub fn with_bool(self, key: SettingKey, value: bool) -> Self {
        self.with(key.id(), SettingValue::Bool(value))
    }

    pub fn with_choice(self, key: SettingKey, option_id: &str) -> Self {
        self.with(key.id(), SettingValue::Choice(option_id.into()))
    }

    pub fn with_double(self, key: SettingKey, value: f64) -> Self {
        self.with(key.id(), SettingValue::Double(value))
    }

    pub fn push(&mut self, id: &str, value: SettingValue) {
        self.entries.push((id.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }
}

/// Every user configurable rendering parameter of one face
///
/// Replaced as a whole on every change, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchFaceState {
    pub active_color_style: StyleOption,
    pub ambient_color_style: StyleOption,
    pub layout_style: LayoutOption,
    pub draw_date: bool,
    pub time_always_on: bool,
    pub draw_complication_circles: bool,
    pub complications_always_on: bool,
    pub minute_dial_always_on: bool,
    pub active_as_ambient: bool,
    pub style_icon_enabled: bool,
    pub low_power: bool,
    pub shift_pixel_amount: f32,
}

impl WatchFaceState {
    /// Default state, with colors taken from the catalog
    pub fn new(catalog: &StyleCatalog) -> Self {
        Self {
            active_color_style: catalog.default_active_style().clone(),
            ambient_color_style: catalog.default_ambient_style().clone(),
            layout_style: LAYOUT_OPTIONS[0],
            draw_date: DRAW_DATE_DEFAULT,
            time_always_on: TIME_ALWAYS_ON_DEFAULT,
            draw_complication_circles: DRAW_COMPLICATION_CIRCLES_DEFAULT,
            complications_always_on: COMPLICATIONS_ALWAYS_ON_DEFAULT,
            minute_dial_always_on: MINUTE_DIAL_ALWAYS_ON_DEFAULT,
            active_as_ambient: ACTIVE_AS_AMBIENT_DEFAULT,
            style_icon_enabled: STYLE_ICON_DEFAULT,
            low_power: LOW_POWER_DEFAULT,
            shift_pixel_amount: SHIFT_PIXEL_DEFAULT,
        }
    }

    /// Whether the two states resolve to different palettes
    pub fn colors_differ(&self, other: &WatchFaceState) -> bool {
        self.active_color_style != other.active_color_style
            || self.ambient_color_style != other.ambient_color_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::catalog::{AMBIENT_STYLE_ID, BLUE_STYLE_ID, FULL_FACE_STYLE_ID};

    #[test]
    fn setting_ids_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::from_id(key.id()), Some(key));
        }
        assert_eq!(SettingKey::from_id("hands_style_setting"), None);
    }

    #[test]
    fn defaults_are_fully_populated() {
        let state = WatchFaceState::new(&StyleCatalog::new());
        assert_eq!(state.active_color_style.id, BLUE_STYLE_ID);
        assert_eq!(state.ambient_color_style.id, AMBIENT_STYLE_ID);
        assert_eq!(state.layout_style.id, FULL_FACE_STYLE_ID);
        assert!(state.draw_date && state.time_always_on && state.draw_complication_circles);
        assert!(state.complications_always_on && state.minute_dial_always_on);
        assert!(state.style_icon_enabled);
        assert!(!state.active_as_ambient && !state.low_power);
        assert_eq!(state.shift_pixel_amount, SHIFT_PIXEL_DEFAULT);
    }

    #[test]
    fn user_style_keeps_insertion_order() {
        let style = UserStyle::new()
            .with_bool(SettingKey::DrawDate, false)
            .with("unknown_setting", SettingValue::Bool(true))
            .with_double(SettingKey::ShiftPixels, 3.0);
        let ids: Vec<&str> = style.iter().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            ["draw_date_style_setting", "unknown_setting", "shift_pixels_style_setting"]
        );
        assert_eq!(style.len(), 3);
    }
}
