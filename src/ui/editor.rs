//! Settings editor
//!
//! Backs a configuration screen: every setter updates the editor's copy of
//! the face state and returns the style batch to hand to the renderer.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{
    catalog::{next_layout_style, previous_layout_style, StyleCatalog},
    reducer::{reduce, try_submit, StyleUpdateChannel},
    state::{SettingKey, UserStyle, WatchFaceState, SHIFT_PIXEL_MINIMUM},
};
use crate::error::Error;

/// Slider units per pixel of shift distance
pub const MULTIPLE_FOR_SLIDER: f32 = 1.0;

/// Shift distance for a slider position, clamped to the variant's range
pub fn slider_to_shift_pixels(value: f32, shift_pixel_max: f32) -> f32 {
    (value / MULTIPLE_FOR_SLIDER).clamp(SHIFT_PIXEL_MINIMUM, shift_pixel_max.max(SHIFT_PIXEL_MINIMUM))
}

pub fn shift_pixels_to_slider(shift: f32) -> f32 {
    shift * MULTIPLE_FOR_SLIDER
}

pub struct StyleEditor<'c> {
    catalog: &'c StyleCatalog,
    state: WatchFaceState,
    shift_pixel_max: f32,
}

impl<'c> StyleEditor<'c> {
    pub fn new(catalog: &'c StyleCatalog, state: WatchFaceState, shift_pixel_max: f32) -> Self {
        Self {
            catalog,
            state,
            shift_pixel_max,
        }
    }

    pub fn state(&self) -> &WatchFaceState {
        &self.state
    }

    pub fn select_color_style(&mut self, id: &str) -> UserStyle {
        self.apply(UserStyle::new().with_choice(SettingKey::ColorStyle, id))
    }

    pub fn next_color_style(&mut self) -> UserStyle {
        let next = self.catalog.next_color_style(&self.state.active_color_style.id);
        self.apply(UserStyle::new().with_choice(SettingKey::ColorStyle, &next.id))
    }

    pub fn previous_color_style(&mut self) -> UserStyle {
        let previous = self
            .catalog
            .previous_color_style(&self.state.active_color_style.id);
        self.apply(UserStyle::new().with_choice(SettingKey::ColorStyle, &previous.id))
    }

    pub fn select_layout_style(&mut self, id: &str) -> UserStyle {
        self.apply(UserStyle::new().with_choice(SettingKey::LayoutStyle, id))
    }

    pub fn next_layout_style(&mut self) -> UserStyle {
        let next = next_layout_style(self.state.layout_style.id);
        self.apply(UserStyle::new().with_choice(SettingKey::LayoutStyle, next.id))
    }

    pub fn previous_layout_style(&mut self) -> UserStyle {
        let previous = previous_layout_style(self.state.layout_style.id);
        self.apply(UserStyle::new().with_choice(SettingKey::LayoutStyle, previous.id))
    }

    /// Flip one of the boolean settings
    pub fn set_toggle(&mut self, key: SettingKey, enabled: bool) -> UserStyle {
        self.apply(UserStyle::new().with_bool(key, enabled))
    }

    pub fn set_shift_pixels_from_slider(&mut self, value: f32) -> UserStyle {
        let shift = slider_to_shift_pixels(value, self.shift_pixel_max);
        self.apply(UserStyle::new().with_double(SettingKey::ShiftPixels, shift as f64))
    }

    /// Slider position for the current shift distance
    pub fn shift_pixels_slider_value(&self) -> f32 {
        shift_pixels_to_slider(self.state.shift_pixel_amount)
    }

    /// Queue a batch for the renderer without waiting
    pub fn submit<M: RawMutex, const N: usize>(
        &self,
        channel: &StyleUpdateChannel<M, N>,
        style: UserStyle,
    ) -> Result<(), Error> {
        try_submit(channel, style)
    }

    fn apply(&mut self, style: UserStyle) -> UserStyle {
        self.state = reduce(self.catalog, &self.state, &style).state;
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::catalog::{
        LayoutKind, BLUE_STYLE_ID, RED_STYLE_ID, SCALED_HALF_FACE_STYLE_ID,
    };
    use crate::ui::state::SettingValue;
    use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};

    fn editor(catalog: &StyleCatalog) -> StyleEditor<'_> {
        StyleEditor::new(catalog, WatchFaceState::new(catalog), 10.0)
    }

    #[test]
    fn slider_round_trip() {
        for shift in [0.0, 2.5, 5.0, 10.0] {
            let back = slider_to_shift_pixels(shift_pixels_to_slider(shift), 10.0);
            assert!((back - shift).abs() < 1e-6);
        }
        assert_eq!(slider_to_shift_pixels(12.0, 10.0), 10.0);
        assert_eq!(slider_to_shift_pixels(-1.0, 10.0), 0.0);
    }

    #[test]
    fn slider_emits_a_double_setting() {
        let catalog = StyleCatalog::new();
        let mut editor = editor(&catalog);
        let style = editor.set_shift_pixels_from_slider(7.0);
        let entries: Vec<_> = style.iter().collect();
        assert_eq!(
            entries,
            [("shift_pixels_style_setting", &SettingValue::Double(7.0))]
        );
        assert_eq!(editor.shift_pixels_slider_value(), 7.0);
    }

    #[test]
    fn color_pickers_wrap() {
        let catalog = StyleCatalog::new();
        let mut editor = editor(&catalog);
        editor.previous_color_style();
        let last = catalog.color_styles().last().unwrap();
        assert_eq!(editor.state().active_color_style.id, last.id);

        editor.next_color_style();
        assert_eq!(editor.state().active_color_style.id, BLUE_STYLE_ID);
        editor.next_color_style();
        assert_eq!(editor.state().active_color_style.id, RED_STYLE_ID);
    }

    #[test]
    fn layout_pickers_wrap() {
        let catalog = StyleCatalog::new();
        let mut editor = editor(&catalog);
        editor.previous_layout_style();
        assert_eq!(editor.state().layout_style.id, SCALED_HALF_FACE_STYLE_ID);
        editor.next_layout_style();
        editor.next_layout_style();
        assert_eq!(editor.state().layout_style.kind, LayoutKind::HalfFace);
    }

    #[test]
    fn submitted_batches_reach_the_channel() {
        let catalog = StyleCatalog::new();
        let mut editor = editor(&catalog);
        let channel: StyleUpdateChannel<NoopRawMutex, 2> = Channel::new();
        let style = editor.set_toggle(SettingKey::DrawDate, false);
        editor.submit(&channel, style.clone()).unwrap();
        assert_eq!(channel.try_receive().ok(), Some(style));
        assert!(!editor.state().draw_date);
    }
}
