//! Style update reducer
//!
//! Folds a batch of user style settings into a new [`WatchFaceState`]. Each
//! recognised entry produces a copy of the state with exactly one field
//! replaced; the copy is threaded into the next entry so a batch composes in
//! the order it was delivered. Unknown setting ids are skipped.

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

use super::{
    catalog::StyleCatalog,
    state::{SettingKey, SettingValue, UserStyle, WatchFaceState},
};
use crate::error::Error;

/// Single consumer queue of style batches, drained by the renderer
pub type StyleUpdateChannel<M, const N: usize> = Channel<M, UserStyle, N>;

/// Result of folding one batch
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub state: WatchFaceState,
    /// The shift distance changed, so cached geometry must be rebuilt once
    pub shift_pixels_changed: bool,
    /// Entries skipped for carrying the wrong value type
    pub rejected: usize,
}

impl Reduction {
    pub fn changed(&self, previous: &WatchFaceState) -> bool {
        self.state != *previous
    }
}

/// Fold `style` into `current`
pub fn reduce(catalog: &StyleCatalog, current: &WatchFaceState, style: &UserStyle) -> Reduction {
    let mut state = current.clone();
    let mut rejected = 0;

    for (id, value) in style.iter() {
        let Some(key) = SettingKey::from_id(id) else {
            debug!("ignoring unknown setting {}", id);
            continue;
        };
        match apply_setting(catalog, &state, key, value) {
            Ok(next) => state = next,
            Err(_) => {
                warn!("setting {} carried a value of the wrong type", id);
                rejected += 1;
            }
        }
    }

    let shift_pixels_changed = state.shift_pixel_amount != current.shift_pixel_amount;
    Reduction {
        state,
        shift_pixels_changed,
        rejected,
    }
}

/// Copy of `state` with the field behind `key` replaced
pub fn apply_setting(
    catalog: &StyleCatalog,
    state: &WatchFaceState,
    key: SettingKey,
    value: &SettingValue,
) -> Result<WatchFaceState, Error> {
    let mismatch = Error::ValueTypeMismatch(key);
    let base = state.clone();

    let next = match (key, value) {
        (SettingKey::ColorStyle, SettingValue::Choice(id)) => WatchFaceState {
            active_color_style: catalog.lookup_color_style(id).clone(),
            ..base
        },
        (SettingKey::LayoutStyle, SettingValue::Choice(id)) => WatchFaceState {
            layout_style: *catalog.lookup_layout_style(id),
            ..base
        },
        (SettingKey::ShiftPixels, SettingValue::Double(amount)) => WatchFaceState {
            shift_pixel_amount: *amount as f32,
            ..base
        },
        (SettingKey::ColorStyle | SettingKey::LayoutStyle | SettingKey::ShiftPixels, _) => {
            return Err(mismatch)
        }
        (_, SettingValue::Bool(enabled)) => {
            let enabled = *enabled;
            match key {
                SettingKey::StyleIcon => WatchFaceState {
                    style_icon_enabled: enabled,
                    ..base
                },
                SettingKey::DrawTimeAlwaysOn => WatchFaceState {
                    time_always_on: enabled,
                    ..base
                },
                SettingKey::DrawDate => WatchFaceState {
                    draw_date: enabled,
                    ..base
                },
                SettingKey::DrawComplicationCircles => WatchFaceState {
                    draw_complication_circles: enabled,
                    ..base
                },
                SettingKey::ComplicationsAlwaysOn => WatchFaceState {
                    complications_always_on: enabled,
                    ..base
                },
                SettingKey::ActiveAsAmbient => WatchFaceState {
                    active_as_ambient: enabled,
                    ..base
                },
                SettingKey::MinuteDialAlwaysOn => WatchFaceState {
                    minute_dial_always_on: enabled,
                    ..base
                },
                SettingKey::LowPower => WatchFaceState {
                    low_power: enabled,
                    ..base
                },
                SettingKey::ColorStyle | SettingKey::LayoutStyle | SettingKey::ShiftPixels => {
                    return Err(mismatch)
                }
            }
        }
        _ => return Err(mismatch),
    };

    Ok(next)
}

/// Queue a batch without waiting
pub fn try_submit<M: RawMutex, const N: usize>(
    channel: &StyleUpdateChannel<M, N>,
    style: UserStyle,
) -> Result<(), Error> {
    channel.try_send(style).map_err(|_| Error::UpdateQueueFull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::catalog::{LayoutKind, HALF_FACE_STYLE_ID, RED_STYLE_ID, BLUE_STYLE_ID};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn setup() -> (StyleCatalog, WatchFaceState) {
        let catalog = StyleCatalog::new();
        let state = WatchFaceState::new(&catalog);
        (catalog, state)
    }

    #[test]
    fn empty_batch_leaves_state_unchanged() {
        let (catalog, state) = setup();
        let reduction = reduce(&catalog, &state, &UserStyle::new());
        assert_eq!(reduction.state, state);
        assert!(!reduction.changed(&state));
        assert!(!reduction.shift_pixels_changed);
    }

    #[test]
    fn single_setting_replaces_one_field() {
        let (catalog, state) = setup();
        let style = UserStyle::new().with_bool(SettingKey::LowPower, true);
        let reduction = reduce(&catalog, &state, &style);
        assert_eq!(
            reduction.state,
            WatchFaceState {
                low_power: true,
                ..state.clone()
            }
        );
    }

    #[test]
    fn entries_compose_in_delivery_order() {
        let (catalog, state) = setup();
        let style = UserStyle::new()
            .with_choice(SettingKey::ColorStyle, RED_STYLE_ID)
            .with_choice(SettingKey::LayoutStyle, HALF_FACE_STYLE_ID)
            .with_choice(SettingKey::ColorStyle, BLUE_STYLE_ID);
        let reduction = reduce(&catalog, &state, &style);
        assert_eq!(reduction.state.active_color_style.id, BLUE_STYLE_ID);
        assert_eq!(reduction.state.layout_style.kind, LayoutKind::HalfFace);
    }

    #[test]
    fn unknown_keys_and_mismatched_values_are_skipped() {
        let (catalog, state) = setup();
        let style = UserStyle::new()
            .with("hands_style_setting", SettingValue::Bool(false))
            .with(SettingKey::DrawDate.id(), SettingValue::Double(1.0))
            .with(SettingKey::ShiftPixels.id(), SettingValue::Bool(true));
        let reduction = reduce(&catalog, &state, &style);
        assert_eq!(reduction.state, state);
        assert_eq!(reduction.rejected, 2);
    }

    #[test]
    fn shift_flag_tracks_value_changes_only() {
        let (catalog, state) = setup();
        let same = UserStyle::new().with_double(SettingKey::ShiftPixels, 5.0);
        assert!(!reduce(&catalog, &state, &same).shift_pixels_changed);

        let different = UserStyle::new().with_double(SettingKey::ShiftPixels, 8.0);
        let reduction = reduce(&catalog, &state, &different);
        assert!(reduction.shift_pixels_changed);
        assert_eq!(reduction.state.shift_pixel_amount, 8.0);
    }

    #[test]
    fn stale_color_id_resolves_to_default() {
        let (catalog, state) = setup();
        let style = UserStyle::new().with_choice(SettingKey::ColorStyle, "ff123456_style_id");
        let reduction = reduce(&catalog, &state, &style);
        assert_eq!(reduction.state.active_color_style.id, BLUE_STYLE_ID);
    }

    #[test]
    fn full_queue_is_reported() {
        let channel: StyleUpdateChannel<NoopRawMutex, 1> = Channel::new();
        assert_eq!(try_submit(&channel, UserStyle::new()), Ok(()));
        assert_eq!(
            try_submit(&channel, UserStyle::new()),
            Err(Error::UpdateQueueFull)
        );
    }
}
