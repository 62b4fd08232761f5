//! Complication slots
//!
//! Content comes from the platform; this module decides where each slot sits
//! for the current layout, which colors it is styled with and whether it is
//! drawn at all.

use embedded_graphics::{pixelcolor::Rgb888, prelude::DrawTarget, primitives::Rectangle};

use super::{
    catalog::LayoutKind,
    color::StyleColor,
    geometry::FracRect,
    palette::{Appearance, ResolvedPalette},
    state::WatchFaceState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum ComplicationSlotId {
    Left = 100,
    Right = 101,
    Middle = 102,
}

impl ComplicationSlotId {
    pub const ALL: [ComplicationSlotId; 3] = [
        ComplicationSlotId::Left,
        ComplicationSlotId::Right,
        ComplicationSlotId::Middle,
    ];

    /// Numeric id shared with the complication framework
    pub const fn id(self) -> u32 {
        self as u32
    }
}

/// Base bounds of the three slots, in fractions of the face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotBounds {
    pub left: FracRect,
    pub right: FracRect,
    pub middle: FracRect,
}

impl SlotBounds {
    pub const CONCENTRIC: SlotBounds = SlotBounds {
        left: FracRect::new(0.38, 0.12, 0.62, 0.36),
        right: FracRect::new(0.38, 0.65, 0.62, 0.89),
        middle: FracRect::new(0.48, 0.38, 0.72, 0.62),
    };

    pub const REVEAL_ANALOG: SlotBounds = SlotBounds {
        left: FracRect::new(0.40, 0.12, 0.60, 0.32),
        right: FracRect::new(0.40, 0.68, 0.60, 0.88),
        middle: FracRect::new(0.50, 0.385, 0.75, 0.625),
    };

    pub const REVEAL_DIGITAL: SlotBounds = SlotBounds {
        left: FracRect::new(0.38, 0.69, 0.62, 0.93),
        right: FracRect::new(0.13, 0.53, 0.37, 0.77),
        middle: FracRect::new(0.63, 0.53, 0.87, 0.77),
    };

    pub fn get(&self, slot: ComplicationSlotId) -> FracRect {
        match slot {
            ComplicationSlotId::Left => self.left,
            ComplicationSlotId::Right => self.right,
            ComplicationSlotId::Middle => self.middle,
        }
    }
}

/// Horizontal shift applied to every slot for a layout
pub fn layout_offset(layout: LayoutKind) -> f32 {
    match layout {
        LayoutKind::FullFace => 0.0,
        LayoutKind::HalfFace => 0.26,
        LayoutKind::ScaledHalfFace => -0.25,
    }
}

const OFF_SURFACE_SHIFT: f32 = 1.5;

/// Where a slot sits this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub bounds: FracRect,
    pub visible: bool,
}

/// Bounds of `slot` for `layout`
///
/// With `layout_aware` unset every slot keeps its base bounds. Otherwise the
/// middle slot only exists on the plain half face and is parked off the
/// surface on every other layout.
pub fn place_slot(
    base: &SlotBounds,
    slot: ComplicationSlotId,
    layout: LayoutKind,
    layout_aware: bool,
) -> SlotPlacement {
    let bounds = base.get(slot);
    if !layout_aware {
        return SlotPlacement {
            bounds,
            visible: true,
        };
    }

    let offset = layout_offset(layout);
    if slot == ComplicationSlotId::Middle && layout != LayoutKind::HalfFace {
        SlotPlacement {
            bounds: bounds.shifted_x(offset + OFF_SURFACE_SHIFT),
            visible: false,
        }
    } else {
        SlotPlacement {
            bounds: bounds.shifted_x(offset),
            visible: true,
        }
    }
}

/// Colors of a slot in one appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotColors {
    pub icon: StyleColor,
    pub highlight: StyleColor,
    pub title: StyleColor,
    pub text: StyleColor,
    pub ranged_value: StyleColor,
}

/// Styling pushed to every enabled slot when the face state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplicationStyle {
    pub active: SlotColors,
    pub ambient: SlotColors,
    pub draw_circles: bool,
    pub style_icon: bool,
    pub active_in_ambient: bool,
}

impl ComplicationStyle {
    pub fn from_state(state: &WatchFaceState, palette: &ResolvedPalette) -> Self {
        let slot_colors = |appearance| {
            let colors = palette.colors(appearance);
            SlotColors {
                icon: colors.primary,
                highlight: colors.primary,
                title: colors.primary,
                text: colors.primary_text,
                ranged_value: colors.secondary,
            }
        };
        let active = slot_colors(Appearance::Active);
        let ambient = if state.active_as_ambient {
            active
        } else {
            slot_colors(Appearance::Ambient)
        };

        Self {
            active,
            ambient,
            draw_circles: state.draw_complication_circles,
            style_icon: state.style_icon_enabled,
            active_in_ambient: state.active_as_ambient,
        }
    }

    pub fn colors(&self, appearance: Appearance) -> &SlotColors {
        match appearance {
            Appearance::Active => &self.active,
            Appearance::Ambient => &self.ambient,
        }
    }
}

/// Backing circle drawn under each slot when enabled
pub const BACKING_CIRCLE_COLOR: StyleColor = StyleColor::BLACK_50;

/// Platform side of the complication slots
pub trait ComplicationHost {
    /// A data source is bound to the slot
    fn is_enabled(&self, slot: ComplicationSlotId) -> bool;

    fn apply_style(&mut self, slot: ComplicationSlotId, style: &ComplicationStyle);

    fn update_bounds(&mut self, slot: ComplicationSlotId, bounds: FracRect);

    /// Draw the slot content into `area` of the target
    fn render<D>(
        &mut self,
        slot: ComplicationSlotId,
        target: &mut D,
        area: Rectangle,
        appearance: Appearance,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>;
}

/// Host without any slots, for faces shown without complications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoComplications;

impl ComplicationHost for NoComplications {
    fn is_enabled(&self, _slot: ComplicationSlotId) -> bool {
        false
    }

    fn apply_style(&mut self, _slot: ComplicationSlotId, _style: &ComplicationStyle) {}

    fn update_bounds(&mut self, _slot: ComplicationSlotId, _bounds: FracRect) {}

    fn render<D>(
        &mut self,
        _slot: ComplicationSlotId,
        _target: &mut D,
        _area: Rectangle,
        _appearance: Appearance,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::catalog::{StyleCatalog, AMBIENT_STYLE_ID, RED_STYLE_ID};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn slot_ids_match_the_framework() {
        let ids: [u32; 3] = ComplicationSlotId::ALL.map(ComplicationSlotId::id);
        assert_eq!(ids, [100, 101, 102]);
    }

    #[test]
    fn half_face_shifts_slots_right() {
        let placed = place_slot(
            &SlotBounds::CONCENTRIC,
            ComplicationSlotId::Left,
            LayoutKind::HalfFace,
            true,
        );
        assert!(placed.visible);
        assert!(close(placed.bounds.left, 0.64));
        assert!(close(placed.bounds.right, 0.88));
        assert!(close(placed.bounds.top, 0.12));
    }

    #[test]
    fn middle_slot_only_shows_on_the_half_face() {
        let half = place_slot(
            &SlotBounds::CONCENTRIC,
            ComplicationSlotId::Middle,
            LayoutKind::HalfFace,
            true,
        );
        assert!(half.visible);
        assert!(close(half.bounds.left, 0.74));

        let full = place_slot(
            &SlotBounds::CONCENTRIC,
            ComplicationSlotId::Middle,
            LayoutKind::FullFace,
            true,
        );
        assert!(!full.visible);
        assert!(close(full.bounds.left, 1.98));

        let scaled = place_slot(
            &SlotBounds::CONCENTRIC,
            ComplicationSlotId::Middle,
            LayoutKind::ScaledHalfFace,
            true,
        );
        assert!(!scaled.visible);
        assert!(close(scaled.bounds.left, 0.48 - 0.25 + 1.5));
    }

    #[test]
    fn reveal_faces_ignore_layout() {
        let placed = place_slot(
            &SlotBounds::REVEAL_DIGITAL,
            ComplicationSlotId::Middle,
            LayoutKind::HalfFace,
            false,
        );
        assert!(placed.visible);
        assert_eq!(placed.bounds, SlotBounds::REVEAL_DIGITAL.middle);
    }

    #[test]
    fn ambient_colors_mirror_active_when_requested() {
        let catalog = StyleCatalog::new();
        let mut state = WatchFaceState::new(&catalog);
        state.active_color_style = catalog.lookup_color_style(RED_STYLE_ID).clone();
        let palette = ResolvedPalette::resolve(&catalog, RED_STYLE_ID, AMBIENT_STYLE_ID);

        let style = ComplicationStyle::from_state(&state, &palette);
        assert_eq!(style.active.icon, palette.active.primary);
        assert_eq!(style.ambient.text, palette.ambient.primary_text);
        assert!(!style.active_in_ambient);

        state.active_as_ambient = true;
        let style = ComplicationStyle::from_state(&state, &palette);
        assert_eq!(style.ambient, style.active);
        assert!(style.active_in_ambient);
    }
}
