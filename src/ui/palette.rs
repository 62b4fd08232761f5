//! Palette resolution
//!
//! Projects the active and ambient color styles into the ten concrete colors
//! the renderer draws with. Resolution is pure; the renderer calls it only
//! when its state changes and reuses the result across frames.

use super::{
    catalog::{StyleCatalog, StyleOption},
    color::StyleColor,
};

/// Which set of colors a frame is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum Appearance {
    Active,
    Ambient,
}

/// The five colors of one appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppearanceColors {
    pub primary: StyleColor,
    pub primary_text: StyleColor,
    pub secondary: StyleColor,
    pub background: StyleColor,
    pub outer_element: StyleColor,
}

impl From<&StyleOption> for AppearanceColors {
    fn from(style: &StyleOption) -> Self {
        Self {
            primary: style.primary,
            primary_text: style.primary_text,
            secondary: style.secondary,
            background: style.background,
            outer_element: style.outer_element,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub active: AppearanceColors,
    pub ambient: AppearanceColors,
}

impl ResolvedPalette {
    /// Resolve the palette from two catalog style ids
    pub fn resolve(catalog: &StyleCatalog, active_id: &str, ambient_id: &str) -> Self {
        Self::from_styles(
            catalog.lookup_color_style(active_id),
            catalog.lookup_color_style(ambient_id),
        )
    }

    pub fn from_styles(active: &StyleOption, ambient: &StyleOption) -> Self {
        Self {
            active: active.into(),
            ambient: ambient.into(),
        }
    }

    pub fn colors(&self, appearance: Appearance) -> &AppearanceColors {
        match appearance {
            Appearance::Active => &self.active,
            Appearance::Ambient => &self.ambient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::catalog::{AMBIENT_STYLE_ID, BLUE_STYLE_ID, RED_STYLE_ID};

    #[test]
    fn resolve_is_deterministic_for_every_pair() {
        let catalog = StyleCatalog::new();
        for active in catalog.color_styles() {
            for ambient in catalog.color_styles().iter().step_by(7) {
                let first = ResolvedPalette::resolve(&catalog, &active.id, &ambient.id);
                let second = ResolvedPalette::resolve(&catalog, &active.id, &ambient.id);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn colors_come_from_the_matching_style() {
        let catalog = StyleCatalog::new();
        let palette = ResolvedPalette::resolve(&catalog, RED_STYLE_ID, AMBIENT_STYLE_ID);
        let red = catalog.lookup_color_style(RED_STYLE_ID);
        let ambient = catalog.lookup_color_style(AMBIENT_STYLE_ID);

        assert_eq!(palette.colors(Appearance::Active).primary, red.primary);
        assert_eq!(palette.colors(Appearance::Active).outer_element, red.outer_element);
        assert_eq!(palette.colors(Appearance::Ambient).secondary, ambient.secondary);
        assert_eq!(palette.colors(Appearance::Ambient).background, ambient.background);
    }

    #[test]
    fn unknown_ids_resolve_like_the_default_style() {
        let catalog = StyleCatalog::new();
        assert_eq!(
            ResolvedPalette::resolve(&catalog, "gone_style_id", AMBIENT_STYLE_ID),
            ResolvedPalette::resolve(&catalog, BLUE_STYLE_ID, AMBIENT_STYLE_ID)
        );
    }
}
