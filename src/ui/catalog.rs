//! Style catalogs
//!
//! The color catalog is built once at startup from the named styles below
//! plus a generated range of RGB variants, and never changes afterwards.
//! Lookups are total: an unknown id falls back to the first entry so a
//! style saved against an older catalog keeps working.

use alloc::{format, string::String, vec::Vec};

use super::color::StyleColor;

pub const BLUE_STYLE_ID: &str = "blue_style_id";
pub const RED_STYLE_ID: &str = "red_style_id";
pub const GREEN_STYLE_ID: &str = "green_style_id";
pub const YELLOW_STYLE_ID: &str = "yellow_style_id";
pub const PURPLE_STYLE_ID: &str = "purple_style_id";
pub const GOLD_STYLE_ID: &str = "gold_style_id";
pub const BLACK_GOLD_STYLE_ID: &str = "black_gold_style_id";
pub const ROSEGOLD_STYLE_ID: &str = "rosegold_style_id";
pub const SILVER_STYLE_ID: &str = "silver_style_id";
pub const WHITE_STYLE_ID: &str = "white_style_id";
pub const AMBIENT_STYLE_ID: &str = "ambient_style_id";

pub const FULL_FACE_STYLE_ID: &str = "fullface_style_id";
pub const HALF_FACE_STYLE_ID: &str = "halfface_style_id";
pub const SCALED_HALF_FACE_STYLE_ID: &str = "scaled_halfface_style_id";

/// Channel steps of the generated RGB variants
const GENERATED_STEPS: [u8; 3] = [85, 170, 255];
const GENERATED_OUTER_ELEMENT: StyleColor = StyleColor(0x80ff_ffff);

/// One selectable color style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOption {
    pub id: String,
    pub display_name: String,
    pub primary: StyleColor,
    pub primary_text: StyleColor,
    pub secondary: StyleColor,
    pub background: StyleColor,
    pub outer_element: StyleColor,
}

struct NamedStyle {
    id: &'static str,
    name: &'static str,
    primary: u32,
    primary_text: u32,
    secondary: u32,
    background: u32,
    outer_element: u32,
}

impl NamedStyle {
    fn to_option(&self) -> StyleOption {
        StyleOption {
            id: self.id.into(),
            display_name: self.name.into(),
            primary: StyleColor(self.primary),
            primary_text: StyleColor(self.primary_text),
            secondary: StyleColor(self.secondary),
            background: StyleColor(self.background),
            outer_element: StyleColor(self.outer_element),
        }
    }
}

#[rustfmt::skip]
const NAMED_STYLES: [NamedStyle; 10] = [
    NamedStyle { id: BLUE_STYLE_ID, name: "Blue", primary: 0xff3f_8efc, primary_text: 0xffff_ffff, secondary: 0xff1a_3f73, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: RED_STYLE_ID, name: "Red", primary: 0xffe5_3935, primary_text: 0xffff_ffff, secondary: 0xff6d_1a19, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: GREEN_STYLE_ID, name: "Green", primary: 0xff43_a047, primary_text: 0xffff_ffff, secondary: 0xff1f_4d21, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: YELLOW_STYLE_ID, name: "Yellow", primary: 0xfffd_d835, primary_text: 0xffff_ffff, secondary: 0xff7a_6819, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: PURPLE_STYLE_ID, name: "Purple", primary: 0xff8e_24aa, primary_text: 0xffff_ffff, secondary: 0xff43_1152, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: GOLD_STYLE_ID, name: "Gold", primary: 0xffd4_af37, primary_text: 0xffff_f8e1, secondary: 0xff6b_5a1e, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: BLACK_GOLD_STYLE_ID, name: "Black Gold", primary: 0xffd4_af37, primary_text: 0xffd4_af37, secondary: 0xff20_2020, background: 0xff00_0000, outer_element: 0x80d4_af37 },
    NamedStyle { id: ROSEGOLD_STYLE_ID, name: "Rose Gold", primary: 0xffb7_6e79, primary_text: 0xffff_ffff, secondary: 0xff5c_373d, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: SILVER_STYLE_ID, name: "Silver", primary: 0xffc0_c0c0, primary_text: 0xffff_ffff, secondary: 0xff5f_5f5f, background: 0xff00_0000, outer_element: 0x80ff_ffff },
    NamedStyle { id: WHITE_STYLE_ID, name: "White", primary: 0xffff_ffff, primary_text: 0xffff_ffff, secondary: 0xff80_8080, background: 0xff00_0000, outer_element: 0x80ff_ffff },
];

#[rustfmt::skip]
const AMBIENT_STYLE: NamedStyle = NamedStyle {
    id: AMBIENT_STYLE_ID, name: "Ambient", primary: 0xffff_ffff, primary_text: 0xffff_ffff, secondary: 0xff66_6666, background: 0xff00_0000, outer_element: 0x80ff_ffff,
};

/// Face geometry variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum LayoutKind {
    /// Full circular face
    FullFace,
    /// Face shifted left, leaving room for the digital time
    HalfFace,
    /// Half face drawn enlarged
    ScaledHalfFace,
}

impl LayoutKind {
    pub fn is_half_face(self) -> bool {
        matches!(self, LayoutKind::HalfFace | LayoutKind::ScaledHalfFace)
    }
}

/// One selectable layout style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOption {
    pub kind: LayoutKind,
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon_id: &'static str,
    pub complication_style_id: &'static str,
}

pub const LAYOUT_OPTIONS: [LayoutOption; 3] = [
    LayoutOption {
        kind: LayoutKind::FullFace,
        id: FULL_FACE_STYLE_ID,
        display_name: "Full Face",
        icon_id: "fullface",
        complication_style_id: "fullface",
    },
    LayoutOption {
        kind: LayoutKind::HalfFace,
        id: HALF_FACE_STYLE_ID,
        display_name: "Half Face",
        icon_id: "halfface",
        complication_style_id: "halfface",
    },
    LayoutOption {
        kind: LayoutKind::ScaledHalfFace,
        id: SCALED_HALF_FACE_STYLE_ID,
        display_name: "Scaled Half Face",
        icon_id: "scaled_halfface",
        complication_style_id: "scaled_halfface",
    },
];

/// Look up a layout style, falling back to the full face
pub fn lookup_layout_style(id: &str) -> &'static LayoutOption {
    match LAYOUT_OPTIONS.iter().find(|layout| layout.id == id) {
        Some(layout) => layout,
        None => {
            debug!("unknown layout style {}, using full face", id);
            &LAYOUT_OPTIONS[0]
        }
    }
}

pub fn next_layout_style(id: &str) -> &'static LayoutOption {
    &LAYOUT_OPTIONS[step(layout_index(id), 1, LAYOUT_OPTIONS.len())]
}

pub fn previous_layout_style(id: &str) -> &'static LayoutOption {
    &LAYOUT_OPTIONS[step(layout_index(id), -1, LAYOUT_OPTIONS.len())]
}

fn layout_index(id: &str) -> usize {
    LAYOUT_OPTIONS
        .iter()
        .position(|layout| layout.id == id)
        .unwrap_or(0)
}

fn step(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

/// Immutable catalog of color styles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCatalog {
    colors: Vec<StyleOption>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleCatalog {
    /// Build the catalog: named styles, generated RGB variants, then the ambient style
    pub fn new() -> Self {
        let mut colors: Vec<StyleOption> = NAMED_STYLES.iter().map(NamedStyle::to_option).collect();

        for r in GENERATED_STEPS {
            for g in GENERATED_STEPS {
                for b in GENERATED_STEPS {
                    let primary = StyleColor::from_rgb(r, g, b);
                    let id = format!("{:08x}_style_id", primary.0);
                    if colors.iter().any(|style| style.id == id) {
                        continue;
                    }
                    colors.push(StyleOption {
                        display_name: format!("{:06x}", primary.0 & 0x00ff_ffff),
                        id,
                        primary,
                        primary_text: StyleColor::WHITE,
                        secondary: primary.darken(),
                        background: StyleColor::BLACK,
                        outer_element: GENERATED_OUTER_ELEMENT,
                    });
                }
            }
        }

        colors.push(AMBIENT_STYLE.to_option());
        debug!("style catalog built with {} color styles", colors.len());

        Self { colors }
    }

    pub fn color_styles(&self) -> &[StyleOption] {
        &self.colors
    }

    pub fn default_active_style(&self) -> &StyleOption {
        self.lookup_color_style(BLUE_STYLE_ID)
    }

    pub fn default_ambient_style(&self) -> &StyleOption {
        self.lookup_color_style(AMBIENT_STYLE_ID)
    }

    /// Look up a color style, falling back to the first entry
    pub fn lookup_color_style(&self, id: &str) -> &StyleOption {
        match self.colors.iter().find(|style| style.id == id) {
            Some(style) => style,
            None => {
                debug!("unknown color style {}, using default", id);
                &self.colors[0]
            }
        }
    }

    pub fn contains_color_style(&self, id: &str) -> bool {
        self.colors.iter().any(|style| style.id == id)
    }

    pub fn lookup_layout_style(&self, id: &str) -> &'static LayoutOption {
        lookup_layout_style(id)
    }

    /// Next color style, wrapping around
    pub fn next_color_style(&self, id: &str) -> &StyleOption {
        &self.colors[step(self.color_index(id), 1, self.colors.len())]
    }

    /// Previous color style, wrapping around
    pub fn previous_color_style(&self, id: &str) -> &StyleOption {
        &self.colors[step(self.color_index(id), -1, self.colors.len())]
    }

    fn color_index(&self, id: &str) -> usize {
        self.colors
            .iter()
            .position(|style| style.id == id)
            .unwrap_or(0)
    }
}
