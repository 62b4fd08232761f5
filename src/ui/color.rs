//! ARGB colors as stored in the style catalog

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// 32 bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct StyleColor(pub u32);

impl StyleColor {
    pub const BLACK: StyleColor = StyleColor(0xff00_0000);
    pub const WHITE: StyleColor = StyleColor(0xffff_ffff);
    /// Half transparent black, used for backing circles and shadows
    pub const BLACK_50: StyleColor = StyleColor(0x8000_0000);

    pub const fn argb(value: u32) -> Self {
        Self(value)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00ff_ffff) | (alpha as u32) << 24)
    }

    /// Halve every color channel, keeping alpha
    pub fn darken(self) -> Self {
        let half = |c: u8| -> u32 { libm::roundf(c as f32 * 0.5).min(255.0) as u32 };
        Self(
            (self.0 & 0xff00_0000)
                | half(self.red()) << 16
                | half(self.green()) << 8
                | half(self.blue()),
        )
    }

    /// Composite onto an opaque background
    pub fn over(self, background: StyleColor) -> Rgb888 {
        let alpha = self.alpha() as u32;
        let mix = |fg: u8, bg: u8| -> u8 {
            ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb888::new(
            mix(self.red(), background.red()),
            mix(self.green(), background.green()),
            mix(self.blue(), background.blue()),
        )
    }

    /// Drop alpha
    pub fn opaque(self) -> Rgb888 {
        Rgb888::new(self.red(), self.green(), self.blue())
    }
}

impl From<Rgb888> for StyleColor {
    fn from(color: Rgb888) -> Self {
        Self::from_rgb(color.r(), color.g(), color.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_halves_channels_and_keeps_alpha() {
        assert_eq!(StyleColor(0xffaa_5555).darken(), StyleColor(0xff55_2b2b));
        assert_eq!(StyleColor(0x80ff_ffff).darken(), StyleColor(0x8080_8080));
    }

    #[test]
    fn over_blends_alpha() {
        assert_eq!(StyleColor::WHITE.over(StyleColor::BLACK), Rgb888::WHITE);
        assert_eq!(StyleColor(0x00ff_ffff).over(StyleColor::BLACK), Rgb888::BLACK);
        assert_eq!(StyleColor(0x80ff_ffff).over(StyleColor::BLACK), Rgb888::new(128, 128, 128));
    }

    #[test]
    fn round_trips_through_rgb888() {
        let color = StyleColor::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(StyleColor::from(color.opaque()), color);
        assert_eq!(color.with_alpha(0x80).alpha(), 0x80);
    }
}
