//! Drawing helpers shared by the face passes
//!
//! A [`Painter`] draws in face-local float coordinates through a
//! [`Viewport`], resolving translucent style colors against the frame
//! background.

use embedded_graphics::{
    geometry::{AngleUnit, Point, Size},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Primitive},
    primitives::{
        Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, Sector,
    },
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
    PROFONT_7_POINT, PROFONT_9_POINT,
};

use super::{
    color::StyleColor,
    geometry::{FPoint, Viewport},
};

/// Largest font whose glyphs fit in `height` pixels
pub fn font_for_height(height: f32) -> &'static MonoFont<'static> {
    let fonts: [&'static MonoFont<'static>; 7] = [
        &PROFONT_24_POINT,
        &PROFONT_18_POINT,
        &PROFONT_14_POINT,
        &PROFONT_12_POINT,
        &PROFONT_10_POINT,
        &PROFONT_9_POINT,
        &PROFONT_7_POINT,
    ];
    fonts
        .into_iter()
        .find(|font| font.character_size.height as f32 <= height)
        .unwrap_or(&PROFONT_7_POINT)
}

/// Rendered width of `text` in `font`, in pixels
pub fn text_width(text: &str, font: &MonoFont<'_>) -> u32 {
    let count = text.chars().count() as u32;
    count * font.character_size.width + count.saturating_sub(1) * font.character_spacing
}

pub struct Painter<'d, D> {
    target: &'d mut D,
    viewport: Viewport,
    background: StyleColor,
}

impl<'d, D> Painter<'d, D>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    pub fn new(target: &'d mut D, viewport: Viewport, background: StyleColor) -> Self {
        Self {
            target,
            viewport,
            background,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn background(&self) -> StyleColor {
        self.background
    }

    pub fn target(&mut self) -> &mut D {
        self.target
    }

    pub fn color(&self, color: StyleColor) -> D::Color {
        color.over(self.background).into()
    }

    /// Fill a rectangle given in target coordinates
    pub fn fill_area(&mut self, area: &Rectangle, color: StyleColor) -> Result<(), D::Error> {
        let color = self.color(color);
        self.target.fill_solid(area, color)
    }

    pub fn line(
        &mut self,
        from: FPoint,
        to: FPoint,
        width: f32,
        color: StyleColor,
    ) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_stroke(self.color(color), self.viewport.length(width));
        Line::new(self.viewport.point(from), self.viewport.point(to))
            .into_styled(style)
            .draw(self.target)
    }

    /// Thick line with rounded ends, i.e. a rotated rounded rectangle
    pub fn bar(
        &mut self,
        from: FPoint,
        to: FPoint,
        width: f32,
        color: StyleColor,
    ) -> Result<(), D::Error> {
        self.line(from, to, width, color)?;
        self.circle(from, width / 2.0, color)?;
        self.circle(to, width / 2.0, color)
    }

    pub fn circle(&mut self, center: FPoint, radius: f32, color: StyleColor) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_fill(self.color(color));
        Circle::with_center(self.viewport.point(center), self.viewport.length(radius * 2.0))
            .into_styled(style)
            .draw(self.target)
    }

    pub fn ring(
        &mut self,
        center: FPoint,
        radius: f32,
        stroke: f32,
        color: StyleColor,
    ) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_stroke(self.color(color), self.viewport.length(stroke));
        Circle::with_center(self.viewport.point(center), self.viewport.length(radius * 2.0))
            .into_styled(style)
            .draw(self.target)
    }

    pub fn rect(&mut self, top_left: FPoint, bottom_right: FPoint, color: StyleColor) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_fill(self.color(color));
        Rectangle::with_corners(
            self.viewport.point(top_left),
            self.viewport.point(bottom_right),
        )
        .into_styled(style)
        .draw(self.target)
    }

    /// Outline of a rounded rectangle
    pub fn capsule(
        &mut self,
        top_left: FPoint,
        bottom_right: FPoint,
        radius: f32,
        stroke: f32,
        color: StyleColor,
    ) -> Result<(), D::Error> {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(self.color(color))
            .stroke_width(self.viewport.length(stroke))
            .build();
        let corner = self.viewport.length(radius);
        RoundedRectangle::with_equal_corners(
            Rectangle::with_corners(
                self.viewport.point(top_left),
                self.viewport.point(bottom_right),
            ),
            Size::new(corner, corner),
        )
        .into_styled(style)
        .draw(self.target)
    }

    /// Filled pie slice, angles in degrees clockwise from 3 o'clock
    pub fn sector(
        &mut self,
        center: FPoint,
        radius: f32,
        start: f32,
        sweep: f32,
        color: StyleColor,
    ) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_fill(self.color(color));
        Sector::with_center(
            self.viewport.point(center),
            self.viewport.length(radius * 2.0),
            start.deg(),
            sweep.deg(),
        )
        .into_styled(style)
        .draw(self.target)
    }

    /// Text centered vertically on `anchor`, with glyphs at most `height` tall
    pub fn text(
        &mut self,
        text: &str,
        anchor: FPoint,
        height: f32,
        alignment: Alignment,
        color: StyleColor,
    ) -> Result<(), D::Error> {
        let font = font_for_height(height * self.viewport.scale);
        let character_style = MonoTextStyle::new(font, self.color(color));
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, self.viewport.point(anchor), character_style, text_style)
            .draw(self.target)
            .map(|_: Point| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pixel_buffer::PixelBuffer;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn picks_largest_fitting_font() {
        assert_eq!(font_for_height(200.0).character_size, PROFONT_24_POINT.character_size);
        assert_eq!(font_for_height(1.0).character_size, PROFONT_7_POINT.character_size);
    }

    #[test]
    fn text_width_counts_spacing() {
        let font = &PROFONT_7_POINT;
        let expected = 2 * font.character_size.width + font.character_spacing;
        assert_eq!(text_width("88", font), expected);
        assert_eq!(text_width("", font), 0);
    }

    #[test]
    fn translucent_colors_blend_with_background() {
        let mut buffer = PixelBuffer::new(Size::new(8, 8));
        let mut painter = Painter::new(&mut buffer, Viewport::IDENTITY, StyleColor::BLACK);
        painter
            .rect(FPoint::new(0.0, 0.0), FPoint::new(7.0, 7.0), StyleColor(0x80ff_ffff))
            .unwrap();
        assert_eq!(buffer.count(Rgb888::new(128, 128, 128)), 64);
    }

    #[test]
    fn viewport_moves_primitives() {
        let mut buffer = PixelBuffer::new(Size::new(20, 20));
        let viewport = Viewport::IDENTITY.translate(10.0, 10.0);
        let mut painter = Painter::new(&mut buffer, viewport, StyleColor::BLACK);
        painter
            .rect(FPoint::new(0.0, 0.0), FPoint::new(1.0, 1.0), StyleColor::WHITE)
            .unwrap();
        assert_eq!(buffer.pixel(Point::new(10, 10)), Some(Rgb888::WHITE));
        assert_eq!(buffer.pixel(Point::new(0, 0)), Some(Rgb888::BLACK));
    }
}
