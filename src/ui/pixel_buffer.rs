//! In-memory RGB framebuffer

use alloc::{vec, vec::Vec};
use core::convert::Infallible;

use embedded_graphics::{
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Rgb888, RgbColor},
    prelude::DrawTarget,
    Pixel,
};

/// Heap allocated RGB framebuffer
///
/// Backs the pre-rendered seconds dial and works as an off-screen target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl PixelBuffer {
    pub fn new(size: Size) -> Self {
        Self::filled(size, Rgb888::BLACK)
    }

    pub fn filled(size: Size, color: Rgb888) -> Self {
        Self {
            size,
            pixels: vec![color; (size.width * size.height) as usize],
        }
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|index| self.pixels[index])
    }

    pub fn clear(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// Number of pixels with the given color
    pub fn count(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == color).count()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y): (u32, u32) = point.try_into().ok()?;
        if x < self.size.width && y < self.size.height {
            Some((y * self.size.width + x) as usize)
        } else {
            None
        }
    }
}

impl DrawTarget for PixelBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Out of bounds pixels are discarded
        for Pixel(coord, color) in pixels.into_iter() {
            if let Some(index) = self.index(coord) {
                self.pixels[index] = color;
            }
        }

        Ok(())
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn drawing_outside_is_discarded() {
        let mut buffer = PixelBuffer::new(Size::new(4, 4));
        Rectangle::new(Point::new(2, 2), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(&mut buffer)
            .unwrap();
        assert_eq!(buffer.count(Rgb888::RED), 4);
        assert_eq!(buffer.pixel(Point::new(3, 3)), Some(Rgb888::RED));
        assert_eq!(buffer.pixel(Point::new(4, 0)), None);
        assert_eq!(buffer.pixel(Point::new(-1, 0)), None);
    }
}
