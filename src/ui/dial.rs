//! 60-fold dial passes and the seconds reveal cache

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Rgb888, RgbColor},
    prelude::DrawTarget,
    text::Alignment,
    Pixel,
};

use super::{
    color::StyleColor,
    geometry::{
        clock_point, dial_point, tick_angle, DialDirection, FPoint, FaceBounds, Viewport,
        TICKS_PER_REVOLUTION,
    },
    painter::Painter,
    palette::AppearanceColors,
    pixel_buffer::PixelBuffer,
};

/// Placement of a rotating ring, radii as fractions of the face width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub direction: DialDirection,
    pub outer: f32,
    pub major_inner: f32,
    pub minor_inner: f32,
    pub numeral: f32,
    /// Numeral height as a fraction of the face height
    pub numeral_height: f32,
}

pub const SECONDS_RING: RingGeometry = RingGeometry {
    direction: DialDirection::Clockwise,
    outer: 0.50,
    major_inner: 0.47,
    minor_inner: 0.48,
    numeral: 0.435,
    numeral_height: 0.05,
};

pub const MINUTE_RING: RingGeometry = RingGeometry {
    direction: DialDirection::CounterClockwise,
    outer: 0.38,
    major_inner: 0.35,
    minor_inner: 0.36,
    numeral: 0.30,
    numeral_height: 0.06,
};

const MAJOR_TICK_STROKE: f32 = 4.0;
const MINOR_TICK_STROKE: f32 = 2.0;

/// Draw a ring whose live unit stays at 12 o'clock while the ring turns
pub fn draw_ring<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    ring: &RingGeometry,
    current: u32,
    fraction: f32,
    tick_color: StyleColor,
    numeral_color: StyleColor,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let center = face.center();
    let width = face.width;
    let mut label = [0u8; 4];

    for index in 0..TICKS_PER_REVOLUTION {
        let angle = tick_angle(index, current as f32, fraction, ring.direction);
        let major = index % 5 == 0;
        let (inner, stroke) = if major {
            (ring.major_inner, MAJOR_TICK_STROKE)
        } else {
            (ring.minor_inner, MINOR_TICK_STROKE)
        };
        let from = dial_point(center, inner * width, angle, ring.direction);
        let to = dial_point(center, ring.outer * width, angle, ring.direction);
        painter.line(from, to, stroke, tick_color)?;

        if major {
            if let Ok(text) = format_no_std::show(&mut label, format_args!("{:02}", index)) {
                let at = dial_point(center, ring.numeral * width, angle, ring.direction);
                painter.text(
                    text,
                    at,
                    ring.numeral_height * face.height,
                    Alignment::Center,
                    numeral_color,
                )?;
            }
        }
    }

    Ok(())
}

const REVEAL_TICK_OUTER: f32 = 0.50;
const REVEAL_MAJOR_INNER: f32 = 0.44;
const REVEAL_MINOR_INNER: f32 = 0.48;

/// Fixed 60-tick dial of the reveal faces, every quarter highlighted
pub fn draw_static_dial<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    colors: &AppearanceColors,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let center = face.center();
    for index in 0..TICKS_PER_REVOLUTION {
        let degrees = index as f32 * 6.0;
        let (inner, stroke) = if index % 5 == 0 {
            (REVEAL_MAJOR_INNER, MAJOR_TICK_STROKE)
        } else {
            (REVEAL_MINOR_INNER, MINOR_TICK_STROKE)
        };
        let color = if index % 15 == 0 {
            colors.primary_text
        } else {
            colors.outer_element
        };
        painter.line(
            clock_point(center, inner * face.width, degrees),
            clock_point(center, REVEAL_TICK_OUTER * face.width, degrees),
            stroke,
            color,
        )?;
    }
    Ok(())
}

/// Cutout radius as a fraction of the face height
const CUTOUT_RADIUS: f32 = 0.08;
/// Orbit inset from the face edge, as a fraction of the width
const ORBIT_INSET: f32 = 0.0825;
const CUTOUT_STROKE: f32 = 3.0;
const MARK_LENGTH: f32 = 0.03;
const SECOND_HAND_STROKE: f32 = 2.0;
const MAJOR_NUMERAL_HEIGHT: f32 = 0.075;
const MINOR_NUMERAL_HEIGHT: f32 = 0.05;

/// Precomputed circle coverage of a square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleMask {
    diameter: u32,
    covered: Vec<bool>,
}

impl CircleMask {
    pub fn new(diameter: u32) -> Self {
        let radius = diameter as f32 / 2.0;
        let mut covered = Vec::with_capacity((diameter * diameter) as usize);
        for y in 0..diameter {
            for x in 0..diameter {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                covered.push(dx * dx + dy * dy <= radius * radius);
            }
        }
        Self { diameter, covered }
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// Offsets of the covered pixels
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let diameter = self.diameter;
        self.covered
            .iter()
            .enumerate()
            .filter(|&(_, &covered)| covered)
            .map(move |(index, _)| {
                Point::new((index as u32 % diameter) as i32, (index as u32 / diameter) as i32)
            })
    }
}

/// Pre-rendered seconds numerals, exposed through a circle orbiting the face
///
/// Buffers are allocated on the first draw and kept until the colors change
/// or the face is torn down.
#[derive(Debug, Default)]
pub struct SecondsRevealCache {
    dial: Option<PixelBuffer>,
    mask: Option<CircleMask>,
    result: Option<PixelBuffer>,
}

impl SecondsRevealCache {
    pub const fn new() -> Self {
        Self {
            dial: None,
            mask: None,
            result: None,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.dial.is_some() || self.mask.is_some() || self.result.is_some()
    }

    /// The dial bitmap has to be rendered again before the next reveal
    pub fn is_stale(&self) -> bool {
        self.dial.is_none()
    }

    pub fn needs_rebuild(&self, size: Size) -> bool {
        self.dial.as_ref().map_or(true, |dial| dial.size() != size)
    }

    /// Drop the dial bitmap after its colors changed
    pub fn invalidate_dial(&mut self) {
        if self.dial.take().is_some() {
            debug!("seconds dial invalidated");
        }
    }

    /// Free every buffer
    pub fn release(&mut self) {
        if self.is_allocated() {
            debug!("seconds reveal buffers released");
        }
        self.dial = None;
        self.mask = None;
        self.result = None;
    }

    /// Draw the cutout at `degrees` clockwise from 12, in face-local
    /// coordinates of `painter`
    pub fn draw<D>(
        &mut self,
        painter: &mut Painter<'_, D>,
        face: &FaceBounds,
        colors: &AppearanceColors,
        degrees: f32,
        second_hand: bool,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        let size = Size::new(face.width as u32, face.height as u32);
        if self.needs_rebuild(size) {
            debug!("rendering seconds dial {}x{}", size.width, size.height);
            self.dial = Some(render_numerals(size, colors));
        }

        let radius = CUTOUT_RADIUS * face.height;
        let diameter = ((radius * 2.0) as u32).max(1);
        if self.mask.as_ref().map_or(true, |mask| mask.diameter() != diameter) {
            self.mask = Some(CircleMask::new(diameter));
            self.result = Some(PixelBuffer::new(Size::new(diameter, diameter)));
        }

        let center = face.center();
        let orbit = face.width / 2.0 - face.width * ORBIT_INSET;
        let cutout = clock_point(center, orbit, degrees);
        let corner = FPoint::new(cutout.x - radius, cutout.y - radius).round();

        if let (Some(dial), Some(mask), Some(result)) =
            (self.dial.as_ref(), self.mask.as_ref(), self.result.as_mut())
        {
            for offset in mask.points() {
                let color = dial.pixel(corner + offset).unwrap_or(Rgb888::BLACK);
                result
                    .draw_iter(core::iter::once(Pixel(offset, color)))
                    .unwrap_or_else(|never: Infallible| match never {});
            }

            let viewport = painter.viewport();
            let pixels = mask.points().filter_map(|offset| {
                let color = result.pixel(offset)?;
                let local = corner + offset;
                let at = viewport.point(FPoint::new(local.x as f32, local.y as f32));
                let color: D::Color = color.into();
                Some(Pixel(at, color))
            });
            painter.target().draw_iter(pixels)?;
        }

        painter.ring(cutout, radius, CUTOUT_STROKE, colors.primary)?;
        painter.line(
            clock_point(center, face.width * (0.5 - MARK_LENGTH), degrees),
            clock_point(center, face.width * 0.5, degrees),
            CUTOUT_STROKE,
            colors.primary,
        )?;
        if second_hand {
            painter.line(
                center,
                clock_point(center, orbit - radius, degrees),
                SECOND_HAND_STROKE,
                colors.primary,
            )?;
        }
        Ok(())
    }
}

/// Numerals 00 to 59 on black, majors larger and in the primary color
fn render_numerals(size: Size, colors: &AppearanceColors) -> PixelBuffer {
    let mut dial = PixelBuffer::new(size);
    let width = size.width as f32;
    let height = size.height as f32;
    let center = FPoint::new(width / 2.0, height / 2.0);
    let orbit = width / 2.0 - width * ORBIT_INSET;
    let mut painter = Painter::new(&mut dial, Viewport::IDENTITY, StyleColor::BLACK);
    let mut label = [0u8; 4];

    for second in 0..TICKS_PER_REVOLUTION {
        let Ok(text) = format_no_std::show(&mut label, format_args!("{:02}", second)) else {
            continue;
        };
        let (glyph_height, color) = if second % 5 == 0 {
            (MAJOR_NUMERAL_HEIGHT * height, colors.primary)
        } else {
            (MINOR_NUMERAL_HEIGHT * height, colors.outer_element)
        };
        let at = clock_point(center, orbit, second as f32 * 6.0);
        painter
            .text(text, at, glyph_height, Alignment::Center, color)
            .unwrap_or_else(|never: Infallible| match never {});
    }

    dial
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{catalog::StyleCatalog, palette::ResolvedPalette, palette::Appearance};
    use embedded_graphics::primitives::{PointsIter, Rectangle};

    fn face(size: u32) -> FaceBounds {
        FaceBounds::new(&Rectangle::new(Point::zero(), Size::new(size, size))).unwrap()
    }

    fn colors() -> AppearanceColors {
        let catalog = StyleCatalog::new();
        let palette = ResolvedPalette::resolve(
            &catalog,
            &catalog.default_active_style().id,
            &catalog.default_ambient_style().id,
        );
        *palette.colors(Appearance::Active)
    }

    #[test]
    fn mask_is_symmetric() {
        let mask = CircleMask::new(10);
        let points: Vec<Point> = mask.points().collect();
        assert!(points.contains(&Point::new(5, 5)));
        assert!(!points.contains(&Point::new(0, 0)));
        for p in &points {
            assert!(points.contains(&Point::new(9 - p.x, p.y)));
            assert!(points.contains(&Point::new(p.x, 9 - p.y)));
        }
    }

    #[test]
    fn cache_is_lazy_and_released() {
        let mut cache = SecondsRevealCache::new();
        assert!(!cache.is_allocated());
        assert!(cache.is_stale());

        let mut target = PixelBuffer::new(Size::new(120, 120));
        let mut painter = Painter::new(&mut target, Viewport::IDENTITY, StyleColor::BLACK);
        cache
            .draw(&mut painter, &face(120), &colors(), 90.0, true)
            .unwrap();
        assert!(cache.is_allocated());
        assert!(!cache.is_stale());
        assert!(!cache.needs_rebuild(Size::new(120, 120)));
        assert!(cache.needs_rebuild(Size::new(240, 240)));

        cache.invalidate_dial();
        assert!(cache.is_stale());

        cache.release();
        assert!(!cache.is_allocated());
    }

    #[test]
    fn cutout_follows_the_second() {
        let colors = colors();
        let mut cache = SecondsRevealCache::new();
        let mut target = PixelBuffer::new(Size::new(200, 200));
        let mut painter = Painter::new(&mut target, Viewport::IDENTITY, StyleColor::BLACK);
        cache.draw(&mut painter, &face(200), &colors, 0.0, false).unwrap();

        // Ring stroke around the cutout near 12 o'clock, nothing near 6
        let primary = colors.primary.opaque();
        let top = Rectangle::new(Point::new(70, 0), Size::new(60, 60));
        let bottom = Rectangle::new(Point::new(70, 140), Size::new(60, 60));
        let count = |area: Rectangle| {
            area.points()
                .filter(|p| target.pixel(*p) == Some(primary))
                .count()
        };
        assert!(count(top) > 0);
        assert_eq!(count(bottom), 0);
    }

    #[test]
    fn ring_draws_ticks_inside_the_face() {
        let colors = colors();
        let mut target = PixelBuffer::new(Size::new(100, 100));
        let mut painter = Painter::new(&mut target, Viewport::IDENTITY, StyleColor::BLACK);
        draw_ring(
            &mut painter,
            &face(100),
            &MINUTE_RING,
            30,
            0.5,
            colors.primary,
            colors.primary_text,
        )
        .unwrap();
        assert!(target.count(colors.primary.opaque()) > 0);
        // Center stays clear
        assert_eq!(target.pixel(Point::new(50, 50)), Some(Rgb888::BLACK));
    }
}
