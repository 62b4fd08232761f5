//! Dial angles, burn-in offsets and the face viewport
//!
//! Angles handed to the drawing code are radians in screen space: zero
//! points at 3 o'clock and positive angles turn clockwise (y grows down).

use core::f32::consts::{PI, TAU};

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

use crate::system::time::ClockTime;

pub const TICKS_PER_REVOLUTION: u32 = 60;
const TICK_STEP: f32 = TAU / TICKS_PER_REVOLUTION as f32;

/// Sweep direction of a 60-fold dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum DialDirection {
    Clockwise,
    CounterClockwise,
}

impl DialDirection {
    /// Tick offset that puts index zero at 12 o'clock
    pub const fn phase_offset(self) -> f32 {
        match self {
            DialDirection::Clockwise => 15.0,
            DialDirection::CounterClockwise => 45.0,
        }
    }
}

/// Angle of dial tick `index` while `current` (plus `fraction` of the next
/// unit) is the live second or minute
///
/// A counterclockwise dial mirrors the angle vertically when mapped to a
/// point, see [`dial_point`].
pub fn tick_angle(index: u32, current: f32, fraction: f32, direction: DialDirection) -> f32 {
    TICK_STEP * (index as f32 - current - direction.phase_offset()) - TICK_STEP * fraction
}

/// Point on a circle around `center` for a dial angle
pub fn dial_point(center: FPoint, radius: f32, angle: f32, direction: DialDirection) -> FPoint {
    let (sin, cos) = (libm::sinf(angle), libm::cosf(angle));
    match direction {
        DialDirection::Clockwise => FPoint::new(center.x + radius * cos, center.y + radius * sin),
        DialDirection::CounterClockwise => {
            FPoint::new(center.x + radius * cos, center.y - radius * sin)
        }
    }
}

/// Point on a circle for a clock angle in degrees, zero at 12 o'clock
pub fn clock_point(center: FPoint, radius: f32, degrees: f32) -> FPoint {
    let rad = radians(degrees);
    FPoint::new(
        center.x + radius * libm::sinf(rad),
        center.y - radius * libm::cosf(rad),
    )
}

/// Hour hand angle in degrees clockwise from 12, in `[0, 360)`
pub fn hour_hand_degrees(time: &ClockTime) -> f32 {
    let hours = (time.hour % 12) as f32;
    let minutes = time.minute as f32 + time.minute_fraction();
    normalize_degrees(hours * 30.0 + minutes * 0.5)
}

/// Minute hand angle in degrees clockwise from 12, in `[0, 360)`
pub fn minute_hand_degrees(time: &ClockTime) -> f32 {
    let seconds = time.second as f32 + time.subsecond;
    normalize_degrees(time.minute as f32 * 6.0 + seconds * 0.1)
}

/// Second angle in degrees clockwise from 12, in `[0, 360)`
pub fn second_degrees(time: &ClockTime) -> f32 {
    normalize_degrees((time.second as f32 + time.subsecond) * 6.0)
}

pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Smallest difference between two angles in degrees
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = normalize_degrees(a - b);
    diff.min(360.0 - diff)
}

/// Burn-in translation for the given minute, sweeping a circle of radius
/// `shift` once an hour
pub fn burn_in_offset(minute: u32, shift: f32) -> FPoint {
    let rad = radians((minute % 60) as f32 * 6.0);
    FPoint::new(libm::sinf(rad) * shift, -libm::cosf(rad) * shift)
}

fn radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Sub-pixel point in face coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FPoint {
    pub x: f32,
    pub y: f32,
}

impl FPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn round(self) -> Point {
        Point::new(libm::roundf(self.x) as i32, libm::roundf(self.y) as i32)
    }
}

/// Rectangle in normalized `[0, 1]` face coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FracRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl FracRect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn shifted_x(self, dx: f32) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            ..self
        }
    }

    /// Pixel rectangle inside `face`
    pub fn to_pixels(self, face: &FaceBounds) -> Rectangle {
        let top_left = FPoint::new(
            face.origin.x + self.left * face.width,
            face.origin.y + self.top * face.height,
        )
        .round();
        let width = libm::roundf((self.right - self.left) * face.width).max(0.0) as u32;
        let height = libm::roundf((self.bottom - self.top) * face.height).max(0.0) as u32;
        Rectangle::new(top_left, Size::new(width, height))
    }
}

/// Target bounds as floats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBounds {
    pub origin: FPoint,
    pub width: f32,
    pub height: f32,
}

impl FaceBounds {
    /// `None` for zero-area bounds
    pub fn new(bounds: &Rectangle) -> Option<Self> {
        if bounds.size.width == 0 || bounds.size.height == 0 {
            return None;
        }
        Some(Self {
            origin: FPoint::new(bounds.top_left.x as f32, bounds.top_left.y as f32),
            width: bounds.size.width as f32,
            height: bounds.size.height as f32,
        })
    }

    /// Center in face-local coordinates
    pub fn center(&self) -> FPoint {
        FPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Uniform scale plus translation from face-local to target coordinates
///
/// Built like a canvas transform stack: each call applies its transform to
/// everything drawn afterwards, innermost last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: FPoint,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Viewport {
    pub const IDENTITY: Viewport = Viewport {
        scale: 1.0,
        offset: FPoint::new(0.0, 0.0),
    };

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            scale: self.scale,
            offset: FPoint::new(
                self.offset.x + self.scale * dx,
                self.offset.y + self.scale * dy,
            ),
        }
    }

    pub fn scale_about(self, factor: f32, pivot: FPoint) -> Self {
        Self {
            scale: self.scale * factor,
            offset: FPoint::new(
                self.offset.x + self.scale * pivot.x * (1.0 - factor),
                self.offset.y + self.scale * pivot.y * (1.0 - factor),
            ),
        }
    }

    /// Apply `inner` first, then `self`
    pub fn then(self, inner: Viewport) -> Self {
        Self {
            scale: self.scale * inner.scale,
            offset: self.map(inner.offset),
        }
    }

    pub fn map(&self, point: FPoint) -> FPoint {
        FPoint::new(
            point.x * self.scale + self.offset.x,
            point.y * self.scale + self.offset.y,
        )
    }

    pub fn point(&self, point: FPoint) -> Point {
        self.map(point).round()
    }

    /// Length in target pixels, at least one
    pub fn length(&self, length: f32) -> u32 {
        (libm::roundf(length * self.scale) as i32).max(1) as u32
    }
}
