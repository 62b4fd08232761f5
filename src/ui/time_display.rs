//! Time and date blocks
//!
//! One strategy per face family: the capsule numerals of the concentric face,
//! centered numerals of the digital reveal face and the analog hands.

use embedded_graphics::{pixelcolor::Rgb888, prelude::DrawTarget, text::Alignment};

use super::{
    color::StyleColor,
    geometry::{clock_point, hour_hand_degrees, minute_hand_degrees, FPoint, FaceBounds},
    painter::{font_for_height, text_width, Painter},
    palette::AppearanceColors,
};
use crate::system::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum TimeDisplay {
    /// Large hour, minutes inside a highlight capsule
    Capsule,
    /// `HH:MM` centered on the face
    Centered,
    /// Analog hour and minute hands
    Hands,
}

/// Hour as shown on the face
pub fn display_hour(hour: u32, is_24h: bool) -> u32 {
    if is_24h {
        hour
    } else if hour % 12 == 0 {
        12
    } else {
        hour % 12
    }
}

const HOUR_HEIGHT: f32 = 0.278;
const MINUTE_HEIGHT: f32 = 0.127;
const CAPSULE_SIZE_FACTOR: f32 = 2.5;
const CAPSULE_OFFSET_FACTOR: f32 = 0.45;
const CAPSULE_STROKE: f32 = 3.0;
const CAPSULE_MINUTE_PADDING: f32 = 0.35;
/// Minute ring inner edge, where a shortened capsule ends
const CAPSULE_SHORT_END: f32 = 0.35;

/// Capsule sized to the widest digits so it never jitters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleMetrics {
    pub hour_width: f32,
    pub size: f32,
    pub left: f32,
}

impl CapsuleMetrics {
    pub fn new(face: &FaceBounds, scale: f32) -> Self {
        let hour_font = font_for_height(HOUR_HEIGHT * face.height * scale);
        let minute_font = font_for_height(MINUTE_HEIGHT * face.height * scale);
        let hour_width = text_width("88", hour_font) as f32 / scale;
        let size = minute_font.character_size.height as f32 / scale * CAPSULE_SIZE_FACTOR;
        Self {
            hour_width,
            size,
            left: face.center().x + hour_width * CAPSULE_OFFSET_FACTOR,
        }
    }
}

/// How the concentric time block is drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleStyle {
    pub outline: StyleColor,
    pub text: StyleColor,
    /// Ambient or low battery: end the capsule at the minute ring
    pub short: bool,
    pub half_face: bool,
}

pub fn draw_capsule_time<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    metrics: &CapsuleMetrics,
    time: &ClockTime,
    is_24h: bool,
    style: &CapsuleStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let center = face.center();
    let right = if style.short {
        center.x + CAPSULE_SHORT_END * face.width
    } else if style.half_face {
        face.width + 10.0
    } else {
        1.5 * face.width
    };
    let half = metrics.size / 2.0;
    painter.capsule(
        FPoint::new(metrics.left, center.y - half),
        FPoint::new(right, center.y + half),
        half,
        CAPSULE_STROKE,
        style.outline,
    )?;

    let mut label = [0u8; 4];
    if let Ok(hour) = format_no_std::show(
        &mut label,
        format_args!("{:02}", display_hour(time.hour, is_24h)),
    ) {
        painter.text(
            hour,
            FPoint::new(metrics.left - metrics.size * 0.25, center.y),
            HOUR_HEIGHT * face.height,
            Alignment::Right,
            style.text,
        )?;
    }

    let mut label = [0u8; 4];
    if let Ok(minute) = format_no_std::show(&mut label, format_args!("{:02}", time.minute)) {
        painter.text(
            minute,
            FPoint::new(metrics.left + metrics.size * CAPSULE_MINUTE_PADDING, center.y),
            MINUTE_HEIGHT * face.height,
            Alignment::Left,
            style.text,
        )?;
    }

    Ok(())
}

const UNDERSIDE_RADIUS: f32 = 0.35;
const UNDERSIDE_SWEEP: f32 = 21.0;
const UNDERSIDE_SWEEP_AMBIENT: f32 = 18.0;

/// Wedge and bar masking the minute ring behind the capsule
pub fn draw_capsule_underside<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    ambient: bool,
    fill: StyleColor,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let sweep = if ambient {
        UNDERSIDE_SWEEP_AMBIENT
    } else {
        UNDERSIDE_SWEEP
    };
    painter.sector(
        face.center(),
        UNDERSIDE_RADIUS * face.width,
        -sweep,
        2.0 * sweep,
        fill,
    )?;
    painter.rect(
        FPoint::new(0.70 * face.width, 0.38 * face.height),
        FPoint::new(0.82 * face.width, 0.62 * face.height),
        fill,
    )
}

const CENTERED_TIME_Y: f32 = 0.47;
const CENTERED_TIME_HEIGHT: f32 = 0.27;

pub fn draw_centered_time<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    time: &ClockTime,
    is_24h: bool,
    color: StyleColor,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let mut label = [0u8; 8];
    let Ok(text) = format_no_std::show(
        &mut label,
        format_args!("{:02}:{:02}", display_hour(time.hour, is_24h), time.minute),
    ) else {
        return Ok(());
    };
    painter.text(
        text,
        FPoint::new(face.center().x, CENTERED_TIME_Y * face.height),
        CENTERED_TIME_HEIGHT * face.height,
        Alignment::Center,
        color,
    )
}

const HANDLE_LENGTH: f32 = 0.1;
const HANDLE_STROKE: f32 = 5.0;
const HOUR_HAND_LENGTH: f32 = 0.3;
const HOUR_HAND_WIDTH: f32 = 0.05;
const MINUTE_HAND_LENGTH: f32 = 0.45;
const MINUTE_HAND_WIDTH: f32 = 0.04;
const BUTTON_RADIUS: f32 = 0.02;
const BUTTON_DOT_RADIUS: f32 = 0.005;

/// Hour then minute hand, each a thin handle plus a rounded body
pub fn draw_hands<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    time: &ClockTime,
    colors: &AppearanceColors,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let center = face.center();
    let hands = [
        (hour_hand_degrees(time), HOUR_HAND_LENGTH, HOUR_HAND_WIDTH),
        (minute_hand_degrees(time), MINUTE_HAND_LENGTH, MINUTE_HAND_WIDTH),
    ];

    for (degrees, length, width) in hands {
        let handle_end = clock_point(center, HANDLE_LENGTH * face.height, degrees);
        painter.line(center, handle_end, HANDLE_STROKE, colors.primary_text)?;
        painter.bar(
            handle_end,
            clock_point(center, length * face.height, degrees),
            width * face.width,
            colors.primary,
        )?;
    }

    painter.circle(center, BUTTON_RADIUS * face.width, colors.primary)?;
    painter.circle(center, BUTTON_DOT_RADIUS * face.width, StyleColor::BLACK)
}

const DATE_HEIGHT: f32 = 0.05;
const DATE_BADGE_LIFT: f32 = 15.0;

/// `Mon, Jan 5` on one line centered at `y` (fraction of the height)
pub fn draw_date_line<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    time: &ClockTime,
    y: f32,
    color: StyleColor,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let mut label = [0u8; 16];
    let Ok(text) = format_no_std::show(
        &mut label,
        format_args!(
            "{}, {} {}",
            time.weekday_abbreviation(),
            time.month_abbreviation(),
            time.day
        ),
    ) else {
        return Ok(());
    };
    painter.text(
        text,
        FPoint::new(face.center().x, y * face.height),
        DATE_HEIGHT * face.height,
        Alignment::Center,
        color,
    )
}

/// Month over day number on a filled circle at the bottom of the face
pub fn draw_date_badge<D>(
    painter: &mut Painter<'_, D>,
    face: &FaceBounds,
    time: &ClockTime,
    fill: StyleColor,
    color: StyleColor,
) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let center = face.center();
    let text_height = DATE_HEIGHT * face.height;
    let badge = FPoint::new(center.x, 2.0 * center.y - DATE_BADGE_LIFT);
    painter.circle(badge, text_height * 2.0, fill)?;

    painter.text(
        time.month_abbreviation(),
        FPoint::new(badge.x, badge.y - text_height * 0.6),
        text_height,
        Alignment::Center,
        color,
    )?;
    let mut label = [0u8; 4];
    if let Ok(day) = format_no_std::show(&mut label, format_args!("{}", time.day)) {
        painter.text(
            day,
            FPoint::new(badge.x, badge.y + text_height * 0.6),
            text_height,
            Alignment::Center,
            color,
        )?;
    }
    Ok(())
}
