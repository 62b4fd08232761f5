//! Frame renderer
//!
//! A single [`WatchFaceRenderer`] draws every face variant. The variant is
//! data: which time block, which seconds indicator and where the complication
//! slots sit. Style updates are applied between frames, never during one.

use chrono::NaiveDateTime;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use embedded_graphics::{
    pixelcolor::Rgb888, prelude::DrawTarget, primitives::Rectangle, transform::Transform,
};

use super::{
    catalog::{LayoutKind, StyleCatalog},
    color::StyleColor,
    complications::{
        place_slot, ComplicationHost, ComplicationSlotId, ComplicationStyle, SlotBounds,
        BACKING_CIRCLE_COLOR,
    },
    dial::{draw_ring, draw_static_dial, SecondsRevealCache, MINUTE_RING, SECONDS_RING},
    geometry::{burn_in_offset, second_degrees, FPoint, FaceBounds, Viewport},
    painter::Painter,
    palette::ResolvedPalette,
    reducer::{reduce, StyleUpdateChannel},
    state::{UserStyle, WatchFaceState},
    time_display::{
        draw_capsule_time, draw_capsule_underside, draw_centered_time, draw_date_badge,
        draw_date_line, draw_hands, CapsuleMetrics, CapsuleStyle, TimeDisplay,
    },
};
use crate::{
    monitors::{
        self,
        battery::{BatteryInfo, BatteryMonitor, BatterySignal},
        format::{FormatMonitor, FormatSource},
        lock::{LockMonitor, LockSource},
    },
    system::{config::FaceConfig, time::ClockTime},
};

pub use super::palette::Appearance;

/// Draw mode reported by the platform for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum DrawMode {
    Interactive,
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub enum SecondsIndicator {
    /// Rotating seconds ring around a rotating minute ring
    Ring,
    /// Static dial with a cutout revealing the pre-rendered seconds
    Reveal { second_hand: bool },
}

/// Everything that differs between the supported faces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceVariant {
    pub time_display: TimeDisplay,
    pub seconds: SecondsIndicator,
    /// Upper end of the shift pixel slider
    pub shift_pixel_max: f32,
    /// Vertical position of the date line, as a fraction of the height
    pub date_position: f32,
    pub slots: SlotBounds,
}

impl FaceVariant {
    pub const CONCENTRIC: FaceVariant = FaceVariant {
        time_display: TimeDisplay::Capsule,
        seconds: SecondsIndicator::Ring,
        shift_pixel_max: 10.0,
        date_position: 0.0,
        slots: SlotBounds::CONCENTRIC,
    };

    pub const REVEAL_ANALOG: FaceVariant = FaceVariant {
        time_display: TimeDisplay::Hands,
        seconds: SecondsIndicator::Reveal { second_hand: true },
        shift_pixel_max: 16.0,
        date_position: 0.75,
        slots: SlotBounds::REVEAL_ANALOG,
    };

    pub const REVEAL_DIGITAL: FaceVariant = FaceVariant {
        time_display: TimeDisplay::Centered,
        seconds: SecondsIndicator::Reveal { second_hand: false },
        shift_pixel_max: 16.0,
        date_position: 0.22,
        slots: SlotBounds::REVEAL_DIGITAL,
    };

    /// The layout setting moves this face around
    pub fn is_layout_aware(&self) -> bool {
        self.seconds == SecondsIndicator::Ring
    }
}

/// Inputs of a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub time: ClockTime,
    pub bounds: Rectangle,
    pub draw_mode: DrawMode,
    pub battery_low: bool,
    pub device_locked: bool,
    pub is_24h: bool,
}

impl RenderContext {
    pub fn new(time: &NaiveDateTime, bounds: Rectangle, draw_mode: DrawMode) -> Self {
        Self {
            time: ClockTime::from_datetime(time),
            bounds,
            draw_mode,
            battery_low: false,
            device_locked: false,
            is_24h: false,
        }
    }

    pub fn with_battery_low(mut self, battery_low: bool) -> Self {
        self.battery_low = battery_low;
        self
    }

    pub fn with_device_locked(mut self, device_locked: bool) -> Self {
        self.device_locked = device_locked;
        self
    }

    pub fn with_24_hour_format(mut self, is_24h: bool) -> Self {
        self.is_24h = is_24h;
        self
    }
}

const HALF_FACE_SHIFT: f32 = 0.30;
const HALF_FACE_SHADOW: f32 = 0.30;
const SCALED_HALF_FACE_SCALE: f32 = 1.35;
const SCALED_HALF_FACE_HEIGHT: f32 = 1.26;
const SCALED_HALF_FACE_SHADOW: f32 = 0.45;
const AMBIENT_ZOOM_FULL_FACE: f32 = 1.15;
const AMBIENT_ZOOM_HALF_FACE: f32 = 1.20;
const AMBIENT_ZOOM_SCALED_HALF_FACE: f32 = 1.12;
const AMBIENT_ZOOM_SHRINK: f32 = 0.95;
const REVEAL_AMBIENT_SCALE: f32 = 0.97;
const REVEAL_AMBIENT_SHRINK: f32 = 0.05;
/// Shift distance from which burn-in protection kicks in
const SHIFT_PIXEL_THRESHOLD: f32 = 1.0;
/// Translucent band at the inner edge of the half face shadow
const SHADOW_FADE: f32 = 0.06;

/// Geometry derived from the bounds, the layout and the shift distance
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceGeometry {
    bounds: Rectangle,
    layout: LayoutKind,
    /// Layout placement, applied innermost
    layout_transform: Viewport,
    shadow_width: f32,
    capsule: CapsuleMetrics,
    reveal_scale: f32,
    burn_in: bool,
}

impl FaceGeometry {
    fn new(
        bounds: Rectangle,
        face: &FaceBounds,
        layout: LayoutKind,
        shift: f32,
        variant: &FaceVariant,
    ) -> Self {
        let (layout_transform, shadow_width) = match layout {
            _ if !variant.is_layout_aware() => (Viewport::IDENTITY, 0.0),
            LayoutKind::FullFace => (Viewport::IDENTITY, 0.0),
            LayoutKind::HalfFace => (
                Viewport::IDENTITY.translate(-HALF_FACE_SHIFT * face.width, 0.0),
                HALF_FACE_SHADOW * face.width,
            ),
            LayoutKind::ScaledHalfFace => (
                Viewport::IDENTITY
                    .scale_about(SCALED_HALF_FACE_SCALE, FPoint::new(0.0, 0.0))
                    .translate(
                        -HALF_FACE_SHIFT * face.width,
                        -(SCALED_HALF_FACE_HEIGHT * face.height - face.height) / 2.0,
                    ),
                SCALED_HALF_FACE_SHADOW * face.width,
            ),
        };

        let shift_ratio = if variant.shift_pixel_max > 0.0 {
            shift.clamp(0.0, variant.shift_pixel_max) / variant.shift_pixel_max
        } else {
            0.0
        };

        Self {
            bounds,
            layout,
            layout_transform,
            shadow_width,
            capsule: CapsuleMetrics::new(face, layout_transform.scale),
            reveal_scale: REVEAL_AMBIENT_SCALE - REVEAL_AMBIENT_SHRINK * shift_ratio,
            burn_in: shift >= SHIFT_PIXEL_THRESHOLD,
        }
    }
}

/// Watch face renderer
///
/// Owns the face state, its resolved palette and the per-instance drawing
/// caches. Style batches arrive through [`WatchFaceRenderer::drain_updates`]
/// and are applied one by one before the next frame.
pub struct WatchFaceRenderer<'c, H> {
    catalog: &'c StyleCatalog,
    config: FaceConfig,
    state: WatchFaceState,
    palette: ResolvedPalette,
    palette_recomputes: usize,
    frame_period: Duration,
    battery: BatteryMonitor,
    lock: LockMonitor,
    format: FormatMonitor,
    host: H,
    seconds: SecondsRevealCache,
    geometry: Option<FaceGeometry>,
    recalculate_geometry: bool,
    geometry_rebuilds: usize,
}

impl<'c, H: ComplicationHost> WatchFaceRenderer<'c, H> {
    pub fn new(catalog: &'c StyleCatalog, config: FaceConfig, host: H) -> Self {
        let state = WatchFaceState::new(catalog);
        let palette = ResolvedPalette::resolve(
            catalog,
            &state.active_color_style.id,
            &state.ambient_color_style.id,
        );
        let battery = BatteryMonitor::new(config.battery_low_percent);
        let frame_period = monitors::frame_period(&config, battery.is_low(), state.low_power);

        let mut renderer = Self {
            catalog,
            config,
            state,
            palette,
            palette_recomputes: 0,
            frame_period,
            battery,
            lock: LockMonitor::new(),
            format: FormatMonitor::new(),
            host,
            seconds: SecondsRevealCache::new(),
            geometry: None,
            recalculate_geometry: false,
            geometry_rebuilds: 0,
        };
        renderer.push_complication_style();
        renderer
    }

    pub fn state(&self) -> &WatchFaceState {
        &self.state
    }

    pub fn palette(&self) -> &ResolvedPalette {
        &self.palette
    }

    /// Number of palette resolutions since construction
    pub fn palette_recomputes(&self) -> usize {
        self.palette_recomputes
    }

    /// Number of times the cached face geometry was rebuilt
    pub fn geometry_rebuilds(&self) -> usize {
        self.geometry_rebuilds
    }

    pub fn seconds_cache(&self) -> &SecondsRevealCache {
        &self.seconds
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn battery(&self) -> &BatteryMonitor {
        &self.battery
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Time until the next frame should be drawn
    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    /// Appearance a frame drawn in `draw_mode` uses
    pub fn appearance(&self, draw_mode: DrawMode) -> Appearance {
        match draw_mode {
            DrawMode::Ambient if !self.state.active_as_ambient => Appearance::Ambient,
            _ => Appearance::Active,
        }
    }

    /// Fold one style batch into the face state
    ///
    /// Return whether the state changed. An unchanged state triggers nothing.
    pub fn apply_user_style(&mut self, style: &UserStyle) -> bool {
        let reduction = reduce(self.catalog, &self.state, style);
        if !reduction.changed(&self.state) {
            trace!("style batch of {} entries changed nothing", style.len());
            return false;
        }

        if reduction.state.colors_differ(&self.state) {
            self.seconds.invalidate_dial();
        }
        if reduction.shift_pixels_changed {
            self.recalculate_geometry = true;
        }
        self.state = reduction.state;

        self.recompute_palette();
        self.push_complication_style();
        self.update_cadence();
        true
    }

    /// Apply every queued style batch in arrival order
    ///
    /// Return how many of them changed the face.
    pub fn drain_updates<M: RawMutex, const N: usize>(
        &mut self,
        channel: &StyleUpdateChannel<M, N>,
    ) -> usize {
        let mut applied = 0;
        while let Ok(style) = channel.try_receive() {
            if self.apply_user_style(&style) {
                applied += 1;
            }
        }
        applied
    }

    /// Take the latest battery broadcast, if any
    pub fn poll_battery<M: RawMutex>(&mut self, signal: &BatterySignal<M>) -> bool {
        let changed = self.battery.poll(signal);
        if changed {
            self.update_cadence();
        }
        changed
    }

    pub fn set_battery(&mut self, info: BatteryInfo) -> bool {
        let changed = self.battery.update(info);
        if changed {
            self.update_cadence();
        }
        changed
    }

    /// The wall clock was set; re-read the hour format on the next frame
    pub fn notify_time_set(&mut self) {
        self.format.notify_time_set();
    }

    /// Build the context of the next frame, sampling the throttled monitors
    pub fn frame_context<L: LockSource, F: FormatSource>(
        &mut self,
        now: &NaiveDateTime,
        bounds: Rectangle,
        draw_mode: DrawMode,
        lock: &mut L,
        format: &mut F,
    ) -> RenderContext {
        let interval = self.config.monitor_poll_interval;
        let device_locked = self.lock.sample(lock, interval, self.frame_period);
        let is_24h = self.format.sample(
            format,
            draw_mode == DrawMode::Ambient,
            interval,
            self.frame_period,
        );

        RenderContext::new(now, bounds, draw_mode)
            .with_battery_low(self.battery.is_low())
            .with_device_locked(device_locked)
            .with_24_hour_format(is_24h)
    }

    /// Burn-in translation applied to the whole frame
    pub fn burn_in_translation(&self, context: &RenderContext) -> FPoint {
        let shift = self.state.shift_pixel_amount;
        if context.draw_mode == DrawMode::Ambient && shift >= SHIFT_PIXEL_THRESHOLD {
            burn_in_offset(context.time.minute, shift)
        } else {
            FPoint::default()
        }
    }

    /// Draw one complete frame
    pub fn render<D>(&mut self, target: &mut D, context: &RenderContext) -> Result<(), D::Error>
    where
        D: DrawTarget,
        D::Color: From<Rgb888>,
    {
        let Some(face) = FaceBounds::new(&context.bounds) else {
            debug!("skipping frame for empty bounds");
            return Ok(());
        };
        let geometry = self.geometry_for(&context.bounds, &face);
        let variant = self.config.variant;
        let os_ambient = context.draw_mode == DrawMode::Ambient;
        let appearance = self.appearance(context.draw_mode);
        let ambient = appearance == Appearance::Ambient;
        let colors = *self.palette.colors(appearance);
        let active = self.palette.active;
        let time = &context.time;

        let base = Viewport::IDENTITY.translate(face.origin.x, face.origin.y);
        let burn_in = self.burn_in_translation(context);
        let outer = base.translate(burn_in.x, burn_in.y);
        let face_viewport = outer
            .then(self.ambient_zoom(&geometry, &face, os_ambient))
            .then(geometry.layout_transform);

        let mut painter = Painter::new(target, face_viewport, colors.background);
        painter.fill_area(&context.bounds, colors.background)?;

        // Dials
        let seconds_visible = !os_ambient && !context.battery_low;
        let dial_always_on = self.state.minute_dial_always_on && !context.battery_low;
        let minute_dial_visible = match variant.seconds {
            SecondsIndicator::Ring => !ambient || dial_always_on,
            SecondsIndicator::Reveal { .. } => !os_ambient || dial_always_on,
        };
        match variant.seconds {
            SecondsIndicator::Ring => {
                if seconds_visible {
                    draw_ring(
                        &mut painter,
                        &face,
                        &SECONDS_RING,
                        time.second,
                        time.subsecond,
                        colors.outer_element,
                        colors.outer_element,
                    )?;
                }
                if minute_dial_visible {
                    draw_ring(
                        &mut painter,
                        &face,
                        &MINUTE_RING,
                        time.minute,
                        time.minute_fraction(),
                        colors.primary,
                        colors.primary_text,
                    )?;
                }
            }
            SecondsIndicator::Reveal { .. } => {
                if minute_dial_visible {
                    draw_static_dial(&mut painter, &face, &colors)?;
                }
            }
        }

        // Decorations
        let time_visible = !ambient || self.state.time_always_on;
        if variant.time_display == TimeDisplay::Capsule && time_visible {
            draw_capsule_underside(&mut painter, &face, os_ambient, active.background)?;
        }
        if geometry.shadow_width > 0.0 && minute_dial_visible {
            let edge = geometry.shadow_width;
            painter.rect(FPoint::new(0.0, 0.0), FPoint::new(edge, face.height), StyleColor::BLACK)?;
            painter.rect(
                FPoint::new(edge, 0.0),
                FPoint::new(edge + SHADOW_FADE * face.width, face.height),
                StyleColor::BLACK_50,
            )?;
        }

        // Time
        if time_visible {
            match variant.time_display {
                TimeDisplay::Capsule => {
                    let outline = if ambient {
                        active.primary.darken()
                    } else {
                        colors.primary
                    };
                    let style = CapsuleStyle {
                        outline,
                        text: colors.primary_text,
                        short: os_ambient || context.battery_low,
                        half_face: geometry.layout.is_half_face(),
                    };
                    draw_capsule_time(
                        &mut painter,
                        &face,
                        &geometry.capsule,
                        time,
                        context.is_24h,
                        &style,
                    )?;
                }
                TimeDisplay::Centered => {
                    draw_centered_time(&mut painter, &face, time, context.is_24h, colors.primary_text)?
                }
                TimeDisplay::Hands => draw_hands(&mut painter, &face, time, &colors)?,
            }
        }

        // Seconds reveal
        if let SecondsIndicator::Reveal { second_hand } = variant.seconds {
            if seconds_visible {
                self.seconds.draw(
                    &mut painter,
                    &face,
                    &colors,
                    second_degrees(time),
                    second_hand,
                )?;
            }
        }

        // Date
        if self.state.draw_date && time_visible {
            match variant.seconds {
                SecondsIndicator::Ring => draw_date_badge(
                    &mut painter,
                    &face,
                    time,
                    colors.secondary,
                    colors.primary_text,
                )?,
                SecondsIndicator::Reveal { .. } => draw_date_line(
                    &mut painter,
                    &face,
                    time,
                    variant.date_position,
                    colors.primary_text,
                )?,
            }
        }

        // Complications
        let complications_visible = !context.device_locked
            && (!os_ambient || (self.state.complications_always_on && !context.battery_low));
        painter.set_viewport(outer);
        for slot in ComplicationSlotId::ALL {
            let placement = place_slot(
                &variant.slots,
                slot,
                geometry.layout,
                variant.is_layout_aware(),
            );
            self.host.update_bounds(slot, placement.bounds);
            if !complications_visible || !placement.visible || !self.host.is_enabled(slot) {
                continue;
            }

            let bounds = placement.bounds;
            if self.state.draw_complication_circles {
                let center = FPoint::new(
                    (bounds.left + bounds.right) / 2.0 * face.width,
                    (bounds.top + bounds.bottom) / 2.0 * face.height,
                );
                let radius = ((bounds.right - bounds.left) * face.width)
                    .min((bounds.bottom - bounds.top) * face.height)
                    / 2.0;
                painter.circle(center, radius, BACKING_CIRCLE_COLOR)?;
            }
            let area = bounds.to_pixels(&face).translate(burn_in.round());
            self.host.render(slot, painter.target(), area, appearance)?;
        }

        Ok(())
    }

    /// Release per-instance buffers; they are recreated on the next draw
    pub fn destroy(&mut self) {
        self.seconds.release();
        self.geometry = None;
        info!("watch face destroyed");
    }

    fn recompute_palette(&mut self) {
        self.palette = ResolvedPalette::resolve(
            self.catalog,
            &self.state.active_color_style.id,
            &self.state.ambient_color_style.id,
        );
        self.palette_recomputes += 1;
        debug!(
            "palette resolved for {} / {}",
            self.state.active_color_style.id.as_str(),
            self.state.ambient_color_style.id.as_str()
        );
    }

    fn push_complication_style(&mut self) {
        let style = ComplicationStyle::from_state(&self.state, &self.palette);
        for slot in ComplicationSlotId::ALL {
            if self.host.is_enabled(slot) {
                self.host.apply_style(slot, &style);
            }
        }
    }

    fn update_cadence(&mut self) {
        let period = monitors::frame_period(&self.config, self.battery.is_low(), self.state.low_power);
        if period != self.frame_period {
            info!("frame period now {} ms", period.as_millis());
            self.frame_period = period;
        }
    }

    fn geometry_for(&mut self, bounds: &Rectangle, face: &FaceBounds) -> FaceGeometry {
        let layout = self.state.layout_style.kind;
        match self.geometry {
            Some(geometry)
                if !self.recalculate_geometry
                    && geometry.bounds == *bounds
                    && geometry.layout == layout =>
            {
                geometry
            }
            _ => {
                let geometry = FaceGeometry::new(
                    *bounds,
                    face,
                    layout,
                    self.state.shift_pixel_amount,
                    &self.config.variant,
                );
                self.geometry = Some(geometry);
                self.recalculate_geometry = false;
                self.geometry_rebuilds += 1;
                debug!("face geometry rebuilt");
                geometry
            }
        }
    }

    /// Zoom applied in ambient, about layout specific pivots
    fn ambient_zoom(
        &self,
        geometry: &FaceGeometry,
        face: &FaceBounds,
        os_ambient: bool,
    ) -> Viewport {
        if !os_ambient {
            return Viewport::IDENTITY;
        }
        let center = face.center();
        let zoom = |factor: f32, pivot: FPoint| Viewport::IDENTITY.scale_about(factor, pivot);

        if !self.config.variant.is_layout_aware() {
            return if geometry.burn_in {
                zoom(geometry.reveal_scale, center)
            } else {
                Viewport::IDENTITY
            };
        }

        let state = &self.state;
        let bare = !state.complications_always_on && !state.active_as_ambient;
        match geometry.layout {
            LayoutKind::FullFace => zoom(AMBIENT_ZOOM_FULL_FACE, center),
            LayoutKind::HalfFace if bare || state.active_as_ambient => {
                zoom(AMBIENT_ZOOM_HALF_FACE, FPoint::new(0.0, center.y))
            }
            LayoutKind::ScaledHalfFace if bare => {
                zoom(AMBIENT_ZOOM_HALF_FACE, FPoint::new(0.0, center.y))
            }
            LayoutKind::ScaledHalfFace if state.active_as_ambient => {
                zoom(AMBIENT_ZOOM_SCALED_HALF_FACE, FPoint::new(0.0, 1.2 * center.y))
            }
            _ if geometry.burn_in => zoom(AMBIENT_ZOOM_SHRINK, center),
            _ => Viewport::IDENTITY,
        }
    }
}
