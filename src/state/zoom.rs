//! Zoom mode and the pan/zoom transform of the lightbox image
//!
//! Zoom is a mode of its own: while it is on, pointer input drives the
//! transform instead of gallery navigation.

use cgmath::{MetricSpace, Point2, Vector2, Zero};
use std::time::{Duration, Instant};

/// Smallest scale (image fits the viewport)
pub const MIN_SCALE: f32 = 1.0;
/// Largest scale
pub const MAX_SCALE: f32 = 4.0;
/// Scale reached by a double tap from 1x
pub const DOUBLE_TAP_SCALE: f32 = 2.5;
/// Relative scale change per wheel line
pub const WHEEL_STEP: f32 = 0.1;
/// Two taps must land within this interval to count as a double tap
pub const DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(300);
/// ...and within this many pixels of each other
pub const DOUBLE_TAP_SLOP: f32 = 10.0;

/// Scale and pan offset applied to the image, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f32,
    pub offset: Vector2<f32>,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomTransform {
    pub fn identity() -> Self {
        Self {
            scale: MIN_SCALE,
            offset: Vector2::zero(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.scale == MIN_SCALE && self.offset.is_zero()
    }

    /// Set the scale, clamped to [MIN_SCALE, MAX_SCALE].
    /// `half_extent` is half the viewport size; it bounds the pan offset.
    pub fn set_scale(&mut self, scale: f32, half_extent: Vector2<f32>) {
        self.scale = if scale.is_finite() {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            MIN_SCALE
        };

        if self.scale <= MIN_SCALE {
            self.offset = Vector2::zero();
        } else {
            self.clamp_offset(half_extent);
        }
    }

    pub fn zoom_by(&mut self, factor: f32, half_extent: Vector2<f32>) {
        self.set_scale(self.scale * factor, half_extent);
    }

    /// Move the image; a 1x image cannot be panned
    pub fn pan(&mut self, delta: Vector2<f32>, half_extent: Vector2<f32>) {
        if self.scale <= MIN_SCALE {
            return;
        }
        self.offset += delta;
        self.clamp_offset(half_extent);
    }

    /// The scaled image edge may not move past the viewport edge
    fn clamp_offset(&mut self, half_extent: Vector2<f32>) {
        let limit_x = (half_extent.x * (self.scale - MIN_SCALE)).abs();
        let limit_y = (half_extent.y * (self.scale - MIN_SCALE)).abs();
        self.offset.x = self.offset.x.clamp(-limit_x, limit_x);
        self.offset.y = self.offset.y.clamp(-limit_y, limit_y);
    }
}

/// Recognizes two taps close in time and space
#[derive(Debug, Clone, Default)]
pub struct DoubleTapDetector {
    last: Option<(Instant, Point2<f32>)>,
}

impl DoubleTapDetector {
    /// Register a tap; returns true when it completes a double tap
    pub fn register(&mut self, at: Instant, position: Point2<f32>) -> bool {
        if let Some((previous_at, previous_position)) = self.last.take() {
            let in_time = at.saturating_duration_since(previous_at) <= DOUBLE_TAP_TIMEOUT;
            let in_place = previous_position.distance(position) <= DOUBLE_TAP_SLOP;
            if in_time && in_place {
                return true;
            }
        }
        self.last = Some((at, position));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    /// Pointer input navigates between images
    #[default]
    Navigation,
    /// Pointer input drives the zoom transform
    Zoom,
}

/// Owns the zoom mode and transform of the lightbox
#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    mode: ZoomMode,
    transform: ZoomTransform,
    taps: DoubleTapDetector,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    pub fn is_zooming(&self) -> bool {
        self.mode == ZoomMode::Zoom
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Switch between navigation and zoom mode.
    /// Leaving zoom mode always restores the identity transform.
    pub fn toggle(&mut self) -> ZoomMode {
        match self.mode {
            ZoomMode::Navigation => {
                self.mode = ZoomMode::Zoom;
                self.reset_transform();
            }
            ZoomMode::Zoom => self.leave(),
        }
        log::debug!("🔍 Zoom mode: {:?}", self.mode);
        self.mode
    }

    /// Back to navigation mode at identity
    pub fn leave(&mut self) {
        self.mode = ZoomMode::Navigation;
        self.reset_transform();
    }

    /// Identity transform, mode unchanged
    pub fn reset_transform(&mut self) {
        self.transform = ZoomTransform::identity();
        self.taps.reset();
    }

    /// Wheel scroll in lines; positive zooms in. Ignored outside zoom mode.
    pub fn wheel(&mut self, lines: f32, half_extent: Vector2<f32>) -> bool {
        if !self.is_zooming() {
            return false;
        }
        self.transform.zoom_by(1.0 + lines * WHEEL_STEP, half_extent);
        true
    }

    /// Pinch by the ratio of the current to the previous finger distance
    pub fn pinch(&mut self, ratio: f32, half_extent: Vector2<f32>) -> bool {
        if !self.is_zooming() || ratio <= 0.0 {
            return false;
        }
        self.transform.zoom_by(ratio, half_extent);
        true
    }

    pub fn pan(&mut self, delta: Vector2<f32>, half_extent: Vector2<f32>) -> bool {
        if !self.is_zooming() {
            return false;
        }
        self.transform.pan(delta, half_extent);
        true
    }

    /// Feed a tap/click; a double tap toggles between 1x and DOUBLE_TAP_SCALE
    pub fn tap(&mut self, at: Instant, position: Point2<f32>, half_extent: Vector2<f32>) -> bool {
        if !self.is_zooming() || !self.taps.register(at, position) {
            return false;
        }

        let target = if self.transform.scale > MIN_SCALE {
            MIN_SCALE
        } else {
            DOUBLE_TAP_SCALE
        };
        self.transform.set_scale(target, half_extent);
        true
    }
}
