//! Pointer gesture recognition for the lightbox
//!
//! One interaction (pointer down to pointer up) moves a [`GestureTracker`]
//! through `Idle -> Tracking -> Resolved`. Thresholds are plain data so that
//! the classification functions can be exercised on their own.

use cgmath::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Vertical distance over which the swipe-down preview fades
pub const SWIPE_DOWN_PREVIEW_RANGE: f32 = 300.0;
/// The preview never fades below this opacity
pub const PREVIEW_OPACITY_FLOOR: f32 = 0.3;
/// The preview never shrinks below this scale
pub const PREVIEW_SCALE_FLOOR: f32 = 0.85;
/// Release velocity is measured over this trailing window
pub const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Distances in pixels, flick product in px × px/s
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GestureThresholds {
    /// Minimum horizontal travel of a touch swipe
    pub swipe_distance: f32,
    /// Minimum downward travel that closes the lightbox
    pub swipe_down_distance: f32,
    /// A drag navigates when |offset| × |velocity| exceeds this
    pub flick_product: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            swipe_distance: 50.0,
            swipe_down_distance: 100.0,
            flick_product: 10_000.0,
        }
    }
}

/// Where the interaction comes from. Touch swipes are judged by distance,
/// mouse drags by the velocity-weighted flick rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Touch,
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Navigate(NavDirection),
    Close,
    None,
}

/// Visual feedback while the image is being pulled down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipePreview {
    /// Vertical translation in pixels
    pub offset: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl SwipePreview {
    pub fn rest() -> Self {
        Self {
            offset: 0.0,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    /// Interpolate from the current downward travel (upward travel is ignored)
    pub fn for_travel(dy: f32) -> Self {
        let offset = dy.clamp(0.0, SWIPE_DOWN_PREVIEW_RANGE);
        Self {
            offset,
            opacity: (1.0 - offset / SWIPE_DOWN_PREVIEW_RANGE).max(PREVIEW_OPACITY_FLOOR),
            scale: (1.0 - offset / 1000.0).max(PREVIEW_SCALE_FLOOR),
        }
    }
}

/// An interaction in progress
#[derive(Debug, Clone)]
pub struct Tracking {
    kind: PointerKind,
    start: Point2<f32>,
    current: Point2<f32>,
    samples: VecDeque<(Instant, Point2<f32>)>,
}

impl Tracking {
    pub fn displacement(&self) -> Vector2<f32> {
        self.current - self.start
    }

    /// Horizontal velocity in px/s over the trailing window
    fn velocity_x(&self) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let elapsed = last.0.saturating_duration_since(first.0).as_secs_f32();
        if elapsed <= f32::EPSILON {
            return 0.0;
        }
        (last.1.x - first.1.x) / elapsed
    }

    fn record(&mut self, position: Point2<f32>, at: Instant) {
        self.current = position;
        self.samples.push_back((at, position));
        while let Some(&(oldest, _)) = self.samples.front() {
            if at.saturating_duration_since(oldest) > VELOCITY_WINDOW && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum GesturePhase {
    Idle,
    Tracking(Tracking),
    Resolved(GestureOutcome),
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    thresholds: GestureThresholds,
    phase: GesturePhase,
}

impl GestureTracker {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            phase: GesturePhase::Idle,
        }
    }

    /// Pointer down. Any previous interaction is discarded.
    pub fn begin(&mut self, kind: PointerKind, position: Point2<f32>, at: Instant) {
        let mut samples = VecDeque::new();
        samples.push_back((at, position));
        self.phase = GesturePhase::Tracking(Tracking {
            kind,
            start: position,
            current: position,
            samples,
        });
    }

    /// Pointer moved; returns the swipe-down preview while tracking
    pub fn move_to(&mut self, position: Point2<f32>, at: Instant) -> Option<SwipePreview> {
        match &mut self.phase {
            GesturePhase::Tracking(tracking) => {
                tracking.record(position, at);
                Some(SwipePreview::for_travel(tracking.displacement().y))
            }
            _ => None,
        }
    }

    /// Pointer up; classifies the interaction
    pub fn end(&mut self, position: Point2<f32>, at: Instant) -> GestureOutcome {
        let outcome = match &mut self.phase {
            GesturePhase::Tracking(tracking) => {
                tracking.record(position, at);
                resolve(
                    tracking.kind,
                    tracking.displacement(),
                    tracking.velocity_x(),
                    &self.thresholds,
                )
            }
            _ => GestureOutcome::None,
        };
        self.phase = GesturePhase::Resolved(outcome);
        outcome
    }

    /// Pointer lost; nothing happens
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    pub fn preview(&self) -> SwipePreview {
        match &self.phase {
            GesturePhase::Tracking(tracking) => SwipePreview::for_travel(tracking.displacement().y),
            _ => SwipePreview::rest(),
        }
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

/// Classify a finished interaction.
///
/// A vertical-dominant downward travel past the threshold closes, whatever
/// the pointer kind. Otherwise touch uses the swipe rule and drag the flick rule.
pub fn resolve(
    kind: PointerKind,
    displacement: Vector2<f32>,
    velocity_x: f32,
    thresholds: &GestureThresholds,
) -> GestureOutcome {
    let (dx, dy) = (displacement.x, displacement.y);

    if dy > thresholds.swipe_down_distance && dy.abs() > dx.abs() {
        return GestureOutcome::Close;
    }

    match kind {
        PointerKind::Touch => classify_swipe(dx, dy, thresholds),
        PointerKind::Drag => classify_flick(dx, velocity_x, thresholds),
    }
}

/// Horizontal-dominant swipe past the distance threshold.
/// Swiping left shows the next image.
pub fn classify_swipe(dx: f32, dy: f32, thresholds: &GestureThresholds) -> GestureOutcome {
    if dx.abs() > thresholds.swipe_distance && dx.abs() > dy.abs() {
        GestureOutcome::Navigate(direction_of(dx))
    } else {
        GestureOutcome::None
    }
}

/// Drag release weighted by velocity, so slow drags do not navigate
pub fn classify_flick(offset_x: f32, velocity_x: f32, thresholds: &GestureThresholds) -> GestureOutcome {
    if offset_x.abs() * velocity_x.abs() > thresholds.flick_product {
        GestureOutcome::Navigate(direction_of(offset_x))
    } else {
        GestureOutcome::None
    }
}

fn direction_of(dx: f32) -> NavDirection {
    if dx < 0.0 {
        NavDirection::Next
    } else {
        NavDirection::Previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> GestureThresholds {
        GestureThresholds::default()
    }

    #[test]
    fn test_flick_above_threshold_navigates() {
        // 120 × 100 = 12000 > 10000
        assert_eq!(
            classify_flick(-120.0, -100.0, &thresholds()),
            GestureOutcome::Navigate(NavDirection::Next)
        );
        assert_eq!(
            classify_flick(120.0, 100.0, &thresholds()),
            GestureOutcome::Navigate(NavDirection::Previous)
        );
    }

    #[test]
    fn test_slow_drag_does_not_navigate() {
        // 60 × 50 = 3000
        assert_eq!(classify_flick(-60.0, -50.0, &thresholds()), GestureOutcome::None);
        assert_eq!(
            resolve(PointerKind::Drag, Vector2::new(-60.0, 0.0), -50.0, &thresholds()),
            GestureOutcome::None
        );
    }

    #[test]
    fn test_touch_swipe_distance() {
        assert_eq!(
            classify_swipe(-51.0, 10.0, &thresholds()),
            GestureOutcome::Navigate(NavDirection::Next)
        );
        assert_eq!(
            classify_swipe(80.0, -20.0, &thresholds()),
            GestureOutcome::Navigate(NavDirection::Previous)
        );
        assert_eq!(classify_swipe(-50.0, 0.0, &thresholds()), GestureOutcome::None);
        // Diagonal with vertical dominance is not a horizontal swipe
        assert_eq!(classify_swipe(-70.0, 90.0, &thresholds()), GestureOutcome::None);
    }

    #[test]
    fn test_swipe_down_closes() {
        assert_eq!(
            resolve(PointerKind::Touch, Vector2::new(10.0, 150.0), 0.0, &thresholds()),
            GestureOutcome::Close
        );
        // Upward travel never closes
        assert_eq!(
            resolve(PointerKind::Touch, Vector2::new(0.0, -150.0), 0.0, &thresholds()),
            GestureOutcome::None
        );
        // Horizontal dominance wins over a long downward travel
        assert_eq!(
            resolve(PointerKind::Touch, Vector2::new(-200.0, 150.0), 0.0, &thresholds()),
            GestureOutcome::Navigate(NavDirection::Next)
        );
    }

    #[test]
    fn test_tracker_vertical_swipe_of_150px_closes() {
        let mut tracker = GestureTracker::default();
        let t0 = Instant::now();

        tracker.begin(PointerKind::Touch, Point2::new(200.0, 100.0), t0);
        assert!(matches!(&tracker.phase, GesturePhase::Tracking(_)));

        let preview = tracker
            .move_to(Point2::new(202.0, 175.0), t0 + Duration::from_millis(50))
            .unwrap();
        assert_eq!(preview.offset, 75.0);

        let outcome = tracker.end(Point2::new(205.0, 250.0), t0 + Duration::from_millis(120));
        assert_eq!(outcome, GestureOutcome::Close);
        assert!(matches!(&tracker.phase, GesturePhase::Resolved(GestureOutcome::Close)));
        assert_eq!(tracker.preview(), SwipePreview::rest());
    }

    #[test]
    fn test_tracker_drag_flick_uses_release_velocity() {
        let mut tracker = GestureTracker::default();
        let t0 = Instant::now();

        // 120 px in 100 ms = 1200 px/s; 120 × 1200 well above the threshold
        tracker.begin(PointerKind::Drag, Point2::new(300.0, 200.0), t0);
        tracker.move_to(Point2::new(240.0, 200.0), t0 + Duration::from_millis(50));
        let outcome = tracker.end(Point2::new(180.0, 200.0), t0 + Duration::from_millis(100));
        assert_eq!(outcome, GestureOutcome::Navigate(NavDirection::Next));

        // Same distance dragged slowly: the trailing samples give 55 px/s, 120 × 55 = 6600
        tracker.begin(PointerKind::Drag, Point2::new(300.0, 200.0), t0);
        tracker.move_to(Point2::new(290.0, 200.0), t0 + Duration::from_millis(1900));
        let outcome = tracker.end(Point2::new(180.0, 200.0), t0 + Duration::from_millis(3900));
        assert_eq!(outcome, GestureOutcome::None);
    }

    #[test]
    fn test_end_without_begin_is_none() {
        let mut tracker = GestureTracker::default();
        assert_eq!(tracker.end(Point2::new(0.0, 0.0), Instant::now()), GestureOutcome::None);
        assert!(tracker.move_to(Point2::new(0.0, 0.0), Instant::now()).is_none());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut tracker = GestureTracker::default();
        tracker.begin(PointerKind::Touch, Point2::new(0.0, 0.0), Instant::now());
        tracker.cancel();
        assert!(matches!(&tracker.phase, GesturePhase::Idle));
    }

    #[test]
    fn test_preview_is_clamped() {
        let preview = SwipePreview::for_travel(1000.0);
        assert_eq!(preview.offset, SWIPE_DOWN_PREVIEW_RANGE);
        assert_eq!(preview.opacity, PREVIEW_OPACITY_FLOOR);
        assert_eq!(preview.scale, PREVIEW_SCALE_FLOOR);

        assert_eq!(SwipePreview::for_travel(-40.0), SwipePreview::rest());

        let halfway = SwipePreview::for_travel(150.0);
        assert!((halfway.opacity - 0.5).abs() < 1e-6);
        assert!((halfway.scale - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_thresholds_partial_json() {
        let parsed: GestureThresholds = serde_json::from_str(r#"{ "swipe_distance": 80.0 }"#).unwrap();
        assert_eq!(parsed.swipe_distance, 80.0);
        assert_eq!(parsed.flick_product, 10_000.0);
    }
}
