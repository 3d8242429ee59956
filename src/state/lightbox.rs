//! Lightbox controller
//!
//! Holds the open index into the *filtered* view, wraps navigation around
//! both ends, and owns everything that only lives while the lightbox is open:
//! the scroll lock guard, the load flag of the shown image, the zoom state
//! and the current gesture.

use cgmath::{Point2, Vector2};
use std::time::Instant;
use thiserror::Error;

use super::gesture::{GestureOutcome, GestureThresholds, GestureTracker, NavDirection, PointerKind, SwipePreview};
use super::load::LoadState;
use super::scroll_lock::{ScrollLock, ScrollLockGuard};
use super::zoom::ZoomController;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LightboxError {
    #[error("index {index} is out of range for a view of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What keyboard, buttons and gestures can ask of an open lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Next,
    Previous,
    Close,
}

impl From<NavDirection> for LightboxAction {
    fn from(direction: NavDirection) -> Self {
        match direction {
            NavDirection::Next => LightboxAction::Next,
            NavDirection::Previous => LightboxAction::Previous,
        }
    }
}

#[derive(Debug)]
struct OpenState {
    index: usize,
    len: usize,
    load: LoadState,
    _scroll: ScrollLockGuard,
}

#[derive(Debug)]
pub struct Lightbox {
    open: Option<OpenState>,
    scroll_lock: ScrollLock,
    zoom: ZoomController,
    gesture: GestureTracker,
}

impl Lightbox {
    pub fn new(scroll_lock: ScrollLock, thresholds: GestureThresholds) -> Self {
        Self {
            open: None,
            scroll_lock,
            zoom: ZoomController::new(),
            gesture: GestureTracker::new(thresholds),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.open.as_ref().map(|open| open.index)
    }

    /// Length of the view the index points into
    pub fn len(&self) -> usize {
        self.open.as_ref().map_or(0, |open| open.len)
    }

    /// Open at `index` of a view of `len` items
    pub fn open(&mut self, index: usize, len: usize) -> Result<(), LightboxError> {
        if index >= len {
            return Err(LightboxError::IndexOutOfRange { index, len });
        }

        match &mut self.open {
            Some(open) => {
                open.index = index;
                open.len = len;
                open.load = LoadState::Pending;
            }
            None => {
                self.open = Some(OpenState {
                    index,
                    len,
                    load: LoadState::Pending,
                    _scroll: self.scroll_lock.acquire(),
                });
            }
        }

        self.zoom.leave();
        self.gesture.cancel();
        log::debug!("🖼️  Lightbox open at {} of {}", index + 1, len);
        Ok(())
    }

    /// Releases the scroll lock. Closing a closed lightbox is a no-op.
    pub fn close(&mut self) {
        if self.open.take().is_some() {
            self.zoom.leave();
            self.gesture.cancel();
            log::debug!("🖼️  Lightbox closed");
        }
    }

    /// Wraps from the last image to the first; no-op for fewer than 2 images
    pub fn next(&mut self) -> bool {
        self.step(|index, len| (index + 1) % len)
    }

    /// Wraps from the first image to the last; no-op for fewer than 2 images
    pub fn previous(&mut self) -> bool {
        self.step(|index, len| (index + len - 1) % len)
    }

    fn step(&mut self, advance: impl Fn(usize, usize) -> usize) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        if open.len <= 1 {
            return false;
        }

        open.index = advance(open.index, open.len);
        open.load = LoadState::Pending;
        self.zoom.reset_transform();
        true
    }

    /// Returns true when the shown image changed or the lightbox closed
    pub fn apply(&mut self, action: LightboxAction) -> bool {
        match action {
            LightboxAction::Next => self.next(),
            LightboxAction::Previous => self.previous(),
            LightboxAction::Close => {
                let was_open = self.is_open();
                self.close();
                was_open
            }
        }
    }

    /// The filtered view changed length while open.
    ///
    /// An empty view closes the lightbox; otherwise the index is clamped
    /// to the last item.
    pub fn sync_len(&mut self, len: usize) {
        let Some(open) = self.open.as_mut() else {
            return;
        };

        if len == 0 {
            log::debug!("🖼️  Filtered view is empty, closing lightbox");
            self.close();
            return;
        }

        open.len = len;
        if open.index >= len {
            open.index = len - 1;
            self.retarget();
        }
    }

    /// A different image now sits at the open index: its load flag starts
    /// over and the zoom transform goes back to identity.
    pub fn retarget(&mut self) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        open.load = LoadState::Pending;
        self.zoom.reset_transform();
        self.gesture.cancel();
    }

    /// Load state of the image currently shown
    pub fn load_state(&self) -> LoadState {
        self.open.as_ref().map_or(LoadState::Pending, |open| open.load)
    }

    /// Record the decode result of the image at `index`; stale results are dropped
    pub fn complete_load(&mut self, index: usize, loaded: bool, now: Instant) -> bool {
        match self.open.as_mut() {
            Some(open) if open.index == index => {
                open.load = if loaded {
                    LoadState::Loaded { at: now }
                } else {
                    LoadState::Failed
                };
                true
            }
            _ => false,
        }
    }

    /// "3 / 10"
    pub fn counter(&self) -> Option<String> {
        self.open
            .as_ref()
            .map(|open| format!("{} / {}", open.index + 1, open.len))
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn toggle_zoom(&mut self) {
        if self.is_open() {
            self.zoom.toggle();
            self.gesture.cancel();
        }
    }

    pub fn wheel(&mut self, lines: f32, half_extent: Vector2<f32>) -> bool {
        self.is_open() && self.zoom.wheel(lines, half_extent)
    }

    pub fn pinch(&mut self, ratio: f32, half_extent: Vector2<f32>) -> bool {
        self.is_open() && self.zoom.pinch(ratio, half_extent)
    }

    /// Pointer down. In zoom mode the press only feeds the double-tap detector.
    pub fn pointer_pressed(
        &mut self,
        kind: PointerKind,
        position: Point2<f32>,
        at: Instant,
        half_extent: Vector2<f32>,
    ) {
        if !self.is_open() {
            return;
        }
        if self.zoom.is_zooming() {
            self.zoom.tap(at, position, half_extent);
        } else {
            self.gesture.begin(kind, position, at);
        }
    }

    /// Pointer moved by `delta` to `position`. Pans in zoom mode, tracks otherwise.
    pub fn pointer_moved(
        &mut self,
        position: Point2<f32>,
        delta: Vector2<f32>,
        at: Instant,
        half_extent: Vector2<f32>,
    ) {
        if !self.is_open() {
            return;
        }
        if self.zoom.is_zooming() {
            self.zoom.pan(delta, half_extent);
        } else {
            self.gesture.move_to(position, at);
        }
    }

    /// Pointer up; applies whatever the gesture resolved to
    pub fn pointer_released(&mut self, position: Point2<f32>, at: Instant) -> GestureOutcome {
        if !self.is_open() || self.zoom.is_zooming() {
            return GestureOutcome::None;
        }

        let outcome = self.gesture.end(position, at);
        match outcome {
            GestureOutcome::Navigate(direction) => {
                self.apply(direction.into());
            }
            GestureOutcome::Close => self.close(),
            GestureOutcome::None => {}
        }
        outcome
    }

    pub fn pointer_cancelled(&mut self) {
        self.gesture.cancel();
    }

    /// Swipe-down feedback for the current gesture
    pub fn preview(&self) -> SwipePreview {
        self.gesture.preview()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::zoom::ZoomMode;
    use std::time::Duration;

    fn lightbox() -> (Lightbox, ScrollLock) {
        let lock = ScrollLock::new();
        (Lightbox::new(lock.clone(), GestureThresholds::default()), lock)
    }

    fn viewport() -> Vector2<f32> {
        Vector2::new(400.0, 300.0)
    }

    #[test]
    fn test_open_rejects_out_of_range() {
        let (mut lightbox, lock) = lightbox();
        assert_eq!(
            lightbox.open(3, 3),
            Err(LightboxError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(!lightbox.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_wraparound_at_both_ends() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(0, 3).unwrap();

        assert!(lightbox.previous());
        assert_eq!(lightbox.index(), Some(2));

        assert!(lightbox.next());
        assert_eq!(lightbox.index(), Some(0));
        assert_eq!(lightbox.counter().as_deref(), Some("1 / 3"));
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        for len in 2..6 {
            for start in 0..len {
                let (mut lightbox, _lock) = lightbox();
                lightbox.open(start, len).unwrap();

                lightbox.next();
                lightbox.previous();
                assert_eq!(lightbox.index(), Some(start));

                lightbox.previous();
                lightbox.next();
                assert_eq!(lightbox.index(), Some(start));
            }
        }
    }

    #[test]
    fn test_len_steps_close_the_cycle() {
        let len = 7;
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(4, len).unwrap();

        for _ in 0..len {
            lightbox.next();
        }
        assert_eq!(lightbox.index(), Some(4));
    }

    #[test]
    fn test_single_item_navigation_is_noop() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(0, 1).unwrap();
        assert!(!lightbox.next());
        assert!(!lightbox.previous());
        assert_eq!(lightbox.index(), Some(0));

        // Closed lightbox ignores navigation entirely
        lightbox.close();
        assert!(!lightbox.next());
        assert_eq!(lightbox.index(), None);
    }

    #[test]
    fn test_every_close_path_releases_scroll_lock() {
        let (mut lightbox, lock) = lightbox();

        lightbox.open(1, 3).unwrap();
        assert!(lock.is_locked());
        lightbox.apply(LightboxAction::Close);
        assert!(!lock.is_locked());

        lightbox.open(1, 3).unwrap();
        lightbox.sync_len(0);
        assert!(!lightbox.is_open());
        assert!(!lock.is_locked());

        lightbox.open(1, 3).unwrap();
        let t0 = Instant::now();
        lightbox.pointer_pressed(PointerKind::Touch, Point2::new(100.0, 100.0), t0, viewport());
        let outcome = lightbox.pointer_released(Point2::new(100.0, 250.0), t0 + Duration::from_millis(200));
        assert_eq!(outcome, GestureOutcome::Close);
        assert!(!lock.is_locked());

        lightbox.open(1, 3).unwrap();
        drop(lightbox);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_reopen_does_not_double_lock() {
        let (mut lightbox, lock) = lightbox();
        lightbox.open(0, 3).unwrap();
        lightbox.open(2, 3).unwrap();
        lightbox.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_shrinking_view_clamps_index() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(6, 7).unwrap();

        lightbox.sync_len(3);
        assert_eq!(lightbox.index(), Some(2));
        assert_eq!(lightbox.len(), 3);

        // Growing keeps the index
        lightbox.sync_len(10);
        assert_eq!(lightbox.index(), Some(2));
    }

    #[test]
    fn test_reopen_yields_fresh_unzoomed_state() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(0, 5).unwrap();
        lightbox.toggle_zoom();
        lightbox.wheel(10.0, viewport());
        assert!(!lightbox.zoom().transform().is_identity());

        lightbox.close();
        lightbox.open(3, 5).unwrap();
        assert_eq!(lightbox.zoom().mode(), ZoomMode::Navigation);
        assert!(lightbox.zoom().transform().is_identity());
        assert_eq!(lightbox.load_state(), LoadState::Pending);
    }

    #[test]
    fn test_navigation_resets_transform_and_load_flag() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(0, 5).unwrap();
        assert!(lightbox.complete_load(0, true, Instant::now()));
        assert!(lightbox.load_state().is_loaded());

        lightbox.toggle_zoom();
        lightbox.wheel(5.0, viewport());
        lightbox.apply(LightboxAction::Next);

        assert_eq!(lightbox.load_state(), LoadState::Pending);
        assert!(lightbox.zoom().transform().is_identity());

        // The result for the previous image arrives late
        assert!(!lightbox.complete_load(0, true, Instant::now()));
        assert!(lightbox.complete_load(1, false, Instant::now()));
        assert_eq!(lightbox.load_state(), LoadState::Failed);
    }

    #[test]
    fn test_retarget_drops_loaded_flag_and_zoom() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(2, 5).unwrap();
        lightbox.complete_load(2, true, Instant::now());
        lightbox.toggle_zoom();
        lightbox.wheel(10.0, viewport());

        lightbox.retarget();
        assert_eq!(lightbox.index(), Some(2));
        assert_eq!(lightbox.load_state(), LoadState::Pending);
        assert!(lightbox.zoom().transform().is_identity());
        assert!(lightbox.zoom().is_zooming());

        // Closed lightbox has nothing to retarget
        lightbox.close();
        lightbox.retarget();
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_drag_flick_navigates() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(0, 3).unwrap();
        let t0 = Instant::now();

        lightbox.pointer_pressed(PointerKind::Drag, Point2::new(300.0, 200.0), t0, viewport());
        lightbox.pointer_moved(
            Point2::new(240.0, 200.0),
            Vector2::new(-60.0, 0.0),
            t0 + Duration::from_millis(50),
            viewport(),
        );
        let outcome = lightbox.pointer_released(Point2::new(180.0, 200.0), t0 + Duration::from_millis(100));

        assert_eq!(outcome, GestureOutcome::Navigate(NavDirection::Next));
        assert_eq!(lightbox.index(), Some(1));
    }

    #[test]
    fn test_zoom_mode_suppresses_swipe_navigation() {
        let (mut lightbox, _lock) = lightbox();
        lightbox.open(0, 3).unwrap();
        lightbox.toggle_zoom();
        lightbox.wheel(10.0, viewport());
        let t0 = Instant::now();

        lightbox.pointer_pressed(PointerKind::Touch, Point2::new(300.0, 200.0), t0, viewport());
        lightbox.pointer_moved(
            Point2::new(150.0, 200.0),
            Vector2::new(-150.0, 0.0),
            t0 + Duration::from_millis(50),
            viewport(),
        );
        let outcome = lightbox.pointer_released(Point2::new(150.0, 200.0), t0 + Duration::from_millis(60));

        assert_eq!(outcome, GestureOutcome::None);
        assert_eq!(lightbox.index(), Some(0));
        assert_eq!(lightbox.zoom().transform().offset, Vector2::new(-150.0, 0.0));
    }
}
