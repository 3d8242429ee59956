use iced::mouse::{self, Cursor};
use iced::touch::{self, Finger};
use iced::widget::canvas::{self, Program};
use iced::{Point, Rectangle, Renderer, Size, Theme, Vector};
use std::collections::HashMap;

use crate::assets::loader::DecodedImage;
use crate::state::gesture::{PointerKind, SwipePreview};
use crate::state::zoom::ZoomTransform;
use crate::Message;

/// Mouse wheel pixels that count as one line
const PIXELS_PER_LINE: f32 = 10.0;

/// Raw pointer input, in coordinates relative to the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed { kind: PointerKind, position: Point },
    Moved { position: Point, delta: Vector },
    Released { position: Point },
    /// The interaction was interrupted (second finger, pointer lost)
    Cancelled,
    Wheel { lines: f32 },
    /// Ratio between the current and the previous finger distance
    Pinch { ratio: f32 },
}

/// Canvas that draws the lightbox image and turns pointer input into messages
///
/// The surface itself keeps no gesture logic: it reports what the pointer did
/// and the lightbox decides whether that is a swipe, a pan or a double tap.
pub struct ImageSurface {
    pub image: Option<DecodedImage>,
    pub transform: ZoomTransform,
    pub preview: SwipePreview,
    /// Cross-fade progress from placeholder to full image
    pub fade: f32,
}

impl Program<Message> for ImageSurface {
    type State = PointerState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if let Some(image) = &self.image {
            let fitted = fit(image.width, image.height, bounds.size());
            let center = frame.center();
            let opacity = self.preview.opacity;

            frame.with_save(|frame| {
                frame.translate(Vector::new(
                    center.x + self.transform.offset.x,
                    center.y + self.transform.offset.y + self.preview.offset,
                ));
                frame.scale(self.transform.scale * self.preview.scale);

                let rect = Rectangle::new(
                    Point::new(-fitted.width / 2.0, -fitted.height / 2.0),
                    fitted,
                );
                if self.fade < 1.0 {
                    frame.draw_image(
                        rect,
                        canvas::Image::new(image.placeholder.clone()).opacity(opacity),
                    );
                }
                frame.draw_image(
                    rect,
                    canvas::Image::new(image.full.clone()).opacity(self.fade * opacity),
                );
            });
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let half_extent = cgmath::Vector2::new(bounds.width / 2.0, bounds.height / 2.0);
        let relative = |position: Point| Point::new(position.x - bounds.x, position.y - bounds.y);

        let event = match event {
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if cursor.position_in(bounds).is_none() {
                    return (canvas::event::Status::Ignored, None);
                }
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y / PIXELS_PER_LINE,
                };
                Some(PointerEvent::Wheel { lines })
            }

            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                cursor.position_in(bounds).map(|position| {
                    state.mouse_down = true;
                    state.last_position = Some(position);
                    PointerEvent::Pressed {
                        kind: PointerKind::Drag,
                        position,
                    }
                })
            }

            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) if state.mouse_down => {
                let position = relative(position);
                state.moved_to(position)
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if state.mouse_down =>
            {
                state.mouse_down = false;
                let position = cursor
                    .position()
                    .map(relative)
                    .or(state.last_position.take())
                    .unwrap_or(Point::ORIGIN);
                Some(PointerEvent::Released { position })
            }

            canvas::Event::Mouse(mouse::Event::CursorLeft) if state.mouse_down => {
                state.mouse_down = false;
                state.last_position = None;
                Some(PointerEvent::Cancelled)
            }

            canvas::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(position) {
                    return (canvas::event::Status::Ignored, None);
                }
                state.finger_pressed(id, relative(position))
            }

            canvas::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                state.finger_moved(id, relative(position))
            }

            canvas::Event::Touch(touch::Event::FingerLifted { id, position }) => {
                state.finger_lifted(id, relative(position))
            }

            canvas::Event::Touch(touch::Event::FingerLost { id, .. }) => {
                state.fingers.remove(&id);
                state.pinch_distance = None;
                state.pinched = !state.fingers.is_empty();
                Some(PointerEvent::Cancelled)
            }

            _ => None,
        };

        match event {
            Some(event) => (
                canvas::event::Status::Captured,
                Some(Message::Pointer { event, half_extent }),
            ),
            None => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.mouse_down {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) && !self.transform.is_identity() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Pointer bookkeeping between canvas events
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    mouse_down: bool,
    last_position: Option<Point>,
    fingers: HashMap<Finger, Point>,
    pinch_distance: Option<f32>,
    /// A second finger joined; the touch sequence no longer counts as a swipe
    pinched: bool,
}

impl PointerState {
    fn moved_to(&mut self, position: Point) -> Option<PointerEvent> {
        let last = self.last_position.replace(position)?;
        Some(PointerEvent::Moved {
            position,
            delta: position - last,
        })
    }

    fn finger_pressed(&mut self, id: Finger, position: Point) -> Option<PointerEvent> {
        self.fingers.insert(id, position);

        match self.fingers.len() {
            1 => {
                self.pinched = false;
                self.last_position = Some(position);
                Some(PointerEvent::Pressed {
                    kind: PointerKind::Touch,
                    position,
                })
            }
            2 => {
                self.pinched = true;
                self.pinch_distance = self.finger_distance();
                Some(PointerEvent::Cancelled)
            }
            _ => None,
        }
    }

    fn finger_moved(&mut self, id: Finger, position: Point) -> Option<PointerEvent> {
        if !self.fingers.contains_key(&id) {
            return None;
        }
        self.fingers.insert(id, position);

        if self.fingers.len() >= 2 {
            let distance = self.finger_distance()?;
            let previous = self.pinch_distance.replace(distance)?;
            if previous <= f32::EPSILON {
                return None;
            }
            return Some(PointerEvent::Pinch {
                ratio: distance / previous,
            });
        }

        if self.pinched {
            self.last_position = Some(position);
            return None;
        }
        self.moved_to(position)
    }

    fn finger_lifted(&mut self, id: Finger, position: Point) -> Option<PointerEvent> {
        self.fingers.remove(&id)?;
        self.pinch_distance = None;

        if !self.fingers.is_empty() {
            return None;
        }
        self.last_position = None;

        if std::mem::take(&mut self.pinched) {
            None
        } else {
            Some(PointerEvent::Released { position })
        }
    }

    /// Distance between the first two fingers
    fn finger_distance(&self) -> Option<f32> {
        let mut points = self.fingers.values();
        let a = points.next()?;
        let b = points.next()?;
        Some(a.distance(*b))
    }
}

/// Largest size with the image's aspect ratio that fits `bounds`
pub fn fit(width: u32, height: u32, bounds: Size) -> Size {
    if width == 0 || height == 0 {
        return Size::ZERO;
    }
    let (width, height) = (width as f32, height as f32);
    let scale = (bounds.width / width).min(bounds.height / height);
    Size::new(width * scale, height * scale)
}
