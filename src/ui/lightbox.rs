//! Full-screen lightbox overlay

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{
    button, canvas::Canvas, center, column, container, horizontal_space, opaque, row, stack, text,
};
use iced::{Alignment, Color, Element, Length};
use std::time::Instant;

use super::canvas::ImageSurface;
use crate::assets::loader::DecodedImage;
use crate::state::data::GridItem;
use crate::state::lightbox::{Lightbox, LightboxAction};
use crate::state::load::LoadState;
use crate::Message;

const BACKDROP: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.92,
};

/// Keyboard shortcuts while the lightbox is open
pub fn key_action(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(Named::Escape) => Some(Message::Lightbox(LightboxAction::Close)),
        Key::Named(Named::ArrowLeft) => Some(Message::Lightbox(LightboxAction::Previous)),
        Key::Named(Named::ArrowRight) => Some(Message::Lightbox(LightboxAction::Next)),
        Key::Character("z") => Some(Message::ToggleZoom),
        _ => None,
    }
}

/// Cross-fade progress for the image surface, or `None` when nothing is drawn.
///
/// A cached image is drawn as soon as it exists: while the load is still
/// pending the progress is 0, so only the blurred placeholder shows.
fn surface_fade(load: LoadState, has_image: bool, now: Instant) -> Option<f32> {
    match load {
        LoadState::Failed => None,
        _ if !has_image => None,
        _ => Some(load.fade_progress(now)),
    }
}

/// The overlay for the open item. `image` is the decoded file, if any.
pub fn view<'a>(
    lightbox: &'a Lightbox,
    item: &dyn GridItem,
    image: Option<&DecodedImage>,
    now: Instant,
) -> Element<'a, Message> {
    let zoom = lightbox.zoom();
    let load = lightbox.load_state();

    let zoom_label = if zoom.is_zooming() { "Exit zoom" } else { "Zoom" };
    let toolbar = row![
        text(lightbox.counter().unwrap_or_default()).size(14),
        horizontal_space(),
        button(text(zoom_label).size(14))
            .on_press(Message::ToggleZoom)
            .style(button::text),
        button(text("✕").size(20))
            .on_press(Message::Lightbox(LightboxAction::Close))
            .style(button::text),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let fade = surface_fade(load, image.is_some(), now);
    let surface = Canvas::new(ImageSurface {
        image: fade.and(image.cloned()),
        transform: zoom.transform(),
        preview: lightbox.preview(),
        fade: fade.unwrap_or_default(),
    })
    .width(Length::Fill)
    .height(Length::Fill);

    let status: Element<'a, Message> = match load {
        LoadState::Pending if fade.is_none() => center(text("Loading…").size(14)).into(),
        LoadState::Failed => center(text("Image unavailable").size(16)).into(),
        _ => horizontal_space().into(),
    };

    // Arrows are hidden when there is nothing to step to or while zoomed
    let show_arrows = lightbox.len() > 1 && !zoom.is_zooming();
    let arrow = |label: &'a str, action: LightboxAction| -> Element<'a, Message> {
        if show_arrows {
            button(text(label).size(36))
                .on_press(Message::Lightbox(action))
                .style(button::text)
                .into()
        } else {
            horizontal_space().width(Length::Fixed(48.0)).into()
        }
    };

    let middle = row![
        arrow("‹", LightboxAction::Previous),
        stack![surface, status],
        arrow("›", LightboxAction::Next),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .height(Length::Fill);

    let mut caption = column![text(item.caption()).size(18)].spacing(4);
    if let Some(details) = item.details() {
        caption = caption.push(text(details).size(13));
    }

    let content = column![toolbar, middle, caption]
        .spacing(16)
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill);

    opaque(
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(BACKDROP.into()),
                text_color: Some(Color::WHITE),
                ..container::Style::default()
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;
    use std::time::Duration;

    #[test]
    fn test_keyboard_mapping() {
        let action = |key| key_action(key, Modifiers::default());

        assert!(matches!(
            action(Key::Named(Named::Escape)),
            Some(Message::Lightbox(LightboxAction::Close))
        ));
        assert!(matches!(
            action(Key::Named(Named::ArrowLeft)),
            Some(Message::Lightbox(LightboxAction::Previous))
        ));
        assert!(matches!(
            action(Key::Named(Named::ArrowRight)),
            Some(Message::Lightbox(LightboxAction::Next))
        ));
        assert!(matches!(action(Key::Character("z".into())), Some(Message::ToggleZoom)));
        assert!(action(Key::Named(Named::Enter)).is_none());
    }

    #[test]
    fn test_placeholder_shows_while_pending() {
        let now = Instant::now();

        assert_eq!(surface_fade(LoadState::Pending, true, now), Some(0.0));
        assert_eq!(surface_fade(LoadState::Pending, false, now), None);
        assert_eq!(surface_fade(LoadState::Failed, true, now), None);

        let loaded = LoadState::Loaded { at: now };
        assert_eq!(surface_fade(loaded, true, now + Duration::from_secs(5)), Some(1.0));
    }
}
