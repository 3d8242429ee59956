//! Image grid with per-position load states

use iced::widget::{
    center, column, container, horizontal_space, image, mouse_area, row, scrollable, stack, text,
    Column,
};
use iced::{ContentFit, Element, Length, Theme};
use std::time::Instant;

use crate::assets::loader::ImageCache;
use crate::state::data::GridItem;
use crate::state::load::LoadState;
use crate::state::view::CollectionView;
use crate::{Collection, Message};

const TILE_HEIGHT: f32 = 220.0;
const SPACING: f32 = 16.0;

/// Grid of the visible items of a collection.
///
/// While the scroll lock is held the grid is laid out without its
/// scrollable so the page underneath the lightbox stays put.
pub fn view<'a, T: GridItem>(
    items: &'a [T],
    collection_view: &'a CollectionView,
    cache: &'a ImageCache,
    collection: Collection,
    columns: usize,
    scroll_locked: bool,
    now: Instant,
) -> Element<'a, Message> {
    let visible = collection_view.visible();
    if visible.is_empty() {
        return center(text("No works match the selected filters").size(16))
            .height(Length::Fixed(240.0))
            .into();
    }

    let columns = columns.max(1);
    let loads = collection_view.loads();

    let tiles: Vec<Element<'a, Message>> = visible
        .iter()
        .enumerate()
        .filter_map(|(position, &index)| {
            let item = items.get(index)?;
            Some(tile(item, loads.get(position), cache, now, collection, position))
        })
        .collect();

    let mut grid = Column::new().spacing(SPACING).width(Length::Fill);
    let mut tiles = tiles.into_iter().peekable();
    while tiles.peek().is_some() {
        let mut line = row![].spacing(SPACING).width(Length::Fill);
        for slot in 0..columns {
            line = match tiles.next() {
                Some(tile) => line.push(tile),
                None if slot > 0 => line.push(horizontal_space()),
                None => break,
            };
        }
        grid = grid.push(line);
    }

    if scroll_locked {
        grid.into()
    } else {
        scrollable(grid).height(Length::Fill).into()
    }
}

fn tile<'a, T: GridItem>(
    item: &'a T,
    state: LoadState,
    cache: &'a ImageCache,
    now: Instant,
    collection: Collection,
    position: usize,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match (state, cache.image(item.image())) {
        (LoadState::Loaded { .. }, Some(decoded)) => {
            let progress = state.fade_progress(now);
            let layer = |handle: image::Handle| {
                image::<image::Handle>(handle)
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fill)
                    .height(Length::Fixed(TILE_HEIGHT))
            };
            stack![
                layer(decoded.placeholder.clone()).opacity(1.0 - progress),
                layer(decoded.full.clone()).opacity(progress),
            ]
            .into()
        }
        (LoadState::Failed, _) | (LoadState::Loaded { .. }, None) => {
            placeholder_box(text("Image unavailable").size(13))
        }
        (LoadState::Pending, _) => placeholder_box(text("")),
    };

    let mut caption = column![text(item.caption()).size(15)].spacing(2);
    if let Some(details) = item.details() {
        caption = caption.push(text(details).size(12));
    }

    mouse_area(column![picture, caption].spacing(8).width(Length::Fill))
        .on_press(Message::OpenImage(collection, position))
        .into()
}

/// Neutral tile shown before the image arrives or when it never will
fn placeholder_box<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .center(Length::Fill)
        .height(Length::Fixed(TILE_HEIGHT))
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.weak.color.into()),
                text_color: Some(palette.background.weak.text),
                ..container::Style::default()
            }
        })
        .into()
}
