//! Filter bars above the grids

use iced::widget::{button, pick_list, row, text};
use iced::{Alignment, Element};

use crate::state::filter::{CategoryFilter, ExhibitionFilter, FilterSelection, KindFilter, WorkFilter, YearFilter};
use crate::{Collection, Message};

/// Precomputed pick list options for both collections
#[derive(Debug, Clone, Default)]
pub struct Facets {
    pub years: Vec<YearFilter>,
    pub categories: Vec<CategoryFilter>,
    pub exhibitions: Vec<ExhibitionFilter>,
    pub work_years: Vec<YearFilter>,
    pub work_kinds: Vec<KindFilter>,
}

pub fn artworks<'a>(facets: &'a Facets, selection: &FilterSelection) -> Element<'a, Message> {
    let bar = row![
        pick_list(facets.years.as_slice(), Some(selection.year), Message::ArtworkYear),
        pick_list(
            facets.categories.as_slice(),
            Some(selection.category),
            Message::ArtworkCategory
        ),
        pick_list(
            facets.exhibitions.as_slice(),
            Some(selection.exhibition.clone()),
            Message::ArtworkExhibition
        ),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    with_reset(bar, selection.is_active(), Collection::Artworks)
}

pub fn works<'a>(facets: &'a Facets, filter: &WorkFilter) -> Element<'a, Message> {
    let bar = row![
        pick_list(facets.work_years.as_slice(), Some(filter.year), Message::WorkYear),
        pick_list(facets.work_kinds.as_slice(), Some(filter.kind), Message::WorkKind),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    with_reset(bar, filter.is_active(), Collection::Works)
}

/// The reset button only reacts while some filter is set
fn with_reset<'a>(
    bar: iced::widget::Row<'a, Message>,
    active: bool,
    collection: Collection,
) -> Element<'a, Message> {
    let reset = button(text("Reset filters").size(14))
        .on_press_maybe(active.then_some(Message::ResetFilters(collection)))
        .style(button::secondary);

    bar.push(reset).into()
}
