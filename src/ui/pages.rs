//! Static pages, navigation sidebar and footer

use chrono::Datelike;
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Theme};

use crate::config::ThemeChoice;
use crate::state::catalog::Catalog;
use crate::{Message, Page};

pub fn home(catalog: &Catalog) -> Element<'_, Message> {
    let bio = catalog.biography();

    let actions = row![
        button(text("View gallery"))
            .on_press(Message::Navigate(Page::Gallery))
            .padding(10),
        button(text("Work in progress"))
            .on_press(Message::Navigate(Page::Works))
            .padding(10)
            .style(button::secondary),
    ]
    .spacing(12);

    let summary = text(format!(
        "{} artworks in the gallery, {} works in progress",
        catalog.artworks().len(),
        catalog.works().len()
    ))
    .size(14);

    container(
        column![
            text(&bio.name).size(48),
            text(&bio.subtitle).size(20),
            text(&bio.statement).size(16),
            actions,
            summary,
        ]
        .spacing(20)
        .max_width(720)
        .align_x(Alignment::Center),
    )
    .center(Length::Fill)
    .into()
}

pub fn biography(catalog: &Catalog) -> Element<'_, Message> {
    let bio = catalog.biography();

    let paragraphs = Column::with_children(
        bio.paragraphs
            .iter()
            .map(|paragraph| text(paragraph).size(16).into()),
    )
    .spacing(12);

    let facts = Column::with_children(
        bio.facts
            .iter()
            .map(|fact| text(format!("• {}", fact)).size(14).into()),
    )
    .spacing(6);

    let contacts = Column::with_children(
        bio.contacts
            .iter()
            .map(|contact| text(format!("{}: {}", contact.label, contact.url)).size(14).into()),
    )
    .spacing(6);

    scrollable(
        column![
            text("Biography").size(32),
            text(&bio.name).size(22),
            paragraphs,
            horizontal_rule(1),
            facts,
            horizontal_rule(1),
            contacts,
        ]
        .spacing(20)
        .padding(32)
        .max_width(760),
    )
    .height(Length::Fill)
    .into()
}

pub fn exhibitions(catalog: &Catalog) -> Element<'_, Message> {
    let education = Column::with_children(catalog.education().iter().map(|entry| {
        let line = match &entry.detail {
            Some(detail) => format!("{}  {} ({})", entry.years, entry.institution, detail),
            None => format!("{}  {}", entry.years, entry.institution),
        };
        text(line).size(14).into()
    }))
    .spacing(6);

    let solo = Column::with_children(catalog.solo_exhibitions().iter().map(|year| {
        let entries = Column::with_children(year.exhibitions.iter().map(|exhibition| {
            text(format!("{}, {}", exhibition.title, exhibition.venue))
                .size(14)
                .into()
        }))
        .spacing(4);

        row![text(&year.year).size(14).width(Length::Fixed(96.0)), entries]
            .spacing(12)
            .into()
    }))
    .spacing(10);

    let group = Column::with_children(catalog.group_exhibitions().iter().map(|exhibition| {
        row![
            text(&exhibition.year).size(14).width(Length::Fixed(96.0)),
            text(format!("{}, {}", exhibition.title, exhibition.venue)).size(14),
        ]
        .spacing(12)
        .into()
    }))
    .spacing(6);

    scrollable(
        column![
            text("Exhibitions").size(32),
            section("Education", education),
            section("Solo exhibitions", solo),
            section("Group exhibitions", group),
        ]
        .spacing(28)
        .padding(32)
        .max_width(860),
    )
    .height(Length::Fill)
    .into()
}

fn section<'a>(title: &'a str, body: Column<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(22), horizontal_rule(1), body]
        .spacing(10)
        .into()
}

/// Navigation between pages plus the theme switch
pub fn sidebar(current: Page, theme: ThemeChoice) -> Element<'static, Message> {
    let links = Column::with_children(Page::ALL.iter().map(|&page| {
        let style: fn(&Theme, button::Status) -> button::Style = if page == current {
            button::primary
        } else {
            button::text
        };
        button(text(page.label()).size(16))
            .on_press(Message::Navigate(page))
            .style(style)
            .width(Length::Fill)
            .into()
    }))
    .spacing(4);

    let theme_label = match theme {
        ThemeChoice::Light => "Dark theme",
        ThemeChoice::Dark => "Light theme",
    };

    container(
        column![
            links,
            iced::widget::vertical_space(),
            button(text(theme_label).size(13))
                .on_press(Message::ToggleTheme)
                .style(button::secondary),
        ]
        .spacing(16),
    )
    .padding(16)
    .width(Length::Fixed(180.0))
    .height(Length::Fill)
    .into()
}

/// "© 2026 Name"
pub fn copyright(name: &str, year: i32) -> String {
    format!("© {} {}", year, name)
}

pub fn footer(catalog: &Catalog) -> Element<'_, Message> {
    let year = chrono::Local::now().year();

    container(text(copyright(&catalog.biography().name, year)).size(12))
        .padding(8)
        .center_x(Length::Fill)
        .into()
}
