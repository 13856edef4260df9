//! Catalog page: section links and facets on the left, product grid on the right

use iced::widget::{button, column, container, image, row, scrollable, text, Column, Space};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use super::style;
use crate::app::{ArtworkCache, Message};
use crate::route::Route;
use crate::state::catalog::{CatalogView, Filter, Phase};
use crate::state::data::{Category, Product};

const SIDEBAR_WIDTH: f32 = 256.0;
const CARD_WIDTH: f32 = 200.0;
const ARTWORK_SIZE: f32 = 176.0;

pub fn view<'a>(
    catalog: &'a CatalogView,
    artwork: &ArtworkCache,
    spinner: Element<'a, Message>,
) -> Element<'a, Message> {
    let category = catalog.category();

    let mut main = column![].spacing(24).width(Length::Fill);
    if category != Category::ALL {
        main = main.push(
            button(text("← Back to All Products").size(15))
                .padding([4, 0])
                .on_press(Message::Navigate(Route::Catalog(Category::ALL)))
                .style(style::link(false)),
        );
    }
    main = main.push(text(category.title).size(36).color(style::INK));

    let body: Element<'a, Message> = match catalog.phase() {
        Phase::Loading => spinner,
        Phase::Failed(message) => centered_note(text(message.as_str()).color(style::DANGER)),
        Phase::Ready if catalog.filtered_count() == 0 => centered_note(
            text(format!("No {} products found in this category.", category.noun())).color(style::MUTED),
        ),
        Phase::Ready => grid(catalog, artwork),
    };
    main = main.push(body);

    let page = row![sidebar(catalog), main]
        .spacing(32)
        .padding([32, 24]);

    scrollable(container(page).width(Length::Fill)).into()
}

fn sidebar<'a>(catalog: &'a CatalogView) -> Element<'a, Message> {
    let current = catalog.category();

    let sections = Category::SECTIONS
        .into_iter()
        .fold(Column::new().spacing(4), |col, category| {
            col.push(
                button(text(category.title).size(15))
                    .width(Length::Fill)
                    .padding([8, 16])
                    .on_press(Message::Navigate(Route::Catalog(category)))
                    .style(style::link(category == current)),
            )
        });

    let mut facets = Column::new().spacing(4).push(facet_button(
        format!("All {}", current.title),
        Filter::All,
        catalog.filter(),
    ));
    for name in catalog.subcategories() {
        facets = facets.push(facet_button(
            name.clone(),
            Filter::Subcategory(name.clone()),
            catalog.filter(),
        ));
    }

    container(
        column![
            text("Categories").size(18).color(style::INK),
            sections,
            Space::with_height(16.0),
            text("Subcategories").size(18).color(style::INK),
            facets,
        ]
        .spacing(12),
    )
    .width(SIDEBAR_WIDTH)
    .padding(16)
    .style(style::card)
    .into()
}

fn facet_button<'a>(label: String, filter: Filter, selected: &Filter) -> Element<'a, Message> {
    let is_selected = filter == *selected;
    button(text(label).size(15))
        .width(Length::Fill)
        .padding([8, 16])
        .on_press(Message::SelectFilter(filter))
        .style(style::facet(is_selected))
        .into()
}

fn grid<'a>(catalog: &'a CatalogView, artwork: &ArtworkCache) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = catalog
        .displayed()
        .into_iter()
        .map(|product| card(product, artwork))
        .collect();

    let mut content = column![Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0)]
        .spacing(32)
        .align_x(Alignment::Center);

    if catalog.has_more() {
        content = content.push(
            button(text("Load More").size(16))
                .padding([12, 32])
                .on_press(Message::LoadMore)
                .style(style::primary),
        );
    }

    content.into()
}

fn card<'a>(product: &'a Product, artwork: &ArtworkCache) -> Element<'a, Message> {
    let picture = artwork_view(&product.image, artwork, ARTWORK_SIZE);

    let content = column![
        picture,
        text(product.name.as_str()).size(13).color(style::INK),
        text(product.subcategory.as_str()).size(12).color(style::MUTED),
        button(text("View Details").size(13))
            .padding([6, 16])
            .on_press(Message::Navigate(Route::Product(product.id.clone())))
            .style(style::primary),
    ]
    .spacing(6)
    .align_x(Alignment::Center);

    container(content)
        .width(CARD_WIDTH)
        .padding(12)
        .style(style::card)
        .into()
}

/// Product artwork, or a placeholder while it is loading or unavailable
pub fn artwork_view<'a>(url: &str, artwork: &ArtworkCache, size: f32) -> Element<'a, Message> {
    match artwork.get(url) {
        Some(handle) => image(handle.clone())
            .width(size)
            .height(size)
            .content_fit(ContentFit::Contain)
            .into(),
        None => {
            let label = if artwork.is_pending(url) { "Loading..." } else { "No image" };
            container(text(label).size(12))
                .width(size)
                .height(size)
                .center_x(size)
                .center_y(size)
                .style(style::placeholder)
                .into()
        }
    }
}

fn centered_note<'a>(note: iced::widget::Text<'a>) -> Element<'a, Message> {
    container(note)
        .width(Length::Fill)
        .padding([80, 0])
        .center_x(Length::Fill)
        .into()
}
