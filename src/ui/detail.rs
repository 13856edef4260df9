//! Product detail page and its full-details modal

use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, scrollable, stack, text, Column,
    Space,
};
use iced::{Alignment, Element, Length};

use super::catalog::artwork_view;
use super::style;
use crate::app::{ArtworkCache, Message};
use crate::route::Route;
use crate::state::data::{Category, Product};
use crate::state::detail::{DetailPhase, DetailView};

const ARTWORK_SIZE: f32 = 420.0;
const MODAL_WIDTH: f32 = 640.0;

pub fn view<'a>(
    detail: &'a DetailView,
    artwork: &ArtworkCache,
    spinner: Element<'a, Message>,
) -> Element<'a, Message> {
    let page: Element<'a, Message> = match detail.phase() {
        DetailPhase::Loading => spinner,
        DetailPhase::Failed(message) => {
            failure(detail.failure_heading().unwrap_or("Error"), message)
        }
        DetailPhase::Ready(product) => product_view(detail, product, artwork),
    };

    match detail.product() {
        Some(product) if detail.modal_open() => modal(page, full_details(product)),
        _ => page,
    }
}

/// Shared block for fetch failures and missing products
fn failure<'a>(heading: &'static str, message: &'a str) -> Element<'a, Message> {
    let content = column![
        text(heading).size(32).color(style::INK),
        text(message).size(16).color(style::DANGER),
        button(text("Back to Products").size(16))
            .padding([12, 28])
            .on_press(Message::Navigate(Route::Catalog(Category::ALL)))
            .style(style::primary),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding([96, 24])
        .center_x(Length::Fill)
        .into()
}

fn product_view<'a>(
    detail: &'a DetailView,
    product: &'a Product,
    artwork: &ArtworkCache,
) -> Element<'a, Message> {
    let navigation = row![
        button(text("← Previous").size(15))
            .padding([8, 20])
            .on_press_maybe((!detail.prev_disabled()).then_some(Message::PreviousProduct))
            .style(style::outline),
        Space::with_width(Length::Fill),
        button(text("Next →").size(15))
            .padding([8, 20])
            .on_press_maybe((!detail.next_disabled()).then_some(Message::NextProduct))
            .style(style::outline),
    ];

    let mut info = column![
        text(format!("{} / {}", product.category, product.subcategory))
            .size(14)
            .color(style::AMBER),
        text(product.name.as_str()).size(34).color(style::INK),
        text(product.description.as_str()).size(16).color(style::BODY),
    ]
    .spacing(12)
    .width(Length::Fill);

    let specs = product.specification_rows();
    if !specs.is_empty() {
        info = info
            .push(Space::with_height(8.0))
            .push(text("Specifications").size(20).color(style::INK))
            .push(specification_grid(specs));
    }

    info = info.push(Space::with_height(8.0)).push(
        button(text("View Full Details").size(16))
            .padding([12, 28])
            .on_press(Message::OpenDetails)
            .style(style::primary),
    );

    let body = row![
        container(artwork_view(&product.image, artwork, ARTWORK_SIZE))
            .padding(16)
            .style(style::card),
        info,
    ]
    .spacing(40);

    let content = column![
        button(text("← Back to Products").size(15))
            .padding([4, 0])
            .on_press(Message::Navigate(Route::Catalog(Category::ALL)))
            .style(style::link(false)),
        body,
        navigation,
    ]
    .spacing(32)
    .padding([32, 48]);

    scrollable(content).into()
}

fn specification_grid<'a>(rows: Vec<(String, String)>) -> Element<'a, Message> {
    rows.into_iter()
        .fold(Column::new().spacing(8), |grid, (key, value)| {
            grid.push(
                row![
                    text(key)
                        .size(14)
                        .color(style::MUTED)
                        .width(Length::FillPortion(1)),
                    text(value)
                        .size(14)
                        .color(style::INK)
                        .width(Length::FillPortion(2)),
                ]
                .spacing(16),
            )
        })
        .into()
}

/// Everything we know about the product, built from the already-fetched copy
fn full_details<'a>(product: &'a Product) -> Element<'a, Message> {
    let mut content = column![
        row![
            text(product.name.as_str()).size(26).color(style::INK),
            Space::with_width(Length::Fill),
            button(text("Close").size(14))
                .padding([6, 16])
                .on_press(Message::CloseDetails)
                .style(style::outline),
        ]
        .align_y(Alignment::Center),
        text(format!("Category: {}", product.category)).size(14).color(style::BODY),
        text(format!("Subcategory: {}", product.subcategory)).size(14).color(style::BODY),
        text(product.description.as_str()).size(15).color(style::BODY),
    ]
    .spacing(12);

    let specs = product.specification_rows();
    if !specs.is_empty() {
        content = content
            .push(text("Specifications").size(18).color(style::INK))
            .push(specification_grid(specs));
    }

    container(scrollable(content))
        .width(MODAL_WIDTH)
        .max_height(600.0)
        .padding(24)
        .style(style::card)
        .into()
}

/// Overlay `content` on `base`; clicking the backdrop closes it
fn modal<'a>(base: Element<'a, Message>, content: Element<'a, Message>) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(style::backdrop))
                .on_press(Message::CloseDetails)
        )
    ]
    .into()
}
