//! Window chrome: brand header with the section links above every page

use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use super::style;
use crate::app::Message;
use crate::route::Route;
use crate::state::data::Category;

pub fn view<'a>(route: &Route, content: Element<'a, Message>) -> Element<'a, Message> {
    let brand = button(text("GOLDEN EXTREME").size(22).color(style::GOLD))
        .on_press(Message::Navigate(Route::Home))
        .style(|_, _| button::Style::default())
        .padding(0);

    let mut links = row![].spacing(4).align_y(Alignment::Center);
    links = links.push(nav_link("Home", Route::Home, route));
    for category in Category::SECTIONS {
        links = links.push(nav_link(category.title, Route::Catalog(category), route));
    }
    links = links.push(nav_link("All Products", Route::Catalog(Category::ALL), route));

    let header = container(
        row![brand, horizontal_space(), links]
            .align_y(Alignment::Center)
            .padding([12, 24]),
    )
    .width(Length::Fill)
    .style(style::night);

    column![header, content].into()
}

fn nav_link<'a>(label: &'a str, target: Route, current: &Route) -> Element<'a, Message> {
    let active = match (&target, current) {
        (Route::Catalog(a), Route::Catalog(b)) => a == b,
        (Route::Home, Route::Home) => true,
        _ => false,
    };
    button(text(label).size(15))
        .on_press(Message::Navigate(target))
        .padding([6, 12])
        .style(style::nav(active))
        .into()
}
