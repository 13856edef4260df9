//! Landing page: animated banner followed by the hero carousel

use std::collections::HashMap;
use std::time::Instant;

use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, scrollable, text, Space, Stack};
use iced::{Alignment, Color, ContentFit, Element, Length, Padding};

use super::style;
use crate::app::Message;
use crate::route::Route;
use crate::state::animation::Reveal;
use crate::state::data::Category;
use crate::state::hero::{self, Carousel, SlideFrame};

const BANNER_HEIGHT: f32 = 560.0;
const CAROUSEL_HEIGHT: f32 = 640.0;

pub fn view<'a>(
    carousel: &'a Carousel,
    banner: &Reveal,
    slide_images: &HashMap<&'static str, Handle>,
    spinner: Element<'a, Message>,
    now: Instant,
) -> Element<'a, Message> {
    let slides: Element<'a, Message> = if carousel.content_ready(now) {
        carousel_view(carousel, slide_images, now)
    } else {
        container(spinner)
            .width(Length::Fill)
            .height(CAROUSEL_HEIGHT)
            .center_y(CAROUSEL_HEIGHT)
            .into()
    };

    scrollable(column![banner_view(banner, now), slides]).into()
}

/// Staggered "Welcome to Golden Extreme" block
fn banner_view<'a>(banner: &Reveal, now: Instant) -> Element<'a, Message> {
    let block = |index: usize, content: Element<'a, Message>| -> Element<'a, Message> {
        let (_, offset) = banner.line(index, now);
        container(content)
            .padding(Padding {
                top: offset,
                bottom: 20.0 - offset,
                left: 0.0,
                right: 0.0,
            })
            .into()
    };
    let opacity = |index: usize| banner.line(index, now).0;

    let [welcome, name] = hero::BANNER_HEADLINE;
    let actions_opacity = opacity(3);
    let actions = row![
        button(text("Shop Products").size(18))
            .padding([14, 32])
            .on_press(Message::Navigate(Route::Catalog(Category::ALL)))
            .style(move |theme, status| style::faded(style::primary(theme, status), actions_opacity)),
        button(text("Browse Tires").size(18))
            .padding([14, 32])
            .on_press(Message::Navigate(Route::Catalog(Category::TYRES)))
            .style(move |theme, status| style::faded(style::outline(theme, status), actions_opacity)),
    ]
    .spacing(24);

    let content = column![
        block(0, text(welcome).size(72).color(style::fade(Color::WHITE, opacity(0))).into()),
        block(1, text(name).size(72).color(style::fade(style::GOLD, opacity(1))).into()),
        block(
            2,
            text(hero::BANNER_TAGLINE)
                .size(22)
                .color(style::fade(Color::WHITE, 0.9 * opacity(2)))
                .into()
        ),
        block(3, actions.into()),
    ]
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(BANNER_HEIGHT)
        .center_x(Length::Fill)
        .center_y(BANNER_HEIGHT)
        .style(style::night)
        .into()
}

fn carousel_view<'a>(
    carousel: &'a Carousel,
    slide_images: &HashMap<&'static str, Handle>,
    now: Instant,
) -> Element<'a, Message> {
    let frames = carousel.frames(now);
    let mut layers: Vec<Element<'a, Message>> = frames
        .iter()
        .map(|frame| slide_layer(carousel, slide_images, *frame))
        .collect();

    layers.push(container(Space::new(Length::Fill, Length::Fill)).style(style::scrim).into());

    // Caption follows the entering slide's fade
    let caption_opacity = frames.last().map(|f| f.opacity).unwrap_or(1.0);
    if let Some(slide) = carousel.current_slide() {
        let mut caption = column![].align_x(Alignment::Center).spacing(4);
        for line in slide.title_lines() {
            caption = caption.push(text(line).size(60).color(style::fade(style::GOLD, caption_opacity)));
        }
        caption = caption
            .push(Space::with_height(16.0))
            .push(
                text(slide.subtitle)
                    .size(22)
                    .color(style::fade(Color::WHITE, 0.9 * caption_opacity)),
            )
            .push(Space::with_height(24.0))
            .push(
                button(text(slide.cta).size(18))
                    .padding([12, 28])
                    .on_press(Message::Navigate(slide.link.clone()))
                    .style(style::primary),
            );

        layers.push(
            container(caption)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .padding(24)
                .into(),
        );
    }

    let dots = carousel
        .slides()
        .iter()
        .enumerate()
        .fold(row![].spacing(12), |dots, (index, _)| {
            dots.push(
                button(Space::new(10.0, 10.0))
                    .padding(0)
                    .on_press(Message::SlideSelected(index))
                    .style(style::dot(index == carousel.current())),
            )
        });
    layers.push(
        container(dots)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Bottom)
            .padding(32)
            .into(),
    );

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(CAROUSEL_HEIGHT)
        .into()
}

fn slide_layer<'a>(
    carousel: &Carousel,
    slide_images: &HashMap<&'static str, Handle>,
    frame: SlideFrame,
) -> Element<'a, Message> {
    let handle = carousel
        .slides()
        .get(frame.index)
        .and_then(|slide| slide_images.get(slide.image));

    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .opacity(frame.opacity)
            .into(),
        None => Space::new(Length::Fill, Length::Fill).into(),
    };

    // Horizontal travel is expressed as uneven side padding
    container(picture)
        .padding(Padding {
            top: 0.0,
            bottom: 0.0,
            left: frame.offset_x.max(0.0),
            right: (-frame.offset_x).max(0.0),
        })
        .style(style::night)
        .into()
}
