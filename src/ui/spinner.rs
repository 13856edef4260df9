//! Loading indicator: the brand logo animated by an `IndicatorFrame`

use iced::widget::image::Handle;
use iced::widget::{column, container, image, text};
use iced::{Alignment, Element, Length, Radians, Rotation};

use super::style;
use crate::app::Message;
use crate::state::animation::{IndicatorFrame, IndicatorStyle};

/// Logo edge length at full scale
const LOGO_SIZE: f32 = 96.0;

pub fn view<'a>(logo: &Handle, kind: IndicatorStyle, frame: IndicatorFrame) -> Element<'a, Message> {
    let size = LOGO_SIZE * frame.scale;
    let logo = image(logo.clone())
        .width(size)
        .height(size)
        .opacity(frame.opacity)
        .rotation(Rotation::Floating(Radians(frame.rotation)));

    // Fixed box so the scale animation doesn't shift the layout around it
    let mut content = column![container(logo)
        .width(LOGO_SIZE)
        .height(LOGO_SIZE)
        .center_x(LOGO_SIZE)
        .center_y(LOGO_SIZE)]
    .spacing(12)
    .align_x(Alignment::Center);

    if kind == IndicatorStyle::Spinner {
        content = content.push(
            text("Loading...")
                .size(14)
                .color(style::fade(style::AMBER, frame.label_opacity)),
        );
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(320.0))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(320.0))
        .into()
}
