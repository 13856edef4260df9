//! Colors, theme and widget styles

use iced::theme::Palette;
use iced::widget::{button, container};
use iced::{color, Border, Color, Shadow, Theme, Vector};

pub const AMBER: Color = color!(0xd9, 0x77, 0x06);
pub const AMBER_DARK: Color = color!(0xb4, 0x53, 0x09);
pub const AMBER_TINT: Color = color!(0xff, 0xfb, 0xeb);
pub const GOLD: Color = color!(0xea, 0xb3, 0x08);
pub const INK: Color = color!(0x11, 0x18, 0x27);
pub const BODY: Color = color!(0x37, 0x41, 0x51);
pub const MUTED: Color = color!(0x6b, 0x72, 0x80);
pub const DANGER: Color = color!(0xdc, 0x26, 0x26);
pub const PAGE: Color = color!(0xf9, 0xfa, 0xfb);
pub const NIGHT: Color = color!(0x0b, 0x0b, 0x0f);

pub fn theme() -> Theme {
    Theme::custom(
        "Golden Extreme".to_string(),
        Palette {
            background: PAGE,
            text: INK,
            primary: AMBER,
            success: Color::from_rgb8(0x16, 0xa3, 0x4a),
            danger: DANGER,
        },
    )
}

/// `color` with its alpha multiplied by `opacity`
pub fn fade(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

fn rounded(radius: f32) -> Border {
    Border {
        radius: radius.into(),
        ..Border::default()
    }
}

/// Filled amber pill ("View Details", "Load More", slide CTAs)
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => AMBER_DARK,
        button::Status::Disabled => fade(AMBER, 0.4),
        button::Status::Active => AMBER,
    };
    button::Style {
        background: Some(background.into()),
        text_color: Color::WHITE,
        border: rounded(999.0),
        shadow: Shadow::default(),
    }
}

/// Outlined button used for Prev/Next
pub fn outline(_theme: &Theme, status: button::Status) -> button::Style {
    let (text_color, background) = match status {
        button::Status::Disabled => (fade(MUTED, 0.5), None),
        button::Status::Hovered | button::Status::Pressed => (AMBER_DARK, Some(AMBER_TINT.into())),
        button::Status::Active => (AMBER, None),
    };
    button::Style {
        background,
        text_color,
        border: Border {
            color: match status {
                button::Status::Disabled => fade(MUTED, 0.3),
                _ => AMBER,
            },
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
    }
}

/// Sidebar and header link; `active` gets the highlighted look
pub fn link(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
        let (text_color, background) = if active || hovered {
            (AMBER, Some(AMBER_TINT.into()))
        } else {
            (BODY, None)
        };
        button::Style {
            background,
            text_color,
            border: rounded(8.0),
            shadow: Shadow::default(),
        }
    }
}

/// Header link on the dark bar
pub fn nav(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
        button::Style {
            background: None,
            text_color: if active || hovered { GOLD } else { fade(Color::WHITE, 0.85) },
            border: rounded(8.0),
            shadow: Shadow::default(),
        }
    }
}

/// Facet button; the selected facet is filled
pub fn facet(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        if selected {
            button::Style {
                border: rounded(8.0),
                ..primary(theme, status)
            }
        } else {
            link(false)(theme, status)
        }
    }
}

/// Carousel navigation dot
pub fn dot(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, _status| button::Style {
        background: Some(if active { GOLD } else { fade(Color::WHITE, 0.3) }.into()),
        text_color: Color::TRANSPARENT,
        border: rounded(999.0),
        shadow: Shadow::default(),
    }
}

/// Fade a whole button style (banner reveal)
pub fn faded(style: button::Style, opacity: f32) -> button::Style {
    button::Style {
        background: style.background.map(|background| match background {
            iced::Background::Color(color) => fade(color, opacity).into(),
            other => other,
        }),
        text_color: fade(style.text_color, opacity),
        ..style
    }
}

/// Dark block behind the header, the landing banner and the carousel
pub fn night(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(NIGHT.into()),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

/// Darkening layer drawn over slide images
pub fn scrim(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(fade(Color::BLACK, 0.45).into()),
        ..container::Style::default()
    }
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::WHITE.into()),
        border: rounded(12.0),
        shadow: Shadow {
            color: fade(Color::BLACK, 0.08),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..container::Style::default()
    }
}

/// Grey box shown while product artwork is missing
pub fn placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::from_rgb8(0xf3, 0xf4, 0xf6).into()),
        text_color: Some(MUTED),
        border: rounded(8.0),
        ..container::Style::default()
    }
}

/// Translucent backdrop behind the details modal
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(fade(Color::BLACK, 0.6).into()),
        ..container::Style::default()
    }
}
