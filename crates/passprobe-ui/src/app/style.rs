//! Inspector colour palette and widget styles.

use iced::border::{Border, Radius};
use iced::widget::button::{Status as ButtonStatus, Style as ButtonStyle};
use iced::widget::container;
use iced::widget::progress_bar;
use iced::widget::text_input::{self, Status as InputStatus};
use iced::{Background, Color, Theme};
use passprobe_core::{HeatClass, StrengthClass};

use super::narrator::SimLevel;

const BG_DARK: Color = Color {
    r: 0.02,
    g: 0.03,
    b: 0.07,
    a: 1.0,
};
const BG_LIGHT: Color = Color {
    r: 0.94,
    g: 0.95,
    b: 0.97,
    a: 1.0,
};
const PANEL_DARK: Color = Color {
    r: 0.05,
    g: 0.07,
    b: 0.13,
    a: 1.0,
};
const PANEL_LIGHT: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};
const CYAN: Color = Color {
    r: 0.0,
    g: 0.82,
    b: 1.0,
    a: 1.0,
};
const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.533,
    a: 1.0,
};
const AMBER: Color = Color {
    r: 1.0,
    g: 0.72,
    b: 0.18,
    a: 1.0,
};
const RED: Color = Color {
    r: 0.89,
    g: 0.125,
    b: 0.298,
    a: 1.0,
};
const MAGENTA: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};
const SLATE: Color = Color {
    r: 0.102,
    g: 0.122,
    b: 0.227,
    a: 1.0,
};

fn is_dark(theme: &Theme) -> bool {
    theme.extended_palette().is_dark
}

pub(super) fn background() -> impl Fn(&Theme) -> container::Style + Copy {
    |theme| container::Style {
        background: Some(Background::Color(if is_dark(theme) {
            BG_DARK
        } else {
            BG_LIGHT
        })),
        ..Default::default()
    }
}

pub(super) fn header_card() -> impl Fn(&Theme) -> container::Style + Copy {
    // Header shell framing the title and global controls.
    |theme| container::Style {
        background: Some(Background::Color(if is_dark(theme) {
            PANEL_DARK
        } else {
            PANEL_LIGHT
        })),
        border: Border {
            radius: Radius::from(18.0),
            width: 2.0,
            color: CYAN,
        },
        shadow: iced::Shadow {
            color: with_alpha(CYAN, 0.22),
            blur_radius: 12.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(super) fn panel_card() -> impl Fn(&Theme) -> container::Style + Copy {
    // Shared card treatment for the input, meter, radar, and heatmap panels.
    |theme| container::Style {
        background: Some(Background::Color(if is_dark(theme) {
            PANEL_DARK
        } else {
            PANEL_LIGHT
        })),
        border: Border {
            radius: Radius::from(16.0),
            width: 1.4,
            color: with_alpha(CYAN, 0.55),
        },
        shadow: iced::Shadow {
            color: with_alpha(CYAN, 0.14),
            blur_radius: 10.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(super) fn console_card() -> impl Fn(&Theme) -> container::Style + Copy {
    // Narrated console regions keep the dark terminal look in both themes.
    |_| container::Style {
        background: Some(Background::Color(Color::from_rgb8(6, 9, 18))),
        border: Border {
            radius: Radius::from(12.0),
            width: 1.3,
            color: Color::from_rgb8(0x14, 0x3f, 0x5f),
        },
        ..Default::default()
    }
}

pub(super) fn primary_button() -> impl Fn(&Theme, ButtonStatus) -> ButtonStyle + Copy {
    move |_theme, status| {
        let background = if matches!(status, ButtonStatus::Pressed) {
            with_alpha(CYAN, 0.82)
        } else {
            CYAN
        };
        ButtonStyle {
            background: Some(Background::Color(background)),
            border: Border {
                radius: Radius::from(10.0),
                width: 1.2,
                color: CYAN,
            },
            text_color: Color::from_rgb8(0x05, 0x08, 0x1f),
            ..ButtonStyle::default()
        }
    }
}

pub(super) fn generate_button() -> impl Fn(&Theme, ButtonStatus) -> ButtonStyle + Copy {
    // Generation actions borrow the success colorway.
    move |_theme, status| {
        let background = if matches!(status, ButtonStatus::Pressed) {
            Color::from_rgb8(0x19, 0x9a, 0x4e)
        } else {
            GREEN
        };
        ButtonStyle {
            background: Some(Background::Color(background)),
            border: Border {
                radius: Radius::from(10.0),
                width: 1.0,
                color: GREEN,
            },
            text_color: Color::from_rgb8(0x05, 0x08, 0x1f),
            ..ButtonStyle::default()
        }
    }
}

pub(super) fn ghost_button() -> impl Fn(&Theme, ButtonStatus) -> ButtonStyle + Copy {
    // Subdued toggle treatment (visibility, theme, history).
    move |theme, status| {
        let dark = is_dark(theme);
        let background = if matches!(status, ButtonStatus::Pressed) {
            with_alpha(SLATE, 0.9)
        } else if dark {
            SLATE
        } else {
            Color::from_rgb8(0xdd, 0xe3, 0xef)
        };
        ButtonStyle {
            background: Some(Background::Color(background)),
            border: Border {
                radius: Radius::from(10.0),
                width: 1.0,
                color: with_alpha(CYAN, 0.6),
            },
            text_color: if dark {
                Color::from_rgb8(0xe7, 0xff, 0xff)
            } else {
                Color::from_rgb8(0x1a, 0x22, 0x33)
            },
            ..ButtonStyle::default()
        }
    }
}

pub(super) fn password_input() -> impl Fn(&Theme, InputStatus) -> text_input::Style + Copy {
    move |theme, status| {
        let dark = is_dark(theme);
        let border_color = match status {
            InputStatus::Focused => CYAN,
            _ => Color::from_rgb8(0x3a, 0x45, 0x7d),
        };
        text_input::Style {
            background: Background::Color(if dark {
                Color::from_rgb8(10, 15, 26)
            } else {
                Color::WHITE
            }),
            border: Border {
                radius: Radius::from(10.0),
                width: 1.2,
                color: border_color,
            },
            icon: if dark { Color::WHITE } else { SLATE },
            placeholder: with_alpha(CYAN, 0.8),
            value: if dark {
                Color::from_rgb8(0xf1, 0xff, 0xff)
            } else {
                Color::from_rgb8(0x10, 0x16, 0x26)
            },
            selection: CYAN,
        }
    }
}

/// Strength meter colours follow the qualitative class, never the raw score.
pub(super) fn meter_bar(class: StrengthClass) -> impl Fn(&Theme) -> progress_bar::Style + Copy {
    move |theme| {
        let bar = match class {
            StrengthClass::Weak => RED,
            StrengthClass::Medium => AMBER,
            StrengthClass::Strong => GREEN,
        };
        progress_bar::Style {
            background: Background::Color(if is_dark(theme) {
                Color::from_rgba(0.18, 0.18, 0.28, 0.96)
            } else {
                Color::from_rgba(0.78, 0.80, 0.86, 1.0)
            }),
            bar: Background::Color(bar),
            border: Border {
                radius: Radius::from(8.0),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
        }
    }
}

pub(super) fn strength_color(class: StrengthClass) -> Color {
    match class {
        StrengthClass::Weak => RED,
        StrengthClass::Medium => AMBER,
        StrengthClass::Strong => GREEN,
    }
}

pub(super) fn heat_chip(class: HeatClass) -> impl Fn(&Theme) -> container::Style + Copy {
    let tint = heat_color(class);
    move |_| container::Style {
        background: Some(Background::Color(with_alpha(tint, 0.22))),
        border: Border {
            radius: Radius::from(6.0),
            width: 1.0,
            color: with_alpha(tint, 0.85),
        },
        ..Default::default()
    }
}

pub(super) fn heat_color(class: HeatClass) -> Color {
    match class {
        HeatClass::Digit => RED,
        HeatClass::Symbol => MAGENTA,
        HeatClass::Uppercase => AMBER,
        HeatClass::Other => GREEN,
    }
}

pub(super) fn sim_color(level: SimLevel) -> Color {
    match level {
        SimLevel::Info => CYAN,
        SimLevel::Probe => Color::from_rgb8(0x9a, 0xa7, 0xc7),
        SimLevel::Match => RED,
        SimLevel::Safe => GREEN,
        SimLevel::Failure => AMBER,
    }
}

pub(super) fn radar_accent() -> Color {
    CYAN
}

pub(super) fn radar_grid(theme: &Theme) -> Color {
    if is_dark(theme) {
        Color::from_rgba(0.4, 0.55, 0.75, 0.35)
    } else {
        Color::from_rgba(0.25, 0.30, 0.42, 0.35)
    }
}

pub(super) fn radar_label(theme: &Theme) -> Color {
    if is_dark(theme) {
        Color::from_rgb8(0xb8, 0xc6, 0xe2)
    } else {
        Color::from_rgb8(0x2a, 0x33, 0x4a)
    }
}

pub(super) fn overlay_backdrop() -> impl Fn(&Theme) -> container::Style + Copy {
    // Dimmed backdrop behind the history overlay.
    |_| container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.55))),
        ..Default::default()
    }
}

pub(super) fn modal_panel() -> impl Fn(&Theme) -> container::Style + Copy {
    |theme| container::Style {
        background: Some(Background::Color(if is_dark(theme) {
            Color::from_rgba(0.05, 0.08, 0.22, 0.98)
        } else {
            Color::WHITE
        })),
        border: Border {
            radius: Radius::from(18.0),
            width: 1.5,
            color: CYAN,
        },
        shadow: iced::Shadow {
            color: with_alpha(CYAN, 0.22),
            blur_radius: 12.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(super) fn with_alpha(mut color: Color, alpha: f32) -> Color {
    color.a = alpha;
    color
}
