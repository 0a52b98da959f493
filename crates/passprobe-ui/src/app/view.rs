//! Renders the inspector UI tree using Iced widgets.

use std::f32::consts::FRAC_PI_2;

use super::narrator::SimLevel;
use super::{style, Message, PassprobeUi};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Canvas, Path, Stroke};
use iced::widget::{
    button, column, container, progress_bar, row, scrollable, text, text_input, Column, Row, Space,
    Stack,
};
use iced::{mouse, Color, Element, Font, Length, Point, Rectangle, Renderer, Theme};
use iced_aw::Spinner;
use passprobe_core::analysis::RADAR_LABELS;
use passprobe_core::{HeatClass, StrengthClass, RADAR_MAX};

const PAD_ROOT: u16 = 14;
const PAD_CARD: u16 = 16;
const GAP_SECTION: u16 = 12;
const GAP_GROUP: u16 = 8;
const FONT_TITLE: u16 = 22;
const FONT_BODY: u16 = 14;
const FONT_MICRO: u16 = 12;
const CONSOLE_HEIGHT: f32 = 210.0;
const RADAR_SIDE: f32 = 260.0;

pub(super) fn render(ui: &PassprobeUi) -> Element<'_, Message> {
    let column = Column::new()
        .spacing(GAP_SECTION)
        .width(Length::Fill)
        .push(render_header(ui))
        .push(render_input_card(ui))
        .push(render_analysis_row(ui))
        .push(render_heatmap_card(ui))
        .push(render_consoles(ui))
        .push(render_footer(ui));

    let base: Element<'_, Message> = container(scrollable(column))
        .padding(PAD_ROOT)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::background())
        .into();

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(base);

    if ui.history_open {
        stack = stack.push(render_history_overlay(ui));
    }

    stack.into()
}

fn render_header(ui: &PassprobeUi) -> Element<'_, Message> {
    let copy = column![
        text("PASSPROBE")
            .size(FONT_TITLE)
            .style(text_color(Color::from_rgb8(0x00, 0xd3, 0xf8))),
        text("PASSWORD STRENGTH INSPECTOR")
            .size(FONT_MICRO)
            .style(text_color(Color::from_rgb8(0x5a, 0x6b, 0x8f))),
    ]
    .spacing(4);

    let theme_toggle = button(
        text(if ui.light_theme { "Dark mode" } else { "Light mode" }).size(FONT_BODY),
    )
    .padding([8, 16])
    .style(style::ghost_button())
    .on_press(Message::ToggleTheme);

    let history = button(text("History").size(FONT_BODY))
        .padding([8, 16])
        .style(style::ghost_button())
        .on_press(Message::ToggleHistory);

    let layout = row![
        copy,
        Space::with_width(Length::Fill),
        row![history, theme_toggle].spacing(10),
    ]
    .align_y(Vertical::Center)
    .width(Length::Fill);

    container(layout)
        .padding(PAD_CARD)
        .width(Length::Fill)
        .style(style::header_card())
        .into()
}

fn render_input_card(ui: &PassprobeUi) -> Element<'_, Message> {
    let input = text_input("Enter a password...", &ui.password)
        .secure(!ui.password_visible)
        .on_input(Message::PasswordChanged)
        .padding(10)
        .size(16)
        .font(Font::MONOSPACE)
        .style(style::password_input())
        .width(Length::Fill);

    let visibility = button(
        text(if ui.password_visible { "Hide" } else { "Show" }).size(FONT_BODY),
    )
    .padding([8, 14])
    .style(style::ghost_button())
    .on_press(Message::ToggleVisibility);

    let generate = button(text("Generate Password").size(FONT_BODY))
        .padding([8, 14])
        .style(style::generate_button())
        .on_press(Message::GeneratePassword);

    let passphrase = button(text("Generate Passphrase").size(FONT_BODY))
        .padding([8, 14])
        .style(style::generate_button())
        .on_press(Message::GeneratePassphrase);

    let mut controls = Row::new()
        .spacing(10)
        .align_y(Vertical::Center)
        .push(input)
        .push(visibility)
        .push(generate)
        .push(passphrase);

    if ui.analyzing || ui.generating {
        controls = controls.push(
            Spinner::new()
                .width(Length::Fixed(22.0))
                .height(Length::Fixed(22.0)),
        );
    }

    container(controls)
        .padding(PAD_CARD)
        .width(Length::Fill)
        .style(style::panel_card())
        .into()
}

fn render_analysis_row(ui: &PassprobeUi) -> Element<'_, Message> {
    row![render_meter_card(ui), render_radar_card(ui)]
        .spacing(GAP_SECTION)
        .width(Length::Fill)
        .into()
}

fn render_meter_card(ui: &PassprobeUi) -> Element<'_, Message> {
    let body: Element<'_, Message> = match &ui.snapshot {
        Some(snapshot) => {
            let class = StrengthClass::for_score(snapshot.score);
            let mut details = Column::new()
                .spacing(GAP_GROUP)
                .push(
                    row![
                        text(format!("Strength Score: {}/100", snapshot.score)).size(16),
                        Space::with_width(Length::Fill),
                        text(class.label())
                            .size(FONT_BODY)
                            .style(text_color(style::strength_color(class))),
                    ]
                    .align_y(Vertical::Center),
                )
                .push(
                    progress_bar(0.0..=100.0, f32::from(snapshot.score))
                        .height(Length::Fixed(14.0))
                        .style(style::meter_bar(class)),
                )
                .push(
                    text(format!("Estimated crack time: {}", snapshot.crack_time))
                        .size(FONT_BODY),
                )
                .push(text(snapshot.breach.as_str()).size(FONT_BODY));

            if !snapshot.feedback.is_empty() {
                let mut feedback = Column::new().spacing(4);
                for hint in &snapshot.feedback {
                    feedback = feedback.push(
                        text(format!("• {hint}"))
                            .size(FONT_MICRO)
                            .style(text_color(Color::from_rgb8(0x9a, 0xa7, 0xc7))),
                    );
                }
                details = details.push(feedback);
            }

            details.into()
        }
        None => text("No analysis yet. Start typing to probe a password.")
            .size(FONT_BODY)
            .style(text_color(Color::from_rgb8(0x5a, 0x6b, 0x8f)))
            .into(),
    };

    container(body)
        .padding(PAD_CARD)
        .width(Length::Fill)
        .height(Length::Fixed(RADAR_SIDE))
        .style(style::panel_card())
        .into()
}

fn render_radar_card(ui: &PassprobeUi) -> Element<'_, Message> {
    let chart = Canvas::new(RadarChart {
        axes: ui.radar_axes,
        cache: &ui.radar_cache,
    })
    .width(Length::Fixed(RADAR_SIDE - 2.0 * PAD_CARD as f32))
    .height(Length::Fixed(RADAR_SIDE - 2.0 * PAD_CARD as f32));

    container(chart)
        .padding(PAD_CARD)
        .width(Length::Fixed(RADAR_SIDE))
        .height(Length::Fixed(RADAR_SIDE))
        .style(style::panel_card())
        .into()
}

fn render_heatmap_card(ui: &PassprobeUi) -> Element<'_, Message> {
    if ui.analyzed_password.is_empty() {
        return Space::with_height(Length::Shrink).into();
    }

    let mut chips = Row::new().spacing(6);
    for ch in ui.analyzed_password.chars() {
        let class = HeatClass::of(ch);
        chips = chips.push(
            container(
                text(ch.to_string())
                    .size(16)
                    .font(Font::MONOSPACE)
                    .style(text_color(style::heat_color(class))),
            )
            .padding([4, 8])
            .style(style::heat_chip(class)),
        );
    }

    let body = column![
        text("CHARACTER HEATMAP")
            .size(FONT_MICRO)
            .style(text_color(Color::from_rgb8(0x5a, 0x6b, 0x8f))),
        scrollable(chips).width(Length::Fill),
    ]
    .spacing(GAP_GROUP);

    container(body)
        .padding(PAD_CARD)
        .width(Length::Fill)
        .style(style::panel_card())
        .into()
}

fn render_consoles(ui: &PassprobeUi) -> Element<'_, Message> {
    row![
        render_console("ATTACK SIMULATION", ui.attack.lines()),
        render_console("BREACH TERMINAL", ui.breach.lines()),
    ]
    .spacing(GAP_SECTION)
    .width(Length::Fill)
    .into()
}

fn render_console<'a>(title: &'a str, lines: &'a [(SimLevel, String)]) -> Element<'a, Message> {
    let mut log = Column::new().spacing(3);
    for (level, line) in lines {
        log = log.push(
            text(line.as_str())
                .size(FONT_MICRO)
                .font(Font::MONOSPACE)
                .style(text_color(style::sim_color(*level))),
        );
    }

    let body = column![
        text(title)
            .size(FONT_MICRO)
            .style(text_color(Color::from_rgb8(0x5a, 0x6b, 0x8f))),
        scrollable(log).height(Length::Fill).width(Length::Fill),
    ]
    .spacing(GAP_GROUP);

    container(body)
        .padding(PAD_CARD)
        .width(Length::Fill)
        .height(Length::Fixed(CONSOLE_HEIGHT))
        .style(style::console_card())
        .into()
}

fn render_footer(ui: &PassprobeUi) -> Element<'_, Message> {
    let mut status = Row::new()
        .spacing(GAP_SECTION)
        .align_y(Vertical::Center)
        .push(text(ui.status_line.as_str()).size(FONT_MICRO));

    if let Some(error) = &ui.last_error {
        status = status.push(
            text(error.as_str())
                .size(FONT_MICRO)
                .style(text_color(Color::from_rgb8(0xff, 0x45, 0x8a))),
        );
    }

    container(status).padding([4, 8]).width(Length::Fill).into()
}

fn render_history_overlay(ui: &PassprobeUi) -> Element<'_, Message> {
    let mut body = Column::new()
        .spacing(GAP_GROUP)
        .push(text("RECENT CHECKS").size(16));

    if ui.history_view.is_empty() {
        body = body.push(
            text("No checks recorded yet.")
                .size(FONT_BODY)
                .style(text_color(Color::from_rgb8(0x5a, 0x6b, 0x8f))),
        );
    } else {
        for entry in &ui.history_view {
            body = body.push(
                text(format!("{} — Score: {}/100", entry.time, entry.score))
                    .size(FONT_BODY)
                    .font(Font::MONOSPACE),
            );
        }
    }

    body = body.push(Space::with_height(Length::Fixed(6.0))).push(
        button(text("Close").size(FONT_BODY))
            .padding([8, 18])
            .style(style::primary_button())
            .on_press(Message::ToggleHistory),
    );

    let panel = container(body)
        .padding(24)
        .width(Length::Fixed(420.0))
        .style(style::modal_panel());

    container(panel)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(style::overlay_backdrop())
        .into()
}

/// Four-axis radar backed by a component-owned cache; the cache is cleared
/// whenever a new snapshot or theme lands.
struct RadarChart<'a> {
    axes: [f32; 4],
    cache: &'a canvas::Cache,
}

impl canvas::Program<Message> for RadarChart<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
            let radius = (bounds.width.min(bounds.height) / 2.0) - 26.0;
            if radius <= 0.0 {
                return;
            }

            let grid = style::radar_grid(theme);
            for ring in 1..=5 {
                let r = radius * ring as f32 / 5.0;
                frame.stroke(
                    &Path::circle(center, r),
                    Stroke::default().with_color(grid).with_width(1.0),
                );
            }

            let accent = style::radar_accent();
            let mut points = [Point::ORIGIN; 4];
            for (index, value) in self.axes.iter().enumerate() {
                let angle = -FRAC_PI_2 + index as f32 * FRAC_PI_2;
                let spoke_end = Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                );
                frame.stroke(
                    &Path::line(center, spoke_end),
                    Stroke::default().with_color(grid).with_width(1.0),
                );

                let reach = radius * (value / RADAR_MAX).clamp(0.0, 1.0);
                points[index] = Point::new(
                    center.x + reach * angle.cos(),
                    center.y + reach * angle.sin(),
                );

                frame.fill_text(canvas::Text {
                    content: RADAR_LABELS[index].to_string(),
                    position: Point::new(
                        center.x + (radius + 14.0) * angle.cos(),
                        center.y + (radius + 14.0) * angle.sin(),
                    ),
                    color: style::radar_label(theme),
                    size: 12.0.into(),
                    horizontal_alignment: Horizontal::Center,
                    vertical_alignment: Vertical::Center,
                    ..canvas::Text::default()
                });
            }

            let polygon = Path::new(|builder| {
                builder.move_to(points[0]);
                for point in &points[1..] {
                    builder.line_to(*point);
                }
                builder.close();
            });
            frame.fill(&polygon, style::with_alpha(accent, 0.25));
            frame.stroke(
                &polygon,
                Stroke::default().with_color(accent).with_width(2.0),
            );
        });

        vec![geometry]
    }
}

fn text_color(color: Color) -> impl Fn(&Theme) -> iced::widget::text::Style + Copy {
    move |_| iced::widget::text::Style { color: Some(color) }
}
