//! Curve view
//!
//! The drag editor, the current point list and the live operating point.

use crate::message::{CurveMessage, Message};
use crate::state::AppState;
use crate::theme::{colors, font_size, spacing};
use crate::widgets::CurveEditorCanvas;

use fancontrol::editor::CurveEditor;
use iced::widget::{button, canvas, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length, Theme};

/// Height the editor is drawn at; width follows the window
const EDITOR_HEIGHT: f32 = 320.0;

/// Render the curve view
pub fn view_curve<'a>(state: &'a AppState, editor: &CurveEditor) -> Element<'a, Message> {
    let current_temp = state.current_temperature();

    let canvas = canvas(CurveEditorCanvas::new(*editor, &state.curve).with_current_temp(current_temp))
        .width(Length::Fill)
        .height(Length::Fixed(EDITOR_HEIGHT));

    let readout: Element<'_, Message> = match state.readout {
        Some(point) => text(CurveEditor::tooltip(point))
            .size(font_size::BASE)
            .color(colors::ACCENT_ORANGE)
            .into(),
        None => text("Drag a point to move it. Double-click to add, right-click to remove.")
            .size(font_size::SM)
            .color(colors::TEXT_MUTED)
            .into(),
    };

    let operating: Element<'_, Message> = match current_temp {
        Some(temp) => text(format!(
            "At {}°C the curve asks for PWM {}",
            temp,
            state.curve.speed_for_temperature(temp)
        ))
        .size(font_size::SM)
        .color(colors::ACCENT_CYAN)
        .into(),
        None => text("Temperature unavailable")
            .size(font_size::SM)
            .color(colors::TEXT_MUTED)
            .into(),
    };

    let reset = button(text("Reset to default").size(font_size::SM))
        .on_press(CurveMessage::ResetToDefault.into())
        .padding([spacing::XS, spacing::SM])
        .style(button::secondary);

    let points = text(format!("curve_data: {}", state.curve))
        .size(font_size::SM)
        .color(colors::TEXT_SECONDARY);

    let card = column![
        row![
            text("Fan curve").size(font_size::XXL).color(colors::TEXT_PRIMARY),
            horizontal_space(),
            reset,
        ]
        .align_y(Alignment::Center),
        canvas,
        readout,
        operating,
        points,
    ]
    .spacing(spacing::SM);

    container(card)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(colors::BG_SURFACE.into()),
            border: iced::Border {
                color: colors::GLASS_BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}
