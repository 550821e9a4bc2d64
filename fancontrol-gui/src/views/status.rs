//! Status view

use crate::message::Message;
use crate::state::AppState;
use crate::theme::{colors, font_size, spacing};

use fancontrol::domain::Reading;
use iced::widget::{column, container, row, text};
use iced::{Element, Length, Theme};

/// Render the status view
pub fn view_status(state: &AppState) -> Element<'_, Message> {
    let snapshot = state.status.current();

    let temp_color = match snapshot.temperature {
        Reading::Value(c) => colors::temp_color(c.whole_degrees()),
        _ => colors::TEXT_MUTED,
    };
    let pwm_color = match snapshot.fan_pwm {
        Reading::Value(p) => colors::pwm_color(p),
        _ => colors::TEXT_MUTED,
    };

    let target = match state.current_temperature() {
        Some(temp) => state.curve.speed_for_temperature(temp).to_string(),
        None => fancontrol::domain::status::NOT_AVAILABLE.to_string(),
    };

    let tiles = row![
        tile("Temperature", snapshot.temperature.to_string(), temp_color),
        tile("Fan PWM", snapshot.fan_pwm.to_string(), pwm_color),
        tile("Curve target", target, colors::ACCENT_PURPLE),
    ]
    .spacing(spacing::MD);

    let path_line = |label: &str, path: Option<&std::path::Path>| {
        let shown = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unset)".to_string());
        text(format!("{}: {}", label, shown))
            .size(font_size::SM)
            .color(colors::TEXT_MUTED)
    };

    let enabled = if state.settings.enabled {
        text("Fan control enabled").color(colors::ACCENT_GREEN)
    } else {
        text("Fan control disabled").color(colors::ACCENT_ORANGE)
    };

    column![
        text("Status").size(font_size::XXL).color(colors::TEXT_PRIMARY),
        tiles,
        enabled.size(font_size::BASE),
        path_line("Temperature file", state.settings.thermal_file.as_deref()),
        path_line("Fan file", state.settings.fan_file.as_deref()),
        text(format!("Polls started: {}", state.status.issued()))
            .size(font_size::SM)
            .color(colors::TEXT_MUTED),
    ]
    .spacing(spacing::MD)
    .into()
}

fn tile<'a>(label: &'a str, value: String, accent: iced::Color) -> Element<'a, Message> {
    let content = column![
        text(label).size(font_size::SM).color(colors::TEXT_SECONDARY),
        text(value).size(font_size::DISPLAY).color(accent),
    ]
    .spacing(spacing::XS);

    container(content)
        .padding(spacing::MD)
        .width(Length::FillPortion(1))
        .style(move |_theme: &Theme| container::Style {
            background: Some(colors::BG_SURFACE.into()),
            border: iced::Border {
                color: colors::with_alpha(accent, 0.4),
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}
