//! Settings view
//!
//! Plain form fields plus the free-text curve, which is validated as it is
//! typed and only replaces the editor curve when applied.

use crate::message::{Message, SettingsMessage};
use crate::state::AppState;
use crate::theme::{colors, font_size, spacing};

use iced::widget::{button, checkbox, column, container, row, text, text_input};
use iced::{Alignment, Element, Length, Theme};

/// Render the settings view
pub fn view_settings(state: &AppState) -> Element<'_, Message> {
    let form = &state.form;

    let enabled = checkbox("Enable fan control", form.enabled)
        .on_toggle(|on| SettingsMessage::EnabledToggled(on).into())
        .size(18.0);

    let thermal = labelled(
        "Temperature file",
        text_input("/sys/class/thermal/thermal_zone0/temp", &form.thermal_file)
            .on_input(|v| SettingsMessage::ThermalFileChanged(v).into())
            .padding(spacing::SM),
    );

    let fan = labelled(
        "Fan PWM file",
        text_input("/sys/class/hwmon/hwmon0/pwm1", &form.fan_file)
            .on_input(|v| SettingsMessage::FanFileChanged(v).into())
            .padding(spacing::SM),
    );

    let temp_div = labelled(
        "Temperature divisor",
        text_input("1000", &form.temp_div)
            .on_input(|v| SettingsMessage::TempDivChanged(v).into())
            .padding(spacing::SM)
            .width(Length::Fixed(120.0)),
    );

    let interval = labelled(
        "Control interval (s)",
        text_input("3", &form.interval)
            .on_input(|v| SettingsMessage::IntervalChanged(v).into())
            .padding(spacing::SM)
            .width(Length::Fixed(120.0)),
    );

    let apply = button(text("Apply").size(font_size::SM))
        .on_press_maybe(
            form.curve_error
                .is_none()
                .then_some(SettingsMessage::ApplyCurveText.into()),
        )
        .padding([spacing::XS, spacing::SM]);

    let curve_input = row![
        text_input("35:0,45:36,60:90,85:255", &form.curve_text)
            .on_input(|v| SettingsMessage::CurveTextChanged(v).into())
            .on_submit(SettingsMessage::ApplyCurveText.into())
            .padding(spacing::SM),
        apply,
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let curve_hint: Element<'_, Message> = match &form.curve_error {
        Some(err) => text(err).size(font_size::SM).color(colors::ACCENT_RED).into(),
        None => text("Comma-separated temp:pwm pairs, at least two, temperatures 0-100, PWM 0-255")
            .size(font_size::SM)
            .color(colors::TEXT_MUTED)
            .into(),
    };

    let advanced = column![
        text("Advanced: curve as text")
            .size(font_size::LG)
            .color(colors::TEXT_PRIMARY),
        curve_input,
        curve_hint,
    ]
    .spacing(spacing::XS);

    let content = column![
        text("Settings").size(font_size::XXL).color(colors::TEXT_PRIMARY),
        enabled,
        thermal,
        fan,
        row![temp_div, interval].spacing(spacing::LG),
        advanced,
    ]
    .spacing(spacing::MD);

    container(content)
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

fn labelled<'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    column![
        text(label).size(font_size::SM).color(colors::TEXT_SECONDARY),
        input.into(),
    ]
    .spacing(spacing::XS)
    .into()
}
