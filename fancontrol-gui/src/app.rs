//! Main application structure
//!
//! Implements the Elm Architecture (TEA) pattern for fancontrol-gui.

use crate::message::{CurveMessage, KeyboardShortcut, Message, SettingsMessage, View};
use crate::services::{status, GuiConfig, StatusPaths};
use crate::state::{AppState, Notification, NotificationLevel};
use crate::theme::{colors, fancontrol_theme, font_size, spacing};
use crate::views;

use fancontrol::config::FanControlSettings;
use fancontrol::editor::CurveEditor;
use fancontrol::uci::{ConfigStore, UciStore};
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Main application
pub struct FanControlGui {
    /// Application state
    state: AppState,

    /// UCI config the settings are read from and saved to
    store: UciStore,

    /// GUI preferences
    config: GuiConfig,

    /// Curve field layout
    editor: CurveEditor,
}

impl FanControlGui {
    /// Create a new application instance
    pub fn new(config_dir: Option<PathBuf>) -> (Self, Task<Message>) {
        let config = GuiConfig::load();
        let root = config_dir
            .or_else(|| config.preferences.config_dir.clone())
            .unwrap_or_else(|| PathBuf::from(UciStore::DEFAULT_ROOT));
        let mut store = UciStore::new(root);

        let (settings, notification) = load_settings(&mut store);
        let mut state = AppState::from_settings(settings);
        state.sidebar_expanded = config.preferences.sidebar_expanded;
        if let Some(notification) = notification {
            state.set_notification(notification);
        }

        let app = Self {
            state,
            store,
            config,
            editor: CurveEditor::default(),
        };

        // Show status right away instead of after the first interval
        (app, Task::done(Message::Tick(Instant::now())))
    }

    /// Update application state based on a message
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Navigation
            Message::ViewChanged(view) => {
                self.state.current_view = view;
                Task::none()
            }

            Message::SidebarToggled => {
                self.toggle_sidebar();
                Task::none()
            }

            Message::KeyPressed(shortcut) => {
                if let Some(view) = shortcut.to_view() {
                    self.state.current_view = view;
                    return Task::none();
                }
                match shortcut {
                    KeyboardShortcut::Save => self.save(),
                    KeyboardShortcut::Reload => self.reload(),
                    KeyboardShortcut::ToggleSidebar => self.toggle_sidebar(),
                    _ => {}
                }
                Task::none()
            }

            // Polling
            Message::Tick(_now) => {
                if self
                    .state
                    .notification
                    .as_ref()
                    .is_some_and(Notification::should_dismiss)
                {
                    self.state.clear_notification();
                }

                let ticket = self.state.status.begin();
                let paths = StatusPaths::from_settings(&self.state.settings);
                Task::perform(status::poll(paths), move |snapshot| {
                    Message::StatusRead(ticket, snapshot)
                })
            }

            Message::StatusRead(ticket, snapshot) => {
                self.state.status.complete(ticket, snapshot);
                Task::none()
            }

            // Editing
            Message::Curve(msg) => {
                self.update_curve(msg);
                Task::none()
            }

            Message::Settings(msg) => {
                self.update_settings(msg);
                Task::none()
            }

            // Actions
            Message::Save => {
                self.save();
                Task::none()
            }

            Message::Reload => {
                self.reload();
                Task::none()
            }

            Message::DismissNotification => {
                self.state.clear_notification();
                Task::none()
            }
        }
    }

    fn update_curve(&mut self, msg: CurveMessage) {
        match msg {
            CurveMessage::DragStarted(index) => {
                log::debug!("Drag started on point {}", index);
            }
            CurveMessage::DragMoved { index, candidate } => {
                if let Err(e) = self.state.drag_to(index, candidate) {
                    log::warn!("Ignoring drag update: {}", e);
                }
            }
            CurveMessage::DragEnded(index, how) => {
                log::debug!("Drag on point {} ended ({:?})", index, how);
                self.state.end_drag(how);
            }
            CurveMessage::PointAdded(point) => match self.state.add_point(point) {
                Ok(_) => self
                    .state
                    .set_notification(Notification::success(format!("Added point {}", point))),
                Err(e) => self.state.set_notification(Notification::warning(e.to_string())),
            },
            CurveMessage::PointRemoved(index) => match self.state.remove_point(index) {
                Ok(removed) => self
                    .state
                    .set_notification(Notification::success(format!("Removed point {}", removed))),
                Err(e) => self.state.set_notification(Notification::warning(e.to_string())),
            },
            CurveMessage::ResetToDefault => {
                self.state.reset_curve();
                self.state
                    .set_notification(Notification::success("Curve reset to default"));
            }
        }
    }

    fn update_settings(&mut self, msg: SettingsMessage) {
        let form = &mut self.state.form;
        match msg {
            SettingsMessage::EnabledToggled(on) => form.enabled = on,
            SettingsMessage::ThermalFileChanged(v) => form.thermal_file = v,
            SettingsMessage::FanFileChanged(v) => form.fan_file = v,
            SettingsMessage::TempDivChanged(v) => form.temp_div = v,
            SettingsMessage::IntervalChanged(v) => form.interval = v,
            SettingsMessage::CurveTextChanged(v) => {
                self.state.set_curve_text(v);
                return;
            }
            SettingsMessage::ApplyCurveText => {
                if self.state.apply_curve_text().is_ok() {
                    self.state
                        .set_notification(Notification::success("Curve updated from text"));
                }
                return;
            }
        }
        self.state.dirty = true;
    }

    fn save(&mut self) {
        let settings = match self.state.build_settings() {
            Ok(settings) => settings,
            Err(msg) => {
                self.state.set_notification(Notification::error(msg));
                return;
            }
        };

        match settings.save(&mut self.store) {
            Ok(()) => {
                log::info!("Saved settings (curve_data={})", settings.curve);
                self.state.mark_saved(settings);
                self.state.set_notification(Notification::success(format!(
                    "Saved to {}",
                    self.store.path_of(fancontrol::config::CONFIG_NAME).display()
                )));
            }
            Err(e) => {
                log::error!("Failed to save settings: {}", e);
                self.state.set_notification(Notification::error(e.to_string()));
            }
        }
    }

    fn reload(&mut self) {
        let (settings, notification) = load_settings(&mut self.store);
        self.state.reset_to(settings);
        self.state.set_notification(
            notification.unwrap_or_else(|| Notification::success("Reloaded settings")),
        );
    }

    fn toggle_sidebar(&mut self) {
        self.state.sidebar_expanded = !self.state.sidebar_expanded;
        self.config.preferences.sidebar_expanded = self.state.sidebar_expanded;
        if let Err(e) = self.config.save() {
            log::warn!("Failed to save preferences: {}", e);
        }
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = self.view_sidebar();
        let content = self.view_content();

        let main_layout = row![sidebar, content].height(Length::Fill);

        let with_notification = if let Some(ref notif) = self.state.notification {
            let notification = self.view_notification(notif);
            column![main_layout, notification]
        } else {
            column![main_layout]
        };

        container(with_notification)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(colors::BG_BASE.into()),
                ..Default::default()
            })
            .into()
    }

    fn view_sidebar(&self) -> Element<'_, Message> {
        let width = if self.state.sidebar_expanded {
            Length::Fixed(180.0)
        } else {
            Length::Fixed(68.0)
        };

        let nav_items = [
            (View::Curve, colors::ACCENT_GREEN),
            (View::Status, colors::ACCENT_CYAN),
            (View::Settings, colors::ACCENT_SKY),
        ];

        let nav_buttons: Vec<Element<'_, Message>> = nav_items
            .iter()
            .map(|(view, color)| self.view_nav_button(*view, *color))
            .collect();

        let content = column![
            Column::with_children(nav_buttons).spacing(spacing::SM),
            Space::with_height(Length::Fill),
        ]
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .height(Length::Fill);

        container(content)
            .width(width)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(colors::BG_SURFACE.into()),
                border: iced::Border {
                    color: colors::GLASS_BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_nav_button(&self, view: View, accent: iced::Color) -> Element<'_, Message> {
        let is_active = self.state.current_view == view;

        let style = move |_theme: &Theme, status: button::Status| {
            if is_active {
                button::Style {
                    background: Some(colors::with_alpha(accent, 0.15).into()),
                    text_color: accent,
                    border: iced::Border {
                        color: colors::with_alpha(accent, 0.4),
                        width: 1.0,
                        radius: 12.0.into(),
                    },
                    ..Default::default()
                }
            } else {
                let (bg, text_col) = match status {
                    button::Status::Hovered => (
                        colors::with_alpha(accent, 0.08),
                        colors::lerp(colors::TEXT_SECONDARY, accent, 0.5),
                    ),
                    _ => (colors::BG_SURFACE, colors::TEXT_SECONDARY),
                };
                button::Style {
                    background: Some(bg.into()),
                    text_color: text_col,
                    border: iced::Border {
                        radius: 12.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            }
        };

        let label = view.name();
        let label_text: Element<'_, Message> = if self.state.sidebar_expanded {
            text(label).size(font_size::BASE).into()
        } else {
            // Just show first letter when collapsed
            text(&label[..1]).size(font_size::LG).into()
        };

        button(label_text)
            .on_press(Message::ViewChanged(view))
            .padding([spacing::SM, spacing::MD])
            .width(Length::Fill)
            .style(style)
            .into()
    }

    /// Header with the live status line and save controls, then the view
    fn view_content(&self) -> Element<'_, Message> {
        let summary = text(self.state.status.current().summary())
            .size(font_size::BASE)
            .color(colors::TEXT_SECONDARY);

        let dirty = if self.state.dirty {
            text("Unsaved changes").size(font_size::SM).color(colors::ACCENT_ORANGE)
        } else {
            text("").size(font_size::SM)
        };

        let save = button(text("Save").size(font_size::BASE))
            .on_press(Message::Save)
            .padding([spacing::XS, spacing::MD])
            .style(button::primary);
        let reload = button(text("Reload").size(font_size::BASE))
            .on_press(Message::Reload)
            .padding([spacing::XS, spacing::MD])
            .style(button::secondary);

        let header = row![summary, horizontal_space(), dirty, reload, save]
            .spacing(spacing::SM)
            .align_y(Alignment::Center);

        let body = match self.state.current_view {
            View::Curve => views::view_curve(&self.state, &self.editor),
            View::Settings => views::view_settings(&self.state),
            View::Status => views::view_status(&self.state),
        };

        container(column![header, scrollable(body)].spacing(spacing::MD))
            .padding(spacing::LG)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_notification<'a>(&'a self, notif: &'a Notification) -> Element<'a, Message> {
        let color = match notif.level {
            NotificationLevel::Success => colors::ACCENT_GREEN,
            NotificationLevel::Warning => colors::ACCENT_ORANGE,
            NotificationLevel::Error => colors::ACCENT_RED,
        };

        let dismiss_btn = button(text("x").size(font_size::SM))
            .on_press(Message::DismissNotification)
            .padding(spacing::XS)
            .style(move |_theme: &Theme, status| {
                let text_col = match status {
                    button::Status::Hovered => color,
                    _ => colors::TEXT_SECONDARY,
                };
                button::Style {
                    background: None,
                    text_color: text_col,
                    ..Default::default()
                }
            });

        let content = row![
            text(&notif.message)
                .size(font_size::BASE)
                .color(colors::TEXT_PRIMARY),
            horizontal_space(),
            dismiss_btn,
        ]
        .align_y(Alignment::Center)
        .spacing(spacing::SM);

        container(content)
            .padding(spacing::MD)
            .width(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(colors::BG_SURFACE.into()),
                border: iced::Border {
                    color: colors::with_alpha(color, 0.6),
                    width: 1.5,
                    radius: 12.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// Get theme
    pub fn theme(&self) -> Theme {
        fancontrol_theme()
    }

    /// Get title
    pub fn title(&self) -> String {
        if self.state.dirty {
            String::from("fancontrol - Fan Curve *")
        } else {
            String::from("fancontrol - Fan Curve")
        }
    }

    /// Set up subscriptions
    pub fn subscription(&self) -> Subscription<Message> {
        let interval = Duration::from_millis(self.config.preferences.poll_interval_ms.max(500));
        Subscription::batch([
            iced::time::every(interval).map(Message::Tick),
            keyboard::on_key_press(handle_keyboard_shortcut),
        ])
    }
}

/// Read the settings section, reporting problems as a notification
fn load_settings<S: ConfigStore + ?Sized>(
    store: &mut S,
) -> (FanControlSettings, Option<Notification>) {
    match FanControlSettings::load(store) {
        Ok(settings) => {
            let notification = FanControlSettings::has_legacy_curve(&*store).then(|| {
                Notification::warning("Legacy curve_point list found; saving converts it to curve_data")
            });
            (settings, notification)
        }
        Err(e) => {
            log::warn!("Failed to load settings: {}", e);
            (
                FanControlSettings::default(),
                Some(Notification::error(format!("{}; showing defaults", e))),
            )
        }
    }
}

/// Handle keyboard shortcuts
fn handle_keyboard_shortcut(key: Key, modifiers: Modifiers) -> Option<Message> {
    if modifiers.control() {
        if let Key::Character(c) = &key {
            match c.as_str() {
                "1" => return Some(Message::KeyPressed(KeyboardShortcut::GotoCurve)),
                "2" => return Some(Message::KeyPressed(KeyboardShortcut::GotoStatus)),
                "," => return Some(Message::KeyPressed(KeyboardShortcut::GotoSettings)),
                "s" | "S" => return Some(Message::KeyPressed(KeyboardShortcut::Save)),
                "b" | "B" => return Some(Message::KeyPressed(KeyboardShortcut::ToggleSidebar)),
                _ => {}
            }
        }
    }

    if let Key::Named(Named::F5) = key {
        return Some(Message::KeyPressed(KeyboardShortcut::Reload));
    }

    None
}
