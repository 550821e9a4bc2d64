//! Application state definitions
//!
//! Holds the form being edited, the curve under the editor, and the last
//! status snapshot. Editing rules live here so `update` stays a dispatcher.

use crate::message::View;
use fancontrol::config::{FanControlSettings, SettingsBuilder};
use fancontrol::domain::{parse_strict, ControlPoint, Curve};
use fancontrol::editor::DragEnd;
use fancontrol::error::DomainError;
use fancontrol::status::StatusBoard;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Current view
    pub current_view: View,

    /// Whether sidebar is expanded
    pub sidebar_expanded: bool,

    /// Current notification/error message
    pub notification: Option<Notification>,

    /// Settings as last loaded or saved
    pub settings: FanControlSettings,

    /// Plain form fields
    pub form: SettingsForm,

    /// Curve under the editor
    pub curve: Curve,

    /// Value shown next to the dragged point
    pub readout: Option<ControlPoint>,

    /// Whether the form differs from what was last saved
    pub dirty: bool,

    /// Latest status poll
    pub status: StatusBoard,
}

/// Text-field state for the settings form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsForm {
    pub enabled: bool,
    pub thermal_file: String,
    pub fan_file: String,
    pub temp_div: String,
    pub interval: String,
    pub curve_text: String,
    /// Validation message for `curve_text`
    pub curve_error: Option<String>,
}

impl SettingsForm {
    fn from_settings(settings: &FanControlSettings) -> Self {
        fn path_text(path: Option<&Path>) -> String {
            path.map(|p| p.display().to_string()).unwrap_or_default()
        }

        Self {
            enabled: settings.enabled,
            thermal_file: path_text(settings.thermal_file.as_deref()),
            fan_file: path_text(settings.fan_file.as_deref()),
            temp_div: settings.temp_div.to_string(),
            interval: settings.interval_seconds.to_string(),
            curve_text: settings.curve.to_string(),
            curve_error: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(FanControlSettings::default())
    }
}

impl AppState {
    /// State for a freshly loaded settings section
    pub fn from_settings(settings: FanControlSettings) -> Self {
        Self {
            current_view: View::Curve,
            sidebar_expanded: true,
            notification: None,
            form: SettingsForm::from_settings(&settings),
            curve: settings.curve.clone(),
            readout: None,
            dirty: false,
            status: StatusBoard::new(),
            settings,
        }
    }

    /// Discard edits and take new settings, keeping view and status
    pub fn reset_to(&mut self, settings: FanControlSettings) {
        self.form = SettingsForm::from_settings(&settings);
        self.curve = settings.curve.clone();
        self.readout = None;
        self.dirty = false;
        self.settings = settings;
    }

    /// Set a notification
    pub fn set_notification(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Clear the current notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Apply one pointer move of a drag
    pub fn drag_to(
        &mut self,
        index: usize,
        candidate: ControlPoint,
    ) -> Result<ControlPoint, DomainError> {
        let applied = self.curve.drag_point(index, candidate)?;
        self.readout = Some(applied);
        self.dirty = true;
        self.sync_curve_text();
        Ok(applied)
    }

    /// Finish a drag and refresh the encoded value
    ///
    /// A cancelled drag keeps whatever the last move applied.
    pub fn end_drag(&mut self, how: DragEnd) {
        if how == DragEnd::Cancelled {
            log::debug!("Drag cancelled, keeping {:?}", self.readout);
        }
        self.readout = None;
        self.sync_curve_text();
    }

    /// Insert a point from the editor
    pub fn add_point(&mut self, point: ControlPoint) -> Result<usize, DomainError> {
        let index = self.curve.insert_point(point)?;
        self.dirty = true;
        self.sync_curve_text();
        Ok(index)
    }

    /// Remove a point from the editor
    pub fn remove_point(&mut self, index: usize) -> Result<ControlPoint, DomainError> {
        let removed = self.curve.remove_point(index)?;
        self.dirty = true;
        self.sync_curve_text();
        Ok(removed)
    }

    /// Replace the curve with the default one
    pub fn reset_curve(&mut self) {
        self.curve = Curve::default_curve();
        self.dirty = true;
        self.sync_curve_text();
    }

    /// Update the free-text curve and validate it as typed
    pub fn set_curve_text(&mut self, text: String) {
        self.form.curve_error = parse_strict(&text).err().map(|e| e.to_string());
        self.form.curve_text = text;
        self.dirty = true;
    }

    /// Move the free-text curve into the editor
    pub fn apply_curve_text(&mut self) -> Result<(), DomainError> {
        match parse_strict(&self.form.curve_text) {
            Ok(curve) => {
                self.curve = curve;
                self.form.curve_error = None;
                self.sync_curve_text();
                self.dirty = true;
                Ok(())
            }
            Err(e) => {
                self.form.curve_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Build the settings to save from the form and the editor curve
    ///
    /// Curve text that was typed but not applied is saved in place of the
    /// editor curve.
    pub fn build_settings(&self) -> Result<FanControlSettings, String> {
        let curve = self.curve_to_save()?;

        let temp_div = match self.form.temp_div.trim().parse::<u32>() {
            Ok(div) if div > 0 => div,
            _ => return Err("Temperature divisor must be a positive integer".to_string()),
        };
        let interval = match self.form.interval.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => return Err("Interval must be a positive number of seconds".to_string()),
        };

        Ok(SettingsBuilder::from_settings(self.settings.clone())
            .with_enabled(Some(self.form.enabled))
            .with_thermal_file(Some(PathBuf::from(self.form.thermal_file.trim())))
            .with_fan_file(Some(PathBuf::from(self.form.fan_file.trim())))
            .with_temp_div(Some(temp_div))
            .with_interval(Some(interval))
            .with_curve(Some(curve))
            .build())
    }

    fn curve_to_save(&self) -> Result<Curve, String> {
        if self.form.curve_text.trim() == self.curve.to_string() {
            return Ok(self.curve.clone());
        }
        parse_strict(&self.form.curve_text)
            .map_err(|e| format!("Fix the curve text first: {}", e))
    }

    /// Record a successful save
    pub fn mark_saved(&mut self, settings: FanControlSettings) {
        self.curve = settings.curve.clone();
        self.sync_curve_text();
        self.settings = settings;
        self.dirty = false;
    }

    /// Current temperature in whole degrees, if known
    pub fn current_temperature(&self) -> Option<i32> {
        self.status
            .current()
            .temperature
            .value()
            .map(|c| c.whole_degrees())
    }

    fn sync_curve_text(&mut self) {
        self.form.curve_text = self.curve.to_string();
        self.form.curve_error = None;
    }
}

/// Notification message to display
#[derive(Debug, Clone)]
pub struct Notification {
    /// Message content
    pub message: String,

    /// Notification level
    pub level: NotificationLevel,

    /// When the notification was created
    pub created_at: Instant,

    /// Duration before auto-dismiss (None = manual dismiss)
    pub duration: Option<Duration>,
}

impl Notification {
    /// Create a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            created_at: Instant::now(),
            duration: Some(Duration::from_secs(3)),
        }
    }

    /// Create a warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            created_at: Instant::now(),
            duration: Some(Duration::from_secs(5)),
        }
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            created_at: Instant::now(),
            duration: None, // Errors require manual dismiss
        }
    }

    /// Check if notification should be dismissed
    pub fn should_dismiss(&self) -> bool {
        match self.duration {
            Some(duration) => self.created_at.elapsed() >= duration,
            None => false,
        }
    }
}

/// Notification severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(temperature: i32, speed: i32) -> ControlPoint {
        ControlPoint::new(temperature, speed).unwrap()
    }

    fn state_with(curve: &str) -> AppState {
        let settings = SettingsBuilder::new()
            .with_curve(Some(parse_strict(curve).unwrap()))
            .build();
        AppState::from_settings(settings)
    }

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Curve);
        assert_eq!(state.curve, Curve::default_curve());
        assert_eq!(state.form.curve_text, "35:0,45:36,60:90,85:255");
        assert!(!state.dirty);
    }

    #[test]
    fn test_drag_updates_readout_and_text() {
        let mut state = state_with("35:0,45:36,60:90");
        let applied = state.drag_to(1, pt(70, 40)).unwrap();
        assert_eq!(applied, pt(59, 40));
        assert_eq!(state.readout, Some(pt(59, 40)));
        assert_eq!(state.form.curve_text, "35:0,59:40,60:90");
        assert!(state.dirty);

        state.end_drag(DragEnd::Released);
        assert_eq!(state.readout, None);
        assert_eq!(state.form.curve_text, "35:0,59:40,60:90");
    }

    #[test]
    fn test_cancelled_drag_keeps_last_value() {
        let mut state = state_with("35:0,85:255");
        state.drag_to(0, pt(50, 20)).unwrap();
        state.end_drag(DragEnd::Cancelled);
        assert_eq!(state.curve.get(0), Some(pt(50, 20)));
    }

    #[test]
    fn test_curve_text_validation() {
        let mut state = AppState::default();
        state.set_curve_text("35:0,abc".to_string());
        assert!(state.form.curve_error.is_some());
        assert!(state.apply_curve_text().is_err());
        assert!(state.build_settings().is_err());

        state.set_curve_text("20:0, 70:200".to_string());
        assert!(state.form.curve_error.is_none());
        state.apply_curve_text().unwrap();
        assert_eq!(state.form.curve_text, "20:0,70:200");
        assert_eq!(state.curve.len(), 2);
    }

    #[test]
    fn test_build_settings_from_form() {
        let mut state = AppState::default();
        state.form.enabled = true;
        state.form.thermal_file = " /sys/class/thermal/thermal_zone1/temp ".to_string();
        state.form.fan_file = String::new();
        state.form.temp_div = "100".to_string();

        let settings = state.build_settings().unwrap();
        assert!(settings.enabled);
        assert_eq!(
            settings.thermal_file,
            Some(PathBuf::from("/sys/class/thermal/thermal_zone1/temp"))
        );
        assert_eq!(settings.fan_file, None);
        assert_eq!(settings.temp_div, 100);

        state.form.temp_div = "0".to_string();
        assert!(state.build_settings().is_err());
    }

    #[test]
    fn test_unapplied_curve_text_is_saved() {
        let mut state = AppState::default();
        state.set_curve_text("20:10, 90:200".to_string());

        let settings = state.build_settings().unwrap();
        assert_eq!(settings.curve.to_string(), "20:10,90:200");

        state.mark_saved(settings);
        assert_eq!(state.curve.to_string(), "20:10,90:200");
        assert_eq!(state.form.curve_text, "20:10,90:200");
        assert!(!state.dirty);
    }

    #[test]
    fn test_unchanged_text_saves_dragged_curve() {
        let mut state = state_with("35:0,85:255");
        state.drag_to(0, pt(50, 20)).unwrap();
        state.end_drag(DragEnd::Released);

        let settings = state.build_settings().unwrap();
        assert_eq!(settings.curve.to_string(), "50:20,85:255");
    }

    #[test]
    fn test_remove_refuses_below_two_points() {
        let mut state = state_with("35:0,85:255");
        assert!(state.remove_point(0).is_err());
        state.add_point(pt(60, 100)).unwrap();
        assert_eq!(state.remove_point(0).unwrap(), pt(35, 0));
        assert_eq!(state.form.curve_text, "60:100,85:255");
    }

    #[test]
    fn test_notification_auto_dismiss() {
        let notif = Notification::success("Test");
        assert!(!notif.should_dismiss()); // Just created

        let error = Notification::error("Error");
        assert!(!error.should_dismiss()); // Errors never auto-dismiss
    }
}
