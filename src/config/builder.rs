//! Settings builder
//!
//! Merges command-line overrides over the stored settings section.

use crate::config::{FanControlSettings, MAX_INTERVAL_SECONDS};
use crate::domain::Curve;

use std::path::PathBuf;

/// Builder for merging settings sources
pub struct SettingsBuilder {
    settings: FanControlSettings,
}

impl SettingsBuilder {
    /// Start from built-in defaults
    pub fn new() -> Self {
        Self {
            settings: FanControlSettings::default(),
        }
    }

    /// Start from settings read from the store
    pub fn from_settings(settings: FanControlSettings) -> Self {
        Self { settings }
    }

    /// Override the enabled flag
    pub fn with_enabled(mut self, enabled: Option<bool>) -> Self {
        if let Some(e) = enabled {
            self.settings.enabled = e;
        }
        self
    }

    /// Override the temperature file; an empty path unsets it
    pub fn with_thermal_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.settings.thermal_file = (!p.as_os_str().is_empty()).then_some(p);
        }
        self
    }

    /// Override the fan file; an empty path unsets it
    pub fn with_fan_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.settings.fan_file = (!p.as_os_str().is_empty()).then_some(p);
        }
        self
    }

    /// Override the temperature divisor; zero is ignored
    pub fn with_temp_div(mut self, div: Option<u32>) -> Self {
        if let Some(d) = div.filter(|d| *d > 0) {
            self.settings.temp_div = d;
        }
        self
    }

    /// Override the control loop interval, kept within 1 s to an hour
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.settings.interval_seconds = i.clamp(1, MAX_INTERVAL_SECONDS);
        }
        self
    }

    /// Override the curve
    pub fn with_curve(mut self, curve: Option<Curve>) -> Self {
        if let Some(c) = curve {
            self.settings.curve = c;
        }
        self
    }

    /// Override the debug flag
    pub fn with_debug(mut self, debug: Option<bool>) -> Self {
        if let Some(d) = debug {
            self.settings.debug = d;
        }
        self
    }

    /// Build the final settings
    pub fn build(self) -> FanControlSettings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let settings = SettingsBuilder::new().build();
        assert_eq!(settings, FanControlSettings::default());
    }

    #[test]
    fn test_builder_overrides() {
        let settings = SettingsBuilder::new()
            .with_enabled(Some(true))
            .with_fan_file(Some(PathBuf::from("/tmp/pwm")))
            .with_thermal_file(Some(PathBuf::new()))
            .with_temp_div(Some(1))
            .with_interval(Some(10))
            .with_debug(None)
            .build();

        assert!(settings.enabled);
        assert_eq!(settings.fan_file, Some(PathBuf::from("/tmp/pwm")));
        assert_eq!(settings.thermal_file, None);
        assert_eq!(settings.temp_div, 1);
        assert_eq!(settings.interval_seconds, 10);
        assert!(!settings.debug);
    }

    #[test]
    fn test_builder_ignores_zero_divisor() {
        let settings = SettingsBuilder::new().with_temp_div(Some(0)).build();
        assert_eq!(settings.temp_div, 1000);
    }

    #[test]
    fn test_builder_bounds_interval() {
        let settings = SettingsBuilder::new().with_interval(Some(u64::MAX)).build();
        assert_eq!(settings.interval_seconds, MAX_INTERVAL_SECONDS);

        let settings = SettingsBuilder::new().with_interval(Some(0)).build();
        assert_eq!(settings.interval_seconds, 1);
    }
}
