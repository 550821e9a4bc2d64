//! Fan hardware access
//!
//! The control loop talks to the hardware through [`FanDevice`] so it can
//! be driven by a mock in tests.

use crate::config::FanControlSettings;
use crate::domain::Celsius;
use crate::error::StatusError;
use crate::status::{read_integer, FileReader, SysfsReader};

use std::path::{Path, PathBuf};

/// A temperature sensor paired with a PWM fan
pub trait FanDevice {
    /// Current temperature in whole degrees Celsius
    fn temperature(&self) -> Result<i32, StatusError>;

    /// PWM level currently applied
    fn pwm(&self) -> Result<i64, StatusError>;

    /// Apply a PWM level
    fn set_pwm(&mut self, pwm: u8) -> Result<(), StatusError>;
}

/// Fan driven through sysfs files
#[derive(Debug, Clone)]
pub struct SysfsFanDevice<R: FileReader = SysfsReader> {
    thermal_file: Option<PathBuf>,
    fan_file: Option<PathBuf>,
    temp_div: u32,
    reader: R,
}

impl SysfsFanDevice<SysfsReader> {
    /// Device using the paths and divisor from the settings
    pub fn from_settings(settings: &FanControlSettings) -> Self {
        Self::with_reader(settings, SysfsReader)
    }
}

impl<R: FileReader> SysfsFanDevice<R> {
    /// Device reading through a custom reader
    pub fn with_reader(settings: &FanControlSettings, reader: R) -> Self {
        Self {
            thermal_file: settings.thermal_file.clone(),
            fan_file: settings.fan_file.clone(),
            temp_div: settings.temp_div,
            reader,
        }
    }

    /// Fan control file
    pub fn fan_file(&self) -> Option<&Path> {
        self.fan_file.as_deref()
    }
}

impl<R: FileReader> FanDevice for SysfsFanDevice<R> {
    fn temperature(&self) -> Result<i32, StatusError> {
        let raw = read_integer(&self.reader, self.thermal_file.as_deref(), "thermal_file")?;
        Ok(Celsius::from_raw(raw, self.temp_div).whole_degrees())
    }

    fn pwm(&self) -> Result<i64, StatusError> {
        read_integer(&self.reader, self.fan_file.as_deref(), "fan_file")
    }

    fn set_pwm(&mut self, pwm: u8) -> Result<(), StatusError> {
        let path = self
            .fan_file
            .as_deref()
            .ok_or(StatusError::PathUnset("fan_file"))?;
        std::fs::write(path, pwm.to_string()).map_err(|source| StatusError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn device_in(dir: &TempDir) -> SysfsFanDevice {
        let settings = FanControlSettings {
            thermal_file: Some(dir.path().join("temp")),
            fan_file: Some(dir.path().join("pwm")),
            ..FanControlSettings::default()
        };
        SysfsFanDevice::from_settings(&settings)
    }

    #[test]
    fn test_temperature_uses_divisor() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("temp"), "47999\n").unwrap();
        assert_eq!(device_in(&dir).temperature().unwrap(), 47);
    }

    #[test]
    fn test_set_pwm_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut device = device_in(&dir);
        device.set_pwm(90).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("pwm")).unwrap(),
            "90"
        );
        assert_eq!(device.pwm().unwrap(), 90);
    }

    #[test]
    fn test_unset_fan_file() {
        let settings = FanControlSettings {
            fan_file: None,
            ..FanControlSettings::default()
        };
        let mut device = SysfsFanDevice::from_settings(&settings);
        assert!(matches!(
            device.set_pwm(10),
            Err(StatusError::PathUnset("fan_file"))
        ));
    }
}
