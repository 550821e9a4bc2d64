//! Fan control settings
//!
//! Settings live in the `fancontrol.settings` UCI section. Loading never
//! fails on bad values: each option falls back to its default and the
//! curve goes through the repairing decoder.

pub mod builder;
pub mod section;

pub use builder::SettingsBuilder;

use crate::domain::Curve;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// UCI config file name
pub const CONFIG_NAME: &str = "fancontrol";
/// Section holding the settings
pub const SECTION_NAME: &str = "settings";
/// Type of that section
pub const SECTION_TYPE: &str = "fancontrol";

/// Option names inside the section
pub mod options {
    pub const ENABLED: &str = "enabled";
    pub const THERMAL_FILE: &str = "thermal_file";
    pub const FAN_FILE: &str = "fan_file";
    pub const TEMP_DIV: &str = "temp_div";
    pub const CURVE_DATA: &str = "curve_data";
    /// Older list encoding, read for migration only
    pub const CURVE_POINT: &str = "curve_point";
    pub const INTERVAL: &str = "interval";
    pub const HYSTERESIS: &str = "hysteresis";
    pub const MIN_WRITE_DELTA: &str = "min_write_delta";
    pub const DEBUG: &str = "debug";
}

/// Longest control loop interval accepted from the config
pub const MAX_INTERVAL_SECONDS: u64 = 3600;

/// Default temperature source
pub const DEFAULT_THERMAL_FILE: &str = "/sys/devices/virtual/thermal/thermal_zone0/temp";
/// Default fan control file
pub const DEFAULT_FAN_FILE: &str = "/sys/devices/virtual/thermal/cooling_device0/cur_state";

/// Everything the status view and the control loop need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanControlSettings {
    /// Whether the control loop may drive the fan
    pub enabled: bool,
    /// Raw temperature file; `None` when unset
    pub thermal_file: Option<PathBuf>,
    /// Fan PWM file; `None` when unset
    pub fan_file: Option<PathBuf>,
    /// Raw temperature divisor (1000 for millidegrees)
    pub temp_div: u32,
    /// Temperature to PWM curve
    pub curve: Curve,
    /// Control loop period
    pub interval_seconds: u64,
    /// Degrees below the first active point the fan keeps spinning
    pub hysteresis: i32,
    /// Smallest PWM change worth writing
    pub min_write_delta: i32,
    /// Log every tick
    pub debug: bool,
}

impl Default for FanControlSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            thermal_file: Some(PathBuf::from(DEFAULT_THERMAL_FILE)),
            fan_file: Some(PathBuf::from(DEFAULT_FAN_FILE)),
            temp_div: 1000,
            curve: Curve::default_curve(),
            interval_seconds: 3,
            hysteresis: 3,
            min_write_delta: 2,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = FanControlSettings::default();
        assert!(!s.enabled);
        assert_eq!(s.temp_div, 1000);
        assert_eq!(s.interval_seconds, 3);
        assert_eq!(s.hysteresis, 3);
        assert_eq!(s.min_write_delta, 2);
        assert_eq!(s.curve.to_string(), "35:0,45:36,60:90,85:255");
        assert_eq!(
            s.thermal_file.as_deref(),
            Some(std::path::Path::new(DEFAULT_THERMAL_FILE))
        );
    }
}
