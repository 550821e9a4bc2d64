//! Live status readings
//!
//! Values shown in the status line: the current temperature and the PWM
//! level last written to the fan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown when a file cannot be read
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder shown when a file holds something other than a number
pub const INVALID: &str = "Invalid";

/// Outcome of reading one status file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Reading<T> {
    /// A parsed value
    Value(T),
    /// Unreadable, empty, or no path configured
    Unavailable,
    /// Readable but not numeric
    Invalid,
}

impl<T: Copy> Reading<T> {
    /// The value, if any
    pub fn value(&self) -> Option<T> {
        match self {
            Reading::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert the value, keeping placeholders as they are
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reading<U> {
        match self {
            Reading::Value(v) => Reading::Value(f(v)),
            Reading::Unavailable => Reading::Unavailable,
            Reading::Invalid => Reading::Invalid,
        }
    }
}

impl Reading<i64> {
    /// Interpret the content of a status file
    ///
    /// Empty content counts as unavailable; anything that is not an integer
    /// is invalid.
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Reading::Unavailable;
        }
        match trimmed.parse() {
            Ok(v) => Reading::Value(v),
            Err(_) => Reading::Invalid,
        }
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Celsius(pub f64);

impl Celsius {
    /// Convert a raw sensor value with the configured divisor
    ///
    /// A zero divisor is treated as 1.
    pub fn from_raw(raw: i64, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        Self(raw as f64 / divisor as f64)
    }

    /// Whole degrees, truncated toward zero
    pub fn whole_degrees(&self) -> i32 {
        self.0.trunc() as i32
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => write!(f, "{}", v),
            Reading::Unavailable => f.write_str(NOT_AVAILABLE),
            Reading::Invalid => f.write_str(INVALID),
        }
    }
}

/// One poll result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Current temperature
    pub temperature: Reading<Celsius>,
    /// Current fan PWM level, shown as-is
    pub fan_pwm: Reading<i64>,
}

impl StatusSnapshot {
    /// Snapshot with both readings unavailable
    pub fn unavailable() -> Self {
        Self {
            temperature: Reading::Unavailable,
            fan_pwm: Reading::Unavailable,
        }
    }

    /// Build a snapshot from raw file readings
    pub fn from_raw(temperature: Reading<i64>, fan_pwm: Reading<i64>, temp_div: u32) -> Self {
        Self {
            temperature: temperature.map(|raw| Celsius::from_raw(raw, temp_div)),
            fan_pwm,
        }
    }

    /// Status line text
    pub fn summary(&self) -> String {
        format!("Temp: {} | Fan PWM: {}", self.temperature, self.fan_pwm)
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self::unavailable()
    }
}
