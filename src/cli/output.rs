//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::FanControlSettings;
use crate::domain::{ControlPoint, Curve, StatusSnapshot};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

impl TableDisplay for StatusSnapshot {
    fn to_table(&self) -> String {
        format!(
            "Temperature: {}\nFan PWM:     {}",
            self.temperature, self.fan_pwm
        )
    }

    fn to_compact(&self) -> String {
        self.summary()
    }
}

/// Curve display
#[derive(Debug, Clone, Serialize)]
pub struct CurveReport {
    /// Canonical encoded form
    pub curve_data: String,
    pub points: Vec<ControlPoint>,
}

impl From<&Curve> for CurveReport {
    fn from(curve: &Curve) -> Self {
        Self {
            curve_data: curve.to_string(),
            points: curve.points().to_vec(),
        }
    }
}

impl TableDisplay for CurveReport {
    fn to_table(&self) -> String {
        let mut output = String::from("  #  Temp   PWM\n");
        for (i, p) in self.points.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}  {:>3}°C  {:>3}\n",
                i, p.temperature, p.speed
            ));
        }
        output.push_str(&format!("curve_data: {}", self.curve_data));
        output
    }

    fn to_compact(&self) -> String {
        self.curve_data.clone()
    }
}

/// Result of a drag
#[derive(Debug, Clone, Serialize)]
pub struct DragReport {
    pub index: usize,
    /// Domain value under the pointer before clamping
    pub requested: ControlPoint,
    /// Value actually applied
    pub applied: ControlPoint,
    pub curve_data: String,
}

impl TableDisplay for DragReport {
    fn to_table(&self) -> String {
        let mut output = format!("Point {}: {}°C / {}", self.index, self.applied.temperature, self.applied.speed);
        if self.requested != self.applied {
            output.push_str(&format!(
                " (clamped from {}°C / {})",
                self.requested.temperature, self.requested.speed
            ));
        }
        output.push_str(&format!("\ncurve_data: {}", self.curve_data));
        output
    }

    fn to_compact(&self) -> String {
        self.curve_data.clone()
    }
}

/// Curve lookup result
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub temperature: i32,
    pub pwm: u8,
}

impl TableDisplay for EvalReport {
    fn to_table(&self) -> String {
        format!("{}°C -> PWM {}", self.temperature, self.pwm)
    }

    fn to_compact(&self) -> String {
        self.pwm.to_string()
    }
}

impl TableDisplay for FanControlSettings {
    fn to_table(&self) -> String {
        let path = |p: &Option<std::path::PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unset)".to_string())
        };
        format!(
            "Enabled:         {}\n\
             Thermal file:    {}\n\
             Fan file:        {}\n\
             Temp divisor:    {}\n\
             Curve:           {}\n\
             Interval:        {}s\n\
             Hysteresis:      {}°C\n\
             Min write delta: {}\n\
             Debug:           {}",
            if self.enabled { "yes" } else { "no" },
            path(&self.thermal_file),
            path(&self.fan_file),
            self.temp_div,
            self.curve,
            self.interval_seconds,
            self.hysteresis,
            self.min_write_delta,
            if self.debug { "yes" } else { "no" },
        )
    }
}

/// Simple success/failure message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl Message {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Celsius, Reading};

    #[test]
    fn test_status_table_and_compact() {
        let snap = StatusSnapshot {
            temperature: Reading::Value(Celsius(45.5)),
            fan_pwm: Reading::Invalid,
        };
        assert!(snap.to_table().contains("45.5°C"));
        assert_eq!(snap.to_compact(), "Temp: 45.5°C | Fan PWM: Invalid");
    }

    #[test]
    fn test_curve_report() {
        let report = CurveReport::from(&Curve::default_curve());
        assert_eq!(report.points.len(), 4);
        assert_eq!(report.to_compact(), "35:0,45:36,60:90,85:255");
        assert!(report.to_table().contains(" 60°C   90"));
    }

    #[test]
    fn test_drag_report_mentions_clamp() {
        let report = DragReport {
            index: 1,
            requested: ControlPoint::new(70, 36).unwrap(),
            applied: ControlPoint::new(59, 36).unwrap(),
            curve_data: "35:0,59:36,60:90".to_string(),
        };
        assert!(report.to_table().contains("clamped from 70°C"));
    }

    #[test]
    fn test_settings_table() {
        let settings = FanControlSettings {
            fan_file: None,
            ..FanControlSettings::default()
        };
        let table = settings.to_table();
        assert!(table.contains("Fan file:        (unset)"));
        assert!(table.contains("Curve:           35:0,45:36,60:90,85:255"));
    }

    #[test]
    fn test_message_display() {
        let msg = Message::ok("Operation completed");
        assert!(msg.to_table().starts_with('✓'));
    }
}
