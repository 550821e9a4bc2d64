//! Status file access

use crate::config::FanControlSettings;
use crate::domain::{Reading, StatusSnapshot};
use crate::error::StatusError;

use std::path::Path;

/// Something that can return the text of a file
pub trait FileReader {
    /// Read a whole file
    fn read_to_string(&self, path: &Path) -> Result<String, StatusError>;
}

/// Reads from the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsReader;

impl FileReader for SysfsReader {
    fn read_to_string(&self, path: &Path) -> Result<String, StatusError> {
        std::fs::read_to_string(path).map_err(|source| StatusError::Read {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Read one status file for display
///
/// Failures become placeholders; they are logged at debug level only.
pub fn read_reading<R: FileReader + ?Sized>(reader: &R, path: Option<&Path>) -> Reading<i64> {
    let Some(path) = path else {
        return Reading::Unavailable;
    };
    match reader.read_to_string(path) {
        Ok(content) => Reading::parse(&content),
        Err(e) => {
            log::debug!("{}", e);
            Reading::Unavailable
        }
    }
}

/// Read one status file as an integer, reporting failures
///
/// Used by the control loop, which must not act on a placeholder.
pub fn read_integer<R: FileReader + ?Sized>(
    reader: &R,
    path: Option<&Path>,
    what: &'static str,
) -> Result<i64, StatusError> {
    let path = path.ok_or(StatusError::PathUnset(what))?;
    let content = reader.read_to_string(path)?;
    content
        .trim()
        .parse()
        .map_err(|_| StatusError::Malformed {
            path: path.display().to_string(),
            content: content.trim().to_string(),
        })
}

/// Read temperature and fan level for the status line
pub fn read_status<R: FileReader + ?Sized>(
    reader: &R,
    settings: &FanControlSettings,
) -> StatusSnapshot {
    StatusSnapshot::from_raw(
        read_reading(reader, settings.thermal_file.as_deref()),
        read_reading(reader, settings.fan_file.as_deref()),
        settings.temp_div,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Celsius;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> FanControlSettings {
        FanControlSettings {
            thermal_file: Some(dir.path().join("temp")),
            fan_file: Some(dir.path().join("pwm")),
            ..FanControlSettings::default()
        }
    }

    #[test]
    fn test_read_status_from_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("temp"), "52000\n").unwrap();
        std::fs::write(dir.path().join("pwm"), "128\n").unwrap();

        let snap = read_status(&SysfsReader, &settings_in(&dir));
        assert_eq!(snap.temperature, Reading::Value(Celsius(52.0)));
        assert_eq!(snap.fan_pwm, Reading::Value(128));
        assert_eq!(snap.summary(), "Temp: 52.0°C | Fan PWM: 128");
    }

    #[test]
    fn test_read_status_placeholders() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("temp"), "not a number").unwrap();

        let snap = read_status(&SysfsReader, &settings_in(&dir));
        assert_eq!(snap.summary(), "Temp: Invalid | Fan PWM: N/A");
    }

    #[test]
    fn test_unset_path_is_unavailable() {
        let settings = FanControlSettings {
            thermal_file: None,
            fan_file: None,
            ..FanControlSettings::default()
        };
        assert_eq!(read_status(&SysfsReader, &settings), StatusSnapshot::unavailable());
    }

    #[test]
    fn test_read_integer_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pwm");
        std::fs::write(&path, "fast").unwrap();

        assert!(matches!(
            read_integer(&SysfsReader, None, "fan_file"),
            Err(StatusError::PathUnset("fan_file"))
        ));
        assert!(matches!(
            read_integer(&SysfsReader, Some(path.as_path()), "fan_file"),
            Err(StatusError::Malformed { .. })
        ));
        assert!(matches!(
            read_integer(&SysfsReader, Some(Path::new("/nonexistent/pwm")), "fan_file"),
            Err(StatusError::Read { .. })
        ));

        std::fs::write(&path, " 77\n").unwrap();
        assert_eq!(read_integer(&SysfsReader, Some(path.as_path()), "fan_file").unwrap(), 77);
    }
}
