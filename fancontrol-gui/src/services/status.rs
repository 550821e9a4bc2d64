//! Asynchronous status polling
//!
//! Reads run on the tokio runtime so a slow sysfs read never blocks the UI.
//! Ordering between overlapping polls is handled by the caller's
//! `StatusBoard`.

use fancontrol::config::FanControlSettings;
use fancontrol::domain::{Reading, StatusSnapshot};
use std::path::{Path, PathBuf};

/// Files and divisor a poll needs
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPaths {
    pub thermal_file: Option<PathBuf>,
    pub fan_file: Option<PathBuf>,
    pub temp_div: u32,
}

impl StatusPaths {
    pub fn from_settings(settings: &FanControlSettings) -> Self {
        Self {
            thermal_file: settings.thermal_file.clone(),
            fan_file: settings.fan_file.clone(),
            temp_div: settings.temp_div,
        }
    }
}

/// Read both files once
pub async fn poll(paths: StatusPaths) -> StatusSnapshot {
    let temperature = read(paths.thermal_file.as_deref()).await;
    let fan_pwm = read(paths.fan_file.as_deref()).await;
    StatusSnapshot::from_raw(temperature, fan_pwm, paths.temp_div)
}

async fn read(path: Option<&Path>) -> Reading<i64> {
    let Some(path) = path else {
        return Reading::Unavailable;
    };
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Reading::parse(&content),
        Err(e) => {
            log::debug!("Status read of {:?} failed: {}", path, e);
            Reading::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    #[test]
    fn test_poll_reads_both_files() {
        let dir = tempdir().unwrap();
        let thermal = dir.path().join("temp");
        let fan = dir.path().join("pwm1");
        fs::write(&thermal, "52000\n").unwrap();
        fs::write(&fan, "120\n").unwrap();

        let snapshot = block_on(poll(StatusPaths {
            thermal_file: Some(thermal),
            fan_file: Some(fan),
            temp_div: 1000,
        }));
        assert_eq!(snapshot.summary(), "Temp: 52.0°C | Fan PWM: 120");
    }

    #[test]
    fn test_poll_placeholders() {
        let dir = tempdir().unwrap();
        let fan = dir.path().join("pwm1");
        fs::write(&fan, "fast").unwrap();

        let snapshot = block_on(poll(StatusPaths {
            thermal_file: Some(dir.path().join("missing")),
            fan_file: Some(fan),
            temp_div: 1000,
        }));
        assert_eq!(snapshot.summary(), "Temp: N/A | Fan PWM: Invalid");
    }

    #[test]
    fn test_unset_paths_are_unavailable() {
        let snapshot = block_on(poll(StatusPaths {
            thermal_file: None,
            fan_file: None,
            temp_div: 1000,
        }));
        assert_eq!(snapshot, StatusSnapshot::unavailable());
    }
}
