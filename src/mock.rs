//! Mock implementations for testing
//!
//! Provides an in-memory config store, file reader and fan device so the
//! settings, status and control paths can be exercised without `/etc/config`
//! or sysfs.

use crate::error::{ConfigError, StatusError};
use crate::services::FanDevice;
use crate::status::FileReader;
use crate::uci::{apply_delete, apply_set, ConfigStore, UciDocument, UciValue};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Config store that keeps everything in memory
///
/// `load` resets a config to its last committed state, mirroring how the
/// file-backed store discards uncommitted changes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: HashMap<String, UciDocument>,
    working: HashMap<String, UciDocument>,
    commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a config from UCI text, as if it had been committed
    pub fn with_config(mut self, config: &str, text: &str) -> Result<Self, ConfigError> {
        self.committed
            .insert(config.to_string(), UciDocument::parse(config, text)?);
        Ok(self)
    }

    /// Committed document for a config
    pub fn committed(&self, config: &str) -> Option<&UciDocument> {
        self.committed.get(config)
    }

    /// Number of successful commits
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    fn working_mut(&mut self, config: &str) -> Result<&mut UciDocument, ConfigError> {
        self.working
            .get_mut(config)
            .ok_or_else(|| ConfigError::NotLoaded(config.to_string()))
    }
}

impl ConfigStore for MemoryStore {
    fn load(&mut self, config: &str) -> Result<(), ConfigError> {
        let doc = self.committed.get(config).cloned().unwrap_or_default();
        self.working.insert(config.to_string(), doc);
        Ok(())
    }

    fn get(&self, config: &str, section: &str, option: &str) -> Option<UciValue> {
        self.working.get(config)?.get(section, option).cloned()
    }

    fn set(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
        value: UciValue,
    ) -> Result<(), ConfigError> {
        let doc = self.working_mut(config)?;
        apply_set(doc, config, section, option, value)
    }

    fn delete(&mut self, config: &str, section: &str, option: &str) -> Result<(), ConfigError> {
        apply_delete(self.working_mut(config)?, section, option);
        Ok(())
    }

    fn ensure_section(
        &mut self,
        config: &str,
        section: &str,
        kind: &str,
    ) -> Result<(), ConfigError> {
        self.working_mut(config)?.ensure_section(section, kind);
        Ok(())
    }

    fn commit(&mut self, config: &str) -> Result<(), ConfigError> {
        let doc = self.working_mut(config)?.clone();
        self.committed.insert(config.to_string(), doc);
        self.commits += 1;
        Ok(())
    }
}

/// File reader serving fixed contents
#[derive(Debug, Default)]
pub struct MockReader {
    files: HashMap<PathBuf, String>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: serve `content` at `path`
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl FileReader for MockReader {
    fn read_to_string(&self, path: &Path) -> Result<String, StatusError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StatusError::Read {
                path: path.display().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

/// Fan device with a settable temperature that records writes
#[derive(Debug)]
pub struct MockFanDevice {
    temperature: Mutex<Option<i32>>,
    pwm: i64,
    writes: Vec<u8>,
}

impl MockFanDevice {
    /// Create a device at `temperature` with the fan at `pwm`
    pub fn new(temperature: i32, pwm: i64) -> Self {
        Self {
            temperature: Mutex::new(Some(temperature)),
            pwm,
            writes: Vec::new(),
        }
    }

    /// Change the temperature; `None` makes the sensor unreadable
    pub fn set_temperature(&self, temperature: Option<i32>) {
        if let Ok(mut t) = self.temperature.lock() {
            *t = temperature;
        }
    }

    /// Every level written so far
    pub fn writes(&self) -> &[u8] {
        &self.writes
    }

    /// Level currently applied
    pub fn current_pwm(&self) -> i64 {
        self.pwm
    }
}

impl FanDevice for MockFanDevice {
    fn temperature(&self) -> Result<i32, StatusError> {
        self.temperature
            .lock()
            .ok()
            .and_then(|t| *t)
            .ok_or(StatusError::PathUnset("thermal_file"))
    }

    fn pwm(&self) -> Result<i64, StatusError> {
        Ok(self.pwm)
    }

    fn set_pwm(&mut self, pwm: u8) -> Result<(), StatusError> {
        self.pwm = i64::from(pwm);
        self.writes.push(pwm);
        Ok(())
    }
}
