//! UCI configuration store
//!
//! Settings live in OpenWrt-style UCI files, addressed as
//! `(config, section, option)`. [`ConfigStore`] is the seam the rest of the
//! crate talks to; [`UciStore`] is the file-backed implementation.

pub mod document;
pub mod store;

pub use document::{Section, UciDocument};
pub use store::UciStore;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UciValue {
    /// `option key 'value'`
    Scalar(String),
    /// One or more `list key 'value'` lines
    List(Vec<String>),
}

impl UciValue {
    /// Scalar content, if this is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            UciValue::Scalar(s) => Some(s),
            UciValue::List(_) => None,
        }
    }
}

impl fmt::Display for UciValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciValue::Scalar(s) => f.write_str(s),
            UciValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

/// Keyed configuration store with an explicit load/commit lifecycle
pub trait ConfigStore {
    /// Read a config into memory, replacing any uncommitted changes
    fn load(&mut self, config: &str) -> Result<(), ConfigError>;

    /// Get an option; `None` if the config, section or option is absent
    fn get(&self, config: &str, section: &str, option: &str) -> Option<UciValue>;

    /// Set an option on an existing section
    fn set(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
        value: UciValue,
    ) -> Result<(), ConfigError>;

    /// Remove an option; removing a missing option is not an error
    fn delete(&mut self, config: &str, section: &str, option: &str) -> Result<(), ConfigError>;

    /// Create a named section of `kind` unless it exists
    fn ensure_section(&mut self, config: &str, section: &str, kind: &str)
        -> Result<(), ConfigError>;

    /// Persist a loaded config
    fn commit(&mut self, config: &str) -> Result<(), ConfigError>;
}

/// Shared `set`/`delete` logic over an in-memory document
pub(crate) fn apply_set(
    doc: &mut UciDocument,
    config: &str,
    section: &str,
    option: &str,
    value: UciValue,
) -> Result<(), ConfigError> {
    let target = doc
        .section_mut(section)
        .ok_or_else(|| ConfigError::MissingSection {
            config: config.to_string(),
            section: section.to_string(),
        })?;
    target.set(option, value);
    Ok(())
}

pub(crate) fn apply_delete(doc: &mut UciDocument, section: &str, option: &str) {
    if let Some(target) = doc.section_mut(section) {
        target.delete(option);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(UciValue::Scalar("1".to_string()).to_string(), "1");
        assert_eq!(
            UciValue::List(vec!["35 0".to_string(), "60 90".to_string()]).to_string(),
            "35 0 60 90"
        );
        assert_eq!(UciValue::List(vec![]).as_scalar(), None);
    }

    #[test]
    fn test_apply_set_requires_section() {
        let mut doc = UciDocument::new();
        let result = apply_set(&mut doc, "fancontrol", "settings", "enabled", UciValue::Scalar("1".into()));
        assert!(matches!(result, Err(ConfigError::MissingSection { .. })));
    }
}
