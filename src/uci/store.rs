//! File-backed UCI store

use crate::error::ConfigError;
use crate::uci::{apply_delete, apply_set, ConfigStore, UciDocument, UciValue};

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Store rooted at a UCI config directory
#[derive(Debug)]
pub struct UciStore {
    root: PathBuf,
    loaded: HashMap<String, UciDocument>,
}

impl UciStore {
    /// Standard OpenWrt location
    pub const DEFAULT_ROOT: &'static str = "/etc/config";

    /// Create a store over `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            loaded: HashMap::new(),
        }
    }

    /// Directory holding the config files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one config file
    pub fn path_of(&self, config: &str) -> PathBuf {
        self.root.join(config)
    }

    /// Loaded document, if any
    pub fn document(&self, config: &str) -> Option<&UciDocument> {
        self.loaded.get(config)
    }

    fn document_mut(&mut self, config: &str) -> Result<&mut UciDocument, ConfigError> {
        self.loaded
            .get_mut(config)
            .ok_or_else(|| ConfigError::NotLoaded(config.to_string()))
    }
}

impl Default for UciStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT)
    }
}

impl ConfigStore for UciStore {
    fn load(&mut self, config: &str) -> Result<(), ConfigError> {
        if !self.root.is_dir() {
            return Err(ConfigError::FileNotFound(self.root.display().to_string()));
        }

        let path = self.path_of(config);
        let doc = match std::fs::read_to_string(&path) {
            Ok(text) => UciDocument::parse(config, &text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} does not exist yet, starting empty", path.display());
                UciDocument::new()
            }
            Err(e) => return Err(e.into()),
        };

        log::debug!("Loaded {} ({} sections)", path.display(), doc.sections().len());
        self.loaded.insert(config.to_string(), doc);
        Ok(())
    }

    fn get(&self, config: &str, section: &str, option: &str) -> Option<UciValue> {
        self.loaded.get(config)?.get(section, option).cloned()
    }

    fn set(
        &mut self,
        config: &str,
        section: &str,
        option: &str,
        value: UciValue,
    ) -> Result<(), ConfigError> {
        let doc = self.document_mut(config)?;
        apply_set(doc, config, section, option, value)
    }

    fn delete(&mut self, config: &str, section: &str, option: &str) -> Result<(), ConfigError> {
        let doc = self.document_mut(config)?;
        apply_delete(doc, section, option);
        Ok(())
    }

    fn ensure_section(
        &mut self,
        config: &str,
        section: &str,
        kind: &str,
    ) -> Result<(), ConfigError> {
        self.document_mut(config)?.ensure_section(section, kind);
        Ok(())
    }

    fn commit(&mut self, config: &str) -> Result<(), ConfigError> {
        let path = self.path_of(config);
        let doc = self
            .loaded
            .get(config)
            .ok_or_else(|| ConfigError::NotLoaded(config.to_string()))?;

        // Write next to the target so the rename stays on one filesystem
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", config, std::process::id()));
        let written = write_synced(&tmp, doc.to_string().as_bytes())
            .and_then(|()| std::fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        log::info!("Committed {}", path.display());
        Ok(())
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
