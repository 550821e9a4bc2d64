//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod config;
pub mod curve;
pub mod run;
pub mod status;

pub use config::run_config;
pub use curve::run_curve;
pub use run::run_control;
pub use status::run_status;

use crate::config::FanControlSettings;
use crate::error::Result;
use crate::uci::{ConfigStore, UciStore};

use std::path::Path;

/// Open the store under `config_dir` and read the settings section
pub(crate) fn open_settings(config_dir: &Path) -> Result<(UciStore, FanControlSettings)> {
    let mut store = UciStore::new(config_dir);
    let settings = FanControlSettings::load(&mut store)?;
    Ok((store, settings))
}

/// Save settings unless in dry-run mode
pub(crate) fn persist<S: ConfigStore + ?Sized>(
    store: &mut S,
    settings: &FanControlSettings,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        log::info!("[DRY RUN] Would save settings (curve_data={})", settings.curve);
        return Ok(());
    }
    settings.save(store)?;
    Ok(())
}
