//! Config command implementation

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::cli::output::print_output;
use crate::commands::persist;
use crate::config::{FanControlSettings, SettingsBuilder};
use crate::error::Result;
use crate::uci::{ConfigStore, UciStore};

use std::path::Path;

/// Execute the config command
pub fn run_config(
    args: &ConfigArgs,
    format: OutputFormat,
    config_dir: &Path,
    dry_run: bool,
) -> Result<()> {
    let mut store = UciStore::new(config_dir);
    let settings = execute(&args.command, &mut store, dry_run)?;
    print_output(&settings, format)?;
    Ok(())
}

/// Run a config subcommand against a store, returning the resulting settings
pub fn execute<S: ConfigStore + ?Sized>(
    command: &ConfigCommands,
    store: &mut S,
    dry_run: bool,
) -> Result<FanControlSettings> {
    let settings = FanControlSettings::load(store)?;

    match command {
        ConfigCommands::Show => Ok(settings),

        ConfigCommands::Set {
            enabled,
            thermal_file,
            fan_file,
            temp_div,
            interval,
            debug,
        } => {
            let updated = SettingsBuilder::from_settings(settings)
                .with_enabled(*enabled)
                .with_thermal_file(thermal_file.clone())
                .with_fan_file(fan_file.clone())
                .with_temp_div(*temp_div)
                .with_interval(*interval)
                .with_debug(*debug)
                .build();
            persist(store, &updated, dry_run)?;
            Ok(updated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_NAME;
    use crate::mock::MemoryStore;
    use std::path::PathBuf;

    #[test]
    fn test_show_defaults_on_empty_store() {
        let mut store = MemoryStore::new();
        let settings = execute(&ConfigCommands::Show, &mut store, false).unwrap();
        assert_eq!(settings, FanControlSettings::default());
        assert_eq!(store.commit_count(), 0);
    }

    #[test]
    fn test_set_persists_and_keeps_curve() {
        let mut store = MemoryStore::new()
            .with_config(
                CONFIG_NAME,
                "config fancontrol 'settings'\n\toption curve_data '30:0,80:255'\n",
            )
            .unwrap();
        let command = ConfigCommands::Set {
            enabled: Some(true),
            thermal_file: Some(PathBuf::from("/sys/class/hwmon/hwmon0/temp1_input")),
            fan_file: None,
            temp_div: None,
            interval: Some(5),
            debug: None,
        };

        execute(&command, &mut store, false).unwrap();

        let reloaded = execute(&ConfigCommands::Show, &mut store, false).unwrap();
        assert!(reloaded.enabled);
        assert_eq!(
            reloaded.thermal_file,
            Some(PathBuf::from("/sys/class/hwmon/hwmon0/temp1_input"))
        );
        assert_eq!(reloaded.interval_seconds, 5);
        assert_eq!(reloaded.curve.to_string(), "30:0,80:255");
        assert_eq!(store.commit_count(), 1);
    }
}
