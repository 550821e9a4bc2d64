//! Run command implementation
//!
//! Runs the control loop until SIGINT/SIGTERM, then switches the fan off.

use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::output::{print_output, Message};
use crate::commands::open_settings;
use crate::config::{FanControlSettings, SettingsBuilder, CONFIG_NAME, SECTION_NAME};
use crate::error::{AppError, Result};
use crate::services::{Controller, ControllerConfig, SysfsFanDevice};

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Execute the run command
pub fn run_control(
    args: &RunArgs,
    format: OutputFormat,
    config_dir: &Path,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let (_, stored) = open_settings(config_dir)?;
    let settings = SettingsBuilder::from_settings(stored)
        .with_interval(args.interval)
        .build();

    let controller = build_controller(&settings, args, dry_run)?;

    if verbose {
        log::info!("Starting control loop");
        log::info!("  Interval: {:?}", controller.config().interval);
        log::info!("  Single use: {}", args.single_use);
        log::info!("  Dry run: {}", dry_run);
        log::info!("  Monitoring: {:?}", settings.thermal_file);
        log::info!("  Controlling: {:?}", settings.fan_file);
        log::info!("  Curve: {}", settings.curve);
    }

    let running = Arc::new(AtomicBool::new(true));
    if !args.single_use {
        let r = running.clone();
        ctrlc::set_handler(move || {
            log::info!("Received shutdown signal");
            r.store(false, Ordering::SeqCst);
        })?;
    }

    let mut device = SysfsFanDevice::from_settings(&settings);
    controller.run(&mut device, &running)?;

    if args.single_use {
        print_output(
            &Message::ok("Control tick completed (single-use mode)"),
            format,
        )?;
    }

    Ok(())
}

/// Check the settings allow control and set up the controller
pub fn build_controller(
    settings: &FanControlSettings,
    args: &RunArgs,
    dry_run: bool,
) -> Result<Controller> {
    if !settings.enabled {
        return Err(AppError::Disabled {
            config: CONFIG_NAME.to_string(),
            section: SECTION_NAME.to_string(),
        });
    }

    let config = ControllerConfig {
        single_use: args.single_use,
        dry_run,
        retry: !args.no_retry,
        ..ControllerConfig::from_settings(settings)
    };
    Ok(Controller::new(settings.curve.clone(), config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn args() -> RunArgs {
        RunArgs {
            interval: None,
            single_use: true,
            no_retry: false,
        }
    }

    #[test]
    fn test_disabled_settings_refuse_to_run() {
        let settings = FanControlSettings::default();
        let result = build_controller(&settings, &args(), false);
        assert!(matches!(result, Err(AppError::Disabled { .. })));
    }

    #[test]
    fn test_controller_takes_flags_and_settings() {
        let settings = SettingsBuilder::new()
            .with_enabled(Some(true))
            .with_interval(Some(9))
            .build();
        let controller = build_controller(&settings, &args(), true).unwrap();
        let config = controller.config();
        assert!(config.single_use);
        assert!(config.dry_run);
        assert!(config.retry);
        assert_eq!(config.interval, Duration::from_secs(9));
        assert_eq!(controller.curve(), &settings.curve);
    }
}
