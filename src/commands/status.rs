//! Status command implementation

use crate::cli::args::{OutputFormat, StatusArgs};
use crate::cli::output::print_output;
use crate::commands::open_settings;
use crate::config::FanControlSettings;
use crate::error::Result;
use crate::status::{read_status, StatusBoard, SysfsReader};

use std::path::Path;
use std::thread;
use std::time::Duration;

/// Execute the status command
///
/// Without a readable config the default file paths are used.
pub fn run_status(args: &StatusArgs, format: OutputFormat, config_dir: &Path) -> Result<()> {
    let settings = match open_settings(config_dir) {
        Ok((_, settings)) => settings,
        Err(e) => {
            log::warn!("{}; using default paths", e);
            FanControlSettings::default()
        }
    };

    if !args.watch {
        let snapshot = read_status(&SysfsReader, &settings);
        print_output(&snapshot, format)?;
        return Ok(());
    }

    let interval = Duration::from_secs(args.interval);
    let mut board = StatusBoard::new();
    loop {
        let ticket = board.begin();
        let snapshot = read_status(&SysfsReader, &settings);
        if board.complete(ticket, snapshot) {
            print_output(board.current(), format)?;
        }
        thread::sleep(interval);
    }
}
