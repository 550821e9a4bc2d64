//! fancontrol-gui - Fan curve editor
//!
//! Desktop front end for the fancontrol settings: drag the curve, edit the
//! sysfs paths, watch temperature and PWM live.

mod app;
mod message;
mod services;
mod state;
mod theme;
mod views;
mod widgets;

use app::FanControlGui;
use clap::Parser;
use fs2::FileExt;
use iced::{window, Size};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process;

/// fancontrol-gui - Fan Curve Editor
#[derive(Parser, Debug)]
#[command(name = "fancontrol-gui", version, about)]
struct Args {
    /// Directory holding the UCI config files
    #[arg(short, long, env = "FANCONTROL_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

/// Get the lock file path
fn lock_file_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "fancontrol")
        .map(|d| d.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("fancontrol-gui.lock")
}

/// Try to acquire single-instance lock
/// Returns the lock file handle if successful (must be kept alive)
fn acquire_instance_lock() -> Option<File> {
    let lock_path = lock_file_path();

    if let Some(parent) = lock_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match File::create(&lock_path) {
        Ok(f) => f,
        Err(e) => {
            log::error!("Failed to create lock file: {}", e);
            return None;
        }
    };

    match file.try_lock_exclusive() {
        Ok(()) => {
            log::debug!("Acquired instance lock at {:?}", lock_path);
            Some(file)
        }
        Err(_) => {
            log::info!("Another instance of fancontrol-gui is already running");
            None
        }
    }
}

fn main() -> iced::Result {
    // Initialize logging with wgpu noise filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .init();

    let args = Args::parse();

    log::info!("Starting fancontrol-gui");

    let _lock = match acquire_instance_lock() {
        Some(lock) => lock,
        None => {
            eprintln!("fancontrol-gui is already running. Only one instance allowed.");
            process::exit(1);
        }
    };

    // _lock is kept alive for the duration of the app
    iced::application(FanControlGui::title, FanControlGui::update, FanControlGui::view)
        .subscription(FanControlGui::subscription)
        .theme(FanControlGui::theme)
        .window(window::Settings {
            size: Size::new(960.0, 640.0),
            min_size: Some(Size::new(720.0, 520.0)),
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || FanControlGui::new(args.config_dir))
}
