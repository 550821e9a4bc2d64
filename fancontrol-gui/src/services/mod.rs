//! Backend services for fancontrol-gui
//!
//! Preferences persistence and asynchronous status polling.

mod config;
pub mod status;

pub use config::GuiConfig;
pub use status::StatusPaths;
