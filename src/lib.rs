//! fancontrol - temperature-driven PWM fan control
//!
//! This library provides the core of the fan controller: the fan curve and
//! its stored forms, the interactive curve editor model, the UCI-style
//! configuration store, status polling, and the control loop that drives a
//! sysfs PWM file from a thermal zone.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Settings section of the fancontrol config
//! - [`domain`]: Curve, codec and status models with validation
//! - [`editor`]: Curve editor geometry, scene and drag sessions
//! - [`error`]: Error types
//! - [`services`]: Fan device and control loop
//! - [`status`]: Sysfs reads and stale-result filtering
//! - [`uci`]: UCI document parser and config store

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod services;
pub mod status;
pub mod uci;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
