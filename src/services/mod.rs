//! Service layer for fan control
//!
//! The control loop and the hardware seam it drives.

pub mod controller;
pub mod device;

pub use controller::{Controller, ControllerConfig, TickOutcome};
pub use device::{FanDevice, SysfsFanDevice};
