//! Application views
//!
//! Each view corresponds to a screen in the application.

pub mod curve;
pub mod settings;
pub mod status;

pub use curve::view_curve;
pub use settings::view_settings;
pub use status::view_status;
