//! Domain models for fancontrol
//!
//! Curve points, the curve itself, its persisted encodings, and status
//! readings. Types validate on construction; the codec repairs instead.

pub mod codec;
pub mod curve;
pub mod status;

pub use codec::{decode, encode, parse_point, parse_strict, CurveEncoding, PersistedCurve};
pub use curve::{ControlPoint, Curve};
pub use status::{Celsius, Reading, StatusSnapshot};
