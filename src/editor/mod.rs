//! Interactive curve editing
//!
//! Coordinate mapping, drag sessions and the curve form field. Nothing in
//! here depends on a UI toolkit.

pub mod drag;
pub mod field;
pub mod geometry;

pub use drag::{CaptureGuard, DragEnd, DragSession, DragState, InputCapture, NoCapture};
pub use field::{CurveEditor, CurveField, CurveScene, Marker};
pub use geometry::{Margins, PixelPoint, Surface, Viewport};
