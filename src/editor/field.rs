//! Curve form field
//!
//! [`CurveField`] is the capability a settings form needs from a curve
//! input: turn the stored value into a curve, draw it, and turn it back.
//! [`CurveEditor`] is the drag-editing implementation; it produces a
//! toolkit-independent [`CurveScene`] that front ends paint and hit-test.

use crate::domain::codec::{self, CurveEncoding, PersistedCurve};
use crate::domain::{ControlPoint, Curve};
use crate::editor::geometry::{PixelPoint, Surface};
use serde::Serialize;

/// Visual radius of a point marker
pub const MARKER_RADIUS: f32 = 6.0;
/// Radius of the area that starts a drag on a marker
pub const MARKER_HIT_RADIUS: f32 = 12.0;
/// Temperature spacing of vertical grid lines
pub const GRID_TEMP_STEP: i32 = 10;
/// PWM spacing of horizontal grid lines
pub const GRID_SPEED_STEP: i32 = 51;

/// A form field holding a curve
pub trait CurveField {
    /// Build the in-memory curve from the stored value
    fn decode(&self, persisted: Option<&PersistedCurve>) -> Curve;

    /// Lay out the curve for display
    fn render(&self, curve: &Curve) -> CurveScene;

    /// Produce the value the form saves
    fn encode(&self, curve: &Curve) -> PersistedCurve;
}

/// Which axis a grid line or label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Temperature,
    Speed,
}

/// A line across the plot with its tick label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub axis: Axis,
    pub from: PixelPoint,
    pub to: PixelPoint,
    pub label: String,
    pub label_at: PixelPoint,
}

/// Drawable, draggable handle for one control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub point: ControlPoint,
    pub center: PixelPoint,
    pub radius: f32,
    pub hit_radius: f32,
}

impl Marker {
    /// Whether a logical position falls on the marker's hit target
    pub fn contains(&self, position: PixelPoint) -> bool {
        self.center.distance(position) <= self.hit_radius
    }
}

/// Everything needed to paint a curve on a surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveScene {
    pub surface: Surface,
    /// Line through the markers, left to right
    pub polyline: Vec<PixelPoint>,
    pub markers: Vec<Marker>,
    pub grid: Vec<GridLine>,
    /// Axis titles with their positions
    pub titles: Vec<(Axis, String, PixelPoint)>,
}

impl CurveScene {
    /// Marker under a logical position
    ///
    /// Markers painted later sit on top, so they are checked first.
    pub fn hit_test(&self, position: PixelPoint) -> Option<&Marker> {
        self.markers.iter().rev().find(|m| m.contains(position))
    }
}

/// Drag-editing curve field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurveEditor {
    surface: Surface,
    encoding: CurveEncoding,
}

impl CurveEditor {
    pub fn new(surface: Surface, encoding: CurveEncoding) -> Self {
        Self { surface, encoding }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn encoding(&self) -> CurveEncoding {
        self.encoding
    }

    /// Readout shown next to a point while it is dragged
    pub fn tooltip(point: ControlPoint) -> String {
        format!("{}°C / {}", point.temperature, point.speed)
    }

    fn grid(&self) -> Vec<GridLine> {
        let s = &self.surface;
        let right = s.width - s.margins.right;
        let mut lines = Vec::new();

        for t in (ControlPoint::TEMP_MIN..=ControlPoint::TEMP_MAX).step_by(GRID_TEMP_STEP as usize) {
            let x = s.temp_to_x(t);
            lines.push(GridLine {
                axis: Axis::Temperature,
                from: PixelPoint::new(x, s.margins.top),
                to: PixelPoint::new(x, s.baseline()),
                label: format!("{}°", t),
                label_at: PixelPoint::new(x, s.baseline() + 12.0),
            });
        }

        for p in (ControlPoint::SPEED_MIN..=ControlPoint::SPEED_MAX).step_by(GRID_SPEED_STEP as usize)
        {
            let y = s.speed_to_y(p);
            lines.push(GridLine {
                axis: Axis::Speed,
                from: PixelPoint::new(s.margins.left, y),
                to: PixelPoint::new(right, y),
                label: p.to_string(),
                label_at: PixelPoint::new(s.margins.left - 5.0, y),
            });
        }

        lines
    }
}

impl CurveField for CurveEditor {
    fn decode(&self, persisted: Option<&PersistedCurve>) -> Curve {
        codec::decode_or_default(persisted)
    }

    fn render(&self, curve: &Curve) -> CurveScene {
        let s = self.surface;
        let markers: Vec<Marker> = curve
            .points()
            .iter()
            .enumerate()
            .map(|(index, &point)| Marker {
                index,
                point,
                center: s.to_pixel(point),
                radius: MARKER_RADIUS,
                hit_radius: MARKER_HIT_RADIUS,
            })
            .collect();

        CurveScene {
            surface: s,
            polyline: markers.iter().map(|m| m.center).collect(),
            markers,
            grid: self.grid(),
            titles: vec![
                (
                    Axis::Temperature,
                    "Temperature (°C)".to_string(),
                    PixelPoint::new(s.margins.left + s.inner_width() / 2.0, s.height - 2.0),
                ),
                (
                    Axis::Speed,
                    "PWM".to_string(),
                    PixelPoint::new(4.0, s.margins.top - 8.0),
                ),
            ],
        }
    }

    fn encode(&self, curve: &Curve) -> PersistedCurve {
        codec::encode(curve, self.encoding)
    }
}
