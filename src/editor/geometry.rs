//! Coordinate mapping between the drawing surface and curve values
//!
//! The surface has a fixed logical size with margins around an inner plot
//! rectangle. Temperature runs left to right over 0-100 °C, PWM bottom to
//! top over 0-255. When the surface is displayed at a different size, pointer
//! positions go through [`Viewport::to_logical`] before inverse mapping.

use crate::domain::ControlPoint;
use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: PixelPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Space between the surface edge and the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 20.0, 30.0, 40.0)
    }
}

/// Logical drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            margins: Margins::default(),
        }
    }
}

impl Surface {
    /// Create a surface with the given size and margins
    pub const fn new(width: f32, height: f32, margins: Margins) -> Self {
        Self {
            width,
            height,
            margins,
        }
    }

    /// Width of the plot area
    pub fn inner_width(&self) -> f32 {
        (self.width - self.margins.left - self.margins.right).max(1.0)
    }

    /// Height of the plot area
    pub fn inner_height(&self) -> f32 {
        (self.height - self.margins.top - self.margins.bottom).max(1.0)
    }

    /// Y coordinate of the plot's bottom edge
    pub fn baseline(&self) -> f32 {
        self.height - self.margins.bottom
    }

    /// X coordinate for a temperature, clamped to the axis
    pub fn temp_to_x(&self, temperature: i32) -> f32 {
        let t = temperature.clamp(ControlPoint::TEMP_MIN, ControlPoint::TEMP_MAX) as f32;
        self.margins.left + t / ControlPoint::TEMP_MAX as f32 * self.inner_width()
    }

    /// Y coordinate for a PWM level (higher speed draws higher)
    pub fn speed_to_y(&self, speed: i32) -> f32 {
        let p = speed.clamp(ControlPoint::SPEED_MIN, ControlPoint::SPEED_MAX) as f32;
        self.baseline() - p / ControlPoint::SPEED_MAX as f32 * self.inner_height()
    }

    /// Forward mapping: curve value to pixel
    pub fn to_pixel(&self, point: ControlPoint) -> PixelPoint {
        PixelPoint::new(
            self.temp_to_x(point.temperature),
            self.speed_to_y(point.speed as i32),
        )
    }

    /// Temperature under an x coordinate, rounded then clamped
    pub fn x_to_temp(&self, x: f32) -> i32 {
        let offset = x as f64 - self.margins.left as f64;
        let temp = (offset * ControlPoint::TEMP_MAX as f64 / self.inner_width() as f64).round();
        (temp as i32).clamp(ControlPoint::TEMP_MIN, ControlPoint::TEMP_MAX)
    }

    /// PWM level under a y coordinate, rounded then clamped
    pub fn y_to_speed(&self, y: f32) -> i32 {
        let offset = self.baseline() as f64 - y as f64;
        let speed = (offset * ControlPoint::SPEED_MAX as f64 / self.inner_height() as f64).round();
        (speed as i32).clamp(ControlPoint::SPEED_MIN, ControlPoint::SPEED_MAX)
    }

    /// Inverse mapping: pixel to curve value
    ///
    /// Positions outside the plot pin to the nearest edge.
    pub fn to_domain(&self, pixel: PixelPoint) -> ControlPoint {
        ControlPoint::clamped(self.x_to_temp(pixel.x), self.y_to_speed(pixel.y))
    }

    /// Whether a pixel lies inside the plot rectangle
    pub fn in_plot(&self, pixel: PixelPoint) -> bool {
        pixel.x >= self.margins.left
            && pixel.x <= self.width - self.margins.right
            && pixel.y >= self.margins.top
            && pixel.y <= self.baseline()
    }
}

/// A surface displayed at some rendered size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub surface: Surface,
    pub rendered_width: f32,
    pub rendered_height: f32,
}

impl Viewport {
    /// Create a viewport; non-positive rendered sizes fall back to logical size
    pub fn new(surface: Surface, rendered_width: f32, rendered_height: f32) -> Self {
        let rendered_width = if rendered_width > 0.0 {
            rendered_width
        } else {
            surface.width
        };
        let rendered_height = if rendered_height > 0.0 {
            rendered_height
        } else {
            surface.height
        };
        Self {
            surface,
            rendered_width,
            rendered_height,
        }
    }

    /// Viewport displayed at exactly its logical size
    pub fn unscaled(surface: Surface) -> Self {
        Self::new(surface, surface.width, surface.height)
    }

    /// Horizontal and vertical logical-per-rendered ratios
    pub fn scale(&self) -> (f32, f32) {
        (
            self.surface.width / self.rendered_width,
            self.surface.height / self.rendered_height,
        )
    }

    /// Rescale a rendered pointer position into logical coordinates
    pub fn to_logical(&self, rendered: PixelPoint) -> PixelPoint {
        let (sx, sy) = self.scale();
        PixelPoint::new(rendered.x * sx, rendered.y * sy)
    }

    /// Map a logical position to rendered coordinates
    pub fn to_rendered(&self, logical: PixelPoint) -> PixelPoint {
        let (sx, sy) = self.scale();
        PixelPoint::new(logical.x / sx, logical.y / sy)
    }

    /// Inverse mapping from a rendered pointer position
    pub fn to_domain(&self, rendered: PixelPoint) -> ControlPoint {
        self.surface.to_domain(self.to_logical(rendered))
    }
}
