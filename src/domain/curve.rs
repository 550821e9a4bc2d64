//! Fan curve domain types
//!
//! A curve is an ordered list of control points mapping temperature (°C)
//! to a PWM level. Points are always sorted by ascending, distinct
//! temperature and a curve never holds fewer than two points.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single (temperature, speed) pair on a fan curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Temperature in Celsius (0-100)
    pub temperature: i32,
    /// PWM level (0-255)
    pub speed: u8,
}

impl ControlPoint {
    /// Lowest temperature on the curve axis
    pub const TEMP_MIN: i32 = 0;
    /// Highest temperature on the curve axis
    pub const TEMP_MAX: i32 = 100;
    /// Lowest PWM level
    pub const SPEED_MIN: i32 = 0;
    /// Highest PWM level
    pub const SPEED_MAX: i32 = 255;

    /// Create a point with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTemperature` or `DomainError::InvalidSpeed`
    /// when a component is outside its domain.
    pub fn new(temperature: i32, speed: i32) -> Result<Self, DomainError> {
        if !(Self::TEMP_MIN..=Self::TEMP_MAX).contains(&temperature) {
            return Err(DomainError::InvalidTemperature(temperature));
        }
        if !(Self::SPEED_MIN..=Self::SPEED_MAX).contains(&speed) {
            return Err(DomainError::InvalidSpeed(speed));
        }
        Ok(Self {
            temperature,
            speed: speed as u8,
        })
    }

    /// Create a point, pinning each component to its domain
    pub fn clamped(temperature: i32, speed: i32) -> Self {
        Self {
            temperature: temperature.clamp(Self::TEMP_MIN, Self::TEMP_MAX),
            speed: speed.clamp(Self::SPEED_MIN, Self::SPEED_MAX) as u8,
        }
    }
}

impl fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.temperature, self.speed)
    }
}

/// Piecewise-linear fan curve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ControlPoint>", into = "Vec<ControlPoint>")]
pub struct Curve {
    points: Vec<ControlPoint>,
}

impl Curve {
    /// A curve never has fewer points than this
    pub const MIN_POINTS: usize = 2;

    /// Create a curve from points, rejecting anything that breaks the invariants
    ///
    /// Points are sorted by temperature first.
    ///
    /// # Errors
    /// - `DomainError::TooFewPoints` with fewer than two points
    /// - `DomainError::InvalidTemperature` / `InvalidSpeed` for out-of-range points
    /// - `DomainError::DuplicateTemperature` when two points share a temperature
    pub fn new(mut points: Vec<ControlPoint>) -> Result<Self, DomainError> {
        if points.len() < Self::MIN_POINTS {
            return Err(DomainError::TooFewPoints(points.len()));
        }
        for point in &points {
            ControlPoint::new(point.temperature, point.speed as i32)?;
        }

        points.sort_by_key(|p| p.temperature);
        if let Some(pair) = points
            .windows(2)
            .find(|pair| pair[0].temperature == pair[1].temperature)
        {
            return Err(DomainError::DuplicateTemperature(pair[0].temperature));
        }

        Ok(Self { points })
    }

    /// Build a curve without failing
    ///
    /// Points are clamped and sorted; on a temperature collision the first
    /// point wins. Falls back to [`Curve::default_curve`] when fewer than two
    /// points survive.
    pub fn from_points_lenient(points: Vec<ControlPoint>) -> Self {
        let mut points: Vec<ControlPoint> = points
            .into_iter()
            .map(|p| ControlPoint::clamped(p.temperature, p.speed as i32))
            .collect();
        points.sort_by_key(|p| p.temperature);
        points.dedup_by_key(|p| p.temperature);

        if points.len() < Self::MIN_POINTS {
            log::debug!(
                "Curve has {} usable point(s), substituting default curve",
                points.len()
            );
            return Self::default_curve();
        }

        Self { points }
    }

    /// The fixed fallback curve
    pub fn default_curve() -> Self {
        Self {
            points: vec![
                ControlPoint {
                    temperature: 35,
                    speed: 0,
                },
                ControlPoint {
                    temperature: 45,
                    speed: 36,
                },
                ControlPoint {
                    temperature: 60,
                    speed: 90,
                },
                ControlPoint {
                    temperature: 85,
                    speed: 255,
                },
            ],
        }
    }

    /// Get the curve points, sorted by temperature
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by index
    pub fn get(&self, index: usize) -> Option<ControlPoint> {
        self.points.get(index).copied()
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.points.len() {
            return Err(DomainError::PointIndex {
                index,
                len: self.points.len(),
            });
        }
        Ok(())
    }

    /// Admissible temperature range for the point at `index`
    ///
    /// One above the left neighbour and one below the right neighbour; the
    /// global axis bounds apply where a neighbour is missing.
    pub fn temperature_bounds(&self, index: usize) -> Result<(i32, i32), DomainError> {
        self.check_index(index)?;

        let lo = match index.checked_sub(1) {
            Some(left) => self.points[left].temperature + 1,
            None => ControlPoint::TEMP_MIN,
        };
        let hi = match self.points.get(index + 1) {
            Some(right) => right.temperature - 1,
            None => ControlPoint::TEMP_MAX,
        };

        Ok((lo.max(ControlPoint::TEMP_MIN), hi.min(ControlPoint::TEMP_MAX)))
    }

    /// Move the point at `index` towards `candidate`
    ///
    /// Speed is clamped to 0-255, temperature to 0-100 and then to the
    /// neighbour bounds so points can never cross or collide. Returns the
    /// value actually applied.
    pub fn drag_point(
        &mut self,
        index: usize,
        candidate: ControlPoint,
    ) -> Result<ControlPoint, DomainError> {
        let (lo, hi) = self.temperature_bounds(index)?;
        let current = self.points[index];

        let temperature = if lo <= hi {
            candidate.temperature.max(lo).min(hi)
        } else {
            current.temperature
        };
        let applied = ControlPoint::clamped(temperature, candidate.speed as i32);

        self.points[index] = applied;
        self.normalize();

        Ok(applied)
    }

    /// Add a point, keeping the curve sorted
    ///
    /// Returns the index the point landed at.
    ///
    /// # Errors
    /// Returns `DomainError::DuplicateTemperature` when a point already sits
    /// at that temperature.
    pub fn insert_point(&mut self, point: ControlPoint) -> Result<usize, DomainError> {
        let point = ControlPoint::clamped(point.temperature, point.speed as i32);
        match self
            .points
            .binary_search_by_key(&point.temperature, |p| p.temperature)
        {
            Ok(_) => Err(DomainError::DuplicateTemperature(point.temperature)),
            Err(index) => {
                self.points.insert(index, point);
                Ok(index)
            }
        }
    }

    /// Remove the point at `index`
    ///
    /// # Errors
    /// Refuses to shrink the curve below two points.
    pub fn remove_point(&mut self, index: usize) -> Result<ControlPoint, DomainError> {
        self.check_index(index)?;
        if self.points.len() <= Self::MIN_POINTS {
            return Err(DomainError::TooFewPoints(self.points.len() - 1));
        }
        Ok(self.points.remove(index))
    }

    /// Target PWM for a temperature
    ///
    /// Flat below the first and above the last point, integer linear
    /// interpolation in between.
    pub fn speed_for_temperature(&self, temp: i32) -> u8 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        if temp <= first.temperature {
            return first.speed;
        }
        if temp >= last.temperature {
            return last.speed;
        }

        for pair in self.points.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if temp >= lo.temperature && temp < hi.temperature {
                let (t1, p1) = (lo.temperature, lo.speed as i32);
                let (t2, p2) = (hi.temperature, hi.speed as i32);
                let target = p1 + (temp - t1) * (p2 - p1) / (t2 - t1);
                return target.clamp(ControlPoint::SPEED_MIN, ControlPoint::SPEED_MAX) as u8;
            }
        }

        last.speed
    }

    /// First point that actually spins the fan
    pub fn first_active(&self) -> Option<ControlPoint> {
        self.points.iter().copied().find(|p| p.speed > 0)
    }

    fn normalize(&mut self) {
        self.points.sort_by_key(|p| p.temperature);
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::default_curve()
    }
}

impl TryFrom<Vec<ControlPoint>> for Curve {
    type Error = DomainError;

    fn try_from(points: Vec<ControlPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Curve> for Vec<ControlPoint> {
    fn from(curve: Curve) -> Self {
        curve.points
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", point)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(temperature: i32, speed: u8) -> ControlPoint {
        ControlPoint { temperature, speed }
    }

    fn curve(points: &[(i32, u8)]) -> Curve {
        Curve::new(points.iter().map(|&(t, s)| pt(t, s)).collect()).unwrap()
    }

    #[test]
    fn test_point_validation() {
        assert!(ControlPoint::new(0, 0).is_ok());
        assert!(ControlPoint::new(100, 255).is_ok());
        assert_eq!(
            ControlPoint::new(101, 0),
            Err(DomainError::InvalidTemperature(101))
        );
        assert_eq!(
            ControlPoint::new(50, 256),
            Err(DomainError::InvalidSpeed(256))
        );
    }

    #[test]
    fn test_point_clamped() {
        assert_eq!(ControlPoint::clamped(-5, 300), pt(0, 255));
        assert_eq!(ControlPoint::clamped(150, -1), pt(100, 0));
    }

    #[test]
    fn test_curve_requires_two_points() {
        assert_eq!(Curve::new(vec![]), Err(DomainError::TooFewPoints(0)));
        assert_eq!(
            Curve::new(vec![pt(40, 10)]),
            Err(DomainError::TooFewPoints(1))
        );
    }

    #[test]
    fn test_curve_sorting() {
        let c = curve(&[(80, 200), (40, 30), (60, 50)]);
        let temps: Vec<_> = c.points().iter().map(|p| p.temperature).collect();
        assert_eq!(temps, vec![40, 60, 80]);
    }

    #[test]
    fn test_curve_rejects_duplicates() {
        let result = Curve::new(vec![pt(40, 10), pt(40, 20)]);
        assert_eq!(result, Err(DomainError::DuplicateTemperature(40)));
    }

    #[test]
    fn test_lenient_falls_back_to_default() {
        let c = Curve::from_points_lenient(vec![pt(50, 10)]);
        assert_eq!(c, Curve::default_curve());

        let c = Curve::from_points_lenient(vec![pt(50, 10), pt(50, 90)]);
        assert_eq!(c, Curve::default_curve());
    }

    #[test]
    fn test_lenient_first_duplicate_wins() {
        let c = Curve::from_points_lenient(vec![pt(50, 10), pt(20, 5), pt(50, 90)]);
        assert_eq!(c.points(), &[pt(20, 5), pt(50, 10)]);
    }

    #[test]
    fn test_default_curve_points() {
        let c = Curve::default_curve();
        assert_eq!(
            c.points(),
            &[pt(35, 0), pt(45, 36), pt(60, 90), pt(85, 255)]
        );
    }

    #[test]
    fn test_temperature_bounds() {
        let c = curve(&[(35, 0), (45, 36), (60, 90)]);
        assert_eq!(c.temperature_bounds(0).unwrap(), (0, 44));
        assert_eq!(c.temperature_bounds(1).unwrap(), (36, 59));
        assert_eq!(c.temperature_bounds(2).unwrap(), (46, 100));
        assert!(c.temperature_bounds(3).is_err());
    }

    #[test]
    fn test_drag_clamps_to_right_neighbour() {
        let mut c = curve(&[(35, 0), (45, 36), (60, 90)]);
        let applied = c.drag_point(1, pt(70, 40)).unwrap();
        assert_eq!(applied, pt(59, 40));
        assert_eq!(c.points()[1], pt(59, 40));
    }

    #[test]
    fn test_drag_clamps_to_left_neighbour() {
        let mut c = curve(&[(35, 0), (45, 36), (60, 90)]);
        let applied = c.drag_point(2, pt(10, 255)).unwrap();
        assert_eq!(applied, pt(46, 255));
    }

    #[test]
    fn test_drag_two_point_endpoints() {
        let mut c = curve(&[(35, 0), (85, 255)]);
        assert_eq!(c.drag_point(0, pt(90, 0)).unwrap(), pt(84, 0));
        assert_eq!(c.drag_point(0, pt(0, 0)).unwrap(), pt(0, 0));
        assert_eq!(c.drag_point(1, pt(100, 255)).unwrap(), pt(100, 255));
        assert_eq!(c.drag_point(1, pt(0, 10)).unwrap(), pt(1, 10));
    }

    #[test]
    fn test_drag_keeps_order_over_many_moves() {
        let mut c = Curve::default_curve();
        let moves = [(0, 99), (3, 0), (1, 100), (2, 0), (0, 50), (3, 51), (2, 100)];
        for (index, temp) in moves {
            c.drag_point(index, ControlPoint::clamped(temp, 128)).unwrap();
            for pair in c.points().windows(2) {
                assert!(pair[0].temperature < pair[1].temperature);
            }
            for p in c.points() {
                assert!((0..=100).contains(&p.temperature));
            }
        }
    }

    #[test]
    fn test_drag_bad_index() {
        let mut c = Curve::default_curve();
        assert_eq!(
            c.drag_point(9, pt(10, 10)),
            Err(DomainError::PointIndex { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_insert_and_remove() {
        let mut c = Curve::default_curve();
        assert_eq!(c.insert_point(pt(50, 60)).unwrap(), 2);
        assert_eq!(c.len(), 5);
        assert_eq!(
            c.insert_point(pt(50, 61)),
            Err(DomainError::DuplicateTemperature(50))
        );

        assert_eq!(c.remove_point(2).unwrap(), pt(50, 60));
        c.remove_point(0).unwrap();
        c.remove_point(0).unwrap();
        assert_eq!(c.len(), 2);
        assert!(c.remove_point(0).is_err());
    }

    #[test]
    fn test_speed_interpolation() {
        let c = Curve::default_curve();
        assert_eq!(c.speed_for_temperature(20), 0);
        assert_eq!(c.speed_for_temperature(35), 0);
        assert_eq!(c.speed_for_temperature(40), 18);
        assert_eq!(c.speed_for_temperature(45), 36);
        assert_eq!(c.speed_for_temperature(50), 54);
        assert_eq!(c.speed_for_temperature(70), 156);
        assert_eq!(c.speed_for_temperature(85), 255);
        assert_eq!(c.speed_for_temperature(99), 255);
    }

    #[test]
    fn test_first_active() {
        assert_eq!(Curve::default_curve().first_active(), Some(pt(45, 36)));
        let c = curve(&[(10, 0), (20, 0)]);
        assert_eq!(c.first_active(), None);
    }

    #[test]
    fn test_display_is_pair_encoding() {
        assert_eq!(
            Curve::default_curve().to_string(),
            "35:0,45:36,60:90,85:255"
        );
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&Curve::default_curve()).unwrap();
        let back: Curve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Curve::default_curve());

        let bad = r#"[{"temperature":10,"speed":1}]"#;
        assert!(serde_json::from_str::<Curve>(bad).is_err());
    }
}
