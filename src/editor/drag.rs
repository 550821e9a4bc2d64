//! Drag sessions
//!
//! A [`DragSession`] exists from pointer-down on a point's marker until
//! pointer-up or cancellation. It borrows the curve exclusively for that
//! interval and holds the pointer capture; the capture is released exactly
//! once when the session ends, however it ends.

use crate::domain::{encode, ControlPoint, Curve, CurveEncoding, PersistedCurve};
use crate::editor::geometry::{PixelPoint, Viewport};
use crate::error::DomainError;

/// Subscription to pointer events outside the point's own hit target
pub trait InputCapture {
    /// Start receiving move/up/cancel events
    fn acquire(&mut self);

    /// Stop receiving them
    fn release(&mut self);
}

impl<T: InputCapture + ?Sized> InputCapture for &mut T {
    fn acquire(&mut self) {
        (**self).acquire();
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Capture for front ends that already route every event to the editor
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl InputCapture for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Releases its capture on drop
#[derive(Debug)]
pub struct CaptureGuard<C: InputCapture> {
    capture: C,
}

impl<C: InputCapture> CaptureGuard<C> {
    /// Acquire `capture` for the lifetime of the guard
    pub fn acquire(mut capture: C) -> Self {
        capture.acquire();
        Self { capture }
    }
}

impl<C: InputCapture> Drop for CaptureGuard<C> {
    fn drop(&mut self) {
        self.capture.release();
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// Pointer released
    Released,
    /// Pointer cancelled or touch ended
    Cancelled,
}

/// One point being dragged
pub struct DragSession<'c, C: InputCapture> {
    curve: &'c mut Curve,
    index: usize,
    viewport: Viewport,
    readout: Option<ControlPoint>,
    _capture: CaptureGuard<C>,
}

impl<'c, C: InputCapture> DragSession<'c, C> {
    /// Start dragging the point at `index`
    ///
    /// # Errors
    /// Returns `DomainError::PointIndex` if there is no such point; the
    /// capture is not acquired in that case.
    pub fn begin(
        curve: &'c mut Curve,
        index: usize,
        viewport: Viewport,
        capture: C,
    ) -> Result<Self, DomainError> {
        let start = curve.get(index).ok_or(DomainError::PointIndex {
            index,
            len: curve.len(),
        })?;

        log::debug!("Drag started on point {} ({})", index, start);

        Ok(Self {
            curve,
            index,
            viewport,
            readout: Some(start),
            _capture: CaptureGuard::acquire(capture),
        })
    }

    /// Index of the point being dragged
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value shown in the tooltip while dragging
    pub fn readout(&self) -> Option<ControlPoint> {
        self.readout
    }

    /// Current state of the curve
    pub fn curve(&self) -> &Curve {
        self.curve
    }

    /// Handle a pointer move at a rendered position
    ///
    /// Returns the value applied after clamping.
    pub fn pointer_move(&mut self, rendered: PixelPoint) -> Result<ControlPoint, DomainError> {
        let candidate = self.viewport.to_domain(rendered);
        let applied = self.curve.drag_point(self.index, candidate)?;
        self.readout = Some(applied);
        Ok(applied)
    }

    /// End the session and re-encode the curve for saving
    pub fn end(mut self, how: DragEnd, encoding: CurveEncoding) -> PersistedCurve {
        self.readout = None;
        log::debug!(
            "Drag on point {} {:?} at {:?}",
            self.index,
            how,
            self.curve.get(self.index)
        );
        encode(self.curve, encoding)
    }

    /// Pointer released
    pub fn finish(self, encoding: CurveEncoding) -> PersistedCurve {
        self.end(DragEnd::Released, encoding)
    }

    /// Pointer cancelled; the last applied value is kept
    pub fn cancel(self, encoding: CurveEncoding) -> PersistedCurve {
        self.end(DragEnd::Cancelled, encoding)
    }
}

/// Drag state for event loops that cannot hold a borrow between events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        index: usize,
    },
}

impl DragState {
    /// Index being dragged, if any
    pub fn dragging(&self) -> Option<usize> {
        match self {
            DragState::Dragging { index } => Some(*index),
            DragState::Idle => None,
        }
    }

    /// Enter the dragging state
    pub fn begin(&mut self, index: usize) {
        *self = DragState::Dragging { index };
    }

    /// Return to idle, yielding the index that was being dragged
    pub fn end(&mut self) -> Option<usize> {
        std::mem::take(self).dragging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::geometry::Surface;

    #[derive(Debug, Default)]
    struct CountingCapture {
        acquired: usize,
        released: usize,
    }

    impl InputCapture for CountingCapture {
        fn acquire(&mut self) {
            self.acquired += 1;
        }

        fn release(&mut self) {
            self.released += 1;
        }
    }

    fn pt(temperature: i32, speed: u8) -> ControlPoint {
        ControlPoint { temperature, speed }
    }

    fn three_points() -> Curve {
        Curve::new(vec![pt(35, 0), pt(45, 36), pt(60, 90)]).unwrap()
    }

    #[test]
    fn test_drag_middle_point_stops_before_right_neighbour() {
        let surface = Surface::default();
        let viewport = Viewport::unscaled(surface);
        let mut curve = three_points();
        let mut capture = CountingCapture::default();

        let mut session = DragSession::begin(&mut curve, 1, viewport, &mut capture).unwrap();
        let target = surface.to_pixel(pt(70, 36));
        let applied = session.pointer_move(target).unwrap();
        assert_eq!(applied, pt(59, 36));
        assert_eq!(session.readout(), Some(pt(59, 36)));

        let persisted = session.finish(CurveEncoding::Pairs);
        assert_eq!(persisted, PersistedCurve::Scalar("35:0,59:36,60:90".to_string()));
        assert_eq!(capture.acquired, 1);
        assert_eq!(capture.released, 1);
    }

    #[test]
    fn test_two_point_boundary_drag() {
        let surface = Surface::default();
        let mut curve = Curve::new(vec![pt(35, 0), pt(85, 255)]).unwrap();

        let mut session =
            DragSession::begin(&mut curve, 0, Viewport::unscaled(surface), NoCapture).unwrap();
        let applied = session.pointer_move(surface.to_pixel(pt(90, 0))).unwrap();
        assert_eq!(applied, pt(84, 0));
        session.finish(CurveEncoding::Pairs);

        assert_eq!(curve.points(), &[pt(84, 0), pt(85, 255)]);
    }

    #[test]
    fn test_drag_outside_surface_pins_to_boundary() {
        let surface = Surface::default();
        let mut curve = three_points();

        let mut session =
            DragSession::begin(&mut curve, 2, Viewport::unscaled(surface), NoCapture).unwrap();
        let applied = session
            .pointer_move(PixelPoint::new(10_000.0, -10_000.0))
            .unwrap();
        assert_eq!(applied, pt(100, 255));
    }

    #[test]
    fn test_scaled_surface_drag() {
        let surface = Surface::default();
        let half = Viewport::new(surface, surface.width / 2.0, surface.height / 2.0);
        let mut full_curve = three_points();
        let mut half_curve = three_points();

        let logical = PixelPoint::new(200.0, 150.0);
        let rendered = PixelPoint::new(100.0, 75.0);

        let mut a =
            DragSession::begin(&mut full_curve, 1, Viewport::unscaled(surface), NoCapture)
                .unwrap();
        let mut b = DragSession::begin(&mut half_curve, 1, half, NoCapture).unwrap();
        assert_eq!(a.pointer_move(logical).unwrap(), b.pointer_move(rendered).unwrap());
    }

    #[test]
    fn test_cancel_releases_and_keeps_last_value() {
        let surface = Surface::default();
        let mut curve = three_points();
        let mut capture = CountingCapture::default();

        let mut session =
            DragSession::begin(&mut curve, 0, Viewport::unscaled(surface), &mut capture).unwrap();
        session.pointer_move(surface.to_pixel(pt(20, 10))).unwrap();
        let persisted = session.cancel(CurveEncoding::List);

        assert_eq!(
            persisted,
            PersistedCurve::List(vec![
                "20 10".to_string(),
                "45 36".to_string(),
                "60 90".to_string()
            ])
        );
        assert_eq!(capture.released, 1);
    }

    #[test]
    fn test_dropped_session_releases_capture() {
        let mut curve = three_points();
        let mut capture = CountingCapture::default();
        {
            let _session = DragSession::begin(
                &mut curve,
                0,
                Viewport::unscaled(Surface::default()),
                &mut capture,
            )
            .unwrap();
        }
        assert_eq!(capture.acquired, 1);
        assert_eq!(capture.released, 1);
    }

    #[test]
    fn test_bad_index_does_not_acquire() {
        let mut curve = three_points();
        let mut capture = CountingCapture::default();
        let result = DragSession::begin(
            &mut curve,
            7,
            Viewport::unscaled(Surface::default()),
            &mut capture,
        );
        assert!(matches!(
            result,
            Err(DomainError::PointIndex { index: 7, len: 3 })
        ));
        drop(result);
        assert_eq!(capture.acquired, 0);
        assert_eq!(capture.released, 0);
    }

    #[test]
    fn test_drag_state_transitions() {
        let mut state = DragState::default();
        assert_eq!(state.dragging(), None);
        state.begin(2);
        assert_eq!(state.dragging(), Some(2));
        assert_eq!(state.end(), Some(2));
        assert_eq!(state, DragState::Idle);
        assert_eq!(state.end(), None);
    }
}
