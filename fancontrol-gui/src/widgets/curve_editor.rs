//! Curve editor widget
//!
//! Canvas front end for [`CurveEditor`]. The scene is laid out on the
//! editor's logical surface and drawn at whatever size the canvas gets;
//! pointer positions are rescaled through a [`Viewport`] before hit-testing
//! or mapping to domain values.

use crate::message::{CurveMessage, Message};
use crate::theme::colors;

use fancontrol::domain::Curve;
use fancontrol::editor::field::Axis;
use fancontrol::editor::{CurveEditor, CurveField, DragEnd, DragState, PixelPoint, Viewport};
use iced::alignment::{Horizontal, Vertical};
use iced::keyboard::{self, key::Named, Key};
use iced::mouse;
use iced::touch;
use iced::widget::canvas::{self, event, Event, Frame, Geometry, Path, Stroke, Text};
use iced::{Point, Rectangle, Renderer, Size, Theme};
use std::time::Instant;

/// Inner circle radius
const POINT_INNER_RADIUS: f32 = 3.0;
/// Double-click threshold in milliseconds
const DOUBLE_CLICK_MS: u128 = 400;
/// Double-click distance threshold
const DOUBLE_CLICK_DISTANCE: f32 = 10.0;

/// Curve editor canvas program
pub struct CurveEditorCanvas<'a> {
    editor: CurveEditor,
    curve: &'a Curve,
    current_temp: Option<i32>,
}

/// Interaction state kept by the canvas between events
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    drag: DragState,
    hovered: Option<usize>,
    last_click: Option<Instant>,
    last_click_pos: Option<Point>,
}

type Update = (event::Status, Option<Message>);

impl<'a> CurveEditorCanvas<'a> {
    pub fn new(editor: CurveEditor, curve: &'a Curve) -> Self {
        Self {
            editor,
            curve,
            current_temp: None,
        }
    }

    /// Set the current temperature indicator
    pub fn with_current_temp(mut self, temp: Option<i32>) -> Self {
        self.current_temp = temp;
        self
    }

    fn viewport(&self, size: Size) -> Viewport {
        Viewport::new(self.editor.surface(), size.width, size.height)
    }

    /// Marker under a position relative to the canvas
    fn marker_at(&self, size: Size, position: Point) -> Option<usize> {
        let logical = self
            .viewport(size)
            .to_logical(PixelPoint::new(position.x, position.y));
        self.editor
            .render(self.curve)
            .hit_test(logical)
            .map(|marker| marker.index)
    }

    fn press(&self, state: &mut EditorState, size: Size, position: Point) -> Update {
        let now = Instant::now();

        if let Some(index) = self.marker_at(size, position) {
            state.drag.begin(index);
            state.hovered = Some(index);
            state.last_click = None;
            state.last_click_pos = None;
            return (
                event::Status::Captured,
                Some(CurveMessage::DragStarted(index).into()),
            );
        }

        let viewport = self.viewport(size);
        let rendered = PixelPoint::new(position.x, position.y);
        if !viewport.surface.in_plot(viewport.to_logical(rendered)) {
            return (event::Status::Ignored, None);
        }

        let is_double_click = match (state.last_click, state.last_click_pos) {
            (Some(last_time), Some(last_pos)) => {
                now.duration_since(last_time).as_millis() < DOUBLE_CLICK_MS
                    && last_pos.distance(position) < DOUBLE_CLICK_DISTANCE
            }
            _ => false,
        };

        if is_double_click {
            state.last_click = None;
            state.last_click_pos = None;
            let point = viewport.to_domain(rendered);
            return (
                event::Status::Captured,
                Some(CurveMessage::PointAdded(point).into()),
            );
        }

        state.last_click = Some(now);
        state.last_click_pos = Some(position);
        (event::Status::Captured, None)
    }

    fn drag_move(&self, state: &mut EditorState, size: Size, position: Point) -> Update {
        match state.drag.dragging() {
            Some(index) => {
                let candidate = self
                    .viewport(size)
                    .to_domain(PixelPoint::new(position.x, position.y));
                (
                    event::Status::Captured,
                    Some(CurveMessage::DragMoved { index, candidate }.into()),
                )
            }
            None => {
                state.hovered = self.marker_at(size, position);
                (event::Status::Ignored, None)
            }
        }
    }

    fn release(state: &mut EditorState, how: DragEnd) -> Update {
        match state.drag.end() {
            Some(index) => (
                event::Status::Captured,
                Some(CurveMessage::DragEnded(index, how).into()),
            ),
            None => (event::Status::Ignored, None),
        }
    }
}

impl canvas::Program<Message> for CurveEditorCanvas<'_> {
    type State = EditorState;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Update {
        let size = bounds.size();
        let origin = bounds.position();
        // Relative even outside the canvas so an escaping drag pins to the edge
        let relative = cursor.position_from(origin);

        match event {
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                Self::release(state, DragEnd::Released)
            }
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(Named::Escape),
                ..
            }) => Self::release(state, DragEnd::Cancelled),
            Event::Touch(touch::Event::FingerLifted { .. }) => {
                Self::release(state, DragEnd::Released)
            }
            Event::Touch(touch::Event::FingerLost { .. }) => {
                Self::release(state, DragEnd::Cancelled)
            }

            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                match cursor.position_in(bounds) {
                    Some(position) => self.press(state, size, position),
                    None => (event::Status::Ignored, None),
                }
            }
            Event::Touch(touch::Event::FingerPressed { position, .. })
                if bounds.contains(position) =>
            {
                self.press(state, size, Point::new(position.x - origin.x, position.y - origin.y))
            }

            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                let removed = cursor
                    .position_in(bounds)
                    .and_then(|position| self.marker_at(size, position));
                match removed {
                    Some(index) if state.drag.dragging().is_none() => (
                        event::Status::Captured,
                        Some(CurveMessage::PointRemoved(index).into()),
                    ),
                    _ => (event::Status::Ignored, None),
                }
            }

            Event::Mouse(mouse::Event::CursorMoved { .. }) => match relative {
                Some(position) => self.drag_move(state, size, position),
                None => (event::Status::Ignored, None),
            },
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                self.drag_move(state, size, Point::new(position.x - origin.x, position.y - origin.y))
            }

            Event::Mouse(mouse::Event::CursorLeft) => {
                if state.drag.dragging().is_none() {
                    state.hovered = None;
                }
                (event::Status::Ignored, None)
            }

            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let viewport = self.viewport(bounds.size());
        let scene = self.editor.render(self.curve);
        let surface = scene.surface;
        let to_point = |p: PixelPoint| {
            let r = viewport.to_rendered(p);
            Point::new(r.x, r.y)
        };

        // Plot background
        let top_left = to_point(PixelPoint::new(surface.margins.left, surface.margins.top));
        let bottom_right = to_point(PixelPoint::new(
            surface.width - surface.margins.right,
            surface.baseline(),
        ));
        frame.fill_rectangle(
            top_left,
            Size::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y),
            colors::BG_ELEVATED,
        );

        // Grid lines and tick labels
        for line in &scene.grid {
            frame.stroke(
                &Path::line(to_point(line.from), to_point(line.to)),
                Stroke::default()
                    .with_width(1.0)
                    .with_color(colors::BG_OVERLAY),
            );

            let (horizontal, vertical) = match line.axis {
                Axis::Temperature => (Horizontal::Center, Vertical::Top),
                Axis::Speed => (Horizontal::Right, Vertical::Center),
            };
            frame.fill_text(Text {
                content: line.label.clone(),
                position: to_point(line.label_at),
                color: colors::TEXT_MUTED,
                size: 11.0.into(),
                horizontal_alignment: horizontal,
                vertical_alignment: vertical,
                ..Text::default()
            });
        }

        for (axis, title, at) in &scene.titles {
            let horizontal = match axis {
                Axis::Temperature => Horizontal::Center,
                Axis::Speed => Horizontal::Left,
            };
            frame.fill_text(Text {
                content: title.clone(),
                position: to_point(*at),
                color: colors::TEXT_SECONDARY,
                size: 12.0.into(),
                horizontal_alignment: horizontal,
                vertical_alignment: Vertical::Bottom,
                ..Text::default()
            });
        }

        // Current temperature indicator
        if let Some(temp) = self.current_temp {
            let x = viewport.to_rendered(PixelPoint::new(surface.temp_to_x(temp), 0.0)).x;
            let line = Path::line(Point::new(x, top_left.y), Point::new(x, bottom_right.y));
            frame.stroke(
                &line,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(colors::with_alpha(colors::ACCENT_CYAN, 0.6)),
            );

            let speed = i32::from(self.curve.speed_for_temperature(temp));
            let operating = to_point(PixelPoint::new(
                surface.temp_to_x(temp),
                surface.speed_to_y(speed),
            ));
            frame.fill(&Path::circle(operating, 5.0), colors::ACCENT_CYAN);
        }

        // Curve line
        if let Some((first, rest)) = scene.polyline.split_first() {
            let line = Path::new(|builder| {
                builder.move_to(to_point(*first));
                for p in rest {
                    builder.line_to(to_point(*p));
                }
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_width(3.0)
                    .with_color(colors::ACCENT_GREEN),
            );
        }

        // Markers, with a readout on the hovered or dragged one
        let dragging = state.drag.dragging();
        for marker in &scene.markers {
            let center = to_point(marker.center);
            let is_dragging = dragging == Some(marker.index);
            let is_hovered = state.hovered == Some(marker.index);

            let (color, radius) = if is_dragging {
                (colors::ACCENT_ORANGE, marker.radius + 3.0)
            } else if is_hovered {
                (colors::ACCENT_CYAN, marker.radius + 2.0)
            } else {
                (colors::ACCENT_GREEN, marker.radius)
            };

            frame.fill(&Path::circle(center, radius), color);
            frame.fill(&Path::circle(center, POINT_INNER_RADIUS), colors::BG_SURFACE);

            if is_hovered || is_dragging {
                frame.fill_text(Text {
                    content: CurveEditor::tooltip(marker.point),
                    position: Point::new(center.x, center.y - radius - 6.0),
                    color: colors::TEXT_PRIMARY,
                    size: 11.0.into(),
                    horizontal_alignment: Horizontal::Center,
                    vertical_alignment: Vertical::Bottom,
                    ..Text::default()
                });
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.drag.dragging().is_some() {
            return mouse::Interaction::Grabbing;
        }

        if let Some(position) = cursor.position_in(bounds) {
            if self.marker_at(bounds.size(), position).is_some() {
                return mouse::Interaction::Grab;
            }
        }

        mouse::Interaction::default()
    }
}
