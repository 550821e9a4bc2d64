//! Custom canvas widgets for fancontrol-gui

mod curve_editor;

pub use curve_editor::CurveEditorCanvas;
