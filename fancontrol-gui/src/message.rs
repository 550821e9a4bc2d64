//! Application message definitions
//!
//! Hierarchical message structure following The Elm Architecture.

use fancontrol::domain::{ControlPoint, StatusSnapshot};
use fancontrol::editor::DragEnd;
use fancontrol::status::Ticket;
use std::time::Instant;

/// Top-level application messages
#[derive(Debug, Clone)]
pub enum Message {
    // === Navigation ===
    /// Switch to a different view
    ViewChanged(View),

    /// Toggle sidebar expanded/collapsed
    SidebarToggled,

    /// Keyboard shortcut pressed
    KeyPressed(KeyboardShortcut),

    // === Polling ===
    /// Periodic tick that starts a status poll
    Tick(Instant),

    /// A status poll finished
    StatusRead(Ticket, StatusSnapshot),

    // === Editing ===
    /// Curve editor messages
    Curve(CurveMessage),

    /// Settings form messages
    Settings(SettingsMessage),

    // === Actions ===
    /// Write the form to the config store
    Save,

    /// Discard edits and reload from the config store
    Reload,

    /// Dismiss notification
    DismissNotification,
}

/// Available application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Curve editor with live readout
    #[default]
    Curve,
    /// Paths, divisor and free-text curve
    Settings,
    /// Temperature and PWM detail
    Status,
}

impl View {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            View::Curve => "Curve",
            View::Settings => "Settings",
            View::Status => "Status",
        }
    }
}

/// Curve editor interaction
#[derive(Debug, Clone)]
pub enum CurveMessage {
    /// Pointer went down on a marker
    DragStarted(usize),

    /// Pointer moved while dragging; the candidate is unclamped
    DragMoved { index: usize, candidate: ControlPoint },

    /// Pointer released or the gesture was cancelled
    DragEnded(usize, DragEnd),

    /// Double-click on empty plot area
    PointAdded(ControlPoint),

    /// Right-click on a marker
    PointRemoved(usize),

    /// Replace the curve with the default one
    ResetToDefault,
}

/// Settings form edits
#[derive(Debug, Clone)]
pub enum SettingsMessage {
    EnabledToggled(bool),
    ThermalFileChanged(String),
    FanFileChanged(String),
    TempDivChanged(String),
    IntervalChanged(String),
    /// Free-text curve input changed
    CurveTextChanged(String),
    /// Replace the editor curve with the free-text one
    ApplyCurveText,
}

impl From<CurveMessage> for Message {
    fn from(msg: CurveMessage) -> Self {
        Message::Curve(msg)
    }
}

impl From<SettingsMessage> for Message {
    fn from(msg: SettingsMessage) -> Self {
        Message::Settings(msg)
    }
}

/// Keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardShortcut {
    /// Navigate to Curve (Ctrl+1)
    GotoCurve,
    /// Navigate to Status (Ctrl+2)
    GotoStatus,
    /// Navigate to Settings (Ctrl+,)
    GotoSettings,
    /// Save (Ctrl+S)
    Save,
    /// Reload from config (F5)
    Reload,
    /// Toggle sidebar (Ctrl+B)
    ToggleSidebar,
}

impl KeyboardShortcut {
    /// Get the view associated with this shortcut, if any
    pub fn to_view(self) -> Option<View> {
        match self {
            KeyboardShortcut::GotoCurve => Some(View::Curve),
            KeyboardShortcut::GotoStatus => Some(View::Status),
            KeyboardShortcut::GotoSettings => Some(View::Settings),
            _ => None,
        }
    }
}
