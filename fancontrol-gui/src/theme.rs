//! Dark theme and color definitions for fancontrol-gui

use iced::theme::{Custom, Palette};
use iced::Theme;
use std::sync::Arc;

/// Color palette
pub mod colors {
    use iced::Color;

    // ═══════════════════════════════════════════════════════════════════════════
    // BACKGROUND LAYERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Deepest background (#08080c)
    pub const BG_BASE: Color = Color::from_rgb(0.03, 0.03, 0.05);

    /// Card/panel background (#0f1018)
    pub const BG_SURFACE: Color = Color::from_rgb(0.06, 0.063, 0.094);

    /// Plot area and inputs (#181824)
    pub const BG_ELEVATED: Color = Color::from_rgb(0.094, 0.094, 0.14);

    /// Grid lines and hover (#22223a)
    pub const BG_OVERLAY: Color = Color::from_rgb(0.133, 0.133, 0.227);

    /// Subtle luminous border
    pub const GLASS_BORDER: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);

    // ═══════════════════════════════════════════════════════════════════════════
    // TEXT COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Primary text (#f5f5ff)
    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.96, 0.96, 1.0);

    /// Secondary text (#9999bb)
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.60, 0.60, 0.73);

    /// Muted/disabled text (#555577)
    pub const TEXT_MUTED: Color = Color::from_rgb(0.33, 0.33, 0.47);

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCENT COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Primary accent, Cyan (#00d4ff)
    pub const ACCENT_CYAN: Color = Color::from_rgb(0.0, 0.83, 1.0);

    /// Success, Mint (#00ffa3)
    pub const ACCENT_GREEN: Color = Color::from_rgb(0.0, 1.0, 0.64);

    /// Lime (#77ff00)
    pub const ACCENT_LIME: Color = Color::from_rgb(0.467, 1.0, 0.0);

    /// Warning, Amber (#ffaa00)
    pub const ACCENT_ORANGE: Color = Color::from_rgb(1.0, 0.667, 0.0);

    /// Error, Hot Pink Red (#ff2d55)
    pub const ACCENT_RED: Color = Color::from_rgb(1.0, 0.176, 0.333);

    /// Royal Purple (#9966ff)
    pub const ACCENT_PURPLE: Color = Color::from_rgb(0.6, 0.4, 1.0);

    /// Sky blue (#00aaff)
    pub const ACCENT_SKY: Color = Color::from_rgb(0.0, 0.667, 1.0);

    /// Get color based on temperature
    ///
    /// - Cold (< 35°C): Cyan
    /// - Cool (35-50°C): Green
    /// - Warm (50-65°C): Lime
    /// - Hot (65-80°C): Orange
    /// - Critical (> 80°C): Red
    pub fn temp_color(celsius: i32) -> Color {
        match celsius {
            t if t < 35 => ACCENT_CYAN,
            t if t < 50 => ACCENT_GREEN,
            t if t < 65 => ACCENT_LIME,
            t if t < 80 => ACCENT_ORANGE,
            _ => ACCENT_RED,
        }
    }

    /// Get color based on PWM level (0-255)
    pub fn pwm_color(pwm: i64) -> Color {
        match pwm {
            p if p <= 0 => TEXT_MUTED,
            p if p < 64 => ACCENT_CYAN,
            p if p < 128 => ACCENT_GREEN,
            p if p < 192 => ACCENT_ORANGE,
            _ => ACCENT_RED,
        }
    }

    /// Create a color with modified alpha
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        Color { a: alpha, ..color }
    }

    /// Interpolate between two colors
    pub fn lerp(from: Color, to: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::from_rgba(
            from.r + (to.r - from.r) * t,
            from.g + (to.g - from.g) * t,
            from.b + (to.b - from.b) * t,
            from.a + (to.a - from.a) * t,
        )
    }
}

/// Create the fancontrol dark theme
pub fn fancontrol_theme() -> Theme {
    Theme::Custom(Arc::new(Custom::new(
        "fancontrol-dark".to_string(),
        Palette {
            background: colors::BG_BASE,
            text: colors::TEXT_PRIMARY,
            primary: colors::ACCENT_CYAN,
            success: colors::ACCENT_GREEN,
            danger: colors::ACCENT_RED,
        },
    )))
}

/// Spacing constants
#[allow(dead_code)]
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: u16 = 4;
    /// Small spacing (8px)
    pub const SM: u16 = 8;
    /// Medium spacing (16px)
    pub const MD: u16 = 16;
    /// Large spacing (24px)
    pub const LG: u16 = 24;
}

/// Font sizes
#[allow(dead_code)]
pub mod font_size {
    /// Extra small (10px) - Plot labels
    pub const XS: u16 = 10;
    /// Small (12px) - Captions
    pub const SM: u16 = 12;
    /// Base (14px) - Body text
    pub const BASE: u16 = 14;
    /// Large (16px) - Emphasis
    pub const LG: u16 = 16;
    /// 2XL (22px) - Headings
    pub const XXL: u16 = 22;
    /// Display (36px) - Status numbers
    pub const DISPLAY: u16 = 36;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_color_ranges() {
        assert_eq!(colors::temp_color(30), colors::ACCENT_CYAN);
        assert_eq!(colors::temp_color(45), colors::ACCENT_GREEN);
        assert_eq!(colors::temp_color(75), colors::ACCENT_ORANGE);
        assert_eq!(colors::temp_color(85), colors::ACCENT_RED);
    }

    #[test]
    fn test_pwm_color_off_is_muted() {
        assert_eq!(colors::pwm_color(0), colors::TEXT_MUTED);
        assert_eq!(colors::pwm_color(255), colors::ACCENT_RED);
    }

    #[test]
    fn test_theme_creation() {
        let theme = fancontrol_theme();
        assert!(matches!(theme, Theme::Custom(_)));
    }

    #[test]
    fn test_with_alpha() {
        let color = colors::with_alpha(colors::ACCENT_CYAN, 0.5);
        assert!((color.a - 0.5).abs() < 0.001);
    }
}
