//! Toolbar values: color, thickness, font and zoom.
//!
//! The toolbar has no behaviour of its own. It mirrors the values the
//! canvas editor reads when it creates elements, clamped to the ranges the
//! controls allow.

use crate::camera::Camera;
use crate::shapes::{ElementStyle, FontFamily, SerializableColor, Text};

pub const MIN_THICKNESS: f64 = 1.0;
pub const MAX_THICKNESS: f64 = 20.0;
pub const DEFAULT_THICKNESS: f64 = 3.0;
pub const MIN_FONT_SIZE: f64 = 10.0;
pub const MAX_FONT_SIZE: f64 = 100.0;
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;

/// Current toolbar values.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    color: SerializableColor,
    thickness: f64,
    font_size: f64,
    font_family: FontFamily,
    zoom: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            thickness: DEFAULT_THICKNESS,
            font_size: Text::DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
            zoom: 1.0,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Set the stroke thickness, clamped to 1–20. Non-finite input is ignored.
    pub fn set_thickness(&mut self, thickness: f64) {
        if !thickness.is_finite() {
            return;
        }
        self.thickness = thickness.round().clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Set the font size, clamped to 10–100. Non-finite input is ignored.
    pub fn set_font_size(&mut self, size: f64) {
        if !size.is_finite() {
            return;
        }
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    pub fn font_family(&self) -> FontFamily {
        self.font_family
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        self.font_family = family;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom, rounded to 0.1 steps and clamped to 0.5–2.0.
    /// Non-finite input is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = ((zoom * 10.0).round() / 10.0).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom label as shown next to the slider, e.g. `1.5x`.
    pub fn zoom_label(&self) -> String {
        format!("{:.1}x", self.zoom)
    }

    /// Style for new strokes and shapes.
    pub fn stroke_style(&self) -> ElementStyle {
        ElementStyle::new(self.color, self.thickness)
    }

    /// Camera for the current zoom.
    pub fn camera(&self) -> Camera {
        Camera::new(self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ToolSettings::default();
        assert_eq!(settings.color().to_hex(), "#000000");
        assert!((settings.thickness() - 3.0).abs() < f64::EPSILON);
        assert!((settings.font_size() - 20.0).abs() < f64::EPSILON);
        assert_eq!(settings.font_family(), FontFamily::Arial);
        assert_eq!(settings.zoom_label(), "1.0x");
    }

    #[test]
    fn test_ranges_are_clamped() {
        let mut settings = ToolSettings::default();
        settings.set_thickness(50.0);
        assert!((settings.thickness() - 20.0).abs() < f64::EPSILON);
        settings.set_thickness(0.0);
        assert!((settings.thickness() - 1.0).abs() < f64::EPSILON);

        settings.set_font_size(4.0);
        assert!((settings.font_size() - 10.0).abs() < f64::EPSILON);
        settings.set_font_size(400.0);
        assert!((settings.font_size() - 100.0).abs() < f64::EPSILON);

        settings.set_zoom(3.0);
        assert!((settings.zoom() - 2.0).abs() < f64::EPSILON);
        settings.set_zoom(0.1);
        assert!((settings.zoom() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_values_keep_previous() {
        let mut settings = ToolSettings::default();
        settings.set_thickness(7.0);
        settings.set_font_size(30.0);
        settings.set_zoom(1.5);

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            settings.set_thickness(value);
            settings.set_font_size(value);
            settings.set_zoom(value);
        }
        assert!((settings.thickness() - 7.0).abs() < f64::EPSILON);
        assert!((settings.font_size() - 30.0).abs() < f64::EPSILON);
        assert_eq!(settings.zoom_label(), "1.5x");
        assert!(settings.stroke_style().stroke_width.is_finite());
    }

    #[test]
    fn test_zoom_rounds_to_step() {
        let mut settings = ToolSettings::default();
        settings.set_zoom(1.26);
        assert_eq!(settings.zoom_label(), "1.3x");
    }

    #[test]
    fn test_stroke_style_follows_values() {
        let mut settings = ToolSettings::default();
        settings.set_color(SerializableColor::new(255, 0, 0, 255));
        settings.set_thickness(7.0);
        let style = settings.stroke_style();
        assert_eq!(style.stroke_color.to_hex(), "#ff0000");
        assert!((style.stroke_width - 7.0).abs() < f64::EPSILON);
    }
}
