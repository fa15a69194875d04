//! Text shape.

use super::{ElementId, ElementStyle, ElementTrait, SerializableColor};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Font family options offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Arial,
    CourierNew,
    TimesNewRoman,
    Verdana,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::CourierNew => "Courier New",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Verdana => "Verdana",
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Arial,
            FontFamily::CourierNew,
            FontFamily::TimesNewRoman,
            FontFamily::Verdana,
        ]
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|family| family.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown font family: {s}"))
    }
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family.
    #[serde(default)]
    pub font_family: FontFamily,
    /// Fill color of the glyphs.
    pub fill: SerializableColor,
    /// Style properties.
    #[serde(default)]
    pub style: ElementStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text element.
    pub fn new(
        position: Point,
        content: String,
        font_size: f64,
        font_family: FontFamily,
        fill: SerializableColor,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size,
            font_family,
            fill,
            style: ElementStyle::new(fill, 0.0),
        }
    }

    /// Approximate layout size (width, height) without a font engine.
    pub fn approximate_size(&self) -> (f64, f64) {
        let lines: Vec<&str> = self.content.split('\n').collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = longest as f64 * self.font_size * CHAR_WIDTH_FACTOR;
        let height = lines.len() as f64 * self.font_size;
        (width, height)
    }
}

impl ElementTrait for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let (width, height) = self.approximate_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
