//! Element definitions for the drawing canvas.
//!
//! Every drawable thing on a page is an [`Element`]: a closed set of seven
//! variants, each carrying a stable [`ElementId`] and the common
//! [`ElementStyle`]. Consumers match exhaustively on the enum; the
//! per-variant behaviour lives behind [`ElementTrait`].

mod arrow;
mod circle;
mod image;
mod rectangle;
mod stroke;
mod text;
mod triangle;

pub use arrow::Arrow;
pub use circle::Circle;
pub use image::{Image, ImageFormat};
pub use rectangle::Rectangle;
pub use stroke::{BlendMode, Stroke};
pub use text::{FontFamily, Text};
pub use triangle::Triangle;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Fresh identifier, also used when a stored record has none.
pub(crate) fn new_element_id() -> ElementId {
    Uuid::new_v4()
}

/// Serializable color representation (RGBA8).
///
/// Stored and exchanged as a CSS-style hex string (`#rrggbb`, or
/// `#rrggbbaa` when not fully opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties shared by every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Stroke color (fill color for text).
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ElementStyle {
    pub fn new(stroke_color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::new(SerializableColor::black(), 3.0)
    }
}

/// The kind tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Stroke,
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Text,
    Image,
}

impl ElementKind {
    /// Tag used in persisted records.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Stroke => "line",
            ElementKind::Rectangle => "rect",
            ElementKind::Circle => "circle",
            ElementKind::Triangle => "triangle",
            ElementKind::Arrow => "arrow",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => (point - *only).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Bounding box of a set of points.
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// Common trait for all element variants.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this element.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ElementStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ElementStyle;

    /// The point the element is anchored at (first point, corner or center).
    fn anchor(&self) -> Point;

    /// Move the element by a delta.
    fn translate(&mut self, delta: Vec2);
}

/// A drawable element on a page.
///
/// Records are tagged by `"type"` when persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "line")]
    Stroke(Stroke),
    #[serde(rename = "rect")]
    Rectangle(Rectangle),
    #[serde(rename = "circle")]
    Circle(Circle),
    #[serde(rename = "triangle")]
    Triangle(Triangle),
    #[serde(rename = "arrow")]
    Arrow(Arrow),
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "image")]
    Image(Image),
}

impl Element {
    fn inner(&self) -> &dyn ElementTrait {
        match self {
            Element::Stroke(s) => s,
            Element::Rectangle(s) => s,
            Element::Circle(s) => s,
            Element::Triangle(s) => s,
            Element::Arrow(s) => s,
            Element::Text(s) => s,
            Element::Image(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ElementTrait {
        match self {
            Element::Stroke(s) => s,
            Element::Rectangle(s) => s,
            Element::Circle(s) => s,
            Element::Triangle(s) => s,
            Element::Arrow(s) => s,
            Element::Text(s) => s,
            Element::Image(s) => s,
        }
    }

    pub fn id(&self) -> ElementId {
        self.inner().id()
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Stroke(_) => ElementKind::Stroke,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Circle(_) => ElementKind::Circle,
            Element::Triangle(_) => ElementKind::Triangle,
            Element::Arrow(_) => ElementKind::Arrow,
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.inner().hit_test(point, tolerance)
    }

    pub fn style(&self) -> &ElementStyle {
        self.inner().style()
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        self.inner_mut().style_mut()
    }

    pub fn anchor(&self) -> Point {
        self.inner().anchor()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.inner_mut().translate(delta);
    }

    /// Move the element so its anchor lands on `point`.
    pub fn move_to(&mut self, point: Point) {
        let delta = point - self.anchor();
        self.translate(delta);
    }

    /// Whether the element can be dragged around the canvas.
    /// Only text and images are draggable.
    pub fn is_draggable(&self) -> bool {
        matches!(self, Element::Text(_) | Element::Image(_))
    }

    /// Get the text if this element is a text element.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the mutable text if this element is a text element.
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the image if this element is an image.
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Element::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Get the mutable image if this element is an image.
    pub fn as_image_mut(&mut self) -> Option<&mut Image> {
        match self {
            Element::Image(img) => Some(img),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = SerializableColor::from_hex("#ff8000").unwrap();
        assert_eq!(color, SerializableColor::new(255, 128, 0, 255));
        assert_eq!(color.to_hex(), "#ff8000");
    }

    #[test]
    fn test_color_short_and_alpha_forms() {
        assert_eq!(
            SerializableColor::from_hex("#fff"),
            Some(SerializableColor::white())
        );
        let translucent = SerializableColor::from_hex("#00000080").unwrap();
        assert_eq!(translucent.a, 128);
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!(SerializableColor::from_hex("000000").is_none());
        assert!(SerializableColor::from_hex("#12345").is_none());
        assert!(SerializableColor::from_hex("#gg0000").is_none());
    }

    #[test]
    fn test_element_tagged_serialization() {
        let rect = Element::Rectangle(Rectangle::new(
            Point::new(1.0, 2.0),
            3.0,
            4.0,
            ElementStyle::default(),
        ));
        let json = serde_json::to_value(&rect).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["style"]["stroke_color"], "#000000");

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, rect);
    }

    #[test]
    fn test_missing_id_gets_fresh_one() {
        let json = r##"{"type":"circle","center":{"x":5.0,"y":5.0},"radius":2.0,
            "style":{"stroke_color":"#ff0000","stroke_width":1.0}}"##;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind(), ElementKind::Circle);
        assert!(!element.id().is_nil());
    }

    #[test]
    fn test_move_to_uses_anchor() {
        let mut text = Element::Text(Text::new(
            Point::new(10.0, 10.0),
            "hi".to_string(),
            20.0,
            FontFamily::Arial,
            SerializableColor::black(),
        ));
        text.move_to(Point::new(40.0, 60.0));
        assert_eq!(text.anchor(), Point::new(40.0, 60.0));
        assert!(text.is_draggable());
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert!((point_to_polyline_dist(Point::new(5.0, 3.0), &pts) - 3.0).abs() < 1e-9);
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
    }
}
