//! Rectangle shape.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle anchored at the point where the drag started.
///
/// `width` and `height` are signed: dragging up or left of the anchor
/// yields negative extents, the way the pointer moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Anchor corner.
    pub position: Point,
    /// Signed width.
    pub width: f64,
    /// Signed height.
    pub height: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style,
        }
    }

    /// Resize so the opposite corner sits at `corner`.
    pub fn drag_corner_to(&mut self, corner: Point) {
        self.width = corner.x - self.position.x;
        self.height = corner.y - self.position.y;
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(
            self.position,
            Point::new(self.position.x + self.width, self.position.y + self.height),
        )
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Outline only: hit on the border
        let rect = self.as_rect();
        let reach = tolerance + self.style.stroke_width / 2.0;
        let outer = rect.inflate(reach, reach);
        let inner = rect.inflate(-reach, -reach);
        outer.contains(point) && !(inner.width() > 0.0 && inner.height() > 0.0 && inner.contains(point))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0, ElementStyle::default());
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_extent_bounds() {
        let mut rect = Rectangle::new(Point::new(100.0, 100.0), 0.0, 0.0, ElementStyle::default());
        rect.drag_corner_to(Point::new(50.0, 60.0));
        assert!((rect.width + 50.0).abs() < f64::EPSILON);
        assert!((rect.height + 40.0).abs() < f64::EPSILON);

        let bounds = rect.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 60.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_outline() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0, ElementStyle::default());
        assert!(rect.hit_test(Point::new(0.0, 50.0), 2.0));
        assert!(rect.hit_test(Point::new(103.0, 50.0), 2.0));
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 2.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 2.0));
    }

    #[test]
    fn test_zero_size_rectangle_is_hittable() {
        let rect = Rectangle::new(Point::new(10.0, 10.0), 0.0, 0.0, ElementStyle::default());
        assert!(rect.hit_test(Point::new(10.0, 10.0), 1.0));
    }
}
