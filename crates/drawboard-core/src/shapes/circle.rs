//! Circle shape.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle drawn outward from its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Center point (where the drag started).
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style,
        }
    }

    /// Set the radius to the distance from the center to `point`.
    pub fn extend_to(&mut self, point: Point) {
        self.radius = (point - self.center).hypot();
    }
}

impl ElementTrait for Circle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = (point - self.center).hypot();
        (dist - self.radius).abs() <= tolerance + self.style.stroke_width / 2.0
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_to_uses_euclidean_distance() {
        let mut circle = Circle::new(Point::new(0.0, 0.0), 0.0, ElementStyle::default());
        circle.extend_to(Point::new(3.0, 4.0));
        assert!((circle.radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(10.0, 10.0), 5.0, ElementStyle::default());
        let bounds = circle.bounds();
        assert!((bounds.x0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_ring() {
        let circle = Circle::new(Point::new(0.0, 0.0), 50.0, ElementStyle::default());
        assert!(circle.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(!circle.hit_test(Point::new(0.0, 0.0), 1.0));
    }
}
