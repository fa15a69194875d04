//! Triangle shape (regular, point up).

use super::{ElementId, ElementStyle, ElementTrait, point_to_polyline_dist, points_bounds};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// An equilateral triangle inscribed in a circle of `radius` around `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Center point (where the drag started).
    pub center: Point,
    /// Circumradius.
    pub radius: f64,
    /// Style properties.
    pub style: ElementStyle,
}

impl Triangle {
    /// Create a new triangle.
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

    /// The three corners, first one straight above the center.
    pub fn vertices(&self) -> [Point; 3] {
        std::array::from_fn(|i| {
            let angle = -PI / 2.0 + i as f64 * 2.0 * PI / 3.0;
            Point::new(
                self.center.x + self.radius * angle.cos(),
                self.center.y + self.radius * angle.sin(),
            )
        })
    }
}

impl ElementTrait for Triangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.vertices())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let [a, b, c] = self.vertices();
        point_to_polyline_dist(point, &[a, b, c, a]) <= tolerance + self.style.stroke_width / 2.0
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
    fn test_top_vertex_above_center() {
        let tri = Triangle::new(Point::new(0.0, 0.0), 10.0, ElementStyle::default());
        let [top, _, _] = tri.vertices();
        assert!(top.x.abs() < 1e-9);
        assert!((top.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_on_edge() {
        let tri = Triangle::new(Point::new(0.0, 0.0), 10.0, ElementStyle::default());
        let [a, b, _] = tri.vertices();
        let mid = a.midpoint(b);
        assert!(tri.hit_test(mid, 0.5));
        assert!(!tri.hit_test(Point::new(0.0, 0.0), 0.5));
    }
}
