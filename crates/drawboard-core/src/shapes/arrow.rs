//! Arrow shape.

use super::{ElementId, ElementStyle, ElementTrait, point_to_segment_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight arrow from `start` to `end` (head at `end`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Tail point.
    pub start: Point,
    /// Head point.
    pub end: Point,
    /// Style properties.
    pub style: ElementStyle,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
        }
    }

    /// Length of the shaft.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

impl ElementTrait for Arrow {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance + self.style.stroke_width / 2.0
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_arrow() {
        let arrow = Arrow::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0), ElementStyle::default());
        assert!(arrow.length().abs() < f64::EPSILON);
        assert!(arrow.hit_test(Point::new(5.0, 5.0), 0.0));
    }

    #[test]
    fn test_hit_test() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), ElementStyle::default());
        assert!(arrow.hit_test(Point::new(50.0, 2.0), 1.0));
        assert!(!arrow.hit_test(Point::new(50.0, 10.0), 1.0));
    }
}
