//! Freehand stroke (brush and eraser).

use super::{ElementId, ElementStyle, ElementTrait, point_to_polyline_dist, points_bounds};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a stroke is composited against what is already painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Paint over existing pixels.
    #[default]
    Normal,
    /// Punch out existing pixels (eraser).
    Erase,
}

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Paint mode.
    #[serde(default)]
    pub blend: BlendMode,
    /// Style properties.
    pub style: ElementStyle,
}

impl Stroke {
    /// Start a stroke at a single point.
    pub fn new(start: Point, blend: BlendMode, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            blend,
            style,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            blend: BlendMode::Normal,
            style,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether this stroke erases instead of painting.
    pub fn is_eraser(&self) -> bool {
        self.blend == BlendMode::Erase
    }
}

impl ElementTrait for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.points)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance + self.style.stroke_width / 2.0
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_starts_with_one_point() {
        let stroke = Stroke::new(Point::new(3.0, 4.0), BlendMode::Normal, ElementStyle::default());
        assert_eq!(stroke.len(), 1);
        assert!(!stroke.is_eraser());
    }

    #[test]
    fn test_bounds() {
        let stroke = Stroke::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            ElementStyle::default(),
        );

        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let stroke = Stroke::from_points(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            ElementStyle::new(Default::default(), 2.0),
        );

        assert!(stroke.hit_test(Point::new(50.0, 0.0), 5.0));
        assert!(!stroke.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_translate() {
        let mut stroke = Stroke::from_points(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            ElementStyle::default(),
        );
        stroke.translate(Vec2::new(5.0, 5.0));
        assert_eq!(stroke.points, vec![Point::new(5.0, 5.0), Point::new(15.0, 5.0)]);
    }
}
