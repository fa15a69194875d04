//! Camera module for the zoom transform.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Camera scales canvas content by the toolbar zoom. There is no panning:
/// canvas coordinates are screen coordinates divided by zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Camera {
    /// Create a camera with the given zoom.
    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    /// Get the affine transform for rendering (canvas to screen).
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        if self.zoom.abs() < f64::EPSILON {
            return screen_point;
        }
        Point::new(screen_point.x / self.zoom, screen_point.y / self.zoom)
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_canvas_divides_by_zoom() {
        let camera = Camera::new(2.0);
        assert_eq!(camera.screen_to_canvas(Point::new(100.0, 50.0)), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_roundtrip() {
        let camera = Camera::new(1.5);
        let p = Point::new(33.0, 12.0);
        let back = camera.screen_to_canvas(camera.canvas_to_screen(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }
}
