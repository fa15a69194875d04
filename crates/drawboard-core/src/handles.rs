//! Resize and rotate handles for a selected image.

use crate::shapes::Image;
use kurbo::{Affine, Point, Rect};

/// Hit radius of a handle, in canvas units.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;
/// Distance of the rotate handle above the top edge.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

/// A manipulation handle on an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Position in canvas coordinates.
    pub position: Point,
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Rotate,
}

impl HandleKind {
    /// The corner of the local frame this handle drags, if it is a corner.
    fn local_corner(&self, width: f64, height: f64) -> Option<Point> {
        match self {
            HandleKind::TopLeft => Some(Point::new(0.0, 0.0)),
            HandleKind::TopRight => Some(Point::new(width, 0.0)),
            HandleKind::BottomRight => Some(Point::new(width, height)),
            HandleKind::BottomLeft => Some(Point::new(0.0, height)),
            HandleKind::Rotate => None,
        }
    }
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// The four corner anchors plus the rotate handle of an image.
pub fn image_handles(image: &Image) -> Vec<Handle> {
    let [tl, tr, br, bl] = image.corners();
    let rotate = image.to_canvas(Point::new(image.width / 2.0, -ROTATE_HANDLE_OFFSET));
    vec![
        Handle::new(HandleKind::TopLeft, tl),
        Handle::new(HandleKind::TopRight, tr),
        Handle::new(HandleKind::BottomRight, br),
        Handle::new(HandleKind::BottomLeft, bl),
        Handle::new(HandleKind::Rotate, rotate),
    ]
}

/// Find the handle under a point.
pub fn hit_handle(handles: &[Handle], point: Point) -> Option<HandleKind> {
    handles
        .iter()
        .find(|h| (h.position - point).hypot() <= HANDLE_HIT_RADIUS)
        .map(|h| h.kind)
}

/// Apply a handle drag to the image as it was when the drag started.
///
/// Corner drags resize in the image's rotated frame with the opposite
/// corner pinned. A result smaller than [`Image::MIN_SIZE`] on either axis
/// is rejected with `None` so the caller keeps the previous frame. The
/// rotate handle turns the image around its center.
pub fn apply_handle(original: &Image, kind: HandleKind, point: Point) -> Option<Image> {
    let mut image = original.clone();
    match kind.local_corner(original.width, original.height) {
        Some(corner) => {
            let opposite = Point::new(original.width - corner.x, original.height - corner.y);
            let local = original.to_local(point);
            let rect = Rect::from_points(opposite, local);
            if rect.width() < Image::MIN_SIZE || rect.height() < Image::MIN_SIZE {
                return None;
            }
            let position = original.to_canvas(Point::new(rect.x0, rect.y0));
            image.set_frame(position, rect.width(), rect.height(), original.rotation);
        }
        None => {
            let center = original.center();
            let v = point - center;
            let mut rotation = v.y.atan2(v.x).to_degrees() + 90.0;
            if rotation > 180.0 {
                rotation -= 360.0;
            }
            let half = Affine::rotate(rotation.to_radians())
                * Point::new(original.width / 2.0, original.height / 2.0);
            let position = Point::new(center.x - half.x, center.y - half.y);
            image.set_frame(position, original.width, original.height, rotation);
        }
    }
    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ImageFormat;

    fn image() -> Image {
        Image::new(Point::new(100.0, 100.0), &[], 200, 100, ImageFormat::Png)
    }

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-6
    }

    #[test]
    fn test_handles_at_corners() {
        let img = image();
        let handles = image_handles(&img);
        assert_eq!(handles.len(), 5);
        assert_eq!(hit_handle(&handles, Point::new(300.0, 200.0)), Some(HandleKind::BottomRight));
        assert_eq!(hit_handle(&handles, Point::new(200.0, 70.0)), Some(HandleKind::Rotate));
        assert_eq!(hit_handle(&handles, Point::new(200.0, 150.0)), None);
    }

    #[test]
    fn test_corner_resize_pins_opposite_corner() {
        let img = image();
        let resized = apply_handle(&img, HandleKind::BottomRight, Point::new(250.0, 180.0)).unwrap();
        assert!(close(resized.position, img.position));
        assert!((resized.width - 150.0).abs() < 1e-6);
        assert!((resized.height - 80.0).abs() < 1e-6);

        let resized = apply_handle(&img, HandleKind::TopLeft, Point::new(150.0, 120.0)).unwrap();
        assert!(close(resized.corners()[2], img.corners()[2]));
        assert!((resized.width - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_below_minimum_rejected() {
        let img = image();
        assert!(apply_handle(&img, HandleKind::BottomRight, Point::new(102.0, 300.0)).is_none());
    }

    #[test]
    fn test_rotate_keeps_center() {
        let img = image();
        let center = img.center();
        let rotated = apply_handle(&img, HandleKind::Rotate, Point::new(400.0, center.y)).unwrap();
        assert!((rotated.rotation - 90.0).abs() < 1e-6);
        assert!(close(rotated.center(), center));
        assert!((rotated.width - img.width).abs() < 1e-9);
    }

    #[test]
    fn test_resize_in_rotated_frame() {
        let mut img = image();
        img.rotation = 90.0;
        // Local x runs down the screen once rotated 90 degrees.
        let br = img.corners()[2];
        let resized = apply_handle(&img, HandleKind::BottomRight, br + kurbo::Vec2::new(0.0, 20.0)).unwrap();
        assert!((resized.width - 220.0).abs() < 1e-6);
        assert!((resized.height - 100.0).abs() < 1e-6);
        assert!(close(resized.position, img.position));
    }
}
