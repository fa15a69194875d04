//! Image shape for dropped raster images.

use super::{ElementId, ElementStyle, ElementTrait, points_bounds};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image format for stored image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    /// Detect format from a MIME type.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::WebP),
            "image/bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        if data.starts_with(b"BM") {
            return Some(ImageFormat::Bmp);
        }
        None
    }
}

/// An image placed on the canvas.
///
/// The local frame has its origin at `position` and is rotated by
/// `rotation` degrees (clockwise, screen coordinates) around that origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default = "crate::shapes::new_element_id")]
    pub(crate) id: ElementId,
    /// Top-left corner position (before rotation).
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Original image width in pixels.
    pub source_width: u32,
    /// Original image height in pixels.
    pub source_height: u32,
    /// Image format.
    pub format: ImageFormat,
    /// Original file bytes, base64-encoded.
    pub data_base64: String,
    /// Style properties.
    #[serde(default)]
    pub style: ElementStyle,
}

impl Image {
    /// Smallest width or height a resize may produce.
    pub const MIN_SIZE: f64 = 5.0;

    /// Create a new image element from raw file bytes, shown at source size.
    pub fn new(
        position: Point,
        data: &[u8],
        source_width: u32,
        source_height: u32,
        format: ImageFormat,
    ) -> Self {
        use base64::{Engine, engine::general_purpose::STANDARD};

        Self {
            id: Uuid::new_v4(),
            position,
            width: source_width as f64,
            height: source_height as f64,
            rotation: 0.0,
            source_width,
            source_height,
            format,
            data_base64: STANDARD.encode(data),
            style: ElementStyle::default(),
        }
    }

    /// Scale to the given display width, preserving aspect ratio.
    pub fn scaled_to_width(mut self, width: f64) -> Self {
        if self.source_width == 0 {
            return self;
        }
        let factor = width / self.source_width as f64;
        self.width = width;
        self.height = self.source_height as f64 * factor;
        self
    }

    /// Get the raw image data (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        use base64::{Engine, engine::general_purpose::STANDARD};
        STANDARD.decode(&self.data_base64).ok()
    }

    /// Local-to-canvas transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::rotate(self.rotation.to_radians())
    }

    /// Convert a canvas point into the image's local frame.
    pub fn to_local(&self, point: Point) -> Point {
        self.transform().inverse() * point
    }

    /// Convert a local point into canvas coordinates.
    pub fn to_canvas(&self, local: Point) -> Point {
        self.transform() * local
    }

    /// Corners in canvas coordinates: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
        .map(|local| self.to_canvas(local))
    }

    /// Center in canvas coordinates.
    pub fn center(&self) -> Point {
        self.to_canvas(Point::new(self.width / 2.0, self.height / 2.0))
    }

    /// Write back a transform result, enforcing the minimum size.
    pub fn set_frame(&mut self, position: Point, width: f64, height: f64, rotation: f64) {
        self.position = position;
        self.width = width.max(Self::MIN_SIZE);
        self.height = height.max(Self::MIN_SIZE);
        self.rotation = rotation;
    }
}

impl ElementTrait for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.corners())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.to_local(point);
        Rect::new(0.0, 0.0, self.width, self.height)
            .inflate(tolerance, tolerance)
            .contains(local)
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
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a..."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_mime_type("image/JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("text/plain"), None);
    }

    #[test]
    fn test_scaled_to_width_keeps_aspect() {
        let img = Image::new(Point::ZERO, &[0u8; 4], 1000, 500, ImageFormat::Png).scaled_to_width(200.0);
        assert!((img.width - 200.0).abs() < 1e-9);
        assert!((img.height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_data_roundtrip() {
        let bytes = vec![1u8, 2, 3, 4, 5];
        let img = Image::new(Point::ZERO, &bytes, 1, 1, ImageFormat::Png);
        assert_eq!(img.data(), Some(bytes));
    }

    #[test]
    fn test_rotated_hit_test() {
        let mut img = Image::new(Point::new(0.0, 0.0), &[], 100, 10, ImageFormat::Png);
        img.rotation = 90.0;
        // Rotated 90° clockwise around the origin: the long side points down.
        assert!(img.hit_test(Point::new(-5.0, 50.0), 0.0));
        assert!(!img.hit_test(Point::new(50.0, 5.0), 0.0));
    }

    #[test]
    fn test_set_frame_enforces_min_size() {
        let mut img = Image::new(Point::ZERO, &[], 100, 100, ImageFormat::Png);
        img.set_frame(Point::new(3.0, 4.0), 1.0, 2.0, 45.0);
        assert!((img.width - Image::MIN_SIZE).abs() < f64::EPSILON);
        assert!((img.height - Image::MIN_SIZE).abs() < f64::EPSILON);
        assert!((img.rotation - 45.0).abs() < f64::EPSILON);
    }
}
