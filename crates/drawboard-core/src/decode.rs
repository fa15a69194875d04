//! Decoding of dropped image files and their placement on the canvas.

use crate::shapes::{Image, ImageFormat};
use crate::storage::BoxFuture;
use kurbo::{Point, Size};
use std::io::Cursor;
use thiserror::Error;

/// Diagonal step between images dropped together.
pub const DROP_OFFSET_STEP: f64 = 30.0;

/// Image decode errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unsupported image format")]
    UnsupportedFormat,
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// Result type for image decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A file dropped onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DroppedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Guess the MIME type from the file name's extension.
    pub fn from_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = name
            .rsplit_once('.')
            .and_then(|(_, ext)| ImageFormat::from_extension(ext))
            .map(|format| format.mime_type())
            .unwrap_or("application/octet-stream");
        Self::new(name, mime_type, bytes)
    }

    /// Only `image/*` files are accepted by the canvas.
    pub fn is_image(&self) -> bool {
        self.mime_type.trim().to_ascii_lowercase().starts_with("image/")
    }
}

/// A decoded image with known pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// The original encoded bytes.
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// Build the canvas element for this image: one fifth of the canvas
    /// width, aspect preserved, centered, and shifted diagonally by `slot`.
    pub fn place(&self, canvas: Size, slot: usize) -> Image {
        let image = Image::new(Point::ZERO, &self.bytes, self.width, self.height, self.format)
            .scaled_to_width(canvas.width / 5.0);
        let offset = slot as f64 * DROP_OFFSET_STEP;
        let x = (canvas.width - image.width) / 2.0 + offset;
        let y = (canvas.height - image.height) / 2.0 + offset;
        Image {
            position: Point::new(x, y),
            ..image
        }
    }
}

fn to_image_crate_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::WebP => image::ImageFormat::WebP,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    }
}

fn decode_now(file: DroppedFile) -> DecodeResult<DecodedImage> {
    let format = ImageFormat::from_magic_bytes(&file.bytes)
        .or_else(|| ImageFormat::from_mime_type(&file.mime_type))
        .ok_or(DecodeError::UnsupportedFormat)?;

    let reader = image::ImageReader::with_format(
        Cursor::new(file.bytes.as_slice()),
        to_image_crate_format(format),
    );
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::Decode(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(DecodeError::Decode(format!("{} has no pixels", file.name)));
    }

    Ok(DecodedImage {
        width,
        height,
        format,
        bytes: file.bytes,
    })
}

/// Decode a dropped file asynchronously.
///
/// Completion order across several calls is unspecified; callers place
/// each result by the slot it was dropped in, not by when it finished.
pub fn decode_image(file: DroppedFile) -> BoxFuture<'static, DecodeResult<DecodedImage>> {
    Box::pin(async move { decode_now(file) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgba8(width, height);
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_decode_png_dimensions() {
        let file = DroppedFile::new("a.png", "image/png", png_bytes(40, 20));
        let decoded = pollster::block_on(decode_image(file)).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 20));
        assert_eq!(decoded.format, ImageFormat::Png);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let file = DroppedFile::new("a.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47, 1, 2, 3]);
        let result = pollster::block_on(decode_image(file));
        assert!(matches!(result, Err(DecodeError::Decode(_))));

        let file = DroppedFile::new("a.bin", "image/x-unknown", vec![1, 2, 3]);
        let result = pollster::block_on(decode_image(file));
        assert_eq!(result, Err(DecodeError::UnsupportedFormat));
    }

    #[test]
    fn test_is_image() {
        assert!(DroppedFile::new("a", "image/png", vec![]).is_image());
        assert!(!DroppedFile::new("a", "text/plain", vec![]).is_image());
        assert!(DroppedFile::from_name("photo.JPG", vec![]).is_image());
        assert!(!DroppedFile::from_name("notes.txt", vec![]).is_image());
    }

    #[test]
    fn test_place_centers_and_offsets() {
        let decoded = DecodedImage {
            width: 400,
            height: 200,
            format: ImageFormat::Png,
            bytes: vec![],
        };
        let canvas = Size::new(1000.0, 500.0);

        let first = decoded.place(canvas, 0);
        assert!((first.width - 200.0).abs() < 1e-9);
        assert!((first.height - 100.0).abs() < 1e-9);
        assert_eq!(first.position, Point::new(400.0, 200.0));

        let second = decoded.place(canvas, 1);
        assert_eq!(second.position, Point::new(430.0, 230.0));
    }
}
