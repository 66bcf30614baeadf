/// Image encoding for the outbound request
///
/// The service expects the product photo as base64 text with a known
/// mime-type. Whatever the user uploaded (JPEG or PNG), we re-encode to
/// JPEG so the mime-type downstream is always `image/jpeg`. Transparent
/// sources lose their alpha channel; that is expected. No resizing, no
/// metadata stripping.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::error::StudioError;

/// The mime-type every encoded product image carries.
pub const JPEG_MIME: &str = "image/jpeg";

/// A product image ready to be embedded in a JSON request body.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Always `image/jpeg`.
    pub mime_type: &'static str,
    /// Standard base64 of the JPEG bytes.
    pub data: String,
}

/// Re-encode the uploaded raster as JPEG and base64 it.
pub fn encode_product_image(image: &DynamicImage) -> Result<EncodedImage, StudioError> {
    // JPEG cannot carry alpha; flatten to RGB first.
    let rgb = image.to_rgb8();

    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| StudioError::Encode(e.to_string()))?;

    Ok(EncodedImage {
        mime_type: JPEG_MIME,
        data: BASE64.encode(buffer.into_inner()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    #[test]
    fn test_output_is_jpeg() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([200, 120, 40, 255]),
        ));
        let encoded = encode_product_image(&source).unwrap();
        assert_eq!(encoded.mime_type, "image/jpeg");

        // JPEG SOI marker after base64 round-trip
        let bytes = BASE64.decode(&encoded.data).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_png_with_alpha_becomes_jpeg() {
        // Half-transparent source; alpha must be dropped, not rejected.
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            16,
            16,
            Rgba([10, 200, 30, 128]),
        ));
        let encoded = encode_product_image(&source).unwrap();

        let bytes = BASE64.decode(&encoded.data).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
        assert_eq!(decoded.color().channel_count(), 3);
    }

    #[test]
    fn test_pixels_survive_within_lossy_tolerance() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            Rgba([180, 90, 60, 255]),
        ));
        let encoded = encode_product_image(&source).unwrap();
        let bytes = BASE64.decode(&encoded.data).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();

        let Rgb([r, g, b]) = *decoded.get_pixel(16, 16);
        assert!((r as i16 - 180).abs() < 16);
        assert!((g as i16 - 90).abs() < 16);
        assert!((b as i16 - 60).abs() < 16);
    }
}
