//! PNG encoding for the finished card.
//!
//! Supports two color types:
//! - **RGB (color type 2)**: used when every pixel is opaque, which is the
//!   normal case for a card drawn over an opaque background.
//! - **RGBA (color type 6)**: fallback when any pixel carries transparency.

use std::io::Write;

use alert_common::{AlertError, AlertResult};
use image::RgbaImage;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// PNG color types this encoder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Rgb = 2,
    Rgba = 6,
}

impl ColorType {
    fn channels(self) -> usize {
        match self {
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }
}

/// Encode an image, dropping the alpha channel when it carries no information.
pub fn encode_image(image: &RgbaImage) -> AlertResult<Vec<u8>> {
    create_png_auto(
        image.as_raw(),
        image.width() as usize,
        image.height() as usize,
    )
}

/// Encode RGBA pixels choosing RGB when the image is fully opaque.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> AlertResult<Vec<u8>> {
    let color_type = if pixels.chunks_exact(4).all(|px| px[3] == 255) {
        ColorType::Rgb
    } else {
        ColorType::Rgba
    };
    create_png(pixels, width, height, color_type)
}

/// Encode RGBA pixels (4 bytes per pixel) as the given color type.
pub fn create_png(
    pixels: &[u8],
    width: usize,
    height: usize,
    color_type: ColorType,
) -> AlertResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(AlertError::EncodingFailed(format!(
            "cannot encode empty {}x{} image",
            width, height
        )));
    }
    if pixels.len() != width * height * 4 {
        return Err(AlertError::EncodingFailed(format!(
            "expected {} RGBA bytes for {}x{}, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        )));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(color_type as u8);
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat(pixels, width, height, color_type)
        .map_err(|e| AlertError::EncodingFailed(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate scanlines for the IDAT chunk, one filter byte (none) per row.
fn deflate_idat(
    pixels: &[u8],
    width: usize,
    height: usize,
    color_type: ColorType,
) -> std::io::Result<Vec<u8>> {
    let channels = color_type.channels();
    let mut uncompressed = Vec::with_capacity(height * (1 + width * channels));

    for row in pixels.chunks_exact(width * 4) {
        uncompressed.push(0); // filter type: none
        match color_type {
            ColorType::Rgba => uncompressed.extend_from_slice(row),
            ColorType::Rgb => {
                for px in row.chunks_exact(4) {
                    uncompressed.extend_from_slice(&px[..3]);
                }
            }
        }
    }

    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_selects_rgb() {
        let pixels = [255, 0, 0, 255, 0, 255, 0, 255];
        let png = create_png_auto(&pixels, 2, 1).unwrap();
        // color type byte: signature(8) + length(4) + "IHDR"(4) + w(4) + h(4) + depth(1)
        assert_eq!(png[25], 2);
    }

    #[test]
    fn test_transparent_selects_rgba() {
        let pixels = [255, 0, 0, 255, 0, 0, 0, 0];
        let png = create_png_auto(&pixels, 2, 1).unwrap();
        assert_eq!(png[25], 6);
    }

    #[test]
    fn test_length_mismatch_is_encoding_error() {
        let err = create_png(&[0; 12], 2, 2, ColorType::Rgba).unwrap_err();
        assert!(matches!(err, AlertError::EncodingFailed(_)));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(create_png(&[], 0, 0, ColorType::Rgb).is_err());
    }
}
