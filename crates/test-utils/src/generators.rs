//! Synthetic raster generators for backdrop and logo stand-ins.
//!
//! All generators are deterministic so renders built on them can be compared
//! byte for byte.

use std::io::Cursor;

use image::{ImageOutputFormat, Rgba, RgbaImage};

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .expect("in-memory PNG encoding");
    bytes.into_inner()
}

/// PNG of a single opaque or translucent color.
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// Map-like backdrop: a light diagonal ramp with a darker grid every 50px.
///
/// # Example
///
/// ```
/// let png = test_utils::backdrop_png(550, 540);
/// let decoded = image::load_from_memory(&png).unwrap();
/// assert_eq!(decoded.width(), 550);
/// ```
pub fn backdrop_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        if x % 50 == 0 || y % 50 == 0 {
            Rgba([180, 180, 180, 255])
        } else {
            let shade = 220 + ((x + y) % 30) as u8;
            Rgba([shade, shade, shade - 10, 255])
        }
    });
    encode_png(&image)
}

/// Logo stand-in: a 200x100 rectangle with a transparent border.
pub fn logo_png() -> Vec<u8> {
    let image = RgbaImage::from_fn(200, 100, |x, y| {
        if x < 10 || y < 10 || x >= 190 || y >= 90 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([30, 136, 229, 255])
        }
    });
    encode_png(&image)
}
