//! Colour inversion: per-channel complement, transparency untouched.
//!
//! The transform is pure and deterministic: applying it twice returns the
//! original pixel values exactly (8-bit complement is an involution). For
//! images with an alpha channel only the colour channels are complemented;
//! the alpha plane must come out byte-for-byte identical.

use image::DynamicImage;

/// Invert the colour channels of an image, preserving any alpha channel.
///
/// 8-bit variants are inverted in place per channel. Anything more exotic
/// (16-bit, float) is first normalised to RGBA8 — embedded PDF images are
/// 8-bit in practice, so the lossy path is a fallback, not the norm.
pub fn invert_colors(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgba8(mut rgba) => {
            for pixel in rgba.pixels_mut() {
                let [r, g, b, a] = pixel.0;
                pixel.0 = [255 - r, 255 - g, 255 - b, a];
            }
            DynamicImage::ImageRgba8(rgba)
        }
        DynamicImage::ImageLumaA8(mut gray) => {
            for pixel in gray.pixels_mut() {
                let [l, a] = pixel.0;
                pixel.0 = [255 - l, a];
            }
            DynamicImage::ImageLumaA8(gray)
        }
        DynamicImage::ImageRgb8(mut rgb) => {
            for pixel in rgb.pixels_mut() {
                let [r, g, b] = pixel.0;
                pixel.0 = [255 - r, 255 - g, 255 - b];
            }
            DynamicImage::ImageRgb8(rgb)
        }
        DynamicImage::ImageLuma8(mut gray) => {
            for pixel in gray.pixels_mut() {
                pixel.0 = [255 - pixel.0[0]];
            }
            DynamicImage::ImageLuma8(gray)
        }
        other => {
            let mut rgba = other.to_rgba8();
            for pixel in rgba.pixels_mut() {
                let [r, g, b, a] = pixel.0;
                pixel.0 = [255 - r, 255 - g, 255 - b, a];
            }
            DynamicImage::ImageRgba8(rgba)
        }
    }
}
