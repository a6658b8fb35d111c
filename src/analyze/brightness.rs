//! Mean grayscale brightness of image regions.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::luma;

/// Brightness (0.0..=255.0) of the regions the composer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brightness {
    /// Whole image.
    pub whole: f32,
    /// Top 25% strip.
    pub top: f32,
    /// Bottom 25% strip.
    pub bottom: f32,
}

impl Brightness {
    /// Uniform brightness, e.g. for a solid fill.
    pub fn uniform(value: f32) -> Self {
        Self {
            whole: value,
            top: value,
            bottom: value,
        }
    }

    /// Average of the top and bottom strips, where poster text sits.
    pub fn text_regions(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Mean brightness of rows `y0..y1` (clamped to the image).
///
/// Returns 0.0 for an empty region.
pub fn region_brightness(rgb: &RgbImage, y0: u32, y1: u32) -> f32 {
    let y1 = y1.min(rgb.height());
    if y0 >= y1 || rgb.width() == 0 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    for y in y0..y1 {
        for x in 0..rgb.width() {
            let p = rgb.get_pixel(x, y);
            sum += luma(p[0], p[1], p[2]) as f64;
        }
    }
    let n = (y1 - y0) as f64 * rgb.width() as f64;
    (sum / n) as f32
}

/// Measure whole-image and top/bottom-strip brightness.
///
/// Images shorter than four rows have no distinct strips; both strips then
/// report the whole-image value.
pub fn measure(rgb: &RgbImage) -> Brightness {
    let h = rgb.height();
    let whole = region_brightness(rgb, 0, h);
    let strip = h / 4;
    if strip == 0 {
        return Brightness::uniform(whole);
    }
    Brightness {
        whole,
        top: region_brightness(rgb, 0, strip),
        bottom: region_brightness(rgb, h * 3 / 4, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image() {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([255, 255, 255]));
        let b = measure(&img);
        assert!((b.whole - 255.0).abs() < 0.01);
        assert!((b.text_regions() - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_strips_measured_separately() {
        // top half white, bottom half black
        let mut img = RgbImage::new(4, 8);
        for y in 0..4 {
            for x in 0..4 {
                img.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
        let b = measure(&img);
        assert!((b.top - 255.0).abs() < 0.01);
        assert_eq!(b.bottom, 0.0);
        assert!((b.whole - 127.5).abs() < 0.01);
        assert!((b.text_regions() - 127.5).abs() < 0.01);
    }

    #[test]
    fn test_tiny_image_uses_whole() {
        let img = RgbImage::from_pixel(3, 2, image::Rgb([100, 100, 100]));
        let b = measure(&img);
        assert_eq!(b.top, b.whole);
        assert_eq!(b.bottom, b.whole);
    }
}
