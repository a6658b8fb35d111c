//! Dominant-color extraction.
//!
//! The image is flattened to RGB, shrunk to fit a small box, and every exact
//! RGB value is counted. Colors are ranked by count, ties going to the color
//! seen first in row-major scan order, so identical bytes always produce the
//! same ordered list.

use image::{DynamicImage, RgbImage, imageops};
use std::collections::HashMap;

use crate::color::Rgb;

/// Default number of dominant colors reported.
pub const DEFAULT_COLOR_COUNT: usize = 5;

/// Default bounding box the image is shrunk into before counting.
pub const DEFAULT_SAMPLE_BOX: u32 = 150;

/// Composite an image onto a solid background, dropping alpha.
///
/// Images without an alpha channel are converted directly.
pub fn flatten(image: &DynamicImage, background: Rgb) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px[3] as f32 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        out.put_pixel(
            x,
            y,
            image::Rgb([
                mix(px[0], background.0),
                mix(px[1], background.1),
                mix(px[2], background.2),
            ]),
        );
    }
    out
}

/// Dimensions that fit `(width, height)` inside a `max × max` box, never upscaling.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale = (max_w as f64 / width as f64).min(max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Shrink an RGB image to fit within `max_side × max_side`.
pub fn downsample(rgb: &RgbImage, max_side: u32) -> RgbImage {
    let (w, h) = fit_within(rgb.width(), rgb.height(), max_side, max_side);
    if (w, h) == rgb.dimensions() {
        return rgb.clone();
    }
    imageops::thumbnail(rgb, w, h)
}

/// Most frequent colors of an already-flattened image, most frequent first.
///
/// At most `count` colors. Returns `[NEUTRAL_GRAY]` when the image has no
/// pixels and `count` allows one.
pub fn dominant_colors(rgb: &RgbImage, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }

    // color -> (pixel count, first-seen index)
    let mut histogram: HashMap<[u8; 3], (u32, usize)> = HashMap::new();
    for (i, px) in rgb.pixels().enumerate() {
        histogram.entry(px.0).or_insert((0, i)).0 += 1;
    }

    if histogram.is_empty() {
        return vec![Rgb::NEUTRAL_GRAY];
    }

    let mut ranked: Vec<([u8; 3], u32, usize)> = histogram
        .into_iter()
        .map(|(color, (n, first))| (color, n, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(count)
        .map(|(c, _, _)| Rgb(c[0], c[1], c[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_most_frequent_first() {
        let mut img = RgbImage::from_pixel(10, 10, image::Rgb([10, 20, 30]));
        for x in 0..10 {
            img.put_pixel(x, 0, image::Rgb([200, 0, 0]));
        }
        let colors = dominant_colors(&img, 5);
        assert_eq!(colors, vec![Rgb(10, 20, 30), Rgb(200, 0, 0)]);
    }

    #[test]
    fn test_ties_break_by_scan_order() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([1, 1, 1]));
        img.put_pixel(1, 0, image::Rgb([2, 2, 2]));
        assert_eq!(dominant_colors(&img, 5), vec![Rgb(1, 1, 1), Rgb(2, 2, 2)]);
    }

    #[test]
    fn test_count_is_capped() {
        let mut img = RgbImage::new(8, 1);
        for x in 0..8 {
            img.put_pixel(x, 0, image::Rgb([x as u8 * 10, 0, 0]));
        }
        assert_eq!(dominant_colors(&img, 3).len(), 3);
    }

    #[test]
    fn test_zero_count_yields_nothing() {
        let img = RgbImage::from_pixel(4, 4, image::Rgb([9, 9, 9]));
        assert!(dominant_colors(&img, 0).is_empty());
        assert!(dominant_colors(&RgbImage::new(0, 0), 0).is_empty());
    }

    #[test]
    fn test_empty_image_is_gray() {
        let img = RgbImage::new(0, 0);
        assert_eq!(dominant_colors(&img, 5), vec![Rgb::NEUTRAL_GRAY]);
    }

    #[test]
    fn test_flatten_blends_against_background() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        let flat = flatten(&DynamicImage::ImageRgba8(img), Rgb::WHITE);
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);

        let half = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 128]));
        let flat = flatten(&DynamicImage::ImageRgba8(half), Rgb::WHITE);
        assert_eq!(flat.get_pixel(0, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        assert_eq!(fit_within(300, 150, 150, 150), (150, 75));
        assert_eq!(fit_within(100, 400, 150, 150), (38, 150));
        assert_eq!(fit_within(50, 40, 150, 150), (50, 40));
    }
}
