//! Drawing text onto RGBA canvases.

use image::{Rgba, RgbaImage};

use super::font::{Coverage, Font};
use crate::color::Rgb;
use crate::contrast::TextColors;

/// Offset of the drop shadow, in pixels at the default canvas size.
pub const SHADOW_OFFSET: i32 = 2;

/// Alpha-blend `color` over `base` with the given coverage (0.0..=1.0).
#[inline]
pub fn blend_pixel(base: &mut Rgba<u8>, color: Rgb, coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    let a = coverage.min(1.0);
    let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
    base[0] = mix(color.0, base[0]);
    base[1] = mix(color.1, base[1]);
    base[2] = mix(color.2, base[2]);
    base[3] = 255;
}

/// Blend a coverage mask onto the canvas with its top-left at `(x, y)`.
/// Pixels outside the canvas are clipped.
pub fn draw_coverage(canvas: &mut RgbaImage, cov: &Coverage, x: i32, y: i32, color: Rgb) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    for gy in 0..cov.height {
        let py = y + gy as i32;
        if py < 0 || py >= ch {
            continue;
        }
        for gx in 0..cov.width {
            let px = x + gx as i32;
            if px < 0 || px >= cw {
                continue;
            }
            let c = cov.get(gx, gy);
            if c > 0.0 {
                blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), color, c);
            }
        }
    }
}

/// Draw one line of text with its top-left at `(x, y)`.
pub fn draw_text(canvas: &mut RgbaImage, text: &str, font: &Font, x: i32, y: i32, color: Rgb) {
    if text.is_empty() {
        return;
    }
    let cov = font.rasterize(text);
    draw_coverage(canvas, &cov, x, y, color);
}

/// Draw one line of text over a drop shadow offset down and right.
pub fn draw_text_with_shadow(
    canvas: &mut RgbaImage,
    text: &str,
    font: &Font,
    x: i32,
    y: i32,
    colors: TextColors,
    offset: i32,
) {
    if text.is_empty() {
        return;
    }
    let cov = font.rasterize(text);
    if offset > 0 {
        draw_coverage(canvas, &cov, x + offset, y + offset, colors.shadow);
    }
    draw_coverage(canvas, &cov, x, y, colors.foreground);
}
