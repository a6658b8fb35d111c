//! Filled shapes.

use image::RgbaImage;

use super::Rect;
use crate::color::Rgb;
use crate::text::draw::blend_pixel;

/// Coverage of pixel `(px, py)` by a rounded rectangle, with a one-pixel
/// anti-aliased edge at the corners.
fn rounded_coverage(rect: &Rect, radius: f32, px: i32, py: i32) -> f32 {
    let (x0, y0) = (rect.x as f32, rect.y as f32);
    let (x1, y1) = (rect.right() as f32, rect.bottom() as f32);
    // pixel center
    let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);

    // nearest point of the inner (radius-shrunk) rectangle
    let nx = cx.clamp(x0 + radius, x1 - radius);
    let ny = cy.clamp(y0 + radius, y1 - radius);
    let dist = ((cx - nx).powi(2) + (cy - ny).powi(2)).sqrt();
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}

/// Fill a rectangle with rounded corners. The radius is clamped to half the
/// shorter side. Parts outside the canvas are clipped.
pub fn fill_rounded_rect(canvas: &mut RgbaImage, rect: Rect, radius: u32, color: Rgb) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let radius = radius.min(rect.width / 2).min(rect.height / 2) as f32;
    let y_range = rect.y.max(0)..rect.bottom().min(canvas.height() as i32);
    let x_range = rect.x.max(0)..rect.right().min(canvas.width() as i32);

    for py in y_range {
        for px in x_range.clone() {
            let c = rounded_coverage(&rect, radius, px, py);
            if c > 0.0 {
                blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), color, c);
            }
        }
    }
}
