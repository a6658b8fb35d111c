//! Photo placement on the poster.
//!
//! | Photos | Arrangement |
//! |--------|-------------|
//! | 1      | centered, fitted in the thumbnail box |
//! | 2      | side by side with a gutter, centered as a pair |
//! | 3–4    | fixed two-column grid of `thumb_box × grid_row` cells |
//!
//! Photos beyond [`MAX_IMAGES`](super::MAX_IMAGES) are dropped, never
//! overflowed. Thumbnails keep their aspect ratio and are never upscaled.

use super::{LayoutMetrics, MAX_IMAGES, Rect};
use crate::analyze::colors::fit_within;

/// Where each photo goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlan {
    /// One box per placed photo, in input order.
    pub rects: Vec<Rect>,
    /// Height of the placed block (0 when nothing is placed).
    pub height: u32,
    /// Photos that did not fit the cap.
    pub dropped: usize,
}

impl GridPlan {
    /// Cursor advance after the block, including the trailing margin.
    pub fn advance(&self, metrics: &LayoutMetrics) -> u32 {
        if self.rects.is_empty() {
            0
        } else {
            self.height + metrics.grid_trailing
        }
    }
}

/// Plan placement for photos of the given pixel sizes, starting at `top`.
pub fn plan_grid(
    sizes: &[(u32, u32)],
    canvas_width: u32,
    top: i32,
    metrics: &LayoutMetrics,
) -> GridPlan {
    let dropped = sizes.len().saturating_sub(MAX_IMAGES);
    let sizes = &sizes[..sizes.len().min(MAX_IMAGES)];
    let boxed = |&(w, h): &(u32, u32)| fit_within(w, h, metrics.thumb_box, metrics.thumb_box);
    let cw = canvas_width as i32;

    let (rects, height) = match sizes.len() {
        0 => (Vec::new(), 0),
        1 => {
            let (w, h) = boxed(&sizes[0]);
            (vec![Rect::new((cw - w as i32) / 2, top, w, h)], h)
        }
        2 => {
            let (w1, h1) = boxed(&sizes[0]);
            let (w2, h2) = boxed(&sizes[1]);
            let total = (w1 + metrics.gutter + w2) as i32;
            let x0 = (cw - total) / 2;
            let x1 = x0 + (w1 + metrics.gutter) as i32;
            (
                vec![Rect::new(x0, top, w1, h1), Rect::new(x1, top, w2, h2)],
                h1.max(h2),
            )
        }
        n => {
            let cell_w = metrics.thumb_box;
            let cell_h = metrics.grid_row;
            let grid_w = (2 * cell_w + metrics.gutter) as i32;
            let x0 = (cw - grid_w) / 2;
            let rects = sizes
                .iter()
                .enumerate()
                .map(|(i, &(w, h))| {
                    let (col, row) = ((i % 2) as i32, (i / 2) as i32);
                    let cell_x = x0 + col * (cell_w + metrics.gutter) as i32;
                    let cell_y = top + row * (cell_h + metrics.gutter) as i32;
                    let (fw, fh) = fit_within(w, h, cell_w, cell_h);
                    Rect::new(
                        cell_x + (cell_w - fw) as i32 / 2,
                        cell_y + (cell_h - fh) as i32 / 2,
                        fw,
                        fh,
                    )
                })
                .collect();
            let rows = n.div_ceil(2) as u32;
            (rects, rows * cell_h + (rows - 1) * metrics.gutter)
        }
    };

    GridPlan {
        rects,
        height,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

    fn metrics() -> LayoutMetrics {
        LayoutMetrics::for_canvas(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    #[test]
    fn test_single_centered() {
        let plan = plan_grid(&[(800, 400)], 1080, 300, &metrics());
        assert_eq!(plan.rects, vec![Rect::new(340, 300, 400, 200)]);
        assert_eq!(plan.height, 200);
        assert_eq!(plan.advance(&metrics()), 250);
    }

    #[test]
    fn test_pair_with_gutter() {
        let plan = plan_grid(&[(400, 400), (400, 300)], 1080, 0, &metrics());
        // 400 + 20 + 400 = 820 wide, (1080 - 820) / 2 = 130
        assert_eq!(plan.rects[0], Rect::new(130, 0, 400, 400));
        assert_eq!(plan.rects[1], Rect::new(550, 0, 400, 300));
        assert_eq!(plan.height, 400);
    }

    #[test]
    fn test_grid_caps_at_four() {
        let sizes = vec![(1000u32, 500u32); 5];
        let plan = plan_grid(&sizes, 1080, 100, &metrics());
        assert_eq!(plan.rects.len(), 4);
        assert_eq!(plan.dropped, 1);
        // two rows of 200 plus one gutter
        assert_eq!(plan.height, 420);
        assert_eq!(plan.rects[0], Rect::new(130, 100, 400, 200));
        assert_eq!(plan.rects[1], Rect::new(550, 100, 400, 200));
        assert_eq!(plan.rects[2].y, 320);
        assert_eq!(plan.rects[3].x, 550);
    }

    #[test]
    fn test_grid_cells_center_narrow_photos() {
        let plan = plan_grid(&[(100u32, 200u32); 3], 1080, 0, &metrics());
        // 100x200 fits a 400x200 cell unscaled, centered horizontally
        assert_eq!(plan.rects[0], Rect::new(280, 0, 100, 200));
        assert_eq!(plan.rects[2].y, 220);
    }

    #[test]
    fn test_empty() {
        let plan = plan_grid(&[], 1080, 0, &metrics());
        assert!(plan.rects.is_empty());
        assert_eq!(plan.advance(&metrics()), 0);
    }
}
