//! # Poster Composition
//!
//! Builds a promotional poster from text blocks, photo thumbnails and a
//! color theme. Layout runs top to bottom with a running `y` cursor:
//!
//! ```text
//! ┌──────────────────────────────┐  ← top margin (80)
//! │          HEADLINE            │  +100 per line
//! │         subheadline          │  +80 per line
//! │   ┌──────┐      ┌──────┐     │
//! │   │ img  │  20  │ img  │     │  image grid (max 4), then +50
//! │   └──────┘      └──────┘     │
//! │   body text, wrapped to      │  +40 per line, then +30
//! │   width − 100                │
//! │       2025.06.01 ~ 06.30     │  period line, +50
//! │                              │
//! │        ╭────────────╮        │  ← CTA button, 150 from bottom
//! │        │  지금 방문!  │        │
//! │        ╰────────────╯        │
//! │          store name          │  ← footer, 50 from bottom
//! └──────────────────────────────┘
//! ```
//!
//! All distances are for the default 1080×1350 canvas and scale with
//! [`LayoutMetrics::for_canvas`]. The CTA button and footer are positioned
//! relative to the canvas bottom, not the cursor; body text that would run
//! into the button is abbreviated rather than drawn over it.

pub mod compose;
pub mod copy;
pub mod encode;
pub mod grid;
pub mod request;
pub mod shapes;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::analyze::AnalyzedImage;
use crate::color::Rgb;
use crate::text::Alignment;
use crate::theme::ThemeSpec;

pub use compose::{ComposedPoster, Composer};
pub use encode::OutputFormat;
pub use request::PosterRequest;

/// Default canvas size (4:5 portrait, the common social feed format).
pub const DEFAULT_WIDTH: u32 = 1080;
pub const DEFAULT_HEIGHT: u32 = 1350;

/// Maximum number of photos placed on a poster; extras are dropped.
pub const MAX_IMAGES: usize = 4;

/// What a text block is for. Determines font size and line advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Headline,
    Subheadline,
    Body,
    Cta,
    /// Small footer text such as the store name.
    Caption,
}

/// A run of text to place on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub role: TextRole,
    pub content: String,
    /// Wrap width in pixels.
    pub max_width: u32,
    pub color: Rgb,
    pub shadow_color: Option<Rgb>,
    pub alignment: Alignment,
}

impl TextBlock {
    pub fn new(role: TextRole, content: impl Into<String>, max_width: u32, color: Rgb) -> Self {
        Self {
            role,
            content: content.into(),
            max_width,
            color,
            shadow_color: None,
            alignment: Alignment::Center,
        }
    }

    pub fn shadow(mut self, shadow: Rgb) -> Self {
        self.shadow_color = Some(shadow);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Everything needed to render one poster.
#[derive(Debug, Clone)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub theme: ThemeSpec,
    pub text_blocks: Vec<TextBlock>,
    /// Photos to place, in order. Only the first [`MAX_IMAGES`] are used.
    pub images: Vec<AnalyzedImage>,
    /// Pre-formatted period line (e.g. `2025.06.01 ~ 2025.06.30`).
    pub period: Option<String>,
    pub period_color: Rgb,
    /// Photo cover-scaled behind everything instead of the theme fill.
    pub background: Option<DynamicImage>,
}

impl CanvasSpec {
    pub fn new(width: u32, height: u32, theme: ThemeSpec) -> Self {
        Self {
            width,
            height,
            theme,
            text_blocks: Vec::new(),
            images: Vec::new(),
            period: None,
            period_color: theme.secondary_color,
            background: None,
        }
    }

    pub fn block(mut self, block: TextBlock) -> Self {
        self.text_blocks.push(block);
        self
    }

    pub fn image(mut self, image: AnalyzedImage) -> Self {
        self.images.push(image);
        self
    }

    pub fn blocks(&self, role: TextRole) -> impl Iterator<Item = &TextBlock> {
        self.text_blocks.iter().filter(move |b| b.role == role)
    }
}

/// Layout distances for a canvas size. Field values are pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub scale: f32,
    pub top_margin: u32,
    pub headline_advance: u32,
    pub subheadline_advance: u32,
    /// Thumbnails fit within `thumb_box × thumb_box`.
    pub thumb_box: u32,
    pub gutter: u32,
    /// Row height of the 3–4 image grid.
    pub grid_row: u32,
    pub grid_trailing: u32,
    /// Total horizontal margin subtracted from the canvas width for body text.
    pub body_margin: u32,
    pub body_line: u32,
    pub body_trailing: u32,
    pub period_advance: u32,
    /// Space kept free of ink at the right of a truncated headline.
    pub headline_reserve: u32,
    pub cta_bottom_offset: u32,
    pub cta_pad_x: u32,
    pub cta_pad_y: u32,
    pub cta_radius: u32,
    pub footer_bottom_offset: u32,
    pub shadow_offset: i32,
}

impl LayoutMetrics {
    /// Metrics for a canvas, scaled from the 1080×1350 defaults.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let scale = (width as f32 / DEFAULT_WIDTH as f32).min(height as f32 / DEFAULT_HEIGHT as f32);
        let s = |v: u32| ((v as f32 * scale).round() as u32).max(1);
        Self {
            scale,
            top_margin: s(80),
            headline_advance: s(100),
            subheadline_advance: s(80),
            thumb_box: s(400),
            gutter: s(20),
            grid_row: s(200),
            grid_trailing: s(50),
            body_margin: s(100),
            body_line: s(40),
            body_trailing: s(30),
            period_advance: s(50),
            headline_reserve: s(40),
            cta_bottom_offset: s(150),
            cta_pad_x: s(60),
            cta_pad_y: s(30),
            cta_radius: s(25),
            footer_bottom_offset: s(50),
            shadow_offset: (crate::text::draw::SHADOW_OFFSET as f32 * scale).round().max(1.0) as i32,
        }
    }

    /// Font pixel size for a role.
    pub fn font_px(&self, role: TextRole) -> f32 {
        let base = match role {
            TextRole::Headline => 72.0,
            TextRole::Subheadline => 48.0,
            TextRole::Body => 32.0,
            TextRole::Cta => 40.0,
            TextRole::Caption => 28.0,
        };
        base * self.scale
    }

    /// Cursor advance per line for the flowing roles.
    pub fn line_advance(&self, role: TextRole) -> u32 {
        match role {
            TextRole::Headline => self.headline_advance,
            TextRole::Subheadline => self.subheadline_advance,
            TextRole::Body => self.body_line,
            TextRole::Cta | TextRole::Caption => self.period_advance,
        }
    }
}

/// Axis-aligned box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_are_unscaled() {
        let m = LayoutMetrics::for_canvas(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(m.scale, 1.0);
        assert_eq!(m.headline_advance, 100);
        assert_eq!(m.subheadline_advance, 80);
        assert_eq!(m.cta_bottom_offset, 150);
        assert_eq!(m.font_px(TextRole::Headline), 72.0);
    }

    #[test]
    fn test_metrics_scale_with_smaller_side() {
        let m = LayoutMetrics::for_canvas(540, 1350);
        assert_eq!(m.scale, 0.5);
        assert_eq!(m.headline_advance, 50);
        assert_eq!(m.thumb_box, 200);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    }
}
