//! Font loading and glyph rasterization.
//!
//! Two typefaces are supported:
//!
//! - **Outline**: a TTF/OTF file loaded at runtime and rendered with
//!   `ab_glyph`, giving anti-aliased coverage.
//! - **Builtin**: the Spleen 12×24 bitmap font compiled into the binary,
//!   scaled with nearest-neighbor. Used when no font file is configured or
//!   the file cannot be loaded, so composition never fails on fonts.
//!
//! Both produce a [`Coverage`] buffer (0.0 = empty, 1.0 = fully inked) whose
//! dimensions match [`Font::measure`] exactly.

use ab_glyph::{Font as _, FontArc, ScaleFont as _};
use spleen_font::{FONT_12X24, PSF2Font};
use std::path::Path;

use crate::error::{MarqueeError, Result};

/// Native cell size of the builtin bitmap font.
const BUILTIN_CELL_W: usize = 12;
const BUILTIN_CELL_H: usize = 24;

/// A typeface, independent of size.
#[derive(Clone)]
pub enum Typeface {
    Outline(FontArc),
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::Outline(_) => f.write_str("Typeface::Outline"),
            Typeface::Builtin => f.write_str("Typeface::Builtin"),
        }
    }
}

impl Typeface {
    /// Load an outline font from disk.
    pub fn load(path: &Path) -> Result<Typeface> {
        let bytes = std::fs::read(path).map_err(|e| {
            MarqueeError::FontLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Typeface::from_bytes(bytes)
    }

    /// Parse an outline font from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Typeface> {
        FontArc::try_from_vec(bytes)
            .map(Typeface::Outline)
            .map_err(|e| MarqueeError::FontLoad(format!("Invalid font data: {}", e)))
    }

    /// Load the configured font, or fall back to the builtin bitmap font.
    pub fn load_or_builtin(path: Option<&Path>) -> Typeface {
        let Some(path) = path else {
            return Typeface::Builtin;
        };
        match Typeface::load(path) {
            Ok(face) => {
                tracing::info!(font = %path.display(), "loaded outline font");
                face
            }
            Err(e) => {
                tracing::warn!(error = %e, "falling back to builtin font");
                Typeface::Builtin
            }
        }
    }

    /// This typeface at a pixel size.
    pub fn at(&self, px: f32) -> Font {
        Font {
            face: self.clone(),
            px: px.max(1.0),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }
}

/// Glyph coverage for a rendered line of text.
#[derive(Debug, Clone)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    /// Row-major, 0.0 (empty) to 1.0 (inked).
    pub data: Vec<f32>,
}

impl Coverage {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

/// A typeface at a specific pixel size.
#[derive(Debug, Clone)]
pub struct Font {
    face: Typeface,
    px: f32,
}

impl Font {
    fn builtin_cell(&self) -> (usize, usize) {
        let scale = self.px / BUILTIN_CELL_H as f32;
        let w = ((BUILTIN_CELL_W as f32 * scale).round() as usize).max(1);
        let h = (self.px.round() as usize).max(1);
        (w, h)
    }

    /// Pixel size of the box `text` renders into.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match &self.face {
            Typeface::Outline(font) => {
                let scaled = font.as_scaled(self.px);
                let mut caret = 0.0f32;
                let mut prev = None;
                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    caret += scaled.h_advance(id);
                    prev = Some(id);
                }
                let height = (scaled.ascent() - scaled.descent()).ceil().max(1.0);
                (caret.ceil().max(0.0) as u32, height as u32)
            }
            Typeface::Builtin => {
                let (cw, ch) = self.builtin_cell();
                ((text.chars().count() * cw) as u32, ch as u32)
            }
        }
    }

    /// Rasterize a single line of text.
    pub fn rasterize(&self, text: &str) -> Coverage {
        match &self.face {
            Typeface::Outline(font) => self.rasterize_outline(font, text),
            Typeface::Builtin => self.rasterize_builtin(text),
        }
    }

    fn rasterize_outline(&self, font: &FontArc, text: &str) -> Coverage {
        let (w, h) = self.measure(text);
        let (width, height) = (w.max(1) as usize, h.max(1) as usize);
        let scaled = font.as_scaled(self.px);
        let baseline = scaled.ascent();

        let mut out = Coverage::blank(width, height);
        let mut caret = 0.0f32;
        let mut prev = None;

        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(self.px, ab_glyph::point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, c| {
                let x = gx as i32 + bounds.min.x as i32;
                let y = gy as i32 + bounds.min.y as i32;
                if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                    let idx = y as usize * width + x as usize;
                    out.data[idx] = (out.data[idx] + c).min(1.0);
                }
            });
        }

        out
    }

    fn rasterize_builtin(&self, text: &str) -> Coverage {
        let (cw, ch) = self.builtin_cell();
        let count = text.chars().count();
        let mut out = Coverage::blank((count * cw).max(1), ch);

        let mut spleen = PSF2Font::new(FONT_12X24).ok();
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let cell = builtin_glyph(spleen.as_mut(), c);
            let origin_x = i * cw;
            for dy in 0..ch {
                for dx in 0..cw {
                    let sx = dx * BUILTIN_CELL_W / cw;
                    let sy = dy * BUILTIN_CELL_H / ch;
                    if cell[sy * BUILTIN_CELL_W + sx] {
                        out.data[dy * out.width + origin_x + dx] = 1.0;
                    }
                }
            }
        }

        out
    }
}

/// 12×24 bitmap for `c`; an outlined box when the font lacks the glyph.
fn builtin_glyph(font: Option<&mut PSF2Font>, c: char) -> Vec<bool> {
    let mut cell = vec![false; BUILTIN_CELL_W * BUILTIN_CELL_H];
    let utf8 = c.to_string();

    if let Some(glyph) = font.and_then(|f| f.glyph_for_utf8(utf8.as_bytes())) {
        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < BUILTIN_CELL_H && col_x < BUILTIN_CELL_W {
                    cell[row_y * BUILTIN_CELL_W + col_x] = on;
                }
            }
        }
        return cell;
    }

    // Missing glyph (e.g. Hangul): draw a box inset by two pixels
    let (x0, x1, y0, y1) = (2, BUILTIN_CELL_W - 3, 4, BUILTIN_CELL_H - 5);
    for x in x0..=x1 {
        cell[y0 * BUILTIN_CELL_W + x] = true;
        cell[y1 * BUILTIN_CELL_W + x] = true;
    }
    for y in y0..=y1 {
        cell[y * BUILTIN_CELL_W + x0] = true;
        cell[y * BUILTIN_CELL_W + x1] = true;
    }
    cell
}
