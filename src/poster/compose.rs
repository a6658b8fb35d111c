//! Poster rendering.

use image::{DynamicImage, RgbaImage, imageops, imageops::FilterType};
use serde::Serialize;

use super::encode::OutputFormat;
use super::grid::plan_grid;
use super::shapes::fill_rounded_rect;
use super::{CanvasSpec, LayoutMetrics, Rect, TextBlock, TextRole};
use crate::contrast::TextColors;
use crate::error::Result;
use crate::text::draw::{draw_text, draw_text_with_shadow};
use crate::text::layout::{ellipsize, truncate_to_fit};
use crate::text::{Alignment, Font, Typeface, anchor_origin, wrap};

/// What a placed element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Headline,
    Subheadline,
    Image,
    Body,
    Period,
    CtaButton,
    CtaText,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedElement {
    pub kind: ElementKind,
    pub rect: Rect,
}

/// Where everything ended up on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterLayout {
    pub width: u32,
    pub height: u32,
    pub elements: Vec<PlacedElement>,
    /// Photos left out because of the grid cap.
    pub dropped_images: usize,
    /// True when any text was shortened or skipped to stay clear of the
    /// call-to-action button.
    pub abbreviated: bool,
}

impl PosterLayout {
    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Rect> {
        self.elements
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| &e.rect)
    }

    fn place(&mut self, kind: ElementKind, rect: Rect) {
        self.elements.push(PlacedElement { kind, rect });
    }
}

/// An encoded poster.
#[derive(Debug, Clone)]
pub struct ComposedPoster {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub layout: PosterLayout,
}

/// Renders [`CanvasSpec`]s with one typeface into one output format.
#[derive(Debug, Clone)]
pub struct Composer {
    typeface: Typeface,
    format: OutputFormat,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(Typeface::Builtin, OutputFormat::Png)
    }
}

impl Composer {
    pub fn new(typeface: Typeface, format: OutputFormat) -> Self {
        Self { typeface, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn font(&self, metrics: &LayoutMetrics, role: TextRole) -> Font {
        self.typeface.at(metrics.font_px(role))
    }

    /// Render and encode a poster.
    pub fn compose(&self, spec: &CanvasSpec) -> Result<ComposedPoster> {
        let (canvas, layout) = self.render(spec);
        let bytes = self.format.encode(&canvas)?;
        tracing::info!(
            width = spec.width,
            height = spec.height,
            elements = layout.elements.len(),
            bytes = bytes.len(),
            "poster composed"
        );
        Ok(ComposedPoster {
            bytes,
            mime: self.format.mime(),
            layout,
        })
    }

    /// Render a poster onto an RGBA canvas.
    pub fn render(&self, spec: &CanvasSpec) -> (RgbaImage, PosterLayout) {
        let metrics = LayoutMetrics::for_canvas(spec.width, spec.height);
        let mut canvas = backdrop(spec);
        let mut layout = PosterLayout {
            width: spec.width,
            height: spec.height,
            ..Default::default()
        };

        let cta_top = spec.height as i32 - metrics.cta_bottom_offset as i32;
        let mut y = metrics.top_margin as i32;

        // Headline and subheadline
        for (role, kind) in [
            (TextRole::Headline, ElementKind::Headline),
            (TextRole::Subheadline, ElementKind::Subheadline),
        ] {
            let font = self.font(&metrics, role);
            for block in spec.blocks(role) {
                let limit = block.max_width.saturating_sub(metrics.headline_reserve).max(1);
                let content = truncate_to_fit(&block.content, &font, limit);
                if content != block.content {
                    layout.abbreviated = true;
                }
                for line in wrap(&content, &font, block.max_width) {
                    let rect = draw_line(&mut canvas, &line, &font, block, spec.width, y, &metrics);
                    layout.place(kind, rect);
                    y += metrics.line_advance(role) as i32;
                }
            }
        }

        // Photos
        let sizes: Vec<(u32, u32)> = spec
            .images
            .iter()
            .map(|img| (img.pixels.width(), img.pixels.height()))
            .collect();
        let grid = plan_grid(&sizes, spec.width, y, &metrics);
        if grid.dropped > 0 {
            tracing::warn!(
                dropped = grid.dropped,
                placed = grid.rects.len(),
                "too many photos for the poster grid"
            );
        }
        for (image, rect) in spec.images.iter().zip(&grid.rects) {
            place_photo(&mut canvas, &image.pixels, *rect);
            layout.place(ElementKind::Image, *rect);
        }
        layout.dropped_images = grid.dropped;
        y += grid.advance(&metrics) as i32;

        // Body, kept clear of the button
        let body_font = self.font(&metrics, TextRole::Body);
        let line_h = metrics.body_line as i32;
        for block in spec.blocks(TextRole::Body) {
            let mut lines = wrap(&block.content, &body_font, block.max_width);
            if lines.is_empty() {
                continue;
            }
            let room = ((cta_top - y).max(0) / line_h) as usize;
            if lines.len() > room {
                lines.truncate(room);
                if let Some(last) = lines.last_mut() {
                    *last = ellipsize(last, &body_font, block.max_width);
                }
                layout.abbreviated = true;
                tracing::debug!(kept = room, "body text abbreviated");
            }
            for line in &lines {
                let rect = draw_line(&mut canvas, line, &body_font, block, spec.width, y, &metrics);
                layout.place(ElementKind::Body, rect);
                y += line_h;
            }
            y += metrics.body_trailing as i32;
        }

        // Period line
        if let Some(period) = spec.period.as_deref().filter(|p| !p.trim().is_empty()) {
            if y + metrics.period_advance as i32 <= cta_top {
                let font = self.font(&metrics, TextRole::Caption);
                let block = TextBlock::new(
                    TextRole::Caption,
                    period,
                    spec.width,
                    spec.period_color,
                );
                let rect = draw_line(&mut canvas, period, &font, &block, spec.width, y, &metrics);
                layout.place(ElementKind::Period, rect);
            } else {
                layout.abbreviated = true;
                tracing::debug!("no room for the period line");
            }
        }

        // Call to action, anchored to the bottom
        if let Some(block) = spec.blocks(TextRole::Cta).next() {
            let font = self.font(&metrics, TextRole::Cta);
            let text = truncate_to_fit(
                &block.content,
                &font,
                spec.width.saturating_sub(metrics.cta_pad_x).max(1),
            );
            let (tw, th) = font.measure(&text);
            let (bw, bh) = (
                (tw + metrics.cta_pad_x).min(spec.width),
                th + metrics.cta_pad_y,
            );
            let button = Rect::new((spec.width as i32 - bw as i32) / 2, cta_top, bw, bh);
            fill_rounded_rect(&mut canvas, button, metrics.cta_radius, spec.theme.primary_color);
            layout.place(ElementKind::CtaButton, button);

            let tx = button.x + (bw as i32 - tw as i32) / 2;
            let ty = button.y + (bh as i32 - th as i32) / 2;
            draw_text(&mut canvas, &text, &font, tx, ty, block.color);
            layout.place(ElementKind::CtaText, Rect::new(tx, ty, tw, th));
        }

        // Footer
        let footer_y = spec.height as i32 - metrics.footer_bottom_offset as i32;
        let footer_font = self.font(&metrics, TextRole::Caption);
        for block in spec.blocks(TextRole::Caption) {
            let text = truncate_to_fit(&block.content, &footer_font, block.max_width);
            let rect = draw_line(&mut canvas, &text, &footer_font, block, spec.width, footer_y, &metrics);
            layout.place(ElementKind::Footer, rect);
        }

        (canvas, layout)
    }
}

/// Theme fill, with the background photo cover-scaled on top if present.
fn backdrop(spec: &CanvasSpec) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(spec.width, spec.height, spec.theme.background_color.to_rgba());
    if let Some(photo) = &spec.background {
        let cover = photo
            .resize_to_fill(spec.width, spec.height, FilterType::Triangle)
            .to_rgba8();
        imageops::overlay(&mut canvas, &cover, 0, 0);
    }
    canvas
}

fn place_photo(canvas: &mut RgbaImage, photo: &DynamicImage, rect: Rect) {
    let thumb = if photo.width() == rect.width && photo.height() == rect.height {
        photo.to_rgba8()
    } else {
        photo
            .resize_exact(rect.width, rect.height, FilterType::Triangle)
            .to_rgba8()
    };
    imageops::overlay(canvas, &thumb, rect.x as i64, rect.y as i64);
}

/// Draw one line of a block at cursor `y` and return its box.
fn draw_line(
    canvas: &mut RgbaImage,
    line: &str,
    font: &Font,
    block: &TextBlock,
    canvas_width: u32,
    y: i32,
    metrics: &LayoutMetrics,
) -> Rect {
    let anchor_x = match block.alignment {
        Alignment::Center => canvas_width as i32 / 2,
        Alignment::Left => (canvas_width.saturating_sub(block.max_width) / 2) as i32,
    };
    let (x, y) = anchor_origin(line, font, anchor_x, y, block.alignment);
    match block.shadow_color {
        Some(shadow) => draw_text_with_shadow(
            canvas,
            line,
            font,
            x,
            y,
            TextColors {
                foreground: block.color,
                shadow,
            },
            metrics.shadow_offset,
        ),
        None => draw_text(canvas, line, font, x, y, block.color),
    }
    let (w, h) = font.measure(line);
    Rect::new(x, y, w, h)
}
