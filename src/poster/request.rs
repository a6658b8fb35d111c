//! Poster requests and their translation into a [`CanvasSpec`].

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::copy::{self, PosterCopy};
use super::{CanvasSpec, DEFAULT_HEIGHT, DEFAULT_WIDTH, LayoutMetrics, TextBlock, TextRole};
use crate::analyze::{AnalyzedImage, brightness, colors};
use crate::color::Rgb;
use crate::contrast::{TextColors, accent_color, choose_text_color, text_color_on};
use crate::error::{MarqueeError, Result};
use crate::text::Alignment;
use crate::theme::{ThemeSpec, theme_for};

/// Accepted canvas side lengths, in pixels.
pub const MIN_SIDE: u32 = 200;
pub const MAX_SIDE: u32 = 4096;

/// A poster to make. Every field is optional; missing copy falls back to
/// text derived from `title`, `event_name` and `menu_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PosterRequest {
    pub title: Option<String>,
    /// Theme key (`food`, `store`, `event`, or their Korean names).
    pub category: Option<String>,
    pub menu_name: Option<String>,
    pub event_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Shown as the footer.
    pub store_name: Option<String>,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub body: Option<String>,
    /// Body text alignment; other blocks are always centered.
    pub body_align: Option<Alignment>,
    pub cta: Option<String>,
    /// Labelled copy from a copy writer, see [`copy::GeneratedCopy`].
    pub generated_copy: Option<String>,
    /// Photos to download and place, in order.
    pub image_urls: Vec<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PosterRequest {
    /// Canvas size after defaults, rejecting sizes outside
    /// [`MIN_SIDE`]..=[`MAX_SIDE`].
    pub fn canvas_size(&self) -> Result<(u32, u32)> {
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        let height = self.height.unwrap_or(DEFAULT_HEIGHT);
        for (name, side) in [("width", width), ("height", height)] {
            if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
                return Err(MarqueeError::Config(format!(
                    "Canvas {} {} outside {}..={}",
                    name, side, MIN_SIDE, MAX_SIDE
                )));
            }
        }
        Ok((width, height))
    }

    pub fn theme(&self) -> ThemeSpec {
        theme_for(self.category.as_deref().unwrap_or_default())
    }
}

/// Brightness the poster text sits on: the top and bottom strips of the
/// background photo, or the theme fill.
pub fn backdrop_brightness(theme: &ThemeSpec, background: Option<&DynamicImage>) -> f32 {
    match background {
        Some(photo) => brightness::measure(&colors::flatten(photo, Rgb::WHITE)).text_regions(),
        None => theme.background_color.luma(),
    }
}

/// Lay resolved copy out as text blocks for a canvas.
pub fn copy_blocks(
    copy: &PosterCopy,
    width: u32,
    metrics: &LayoutMetrics,
    text: TextColors,
    cta_fill: Rgb,
    body_align: Alignment,
) -> Vec<TextBlock> {
    let text_width = width.saturating_sub(metrics.body_margin).max(1);
    let mut blocks = vec![
        TextBlock::new(TextRole::Headline, &copy.headline, text_width, text.foreground)
            .shadow(text.shadow),
    ];
    if !copy.subheadline.trim().is_empty() {
        blocks.push(
            TextBlock::new(TextRole::Subheadline, &copy.subheadline, text_width, text.foreground)
                .shadow(text.shadow),
        );
    }
    if let Some(body) = &copy.body {
        blocks.push(
            TextBlock::new(TextRole::Body, body, text_width, text.foreground)
                .shadow(text.shadow)
                .align(body_align),
        );
    }
    if !copy.cta.trim().is_empty() {
        blocks.push(TextBlock::new(
            TextRole::Cta,
            &copy.cta,
            text_width,
            text_color_on(cta_fill).foreground,
        ));
    }
    if let Some(footer) = &copy.footer {
        blocks.push(TextBlock::new(TextRole::Caption, footer, text_width, text.foreground));
    }
    blocks
}

/// Build the canvas for a request from analysed photos and an optional
/// background photo.
pub fn build_spec(
    request: &PosterRequest,
    images: Vec<AnalyzedImage>,
    background: Option<DynamicImage>,
) -> Result<CanvasSpec> {
    let (width, height) = request.canvas_size()?;
    let theme = request.theme();
    let metrics = LayoutMetrics::for_canvas(width, height);

    let resolved = copy::resolve(request);
    tracing::debug!(provider = %resolved.provider, "poster copy resolved");

    let text = choose_text_color(backdrop_brightness(&theme, background.as_ref()));
    let mut spec = CanvasSpec::new(width, height, theme);
    spec.text_blocks = copy_blocks(
        &resolved.value,
        width,
        &metrics,
        text,
        theme.primary_color,
        request.body_align.unwrap_or_default(),
    );
    spec.period = resolved.value.period;
    spec.period_color = accent_color(theme.secondary_color, text);
    spec.images = images;
    spec.background = background;
    Ok(spec)
}
