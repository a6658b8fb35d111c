//! # Image Analysis
//!
//! Turns raw image bytes into an [`ImageRecord`]: dimensions, aspect ratio,
//! dominant colors, region brightness and a coarse content category.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ──▶ decode ──▶ flatten onto white ──┬──▶ brightness (whole / top / bottom)
//!                                           └──▶ shrink to 150×150 ──▶ histogram ──▶ dominant colors
//!                                                                                        │
//!                                   caption (optional) ──────────────────────────────▶ category
//! ```
//!
//! Analysis is a pure function of its input. Batches are analysed in parallel
//! and one bad image never prevents the others from being analysed.

pub mod brightness;
pub mod category;
pub mod colors;

use image::{DynamicImage, ImageFormat};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{MarqueeError, Result};

pub use brightness::Brightness;
pub use category::{Category, CategorySource};

/// Images whose sides differ by less than this many pixels count as square.
const SQUARE_TOLERANCE: u32 = 50;

/// Coarse orientation of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub fn of(width: u32, height: u32) -> Orientation {
        if width.abs_diff(height) < SQUARE_TOLERANCE {
            Orientation::Square
        } else if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Analysis result for one image. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Opaque identifier of the image (URL, path or upload name).
    pub source_ref: String,
    pub width: u32,
    pub height: u32,
    /// `width / height` rounded to two decimals.
    pub aspect_ratio: f64,
    /// Detected container format (`PNG`, `JPEG`, `WEBP`, `GIF`).
    pub format: String,
    pub orientation: Orientation,
    /// Most frequent colors first.
    pub dominant_colors: Vec<Rgb>,
    pub brightness: Brightness,
    pub category: Category,
    pub category_source: CategorySource,
    /// Caption the category was derived from, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub caption: Option<String>,
}

/// One image to analyse.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub source_ref: String,
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
}

impl ImageInput {
    pub fn new(source_ref: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source_ref: source_ref.into(),
            bytes,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption;
        self
    }
}

/// An analysed image together with its decoded pixels, for composition.
#[derive(Debug, Clone)]
pub struct AnalyzedImage {
    pub record: ImageRecord,
    pub pixels: DynamicImage,
}

/// Per-image batch result. Failures carry the source they belong to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Analyzed(ImageRecord),
    #[serde(rename_all = "camelCase")]
    Failed { source_ref: String, error: String },
}

impl AnalysisOutcome {
    pub fn record(&self) -> Option<&ImageRecord> {
        match self {
            AnalysisOutcome::Analyzed(r) => Some(r),
            AnalysisOutcome::Failed { .. } => None,
        }
    }
}

/// Image analysis settings.
#[derive(Debug, Clone, Copy)]
pub struct ImageAnalyzer {
    /// Maximum number of dominant colors to report.
    pub color_count: usize,
    /// Side of the box images are shrunk into before color counting.
    pub sample_box: u32,
}

impl Default for ImageAnalyzer {
    fn default() -> Self {
        Self {
            color_count: colors::DEFAULT_COLOR_COUNT,
            sample_box: colors::DEFAULT_SAMPLE_BOX,
        }
    }
}

/// Decode bytes in one of the supported raster formats.
pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat)> {
    let format = image::guess_format(bytes)
        .map_err(|e| MarqueeError::Decode(format!("Unrecognized image data: {}", e)))?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Gif
    ) {
        return Err(MarqueeError::Decode(format!(
            "Unsupported image format: {:?}",
            format
        )));
    }
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| MarqueeError::Decode(format!("Failed to decode image: {}", e)))?;
    Ok((image, format))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl ImageAnalyzer {
    /// Analyse raw bytes with no caption and an empty source reference.
    pub fn analyze(&self, bytes: &[u8]) -> Result<ImageRecord> {
        self.inspect(&ImageInput::new("", bytes.to_vec()))
            .map(|a| a.record)
    }

    /// Analyse one input, keeping the decoded pixels.
    pub fn inspect(&self, input: &ImageInput) -> Result<AnalyzedImage> {
        let (pixels, format) = decode(&input.bytes)?;
        let record = self.analyze_decoded(&input.source_ref, &pixels, format, input.caption.as_deref())?;
        Ok(AnalyzedImage { record, pixels })
    }

    /// Analyse an already-decoded image.
    pub fn analyze_decoded(
        &self,
        source_ref: &str,
        image: &DynamicImage,
        format: ImageFormat,
        caption: Option<&str>,
    ) -> Result<ImageRecord> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(MarqueeError::InvalidImage(format!(
                "{}: degenerate dimensions {}x{}",
                source_ref, width, height
            )));
        }

        let flat = colors::flatten(image, Rgb::WHITE);
        let brightness = brightness::measure(&flat);
        let sample = colors::downsample(&flat, self.sample_box);
        let dominant_colors = colors::dominant_colors(&sample, self.color_count);
        let (category, category_source) = category::classify(caption, &dominant_colors);

        Ok(ImageRecord {
            source_ref: source_ref.to_string(),
            width,
            height,
            aspect_ratio: round2(width as f64 / height as f64),
            format: format!("{:?}", format).to_uppercase(),
            orientation: Orientation::of(width, height),
            dominant_colors,
            brightness,
            category,
            category_source,
            caption: caption.map(str::to_string),
        })
    }

    /// Analyse many inputs in parallel, keeping pixels. Output order matches input.
    pub fn inspect_batch(&self, inputs: &[ImageInput]) -> Vec<Result<AnalyzedImage>> {
        inputs
            .par_iter()
            .map(|input| {
                let result = self.inspect(input);
                if let Err(e) = &result {
                    tracing::warn!(source = %input.source_ref, error = %e, "image analysis failed");
                }
                result
            })
            .collect()
    }

    /// Analyse many inputs in parallel. Output order matches input.
    pub fn analyze_batch(&self, inputs: &[ImageInput]) -> Vec<AnalysisOutcome> {
        self.inspect_batch(inputs)
            .into_iter()
            .zip(inputs)
            .map(|(result, input)| match result {
                Ok(a) => AnalysisOutcome::Analyzed(a.record),
                Err(e) => AnalysisOutcome::Failed {
                    source_ref: input.source_ref.clone(),
                    error: e.to_string(),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_aspect_ratio_rounded() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(300, 200)));
        let record = ImageAnalyzer::default().analyze(&bytes).unwrap();
        assert_eq!(record.width, 300);
        assert_eq!(record.height, 200);
        assert_eq!(record.aspect_ratio, 1.5);
        assert_eq!(record.format, "PNG");
        assert_eq!(record.orientation, Orientation::Landscape);

        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(100, 300)));
        let record = ImageAnalyzer::default().analyze(&bytes).unwrap();
        assert_eq!(record.aspect_ratio, 0.33);
        assert_eq!(record.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_deterministic_colors() {
        let mut img = RgbImage::new(64, 64);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) % 3 * 80) as u8]);
        }
        let bytes = png_bytes(DynamicImage::ImageRgb8(img));
        let analyzer = ImageAnalyzer::default();
        let a = analyzer.analyze(&bytes).unwrap();
        let b = analyzer.analyze(&bytes).unwrap();
        assert_eq!(a.dominant_colors, b.dominant_colors);
        assert!(a.dominant_colors.len() <= 5);
    }

    #[test]
    fn test_transparent_pixels_flatten_to_white() {
        let img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 0]));
        let bytes = png_bytes(DynamicImage::ImageRgba8(img));
        let record = ImageAnalyzer::default().analyze(&bytes).unwrap();
        assert_eq!(record.dominant_colors, vec![Rgb::WHITE]);
        assert!(record.brightness.whole > 254.0);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = ImageAnalyzer::default().analyze(b"definitely not an image").unwrap_err();
        assert!(matches!(err, MarqueeError::Decode(_)));
    }

    #[test]
    fn test_zero_sized_image_is_invalid() {
        let analyzer = ImageAnalyzer::default();
        for (w, h) in [(10, 0), (0, 10)] {
            let err = analyzer
                .analyze_decoded("z", &DynamicImage::new_rgb8(w, h), ImageFormat::Png, None)
                .unwrap_err();
            assert!(matches!(err, MarqueeError::InvalidImage(_)), "{:?}", err);
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good = png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            20,
            20,
            image::Rgb([200, 60, 40]),
        )));
        let inputs = vec![
            ImageInput::new("a.png", good.clone()),
            ImageInput::new("broken.png", b"\x89PNG broken".to_vec()),
            ImageInput::new("c.png", good),
        ];
        let outcomes = ImageAnalyzer::default().analyze_batch(&inputs);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].record().unwrap().source_ref, "a.png");
        assert!(matches!(
            &outcomes[1],
            AnalysisOutcome::Failed { source_ref, .. } if source_ref == "broken.png"
        ));
        assert_eq!(outcomes[2].record().unwrap().source_ref, "c.png");
    }

    #[test]
    fn test_caption_drives_category() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            8,
            8,
            image::Rgb([0, 0, 255]),
        )));
        let input = ImageInput::new("x", bytes.clone()).with_caption(Some("가게 간판".into()));
        let a = ImageAnalyzer::default().inspect(&input).unwrap();
        assert_eq!(a.record.category, Category::Storefront);
        assert_eq!(a.record.category_source, CategorySource::Caption);

        let record = ImageAnalyzer::default().analyze(&bytes).unwrap();
        assert_eq!(record.category, Category::Other);
        assert_eq!(record.category_source, CategorySource::ColorHeuristic);
    }

    #[test]
    fn test_square_tolerance() {
        assert_eq!(Orientation::of(500, 460), Orientation::Square);
        assert_eq!(Orientation::of(500, 450), Orientation::Landscape);
    }
}
