//! Raster output encoding.

use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use std::str::FromStr;

use crate::analyze::colors::flatten;
use crate::color::Rgb;
use crate::error::{MarqueeError, Result};

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Output raster format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    pub fn jpeg() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg { .. } => "jpg",
        }
    }

    /// Encode a canvas. The canvas is flattened onto white first, so the
    /// output never carries an alpha channel.
    pub fn encode(&self, canvas: &RgbaImage) -> Result<Vec<u8>> {
        let rgb = flatten(&DynamicImage::ImageRgba8(canvas.clone()), Rgb::WHITE);
        let mut bytes = Vec::new();
        let result = match *self {
            OutputFormat::Png => image::codecs::png::PngEncoder::new(&mut bytes).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            ),
            OutputFormat::Jpeg { quality } => {
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
                    .write_image(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        ExtendedColorType::Rgb8,
                    )
            }
        };
        result.map_err(|e: image::ImageError| MarqueeError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

impl FromStr for OutputFormat {
    type Err = MarqueeError;

    /// `png`, `jpeg`, `jpg`, or `jpeg:<quality>`.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let (name, quality) = match lower.split_once(':') {
            Some((name, q)) => {
                let q: u8 = q
                    .parse()
                    .map_err(|_| MarqueeError::Config(format!("Invalid JPEG quality: {}", q)))?;
                (name.to_string(), Some(q))
            }
            None => (lower, None),
        };
        match (name.as_str(), quality) {
            ("png", None) => Ok(OutputFormat::Png),
            ("jpeg" | "jpg", q) => Ok(OutputFormat::Jpeg {
                quality: q.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100),
            }),
            _ => Err(MarqueeError::Config(format!("Unknown output format: {}", s))),
        }
    }
}
