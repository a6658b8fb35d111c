//! RGB color triples.
//!
//! Colors serialize as `[r, g, b]` arrays so analysis output reads the same
//! way it is written in request JSON.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Dark gray used for text on light backgrounds.
    pub const DARK_GRAY: Rgb = Rgb(50, 50, 50);
    /// Placeholder returned when an image has no usable pixels.
    pub const NEUTRAL_GRAY: Rgb = Rgb(128, 128, 128);

    /// Grayscale intensity (ITU-R 601 weights), 0.0..=255.0.
    #[inline]
    pub fn luma(self) -> f32 {
        luma(self.0, self.1, self.2)
    }

    /// Linear blend toward `other`; `t = 0.0` is `self`, `t = 1.0` is `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 255])
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Rgb(p[0], p[1], p[2])
    }
}

/// Grayscale conversion shared by color luma and region brightness.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(Rgb::BLACK.luma(), 0.0);
        assert!((Rgb::WHITE.luma() - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_mix() {
        assert_eq!(Rgb::WHITE.mix(Rgb::BLACK, 0.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.mix(Rgb::BLACK, 1.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.mix(Rgb::BLACK, 0.3), Rgb(179, 179, 179));
    }

    #[test]
    fn test_deserializes_from_array() {
        let c: Rgb = serde_json::from_str("[255, 107, 107]").unwrap();
        assert_eq!(c, Rgb(255, 107, 107));
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&Rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
    }
}
