//! Legible text colors for a measured background brightness.

use crate::color::Rgb;

/// Brightness strictly above this is treated as a light background.
pub const LIGHT_THRESHOLD: f32 = 128.0;

/// Foreground and shadow colors chosen for a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    pub foreground: Rgb,
    pub shadow: Rgb,
}

/// Pick text and shadow colors for a background of the given brightness.
///
/// Light backgrounds (`> 128`) get dark gray text with a white shadow;
/// everything else, including exactly 128, gets white text with a black
/// shadow.
pub fn choose_text_color(brightness: f32) -> TextColors {
    if brightness > LIGHT_THRESHOLD {
        TextColors {
            foreground: Rgb::DARK_GRAY,
            shadow: Rgb::WHITE,
        }
    } else {
        TextColors {
            foreground: Rgb::WHITE,
            shadow: Rgb::BLACK,
        }
    }
}

/// How far muted text is pulled from the foreground toward its shadow.
const MUTED_MIX: f32 = 0.3;

/// Color for secondary text such as the period line.
///
/// `preferred` (usually the theme accent) is kept when it sits on the same
/// side of [`LIGHT_THRESHOLD`] as the chosen foreground. Otherwise the
/// foreground is muted toward the shadow color.
pub fn accent_color(preferred: Rgb, text: TextColors) -> Rgb {
    let light_text = text.foreground.luma() > LIGHT_THRESHOLD;
    if (preferred.luma() > LIGHT_THRESHOLD) == light_text {
        preferred
    } else {
        text.foreground.mix(text.shadow, MUTED_MIX)
    }
}

/// Text colors for a solid fill.
pub fn text_color_on(fill: Rgb) -> TextColors {
    choose_text_color(fill.luma())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_strictly_greater() {
        let light = choose_text_color(129.0);
        assert_eq!(light.foreground, Rgb(50, 50, 50));
        assert_eq!(light.shadow, Rgb::WHITE);

        let dark = choose_text_color(128.0);
        assert_eq!(dark.foreground, Rgb::WHITE);
        assert_eq!(dark.shadow, Rgb::BLACK);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(choose_text_color(0.0).foreground, Rgb::WHITE);
        assert_eq!(choose_text_color(255.0).foreground, Rgb::DARK_GRAY);
    }

    #[test]
    fn test_accent_kept_when_legible() {
        let accent = Rgb(110, 110, 110);
        assert_eq!(accent_color(accent, choose_text_color(240.0)), accent);
        assert_eq!(accent_color(Rgb(200, 200, 200), choose_text_color(20.0)), Rgb(200, 200, 200));
    }

    #[test]
    fn test_accent_replaced_on_wrong_side() {
        // dark accent on a dark backdrop: muted white instead
        assert_eq!(
            accent_color(Rgb(110, 110, 110), choose_text_color(20.0)),
            Rgb(179, 179, 179)
        );
        // light accent on a light backdrop: muted dark gray instead
        assert_eq!(
            accent_color(Rgb(200, 200, 200), choose_text_color(240.0)),
            Rgb(112, 112, 112)
        );
    }

    #[test]
    fn test_text_on_fill() {
        assert_eq!(text_color_on(Rgb::WHITE).foreground, Rgb::DARK_GRAY);
        assert_eq!(text_color_on(Rgb(20, 20, 60)).foreground, Rgb::WHITE);
    }
}
