//! Line wrapping, measurement and alignment.

use serde::{Deserialize, Serialize};

use super::font::Font;

/// Appended to text shortened to fit.
pub const ELLIPSIS: &str = "...";

/// Horizontal alignment relative to an anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Center,
    Left,
}

/// Pixel size of `text` in `font`.
pub fn measure(text: &str, font: &Font) -> (u32, u32) {
    font.measure(text)
}

/// Greedy word wrap.
///
/// Words (split on whitespace) are added to the current line while the
/// joined line stays strictly narrower than `max_width`. A word wider than
/// `max_width` on its own is emitted as a line of its own, unbroken.
/// Empty or whitespace-only input yields no lines.
pub fn wrap(text: &str, font: &Font, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if font.measure(&candidate).0 < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Top-left origin for drawing `text` at an anchor.
///
/// Centered text puts its middle on `anchor_x`; left-aligned text starts at
/// `anchor_x`. The vertical position is passed through unchanged: callers
/// keep their own running cursor.
pub fn anchor_origin(
    text: &str,
    font: &Font,
    anchor_x: i32,
    anchor_y: i32,
    align: Alignment,
) -> (i32, i32) {
    match align {
        Alignment::Center => {
            let (w, _) = font.measure(text);
            (anchor_x - (w / 2) as i32, anchor_y)
        }
        Alignment::Left => (anchor_x, anchor_y),
    }
}

/// Shorten `text` and append [`ELLIPSIS`] so the result is no wider than
/// `limit`. Returns the ellipsis alone if nothing else fits.
///
/// The cut point is binary-searched over char boundaries, so long input
/// costs `O(n log n)` measurements rather than one per removed char.
pub fn ellipsize(text: &str, font: &Font, limit: u32) -> String {
    let text = text.trim_end();
    let fits = |end: usize| font.measure(&with_ellipsis(&text[..end])).0 <= limit;

    // Byte offsets of every prefix, shortest first.
    let mut cuts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    cuts.push(text.len());

    // Largest prefix that still fits; widths grow with prefix length.
    let (mut lo, mut hi) = (0usize, cuts.len());
    while lo + 1 < hi {
        let mid = lo + (hi - lo) / 2;
        if fits(cuts[mid]) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    with_ellipsis(&text[..cuts[lo]])
}

fn with_ellipsis(prefix: &str) -> String {
    format!("{}{}", prefix.trim_end(), ELLIPSIS)
}

/// `text` unchanged if it fits within `limit`, otherwise ellipsized.
pub fn truncate_to_fit(text: &str, font: &Font, limit: u32) -> String {
    if font.measure(text).0 <= limit {
        text.to_string()
    } else {
        ellipsize(text, font, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font::Typeface;

    /// 12px per character at 24px.
    fn font() -> Font {
        Typeface::Builtin.at(24.0)
    }

    #[test]
    fn test_empty_input() {
        assert!(wrap("", &font(), 500).is_empty());
        assert!(wrap("  \n\t ", &font(), 500).is_empty());
    }

    #[test]
    fn test_long_word_kept_whole() {
        let word = "Supercalifragilisticexpialidocious";
        assert_eq!(wrap(word, &font(), 10), vec![word.to_string()]);
    }

    #[test]
    fn test_greedy_wrap() {
        // "aaa bbb" = 7 chars = 84px; "aaa bbb ccc" = 132px
        let lines = wrap("aaa bbb ccc ddd", &font(), 100);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_width_limit_is_strict() {
        // "ab cd" = 60px exactly
        assert_eq!(wrap("ab cd", &font(), 60), vec!["ab", "cd"]);
        assert_eq!(wrap("ab cd", &font(), 61), vec!["ab cd"]);
    }

    #[test]
    fn test_long_word_between_short_ones() {
        let lines = wrap("hi Supercalifragilistic yo", &font(), 100);
        assert_eq!(lines, vec!["hi", "Supercalifragilistic", "yo"]);
    }

    #[test]
    fn test_anchor_origin() {
        // "abcd" = 48px wide
        assert_eq!(anchor_origin("abcd", &font(), 540, 80, Alignment::Center), (516, 80));
        assert_eq!(anchor_origin("abcd", &font(), 50, 80, Alignment::Left), (50, 80));
    }

    #[test]
    fn test_ellipsize_fits() {
        let out = truncate_to_fit("Grand opening celebration", &font(), 120);
        assert!(out.ends_with(ELLIPSIS));
        assert!(font().measure(&out).0 <= 120);
        // 10 chars = 120px
        assert_eq!(out, "Grand o...");
    }

    #[test]
    fn test_exact_width_not_truncated() {
        // "abcde" = 60px
        assert_eq!(truncate_to_fit("abcde", &font(), 60), "abcde");
        assert_eq!(truncate_to_fit("abcde", &font(), 59), "a...");
    }

    #[test]
    fn test_ellipsis_alone_when_nothing_fits() {
        assert_eq!(ellipsize("abcdef", &font(), 10), ELLIPSIS);
    }

    #[test]
    fn test_ellipsize_multibyte() {
        // 4 chars + ellipsis = 84px
        assert_eq!(truncate_to_fit("여름 한정 빙수 이벤트", &font(), 84), "여름 한...");
    }

    #[test]
    fn test_long_text_truncates_quickly() {
        let long = "a".repeat(100_000);
        let start = std::time::Instant::now();
        let out = truncate_to_fit(&long, &font(), 1000);
        assert!(start.elapsed() < std::time::Duration::from_secs(2));
        // 83 chars = 996px
        assert_eq!(out.chars().count(), 83);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_to_fit("Hello", &font(), 500), "Hello");
    }
}
