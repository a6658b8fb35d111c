//! Coarse content categories for images.
//!
//! Classification is a keyword heuristic over a free-text caption supplied by
//! an external describer; the caption's accuracy is the describer's concern.
//! When no caption exists, a warm-color check on the dominant colors decides
//! between `food` and `other`. The two signals are never merged: a caption,
//! when present, always wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgb;

/// Content label used for layout and placement decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Storefront,
    Interior,
    MenuBoard,
    Food,
    Person,
    Other,
}

impl Category {
    /// All categories in classification priority order.
    pub const ALL: [Category; 6] = [
        Category::Storefront,
        Category::Interior,
        Category::MenuBoard,
        Category::Food,
        Category::Person,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Storefront => "storefront",
            Category::Interior => "interior",
            Category::MenuBoard => "menuBoard",
            Category::Food => "food",
            Category::Person => "person",
            Category::Other => "other",
        }
    }

    /// Caption keywords for this category. `Other` has none.
    ///
    /// ASCII keywords match the start of a word; Hangul keywords match
    /// anywhere, since Korean attaches particles directly to nouns.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Storefront => &[
                "외관", "건물", "간판", "입구", "외부", "storefront", "exterior", "facade",
                "building", "signboard", "signage", "entrance", "outside",
            ],
            Category::Interior => &[
                "내부", "인테리어", "좌석", "테이블", "분위기", "장식", "interior", "inside",
                "seat", "tables", "atmosphere", "decor",
            ],
            Category::MenuBoard => &["메뉴", "가격", "메뉴판", "menu", "price"],
            Category::Food => &[
                "음식", "요리", "디저트", "음료", "플레이팅", "food", "dish", "meal", "dessert",
                "drink", "beverage", "plating",
            ],
            Category::Person => &[
                "사람", "고객", "직원", "person", "people", "customer", "staff", "employee",
            ],
            Category::Other => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signal decided an image's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    Caption,
    ColorHeuristic,
}

fn keyword_matches(text: &str, words: &[&str], keyword: &str) -> bool {
    if keyword.is_ascii() {
        words.iter().any(|w| w.starts_with(keyword))
    } else {
        text.contains(keyword)
    }
}

/// Category from a caption: first category (in [`Category::ALL`] order) with
/// a matching keyword, else `Other`.
pub fn classify_caption(caption: &str) -> Category {
    let text = caption.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    Category::ALL
        .into_iter()
        .find(|cat| {
            cat.keywords()
                .iter()
                .any(|kw| keyword_matches(&text, &words, kw))
        })
        .unwrap_or(Category::Other)
}

/// Red-dominant or strongly red colors read as "warm".
pub fn is_warm(c: Rgb) -> bool {
    c.0 > 150 || (c.0 > c.1 && c.0 > c.2)
}

/// Food-likelihood fallback: at least two of the top three colors are warm.
pub fn looks_like_food(dominant: &[Rgb]) -> bool {
    dominant.iter().take(3).filter(|c| is_warm(**c)).count() >= 2
}

/// Classify with the caption if one is present, otherwise with color.
pub fn classify(caption: Option<&str>, dominant: &[Rgb]) -> (Category, CategorySource) {
    match caption.map(str::trim).filter(|c| !c.is_empty()) {
        Some(text) => (classify_caption(text), CategorySource::Caption),
        None => {
            let cat = if looks_like_food(dominant) {
                Category::Food
            } else {
                Category::Other
            };
            (cat, CategorySource::ColorHeuristic)
        }
    }
}
