//! Poster color themes selected by content category.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// The three colors a poster is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSpec {
    /// Call-to-action button fill.
    pub primary_color: Rgb,
    /// Period line accent, used when legible on the backdrop.
    pub secondary_color: Rgb,
    /// Canvas fill when no background photo is supplied.
    pub background_color: Rgb,
}

/// Category key a theme is looked up by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKey {
    Food,
    Store,
    Event,
    #[default]
    Default,
}

impl ThemeKey {
    /// Resolve a free-form category string (English or Korean) to a key.
    ///
    /// Unknown strings resolve to [`ThemeKey::Default`].
    pub fn parse(s: &str) -> ThemeKey {
        match s.trim().to_lowercase().as_str() {
            "food" | "menu" | "drink" | "음식" | "메뉴" | "음료" => ThemeKey::Food,
            "store" | "shop" | "interior" | "매장" => ThemeKey::Store,
            "event" | "sale" | "discount" | "이벤트" | "할인" => ThemeKey::Event,
            _ => ThemeKey::Default,
        }
    }

    pub fn theme(self) -> ThemeSpec {
        match self {
            ThemeKey::Food => ThemeSpec {
                primary_color: Rgb(255, 107, 107),
                secondary_color: Rgb(140, 90, 60),
                background_color: Rgb(255, 248, 240),
            },
            ThemeKey::Store => ThemeSpec {
                primary_color: Rgb(72, 126, 176),
                secondary_color: Rgb(96, 108, 118),
                background_color: Rgb(240, 244, 248),
            },
            ThemeKey::Event => ThemeSpec {
                primary_color: Rgb(255, 193, 7),
                secondary_color: Rgb(200, 200, 200),
                background_color: Rgb(34, 34, 48),
            },
            ThemeKey::Default => ThemeSpec {
                primary_color: Rgb(255, 107, 107),
                secondary_color: Rgb(110, 110, 110),
                background_color: Rgb(255, 255, 255),
            },
        }
    }
}

impl Default for ThemeSpec {
    fn default() -> Self {
        ThemeKey::Default.theme()
    }
}

/// Theme for a category string, falling back to the default theme.
pub fn theme_for(category: &str) -> ThemeSpec {
    ThemeKey::parse(category).theme()
}
