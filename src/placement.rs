//! # Document Image Placement
//!
//! Assigns analysed images to the four fixed sections of a store article
//! (intro, store info, menu, closing) and derives a global display order.
//!
//! | Section    | Takes                                                      |
//! |------------|------------------------------------------------------------|
//! | intro      | first storefront image, else first food image              |
//! | store info | every storefront image, then every interior image          |
//! | menu       | every menu-board image, then every food image              |
//! | closing    | first food image not in menu, then at most one `other`     |
//!
//! Sections may share images. The image sequence lists each image once, at
//! its first appearance when walking the sections in order. Planning is a
//! pure function of the categories; it never fails, even for no images.

use serde::Serialize;
use std::collections::HashSet;

use crate::analyze::{Category, ImageRecord};

/// The fixed article sections, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Intro,
    StoreInfo,
    Menu,
    Closing,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Intro,
        SectionKind::StoreInfo,
        SectionKind::Menu,
        SectionKind::Closing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Intro => "도입부",
            SectionKind::StoreInfo => "매장 정보",
            SectionKind::Menu => "메뉴 소개",
            SectionKind::Closing => "마무리",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SectionKind::Intro => "매장 소개와 첫인상",
            SectionKind::StoreInfo => "매장 위치, 분위기, 공간 안내",
            SectionKind::Menu => "대표 메뉴와 가격 안내",
            SectionKind::Closing => "방문 권유와 마무리 인사",
        }
    }

    pub fn placement_guide(self) -> &'static str {
        match self {
            SectionKind::Intro => "매장 외관이나 대표적인 음식 사진으로 시작",
            SectionKind::StoreInfo => "매장 외관과 내부 분위기 사진을 차례로 배치",
            SectionKind::Menu => "메뉴판 사진 다음에 음식 사진을 배치",
            SectionKind::Closing => "남은 음식 사진이나 분위기 사진으로 마무리",
        }
    }
}

/// Caption label shown under an image of a category.
pub fn caption_label(category: Category) -> &'static str {
    match category {
        Category::Storefront => "매장 외관",
        Category::Interior => "매장 내부",
        Category::MenuBoard => "메뉴판",
        Category::Food => "대표 메뉴",
        Category::Person => "함께하는 사람들",
        Category::Other => "매장 풍경",
    }
}

/// An image's slot in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedImage {
    /// Position in the planner's input.
    pub index: usize,
    pub source_ref: String,
    pub category: Category,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub kind: SectionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub recommended_images: Vec<PlacedImage>,
    pub placement_guide: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPlan {
    /// Always four, in [`SectionKind::ALL`] order.
    pub sections: Vec<DocumentSection>,
    /// Every recommended image once, in first-appearance order.
    pub image_sequence: Vec<PlacedImage>,
}

impl PlacementPlan {
    pub fn section(&self, kind: SectionKind) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Build the placement plan for `images`.
pub fn plan(images: &[ImageRecord]) -> PlacementPlan {
    let placed = |index: usize| {
        let record = &images[index];
        PlacedImage {
            index,
            source_ref: record.source_ref.clone(),
            category: record.category,
            caption: caption_label(record.category),
        }
    };
    let bucket = |category: Category| -> Vec<usize> {
        images
            .iter()
            .enumerate()
            .filter(|(_, r)| r.category == category)
            .map(|(i, _)| i)
            .collect()
    };

    let storefront = bucket(Category::Storefront);
    let interior = bucket(Category::Interior);
    let menu_board = bucket(Category::MenuBoard);
    let food = bucket(Category::Food);
    let other = bucket(Category::Other);

    let intro: Vec<usize> = storefront.first().or(food.first()).copied().into_iter().collect();
    let store_info: Vec<usize> = storefront.iter().chain(&interior).copied().collect();
    let menu: Vec<usize> = menu_board.iter().chain(&food).copied().collect();
    let closing: Vec<usize> = food
        .iter()
        .find(|i| !menu.contains(*i))
        .into_iter()
        .chain(other.first())
        .copied()
        .collect();

    let sections: Vec<DocumentSection> = SectionKind::ALL
        .into_iter()
        .zip([intro, store_info, menu, closing])
        .map(|(kind, indices)| DocumentSection {
            kind,
            name: kind.name(),
            description: kind.description(),
            recommended_images: indices.into_iter().map(&placed).collect(),
            placement_guide: kind.placement_guide(),
        })
        .collect();

    let mut seen = HashSet::new();
    let image_sequence = sections
        .iter()
        .flat_map(|s| &s.recommended_images)
        .filter(|img| seen.insert(img.index))
        .cloned()
        .collect();

    PlacementPlan {
        sections,
        image_sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{Brightness, CategorySource, Orientation};
    use crate::color::Rgb;
    use pretty_assertions::assert_eq;

    fn record(name: &str, category: Category) -> ImageRecord {
        ImageRecord {
            source_ref: name.to_string(),
            width: 100,
            height: 100,
            aspect_ratio: 1.0,
            format: "PNG".to_string(),
            orientation: Orientation::Square,
            dominant_colors: vec![Rgb::NEUTRAL_GRAY],
            brightness: Brightness::uniform(128.0),
            category,
            category_source: CategorySource::Caption,
            caption: None,
        }
    }

    fn refs(section: &DocumentSection) -> Vec<&str> {
        section
            .recommended_images
            .iter()
            .map(|i| i.source_ref.as_str())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let plan = plan(&[]);
        assert_eq!(plan.sections.len(), 4);
        assert!(plan.sections.iter().all(|s| s.recommended_images.is_empty()));
        assert!(plan.image_sequence.is_empty());
        assert_eq!(
            plan.sections[0].placement_guide,
            "매장 외관이나 대표적인 음식 사진으로 시작"
        );
    }

    #[test]
    fn test_storefront_in_intro_and_store_info_once_in_sequence() {
        let plan = plan(&[record("sign.jpg", Category::Storefront)]);
        assert_eq!(refs(&plan.sections[0]), vec!["sign.jpg"]);
        assert_eq!(refs(&plan.sections[1]), vec!["sign.jpg"]);
        assert_eq!(plan.image_sequence.len(), 1);
    }

    #[test]
    fn test_menu_takes_the_only_food() {
        let plan = plan(&[
            record("board", Category::MenuBoard),
            record("dish", Category::Food),
            record("misc", Category::Other),
        ]);
        let menu = plan.section(SectionKind::Menu).unwrap();
        assert_eq!(refs(menu), vec!["board", "dish"]);
        let closing = plan.section(SectionKind::Closing).unwrap();
        assert_eq!(refs(closing), vec!["misc"]);
        // intro falls back to the first food image
        assert_eq!(refs(&plan.sections[0]), vec!["dish"]);
        let order: Vec<usize> = plan.image_sequence.iter().map(|i| i.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_store_info_order() {
        let plan = plan(&[
            record("inside", Category::Interior),
            record("front", Category::Storefront),
            record("staff", Category::Person),
        ]);
        assert_eq!(refs(&plan.sections[1]), vec!["front", "inside"]);
        // people are never placed
        assert!(plan.image_sequence.iter().all(|i| i.category != Category::Person));
    }

    #[test]
    fn test_closing_takes_at_most_one_other() {
        let plan = plan(&[record("a", Category::Other), record("b", Category::Other)]);
        assert_eq!(refs(&plan.sections[3]), vec!["a"]);
        assert!(plan.sections[0].recommended_images.is_empty());
    }

    #[test]
    fn test_captions_follow_category() {
        let plan = plan(&[record("board", Category::MenuBoard)]);
        assert_eq!(plan.image_sequence[0].caption, "메뉴판");
    }
}
