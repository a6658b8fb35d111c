//! Caption sources for image classification.
//!
//! A caption is free text describing an image, normally written by an
//! external vision describer. Captions here are looked up by source
//! reference through a [`Chain`]: captions the caller supplied first, then
//! keywords found in the file name. Images with no caption are classified by
//! color instead.

use std::collections::HashMap;
use std::path::Path;

use crate::analyze::ImageInput;
use crate::analyze::category::{Category, classify_caption};
use crate::providers::{Chain, Provider};

/// Chain of caption providers keyed by source reference.
pub type CaptionChain = Chain<str, String>;

/// Captions supplied with the request, keyed by source reference.
#[derive(Debug, Clone, Default)]
pub struct SuppliedCaptions {
    captions: HashMap<String, String>,
}

impl SuppliedCaptions {
    pub fn new(captions: HashMap<String, String>) -> Self {
        Self { captions }
    }
}

impl Provider<str, String> for SuppliedCaptions {
    fn name(&self) -> &str {
        "supplied"
    }

    fn provide(&self, source_ref: &str) -> Option<String> {
        self.captions
            .get(source_ref)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

/// Uses the file name as a caption when it names a known category.
///
/// `menu_board_02.jpg` becomes the caption `menu board 02`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameCaptions;

impl Provider<str, String> for FilenameCaptions {
    fn name(&self) -> &str {
        "filename"
    }

    fn provide(&self, source_ref: &str) -> Option<String> {
        // URLs: ignore query strings, keep the last path segment
        let path_part = source_ref.split(['?', '#']).next().unwrap_or(source_ref);
        let stem = Path::new(path_part).file_stem()?.to_str()?;
        let text: String = stem
            .chars()
            .map(|c| if matches!(c, '_' | '-' | '.') { ' ' } else { c })
            .collect();
        let text = text.trim().to_string();
        (classify_caption(&text) != Category::Other).then_some(text)
    }
}

/// Supplied captions first, then file-name keywords.
pub fn default_chain(supplied: HashMap<String, String>) -> CaptionChain {
    Chain::new()
        .then(SuppliedCaptions::new(supplied))
        .then(FilenameCaptions)
}

/// Fill in missing captions on `inputs` from the chain.
pub fn attach_captions(inputs: &mut [ImageInput], chain: &CaptionChain) {
    for input in inputs.iter_mut().filter(|i| i.caption.is_none()) {
        input.caption = chain.resolve(&input.source_ref).map(|r| r.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_keywords() {
        let p = FilenameCaptions;
        assert_eq!(p.provide("uploads/menu_board-01.jpg").as_deref(), Some("menu board 01"));
        assert_eq!(p.provide("https://cdn.example.com/img/food.png?v=3").as_deref(), Some("food"));
        assert_eq!(p.provide("/tmp/IMG_0042.jpg"), None);
        assert_eq!(p.provide("간판.jpg").as_deref(), Some("간판"));
    }

    #[test]
    fn test_supplied_before_filename() {
        let mut supplied = HashMap::new();
        supplied.insert("food.png".to_string(), "매장 외관".to_string());
        let chain = default_chain(supplied);

        let r = chain.resolve("food.png").unwrap();
        assert_eq!(r.value, "매장 외관");
        assert_eq!(r.provider, "supplied");

        let r = chain.resolve("dish.png").unwrap();
        assert_eq!(r.provider, "filename");
        assert!(chain.resolve("photo.png").is_none());
    }

    #[test]
    fn test_attach_keeps_existing_captions() {
        let chain = default_chain(HashMap::new());
        let mut inputs = vec![
            ImageInput::new("food.png", vec![]).with_caption(Some("직원 사진".into())),
            ImageInput::new("food.png", vec![]),
            ImageInput::new("random.png", vec![]),
        ];
        attach_captions(&mut inputs, &chain);
        assert_eq!(inputs[0].caption.as_deref(), Some("직원 사진"));
        assert_eq!(inputs[1].caption.as_deref(), Some("food"));
        assert_eq!(inputs[2].caption, None);
    }
}
