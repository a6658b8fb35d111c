//! # Text Layout and Rendering
//!
//! - [`font`]: typefaces (runtime TTF/OTF or the builtin bitmap fallback)
//! - [`layout`]: greedy word wrap, measurement, anchoring, ellipsizing
//! - [`draw`]: blending rasterized text onto an RGBA canvas

pub mod draw;
pub mod font;
pub mod layout;

pub use font::{Font, Typeface};
pub use layout::{Alignment, anchor_origin, measure, wrap};
