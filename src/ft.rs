//! FreeType glyph outlines
//!
//! FreeType outlines use the same 26.6 points and tag layout, so a loaded
//! glyph can be rasterized directly. FreeType's y axis points up; flip it
//! (or render into a flipped mask) for y-down output.

use crate::outline::{FillRule, Outline, Tag, Vector};

pub use freetype;

impl Outline {
    /// Copy points, tags and contour ends of a FreeType outline
    pub fn from_freetype(src: &freetype::outline::Outline, fill_rule: FillRule) -> Outline {
        Outline {
            points: src.points().iter().map(|v| Vector::new(v.x as i64, v.y as i64)).collect(),
            tags: src.tags().iter().map(|&t| Tag::from_bits(t as u8)).collect(),
            contours: src.contours().iter().map(|&c| c as usize).collect(),
            fill_rule,
        }
    }
}
