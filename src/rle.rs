//! Run length encoded coverage
//!
//! An [`Rle`] keeps every span of a render call, which is what a
//! compositor needs to blend a shape or to use it as a clip mask.
//!
//!     use grayscan::{FillRule, Matrix, Path, Rle};
//!
//!     let mut p = Path::new();
//!     p.add_rect(0.0, 0.0, 4.0, 2.0);
//!     let rle = Rle::from_path(&p, &Matrix::identity(), None, FillRule::NonZero).unwrap();
//!     assert_eq!(rle.spans.len(), 2);
//!     assert_eq!(rle.coverage_sum(), 255 * 8);
//!

use crate::clip::{ClipBox, Rect};
use crate::error::Result;
use crate::math::multiply_u8;
use crate::matrix::Matrix;
use crate::outline::{FillRule, Outline};
use crate::path::Path;
use crate::render::{RasterParams, Rasterizer};
use crate::scan::Span;

/// Spans of one shape, sorted by row then column
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rle {
    pub spans: Vec<Span>,
    /// Bounding rectangle of `spans`
    pub rect: Rect,
}

impl Rle {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
    pub fn clear(&mut self) {
        self.spans.clear();
        self.rect = Rect::zero();
    }

    /// Replace the content with the spans of `outline`
    pub fn rasterize(&mut self, outline: &Outline, params: &RasterParams) -> Result<()> {
        self.rasterize_with(&mut Rasterizer::new(), outline, params)
    }

    /// Like [`rasterize`](Rle::rasterize), reusing the memory of `ras`
    pub fn rasterize_with(&mut self, ras: &mut Rasterizer, outline: &Outline, params: &RasterParams) -> Result<()> {
        self.clear();
        let spans = &mut self.spans;
        self.rect = ras.render(outline, params, |batch| spans.extend_from_slice(batch))?;
        Ok(())
    }

    /// Spans of `path` transformed by `m`, optionally clipped
    pub fn from_path(path: &Path, m: &Matrix, clip: Option<ClipBox>, fill_rule: FillRule) -> Result<Rle> {
        let outline = Outline::from_path(path, m, fill_rule);
        let params = match clip {
            Some(b) => RasterParams::with_clip(b),
            None => RasterParams::new(),
        };
        let mut rle = Rle::new();
        rle.rasterize(&outline, &params)?;
        Ok(rle)
    }

    /// Pixels covered by both, with coverage multiplied
    pub fn intersect(&self, other: &Rle) -> Rle {
        let (a, b) = (&self.spans, &other.spans);
        let mut spans = vec![];
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let (sa, sb) = (a[i], b[j]);
            if sa.y < sb.y {
                i += 1;
                continue;
            }
            if sb.y < sa.y {
                j += 1;
                continue;
            }
            let x0 = sa.x.max(sb.x);
            let x1 = sa.end().min(sb.end());
            if x0 < x1 {
                let coverage = multiply_u8(sa.coverage, sb.coverage);
                if coverage > 0 {
                    spans.push(Span::new(x0, x1 - x0, sa.y, coverage));
                }
            }
            if sa.end() <= sb.end() {
                i += 1;
            } else {
                j += 1;
            }
        }
        let rect = span_bounds(&spans);
        Rle { spans, rect }
    }

    /// Sum of `coverage * len` over all spans
    pub fn coverage_sum(&self) -> i64 {
        self.spans.iter().map(|s| s.len * i64::from(s.coverage)).sum()
    }
}

/// Bounding rectangle of spans sorted by row
fn span_bounds(spans: &[Span]) -> Rect {
    let (first, last) = match (spans.first(), spans.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Rect::zero(),
    };
    let x0 = spans.iter().map(|s| s.x).min().unwrap_or(0);
    let x1 = spans.iter().map(|s| s.end()).max().unwrap_or(0);
    Rect::new(x0, first.y, x1 - x0, last.y - first.y + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rle(spans: &[(i64, i64, i64, u8)]) -> Rle {
        let spans: Vec<_> = spans.iter().map(|&(x, len, y, c)| Span::new(x, len, y, c)).collect();
        let rect = span_bounds(&spans);
        Rle { spans, rect }
    }

    #[test]
    fn intersect_overlaps_per_row() {
        let a = rle(&[(0, 10, 0, 255), (0, 4, 1, 255), (6, 4, 1, 128)]);
        let b = rle(&[(5, 10, 1, 255), (3, 2, 2, 255)]);
        let c = a.intersect(&b);
        assert_eq!(c.spans, vec![Span::new(6, 4, 1, 128)]);
        assert_eq!(c.rect, Rect::new(6, 1, 4, 1));
        assert!(a.intersect(&Rle::new()).is_empty());
    }

    #[test]
    fn intersect_splits_runs() {
        let a = rle(&[(0, 10, 3, 255)]);
        let b = rle(&[(1, 2, 3, 255), (5, 2, 3, 64), (9, 5, 3, 255)]);
        let c = a.intersect(&b);
        assert_eq!(c.spans, vec![
            Span::new(1, 2, 3, 255), Span::new(5, 2, 3, 64), Span::new(9, 1, 3, 255),
        ]);
        assert_eq!(c.coverage_sum(), 3 * 255 + 2 * 64);
    }
}
