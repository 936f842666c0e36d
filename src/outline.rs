//! Outlines
//!
//! An outline is a set of contours over a flat array of 26.6 fixed point
//! points. Every point carries a [`Tag`] telling whether it lies on the
//! curve or is a quadratic / cubic control point, and `contours` holds the
//! index of the last point of each contour.

use crate::clip::{ClipBox, MAX_COORD};
use crate::error::{RasterError, Result};
use crate::math::OUTLINE_BITS;
use crate::matrix::Matrix;
use crate::path::{Path, PathCommand, Point};

/// Largest point coordinate magnitude an outline may use, in 26.6 units
///
/// This is [`MAX_COORD`] pixels; points beyond it fail
/// [`Outline::validate`].
pub const MAX_OUTLINE_COORD: i64 = MAX_COORD << OUTLINE_BITS;

/// Point or vector in fixed point coordinates
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i64,
    pub y: i64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
    /// Vector from a floating point position in pixels, rounded to 26.6
    pub fn from_f64(x: f64, y: f64) -> Self {
        let s = (1 << OUTLINE_BITS) as f64;
        Self { x: (x * s).round() as i64, y: (y * s).round() as i64 }
    }
    /// Integer midpoint
    pub fn midpoint(self, other: Vector) -> Vector {
        Vector::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

/// Point classification within a contour
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tag {
    /// On the curve
    On,
    /// Quadratic (conic) control point
    Conic,
    /// Cubic control point, always used in pairs
    Cubic,
}

impl Tag {
    /// Decode the two low bits of a FreeType style tag byte
    ///
    ///     use grayscan::Tag;
    ///     assert_eq!(Tag::from_bits(1), Tag::On);
    ///     assert_eq!(Tag::from_bits(0), Tag::Conic);
    ///     assert_eq!(Tag::from_bits(2), Tag::Cubic);
    ///
    pub fn from_bits(bits: u8) -> Tag {
        match bits & 3 {
            1 => Tag::On,
            0 => Tag::Conic,
            _ => Tag::Cubic,
        }
    }
}

/// Interpretation of the winding number
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> FillRule {
        FillRule::NonZero
    }
}

/// Geometric description handed to the rasterizer
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outline {
    /// Points, 26.6 fixed point
    pub points: Vec<Vector>,
    /// One tag per point
    pub tags: Vec<Tag>,
    /// Index of the last point of each contour, strictly increasing
    pub contours: Vec<usize>,
    pub fill_rule: FillRule,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn n_points(&self) -> usize {
        self.points.len()
    }
    pub fn n_contours(&self) -> usize {
        self.contours.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.contours.is_empty()
    }

    /// Start a new contour at `p`, ending the previous one
    pub fn move_to(&mut self, p: Vector) {
        self.end_contour();
        self.push(p, Tag::On);
    }
    pub fn line_to(&mut self, p: Vector) {
        self.push(p, Tag::On);
    }
    /// Quadratic segment with control `c`
    pub fn conic_to(&mut self, c: Vector, p: Vector) {
        self.push(c, Tag::Conic);
        self.push(p, Tag::On);
    }
    /// Cubic segment with controls `c1` and `c2`
    pub fn cubic_to(&mut self, c1: Vector, c2: Vector, p: Vector) {
        self.push(c1, Tag::Cubic);
        self.push(c2, Tag::Cubic);
        self.push(p, Tag::On);
    }
    /// Repeat the start point of the open contour as an on-curve point
    pub fn close(&mut self) {
        let start = self.contour_start();
        if start == self.points.len() {
            return;
        }
        let p = self.points[start];
        self.push(p, Tag::On);
    }
    /// Finish the open contour, if any
    ///
    /// Must be called once after the last segment of a hand built outline.
    pub fn end_contour(&mut self) {
        if self.contour_start() < self.points.len() {
            self.contours.push(self.points.len() - 1);
        }
    }
    fn contour_start(&self) -> usize {
        self.contours.last().map(|&end| end + 1).unwrap_or(0)
    }
    fn push(&mut self, p: Vector, tag: Tag) {
        self.points.push(p);
        self.tags.push(tag);
    }

    /// Convert a user space path, transformed by `m`
    ///
    /// Cubic segments keep their two control points. A curve with no open
    /// contour starts from the current point of the path, the origin for
    /// an empty one. The result passes the structural checks of
    /// [`validate`](Outline::validate); points mapped beyond
    /// [`MAX_OUTLINE_COORD`] are still rejected there.
    pub fn from_path(path: &Path, m: &Matrix, fill_rule: FillRule) -> Outline {
        let mut out = Outline { fill_rule, ..Outline::default() };
        out.points.reserve(path.points.len());
        out.tags.reserve(path.points.len());
        let at = |p: Point| {
            let (x, y) = m.map_point(p.x, p.y);
            Vector::from_f64(x, y)
        };
        let map = |i: usize| at(path.points[i]);
        let mut k = 0;
        for cmd in &path.elements {
            match cmd {
                PathCommand::MoveTo => {
                    out.move_to(map(k));
                    k += 1;
                },
                PathCommand::LineTo => {
                    out.line_to(map(k));
                    k += 1;
                },
                PathCommand::CurveTo => {
                    if out.contour_start() == out.points.len() {
                        let prev = if k > 0 { path.points[k - 1] } else { Point::default() };
                        out.move_to(at(prev));
                    }
                    out.cubic_to(map(k), map(k + 1), map(k + 2));
                    k += 3;
                },
                PathCommand::Close => {
                    out.close();
                    k += 1;
                },
            }
        }
        out.end_contour();
        out
    }

    /// Check the contour, point and tag structure, and the coordinate
    /// range of every point
    ///
    /// An outline with neither points nor contours is valid and renders
    /// nothing.
    pub fn validate(&self) -> Result<()> {
        let n_points = self.points.len();
        if n_points == 0 && self.contours.is_empty() {
            return Ok(());
        }
        if n_points == 0 {
            return Err(RasterError::InvalidOutline("contours without points"));
        }
        if self.contours.is_empty() {
            return Err(RasterError::InvalidOutline("points without contours"));
        }
        if self.tags.len() != n_points {
            return Err(RasterError::InvalidOutline("tag count does not match point count"));
        }
        let mut first = 0;
        for (n, &last) in self.contours.iter().enumerate() {
            if n > 0 && last < first {
                return Err(RasterError::InvalidOutline("contour ends are not increasing"));
            }
            if last >= n_points {
                return Err(RasterError::InvalidOutline("contour end past last point"));
            }
            self.validate_tags(first, last)?;
            first = last + 1;
        }
        if first != n_points {
            return Err(RasterError::InvalidOutline("last contour does not end at last point"));
        }
        let in_range = |v: i64| (-MAX_OUTLINE_COORD..=MAX_OUTLINE_COORD).contains(&v);
        if !self.points.iter().all(|p| in_range(p.x) && in_range(p.y)) {
            return Err(RasterError::InvalidOutline("point outside the coordinate range"));
        }
        Ok(())
    }

    /// Cubic controls come in pairs followed by an on-curve point or the
    /// wrap back to the contour start; a contour may not start on one,
    /// and a conic control may not lead into one.
    fn validate_tags(&self, first: usize, last: usize) -> Result<()> {
        let tags = &self.tags[first..=last];
        if tags[0] == Tag::Cubic {
            return Err(RasterError::InvalidOutline("contour starts with a cubic control"));
        }
        let mut i = 0;
        while i < tags.len() {
            if tags[i] == Tag::Cubic {
                if tags.get(i + 1) != Some(&Tag::Cubic) {
                    return Err(RasterError::InvalidOutline("unpaired cubic control"));
                }
                match tags.get(i + 2) {
                    None | Some(Tag::On) => {},
                    Some(_) => return Err(RasterError::InvalidOutline("cubic controls not followed by on-curve point")),
                }
                i += 3;
            } else {
                if tags[i] == Tag::Conic && tags.get(i + 1) == Some(&Tag::Cubic) {
                    return Err(RasterError::InvalidOutline("cubic control after conic control"));
                }
                i += 1;
            }
        }
        Ok(())
    }

    /// Control box in outline units, `(min, max)`
    ///
    /// Control points are included, so the box may be larger than the
    /// exact bounds of the curves.
    pub fn cbox(&self) -> (Vector, Vector) {
        let first = match self.points.first() {
            Some(p) => *p,
            None => return (Vector::ZERO, Vector::ZERO),
        };
        self.points.iter().fold((first, first), |(lo, hi), p| {
            (Vector::new(lo.x.min(p.x), lo.y.min(p.y)),
             Vector::new(hi.x.max(p.x), hi.y.max(p.y)))
        })
    }

    /// Integer pixel bounds covering every point of the outline
    pub fn pixel_bounds(&self) -> ClipBox {
        let (lo, hi) = self.cbox();
        let round = (1 << OUTLINE_BITS) - 1;
        ClipBox {
            x_min: lo.x >> OUTLINE_BITS,
            y_min: lo.y >> OUTLINE_BITS,
            x_max: (hi.x + round) >> OUTLINE_BITS,
            y_max: (hi.y + round) >> OUTLINE_BITS,
        }
    }
}
