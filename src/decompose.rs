//! Outline decomposition
//!
//! Walks the contours of an [`Outline`] and reports them as a stream of
//! move / line / conic / cubic segments to an [`OutlineSink`].

use crate::error::{RasterError, Result};
use crate::outline::{Outline, Tag, Vector};

/// Receiver of decomposed outline segments, in outline units
pub trait OutlineSink {
    /// Start a new contour at `to`
    fn move_to(&mut self, to: Vector);
    /// Straight segment from the current point
    fn line_to(&mut self, to: Vector);
    /// Quadratic segment from the current point
    fn conic_to(&mut self, control: Vector, to: Vector);
    /// Cubic segment from the current point
    fn cubic_to(&mut self, control1: Vector, control2: Vector, to: Vector);
}

/// Decompose every contour of `outline` into `sink`
///
/// Each contour produces exactly one `move_to` and is closed back to its
/// start. A contour that starts on a conic control point starts at its
/// last point if that one is on the curve, or otherwise at the midpoint
/// of its first and last points.
pub fn decompose<S: OutlineSink>(outline: &Outline, sink: &mut S) -> Result<()> {
    let points = &outline.points;
    let tags = &outline.tags;
    if tags.len() != points.len() {
        return Err(RasterError::InvalidOutline("tag count does not match point count"));
    }
    let mut first = 0;
    for &last in &outline.contours {
        if last < first || last >= points.len() {
            return Err(RasterError::InvalidOutline("bad contour end"));
        }
        decompose_contour(points, tags, first, last, sink)?;
        first = last + 1;
    }
    Ok(())
}

fn decompose_contour<S: OutlineSink>(points: &[Vector], tags: &[Tag],
                                     first: usize, last: usize,
                                     sink: &mut S) -> Result<()> {
    let mut v_start = points[first];
    let v_last = points[last];
    let mut limit = last;

    match tags[first] {
        Tag::Cubic => return Err(RasterError::InvalidOutline("contour starts with a cubic control")),
        Tag::Conic => {
            if tags[last] == Tag::On {
                v_start = v_last;
                limit -= 1;
            } else {
                v_start = v_start.midpoint(v_last);
            }
            sink.move_to(v_start);
            return walk(points, tags, first, limit, v_start, sink, true);
        },
        Tag::On => {},
    }
    sink.move_to(v_start);
    walk(points, tags, first + 1, limit, v_start, sink, false)
}

/// Walk the points `next..=limit`, closing the contour to `v_start`
///
/// With `from_control` set the walk begins on the conic control at `next`.
fn walk<S: OutlineSink>(points: &[Vector], tags: &[Tag],
                        next: usize, limit: usize, v_start: Vector,
                        sink: &mut S, from_control: bool) -> Result<()> {
    let mut i = next;
    let mut pending_control = from_control;
    while i <= limit || pending_control {
        let tag = if pending_control { Tag::Conic } else { tags[i] };
        pending_control = false;
        match tag {
            Tag::On => {
                sink.line_to(points[i]);
                i += 1;
            },
            Tag::Conic => {
                let mut v_control = points[i];
                loop {
                    if i >= limit {
                        sink.conic_to(v_control, v_start);
                        return Ok(());
                    }
                    i += 1;
                    let vec = points[i];
                    match tags[i] {
                        Tag::On => {
                            sink.conic_to(v_control, vec);
                            i += 1;
                            break;
                        },
                        Tag::Conic => {
                            sink.conic_to(v_control, v_control.midpoint(vec));
                            v_control = vec;
                        },
                        Tag::Cubic => return Err(RasterError::InvalidOutline("cubic control after conic control")),
                    }
                }
            },
            Tag::Cubic => {
                if i + 1 > limit || tags[i + 1] != Tag::Cubic {
                    return Err(RasterError::InvalidOutline("unpaired cubic control"));
                }
                let (c1, c2) = (points[i], points[i + 1]);
                i += 2;
                if i <= limit {
                    if tags[i] != Tag::On {
                        return Err(RasterError::InvalidOutline("cubic controls not followed by on-curve point"));
                    }
                    sink.cubic_to(c1, c2, points[i]);
                    i += 1;
                } else {
                    sink.cubic_to(c1, c2, v_start);
                    return Ok(());
                }
            },
        }
    }
    sink.line_to(v_start);
    Ok(())
}
