//! Curve flattening
//!
//! Quadratic and cubic Bezier segments are split at their midpoints
//! (De Casteljau) until each piece is flat enough, then every piece is
//! drawn as a straight chord. All coordinates here are rasterizer
//! sub-pixels.
//!
//! Sub-curves are kept on a fixed size stack with the curve stored end
//! point first, so the piece on top of the stack is always the next one
//! to draw.

use crate::math::{hypot, trunc, ONE_PIXEL};
use crate::outline::Vector;

use log::warn;

/// Maximum number of subdivision levels for a single segment
pub const MAX_LEVELS: usize = 16;

/// Chords longer than this (in sub-pixels) are always split
const MAX_CHORD: i64 = 1 << 23;

/// Receiver of flattened chords
pub trait LineSink {
    /// Current pen position
    fn position(&self) -> Vector;
    /// Rows `[min_ey, max_ey)` that can receive coverage
    fn row_range(&self) -> (i64, i64);
    /// Draw a straight chord from the current position to `to`
    fn line_to(&mut self, to: Vector);
    /// Move the pen to `to` without drawing
    fn jump_to(&mut self, to: Vector);
}

/// Split the quadratic in `base[0..3]` into `base[0..3]` and `base[2..5]`
///
/// The curve is stored end point first; after the split `base[0..3]` is
/// the second half and `base[2..5]` the first.
pub fn split_conic(base: &mut [Vector]) {
    base[4].x = base[2].x;
    let b = base[1].x;
    let a = (base[2].x + b) / 2;
    base[3].x = a;
    let b = (base[0].x + b) / 2;
    base[1].x = b;
    base[2].x = (a + b) / 2;

    base[4].y = base[2].y;
    let b = base[1].y;
    let a = (base[2].y + b) / 2;
    base[3].y = a;
    let b = (base[0].y + b) / 2;
    base[1].y = b;
    base[2].y = (a + b) / 2;
}

/// Split the cubic in `base[0..4]` into `base[0..4]` and `base[3..7]`
pub fn split_cubic(base: &mut [Vector]) {
    base[6].x = base[3].x;
    let c = base[1].x;
    let d = base[2].x;
    let a = (base[0].x + c) / 2;
    base[1].x = a;
    let b = (base[3].x + d) / 2;
    base[5].x = b;
    let c = (c + d) / 2;
    let a = (a + c) / 2;
    base[2].x = a;
    let b = (b + c) / 2;
    base[4].x = b;
    base[3].x = (a + b) / 2;

    base[6].y = base[3].y;
    let c = base[1].y;
    let d = base[2].y;
    let a = (base[0].y + c) / 2;
    base[1].y = a;
    let b = (base[3].y + d) / 2;
    base[5].y = b;
    let c = (c + d) / 2;
    let a = (a + c) / 2;
    base[2].y = a;
    let b = (b + c) / 2;
    base[4].y = b;
    base[3].y = (a + b) / 2;
}

/// True when every point lies entirely above or entirely below the rows
fn outside_rows(pts: &[Vector], min_ey: i64, max_ey: i64) -> bool {
    pts.iter().all(|p| trunc(p.y) >= max_ey) || pts.iter().all(|p| trunc(p.y) < min_ey)
}

/// Flatten the quadratic from the current position through `control`
/// to `to`
///
/// The number of chords is a power of two chosen up front from the
/// curve's second difference; each split quarters that error.
pub fn render_conic<S: LineSink>(sink: &mut S, control: Vector, to: Vector) {
    let mut arc = [Vector::ZERO; MAX_LEVELS * 2 + 3];
    arc[0] = to;
    arc[1] = control;
    arc[2] = sink.position();

    let (min_ey, max_ey) = sink.row_range();
    if outside_rows(&arc[..3], min_ey, max_ey) {
        sink.jump_to(to);
        return;
    }

    let dx = (arc[2].x + arc[0].x - 2 * arc[1].x).abs();
    let dy = (arc[2].y + arc[0].y - 2 * arc[1].y).abs();
    let mut err = dx.max(dy);
    let mut levels = 0;
    while err > ONE_PIXEL / 4 && levels < MAX_LEVELS {
        err >>= 2;
        levels += 1;
    }
    if err > ONE_PIXEL / 4 {
        warn!("conic needs more than {} subdivisions, error {}", MAX_LEVELS, err);
    }

    let mut draw: u32 = 1 << levels;
    let mut top = 0;
    loop {
        let mut split: u32 = 1;
        while draw & split == 0 {
            split_conic(&mut arc[top..]);
            top += 2;
            split <<= 1;
        }
        sink.line_to(arc[top]);
        draw -= 1;
        if draw == 0 {
            break;
        }
        top -= 2;
    }
}

/// Flatten the cubic from the current position through `control1` and
/// `control2` to `to`
///
/// A piece is drawn once both control points lie within `L / 6` pixels of
/// its chord of length `L` and project inside that chord.
pub fn render_cubic<S: LineSink>(sink: &mut S, control1: Vector, control2: Vector, to: Vector) {
    let mut arc = [Vector::ZERO; MAX_LEVELS * 3 + 4];
    arc[0] = to;
    arc[1] = control2;
    arc[2] = control1;
    arc[3] = sink.position();

    let (min_ey, max_ey) = sink.row_range();
    if outside_rows(&arc[..4], min_ey, max_ey) {
        sink.jump_to(to);
        return;
    }

    let mut top = 0;
    let mut capped = false;
    loop {
        if top / 3 < MAX_LEVELS && !is_flat(&arc[top..top + 4]) {
            split_cubic(&mut arc[top..]);
            top += 3;
            continue;
        }
        if top / 3 >= MAX_LEVELS && !capped {
            warn!("cubic needs more than {} subdivisions", MAX_LEVELS);
            capped = true;
        }
        sink.line_to(arc[top]);
        if top == 0 {
            return;
        }
        top -= 3;
    }
}

/// Flatness test for a cubic stored end point first
fn is_flat(base: &[Vector]) -> bool {
    let dx = base[3].x - base[0].x;
    let dy = base[3].y - base[0].y;
    let len = hypot(dx, dy);
    if len >= MAX_CHORD {
        return false;
    }
    let s_limit = len * (ONE_PIXEL / 6);

    let dx1 = base[1].x - base[0].x;
    let dy1 = base[1].y - base[0].y;
    if (dy * dx1 - dx * dy1).abs() > s_limit {
        return false;
    }
    let dx2 = base[2].x - base[0].x;
    let dy2 = base[2].y - base[0].y;
    if (dy * dx2 - dx * dy2).abs() > s_limit {
        return false;
    }
    // Both controls must project between the end points. A short chord
    // does not bound the controls, so widen before multiplying.
    let proj = |cx: i64, cy: i64| {
        i128::from(cx) * i128::from(cx - dx) + i128::from(cy) * i128::from(cy - dy)
    };
    proj(dx1, dy1) <= 0 && proj(dx2, dy2) <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Chords {
        pos: Vector,
        rows: (i64, i64),
        lines: Vec<Vector>,
    }

    impl Chords {
        fn at(x: i64, y: i64) -> Self {
            Chords { pos: Vector::new(x, y), rows: (-1000, 1000), lines: vec![] }
        }
    }

    impl LineSink for Chords {
        fn position(&self) -> Vector { self.pos }
        fn row_range(&self) -> (i64, i64) { self.rows }
        fn line_to(&mut self, to: Vector) {
            self.lines.push(to);
            self.pos = to;
        }
        fn jump_to(&mut self, to: Vector) { self.pos = to; }
    }

    #[test]
    fn flat_conic_is_one_chord() {
        let mut s = Chords::at(0, 0);
        render_conic(&mut s, Vector::new(512, 0), Vector::new(1024, 0));
        assert_eq!(s.lines, vec![Vector::new(1024, 0)]);
    }

    #[test]
    fn conic_chord_count_is_power_of_two() {
        let mut s = Chords::at(0, 0);
        let to = Vector::new(20 * ONE_PIXEL, 0);
        render_conic(&mut s, Vector::new(10 * ONE_PIXEL, 20 * ONE_PIXEL), to);
        assert!(s.lines.len().is_power_of_two());
        assert!(s.lines.len() > 1);
        assert_eq!(*s.lines.last().unwrap(), to);
        // Chords advance monotonically in x for this arch
        assert!(s.lines.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn cubic_ends_at_target() {
        let mut s = Chords::at(0, 0);
        let to = Vector::new(40 * ONE_PIXEL, 0);
        render_cubic(&mut s, Vector::new(0, 40 * ONE_PIXEL),
                     Vector::new(40 * ONE_PIXEL, 40 * ONE_PIXEL), to);
        assert!(s.lines.len() > 4);
        assert_eq!(*s.lines.last().unwrap(), to);
    }

    #[test]
    fn cubic_chords_stay_close_to_curve() {
        let mut s = Chords::at(0, 0);
        let r = 50 * ONE_PIXEL;
        let k = (r as f64 * 0.552_284_75) as i64;
        render_cubic(&mut s, Vector::new(k, 0), Vector::new(r, r - k), Vector::new(r, r));
        // Every chord end lies on the quarter circle centred at (0, r)
        for p in &s.lines {
            let d = (p.x as f64).hypot((p.y - r) as f64);
            assert!((d - r as f64).abs() < ONE_PIXEL as f64 / 2.0, "{:?} off by {}", p, d - r as f64);
        }
    }

    #[test]
    fn closed_cubic_with_far_controls() {
        let far = 1 << 31;
        let mut s = Chords::at(0, 0);
        render_cubic(&mut s, Vector::new(far, far), Vector::new(-far, far), Vector::ZERO);
        assert!(s.lines.len() > 1);
        assert_eq!(*s.lines.last().unwrap(), Vector::ZERO);
    }

    #[test]
    fn segments_outside_rows_are_skipped() {
        let mut s = Chords::at(0, 0);
        s.rows = (10, 20);
        render_conic(&mut s, Vector::new(100, 100), Vector::new(200, 0));
        render_cubic(&mut s, Vector::new(0, 100), Vector::new(100, 100), Vector::new(300, 0));
        assert!(s.lines.is_empty());
        assert_eq!(s.pos, Vector::new(300, 0));
    }
}
