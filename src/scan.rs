//! Scanline sweep and span output
//!
//! After accumulation every row of cells is swept left to right. The
//! running cover gives the coverage between cells, the cell's own area
//! gives the partial coverage of the pixel it sits on. Coverage is turned
//! into a byte by the fill rule and emitted as horizontal [`Span`]s.

use crate::cell::CellStore;
use crate::clip::{Rect, MAX_COORD};
use crate::math::{ONE_PIXEL, PIXEL_BITS};
use crate::outline::FillRule;

use log::trace;

/// Number of spans buffered before they are handed to the callback
pub const MAX_GRAY_SPANS: usize = 256;

/// Horizontal run of pixels sharing one coverage value
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    /// First column
    pub x: i64,
    /// Number of pixels, at least 1
    pub len: i64,
    /// Row
    pub y: i64,
    /// Coverage, 255 is fully covered
    pub coverage: u8,
}

impl Span {
    pub fn new(x: i64, len: i64, y: i64, coverage: u8) -> Self {
        Self { x, len, y, coverage }
    }
    /// Column just past the last pixel
    pub fn end(&self) -> i64 {
        self.x + self.len
    }
}

/// Coverage byte for the doubled signed `area` of a pixel
///
/// Non-zero clamps to 255. Even-odd folds the value modulo 512 and
/// reflects the upper half so that two overlapping layers cancel.
///
///     use grayscan::{coverage, FillRule};
///     let full = 2 * 256 * 256;
///     assert_eq!(coverage(full, FillRule::NonZero), 255);
///     assert_eq!(coverage(2 * full, FillRule::NonZero), 255);
///     assert_eq!(coverage(2 * full, FillRule::EvenOdd), 0);
///     assert_eq!(coverage(-full / 2, FillRule::EvenOdd), 128);
///
pub fn coverage(area: i64, fill_rule: FillRule) -> u8 {
    let mut cov = (area >> (PIXEL_BITS * 2 + 1 - 8)).abs();
    match fill_rule {
        FillRule::EvenOdd => {
            cov &= 511;
            if cov > 256 {
                cov = 512 - cov;
            } else if cov == 256 {
                cov = 255;
            }
        },
        FillRule::NonZero => {
            if cov >= 256 {
                cov = 255;
            }
        },
    }
    cov as u8
}

/// Span batcher
///
/// Collects up to [`MAX_GRAY_SPANS`] spans, merging each new one into the
/// previous one when they touch on the same row with equal coverage, and
/// hands full batches to the callback. Cell coordinates are relative to
/// `origin`; spans carry absolute pixel coordinates.
pub struct SpanBuffer<F> where F: FnMut(&[Span]) {
    spans: Vec<Span>,
    callback: F,
    origin_x: i64,
    origin_y: i64,
    fill_rule: FillRule,
    x_min: i64,
    x_max: i64,
    y_first: Option<i64>,
    y_last: i64,
    flushes: usize,
    emitted: usize,
}

impl<F> SpanBuffer<F> where F: FnMut(&[Span]) {
    pub fn new(origin_x: i64, origin_y: i64, fill_rule: FillRule, callback: F) -> Self {
        Self {
            spans: Vec::with_capacity(MAX_GRAY_SPANS),
            callback,
            origin_x,
            origin_y,
            fill_rule,
            x_min: i64::MAX,
            x_max: i64::MIN,
            y_first: None,
            y_last: 0,
            flushes: 0,
            emitted: 0,
        }
    }

    /// Emit `count` pixels at cell (`x`,`y`) with the doubled area `area`
    ///
    /// Zero coverage produces nothing.
    pub fn hline(&mut self, x: i64, y: i64, area: i64, count: i64) {
        let cov = coverage(area, self.fill_rule);
        if cov == 0 {
            return;
        }
        let x = (x + self.origin_x).min(MAX_COORD - 1);
        let y = (y + self.origin_y).min(MAX_COORD - 1);

        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x + count);
        if self.y_first.is_none() {
            self.y_first = Some(y);
        }
        self.y_last = y;

        if let Some(last) = self.spans.last_mut() {
            if last.y == y && last.end() == x && last.coverage == cov {
                last.len += count;
                return;
            }
        }
        if self.spans.len() >= MAX_GRAY_SPANS {
            self.flush();
        }
        self.spans.push(Span::new(x, count, y, cov));
    }

    /// Hand all buffered spans to the callback
    pub fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        trace!("flush {} spans", self.spans.len());
        (self.callback)(&self.spans);
        self.emitted += self.spans.len();
        self.flushes += 1;
        self.spans.clear();
    }

    /// Number of callback invocations so far
    pub fn flushes(&self) -> usize {
        self.flushes
    }
    /// Number of spans handed to the callback so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Bounding rectangle of every span passed to [`hline`](SpanBuffer::hline)
    ///
    /// `y` is the row of the first span and the height runs to the row of
    /// the last one; rows are produced in ascending order.
    pub fn bounds(&self) -> Rect {
        match self.y_first {
            None => Rect::zero(),
            Some(y) => Rect::new(self.x_min, y, self.x_max - self.x_min, self.y_last - y + 1),
        }
    }
}

/// Sweep every row of `cells` into `out`
///
/// `count_ex` is the width of the clipped bounds; coverage still running
/// after the last cell of a row is extended up to it.
pub fn sweep<F>(cells: &CellStore, count_ex: i64, out: &mut SpanBuffer<F>) where F: FnMut(&[Span]) {
    for (y, row) in cells.rows() {
        let y = y as i64;
        let mut cover = 0;
        let mut x = 0;
        for cell in row {
            if cell.x > x && cover != 0 {
                out.hline(x, y, cover * (ONE_PIXEL * 2), cell.x - x);
            }
            cover += cell.cover;
            let area = cover * (ONE_PIXEL * 2) - cell.area;
            if area != 0 && cell.x >= 0 {
                out.hline(cell.x, y, area, 1);
            }
            x = cell.x + 1;
        }
        if count_ex > x && cover != 0 {
            out.hline(x, y, cover * (ONE_PIXEL * 2), count_ex - x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_odd_reflects() {
        let unit = 2 * ONE_PIXEL; // one coverage step
        assert_eq!(coverage(256 * unit, FillRule::EvenOdd), 255);
        assert_eq!(coverage(300 * unit, FillRule::EvenOdd), 212);
        assert_eq!(coverage(512 * unit, FillRule::EvenOdd), 0);
        assert_eq!(coverage(-300 * unit, FillRule::NonZero), 255);
        assert_eq!(coverage(100 * unit, FillRule::NonZero), 100);
    }

    #[test]
    fn merges_adjacent_equal_spans() {
        let mut got = vec![];
        let mut b = SpanBuffer::new(10, 20, FillRule::NonZero, |s: &[Span]| got.extend_from_slice(s));
        let full = 2 * ONE_PIXEL * ONE_PIXEL;
        b.hline(0, 0, full, 2);
        b.hline(2, 0, full, 1);
        b.hline(3, 0, full / 2, 1);
        b.hline(5, 0, 0, 3);
        b.hline(0, 1, full, 1);
        let r = b.bounds();
        b.flush();
        drop(b);
        assert_eq!(got, vec![
            Span::new(10, 3, 20, 255),
            Span::new(13, 1, 20, 128),
            Span::new(10, 1, 21, 255),
        ]);
        assert_eq!(r, Rect::new(10, 20, 4, 2));
    }

    #[test]
    fn flushes_full_batches() {
        let mut sizes = vec![];
        let mut b = SpanBuffer::new(0, 0, FillRule::NonZero, |s: &[Span]| sizes.push(s.len()));
        let full = 2 * ONE_PIXEL * ONE_PIXEL;
        for i in 0..300 {
            b.hline(2 * i, 0, full, 1);
        }
        b.flush();
        assert_eq!(b.flushes(), 2);
        assert_eq!(b.emitted(), 300);
        drop(b);
        assert_eq!(sizes, vec![MAX_GRAY_SPANS, 300 - MAX_GRAY_SPANS]);
    }

    #[test]
    fn sweep_fills_between_cells() {
        let mut cells = CellStore::new();
        cells.reset(2);
        // Left edge clipped into column -1, right edge at column 7
        cells.record(-1, 0, 0, -ONE_PIXEL);
        cells.record(7, 0, 0, ONE_PIXEL);
        // Pixel square at column 2
        cells.record(2, 1, 0, -ONE_PIXEL);
        cells.record(3, 1, 0, ONE_PIXEL);
        let mut got = vec![];
        let mut b = SpanBuffer::new(3, 0, FillRule::NonZero, |s: &[Span]| got.extend_from_slice(s));
        sweep(&cells, 17, &mut b);
        b.flush();
        drop(b);
        assert_eq!(got, vec![Span::new(3, 7, 0, 255), Span::new(5, 1, 1, 255)]);
    }

    #[test]
    fn sweep_extends_open_cover_to_right_edge() {
        let mut cells = CellStore::new();
        cells.reset(1);
        cells.record(4, 0, 0, ONE_PIXEL);
        let mut got = vec![];
        let mut b = SpanBuffer::new(0, 0, FillRule::NonZero, |s: &[Span]| got.extend_from_slice(s));
        sweep(&cells, 10, &mut b);
        b.flush();
        drop(b);
        assert_eq!(got, vec![Span::new(4, 6, 0, 255)]);
    }
}
