//! Coverage accumulation
//!
//! The [`Worker`] turns line segments, given in sub-pixel coordinates,
//! into per pixel area and cover values. A line is walked row by row and,
//! inside each row, column by column. The running values belong to the
//! "current" cell and are committed to the [`CellStore`] whenever the walk
//! moves to another pixel.
//!
//! Cells left of the clipped bounds are folded into column `-1` so their
//! cover still reaches the row; cells right of or above / below the
//! bounds are dropped.

use crate::cell::CellStore;
use crate::clip::ClipBox;
use crate::curve::{self, LineSink};
use crate::decompose::OutlineSink;
use crate::math::{div_mod, fract, trunc, upscale, ONE_PIXEL};
use crate::outline::Vector;

/// Accumulator state for one render call
#[derive(Debug)]
pub struct Worker {
    /// Current cell, relative to the bounds
    ex: i64,
    ey: i64,
    pub min_ex: i64,
    pub max_ex: i64,
    pub min_ey: i64,
    pub max_ey: i64,
    pub count_ex: i64,
    pub count_ey: i64,
    /// Running values of the current cell
    area: i64,
    cover: i64,
    /// The current cell is outside the bounds or none is open yet
    invalid: bool,
    /// Pen position in sub-pixels
    x: i64,
    y: i64,
    cells: CellStore,
}

impl Worker {
    /// Worker over the pixel `bounds`, storing cells in `cells`
    ///
    /// `cells` is cleared first; pass `CellStore::new()` or a store
    /// returned by [`into_cells`](Worker::into_cells) to reuse its memory.
    pub fn new(bounds: &ClipBox, mut cells: CellStore) -> Self {
        let count_ey = bounds.height().max(0);
        cells.reset(count_ey as usize);
        Worker {
            ex: 0,
            ey: 0,
            min_ex: bounds.x_min,
            max_ex: bounds.x_max,
            min_ey: bounds.y_min,
            max_ey: bounds.y_max,
            count_ex: bounds.width().max(0),
            count_ey,
            area: 0,
            cover: 0,
            invalid: true,
            x: 0,
            y: 0,
            cells,
        }
    }
    pub fn cells(&self) -> &CellStore {
        &self.cells
    }
    pub fn into_cells(self) -> CellStore {
        self.cells
    }

    /// Commit the current cell
    pub fn record_cell(&mut self) {
        if self.area | self.cover != 0 {
            debug_assert!(self.ey >= 0 && self.ey < self.count_ey);
            self.cells.record(self.ex, self.ey as usize, self.area, self.cover);
        }
    }

    /// Commit the last open cell, ending accumulation
    pub fn finish(&mut self) {
        if !self.invalid {
            self.record_cell();
        }
        self.invalid = true;
    }

    /// Make pixel (`ex`,`ey`) the current cell, committing the previous one
    /// if it changes
    pub fn set_cell(&mut self, ex: i64, ey: i64) {
        let ey = ey - self.min_ey;
        let mut ex = ex.min(self.max_ex) - self.min_ex;
        if ex < 0 {
            ex = -1;
        }
        if ex != self.ex || ey != self.ey {
            if !self.invalid {
                self.record_cell();
            }
            self.area = 0;
            self.cover = 0;
            self.ex = ex;
            self.ey = ey;
        }
        self.invalid = ey < 0 || ey >= self.count_ey || ex >= self.count_ex;
    }

    /// Open a fresh cell at pixel (`ex`,`ey`) without committing anything
    pub fn start_cell(&mut self, ex: i64, ey: i64) {
        let ex = ex.min(self.max_ex).max(self.min_ex - 1);
        self.area = 0;
        self.cover = 0;
        self.ex = ex - self.min_ex;
        self.ey = ey - self.min_ey;
        self.invalid = false;
        self.set_cell(ex, ey);
    }

    /// Accumulate the part of a line inside row `ey`
    ///
    /// `x1`,`x2` are sub-pixel columns, `y1`,`y2` sub-pixel offsets within
    /// the row, `0..=ONE_PIXEL`.
    pub fn render_scanline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        let mut ex1 = trunc(x1);
        let ex2 = trunc(x2);

        // Horizontal, only the cell changes
        if y1 == y2 {
            self.set_cell(ex2, ey);
            return;
        }

        let mut fx1 = fract(x1);
        let fx2 = fract(x2);
        let mut y1 = y1;

        if ex1 != ex2 {
            let dy = y2 - y1;
            let (p, first, incr, dx) = if x2 > x1 {
                ((ONE_PIXEL - fx1) * dy, ONE_PIXEL, 1, x2 - x1)
            } else {
                (fx1 * dy, 0, -1, x1 - x2)
            };

            let (delta, mut rem_acc) = div_mod(p, dx);
            self.area += (fx1 + first) * delta;
            self.cover += delta;
            y1 += delta;
            ex1 += incr;
            self.set_cell(ex1, ey);

            if ex1 != ex2 {
                let (lift, rem) = div_mod(ONE_PIXEL * dy, dx);
                while ex1 != ex2 {
                    let mut delta = lift;
                    rem_acc += rem;
                    if rem_acc >= dx {
                        rem_acc -= dx;
                        delta += 1;
                    }
                    self.area += ONE_PIXEL * delta;
                    self.cover += delta;
                    y1 += delta;
                    ex1 += incr;
                    self.set_cell(ex1, ey);
                }
            }
            fx1 = ONE_PIXEL - first;
        }

        let dy = y2 - y1;
        self.area += (fx1 + fx2) * dy;
        self.cover += dy;
    }

    /// Accumulate the line from the pen position to (`to_x`,`to_y`)
    pub fn render_line(&mut self, to_x: i64, to_y: i64) {
        let ey1 = trunc(self.y);
        let ey2 = trunc(to_y);

        let above = ey1 < self.min_ey && ey2 < self.min_ey;
        let below = ey1 >= self.max_ey && ey2 >= self.max_ey;
        if !above && !below {
            let fy1 = fract(self.y);
            let fy2 = fract(to_y);
            if ey1 == ey2 {
                let x1 = self.x;
                self.render_scanline(ey1, x1, fy1, to_x, fy2);
            } else if to_x == self.x {
                self.render_vertical(ey1, ey2, fy1, fy2, to_y - self.y);
            } else {
                self.render_rows(ey1, ey2, fy1, fy2, to_x, to_y);
            }
        }
        self.x = to_x;
        self.y = to_y;
    }

    /// Vertical line spanning several rows
    fn render_vertical(&mut self, ey1: i64, ey2: i64, fy1: i64, fy2: i64, dy: i64) {
        let ex = trunc(self.x);
        let two_fx = fract(self.x) << 1;
        let first = if dy > 0 { ONE_PIXEL } else { 0 };

        let delta = first - fy1;
        self.area += two_fx * delta;
        self.cover += delta;

        // Full rows
        let delta = first + first - ONE_PIXEL;
        let area = two_fx * delta;
        let mut ey1 = ey1;
        if dy < 0 {
            ey1 = if ey1 > self.max_ey { self.max_ey.max(ey2) } else { ey1 - 1 };
            self.set_cell(ex, ey1);
            while ey1 > ey2 && ey1 >= self.min_ey {
                self.area += area;
                self.cover += delta;
                ey1 -= 1;
                self.set_cell(ex, ey1);
            }
        } else {
            ey1 = if ey1 < self.min_ey { self.min_ey.min(ey2) } else { ey1 + 1 };
            self.set_cell(ex, ey1);
            while ey1 < ey2 && ey1 < self.max_ey {
                self.area += area;
                self.cover += delta;
                ey1 += 1;
                self.set_cell(ex, ey1);
            }
        }
        if ey1 != ey2 {
            self.set_cell(ex, ey2);
        }

        let delta = fy2 - ONE_PIXEL + first;
        self.area += two_fx * delta;
        self.cover += delta;
    }

    /// Sloped line spanning several rows
    fn render_rows(&mut self, ey1: i64, ey2: i64, fy1: i64, fy2: i64, to_x: i64, to_y: i64) {
        let dx = to_x - self.x;
        let (p, first, incr, dy) = if to_y > self.y {
            ((ONE_PIXEL - fy1) * dx, ONE_PIXEL, 1, to_y - self.y)
        } else {
            (fy1 * dx, 0, -1, self.y - to_y)
        };

        let (delta, mut rem_acc) = div_mod(p, dy);
        let x1 = self.x;
        let mut x = x1 + delta;
        self.render_scanline(ey1, x1, fy1, x, first);

        let mut ey1 = ey1 + incr;
        self.set_cell(trunc(x), ey1);

        if ey1 != ey2 {
            let (lift, rem) = div_mod(ONE_PIXEL * dx, dy);
            while ey1 != ey2 {
                let mut delta = lift;
                rem_acc += rem;
                if rem_acc >= dy {
                    rem_acc -= dy;
                    delta += 1;
                }
                let x2 = x + delta;
                self.render_scanline(ey1, x, ONE_PIXEL - first, x2, first);
                x = x2;
                ey1 += incr;
                self.set_cell(trunc(x), ey1);
            }
        }
        self.render_scanline(ey1, x, ONE_PIXEL - first, to_x, fy2);
    }
}

impl LineSink for Worker {
    fn position(&self) -> Vector {
        Vector::new(self.x, self.y)
    }
    fn row_range(&self) -> (i64, i64) {
        (self.min_ey, self.max_ey)
    }
    fn line_to(&mut self, to: Vector) {
        self.render_line(to.x, to.y);
    }
    fn jump_to(&mut self, to: Vector) {
        self.x = to.x;
        self.y = to.y;
    }
}

/// Outline units are upscaled to sub-pixels on the way in
impl OutlineSink for Worker {
    fn move_to(&mut self, to: Vector) {
        if !self.invalid {
            self.record_cell();
        }
        let x = upscale(to.x);
        let y = upscale(to.y);
        self.start_cell(trunc(x), trunc(y));
        self.x = x;
        self.y = y;
    }
    fn line_to(&mut self, to: Vector) {
        self.render_line(upscale(to.x), upscale(to.y));
    }
    fn conic_to(&mut self, control: Vector, to: Vector) {
        let control = Vector::new(upscale(control.x), upscale(control.y));
        let to = Vector::new(upscale(to.x), upscale(to.y));
        curve::render_conic(self, control, to);
    }
    fn cubic_to(&mut self, control1: Vector, control2: Vector, to: Vector) {
        let control1 = Vector::new(upscale(control1.x), upscale(control1.y));
        let control2 = Vector::new(upscale(control2.x), upscale(control2.y));
        let to = Vector::new(upscale(to.x), upscale(to.y));
        curve::render_cubic(self, control1, control2, to);
    }
}
