//! Coverage cells
//!
//! Cells live in a growable arena. Each row keeps the index of its first
//! cell and every cell links to the next one in the same row, so a row is
//! a singly linked list sorted by ascending `x` with at most one cell per
//! column.

use log::trace;

/// Accumulated area and cover of one pixel
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Cell {
    /// Column relative to the left edge of the clipped bounds, `-1` collects
    /// everything to the left of it
    pub x: i64,
    /// Net vertical sub-pixel distance crossed inside the pixel
    pub cover: i64,
    /// Twice the signed area between the edges and the left side of the pixel
    pub area: i64,
    /// Index of the next cell in the same row
    pub next: Option<u32>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Arena of cells with one sorted list per row
#[derive(Debug, Default)]
pub struct CellStore {
    cells: Vec<Cell>,
    rows: Vec<Option<u32>>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }
    /// Drop all cells and prepare `count_ey` empty rows
    ///
    /// Allocations are kept so a store can be reused across render calls.
    pub fn reset(&mut self, count_ey: usize) {
        self.cells.clear();
        self.rows.clear();
        self.rows.resize(count_ey, None);
    }
    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
    /// Number of cells stored over all rows
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the cell at column `x` in row `y`, created if missing
    ///
    /// `y` must be less than [`num_rows`](CellStore::num_rows).
    pub fn find(&mut self, x: i64, y: usize) -> usize {
        let mut prev: Option<usize> = None;
        let mut cur = self.rows[y];
        while let Some(i) = cur {
            let cell = &self.cells[i as usize];
            if cell.x > x {
                break;
            }
            if cell.x == x {
                return i as usize;
            }
            prev = Some(i as usize);
            cur = cell.next;
        }
        let n = self.cells.len();
        self.cells.push(Cell { x, cover: 0, area: 0, next: cur });
        match prev {
            None => self.rows[y] = Some(n as u32),
            Some(p) => self.cells[p].next = Some(n as u32),
        }
        n
    }

    /// Add `area` and `cover` to the cell at (`x`,`y`)
    ///
    /// Nothing is stored when both are zero.
    pub fn record(&mut self, x: i64, y: usize, area: i64, cover: i64) {
        if area == 0 && cover == 0 {
            return;
        }
        let i = self.find(x, y);
        let cell = &mut self.cells[i];
        cell.area += area;
        cell.cover += cover;
        trace!("record cell x {} y {} area {} cover {}", x, y, cell.area, cell.cover);
    }

    /// Cells of row `y` in ascending `x`
    pub fn row(&self, y: usize) -> RowIter<'_> {
        RowIter { cells: &self.cells, cur: self.rows.get(y).copied().flatten() }
    }
    /// Rows that hold at least one cell, with their index
    pub fn rows(&self) -> impl Iterator<Item = (usize, RowIter<'_>)> + '_ {
        self.rows.iter()
            .enumerate()
            .filter(|(_, head)| head.is_some())
            .map(move |(y, &head)| (y, RowIter { cells: &self.cells, cur: head }))
    }
}

/// Iterator over the cells of one row
#[derive(Debug, Clone)]
pub struct RowIter<'a> {
    cells: &'a [Cell],
    cur: Option<u32>,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = &'a Cell;
    fn next(&mut self) -> Option<&'a Cell> {
        let cell = &self.cells[self.cur? as usize];
        self.cur = cell.next;
        Some(cell)
    }
}
