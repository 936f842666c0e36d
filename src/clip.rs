//! Clipping Region and Rectangles

use crate::error::{RasterError, Result};

/// Largest pixel coordinate the rasterizer accepts on either axis
pub const MAX_COORD: i64 = 1 << 23;

/// Rectangle given by its corners
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}

impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        Self { x1, y1, x2, y2 }
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
    /// Expand if the rectangle is outside
    pub fn expand_rect(&mut self, r: &Rectangle<T>) {
        self.expand(r.x1, r.y1);
        self.expand(r.x2, r.y2);
    }
}

/// Integer pixel clip box, `[x_min, x_max) x [y_min, y_max)`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClipBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl Default for ClipBox {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ClipBox {
    /// Create a clip box, failing if a minimum exceeds its maximum
    ///
    ///     use grayscan::ClipBox;
    ///     assert!(ClipBox::new(0, 0, 10, 10).is_ok());
    ///     assert!(ClipBox::new(10, 0, 0, 10).is_err());
    ///
    pub fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Result<Self> {
        let b = Self { x_min, y_min, x_max, y_max };
        b.validate()?;
        Ok(b)
    }
    /// Clip box covering the whole coordinate range of the rasterizer
    pub fn unbounded() -> Self {
        Self { x_min: -MAX_COORD, y_min: -MAX_COORD,
               x_max: MAX_COORD - 1, y_max: MAX_COORD - 1 }
    }
    /// Clip box from a floating point rectangle, edges are truncated
    pub fn from_rect(x: f64, y: f64, w: f64, h: f64) -> Result<Self> {
        Self::new(x.trunc() as i64, y.trunc() as i64,
                  (x + w).trunc() as i64, (y + h).trunc() as i64)
    }
    /// Check `x_min <= x_max` and `y_min <= y_max`
    pub fn validate(&self) -> Result<()> {
        if self.x_min > self.x_max {
            return Err(RasterError::InvalidArgument("clip box x_min > x_max"));
        }
        if self.y_min > self.y_max {
            return Err(RasterError::InvalidArgument("clip box y_min > y_max"));
        }
        Ok(())
    }
    /// Width in pixels
    pub fn width(&self) -> i64 {
        self.x_max - self.x_min
    }
    /// Height in pixels
    pub fn height(&self) -> i64 {
        self.y_max - self.y_min
    }
    /// True when the box contains no pixel
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
    /// True if the pixel (`x`,`y`) lies inside
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }
    /// Intersection of two boxes, `None` if they do not overlap
    pub fn intersect(&self, other: &ClipBox) -> Option<ClipBox> {
        if self.x_max <= other.x_min || self.x_min >= other.x_max ||
           self.y_max <= other.y_min || self.y_min >= other.y_max {
            return None;
        }
        Some(ClipBox {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_max: self.x_max.min(other.x_max),
            y_max: self.y_max.min(other.y_max),
        })
    }
}

/// Pixel rectangle as origin and size
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }
    /// Zero sized rectangle at the origin
    pub fn zero() -> Self {
        Self::default()
    }
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}
