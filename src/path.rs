//! Paths in user space
//!
//! A [`Path`] is the floating point input most callers build; it is
//! turned into a fixed point [`Outline`](crate::Outline) before rendering.
//!
//!     let mut path = grayscan::Path::new();
//!     path.move_to(10.0, 10.0);
//!     path.line_to(50.0, 90.0);
//!     path.line_to(90.0, 10.0);
//!     path.close();
//!     let r = path.bounding_rect().unwrap();
//!     assert_eq!((r.x1, r.y1, r.x2, r.y2), (10.0, 10.0, 90.0, 90.0));
//!

use crate::clip::Rectangle;

/// Kappa for approximating a quarter circle with a cubic
const KAPPA: f64 = 0.552_284_749_830_793_4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathCommand {
    /// Start a new sub-path, one point
    MoveTo,
    /// Straight segment, one point
    LineTo,
    /// Cubic segment, three points: two controls and the end point
    CurveTo,
    /// Close the sub-path, one point: the sub-path start
    Close,
}

/// Point in user space
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathOrientation {
    Clockwise,
    CounterClockwise,
}

/// Sequence of path commands and their points
#[derive(Debug, Default, Clone)]
pub struct Path {
    pub elements: Vec<PathCommand>,
    pub points: Vec<Point>,
    start: Point,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn clear(&mut self) {
        self.elements.clear();
        self.points.clear();
        self.start = Point::default();
    }
    /// Last point of the path, or the origin if empty
    pub fn current_point(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathCommand::MoveTo);
        self.points.push(Point::new(x, y));
        self.start = Point::new(x, y);
        self
    }
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathCommand::LineTo);
        self.points.push(Point::new(x, y));
        self
    }
    /// Cubic Bezier from the current point
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> &mut Self {
        self.elements.push(PathCommand::CurveTo);
        self.points.push(Point::new(x1, y1));
        self.points.push(Point::new(x2, y2));
        self.points.push(Point::new(x3, y3));
        self
    }
    /// Quadratic Bezier from the current point, stored as its cubic equivalent
    pub fn quad_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        let p0 = self.current_point();
        let cx0 = 2.0 / 3.0 * x1 + 1.0 / 3.0 * p0.x;
        let cy0 = 2.0 / 3.0 * y1 + 1.0 / 3.0 * p0.y;
        let cx1 = 2.0 / 3.0 * x1 + 1.0 / 3.0 * x2;
        let cy1 = 2.0 / 3.0 * y1 + 1.0 / 3.0 * y2;
        self.curve_to(cx0, cy0, cx1, cy1, x2, y2)
    }
    /// Close the current sub-path
    ///
    /// Does nothing on an empty path or one that is already closed
    pub fn close(&mut self) -> &mut Self {
        match self.elements.last() {
            None | Some(PathCommand::Close) => {},
            Some(_) => {
                self.elements.push(PathCommand::Close);
                self.points.push(self.start);
            }
        }
        self
    }
    /// Closed rectangle, clockwise in a y-down coordinate system
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.line_to(x, y);
        self.close()
    }
    /// Closed rectangle with elliptic corners of radii `rx`,`ry`
    pub fn add_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) -> &mut Self {
        if rx == 0.0 || ry == 0.0 {
            return self.add_rect(x, y, w, h);
        }
        let rx = rx.min(w * 0.5);
        let ry = ry.min(h * 0.5);
        let right = x + w;
        let bottom = y + h;
        let cpx = rx * KAPPA;
        let cpy = ry * KAPPA;

        self.move_to(x, y + ry);
        self.curve_to(x, y + ry - cpy, x + rx - cpx, y, x + rx, y);
        self.line_to(right - rx, y);
        self.curve_to(right - rx + cpx, y, right, y + ry - cpy, right, y + ry);
        self.line_to(right, bottom - ry);
        self.curve_to(right, bottom - ry + cpy, right - rx + cpx, bottom, right - rx, bottom);
        self.line_to(x + rx, bottom);
        self.curve_to(x + rx - cpx, bottom, x, bottom - ry + cpy, x, bottom - ry);
        self.line_to(x, y + ry);
        self.close()
    }
    /// Closed ellipse made of four cubic arcs
    pub fn add_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> &mut Self {
        let left = cx - rx;
        let top = cy - ry;
        let right = cx + rx;
        let bottom = cy + ry;
        let cpx = rx * KAPPA;
        let cpy = ry * KAPPA;

        self.move_to(cx, top);
        self.curve_to(cx + cpx, top, right, cy - cpy, right, cy);
        self.curve_to(right, cy + cpy, cx + cpx, bottom, cx, bottom);
        self.curve_to(cx - cpx, bottom, left, cy + cpy, left, cy);
        self.curve_to(left, cy - cpy, cx - cpx, top, cx, top);
        self.close()
    }
    /// Bounding box of all points, including curve control points
    pub fn bounding_rect(&self) -> Option<Rectangle<f64>> {
        let first = self.points.first()?;
        let mut r = Rectangle::new(first.x, first.y, first.x, first.y);
        for p in &self.points {
            r.expand(p.x, p.y);
        }
        Some(r)
    }
    /// Orientation of the first sub-path from its signed area
    ///
    /// Control points are treated as polygon vertices, which is enough
    /// to tell the winding of well behaved shapes. Positive area in a
    /// y-down coordinate system is clockwise on screen.
    pub fn orientation(&self) -> Option<PathOrientation> {
        let mut end = self.points.len();
        let mut k = 0;
        for (i, cmd) in self.elements.iter().enumerate() {
            if *cmd == PathCommand::MoveTo && i > 0 {
                end = k;
                break;
            }
            k += if *cmd == PathCommand::CurveTo { 3 } else { 1 };
        }
        let pts = &self.points[..end.min(self.points.len())];
        if pts.len() < 3 {
            return None;
        }
        let n = pts.len();
        let area: f64 = (0..n)
            .map(|i| {
                let (p1, p2) = (pts[i], pts[(i + 1) % n]);
                p1.x * p2.y - p1.y * p2.x
            })
            .sum();
        if area > 0.0 {
            Some(PathOrientation::Clockwise)
        } else {
            Some(PathOrientation::CounterClockwise)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_idempotent() {
        let mut p = Path::new();
        p.close();
        assert!(p.is_empty());
        p.move_to(1.0, 2.0).line_to(3.0, 4.0).close().close();
        assert_eq!(p.elements.len(), 3);
        assert_eq!(p.current_point(), Point::new(1.0, 2.0));
    }

    #[test]
    fn rect_orientation() {
        let mut p = Path::new();
        p.add_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(p.orientation(), Some(PathOrientation::Clockwise));
        let mut q = Path::new();
        q.move_to(0.0, 0.0).line_to(0.0, 10.0).line_to(10.0, 10.0).line_to(10.0, 0.0).close();
        assert_eq!(q.orientation(), Some(PathOrientation::CounterClockwise));
    }
}
