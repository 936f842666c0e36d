#![allow(dead_code)]

use grayscan::{render, FillRule, Matrix, Outline, Path, RasterParams, Rect, Result, Span};

/// Render and keep every span
pub fn collect(outline: &Outline, params: &RasterParams) -> Result<(Vec<Span>, Rect)> {
    let mut spans = vec![];
    let rect = render(outline, params, |batch| spans.extend_from_slice(batch))?;
    Ok((spans, rect))
}

pub fn outline(path: &Path, fill_rule: FillRule) -> Outline {
    Outline::from_path(path, &Matrix::identity(), fill_rule)
}

pub fn coverage_sum(spans: &[Span]) -> i64 {
    spans.iter().map(|s| s.len * i64::from(s.coverage)).sum()
}

pub fn row(spans: &[Span], y: i64) -> Vec<Span> {
    spans.iter().filter(|s| s.y == y).copied().collect()
}

/// Spans sorted by row then column, no overlap, no zero coverage
pub fn assert_well_formed(spans: &[Span]) {
    for s in spans {
        assert!(s.len >= 1, "{:?}", s);
        assert!(s.coverage > 0, "{:?}", s);
    }
    for w in spans.windows(2) {
        let (a, b) = (w[0], w[1]);
        assert!(a.y < b.y || (a.y == b.y && a.end() <= b.x), "{:?} before {:?}", a, b);
    }
}

/// Regular polygon inscribed in a circle, in pixels
pub fn polygon(cx: f64, cy: f64, r: f64, n: usize) -> Path {
    let mut p = Path::new();
    for i in 0..n {
        let t = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
        let (x, y) = (cx + r * t.cos(), cy + r * t.sin());
        if i == 0 {
            p.move_to(x, y);
        } else {
            p.line_to(x, y);
        }
    }
    p.close();
    p
}
