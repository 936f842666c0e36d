mod common;

use common::*;
use grayscan::{FillRule, Outline, Path, RasterParams, Vector};

use std::f64::consts::PI;

fn rendered_area(o: &Outline) -> f64 {
    let (spans, _) = collect(o, &RasterParams::new()).unwrap();
    assert_well_formed(&spans);
    coverage_sum(&spans) as f64 / 255.0
}

#[test_log::test]
fn polygon_area_converges_to_circle() {
    let r = 50.0;
    let exact = PI * r * r;
    let errors: Vec<f64> = [8, 16, 32, 64, 128]
        .iter()
        .map(|&n| {
            let o = outline(&polygon(64.0, 64.0, r, n), FillRule::NonZero);
            (rendered_area(&o) - exact).abs()
        })
        .collect();
    for w in errors.windows(2) {
        assert!(w[1] < w[0], "errors not decreasing: {:?}", errors);
    }
    assert!(errors[errors.len() - 1] / exact < 0.002, "{:?}", errors);
}

#[test_log::test]
fn cubic_circle_area() {
    let r = 50.0;
    let mut p = Path::new();
    p.add_ellipse(64.0, 64.0, r, r);
    let got = rendered_area(&outline(&p, FillRule::NonZero));
    let exact = PI * r * r;
    assert!((got - exact).abs() / exact < 0.01, "{} vs {}", got, exact);
}

#[test_log::test]
fn conic_circle_area() {
    // 16 quadratic arcs, controls on the tangent intersections
    let (cx, cy, r) = (64.0, 64.0, 50.0);
    let n = 16;
    let half = PI / n as f64;
    let mut o = Outline::new();
    o.move_to(Vector::from_f64(cx + r, cy));
    for i in 0..n {
        let t = 2.0 * half * i as f64;
        let rc = r / half.cos();
        let c = Vector::from_f64(cx + rc * (t + half).cos(), cy + rc * (t + half).sin());
        let e = Vector::from_f64(cx + r * (t + 2.0 * half).cos(), cy + r * (t + 2.0 * half).sin());
        o.conic_to(c, e);
    }
    o.end_contour();
    assert!(o.validate().is_ok());

    let got = rendered_area(&o);
    let exact = PI * r * r;
    assert!((got - exact).abs() / exact < 0.01, "{} vs {}", got, exact);
}

#[test_log::test]
fn ellipse_under_transform() {
    let mut p = Path::new();
    p.add_ellipse(0.0, 0.0, 10.0, 10.0);
    let mut m = grayscan::Matrix::new_scale(3.0, 1.5);
    m.translate(50.0, 30.0);
    let o = Outline::from_path(&p, &m, FillRule::NonZero);
    let got = rendered_area(&o);
    let exact = PI * 30.0 * 15.0;
    assert!((got - exact).abs() / exact < 0.01, "{} vs {}", got, exact);
}
