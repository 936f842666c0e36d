mod common;

use common::*;
use grayscan::{
    render, ClipBox, FillRule, Outline, Path, RasterError, RasterFlags, RasterParams, Rect, Tag,
    Vector, MAX_OUTLINE_COORD,
};

fn square() -> Outline {
    let mut p = Path::new();
    p.add_rect(0.0, 0.0, 8.0, 8.0);
    outline(&p, FillRule::NonZero)
}

fn expect_invalid_outline(o: &Outline) {
    let mut called = false;
    let r = render(o, &RasterParams::new(), |_| called = true);
    assert!(matches!(r, Err(RasterError::InvalidOutline(_))), "{:?}", r);
    assert!(!called);
}

#[test_log::test]
fn malformed_outlines() {
    let mut o = square();
    o.contours = vec![o.points.len()];
    expect_invalid_outline(&o);

    let mut o = square();
    o.tags.pop();
    expect_invalid_outline(&o);

    let mut o = square();
    o.contours = vec![3, 2, o.points.len() - 1];
    expect_invalid_outline(&o);

    let mut o = square();
    o.contours.clear();
    expect_invalid_outline(&o);

    let o = Outline { contours: vec![0, 1], ..Outline::default() };
    expect_invalid_outline(&o);

    let mut o = square();
    o.contours = vec![2];
    expect_invalid_outline(&o);
}

#[test_log::test]
fn malformed_cubic_tags() {
    // Lone cubic control
    let mut o = Outline::new();
    o.move_to(Vector::new(0, 0));
    o.line_to(Vector::new(640, 0));
    o.points.push(Vector::new(640, 640));
    o.tags.push(Tag::Cubic);
    o.line_to(Vector::new(0, 640));
    o.end_contour();
    expect_invalid_outline(&o);

    // Cubic pair followed by a conic control
    let mut o = Outline::new();
    o.move_to(Vector::new(0, 0));
    o.points.extend_from_slice(&[Vector::new(640, 0), Vector::new(640, 640), Vector::new(0, 640)]);
    o.tags.extend_from_slice(&[Tag::Cubic, Tag::Cubic, Tag::Conic]);
    o.line_to(Vector::new(0, 320));
    o.end_contour();
    expect_invalid_outline(&o);
}

#[test_log::test]
fn conic_control_into_cubic_pair() {
    let mut o = Outline::new();
    o.move_to(Vector::new(0, 0));
    o.points.extend_from_slice(&[Vector::new(320, 0), Vector::new(640, 0), Vector::new(640, 640)]);
    o.tags.extend_from_slice(&[Tag::Conic, Tag::Cubic, Tag::Cubic]);
    o.line_to(Vector::new(0, 640));
    o.end_contour();
    expect_invalid_outline(&o);
}

#[test_log::test]
fn huge_coordinates_are_rejected() {
    let mut p = Path::new();
    p.move_to(0.0, 0.0).line_to(1e17, 0.0).line_to(0.0, 10.0).close();
    expect_invalid_outline(&outline(&p, FillRule::NonZero));

    let mut p = Path::new();
    p.move_to(-1e300, 0.0).line_to(10.0, 0.0).line_to(0.0, 10.0).close();
    expect_invalid_outline(&outline(&p, FillRule::NonZero));

    // The largest accepted coordinate still renders
    let mut o = Outline::new();
    o.move_to(Vector::new(0, 0));
    o.line_to(Vector::new(640, 0));
    o.cubic_to(Vector::new(640, MAX_OUTLINE_COORD),
               Vector::new(0, MAX_OUTLINE_COORD),
               Vector::new(0, 640));
    o.end_contour();
    let params = RasterParams::with_clip(ClipBox::new(0, 0, 16, 16).unwrap());
    let (spans, rect) = collect(&o, &params).unwrap();
    assert_well_formed(&spans);
    assert!(!rect.is_empty());
}

#[test_log::test]
fn required_mode_flags() {
    let o = square();
    for flags in &[RasterFlags::empty(), RasterFlags::AA, RasterFlags::DIRECT, RasterFlags::CLIP | RasterFlags::AA] {
        let mut params = RasterParams::new();
        params.flags = *flags;
        let mut called = false;
        let r = render(&o, &params, |_| called = true);
        assert!(matches!(r, Err(RasterError::InvalidMode)), "{:?}: {:?}", flags, r);
        assert!(!called);
    }
}

#[test_log::test]
fn contradictory_clip_box() {
    assert!(matches!(ClipBox::new(10, 0, 0, 10), Err(RasterError::InvalidArgument(_))));
    assert!(matches!(ClipBox::new(0, 10, 10, 0), Err(RasterError::InvalidArgument(_))));

    let mut params = RasterParams::new();
    params.clip(ClipBox { x_min: 0, y_min: 10, x_max: 10, y_max: 0 });
    let r = render(&square(), &params, |_| {});
    assert!(matches!(r, Err(RasterError::InvalidArgument(_))), "{:?}", r);

    // Ignored without the clip flag
    params.flags.remove(RasterFlags::CLIP);
    assert!(render(&square(), &params, |_| {}).is_ok());
}

#[test_log::test]
fn empty_outline_is_not_an_error() {
    let (spans, rect) = collect(&Outline::new(), &RasterParams::new()).unwrap();
    assert!(spans.is_empty());
    assert_eq!(rect, Rect::zero());

    // Flags are still checked
    let mut params = RasterParams::new();
    params.flags = RasterFlags::AA;
    assert!(matches!(render(&Outline::new(), &params, |_| {}), Err(RasterError::InvalidMode)));
}

#[test_log::test]
fn error_messages() {
    assert_eq!(RasterError::InvalidMode.to_string(),
               "invalid mode: anti-aliased direct rendering is required");
    assert_eq!(RasterError::InvalidOutline("unpaired cubic control").to_string(),
               "invalid outline: unpaired cubic control");
}
