//! Fixed point helpers
//!
//! The rasterizer works in sub-pixel units of `1 / ONE_PIXEL` while outlines
//! are given in 26.6 fixed point (64 units per pixel).

/// Number of fractional bits of a rasterizer coordinate
pub const PIXEL_BITS: i64 = 8;
/// One pixel in rasterizer sub-pixel units, 256
pub const ONE_PIXEL: i64 = 1 << PIXEL_BITS;
/// Fractional bits of an outline coordinate (26.6)
pub const OUTLINE_BITS: i64 = 6;

/// Pixel column / row of a sub-pixel coordinate
///
///     use grayscan::math::trunc;
///     assert_eq!(trunc(511), 1);
///     assert_eq!(trunc(-1), -1);
///
#[inline]
pub fn trunc(v: i64) -> i64 {
    v >> PIXEL_BITS
}

/// Sub-pixel offset within a pixel, always in `[0, ONE_PIXEL)`
#[inline]
pub fn fract(v: i64) -> i64 {
    v & (ONE_PIXEL - 1)
}

/// Convert an outline coordinate (26.6) to rasterizer sub-pixels
#[inline]
pub fn upscale(v: i64) -> i64 {
    v * (ONE_PIXEL >> OUTLINE_BITS)
}

/// Convert rasterizer sub-pixels back to an outline coordinate (26.6)
#[inline]
pub fn downscale(v: i64) -> i64 {
    v >> (PIXEL_BITS - OUTLINE_BITS)
}

/// Quotient and remainder with a remainder that is never negative
///
/// `divisor` must be positive. The line walkers rely on this to step
/// through rows and columns without accumulating rounding drift when
/// `dividend` is negative.
///
///     use grayscan::math::div_mod;
///     assert_eq!(div_mod(7, 2), (3, 1));
///     assert_eq!(div_mod(-7, 2), (-4, 1));
///
#[inline]
pub fn div_mod(dividend: i64, divisor: i64) -> (i64, i64) {
    debug_assert!(divisor > 0, "div_mod divisor must be positive");
    let mut q = dividend / divisor;
    let mut r = dividend % divisor;
    if r < 0 {
        q -= 1;
        r += divisor;
    }
    (q, r)
}

/// Length of the vector (`dx`,`dy`), truncated
#[inline]
pub fn hypot(dx: i64, dy: i64) -> i64 {
    (dx as f64).hypot(dy as f64) as i64
}

/// Multiply two u8 values using fixed point math, `a * b / 255` rounded
///
/// See agg_color_rgba.h:395 of agg version 2.4
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a, b) = (u32::from(a), u32::from(b));
    let t: u32 = a * b + base_msb;
    let tt: u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_mod_keeps_remainder_positive() {
        for dividend in -1000..1000 {
            for divisor in 1..40 {
                let (q, r) = div_mod(dividend, divisor);
                assert!(r >= 0 && r < divisor);
                assert_eq!(q * divisor + r, dividend);
            }
        }
    }

    #[test]
    fn scale_round_trip() {
        assert_eq!(upscale(64), ONE_PIXEL);
        assert_eq!(downscale(ONE_PIXEL), 64);
        assert_eq!(fract(-1), ONE_PIXEL - 1);
    }

    #[test]
    fn multiply_u8_bounds() {
        assert_eq!(multiply_u8(255, 255), 255);
        assert_eq!(multiply_u8(0, 255), 0);
        assert_eq!(multiply_u8(255, 128), 128);
    }
}
