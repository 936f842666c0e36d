//! Affine Transformations

use std::ops::Mul;

/// Affine transform
///
/// ```text
/// x' = a * x + c * y + e
/// y' = b * x + d * y + f
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Identity transform
    pub fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }
    /// Pure translation
    pub fn new_translate(tx: f64, ty: f64) -> Self {
        Self { e: tx, f: ty, ..Self::identity() }
    }
    /// Pure scaling
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Self { a: sx, d: sy, ..Self::identity() }
    }
    /// Pure rotation, angle in radians
    pub fn new_rotate(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self { a: c, b: s, c: -s, d: c, e: 0.0, f: 0.0 }
    }
    /// Apply a translation after this transform
    pub fn translate(&mut self, tx: f64, ty: f64) {
        *self = self.multiply(&Self::new_translate(tx, ty));
    }
    /// Apply a scaling after this transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        *self = self.multiply(&Self::new_scale(sx, sy));
    }
    /// Apply a rotation after this transform
    pub fn rotate(&mut self, angle: f64) {
        *self = self.multiply(&Self::new_rotate(angle));
    }
    /// Transform that applies `self` first, then `m`
    pub fn multiply(&self, m: &Matrix) -> Matrix {
        Matrix {
            a: self.a * m.a + self.b * m.c,
            b: self.a * m.b + self.b * m.d,
            c: self.c * m.a + self.d * m.c,
            d: self.c * m.b + self.d * m.d,
            e: self.e * m.a + self.f * m.c + m.e,
            f: self.e * m.b + self.f * m.d + m.f,
        }
    }
    /// Map the point (`x`,`y`)
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.a + y * self.c + self.e,
         x * self.b + y * self.d + self.f)
    }
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_in_order() {
        let mut m = Matrix::new_scale(2.0, 3.0);
        m.translate(10.0, 20.0);
        assert_eq!(m.map_point(1.0, 1.0), (12.0, 23.0));
        let r = Matrix::new_rotate(std::f64::consts::FRAC_PI_2);
        let (x, y) = r.map_point(1.0, 0.0);
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }
}
