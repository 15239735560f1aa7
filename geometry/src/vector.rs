// pathbool/geometry/src/vector.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A double-precision 2D vector type.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 2D vectors (and points) with 64-bit floating point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    x: f64,
    y: f64,
}

impl Vector2D {
    #[inline]
    pub fn new(x: f64, y: f64) -> Vector2D {
        Vector2D { x, y }
    }

    #[inline]
    pub fn splat(value: f64) -> Vector2D {
        Vector2D { x: value, y: value }
    }

    #[inline]
    pub fn zero() -> Vector2D {
        Vector2D::default()
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    #[inline]
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    #[inline]
    pub fn min(self, other: Vector2D) -> Vector2D {
        Vector2D::new(f64::min(self.x, other.x), f64::min(self.y, other.y))
    }

    #[inline]
    pub fn max(self, other: Vector2D) -> Vector2D {
        Vector2D::new(f64::max(self.x, other.x), f64::max(self.y, other.y))
    }

    #[inline]
    pub fn abs(self) -> Vector2D {
        Vector2D::new(self.x.abs(), self.y.abs())
    }

    /// The 2D cross product.
    #[inline]
    pub fn det(self, other: Vector2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn dot(self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Vector2D {
        Vector2D::new(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn square_length(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        f64::sqrt(self.square_length())
    }

    /// Linear interpolation from `self` toward `other`.
    ///
    /// `t = 0.0` and `t = 1.0` return the endpoints bit-for-bit.
    #[inline]
    pub fn lerp(self, other: Vector2D, t: f64) -> Vector2D {
        if t == 0.0 {
            self
        } else if t == 1.0 {
            other
        } else {
            self + (other - self).scale(t)
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// The larger of the absolute values of the two coordinates.
    #[inline]
    pub fn max_abs(self) -> f64 {
        f64::max(self.x.abs(), self.y.abs())
    }

    /// Compares by x, then by y. This is the order in which the sweep visits points.
    ///
    /// Coordinates must not be NaN.
    #[inline]
    pub fn lexicographic_cmp(self, other: Vector2D) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {
                self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
            }
            Some(ordering) => ordering,
        }
    }

    /// A hashable key that is equal for two vectors iff their coordinates are bit-identical
    /// (modulo the sign of zero).
    #[inline]
    pub fn to_bits(self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

#[inline]
pub fn vec2d(x: f64, y: f64) -> Vector2D {
    Vector2D::new(x, y)
}

impl Add<Vector2D> for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vector2D> for Vector2D {
    #[inline]
    fn add_assign(&mut self, other: Vector2D) {
        *self = *self + other
    }
}

impl Sub<Vector2D> for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vector2D> for Vector2D {
    #[inline]
    fn sub_assign(&mut self, other: Vector2D) {
        *self = *self - other
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn mul(self, factor: f64) -> Vector2D {
        self.scale(factor)
    }
}

impl Mul<Vector2D> for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn mul(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x * other.x, self.y * other.y)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod test {
    use super::{vec2d, Vector2D};
    use std::cmp::Ordering;

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(vec2d(0.0, 5.0).lexicographic_cmp(vec2d(1.0, -5.0)), Ordering::Less);
        assert_eq!(vec2d(1.0, 2.0).lexicographic_cmp(vec2d(1.0, 1.0)), Ordering::Greater);
        assert_eq!(vec2d(1.0, 1.0).lexicographic_cmp(vec2d(1.0, 1.0)), Ordering::Equal);
    }

    #[test]
    fn test_lerp_preserves_endpoints() {
        let (a, b) = (vec2d(0.1, 0.7), vec2d(0.3, -1.9));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(vec2d(0.5, 1.0).lerp(vec2d(1.5, -3.0), 0.5), vec2d(1.0, -1.0));
    }

    #[test]
    fn test_signed_zero_keys_match() {
        assert_eq!(vec2d(0.0, -0.0).to_bits(), Vector2D::zero().to_bits());
    }
}
