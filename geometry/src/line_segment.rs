// pathbool/geometry/src/line_segment.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line segment types.

use crate::rect::RectD;
use crate::vector::Vector2D;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LineSegment2D {
    from: Vector2D,
    to: Vector2D,
}

impl LineSegment2D {
    #[inline]
    pub fn new(from: Vector2D, to: Vector2D) -> LineSegment2D {
        LineSegment2D { from, to }
    }

    #[inline]
    pub fn from(&self) -> Vector2D {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Vector2D {
        self.to
    }

    #[inline]
    pub fn set_from(&mut self, point: Vector2D) {
        self.from = point
    }

    #[inline]
    pub fn set_to(&mut self, point: Vector2D) {
        self.to = point
    }

    #[allow(clippy::wrong_self_convention)]
    #[inline]
    pub fn from_x(&self) -> f64 {
        self.from.x()
    }

    #[allow(clippy::wrong_self_convention)]
    #[inline]
    pub fn from_y(&self) -> f64 {
        self.from.y()
    }

    #[inline]
    pub fn to_x(&self) -> f64 {
        self.to.x()
    }

    #[inline]
    pub fn to_y(&self) -> f64 {
        self.to.y()
    }

    #[inline]
    pub fn vector(&self) -> Vector2D {
        self.to - self.from
    }

    #[inline]
    pub fn reversed(&self) -> LineSegment2D {
        LineSegment2D::new(self.to, self.from)
    }

    #[inline]
    pub fn sample(&self, t: f64) -> Vector2D {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn midpoint(&self) -> Vector2D {
        self.sample(0.5)
    }

    #[inline]
    pub fn split(&self, t: f64) -> (LineSegment2D, LineSegment2D) {
        debug_assert!(t >= 0.0 && t <= 1.0);
        let mid = self.sample(t);
        (LineSegment2D::new(self.from, mid), LineSegment2D::new(mid, self.to))
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        f64::min(self.from.x(), self.to.x())
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        f64::max(self.from.x(), self.to.x())
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        f64::min(self.from.y(), self.to.y())
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        f64::max(self.from.y(), self.to.y())
    }

    #[inline]
    pub fn bounds(&self) -> RectD {
        RectD::from_points(self.from.min(self.to), self.from.max(self.to))
    }

    #[inline]
    pub fn square_length(&self) -> f64 {
        self.vector().square_length()
    }

    #[inline]
    pub fn is_zero_length(&self) -> bool {
        self.from == self.to
    }

    /// The endpoint that comes first in sweep order.
    #[inline]
    pub fn lexicographic_min(&self) -> Vector2D {
        match self.from.lexicographic_cmp(self.to) {
            Ordering::Greater => self.to,
            _ => self.from,
        }
    }

    /// The endpoint that comes last in sweep order.
    #[inline]
    pub fn lexicographic_max(&self) -> Vector2D {
        match self.from.lexicographic_cmp(self.to) {
            Ordering::Greater => self.from,
            _ => self.to,
        }
    }

    /// Returns true if `point` lies strictly between the endpoints in sweep order.
    ///
    /// This does not check collinearity.
    #[inline]
    pub fn spans_strictly(&self, point: Vector2D) -> bool {
        let (min, max) = (self.lexicographic_min(), self.lexicographic_max());
        min.lexicographic_cmp(point) == Ordering::Less &&
            point.lexicographic_cmp(max) == Ordering::Less
    }

    /// The parameter of the orthogonal projection of `point` onto the supporting line.
    #[inline]
    pub fn projection_t(&self, point: Vector2D) -> f64 {
        let vector = self.vector();
        let square_length = vector.square_length();
        if square_length == 0.0 {
            return 0.0;
        }
        (point - self.from).dot(vector) / square_length
    }

    /// The parameter along `self` at which the supporting lines of `self` and `other` cross,
    /// or `None` if they are parallel.
    pub fn intersection_t(&self, other: &LineSegment2D) -> Option<f64> {
        let (p, r) = (self.from, self.vector());
        let (q, s) = (other.from, other.vector());
        let denom = r.det(s);
        if denom == 0.0 {
            return None;
        }
        let t = (q - p).det(s) / denom;
        if t.is_finite() {
            Some(t)
        } else {
            None
        }
    }
}
