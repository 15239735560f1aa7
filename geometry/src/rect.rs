// pathbool/geometry/src/rect.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Axis-aligned rectangles.

use crate::vector::Vector2D;

/// A rectangle stored as its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectD {
    origin: Vector2D,
    lower_right: Vector2D,
}

impl RectD {
    #[inline]
    pub fn new(origin: Vector2D, size: Vector2D) -> RectD {
        RectD { origin, lower_right: origin + size }
    }

    #[inline]
    pub fn from_points(origin: Vector2D, lower_right: Vector2D) -> RectD {
        RectD { origin, lower_right }
    }

    #[inline]
    pub fn origin(&self) -> Vector2D {
        self.origin
    }

    #[inline]
    pub fn lower_right(&self) -> Vector2D {
        self.lower_right
    }

    #[inline]
    pub fn size(&self) -> Vector2D {
        self.lower_right - self.origin
    }

    #[inline]
    pub fn center(&self) -> Vector2D {
        self.origin.lerp(self.lower_right, 0.5)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.origin.x()
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.origin.y()
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.lower_right.x()
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.lower_right.y()
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size().x()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size().y()
    }

    #[inline]
    pub fn union_point(&self, point: Vector2D) -> RectD {
        RectD::from_points(self.origin.min(point), self.lower_right.max(point))
    }

    #[inline]
    pub fn union_rect(&self, other: RectD) -> RectD {
        RectD::from_points(self.origin.min(other.origin), self.lower_right.max(other.lower_right))
    }

    /// Closed-interval overlap test: rectangles that merely touch intersect.
    #[inline]
    pub fn intersects(&self, other: RectD) -> bool {
        self.min_x() <= other.max_x() && other.min_x() <= self.max_x() &&
            self.min_y() <= other.max_y() && other.min_y() <= self.max_y()
    }

    #[inline]
    pub fn contains_point(&self, point: Vector2D) -> bool {
        self.min_x() <= point.x() && point.x() <= self.max_x() &&
            self.min_y() <= point.y() && point.y() <= self.max_y()
    }

    #[inline]
    pub fn dilate(&self, amount: f64) -> RectD {
        let amount = Vector2D::splat(amount);
        RectD::from_points(self.origin - amount, self.lower_right + amount)
    }

    /// The largest absolute coordinate value that any point inside this rectangle can have.
    #[inline]
    pub fn max_abs_coordinate(&self) -> f64 {
        f64::max(self.origin.max_abs(), self.lower_right.max_abs())
    }
}

#[cfg(test)]
mod test {
    use super::RectD;
    use crate::vector::vec2d;

    #[test]
    fn test_touching_rects_intersect() {
        let a = RectD::from_points(vec2d(0.0, 0.0), vec2d(1.0, 1.0));
        let b = RectD::from_points(vec2d(1.0, 0.5), vec2d(2.0, 2.0));
        let c = RectD::from_points(vec2d(1.5, 0.5), vec2d(2.0, 2.0));
        assert!(a.intersects(b));
        assert!(!a.intersects(c));
        assert_eq!(a.union_rect(c), RectD::from_points(vec2d(0.0, 0.0), vec2d(2.0, 2.0)));
    }
}
