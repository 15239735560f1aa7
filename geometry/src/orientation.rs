// pathbool/geometry/src/orientation.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exact orientation predicates.
//!
//! These are evaluated with adaptive-precision arithmetic, so the sign is always correct for the
//! floating point inputs given, however close to collinear they are.

use crate::vector::Vector2D;
use robust::{self, Coord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Counterclockwise (a left turn, with y pointing up).
    Ccw,
    /// Clockwise (a right turn, with y pointing up).
    Cw,
    Collinear,
}

impl Orientation {
    /// The orientation of the triangle `a`, `b`, `c`.
    #[inline]
    pub fn of(a: Vector2D, b: Vector2D, c: Vector2D) -> Orientation {
        Orientation::from_area(orient2d(a, b, c))
    }

    /// Classifies a signed area (positive is counterclockwise).
    #[inline]
    pub fn from_area(area: f64) -> Orientation {
        if area > 0.0 {
            Orientation::Ccw
        } else if area < 0.0 {
            Orientation::Cw
        } else {
            Orientation::Collinear
        }
    }

    /// Returns +1, -1, or 0.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Orientation::Ccw => 1,
            Orientation::Cw => -1,
            Orientation::Collinear => 0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Orientation {
        match self {
            Orientation::Ccw => Orientation::Cw,
            Orientation::Cw => Orientation::Ccw,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`, with an exactly correct sign.
#[inline]
pub fn orient2d(a: Vector2D, b: Vector2D, c: Vector2D) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

#[inline]
fn coord(point: Vector2D) -> Coord<f64> {
    Coord { x: point.x(), y: point.y() }
}

#[cfg(test)]
mod test {
    use super::Orientation;
    use crate::vector::vec2d;

    #[test]
    fn test_basic_orientation() {
        let (a, b) = (vec2d(0.0, 0.0), vec2d(1.0, 0.0));
        assert_eq!(Orientation::of(a, b, vec2d(0.5, 1.0)), Orientation::Ccw);
        assert_eq!(Orientation::of(a, b, vec2d(0.5, -1.0)), Orientation::Cw);
        assert_eq!(Orientation::of(a, b, vec2d(7.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn test_near_collinear_points_are_exact() {
        // Off the line through `a` and `b` by a single ulp.
        let a = vec2d(0.5, 0.5);
        let b = vec2d(12.0, 12.0);
        let c = vec2d(24.0, 24.0 + 2.0f64.powi(-48));
        assert_eq!(Orientation::of(a, b, c), Orientation::Ccw);
        assert_eq!(Orientation::of(a, c, b), Orientation::Cw);
        assert_eq!(Orientation::of(a, b, vec2d(24.0, 24.0)), Orientation::Collinear);
    }
}
