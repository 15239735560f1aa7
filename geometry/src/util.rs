// pathbool/geometry/src/util.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various utilities.

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamping.
#[inline]
pub fn clamp(x: f64, min_val: f64, max_val: f64) -> f64 {
    f64::min(max_val, f64::max(min_val, x))
}

/// Real roots of `a t² + b t + c` inside the open unit interval, in ascending order.
///
/// Roots within `epsilon` of 0 or 1 are discarded.
pub fn unit_quadratic_roots(a: f64, b: f64, c: f64, epsilon: f64) -> (Option<f64>, Option<f64>) {
    let accept = |t: f64| t.is_finite() && t > epsilon && t < 1.0 - epsilon;
    let (t0, t1) = if a.abs() <= f64::EPSILON * (b.abs() + c.abs()) {
        // Degenerates to linear.
        if b == 0.0 {
            return (None, None);
        }
        (-c / b, std::f64::NAN)
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return (None, None);
        }
        // Avoid cancellation by computing one root from the other.
        let q = -0.5 * (b + f64::copysign(discriminant.sqrt(), b));
        let first = q / a;
        let second = if q != 0.0 { c / q } else { std::f64::NAN };
        (first, second)
    };

    match (accept(t0), accept(t1)) {
        (false, false) => (None, None),
        (true, false) => (Some(t0), None),
        (false, true) => (Some(t1), None),
        (true, true) if t0 == t1 => (Some(t0), None),
        (true, true) => (Some(f64::min(t0, t1)), Some(f64::max(t0, t1))),
    }
}

#[cfg(test)]
mod test {
    use super::unit_quadratic_roots;

    #[test]
    fn test_unit_quadratic_roots() {
        // (t - 0.25)(t - 0.75) = t² - t + 0.1875
        assert_eq!(unit_quadratic_roots(1.0, -1.0, 0.1875, 1e-9), (Some(0.25), Some(0.75)));
        // Linear: 2t - 1
        assert_eq!(unit_quadratic_roots(0.0, 2.0, -1.0, 1e-9), (Some(0.5), None));
        // Roots outside the unit interval.
        assert_eq!(unit_quadratic_roots(1.0, 0.0, -4.0, 1e-9), (None, None));
        assert_eq!(unit_quadratic_roots(1.0, 0.0, 1.0, 1e-9), (None, None));
    }
}
