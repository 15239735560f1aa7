// pathbool/content/src/segment.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Single line or Bézier curve segments.

use arrayvec::ArrayVec;
use pathbool_geometry::line_segment::LineSegment2D;
use pathbool_geometry::rect::RectD;
use pathbool_geometry::util;
use pathbool_geometry::vector::Vector2D;

/// Parameter values closer than this to either end of a curve are not worth splitting at.
const EXTREMUM_EPSILON: f64 = 1e-9;

/// Upper bound on the number of line segments a single monotonic piece is flattened into.
pub const MAX_FLATTENING_STEPS: u32 = 1024;

/// A single line or Bézier curve segment, with explicit start and end points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// The start and end points of the curve.
    pub baseline: LineSegment2D,
    /// The control point or points.
    ///
    /// If this is a line, this field is ignored. If this is a quadratic Bézier curve, the start
    /// point of this line represents the control point, and the endpoint of this line is ignored.
    /// Otherwise, if this is a cubic Bézier curve, both the start and endpoints are used.
    pub ctrl: LineSegment2D,
    /// The type of segment this is: line, quadratic, or cubic Bézier curve.
    pub kind: SegmentKind,
}

impl Segment {
    /// Returns a segment representing a straight line.
    #[inline]
    pub fn line(line: LineSegment2D) -> Segment {
        Segment { baseline: line, ctrl: LineSegment2D::default(), kind: SegmentKind::Line }
    }

    /// Returns a segment representing a quadratic Bézier curve.
    #[inline]
    pub fn quadratic(baseline: LineSegment2D, ctrl: Vector2D) -> Segment {
        Segment {
            baseline,
            ctrl: LineSegment2D::new(ctrl, Vector2D::zero()),
            kind: SegmentKind::Quadratic,
        }
    }

    /// Returns a segment representing a cubic Bézier curve.
    #[inline]
    pub fn cubic(baseline: LineSegment2D, ctrl: LineSegment2D) -> Segment {
        Segment { baseline, ctrl, kind: SegmentKind::Cubic }
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        self.kind == SegmentKind::Line
    }

    #[inline]
    pub fn is_quadratic(&self) -> bool {
        self.kind == SegmentKind::Quadratic
    }

    #[inline]
    pub fn is_cubic(&self) -> bool {
        self.kind == SegmentKind::Cubic
    }

    #[inline]
    pub fn from(&self) -> Vector2D {
        self.baseline.from()
    }

    #[inline]
    pub fn to(&self) -> Vector2D {
        self.baseline.to()
    }

    /// If this segment is a quadratic Bézier curve, returns it. In debug builds, panics
    /// otherwise.
    #[inline]
    pub fn as_quadratic_segment(&self) -> QuadraticSegment {
        debug_assert!(self.is_quadratic());
        QuadraticSegment(self)
    }

    /// If this segment is a cubic Bézier curve, returns it. In debug builds, panics otherwise.
    #[inline]
    pub fn as_cubic_segment(&self) -> CubicSegment {
        debug_assert!(self.is_cubic());
        CubicSegment(self)
    }

    /// Returns this segment with endpoints and control points reversed.
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment {
            baseline: self.baseline.reversed(),
            ctrl: if self.is_cubic() { self.ctrl.reversed() } else { self.ctrl },
            kind: self.kind,
        }
    }

    /// Divides this segment into two at the given parametric t value.
    ///
    /// Curves are subdivided with de Casteljau's algorithm and keep their degree. The point
    /// shared by the two halves is bit-identical in both.
    #[inline]
    pub fn split(&self, t: f64) -> (Segment, Segment) {
        match self.kind {
            SegmentKind::Line => {
                let (before, after) = self.baseline.split(util::clamp(t, 0.0, 1.0));
                (Segment::line(before), Segment::line(after))
            }
            SegmentKind::Quadratic => self.as_quadratic_segment().split(t),
            SegmentKind::Cubic => self.as_cubic_segment().split(t),
        }
    }

    /// Returns the position of the point on this line or curve with the given parametric t
    /// value. `t = 0.0` and `t = 1.0` return the endpoints exactly.
    #[inline]
    pub fn sample(&self, t: f64) -> Vector2D {
        if t <= 0.0 {
            return self.from();
        }
        if t >= 1.0 {
            return self.to();
        }
        match self.kind {
            SegmentKind::Line => self.baseline.sample(t),
            SegmentKind::Quadratic => self.as_quadratic_segment().sample(t),
            SegmentKind::Cubic => self.as_cubic_segment().sample(t),
        }
    }

    /// Returns the part of this segment between the parametric values `t0` and `t1`, where
    /// `t0 <= t1`. The full range returns this segment unchanged.
    pub fn sub_segment(&self, t0: f64, t1: f64) -> Segment {
        debug_assert!(t0 <= t1);
        let after = if t0 <= 0.0 { *self } else { self.split(t0).1 };
        if t1 >= 1.0 {
            return after;
        }
        let remaining = 1.0 - f64::max(t0, 0.0);
        if remaining <= 0.0 {
            return after;
        }
        after.split((t1 - f64::max(t0, 0.0)) / remaining).0
    }

    /// The bounding box of the control polygon, which contains the whole segment.
    pub fn bounds(&self) -> RectD {
        let mut bounds = self.baseline.bounds();
        match self.kind {
            SegmentKind::Line => {}
            SegmentKind::Quadratic => bounds = bounds.union_point(self.ctrl.from()),
            SegmentKind::Cubic => bounds = bounds.union_rect(self.ctrl.bounds()),
        }
        bounds
    }

    /// Returns true if any coordinate, control points included, is NaN.
    pub fn has_nan(&self) -> bool {
        self.control_polygon().iter().any(|point| point.is_nan())
    }

    /// The points of the control polygon in order, endpoints included.
    pub fn control_polygon(&self) -> ArrayVec<[Vector2D; 4]> {
        let mut points = ArrayVec::new();
        points.push(self.from());
        match self.kind {
            SegmentKind::Line => {}
            SegmentKind::Quadratic => points.push(self.ctrl.from()),
            SegmentKind::Cubic => {
                points.push(self.ctrl.from());
                points.push(self.ctrl.to());
            }
        }
        points.push(self.to());
        points
    }

    /// The integral of `(x dy - y dx) / 2` along this segment.
    ///
    /// Summed over a closed contour this is the exact signed area it encloses, counterclockwise
    /// positive (with y pointing up).
    pub fn signed_area(&self) -> f64 {
        let (p0, p3) = (self.from(), self.to());
        match self.kind {
            SegmentKind::Line => p0.det(p3) * 0.5,
            SegmentKind::Quadratic => {
                let p1 = self.ctrl.from();
                (2.0 * p0.det(p1) + 2.0 * p1.det(p3) + p0.det(p3)) * (1.0 / 6.0)
            }
            SegmentKind::Cubic => {
                let (p1, p2) = (self.ctrl.from(), self.ctrl.to());
                (6.0 * p0.det(p1) + 3.0 * p0.det(p2) + p0.det(p3) +
                 3.0 * p1.det(p2) + 3.0 * p1.det(p3) + 6.0 * p2.det(p3)) * (1.0 / 20.0)
            }
        }
    }

    /// The sorted parametric values at which the segment must be cut so that every piece is
    /// monotonic in both x and y.
    pub fn monotonic_breaks(&self) -> ArrayVec<[f64; 4]> {
        let mut breaks: ArrayVec<[f64; 4]> = ArrayVec::new();
        let (x_extrema, y_extrema) = match self.kind {
            SegmentKind::Line => return breaks,
            SegmentKind::Quadratic => {
                let quad = self.as_quadratic_segment();
                ((quad.x_extremum(), None), (quad.y_extremum(), None))
            }
            SegmentKind::Cubic => {
                let cubic = self.as_cubic_segment();
                (cubic.x_extrema(), cubic.y_extrema())
            }
        };
        for t in [x_extrema.0, x_extrema.1, y_extrema.0, y_extrema.1].iter().filter_map(|t| *t) {
            if !breaks.contains(&t) {
                breaks.push(t);
            }
        }
        breaks.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        breaks
    }

    /// The number of uniform steps needed to approximate this segment with a polyline that
    /// deviates from it by at most `tolerance`.
    ///
    /// This is Wang's formula.
    pub fn flattening_steps(&self, tolerance: f64) -> u32 {
        let (degree_factor, max_second_difference) = match self.kind {
            SegmentKind::Line => return 1,
            SegmentKind::Quadratic => {
                let (p0, p1, p2) = (self.from(), self.ctrl.from(), self.to());
                (2.0 / 8.0, (p0 - p1 - p1 + p2).length())
            }
            SegmentKind::Cubic => {
                let (p0, p1, p2, p3) = (self.from(), self.ctrl.from(), self.ctrl.to(), self.to());
                let d0 = (p0 - p1 - p1 + p2).length();
                let d1 = (p1 - p2 - p2 + p3).length();
                (6.0 / 8.0, f64::max(d0, d1))
            }
        };
        let steps = f64::sqrt(degree_factor * max_second_difference / tolerance).ceil();
        if !(steps >= 1.0) {
            1
        } else if steps >= MAX_FLATTENING_STEPS as f64 {
            MAX_FLATTENING_STEPS
        } else {
            steps as u32
        }
    }
}

/// The type of segment this is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum SegmentKind {
    /// A line segment.
    Line,
    /// A quadratic Bézier curve.
    Quadratic,
    /// A cubic Bézier curve.
    Cubic,
}

/// A wrapper for a `Segment` that contains methods specific to quadratic Bézier curves.
#[derive(Clone, Copy, Debug)]
pub struct QuadraticSegment<'s>(pub &'s Segment);

impl<'s> QuadraticSegment<'s> {
    #[inline]
    pub fn split(self, t: f64) -> (Segment, Segment) {
        let (p0, p1, p2) = (self.0.from(), self.0.ctrl.from(), self.0.to());
        if t <= 0.0 {
            return (Segment::quadratic(LineSegment2D::new(p0, p0), p0), *self.0);
        }
        if t >= 1.0 {
            return (*self.0, Segment::quadratic(LineSegment2D::new(p2, p2), p2));
        }
        let (p01, p12) = (p0.lerp(p1, t), p1.lerp(p2, t));
        let p012 = p01.lerp(p12, t);
        (Segment::quadratic(LineSegment2D::new(p0, p012), p01),
         Segment::quadratic(LineSegment2D::new(p012, p2), p12))
    }

    /// Evaluates by subdivision, so the result matches the split point of `split(t)` exactly.
    #[inline]
    pub fn sample(self, t: f64) -> Vector2D {
        self.split(t).0.to()
    }

    #[inline]
    pub fn x_extremum(self) -> Option<f64> {
        quadratic_extremum(self.0.from().x(), self.0.ctrl.from().x(), self.0.to().x())
    }

    #[inline]
    pub fn y_extremum(self) -> Option<f64> {
        quadratic_extremum(self.0.from().y(), self.0.ctrl.from().y(), self.0.to().y())
    }
}

fn quadratic_extremum(p0: f64, p1: f64, p2: f64) -> Option<f64> {
    // B'(t) = 2 ((p1 - p0) (1 - t) + (p2 - p1) t)
    let denom = p0 - 2.0 * p1 + p2;
    if denom == 0.0 {
        return None;
    }
    let t = (p0 - p1) / denom;
    if t > EXTREMUM_EPSILON && t < 1.0 - EXTREMUM_EPSILON {
        Some(t)
    } else {
        None
    }
}

/// A wrapper for a `Segment` that contains methods specific to cubic Bézier curves.
#[derive(Clone, Copy, Debug)]
pub struct CubicSegment<'s>(pub &'s Segment);

impl<'s> CubicSegment<'s> {
    /// Splits this cubic Bézier curve into two at the given parametric t value, which will be
    /// clamped to the range 0.0 to 1.0.
    ///
    /// This uses de Casteljau subdivision.
    #[inline]
    pub fn split(self, t: f64) -> (Segment, Segment) {
        let (p0, p1, p2, p3) =
            (self.0.from(), self.0.ctrl.from(), self.0.ctrl.to(), self.0.to());
        if t <= 0.0 {
            let degenerate = LineSegment2D::new(p0, p0);
            return (Segment::cubic(degenerate, degenerate), *self.0);
        }
        if t >= 1.0 {
            let degenerate = LineSegment2D::new(p3, p3);
            return (*self.0, Segment::cubic(degenerate, degenerate));
        }

        // p01 = lerp(p0, p1, t), p12 = lerp(p1, p2, t), p23 = lerp(p2, p3, t)
        let (p01, p12, p23) = (p0.lerp(p1, t), p1.lerp(p2, t), p2.lerp(p3, t));
        // p012 = lerp(p01, p12, t), p123 = lerp(p12, p23, t)
        let (p012, p123) = (p01.lerp(p12, t), p12.lerp(p23, t));
        // p0123 = lerp(p012, p123, t)
        let p0123 = p012.lerp(p123, t);

        (Segment::cubic(LineSegment2D::new(p0, p0123), LineSegment2D::new(p01, p012)),
         Segment::cubic(LineSegment2D::new(p0123, p3), LineSegment2D::new(p123, p23)))
    }

    /// Returns the position of the point on this curve at parametric time `t`, which will be
    /// clamped between 0.0 and 1.0.
    #[inline]
    pub fn sample(self, t: f64) -> Vector2D {
        self.split(t).0.to()
    }

    /// The parametric values in the open unit interval at which dx/dt vanishes.
    #[inline]
    pub fn x_extrema(self) -> (Option<f64>, Option<f64>) {
        cubic_extrema(self.0.from().x(), self.0.ctrl.from().x(), self.0.ctrl.to().x(),
                      self.0.to().x())
    }

    /// The parametric values in the open unit interval at which dy/dt vanishes.
    #[inline]
    pub fn y_extrema(self) -> (Option<f64>, Option<f64>) {
        cubic_extrema(self.0.from().y(), self.0.ctrl.from().y(), self.0.ctrl.to().y(),
                      self.0.to().y())
    }
}

fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> (Option<f64>, Option<f64>) {
    // B'(t) / 3 = (v0 - 2 v1 + v2) t² + 2 (v1 - v0) t + v0
    let (v0, v1, v2) = (p1 - p0, p2 - p1, p3 - p2);
    util::unit_quadratic_roots(v0 - 2.0 * v1 + v2, 2.0 * (v1 - v0), v0, EXTREMUM_EPSILON)
}

#[cfg(test)]
mod test {
    use super::Segment;
    use pathbool_geometry::line_segment::LineSegment2D;
    use pathbool_geometry::vector::vec2d;
    use quickcheck;

    fn arch() -> Segment {
        Segment::cubic(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(4.0, 0.0)),
                       LineSegment2D::new(vec2d(0.0, 4.0), vec2d(4.0, 4.0)))
    }

    #[test]
    fn test_cubic_split_shares_midpoint() {
        let (before, after) = arch().split(0.5);
        assert_eq!(before.to(), vec2d(2.0, 3.0));
        assert_eq!(before.to(), after.from());
        assert_eq!(before.from(), vec2d(0.0, 0.0));
        assert_eq!(after.to(), vec2d(4.0, 0.0));
        assert_eq!(arch().sample(0.5), vec2d(2.0, 3.0));
    }

    #[test]
    fn test_quadratic_keeps_its_degree() {
        let quad = Segment::quadratic(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(2.0, 0.0)),
                                      vec2d(1.0, 2.0));
        let (before, after) = quad.split(0.5);
        assert!(before.is_quadratic() && after.is_quadratic());
        assert_eq!(before.to(), vec2d(1.0, 1.0));
        assert_eq!(quad.monotonic_breaks().as_slice(), &[0.5]);
    }

    #[test]
    fn test_sub_segment() {
        let segment = arch();
        assert_eq!(segment.sub_segment(0.0, 1.0), segment);
        let middle = segment.sub_segment(0.25, 0.75);
        assert_eq!(middle.from(), segment.sample(0.25));
        assert!((middle.to() - segment.sample(0.75)).length() < 1e-12);
        assert!((middle.sample(0.5) - segment.sample(0.5)).length() < 1e-12);
    }

    #[test]
    fn test_monotonic_breaks() {
        // The arch has a single y maximum and is monotonic in x.
        assert_eq!(arch().monotonic_breaks().as_slice(), &[0.5]);
        let line = Segment::line(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(1.0, 1.0)));
        assert!(line.monotonic_breaks().is_empty());
    }

    #[test]
    fn test_signed_area_of_closed_lens() {
        // Traversed arch first, the region under the arch is clockwise.
        let closing = Segment::line(LineSegment2D::new(vec2d(4.0, 0.0), vec2d(0.0, 0.0)));
        let area = arch().signed_area() + closing.signed_area();
        assert!((area + 9.6).abs() < 1e-12);
    }

    #[test]
    fn test_split_halves_meet_exactly() {
        quickcheck::quickcheck(prop_split_halves_meet as
                               fn((i16, i16, i16, i16), (i16, i16, i16, i16), u16) -> bool);

        fn prop_split_halves_meet(baseline: (i16, i16, i16, i16),
                                  ctrl: (i16, i16, i16, i16),
                                  t: u16)
                                  -> bool {
            let point = |x: i16, y: i16| vec2d(x as f64 * 0.125, y as f64 * 0.125);
            let baseline = LineSegment2D::new(point(baseline.0, baseline.1),
                                              point(baseline.2, baseline.3));
            let ctrl = LineSegment2D::new(point(ctrl.0, ctrl.1), point(ctrl.2, ctrl.3));
            let t = t as f64 / 65535.0;

            [Segment::cubic(baseline, ctrl), Segment::quadratic(baseline, ctrl.from())]
                .iter()
                .all(|segment| {
                    let (before, after) = segment.split(t);
                    before.from() == segment.from() && after.to() == segment.to() &&
                        before.to() == after.from() && before.to() == segment.sample(t) &&
                        before.kind == segment.kind && after.kind == segment.kind
                })
        }
    }

    #[test]
    fn test_flattening_steps_grow_with_precision() {
        let coarse = arch().flattening_steps(0.1);
        let fine = arch().flattening_steps(0.001);
        assert!(coarse >= 1);
        assert!(fine > coarse);
        let line = Segment::line(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(1.0, 1.0)));
        assert_eq!(line.flattening_steps(1e-9), 1);
    }
}
