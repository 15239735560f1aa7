// pathbool/content/src/path.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Paths as sequences of drawing commands, and a builder for them.

use arrayvec::ArrayVec;
use pathbool_geometry::line_segment::LineSegment2D;
use pathbool_geometry::rect::RectD;
use pathbool_geometry::vector::{Vector2D, vec2d};
use crate::segment::Segment;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;

/// Control point distance for a quarter circle of unit radius: 4/3 · (√2 - 1).
const QUARTER_ARC_CP_DISTANCE: f64 = 0.552_284_749_830_793_4;

/// A single drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cp_x: f64, cp_y: f64, x: f64, y: f64 },
    CurveTo { cp1_x: f64, cp1_y: f64, cp2_x: f64, cp2_y: f64, x: f64, y: f64 },
    ClosePath,
}

impl PathSegment {
    /// All coordinates of this command, control points first.
    pub fn coordinates(&self) -> ArrayVec<[f64; 6]> {
        let mut coordinates = ArrayVec::new();
        match *self {
            PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => {
                coordinates.push(x);
                coordinates.push(y);
            }
            PathSegment::QuadTo { cp_x, cp_y, x, y } => {
                coordinates.extend([cp_x, cp_y, x, y].iter().cloned());
            }
            PathSegment::CurveTo { cp1_x, cp1_y, cp2_x, cp2_y, x, y } => {
                coordinates.extend([cp1_x, cp1_y, cp2_x, cp2_y, x, y].iter().cloned());
            }
            PathSegment::ClosePath => {}
        }
        coordinates
    }

    /// The curve drawn by this command when the current point is `from`.
    pub fn to_segment(&self, from: Vector2D) -> Option<Segment> {
        match *self {
            PathSegment::LineTo { x, y } => {
                Some(Segment::line(LineSegment2D::new(from, vec2d(x, y))))
            }
            PathSegment::QuadTo { cp_x, cp_y, x, y } => {
                Some(Segment::quadratic(LineSegment2D::new(from, vec2d(x, y)), vec2d(cp_x, cp_y)))
            }
            PathSegment::CurveTo { cp1_x, cp1_y, cp2_x, cp2_y, x, y } => {
                Some(Segment::cubic(LineSegment2D::new(from, vec2d(x, y)),
                                    LineSegment2D::new(vec2d(cp1_x, cp1_y), vec2d(cp2_x, cp2_y))))
            }
            PathSegment::MoveTo { .. } | PathSegment::ClosePath => None,
        }
    }

    /// The command that draws `segment` from its start point.
    pub fn from_segment(segment: &Segment) -> PathSegment {
        let to = segment.to();
        if segment.is_quadratic() {
            let ctrl = segment.ctrl.from();
            PathSegment::QuadTo { cp_x: ctrl.x(), cp_y: ctrl.y(), x: to.x(), y: to.y() }
        } else if segment.is_cubic() {
            let (ctrl0, ctrl1) = (segment.ctrl.from(), segment.ctrl.to());
            PathSegment::CurveTo {
                cp1_x: ctrl0.x(),
                cp1_y: ctrl0.y(),
                cp2_x: ctrl1.x(),
                cp2_y: ctrl1.y(),
                x: to.x(),
                y: to.y(),
            }
        } else {
            PathSegment::LineTo { x: to.x(), y: to.y() }
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            PathSegment::MoveTo { x, y } => write!(formatter, "M {} {}", x, y),
            PathSegment::LineTo { x, y } => write!(formatter, "L {} {}", x, y),
            PathSegment::QuadTo { cp_x, cp_y, x, y } => {
                write!(formatter, "Q {} {} {} {}", cp_x, cp_y, x, y)
            }
            PathSegment::CurveTo { cp1_x, cp1_y, cp2_x, cp2_y, x, y } => {
                write!(formatter, "C {} {} {} {} {} {}", cp1_x, cp1_y, cp2_x, cp2_y, x, y)
            }
            PathSegment::ClosePath => write!(formatter, "Z"),
        }
    }
}

/// An immutable path: an ordered list of drawing commands.
///
/// Paths are not validated on construction. Use `Outline::from_path()` to check one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates an empty path.
    #[inline]
    pub fn new() -> Path {
        Path::default()
    }

    #[inline]
    pub fn from_segments(segments: Vec<PathSegment>) -> Path {
        Path { segments }
    }

    #[inline]
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// The drawing commands of this path, in order.
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn into_segments(self) -> Vec<PathSegment> {
        self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any coordinate is NaN.
    pub fn has_nan(&self) -> bool {
        self.segments.iter().any(|segment| {
            segment.coordinates().iter().any(|coordinate| coordinate.is_nan())
        })
    }

    /// Returns true if any coordinate is positive or negative infinity.
    pub fn has_infinity(&self) -> bool {
        self.segments.iter().any(|segment| {
            segment.coordinates().iter().any(|coordinate| coordinate.is_infinite())
        })
    }

    /// The bounding box of all points, control points included, or `None` if there are none.
    pub fn bounds(&self) -> Option<RectD> {
        let mut points = self.segments.iter().flat_map(|segment| {
            let coordinates = segment.coordinates();
            (0..coordinates.len() / 2).map(move |index| {
                vec2d(coordinates[index * 2], coordinates[index * 2 + 1])
            })
        });
        let first = points.next()?;
        Some(points.fold(RectD::from_points(first, first), |bounds, point| {
            bounds.union_point(point)
        }))
    }

    /// The signed area enclosed by this path, counterclockwise positive, treating every subpath
    /// as closed.
    pub fn area(&self) -> f64 {
        let mut area = 0.0;
        let (mut current, mut start): (Option<Vector2D>, Vector2D) = (None, Vector2D::zero());
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo { x, y } => {
                    if let Some(current) = current {
                        area += current.det(start) * 0.5;
                    }
                    start = vec2d(x, y);
                    current = Some(start);
                }
                PathSegment::ClosePath => {
                    if let Some(from) = current.take() {
                        area += from.det(start) * 0.5;
                    }
                }
                _ => {
                    let from = current.unwrap_or(start);
                    if let Some(curve) = segment.to_segment(from) {
                        area += curve.signed_area();
                        current = Some(curve.to());
                    }
                }
            }
        }
        if let Some(current) = current {
            area += current.det(start) * 0.5;
        }
        area
    }

    /// The number of `MoveTo` commands.
    pub fn subpath_count(&self) -> usize {
        self.segments.iter().filter(|segment| {
            match segment {
                PathSegment::MoveTo { .. } => true,
                _ => false,
            }
        }).count()
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I>(iter: I) -> Path where I: IntoIterator<Item = PathSegment> {
        Path { segments: iter.into_iter().collect() }
    }
}

/// Formats as SVG path data.
impl Display for Path {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(formatter, " ")?;
            }
            write!(formatter, "{}", segment)?;
        }
        Ok(())
    }
}

/// Builds a `Path` incrementally. Nothing is checked until the path is used.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
}

impl PathBuilder {
    #[inline]
    pub fn new() -> PathBuilder {
        PathBuilder::default()
    }

    #[inline]
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::MoveTo { x, y });
    }

    #[inline]
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::LineTo { x, y });
    }

    #[inline]
    pub fn quad_to(&mut self, cp_x: f64, cp_y: f64, x: f64, y: f64) {
        self.segments.push(PathSegment::QuadTo { cp_x, cp_y, x, y });
    }

    #[inline]
    pub fn curve_to(&mut self, cp1_x: f64, cp1_y: f64, cp2_x: f64, cp2_y: f64, x: f64, y: f64) {
        self.segments.push(PathSegment::CurveTo { cp1_x, cp1_y, cp2_x, cp2_y, x, y });
    }

    #[inline]
    pub fn close_path(&mut self) {
        self.segments.push(PathSegment::ClosePath);
    }

    #[inline]
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Adds a closed counterclockwise rectangle.
    pub fn rect(&mut self, rect: RectD) {
        self.move_to(rect.min_x(), rect.min_y());
        self.line_to(rect.max_x(), rect.min_y());
        self.line_to(rect.max_x(), rect.max_y());
        self.line_to(rect.min_x(), rect.max_y());
        self.close_path();
    }

    /// Adds a closed counterclockwise ellipse made of four cubic Bézier curves.
    pub fn ellipse(&mut self, center: Vector2D, radii: Vector2D) {
        let (cx, cy) = (center.x(), center.y());
        let (rx, ry) = (radii.x(), radii.y());
        let (kx, ky) = (rx * QUARTER_ARC_CP_DISTANCE, ry * QUARTER_ARC_CP_DISTANCE);
        self.move_to(cx + rx, cy);
        self.curve_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.curve_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.curve_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.curve_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        self.close_path();
    }

    #[inline]
    pub fn circle(&mut self, center: Vector2D, radius: f64) {
        self.ellipse(center, Vector2D::splat(radius))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Finishes the path.
    #[inline]
    pub fn build(self) -> Path {
        Path { segments: self.segments }
    }
}

#[cfg(test)]
mod test {
    use super::{Path, PathBuilder, PathSegment};
    use pathbool_geometry::rect::RectD;
    use pathbool_geometry::vector::vec2d;
    use std::f64::consts::PI;

    #[test]
    fn test_builder_records_commands_verbatim() {
        let mut builder = Path::builder();
        builder.line_to(1.0, 1.0);
        builder.move_to(0.0, 0.0);
        builder.quad_to(1.0, 2.0, 3.0, 4.0);
        let path = builder.build();
        assert_eq!(path.segments(), &[
            PathSegment::LineTo { x: 1.0, y: 1.0 },
            PathSegment::MoveTo { x: 0.0, y: 0.0 },
            PathSegment::QuadTo { cp_x: 1.0, cp_y: 2.0, x: 3.0, y: 4.0 },
        ]);
    }

    #[test]
    fn test_rect_area_and_bounds() {
        let mut builder = PathBuilder::new();
        builder.rect(RectD::from_points(vec2d(-1.0, 2.0), vec2d(3.0, 5.0)));
        let path = builder.build();
        assert_eq!(path.area(), 12.0);
        assert_eq!(path.bounds(), Some(RectD::from_points(vec2d(-1.0, 2.0), vec2d(3.0, 5.0))));
        assert_eq!(path.to_string(), "M -1 2 L 3 2 L 3 5 L -1 5 Z");
        assert_eq!(path.subpath_count(), 1);
    }

    #[test]
    fn test_area_closes_open_subpaths() {
        let mut builder = PathBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.line_to(1.0, 0.0);
        builder.line_to(0.0, 1.0);
        builder.move_to(5.0, 5.0);
        builder.line_to(6.0, 5.0);
        builder.line_to(6.0, 6.0);
        builder.line_to(5.0, 6.0);
        let path = builder.build();
        assert_eq!(path.subpath_count(), 2);
        assert!((path.area() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_circle_area() {
        let mut builder = PathBuilder::new();
        builder.circle(vec2d(0.5, 0.5), 2.0);
        let area = builder.build().area();
        assert!((area - PI * 4.0).abs() < 0.01);
    }

    #[test]
    fn test_non_finite_scans() {
        let path: Path = vec![
            PathSegment::MoveTo { x: 0.0, y: 0.0 },
            PathSegment::CurveTo {
                cp1_x: 1.0,
                cp1_y: std::f64::INFINITY,
                cp2_x: 2.0,
                cp2_y: 2.0,
                x: 3.0,
                y: 0.0,
            },
            PathSegment::ClosePath,
        ].into_iter().collect();
        assert!(path.has_infinity());
        assert!(!path.has_nan());
        assert!(Path::new().bounds().is_none());
    }
}
