// pathbool/content/src/outline.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A validated, compressed in-memory representation of a closed path.

use crate::error::PathError;
use crate::path::{Path, PathSegment};
use crate::segment::{Segment, SegmentKind};
use pathbool_geometry::line_segment::LineSegment2D;
use pathbool_geometry::rect::RectD;
use pathbool_geometry::vector::{Vector2D, vec2d};
use std::fmt::{self, Debug, Formatter};

/// A path that has passed validation. Outlines consist of *contours* (a.k.a. subpaths), every one
/// of which is closed and has finite coordinates.
///
/// The names "outline" and "contour" come from the TrueType specification. They were chosen to
/// avoid conflicting with the Rust use of "path" for filesystem paths.
#[derive(Clone, Default)]
pub struct Outline {
    pub(crate) contours: Vec<Contour>,
    pub(crate) bounds: RectD,
}

/// An individual subpath, consisting of a series of endpoints and/or control points. Closed
/// contours have an implicit line from the last point back to the first.
#[derive(Clone, Default)]
pub struct Contour {
    pub(crate) points: Vec<Vector2D>,
    pub(crate) flags: Vec<PointFlags>,
    pub(crate) bounds: RectD,
    pub(crate) closed: bool,
}

bitflags! {
    /// Flags that each point can have, indicating whether it is on-curve or whether it's a control
    /// point.
    pub struct PointFlags: u8 {
        /// This point is the first control point of a cubic Bézier curve or the only control point
        /// of a quadratic Bézier curve.
        const CONTROL_POINT_0 = 0x01;
        /// This point is the second point of a cubic Bézier curve.
        const CONTROL_POINT_1 = 0x02;
    }
}

impl Outline {
    /// Creates a new empty outline with no contours.
    #[inline]
    pub fn new() -> Outline {
        Outline::default()
    }

    /// Validates a path and converts it to an outline.
    ///
    /// Every coordinate is checked before any structure is: a NaN anywhere is always reported as
    /// `NaNInput`, then an infinity anywhere as `InfiniteInput`. A `MoveTo` that starts no
    /// drawing is ignored. Drawing after a `ClosePath` starts a new subpath at the start point of
    /// the one just closed.
    pub fn from_path(path: &Path) -> Result<Outline, PathError> {
        if path.has_nan() {
            return Err(PathError::NaNInput);
        }
        if path.has_infinity() {
            return Err(PathError::InfiniteInput);
        }

        let mut outline = Outline::new();
        let mut current_contour: Option<Contour> = None;
        let mut last_start: Option<Vector2D> = None;
        let mut subpath_count = 0;

        for (segment_index, segment) in path.segments().iter().enumerate() {
            match *segment {
                PathSegment::MoveTo { x, y } => {
                    if let Some(contour) = current_contour.take() {
                        if contour.has_drawing() {
                            return Err(PathError::NonClosedPath { subpath: subpath_count - 1 });
                        }
                    }
                    let start = vec2d(x, y);
                    let mut contour = Contour::new();
                    contour.push_endpoint(start);
                    current_contour = Some(contour);
                    last_start = Some(start);
                    subpath_count += 1;
                }
                PathSegment::ClosePath => {
                    if let Some(mut contour) = current_contour.take() {
                        if contour.has_drawing() {
                            contour.close();
                            outline.push_contour(contour);
                        }
                    }
                }
                _ => {
                    if current_contour.is_none() {
                        let start = match last_start {
                            Some(start) => start,
                            None => return Err(PathError::MissingMoveTo { segment: segment_index }),
                        };
                        let mut contour = Contour::new();
                        contour.push_endpoint(start);
                        current_contour = Some(contour);
                        subpath_count += 1;
                    }
                    if let Some(ref mut contour) = current_contour {
                        contour.push_command(segment);
                    }
                }
            }
        }

        match current_contour {
            Some(ref contour) if contour.has_drawing() => {
                Err(PathError::NonClosedPath { subpath: subpath_count - 1 })
            }
            _ => Ok(outline),
        }
    }

    /// Converts this outline back to a path.
    pub fn to_path(&self) -> Path {
        let mut segments = vec![];
        for contour in &self.contours {
            contour.push_path_segments(&mut segments);
        }
        Path::from_segments(segments)
    }

    /// Returns the dimensions of an axis-aligned box that encloses the entire outline.
    #[inline]
    pub fn bounds(&self) -> RectD {
        self.bounds
    }

    /// Returns a list of the subpaths in this path.
    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// Adds a new subpath to this outline.
    pub fn push_contour(&mut self, contour: Contour) {
        if contour.is_empty() {
            return;
        }

        if self.contours.is_empty() {
            self.bounds = contour.bounds;
        } else {
            self.bounds = self.bounds.union_rect(contour.bounds);
        }

        self.contours.push(contour);
    }

    /// Returns true if this outline has no contours.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Returns the number of contours in this outline.
    #[inline]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    /// The exact signed area enclosed, counterclockwise positive.
    pub fn signed_area(&self) -> f64 {
        self.contours.iter().map(|contour| contour.signed_area()).sum()
    }
}

impl Debug for Outline {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for (contour_index, contour) in self.contours.iter().enumerate() {
            if contour_index > 0 {
                write!(formatter, " ")?;
            }
            contour.fmt(formatter)?;
        }
        Ok(())
    }
}

impl Contour {
    /// Creates a new empty unclosed subpath.
    #[inline]
    pub fn new() -> Contour {
        Contour::default()
    }

    /// Returns a new empty unclosed subpath with space preallocated for the given number of
    /// points.
    #[inline]
    pub fn with_capacity(length: usize) -> Contour {
        Contour {
            points: Vec::with_capacity(length),
            flags: Vec::with_capacity(length),
            bounds: RectD::default(),
            closed: false,
        }
    }

    /// Returns an iterator over the segments in this contour.
    #[inline]
    pub fn iter(&self, flags: ContourIterFlags) -> ContourIter {
        ContourIter { contour: self, index: 1, flags }
    }

    /// Returns true if this contour has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of points (including on-curve and control points) in this contour.
    #[inline]
    pub fn len(&self) -> u32 {
        self.points.len() as u32
    }

    /// Returns the dimensions of an axis-aligned rectangle that encloses this contour.
    #[inline]
    pub fn bounds(&self) -> RectD {
        self.bounds
    }

    /// Returns true if this contour is closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the position of the point (which can be an on-curve point or a control point) with
    /// the given index.
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn position_of(&self, index: u32) -> Vector2D {
        self.points[index as usize]
    }

    /// Returns the position of the first point in this subpath.
    #[inline]
    pub fn first_position(&self) -> Option<Vector2D> {
        self.points.first().cloned()
    }

    /// Returns the position of the last point in this subpath.
    #[inline]
    pub fn last_position(&self) -> Option<Vector2D> {
        self.points.last().cloned()
    }

    #[inline]
    pub fn point_is_endpoint(&self, point_index: u32) -> bool {
        !self.flags[point_index as usize]
            .intersects(PointFlags::CONTROL_POINT_0 | PointFlags::CONTROL_POINT_1)
    }

    /// Adds a new on-curve point at the given position to this contour.
    #[inline]
    pub fn push_endpoint(&mut self, to: Vector2D) {
        self.push_point(to, PointFlags::empty());
    }

    /// Adds a new quadratic Bézier curve to the given on-curve position and control point to this
    /// contour.
    #[inline]
    pub fn push_quadratic(&mut self, ctrl: Vector2D, to: Vector2D) {
        self.push_point(ctrl, PointFlags::CONTROL_POINT_0);
        self.push_point(to, PointFlags::empty());
    }

    /// Adds a new cubic Bézier curve to the given on-curve position and control points to this
    /// contour.
    #[inline]
    pub fn push_cubic(&mut self, ctrl0: Vector2D, ctrl1: Vector2D, to: Vector2D) {
        self.push_point(ctrl0, PointFlags::CONTROL_POINT_0);
        self.push_point(ctrl1, PointFlags::CONTROL_POINT_1);
        self.push_point(to, PointFlags::empty());
    }

    /// Appends `segment`, whose start point must be the last point of this contour, or which
    /// starts the contour if it is empty.
    pub fn push_segment(&mut self, segment: &Segment) {
        if self.is_empty() {
            self.push_endpoint(segment.from());
        }
        debug_assert_eq!(self.last_position(), Some(segment.from()));
        match segment.kind {
            SegmentKind::Line => self.push_endpoint(segment.to()),
            SegmentKind::Quadratic => self.push_quadratic(segment.ctrl.from(), segment.to()),
            SegmentKind::Cubic => {
                self.push_cubic(segment.ctrl.from(), segment.ctrl.to(), segment.to())
            }
        }
    }

    /// Marks this contour as closed, which results in an implicit line from the end back to the
    /// starting point.
    #[inline]
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// The exact signed area enclosed, counterclockwise positive, as if this contour were closed.
    pub fn signed_area(&self) -> f64 {
        self.iter(ContourIterFlags::empty()).map(|segment| segment.signed_area()).sum::<f64>() +
            if self.closed {
                0.0
            } else {
                match (self.last_position(), self.first_position()) {
                    (Some(last), Some(first)) => last.det(first) * 0.5,
                    _ => 0.0,
                }
            }
    }

    /// Appends the commands that draw this contour: a `MoveTo`, then one command per segment,
    /// then `ClosePath` if the contour is closed. A final line back to the start is left to the
    /// `ClosePath`.
    pub fn push_path_segments(&self, segments: &mut Vec<PathSegment>) {
        let first = match self.first_position() {
            None => return,
            Some(first) => first,
        };
        segments.push(PathSegment::MoveTo { x: first.x(), y: first.y() });
        let mut pending_line: Option<PathSegment> = None;
        for segment in self.iter(ContourIterFlags::IGNORE_CLOSE_SEGMENT) {
            if let Some(line) = pending_line.take() {
                segments.push(line);
            }
            let command = PathSegment::from_segment(&segment);
            if self.closed && segment.is_line() && segment.to() == first {
                pending_line = Some(command);
            } else {
                segments.push(command);
            }
        }
        if self.closed {
            segments.push(PathSegment::ClosePath);
        } else if let Some(line) = pending_line {
            segments.push(line);
        }
    }

    #[inline]
    pub(crate) fn push_point(&mut self, point: Vector2D, flags: PointFlags) {
        debug_assert!(!point.is_nan());

        if self.is_empty() {
            self.bounds = RectD::from_points(point, point);
        } else {
            self.bounds = self.bounds.union_point(point);
        }

        self.points.push(point);
        self.flags.push(flags);
    }

    fn push_command(&mut self, command: &PathSegment) {
        let from = match self.last_position() {
            Some(from) => from,
            None => return,
        };
        if let Some(segment) = command.to_segment(from) {
            self.push_segment(&segment);
        }
    }

    fn has_drawing(&self) -> bool {
        self.points.len() > 1
    }
}

impl Debug for Contour {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let mut segments = vec![];
        self.push_path_segments(&mut segments);
        for (segment_index, segment) in segments.iter().enumerate() {
            if segment_index > 0 {
                write!(formatter, " ")?;
            }
            write!(formatter, "{}", segment)?;
        }
        Ok(())
    }
}

/// Iterates over all Bézier segments within a contour.
pub struct ContourIter<'a> {
    contour: &'a Contour,
    index: u32,
    flags: ContourIterFlags,
}

impl<'a> Iterator for ContourIter<'a> {
    type Item = Segment;

    #[inline]
    fn next(&mut self) -> Option<Segment> {
        let contour = self.contour;

        let include_close_segment = self.contour.closed &&
            !self.flags.contains(ContourIterFlags::IGNORE_CLOSE_SEGMENT);
        if (self.index == contour.len() && !include_close_segment) ||
                self.index >= contour.len() + 1 {
            return None;
        }

        let point0_index = self.index - 1;
        let point0 = contour.position_of(point0_index);
        if self.index == contour.len() {
            self.index += 1;
            let point1 = contour.position_of(0);
            if point0 == point1 {
                return None;
            }
            return Some(Segment::line(LineSegment2D::new(point0, point1)));
        }

        let point1_index = self.index;
        self.index += 1;
        let point1 = contour.position_of(point1_index);
        if contour.point_is_endpoint(point1_index) {
            return Some(Segment::line(LineSegment2D::new(point0, point1)));
        }

        let point2_index = self.index;
        let point2 = contour.position_of(point2_index);
        self.index += 1;
        if contour.point_is_endpoint(point2_index) {
            return Some(Segment::quadratic(LineSegment2D::new(point0, point2), point1));
        }

        let point3_index = self.index;
        let point3 = contour.position_of(point3_index);
        self.index += 1;
        debug_assert!(contour.point_is_endpoint(point3_index));
        Some(Segment::cubic(LineSegment2D::new(point0, point3),
                            LineSegment2D::new(point1, point2)))
    }
}

bitflags! {
    /// Flags that control the behavior of `Contour::iter()`.
    pub struct ContourIterFlags: u8 {
        /// Set to true to avoid iterating over the implicit line segment that joins the last point
        /// to the first point for closed contours.
        const IGNORE_CLOSE_SEGMENT = 1;
    }
}

#[cfg(test)]
mod test {
    use super::{ContourIterFlags, Outline};
    use crate::error::PathError;
    use crate::path::{Path, PathBuilder, PathSegment};
    use pathbool_geometry::rect::RectD;
    use pathbool_geometry::vector::vec2d;
    use std::f64::NAN;
    use std::f64::INFINITY;

    fn triangle(close: bool) -> PathBuilder {
        let mut builder = PathBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.line_to(1.0, 0.0);
        builder.line_to(0.0, 1.0);
        if close {
            builder.close_path();
        }
        builder
    }

    #[test]
    fn test_closed_triangle() {
        let outline = Outline::from_path(&triangle(true).build()).unwrap();
        assert_eq!(outline.len(), 1);
        let segments: Vec<_> = outline.contours()[0].iter(ContourIterFlags::empty()).collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].to(), vec2d(0.0, 0.0));
        assert_eq!(outline.signed_area(), 0.5);
        assert_eq!(outline.bounds(), RectD::from_points(vec2d(0.0, 0.0), vec2d(1.0, 1.0)));
    }

    #[test]
    fn test_open_subpath_is_rejected() {
        let mut builder = triangle(true);
        builder.move_to(5.0, 5.0);
        builder.line_to(6.0, 5.0);
        builder.line_to(6.0, 6.0);
        assert_eq!(Outline::from_path(&builder.build()).err(),
                   Some(PathError::NonClosedPath { subpath: 1 }));
        assert_eq!(Outline::from_path(&triangle(false).build()).err(),
                   Some(PathError::NonClosedPath { subpath: 0 }));
    }

    #[test]
    fn test_nan_wins_over_structure() {
        let mut builder = triangle(false);
        builder.line_to(INFINITY, 0.0);
        builder.line_to(NAN, 0.0);
        assert_eq!(Outline::from_path(&builder.build()).err(), Some(PathError::NaNInput));
        let mut builder = triangle(false);
        builder.line_to(INFINITY, 0.0);
        assert_eq!(Outline::from_path(&builder.build()).err(), Some(PathError::InfiniteInput));
    }

    #[test]
    fn test_missing_move_to() {
        let path = Path::from_segments(vec![PathSegment::LineTo { x: 1.0, y: 1.0 }]);
        assert_eq!(Outline::from_path(&path).err(),
                   Some(PathError::MissingMoveTo { segment: 0 }));
    }

    #[test]
    fn test_lone_move_to_and_empty_paths_are_ignored() {
        let mut builder = triangle(true);
        builder.move_to(9.0, 9.0);
        let outline = Outline::from_path(&builder.build()).unwrap();
        assert_eq!(outline.len(), 1);
        assert!(Outline::from_path(&Path::new()).unwrap().is_empty());
    }

    #[test]
    fn test_drawing_after_close_reuses_start_point() {
        let mut builder = triangle(true);
        builder.line_to(-1.0, 0.0);
        builder.line_to(0.0, -1.0);
        builder.close_path();
        let outline = Outline::from_path(&builder.build()).unwrap();
        assert_eq!(outline.len(), 2);
        assert_eq!(outline.contours()[1].first_position(), Some(vec2d(0.0, 0.0)));
    }

    #[test]
    fn test_round_trip_leaves_closing_line_implicit() {
        let path = triangle(true).build();
        let outline = Outline::from_path(&path).unwrap();
        assert_eq!(outline.to_path(), path);

        let mut builder = triangle(false);
        builder.line_to(0.0, 0.0);
        builder.close_path();
        assert_eq!(Outline::from_path(&builder.build()).unwrap().to_path(), path);
    }
}
