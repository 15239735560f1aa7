// pathbool/content/src/flatten.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Approximates outlines with straight edges that remember which curve they came from.

use crate::monotonic::MonotonicConversionIter;
use crate::outline::{ContourIterFlags, Outline};
use crate::segment::Segment;
use pathbool_geometry::line_segment::LineSegment2D;

/// A straight piece of a flattened segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatEdge {
    pub line: LineSegment2D,
    /// The index of the segment this edge approximates, in the table built by the flattener.
    pub source: u32,
    /// The parametric values on the source segment at `line.from()` and `line.to()`.
    pub t0: f64,
    pub t1: f64,
}

/// Flattens curves into polylines whose vertices lie on the curve, within a tolerance.
#[derive(Clone, Copy, Debug)]
pub struct Flattener {
    tolerance: f64,
}

impl Flattener {
    #[inline]
    pub fn new(tolerance: f64) -> Flattener {
        Flattener { tolerance }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Flattens every segment of every contour, including closing segments.
    ///
    /// The segments are appended to `sources`, and each edge refers to its segment by index in
    /// that table. Segments with all control points coincident are skipped.
    pub fn flatten_outline(&self,
                           outline: &Outline,
                           sources: &mut Vec<Segment>,
                           edges: &mut Vec<FlatEdge>) {
        for contour in outline.contours() {
            let first_source = sources.len() as u32;
            let segments = contour.iter(ContourIterFlags::empty())
                                  .filter(|segment| !is_degenerate(segment));
            let start = sources.len();
            sources.extend(segments);
            let pieces = MonotonicConversionIter::new(sources[start..].iter().cloned());
            for piece in pieces {
                let steps = piece.segment.flattening_steps(self.tolerance);
                let source = first_source + piece.source;
                let mut from = piece.segment.from();
                let mut t_from = piece.t0;
                for step in 1..=steps {
                    let (to, t_to) = if step == steps {
                        (piece.segment.to(), piece.t1)
                    } else {
                        let u = step as f64 / steps as f64;
                        (piece.segment.sample(u), piece.t0 + (piece.t1 - piece.t0) * u)
                    };
                    if to != from {
                        edges.push(FlatEdge {
                            line: LineSegment2D::new(from, to),
                            source,
                            t0: t_from,
                            t1: t_to,
                        });
                    } else if let Some(last) = edges.last_mut()
                                                    .filter(|edge| edge.source == source) {
                        // Keep the parameter chain unbroken across a step of zero length.
                        last.t1 = t_to;
                    }
                    from = to;
                    t_from = t_to;
                }
            }
        }
        debug!("flattened {} segments into {} edges", sources.len(), edges.len());
    }
}

fn is_degenerate(segment: &Segment) -> bool {
    let points = segment.control_polygon();
    points.iter().all(|point| *point == points[0])
}

#[cfg(test)]
mod test {
    use super::Flattener;
    use crate::outline::Outline;
    use crate::path::PathBuilder;

    #[test]
    fn test_edges_chain_and_keep_endpoints() {
        let mut builder = PathBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.line_to(4.0, 0.0);
        builder.curve_to(6.0, 2.0, 6.0, 4.0, 4.0, 6.0);
        builder.quad_to(0.0, 8.0, 0.0, 0.0);
        builder.close_path();
        let outline = Outline::from_path(&builder.build()).unwrap();

        let (mut sources, mut edges) = (vec![], vec![]);
        Flattener::new(0.01).flatten_outline(&outline, &mut sources, &mut edges);

        // The quadratic ends where the contour started, so there is no closing segment.
        assert_eq!(sources.len(), 3);
        assert_eq!(edges.first().unwrap().line.from(), sources[0].from());
        assert_eq!(edges.last().unwrap().line.to(), sources[0].from());
        for window in edges.windows(2) {
            assert_eq!(window[0].line.to(), window[1].line.from());
            if window[0].source == window[1].source {
                assert_eq!(window[0].t1, window[1].t0);
            } else {
                assert_eq!(window[0].t1, 1.0);
                assert_eq!(window[1].t0, 0.0);
            }
        }
        assert!(edges.iter().filter(|edge| edge.source == 1).count() > 4);
        for edge in &edges {
            let source = &sources[edge.source as usize];
            assert!((source.sample(edge.t0) - edge.line.from()).length() < 1e-9);
            assert!((source.sample(edge.t1) - edge.line.to()).length() < 1e-9);
        }
    }
}
