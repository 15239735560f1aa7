// pathbool/boolean/src/contour.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traces the boundary edges of a labelled arrangement into closed contours, and rebuilds the
//! curves they were flattened from.

use crate::arrangement::{Arrangement, EdgeIndex, VertexIndex};
use crate::error::InternalError;
use crate::result::ResultContour;
use crate::sweep::EdgeOrigin;
use crate::winding::Classifier;
use pathbool_content::outline::Contour;
use pathbool_content::path::Path;
use pathbool_content::segment::Segment;
use pathbool_geometry::line_segment::LineSegment2D;
use pathbool_geometry::orientation::Orientation;
use pathbool_geometry::vector::Vector2D;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A boundary edge, pointing so that the result lies to its left.
#[derive(Clone, Copy, Debug)]
struct DirectedEdge {
    edge: EdgeIndex,
    from: VertexIndex,
    to: VertexIndex,
    origin: EdgeOrigin,
}

/// Builds the result contours from the boundary edges of a labelled arrangement.
///
/// `sources` is the table of segments that the edges' origins refer to. Contours are returned so
/// that every contour follows the one that encloses it.
pub fn reconstruct(arrangement: &Arrangement, classifier: &Classifier, sources: &[Segment])
                   -> Result<Vec<ResultContour>, InternalError> {
    let loops = Tracer::new(arrangement, classifier).trace()?;
    let loops = nest(arrangement, classifier, loops)?;

    let mut contours = Vec::with_capacity(loops.len());
    for nested in loops {
        let path = fuse_runs(arrangement, sources, &nested.edges);
        contours.push(ResultContour::new(path, nested.outer, nested.parent));
    }
    debug!("reconstructed {} contours", contours.len());
    Ok(contours)
}

struct Tracer<'a> {
    arrangement: &'a Arrangement,
    directed: Vec<DirectedEdge>,
    outgoing: Vec<SmallVec<[u32; 2]>>,
    used: Vec<bool>,
}

impl<'a> Tracer<'a> {
    fn new(arrangement: &'a Arrangement, classifier: &Classifier) -> Tracer<'a> {
        let mut directed = vec![];
        for (edge_index, edge) in arrangement.edges.iter().enumerate() {
            if !edge.boundary {
                continue;
            }
            let edge_index = edge_index as EdgeIndex;
            directed.push(if classifier.is_inside(edge.above()) {
                DirectedEdge { edge: edge_index, from: edge.left, to: edge.right, origin: edge.origin }
            } else {
                DirectedEdge {
                    edge: edge_index,
                    from: edge.right,
                    to: edge.left,
                    origin: edge.origin.reversed(),
                }
            });
        }

        // Traces start from the first edges the labelling sweep met.
        directed.sort_by_key(|directed_edge| arrangement.edges[directed_edge.edge as usize].order);

        let mut outgoing = vec![SmallVec::new(); arrangement.vertices.len()];
        for (directed_index, directed_edge) in directed.iter().enumerate() {
            outgoing[directed_edge.from as usize].push(directed_index as u32);
        }

        let used = vec![false; directed.len()];
        Tracer { arrangement, directed, outgoing, used }
    }

    fn trace(mut self) -> Result<Vec<Vec<DirectedEdge>>, InternalError> {
        let mut loops = vec![];
        for start in 0..self.directed.len() as u32 {
            if !self.used[start as usize] {
                self.trace_from(start, &mut loops)?;
            }
        }
        Ok(loops.into_iter().map(|edges: Vec<u32>| {
            edges.into_iter().map(|index| self.directed[index as usize]).collect()
        }).collect())
    }

    fn trace_from(&mut self, start: u32, loops: &mut Vec<Vec<u32>>) -> Result<(), InternalError> {
        let mut path = vec![start];
        let mut path_index_of_vertex = HashMap::new();
        path_index_of_vertex.insert(self.directed[start as usize].from, 0);
        self.used[start as usize] = true;

        while let Some(&incoming) = path.last() {
            let vertex = self.directed[incoming as usize].to;
            if let Some(&path_index) = path_index_of_vertex.get(&vertex) {
                let closed = path.split_off(path_index);
                for &index in &closed {
                    path_index_of_vertex.remove(&self.directed[index as usize].from);
                }
                loops.push(closed);
                continue;
            }

            let next = match self.next_edge(incoming) {
                Some(next) => next,
                None => {
                    warn!("boundary trace stopped at vertex {:?}",
                          self.arrangement.position_of(vertex));
                    return Err(InternalError::UnbalancedBoundary);
                }
            };
            self.used[next as usize] = true;
            path_index_of_vertex.insert(vertex, path.len());
            path.push(next);
        }
        Ok(())
    }

    // Picks the unused edge leaving the end of `incoming` that turns left most sharply, that is,
    // the first one met sweeping clockwise from the direction back along `incoming`.
    fn next_edge(&self, incoming: u32) -> Option<u32> {
        let incoming = &self.directed[incoming as usize];
        let vertex = self.arrangement.position_of(incoming.to);
        let back = self.arrangement.position_of(incoming.from);
        let candidates = self.outgoing[incoming.to as usize]
                             .iter()
                             .cloned()
                             .filter(|&index| !self.used[index as usize]);
        candidates.min_by(|&a, &b| {
            let a_to = self.arrangement.position_of(self.directed[a as usize].to);
            let b_to = self.arrangement.position_of(self.directed[b as usize].to);
            let (a_rank, b_rank) = (turn_rank(vertex, back, a_to), turn_rank(vertex, back, b_to));
            a_rank.cmp(&b_rank).then_with(|| {
                match Orientation::of(vertex, a_to, b_to) {
                    Orientation::Cw => Ordering::Less,
                    Orientation::Ccw => Ordering::Greater,
                    Orientation::Collinear => a.cmp(&b),
                }
            })
        })
    }
}

// Orders directions leaving `vertex` by their clockwise angle from the direction towards `back`,
// in half-plane granularity.
fn turn_rank(vertex: Vector2D, back: Vector2D, to: Vector2D) -> u8 {
    match Orientation::of(vertex, back, to) {
        Orientation::Cw => 0,
        Orientation::Collinear if (to - vertex).dot(back - vertex) < 0.0 => 1,
        Orientation::Ccw => 2,
        Orientation::Collinear => 3,
    }
}

struct NestedLoop {
    edges: Vec<DirectedEdge>,
    outer: bool,
    parent: Option<usize>,
}

// Orders the loops so that enclosing loops come first, and finds each loop's parent from the
// nearest boundary edge below its lowest edge.
fn nest(arrangement: &Arrangement, classifier: &Classifier, loops: Vec<Vec<DirectedEdge>>)
        -> Result<Vec<NestedLoop>, InternalError> {
    let mut keyed = vec![];
    for edges in loops {
        let first = edges.iter()
                         .map(|directed| directed.edge)
                         .min_by_key(|&edge| arrangement.edges[edge as usize].order)
                         .ok_or(InternalError::UnbalancedBoundary)?;
        keyed.push((first, edges));
    }
    keyed.sort_by_key(|&(first, _)| arrangement.edges[first as usize].order);

    let mut loop_of_edge = HashMap::new();
    for (loop_index, &(_, ref edges)) in keyed.iter().enumerate() {
        for directed in edges {
            loop_of_edge.insert(directed.edge, loop_index);
        }
    }

    let mut nested: Vec<NestedLoop> = Vec::with_capacity(keyed.len());
    for (first, edges) in keyed {
        let first = &arrangement.edges[first as usize];
        let outer = !classifier.is_inside(first.below);
        let parent = match first.boundary_below {
            None => None,
            Some(below) => {
                let below_index = match loop_of_edge.get(&below) {
                    Some(&below_index) if below_index < nested.len() => below_index,
                    _ => return Err(InternalError::UnbalancedBoundary),
                };
                let below_loop = &nested[below_index];
                if below_loop.outer == outer {
                    below_loop.parent
                } else {
                    Some(below_index)
                }
            }
        };
        nested.push(NestedLoop { edges, outer, parent });
    }
    Ok(nested)
}

// Whether `next` continues the curve traced by `prev` without a break.
fn continues(prev: &EdgeOrigin, next: &EdgeOrigin) -> bool {
    prev.source == next.source && prev.t1 == next.t0 && (prev.t1 > prev.t0) == (next.t1 > next.t0)
}

// Rebuilds the lines and curves of a loop by merging runs of edges flattened from the same
// source segment.
fn fuse_runs(arrangement: &Arrangement, sources: &[Segment], edges: &[DirectedEdge]) -> Path {
    let count = edges.len();
    let start = (0..count).find(|&index| {
        !continues(&edges[(index + count - 1) % count].origin, &edges[index].origin)
    }).unwrap_or(0);

    let mut contour = Contour::with_capacity(count + 1);
    let mut offset = 0;
    while offset < count {
        let first = &edges[(start + offset) % count];
        let mut last = first;
        offset += 1;
        while offset < count {
            let next = &edges[(start + offset) % count];
            if !continues(&last.origin, &next.origin) {
                break;
            }
            last = next;
            offset += 1;
        }

        let from = arrangement.position_of(first.from);
        let to = arrangement.position_of(last.to);
        let segment = match sources.get(first.origin.source as usize) {
            Some(source) => rebuild_segment(source, first.origin.t0, last.origin.t1, from, to),
            None => Segment::line(LineSegment2D::new(from, to)),
        };
        contour.push_segment(&segment);
    }
    contour.close();

    let mut segments = vec![];
    contour.push_path_segments(&mut segments);
    Path::from_segments(segments)
}

// The part of `source` between two parameters, in the direction from `t_start` to `t_end`, with
// its endpoints moved onto the arrangement vertices.
fn rebuild_segment(source: &Segment, t_start: f64, t_end: f64, from: Vector2D, to: Vector2D)
                   -> Segment {
    if source.is_line() || t_start == t_end {
        return Segment::line(LineSegment2D::new(from, to));
    }
    let mut segment = if t_start < t_end {
        source.sub_segment(t_start, t_end)
    } else {
        source.sub_segment(t_end, t_start).reversed()
    };
    segment.baseline = LineSegment2D::new(from, to);
    segment
}

#[cfg(test)]
mod test {
    use super::{continues, rebuild_segment, reconstruct};
    use crate::arrangement::Arrangement;
    use crate::sweep::{EdgeOrigin, SweepEdge};
    use crate::winding::{BooleanOperation, Classifier, Operand};
    use pathbool_content::fill::FillRule;
    use pathbool_content::path::PathSegment;
    use pathbool_content::segment::Segment;
    use pathbool_geometry::line_segment::LineSegment2D;
    use pathbool_geometry::vector::{Vector2D, vec2d};

    fn polygon(source: u32, points: &[Vector2D]) -> Vec<SweepEdge> {
        (0..points.len()).map(|index| {
            SweepEdge {
                line: LineSegment2D::new(points[index], points[(index + 1) % points.len()]),
                origin: EdgeOrigin { source: source + index as u32, t0: 0.0, t1: 1.0 },
            }
        }).collect()
    }

    fn line_sources(edges: &[SweepEdge]) -> Vec<Segment> {
        let mut sources = vec![Segment::line(LineSegment2D::default()); edges.len() + 20];
        for edge in edges {
            sources[edge.origin.source as usize] = Segment::line(edge.line);
        }
        sources
    }

    #[test]
    fn test_bow_tie_touching_squares() {
        // Two squares that touch at a single corner form two contours.
        let mut edges = polygon(0, &[vec2d(0.0, 0.0), vec2d(1.0, 0.0), vec2d(1.0, 1.0),
                                     vec2d(0.0, 1.0)]);
        edges.extend(polygon(4, &[vec2d(1.0, 1.0), vec2d(2.0, 1.0), vec2d(2.0, 2.0),
                                  vec2d(1.0, 2.0)]));
        let sources = line_sources(&edges);
        let mut arrangement = Arrangement::new(&edges, |_| Operand::A);
        let classifier = Classifier::new(BooleanOperation::Union, FillRule::NonZero);
        arrangement.label(&classifier).unwrap();
        let contours = reconstruct(&arrangement, &classifier, &sources).unwrap();
        assert_eq!(contours.len(), 2);
        for contour in &contours {
            assert!(contour.is_outer());
            assert_eq!(contour.parent(), None);
            assert_eq!(contour.area(), 1.0);
        }
    }

    #[test]
    fn test_hole_nesting() {
        let mut edges = polygon(0, &[vec2d(0.0, 0.0), vec2d(4.0, 0.0), vec2d(4.0, 4.0),
                                     vec2d(0.0, 4.0)]);
        edges.extend(polygon(4, &[vec2d(1.0, 1.0), vec2d(3.0, 1.0), vec2d(3.0, 3.0),
                                  vec2d(1.0, 3.0)]));
        let sources = line_sources(&edges);
        let mut arrangement = Arrangement::new(&edges, |source| {
            if source < 4 { Operand::A } else { Operand::B }
        });
        let classifier = Classifier::new(BooleanOperation::Difference, FillRule::EvenOdd);
        arrangement.label(&classifier).unwrap();
        let contours = reconstruct(&arrangement, &classifier, &sources).unwrap();
        assert_eq!(contours.len(), 2);
        assert!(contours[0].is_outer());
        assert_eq!(contours[0].area(), 16.0);
        assert!(!contours[1].is_outer());
        assert_eq!(contours[1].parent(), Some(0));
        assert_eq!(contours[1].area(), -4.0);
        assert_eq!(contours[1].path().segments()[0], PathSegment::MoveTo { x: 3.0, y: 1.0 });
    }

    #[test]
    fn test_runs_of_one_source_are_fused() {
        // A square whose bottom side was split in two.
        let points = [vec2d(0.0, 0.0), vec2d(1.0, 0.0), vec2d(2.0, 0.0), vec2d(2.0, 2.0),
                      vec2d(0.0, 2.0)];
        let mut edges = polygon(0, &points);
        edges[0].origin = EdgeOrigin { source: 0, t0: 0.0, t1: 0.5 };
        edges[1].origin = EdgeOrigin { source: 0, t0: 0.5, t1: 1.0 };
        let mut sources = line_sources(&edges);
        sources[0] = Segment::line(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(2.0, 0.0)));
        let mut arrangement = Arrangement::new(&edges, |_| Operand::A);
        let classifier = Classifier::new(BooleanOperation::Union, FillRule::NonZero);
        arrangement.label(&classifier).unwrap();
        let contours = reconstruct(&arrangement, &classifier, &sources).unwrap();
        assert_eq!(contours.len(), 1);
        // MoveTo, three LineTos, and ClosePath.
        assert_eq!(contours[0].path().len(), 5);
        assert_eq!(contours[0].area(), 4.0);
    }

    #[test]
    fn test_curve_runs_are_rebuilt_backwards() {
        let curve = Segment::quadratic(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(4.0, 0.0)),
                                       vec2d(2.0, 4.0));
        let from = curve.sample(0.75);
        let to = curve.sample(0.25);
        let rebuilt = rebuild_segment(&curve, 0.75, 0.25, from, to);
        assert!(rebuilt.is_quadratic());
        assert_eq!(rebuilt.from(), from);
        assert_eq!(rebuilt.to(), to);
        let middle = rebuilt.sample(0.5);
        assert!((middle - curve.sample(0.5)).length() < 1e-12);

        let forward = EdgeOrigin { source: 3, t0: 0.25, t1: 0.5 };
        assert!(continues(&forward, &EdgeOrigin { source: 3, t0: 0.5, t1: 0.75 }));
        assert!(!continues(&forward, &EdgeOrigin { source: 3, t0: 0.5, t1: 0.25 }));
        assert!(!continues(&forward, &EdgeOrigin { source: 4, t0: 0.5, t1: 0.75 }));
    }
}
