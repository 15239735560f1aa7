// pathbool/boolean/src/arrangement.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The planar arrangement of intersection-free edges, and the sweep that labels its faces.
//!
//! Edges are stored from their sweep-order minimum endpoint (`left`) to their maximum (`right`).
//! "Above" an edge means to the left of it when facing from `left` to `right`; for vertical edges
//! that is the side with smaller x, as if the plane were rotated by an infinitesimal angle.

use crate::error::InternalError;
use crate::sweep::{EdgeOrigin, SweepEdge};
use crate::winding::{Classifier, Operand, Winding};
use pathbool_geometry::orientation::Orientation;
use pathbool_geometry::vector::Vector2D;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::HashMap;

pub type VertexIndex = u32;
pub type EdgeIndex = u32;

pub struct Arrangement {
    pub vertices: Vec<Vector2D>,
    pub edges: Vec<ArrangementEdge>,
}

#[derive(Clone, Debug)]
pub struct ArrangementEdge {
    pub left: VertexIndex,
    pub right: VertexIndex,
    /// How the winding changes from below this edge to above it.
    pub delta: Winding,
    /// Where the edge came from, oriented from `left` to `right`. When several input edges
    /// coincide, the first one is kept.
    pub origin: EdgeOrigin,
    /// The winding of the face directly below this edge. Set by `label()`.
    pub below: Winding,
    /// The position of this edge in the order the labelling sweep inserted edges.
    pub order: u32,
    /// Whether the result changes from one side of this edge to the other. Set by `label()`.
    pub boundary: bool,
    /// The nearest boundary edge below this one at its left endpoint. Set by `label()`.
    pub boundary_below: Option<EdgeIndex>,
}

impl ArrangementEdge {
    /// The winding of the face directly above this edge.
    #[inline]
    pub fn above(&self) -> Winding {
        self.below + self.delta
    }
}

impl Arrangement {
    /// Builds the arrangement from edges that intersect only at shared endpoints.
    ///
    /// Coincident edges are merged into one edge with the sum of their winding changes.
    pub fn new<F>(sweep_edges: &[SweepEdge], operand_of: F) -> Arrangement
                  where F: Fn(u32) -> Operand {
        let mut vertices = vec![];
        let mut vertex_indices: HashMap<(u64, u64), VertexIndex> = HashMap::new();
        let mut edge_indices: HashMap<(VertexIndex, VertexIndex), EdgeIndex> = HashMap::new();
        let mut edges: Vec<ArrangementEdge> = vec![];

        let mut vertex_index_of = |point: Vector2D, vertices: &mut Vec<Vector2D>| {
            *vertex_indices.entry(point.to_bits()).or_insert_with(|| {
                vertices.push(point);
                (vertices.len() - 1) as VertexIndex
            })
        };

        for sweep_edge in sweep_edges {
            let line = sweep_edge.line;
            let forward = line.from().lexicographic_cmp(line.to()) == Ordering::Less;
            let (left, right, origin, sign) = if forward {
                (line.from(), line.to(), sweep_edge.origin, 1)
            } else {
                (line.to(), line.from(), sweep_edge.origin.reversed(), -1)
            };
            let left = vertex_index_of(left, &mut vertices);
            let right = vertex_index_of(right, &mut vertices);
            let delta = Winding::of(operand_of(sweep_edge.origin.source), sign);

            match edge_indices.get(&(left, right)) {
                Some(&edge_index) => edges[edge_index as usize].delta += delta,
                None => {
                    edge_indices.insert((left, right), edges.len() as EdgeIndex);
                    edges.push(ArrangementEdge {
                        left,
                        right,
                        delta,
                        origin,
                        below: Winding::zero(),
                        order: 0,
                        boundary: false,
                        boundary_below: None,
                    });
                }
            }
        }

        debug!("arrangement: {} vertices, {} edges from {} sweep edges",
               vertices.len(),
               edges.len(),
               sweep_edges.len());
        Arrangement { vertices, edges }
    }

    #[inline]
    pub fn position_of(&self, vertex: VertexIndex) -> Vector2D {
        self.vertices[vertex as usize]
    }

    /// Sweeps the arrangement bottom to top, computing the winding of the faces on either side of
    /// every edge and marking the edges that bound the result.
    pub fn label(&mut self, classifier: &Classifier) -> Result<(), InternalError> {
        let mut starting: Vec<SmallVec<[EdgeIndex; 2]>> = vec![SmallVec::new(); self.vertices.len()];
        for (edge_index, edge) in self.edges.iter().enumerate() {
            starting[edge.left as usize].push(edge_index as EdgeIndex);
        }

        let mut vertex_order: Vec<VertexIndex> = (0..self.vertices.len() as VertexIndex).collect();
        {
            let vertices = &self.vertices;
            vertex_order.sort_by(|&a, &b| {
                vertices[a as usize].lexicographic_cmp(vertices[b as usize])
            });
        }

        // Edges crossing the sweep line, bottom to top.
        let mut status: Vec<EdgeIndex> = vec![];
        let mut next_order = 0;
        for &vertex in &vertex_order {
            let point = self.position_of(vertex);
            let (position, ending_end) = self.status_range(&status, point);
            if status[position..ending_end].iter().any(|&edge| {
                self.edges[edge as usize].right != vertex
            }) {
                warn!("vertex {:?} lies on an edge during labelling", point);
                return Err(InternalError::VertexOnEdge);
            }

            let mut new_edges = starting[vertex as usize].clone();
            if new_edges.is_empty() {
                status.drain(position..ending_end);
                continue;
            }
            self.sort_fan(point, &mut new_edges);

            let mut below = match position {
                0 => Winding::zero(),
                _ => self.edges[status[position - 1] as usize].above(),
            };
            for &edge_index in &new_edges {
                let edge = &mut self.edges[edge_index as usize];
                edge.below = below;
                edge.order = next_order;
                edge.boundary = classifier.is_inside(edge.below) !=
                    classifier.is_inside(edge.above());
                next_order += 1;
                below = edge.above();
            }

            let insert_end = position + new_edges.len();
            status.splice(position..ending_end, new_edges.iter().cloned());
            for status_index in position..insert_end {
                let edge_index = status[status_index];
                if !self.edges[edge_index as usize].boundary {
                    continue;
                }
                let boundary_below = status[..status_index]
                    .iter()
                    .rev()
                    .find(|&&other| self.edges[other as usize].boundary)
                    .cloned();
                self.edges[edge_index as usize].boundary_below = boundary_below;
            }
        }

        debug_assert!(status.is_empty());
        Ok(())
    }

    // The edges in `status` that pass through `point`, as a range of positions. Everything
    // before the range passes below it.
    fn status_range(&self, status: &[EdgeIndex], point: Vector2D) -> (usize, usize) {
        let side = |edge: EdgeIndex| {
            let edge = &self.edges[edge as usize];
            Orientation::of(self.position_of(edge.left), self.position_of(edge.right), point)
        };
        let low = partition(status, 0, |edge| side(edge) == Orientation::Ccw);
        let high = partition(status, low, |edge| side(edge) != Orientation::Cw);
        (low, high)
    }

    // Sorts edges leaving `point` to the right from bottom to top.
    fn sort_fan(&self, point: Vector2D, edges: &mut [EdgeIndex]) {
        edges.sort_by(|&a, &b| {
            let a_right = self.position_of(self.edges[a as usize].right);
            let b_right = self.position_of(self.edges[b as usize].right);
            match Orientation::of(point, a_right, b_right) {
                Orientation::Ccw => Ordering::Less,
                Orientation::Cw => Ordering::Greater,
                Orientation::Collinear => a.cmp(&b),
            }
        });
    }
}

// The first position at or after `from` whose edge fails `predicate`.
fn partition<P>(status: &[EdgeIndex], from: usize, predicate: P) -> usize
                where P: Fn(EdgeIndex) -> bool {
    let (mut low, mut high) = (from, status.len());
    while low < high {
        let middle = (low + high) / 2;
        if predicate(status[middle]) {
            low = middle + 1;
        } else {
            high = middle;
        }
    }
    low
}

#[cfg(test)]
mod test {
    use super::Arrangement;
    use crate::sweep::{EdgeOrigin, SweepEdge};
    use crate::winding::{BooleanOperation, Classifier, Operand, Winding};
    use pathbool_content::fill::FillRule;
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

    fn square(source: u32, min: f64, max: f64) -> Vec<SweepEdge> {
        polygon(source, &[vec2d(min, min), vec2d(max, min), vec2d(max, max), vec2d(min, max)])
    }

    #[test]
    fn test_nested_squares_windings() {
        let mut edges = square(0, 0.0, 4.0);
        edges.extend(square(10, 1.0, 3.0));
        let mut arrangement = Arrangement::new(&edges, |source| {
            if source < 10 { Operand::A } else { Operand::B }
        });
        assert_eq!(arrangement.edges.len(), 8);
        let classifier = Classifier::new(BooleanOperation::Difference, FillRule::NonZero);
        arrangement.label(&classifier).unwrap();

        let inner_bottom = arrangement.edges.iter().find(|edge| {
            arrangement.position_of(edge.left) == vec2d(1.0, 1.0) &&
                arrangement.position_of(edge.right) == vec2d(3.0, 1.0)
        }).unwrap();
        assert_eq!(inner_bottom.below, Winding::new(1, 0));
        assert_eq!(inner_bottom.above(), Winding::new(1, 1));
        assert!(inner_bottom.boundary);
        let outer_bottom = &arrangement.edges[inner_bottom.boundary_below.unwrap() as usize];
        assert_eq!(arrangement.position_of(outer_bottom.left), vec2d(0.0, 0.0));
        assert_eq!(outer_bottom.below, Winding::zero());
        assert!(outer_bottom.boundary_below.is_none());
        assert!(arrangement.edges.iter().all(|edge| edge.boundary));
    }

    #[test]
    fn test_coincident_edges_merge() {
        // Two squares sharing the edge x = 1, traversed in opposite directions.
        let mut edges = square(0, 0.0, 1.0);
        edges.extend(polygon(10, &[vec2d(1.0, 0.0), vec2d(2.0, 0.0), vec2d(2.0, 1.0),
                                   vec2d(1.0, 1.0)]));
        let mut arrangement = Arrangement::new(&edges, |_| Operand::A);
        assert_eq!(arrangement.edges.len(), 7);
        let classifier = Classifier::new(BooleanOperation::Union, FillRule::NonZero);
        arrangement.label(&classifier).unwrap();
        let shared = arrangement.edges.iter().find(|edge| {
            arrangement.position_of(edge.left) == vec2d(1.0, 0.0) &&
                arrangement.position_of(edge.right) == vec2d(1.0, 1.0)
        }).unwrap();
        assert!(shared.delta.is_zero());
        assert!(!shared.boundary);
        assert_eq!(shared.below, Winding::new(1, 0));
        assert_eq!(arrangement.edges.iter().filter(|edge| edge.boundary).count(), 6);
    }
}
