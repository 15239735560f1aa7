// pathbool/boolean/src/sweep.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splits edges at all of their mutual intersections.
//!
//! Every vertex lives on a snap grid. Crossings, touches, and overlaps are classified with exact
//! orientation predicates, so they are never missed or duplicated. A crossing point is rounded to
//! the grid before both edges are split there; because rounding bends the edges slightly, the
//! sweep repeats until a pass finds nothing to split. When it stops, no two edges intersect
//! except at a shared endpoint, and no vertex lies in the interior of an edge.
//!
//! Each pass is a Bentley-Ottmann sweep: the edges under the sweep line are kept in order with
//! the same exact predicates, only edges that become neighbours are tested, and crossings are
//! queued as events where the two edges swap places. A pass that splits nothing has tested
//! every pair that could meet, so it proves the edges free of intersections.

use crate::error::InternalError;
use pathbool_content::flatten::FlatEdge;
use pathbool_geometry::grid::SnapGrid;
use pathbool_geometry::line_segment::LineSegment2D;
use pathbool_geometry::orientation::Orientation;
use pathbool_geometry::util;
use pathbool_geometry::vector::Vector2D;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::ops::Range;

/// An edge of the sweep, along with the curve it approximates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepEdge {
    pub line: LineSegment2D,
    pub origin: EdgeOrigin,
}

/// The source segment an edge was flattened from, and the parametric values on that segment at
/// the `from` and `to` points of the edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeOrigin {
    pub source: u32,
    pub t0: f64,
    pub t1: f64,
}

impl EdgeOrigin {
    /// The source parameter at a fraction of the way along the edge.
    #[inline]
    pub fn t_at(&self, fraction: f64) -> f64 {
        if fraction <= 0.0 {
            self.t0
        } else if fraction >= 1.0 {
            self.t1
        } else {
            util::lerp(self.t0, self.t1, fraction)
        }
    }

    #[inline]
    pub fn reversed(&self) -> EdgeOrigin {
        EdgeOrigin { source: self.source, t0: self.t1, t1: self.t0 }
    }
}

impl SweepEdge {
    /// Snaps a flattened edge to the grid. Returns `None` if it collapses to a point.
    pub fn snapped(edge: &FlatEdge, grid: &SnapGrid) -> Option<SweepEdge> {
        let line = LineSegment2D::new(grid.snap_point(edge.line.from()),
                                      grid.snap_point(edge.line.to()));
        if line.is_zero_length() {
            return None;
        }
        Some(SweepEdge {
            line,
            origin: EdgeOrigin { source: edge.source, t0: edge.t0, t1: edge.t1 },
        })
    }
}

type SplitPoints = SmallVec<[Vector2D; 2]>;

/// Repeats the intersection sweep until the edges are free of intersections.
pub fn resolve_intersections(mut edges: Vec<SweepEdge>,
                             grid: &SnapGrid,
                             max_passes: u32)
                             -> Result<Vec<SweepEdge>, InternalError> {
    edges.retain(|edge| !edge.line.is_zero_length());
    for pass in 0..max_passes {
        let mut sweep = IntersectionSweep::new(&edges, grid);
        sweep.run();
        debug!("sweep pass {}: {} edges, {} split points", pass, edges.len(), sweep.split_count);
        if sweep.split_count == 0 {
            return Ok(edges);
        }
        edges = sweep.apply_splits();
    }
    warn!("intersection sweep did not converge after {} passes", max_passes);
    Err(InternalError::SweepDidNotConverge { passes: max_passes })
}

struct IntersectionSweep<'a> {
    edges: &'a [SweepEdge],
    grid: &'a SnapGrid,
    splits: Vec<SplitPoints>,
    split_count: usize,
    events: BinaryHeap<Event>,
    // Unordered pairs that already have a crossing event.
    scheduled: HashSet<(u32, u32)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    // Ends sort before starts, so edges that only touch at a point are never tested.
    End,
    Cross,
    Start,
}

/// For `Cross`, `edge` was directly below `other` when the crossing was found.
#[derive(Clone, Copy, Debug)]
struct Event {
    point: Vector2D,
    kind: EventKind,
    edge: u32,
    other: u32,
}

impl Event {
    fn endpoint(point: Vector2D, kind: EventKind, edge: u32) -> Event {
        Event { point, kind, edge, other: edge }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Event) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Event) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed, so that `BinaryHeap` pops the leftmost event first.
impl Ord for Event {
    fn cmp(&self, other: &Event) -> Ordering {
        other.point
             .lexicographic_cmp(self.point)
             .then(other.kind.cmp(&self.kind))
             .then(other.edge.cmp(&self.edge))
             .then(other.other.cmp(&self.other))
    }
}

const INACTIVE: usize = !0;

/// The edges crossing the sweep line, bottom to top, and the position of each one.
///
/// Insertion and removal shift the tail of the vector, but every lookup is a binary search or
/// a slot read, and only neighbouring edges are ever tested against each other.
struct Status {
    edges: Vec<u32>,
    slots: Vec<usize>,
}

impl Status {
    fn new(edge_count: usize) -> Status {
        Status { edges: vec![], slots: vec![INACTIVE; edge_count] }
    }

    #[inline]
    fn slot(&self, edge: u32) -> Option<usize> {
        match self.slots[edge as usize] {
            INACTIVE => None,
            slot => Some(slot),
        }
    }

    fn remove(&mut self, edge: u32) {
        if let Some(slot) = self.slot(edge) {
            self.edges.remove(slot);
            self.slots[edge as usize] = INACTIVE;
            self.reindex(slot);
        }
    }

    fn replace(&mut self, range: Range<usize>, edges: &[u32]) {
        let start = range.start;
        for &edge in &self.edges[range.clone()] {
            self.slots[edge as usize] = INACTIVE;
        }
        self.edges.splice(range, edges.iter().cloned());
        self.reindex(start);
    }

    fn swap(&mut self, slot: usize) {
        self.edges.swap(slot, slot + 1);
        self.slots[self.edges[slot] as usize] = slot;
        self.slots[self.edges[slot + 1] as usize] = slot + 1;
    }

    fn reindex(&mut self, from: usize) {
        for slot in from..self.edges.len() {
            self.slots[self.edges[slot] as usize] = slot;
        }
    }

    /// The first position at or after `from` whose edge does not satisfy `predicate`, assuming
    /// the edges that do come first.
    fn partition<P>(&self, from: usize, predicate: P) -> usize where P: Fn(u32) -> bool {
        let (mut low, mut high) = (from, self.edges.len());
        while low < high {
            let middle = (low + high) / 2;
            if predicate(self.edges[middle]) {
                low = middle + 1;
            } else {
                high = middle;
            }
        }
        low
    }
}

impl<'a> IntersectionSweep<'a> {
    fn new(edges: &'a [SweepEdge], grid: &'a SnapGrid) -> IntersectionSweep<'a> {
        IntersectionSweep {
            edges,
            grid,
            splits: vec![SmallVec::new(); edges.len()],
            split_count: 0,
            events: BinaryHeap::with_capacity(edges.len() * 2),
            scheduled: HashSet::new(),
        }
    }

    fn run(&mut self) {
        for (edge_index, edge) in self.edges.iter().enumerate() {
            let edge_index = edge_index as u32;
            self.events.push(Event::endpoint(edge.line.lexicographic_min(),
                                             EventKind::Start,
                                             edge_index));
            self.events.push(Event::endpoint(edge.line.lexicographic_max(),
                                             EventKind::End,
                                             edge_index));
        }

        let mut status = Status::new(self.edges.len());
        let mut starting: SmallVec<[u32; 4]> = SmallVec::new();
        while let Some(first) = self.events.pop() {
            let point = first.point;
            let mut at_vertex = false;
            starting.clear();

            let mut next = Some(first);
            while let Some(event) = next {
                match event.kind {
                    EventKind::End => {
                        status.remove(event.edge);
                        at_vertex = true;
                    }
                    EventKind::Cross => self.cross(&mut status, point, event.edge, event.other),
                    EventKind::Start => {
                        starting.push(event.edge);
                        at_vertex = true;
                    }
                }
                let same_point = self.events.peek().map_or(false, |event| event.point == point);
                next = if same_point { self.events.pop() } else { None };
            }

            if at_vertex {
                self.visit(&mut status, point, &starting);
            }
        }
        debug!("sweep scheduled {} crossings", self.scheduled.len());
    }

    // Reorders the edges passing through a vertex and inserts the ones that start there.
    fn visit(&mut self, status: &mut Status, point: Vector2D, starting: &[u32]) {
        let edges = self.edges;
        let side = |edge: u32| {
            let line = &edges[edge as usize].line;
            Orientation::of(line.lexicographic_min(), line.lexicographic_max(), point)
        };
        let low = status.partition(0, |edge| side(edge) == Orientation::Ccw);
        let high = status.partition(low, |edge| side(edge) != Orientation::Cw);

        let mut fan: SmallVec<[u32; 4]> = SmallVec::from_slice(starting);
        for slot in low..high {
            let edge = status.edges[slot];
            if edges[edge as usize].line.spans_strictly(point) {
                trace!("vertex {:?} lies on edge {}", point, edge);
                self.push_split(edge, point);
            }
            fan.push(edge);
        }
        fan.sort_by(|&a, &b| {
            let a_right = edges[a as usize].line.lexicographic_max();
            let b_right = edges[b as usize].line.lexicographic_max();
            match Orientation::of(point, a_right, b_right) {
                Orientation::Ccw => Ordering::Less,
                Orientation::Cw => Ordering::Greater,
                Orientation::Collinear => a.cmp(&b),
            }
        });
        status.replace(low..high, &fan);

        let end = low + fan.len();
        if low > 0 && end > low {
            self.test_neighbours(point, status.edges[low - 1], status.edges[low]);
        }
        for slot in low + 1..end {
            self.test_neighbours(point, status.edges[slot - 1], status.edges[slot]);
        }
        if end < status.edges.len() && end > 0 {
            self.test_neighbours(point, status.edges[end - 1], status.edges[end]);
        }
    }

    // Swaps two edges at their crossing, if nothing has come between them since it was found.
    fn cross(&mut self, status: &mut Status, point: Vector2D, lower: u32, upper: u32) {
        let slot = match (status.slot(lower), status.slot(upper)) {
            (Some(lower_slot), Some(upper_slot)) if upper_slot == lower_slot + 1 => lower_slot,
            _ => return,
        };
        status.swap(slot);
        if slot > 0 {
            self.test_neighbours(point, status.edges[slot - 1], status.edges[slot]);
        }
        if slot + 2 < status.edges.len() {
            self.test_neighbours(point, status.edges[slot + 1], status.edges[slot + 2]);
        }
    }

    fn test_neighbours(&mut self, point: Vector2D, lower: u32, upper: u32) {
        let crossing = match self.intersect(lower, upper) {
            Some(crossing) => crossing,
            None => return,
        };
        let key = (u32::min(lower, upper), u32::max(lower, upper));
        if !self.scheduled.insert(key) {
            return;
        }
        // A crossing computed slightly behind the sweep line is handled where the line is now.
        let point = match crossing.lexicographic_cmp(point) {
            Ordering::Greater => crossing,
            _ => point,
        };
        self.events.push(Event { point, kind: EventKind::Cross, edge: lower, other: upper });
    }

    // Records the points where either edge must be split, and returns where they cross if they
    // cross properly.
    fn intersect(&mut self, a_index: u32, b_index: u32) -> Option<Vector2D> {
        let (a, b) = (self.edges[a_index as usize].line, self.edges[b_index as usize].line);
        let (a0, a1, b0, b1) = (a.from(), a.to(), b.from(), b.to());

        let b0_side = Orientation::of(a0, a1, b0);
        let b1_side = Orientation::of(a0, a1, b1);
        if b0_side == Orientation::Collinear && b1_side == Orientation::Collinear {
            // Overlapping or disjoint pieces of the same line.
            for &point in &[b0, b1] {
                if a.spans_strictly(point) {
                    self.push_split(a_index, point);
                }
            }
            for &point in &[a0, a1] {
                if b.spans_strictly(point) {
                    self.push_split(b_index, point);
                }
            }
            return None;
        }

        let a0_side = Orientation::of(b0, b1, a0);
        let a1_side = Orientation::of(b0, b1, a1);

        // One edge ends on the interior of the other.
        if b0_side == Orientation::Collinear && a.spans_strictly(b0) {
            self.push_split(a_index, b0);
        }
        if b1_side == Orientation::Collinear && a.spans_strictly(b1) {
            self.push_split(a_index, b1);
        }
        if a0_side == Orientation::Collinear && b.spans_strictly(a0) {
            self.push_split(b_index, a0);
        }
        if a1_side == Orientation::Collinear && b.spans_strictly(a1) {
            self.push_split(b_index, a1);
        }

        // Proper crossing.
        let crosses = |side0: Orientation, side1: Orientation| {
            side0 != Orientation::Collinear && side1 != Orientation::Collinear && side0 != side1
        };
        if !crosses(b0_side, b1_side) || !crosses(a0_side, a1_side) {
            return None;
        }
        let t = match a.intersection_t(&b) {
            Some(t) => util::clamp(t, 0.0, 1.0),
            None => 0.5,
        };
        let crossing = a.sample(t);
        let point = self.grid.snap_point(crossing);
        trace!("edges {} and {} cross at {:?}", a_index, b_index, point);
        if point != a0 && point != a1 {
            self.push_split(a_index, point);
        }
        if point != b0 && point != b1 {
            self.push_split(b_index, point);
        }
        Some(crossing)
    }

    fn push_split(&mut self, edge_index: u32, point: Vector2D) {
        let splits = &mut self.splits[edge_index as usize];
        if !splits.contains(&point) {
            splits.push(point);
            self.split_count += 1;
        }
    }

    fn apply_splits(self) -> Vec<SweepEdge> {
        let mut new_edges = Vec::with_capacity(self.edges.len() + self.split_count);
        for (edge, points) in self.edges.iter().zip(self.splits.iter()) {
            if points.is_empty() {
                new_edges.push(*edge);
                continue;
            }

            let (from, to) = (edge.line.from(), edge.line.to());
            let mut cuts: SmallVec<[(f64, Vector2D); 4]> = points.iter()
                .filter(|&&point| point != from && point != to)
                .map(|&point| (edge.line.projection_t(point), point))
                .collect();
            cuts.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                   .unwrap_or(Ordering::Equal)
                   .then(a.1.lexicographic_cmp(b.1))
            });

            let (mut piece_from, mut t_from) = (from, edge.origin.t0);
            for &(fraction, point) in &cuts {
                if point == piece_from {
                    continue;
                }
                let t_to = edge.origin.t_at(fraction);
                new_edges.push(SweepEdge {
                    line: LineSegment2D::new(piece_from, point),
                    origin: EdgeOrigin { source: edge.origin.source, t0: t_from, t1: t_to },
                });
                piece_from = point;
                t_from = t_to;
            }
            if piece_from != to {
                new_edges.push(SweepEdge {
                    line: LineSegment2D::new(piece_from, to),
                    origin: EdgeOrigin { source: edge.origin.source, t0: t_from, t1: edge.origin.t1 },
                });
            }
        }
        new_edges
    }
}
