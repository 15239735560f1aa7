// pathbool/content/src/monotonic.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Converts segments to pieces that are monotonic in both X and Y.

use crate::segment::Segment;
use arrayvec::ArrayVec;

/// A piece of an input segment that is monotonic in both X and Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonotonicSegment {
    pub segment: Segment,
    /// The position of the segment this piece came from in the input iterator.
    pub source: u32,
    /// The parametric range of this piece on the source segment.
    pub t0: f64,
    pub t1: f64,
}

pub struct MonotonicConversionIter<I>
where
    I: Iterator<Item = Segment>,
{
    iter: I,
    next_source: u32,
    buffer: ArrayVec<[MonotonicSegment; 4]>,
}

impl<I> Iterator for MonotonicConversionIter<I>
where
    I: Iterator<Item = Segment>,
{
    type Item = MonotonicSegment;

    #[inline]
    fn next(&mut self) -> Option<MonotonicSegment> {
        if let Some(segment) = self.buffer.pop() {
            return Some(segment);
        }

        let segment = self.iter.next()?;
        let source = self.next_source;
        self.next_source += 1;
        if segment.is_line() {
            return Some(MonotonicSegment { segment, source, t0: 0.0, t1: 1.0 });
        }
        Some(self.split_at_extrema(source, segment))
    }
}

impl<I> MonotonicConversionIter<I>
where
    I: Iterator<Item = Segment>,
{
    #[inline]
    pub fn new(iter: I) -> MonotonicConversionIter<I> {
        MonotonicConversionIter { iter, next_source: 0, buffer: ArrayVec::new() }
    }

    // Splits from the right so that the buffer pops pieces in order. Break values are kept
    // verbatim as piece boundaries so that neighboring pieces agree on them exactly.
    fn split_at_extrema(&mut self, source: u32, segment: Segment) -> MonotonicSegment {
        let breaks = segment.monotonic_breaks();
        let (mut rest, mut rest_end) = (segment, 1.0);
        for &t in breaks.iter().rev() {
            let (before, after) = rest.split(t / rest_end);
            self.buffer.push(MonotonicSegment { segment: after, source, t0: t, t1: rest_end });
            rest = before;
            rest_end = t;
        }
        MonotonicSegment { segment: rest, source, t0: 0.0, t1: rest_end }
    }
}

#[cfg(test)]
mod test {
    use super::MonotonicConversionIter;
    use crate::segment::Segment;
    use pathbool_geometry::line_segment::LineSegment2D;
    use pathbool_geometry::vector::vec2d;

    #[test]
    fn test_s_curve_splits_into_monotonic_pieces() {
        // Bulges right, then left: two x extrema.
        let s_curve = Segment::cubic(LineSegment2D::new(vec2d(0.0, 0.0), vec2d(0.0, 3.0)),
                                     LineSegment2D::new(vec2d(3.0, 1.0), vec2d(-3.0, 2.0)));
        let line = Segment::line(LineSegment2D::new(vec2d(0.0, 3.0), vec2d(0.0, 0.0)));
        let pieces: Vec<_> = MonotonicConversionIter::new(vec![s_curve, line].into_iter())
            .collect();

        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces[0].t0, 0.0);
        assert_eq!(pieces[2].t1, 1.0);
        for window in pieces[0..3].windows(2) {
            assert_eq!(window[0].t1, window[1].t0);
            assert_eq!(window[0].segment.to(), window[1].segment.from());
            assert_eq!(window[0].source, 0);
        }
        assert_eq!(pieces[0].segment.from(), vec2d(0.0, 0.0));
        assert_eq!(pieces[2].segment.to(), vec2d(0.0, 3.0));
        assert_eq!(pieces[3].source, 1);
        for piece in &pieces {
            assert!(piece.segment.monotonic_breaks().is_empty());
        }
    }
}
