// pathbool/boolean/src/result.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The output of a boolean operation.

use pathbool_content::path::Path;
use std::slice;

/// The closed contours bounding the result of a boolean operation.
///
/// Every enclosing contour precedes the contours it encloses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BooleanResult {
    contours: Vec<ResultContour>,
}

/// One closed contour of a `BooleanResult`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultContour {
    path: Path,
    outer: bool,
    parent: Option<usize>,
}

/// An outer contour together with the holes directly inside it, as indices into the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContourGroup {
    pub outer: usize,
    pub holes: Vec<usize>,
}

impl ResultContour {
    #[inline]
    pub fn new(path: Path, outer: bool, parent: Option<usize>) -> ResultContour {
        ResultContour { path, outer, parent }
    }

    /// A single subpath: one `MoveTo`, its drawing commands, and a `ClosePath`.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn into_path(self) -> Path {
        self.path
    }

    /// True if this contour bounds filled area from the outside (counterclockwise), false if it
    /// is a hole (clockwise).
    #[inline]
    pub fn is_outer(&self) -> bool {
        self.outer
    }

    /// The index of the nearest contour enclosing this one.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Signed area: positive for outer contours, negative for holes.
    #[inline]
    pub fn area(&self) -> f64 {
        self.path.area()
    }
}

impl BooleanResult {
    #[inline]
    pub fn new(contours: Vec<ResultContour>) -> BooleanResult {
        BooleanResult { contours }
    }

    #[inline]
    pub fn empty() -> BooleanResult {
        BooleanResult::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    #[inline]
    pub fn contours(&self) -> &[ResultContour] {
        &self.contours
    }

    #[inline]
    pub fn contour(&self, index: usize) -> Option<&ResultContour> {
        self.contours.get(index)
    }

    /// Each contour as its own path.
    #[inline]
    pub fn paths(&self) -> PathIter {
        PathIter { iter: self.contours.iter() }
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.contours.into_iter().map(ResultContour::into_path).collect()
    }

    /// All contours as subpaths of one path, which fills the result under either fill rule.
    pub fn to_path(&self) -> Path {
        self.contours
            .iter()
            .flat_map(|contour| contour.path.segments().iter().cloned())
            .collect()
    }

    /// The total area covered by the result.
    pub fn area(&self) -> f64 {
        self.contours.iter().map(ResultContour::area).sum()
    }

    /// Groups the contours into outer contours, each with the holes it directly contains.
    pub fn grouped(&self) -> Vec<ContourGroup> {
        let mut groups: Vec<ContourGroup> = vec![];
        let mut group_of_outer = vec![None; self.contours.len()];
        for (index, contour) in self.contours.iter().enumerate() {
            if contour.outer {
                group_of_outer[index] = Some(groups.len());
                groups.push(ContourGroup { outer: index, holes: vec![] });
            } else if let Some(group) = contour.parent.and_then(|parent| group_of_outer[parent]) {
                groups[group].holes.push(index);
            }
        }
        groups
    }
}

pub struct PathIter<'a> {
    iter: slice::Iter<'a, ResultContour>,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = &'a Path;

    #[inline]
    fn next(&mut self) -> Option<&'a Path> {
        self.iter.next().map(ResultContour::path)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

#[cfg(test)]
mod test {
    use super::{BooleanResult, ContourGroup, ResultContour};
    use pathbool_content::path::Path;
    use pathbool_geometry::rect::RectD;
    use pathbool_geometry::vector::vec2d;

    fn rect(min: f64, max: f64, outer: bool) -> Path {
        let mut builder = Path::builder();
        builder.rect(RectD::from_points(vec2d(min, min), vec2d(max, max)));
        let path = builder.build();
        if outer {
            path
        } else {
            let mut builder = Path::builder();
            builder.move_to(min, min);
            builder.line_to(min, max);
            builder.line_to(max, max);
            builder.line_to(max, min);
            builder.close_path();
            builder.build()
        }
    }

    #[test]
    fn test_grouping_and_area() {
        let result = BooleanResult::new(vec![
            ResultContour::new(rect(0.0, 10.0, true), true, None),
            ResultContour::new(rect(1.0, 9.0, false), false, Some(0)),
            ResultContour::new(rect(2.0, 8.0, true), true, Some(1)),
            ResultContour::new(rect(3.0, 4.0, false), false, Some(2)),
            ResultContour::new(rect(5.0, 6.0, false), false, Some(2)),
            ResultContour::new(rect(20.0, 21.0, true), true, None),
        ]);
        assert_eq!(result.len(), 6);
        assert_eq!(result.grouped(), vec![
            ContourGroup { outer: 0, holes: vec![1] },
            ContourGroup { outer: 2, holes: vec![3, 4] },
            ContourGroup { outer: 5, holes: vec![] },
        ]);
        assert_eq!(result.area(), 100.0 - 64.0 + 36.0 - 1.0 - 1.0 + 1.0);
        assert_eq!(result.to_path().subpath_count(), 6);
        assert_eq!(result.paths().count(), 6);
        assert!(BooleanResult::empty().is_empty());
    }
}
