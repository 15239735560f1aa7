// pathbool/geometry/src/grid.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Snap rounding to a uniform power-of-two grid.

use crate::rect::RectD;
use crate::vector::Vector2D;

/// Number of grid cells, as a power of two, across the larger side of the input.
pub const GRID_BITS: i32 = 40;

/// The cell is never finer than this many bits below the largest coordinate, which keeps it a
/// few units in the last place wide wherever the input lies.
pub const ULP_BITS: i32 = 50;

const MIN_CELL_EXPONENT: i32 = -1000;

/// A grid whose cell size is a power of two, so that snapping involves only exact scaling and a
/// single rounding step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapGrid {
    cell_size: f64,
    inv_cell_size: f64,
}

impl SnapGrid {
    /// Creates a grid with `2^GRID_BITS` cells across `extent`.
    pub fn for_extent(extent: f64) -> SnapGrid {
        let exponent = binary_exponent(extent).unwrap_or(0) - GRID_BITS;
        SnapGrid::with_cell_exponent(i32::max(exponent, MIN_CELL_EXPONENT))
    }

    /// Creates a grid sized to the larger side of `bounds`, coarsened only where the coordinates
    /// are so far from the origin that such cells would be narrower than a few ulps.
    ///
    /// The cell is at most `max(extent * 2^(1 - GRID_BITS), max_abs * 2^(1 - ULP_BITS))`.
    pub fn for_bounds(bounds: RectD) -> SnapGrid {
        let extent = f64::max(bounds.width(), bounds.height());
        let mut exponent = binary_exponent(extent).unwrap_or(0) - GRID_BITS;
        if let Some(magnitude) = binary_exponent(bounds.max_abs_coordinate()) {
            exponent = i32::max(exponent, magnitude - ULP_BITS);
        }
        SnapGrid::with_cell_exponent(i32::max(exponent, MIN_CELL_EXPONENT))
    }

    pub fn with_cell_exponent(exponent: i32) -> SnapGrid {
        SnapGrid { cell_size: 2.0f64.powi(exponent), inv_cell_size: 2.0f64.powi(-exponent) }
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn snap(&self, value: f64) -> f64 {
        (value * self.inv_cell_size).round() * self.cell_size
    }

    #[inline]
    pub fn snap_point(&self, point: Vector2D) -> Vector2D {
        Vector2D::new(self.snap(point.x()), self.snap(point.y()))
    }
}

fn binary_exponent(value: f64) -> Option<i32> {
    if value > 0.0 && value.is_finite() {
        Some(value.log2().ceil() as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::{GRID_BITS, SnapGrid, ULP_BITS};
    use crate::rect::RectD;
    use crate::vector::vec2d;

    #[test]
    fn test_grid_points_are_fixed() {
        let grid = SnapGrid::for_extent(3.0);
        assert_eq!(grid.cell_size(), 2.0f64.powi(2 - GRID_BITS));
        let point = vec2d(1.25, -2.5);
        assert_eq!(grid.snap_point(point), point);
        let snapped = grid.snap_point(vec2d(0.1, 1.0 / 3.0));
        assert_eq!(grid.snap_point(snapped), snapped);
        assert!((snapped.x() - 0.1).abs() <= grid.cell_size() * 0.5);
    }

    #[test]
    fn test_degenerate_extent() {
        assert_eq!(SnapGrid::for_extent(0.0).cell_size(), 2.0f64.powi(-GRID_BITS));
    }

    #[test]
    fn test_bounds_grid_ignores_offset() {
        let near = SnapGrid::for_bounds(RectD::from_points(vec2d(0.0, 0.0), vec2d(2e-3, 2e-3)));
        let far = SnapGrid::for_bounds(RectD::from_points(vec2d(1.0, -3.0),
                                                          vec2d(1.002, -2.998)));
        assert_eq!(near, far);
        assert_eq!(near.cell_size(), 2.0f64.powi(-8 - GRID_BITS));

        // Far enough out, the cell is floored a few ulps wide and still resolves the feature.
        let remote = SnapGrid::for_bounds(RectD::from_points(vec2d(1e9, 1e9),
                                                             vec2d(1e9 + 2e-3, 1e9 + 2e-3)));
        assert_eq!(remote.cell_size(), 2.0f64.powi(30 - ULP_BITS));
        assert!(remote.cell_size() < 1e-5);
        assert_eq!(remote.snap(1e9), 1e9);
    }
}
