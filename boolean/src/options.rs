// pathbool/boolean/src/options.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Options that control how boolean operations are performed.

use pathbool_geometry::grid::SnapGrid;
use pathbool_geometry::rect::RectD;

/// Flattening tolerance as a fraction of the larger side of the inputs' bounding box.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-4;

pub const DEFAULT_MAX_SWEEP_PASSES: u32 = 32;

/// Options that influence boolean operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BooleanOptions {
    /// The maximum distance between a curve and the polyline that approximates it while
    /// intersections are computed. `None` scales the tolerance to the size of the inputs.
    ///
    /// Output curves that pass through no intersection are reproduced exactly regardless.
    pub tolerance: Option<f64>,
    /// How many times the intersection sweep may repeat before giving up. Each pass is needed
    /// only when rounding the intersections found by the previous one created new crossings.
    pub max_sweep_passes: u32,
}

impl Default for BooleanOptions {
    #[inline]
    fn default() -> BooleanOptions {
        BooleanOptions { tolerance: None, max_sweep_passes: DEFAULT_MAX_SWEEP_PASSES }
    }
}

impl BooleanOptions {
    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> BooleanOptions {
        self.tolerance = Some(tolerance);
        self
    }

    #[inline]
    pub fn max_sweep_passes(mut self, passes: u32) -> BooleanOptions {
        self.max_sweep_passes = passes;
        self
    }

    /// Resolves the options against the bounding box of both inputs.
    pub fn prepare(&self, bounds: RectD) -> PreparedBooleanOptions {
        let extent = f64::max(bounds.width(), bounds.height());
        let grid = SnapGrid::for_bounds(bounds);
        let tolerance = match self.tolerance {
            Some(tolerance) if tolerance > 0.0 && tolerance.is_finite() => tolerance,
            _ => extent * DEFAULT_RELATIVE_TOLERANCE,
        };
        PreparedBooleanOptions {
            // Flattening finer than the grid cannot be represented.
            tolerance: f64::max(tolerance, grid.cell_size() * 4.0),
            grid,
            max_sweep_passes: u32::max(self.max_sweep_passes, 1),
        }
    }
}

/// Options with every automatic choice made.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreparedBooleanOptions {
    pub tolerance: f64,
    pub grid: SnapGrid,
    pub max_sweep_passes: u32,
}

#[cfg(test)]
mod test {
    use super::{BooleanOptions, DEFAULT_MAX_SWEEP_PASSES};
    use pathbool_geometry::rect::RectD;
    use pathbool_geometry::vector::vec2d;

    #[test]
    fn test_automatic_tolerance_scales_with_bounds() {
        let bounds = RectD::from_points(vec2d(-50.0, 0.0), vec2d(50.0, 10.0));
        let prepared = BooleanOptions::default().prepare(bounds);
        assert!((prepared.tolerance - 0.01).abs() < 1e-12);
        assert_eq!(prepared.max_sweep_passes, DEFAULT_MAX_SWEEP_PASSES);
        assert_eq!(prepared.grid.snap(50.0), 50.0);

        let explicit = BooleanOptions::default().tolerance(0.5).max_sweep_passes(0).prepare(bounds);
        assert_eq!(explicit.tolerance, 0.5);
        assert_eq!(explicit.max_sweep_passes, 1);
    }

    #[test]
    fn test_degenerate_bounds() {
        let point = RectD::from_points(vec2d(1.0, 1.0), vec2d(1.0, 1.0));
        let prepared = BooleanOptions::default().prepare(point);
        assert!(prepared.tolerance > 0.0);
    }
}
