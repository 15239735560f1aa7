// pathbool/boolean/src/lib.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Robust boolean operations on paths made of lines and quadratic and cubic Bézier curves.
//!
//! The inputs are flattened into polylines that remember which curve every edge came from. The
//! edges are rounded to a fine grid and split at their intersections with exact predicates, a
//! second sweep labels every face of the resulting planar arrangement with the winding numbers of
//! both operands, and the edges that separate the result from its complement are traced into
//! closed contours. Runs of edges from a single input curve are turned back into that curve.
//!
//! ```
//! use pathbool_boolean::{boolean_operation, BooleanOperation};
//! use pathbool_content::{FillRule, Path};
//!
//! let mut square = Path::builder();
//! square.move_to(0.0, 0.0);
//! square.line_to(2.0, 0.0);
//! square.line_to(2.0, 2.0);
//! square.line_to(0.0, 2.0);
//! square.close_path();
//! let square = square.build();
//!
//! let mut triangle = Path::builder();
//! triangle.move_to(1.0, 1.0);
//! triangle.line_to(3.0, 1.0);
//! triangle.line_to(1.0, 3.0);
//! triangle.close_path();
//! let triangle = triangle.build();
//!
//! let result = boolean_operation(&square,
//!                                &triangle,
//!                                BooleanOperation::Union,
//!                                FillRule::NonZero).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.area(), 4.0 + 2.0 - 1.0);
//! ```

#[macro_use]
extern crate log;

pub mod arrangement;
pub mod contour;
pub mod error;
pub mod options;
pub mod result;
pub mod sweep;
pub mod winding;

pub use crate::error::{BooleanError, InternalError};
pub use crate::options::BooleanOptions;
pub use crate::result::{BooleanResult, ContourGroup, ResultContour};
pub use crate::winding::{BooleanOperation, Operand};

use crate::arrangement::Arrangement;
use crate::sweep::SweepEdge;
use crate::winding::Classifier;
use pathbool_content::fill::FillRule;
use pathbool_content::flatten::Flattener;
use pathbool_content::outline::Outline;
use pathbool_content::path::Path;

/// Combines the areas filled by `a` and `b` under `fill_rule`, with default options.
pub fn boolean_operation(a: &Path, b: &Path, operation: BooleanOperation, fill_rule: FillRule)
                         -> Result<BooleanResult, BooleanError> {
    boolean_operation_with_options(a, b, operation, fill_rule, &BooleanOptions::default())
}

/// Combines the areas filled by `a` and `b` under `fill_rule`.
///
/// Both paths are validated in full before any geometry is computed: a NaN in either one is
/// reported first, then an infinity, then a structural problem in `a`, then one in `b`.
pub fn boolean_operation_with_options(a: &Path,
                                      b: &Path,
                                      operation: BooleanOperation,
                                      fill_rule: FillRule,
                                      options: &BooleanOptions)
                                      -> Result<BooleanResult, BooleanError> {
    if a.has_nan() || b.has_nan() {
        return Err(BooleanError::NaNInput);
    }
    if a.has_infinity() || b.has_infinity() {
        return Err(BooleanError::InfiniteInput);
    }
    let outline_a = Outline::from_path(a)
        .map_err(|error| BooleanError::from_path_error(error, Operand::A))?;
    let outline_b = Outline::from_path(b)
        .map_err(|error| BooleanError::from_path_error(error, Operand::B))?;

    let bounds = match (outline_a.is_empty(), outline_b.is_empty()) {
        (true, true) => return Ok(BooleanResult::empty()),
        (false, true) => outline_a.bounds(),
        (true, false) => outline_b.bounds(),
        (false, false) => outline_a.bounds().union_rect(outline_b.bounds()),
    };
    let prepared = options.prepare(bounds);

    let flattener = Flattener::new(prepared.tolerance);
    let (mut sources, mut flat_edges) = (vec![], vec![]);
    flattener.flatten_outline(&outline_a, &mut sources, &mut flat_edges);
    let first_b_source = sources.len() as u32;
    flattener.flatten_outline(&outline_b, &mut sources, &mut flat_edges);

    let edges: Vec<_> = flat_edges.iter()
                                  .filter_map(|edge| SweepEdge::snapped(edge, &prepared.grid))
                                  .collect();
    let edges = sweep::resolve_intersections(edges, &prepared.grid, prepared.max_sweep_passes)?;

    let classifier = Classifier::new(operation, fill_rule);
    let mut arrangement = Arrangement::new(&edges, |source| {
        if source < first_b_source { Operand::A } else { Operand::B }
    });
    arrangement.label(&classifier)?;
    let contours = contour::reconstruct(&arrangement, &classifier, &sources)?;

    debug!("{:?} with {:?}: {} + {} contours in, {} out",
           operation,
           fill_rule,
           outline_a.len(),
           outline_b.len(),
           contours.len());
    Ok(BooleanResult::new(contours))
}
