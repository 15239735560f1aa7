// pathbool/boolean/src/error.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors that boolean operations can report.

use crate::winding::Operand;
use pathbool_content::error::PathError;
use thiserror::Error;

/// Why a boolean operation failed. No partial result is produced in any case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BooleanError {
    /// Some coordinate of either operand is NaN.
    #[error("input contains a NaN coordinate")]
    NaNInput,
    /// Some coordinate of either operand is infinite.
    #[error("input contains an infinite coordinate")]
    InfiniteInput,
    /// A subpath of an operand was never closed.
    #[error("subpath {subpath} of operand {operand:?} is not closed")]
    NonClosedPath { operand: Operand, subpath: usize },
    /// An operand draws before its first `MoveTo`.
    #[error("operand {operand:?} draws at segment {segment} without a current point")]
    MissingMoveTo { operand: Operand, segment: usize },
    /// An invariant of the arrangement was violated. This is a bug, not bad input.
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl BooleanError {
    /// Attaches the operand a validation error was found in.
    pub fn from_path_error(error: PathError, operand: Operand) -> BooleanError {
        match error {
            PathError::NaNInput => BooleanError::NaNInput,
            PathError::InfiniteInput => BooleanError::InfiniteInput,
            PathError::NonClosedPath { subpath } => {
                BooleanError::NonClosedPath { operand, subpath }
            }
            PathError::MissingMoveTo { segment } => {
                BooleanError::MissingMoveTo { operand, segment }
            }
        }
    }

    /// Returns true if the error was caused by the input rather than by a bug.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        match *self {
            BooleanError::Internal(_) => false,
            _ => true,
        }
    }
}

/// Violated invariants of the sweep and of contour reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("intersections were still being found after {passes} sweep passes")]
    SweepDidNotConverge { passes: u32 },
    #[error("a vertex lies in the interior of an edge after intersection resolution")]
    VertexOnEdge,
    #[error("a boundary contour could not be closed")]
    UnbalancedBoundary,
}
