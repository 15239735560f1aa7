// pathbool/content/src/error.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors found while validating a path.

use thiserror::Error;

/// Why a path cannot be used as the operand of a boolean operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path contains a NaN coordinate")]
    NaNInput,
    #[error("path contains an infinite coordinate")]
    InfiniteInput,
    /// The subpath with the given index (counting from zero) has no terminating `ClosePath`.
    #[error("subpath {subpath} is not closed")]
    NonClosedPath { subpath: usize },
    /// A drawing command appeared before any `MoveTo`.
    #[error("drawing command at segment {segment} has no current point")]
    MissingMoveTo { segment: usize },
}
