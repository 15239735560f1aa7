// pathbool/geometry/src/lib.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Double-precision geometry primitives and exact predicates for boolean path operations.

pub mod grid;
pub mod line_segment;
pub mod orientation;
pub mod rect;
pub mod util;
pub mod vector;
