// pathbool/content/src/lib.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Paths, path validation, and the curve machinery used to flatten them.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod error;
pub mod fill;
pub mod flatten;
pub mod monotonic;
pub mod outline;
pub mod path;
pub mod segment;

pub use crate::error::PathError;
pub use crate::fill::FillRule;
pub use crate::path::{Path, PathBuilder, PathSegment};
