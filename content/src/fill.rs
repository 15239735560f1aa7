// pathbool/content/src/fill.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The fill rule, which determines how self-intersecting paths are filled.

/// The fill rule, which determines how self-intersecting paths are filled.
///
/// Paths that don't intersect themselves (and have no holes) are unaffected by the choice of fill
/// rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum FillRule {
    /// The even-odd rule: <https://en.wikipedia.org/wiki/Even%E2%80%93odd_rule>
    EvenOdd,
    /// The nonzero rule: <https://en.wikipedia.org/wiki/Nonzero-rule>
    NonZero,
}

impl FillRule {
    /// Returns true if a point with the given winding number is filled.
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        }
    }
}

impl Default for FillRule {
    #[inline]
    fn default() -> FillRule {
        FillRule::NonZero
    }
}

#[cfg(test)]
mod test {
    use super::FillRule;

    #[test]
    fn test_negative_windings() {
        assert!(FillRule::EvenOdd.is_inside(-1));
        assert!(!FillRule::EvenOdd.is_inside(-2));
        assert!(FillRule::NonZero.is_inside(-2));
        assert!(!FillRule::NonZero.is_inside(0));
    }
}
