// pathbool/boolean/src/winding.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Winding numbers and the rules that turn them into inside/outside decisions.

use pathbool_content::fill::FillRule;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Which input of a boolean operation something came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operand {
    A,
    B,
}

/// A pair of winding numbers, one per operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Winding {
    pub a: i32,
    pub b: i32,
}

impl Winding {
    #[inline]
    pub fn new(a: i32, b: i32) -> Winding {
        Winding { a, b }
    }

    #[inline]
    pub fn zero() -> Winding {
        Winding::default()
    }

    /// A winding of `count` for `operand` and zero for the other one.
    #[inline]
    pub fn of(operand: Operand, count: i32) -> Winding {
        match operand {
            Operand::A => Winding::new(count, 0),
            Operand::B => Winding::new(0, count),
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.a == 0 && self.b == 0
    }
}

impl Add<Winding> for Winding {
    type Output = Winding;
    #[inline]
    fn add(self, other: Winding) -> Winding {
        Winding::new(self.a + other.a, self.b + other.b)
    }
}

impl AddAssign<Winding> for Winding {
    #[inline]
    fn add_assign(&mut self, other: Winding) {
        *self = *self + other
    }
}

impl Sub<Winding> for Winding {
    type Output = Winding;
    #[inline]
    fn sub(self, other: Winding) -> Winding {
        Winding::new(self.a - other.a, self.b - other.b)
    }
}

impl Neg for Winding {
    type Output = Winding;
    #[inline]
    fn neg(self) -> Winding {
        Winding::new(-self.a, -self.b)
    }
}

/// A set operation on two regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanOperation {
    /// Inside A or inside B.
    Union,
    /// Inside A and inside B.
    Intersection,
    /// Inside A and not inside B.
    Difference,
    /// Inside exactly one of A and B.
    Xor,
}

impl BooleanOperation {
    #[inline]
    pub fn apply(self, inside_a: bool, inside_b: bool) -> bool {
        match self {
            BooleanOperation::Union => inside_a || inside_b,
            BooleanOperation::Intersection => inside_a && inside_b,
            BooleanOperation::Difference => inside_a && !inside_b,
            BooleanOperation::Xor => inside_a != inside_b,
        }
    }

    /// Returns true if swapping the operands cannot change the result.
    #[inline]
    pub fn is_symmetric(self) -> bool {
        self != BooleanOperation::Difference
    }
}

/// Decides whether a face with a given winding belongs to the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classifier {
    pub operation: BooleanOperation,
    pub fill_rule: FillRule,
}

impl Classifier {
    #[inline]
    pub fn new(operation: BooleanOperation, fill_rule: FillRule) -> Classifier {
        Classifier { operation, fill_rule }
    }

    #[inline]
    pub fn is_inside(&self, winding: Winding) -> bool {
        self.operation.apply(self.fill_rule.is_inside(winding.a),
                             self.fill_rule.is_inside(winding.b))
    }
}

#[cfg(test)]
mod test {
    use super::{BooleanOperation, Classifier, Operand, Winding};
    use pathbool_content::fill::FillRule;

    #[test]
    fn test_operations() {
        let table = [(false, false), (true, false), (false, true), (true, true)];
        let results: Vec<Vec<bool>> = [
            BooleanOperation::Union,
            BooleanOperation::Intersection,
            BooleanOperation::Difference,
            BooleanOperation::Xor,
        ].iter().map(|operation| {
            table.iter().map(|&(a, b)| operation.apply(a, b)).collect()
        }).collect();
        assert_eq!(results, vec![
            vec![false, true, true, true],
            vec![false, false, false, true],
            vec![false, true, false, false],
            vec![false, true, true, false],
        ]);
    }

    #[test]
    fn test_classifier_applies_fill_rule_per_operand() {
        let winding = Winding::of(Operand::A, 2) + Winding::of(Operand::B, 1);
        let even_odd = Classifier::new(BooleanOperation::Intersection, FillRule::EvenOdd);
        let non_zero = Classifier::new(BooleanOperation::Intersection, FillRule::NonZero);
        assert!(!even_odd.is_inside(winding));
        assert!(non_zero.is_inside(winding));
        assert!(!non_zero.is_inside(winding - Winding::new(2, 0)));
    }
}
