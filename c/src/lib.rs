// pathbool/c/src/lib.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! C bindings to pathbool.

#[macro_use]
extern crate log;

use env_logger;
use pathbool_boolean::{BooleanError, BooleanOperation, BooleanResult};
use pathbool_content::fill::FillRule;
use pathbool_content::path::{Path, PathBuilder, PathSegment};
use std::ptr;

// Constants

// `boolean`

pub const PB_BOOLEAN_OPERATION_UNION:        u8 = 0;
pub const PB_BOOLEAN_OPERATION_INTERSECTION: u8 = 1;
pub const PB_BOOLEAN_OPERATION_DIFFERENCE:   u8 = 2;
pub const PB_BOOLEAN_OPERATION_XOR:          u8 = 3;

pub const PB_ERROR_NONE:             u8 = 0;
pub const PB_ERROR_NAN_INPUT:        u8 = 1;
pub const PB_ERROR_INFINITE_INPUT:   u8 = 2;
pub const PB_ERROR_NON_CLOSED_PATH:  u8 = 3;
pub const PB_ERROR_MISSING_MOVE_TO:  u8 = 4;
pub const PB_ERROR_INTERNAL:         u8 = 5;
pub const PB_ERROR_INVALID_ARGUMENT: u8 = 6;

// `content`

pub const PB_FILL_RULE_NONZERO:  u8 = 0;
pub const PB_FILL_RULE_EVEN_ODD: u8 = 1;

pub const PB_PATH_SEGMENT_MOVE_TO:    u8 = 0;
pub const PB_PATH_SEGMENT_LINE_TO:    u8 = 1;
pub const PB_PATH_SEGMENT_QUAD_TO:    u8 = 2;
pub const PB_PATH_SEGMENT_CURVE_TO:   u8 = 3;
pub const PB_PATH_SEGMENT_CLOSE_PATH: u8 = 4;

// Types

// `boolean`
pub type PBResultRef = *mut BooleanResult;
pub type PBBooleanOperation = u8;
pub type PBErrorCode = u8;

// `content`
pub type PBPathBuilderRef = *mut PathBuilder;
pub type PBPathRef = *mut Path;
pub type PBFillRule = u8;
pub type PBPathSegmentKind = u8;

// `geometry`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct PBVector2D {
    pub x: f64,
    pub y: f64,
}

/// One drawing command. `points` holds, in order, the control points and then the endpoint;
/// unused entries are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct PBPathSegment {
    pub kind: PBPathSegmentKind,
    pub points: [PBVector2D; 3],
}

// `content`

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderCreate() -> PBPathBuilderRef {
    Box::into_raw(Box::new(PathBuilder::new()))
}

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderDestroy(builder: PBPathBuilderRef) {
    drop(Box::from_raw(builder))
}

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderMoveTo(builder: PBPathBuilderRef, to: *const PBVector2D) {
    (*builder).move_to((*to).x, (*to).y)
}

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderLineTo(builder: PBPathBuilderRef, to: *const PBVector2D) {
    (*builder).line_to((*to).x, (*to).y)
}

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderQuadTo(builder: PBPathBuilderRef,
                                             ctrl: *const PBVector2D,
                                             to: *const PBVector2D) {
    (*builder).quad_to((*ctrl).x, (*ctrl).y, (*to).x, (*to).y)
}

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderCurveTo(builder: PBPathBuilderRef,
                                              ctrl0: *const PBVector2D,
                                              ctrl1: *const PBVector2D,
                                              to: *const PBVector2D) {
    (*builder).curve_to((*ctrl0).x, (*ctrl0).y, (*ctrl1).x, (*ctrl1).y, (*to).x, (*to).y)
}

#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderClosePath(builder: PBPathBuilderRef) {
    (*builder).close_path()
}

/// Consumes the builder.
#[no_mangle]
pub unsafe extern "C" fn PBPathBuilderBuild(builder: PBPathBuilderRef) -> PBPathRef {
    Box::into_raw(Box::new(Box::from_raw(builder).build()))
}

#[no_mangle]
pub unsafe extern "C" fn PBPathDestroy(path: PBPathRef) {
    drop(Box::from_raw(path))
}

#[no_mangle]
pub unsafe extern "C" fn PBPathGetSegmentCount(path: PBPathRef) -> usize {
    (*path).len()
}

#[no_mangle]
pub unsafe extern "C" fn PBPathGetSegment(path: PBPathRef,
                                          index: usize,
                                          out_segment: *mut PBPathSegment)
                                          -> PBErrorCode {
    if out_segment.is_null() {
        return PB_ERROR_INVALID_ARGUMENT;
    }
    match (*path).segments().get(index) {
        None => PB_ERROR_INVALID_ARGUMENT,
        Some(segment) => {
            *out_segment = PBPathSegment::from_rust(segment);
            PB_ERROR_NONE
        }
    }
}

// `boolean`

/// On success, stores a new result in `out_result`, which the caller must destroy with
/// `PBResultDestroy()`. On failure, stores null.
#[no_mangle]
pub unsafe extern "C" fn PBBooleanOperation(a: PBPathRef,
                                            b: PBPathRef,
                                            operation: PBBooleanOperation,
                                            fill_rule: PBFillRule,
                                            out_result: *mut PBResultRef)
                                            -> PBErrorCode {
    if out_result.is_null() {
        return PB_ERROR_INVALID_ARGUMENT;
    }
    *out_result = ptr::null_mut();
    if a.is_null() || b.is_null() {
        return PB_ERROR_INVALID_ARGUMENT;
    }
    let operation = match operation {
        PB_BOOLEAN_OPERATION_UNION => BooleanOperation::Union,
        PB_BOOLEAN_OPERATION_INTERSECTION => BooleanOperation::Intersection,
        PB_BOOLEAN_OPERATION_DIFFERENCE => BooleanOperation::Difference,
        PB_BOOLEAN_OPERATION_XOR => BooleanOperation::Xor,
        _ => return PB_ERROR_INVALID_ARGUMENT,
    };
    let fill_rule = match fill_rule {
        PB_FILL_RULE_NONZERO => FillRule::NonZero,
        PB_FILL_RULE_EVEN_ODD => FillRule::EvenOdd,
        _ => return PB_ERROR_INVALID_ARGUMENT,
    };
    match pathbool_boolean::boolean_operation(&*a, &*b, operation, fill_rule) {
        Ok(result) => {
            *out_result = Box::into_raw(Box::new(result));
            PB_ERROR_NONE
        }
        Err(error) => {
            debug!("boolean operation failed: {}", error);
            error_code(&error)
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn PBResultGetPathCount(result: PBResultRef) -> usize {
    (*result).len()
}

/// Returns a new path, which the caller must destroy, or null if `index` is out of range.
#[no_mangle]
pub unsafe extern "C" fn PBResultGetPath(result: PBResultRef, index: usize) -> PBPathRef {
    match (*result).contour(index) {
        None => ptr::null_mut(),
        Some(contour) => Box::into_raw(Box::new(contour.path().clone())),
    }
}

/// Returns 1 for a counterclockwise outer contour and 0 for a clockwise hole or an index out of
/// range.
#[no_mangle]
pub unsafe extern "C" fn PBResultIsOuter(result: PBResultRef, index: usize) -> u8 {
    match (*result).contour(index) {
        Some(contour) if contour.is_outer() => 1,
        _ => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn PBResultDestroy(result: PBResultRef) {
    drop(Box::from_raw(result))
}

// Logging

/// Installs a logger configured by the `RUST_LOG` environment variable. Returns 1 if it was
/// installed and 0 if a logger was already present.
#[no_mangle]
pub unsafe extern "C" fn PBInitLogging() -> u8 {
    env_logger::try_init().is_ok() as u8
}

// Helpers for `boolean`

fn error_code(error: &BooleanError) -> PBErrorCode {
    match *error {
        BooleanError::NaNInput => PB_ERROR_NAN_INPUT,
        BooleanError::InfiniteInput => PB_ERROR_INFINITE_INPUT,
        BooleanError::NonClosedPath { .. } => PB_ERROR_NON_CLOSED_PATH,
        BooleanError::MissingMoveTo { .. } => PB_ERROR_MISSING_MOVE_TO,
        BooleanError::Internal(_) => PB_ERROR_INTERNAL,
    }
}

// Helpers for `content`

impl PBPathSegment {
    pub fn from_rust(segment: &PathSegment) -> PBPathSegment {
        let mut points = [PBVector2D::default(); 3];
        let coordinates = segment.coordinates();
        for (point, pair) in points.iter_mut().zip(coordinates.chunks(2)) {
            *point = PBVector2D { x: pair[0], y: pair[1] };
        }
        let kind = match *segment {
            PathSegment::MoveTo { .. } => PB_PATH_SEGMENT_MOVE_TO,
            PathSegment::LineTo { .. } => PB_PATH_SEGMENT_LINE_TO,
            PathSegment::QuadTo { .. } => PB_PATH_SEGMENT_QUAD_TO,
            PathSegment::CurveTo { .. } => PB_PATH_SEGMENT_CURVE_TO,
            PathSegment::ClosePath => PB_PATH_SEGMENT_CLOSE_PATH,
        };
        PBPathSegment { kind, points }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64;

    unsafe fn build_square(min: f64, max: f64) -> PBPathRef {
        let builder = PBPathBuilderCreate();
        PBPathBuilderMoveTo(builder, &PBVector2D { x: min, y: min });
        PBPathBuilderLineTo(builder, &PBVector2D { x: max, y: min });
        PBPathBuilderLineTo(builder, &PBVector2D { x: max, y: max });
        PBPathBuilderLineTo(builder, &PBVector2D { x: min, y: max });
        PBPathBuilderClosePath(builder);
        PBPathBuilderBuild(builder)
    }

    #[test]
    fn test_difference_through_c_api() {
        unsafe {
            PBInitLogging();
            let outer = build_square(0.0, 4.0);
            let inner = build_square(1.0, 3.0);
            let mut result: PBResultRef = ptr::null_mut();
            assert_eq!(PBBooleanOperation(outer,
                                          inner,
                                          PB_BOOLEAN_OPERATION_DIFFERENCE,
                                          PB_FILL_RULE_NONZERO,
                                          &mut result),
                       PB_ERROR_NONE);
            assert!(!result.is_null());
            assert_eq!(PBResultGetPathCount(result), 2);
            assert_eq!(PBResultIsOuter(result, 0), 1);
            assert_eq!(PBResultIsOuter(result, 1), 0);
            assert!(PBResultGetPath(result, 2).is_null());

            let hole = PBResultGetPath(result, 1);
            assert_eq!(PBPathGetSegmentCount(hole), 5);
            let mut segment = PBPathSegment::default();
            assert_eq!(PBPathGetSegment(hole, 0, &mut segment), PB_ERROR_NONE);
            assert_eq!(segment.kind, PB_PATH_SEGMENT_MOVE_TO);
            assert_eq!(PBPathGetSegment(hole, 4, &mut segment), PB_ERROR_NONE);
            assert_eq!(segment.kind, PB_PATH_SEGMENT_CLOSE_PATH);
            assert_eq!(PBPathGetSegment(hole, 5, &mut segment), PB_ERROR_INVALID_ARGUMENT);

            PBPathDestroy(hole);
            PBResultDestroy(result);
            PBPathDestroy(outer);
            PBPathDestroy(inner);
        }
    }

    #[test]
    fn test_errors_through_c_api() {
        unsafe {
            let square = build_square(0.0, 1.0);
            let builder = PBPathBuilderCreate();
            PBPathBuilderMoveTo(builder, &PBVector2D { x: 0.0, y: 0.0 });
            PBPathBuilderQuadTo(builder,
                                &PBVector2D { x: f64::NAN, y: 1.0 },
                                &PBVector2D { x: 2.0, y: 0.0 });
            let broken = PBPathBuilderBuild(builder);

            let mut result: PBResultRef = ptr::null_mut();
            assert_eq!(PBBooleanOperation(square, broken, PB_BOOLEAN_OPERATION_UNION,
                                          PB_FILL_RULE_EVEN_ODD, &mut result),
                       PB_ERROR_NAN_INPUT);
            assert!(result.is_null());
            assert_eq!(PBBooleanOperation(square, square, 9, PB_FILL_RULE_EVEN_ODD, &mut result),
                       PB_ERROR_INVALID_ARGUMENT);
            assert_eq!(PBBooleanOperation(square, ptr::null_mut(), PB_BOOLEAN_OPERATION_XOR,
                                          PB_FILL_RULE_EVEN_ODD, &mut result),
                       PB_ERROR_INVALID_ARGUMENT);

            let mut segment = PBPathSegment::default();
            assert_eq!(PBPathGetSegment(broken, 1, &mut segment), PB_ERROR_NONE);
            assert_eq!(segment.kind, PB_PATH_SEGMENT_QUAD_TO);
            assert!(segment.points[0].x.is_nan());
            assert_eq!(segment.points[1], PBVector2D { x: 2.0, y: 0.0 });

            PBPathDestroy(broken);
            PBPathDestroy(square);
        }
    }
}
