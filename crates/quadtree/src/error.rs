//! Quadtree error types.

use crate::{Point, Region};
use thiserror::Error;

/// Why an insertion was rejected.
///
/// Rejection is a normal outcome; the tree is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InsertError {
    #[error("point ({}, {}) lies outside region {region}", .point.x, .point.y)]
    OutOfBounds { point: Point, region: Region },

    #[error("splitting {region} would form quadrants of size {size} (minimum {min})")]
    QuadrantTooSmall { region: Region, size: f32, min: f32 },
}

/// A structural invariant found broken by `Quadtree::validate`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("children of {parent} do not tile it: {reason}")]
    Tiling { parent: Region, reason: &'static str },

    #[error("point ({}, {}) stored outside its leaf {region}", .point.x, .point.y)]
    Misplaced { point: Point, region: Region },

    #[error("internal node {region} holds {occupied} point(s) across four leaves and should have folded")]
    Unpruned { region: Region, occupied: usize },
}
