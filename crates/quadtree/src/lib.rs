//! Point-region quadtree over a fixed square domain.
//!
//! This crate contains:
//! - `Region`, the half-open rectangle every node is bound to
//! - `Node`, a leaf/internal tagged union that is retagged in place
//! - `Quadtree`, the owner of the root node (insert, remove, traverse)

mod error;
mod node;
mod region;
mod traverse;
mod tree;

pub use error::{InsertError, InvariantError};
pub use node::{Node, NodeKind};
pub use region::{Quadrant, Region};
pub use traverse::{NodeVisit, Nodes, Traverse};
pub use tree::{Quadtree, RemovalPolicy, TreeOptions, DEFAULT_MIN_QUADRANT_SIZE};

/// A 2D point, stored by value in leaves.
pub type Point = glam::Vec2;
