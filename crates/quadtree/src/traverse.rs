//! Read-only pre-order walks over a tree.

use crate::{Node, Point, Region};

/// One node as seen by a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisit {
    pub region: Region,
    /// Stored point, for occupied leaves only.
    pub point: Option<Point>,
    /// Distance from the root (root = 0).
    pub depth: usize,
    pub is_leaf: bool,
}

/// Pre-order iterator over every node, children in NW, NE, SW, SE order.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Nodes<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![(root, 0)],
        }
    }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeVisit;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let Some(children) = node.children() {
            // Reversed so NW is popped first.
            self.stack
                .extend(children.iter().rev().map(|child| (child, depth + 1)));
        }
        Some(NodeVisit {
            region: *node.region(),
            point: node.point(),
            depth,
            is_leaf: node.is_leaf(),
        })
    }
}

/// `(region, point)` pairs for every node, in the same order as [`Nodes`].
#[derive(Debug, Clone)]
pub struct Traverse<'a> {
    inner: Nodes<'a>,
}

impl<'a> Traverse<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self {
            inner: Nodes::new(root),
        }
    }
}

impl Iterator for Traverse<'_> {
    type Item = (Region, Option<Point>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|visit| (visit.region, visit.point))
    }
}
