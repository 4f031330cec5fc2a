//! Tree nodes and the recursive split/fold algorithms.

use crate::error::InsertError;
use crate::tree::RemovalPolicy;
use crate::{Point, Quadrant, Region};
use tracing::{debug, trace};

/// What a node currently is.
///
/// A node moves between the two variants in place: a leaf becomes internal
/// when it splits, and internal becomes a leaf again when it folds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Holds at most one point.
    Leaf(Option<Point>),
    /// Exactly four children in `[NW, NE, SW, SE]` order; no point of its own.
    Internal(Box<[Node; 4]>),
}

/// A node bound to a fixed region.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    region: Region,
    kind: NodeKind,
}

impl Node {
    /// An empty leaf covering `region`.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            kind: NodeKind::Leaf(None),
        }
    }

    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// The stored point of a leaf. Internal nodes never hold one.
    #[inline]
    pub fn point(&self) -> Option<Point> {
        match self.kind {
            NodeKind::Leaf(point) => point,
            NodeKind::Internal(_) => None,
        }
    }

    #[inline]
    pub fn children(&self) -> Option<&[Node; 4]> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal(children) => Some(&**children),
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Node> {
        self.children().map(|c| &c[quadrant.index()])
    }

    pub(crate) fn clear(&mut self) {
        self.kind = NodeKind::Leaf(None);
    }

    pub(crate) fn insert(&mut self, point: Point, min_size: f32) -> Result<(), InsertError> {
        if !self.region.contains(point) {
            return Err(InsertError::OutOfBounds {
                point,
                region: self.region,
            });
        }

        match self.kind {
            NodeKind::Leaf(None) => {
                self.kind = NodeKind::Leaf(Some(point));
                return Ok(());
            }
            NodeKind::Leaf(Some(resident)) => self.split(resident, min_size)?,
            NodeKind::Internal(_) => {}
        }

        let NodeKind::Internal(children) = &mut self.kind else {
            unreachable!("node was split above");
        };
        let result = match children.iter_mut().find(|child| child.region.contains(point)) {
            Some(child) => child.insert(point, min_size),
            None => Err(InsertError::OutOfBounds {
                point,
                region: self.region,
            }),
        };
        // A rejection deeper down leaves the splits made on the way empty.
        if result.is_err() {
            self.collapse();
        }
        result
    }

    /// Turn an occupied leaf into an internal node, moving `resident` down.
    fn split(&mut self, resident: Point, min_size: f32) -> Result<(), InsertError> {
        let size = self.region.quadrant_size();
        if size < min_size {
            return Err(InsertError::QuadrantTooSmall {
                region: self.region,
                size,
                min: min_size,
            });
        }

        let mut children = self.region.quadrants().map(Node::new);
        if let Some(child) = children.iter_mut().find(|c| c.region.contains(resident)) {
            child.kind = NodeKind::Leaf(Some(resident));
        }
        trace!(region = %self.region, "split");
        self.kind = NodeKind::Internal(Box::new(children));
        Ok(())
    }

    /// Clears the leaf covering `point` and folds back up. Returns what was cleared.
    pub(crate) fn take(&mut self, point: Point, policy: RemovalPolicy) -> Option<Point> {
        let taken = match &mut self.kind {
            NodeKind::Leaf(slot) => {
                if !self.region.contains(point) {
                    return None;
                }
                return match policy {
                    RemovalPolicy::Region => slot.take(),
                    RemovalPolicy::Exact if *slot == Some(point) => slot.take(),
                    RemovalPolicy::Exact => None,
                };
            }
            NodeKind::Internal(children) => children
                .iter_mut()
                .find(|child| child.region.contains(point))
                .and_then(|child| child.take(point, policy)),
        };
        self.collapse();
        taken
    }

    /// Fold an internal node whose four leaves hold zero or one point.
    fn collapse(&mut self) {
        let NodeKind::Internal(children) = &self.kind else {
            return;
        };

        let mut occupied = 0;
        let mut survivor = None;
        for child in children.iter() {
            match child.kind {
                NodeKind::Internal(_) => return,
                NodeKind::Leaf(Some(p)) => {
                    occupied += 1;
                    survivor = Some(p);
                }
                NodeKind::Leaf(None) => {}
            }
        }

        if occupied <= 1 {
            debug!(region = %self.region, occupied, "collapse");
            self.kind = NodeKind::Leaf(survivor);
        }
    }

    pub(crate) fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal(children) => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
        }
    }
}
