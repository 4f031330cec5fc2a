//! The quadtree owner: configuration, mutation entry points and validation.

use crate::error::{InsertError, InvariantError};
use crate::traverse::{Nodes, Traverse};
use crate::{Node, NodeKind, Point, Region};
use tracing::debug;

/// Quadrants narrower than this are never created.
pub const DEFAULT_MIN_QUADRANT_SIZE: f32 = 2.0;

/// How `remove` decides what to clear in the leaf covering the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Clear whatever the leaf holds, even if it's a different point.
    #[default]
    Region,
    /// Clear only a stored point equal to the target.
    Exact,
}

/// Construction-time parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeOptions {
    /// Minimum side length of a quadrant produced by a split.
    pub min_quadrant_size: f32,
    pub removal: RemovalPolicy,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            min_quadrant_size: DEFAULT_MIN_QUADRANT_SIZE,
            removal: RemovalPolicy::default(),
        }
    }
}

/// Point-region quadtree holding at most one point per leaf.
///
/// The root always covers the region given at construction. All mutation
/// goes through [`insert`](Self::insert) and [`remove`](Self::remove); after
/// either returns, every internal node holds at least two points in its
/// subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadtree {
    root: Node,
    options: TreeOptions,
}

impl Quadtree {
    pub fn new(region: Region) -> Self {
        Self::with_options(region, TreeOptions::default())
    }

    pub fn with_options(region: Region, options: TreeOptions) -> Self {
        Self {
            root: Node::new(region),
            options,
        }
    }

    #[inline]
    pub fn region(&self) -> &Region {
        self.root.region()
    }

    #[inline]
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Insert a point, returning whether it was stored.
    pub fn insert(&mut self, point: Point) -> bool {
        match self.try_insert(point) {
            Ok(()) => true,
            Err(e) => {
                debug!("Cannot insert point: {}", e);
                false
            }
        }
    }

    /// Insert a point, reporting why it was rejected. A rejected insert
    /// leaves the tree as it was.
    pub fn try_insert(&mut self, point: Point) -> Result<(), InsertError> {
        self.root.insert(point, self.options.min_quadrant_size)
    }

    /// Remove the point in the leaf covering `point`. Absent points are a no-op.
    pub fn remove(&mut self, point: Point) {
        self.take(point);
    }

    /// Like [`remove`](Self::remove), returning the point that was cleared.
    ///
    /// Under [`RemovalPolicy::Region`] this may differ from `point`.
    pub fn take(&mut self, point: Point) -> Option<Point> {
        self.root.take(point, self.options.removal)
    }

    /// Drop every point, leaving an empty root leaf.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Pre-order `(region, point)` for every node.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse::new(&self.root)
    }

    /// Pre-order walk carrying depth and leaf flags.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(&self.root)
    }

    /// Every stored point in traversal order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.traverse().filter_map(|(_, point)| point)
    }

    pub fn len(&self) -> usize {
        self.points().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.point().is_none() && self.root.is_leaf()
    }

    pub fn node_count(&self) -> usize {
        self.traverse().count()
    }

    /// Height of the tree; a lone root leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Scan the whole tree for broken structural invariants.
    pub fn validate(&self) -> Result<(), InvariantError> {
        validate_node(&self.root)
    }
}

fn validate_node(node: &Node) -> Result<(), InvariantError> {
    let region = *node.region();
    match node.kind() {
        NodeKind::Leaf(None) => Ok(()),
        NodeKind::Leaf(Some(point)) => {
            if region.contains(*point) {
                Ok(())
            } else {
                Err(InvariantError::Misplaced {
                    point: *point,
                    region,
                })
            }
        }
        NodeKind::Internal(children) => {
            let expected = region.quadrants();
            if children.iter().zip(&expected).any(|(c, q)| c.region() != q) {
                return Err(InvariantError::Tiling {
                    parent: region,
                    reason: "child region differs from midpoint quadrant",
                });
            }

            if children.iter().all(Node::is_leaf) {
                let occupied = children.iter().filter(|c| c.point().is_some()).count();
                if occupied <= 1 {
                    return Err(InvariantError::Unpruned { region, occupied });
                }
            }

            children.iter().try_for_each(validate_node)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quadrant;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_scenario_split_and_fold() {
        let mut tree = Quadtree::new(Region::square(8.0));

        assert!(tree.insert(p(1.0, 1.0)));
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().point(), Some(p(1.0, 1.0)));

        assert!(tree.insert(p(6.0, 6.0)));
        let regions: Vec<Region> = tree.root().children().unwrap().iter().map(|c| *c.region()).collect();
        assert_eq!(
            regions,
            vec![
                Region::new(0.0, 0.0, 4.0, 4.0),
                Region::new(4.0, 0.0, 8.0, 4.0),
                Region::new(0.0, 4.0, 4.0, 8.0),
                Region::new(4.0, 4.0, 8.0, 8.0),
            ]
        );
        assert_eq!(tree.root().child(Quadrant::NW).unwrap().point(), Some(p(1.0, 1.0)));
        assert_eq!(tree.root().child(Quadrant::SE).unwrap().point(), Some(p(6.0, 6.0)));
        tree.validate().unwrap();

        tree.remove(p(1.0, 1.0));
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().point(), Some(p(6.0, 6.0)));
        tree.validate().unwrap();
    }

    #[test]
    fn test_out_of_bounds_insert() {
        let mut tree = Quadtree::new(Region::square(8.0));
        tree.insert(p(1.0, 1.0));
        let before = tree.clone();

        assert!(!tree.insert(p(-1.0, -1.0)));
        assert!(!tree.insert(p(8.0, 1.0)));
        assert_eq!(tree, before);
        assert!(matches!(
            tree.try_insert(p(-1.0, -1.0)),
            Err(InsertError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_round_trip_restores_empty_root() {
        let mut tree = Quadtree::new(Region::square(64.0));
        assert!(tree.insert(p(10.0, 20.0)));
        tree.remove(p(10.0, 20.0));
        assert_eq!(tree, Quadtree::new(Region::square(64.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_close_points_rejected_at_min_size() {
        let mut tree = Quadtree::new(Region::square(8.0));
        assert!(tree.insert(p(0.1, 0.1)));
        let before = tree.clone();

        let err = tree.try_insert(p(0.2, 0.2)).unwrap_err();
        assert_eq!(
            err,
            InsertError::QuadrantTooSmall {
                region: Region::new(0.0, 0.0, 2.0, 2.0),
                size: 1.0,
                min: 2.0,
            }
        );
        // The two splits made on the way down fold back.
        assert_eq!(tree, before);
        tree.validate().unwrap();
    }

    #[test]
    fn test_duplicate_point_rejected() {
        let mut tree = Quadtree::new(Region::square(16.0));
        assert!(tree.insert(p(5.0, 5.0)));
        assert!(!tree.insert(p(5.0, 5.0)));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.points().collect::<Vec<_>>(), vec![p(5.0, 5.0)]);
    }

    #[test]
    fn test_region_removal_clears_neighbour_in_same_leaf() {
        let mut tree = Quadtree::new(Region::square(8.0));
        tree.insert(p(1.0, 1.0));
        tree.insert(p(6.0, 6.0));

        // (3, 3) shares the NW leaf with (1, 1).
        assert_eq!(tree.take(p(3.0, 3.0)), Some(p(1.0, 1.0)));
        assert_eq!(tree.root().point(), Some(p(6.0, 6.0)));
    }

    #[test]
    fn test_exact_removal_keeps_neighbour() {
        let options = TreeOptions {
            removal: RemovalPolicy::Exact,
            ..TreeOptions::default()
        };
        let mut tree = Quadtree::with_options(Region::square(8.0), options);
        tree.insert(p(1.0, 1.0));
        tree.insert(p(6.0, 6.0));

        assert_eq!(tree.take(p(3.0, 3.0)), None);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.take(p(1.0, 1.0)), Some(p(1.0, 1.0)));
        assert_eq!(tree.root().point(), Some(p(6.0, 6.0)));
    }

    #[test]
    fn test_deep_removal_folds_all_the_way_up() {
        let mut tree = Quadtree::new(Region::square(64.0));
        tree.insert(p(1.0, 1.0));
        tree.insert(p(3.0, 3.0));
        assert_eq!(tree.depth(), 5);

        tree.remove(p(3.0, 3.0));
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root().point(), Some(p(1.0, 1.0)));
    }

    #[test]
    fn test_traverse_pre_order() {
        let mut tree = Quadtree::new(Region::square(8.0));
        tree.insert(p(1.0, 1.0));
        tree.insert(p(6.0, 6.0));

        let visits: Vec<_> = tree.traverse().collect();
        assert_eq!(visits.len(), 5);
        assert_eq!(visits[0], (Region::square(8.0), None));
        assert_eq!(visits[1], (Region::new(0.0, 0.0, 4.0, 4.0), Some(p(1.0, 1.0))));
        assert_eq!(visits[4], (Region::new(4.0, 4.0, 8.0, 8.0), Some(p(6.0, 6.0))));

        // Restartable without side effects.
        assert_eq!(tree.traverse().collect::<Vec<_>>(), visits);
        let depths: Vec<usize> = tree.nodes().map(|v| v.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_clear() {
        let mut tree = Quadtree::new(Region::square(32.0));
        for i in 0..8 {
            tree.insert(p(i as f32 * 4.0, i as f32 * 4.0));
        }
        assert_eq!(tree.len(), 8);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_randomized_ops_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut tree = Quadtree::new(Region::square(128.0));

        for _ in 0..2000 {
            let point = p(rng.random_range(0.0..128.0), rng.random_range(0.0..128.0));
            if rng.random_bool(0.6) {
                tree.insert(point);
            } else {
                tree.remove(point);
            }
            tree.validate().unwrap();
        }
        assert_quarter_tiling(tree.root());
    }

    fn assert_quarter_tiling(node: &Node) {
        let Some(children) = node.children() else {
            return;
        };
        let parent = node.region();
        for child in children.iter() {
            assert_eq!(child.region().area() * 4.0, parent.area());
            let corners = [
                p(child.region().min_x, child.region().min_y),
                p(child.region().max_x - 0.5, child.region().max_y - 0.5),
            ];
            assert!(corners.iter().all(|c| parent.contains(*c)));
            assert_quarter_tiling(child);
        }
        // Every sample point of the parent lands in exactly one child.
        for (x, y) in [(0.25, 0.25), (0.5, 0.5), (0.75, 0.1), (0.1, 0.9)] {
            let probe = p(parent.min_x + parent.width() * x, parent.min_y + parent.height() * y);
            assert_eq!(children.iter().filter(|c| c.region().contains(probe)).count(), 1);
        }
    }

    #[test]
    fn test_randomized_exact_removal_matches_model() {
        let mut rng = StdRng::seed_from_u64(42);
        let options = TreeOptions {
            removal: RemovalPolicy::Exact,
            ..TreeOptions::default()
        };
        let mut tree = Quadtree::with_options(Region::square(256.0), options);
        let mut stored: Vec<Point> = Vec::new();

        for _ in 0..1500 {
            if stored.is_empty() || rng.random_bool(0.55) {
                let point = p(rng.random_range(0.0..256.0), rng.random_range(0.0..256.0));
                if tree.insert(point) {
                    stored.push(point);
                }
            } else {
                let idx = rng.random_range(0..stored.len());
                let point = stored.swap_remove(idx);
                assert_eq!(tree.take(point), Some(point));
            }
            tree.validate().unwrap();
            assert_eq!(tree.len(), stored.len());
        }

        for point in stored.drain(..) {
            tree.remove(point);
        }
        assert!(tree.is_empty());
    }
}
