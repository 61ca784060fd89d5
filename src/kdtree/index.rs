use tinyvec::TinyVec;

use crate::kdtree::node::{NodeArena, NodeData, NodeId};
use crate::kdtree::KDTreeBuilder;
use crate::location::{Dimension, Location};
use crate::r#type::CoordNum;

/// A mutable set of distinct locations stored in a k-d tree.
///
/// The tree alternates between splitting on latitude and longitude at each level, starting with
/// latitude at the root. Bulk construction via [`KDTree::create`] or [`KDTreeBuilder`] produces a
/// balanced tree. Single insertions and removals never rebalance, so a long run of adversarial
/// insertions may degrade the height towards `O(n)`. No operation recurses proportionally to
/// height.
#[derive(Debug, Clone)]
pub struct KDTree<N: CoordNum = f64> {
    pub(crate) nodes: NodeArena<N>,
    pub(crate) root: Option<NodeId>,
    pub(crate) len: usize,
}

impl<N: CoordNum> Default for KDTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: CoordNum> KDTree<N> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new, empty tree with room for `capacity` points before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Create a balanced tree holding a copy of each distinct point of `points`.
    ///
    /// An empty slice produces an empty tree.
    pub fn create(points: &[Location<N>]) -> Self {
        let mut builder = KDTreeBuilder::new(points.len());
        builder.add_all(points);
        builder.finish()
    }

    /// The number of distinct points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Descend from the root towards `point`.
    ///
    /// Returns `Ok(id)` if a node holding `point` exists, otherwise `Err(parent)` where `parent`
    /// is the node whose empty child slot `point` belongs in (`None` for an empty tree).
    fn search(&self, point: &Location<N>) -> Result<NodeId, Option<NodeId>> {
        let mut parent = None;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.nodes[id];
            if node.location == *point {
                return Ok(id);
            }
            parent = Some(id);
            current = node.child_towards(point);
        }

        Err(parent)
    }

    /// Returns `true` if the tree holds a point with the same coordinates as `point`.
    pub fn contains(&self, point: &Location<N>) -> bool {
        self.search(point).is_ok()
    }

    /// Add a copy of `point` to the tree.
    ///
    /// Returns `true` if the point was added and `false` if it was already present, in which case
    /// the tree is unchanged.
    pub fn add(&mut self, point: Location<N>) -> bool {
        debug_assert!(point.is_valid(), "invalid location {:?}", point);

        let parent = match self.search(&point) {
            Ok(_) => return false,
            Err(parent) => parent,
        };

        match parent {
            None => {
                self.root = Some(self.nodes.alloc(NodeData::new(point, Dimension::ROOT, None)));
            }
            Some(parent) => {
                let dim = self.nodes[parent].cutting_dim.next();
                let id = self.nodes.alloc(NodeData::new(point, dim, Some(parent)));
                let parent = &mut self.nodes[parent];
                if parent.goes_right(&point) {
                    debug_assert!(parent.right.is_none());
                    parent.right = Some(id);
                } else {
                    debug_assert!(parent.left.is_none());
                    parent.left = Some(id);
                }
            }
        }

        self.len += 1;
        debug_assert_eq!(self.len, self.nodes.len());
        true
    }

    /// Remove the point with the same coordinates as `point` from the tree.
    ///
    /// Returns `true` if a point was removed. Removing an absent point has no effect.
    ///
    /// An interior node is never unlinked directly: its location is overwritten with the extreme
    /// point of one of its subtrees (the minimum of the right subtree along the node's cutting
    /// dimension, or the maximum of the left subtree if there is no right child), and that point's
    /// original node is removed in turn until a leaf is reached.
    pub fn remove(&mut self, point: &Location<N>) -> bool {
        let Ok(mut target) = self.search(point) else {
            return false;
        };

        loop {
            let node = &self.nodes[target];
            let dim = node.cutting_dim;
            let replacement = match (node.left, node.right) {
                (None, None) => break,
                (_, Some(right)) => self.find_min(right, dim),
                (Some(left), None) => self.find_max(left, dim),
            };

            let promoted = self.nodes[replacement].location;
            log::trace!(
                "promoting {:?} into node {} ({:?})",
                promoted,
                target.index(),
                dim
            );
            self.nodes[target].location = promoted;
            target = replacement;
        }

        self.unlink_leaf(target);
        self.len -= 1;
        debug_assert_eq!(self.len, self.nodes.len());
        true
    }

    /// Detach a leaf from its parent (or clear the root) and release it.
    fn unlink_leaf(&mut self, id: NodeId) {
        let node = self.nodes.free(id);
        debug_assert!(node.is_leaf());

        match node.parent {
            None => self.root = None,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(id) {
                    parent.left = None;
                } else {
                    debug_assert_eq!(parent.right, Some(id));
                    parent.right = None;
                }
            }
        }
    }

    /// The node within the subtree at `subtree` whose location is smallest along `dim`.
    pub(crate) fn find_min(&self, subtree: NodeId, dim: Dimension) -> NodeId {
        self.find_extreme(subtree, dim, Extreme::Min)
    }

    /// The node within the subtree at `subtree` whose location is largest along `dim`.
    pub(crate) fn find_max(&self, subtree: NodeId, dim: Dimension) -> NodeId {
        self.find_extreme(subtree, dim, Extreme::Max)
    }

    fn find_extreme(&self, subtree: NodeId, dim: Dimension, extreme: Extreme) -> NodeId {
        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[NodeId; 33]> = TinyVec::new();
        stack.push(subtree);

        let mut best = subtree;

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];

            if node.cutting_dim == dim {
                // Only one side can hold anything beyond this node along `dim`
                let inward = match extreme {
                    Extreme::Min => node.left,
                    Extreme::Max => node.right,
                };
                if let Some(child) = inward {
                    stack.push(child);
                    continue;
                }
            } else {
                stack.extend(node.left);
                stack.extend(node.right);
            }

            if extreme.improves(dim, &node.location, &self.nodes[best].location) {
                best = id;
            }
        }

        best
    }

    /// Remove every point, leaving an empty tree that can be reused.
    ///
    /// Nodes are released children-first.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            let mut stack = vec![root];
            let mut released = 0;
            while let Some(&id) = stack.last() {
                let node = &self.nodes[id];
                if let Some(child) = node.left.or(node.right) {
                    stack.push(child);
                    continue;
                }
                stack.pop();
                self.unlink_leaf(id);
                released += 1;
            }
            log::trace!("released {} nodes", released);
        }
        self.nodes.clear();
        self.len = 0;
    }

    /// The number of levels in the tree, or 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: TinyVec<[(NodeId, usize); 33]> = TinyVec::new();
        stack.extend(self.root.map(|root| (root, 1)));

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        height
    }

    /// An iterator over every location in the tree, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Location<N>> + '_ {
        self.nodes.iter().map(|node| &node.location)
    }
}

impl<N: CoordNum> Extend<Location<N>> for KDTree<N> {
    fn extend<I: IntoIterator<Item = Location<N>>>(&mut self, iter: I) {
        for point in iter {
            self.add(point);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

impl Extreme {
    #[inline]
    fn improves<N: CoordNum>(
        self,
        dim: Dimension,
        candidate: &Location<N>,
        best: &Location<N>,
    ) -> bool {
        let ord = dim.compare(candidate, best);
        match self {
            Self::Min => ord.is_lt(),
            Self::Max => ord.is_gt(),
        }
    }
}
