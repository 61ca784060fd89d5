use crate::kdtree::node::{NodeArena, NodeData, NodeId};
use crate::kdtree::KDTree;
use crate::location::{Dimension, Location};
use crate::r#type::CoordNum;

/// A builder to create a balanced [`KDTree`] from a batch of points.
///
/// Duplicate points are collapsed so that the resulting tree holds each distinct location once.
#[derive(Debug, Clone, Default)]
pub struct KDTreeBuilder<N: CoordNum = f64> {
    points: Vec<Location<N>>,
}

impl<N: CoordNum> KDTreeBuilder<N> {
    /// Create a new builder with room for the provided number of points.
    pub fn new(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index.
    ///
    /// Returns the insertion index of this point. Points are copied, so the caller keeps
    /// ownership of its own data.
    pub fn add(&mut self, point: Location<N>) -> usize {
        debug_assert!(point.is_valid(), "invalid location {:?}", point);
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Add every point of a slice to the index.
    pub fn add_all(&mut self, points: &[Location<N>]) {
        self.points.reserve(points.len());
        for point in points {
            self.add(*point);
        }
    }

    /// Consume this builder, removing duplicates and generating a balanced KDTree.
    pub fn finish(self) -> KDTree<N> {
        let mut points = self.points;
        let num_items = points.len();

        // drop duplicates; equal points are adjacent under the full latitude order
        points.sort_unstable_by(|a, b| Dimension::ROOT.compare(a, b));
        points.dedup();

        log::debug!(
            "building kd-tree from {} points ({} unique)",
            num_items,
            points.len()
        );

        let mut nodes = NodeArena::with_capacity(points.len());
        let root = build(&mut nodes, &mut points, None, Dimension::ROOT);

        KDTree {
            nodes,
            root,
            len: points.len(),
        }
    }
}

/// Recursively place the median of `points` along `dim` and build its halves on the alternate
/// dimension.
///
/// The median is the element at `len / 2`, so even-length slices send the larger half left.
/// Depth is `O(log n)`.
fn build<N: CoordNum>(
    nodes: &mut NodeArena<N>,
    points: &mut [Location<N>],
    parent: Option<NodeId>,
    dim: Dimension,
) -> Option<NodeId> {
    if points.is_empty() {
        return None;
    }

    // middle index
    let m = points.len() >> 1;

    // partition around the middle so everything before it is smaller along `dim` and everything
    // after it is larger
    let (left, median, right) = points.select_nth_unstable_by(m, |a, b| dim.compare(a, b));
    let id = nodes.alloc(NodeData::new(*median, dim, parent));

    let left = build(nodes, left, Some(id), dim.next());
    let right = build(nodes, right, Some(id), dim.next());
    nodes[id].left = left;
    nodes[id].right = right;

    Some(id)
}

impl<N: CoordNum> FromIterator<Location<N>> for KDTree<N> {
    fn from_iter<I: IntoIterator<Item = Location<N>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut builder = KDTreeBuilder::new(iter.size_hint().0);
        for point in iter {
            builder.add(point);
        }
        builder.finish()
    }
}
