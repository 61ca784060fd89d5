use std::ops::ControlFlow;

use geo_traits::{CoordTrait, RectTrait};
use tinyvec::TinyVec;

use crate::error::Result;
use crate::kdtree::node::NodeId;
use crate::kdtree::KDTree;
use crate::location::{Location, Region};
use crate::r#type::CoordNum;

impl<N: CoordNum> KDTree<N> {
    /// Search the tree for points within a given rectangle, passing each to `visit` until it
    /// returns [`ControlFlow::Break`].
    ///
    /// - sw: south-west corner of the rectangle
    /// - ne: north-east corner of the rectangle, strictly north-east of `sw`
    ///
    /// Points on the border of the rectangle are included. The visiting order is unspecified.
    pub fn range_try_for_each<B, F>(
        &self,
        sw: &Location<N>,
        ne: &Location<N>,
        mut visit: F,
    ) -> ControlFlow<B>
    where
        F: FnMut(&Location<N>) -> ControlFlow<B>,
    {
        debug_assert!(
            ne.is_strictly_northeast_of(sw),
            "{:?} is not strictly north-east of {:?}",
            ne,
            sw
        );
        let query = Region::new(*sw, *ne);

        // Each entry carries the bounds every point of that subtree is known to lie within.
        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[(NodeId, Region<N>); 33]> = TinyVec::new();
        stack.extend(self.root.map(|root| (root, Region::everything())));

        while let Some((id, bounds)) = stack.pop() {
            // nothing in this subtree can match
            if !query.intersects(&bounds) {
                continue;
            }

            let node = &self.nodes[id];
            if query.contains(&node.location) {
                visit(&node.location)?;
            }

            let (lower, upper) = bounds.split(node.cutting_dim, &node.location);
            // Note: pushed in reverse so the left subtree is visited first
            stack.extend(node.right.map(|right| (right, upper)));
            stack.extend(node.left.map(|left| (left, lower)));
        }

        ControlFlow::Continue(())
    }

    /// Search the tree for points within a given rectangle, passing each to `visit`.
    ///
    /// - sw: south-west corner of the rectangle
    /// - ne: north-east corner of the rectangle, strictly north-east of `sw`
    ///
    /// Points on the border of the rectangle are included. The visiting order is unspecified.
    pub fn range_for_each<F>(&self, sw: &Location<N>, ne: &Location<N>, mut visit: F)
    where
        F: FnMut(&Location<N>),
    {
        let _ = self.range_try_for_each::<(), _>(sw, ne, |loc| {
            visit(loc);
            ControlFlow::Continue(())
        });
    }

    /// Search the tree for points within a given rectangle.
    ///
    /// - sw: south-west corner of the rectangle
    /// - ne: north-east corner of the rectangle, strictly north-east of `sw`
    ///
    /// Returns copies of the found points in arbitrary order. The result is empty if no points
    /// lie in the rectangle.
    pub fn range(&self, sw: &Location<N>, ne: &Location<N>) -> Vec<Location<N>> {
        let mut result = vec![];
        self.range_for_each(sw, ne, |loc| result.push(*loc));
        result
    }

    /// Search the tree for points within a given rectangle, validating the rectangle first.
    ///
    /// Returns an error if `ne` is not strictly north-east of `sw`.
    pub fn try_range(&self, sw: &Location<N>, ne: &Location<N>) -> Result<Vec<Location<N>>> {
        let region = Region::try_new(*sw, *ne)?;
        Ok(self.range(&region.sw, &region.ne))
    }

    /// Search the tree for points within a given rectangle.
    ///
    /// The rectangle's `x` axis is longitude and its `y` axis is latitude.
    ///
    /// Returns copies of the found points
    pub fn range_rect(&self, rect: &impl RectTrait<T = N>) -> Vec<Location<N>> {
        self.range(
            &Location::new(rect.min().y(), rect.min().x()),
            &Location::new(rect.max().y(), rect.max().x()),
        )
    }
}
