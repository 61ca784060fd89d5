//! Index-addressed storage for tree nodes.

use std::ops::{Index, IndexMut};

use crate::location::{Dimension, Location};
use crate::r#type::CoordNum;

/// Handle onto a slot of a [`NodeArena`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A single stored point and its links.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeData<N: CoordNum> {
    pub(crate) location: Location<N>,
    /// Fixed when the node is created, never changed by promotion.
    pub(crate) cutting_dim: Dimension,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<N: CoordNum> NodeData<N> {
    pub(crate) fn new(
        location: Location<N>,
        cutting_dim: Dimension,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            location,
            cutting_dim,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The child slot a point belongs in when it is not this node's point.
    #[inline]
    pub(crate) fn child_towards(&self, point: &Location<N>) -> Option<NodeId> {
        if self.goes_right(point) {
            self.right
        } else {
            self.left
        }
    }

    #[inline]
    pub(crate) fn goes_right(&self, point: &Location<N>) -> bool {
        self.cutting_dim.compare(point, &self.location).is_gt()
    }
}

/// Growable node storage. Freed slots are recycled through a free list.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeArena<N: CoordNum> {
    slots: Vec<Option<NodeData<N>>>,
    free_list: Vec<usize>,
}

impl<N: CoordNum> NodeArena<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Store a node, reusing a freed slot if one is available.
    pub(crate) fn alloc(&mut self, node: NodeData<N>) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            debug_assert!(self.slots[idx].is_none());
            self.slots[idx] = Some(node);
            NodeId(idx)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Release a node's slot. The id must not be used afterwards.
    pub(crate) fn free(&mut self, id: NodeId) -> NodeData<N> {
        let node = self.slots[id.0].take().expect("freed node id is live");
        self.free_list.push(id.0);
        node
    }

    /// Drop every node and forget all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// All live nodes, in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &NodeData<N>> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

impl<N: CoordNum> Index<NodeId> for NodeArena<N> {
    type Output = NodeData<N>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        self.slots[id.0].as_ref().expect("node id is live")
    }
}

impl<N: CoordNum> IndexMut<NodeId> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.slots[id.0].as_mut().expect("node id is live")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(lat: f64, lon: f64) -> NodeData<f64> {
        NodeData::new(Location::new(lat, lon), Dimension::Latitude, None)
    }

    #[test]
    fn test_free_slots_are_reused() {
        let mut arena = NodeArena::with_capacity(4);
        let a = arena.alloc(leaf(1.0, 1.0));
        let b = arena.alloc(leaf(2.0, 2.0));
        assert_eq!(arena.len(), 2);

        let freed = arena.free(a);
        assert_eq!(freed.location, Location::new(1.0, 1.0));
        assert_eq!(arena.len(), 1);

        let c = arena.alloc(leaf(3.0, 3.0));
        assert_eq!(c, a);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[b].location, Location::new(2.0, 2.0));
        assert_eq!(arena[c].location, Location::new(3.0, 3.0));
        assert_eq!(arena.iter().count(), 2);
    }

    #[test]
    fn test_goes_right_on_cutting_dim() {
        let mut node = leaf(10.0, 10.0);
        assert!(node.goes_right(&Location::new(11.0, 0.0)));
        assert!(!node.goes_right(&Location::new(9.0, 50.0)));
        // equal latitude falls back to longitude
        assert!(node.goes_right(&Location::new(10.0, 11.0)));
        assert!(!node.goes_right(&Location::new(10.0, 9.0)));

        node.cutting_dim = Dimension::Longitude;
        assert!(node.goes_right(&Location::new(0.0, 11.0)));
        assert!(!node.goes_right(&Location::new(50.0, 9.0)));
    }

    #[test]
    #[should_panic(expected = "node id is live")]
    fn test_index_after_free_panics() {
        let mut arena = NodeArena::default();
        let a = arena.alloc(leaf(1.0, 1.0));
        arena.free(a);
        let _ = &arena[a];
    }
}
