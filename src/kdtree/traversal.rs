//! Utilities to traverse the KDTree structure.

use geo_traits::RectTrait;

use crate::kdtree::node::{NodeData, NodeId};
use crate::kdtree::KDTree;
use crate::location::{Dimension, Location, Region};
use crate::r#type::CoordNum;

/// A node in the KDTree.
///
/// Each node carries the bounding region its subtree is known to lie within, derived from the
/// splits of its ancestors. The root's region is unbounded.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a, N: CoordNum> {
    /// The tree that this node is a reference onto
    tree: &'a KDTree<N>,

    id: NodeId,

    bounds: Region<N>,
}

impl<'a, N: CoordNum> Node<'a, N> {
    pub(crate) fn from_root(tree: &'a KDTree<N>) -> Option<Self> {
        tree.root.map(|id| Self {
            tree,
            id,
            bounds: Region::everything(),
        })
    }

    #[inline]
    fn data(&self) -> &'a NodeData<N> {
        let tree: &'a KDTree<N> = self.tree;
        &tree.nodes[self.id]
    }

    /// The point stored in this node.
    pub fn location(&self) -> &'a Location<N> {
        &self.data().location
    }

    /// The dimension the children of this node are split over.
    pub fn cutting_dim(&self) -> Dimension {
        self.data().cutting_dim
    }

    /// The bounding region of this node's subtree.
    pub fn bounds(&self) -> Region<N> {
        self.bounds
    }

    /// The child node holding points that are not larger along [`Self::cutting_dim`].
    pub fn left_child(&self) -> Option<Node<'a, N>> {
        let (lower, _) = self.bounds.split(self.cutting_dim(), self.location());
        self.data().left.map(|id| Self {
            tree: self.tree,
            id,
            bounds: lower,
        })
    }

    /// The child node holding points that are not smaller along [`Self::cutting_dim`].
    pub fn right_child(&self) -> Option<Node<'a, N>> {
        let (_, upper) = self.bounds.split(self.cutting_dim(), self.location());
        self.data().right.map(|id| Self {
            tree: self.tree,
            id,
            bounds: upper,
        })
    }

    /// The location held by this node's parent, or `None` for the root.
    pub fn parent_location(&self) -> Option<&'a Location<N>> {
        let tree: &'a KDTree<N> = self.tree;
        self.data()
            .parent
            .map(|parent| &tree.nodes[parent].location)
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.data().is_leaf()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

impl<N: CoordNum> KDTree<N> {
    /// Access the root node of the KDTree for manual traversal, or `None` if the tree is empty.
    pub fn root(&self) -> Option<Node<'_, N>> {
        Node::from_root(self)
    }
}

impl<'a, N: CoordNum> geo_traits::GeometryTrait for Node<'a, N> {
    type T = N;
    type PointType<'b>
        = geo_traits::UnimplementedPoint<N>
    where
        Self: 'b;
    type LineStringType<'b>
        = geo_traits::UnimplementedLineString<N>
    where
        Self: 'b;
    type PolygonType<'b>
        = geo_traits::UnimplementedPolygon<N>
    where
        Self: 'b;
    type MultiPointType<'b>
        = geo_traits::UnimplementedMultiPoint<N>
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = geo_traits::UnimplementedMultiLineString<N>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = geo_traits::UnimplementedMultiPolygon<N>
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = geo_traits::UnimplementedGeometryCollection<N>
    where
        Self: 'b;
    type RectType<'b>
        = Self
    where
        Self: 'b;
    type TriangleType<'b>
        = geo_traits::UnimplementedTriangle<N>
    where
        Self: 'b;
    type LineType<'b>
        = geo_traits::UnimplementedLine<N>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> geo_traits::GeometryType<
        '_,
        Self::PointType<'_>,
        Self::LineStringType<'_>,
        Self::PolygonType<'_>,
        Self::MultiPointType<'_>,
        Self::MultiLineStringType<'_>,
        Self::MultiPolygonType<'_>,
        Self::GeometryCollectionType<'_>,
        Self::RectType<'_>,
        Self::TriangleType<'_>,
        Self::LineType<'_>,
    > {
        geo_traits::GeometryType::Rect(self)
    }
}

impl<N: CoordNum> RectTrait for Node<'_, N> {
    type CoordType<'b>
        = Location<N>
    where
        Self: 'b;

    fn min(&self) -> Self::CoordType<'_> {
        self.bounds.sw
    }

    fn max(&self) -> Self::CoordType<'_> {
        self.bounds.ne
    }
}
