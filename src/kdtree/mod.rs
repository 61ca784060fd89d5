//! An implementation of a mutable K-D Tree over latitude/longitude points.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
mod range;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use traversal::Node;
