//! A static spatial index over point or box keys.
//!
//! The tree is a k-d tree variant that supports box keys directly: boxes
//! that straddle a split plane go into a *middle* child that is split
//! further along the remaining axes, so every element lives in exactly one
//! node and no R-tree style bounding-rectangle bookkeeping is needed.
//!
//! ## Creation
//!
//! Use [`BoxTree::new`] or [`BoxTree::with_node_size`] to build a tree from
//! an owned element vector. Anything implementing [`BoxTreeElement`] can be
//! indexed; plain keys (`[f64; 2]` points, [`Aabb`][crate::geometry::Aabb]
//! boxes) are their own elements.
//!
//! ## Search
//!
//! Use [`BoxTree::range_query`] to iterate the elements overlapping a query
//! box, and [`BoxTree::nearest_query`] for the k closest elements to a point,
//! optionally capped by a search radius.
//!
//! ## Example
//!
//! ```
//! use box_tree::{Aabb, BoxTree};
//!
//! let tree = BoxTree::with_node_size(
//!     vec![
//!         Aabb::bound([0.0, 0.0], [2.0, 2.0]),
//!         Aabb::bound([1.0, 1.0], [3.0, 3.0]),
//!         Aabb::bound([4.0, 4.0], [5.0, 5.0]),
//!     ],
//!     2,
//! )
//! .unwrap();
//!
//! let query = Aabb::bound([0.5, 0.5], [1.5, 1.5]);
//! let mut found: Vec<usize> = tree.range_query(&query).map(|(index, _)| index).collect();
//! found.sort();
//! assert_eq!(found, vec![0, 1]);
//!
//! let nearest = tree.nearest_query(&[6.0, 5.0], Some(1), None).unwrap();
//! assert_eq!(nearest, vec![(2, 1.0)]);
//! ```

mod builder;
mod index;
mod key;
mod node;
mod query;
mod traversal;

pub use index::{BoxTree, DEFAULT_NODE_SIZE};
pub use key::{BoxTreeElement, SpatialKey};
pub use query::RangeQuery;
pub use traversal::{NodeRef, NodesIter};

use crate::geometry::Vector;

/// The key type of an element.
pub type KeyOf<T> = <T as BoxTreeElement>::Key;

/// The vector type underlying an element's key.
pub type VectorOf<T> = <KeyOf<T> as SpatialKey>::Vector;

/// The scalar type underlying an element's key.
pub type ScalarOf<T> = <VectorOf<T> as Vector>::Scalar;
