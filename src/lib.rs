//! An in-memory static spatial index for two-dimensional (and, generically,
//! D-dimensional) point and box keys.
//!
//! See the [`tree`] module for the index itself and the [`geometry`] module
//! for the vector and bounding-box primitives it is built over.

pub mod error;
pub mod geometry;
pub mod tree;
pub mod r#type;

pub use error::{BoxTreeError, Result};
pub use geometry::{Aabb, Vector};
pub use r#type::IndexableFloat;
pub use tree::{BoxTree, BoxTreeElement, NodeRef, NodesIter, RangeQuery, SpatialKey, DEFAULT_NODE_SIZE};
