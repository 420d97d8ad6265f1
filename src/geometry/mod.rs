//! Vector and axis-aligned bounding box primitives the tree is built over.

mod bbox;
mod vector;

pub use bbox::{Aabb, Coord};
pub use vector::Vector;
