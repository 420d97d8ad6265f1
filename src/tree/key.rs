use std::fmt::Debug;

use crate::geometry::{Aabb, Vector};
use crate::r#type::IndexableFloat;

/// The geometry of one indexed element: either a point or a box.
///
/// This is the only surface the tree uses to reason about element geometry.
/// [`IS_BOX`][Self::IS_BOX] is a compile-time constant, so the box-only code
/// paths (middle children, locked axes) constant-fold away for point keys.
pub trait SpatialKey: Copy + PartialEq + Debug + Send + Sync + 'static {
    type Vector: Vector;

    /// Whether keys of this type have extent, as opposed to being points.
    const IS_BOX: bool;

    /// Smallest coordinate of the key along `axis`.
    fn low_bound(&self, axis: usize) -> <Self::Vector as Vector>::Scalar;

    /// Largest coordinate of the key along `axis`.
    fn high_bound(&self, axis: usize) -> <Self::Vector as Vector>::Scalar;

    /// The key's bounding box (the key itself for box keys).
    fn bbox(&self) -> Aabb<Self::Vector>;

    /// Whether the key overlaps `range`, closed on both sides.
    fn overlaps(&self, range: &Aabb<Self::Vector>) -> bool;

    /// Squared distance from `target` to the key; for box keys this is the
    /// distance to the closest point of the box, zero inside.
    fn distance_squared_to(&self, target: &Self::Vector) -> <Self::Vector as Vector>::Scalar;
}

impl<N: IndexableFloat, const D: usize> SpatialKey for [N; D] {
    type Vector = [N; D];

    const IS_BOX: bool = false;

    #[inline]
    fn low_bound(&self, axis: usize) -> N {
        self[axis]
    }

    #[inline]
    fn high_bound(&self, axis: usize) -> N {
        self[axis]
    }

    fn bbox(&self) -> Aabb<Self::Vector> {
        Aabb::from_point(*self)
    }

    #[inline]
    fn overlaps(&self, range: &Aabb<Self::Vector>) -> bool {
        range.contains_point(self)
    }

    #[inline]
    fn distance_squared_to(&self, target: &Self::Vector) -> N {
        Vector::distance_squared(self, target)
    }
}

impl<V: Vector> SpatialKey for Aabb<V> {
    type Vector = V;

    const IS_BOX: bool = true;

    #[inline]
    fn low_bound(&self, axis: usize) -> V::Scalar {
        self.min().get(axis)
    }

    #[inline]
    fn high_bound(&self, axis: usize) -> V::Scalar {
        self.max().get(axis)
    }

    fn bbox(&self) -> Aabb<V> {
        *self
    }

    #[inline]
    fn overlaps(&self, range: &Aabb<V>) -> bool {
        Aabb::overlaps(self, range)
    }

    #[inline]
    fn distance_squared_to(&self, target: &V) -> V::Scalar {
        self.distance_squared_to_point(target)
    }
}

/// An element a tree can be built over: a payload that yields a spatial key.
///
/// Keys are their own elements through the blanket implementation, so a
/// `Vec<[f64; 2]>` or a `Vec<Aabb<[f64; 2]>>` can be indexed directly.
/// Payload types implement the projection by hand:
///
/// ```
/// use box_tree::{Aabb, BoxTreeElement};
///
/// struct Road {
///     name: String,
///     bounds: Aabb<[f64; 2]>,
/// }
///
/// impl BoxTreeElement for Road {
///     type Key = Aabb<[f64; 2]>;
///
///     fn spatial_key(&self) -> Self::Key {
///         self.bounds
///     }
/// }
/// ```
pub trait BoxTreeElement {
    type Key: SpatialKey;

    fn spatial_key(&self) -> Self::Key;
}

impl<K: SpatialKey> BoxTreeElement for K {
    type Key = K;

    #[inline]
    fn spatial_key(&self) -> K {
        *self
    }
}
