use crate::geometry::{Aabb, Vector};

/// The "no node" / "no elements" sentinel used throughout the arena.
pub(crate) const NONE: i32 = -1;

/// One arena node.
///
/// Children are appended after their parent, so every child index is greater
/// than its parent's. `middle_child` and `locked_axes` are only meaningful for
/// box keys; for point keys they stay at their defaults and the code paths
/// touching them compile away.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node<V: Vector> {
    pub parent: i32,
    pub low_child: i32,
    pub middle_child: i32,
    pub high_child: i32,
    /// Half-open range into the element buffer, or `NONE..NONE` when this
    /// node holds no elements itself.
    pub elements_begin: i32,
    pub elements_end: i32,
    pub bbox: Aabb<V>,
    pub split_position: V::Scalar,
    /// Axis this node was split on, or `-1` while it is a leaf.
    pub split_axis: i8,
    /// Axes a middle subtree may no longer split on.
    pub locked_axes: u32,
}

impl<V: Vector> Node<V> {
    pub fn new(parent: i32, elements_begin: i32, elements_end: i32, bbox: Aabb<V>) -> Self {
        Self {
            parent,
            low_child: NONE,
            middle_child: NONE,
            high_child: NONE,
            elements_begin,
            elements_end,
            bbox,
            split_position: num_traits::zero(),
            split_axis: -1,
            locked_axes: 0,
        }
    }

    pub fn element_count(&self) -> i32 {
        self.elements_end - self.elements_begin
    }

    pub fn has_elements(&self) -> bool {
        self.element_count() > 0
    }

    pub fn is_axis_locked(&self, axis: usize) -> bool {
        self.locked_axes & (1 << axis) != 0
    }
}
