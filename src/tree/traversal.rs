//! Utilities to traverse the tree structure.

use std::ops::Range;

use crate::geometry::{Aabb, Vector};
use crate::tree::node::{Node, NONE};
use crate::tree::{BoxTree, BoxTreeElement, KeyOf, ScalarOf, SpatialKey, VectorOf};

impl<T: BoxTreeElement> BoxTree<T> {
    fn overlaps_node(&self, range: &Aabb<VectorOf<T>>, node_index: i32) -> bool {
        range.overlaps(&self.nodes[node_index as usize].bbox)
    }

    /// First child of `node_index` (low, middle, high order) whose box
    /// overlaps `range`, or `NONE`.
    pub(crate) fn first_child_overlap(&self, node_index: i32, range: &Aabb<VectorOf<T>>) -> i32 {
        let node = &self.nodes[node_index as usize];
        if node.low_child >= 0 && self.overlaps_node(range, node.low_child) {
            return node.low_child;
        }

        if KeyOf::<T>::IS_BOX
            && node.middle_child >= 0
            && self.overlaps_node(range, node.middle_child)
        {
            return node.middle_child;
        }

        if node.high_child >= 0 && self.overlaps_node(range, node.high_child) {
            return node.high_child;
        }

        NONE
    }

    /// Next sibling after `node_index` under the same parent (low, middle,
    /// high order) whose box overlaps `range`, or `NONE`.
    pub(crate) fn next_sibling_overlap(&self, node_index: i32, range: &Aabb<VectorOf<T>>) -> i32 {
        let node = &self.nodes[node_index as usize];
        if node.parent < 0 {
            return NONE;
        }

        let parent = &self.nodes[node.parent as usize];
        if KeyOf::<T>::IS_BOX
            && node_index == parent.low_child
            && parent.middle_child >= 0
            && self.overlaps_node(range, parent.middle_child)
        {
            return parent.middle_child;
        }

        if node_index != parent.high_child
            && parent.high_child >= 0
            && self.overlaps_node(range, parent.high_child)
        {
            return parent.high_child;
        }

        NONE
    }

    /// The split side nearer to `target`, falling through to the far side
    /// only when the split plane is closer than the current worst distance.
    fn low_or_high_near(
        &self,
        node: &Node<VectorOf<T>>,
        target: &VectorOf<T>,
        worst_distance_sq: ScalarOf<T>,
    ) -> i32 {
        let location = target.get(node.split_axis as usize);
        if location < node.split_position {
            if node.low_child >= 0 {
                return node.low_child;
            }

            let plane = node.split_position - location;
            if node.high_child >= 0 && plane * plane < worst_distance_sq {
                node.high_child
            } else {
                NONE
            }
        } else {
            if node.high_child >= 0 {
                return node.high_child;
            }

            let plane = location - node.split_position;
            if node.low_child >= 0 && plane * plane < worst_distance_sq {
                node.low_child
            } else {
                NONE
            }
        }
    }

    /// First child to visit in a nearest search. The middle bucket has no
    /// pruning geometry, so it always comes first for box keys.
    pub(crate) fn first_child_near(
        &self,
        node_index: i32,
        target: &VectorOf<T>,
        worst_distance_sq: ScalarOf<T>,
    ) -> i32 {
        let node = &self.nodes[node_index as usize];
        if node.split_axis < 0 {
            return NONE;
        }

        if KeyOf::<T>::IS_BOX && node.middle_child >= 0 {
            return node.middle_child;
        }

        self.low_or_high_near(node, target, worst_distance_sq)
    }

    /// Next sibling to visit in a nearest search, pruned by split-plane
    /// distance.
    pub(crate) fn next_sibling_near(
        &self,
        node_index: i32,
        target: &VectorOf<T>,
        worst_distance_sq: ScalarOf<T>,
    ) -> i32 {
        let node = &self.nodes[node_index as usize];
        if node.parent < 0 {
            return NONE;
        }

        let parent = &self.nodes[node.parent as usize];
        if KeyOf::<T>::IS_BOX && node_index == parent.middle_child {
            return self.low_or_high_near(parent, target, worst_distance_sq);
        }

        let location = target.get(parent.split_axis as usize);
        if node_index == parent.low_child {
            if location >= parent.split_position {
                return NONE;
            }

            let plane = parent.split_position - location;
            if parent.high_child >= 0 && plane * plane < worst_distance_sq {
                return parent.high_child;
            }

            return NONE;
        }

        debug_assert!(node_index == parent.high_child);
        if location < parent.split_position {
            return NONE;
        }

        let plane = location - parent.split_position;
        if parent.low_child >= 0 && plane * plane < worst_distance_sq {
            parent.low_child
        } else {
            NONE
        }
    }

    /// First child in low, middle, high order, ignoring geometry.
    pub(crate) fn first_child(&self, node_index: i32) -> i32 {
        let node = &self.nodes[node_index as usize];
        if node.low_child >= 0 {
            node.low_child
        } else if node.middle_child >= 0 {
            node.middle_child
        } else {
            node.high_child
        }
    }

    /// Next sibling in low, middle, high order, ignoring geometry.
    pub(crate) fn next_sibling(&self, node_index: i32) -> i32 {
        let node = &self.nodes[node_index as usize];
        if node.parent < 0 {
            return NONE;
        }

        let parent = &self.nodes[node.parent as usize];
        if node_index == parent.low_child {
            if parent.middle_child >= 0 {
                parent.middle_child
            } else {
                parent.high_child
            }
        } else if node_index == parent.middle_child {
            parent.high_child
        } else {
            NONE
        }
    }
}

/// A read-only handle on one node of a [`BoxTree`].
#[derive(Debug)]
pub struct NodeRef<'a, T: BoxTreeElement> {
    tree: &'a BoxTree<T>,
    index: usize,
}

impl<T: BoxTreeElement> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: BoxTreeElement> Copy for NodeRef<'_, T> {}

impl<'a, T: BoxTreeElement> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a BoxTree<T>, index: usize) -> Self {
        Self { tree, index }
    }

    fn node(&self) -> &'a Node<VectorOf<T>> {
        &self.tree.nodes[self.index]
    }

    fn link(&self, index: i32) -> Option<Self> {
        (index >= 0).then(|| Self::new(self.tree, index as usize))
    }

    /// Position of this node in the arena; the root is node 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The node's bounding box, tight around the keys of its subtree.
    pub fn bbox(&self) -> &'a Aabb<VectorOf<T>> {
        &self.node().bbox
    }

    /// Whether this node was never split.
    pub fn is_leaf(&self) -> bool {
        self.node().split_axis < 0
    }

    /// The axis this node was split on, if it was.
    pub fn split_axis(&self) -> Option<usize> {
        let axis = self.node().split_axis;
        (axis >= 0).then(|| axis as usize)
    }

    /// The split plane coordinate; only meaningful when
    /// [`split_axis`][Self::split_axis] is `Some`.
    pub fn split_position(&self) -> ScalarOf<T> {
        self.node().split_position
    }

    pub fn parent(&self) -> Option<Self> {
        self.link(self.node().parent)
    }

    /// The child holding elements strictly below the split plane.
    pub fn low_child(&self) -> Option<Self> {
        self.link(self.node().low_child)
    }

    /// The child holding box keys that straddle the split plane.
    pub fn middle_child(&self) -> Option<Self> {
        self.link(self.node().middle_child)
    }

    /// The child holding elements on or above the split plane.
    pub fn high_child(&self) -> Option<Self> {
        self.link(self.node().high_child)
    }

    /// The range of element indices held directly by this node, if any.
    /// An inner node with a small middle bucket holds elements itself.
    pub fn element_range(&self) -> Option<Range<usize>> {
        let node = self.node();
        node.has_elements()
            .then(|| node.elements_begin as usize..node.elements_end as usize)
    }

    /// The elements held directly by this node.
    pub fn elements(&self) -> &'a [T] {
        match self.element_range() {
            Some(range) => &self.tree.elements[range],
            None => &[],
        }
    }

    pub fn element_count(&self) -> usize {
        self.node().element_count() as usize
    }
}

/// Depth-first iterator over every node of a tree, parents first.
#[derive(Debug)]
pub struct NodesIter<'a, T: BoxTreeElement> {
    tree: &'a BoxTree<T>,
    node_index: i32,
    down: bool,
}

impl<'a, T: BoxTreeElement> NodesIter<'a, T> {
    pub(crate) fn new(tree: &'a BoxTree<T>) -> Self {
        Self {
            tree,
            node_index: if tree.nodes.is_empty() { NONE } else { 0 },
            down: true,
        }
    }
}

impl<'a, T: BoxTreeElement> Iterator for NodesIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.node_index < 0 {
            return None;
        }

        let current = NodeRef::new(self.tree, self.node_index as usize);
        loop {
            if self.down {
                let child = self.tree.first_child(self.node_index);
                if child >= 0 {
                    self.node_index = child;
                    break;
                }
            }

            let sibling = self.tree.next_sibling(self.node_index);
            if sibling >= 0 {
                self.node_index = sibling;
                self.down = true;
                break;
            }

            self.node_index = self.tree.nodes[self.node_index as usize].parent;
            self.down = false;
            if self.node_index < 0 {
                break;
            }
        }

        Some(current)
    }
}
