use num_traits::{Float, Zero};

use crate::error::{BoxTreeError, Result};
use crate::geometry::Aabb;
use crate::tree::node::NONE;
use crate::tree::{BoxTree, BoxTreeElement, ScalarOf, SpatialKey, VectorOf};

/// Iterator over the elements whose key overlaps a query box.
///
/// Yields `(element_index, &element)` pairs. Created by
/// [`BoxTree::range_query`].
#[derive(Debug)]
pub struct RangeQuery<'a, T: BoxTreeElement> {
    tree: &'a BoxTree<T>,
    range: Aabb<VectorOf<T>>,
    node_index: i32,
    element_index: i32,
    down: bool,
}

impl<T: BoxTreeElement> Clone for RangeQuery<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            range: self.range,
            node_index: self.node_index,
            element_index: self.element_index,
            down: self.down,
        }
    }
}

impl<'a, T: BoxTreeElement> RangeQuery<'a, T> {
    pub(crate) fn new(tree: &'a BoxTree<T>, range: Aabb<VectorOf<T>>) -> Self {
        let node_index = match tree.nodes.first() {
            Some(root) if range.overlaps(&root.bbox) => 0,
            _ => NONE,
        };
        let element_index = if node_index >= 0 {
            tree.nodes[0].elements_begin
        } else {
            NONE
        };

        Self {
            tree,
            range,
            node_index,
            element_index,
            down: true,
        }
    }
}

impl<'a, T: BoxTreeElement> Iterator for RangeQuery<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.node_index >= 0 {
            // Scan the elements held by the current node. Box keys parked in
            // a middle bucket live on inner nodes, so this is not leaf-only.
            let elements_end = self.tree.nodes[self.node_index as usize].elements_end;
            while self.element_index < elements_end {
                let index = self.element_index as usize;
                self.element_index += 1;
                let element = &self.tree.elements[index];
                if element.spatial_key().overlaps(&self.range) {
                    return Some((index, element));
                }
            }

            // Move to the next node overlapping the query: descend first,
            // then sideways, then back up.
            loop {
                if self.down {
                    let child = self.tree.first_child_overlap(self.node_index, &self.range);
                    if child >= 0 {
                        self.node_index = child;
                        break;
                    }
                }

                let sibling = self.tree.next_sibling_overlap(self.node_index, &self.range);
                if sibling >= 0 {
                    self.node_index = sibling;
                    self.down = true;
                    break;
                }

                self.node_index = self.tree.nodes[self.node_index as usize].parent;
                self.down = false;
                if self.node_index < 0 {
                    return None;
                }
            }

            self.element_index = self.tree.nodes[self.node_index as usize].elements_begin;
        }

        None
    }
}

impl<T: BoxTreeElement> BoxTree<T> {
    /// Return up to `max_results` elements closest to `target`, as
    /// `(element_index, squared_distance)` pairs sorted by ascending
    /// distance. With a `max_distance` limit, only elements within that
    /// distance are returned.
    ///
    /// At least one of the two bounds must be given; `max_results` caps the
    /// list length, `max_distance` caps the (unsquared) distance.
    ///
    /// ## Errors
    ///
    /// - `InvalidQueryBounds` when both bounds are `None`.
    /// - `InvalidArgument` for a zero result count or a non-positive
    ///   distance limit.
    pub fn nearest_query(
        &self,
        target: &VectorOf<T>,
        max_results: Option<usize>,
        max_distance: Option<ScalarOf<T>>,
    ) -> Result<Vec<(usize, ScalarOf<T>)>> {
        if max_results.is_none() && max_distance.is_none() {
            return Err(BoxTreeError::InvalidQueryBounds);
        }

        if max_results == Some(0) {
            return Err(BoxTreeError::InvalidArgument(
                "max_results must be positive".to_string(),
            ));
        }

        if let Some(limit) = max_distance {
            if limit <= ScalarOf::<T>::zero() {
                return Err(BoxTreeError::InvalidArgument(
                    "max_distance must be positive".to_string(),
                ));
            }
        }

        let mut results: Vec<(usize, ScalarOf<T>)> = Vec::new();
        if let Some(count) = max_results {
            results.reserve(count);
        }

        let mut worst_distance_sq =
            max_distance.map_or(ScalarOf::<T>::max_value(), |limit| limit * limit);

        let mut node_index = if self.nodes.is_empty() { NONE } else { 0 };
        let mut down = true;

        while node_index >= 0 {
            let node = &self.nodes[node_index as usize];
            let elements_end = node.elements_end;
            let mut element_index = node.elements_begin;
            while element_index < elements_end {
                let index = element_index as usize;
                element_index += 1;
                let distance_sq = self.elements[index].spatial_key().distance_squared_to(target);
                if distance_sq <= worst_distance_sq {
                    if max_results.is_some_and(|count| results.len() == count) {
                        results.pop();
                    }

                    let position = results.partition_point(|entry| entry.1 < distance_sq);
                    results.insert(position, (index, distance_sq));
                    if max_results.is_some_and(|count| results.len() == count) {
                        worst_distance_sq = results.last().unwrap().1;
                    }
                }
            }

            loop {
                if down {
                    let child = self.first_child_near(node_index, target, worst_distance_sq);
                    if child >= 0 {
                        node_index = child;
                        break;
                    }
                }

                let sibling = self.next_sibling_near(node_index, target, worst_distance_sq);
                if sibling >= 0 {
                    node_index = sibling;
                    down = true;
                    break;
                }

                node_index = self.nodes[node_index as usize].parent;
                if node_index < 0 {
                    break;
                }

                down = false;
            }
        }

        Ok(results)
    }
}
