use num_traits::{One, Zero};
use tinyvec::TinyVec;

use crate::error::Result;
use crate::geometry::{Aabb, Vector};
use crate::tree::node::{Node, NONE};
use crate::tree::{BoxTree, BoxTreeElement, KeyOf, ScalarOf, SpatialKey, VectorOf};

impl<T: BoxTreeElement> BoxTree<T> {
    /// Build the node arena over the freshly taken element buffer.
    pub(crate) fn build(&mut self) -> Result<()> {
        debug_assert!(self.nodes.is_empty());
        debug_assert!(
            !KeyOf::<T>::IS_BOX || VectorOf::<T>::DIM <= 32,
            "locked-axes mask holds at most 32 dimensions"
        );
        if self.elements.is_empty() {
            return Ok(());
        }

        self.nodes
            .try_reserve((self.elements.len() / self.node_size as usize / 2).max(4))?;

        let mut bbox = Aabb::empty();
        for element in &self.elements {
            bbox.expand_box(&element.spatial_key().bbox());
        }

        self.nodes
            .push(Node::new(NONE, 0, self.elements.len() as i32, bbox));

        let mut queue: TinyVec<[i32; 16]> = TinyVec::new();
        queue.push(0);
        while let Some(node_index) = queue.pop() {
            self.split_node(node_index as usize)?;
            let node = &self.nodes[node_index as usize];
            if node.low_child >= 0 {
                queue.push(node.low_child);
            }

            if KeyOf::<T>::IS_BOX && node.middle_child >= 0 {
                queue.push(node.middle_child);
            }

            if node.high_child >= 0 {
                queue.push(node.high_child);
            }
        }

        Ok(())
    }

    fn split_node(&mut self, node_index: usize) -> Result<()> {
        let mut node = self.nodes[node_index];
        let count = node.element_count();
        if count <= self.node_size as i32 {
            return Ok(());
        }

        // Pick the largest unlocked extent as the splitting axis.
        let sizes = node.bbox.sizes();
        let mut max_size = ScalarOf::<T>::zero();
        let mut split_axis = usize::MAX;
        for axis in 0..VectorOf::<T>::DIM {
            if sizes.get(axis) > max_size && !node.is_axis_locked(axis) {
                max_size = sizes.get(axis);
                split_axis = axis;
            }
        }

        // All axes locked or the node has zero extent; stays a leaf.
        if split_axis == usize::MAX {
            return Ok(());
        }

        let two = ScalarOf::<T>::one() + ScalarOf::<T>::one();
        let split_position = node.bbox.min().get(split_axis) + max_size / two;

        let begin = node.elements_begin;
        let end = node.elements_end;
        let (low_count, high_count) = if KeyOf::<T>::IS_BOX {
            self.partition_boxes(begin, end, split_axis, split_position)
        } else {
            let low_count = self.partition_points(begin, end, split_axis, split_position);
            (low_count, count - low_count)
        };

        // Splitting boxes is only worth it when at least a quarter of the
        // elements separate cleanly; otherwise the middle bucket dominates.
        if KeyOf::<T>::IS_BOX && low_count + high_count < (count + 3) / 4 {
            return Ok(());
        }

        self.nodes.try_reserve(3)?;

        node.split_axis = split_axis as i8;
        node.split_position = split_position;

        if low_count > 0 {
            let mut bbox = node.bbox;
            self.tighten_high(&mut bbox, begin, low_count, split_axis);
            node.low_child = self.nodes.len() as i32;
            self.nodes.push(Node::new(
                node_index as i32,
                begin,
                begin + low_count,
                bbox,
            ));
        }

        if high_count > 0 {
            let mut bbox = node.bbox;
            self.tighten_low(&mut bbox, end - high_count, high_count, split_axis);
            node.high_child = self.nodes.len() as i32;
            self.nodes
                .push(Node::new(node_index as i32, end - high_count, end, bbox));
        }

        if KeyOf::<T>::IS_BOX {
            let middle_count = count - low_count - high_count;
            if middle_count > 0 && middle_count <= self.node_size as i32 {
                // Small middle bucket: keep it attached to this node instead
                // of spending another node on it.
                node.elements_begin = begin + low_count;
                node.elements_end = end - high_count;
            } else {
                if middle_count > 0 {
                    let mut bbox = node.bbox;
                    self.tighten_low(&mut bbox, begin + low_count, middle_count, split_axis);
                    self.tighten_high(&mut bbox, begin + low_count, middle_count, split_axis);
                    node.middle_child = self.nodes.len() as i32;
                    let mut middle = Node::new(
                        node_index as i32,
                        begin + low_count,
                        end - high_count,
                        bbox,
                    );
                    middle.locked_axes = node.locked_axes | (1 << split_axis);
                    self.nodes.push(middle);
                }

                node.elements_begin = NONE;
                node.elements_end = NONE;
            }
        } else {
            node.elements_begin = NONE;
            node.elements_end = NONE;
        }

        self.nodes[node_index] = node;
        Ok(())
    }

    /// Two-way partition of `[begin, end)` along `axis`. Elements with
    /// `key[axis] < split` end up in the low run; a key exactly on the split
    /// goes high. Returns the low run length.
    fn partition_points(&mut self, begin: i32, end: i32, axis: usize, split: ScalarOf<T>) -> i32 {
        let mut current_low = begin as isize;
        let mut current_high = end as isize - 1;

        loop {
            while current_low <= current_high {
                let key = self.elements[current_low as usize].spatial_key();
                if key.low_bound(axis) >= split {
                    break;
                }

                current_low += 1;
            }

            while current_low <= current_high {
                let key = self.elements[current_high as usize].spatial_key();
                if key.low_bound(axis) < split {
                    break;
                }

                current_high -= 1;
            }

            if current_low <= current_high {
                self.elements
                    .swap(current_low as usize, current_high as usize);
                current_low += 1;
                current_high -= 1;
            } else {
                break;
            }
        }

        current_low as i32 - begin
    }

    /// Three-way partition of `[begin, end)` along `axis` into Low (entirely
    /// below the split), Middle (straddling) and High (on or above) runs,
    /// using four cursors: `[begin, low_end)` is the grown low run,
    /// `(high_end, end)` the grown high run, and the scans close in on the
    /// middle band between them. Returns `(low_count, high_count)`.
    fn partition_boxes(
        &mut self,
        begin: i32,
        end: i32,
        axis: usize,
        split: ScalarOf<T>,
    ) -> (i32, i32) {
        let begin = begin as isize;
        let end = end as isize;
        let mut current_low = begin;
        let mut low_end = begin;
        let mut current_high = end - 1;
        let mut high_end = end - 1;

        loop {
            while current_low <= current_high {
                let key = self.elements[current_low as usize].spatial_key();
                if key.low_bound(axis) >= split {
                    break;
                }

                if key.high_bound(axis) < split {
                    if low_end < current_low {
                        self.elements.swap(low_end as usize, current_low as usize);
                    }

                    low_end += 1;
                }

                current_low += 1;
            }

            // Either the element at current_low is High, or the cursors crossed.
            while current_low < current_high {
                let key = self.elements[current_high as usize].spatial_key();
                if key.high_bound(axis) < split {
                    break;
                }

                if key.low_bound(axis) >= split {
                    if current_high < high_end {
                        self.elements
                            .swap(current_high as usize, high_end as usize);
                    }

                    high_end -= 1;
                }

                current_high -= 1;
            }

            if current_low < current_high {
                // current_low holds a High element and current_high a Low one;
                // rotate them through the middle bands on either side.
                if low_end < current_low {
                    if current_high < high_end {
                        self.elements.swap(low_end as usize, current_high as usize);
                        self.elements.swap(current_low as usize, high_end as usize);
                    } else {
                        self.elements.swap(low_end as usize, current_low as usize);
                        self.elements.swap(low_end as usize, high_end as usize);
                    }
                } else if current_high < high_end {
                    self.elements
                        .swap(current_high as usize, high_end as usize);
                    self.elements.swap(low_end as usize, high_end as usize);
                } else {
                    self.elements
                        .swap(current_low as usize, current_high as usize);
                }

                low_end += 1;
                current_low += 1;
                high_end -= 1;
                current_high -= 1;
            } else {
                if current_low == current_high {
                    // One High element left over; move it past the middle band.
                    if current_high < high_end {
                        self.elements.swap(current_low as usize, high_end as usize);
                    }

                    high_end -= 1;
                }

                break;
            }
        }

        (
            (low_end - begin) as i32,
            (end - 1 - high_end) as i32,
        )
    }

    /// Pull the low edge of `bbox` along `axis` up to the smallest low bound
    /// of the given element run.
    fn tighten_low(&self, bbox: &mut Aabb<VectorOf<T>>, start: i32, count: i32, axis: usize) {
        let mut limit = bbox.max().get(axis);
        for index in start..start + count {
            let bound = self.elements[index as usize].spatial_key().low_bound(axis);
            if bound < limit {
                limit = bound;
            }
        }

        let mut min = bbox.min();
        min.set(axis, limit);
        *bbox = Aabb::new(min, bbox.max());
    }

    /// Pull the high edge of `bbox` along `axis` down to the largest high
    /// bound of the given element run.
    fn tighten_high(&self, bbox: &mut Aabb<VectorOf<T>>, start: i32, count: i32, axis: usize) {
        let mut limit = bbox.min().get(axis);
        for index in start..start + count {
            let bound = self.elements[index as usize].spatial_key().high_bound(axis);
            if bound > limit {
                limit = bound;
            }
        }

        let mut max = bbox.max();
        max.set(axis, limit);
        *bbox = Aabb::new(bbox.min(), max);
    }
}
