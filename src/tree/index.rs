use crate::error::{BoxTreeError, Result};
use crate::geometry::Aabb;
use crate::tree::node::Node;
use crate::tree::query::RangeQuery;
use crate::tree::traversal::{NodeRef, NodesIter};
use crate::tree::{BoxTreeElement, VectorOf};

/// Default maximum element count per node in [`BoxTree::new`].
pub const DEFAULT_NODE_SIZE: u16 = 64;

/// A static spatial index over point or box keys.
///
/// The tree owns its elements: construction takes the element vector,
/// permutes it in place and builds a node arena over contiguous runs of it.
/// Query results carry indices into [`elements`][Self::elements], which is
/// stable once the tree is built.
#[derive(Debug)]
pub struct BoxTree<T: BoxTreeElement> {
    pub(crate) elements: Vec<T>,
    pub(crate) nodes: Vec<Node<VectorOf<T>>>,
    pub(crate) node_size: u16,
}

impl<T: BoxTreeElement> BoxTree<T> {
    /// Build a tree with the default node size.
    pub fn new(elements: Vec<T>) -> Result<Self> {
        Self::with_node_size(elements, DEFAULT_NODE_SIZE)
    }

    /// Build a tree holding at most `node_size` elements per node.
    ///
    /// ## Errors
    ///
    /// - `InvalidArgument` if `node_size` is zero.
    /// - `AllocationFailed` if the node arena cannot be allocated.
    pub fn with_node_size(elements: Vec<T>, node_size: u16) -> Result<Self> {
        if node_size == 0 {
            return Err(BoxTreeError::InvalidArgument(
                "node size must be positive".to_string(),
            ));
        }

        let mut tree = Self {
            elements,
            nodes: Vec::new(),
            node_size,
        };
        tree.build()?;
        Ok(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The total number of elements contained in this tree.
    pub fn num_items(&self) -> usize {
        self.elements.len()
    }

    /// The total number of nodes in the arena; zero for an empty tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The maximum number of elements a node may hold.
    pub fn node_size(&self) -> u16 {
        self.node_size
    }

    /// The elements, permuted by construction. Indices returned by queries
    /// point into this slice.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// The root node, unless the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        (!self.nodes.is_empty()).then(|| NodeRef::new(self, 0))
    }

    /// Walk every node depth-first, parents before children.
    pub fn iter_nodes(&self) -> NodesIter<'_, T> {
        NodesIter::new(self)
    }

    /// Produce every element whose key overlaps `range`.
    ///
    /// The iterator yields `(element_index, &element)` pairs in an
    /// unspecified but deterministic order. Several query iterators over the
    /// same tree may coexist.
    pub fn range_query(&self, range: &Aabb<VectorOf<T>>) -> RangeQuery<'_, T> {
        debug_assert!(!range.is_empty(), "range query box must not be empty");
        RangeQuery::new(self, *range)
    }
}
