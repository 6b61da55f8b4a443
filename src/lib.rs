//! # rbkeys
//!
//! An insert-only ordered set of byte-string keys, stored in a red-black tree.
//!
//! Keys are arbitrary byte sequences (the empty key and embedded zero bytes
//! included) ordered by [`compare`]: unsigned byte-wise, with a strict prefix
//! sorting first. Every insertion copies the key, attaches it as a red leaf and
//! rebalances, so the tree height stays within `2·log2(n + 1)`.
//!
//! ## Example
//!
//! ```rust
//! use rbkeys::RbTree;
//!
//! let mut tree = RbTree::new();
//! for key in ["d", "b", "a", "c", "e"] {
//!     assert!(tree.insert(key));
//! }
//! assert!(!tree.insert("c"));
//!
//! let keys: Vec<&[u8]> = tree.iter().collect();
//! assert_eq!(keys, [b"a", b"b", b"c", b"d", b"e"]);
//! assert_eq!(tree.size(), 5);
//! tree.validate().unwrap();
//! ```
//!
//! Nodes live in an arena and link to each other by index, parent links
//! included. There is no removal: the arena only grows, and dropping the tree
//! releases everything at once.

#![forbid(unsafe_code)]

mod compare;
mod error;
mod insert;
mod node;
mod render;
mod validate;

pub use compare::compare;
pub use error::{InvariantViolation, Result};
pub use render::TreeDump;

use std::iter::FusedIterator;

use node::{NodeArena, NodeId};

/// Ordered set of byte keys backed by a red-black tree.
#[derive(Clone)]
pub struct RbTree {
    nodes: NodeArena,
    root: NodeId,
}

impl RbTree {
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::default(),
            root: NodeId::NULL,
        }
    }

    /// Create an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: NodeId::NULL,
        }
    }

    /// Number of stored keys. Every allocated node holds one live key.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_null()
    }

    /// Count the nodes reachable from the root. O(n).
    ///
    /// Equal to [`len`](Self::len) on any tree that passes
    /// [`validate`](Self::validate).
    pub fn size(&self) -> usize {
        let mut stack = Vec::new();
        if !self.root.is_null() {
            stack.push(self.root);
        }

        let mut count = 0usize;
        while let Some(id) = stack.pop() {
            count += 1;
            let node = &self.nodes[id];
            for child in [node.left, node.right] {
                if !child.is_null() {
                    stack.push(child);
                }
            }
        }
        count
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut stack = Vec::new();
        if !self.root.is_null() {
            stack.push((self.root, 1usize));
        }

        let mut height = 0usize;
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right] {
                if !child.is_null() {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// Approximate heap bytes held by the tree.
    pub fn memory_usage(&self) -> usize {
        self.nodes.memory_usage()
    }

    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Iterate over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }
}

impl Default for RbTree {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<[u8]>> Extend<K> for RbTree {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: AsRef<[u8]>> FromIterator<K> for RbTree {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a RbTree {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// In-order iterator over the keys of an [`RbTree`].
pub struct Iter<'a> {
    tree: &'a RbTree,
    /// Nodes whose left subtree has been queued but which are not yet yielded.
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while !id.is_null() {
            self.stack.push(id);
            id = self.tree.nodes[id].left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];
        self.push_left_spine(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}


#[cfg(test)]
mod proptests;
