//! Structural invariant checks.
//!
//! These walk the whole tree and are meant for tests and debugging, not for
//! the insertion path.

use std::cmp::Ordering;

use crate::compare::compare;
use crate::error::{InvariantViolation, Result};
use crate::node::NodeId;
use crate::render::escape;
use crate::RbTree;

impl RbTree {
    /// Check every red-black and search-tree invariant.
    ///
    /// Verifies that the root is black, that keys are strictly ordered and
    /// parent links are consistent, that no red node has a red child, that
    /// black heights agree everywhere, and that every allocated node is
    /// reachable from the root. O(n).
    pub fn validate(&self) -> Result<()> {
        if self.root.is_null() {
            if !self.nodes.is_empty() {
                return Err(InvariantViolation::Unreachable {
                    reachable: 0,
                    allocated: self.nodes.len(),
                });
            }
            return Ok(());
        }

        let root = &self.nodes[self.root];
        if root.color.is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        if !root.parent.is_null() {
            return Err(InvariantViolation::RootHasParent);
        }

        let reachable = self.validate_ordering()?;
        self.validate_colors(self.root)?;

        if reachable != self.nodes.len() {
            return Err(InvariantViolation::Unreachable {
                reachable,
                allocated: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Check that every key lies strictly between the bounds set by its
    /// ancestors and that every child links back to its parent.
    ///
    /// Returns the number of nodes visited. Uses an explicit stack, so a
    /// corrupted, badly unbalanced tree cannot overflow the call stack.
    pub(crate) fn validate_ordering(&self) -> Result<usize> {
        let mut stack: Vec<(NodeId, Option<&[u8]>, Option<&[u8]>)> = Vec::new();
        if !self.root.is_null() {
            stack.push((self.root, None, None));
        }

        let mut visited = 0usize;
        while let Some((id, lower, upper)) = stack.pop() {
            visited += 1;
            let node = &self.nodes[id];
            let key: &[u8] = &node.key;

            let above_lower = lower.map_or(true, |lo| compare(lo, key) == Ordering::Less);
            let below_upper = upper.map_or(true, |hi| compare(key, hi) == Ordering::Less);
            if !above_lower || !below_upper {
                return Err(InvariantViolation::OutOfOrder { key: escape(key) });
            }

            for (child, lo, hi) in [(node.left, lower, Some(key)), (node.right, Some(key), upper)] {
                if child.is_null() {
                    continue;
                }
                if self.nodes[child].parent != id {
                    return Err(InvariantViolation::BrokenParentLink {
                        parent: escape(key),
                        child: escape(&self.nodes[child].key),
                    });
                }
                stack.push((child, lo, hi));
            }
        }
        Ok(visited)
    }

    /// Check the coloring rules below `id` and return its black height
    /// (black nodes on any path down to a leaf, counting `id` itself).
    ///
    /// Recursion depth is the tree height, which the ordering pass has
    /// already shown to be finite.
    pub(crate) fn validate_colors(&self, id: NodeId) -> Result<usize> {
        if id.is_null() {
            return Ok(0);
        }

        let node = &self.nodes[id];
        if node.color.is_red() && (self.nodes.is_red(node.left) || self.nodes.is_red(node.right)) {
            return Err(InvariantViolation::RedRed {
                key: escape(&node.key),
            });
        }

        let left = self.validate_colors(node.left)?;
        let right = self.validate_colors(node.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                key: escape(&node.key),
                left,
                right,
            });
        }
        Ok(left + usize::from(node.color.is_black()))
    }
}
