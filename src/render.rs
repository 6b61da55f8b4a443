//! Human-readable output.

use std::fmt;

use crate::node::NodeId;
use crate::RbTree;

/// Longest key prefix shown per node in a dump.
const DUMP_KEY_LIMIT: usize = 128;

/// Formats a key with non-printable bytes escaped (`\n`, `\x80`, ...).
pub(crate) struct Escaped<'a>(pub(crate) &'a [u8]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

pub(crate) fn escape(key: &[u8]) -> String {
    Escaped(key).to_string()
}

/// Indented pre-order rendering of a tree, one node per line.
///
/// Each line reads `COLOR [N bytes]: text`, indented by two spaces per level.
/// At most 128 key bytes are shown; bytes outside printable ASCII appear as
/// `?` and a single trailing NUL is dropped.
pub struct TreeDump<'a> {
    tree: &'a RbTree,
}

impl RbTree {
    /// Render the tree shape. See [`TreeDump`].
    pub fn dump(&self) -> TreeDump<'_> {
        TreeDump { tree: self }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = &self.tree.nodes;
        if self.tree.root.is_null() {
            return writeln!(f, "(empty)");
        }

        let mut stack: Vec<(NodeId, usize)> = vec![(self.tree.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            let node = &nodes[id];
            let color = if node.color.is_red() { "RED" } else { "BLACK" };
            write!(f, "{:indent$}{} [{} bytes]: ", "", color, node.key.len(), indent = depth * 2)?;

            let shown = &node.key[..node.key.len().min(DUMP_KEY_LIMIT)];
            let shown = match shown.split_last() {
                Some((&0, rest)) if shown.len() == node.key.len() => rest,
                _ => shown,
            };
            for &b in shown {
                let c = if b == b' ' || b.is_ascii_graphic() { b as char } else { '?' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;

            if !node.right.is_null() {
                stack.push((node.right, depth + 1));
            }
            if !node.left.is_null() {
                stack.push((node.left, depth + 1));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for RbTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Escaped)).finish()
    }
}
