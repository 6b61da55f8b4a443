use thiserror::Error as ThisError;

pub type Result<T, E = InvariantViolation> = std::result::Result<T, E>;

/// A broken structural invariant, reported by [`RbTree::validate`].
///
/// Any of these means the tree can no longer be trusted. Keys are rendered
/// with non-printable bytes escaped.
///
/// [`RbTree::validate`]: crate::RbTree::validate
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,

    #[error("root node has a parent link")]
    RootHasParent,

    #[error("key \"{key}\" lies outside the range set by its ancestors")]
    OutOfOrder { key: String },

    #[error("child \"{child}\" does not link back to parent \"{parent}\"")]
    BrokenParentLink { parent: String, child: String },

    #[error("red node \"{key}\" has a red child")]
    RedRed { key: String },

    #[error("black height differs under \"{key}\": left {left}, right {right}")]
    BlackHeightMismatch {
        key: String,
        left: usize,
        right: usize,
    },

    #[error("{allocated} nodes allocated but only {reachable} reachable from the root")]
    Unreachable { reachable: usize, allocated: usize },
}
