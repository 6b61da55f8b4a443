//! Node storage.
//!
//! Nodes live in a single `Vec` and refer to each other by 32-bit index.
//! Child links own their targets in the logical sense (nothing else points
//! down), parent links are plain lookups used while walking back up during
//! fixup. Nothing is ever freed individually; dropping the arena drops every
//! node at once.

use std::ops::{Index, IndexMut};

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Red node.
    Red,
    /// Black node. Absent children count as black.
    Black,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Arena index. `NodeId::NULL` marks an absent child or parent.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const NULL: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self == Self::NULL
    }

    #[inline]
    fn index(self) -> usize {
        debug_assert!(!self.is_null(), "dereferenced NULL node id");
        self.0 as usize
    }
}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            f.write_str("NULL")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Copy of the inserted key. Never changes after allocation.
    pub(crate) key: Box<[u8]>,
    pub(crate) color: Color,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
}

impl Node {
    #[inline]
    pub(crate) fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: NodeId) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node holding a copy of `key`.
    ///
    /// # Panics
    /// Panics once the arena holds `u32::MAX` nodes; the last index is
    /// reserved for `NodeId::NULL`.
    pub(crate) fn alloc(&mut self, key: &[u8], color: Color, parent: NodeId) -> NodeId {
        let idx = self.nodes.len();
        assert!(idx < u32::MAX as usize, "node arena exhausted");
        self.nodes.push(Node {
            key: key.into(),
            color,
            left: NodeId::NULL,
            right: NodeId::NULL,
            parent,
        });
        NodeId(idx as u32)
    }

    /// Color of `id`, treating `NULL` as a black leaf.
    #[inline]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        if id.is_null() {
            Color::Black
        } else {
            self[id].color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id).is_red()
    }

    /// Slot of `parent` that holds `child`.
    #[inline]
    pub(crate) fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        let p = &self[parent];
        if p.left == child {
            Side::Left
        } else {
            debug_assert_eq!(p.right, child, "{child:?} is not a child of {parent:?}");
            Side::Right
        }
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.nodes.iter().map(|n| n.key.len()).sum::<usize>()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
