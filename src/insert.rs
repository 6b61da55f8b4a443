//! Insertion and rebalancing.

use std::cmp::Ordering;

use log::trace;

use crate::compare::compare;
use crate::node::{Color, NodeId, Side};
use crate::render::Escaped;
use crate::RbTree;

impl RbTree {
    /// Insert a copy of `key`.
    ///
    /// Returns `false` and leaves the tree untouched if an equal key is
    /// already present.
    pub fn insert(&mut self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();

        if self.root.is_null() {
            self.root = self.nodes.alloc(key, Color::Black, NodeId::NULL);
            trace!("insert {}: new black root", Escaped(key));
            return true;
        }

        let mut cur = self.root;
        let (parent, side) = loop {
            let node = &self.nodes[cur];
            let side = match compare(key, &node.key) {
                Ordering::Equal => {
                    trace!("insert {}: already present", Escaped(key));
                    return false;
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            let next = node.child(side);
            if next.is_null() {
                break (cur, side);
            }
            cur = next;
        };

        let n = self.nodes.alloc(key, Color::Red, parent);
        self.nodes[parent].set_child(side, n);
        trace!("insert {}: attached as {:?} child of {:?}", Escaped(key), side, parent);

        self.root = self.insert_fixup(self.root, n);
        true
    }

    /// Restore the red-black invariants after attaching the red node `n`.
    ///
    /// Returns the root after any rotations.
    fn insert_fixup(&mut self, mut root: NodeId, mut n: NodeId) -> NodeId {
        loop {
            // Case 1: n is the root.
            let mut parent = self.nodes[n].parent;
            if parent.is_null() {
                trace!("case 1 for {:?}", n);
                self.nodes[n].color = Color::Black;
                return root;
            }

            // Case 2: black parent, nothing violated.
            if self.nodes[parent].color.is_black() {
                trace!("case 2 for {:?}", n);
                return root;
            }

            // A red parent is never the root, so the grandparent exists.
            let g = self.nodes[parent].parent;
            debug_assert!(!g.is_null(), "red node {parent:?} without a parent");
            let parent_side = self.nodes.side_of(parent, g);
            let uncle = self.nodes[g].child(parent_side.opposite());

            // Case 3: red uncle. Push the red up to g and retry from there.
            if self.nodes.is_red(uncle) {
                trace!("case 3 for {:?}", n);
                self.nodes[parent].color = Color::Black;
                self.nodes[uncle].color = Color::Black;
                self.nodes[g].color = Color::Red;
                n = g;
                continue;
            }

            // Case 4: n is the inner grandchild. Straighten the bend so the
            // former parent becomes the outer grandchild.
            if self.nodes.side_of(n, parent) != parent_side {
                trace!("case 4 for {:?}", n);
                match parent_side {
                    Side::Left => self.rotate_left(parent),
                    Side::Right => self.rotate_right(parent),
                };
                std::mem::swap(&mut n, &mut parent);
            }

            // Case 5: n, parent and g on a straight line.
            trace!("case 5 for {:?}", n);
            self.nodes[parent].color = Color::Black;
            self.nodes[g].color = Color::Red;
            let promoted = match parent_side {
                Side::Left => self.rotate_right(g),
                Side::Right => self.rotate_left(g),
            };
            if g == root {
                root = promoted;
            }
            return root;
        }
    }

    /// Rotate around `g` so that `g` moves down into its `down` slot and its
    /// child on the other side takes its place.
    ///
    /// Returns the promoted node. If `g` was the root, the promoted node has
    /// no parent afterwards and the caller must adopt it as the new root.
    /// Colors are left untouched.
    fn rotate(&mut self, g: NodeId, down: Side) -> NodeId {
        let up = down.opposite();
        let promoted = self.nodes[g].child(up);
        debug_assert!(!promoted.is_null(), "rotation of {g:?} without a {up:?} child");
        let inner = self.nodes[promoted].child(down);
        let old_parent = self.nodes[g].parent;
        let old_side = (!old_parent.is_null()).then(|| self.nodes.side_of(g, old_parent));

        self.nodes[g].set_child(up, inner);
        if !inner.is_null() {
            self.nodes[inner].parent = g;
        }

        self.nodes[promoted].set_child(down, g);
        self.nodes[g].parent = promoted;

        self.nodes[promoted].parent = old_parent;
        if let Some(side) = old_side {
            self.nodes[old_parent].set_child(side, promoted);
        }

        promoted
    }

    #[inline]
    pub(crate) fn rotate_left(&mut self, g: NodeId) -> NodeId {
        trace!("rotate_left for {:?}", g);
        self.rotate(g, Side::Left)
    }

    #[inline]
    pub(crate) fn rotate_right(&mut self, g: NodeId) -> NodeId {
        trace!("rotate_right for {:?}", g);
        self.rotate(g, Side::Right)
    }
}
