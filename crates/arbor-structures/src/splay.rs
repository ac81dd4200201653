//! Splay tree: a BST that rotates every touched node to the root.
//!
//! Rotation chains, with `x` the node being splayed, `p` its parent and `g`
//! its grandparent:
//!
//! ```text
//! zig        p is the root                   rotate p
//! zig-zig    x and p on the same side        rotate g, then p
//! zig-zag    x and p on opposite sides       rotate p, then g
//! ```
//!
//! Each single rotation is followed by its own relayout, so the viewer sees
//! the tree move one rotation at a time.

use arbor_layout::{Layout, Value};
use arbor_scene::{EventSink, HighlightReason, NullSink};
use tracing::{debug, trace};

use crate::toasts;
use crate::tree::{Descent, LinkedTree, NodeRef, Side};

#[derive(Debug, Clone, Default)]
pub struct SplayTree {
    tree: LinkedTree,
}

impl SplayTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order, without narration.
    pub fn from_values(values: &[Value]) -> Self {
        let mut splay = Self::new();
        for &value in values {
            splay.insert(value, &mut NullSink);
        }
        splay
    }

    pub fn tree(&self) -> &LinkedTree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn root_value(&self) -> Option<Value> {
        self.tree.root().map(|r| self.tree.value(r))
    }

    /// Values in ascending order.
    pub fn values(&self) -> Vec<Value> {
        self.tree.in_order()
    }

    pub fn layout(&self) -> Layout {
        self.tree.layout()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Rotate `node` up to the root.
    fn splay(&mut self, node: NodeRef, sink: &mut dyn EventSink) {
        self.splay_below(node, None, sink);
    }

    /// Rotate `node` up until its parent is `top` (the root when `None`).
    fn splay_below(&mut self, node: NodeRef, top: Option<NodeRef>, sink: &mut dyn EventSink) {
        loop {
            let parent = match self.tree.parent(node) {
                Some(p) if Some(p) != top => p,
                _ => break,
            };
            let grandparent = self.tree.parent(parent);
            if grandparent == top {
                trace!(node = %self.tree.id(node), "zig");
                self.rotate_up(node, sink);
            } else if self.tree.side_of(node) == self.tree.side_of(parent) {
                trace!(node = %self.tree.id(node), "zig-zig");
                self.rotate_up(parent, sink);
                self.rotate_up(node, sink);
            } else {
                trace!(node = %self.tree.id(node), "zig-zag");
                self.rotate_up(node, sink);
                self.rotate_up(node, sink);
            }
        }
    }

    fn rotate_up(&mut self, node: NodeRef, sink: &mut dyn EventSink) {
        self.tree.rotate_up(node);
        self.tree.update_layout(sink, true);
    }

    /// Look for `value`; a hit is splayed to the root.
    pub fn search(&mut self, value: Value, sink: &mut dyn EventSink) -> bool {
        match self.tree.descend(value, sink) {
            Descent::Found(node) => {
                self.splay(node, sink);
                sink.highlight_node(self.tree.id(node), HighlightReason::Found);
                sink.toast(toasts::found(value));
                true
            }
            Descent::Vacant { .. } => {
                sink.unvisit();
                sink.toast(toasts::not_found(value));
                false
            }
        }
    }

    /// Insert `value` and splay it to the root.
    ///
    /// The new node is shown as a leaf first, then rotated up. A duplicate
    /// still splays the existing node.
    pub fn insert(&mut self, value: Value, sink: &mut dyn EventSink) -> bool {
        match self.tree.descend(value, sink) {
            Descent::Found(node) => {
                sink.toast(toasts::duplicate(value));
                self.splay(node, sink);
                false
            }
            Descent::Vacant { parent, side } => {
                let node = self.tree.alloc(value);
                self.tree.attach(node, parent, side);
                debug!(value, id = %self.tree.id(node), "splay insert");
                self.tree.update_layout(sink, true);
                self.splay(node, sink);
                true
            }
        }
    }

    /// Remove `value`.
    ///
    /// The target is splayed to the root. The maximum of its left subtree is
    /// then splayed up to be the target's left child; it has no right child at
    /// that point, so it takes the target's right subtree and becomes root.
    pub fn delete(&mut self, value: Value, sink: &mut dyn EventSink) -> bool {
        let target = match self.tree.descend(value, sink) {
            Descent::Found(node) => node,
            Descent::Vacant { .. } => {
                sink.unvisit();
                sink.toast(toasts::not_found(value));
                return false;
            }
        };

        self.splay(target, sink);
        let target_id = self.tree.id(target);
        sink.highlight_node(target_id, HighlightReason::Deletion);

        let left = self.tree.left(target);
        let right = self.tree.right(target);
        let mut removed = Vec::new();

        let new_root = match left {
            None => {
                if let Some(r) = right {
                    removed.push(self.tree.unlink(r, target));
                }
                right
            }
            Some(l) => {
                let max = self.tree.extreme(l, Side::Right, sink);
                self.splay_below(max, Some(target), sink);
                removed.push(self.tree.unlink(max, target));
                if let Some(r) = right {
                    removed.push(self.tree.unlink(r, target));
                    self.tree.link(r, max, Side::Right);
                }
                Some(max)
            }
        };

        self.tree.set_root(new_root);
        debug!(value, id = %target_id, "splay delete");

        sink.hide_edges(&removed);
        sink.hide_node(target_id);
        self.tree.release(target);
        self.tree.update_layout(sink, true);
        sink.toast(toasts::deleted(value));
        true
    }
}
