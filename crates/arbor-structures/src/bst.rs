//! Plain (unbalanced) binary search tree.

use arbor_layout::{EdgeId, Layout, Value};
use arbor_scene::{EventSink, HighlightReason, NullSink};
use tracing::debug;

use crate::toasts;
use crate::tree::{Descent, LinkedTree, NodeRef, Side};

/// Binary search tree without duplicates.
#[derive(Debug, Clone, Default)]
pub struct BinarySearchTree {
    tree: LinkedTree,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order, without narration.
    pub fn from_values(values: &[Value]) -> Self {
        let mut bst = Self::new();
        for &value in values {
            bst.insert(value, &mut NullSink);
        }
        bst
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

    /// Look for `value`. Read-only.
    pub fn search(&self, value: Value, sink: &mut dyn EventSink) -> bool {
        match self.tree.descend(value, sink) {
            Descent::Found(node) => {
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

    /// Insert `value` as a new leaf. Duplicates leave the tree untouched.
    pub fn insert(&mut self, value: Value, sink: &mut dyn EventSink) -> bool {
        match self.tree.descend(value, sink) {
            Descent::Found(_) => {
                sink.toast(toasts::duplicate(value));
                self.tree.update_layout(sink, true);
                false
            }
            Descent::Vacant { parent, side } => {
                let node = self.tree.alloc(value);
                self.tree.attach(node, parent, side);
                debug!(value, id = %self.tree.id(node), "bst insert");
                self.tree.update_layout(sink, true);
                true
            }
        }
    }

    /// Remove `value`.
    ///
    /// A node with two children is replaced by its in-order successor: the
    /// successor node itself moves into the vacated position, so the slot
    /// keeps showing one id throughout the animation.
    pub fn delete(&mut self, value: Value, sink: &mut dyn EventSink) -> bool {
        let target = match self.tree.descend(value, sink) {
            Descent::Found(node) => node,
            Descent::Vacant { .. } => {
                sink.unvisit();
                sink.toast(toasts::not_found(value));
                return false;
            }
        };
        let target_id = self.tree.id(target);
        sink.highlight_node(target_id, HighlightReason::Deletion);

        let parent = self.tree.parent(target);
        let side = self.tree.side_of(target).unwrap_or(Side::Left);
        let mut removed = Vec::new();
        if let Some(p) = parent {
            removed.push(self.tree.unlink(target, p));
        }

        match (self.tree.left(target), self.tree.right(target)) {
            (None, None) => {
                if parent.is_none() {
                    self.tree.set_root(None);
                }
            }
            (Some(child), None) | (None, Some(child)) => {
                removed.push(self.tree.unlink(child, target));
                self.tree.attach(child, parent, side);
            }
            (Some(left), Some(right)) => {
                self.splice_successor(target, left, right, parent, side, sink, &mut removed);
            }
        }

        debug!(value, id = %target_id, removed = removed.len(), "bst delete");
        sink.hide_edges(&removed);
        sink.hide_node(target_id);
        self.tree.release(target);
        self.tree.update_layout(sink, true);
        sink.toast(toasts::deleted(value));
        true
    }

    /// Replace `target` (already detached from `parent`) by its in-order
    /// successor, collecting every edge that disappears.
    #[allow(clippy::too_many_arguments)]
    fn splice_successor(
        &mut self,
        target: NodeRef,
        left: NodeRef,
        right: NodeRef,
        parent: Option<NodeRef>,
        side: Side,
        sink: &mut dyn EventSink,
        removed: &mut Vec<EdgeId>,
    ) {
        let successor = self.tree.extreme(right, Side::Left, sink);
        sink.highlight_node(self.tree.id(successor), HighlightReason::Successor);

        let successor_parent = self.tree.parent(successor);
        removed.push(self.tree.unlink(left, target));
        removed.push(self.tree.unlink(right, target));

        if successor != right {
            let sp = match successor_parent {
                Some(sp) => sp,
                None => panic!("successor below the right child has no parent"),
            };
            removed.push(self.tree.unlink(successor, sp));
            if let Some(orphan) = self.tree.right(successor) {
                removed.push(self.tree.unlink(orphan, successor));
                self.tree.link(orphan, sp, Side::Left);
            }
            self.tree.link(right, successor, Side::Right);
        }
        self.tree.link(left, successor, Side::Left);
        self.tree.attach(successor, parent, side);
    }
}
