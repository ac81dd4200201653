//! Arena-backed linked binary tree shared by the BST and the splay tree.
//!
//! Nodes live in a slot vector and refer to each other by [`NodeRef`]. The
//! `parent` field is a back-reference only; a node belongs to the tree.
//!
//! Every structural change goes through [`LinkedTree::link`] and
//! [`LinkedTree::unlink`], which assert the parent/child invariant: for every
//! linked pair, `child.parent == parent` and `parent.left == child` or
//! `parent.right == child`. A violation is a bug in the algorithm and panics.

use arbor_layout::{tree_layout, EdgeId, Layout, NodeId, Topology, Value};
use arbor_scene::EventSink;
use tracing::trace;

/// Handle to a live node of a [`LinkedTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

/// Which child slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
struct TreeNode {
    id: NodeId,
    value: Value,
    parent: Option<NodeRef>,
    left: Option<NodeRef>,
    right: Option<NodeRef>,
}

impl TreeNode {
    fn child(&self, side: Side) -> Option<NodeRef> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeRef> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Where a descent by value ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// A node holds the value.
    Found(NodeRef),
    /// The value would go in this empty slot (`parent == None`: empty tree).
    Vacant { parent: Option<NodeRef>, side: Side },
}

/// Pointer-linked binary tree with per-instance id generation.
#[derive(Debug, Clone, Default)]
pub struct LinkedTree {
    slots: Vec<Option<TreeNode>>,
    free: Vec<usize>,
    root: Option<NodeRef>,
    len: usize,
    next_id: u64,
}

impl LinkedTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, node: NodeRef) -> &TreeNode {
        match self.slots.get(node.0) {
            Some(Some(n)) => n,
            _ => panic!("dangling node reference {:?}", node),
        }
    }

    fn node_mut(&mut self, node: NodeRef) -> &mut TreeNode {
        match self.slots.get_mut(node.0) {
            Some(Some(n)) => n,
            _ => panic!("dangling node reference {:?}", node),
        }
    }

    pub fn id(&self, node: NodeRef) -> NodeId {
        self.node(node).id
    }

    pub fn value(&self, node: NodeRef) -> Value {
        self.node(node).value
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).parent
    }

    pub fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).left
    }

    pub fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).right
    }

    pub fn child(&self, node: NodeRef, side: Side) -> Option<NodeRef> {
        self.node(node).child(side)
    }

    /// Which child of its parent `node` is, or `None` for a detached node.
    pub fn side_of(&self, node: NodeRef) -> Option<Side> {
        let parent = self.parent(node)?;
        let p = self.node(parent);
        if p.left == Some(node) {
            Some(Side::Left)
        } else if p.right == Some(node) {
            Some(Side::Right)
        } else {
            panic!("{} claims parent {} which does not link back", self.id(node), p.id);
        }
    }

    /// Create a detached node with a fresh id.
    pub fn alloc(&mut self, value: Value) -> NodeRef {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let node = TreeNode { id, value, parent: None, left: None, right: None };
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeRef(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeRef(self.slots.len() - 1)
            }
        }
    }

    /// Drop a fully detached node.
    pub fn release(&mut self, node: NodeRef) {
        let n = self.node(node);
        assert!(
            n.parent.is_none() && n.left.is_none() && n.right.is_none(),
            "releasing {} while still linked",
            n.id
        );
        assert_ne!(self.root, Some(node), "releasing the root {}", n.id);
        self.slots[node.0] = None;
        self.free.push(node.0);
        self.len -= 1;
    }

    /// Install `node` as root. It must not have a parent.
    pub fn set_root(&mut self, node: Option<NodeRef>) {
        if let Some(n) = node {
            assert!(self.parent(n).is_none(), "root {} still has a parent", self.id(n));
        }
        self.root = node;
    }

    /// Hang `child` in the empty `side` slot of `parent`.
    pub fn link(&mut self, child: NodeRef, parent: NodeRef, side: Side) {
        assert!(self.parent(child).is_none(), "{} is already linked", self.id(child));
        assert!(
            self.child(parent, side).is_none(),
            "{} slot {:?} is occupied",
            self.id(parent),
            side
        );
        *self.node_mut(parent).child_mut(side) = Some(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Detach `child` from `parent`, returning the id of the vanished edge.
    pub fn unlink(&mut self, child: NodeRef, parent: NodeRef) -> EdgeId {
        assert_eq!(
            self.parent(child),
            Some(parent),
            "{} is not a child of {}",
            self.id(child),
            self.id(parent)
        );
        let p = self.node_mut(parent);
        if p.left == Some(child) {
            p.left = None;
        } else if p.right == Some(child) {
            p.right = None;
        } else {
            panic!("unlinking nodes that aren't linked");
        }
        self.node_mut(child).parent = None;
        EdgeId::new(self.id(parent), self.id(child))
    }

    /// Put `node` where a removed node used to hang: `parent`'s `side` slot,
    /// or the root when there is no parent.
    pub fn attach(&mut self, node: NodeRef, parent: Option<NodeRef>, side: Side) {
        match parent {
            Some(p) => self.link(node, p, side),
            None => self.set_root(Some(node)),
        }
    }

    /// Lift `x`'s left child into `x`'s place.
    pub fn rotate_right(&mut self, x: NodeRef) {
        let y = match self.left(x) {
            Some(y) => y,
            None => panic!("rotate_right on {} without a left child", self.id(x)),
        };
        self.rotate(x, y, Side::Left);
    }

    /// Lift `x`'s right child into `x`'s place.
    pub fn rotate_left(&mut self, x: NodeRef) {
        let y = match self.right(x) {
            Some(y) => y,
            None => panic!("rotate_left on {} without a right child", self.id(x)),
        };
        self.rotate(x, y, Side::Right);
    }

    /// Lift `node` over its parent with the matching single rotation.
    pub fn rotate_up(&mut self, node: NodeRef) {
        let parent = match self.parent(node) {
            Some(p) => p,
            None => panic!("rotating the root {}", self.id(node)),
        };
        match self.side_of(node) {
            Some(Side::Left) => self.rotate_right(parent),
            _ => self.rotate_left(parent),
        }
    }

    /// `y` is `x`'s child on `side`; afterwards `x` is `y`'s child on the
    /// opposite side and `y` hangs where `x` did.
    fn rotate(&mut self, x: NodeRef, y: NodeRef, side: Side) {
        trace!(pivot = %self.id(x), lifted = %self.id(y), ?side, "rotate");
        let grandparent = self.parent(x);
        let x_side = self.side_of(x);
        if let Some(g) = grandparent {
            self.unlink(x, g);
        }
        self.unlink(y, x);
        if let Some(inner) = self.child(y, side.opposite()) {
            self.unlink(inner, y);
            self.link(inner, x, side);
        }
        self.link(x, y, side.opposite());
        match (grandparent, x_side) {
            (Some(g), Some(s)) => self.link(y, g, s),
            _ => self.set_root(Some(y)),
        }
    }

    /// Walk down from the root toward `value`, narrating each node.
    pub fn descend(&self, value: Value, sink: &mut dyn EventSink) -> Descent {
        let mut current = self.root;
        let mut parent = None;
        let mut side = Side::Left;
        while let Some(node) = current {
            let n = self.node(node);
            sink.visit(n.id, n.value);
            side = match value.cmp(&n.value) {
                std::cmp::Ordering::Equal => return Descent::Found(node),
                std::cmp::Ordering::Less => Side::Left,
                std::cmp::Ordering::Greater => Side::Right,
            };
            parent = Some(node);
            current = n.child(side);
        }
        Descent::Vacant { parent, side }
    }

    /// Follow `side` links from `start` to the end, narrating each node.
    pub fn extreme(&self, start: NodeRef, side: Side, sink: &mut dyn EventSink) -> NodeRef {
        let mut node = start;
        sink.visit(self.id(node), self.value(node));
        while let Some(next) = self.child(node, side) {
            node = next;
            sink.visit(self.id(node), self.value(node));
        }
        node
    }

    /// Current layout of the whole tree.
    pub fn layout(&self) -> Layout {
        tree_layout(self)
    }

    pub fn update_layout(&self, sink: &mut dyn EventSink, clear: bool) {
        sink.update_layout(self.layout(), clear);
    }

    /// Values in in-order sequence.
    pub fn in_order(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.left(node);
            }
            let Some(node) = stack.pop() else { break };
            values.push(self.value(node));
            current = self.right(node);
        }
        values
    }

    /// Remove every node. Ids keep counting up.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Check parent/child back-references and the node count.
    pub fn is_consistent(&self) -> bool {
        let Some(root) = self.root else {
            return self.len == 0;
        };
        if self.parent(root).is_some() {
            return false;
        }
        let mut seen = 0;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            seen += 1;
            for child in [self.left(node), self.right(node)].into_iter().flatten() {
                if self.parent(child) != Some(node) {
                    return false;
                }
                stack.push(child);
            }
        }
        seen == self.len
    }
}

impl Topology for LinkedTree {
    type Handle = NodeRef;

    fn root(&self) -> Option<NodeRef> {
        self.root
    }

    fn left(&self, node: NodeRef) -> Option<NodeRef> {
        LinkedTree::left(self, node)
    }

    fn right(&self, node: NodeRef) -> Option<NodeRef> {
        LinkedTree::right(self, node)
    }

    fn id(&self, node: NodeRef) -> NodeId {
        LinkedTree::id(self, node)
    }

    fn value(&self, node: NodeRef) -> Value {
        LinkedTree::value(self, node)
    }
}
