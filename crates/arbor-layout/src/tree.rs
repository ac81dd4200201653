//! Binary tree layout.

use std::collections::HashMap;
use std::hash::Hash;

use crate::id::NodeId;
use crate::visual::{Layout, LayoutConfig, VisualEdge, VisualNode};
use crate::Value;

/// Read-only view of a binary tree shape.
///
/// Implemented by pointer trees (arena handles) and by array heaps (slot
/// indices) alike, so both share one layout function.
pub trait Topology {
    /// Cheap reference to a node.
    type Handle: Copy + Eq + Hash;

    fn root(&self) -> Option<Self::Handle>;
    fn left(&self, node: Self::Handle) -> Option<Self::Handle>;
    fn right(&self, node: Self::Handle) -> Option<Self::Handle>;
    fn id(&self, node: Self::Handle) -> NodeId;
    fn value(&self, node: Self::Handle) -> Value;

    /// Optional extra label shown next to the node.
    fn tag(&self, _node: Self::Handle) -> Option<u64> {
        None
    }
}

/// Lay out a topology with the default grid.
pub fn tree_layout<T: Topology + ?Sized>(topology: &T) -> Layout {
    tree_layout_with(topology, &LayoutConfig::default())
}

/// Lay out a topology.
///
/// Walks are iterative so degenerate (list-shaped) trees of any depth are fine.
pub fn tree_layout_with<T: Topology + ?Sized>(topology: &T, config: &LayoutConfig) -> Layout {
    let Some(root) = topology.root() else {
        return Layout::default();
    };

    let columns = in_order_columns(topology, root);

    let mut layout = Layout {
        nodes: Vec::with_capacity(columns.len()),
        edges: Vec::with_capacity(columns.len().saturating_sub(1)),
    };

    // Pre-order; the edge into a child is emitted right before the child.
    let mut stack: Vec<(T::Handle, usize, Option<NodeId>)> = vec![(root, 0, None)];
    while let Some((node, depth, parent)) = stack.pop() {
        let id = topology.id(node);
        if let Some(parent) = parent {
            layout.edges.push(VisualEdge::new(parent, id));
        }
        layout.nodes.push(VisualNode {
            id,
            value: topology.value(node),
            x: config.column_x(columns[&node]),
            y: config.row_y(depth),
            tag: topology.tag(node),
        });

        if let Some(right) = topology.right(node) {
            stack.push((right, depth + 1, Some(id)));
        }
        if let Some(left) = topology.left(node) {
            stack.push((left, depth + 1, Some(id)));
        }
    }

    layout
}

fn in_order_columns<T: Topology + ?Sized>(
    topology: &T,
    root: T::Handle,
) -> HashMap<T::Handle, usize> {
    let mut columns = HashMap::new();
    let mut stack = Vec::new();
    let mut current = Some(root);

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = topology.left(node);
        }
        let Some(node) = stack.pop() else { break };
        let column = columns.len();
        columns.insert(node, column);
        current = topology.right(node);
    }

    columns
}
