//! Arbor Layout
//!
//! Pure, deterministic placement of binary tree shapes for the visualizer.
//!
//! # Contract
//!
//! `tree_layout(topology) -> Layout` depends on the topology alone: the same
//! shape with the same ids always produces the same coordinates, node order
//! and edge order. The scene producer relies on this to tell "new" elements
//! from "existing" ones when it diffs two layouts.
//!
//! # Geometry
//!
//! Nodes are placed on a grid: the column is the node's in-order rank and the
//! row is its depth. A lone child therefore always sits to the correct side of
//! its parent, and no two nodes ever overlap.
//!
//! Nodes are emitted in pre-order (node, left subtree, right subtree); the edge
//! into a child is emitted just before that child.

mod id;
mod tree;
mod visual;

pub use id::{EdgeId, IdParseError, NodeId};
pub use tree::{tree_layout, tree_layout_with, Topology};
pub use visual::{Layout, LayoutConfig, VisualEdge, VisualNode};

/// Value stored in a node. The visualizer only ever displays it.
pub type Value = i64;
