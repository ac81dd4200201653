//! Positioned presentation data produced by layout.

use crate::id::{EdgeId, NodeId};
use crate::Value;

/// A node with its on-screen position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualNode {
    pub id: NodeId,
    pub value: Value,
    pub x: f64,
    pub y: f64,
    /// Extra label, e.g. the array index of a heap slot.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tag: Option<u64>,
}

/// A parent → child link.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualEdge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
}

impl VisualEdge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { id: EdgeId::new(from, to), from, to }
    }
}

/// Output of the layout function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

impl Layout {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a positioned node by id.
    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether an edge with this id is part of the layout.
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }
}

/// Grid geometry for [`tree_layout_with`](crate::tree_layout_with).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Width of a node box
    pub node_width: f64,
    /// Height of a node box
    pub node_height: f64,
    /// Gap between neighbouring columns
    pub horizontal_spacing: f64,
    /// Gap between levels
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 60.0,
            node_height: 60.0,
            horizontal_spacing: 10.0,
            vertical_spacing: 10.0,
        }
    }
}

impl LayoutConfig {
    /// Centre x of the given in-order column.
    pub fn column_x(&self, column: usize) -> f64 {
        column as f64 * (self.node_width + self.horizontal_spacing) + self.node_width / 2.0
    }

    /// Centre y of the given depth.
    pub fn row_y(&self, depth: usize) -> f64 {
        depth as f64 * (self.node_height + self.vertical_spacing) + self.node_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_positions() {
        let config = LayoutConfig::default();
        assert_eq!(config.column_x(0), 30.0);
        assert_eq!(config.column_x(2), 170.0);
        assert_eq!(config.row_y(0), 30.0);
        assert_eq!(config.row_y(1), 100.0);
    }

    #[test]
    fn edge_id_follows_endpoints() {
        let edge = VisualEdge::new(NodeId(2), NodeId(5));
        assert_eq!(edge.id, EdgeId::new(NodeId(2), NodeId(5)));
    }
}
