//! Scene snapshots and their visual annotations.

use std::collections::BTreeMap;
use std::sync::Arc;

use arbor_layout::{EdgeId, Layout, NodeId, Value, VisualEdge, VisualNode};
use serde::{Deserialize, Serialize};

/// Why an algorithm highlights a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightReason {
    /// Search hit
    Found,
    /// In-order successor picked for a two-child deletion
    Successor,
    /// Node about to be removed
    Deletion,
    /// Pair being compared and swapped (heap sifting)
    Compare,
}

impl HighlightReason {
    /// The visual style this reason renders as.
    pub fn highlight(self) -> Highlight {
        match self {
            HighlightReason::Deletion => Highlight::Deletion,
            HighlightReason::Found | HighlightReason::Successor | HighlightReason::Compare => {
                Highlight::Default
            }
        }
    }
}

/// Visual highlight of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Default,
    Deletion,
}

/// Per-node annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invisible: bool,
}

/// Per-edge annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeStyle {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub invisible: bool,
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A user-facing notice attached to a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub variant: ToastVariant,
}

impl Toast {
    /// A success or informational notice.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    /// A failure notice.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// What produced a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneAction {
    /// Initial state of an operation
    Start,
    /// The algorithm looks at a node
    Visit { node: NodeId, value: Value },
    /// Visitor marker cleared
    Unvisit,
    /// A node was highlighted
    Highlight { node: NodeId, reason: HighlightReason },
    /// A node was marked invisible
    HideNode { node: NodeId },
    /// Edges were marked invisible
    HideEdges { edges: Vec<EdgeId> },
    /// Relayout phase 1: vanished edges dropped
    LayoutHideEdges,
    /// Relayout phase 2: nodes moved or introduced
    LayoutNodes,
    /// Relayout phase 3: new edges introduced
    LayoutEdges,
    /// A toast was raised
    Toast,
    /// Final state of an operation
    End,
}

/// One immutable, rendering-ready snapshot.
///
/// Collections are behind `Arc`: scenes recorded back to back share whatever
/// did not change, and the producer copies a collection before touching it,
/// so a recorded scene never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Arc<Vec<VisualNode>>,
    pub edges: Arc<Vec<VisualEdge>>,
    pub visitor: Option<NodeId>,
    pub node_styles: Arc<BTreeMap<NodeId, NodeStyle>>,
    pub edge_styles: Arc<BTreeMap<EdgeId, EdgeStyle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<SceneAction>,
}

impl Scene {
    /// A plain scene showing a layout with no annotations.
    pub fn from_layout(layout: Layout) -> Self {
        Self {
            nodes: Arc::new(layout.nodes),
            edges: Arc::new(layout.edges),
            ..Self::default()
        }
    }

    /// Style of a node, or the unstyled default.
    pub fn node_style(&self, id: NodeId) -> NodeStyle {
        self.node_styles.get(&id).copied().unwrap_or_default()
    }

    /// Style of an edge, or the unstyled default.
    pub fn edge_style(&self, id: EdgeId) -> EdgeStyle {
        self.edge_styles.get(&id).copied().unwrap_or_default()
    }

    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }

    /// Values of the nodes in the scene, in layout order.
    pub fn values(&self) -> Vec<Value> {
        self.nodes.iter().map(|n| n.value).collect()
    }
}
