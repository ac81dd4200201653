//! The narration protocol between algorithms and whoever draws them.

use arbor_layout::{EdgeId, Layout, NodeId, Value};

use crate::scene::{HighlightReason, Toast};

/// What an algorithm reports while it runs.
///
/// Algorithms call these synchronously, in the order things happen, and never
/// learn how the narration is turned into pictures.
pub trait EventSink {
    /// The algorithm is looking at `node`.
    fn visit(&mut self, node: NodeId, value: Value);

    /// Clear the visitor marker.
    fn unvisit(&mut self);

    fn highlight_node(&mut self, node: NodeId, reason: HighlightReason);

    /// Mark a node invisible without removing it from the topology yet.
    fn hide_node(&mut self, node: NodeId);

    /// Mark edges invisible without removing them from the topology yet.
    fn hide_edges(&mut self, edges: &[EdgeId]);

    /// Replace the node/edge universe. `clear` drops the visitor and all
    /// transient styles.
    fn update_layout(&mut self, layout: Layout, clear: bool);

    fn toast(&mut self, toast: Toast);
}

/// Sink that ignores everything. Used to build structures without animating.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn visit(&mut self, _: NodeId, _: Value) {}
    fn unvisit(&mut self) {}
    fn highlight_node(&mut self, _: NodeId, _: HighlightReason) {}
    fn hide_node(&mut self, _: NodeId) {}
    fn hide_edges(&mut self, _: &[EdgeId]) {}
    fn update_layout(&mut self, _: Layout, _: bool) {}
    fn toast(&mut self, _: Toast) {}
}

/// One narrated call, as captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Visit(NodeId, Value),
    Unvisit,
    Highlight(NodeId, HighlightReason),
    HideNode(NodeId),
    HideEdges(Vec<EdgeId>),
    UpdateLayout { layout: Layout, clear: bool },
    Toast(Toast),
}

/// Sink that keeps the raw call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Drain the log.
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Toasts raised so far.
    pub fn toasts(&self) -> Vec<&Toast> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Toast(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Values of visited nodes, in visiting order.
    pub fn visited_values(&self) -> Vec<Value> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Visit(_, v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// Number of relayouts requested.
    pub fn layout_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::UpdateLayout { .. }))
            .count()
    }

    pub fn last_layout(&self) -> Option<&Layout> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::UpdateLayout { layout, .. } => Some(layout),
            _ => None,
        })
    }
}

impl EventSink for RecordingSink {
    fn visit(&mut self, node: NodeId, value: Value) {
        self.events.push(SinkEvent::Visit(node, value));
    }

    fn unvisit(&mut self) {
        self.events.push(SinkEvent::Unvisit);
    }

    fn highlight_node(&mut self, node: NodeId, reason: HighlightReason) {
        self.events.push(SinkEvent::Highlight(node, reason));
    }

    fn hide_node(&mut self, node: NodeId) {
        self.events.push(SinkEvent::HideNode(node));
    }

    fn hide_edges(&mut self, edges: &[EdgeId]) {
        self.events.push(SinkEvent::HideEdges(edges.to_vec()));
    }

    fn update_layout(&mut self, layout: Layout, clear: bool) {
        self.events.push(SinkEvent::UpdateLayout { layout, clear });
    }

    fn toast(&mut self, toast: Toast) {
        self.events.push(SinkEvent::Toast(toast));
    }
}
