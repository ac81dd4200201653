//! Scene producer: records narration as an ordered list of scenes.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use arbor_layout::{EdgeId, Layout, NodeId, Value};
use tracing::trace;

use crate::scene::{HighlightReason, NodeStyle, Scene, SceneAction, Toast};
use crate::sink::EventSink;

/// Event sink that snapshots its working scene after every narrated call.
///
/// The working scene is only ever modified through `Arc::make_mut`, so a
/// scene already handed out keeps its own copy of anything changed later.
#[derive(Debug, Default)]
pub struct SceneProducer {
    scenes: Vec<Scene>,
    current: Scene,
}

impl SceneProducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new storyboard from `initial`, dropping anything unfinished.
    pub fn start(&mut self, initial: Scene) {
        self.scenes.clear();
        self.current = Scene {
            toast: None,
            action: None,
            ..initial
        };
        self.record(SceneAction::Start, None);
    }

    /// Record the closing scene and hand over the storyboard.
    pub fn finish(&mut self) -> Vec<Scene> {
        self.current.visitor = None;
        clear_map(&mut self.current.node_styles);
        clear_map(&mut self.current.edge_styles);
        self.record(SceneAction::End, None);
        trace!(scenes = self.scenes.len(), "storyboard finished");
        std::mem::take(&mut self.scenes)
    }

    /// Scenes recorded since the last `start`.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// The working scene.
    pub fn current(&self) -> &Scene {
        &self.current
    }

    fn record(&mut self, action: SceneAction, toast: Option<Toast>) {
        trace!(index = self.scenes.len(), ?action, "scene recorded");
        let mut scene = self.current.clone();
        scene.action = Some(action);
        scene.toast = toast;
        self.scenes.push(scene);
    }
}

fn clear_map<K: Ord + Clone, V: Clone>(map: &mut Arc<BTreeMap<K, V>>) {
    if !map.is_empty() {
        *map = Arc::new(BTreeMap::new());
    }
}

fn retain_keys<K: Ord + Clone, V: Clone>(map: &mut Arc<BTreeMap<K, V>>, keep: impl Fn(&K) -> bool) {
    if map.keys().any(|k| !keep(k)) {
        Arc::make_mut(map).retain(|k, _| keep(k));
    }
}

impl EventSink for SceneProducer {
    fn visit(&mut self, node: NodeId, value: Value) {
        self.current.visitor = Some(node);
        self.record(SceneAction::Visit { node, value }, None);
    }

    fn unvisit(&mut self) {
        self.current.visitor = None;
        self.record(SceneAction::Unvisit, None);
    }

    fn highlight_node(&mut self, node: NodeId, reason: HighlightReason) {
        let styles = Arc::make_mut(&mut self.current.node_styles);
        let style = styles.entry(node).or_default();
        style.highlight = Some(reason.highlight());
        self.record(SceneAction::Highlight { node, reason }, None);
    }

    fn hide_node(&mut self, node: NodeId) {
        let styles = Arc::make_mut(&mut self.current.node_styles);
        styles.entry(node).or_insert_with(NodeStyle::default).invisible = true;
        self.record(SceneAction::HideNode { node }, None);
    }

    fn hide_edges(&mut self, edges: &[EdgeId]) {
        let styles = Arc::make_mut(&mut self.current.edge_styles);
        for &edge in edges {
            styles.entry(edge).or_default().invisible = true;
        }
        self.record(SceneAction::HideEdges { edges: edges.to_vec() }, None);
    }

    fn update_layout(&mut self, layout: Layout, clear: bool) {
        if clear {
            self.current.visitor = None;
        }

        // Phase 1: drop vanished edges while every node is still in place.
        let next_edges: HashSet<EdgeId> = layout.edges.iter().map(|e| e.id).collect();
        if self.current.edges.iter().any(|e| !next_edges.contains(&e.id)) {
            let remaining = self
                .current
                .edges
                .iter()
                .filter(|e| next_edges.contains(&e.id))
                .cloned()
                .collect();
            self.current.edges = Arc::new(remaining);
            retain_keys(&mut self.current.edge_styles, |id| next_edges.contains(id));
            self.record(SceneAction::LayoutHideEdges, None);
        }

        // Phase 2: move and introduce nodes.
        let next_nodes: HashSet<NodeId> = layout.nodes.iter().map(|n| n.id).collect();
        if clear {
            clear_map(&mut self.current.node_styles);
            clear_map(&mut self.current.edge_styles);
        } else {
            retain_keys(&mut self.current.node_styles, |id| next_nodes.contains(id));
        }
        if self.current.visitor.is_some_and(|v| !next_nodes.contains(&v)) {
            self.current.visitor = None;
        }
        self.current.nodes = Arc::new(layout.nodes);
        self.record(SceneAction::LayoutNodes, None);

        // Phase 3: introduce new edges.
        self.current.edges = Arc::new(layout.edges);
        self.record(SceneAction::LayoutEdges, None);
    }

    fn toast(&mut self, toast: Toast) {
        self.record(SceneAction::Toast, Some(toast));
    }
}
