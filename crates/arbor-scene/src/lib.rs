//! Arbor Scenes
//!
//! Turns algorithm narration into a replayable storyboard.
//!
//! # Architecture
//!
//! - **EventSink**: what an algorithm calls to say what it is doing
//! - **SceneProducer**: the sink that records one immutable [`Scene`] per call
//! - **NullSink / RecordingSink**: sinks for silent seeding and for tests
//!
//! # Usage
//!
//! ```ignore
//! let mut producer = SceneProducer::new();
//! producer.start(Scene::from_layout(tree.layout()));
//! tree.insert(42, &mut producer);
//! let scenes = producer.finish();
//! ```

mod producer;
mod scene;
mod sink;

pub use arbor_layout::{EdgeId, Layout, NodeId, Value, VisualEdge, VisualNode};
pub use producer::SceneProducer;
pub use scene::{
    EdgeStyle, Highlight, HighlightReason, NodeStyle, Scene, SceneAction, Toast, ToastVariant,
};
pub use sink::{EventSink, NullSink, RecordingSink, SinkEvent};
