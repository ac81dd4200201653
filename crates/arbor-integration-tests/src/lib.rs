//! Shared fixtures for the arbor integration tests.

use arbor_layout::Value;
use arbor_scene::{Scene, SceneProducer, Toast};
use arbor_structures::{Operation, Structure, StructureKind};

/// Insertion order used by the reference binary search tree.
pub const BST_SEED: [Value; 7] = [50, 25, 75, 12, 37, 62, 87];

/// Insertion order used by the reference heap.
pub const HEAP_SEED: [Value; 7] = [10, 20, 15, 30, 40, 50, 5];

/// Run `op` on `structure` the way a session does and return the storyboard.
pub fn record(structure: &mut dyn Structure, op: Operation) -> Vec<Scene> {
    let mut producer = SceneProducer::new();
    producer.start(Scene::from_layout(structure.layout()));
    structure.apply(op, &mut producer);
    producer.finish()
}

/// A structure of `kind` built from `values` without narration.
pub fn build(kind: StructureKind, values: &[Value]) -> Box<dyn Structure + Send + Sync> {
    let mut structure = kind.build();
    for &value in values {
        record(structure.as_mut(), Operation::Insert { value });
    }
    structure
}

/// Toasts carried by a storyboard, in order.
pub fn toasts(scenes: &[Scene]) -> Vec<&Toast> {
    scenes.iter().filter_map(|s| s.toast.as_ref()).collect()
}

/// The last toast of a storyboard, if any.
pub fn last_toast(scenes: &[Scene]) -> Option<&Toast> {
    toasts(scenes).into_iter().last()
}
