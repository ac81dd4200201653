//! End-to-end scenarios: structure operations recorded through the scene
//! producer and replayed through a session.

use arbor_integration_tests::{build, last_toast, record, toasts, BST_SEED, HEAP_SEED};
use arbor_layout::{NodeId, Value};
use arbor_scene::{Highlight, SceneAction, ToastVariant};
use arbor_structures::{BinarySearchTree, MinHeap, Operation, SplayTree, StructureKind};
use arbor_vis::{Error, Session, VisConfig};

// ── Binary search tree ──────────────────────────────────────────────────

#[test]
fn bst_insert_sequence_is_ordered() {
    let bst = build(StructureKind::Bst, &BST_SEED);
    assert_eq!(bst.values(), vec![12, 25, 37, 50, 62, 75, 87]);
}

#[test]
fn bst_delete_root_promotes_successor() {
    let mut bst = build(StructureKind::Bst, &BST_SEED);
    let scenes = record(bst.as_mut(), Operation::Delete { value: 50 });

    assert_eq!(bst.values(), vec![12, 25, 37, 62, 75, 87]);
    let end = scenes.last().unwrap();
    assert_eq!(end.nodes[0].value, 62);
    assert_eq!(last_toast(&scenes).unwrap().title, "Deleted");

    // The target is highlighted for deletion before anything disappears.
    let deletion = scenes
        .iter()
        .position(|s| s.node_style(NodeId(0)).highlight == Some(Highlight::Deletion))
        .unwrap();
    let hidden = scenes
        .iter()
        .position(|s| s.node_style(NodeId(0)).invisible)
        .unwrap();
    assert!(deletion < hidden);
}

#[test]
fn bst_search_miss_ends_in_not_found() {
    let mut bst = build(StructureKind::Bst, &BST_SEED);
    let before = bst.layout();
    let scenes = record(bst.as_mut(), Operation::Search { value: 99 });

    let toast = last_toast(&scenes).unwrap();
    assert_eq!(toast.title, "Not Found");
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert_eq!(bst.layout(), before);
    // Every scene shows the same topology.
    assert!(scenes.iter().all(|s| *s.nodes == before.nodes));
}

#[test]
fn bst_two_child_delete_keeps_one_id_per_slot() {
    let mut bst = BinarySearchTree::from_values(&BST_SEED);
    let mut producer = arbor_scene::SceneProducer::new();
    producer.start(arbor_scene::Scene::from_layout(bst.layout()));
    bst.delete(50, &mut producer);
    let scenes = producer.finish();

    // 62 is the sixth insert, so it carries node-5 before and after.
    for scene in &scenes {
        let with_62: Vec<_> = scene.nodes.iter().filter(|n| n.value == 62).collect();
        assert_eq!(with_62.len(), 1);
        assert_eq!(with_62[0].id, NodeId(5));
    }
    let end = scenes.last().unwrap();
    assert!(end.node(NodeId(0)).is_none());
    assert_eq!(end.nodes.len(), 6);
}

#[test]
fn bst_duplicate_insert_is_idempotent() {
    let mut bst = build(StructureKind::Bst, &BST_SEED);
    let before = bst.layout();
    let scenes = record(bst.as_mut(), Operation::Insert { value: 37 });
    assert_eq!(bst.layout(), before);
    assert_eq!(last_toast(&scenes).unwrap().title, "Duplicate");
}

// ── Splay tree ──────────────────────────────────────────────────────────

#[test]
fn splay_search_surfaces_target() {
    let mut splay = SplayTree::from_values(&[50, 25, 75]);
    let mut producer = arbor_scene::SceneProducer::new();
    producer.start(arbor_scene::Scene::from_layout(splay.layout()));
    assert!(splay.search(25, &mut producer));
    let scenes = producer.finish();

    assert_eq!(splay.root_value(), Some(25));
    assert_eq!(scenes.last().unwrap().nodes[0].value, 25);
    assert_eq!(last_toast(&scenes).unwrap().title, "Found");
}

#[test]
fn splay_insert_reveals_leaf_before_rotating() {
    let mut splay = build(StructureKind::Splay, &[50, 25]);
    let scenes = record(splay.as_mut(), Operation::Insert { value: 40 });

    // First scene that shows 40 has it below the root.
    let first = scenes.iter().find(|s| s.values().contains(&40)).unwrap();
    assert_ne!(first.nodes[0].value, 40);
    assert_eq!(scenes.last().unwrap().nodes[0].value, 40);
}

// ── Heap ────────────────────────────────────────────────────────────────

#[test]
fn heap_extracts_in_order() {
    let mut heap = MinHeap::from_values(&HEAP_SEED);
    let mut producer = arbor_scene::SceneProducer::new();

    producer.start(arbor_scene::Scene::from_layout(heap.layout()));
    assert_eq!(heap.extract_min(&mut producer), Some(5));
    let scenes = producer.finish();
    assert!(heap.is_heap());
    assert_eq!(last_toast(&scenes).unwrap().description, "Extracted minimum value: 5");

    assert_eq!(heap.extract_min(&mut arbor_scene::NullSink), Some(10));
    assert!(heap.is_heap());
}

#[test]
fn heap_extract_from_empty_changes_nothing() {
    let mut heap = build(StructureKind::Heap, &[]);
    let scenes = record(heap.as_mut(), Operation::ExtractMin);

    let toast = last_toast(&scenes).unwrap();
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert!(scenes.iter().all(|s| s.nodes.is_empty() && s.node_styles.is_empty()));
    // Start, the toast, End.
    assert_eq!(scenes.len(), 3);
}

#[test]
fn heap_rejects_tree_operations() {
    let mut heap = build(StructureKind::Heap, &HEAP_SEED);
    let before = heap.values();
    for op in [Operation::Search { value: 20 }, Operation::Delete { value: 20 }] {
        let scenes = record(heap.as_mut(), op);
        assert_eq!(toasts(&scenes).len(), 1);
        assert_eq!(last_toast(&scenes).unwrap().title, "Not Applicable");
    }
    assert_eq!(heap.values(), before);
}

// ── Scene producer ──────────────────────────────────────────────────────

#[test]
fn relayout_removes_edges_before_moving_nodes() {
    let mut bst = build(StructureKind::Bst, &BST_SEED);
    let scenes = record(bst.as_mut(), Operation::Delete { value: 25 });

    let actions: Vec<&SceneAction> = scenes.iter().filter_map(|s| s.action.as_ref()).collect();
    let hide = actions
        .iter()
        .position(|a| **a == SceneAction::LayoutHideEdges)
        .unwrap();
    let nodes = actions
        .iter()
        .position(|a| **a == SceneAction::LayoutNodes)
        .unwrap();
    let edges = actions
        .iter()
        .position(|a| **a == SceneAction::LayoutEdges)
        .unwrap();
    assert!(hide < nodes && nodes < edges);
}

#[test]
fn storyboards_are_byte_for_byte_deterministic() {
    let ops = [
        Operation::Insert { value: 40 },
        Operation::Delete { value: 50 },
        Operation::Search { value: 12 },
    ];
    for kind in StructureKind::ALL {
        let render = || -> Vec<String> {
            let mut structure = kind.seeded();
            ops.iter()
                .chain(std::iter::once(&Operation::ExtractMin))
                .map(|&op| serde_json::to_string(&record(structure.as_mut(), op)).unwrap())
                .collect()
        };
        assert_eq!(render(), render(), "{} storyboards differ between runs", kind);
    }
}

#[test]
fn recorded_scenes_are_never_rewritten() {
    let mut bst = build(StructureKind::Bst, &BST_SEED);
    let scenes = record(bst.as_mut(), Operation::Delete { value: 50 });
    let snapshot = serde_json::to_string(&scenes).unwrap();

    // Later operations reuse nothing a recorded scene can observe.
    record(bst.as_mut(), Operation::Insert { value: 1 });
    record(bst.as_mut(), Operation::Delete { value: 62 });
    assert_eq!(serde_json::to_string(&scenes).unwrap(), snapshot);
}

// ── Session ─────────────────────────────────────────────────────────────

#[test]
fn session_gates_until_playback_finishes() {
    let mut session = Session::new(StructureKind::Heap, &VisConfig::default());
    session.run(Operation::Insert { value: 1 }).unwrap();

    let err = session.run(Operation::ExtractMin).unwrap_err();
    assert!(matches!(err, Error::AnimationInProgress));
    assert_eq!(err.toast().variant, ToastVariant::Destructive);

    while session.playback_mut().tick() {}
    let scenes = session.run(Operation::ExtractMin).unwrap();
    assert_eq!(last_toast(scenes).unwrap().description, "Extracted minimum value: 1");
}

#[test]
fn scrubbing_does_not_rerun_operations() {
    let mut session = Session::new(StructureKind::Bst, &VisConfig::default());
    session.run(Operation::Delete { value: 75 }).unwrap();
    let values: Vec<Value> = session.structure().values();

    let playback = session.playback_mut();
    playback.fast_forward();
    playback.rewind();
    playback.seek(3);
    playback.step_backward();
    playback.fast_forward();

    assert_eq!(session.structure().values(), values);
    assert_eq!(session.current_scene().values().len(), 6);
}
