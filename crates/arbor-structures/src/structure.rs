//! Uniform operation surface over every structure.

use std::fmt;
use std::str::FromStr;

use arbor_layout::{Layout, Value};
use arbor_scene::{EventSink, NullSink};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bst::BinarySearchTree;
use crate::heap::MinHeap;
use crate::splay::SplayTree;
use crate::toasts;

/// A logical operation a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Insert { value: Value },
    Delete { value: Value },
    Search { value: Value },
    ExtractMin,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert { value } => write!(f, "insert {}", value),
            Operation::Delete { value } => write!(f, "delete {}", value),
            Operation::Search { value } => write!(f, "search {}", value),
            Operation::ExtractMin => write!(f, "extract-min"),
        }
    }
}

/// A structure that narrates its operations through an [`EventSink`].
pub trait Structure {
    fn kind(&self) -> StructureKind;

    fn insert(&mut self, value: Value, sink: &mut dyn EventSink);
    fn delete(&mut self, value: Value, sink: &mut dyn EventSink);
    fn search(&mut self, value: Value, sink: &mut dyn EventSink);

    fn extract_min(&mut self, sink: &mut dyn EventSink) {
        sink.toast(toasts::not_applicable(
            "Extract-min is only available on a heap.",
        ));
    }

    fn layout(&self) -> Layout;

    /// Stored values: in-order for trees, slot order for heaps.
    fn values(&self) -> Vec<Value>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn apply(&mut self, op: Operation, sink: &mut dyn EventSink) {
        match op {
            Operation::Insert { value } => self.insert(value, sink),
            Operation::Delete { value } => self.delete(value, sink),
            Operation::Search { value } => self.search(value, sink),
            Operation::ExtractMin => self.extract_min(sink),
        }
    }
}

impl Structure for BinarySearchTree {
    fn kind(&self) -> StructureKind {
        StructureKind::Bst
    }
    fn insert(&mut self, value: Value, sink: &mut dyn EventSink) {
        BinarySearchTree::insert(self, value, sink);
    }
    fn delete(&mut self, value: Value, sink: &mut dyn EventSink) {
        BinarySearchTree::delete(self, value, sink);
    }
    fn search(&mut self, value: Value, sink: &mut dyn EventSink) {
        BinarySearchTree::search(self, value, sink);
    }
    fn layout(&self) -> Layout {
        BinarySearchTree::layout(self)
    }
    fn values(&self) -> Vec<Value> {
        BinarySearchTree::values(self)
    }
    fn len(&self) -> usize {
        BinarySearchTree::len(self)
    }
    fn clear(&mut self) {
        BinarySearchTree::clear(self)
    }
}

impl Structure for SplayTree {
    fn kind(&self) -> StructureKind {
        StructureKind::Splay
    }
    fn insert(&mut self, value: Value, sink: &mut dyn EventSink) {
        SplayTree::insert(self, value, sink);
    }
    fn delete(&mut self, value: Value, sink: &mut dyn EventSink) {
        SplayTree::delete(self, value, sink);
    }
    fn search(&mut self, value: Value, sink: &mut dyn EventSink) {
        SplayTree::search(self, value, sink);
    }
    fn layout(&self) -> Layout {
        SplayTree::layout(self)
    }
    fn values(&self) -> Vec<Value> {
        SplayTree::values(self)
    }
    fn len(&self) -> usize {
        SplayTree::len(self)
    }
    fn clear(&mut self) {
        SplayTree::clear(self)
    }
}

impl Structure for MinHeap {
    fn kind(&self) -> StructureKind {
        StructureKind::Heap
    }
    fn insert(&mut self, value: Value, sink: &mut dyn EventSink) {
        self.add(value, sink);
    }
    fn delete(&mut self, value: Value, sink: &mut dyn EventSink) {
        MinHeap::delete(self, value, sink);
    }
    fn search(&mut self, value: Value, sink: &mut dyn EventSink) {
        MinHeap::search(self, value, sink);
    }
    fn extract_min(&mut self, sink: &mut dyn EventSink) {
        MinHeap::extract_min(self, sink);
    }
    fn layout(&self) -> Layout {
        MinHeap::layout(self)
    }
    fn values(&self) -> Vec<Value> {
        MinHeap::values(self)
    }
    fn len(&self) -> usize {
        MinHeap::len(self)
    }
    fn clear(&mut self) {
        MinHeap::clear(self)
    }
}

/// The structures the visualizer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Bst,
    Splay,
    Heap,
}

impl StructureKind {
    pub const ALL: [StructureKind; 3] = [StructureKind::Bst, StructureKind::Splay, StructureKind::Heap];

    pub fn name(&self) -> &'static str {
        match self {
            StructureKind::Bst => "bst",
            StructureKind::Splay => "splay",
            StructureKind::Heap => "heap",
        }
    }

    /// Values a fresh session starts with.
    pub fn initial_values(&self) -> &'static [Value] {
        match self {
            StructureKind::Bst => &[50, 25, 75, 12, 37, 62, 87],
            StructureKind::Splay => &[50, 25, 75, 15, 35, 65, 85],
            StructureKind::Heap => &[10, 20, 15, 30, 40, 50, 5],
        }
    }

    /// An empty structure of this kind.
    pub fn build(&self) -> Box<dyn Structure + Send + Sync> {
        match self {
            StructureKind::Bst => Box::new(BinarySearchTree::new()),
            StructureKind::Splay => Box::new(SplayTree::new()),
            StructureKind::Heap => Box::new(MinHeap::new()),
        }
    }

    /// A structure of this kind holding [`initial_values`](Self::initial_values).
    pub fn seeded(&self) -> Box<dyn Structure + Send + Sync> {
        let mut structure = self.build();
        for &value in self.initial_values() {
            structure.insert(value, &mut NullSink);
        }
        structure
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised structure name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown structure kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for StructureKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bst" | "binary-search-tree" => Ok(StructureKind::Bst),
            "splay" | "splay-tree" => Ok(StructureKind::Splay),
            "heap" | "min-heap" => Ok(StructureKind::Heap),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_scene::RecordingSink;

    #[test]
    fn kinds_parse_and_display() {
        for kind in StructureKind::ALL {
            assert_eq!(kind.name().parse::<StructureKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!("Splay-Tree".parse::<StructureKind>(), Ok(StructureKind::Splay));
        assert!("avl".parse::<StructureKind>().is_err());
    }

    #[test]
    fn seeded_structures_hold_initial_values() {
        for kind in StructureKind::ALL {
            let structure = kind.seeded();
            assert_eq!(structure.kind(), kind);
            assert_eq!(structure.len(), kind.initial_values().len());
        }
    }

    #[test]
    fn operation_wire_format() {
        let op: Operation = serde_json::from_str(r#"{"op":"insert","value":42}"#).unwrap();
        assert_eq!(op, Operation::Insert { value: 42 });
        let op: Operation = serde_json::from_str(r#"{"op":"extract_min"}"#).unwrap();
        assert_eq!(op, Operation::ExtractMin);
        assert_eq!(Operation::Delete { value: 3 }.to_string(), "delete 3");
    }

    #[test]
    fn extract_min_on_tree_is_not_applicable() {
        let mut structure = StructureKind::Bst.seeded();
        let before = structure.values();
        let mut sink = RecordingSink::new();
        structure.apply(Operation::ExtractMin, &mut sink);
        assert_eq!(structure.values(), before);
        assert_eq!(sink.toasts()[0].title, "Not Applicable");
    }

    #[test]
    fn apply_dispatches_to_heap() {
        let mut structure = StructureKind::Heap.seeded();
        structure.apply(Operation::ExtractMin, &mut NullSink);
        structure.apply(Operation::Insert { value: 1 }, &mut NullSink);
        assert_eq!(structure.values()[0], 1);
        assert_eq!(structure.len(), 7);
    }
}
