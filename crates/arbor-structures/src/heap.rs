//! Binary min-heap over a dense array.
//!
//! Slot `i` has its parent at `(i - 1) / 2` and its children at `2i + 1` and
//! `2i + 2`. After every public operation `heap[parent(i)] <= heap[i]`.

use arbor_layout::{tree_layout, Layout, NodeId, Topology, Value};
use arbor_scene::{EventSink, HighlightReason, NullSink};
use tracing::debug;

use crate::toasts;

/// One heap entry. The id follows the value when slots are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapNode {
    pub id: NodeId,
    pub value: Value,
}

fn parent_index(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child_index(i: usize) -> usize {
    2 * i + 1
}

fn right_child_index(i: usize) -> usize {
    2 * i + 2
}

#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    slots: Vec<HeapNode>,
    next_id: u64,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a heap by adding `values` in order, without narration.
    pub fn from_values(values: &[Value]) -> Self {
        let mut heap = Self::new();
        for &value in values {
            heap.add(value, &mut NullSink);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn peek(&self) -> Option<Value> {
        self.slots.first().map(|n| n.value)
    }

    /// Values in slot order.
    pub fn values(&self) -> Vec<Value> {
        self.slots.iter().map(|n| n.value).collect()
    }

    pub fn nodes(&self) -> &[HeapNode] {
        &self.slots
    }

    pub fn layout(&self) -> Layout {
        tree_layout(self)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Whether every parent is `<=` its children.
    pub fn is_heap(&self) -> bool {
        (1..self.slots.len()).all(|i| self.slots[parent_index(i)].value <= self.slots[i].value)
    }

    fn update_layout(&self, sink: &mut dyn EventSink, clear: bool) {
        sink.update_layout(self.layout(), clear);
    }

    /// Swap two slots, highlighting both first.
    fn swap_narrated(&mut self, a: usize, b: usize, sink: &mut dyn EventSink) {
        sink.highlight_node(self.slots[a].id, HighlightReason::Compare);
        sink.highlight_node(self.slots[b].id, HighlightReason::Compare);
        self.slots.swap(a, b);
        self.update_layout(sink, false);
    }

    /// Append `value` and sift it up.
    pub fn add(&mut self, value: Value, sink: &mut dyn EventSink) {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.slots.push(HeapNode { id, value });
        debug!(value, %id, "heap add");
        self.update_layout(sink, false);

        let mut current = self.slots.len() - 1;
        while current > 0 {
            let parent = parent_index(current);
            if self.slots[parent].value <= self.slots[current].value {
                break;
            }
            self.swap_narrated(current, parent, sink);
            current = parent;
        }
        self.update_layout(sink, true);
    }

    /// Remove and return the minimum.
    pub fn extract_min(&mut self, sink: &mut dyn EventSink) -> Option<Value> {
        let Some(root) = self.slots.first().copied() else {
            sink.toast(toasts::heap_empty());
            return None;
        };
        sink.highlight_node(root.id, HighlightReason::Deletion);

        let last = self.slots.pop()?;
        if !self.slots.is_empty() {
            self.slots[0] = last;
            self.update_layout(sink, false);
            self.sift_down(0, sink);
        }
        debug!(value = root.value, id = %root.id, "heap extract-min");

        self.update_layout(sink, true);
        sink.toast(toasts::extracted(root.value));
        Some(root.value)
    }

    /// Push slot `current` down; the left child wins ties.
    fn sift_down(&mut self, mut current: usize, sink: &mut dyn EventSink) {
        let len = self.slots.len();
        loop {
            let left = left_child_index(current);
            let right = right_child_index(current);
            let mut smallest = current;
            if left < len && self.slots[left].value < self.slots[smallest].value {
                smallest = left;
            }
            if right < len && self.slots[right].value < self.slots[smallest].value {
                smallest = right;
            }
            if smallest == current {
                break;
            }
            self.swap_narrated(current, smallest, sink);
            current = smallest;
        }
    }

    pub fn search(&self, _value: Value, sink: &mut dyn EventSink) {
        sink.toast(toasts::not_applicable(
            "Search is not a standard operation for a heap.",
        ));
    }

    pub fn delete(&self, _value: Value, sink: &mut dyn EventSink) {
        sink.toast(toasts::not_applicable(
            "Deleting an arbitrary element is not a standard operation for a heap.",
        ));
    }
}

impl Topology for MinHeap {
    type Handle = usize;

    fn root(&self) -> Option<usize> {
        (!self.slots.is_empty()).then_some(0)
    }

    fn left(&self, node: usize) -> Option<usize> {
        Some(left_child_index(node)).filter(|&i| i < self.slots.len())
    }

    fn right(&self, node: usize) -> Option<usize> {
        Some(right_child_index(node)).filter(|&i| i < self.slots.len())
    }

    fn id(&self, node: usize) -> NodeId {
        self.slots[node].id
    }

    fn value(&self, node: usize) -> Value {
        self.slots[node].value
    }

    fn tag(&self, node: usize) -> Option<u64> {
        Some(node as u64)
    }
}
