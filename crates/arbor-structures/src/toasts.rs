//! User-facing notices raised by the structures.

use arbor_layout::Value;
use arbor_scene::Toast;

pub fn found(value: Value) -> Toast {
    Toast::info("Found", format!("Node with value {} found.", value))
}

pub fn not_found(value: Value) -> Toast {
    Toast::error("Not Found", format!("Node with value {} not found.", value))
}

pub fn duplicate(value: Value) -> Toast {
    Toast::error("Duplicate", format!("Node with value {} already exists.", value))
}

pub fn deleted(value: Value) -> Toast {
    Toast::info("Deleted", format!("Node with value {} deleted.", value))
}

pub fn heap_empty() -> Toast {
    Toast::error("Heap is empty", "Cannot extract from an empty heap.")
}

pub fn extracted(value: Value) -> Toast {
    Toast::info("Extracted Min", format!("Extracted minimum value: {}", value))
}

/// The operation has no meaning for this kind of structure.
pub fn not_applicable(description: &str) -> Toast {
    Toast::error("Not Applicable", description)
}
