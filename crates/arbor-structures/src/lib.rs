//! Arbor Structures
//!
//! Classic pointer-based structures that narrate what they do.
//!
//! # Structures
//!
//! - **BinarySearchTree**: unbalanced BST, successor splicing on delete
//! - **SplayTree**: BST that splays every touched node to the root
//! - **MinHeap**: array-backed binary min-heap
//!
//! The two trees share [`LinkedTree`], an arena of nodes addressed by
//! [`NodeRef`] with checked link/unlink/rotate primitives. Nothing here knows
//! how narration is rendered; every operation takes a `&mut dyn EventSink`.
//!
//! # Errors
//!
//! User mistakes (duplicates, missing values, empty heap) become toasts and
//! leave the structure unchanged. Broken parent/child links are bugs and panic.

mod bst;
mod heap;
mod splay;
mod structure;
pub mod toasts;
mod tree;

pub use bst::BinarySearchTree;
pub use heap::{HeapNode, MinHeap};
pub use splay::SplayTree;
pub use structure::{Operation, Structure, StructureKind, UnknownKind};
pub use tree::{Descent, LinkedTree, NodeRef, Side};
