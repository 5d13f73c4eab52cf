//! This crate exposes a Binary Search Tree (BST) with lazy deletion.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Lazy deletion
//!
//! Removing a value from a [`LazyTree`] doesn't unlink its `Node`. The `Node` is marked as
//! deleted (tombstoned) and skipped by searches and iteration. Inserting the value again just
//! clears the mark. Tombstoned `Node`s are unlinked for real by
//! [`LazyTree::collect_garbage`] or [`LazyTree::remove_hard`]. The tree doesn't rebalance so
//! its height depends entirely on insertion order.
//!
//! ## Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events for insertions, hard removals,
//!   garbage collection and clearing.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod config;
mod error;
pub mod iter;
pub mod lazy;
pub mod visit;

pub use config::{Config, Promotion};
pub use error::Error;
pub use lazy::LazyTree;
