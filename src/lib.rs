//! AVL order-statistic tree and positional lists for Rust.
//!
//! This crate provides [`AvlTree`], a height-balanced binary search tree keyed by `i64`
//! whose nodes carry subtree sizes, and two list types built for comparison:
//!
//! - [`AvlTree`] - keyed search, insert and delete, plus O(log n) order-statistic queries:
//!   [`select_by_rank`](AvlTree::select_by_rank), [`rank_of`](AvlTree::rank_of) and
//!   indexing by [`Rank`]. Insert and delete report how many rotations they performed.
//! - [`TreeList`] - a sequence with O(log n) insert, delete and retrieve by zero-based
//!   index, backed by an `AvlTree` used positionally.
//! - [`CircularList`] - a fixed-capacity ring buffer with O(1) retrieve and
//!   shorter-side shifting on insert and delete.
//!
//! # Example
//!
//! ```
//! use avl_ost::{AvlTree, InsertOutcome, Rank, TreeList};
//!
//! let mut tree = AvlTree::new();
//! assert_eq!(tree.insert(1, "a"), InsertOutcome::Inserted { rotations: 0 });
//! assert_eq!(tree.insert(2, "b"), InsertOutcome::Inserted { rotations: 0 });
//! // Third ascending key makes the root right-heavy by two: one single rotation.
//! assert_eq!(tree.insert(3, "c"), InsertOutcome::Inserted { rotations: 1 });
//! assert_eq!(tree.insert(3, "z"), InsertOutcome::Duplicate);
//!
//! assert_eq!(tree.root_key(), Some(2));
//! assert_eq!(tree[Rank(3)], "c");
//!
//! let mut list = TreeList::new();
//! list.insert(0, 10, 'x').unwrap();
//! list.insert(0, 20, 'y').unwrap();
//! assert_eq!(list.retrieve(1), Some(&'x'));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **`tracing`** - Emits rotation and rebalance events through the `tracing` crate
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other through small `NonZero` handles. Child
//! links own their subtree; the parent link is a plain back-reference used to walk upward
//! while rebalancing.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;
mod tracing_helpers;

pub mod avl_tree;
pub mod circular_list;
pub mod tree_list;

pub use avl_tree::{AvlTree, DeleteOutcome, InsertOutcome};
pub use circular_list::CircularList;
pub use error::ListError;
pub use order_statistic::Rank;
pub use tree_list::TreeList;
