//! `avl-interval-index` maps timeline entities to closed frame ranges and
//! answers visibility queries over them.
//!
//! The index is an AVL tree augmented with the maximum interval `end` of
//! every subtree, so "what is visible at frame F" and "what overlaps range
//! [a, b]" queries can prune whole subtrees that cannot contain a match,
//! while insert and delete stay logarithmic.
//!
//! To safely and efficiently handle insertion and deletion in Rust, the
//! index uses a vector to simulate pointers for the parent-child references
//! in the tree. This also ensures the index has the `Send` and `Unpin`
//! traits, allowing it to be safely transferred between threads and to
//! maintain a fixed memory location during asynchronous operations. It is
//! not internally synchronized: concurrent mutation requires external
//! mutual exclusion.
//!
//! # Example
//!
//! ```rust
//! use avl_interval_index::{EntityRef, IntervalIndex};
//!
//! let mut index = IntervalIndex::new();
//! index.insert(0, 10, EntityRef::object("a")).unwrap();
//! index.insert(5, 15, EntityRef::grid("g")).unwrap();
//! assert_eq!(index.find_overlapping(7).len(), 2);
//! assert_eq!(index.find_overlapping(12).len(), 1);
//! ```

mod error;
mod index;
mod interval;
mod intervalindex;
mod iter;
mod node;
mod report;


pub use error::Error;
pub use interval::{EntityKind, EntityRef, Interval};
pub use intervalindex::IntervalIndex;
pub use iter::Iter;
pub use report::{BatchReport, QueryReport, TreeStats};
