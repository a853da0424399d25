//! Ordered map over a [red-black tree][rbtree], with guaranteed
//! O(log n) search, insert and delete.
//!
//! The index is not internally synchronized, callers serialize access.
//!
//! [rbtree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

mod depth;
mod error;
mod rbtree;

pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::rbtree::{Color, Iter, OrderedMap, Stats};
