//! An ordered map backed by an AVL tree, supporting the removal of every key
//! above, below, or outside a boundary in time proportional to the tree
//! height rather than the number of keys removed.
//!
//! ```
//! use avltrim::AvlTree;
//!
//! let mut t = (0..1000).map(|v| (v, v * 2)).collect::<AvlTree<_, _>>();
//!
//! // Discard every key greater than 500.
//! t.remove_above(&500);
//! assert_eq!(t.max(), Ok((&500, &1000)));
//!
//! // And every key outside [100, 200].
//! t.remove_range(&100, &200).unwrap();
//! assert_eq!(t.iter().count(), 101);
//! assert!(t.is_balanced());
//! ```
//!
//! Rebalancing work can be observed by borrowing the tree through an
//! [`Instrumented`] handle that records into a caller-owned [`Metrics`]:
//!
//! ```
//! use avltrim::{AvlTree, Metrics};
//!
//! let mut t = AvlTree::new();
//! let mut metrics = Metrics::default();
//!
//! let mut handle = t.instrument(&mut metrics);
//! for i in 0..100 {
//!     handle.insert(i, ());
//! }
//!
//! assert!(metrics.rotations() > 0);
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs, missing_debug_implementations)]

mod entry;
mod error;
mod iter;
mod metrics;
mod node;
mod path;
mod tree;
mod truncate;

#[cfg(test)]
mod test_utils;

pub use entry::*;
pub use error::*;
pub use iter::*;
pub use metrics::{Instrumented, Metrics};
pub use tree::*;

