//! Suffix tree core
//!
//! - [`types`] - Symbol, offset and edge primitives
//! - [`node`] - Root, internal and leaf nodes
//! - [`suffix_tree`] - Node arena plus the symbol sequence
//! - [`location`] - Cursor into the tree
//! - [`builder`] - Edge splitting
//! - [`traverser`] - Cursor movement, including the suffix-link hop
//! - [`ukkonen`] - Online construction
//! - [`check`] - Invariant verification
//! - [`stats`] - Shape summary

pub mod builder;
pub mod check;
pub mod error;
pub mod location;
pub mod node;
pub mod stats;
pub mod suffix_tree;
pub mod traverser;
pub mod types;
pub mod ukkonen;

pub use check::{Violation, verify, verify_finished};
pub use error::{TreeError, TreeResult};
pub use location::Location;
pub use node::{Node, NodeKind};
pub use stats::TreeStats;
pub use suffix_tree::SuffixTree;
pub use types::{
    DEFAULT_TERMINATOR, Edge, NodeId, Offset, ROOT, Symbol, TERMINATOR_GLYPH, TreeConfig,
};
pub use ukkonen::Ukkonen;
