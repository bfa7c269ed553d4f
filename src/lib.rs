//! # fxtree - Online suffix trees
//!
//! fxtree builds a suffix tree over a sequence of symbols with Ukkonen's
//! algorithm, one symbol at a time, in amortized linear time. Once built,
//! the tree answers substring queries in time proportional to the query
//! length plus the number of occurrences.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Nodes, edges, the construction engine and invariant checks
//! - [`source`] - Symbol sources (in-memory text, memory-mapped files)
//! - [`query`] - Substring search and named segment maps
//! - [`visit`] - Breadth-first and depth-first tree walkers
//! - [`output`] - Tree dumps and result formatting
//! - [`utils`] - Configuration and progress reporting
//!
//! ## Quick Start
//!
//! ```
//! use fxtree::source::StringSource;
//! use fxtree::tree::Ukkonen;
//!
//! let tree = Ukkonen::build(StringSource::new("mississippi")).unwrap();
//! assert_eq!(tree.search_str("ssi"), vec![2, 5]);
//! assert!(tree.search_str("sip").len() == 1);
//! ```
//!
//! ## Incremental construction
//!
//! The engine can also be driven step by step. Until `finish()` appends the
//! terminator the tree is implicit: a suffix that is also a prefix of a
//! longer one has no leaf of its own.
//!
//! ```
//! use fxtree::source::StringSource;
//! use fxtree::tree::Ukkonen;
//!
//! let mut engine = Ukkonen::new(StringSource::new("abab"));
//! while engine.extend().unwrap() {}
//! assert_eq!(engine.search(&[b'b' as u32]), vec![1]);
//!
//! engine.finish().unwrap();
//! assert_eq!(engine.search(&[b'b' as u32]), vec![1, 3]);
//! ```

pub mod output;
pub mod query;
pub mod source;
pub mod tree;
pub mod utils;
pub mod visit;
