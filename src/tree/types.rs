//! Core types for suffix tree construction and search
//!
//! Edges never store their label. They hold a half-open range of offsets into
//! the symbol sequence, and leaf edges stay open until the input ends.

use serde::{Deserialize, Serialize};

/// A single unit of the input sequence (a Unicode scalar value or a byte)
pub type Symbol = u32;

/// Signed position into the symbol sequence
pub type Offset = i64;

/// Index of a node in the tree's node arena
pub type NodeId = u32;

/// The root is always the first node allocated
pub const ROOT: NodeId = 0;

/// Default terminal sentinel appended by `finish()`.
///
/// Sources emit Unicode scalar values or bytes, so this value never occurs in
/// the text and the finished tree always has one leaf per suffix.
pub const DEFAULT_TERMINATOR: Symbol = Symbol::MAX;

/// How the default sentinel is rendered in labels
pub const TERMINATOR_GLYPH: char = '$';

/// Label of a tree edge, as a range of offsets into the symbol sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Label covers `start..=end`
    Closed { start: Offset, end: Offset },
    /// Leaf edge still growing: label covers `start..` up to the global end
    Open { start: Offset },
}

impl Edge {
    /// Create a closed edge covering `start..=end`
    pub fn closed(start: Offset, end: Offset) -> Self {
        debug_assert!(start <= end, "closed edge [{start},{end}] is empty");
        Edge::Closed { start, end }
    }

    /// Create an open leaf edge starting at `start`
    pub fn open(start: Offset) -> Self {
        Edge::Open { start }
    }

    pub fn start(&self) -> Offset {
        match *self {
            Edge::Closed { start, .. } | Edge::Open { start } => start,
        }
    }

    /// Inclusive end offset, `None` while the edge is open
    pub fn end(&self) -> Option<Offset> {
        match *self {
            Edge::Closed { end, .. } => Some(end),
            Edge::Open { .. } => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Edge::Open { .. })
    }

    /// Label length, `None` for an open edge (unbounded, grows with input)
    #[inline]
    pub fn len(&self) -> Option<Offset> {
        match *self {
            Edge::Closed { start, end } => Some(end - start + 1),
            Edge::Open { .. } => None,
        }
    }

    /// Label length once resolved against the number of symbols integrated so far
    #[inline]
    pub fn resolved_len(&self, global_end: Offset) -> Offset {
        match *self {
            Edge::Closed { start, end } => end - start + 1,
            Edge::Open { start } => global_end - start,
        }
    }

    /// Exclusive end offset once resolved against `global_end`
    pub fn resolved_end(&self, global_end: Offset) -> Offset {
        self.start() + self.resolved_len(global_end)
    }

    /// Split into a closed top half of `split` symbols and the remaining bottom half
    pub(crate) fn split_at(&self, split: Offset) -> (Edge, Edge) {
        let start = self.start();
        let top = Edge::closed(start, start + split - 1);
        let bottom = match *self {
            Edge::Closed { end, .. } => Edge::closed(start + split, end),
            Edge::Open { .. } => Edge::open(start + split),
        };
        (top, bottom)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Edge::Closed { start, end } => write!(f, "[{},{}]", start, end),
            Edge::Open { start } => write!(f, "[{},..]", start),
        }
    }
}

/// Configuration for tree construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Sentinel appended by `finish()` so every suffix ends at its own leaf
    pub terminator: Symbol,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_edge_length() {
        let edge = Edge::closed(2, 4);
        assert_eq!(edge.len(), Some(3));
        assert_eq!(edge.resolved_len(100), 3);
        assert_eq!(edge.end(), Some(4));
        assert!(!edge.is_open());
    }

    #[test]
    fn test_open_edge_resolves_against_global_end() {
        let edge = Edge::open(3);
        assert_eq!(edge.len(), None);
        assert_eq!(edge.resolved_len(5), 2);
        assert_eq!(edge.resolved_end(5), 5);
        assert_eq!(edge.resolved_len(12), 9);
    }

    #[test]
    fn test_split_open_edge() {
        let (top, bottom) = Edge::open(1).split_at(4);
        assert_eq!(top, Edge::closed(1, 4));
        assert_eq!(bottom, Edge::open(5));
    }

    #[test]
    fn test_split_closed_edge() {
        let (top, bottom) = Edge::closed(3, 7).split_at(2);
        assert_eq!(top, Edge::closed(3, 4));
        assert_eq!(bottom, Edge::closed(5, 7));
        assert_eq!(top.len().unwrap() + bottom.len().unwrap(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Edge::closed(0, 2).to_string(), "[0,2]");
        assert_eq!(Edge::open(4).to_string(), "[4,..]");
    }

    #[test]
    fn test_default_terminator() {
        let terminator = TreeConfig::default().terminator;
        assert_eq!(terminator, DEFAULT_TERMINATOR);
        assert!(char::from_u32(terminator).is_none());
        assert!(terminator > u8::MAX as Symbol);
    }
}
