//! Cursor into the tree
//!
//! A location is either exactly on a node, or partway down an edge:
//!
//! - on a node: `base` is that node, `offset_from_top` is 0
//! - on an edge: `base` is the node *below* the edge, and `offset_from_top`
//!   counts the symbols already matched past the top of the edge, between 1
//!   and the edge length minus one

use super::error::TreeResult;
use super::suffix_tree::SuffixTree;
use super::types::{Edge, NodeId, Offset, ROOT};
use crate::source::SymbolSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub on_node: bool,
    pub base: NodeId,
    pub offset_from_top: Offset,
}

impl Location {
    /// Exactly on `node`
    pub fn at(node: NodeId) -> Self {
        Self {
            on_node: true,
            base: node,
            offset_from_top: 0,
        }
    }

    /// Exactly on the root
    pub fn root() -> Self {
        Self::at(ROOT)
    }

    /// `offset_from_top` symbols down the incoming edge of `below`
    pub fn on_edge(below: NodeId, offset_from_top: Offset) -> Self {
        Self {
            on_node: false,
            base: below,
            offset_from_top,
        }
    }

    pub(crate) fn move_to_node(&mut self, node: NodeId) {
        *self = Self::at(node);
    }

    pub(crate) fn move_to_edge(&mut self, below: NodeId, offset_from_top: Offset) {
        *self = Self::on_edge(below, offset_from_top);
    }

    /// The edge being traversed, `None` when on a node
    pub fn edge<S: SymbolSource>(&self, tree: &SuffixTree<S>) -> TreeResult<Option<Edge>> {
        if self.on_node {
            return Ok(None);
        }
        tree.incoming(self.base).map(Some)
    }

    /// Number of symbols spelled from the root down to this location
    pub fn depth<S: SymbolSource>(&self, tree: &SuffixTree<S>) -> TreeResult<Offset> {
        if self.on_node {
            tree.depth(self.base)
        } else {
            Ok(tree.depth(tree.parent(self.base)?)? + self.offset_from_top)
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.on_node {
            write!(f, "on node {}", self.base)
        } else {
            write!(
                f,
                "on edge above node {}, offset {}",
                self.base, self.offset_from_top
            )
        }
    }
}
