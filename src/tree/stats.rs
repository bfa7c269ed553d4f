//! Tree statistics

use super::error::TreeResult;
use super::suffix_tree::SuffixTree;
use super::node::Node;
use super::types::Offset;
use crate::source::SymbolSource;
use serde::Serialize;

/// Shape summary of a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Symbols integrated, terminator included
    pub symbols: Offset,
    /// All nodes, root included
    pub nodes: usize,
    pub internal_nodes: usize,
    pub leaves: usize,
    /// Longest path label ending at an internal node, i.e. the longest
    /// repeated substring
    pub max_internal_depth: Offset,
}

impl TreeStats {
    pub fn compute<S: SymbolSource>(tree: &SuffixTree<S>) -> TreeResult<Self> {
        let mut stats = TreeStats {
            symbols: tree.len(),
            nodes: tree.node_count(),
            ..Default::default()
        };

        for (_, node) in tree.nodes() {
            match *node {
                Node::Root { .. } => {}
                Node::Internal { depth, .. } => {
                    stats.internal_nodes += 1;
                    stats.max_internal_depth = stats.max_internal_depth.max(depth);
                }
                Node::Leaf { .. } => stats.leaves += 1,
            }
        }

        Ok(stats)
    }
}
