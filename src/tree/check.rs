//! Structural verification
//!
//! Walks every node reachable from the root and reports the first broken
//! invariant. Used by tests, fuzzing and the `check` command.

use super::error::TreeError;
use super::suffix_tree::SuffixTree;
use super::types::{NodeId, Offset};
use crate::source::SymbolSource;
use thiserror::Error;

/// A broken tree invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("node {node}: child {child} is keyed by {key} but its edge starts with {actual}")]
    KeyMismatch {
        node: NodeId,
        child: NodeId,
        key: u32,
        actual: u32,
    },

    #[error("node {child} is registered under {node} but its parent is {parent}")]
    ParentMismatch {
        node: NodeId,
        child: NodeId,
        parent: NodeId,
    },

    #[error("internal node {0} has no suffix link")]
    MissingSuffixLink(NodeId),

    #[error("node {node} at depth {depth} links to {link} at depth {link_depth}")]
    SuffixLinkDepth {
        node: NodeId,
        depth: Offset,
        link: NodeId,
        link_depth: Offset,
    },

    #[error("node {node} has cached depth {cached} but its path spells {actual} symbols")]
    DepthMismatch {
        node: NodeId,
        cached: Offset,
        actual: Offset,
    },

    #[error("{leaves} leaves for {symbols} symbols")]
    LeafCount { leaves: usize, symbols: Offset },

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Check outgoing keys, parent links, suffix links and cached depths
pub fn verify<S: SymbolSource>(tree: &SuffixTree<S>) -> Result<(), Violation> {
    verify_reachable(tree).map(|_| ())
}

/// [`verify`], plus one leaf per suffix (holds once the tree is finished)
pub fn verify_finished<S: SymbolSource>(tree: &SuffixTree<S>) -> Result<(), Violation> {
    let leaves = verify_reachable(tree)?;
    if leaves as Offset != tree.len() {
        return Err(Violation::LeafCount {
            leaves,
            symbols: tree.len(),
        });
    }
    Ok(())
}

/// Returns the number of leaves reached
fn verify_reachable<S: SymbolSource>(tree: &SuffixTree<S>) -> Result<usize, Violation> {
    let mut leaves = 0;
    // (node, path length spelled from the root)
    let mut stack: Vec<(NodeId, Offset)> = vec![(tree.root(), 0)];

    while let Some((id, path_len)) = stack.pop() {
        let node = tree.node(id)?;

        if node.is_leaf() {
            leaves += 1;
            continue;
        }

        if node.is_internal() {
            let cached = tree.depth(id)?;
            if cached != path_len {
                return Err(Violation::DepthMismatch {
                    node: id,
                    cached,
                    actual: path_len,
                });
            }
            check_suffix_link(tree, id)?;
        }

        for (key, child) in node.sorted_children() {
            let edge = tree.incoming(child)?;
            let actual = tree.symbol_at(edge.start());
            if actual != key {
                return Err(Violation::KeyMismatch {
                    node: id,
                    child,
                    key,
                    actual,
                });
            }
            let parent = tree.parent(child)?;
            if parent != id {
                return Err(Violation::ParentMismatch {
                    node: id,
                    child,
                    parent,
                });
            }
            stack.push((child, path_len + edge.resolved_len(tree.len())));
        }
    }

    Ok(leaves)
}

fn check_suffix_link<S: SymbolSource>(tree: &SuffixTree<S>, id: NodeId) -> Result<(), Violation> {
    let link = tree
        .suffix_link(id)?
        .ok_or(Violation::MissingSuffixLink(id))?;
    let depth = tree.depth(id)?;
    let link_depth = tree.depth(link)?;
    if depth != link_depth + 1 {
        return Err(Violation::SuffixLinkDepth {
            node: id,
            depth,
            link,
            link_depth,
        });
    }
    Ok(())
}
