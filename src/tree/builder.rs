//! Structural mutation: edge splitting
//!
//! Splitting is the only way internal nodes come into existence.

use super::error::TreeResult;
use super::suffix_tree::SuffixTree;
use super::types::{Edge, NodeId, Offset};
use crate::source::SymbolSource;

/// Split the edge `parent --edge--> child` after `split` symbols.
///
/// Afterwards `parent --top--> internal --bottom--> child`, where `top` holds
/// the first `split` symbols. Returns the new internal node, which has no
/// suffix link yet.
pub fn split<S: SymbolSource>(
    tree: &mut SuffixTree<S>,
    parent: NodeId,
    child: NodeId,
    edge: Edge,
    split: Offset,
) -> TreeResult<NodeId> {
    debug_assert!(split >= 1, "split offset {split} must be inside the edge");
    debug_assert!(
        edge.len().is_none_or(|len| split < len),
        "split offset {split} must be inside {edge}"
    );

    let (top, bottom) = edge.split_at(split);
    let top_key = tree.symbol_at(top.start());
    let bottom_key = tree.symbol_at(bottom.start());

    let internal = tree.add_internal(parent, top)?;
    tree.node_mut(parent)?.add_child(top_key, internal)?;
    tree.node_mut(internal)?.add_child(bottom_key, child)?;
    tree.node_mut(child)?.set_incoming(internal, bottom)?;

    tracing::debug!(parent, child, internal, %top, %bottom, "split edge");
    Ok(internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StringSource;
    use crate::tree::types::{DEFAULT_TERMINATOR, ROOT, Symbol};

    fn fed(text: &str) -> SuffixTree<StringSource> {
        let mut tree = SuffixTree::new(StringSource::new(text), DEFAULT_TERMINATOR);
        while tree.text_mut().next().unwrap().is_some() {}
        tree
    }

    #[test]
    fn test_split_open_leaf_edge() {
        // "ss": one leaf for 's' at offset 2 of "miss", split after one symbol
        let mut tree = fed("miss");
        let leaf = tree.add_leaf(ROOT, 2).unwrap();
        let edge = tree.incoming(leaf).unwrap();

        let internal = split(&mut tree, ROOT, leaf, edge, 1).unwrap();

        assert_eq!(
            tree.outgoing(ROOT, 's' as Symbol).unwrap(),
            Some((Edge::closed(2, 2), internal))
        );
        assert_eq!(
            tree.outgoing(internal, 's' as Symbol).unwrap(),
            Some((Edge::open(3), leaf))
        );
        assert_eq!(tree.parent(leaf), Ok(internal));
        assert_eq!(tree.parent(internal), Ok(ROOT));
        assert_eq!(tree.suffix_link(internal), Ok(None));
        assert_eq!(tree.depth(internal), Ok(1));
        // The leaf still spells the same suffix
        assert_eq!(tree.node(leaf).unwrap().suffix_offset(), Some(2));
        assert_eq!(tree.path_label(leaf).unwrap(), "ss");
    }

    #[test]
    fn test_split_closed_edge_keeps_grandchildren() {
        let mut tree = fed("abcab");
        let upper = tree.add_internal(ROOT, Edge::closed(0, 2)).unwrap();
        tree.node_mut(ROOT).unwrap().add_child('a' as Symbol, upper).unwrap();

        let lower = split(&mut tree, ROOT, upper, Edge::closed(0, 2), 2).unwrap();

        assert_eq!(tree.incoming(lower), Ok(Edge::closed(0, 1)));
        assert_eq!(tree.incoming(upper), Ok(Edge::closed(2, 2)));
        assert_eq!(tree.node(lower).unwrap().child('c' as Symbol), Some(upper));
        assert_eq!(tree.depth(lower), Ok(2));
    }
}
