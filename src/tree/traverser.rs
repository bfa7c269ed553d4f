//! Moving a [`Location`] through the tree
//!
//! Construction treats open leaf edges as unbounded: the active point can
//! never sit at the end of a growing leaf. Search resolves open edges against
//! the current sequence length instead, so a query cannot run past the end of
//! the input.

use super::error::{TreeError, TreeResult};
use super::location::Location;
use super::suffix_tree::SuffixTree;
use super::types::Symbol;
use crate::source::SymbolSource;

/// Step from a node onto the edge starting with `symbol`.
///
/// The edge must exist. Lands exactly on the child when the edge has length
/// one, otherwise one symbol down the edge.
pub fn traverse_one<S: SymbolSource>(
    tree: &SuffixTree<S>,
    location: &mut Location,
    symbol: Symbol,
) -> TreeResult<()> {
    let (edge, child) = tree
        .outgoing(location.base, symbol)?
        .ok_or(TreeError::MissingEdge {
            node: location.base,
            symbol,
        })?;
    if edge.len() == Some(1) {
        location.move_to_node(child);
    } else {
        location.move_to_edge(child, 1);
    }
    Ok(())
}

/// Advance one symbol down the current edge (whose next symbol is known to
/// match), landing on the node below once the edge is used up
pub fn traverse_edge_value<S: SymbolSource>(
    tree: &SuffixTree<S>,
    location: &mut Location,
) -> TreeResult<()> {
    let edge = tree.incoming(location.base)?;
    location.offset_from_top += 1;
    if edge.len() == Some(location.offset_from_top) {
        location.move_to_node(location.base);
    }
    Ok(())
}

/// Follow `symbol` one step from `location`, resolving open edges against
/// the current sequence length.
///
/// Returns `false` and leaves the location untouched when `symbol` does not
/// continue the path.
pub fn traverse_down_value<S: SymbolSource>(
    tree: &SuffixTree<S>,
    location: &mut Location,
    symbol: Symbol,
) -> TreeResult<bool> {
    let global_end = tree.len();

    if location.on_node {
        let Some((edge, child)) = tree.outgoing(location.base, symbol)? else {
            return Ok(false);
        };
        if edge.resolved_len(global_end) == 1 {
            location.move_to_node(child);
        } else {
            location.move_to_edge(child, 1);
        }
        return Ok(true);
    }

    let edge = tree.incoming(location.base)?;
    let offset_to_check = edge.start() + location.offset_from_top;
    if offset_to_check >= global_end || tree.symbol_at(offset_to_check) != symbol {
        return Ok(false);
    }
    location.offset_from_top += 1;
    if location.offset_from_top == edge.resolved_len(global_end) {
        location.move_to_node(location.base);
    }
    Ok(true)
}

/// Move `location` from the string `cα` it spells to the string `α`.
///
/// Goes up to the parent (remembering how many symbols were matched below
/// it), follows the parent's suffix link (the root drops one symbol
/// instead), then re-descends with skip/count: whole edges are jumped by
/// length, only the first symbol of each edge is inspected.
pub fn traverse_to_next_suffix<S: SymbolSource>(
    tree: &SuffixTree<S>,
    location: &mut Location,
) -> TreeResult<()> {
    // Up
    let base = location.base;
    let node = tree.node(base)?;
    if node.is_root() {
        return Ok(());
    }
    let edge = tree.incoming(base)?;
    let mut number_matched = if location.on_node {
        edge.len().ok_or(TreeError::InvalidOperation {
            operation: "traverse up from",
            kind: node.kind(),
        })?
    } else {
        location.offset_from_top
    };
    let mut resume_offset = edge.start();
    let parent = tree.parent(base)?;

    // Suffix link
    let mut current = if tree.node(parent)?.is_root() {
        number_matched -= 1;
        resume_offset += 1;
        parent
    } else {
        tree.suffix_link(parent)?
            .ok_or(TreeError::MissingSuffixLink(parent))?
    };
    location.move_to_node(current);

    tracing::trace!(
        from = base,
        via = current,
        number_matched,
        resume_offset,
        "suffix hop"
    );

    // Skip/count down
    while number_matched > 0 {
        let symbol = tree.symbol_at(resume_offset);
        let (edge, child) = tree
            .outgoing(current, symbol)?
            .ok_or(TreeError::MissingEdge {
                node: current,
                symbol,
            })?;
        match edge.len() {
            Some(len) if number_matched >= len => {
                number_matched -= len;
                resume_offset += len;
                current = child;
                location.move_to_node(child);
            }
            _ => {
                location.move_to_edge(child, number_matched);
                number_matched = 0;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{StringSource, symbols_from_str};
    use crate::tree::types::ROOT;
    use crate::tree::ukkonen::Ukkonen;

    fn built(text: &str) -> SuffixTree<StringSource> {
        let mut engine = Ukkonen::new(StringSource::new(text));
        engine.drain().unwrap();
        engine.into_tree()
    }

    fn walk(tree: &SuffixTree<StringSource>, query: &str) -> Option<Location> {
        let mut location = Location::root();
        for symbol in symbols_from_str(query) {
            if !traverse_down_value(tree, &mut location, symbol).unwrap() {
                return None;
            }
        }
        Some(location)
    }

    #[test]
    fn test_traverse_down_value_on_node() {
        let tree = built("mississippi$");
        let loc = walk(&tree, "i").unwrap();
        // 'i' is a one-symbol edge to an internal node
        assert!(loc.on_node);
        assert_eq!(tree.depth(loc.base), Ok(1));
    }

    #[test]
    fn test_traverse_down_value_on_edge() {
        let tree = built("mississippi$");
        let loc = walk(&tree, "mis").unwrap();
        assert!(!loc.on_node);
        assert_eq!(loc.offset_from_top, 3);
        assert_eq!(loc.depth(&tree), Ok(3));
    }

    #[test]
    fn test_traverse_down_value_mismatch_leaves_location() {
        let tree = built("mississippi$");
        let mut loc = walk(&tree, "ss").unwrap();
        let before = loc;
        assert!(!traverse_down_value(&tree, &mut loc, 'x' as Symbol).unwrap());
        assert_eq!(loc, before);

        let mut root = Location::root();
        assert!(!traverse_down_value(&tree, &mut root, 'z' as Symbol).unwrap());
        assert_eq!(root, Location::root());
    }

    #[test]
    fn test_open_edge_ends_at_leaf() {
        let tree = built("mississippi$");
        let loc = walk(&tree, "i$").unwrap();
        assert!(loc.on_node);
        assert!(tree.node(loc.base).unwrap().is_leaf());
        assert!(walk(&tree, "i$i").is_none());
        assert!(walk(&tree, "ppi$x").is_none());
    }

    #[test]
    fn test_traverse_one_missing_edge() {
        let tree = built("ab");
        let mut loc = Location::root();
        assert_eq!(
            traverse_one(&tree, &mut loc, 'q' as Symbol),
            Err(TreeError::MissingEdge { node: ROOT, symbol: 'q' as Symbol })
        );
    }

    #[test]
    fn test_next_suffix_from_edge() {
        let tree = built("mississippi$");
        // "mis" -> "is" -> "s"
        let mut loc = walk(&tree, "mis").unwrap();
        assert!(!loc.on_node);
        traverse_to_next_suffix(&tree, &mut loc).unwrap();
        assert_eq!(loc, walk(&tree, "is").unwrap());
        assert!(!loc.on_node);
        traverse_to_next_suffix(&tree, &mut loc).unwrap();
        assert_eq!(loc, walk(&tree, "s").unwrap());
    }

    #[test]
    fn test_next_suffix_skips_whole_edges() {
        let tree = built("mississippi$");
        // "issip" sits below the "issi" internal node
        let mut loc = walk(&tree, "issip").unwrap();
        traverse_to_next_suffix(&tree, &mut loc).unwrap();
        assert_eq!(loc, walk(&tree, "ssip").unwrap());
    }

    #[test]
    fn test_next_suffix_from_internal_node() {
        let tree = built("mississippi$");
        // "ssi" -> "si" -> "i", all three explicit nodes
        let mut loc = walk(&tree, "ssi").unwrap();
        assert!(loc.on_node);
        traverse_to_next_suffix(&tree, &mut loc).unwrap();
        assert_eq!(loc, walk(&tree, "si").unwrap());
        traverse_to_next_suffix(&tree, &mut loc).unwrap();
        assert_eq!(loc, walk(&tree, "i").unwrap());
    }

    #[test]
    fn test_next_suffix_to_root() {
        let tree = built("mississippi$");
        let mut loc = walk(&tree, "p").unwrap();
        traverse_to_next_suffix(&tree, &mut loc).unwrap();
        assert_eq!(loc, Location::root());
    }
}
