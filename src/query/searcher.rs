//! Substring search over a built tree
//!
//! A query is walked down from the root one symbol at a time. Every leaf at
//! or below the final location starts an occurrence.

use crate::source::SymbolSource;
use crate::tree::error::TreeResult;
use crate::tree::location::Location;
use crate::tree::suffix_tree::SuffixTree;
use crate::tree::traverser;
use crate::tree::types::{Offset, Symbol};
use rayon::prelude::*;

/// Batches at least this large are searched on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

pub struct Searcher<'a, S> {
    tree: &'a SuffixTree<S>,
    parallel_threshold: usize,
}

impl<'a, S: SymbolSource> Searcher<'a, S> {
    pub fn new(tree: &'a SuffixTree<S>) -> Self {
        Self {
            tree,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Walk `query` from the root, `Ok(None)` when it leaves the tree
    pub fn try_locate(&self, query: &[Symbol]) -> TreeResult<Option<Location>> {
        let mut location = Location::root();
        for &symbol in query {
            if !traverser::traverse_down_value(self.tree, &mut location, symbol)? {
                return Ok(None);
            }
        }
        Ok(Some(location))
    }

    /// Where `query` ends in the tree. A structural error counts as a miss.
    pub fn locate(&self, query: &[Symbol]) -> Option<Location> {
        self.try_locate(query).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "search walked into a broken tree");
            None
        })
    }

    /// Sorted start offsets of every occurrence of `query`.
    ///
    /// An empty query matches at the root and returns every suffix.
    pub fn search(&self, query: &[Symbol]) -> Vec<Offset> {
        let Some(location) = self.locate(query) else {
            return Vec::new();
        };
        // On an edge, the node below holds exactly the same suffixes
        match self.tree.leaf_offsets(location.base) {
            Ok(mut offsets) => {
                offsets.sort_unstable();
                offsets
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to collect leaves");
                Vec::new()
            }
        }
    }
}

impl<S: SymbolSource + Sync> Searcher<'_, S> {
    /// Search every query, results in query order
    pub fn search_many(&self, queries: &[Vec<Symbol>]) -> Vec<Vec<Offset>> {
        if queries.len() >= self.parallel_threshold {
            tracing::debug!(queries = queries.len(), "parallel search");
            queries.par_iter().map(|q| self.search(q)).collect()
        } else {
            queries.iter().map(|q| self.search(q)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{StringSource, symbols_from_str};
    use crate::tree::types::DEFAULT_TERMINATOR;
    use crate::tree::ukkonen::Ukkonen;

    fn mississippi() -> SuffixTree<StringSource> {
        Ukkonen::build(StringSource::new("mississippi")).unwrap()
    }

    fn find(tree: &SuffixTree<StringSource>, query: &str) -> Vec<Offset> {
        Searcher::new(tree).search(&symbols_from_str(query))
    }

    #[test]
    fn test_search_single_symbols() {
        let tree = mississippi();
        assert_eq!(find(&tree, "i"), vec![1, 4, 7, 10]);
        assert_eq!(find(&tree, "s"), vec![2, 3, 5, 6]);
        assert_eq!(find(&tree, "p"), vec![8, 9]);
        assert_eq!(find(&tree, "m"), vec![0]);
        assert_eq!(Searcher::new(&tree).search(&[DEFAULT_TERMINATOR]), vec![11]);
        assert!(find(&tree, "$").is_empty());
    }

    #[test]
    fn test_search_ends_mid_edge() {
        let tree = mississippi();
        assert_eq!(find(&tree, "ip"), vec![7]);
        assert_eq!(find(&tree, "ssi"), vec![2, 5]);
        assert_eq!(find(&tree, "issi"), vec![1, 4]);
        assert_eq!(find(&tree, "mississippi"), vec![0]);
        assert_eq!(find(&tree, "sis"), vec![3]);
    }

    #[test]
    fn test_search_misses() {
        let tree = mississippi();
        assert!(find(&tree, "x").is_empty());
        assert!(find(&tree, "ssss").is_empty());
        assert!(find(&tree, "mississippi$x").is_empty());
    }

    #[test]
    fn test_search_text_containing_dollar() {
        let tree = Ukkonen::build(StringSource::new("a$xa")).unwrap();
        assert_eq!(find(&tree, "a"), vec![0, 3]);
        assert_eq!(find(&tree, "$x"), vec![1]);

        let tree = Ukkonen::build(StringSource::new("price: 5$ or 5")).unwrap();
        assert_eq!(find(&tree, "5"), vec![7, 13]);
        assert_eq!(find(&tree, "5$"), vec![7]);
    }

    #[test]
    fn test_empty_query_returns_every_suffix() {
        let tree = mississippi();
        assert_eq!(find(&tree, ""), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_search_unfinished_tree_resolves_open_edges() {
        let mut engine = Ukkonen::new(StringSource::new("abab"));
        engine.drain().unwrap();
        let searcher = Searcher::new(engine.tree());
        // "ab" at 2 is still implicit, only the longest suffix has a leaf
        assert_eq!(searcher.search(&symbols_from_str("ab")), vec![0]);
        assert_eq!(searcher.search(&symbols_from_str("abab")), vec![0]);
        // cannot run past the integrated text
        assert!(searcher.search(&symbols_from_str("ababa")).is_empty());
    }

    #[test]
    fn test_locate_reports_position() {
        let tree = mississippi();
        let searcher = Searcher::new(&tree);
        let loc = searcher.locate(&symbols_from_str("mis")).unwrap();
        assert!(!loc.on_node);
        assert_eq!(loc.offset_from_top, 3);
        assert_eq!(searcher.locate(&symbols_from_str("")), Some(Location::root()));
        assert_eq!(searcher.locate(&symbols_from_str("q")), None);
    }

    #[test]
    fn test_search_many_sequential_and_parallel_agree() {
        let tree = mississippi();
        let queries: Vec<Vec<Symbol>> = ["i", "ss", "ppi", "x", "", "issip"]
            .iter()
            .map(|q| symbols_from_str(q))
            .collect();

        let sequential = Searcher::new(&tree)
            .with_parallel_threshold(usize::MAX)
            .search_many(&queries);
        let parallel = Searcher::new(&tree)
            .with_parallel_threshold(1)
            .search_many(&queries);

        assert_eq!(sequential, parallel);
        assert_eq!(sequential[0], vec![1, 4, 7, 10]);
        assert_eq!(sequential[3], Vec::<Offset>::new());
        assert_eq!(sequential[5], vec![4]);
    }
}
