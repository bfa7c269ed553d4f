//! Ukkonen's online suffix tree construction
//!
//! Each call to [`Ukkonen::extend`] consumes one symbol and runs one phase:
//! a chain of extensions that stops at the first Rule 3 (symbol already
//! implied) or at a branch created directly off the root. Leaf edges are
//! open, so Rule 1 growth costs nothing. Between chained extensions the
//! active point moves with a suffix-link hop, which keeps the whole build
//! amortized linear.

use super::builder;
use super::error::{TreeError, TreeResult};
use super::location::Location;
use super::suffix_tree::SuffixTree;
use super::traverser;
use super::types::{NodeId, Offset, Symbol, TreeConfig};
use crate::query::Searcher;
use crate::source::SymbolSource;

/// Incremental suffix tree builder
pub struct Ukkonen<S> {
    tree: SuffixTree<S>,
    /// Active point
    location: Location,
    /// Offset of the symbol being integrated
    offset: Offset,
    /// Internal node created earlier in this phase, waiting for its suffix link
    needs_suffix_link: Option<NodeId>,
    config: TreeConfig,
    finished: bool,
    failed: bool,
}

impl<S: SymbolSource> Ukkonen<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, TreeConfig::default())
    }

    pub fn with_config(source: S, config: TreeConfig) -> Self {
        Self {
            tree: SuffixTree::new(source, config.terminator),
            location: Location::root(),
            offset: 0,
            needs_suffix_link: None,
            config,
            finished: false,
            failed: false,
        }
    }

    /// Drain `source`, append the terminator, and return the finished tree
    pub fn build(source: S) -> TreeResult<SuffixTree<S>> {
        let mut engine = Self::new(source);
        engine.drain()?;
        engine.finish()?;
        Ok(engine.into_tree())
    }

    /// Integrate the next symbol from the source.
    ///
    /// Returns `Ok(false)` once the source is exhausted or the tree has been
    /// finished; further calls are no-ops.
    pub fn extend(&mut self) -> TreeResult<bool> {
        if self.failed {
            return Err(TreeError::Aborted);
        }
        if self.finished {
            return Ok(false);
        }
        let next = self.tree.text_mut().next();
        let Some(symbol) = self.poison_on_error(next)? else {
            return Ok(false);
        };
        self.run_phase(symbol)?;
        Ok(true)
    }

    /// Integrate every remaining symbol, returning how many were consumed
    pub fn drain(&mut self) -> TreeResult<u64> {
        let mut count = 0;
        while self.extend()? {
            count += 1;
        }
        Ok(count)
    }

    /// Append the terminator so every suffix ends at its own leaf.
    ///
    /// Symbols the source has not fed yet are abandoned. Calling this twice
    /// is a no-op.
    pub fn finish(&mut self) -> TreeResult<()> {
        if self.failed {
            return Err(TreeError::Aborted);
        }
        if self.finished {
            return Ok(());
        }
        let terminator = self.tree.text().terminator();
        let at = self.tree.text_mut().push_terminal();
        tracing::debug!(offset = at, terminator, "appending terminator");
        self.run_phase(terminator)?;
        self.finished = true;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tree(&self) -> &SuffixTree<S> {
        &self.tree
    }

    pub fn into_tree(self) -> SuffixTree<S> {
        self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Current active point
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Offset the next symbol will be integrated at
    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn search(&self, query: &[Symbol]) -> Vec<Offset> {
        Searcher::new(&self.tree).search(query)
    }

    fn run_phase(&mut self, symbol: Symbol) -> TreeResult<()> {
        tracing::trace!(offset = self.offset, symbol, location = %self.location, "phase");
        let result = self.extend_phase(symbol);
        let result = self.poison_on_error(result);
        self.offset += 1;
        result
    }

    /// Mark the engine failed if `result` is an error
    fn poison_on_error<T>(&mut self, result: TreeResult<T>) -> TreeResult<T> {
        if let Err(ref err) = result {
            tracing::warn!(offset = self.offset, error = %err, "construction aborted");
            self.failed = true;
        }
        result
    }

    fn extend_phase(&mut self, symbol: Symbol) -> TreeResult<()> {
        while self.extend_with_symbol(symbol)? {
            self.prepare_for_next_extension()?;
        }
        Ok(())
    }

    /// Move the active point to the next shorter suffix
    fn prepare_for_next_extension(&mut self) -> TreeResult<()> {
        traverser::traverse_to_next_suffix(&self.tree, &mut self.location)?;
        tracing::trace!(location = %self.location, "next suffix");

        // A node created in this phase whose suffix is the root gets linked
        // now; anything deeper is linked by the next extension
        if self.location.on_node && self.location.base == self.tree.root() {
            if let Some(pending) = self.needs_suffix_link.take() {
                self.tree.set_suffix_link(pending, self.location.base)?;
            }
        }
        Ok(())
    }

    /// Apply one extension. Returns `true` if the phase must continue with
    /// the next shorter suffix.
    fn extend_with_symbol(&mut self, symbol: Symbol) -> TreeResult<bool> {
        if self.location.on_node {
            self.extend_on_node(symbol)
        } else {
            self.extend_on_edge(symbol)
        }
    }

    fn extend_on_node(&mut self, symbol: Symbol) -> TreeResult<bool> {
        let base = self.location.base;

        if let Some(pending) = self.needs_suffix_link.take() {
            self.tree.set_suffix_link(pending, base)?;
        }

        // Rule 3: already implied
        if self.tree.node(base)?.child(symbol).is_some() {
            traverser::traverse_one(&self.tree, &mut self.location, symbol)?;
            return Ok(false);
        }

        // Rule 2: branch straight off this node
        let leaf = self.tree.add_leaf(base, self.offset)?;
        tracing::trace!(parent = base, leaf, "new leaf");
        Ok(!self.tree.node(base)?.is_root())
    }

    fn extend_on_edge(&mut self, symbol: Symbol) -> TreeResult<bool> {
        let below = self.location.base;
        let edge = self.tree.incoming(below)?;
        let offset_from_top = self.location.offset_from_top;

        // Rule 3: next symbol on the edge matches
        if self.tree.symbol_at(edge.start() + offset_from_top) == symbol {
            traverser::traverse_edge_value(&self.tree, &mut self.location)?;
            return Ok(false);
        }

        let parent = self.tree.parent(below)?;

        // Nothing matched along this edge yet: branch from the parent itself
        if offset_from_top == 0 {
            self.location.move_to_node(parent);
            return self.extend_on_node(symbol);
        }

        // Rule 2: split the edge and branch from the new internal node
        let internal = builder::split(&mut self.tree, parent, below, edge, offset_from_top)?;
        if let Some(previous) = self.needs_suffix_link.replace(internal) {
            self.tree.set_suffix_link(previous, internal)?;
        }
        let leaf = self.tree.add_leaf(internal, self.offset)?;
        tracing::trace!(parent = internal, leaf, "new leaf after split");

        self.location.move_to_node(internal);
        Ok(true)
    }
}
