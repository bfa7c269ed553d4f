//! Suffix tree storage
//!
//! Nodes live in an arena addressed by [`NodeId`]. The tree also owns the
//! [`Sequence`] its edge labels point into, so a finished tree can be
//! searched without any other context.

use super::error::{TreeError, TreeResult};
use super::node::{Node, NodeKind};
use super::types::{Edge, NodeId, Offset, ROOT, Symbol};
use crate::query::Searcher;
use crate::source::{Sequence, SymbolSource, symbols_from_str};

pub struct SuffixTree<S> {
    nodes: Vec<Node>,
    text: Sequence<S>,
}

impl<S: SymbolSource> SuffixTree<S> {
    pub(crate) fn new(source: S, terminator: Symbol) -> Self {
        Self {
            nodes: vec![Node::root()],
            text: Sequence::with_terminator(source, terminator),
        }
    }

    /// Id of the root node
    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> TreeResult<&Node> {
        self.nodes.get(id as usize).ok_or(TreeError::UnknownNode(id))
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node> {
        self.nodes.get_mut(id as usize).ok_or(TreeError::UnknownNode(id))
    }

    /// All nodes with their ids, in allocation order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (i as NodeId, node))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn text(&self) -> &Sequence<S> {
        &self.text
    }

    pub(crate) fn text_mut(&mut self) -> &mut Sequence<S> {
        &mut self.text
    }

    /// Number of symbols integrated into the tree
    #[inline]
    pub fn len(&self) -> Offset {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn symbol_at(&self, offset: Offset) -> Symbol {
        self.text.symbol_at(offset)
    }

    /// Edge and child reached from `id` by the edge starting with `symbol`
    pub fn outgoing(&self, id: NodeId, symbol: Symbol) -> TreeResult<Option<(Edge, NodeId)>> {
        let Some(child) = self.node(id)?.child(symbol) else {
            return Ok(None);
        };
        Ok(Some((self.incoming(child)?, child)))
    }

    /// Incoming edge of a non-root node
    pub fn incoming(&self, id: NodeId) -> TreeResult<Edge> {
        let node = self.node(id)?;
        node.incoming().ok_or(TreeError::InvalidOperation {
            operation: "get incoming edge",
            kind: node.kind(),
        })
    }

    /// Parent of a non-root node
    pub fn parent(&self, id: NodeId) -> TreeResult<NodeId> {
        let node = self.node(id)?;
        node.parent().ok_or(TreeError::InvalidOperation {
            operation: "get parent",
            kind: node.kind(),
        })
    }

    pub fn suffix_link(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.node(id)?.suffix_link()
    }

    pub(crate) fn set_suffix_link(&mut self, id: NodeId, target: NodeId) -> TreeResult<()> {
        self.node(target)?;
        self.node_mut(id)?.set_suffix_link(target)
    }

    /// Path length from the root. Open leaf edges are resolved against the
    /// current sequence length.
    pub fn depth(&self, id: NodeId) -> TreeResult<Offset> {
        match *self.node(id)? {
            Node::Root { .. } => Ok(0),
            Node::Internal { depth, .. } => Ok(depth),
            Node::Leaf {
                parent, incoming, ..
            } => Ok(self.depth(parent)? + incoming.resolved_len(self.len())),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Hang a new open leaf off `parent` for the symbol at `offset`
    pub(crate) fn add_leaf(&mut self, parent: NodeId, offset: Offset) -> TreeResult<NodeId> {
        if self.node(parent)?.is_leaf() {
            return Err(TreeError::InvalidOperation {
                operation: "add child",
                kind: NodeKind::Leaf,
            });
        }
        let symbol = self.symbol_at(offset);
        let suffix_offset = offset - self.depth(parent)?;
        let leaf = self.push(Node::leaf(parent, Edge::open(offset), suffix_offset));
        self.node_mut(parent)?.add_child(symbol, leaf)?;
        Ok(leaf)
    }

    /// Allocate an internal node below `parent`. The caller registers it in
    /// the parent's outgoing map.
    pub(crate) fn add_internal(&mut self, parent: NodeId, incoming: Edge) -> TreeResult<NodeId> {
        let depth = self.depth(parent)? + incoming.resolved_len(self.len());
        Ok(self.push(Node::internal(parent, incoming, depth)))
    }

    /// Suffix offsets of every leaf at or below `id`, unsorted
    pub fn leaf_offsets(&self, id: NodeId) -> TreeResult<Vec<Offset>> {
        let mut offsets = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            match node.suffix_offset() {
                Some(offset) => offsets.push(offset),
                None => {
                    if let Some(children) = node.children() {
                        stack.extend(children.values().copied());
                    }
                }
            }
        }
        Ok(offsets)
    }

    /// Label spelled by an edge, resolved against the current sequence length
    pub fn edge_label(&self, edge: Edge) -> String {
        self.text.label(edge.start(), edge.resolved_end(self.len()))
    }

    /// Concatenated labels from the root down to `id`
    pub fn path_label(&self, id: NodeId) -> TreeResult<String> {
        let mut parts = Vec::new();
        let mut current = id;
        while let Some(edge) = self.node(current)?.incoming() {
            parts.push(self.edge_label(edge));
            current = self.parent(current)?;
        }
        parts.reverse();
        Ok(parts.concat())
    }

    /// Sorted offsets of every occurrence of `query`
    pub fn search(&self, query: &[Symbol]) -> Vec<Offset> {
        Searcher::new(self).search(query)
    }

    /// [`search`](Self::search) with the query encoded one symbol per char
    pub fn search_str(&self, query: &str) -> Vec<Offset> {
        self.search(&symbols_from_str(query))
    }

    /// Whether `query` occurs anywhere in the sequence
    pub fn contains(&self, query: &[Symbol]) -> bool {
        Searcher::new(self).locate(query).is_some()
    }
}
