use super::Visitor;
use crate::source::SymbolSource;
use crate::tree::error::TreeResult;
use crate::tree::suffix_tree::SuffixTree;
use crate::tree::types::{NodeId, Offset};
use serde::Serialize;

/// One internal node and where its suffix link points
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub node: NodeId,
    pub link: Option<NodeId>,
    pub depth: Offset,
    pub link_depth: Option<Offset>,
}

/// Collects the suffix link of every internal node
#[derive(Debug, Default)]
pub struct SuffixLinkCollector {
    links: Vec<LinkEntry>,
}

impl SuffixLinkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    pub fn into_links(self) -> Vec<LinkEntry> {
        self.links
    }
}

impl<S: SymbolSource> Visitor<S> for SuffixLinkCollector {
    fn pre_visit(&mut self, _tree: &SuffixTree<S>, _node: NodeId) -> TreeResult<bool> {
        Ok(true)
    }

    fn visit(&mut self, tree: &SuffixTree<S>, node: NodeId) -> TreeResult<bool> {
        let n = tree.node(node)?;
        if n.is_leaf() {
            return Ok(false);
        }
        if n.is_internal() {
            let link = n.suffix_link()?;
            let link_depth = link.map(|l| tree.depth(l)).transpose()?;
            self.links.push(LinkEntry {
                node,
                link,
                depth: tree.depth(node)?,
                link_depth,
            });
        }
        Ok(true)
    }
}

/// Emits the suffixes sharing each prefix of at least `min_depth` symbols.
///
/// The first non-leaf node on a path whose depth reaches `min_depth` yields
/// the sorted offsets of every leaf below it, and the walk does not descend
/// further. Each group is a substring occurring at least twice.
#[derive(Debug)]
pub struct DepthVisitor {
    min_depth: Offset,
    groups: Vec<Vec<Offset>>,
}

impl DepthVisitor {
    pub fn new(min_depth: Offset) -> Self {
        Self {
            min_depth,
            groups: Vec::new(),
        }
    }

    pub fn min_depth(&self) -> Offset {
        self.min_depth
    }

    /// Number of nodes that emitted a group
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[Vec<Offset>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<Offset>> {
        self.groups
    }
}

impl<S: SymbolSource> Visitor<S> for DepthVisitor {
    fn pre_visit(&mut self, tree: &SuffixTree<S>, node: NodeId) -> TreeResult<bool> {
        if !tree.node(node)?.is_leaf() && tree.depth(node)? >= self.min_depth {
            let mut offsets = tree.leaf_offsets(node)?;
            offsets.sort_unstable();
            self.groups.push(offsets);
            return Ok(false);
        }
        Ok(true)
    }

    fn visit(&mut self, _tree: &SuffixTree<S>, _node: NodeId) -> TreeResult<bool> {
        Ok(true)
    }

    fn finish(&mut self) {
        tracing::debug!(min_depth = self.min_depth, groups = self.groups.len(), "depth walk done");
    }
}
