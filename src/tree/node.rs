//! Tree nodes
//!
//! A node is one of three variants. Root and Internal nodes own an outgoing
//! map keyed by the first symbol of each child's incoming edge. Internal and
//! Leaf nodes have a parent and an incoming edge. Only Internal nodes carry a
//! suffix link, and only Leaf nodes carry a suffix offset.
//!
//! Parent and suffix-link fields are plain arena ids, never ownership.

use super::error::{TreeError, TreeResult};
use super::types::{Edge, NodeId, Offset, Symbol};
use rustc_hash::FxHashMap;

/// Outgoing map: first symbol of the child's incoming edge -> child
pub type Children = FxHashMap<Symbol, NodeId>;

/// Which variant a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Internal,
    Leaf,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Root => write!(f, "root"),
            NodeKind::Internal => write!(f, "internal"),
            NodeKind::Leaf => write!(f, "leaf"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Root {
        children: Children,
    },
    Internal {
        parent: NodeId,
        incoming: Edge,
        children: Children,
        /// Unset only between creation and the next extension of the same phase
        suffix_link: Option<NodeId>,
        /// Path length from the root, fixed at creation
        depth: Offset,
    },
    Leaf {
        parent: NodeId,
        incoming: Edge,
        /// Position in the sequence where this leaf's suffix begins
        suffix_offset: Offset,
    },
}

impl Node {
    pub fn root() -> Self {
        Node::Root {
            children: Children::default(),
        }
    }

    pub fn internal(parent: NodeId, incoming: Edge, depth: Offset) -> Self {
        Node::Internal {
            parent,
            incoming,
            children: Children::default(),
            suffix_link: None,
            depth,
        }
    }

    pub fn leaf(parent: NodeId, incoming: Edge, suffix_offset: Offset) -> Self {
        Node::Leaf {
            parent,
            incoming,
            suffix_offset,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root { .. } => NodeKind::Root,
            Node::Internal { .. } => NodeKind::Internal,
            Node::Leaf { .. } => NodeKind::Leaf,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Node::Root { .. })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Node::Internal { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Parent id, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        match *self {
            Node::Root { .. } => None,
            Node::Internal { parent, .. } | Node::Leaf { parent, .. } => Some(parent),
        }
    }

    /// Incoming edge, `None` for the root
    pub fn incoming(&self) -> Option<Edge> {
        match *self {
            Node::Root { .. } => None,
            Node::Internal { incoming, .. } | Node::Leaf { incoming, .. } => Some(incoming),
        }
    }

    /// Re-attach this node below a new parent (used by edge splits)
    pub(crate) fn set_incoming(&mut self, new_parent: NodeId, edge: Edge) -> TreeResult<()> {
        match self {
            Node::Root { .. } => Err(TreeError::InvalidOperation {
                operation: "set incoming edge",
                kind: NodeKind::Root,
            }),
            Node::Internal {
                parent, incoming, ..
            }
            | Node::Leaf {
                parent, incoming, ..
            } => {
                *parent = new_parent;
                *incoming = edge;
                Ok(())
            }
        }
    }

    /// Outgoing map, `None` for leaves
    pub fn children(&self) -> Option<&Children> {
        match self {
            Node::Root { children } | Node::Internal { children, .. } => Some(children),
            Node::Leaf { .. } => None,
        }
    }

    /// Children in ascending symbol order
    pub fn sorted_children(&self) -> Vec<(Symbol, NodeId)> {
        let mut sorted: Vec<(Symbol, NodeId)> = self
            .children()
            .map(|c| c.iter().map(|(&k, &v)| (k, v)).collect())
            .unwrap_or_default();
        sorted.sort_unstable_by_key(|&(k, _)| k);
        sorted
    }

    pub fn child_count(&self) -> usize {
        self.children().map_or(0, |c| c.len())
    }

    /// Child reached by the edge starting with `symbol`
    #[inline]
    pub fn child(&self, symbol: Symbol) -> Option<NodeId> {
        self.children().and_then(|c| c.get(&symbol).copied())
    }

    /// Register (or replace) the child keyed by `symbol`
    pub(crate) fn add_child(&mut self, symbol: Symbol, child: NodeId) -> TreeResult<()> {
        match self {
            Node::Root { children } | Node::Internal { children, .. } => {
                children.insert(symbol, child);
                Ok(())
            }
            Node::Leaf { .. } => Err(TreeError::InvalidOperation {
                operation: "add child",
                kind: NodeKind::Leaf,
            }),
        }
    }

    /// Suffix link of an internal node (`None` while still pending)
    pub fn suffix_link(&self) -> TreeResult<Option<NodeId>> {
        match *self {
            Node::Internal { suffix_link, .. } => Ok(suffix_link),
            _ => Err(TreeError::InvalidOperation {
                operation: "get suffix link",
                kind: self.kind(),
            }),
        }
    }

    pub(crate) fn set_suffix_link(&mut self, target: NodeId) -> TreeResult<()> {
        match self {
            Node::Internal { suffix_link, .. } => {
                *suffix_link = Some(target);
                Ok(())
            }
            _ => Err(TreeError::InvalidOperation {
                operation: "set suffix link",
                kind: self.kind(),
            }),
        }
    }

    /// Start offset of the suffix a leaf spells, `None` for other variants
    pub fn suffix_offset(&self) -> Option<Offset> {
        match *self {
            Node::Leaf { suffix_offset, .. } => Some(suffix_offset),
            _ => None,
        }
    }
}
