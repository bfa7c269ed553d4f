//! Errors raised by tree construction and navigation
//!
//! Every variant signals a broken invariant or a misuse of a node variant.
//! A search miss or an exhausted source is never an error.

use super::node::NodeKind;
use super::types::{NodeId, Offset, Symbol};
use thiserror::Error;

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The node variant structurally cannot support the operation
    #[error("invalid operation: {operation} on {kind} node")]
    InvalidOperation {
        operation: &'static str,
        kind: NodeKind,
    },

    /// The id does not address a node in the arena
    #[error("unknown node id {0}")]
    UnknownNode(NodeId),

    /// An internal node was navigated through before its suffix link was set
    #[error("internal node {0} has no suffix link")]
    MissingSuffixLink(NodeId),

    /// Skip/count descent expected an outgoing edge that does not exist
    #[error("node {node} has no outgoing edge for symbol {symbol}")]
    MissingEdge { node: NodeId, symbol: Symbol },

    /// The source produced the configured sentinel, which must stay unique
    #[error("terminator symbol {symbol} occurs in the text at offset {offset}")]
    TerminatorInText { offset: Offset, symbol: Symbol },

    /// A previous step failed; the engine refuses to continue
    #[error("construction aborted after an earlier failure")]
    Aborted,
}
