//! Tree walkers
//!
//! A [`Visitor`] decides, node by node, how far a walk goes:
//!
//! - `pre_visit` returning `false` skips the node entirely
//! - `visit` returning `false` keeps the walk out of the node's subtree
//! - `done` returning `true` stops the whole walk
//!
//! Children are always visited in ascending symbol order. Both walkers use
//! an explicit queue or stack, so depth is bounded only by memory.

pub mod visitors;

pub use visitors::{DepthVisitor, LinkEntry, SuffixLinkCollector};

use crate::source::SymbolSource;
use crate::tree::error::TreeResult;
use crate::tree::suffix_tree::SuffixTree;
use crate::tree::types::NodeId;
use std::collections::VecDeque;

pub trait Visitor<S: SymbolSource> {
    fn pre_visit(&mut self, tree: &SuffixTree<S>, node: NodeId) -> TreeResult<bool>;

    fn visit(&mut self, tree: &SuffixTree<S>, node: NodeId) -> TreeResult<bool>;

    fn post_visit(&mut self, _tree: &SuffixTree<S>, _node: NodeId) -> TreeResult<()> {
        Ok(())
    }

    fn done(&self) -> bool {
        false
    }

    /// Called once the walk has ended
    fn finish(&mut self) {}
}

/// Breadth-first walk
pub struct Bfs<V> {
    visitor: V,
}

impl<V> Bfs<V> {
    pub fn new(visitor: V) -> Self {
        Self { visitor }
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    pub fn traverse<S: SymbolSource>(
        &mut self,
        tree: &SuffixTree<S>,
        start: NodeId,
    ) -> TreeResult<()>
    where
        V: Visitor<S>,
    {
        let mut queue = VecDeque::from([start]);
        while !self.visitor.done() {
            let Some(node) = queue.pop_front() else {
                break;
            };
            if !self.visitor.pre_visit(tree, node)? {
                continue;
            }
            if self.visitor.visit(tree, node)? {
                let children = tree.node(node)?.sorted_children();
                queue.extend(children.into_iter().map(|(_, c)| c));
                self.visitor.post_visit(tree, node)?;
            }
        }
        self.visitor.finish();
        Ok(())
    }
}

enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

/// Depth-first, pre-order walk with a post-order callback
pub struct Dfs<V> {
    visitor: V,
}

impl<V> Dfs<V> {
    pub fn new(visitor: V) -> Self {
        Self { visitor }
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    pub fn traverse<S: SymbolSource>(
        &mut self,
        tree: &SuffixTree<S>,
        start: NodeId,
    ) -> TreeResult<()>
    where
        V: Visitor<S>,
    {
        let mut stack = vec![Frame::Enter(start)];
        while !self.visitor.done() {
            let Some(frame) = stack.pop() else {
                break;
            };
            match frame {
                Frame::Enter(node) => {
                    if !self.visitor.pre_visit(tree, node)? {
                        continue;
                    }
                    stack.push(Frame::Exit(node));
                    if self.visitor.visit(tree, node)? {
                        let children = tree.node(node)?.sorted_children();
                        // reversed so the smallest symbol is popped first
                        stack.extend(children.into_iter().rev().map(|(_, c)| Frame::Enter(c)));
                    }
                }
                Frame::Exit(node) => self.visitor.post_visit(tree, node)?,
            }
        }
        self.visitor.finish();
        Ok(())
    }
}
