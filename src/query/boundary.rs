//! Named segments
//!
//! A text made of several concatenated records can mark the end of each one
//! with a trailer `<d><kind><d><name><d>`, where `d` is a delimiter symbol.
//! The trailer names the record that precedes it:
//!
//! ```text
//! ACGT$gene$alpha$TTGA$gene$beta$
//! [0,3] alpha       [16,19] beta
//! ```
//!
//! A [`BoundaryMap`] recovers those ranges by searching the tree for
//! `<d><kind><d>`.

use super::searcher::Searcher;
use crate::source::{SymbolSource, symbols_from_str};
use crate::tree::suffix_tree::SuffixTree;
use crate::tree::types::{Offset, Symbol};
use serde::Serialize;

/// Inclusive offset range with a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub min: Offset,
    pub max: Offset,
    pub name: String,
}

impl Segment {
    pub fn new(min: Offset, max: Offset, name: impl Into<String>) -> Self {
        Self {
            min,
            max,
            name: name.into(),
        }
    }

    #[inline]
    pub fn includes(&self, offset: Offset) -> bool {
        offset >= self.min && offset <= self.max
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.name, self.min, self.max)
    }
}

/// Ordered segments of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryMap {
    name: String,
    segments: Vec<Segment>,
}

impl BoundaryMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// Collect the segments named by every `<delimiter><kind><delimiter>`
    /// trailer in the tree's text
    pub fn build<S: SymbolSource>(tree: &SuffixTree<S>, kind: &str, delimiter: Symbol) -> Self {
        let mut marker = vec![delimiter];
        marker.extend(symbols_from_str(kind));
        marker.push(delimiter);
        let marker_len = marker.len() as Offset;

        let mut map = Self::new(kind);
        let mut next_min: Offset = 0;
        for offset in Searcher::new(tree).search(&marker) {
            let name = tree.text().label_until(offset + marker_len, delimiter);
            let name_len = name.chars().count() as Offset;
            map.append(Segment::new(next_min, offset - 1, name));
            // past the trailer's closing delimiter
            next_min = offset + marker_len + name_len + 1;
        }

        tracing::debug!(kind, segments = map.segments.len(), "built boundary map");
        map
    }

    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment containing `offset`, if any
    pub fn segment_of(&self, offset: Offset) -> Option<&Segment> {
        self.segments.iter().find(|s| s.includes(offset))
    }

    /// Whether every segment contains at least one of `offsets`
    pub fn includes_all_segments(&self, offsets: &[Offset]) -> bool {
        let mut covered = vec![false; self.segments.len()];
        for &offset in offsets {
            for (i, segment) in self.segments.iter().enumerate() {
                if !covered[i] {
                    covered[i] = segment.includes(offset);
                }
            }
        }
        covered.into_iter().all(|c| c)
    }
}
