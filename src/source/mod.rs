//! Symbol sources
//!
//! A source feeds symbols to the construction engine one at a time and also
//! answers random-access reads for every symbol it has already fed.
//!
//! - [`memory`] - In-memory sources (strings, bytes, raw symbols)
//! - [`file`] - Memory-mapped file source (one symbol per byte)

pub mod file;
pub mod memory;

pub use file::FileSource;
pub use memory::StringSource;

use crate::tree::error::{TreeError, TreeResult};
use crate::tree::types::{DEFAULT_TERMINATOR, Offset, Symbol, TERMINATOR_GLYPH};

/// Supplier of symbols, both as a sequential feed and by offset
pub trait SymbolSource {
    /// Symbol at `offset`. Offsets outside `[0, fed)` are a caller error.
    fn symbol_at(&self, offset: Offset) -> Symbol;

    /// Next symbol of the feed, `None` once drained
    fn next_symbol(&mut self) -> Option<Symbol>;

    /// Total number of symbols, when known up front
    fn size_hint(&self) -> Option<u64> {
        None
    }
}

impl<T: SymbolSource + ?Sized> SymbolSource for Box<T> {
    fn symbol_at(&self, offset: Offset) -> Symbol {
        (**self).symbol_at(offset)
    }

    fn next_symbol(&mut self) -> Option<Symbol> {
        (**self).next_symbol()
    }

    fn size_hint(&self) -> Option<u64> {
        (**self).size_hint()
    }
}

/// Encode text as symbols the way [`StringSource::new`] does
pub fn symbols_from_str(text: &str) -> Vec<Symbol> {
    text.chars().map(|c| c as Symbol).collect()
}

/// Encode bytes as symbols the way [`FileSource`] does
pub fn symbols_from_bytes(bytes: &[u8]) -> Vec<Symbol> {
    bytes.iter().map(|&b| b as Symbol).collect()
}

/// Render a symbol for display
pub fn symbol_char(symbol: Symbol) -> char {
    if symbol == DEFAULT_TERMINATOR {
        return TERMINATOR_GLYPH;
    }
    char::from_u32(symbol).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// The engine's view of a source: the symbols integrated so far plus the
/// terminal sentinel appended by `finish()`
#[derive(Debug)]
pub struct Sequence<S> {
    source: S,
    /// Number of symbols integrated (fed or appended)
    len: Offset,
    /// Sentinel `push_terminal` appends, never accepted from the source
    terminator: Symbol,
    /// Offset of the appended sentinel
    terminal: Option<Offset>,
}

impl<S: SymbolSource> Sequence<S> {
    pub fn new(source: S) -> Self {
        Self::with_terminator(source, DEFAULT_TERMINATOR)
    }

    pub fn with_terminator(source: S, terminator: Symbol) -> Self {
        Self {
            source,
            len: 0,
            terminator,
            terminal: None,
        }
    }

    /// Pull the next symbol from the source.
    ///
    /// Fails without consuming anything when the source yields the
    /// terminator, since the sentinel would no longer be unique.
    pub(crate) fn next(&mut self) -> TreeResult<Option<Symbol>> {
        if self.terminal.is_some() {
            return Ok(None);
        }
        let Some(symbol) = self.source.next_symbol() else {
            return Ok(None);
        };
        if symbol == self.terminator {
            return Err(TreeError::TerminatorInText {
                offset: self.len,
                symbol,
            });
        }
        self.len += 1;
        Ok(Some(symbol))
    }

    /// Append the sentinel after the last integrated symbol, returning its offset
    pub(crate) fn push_terminal(&mut self) -> Offset {
        let offset = self.len;
        self.terminal = Some(offset);
        self.len += 1;
        offset
    }

    pub fn terminator(&self) -> Symbol {
        self.terminator
    }

    #[inline]
    pub fn symbol_at(&self, offset: Offset) -> Symbol {
        match self.terminal {
            Some(at) if at == offset => self.terminator,
            _ => self.source.symbol_at(offset),
        }
    }

    /// Number of symbols integrated so far
    pub fn len(&self) -> Offset {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_terminated(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Symbols in `start..end`, clamped to what has been integrated
    pub fn symbols(&self, start: Offset, end: Offset) -> Vec<Symbol> {
        let end = end.min(self.len);
        (start.max(0)..end).map(|o| self.symbol_at(o)).collect()
    }

    /// Render `start..end` as text
    pub fn label(&self, start: Offset, end: Offset) -> String {
        self.symbols(start, end).into_iter().map(symbol_char).collect()
    }

    /// Render from `start` up to (not including) the next `stop` symbol
    pub fn label_until(&self, start: Offset, stop: Symbol) -> String {
        let mut out = String::new();
        let mut offset = start.max(0);
        while offset < self.len {
            let symbol = self.symbol_at(offset);
            if symbol == stop {
                break;
            }
            out.push(symbol_char(symbol));
            offset += 1;
        }
        out
    }
}
