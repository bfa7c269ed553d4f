//! In-memory symbol source

use super::SymbolSource;
use crate::tree::types::{Offset, Symbol};

/// Source backed by a vector of symbols
#[derive(Debug, Clone, Default)]
pub struct StringSource {
    symbols: Vec<Symbol>,
    cursor: usize,
}

impl StringSource {
    /// One symbol per Unicode scalar value
    pub fn new(text: &str) -> Self {
        Self::from_symbols(super::symbols_from_str(text))
    }

    /// One symbol per byte
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_symbols(super::symbols_from_bytes(bytes))
    }

    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolSource for StringSource {
    #[inline]
    fn symbol_at(&self, offset: Offset) -> Symbol {
        self.symbols[offset as usize]
    }

    fn next_symbol(&mut self) -> Option<Symbol> {
        let symbol = self.symbols.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(symbol)
    }

    fn size_hint(&self) -> Option<u64> {
        Some(self.symbols.len() as u64)
    }
}
