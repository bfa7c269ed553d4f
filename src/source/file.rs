//! Memory-mapped file source
//!
//! Maps the file once and feeds it byte by byte, so random access during
//! construction and search never goes back to the filesystem.

use super::SymbolSource;
use crate::tree::types::{Offset, Symbol};
use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Source over the bytes of a file
pub struct FileSource {
    path: PathBuf,
    /// `None` for an empty file (zero-length files cannot be mapped)
    mmap: Option<Mmap>,
    cursor: usize,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        let mmap = if size == 0 {
            None
        } else {
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("Failed to map {}", path.display()))?;
            Some(mmap)
        };

        tracing::debug!(path = %path.display(), bytes = size, "mapped file source");

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            cursor: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SymbolSource for FileSource {
    #[inline]
    fn symbol_at(&self, offset: Offset) -> Symbol {
        self.bytes()[offset as usize] as Symbol
    }

    fn next_symbol(&mut self) -> Option<Symbol> {
        let byte = *self.bytes().get(self.cursor)?;
        self.cursor += 1;
        Some(byte as Symbol)
    }

    fn size_hint(&self) -> Option<u64> {
        Some(self.len() as u64)
    }
}
