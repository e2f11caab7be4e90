mod lines;

#[cfg(test)]
mod tests;

use std::fmt;
use std::ops::ControlFlow;

use crate::buffer::{count_newlines, normalize_line_endings, BufferKind, BufferStore, Piece};
use crate::config::EngineConfig;
use crate::treap::Treap;

/// Editable document backed by two append-only buffers and a treap of pieces.
///
/// Every operation is total: out-of-range positions are clamped or answered
/// with a neutral value, and zero-length edits do nothing.
///
/// `Clone` deep-copies the tree and both buffers together, since pieces are
/// meaningless without the bytes they point at.
#[derive(Debug, Clone, Default)]
pub struct PieceTable {
    buffers: BufferStore,
    tree: Treap,
}

impl PieceTable {
    /// Empty document
    pub fn new() -> Self {
        Self {
            buffers: BufferStore::new(),
            tree: Treap::new(),
        }
    }

    /// Empty document whose tree draws priorities from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            buffers: BufferStore::new(),
            tree: Treap::with_seed(seed),
        }
    }

    /// Document holding `text`, line endings normalized to `\n`
    pub fn from_bytes(text: impl AsRef<[u8]>) -> Self {
        let mut table = Self::new();
        table.load(text.as_ref());
        table
    }

    /// Document holding `text`, seeded from `config`
    pub fn with_config(text: impl AsRef<[u8]>, config: &EngineConfig) -> Self {
        let mut table = Self::with_seed(config.seed());
        table.load(text.as_ref());
        table
    }

    fn load(&mut self, text: &[u8]) {
        let piece = self.buffers.load_original(normalize_line_endings(text));
        self.tree.insert(0, piece, &self.buffers);
    }

    /// Insert `text` at byte `position`. Positions past the end append.
    pub fn insert(&mut self, position: usize, text: impl AsRef<[u8]>) {
        let text = normalize_line_endings(text.as_ref());
        if text.is_empty() {
            return;
        }

        let position = position.min(self.len());
        let piece = self.buffers.append(&text);
        tracing::trace!(position, length = piece.length, "insert");
        self.tree.insert(position, piece, &self.buffers);
    }

    /// Remove up to `length` bytes starting at byte `position`.
    pub fn remove(&mut self, position: usize, length: usize) {
        let total = self.len();
        if position > total {
            return;
        }

        let length = length.min(total - position);
        if length == 0 {
            return;
        }

        tracing::trace!(position, length, "remove");
        self.tree.erase(position, length, &self.buffers);
    }

    /// Drop all content, both buffers included
    pub fn clear(&mut self) {
        self.tree.clear();
        self.buffers.clear();
    }

    /// Document length in bytes
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `'\n'` bytes in the document
    pub fn newline_count(&self) -> usize {
        self.tree.newline_count()
    }

    /// Materialize the whole document. This is the only O(n) read.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        self.tree.for_each(|piece| {
            out.extend_from_slice(self.buffers.bytes(piece));
            ControlFlow::Continue(())
        });
        out
    }

    /// Byte at `byte_index`, or `None` past the end
    pub fn get_char_at(&self, byte_index: usize) -> Option<u8> {
        let hit = self.tree.find(byte_index)?;
        self.buffers
            .bytes(hit.piece)
            .get(byte_index - hit.start)
            .copied()
    }

    /// Pieces in document order
    pub fn pieces(&self) -> Vec<Piece> {
        self.tree.pieces()
    }

    pub fn buffers(&self) -> &BufferStore {
        &self.buffers
    }

    /// Check the tree's invariants, then every piece's range and newline
    /// count against the buffer it refers to.
    pub fn check_invariants(&self) -> Result<(), String> {
        self.tree.check_invariants()?;

        for piece in self.tree.pieces() {
            let available = match piece.source {
                BufferKind::Original => self.buffers.original_len(),
                BufferKind::Add => self.buffers.add_len(),
            };
            if piece.start + piece.length > available {
                return Err(format!(
                    "{} reaches past the {} buffer ({} bytes)",
                    piece, piece.source, available
                ));
            }

            let actual = count_newlines(self.buffers.bytes(&piece));
            if actual != piece.newline_count {
                return Err(format!(
                    "{} records {} newlines, buffer holds {}",
                    piece, piece.newline_count, actual
                ));
            }
        }

        Ok(())
    }
}

impl From<&str> for PieceTable {
    fn from(text: &str) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&[u8]> for PieceTable {
    fn from(text: &[u8]) -> Self {
        Self::from_bytes(text)
    }
}

impl From<Vec<u8>> for PieceTable {
    fn from(text: Vec<u8>) -> Self {
        Self::from_bytes(text)
    }
}

impl fmt::Display for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}
