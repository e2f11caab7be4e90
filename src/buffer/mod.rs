pub mod piece;

use crate::treap::SplitPiece;

pub use piece::{count_newlines, BufferKind, Piece};

/// The two append-only byte logs a piece table resolves its pieces against.
///
/// `original` holds the document as it was loaded and `add` holds every byte
/// inserted since. Neither ever moves or drops a byte, so a piece's `start`
/// stays valid for as long as the store lives (or until [`BufferStore::clear`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferStore {
    original: Vec<u8>,
    add: Vec<u8>,
}

impl BufferStore {
    pub fn new() -> Self {
        Self {
            original: Vec::new(),
            add: Vec::new(),
        }
    }

    /// Replace the original log and return one piece spanning all of it
    pub fn load_original(&mut self, text: Vec<u8>) -> Piece {
        let newline_count = count_newlines(&text);
        let length = text.len();
        self.original = text;
        Piece::new(BufferKind::Original, 0, length, newline_count)
    }

    /// Append to the add log and return the piece describing the new bytes
    pub fn append(&mut self, text: &[u8]) -> Piece {
        let start = self.add.len();
        self.add.extend_from_slice(text);
        Piece::new(BufferKind::Add, start, text.len(), count_newlines(text))
    }

    /// The bytes a piece refers to
    pub fn bytes(&self, piece: &Piece) -> &[u8] {
        match piece.source {
            BufferKind::Original => &self.original[piece.range()],
            BufferKind::Add => &self.add[piece.range()],
        }
    }

    pub fn original_len(&self) -> usize {
        self.original.len()
    }

    pub fn add_len(&self) -> usize {
        self.add.len()
    }

    pub fn clear(&mut self) {
        self.original.clear();
        self.add.clear();
    }
}

impl SplitPiece for BufferStore {
    fn split_piece(&self, piece: &mut Piece, offset: usize) -> Piece {
        let head_newlines = count_newlines(&self.bytes(piece)[..offset]);
        piece.split_at(offset, head_newlines)
    }
}

/// Collapse `\r\n` and bare `\r` into `\n`.
pub fn normalize_line_endings(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut bytes = text.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        if b == b'\r' {
            bytes.next_if_eq(&b'\n');
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }

    out
}
