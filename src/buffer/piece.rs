use std::fmt;

/// Which append-only log a piece points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Original, // file content at open time
    Add,      // everything inserted since
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Original => write!(f, "Original"),
            BufferKind::Add => write!(f, "Add"),
        }
    }
}

/// A contiguous run of document bytes stored in one of the two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub source: BufferKind,
    pub start: usize,         // offset into the source buffer
    pub length: usize,        // bytes
    pub newline_count: usize, // '\n' bytes within [start, start + length)
}

impl Piece {
    pub fn new(source: BufferKind, start: usize, length: usize, newline_count: usize) -> Self {
        debug_assert!(newline_count <= length);
        Self {
            source,
            start,
            length,
            newline_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Byte range inside the source buffer
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.length
    }

    /// Truncate this piece to its first `offset` bytes and return the rest.
    ///
    /// `head_newlines` is the number of newlines in the kept prefix; the tail
    /// receives whatever remains of the current count.
    pub fn split_at(&mut self, offset: usize, head_newlines: usize) -> Piece {
        debug_assert!(offset <= self.length);
        debug_assert!(head_newlines <= self.newline_count);

        let tail = Piece {
            source: self.source,
            start: self.start + offset,
            length: self.length - offset,
            newline_count: self.newline_count - head_newlines,
        };
        self.length = offset;
        self.newline_count = head_newlines;
        tail
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}..{}] ({} newlines)",
            self.source,
            self.start,
            self.start + self.length,
            self.newline_count
        )
    }
}

/// Number of `'\n'` bytes in `bytes`
pub fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}
