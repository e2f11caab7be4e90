//! Line addressing. Lines are 1-indexed and separated by `'\n'`; a trailing
//! newline does not open an extra empty line.

use std::ops::ControlFlow;

use super::PieceTable;
use crate::buffer::count_newlines;

impl PieceTable {
    /// Number of lines in the document.
    ///
    /// An empty document has 0 lines, a document without newlines has 1.
    /// Otherwise the count is the number of newlines, plus one when the last
    /// byte is not itself a newline.
    pub fn get_line_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let newlines = self.newline_count();
        if newlines == 0 {
            return 1;
        }

        let ends_with_newline = self.get_char_at(self.len() - 1) == Some(b'\n');
        if ends_with_newline {
            newlines
        } else {
            newlines + 1
        }
    }

    /// Byte offset at which `line_number` starts. Lines past the end map to
    /// `len()`, line 0 and line 1 to 0.
    pub fn get_index_for_line(&self, line_number: usize) -> usize {
        if line_number <= 1 {
            return 0;
        }
        if line_number > self.get_line_count() {
            return self.len();
        }

        let Some(hit) = self.tree.find_by_line(line_number) else {
            return self.len();
        };

        // which newline inside this piece ends the previous line (1-based)
        let nth = line_number - 1 - hit.newlines_before;
        self.buffers
            .bytes(hit.piece)
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == b'\n')
            .nth(nth - 1)
            .map_or(hit.start + hit.piece.length, |(i, _)| hit.start + i + 1)
    }

    /// Line holding byte `byte_index`, clamped to the document end. The end
    /// offset of a document with a trailing newline sits on the empty line
    /// after it.
    pub fn get_line_for_index(&self, byte_index: usize) -> usize {
        let Some(hit) = self.tree.find(byte_index) else {
            return self.newline_count() + 1;
        };

        let into_piece = &self.buffers.bytes(hit.piece)[..byte_index - hit.start];
        hit.newlines_before + count_newlines(into_piece) + 1
    }

    /// Content of `line_number` without its newline; empty when out of range.
    pub fn get_line(&self, line_number: usize) -> Vec<u8> {
        let mut line = Vec::new();
        if line_number == 0 || line_number > self.get_line_count() {
            return line;
        }

        let start = self.get_index_for_line(line_number);
        self.tree.for_each_from(start, |piece, skip| {
            let bytes = &self.buffers.bytes(piece)[skip..];
            match bytes.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    line.extend_from_slice(&bytes[..end]);
                    ControlFlow::Break(())
                }
                None => {
                    line.extend_from_slice(bytes);
                    ControlFlow::Continue(())
                }
            }
        });

        line
    }

    /// Length of `line_number` in bytes, newline excluded; 0 when out of range.
    pub fn get_line_length(&self, line_number: usize) -> usize {
        let line_count = self.get_line_count();
        if line_number == 0 || line_number > line_count {
            return 0;
        }

        let start = self.get_index_for_line(line_number);
        let mut end = if line_number < line_count {
            self.get_index_for_line(line_number + 1)
        } else {
            self.len()
        };

        if end > start && self.get_char_at(end - 1) == Some(b'\n') {
            end -= 1;
        }

        end.saturating_sub(start)
    }
}
