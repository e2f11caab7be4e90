/// Cursor position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset in the document
    pub byte_offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column (0-indexed, bytes into the line)
    pub col: usize,
    /// Column to return to when vertical moves pass through shorter lines
    pub preferred_col: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            byte_offset: 0,
            line: 1,
            col: 0,
            preferred_col: 0,
        }
    }

    /// Jump to the very start of the document
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Place the cursor on `col` of `line`, which starts at `line_start`.
    /// `sticky` also records `col` as the preferred column.
    pub fn set_position(&mut self, line: usize, col: usize, line_start: usize, sticky: bool) {
        self.line = line;
        self.col = col;
        self.byte_offset = line_start + col;
        if sticky {
            self.preferred_col = col;
        }
    }

    /// Advance past one byte typed on the current line
    pub fn advance(&mut self) {
        self.byte_offset += 1;
        self.col += 1;
        self.preferred_col = self.col;
    }

    /// Advance past a typed newline onto the start of the next line
    pub fn advance_line(&mut self) {
        self.byte_offset += 1;
        self.line += 1;
        self.col = 0;
        self.preferred_col = 0;
    }

    /// Column a vertical move lands on in a line of `line_length` bytes
    pub fn target_col(&self, line_length: usize) -> usize {
        self.preferred_col.min(line_length)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_creation() {
        let cursor = Cursor::new();
        assert_eq!(cursor.line, 1);
        assert_eq!(cursor.col, 0);
        assert_eq!(cursor.byte_offset, 0);
    }

    #[test]
    fn test_cursor_advance() {
        let mut cursor = Cursor::new();
        cursor.advance();
        cursor.advance();
        assert_eq!((cursor.byte_offset, cursor.col), (2, 2));

        cursor.advance_line();
        assert_eq!(cursor.line, 2);
        assert_eq!((cursor.byte_offset, cursor.col, cursor.preferred_col), (3, 0, 0));
    }

    #[test]
    fn test_target_col_clamps_to_line() {
        let mut cursor = Cursor::new();
        cursor.set_position(1, 8, 0, true);
        assert_eq!(cursor.target_col(3), 3);
        assert_eq!(cursor.target_col(20), 8);
    }

    #[test]
    fn test_non_sticky_keeps_preferred_col() {
        let mut cursor = Cursor::new();
        cursor.set_position(1, 6, 0, true);
        cursor.set_position(2, 2, 10, false);
        assert_eq!(cursor.byte_offset, 12);
        assert_eq!(cursor.preferred_col, 6);

        cursor.reset();
        assert_eq!(cursor, Cursor::new());
    }
}
