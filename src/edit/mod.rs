use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub mod cursor;

use crate::buffer::normalize_line_endings;
use crate::config::EngineConfig;
use crate::file;
use crate::piece_table::PieceTable;

pub use cursor::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One open document: the piece table plus the cursor and the batch of typed
/// bytes not yet committed to it.
///
/// Typing appends to the batch instead of mutating the tree per keystroke.
/// The batch is committed with a single insert when it reaches the configured
/// cap, on a newline, and before any move, delete or save. Line reads overlay
/// the batch without committing it.
#[derive(Debug)]
pub struct Session {
    table: PieceTable,
    cursor: Cursor,
    pending: Vec<u8>,
    pending_at: usize,
    max_pending: usize,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::from_table(PieceTable::with_seed(config.seed()), config)
    }

    fn from_table(table: PieceTable, config: &EngineConfig) -> Self {
        let max_pending = config.insert_batch_cap();
        Self {
            table,
            cursor: Cursor::new(),
            pending: Vec::with_capacity(max_pending),
            pending_at: 0,
            max_pending,
            path: None,
            dirty: false,
        }
    }

    /// Load `path` into a fresh session with the cursor at the top.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &EngineConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            file::load(path).with_context(|| format!("Failed to open {}", path.display()))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "opened document");

        let mut session = Self::from_table(PieceTable::with_config(bytes, config), config);
        session.path = Some(path.to_path_buf());
        Ok(session)
    }

    /// Save to the path the session was opened from or last saved to.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .context("No file path set for this document")?;
        self.save_as(path)
    }

    /// Save to `path` atomically and remember it for later saves.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.text();

        file::save_atomic(path, &bytes)
            .with_context(|| format!("Failed to save {}", path.display()))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved document");

        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Type one byte at the cursor. `\r` is treated as a newline.
    pub fn insert_byte(&mut self, byte: u8) {
        let byte = if byte == b'\r' { b'\n' } else { byte };
        self.dirty = true;

        if self.pending.is_empty() {
            self.pending_at = self.cursor.byte_offset;
        }
        self.pending.push(byte);

        if byte == b'\n' {
            self.flush();
            self.cursor.advance_line();
            return;
        }

        if self.pending.len() >= self.max_pending {
            self.flush();
        }
        self.cursor.advance();
    }

    /// Type `text` at the cursor, byte by byte.
    pub fn insert_str(&mut self, text: &str) {
        for byte in normalize_line_endings(text.as_bytes()) {
            self.insert_byte(byte);
        }
    }

    /// Delete the byte before the cursor (backspace). Deleting a newline
    /// joins the current line onto the previous one.
    pub fn delete_byte(&mut self) {
        self.flush();

        let offset = self.cursor.byte_offset;
        if offset == 0 {
            return;
        }

        self.table.remove(offset - 1, 1);
        self.dirty = true;
        self.place_at(offset - 1, true);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.flush();

        match direction {
            Direction::Up => self.cursor_up(),
            Direction::Down => self.cursor_down(),
            Direction::Left => {
                if self.cursor.byte_offset > 0 {
                    self.place_at(self.cursor.byte_offset - 1, true);
                }
            }
            Direction::Right => {
                if self.cursor.byte_offset < self.table.len() {
                    self.place_at(self.cursor.byte_offset + 1, true);
                }
            }
        }
    }

    fn cursor_up(&mut self) {
        if self.cursor.line <= 1 {
            self.cursor.reset();
            return;
        }
        self.move_to_line(self.cursor.line - 1);
    }

    fn cursor_down(&mut self) {
        if self.cursor.line >= self.table.get_line_count() {
            tracing::debug!(line = self.cursor.line, "cursor down past last line");
            self.place_at(self.table.len(), false);
            return;
        }
        self.move_to_line(self.cursor.line + 1);
    }

    fn move_to_line(&mut self, line: usize) {
        let col = self.cursor.target_col(self.table.get_line_length(line));
        let line_start = self.table.get_index_for_line(line);
        self.cursor.set_position(line, col, line_start, false);
    }

    /// Move the cursor to `offset`, deriving line and column from the table.
    fn place_at(&mut self, offset: usize, sticky: bool) {
        let offset = offset.min(self.table.len());
        let line = self.table.get_line_for_index(offset);
        let line_start = self.table.get_index_for_line(line);
        self.cursor
            .set_position(line, offset.saturating_sub(line_start), line_start, sticky);
    }

    /// Commit the pending batch to the piece table.
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        tracing::debug!(at = self.pending_at, length = self.pending.len(), "flush insert batch");
        self.table.insert(self.pending_at, &self.pending);
        self.pending_at += self.pending.len();
        self.pending.clear();
    }

    /// Content of `line_number` (1-indexed), pending bytes included.
    ///
    /// Reads never commit the batch, so a renderer polling every frame does
    /// not turn each keystroke into its own piece.
    pub fn line(&self, line_number: usize) -> Vec<u8> {
        let mut line = self.table.get_line(line_number);
        if self.pending.is_empty() || line_number != self.cursor.line {
            return line;
        }

        // the batch never holds a newline, so it sits inside the cursor's line
        let line_start = self.table.get_index_for_line(line_number);
        if let Some(at) = self
            .pending_at
            .checked_sub(line_start)
            .filter(|&at| at <= line.len())
        {
            line.splice(at..at, self.pending.iter().copied());
        }
        line
    }

    /// Line count for display; an empty document still shows one line.
    pub fn total_lines(&self) -> usize {
        let committed = self.table.get_line_count();
        let len = self.table.len();
        let opens_line = !self.pending.is_empty()
            && self.pending_at == len
            && (len == 0 || self.table.get_char_at(len - 1) == Some(b'\n'));

        if opens_line {
            committed + 1
        } else {
            committed.max(1)
        }
    }

    /// The whole document, pending bytes included
    pub fn text(&mut self) -> Vec<u8> {
        self.flush();
        self.table.to_bytes()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Committed document state; does not include the pending batch.
    pub fn table(&self) -> &PieceTable {
        &self.table
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
