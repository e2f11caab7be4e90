//! Editable-text storage engine: a piece table whose pieces live in an
//! implicit treap augmented with byte length and newline count.

pub mod buffer;
pub mod config;
pub mod edit;
pub mod file;
pub mod piece_table;
pub mod treap;

pub use buffer::{BufferKind, BufferStore, Piece};
pub use config::{ConfigError, EngineConfig};
pub use edit::{Cursor, Direction, Session};
pub use file::FileError;
pub use piece_table::PieceTable;
pub use treap::{PieceLocation, SplitPiece, Treap};
