use crate::buffer::Piece;

/// Exclusive ownership edge to a subtree
pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub piece: Piece,
    pub priority: u64,
    pub subtree_length: usize,   // bytes in this subtree
    pub subtree_newlines: usize, // '\n' bytes in this subtree
    pub left: Link,              // pieces strictly before this one
    pub right: Link,             // pieces strictly after this one
}

impl Node {
    pub fn new(piece: Piece, priority: u64) -> Box<Self> {
        Box::new(Self {
            piece,
            priority,
            subtree_length: piece.length,
            subtree_newlines: piece.newline_count,
            left: None,
            right: None,
        })
    }

    /// Recompute the cached aggregates from the children and own piece.
    pub fn update(&mut self) {
        self.subtree_length = length(&self.left) + length(&self.right) + self.piece.length;
        self.subtree_newlines =
            newlines(&self.left) + newlines(&self.right) + self.piece.newline_count;
    }
}

pub(crate) fn length(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.subtree_length)
}

pub(crate) fn newlines(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.subtree_newlines)
}
