//! Implicit treap of pieces.
//!
//! ```text
//!          D
//!         / \
//!        B   F
//!       / \ / \
//!      A  C E  G
//! ```
//!
//! An in-order walk yields `A B C D E F G`, which is document order. Positions
//! are implicit: every node caches the byte length and newline count of its
//! subtree, and lookups descend by those aggregates instead of by a key.

mod node;
pub mod rng;


use std::ops::ControlFlow;

use crate::buffer::Piece;
use node::{Link, Node};

pub use rng::SplitMix64;

/// Cuts a piece in two.
///
/// After the call `piece` must describe exactly its first `offset` bytes, with
/// its newline count recomputed, and the returned piece the remaining bytes.
/// The two newline counts must add up to the original count. Implementations
/// only read piece metadata (and possibly buffer bytes); they never touch
/// buffer storage.
pub trait SplitPiece {
    fn split_piece(&self, piece: &mut Piece, offset: usize) -> Piece;
}

impl<F> SplitPiece for F
where
    F: Fn(&mut Piece, usize) -> Piece,
{
    fn split_piece(&self, piece: &mut Piece, offset: usize) -> Piece {
        self(piece, offset)
    }
}

/// Where a lookup landed: the piece, the document offset of its first byte,
/// and how many newlines precede it in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceLocation<'a> {
    pub piece: &'a Piece,
    pub start: usize,
    pub newlines_before: usize,
}

#[derive(Debug, Clone)]
pub struct Treap {
    root: Link,
    rng: SplitMix64,
}

impl Treap {
    pub const DEFAULT_SEED: u64 = SplitMix64::GOLDEN_GAMMA;

    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            rng: SplitMix64::new(seed),
        }
    }

    /// Total bytes across all pieces
    pub fn len(&self) -> usize {
        node::length(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total newlines across all pieces
    pub fn newline_count(&self) -> usize {
        node::newlines(&self.root)
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Insert `piece` so that it starts at document offset `index`.
    pub fn insert<S>(&mut self, index: usize, piece: Piece, splitter: &S)
    where
        S: SplitPiece + ?Sized,
    {
        if piece.is_empty() {
            return;
        }

        let root = self.root.take();
        let (left, right) = self.split(root, index, splitter);
        let middle = Some(Node::new(piece, self.rng.next_u64()));
        self.root = Self::merge(Self::merge(left, middle), right);
    }

    /// Remove `length` bytes starting at document offset `index`.
    pub fn erase<S>(&mut self, index: usize, length: usize, splitter: &S)
    where
        S: SplitPiece + ?Sized,
    {
        if length == 0 {
            return;
        }

        let root = self.root.take();
        let (left, rest) = self.split(root, index, splitter);
        let (middle, right) = self.split(rest, length, splitter);
        drop(middle);
        self.root = Self::merge(left, right);
    }

    /// Split at `index`: `self` keeps `[0, index)` and the returned treap
    /// holds the rest. The new treap gets its own generator, seeded from this one.
    pub fn split_off<S>(&mut self, index: usize, splitter: &S) -> Treap
    where
        S: SplitPiece + ?Sized,
    {
        let root = self.root.take();
        let (left, right) = self.split(root, index, splitter);
        self.root = left;
        Treap {
            root: right,
            rng: SplitMix64::new(self.rng.next_u64()),
        }
    }

    /// Concatenate `other` after `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut Treap) {
        let right = other.root.take();
        self.root = Self::merge(self.root.take(), right);
    }

    /// The piece containing byte `index`.
    pub fn find(&self, index: usize) -> Option<PieceLocation<'_>> {
        let mut current = self.root.as_deref();
        let mut index = index;
        let mut start = 0;
        let mut newlines_before = 0;

        while let Some(n) = current {
            let left_len = node::length(&n.left);

            if index < left_len {
                current = n.left.as_deref();
            } else if index < left_len + n.piece.length {
                return Some(PieceLocation {
                    piece: &n.piece,
                    start: start + left_len,
                    newlines_before: newlines_before + node::newlines(&n.left),
                });
            } else {
                index -= left_len + n.piece.length;
                start += left_len + n.piece.length;
                newlines_before += node::newlines(&n.left) + n.piece.newline_count;
                current = n.right.as_deref();
            }
        }

        None
    }

    /// The piece in which line `line_number` (1-indexed) begins: the piece
    /// holding the newline that ends line `line_number - 1`, or the first
    /// piece for line 1. When that newline is the piece's last byte the line
    /// actually starts at the next piece, at offset `start + piece.length`.
    pub fn find_by_line(&self, line_number: usize) -> Option<PieceLocation<'_>> {
        let mut current = self.root.as_deref();
        let mut remaining = line_number.saturating_sub(1);
        let mut start = 0;
        let mut newlines_before = 0;

        while let Some(n) = current {
            let left_newlines = node::newlines(&n.left);

            if remaining <= left_newlines && n.left.is_some() {
                current = n.left.as_deref();
            } else if remaining <= left_newlines + n.piece.newline_count {
                return Some(PieceLocation {
                    piece: &n.piece,
                    start: start + node::length(&n.left),
                    newlines_before: newlines_before + left_newlines,
                });
            } else {
                remaining -= left_newlines + n.piece.newline_count;
                start += node::length(&n.left) + n.piece.length;
                newlines_before += left_newlines + n.piece.newline_count;
                current = n.right.as_deref();
            }
        }

        None
    }

    /// In-order walk over every piece. Returning `Break` stops the walk.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Piece) -> ControlFlow<()>,
    {
        let _ = Self::walk_from(&self.root, 0, &mut |piece: &Piece, _: usize| f(piece));
    }

    /// In-order walk starting at the piece containing byte `index`.
    ///
    /// The callback also receives the offset into the piece at which the walk
    /// begins: nonzero for the first piece only, zero for every later one.
    pub fn for_each_from<F>(&self, index: usize, mut f: F)
    where
        F: FnMut(&Piece, usize) -> ControlFlow<()>,
    {
        let _ = Self::walk_from(&self.root, index, &mut f);
    }

    /// All pieces in document order
    pub fn pieces(&self) -> Vec<Piece> {
        let mut pieces = Vec::new();
        self.for_each(|piece| {
            pieces.push(*piece);
            ControlFlow::Continue(())
        });
        pieces
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        fn depth(link: &Link) -> usize {
            link.as_ref()
                .map_or(0, |n| 1 + depth(&n.left).max(depth(&n.right)))
        }
        depth(&self.root)
    }

    /// Verify cached aggregates, piece shape, and heap order on every node.
    pub fn check_invariants(&self) -> Result<(), String> {
        fn check(link: &Link, parent_priority: u64) -> Result<(usize, usize), String> {
            let Some(n) = link else {
                return Ok((0, 0));
            };

            if n.priority > parent_priority {
                return Err(format!(
                    "heap order violated at {}: priority {} above parent {}",
                    n.piece, n.priority, parent_priority
                ));
            }
            if n.piece.is_empty() {
                return Err(format!("empty piece stored in tree: {}", n.piece));
            }
            if n.piece.newline_count > n.piece.length {
                return Err(format!("more newlines than bytes: {}", n.piece));
            }

            let (left_len, left_nl) = check(&n.left, n.priority)?;
            let (right_len, right_nl) = check(&n.right, n.priority)?;
            let length = left_len + right_len + n.piece.length;
            let newlines = left_nl + right_nl + n.piece.newline_count;

            if n.subtree_length != length {
                return Err(format!(
                    "subtree_length drift at {}: cached {}, actual {}",
                    n.piece, n.subtree_length, length
                ));
            }
            if n.subtree_newlines != newlines {
                return Err(format!(
                    "subtree_newlines drift at {}: cached {}, actual {}",
                    n.piece, n.subtree_newlines, newlines
                ));
            }

            Ok((length, newlines))
        }

        check(&self.root, u64::MAX).map(|_| ())
    }

    fn split<S>(&mut self, link: Link, index: usize, splitter: &S) -> (Link, Link)
    where
        S: SplitPiece + ?Sized,
    {
        let Some(mut n) = link else {
            return (None, None);
        };

        let left_len = node::length(&n.left);

        if index <= left_len {
            let (left, right) = self.split(n.left.take(), index, splitter);
            n.left = right;
            n.update();
            (left, Some(n))
        } else if index < left_len + n.piece.length {
            // Cut falls inside this piece: splice the tail in as the
            // immediate right neighbour, then retry on a node boundary.
            // The tail takes over the old right subtree, so it inherits this
            // node's priority to keep the heap order intact.
            let offset = index - left_len;
            let tail = splitter.split_piece(&mut n.piece, offset);
            debug_assert_eq!(n.piece.length, offset);

            let mut sibling = Node::new(tail, n.priority);
            sibling.right = n.right.take();
            sibling.update();
            n.right = Some(sibling);
            n.update();

            self.split(Some(n), index, splitter)
        } else {
            let offset = index - left_len - n.piece.length;
            let (left, right) = self.split(n.right.take(), offset, splitter);
            n.right = left;
            n.update();
            (Some(n), right)
        }
    }

    /// Every piece in `left` must precede every piece in `right`.
    fn merge(left: Link, right: Link) -> Link {
        match (left, right) {
            (None, right) => right,
            (left, None) => left,
            (Some(mut l), Some(mut r)) => {
                if l.priority > r.priority {
                    l.right = Self::merge(l.right.take(), Some(r));
                    l.update();
                    Some(l)
                } else {
                    r.left = Self::merge(Some(l), r.left.take());
                    r.update();
                    Some(r)
                }
            }
        }
    }

    fn walk_from<F>(link: &Link, index: usize, f: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&Piece, usize) -> ControlFlow<()>,
    {
        let Some(n) = link else {
            return ControlFlow::Continue(());
        };

        let left_len = node::length(&n.left);

        if index < left_len {
            Self::walk_from(&n.left, index, f)?;
            f(&n.piece, 0)?;
        } else if index < left_len + n.piece.length {
            f(&n.piece, index - left_len)?;
        } else {
            return Self::walk_from(&n.right, index - left_len - n.piece.length, f);
        }

        Self::walk_from(&n.right, 0, f)
    }
}

impl Default for Treap {
    fn default() -> Self {
        Self::new()
    }
}
