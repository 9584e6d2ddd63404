//! Partition of `0..len` into contiguous blocks of a fixed size.
//!
//! A block size of $`B \approx \sqrt{n}`$ balances the $`O(B)`$ work spent
//! on the (at most two) partially covered blocks of a range against the
//! $`O(n/B)`$ work spent combining whole blocks.
//!
//! ```
//! use block_layout::{BlockLayout, BlockSize, Piece};
//!
//! let layout = BlockLayout::new(10, BlockSize::Fixed(3));
//! assert_eq!(layout.block_count(), 4);
//! assert_eq!(layout.block_range(3), 9..10);
//!
//! let pieces: Vec<_> = layout.pieces(1..7).collect();
//! assert_eq!(pieces, [
//!     Piece { block: 0, range: 1..3, whole: false },
//!     Piece { block: 1, range: 3..6, whole: true },
//!     Piece { block: 2, range: 6..7, whole: false },
//! ]);
//! ```

use std::{error, fmt, ops::Range};

use index_bounds::OutOfBounds;
use log::{debug, warn};

/// Error shared by the block structures built on a [`BlockLayout`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    EmptySequence,
    OutOfBounds(OutOfBounds),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySequence => {
                write!(f, "cannot build an index over an empty sequence")
            }
            Error::OutOfBounds(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::EmptySequence => None,
            Error::OutOfBounds(e) => Some(e),
        }
    }
}

impl From<OutOfBounds> for Error {
    fn from(e: OutOfBounds) -> Self { Error::OutOfBounds(e) }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BlockSize {
    /// $`\lceil\sqrt{n}\rceil`$.
    #[default]
    Sqrt,
    Fixed(usize),
}

impl BlockSize {
    pub fn resolve(self, len: usize) -> usize {
        let size = match self {
            BlockSize::Sqrt => ceil_sqrt(len),
            BlockSize::Fixed(size) => size,
        };
        if size == 0 {
            if self != BlockSize::Sqrt {
                warn!("block size {self:?} clamped to 1 (len = {len})");
            }
            return 1;
        }
        debug!("block size {self:?} resolved to {size} (len = {len})");
        size
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let sq = |x: usize| x as u128 * x as u128;
    let n_ = n as u128;
    let mut r = (n as f64).sqrt() as usize;
    while sq(r) > n_ {
        r -= 1;
    }
    while sq(r + 1) <= n_ {
        r += 1;
    }
    if sq(r) < n_ { r + 1 } else { r }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockLayout {
    len: usize,
    block_size: usize,
}

/// A maximal part of a query range lying inside a single block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Piece {
    pub block: usize,
    /// Absolute element indices.
    pub range: Range<usize>,
    /// Whether `range` covers the whole block.
    pub whole: bool,
}

pub struct Pieces<'a> {
    layout: &'a BlockLayout,
    start: usize,
    end: usize,
}

impl BlockLayout {
    pub fn new(len: usize, block_size: BlockSize) -> Self {
        Self { len, block_size: block_size.resolve(len) }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn block_size(&self) -> usize { self.block_size }
    pub fn block_count(&self) -> usize { self.len.div_ceil(self.block_size) }

    pub fn belongs(&self, i: usize) -> usize { i / self.block_size }

    /// Element indices of `block`; empty at `len` for blocks past the end.
    pub fn block_range(&self, block: usize) -> Range<usize> {
        let start = block.saturating_mul(self.block_size).min(self.len);
        let end = start.saturating_add(self.block_size).min(self.len);
        start..end
    }

    /// Splits `range` into its pieces from left to right.
    ///
    /// The caller is responsible for `range.end <= self.len()`.
    pub fn pieces(&self, range: Range<usize>) -> Pieces<'_> {
        debug_assert!(range.end <= self.len);
        Pieces { layout: self, start: range.start, end: range.end }
    }
}

impl Iterator for Pieces<'_> {
    type Item = Piece;
    fn next(&mut self) -> Option<Piece> {
        if self.start >= self.end {
            return None;
        }
        let block = self.layout.belongs(self.start);
        let bounds = self.layout.block_range(block);
        let end = bounds.end.min(self.end);
        let whole = self.start == bounds.start && end == bounds.end;
        let range = self.start..end;
        self.start = end;
        Some(Piece { block, range, whole })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_sizes() {
        let expected = [1, 1, 2, 2, 2, 3, 3, 3, 3, 3, 4];
        for (n, &e) in expected.iter().enumerate() {
            assert_eq!(BlockSize::Sqrt.resolve(n), e, "n = {n}");
        }
        assert_eq!(BlockSize::Sqrt.resolve(10_usize.pow(6)), 1000);
        assert_eq!(BlockSize::Sqrt.resolve(10_usize.pow(6) + 1), 1001);
        assert_eq!(BlockSize::Sqrt.resolve(usize::MAX), 1 << (usize::BITS / 2));
    }

    #[test]
    fn error_source() {
        use std::error::Error as _;

        let e = Error::from(OutOfBounds::Index(3, 3));
        assert_eq!(e.to_string(), OutOfBounds::Index(3, 3).to_string());
        assert!(e.source().is_some());
        assert!(Error::EmptySequence.source().is_none());
    }

    #[test]
    fn clamp_zero() {
        assert_eq!(BlockSize::Fixed(0).resolve(10), 1);
        assert_eq!(BlockLayout::new(10, BlockSize::Fixed(0)).block_count(), 10);
    }

    #[test]
    fn partition() {
        for len in 0..30 {
            for b in 1..8 {
                let layout = BlockLayout::new(len, BlockSize::Fixed(b));
                let mut next = 0;
                for block in 0..layout.block_count() {
                    let range = layout.block_range(block);
                    assert_eq!(range.start, next);
                    assert!(!range.is_empty() && range.len() <= b);
                    assert!(range.clone().all(|i| layout.belongs(i) == block));
                    next = range.end;
                }
                assert_eq!(next, len);
            }
        }
    }

    #[test]
    fn pieces() {
        for len in 0..20 {
            for b in 1..6 {
                let layout = BlockLayout::new(len, BlockSize::Fixed(b));
                for l in 0..=len {
                    for r in l..=len {
                        let pieces: Vec<_> = layout.pieces(l..r).collect();
                        let covered: Vec<_> =
                            pieces.iter().flat_map(|p| p.range.clone()).collect();
                        assert!(covered.into_iter().eq(l..r));
                        for p in &pieces {
                            assert_eq!(p.whole, p.range == layout.block_range(p.block));
                        }
                        let partial = pieces.iter().filter(|p| !p.whole).count();
                        assert!(partial <= 2);
                    }
                }
            }
        }
    }

    #[test]
    fn block_range_past_the_end() {
        let huge = BlockLayout::new(10, BlockSize::Fixed(usize::MAX));
        assert_eq!(huge.block_count(), 1);
        assert_eq!(huge.block_range(0), 0..10);
        assert_eq!(huge.block_range(1), 10..10);
        assert_eq!(huge.block_range(usize::MAX), 10..10);

        let layout = BlockLayout::new(10, BlockSize::Fixed(3));
        assert_eq!(layout.block_range(4), 10..10);
        assert_eq!(layout.block_range(usize::MAX), 10..10);
    }

    #[test]
    fn single_block() {
        let layout = BlockLayout::new(10, BlockSize::Fixed(3));
        let pieces: Vec<_> = layout.pieces(4..5).collect();
        assert_eq!(pieces, [Piece { block: 1, range: 4..5, whole: false }]);
        assert_eq!(layout.pieces(4..4).count(), 0);
    }
}
