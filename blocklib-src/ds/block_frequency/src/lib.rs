//! Range frequency queries with point assignment.
//!
//! Each block keeps a value-to-count map of its elements. A range query
//! merges the maps of the whole blocks it covers with the elements of its
//! (at most two) partial blocks, so values may be large or sparse.
//!
//! ```
//! use block_frequency::{BlockFrequency, BlockSize};
//!
//! let mut freq = BlockFrequency::with_block_size(
//!     vec![1, 2, 1, 3, 1, 1, 2],
//!     BlockSize::Fixed(3),
//! )?;
//! assert_eq!(freq.count(.., &1)?, 4);
//! assert_eq!(freq.majority(..)?, Some((1, 4)));
//! assert_eq!(freq.majority(1..4)?, None);
//!
//! freq.set(0, 2)?;
//! assert_eq!(freq.majority(..)?, None);
//! assert_eq!(freq.exceeding(.., 2)?, Some((1, 3)));
//! # Ok::<(), block_frequency::Error>(())
//! ```

use std::{
    collections::BTreeMap,
    ops::{Range, RangeBounds},
};

use block_layout::BlockLayout;
pub use block_layout::{BlockSize, Error};
use index_bounds::{checked_index, IndexBounds};
use log::trace;

pub struct BlockFrequency<T> {
    buf: Vec<T>,
    counts: Vec<BTreeMap<T, usize>>,
    layout: BlockLayout,
}

fn count_all<T: Ord + Clone>(a: &[T]) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for x in a {
        *counts.entry(x.clone()).or_insert(0) += 1;
    }
    counts
}

impl<T: Ord + Clone> BlockFrequency<T> {
    pub fn new(values: Vec<T>) -> Result<Self, Error> {
        Self::with_block_size(values, BlockSize::default())
    }

    pub fn with_block_size(
        values: Vec<T>,
        block_size: BlockSize,
    ) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptySequence);
        }
        let layout = BlockLayout::new(values.len(), block_size);
        let counts: Vec<_> =
            values.chunks(layout.block_size()).map(count_all).collect();
        trace!(
            "frequency index built: len = {}, blocks = {}, distinct per block <= {}",
            values.len(),
            counts.len(),
            counts.iter().map(BTreeMap::len).max().unwrap_or(0)
        );
        Ok(Self { buf: values, counts, layout })
    }

    pub fn len(&self) -> usize { self.buf.len() }
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }
    pub fn block_size(&self) -> usize { self.layout.block_size() }

    pub fn get(&self, i: usize) -> Result<&T, Error> {
        checked_index(i, self.len())?;
        Ok(&self.buf[i])
    }

    /// Assigns `value` to element `i` and returns the previous value.
    pub fn set(&mut self, i: usize, value: T) -> Result<T, Error> {
        checked_index(i, self.len())?;
        let counts = &mut self.counts[self.layout.belongs(i)];
        *counts.entry(value.clone()).or_insert(0) += 1;
        let old = std::mem::replace(&mut self.buf[i], value);
        if let Some(c) = counts.get_mut(&old) {
            *c -= 1;
            if *c == 0 {
                counts.remove(&old);
            }
        }
        Ok(old)
    }

    pub fn count(
        &self,
        range: impl RangeBounds<usize>,
        value: &T,
    ) -> Result<usize, Error> {
        let range = range.checked_to_range(self.len())?;
        let count = self
            .layout
            .pieces(range)
            .map(|piece| {
                if piece.whole {
                    self.counts[piece.block].get(value).copied().unwrap_or(0)
                } else {
                    self.buf[piece.range].iter().filter(|&x| x == value).count()
                }
            })
            .sum();
        Ok(count)
    }

    /// The smallest value occurring more than `threshold` times in `range`,
    /// with its count.
    pub fn exceeding(
        &self,
        range: impl RangeBounds<usize>,
        threshold: usize,
    ) -> Result<Option<(T, usize)>, Error> {
        let range = range.checked_to_range(self.len())?;
        if range.len() <= threshold {
            return Ok(None);
        }
        Ok(self.find(range, |c| c > threshold))
    }

    /// The smallest value whose count in `range` exceeds `num / den` of the
    /// range length, with its count.
    pub fn frequent(
        &self,
        range: impl RangeBounds<usize>,
        num: usize,
        den: usize,
    ) -> Result<Option<(T, usize)>, Error> {
        let range = range.checked_to_range(self.len())?;
        let len = range.len() as u128;
        let (num, den) = (num as u128, den as u128);
        Ok(self.find(range, |c| c as u128 * den > len * num))
    }

    /// The value occupying more than half of `range`, if any.
    pub fn majority(
        &self,
        range: impl RangeBounds<usize>,
    ) -> Result<Option<(T, usize)>, Error> {
        self.frequent(range, 1, 2)
    }

    fn find(
        &self,
        range: Range<usize>,
        pred: impl Fn(usize) -> bool,
    ) -> Option<(T, usize)> {
        let mut merged: BTreeMap<&T, usize> = BTreeMap::new();
        for piece in self.layout.pieces(range) {
            if piece.whole {
                for (x, &c) in &self.counts[piece.block] {
                    *merged.entry(x).or_insert(0) += c;
                }
            } else {
                for x in &self.buf[piece.range] {
                    *merged.entry(x).or_insert(0) += 1;
                }
            }
        }
        merged.into_iter().find(|&(_, c)| pred(c)).map(|(x, c)| (x.clone(), c))
    }
}
