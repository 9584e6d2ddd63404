//! Generic square-root decomposition.
//!
//! The sequence is cut into blocks by a [`BlockLayout`]. Each block carries
//! a summary `S` built by `reduce: FnMut(&[T]) -> S`. A summary may also hold
//! pending state (such as an additive tag) that has not reached the elements
//! yet; `force: FnMut(&S, &mut [T])` writes that state into the elements of
//! the block. A block is always forced before its elements are handed out
//! mutably, and its summary is rebuilt with `reduce` afterwards.
//!
//! Range addition with range sum:
//!
//! ```
//! use sqrt_bucket::{BucketBorrow, BucketRef, SqrtBucket};
//!
//! #[derive(Clone, Copy)]
//! struct Sum { sum: i64, len: i64, tag: i64 }
//!
//! let mut bucket = SqrtBucket::new(
//!     vec![1, 2, 3, 4, 5],
//!     |s: &Sum, a: &mut [i64]| a.iter_mut().for_each(|x| *x += s.tag),
//!     |a: &[i64]| Sum { sum: a.iter().sum(), len: a.len() as i64, tag: 0 },
//! );
//!
//! bucket.query(1..5, |parts| {
//!     for part in parts {
//!         match part {
//!             BucketBorrow::Slice(a) => a.iter_mut().for_each(|x| *x += 10),
//!             BucketBorrow::Summary(s) => {
//!                 s.tag += 10;
//!                 s.sum += 10 * s.len;
//!             }
//!         }
//!     }
//! })?;
//!
//! let sum = bucket.peek(.., |parts| {
//!     parts.iter().map(|part| match part {
//!         BucketRef::Slice(a, s) => a.iter().map(|x| x + s.tag).sum(),
//!         BucketRef::Summary(s) => s.sum,
//!     }).sum::<i64>()
//! })?;
//! assert_eq!(sum, 55);
//! # Ok::<(), index_bounds::OutOfBounds>(())
//! ```

use std::ops::{Range, RangeBounds};

use block_layout::{BlockLayout, BlockSize, Piece};
use index_bounds::{checked_index, IndexBounds, OutOfBounds};
use log::trace;

pub struct SqrtBucket<T, S, Ff, Fr> {
    buf: Vec<T>,
    summary: Vec<S>,
    force: Ff,
    reduce: Fr,
    layout: BlockLayout,
}

pub enum BucketBorrow<'a, T, S> {
    /// The covered part of a partially covered block, already forced.
    Slice(&'a mut [T]),
    Summary(&'a mut S),
}

pub enum BucketRef<'a, T, S> {
    /// The covered part of a partially covered block, with the summary of
    /// the whole block. The elements may still be missing its pending state.
    Slice(&'a [T], &'a S),
    Summary(&'a S),
}

impl<T, S, Ff, Fr> SqrtBucket<T, S, Ff, Fr>
where
    Fr: FnMut(&[T]) -> S,
    Ff: FnMut(&S, &mut [T]),
{
    pub fn new(buf: Vec<T>, force: Ff, reduce: Fr) -> Self {
        Self::with_block_size(buf, force, reduce, BlockSize::default())
    }

    pub fn with_block_size(
        buf: Vec<T>,
        force: Ff,
        mut reduce: Fr,
        block_size: BlockSize,
    ) -> Self {
        let layout = BlockLayout::new(buf.len(), block_size);
        let summary: Vec<S> =
            buf.chunks(layout.block_size()).map(&mut reduce).collect();
        trace!(
            "sqrt bucket built: len = {}, block size = {}, blocks = {}",
            layout.len(),
            layout.block_size(),
            summary.len()
        );
        Self { buf, summary, force, reduce, layout }
    }

    /// Hands the pieces of `range` to `f` for modification, left to right.
    ///
    /// Partially covered blocks are forced before `f` runs and reduced after.
    /// Whole blocks are only given as summaries; `f` must keep them
    /// consistent with what `force` will later write into the elements.
    pub fn query<B, F, R>(&mut self, range: B, f: F) -> Result<R, OutOfBounds>
    where
        B: RangeBounds<usize>,
        F: for<'a> FnOnce(&mut [BucketBorrow<'a, T, S>]) -> R,
    {
        let Range { start, end } = range.checked_to_range(self.buf.len())?;
        if start == end {
            return Ok(f(&mut []));
        }

        let b = self.layout.block_size();
        let (first, last) = (start / b, end.div_ceil(b));
        let mut borrowed = vec![];
        let mut affected = vec![];
        for (i, (chunk_i, summary_i)) in self
            .buf
            .chunks_mut(b)
            .zip(&mut self.summary)
            .enumerate()
            .take(last)
            .skip(first)
        {
            let l = i * b;
            let r = l + chunk_i.len();
            if start <= l && r <= end {
                borrowed.push(BucketBorrow::Summary(summary_i));
            } else {
                (self.force)(summary_i, chunk_i);
                affected.push(i);
                let jl = l.max(start) - l;
                let jr = r.min(end) - l;
                borrowed.push(BucketBorrow::Slice(&mut chunk_i[jl..jr]));
            }
        }
        let res = f(&mut borrowed);
        for i in affected {
            let Range { start, end } = self.layout.block_range(i);
            self.summary[i] = (self.reduce)(&self.buf[start..end]);
        }
        Ok(res)
    }

    /// Edits element `i` in place and rebuilds its block summary.
    pub fn update<F>(&mut self, i: usize, f: F) -> Result<(), OutOfBounds>
    where
        F: FnOnce(&mut T),
    {
        checked_index(i, self.buf.len())?;
        let block = self.layout.belongs(i);
        let range = self.layout.block_range(block);
        let offset = i - range.start;
        let chunk = &mut self.buf[range];
        (self.force)(&self.summary[block], chunk);
        f(&mut chunk[offset]);
        self.summary[block] = (self.reduce)(chunk);
        Ok(())
    }

    pub fn into_vec(mut self) -> Vec<T> {
        let b = self.layout.block_size();
        for (chunk, summary) in self.buf.chunks_mut(b).zip(&self.summary) {
            (self.force)(summary, chunk);
        }
        self.buf
    }
}

impl<T, S, Ff, Fr> SqrtBucket<T, S, Ff, Fr> {
    /// Read-only counterpart of [`SqrtBucket::query`]; nothing is forced.
    pub fn peek<B, F, R>(&self, range: B, f: F) -> Result<R, OutOfBounds>
    where
        B: RangeBounds<usize>,
        F: for<'a> FnOnce(&[BucketRef<'a, T, S>]) -> R,
    {
        let range = range.checked_to_range(self.buf.len())?;
        let borrowed: Vec<_> = self
            .layout
            .pieces(range)
            .map(|Piece { block, range, whole }| {
                let summary = &self.summary[block];
                if whole {
                    BucketRef::Summary(summary)
                } else {
                    BucketRef::Slice(&self.buf[range], summary)
                }
            })
            .collect();
        Ok(f(&borrowed))
    }

    /// Raw element `i` together with the summary of its block.
    pub fn get_with_summary(&self, i: usize) -> Result<(&T, &S), OutOfBounds> {
        checked_index(i, self.buf.len())?;
        Ok((&self.buf[i], &self.summary[self.layout.belongs(i)]))
    }

    /// Raw elements of each block together with its summary.
    pub fn blocks(&self) -> impl Iterator<Item = (&[T], &S)> + '_ {
        self.buf.chunks(self.layout.block_size()).zip(&self.summary)
    }

    pub fn layout(&self) -> &BlockLayout { &self.layout }
    pub fn len(&self) -> usize { self.buf.len() }
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }
}
