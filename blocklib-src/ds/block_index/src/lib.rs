//! Range sum and range minimum over `i64` values with point assignment and
//! range addition, in $`O(\sqrt{n})`$ per operation.
//!
//! Each block keeps its sum, its minimum and a pending additive tag. Range
//! addition only touches the tags of whole blocks; the true value of element
//! `i` is its stored value plus the tag of its block.
//!
//! ```
//! use block_index::{BlockIndex, BlockSize};
//!
//! let mut index = BlockIndex::with_block_size(
//!     vec![5, 3, 8, 1, 9, 2, 7, 4, 6, 0],
//!     BlockSize::Fixed(3),
//! )?;
//! assert_eq!(index.sum(1..7)?, 30);
//!
//! index.add(1..=5, 10)?;
//! assert_eq!(index.sum(1..=5)?, 23 + 50);
//! assert_eq!(index.min(..)?, Some(0));
//!
//! index.set(9, 100)?;
//! assert_eq!(index.min(..)?, Some(4));
//! # Ok::<(), block_index::Error>(())
//! ```

use std::{fmt, ops::RangeBounds};

pub use block_layout::{BlockSize, Error};
use log::trace;
use sqrt_bucket::{BucketBorrow, BucketRef, SqrtBucket};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Summary {
    sum: i128,
    min: i128,
    tag: i128,
    len: usize,
}

type Force = fn(&Summary, &mut [i64]);
type Reduce = fn(&[i64]) -> Summary;

fn force(s: &Summary, a: &mut [i64]) {
    if s.tag != 0 {
        a.iter_mut().for_each(|x| *x = (i128::from(*x) + s.tag) as i64);
    }
}

fn reduce(a: &[i64]) -> Summary {
    Summary {
        sum: a.iter().map(|&x| i128::from(x)).sum(),
        min: a.iter().copied().min().map_or(i128::MAX, i128::from),
        tag: 0,
        len: a.len(),
    }
}

pub struct BlockIndex {
    bucket: SqrtBucket<i64, Summary, Force, Reduce>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Query {
    Sum,
    Min,
}

impl BlockIndex {
    pub fn new(values: Vec<i64>) -> Result<Self, Error> {
        Self::with_block_size(values, BlockSize::default())
    }

    pub fn with_block_size(
        values: Vec<i64>,
        block_size: BlockSize,
    ) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptySequence);
        }
        let bucket = SqrtBucket::with_block_size(
            values,
            force as Force,
            reduce as Reduce,
            block_size,
        );
        Ok(Self { bucket })
    }

    pub fn len(&self) -> usize { self.bucket.len() }
    pub fn is_empty(&self) -> bool { self.bucket.is_empty() }
    pub fn block_size(&self) -> usize { self.bucket.layout().block_size() }

    pub fn get(&self, i: usize) -> Result<i64, Error> {
        let (&x, s) = self.bucket.get_with_summary(i)?;
        Ok((i128::from(x) + s.tag) as i64)
    }

    /// Assigns `value` to element `i`, rebuilding its block in $`O(B)`$.
    pub fn set(&mut self, i: usize, value: i64) -> Result<(), Error> {
        self.bucket.update(i, |x| *x = value)?;
        Ok(())
    }

    /// Adds `delta` to every element of `range`.
    ///
    /// The resulting values are expected to stay within `i64`; the pending
    /// tags of whole blocks are kept in `i128`.
    pub fn add(
        &mut self,
        range: impl RangeBounds<usize>,
        delta: i64,
    ) -> Result<(), Error> {
        self.bucket.query(range, |parts| {
            let mut tagged = 0;
            for part in parts {
                match part {
                    BucketBorrow::Slice(a) => {
                        a.iter_mut().for_each(|x| *x += delta)
                    }
                    BucketBorrow::Summary(s) => {
                        s.tag += i128::from(delta);
                        s.sum += i128::from(delta) * s.len as i128;
                        s.min += i128::from(delta);
                        tagged += 1;
                    }
                }
            }
            trace!("add {delta}: {tagged} blocks tagged");
        })?;
        Ok(())
    }

    /// Sum of `range`; zero for an empty range.
    pub fn sum(&self, range: impl RangeBounds<usize>) -> Result<i128, Error> {
        let sum = self.bucket.peek(range, |parts| {
            parts
                .iter()
                .map(|part| match part {
                    BucketRef::Slice(a, s) => a
                        .iter()
                        .map(|&x| i128::from(x) + s.tag)
                        .sum::<i128>(),
                    BucketRef::Summary(s) => s.sum,
                })
                .sum::<i128>()
        })?;
        Ok(sum)
    }

    /// Minimum of `range`; `None` for an empty range.
    pub fn min(
        &self,
        range: impl RangeBounds<usize>,
    ) -> Result<Option<i64>, Error> {
        let min = self.bucket.peek(range, |parts| {
            parts
                .iter()
                .filter_map(|part| match part {
                    BucketRef::Slice(a, s) => {
                        a.iter().min().map(|&x| i128::from(x) + s.tag)
                    }
                    BucketRef::Summary(s) => Some(s.min),
                })
                .min()
        })?;
        Ok(min.map(|x| x as i64))
    }

    pub fn query(
        &self,
        range: impl RangeBounds<usize>,
        kind: Query,
    ) -> Result<Option<i128>, Error> {
        match kind {
            Query::Sum => self.sum(range).map(Some),
            Query::Min => Ok(self.min(range)?.map(i128::from)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.bucket.blocks().flat_map(|(a, s)| {
            a.iter().map(move |&x| (i128::from(x) + s.tag) as i64)
        })
    }

    pub fn to_vec(&self) -> Vec<i64> { self.iter().collect() }
}

impl fmt::Debug for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
