//! Counting queries over a range, with point assignment.
//!
//! Every block keeps a sorted copy of its elements. Whole blocks are
//! answered by binary search, partial blocks by a scan, so a query costs
//! $`O(B + (n/B)\log B)`$ and an assignment $`O(B)`$.
//!
//! ```
//! use sorted_buckets::{BlockSize, SortedBuckets};
//!
//! let mut sb = SortedBuckets::with_block_size(
//!     vec![5, 3, 8, 1, 9, 2, 7, 4, 6, 0],
//!     BlockSize::Fixed(3),
//! )?;
//! assert_eq!(sb.count_gt(1..7, &4)?, 3);
//! assert_eq!(sb.kth_smallest(1..7, 0)?, Some(1));
//! assert_eq!(sb.kth_smallest(1..7, 5)?, Some(9));
//!
//! sb.set(4, 0)?;
//! assert_eq!(sb.count_le(.., &0)?, 2);
//! # Ok::<(), sorted_buckets::Error>(())
//! ```

use std::ops::{Range, RangeBounds};

use block_layout::BlockLayout;
pub use block_layout::{BlockSize, Error};
use index_bounds::{checked_index, IndexBounds};
use log::trace;

pub struct SortedBuckets<T> {
    buf: Vec<T>,
    sorted: Vec<Vec<T>>,
    layout: BlockLayout,
}

impl<T: Ord + Clone> SortedBuckets<T> {
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
        let sorted: Vec<_> = values
            .chunks(layout.block_size())
            .map(|chunk| {
                let mut v = chunk.to_vec();
                v.sort_unstable();
                v
            })
            .collect();
        trace!("sorted buckets built: len = {}, blocks = {}", values.len(), sorted.len());
        Ok(Self { buf: values, sorted, layout })
    }

    pub fn len(&self) -> usize { self.buf.len() }
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }

    pub fn get(&self, i: usize) -> Result<&T, Error> {
        checked_index(i, self.len())?;
        Ok(&self.buf[i])
    }

    /// Assigns `value` to element `i` and returns the previous value.
    pub fn set(&mut self, i: usize, value: T) -> Result<T, Error> {
        checked_index(i, self.len())?;
        let sorted = &mut self.sorted[self.layout.belongs(i)];
        let old = &self.buf[i];
        let erase = sorted.partition_point(|x| x < old);
        let mut insert = sorted.partition_point(|x| x < &value);
        if insert < erase {
            sorted[insert..=erase].rotate_right(1);
        } else if insert > erase {
            insert -= 1;
            sorted[erase..=insert].rotate_left(1);
        }
        sorted[insert] = value.clone();
        Ok(std::mem::replace(&mut self.buf[i], value))
    }

    pub fn count_lt(
        &self,
        range: impl RangeBounds<usize>,
        x: &T,
    ) -> Result<usize, Error> {
        let range = range.checked_to_range(self.len())?;
        Ok(self.count_below(range, x, false))
    }

    pub fn count_le(
        &self,
        range: impl RangeBounds<usize>,
        x: &T,
    ) -> Result<usize, Error> {
        let range = range.checked_to_range(self.len())?;
        Ok(self.count_below(range, x, true))
    }

    pub fn count_gt(
        &self,
        range: impl RangeBounds<usize>,
        x: &T,
    ) -> Result<usize, Error> {
        let range = range.checked_to_range(self.len())?;
        Ok(range.len() - self.count_below(range, x, true))
    }

    pub fn count_ge(
        &self,
        range: impl RangeBounds<usize>,
        x: &T,
    ) -> Result<usize, Error> {
        let range = range.checked_to_range(self.len())?;
        Ok(range.len() - self.count_below(range, x, false))
    }

    fn count_below(&self, range: Range<usize>, x: &T, inclusive: bool) -> usize {
        let below = |y: &T| if inclusive { y <= x } else { y < x };
        self.layout
            .pieces(range)
            .map(|piece| {
                if piece.whole {
                    self.sorted[piece.block].partition_point(below)
                } else {
                    self.buf[piece.range].iter().filter(|&y| below(y)).count()
                }
            })
            .sum()
    }

    fn bounds(&self, range: Range<usize>) -> Option<(&T, &T)> {
        let mut res: Option<(&T, &T)> = None;
        for piece in self.layout.pieces(range) {
            let (lo, hi) = if piece.whole {
                let sorted = &self.sorted[piece.block];
                (sorted.first()?, sorted.last()?)
            } else {
                let part = &self.buf[piece.range];
                (part.iter().min()?, part.iter().max()?)
            };
            res = Some(match res {
                Some((l, h)) => (l.min(lo), h.max(hi)),
                None => (lo, hi),
            });
        }
        res
    }
}

impl SortedBuckets<i64> {
    /// The `k`-th smallest value of `range` (0-based, duplicates counted
    /// separately), by binary search on the value for the smallest `x`
    /// with more than `k` elements `<= x`.
    pub fn kth_smallest(
        &self,
        range: impl RangeBounds<usize>,
        k: usize,
    ) -> Result<Option<i64>, Error> {
        let range = range.checked_to_range(self.len())?;
        if k >= range.len() {
            return Ok(None);
        }
        let Some((&lo, &hi)) = self.bounds(range.clone()) else {
            return Ok(None);
        };
        let (mut lo, mut hi) = (lo, hi);
        while lo < hi {
            let mid = (i128::from(lo) + i128::from(hi)).div_euclid(2) as i64;
            if self.count_below(range.clone(), &mid, true) > k {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Ok(Some(lo))
    }
}
