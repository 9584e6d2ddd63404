//! Index and range validation against a sequence length.
//!
//! Every structure in this workspace accepts `impl RangeBounds<usize>` for
//! its range operations. The bounds are resolved here into a half-open
//! `Range<usize>` or rejected with [`OutOfBounds`]; nothing is clamped.
//!
//! ```
//! use index_bounds::{IndexBounds, OutOfBounds};
//!
//! assert_eq!((2..=4).checked_to_range(10), Ok(2..5));
//! assert_eq!((..).checked_to_range(10), Ok(0..10));
//! assert_eq!((3..11).checked_to_range(10), Err(OutOfBounds::EndIndexLen(3, 11, 10)));
//! ```

use std::{
    error::Error,
    fmt,
    ops::{
        Bound::{Excluded, Included, Unbounded},
        Range, RangeBounds,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutOfBounds {
    /// `(index, len)`
    Index(usize, usize),
    /// `(start, end, len)`
    StartIndexLen(usize, usize, usize),
    /// `(start, end, len)`
    EndIndexLen(usize, usize, usize),
    /// `(start, end, len)`
    IndexOrder(usize, usize, usize),
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OutOfBounds::Index(index, len) => write!(
                f,
                "index out of bounds: the len is {len} but the index is {index}"
            ),
            OutOfBounds::StartIndexLen(start, _, len) => write!(
                f,
                "range start index {start} out of range for sequence of length {len}"
            ),
            OutOfBounds::EndIndexLen(_, end, len) => write!(
                f,
                "range end index {end} out of range for sequence of length {len}"
            ),
            OutOfBounds::IndexOrder(start, end, _) => {
                write!(f, "range starts at {start} but ends at {end}")
            }
        }
    }
}

impl Error for OutOfBounds {}

pub trait IndexBounds {
    fn checked_to_range(&self, len: usize) -> Result<Range<usize>, OutOfBounds>;

    /// # Panics
    /// Panics with the [`OutOfBounds`] message if the bounds are invalid.
    fn to_range(&self, len: usize) -> Range<usize> {
        match self.checked_to_range(len) {
            Ok(range) => range,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<R: RangeBounds<usize>> IndexBounds for R {
    fn checked_to_range(&self, len: usize) -> Result<Range<usize>, OutOfBounds> {
        // `usize::MAX` is never a valid bound for an in-memory sequence, so
        // the overflowing cases are reported with the saturated value.
        let start = match self.start_bound() {
            Included(&s) => s,
            Excluded(&s) => s.checked_add(1).ok_or(OutOfBounds::StartIndexLen(
                s,
                usize::MAX,
                len,
            ))?,
            Unbounded => 0,
        };
        let end = match self.end_bound() {
            Included(&e) => e
                .checked_add(1)
                .ok_or(OutOfBounds::EndIndexLen(start, e, len))?,
            Excluded(&e) => e,
            Unbounded => len,
        };

        if start > len {
            Err(OutOfBounds::StartIndexLen(start, end, len))
        } else if end > len {
            Err(OutOfBounds::EndIndexLen(start, end, len))
        } else if start > end {
            Err(OutOfBounds::IndexOrder(start, end, len))
        } else {
            Ok(start..end)
        }
    }
}

pub fn checked_index(index: usize, len: usize) -> Result<usize, OutOfBounds> {
    if index < len { Ok(index) } else { Err(OutOfBounds::Index(index, len)) }
}
