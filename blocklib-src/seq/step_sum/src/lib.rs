//! Sums along arithmetic progressions of indices.
//!
//! `sum(s, k)` is $`a_s + a_{s+k} + a_{s+2k} + \dots`$. Steps up to a
//! threshold $`T`$ are served from suffix tables built in $`O(nT)`$; larger
//! steps visit fewer than $`n/T`$ elements directly.
//!
//! ```
//! use step_sum::{BlockSize, Error, StepSums};
//!
//! let ss = StepSums::with_threshold(vec![1, 2, 3, 4, 5, 6, 7], BlockSize::Fixed(2));
//! assert_eq!(ss.sum(0, 1), Ok(28));
//! assert_eq!(ss.sum(1, 2), Ok(2 + 4 + 6));
//! assert_eq!(ss.sum(2, 3), Ok(3 + 6));
//! assert!(matches!(ss.sum(0, 0), Err(Error::ZeroStep)));
//! ```

use std::{error, fmt};

pub use block_layout::BlockSize;
use index_bounds::{checked_index, OutOfBounds};
use log::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    ZeroStep,
    OutOfBounds(OutOfBounds),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroStep => write!(f, "step must be positive"),
            Error::OutOfBounds(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::ZeroStep => None,
            Error::OutOfBounds(e) => Some(e),
        }
    }
}

impl From<OutOfBounds> for Error {
    fn from(e: OutOfBounds) -> Self { Error::OutOfBounds(e) }
}

pub struct StepSums {
    values: Vec<i64>,
    /// `suffix[k - 1][s] == sum(s, k)`.
    suffix: Vec<Vec<i128>>,
}

impl StepSums {
    pub fn new(values: Vec<i64>) -> Self {
        Self::with_threshold(values, BlockSize::default())
    }

    pub fn with_threshold(values: Vec<i64>, threshold: BlockSize) -> Self {
        let n = values.len();
        let threshold = threshold.resolve(n).min(n);
        let suffix = (1..=threshold)
            .map(|k| {
                let mut table = vec![0_i128; n];
                for s in (0..n).rev() {
                    let next = table.get(s + k).copied().unwrap_or(0);
                    table[s] = i128::from(values[s]) + next;
                }
                table
            })
            .collect();
        debug!("step sums: len = {n}, tabulated steps = 1..={threshold}");
        Self { values, suffix }
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn threshold(&self) -> usize { self.suffix.len() }

    pub fn sum(&self, start: usize, step: usize) -> Result<i128, Error> {
        if step == 0 {
            return Err(Error::ZeroStep);
        }
        checked_index(start, self.len())?;
        Ok(match self.suffix.get(step - 1) {
            Some(table) => table[start],
            None => self.values[start..]
                .iter()
                .step_by(step)
                .map(|&x| i128::from(x))
                .sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn naive(a: &[i64], start: usize, step: usize) -> i128 {
        (start..a.len()).step_by(step).map(|i| i128::from(a[i])).sum()
    }

    #[test]
    fn thresholds() {
        let a: Vec<i64> = (0..100).map(|i| (i * 37 % 101) - 50).collect();
        for threshold in
            [BlockSize::Sqrt, BlockSize::Fixed(0), BlockSize::Fixed(3), BlockSize::Fixed(1000)]
        {
            let ss = StepSums::with_threshold(a.clone(), threshold);
            assert!(ss.threshold() <= a.len());
            for start in 0..a.len() {
                for step in 1..=a.len() + 1 {
                    assert_eq!(ss.sum(start, step), Ok(naive(&a, start, step)));
                }
            }
        }
    }

    #[test]
    fn errors() {
        let ss = StepSums::new(vec![1, 2, 3]);
        assert_eq!(ss.threshold(), 2);
        assert_eq!(ss.sum(1, 0), Err(Error::ZeroStep));
        assert_eq!(ss.sum(3, 1), Err(Error::OutOfBounds(OutOfBounds::Index(3, 3))));
        assert_eq!(ss.sum(2, usize::MAX), Ok(3));

        let empty = StepSums::new(vec![]);
        assert_eq!(empty.threshold(), 0);
        assert!(empty.sum(0, 1).is_err());
    }

    #[test]
    fn wide() {
        let ss = StepSums::new(vec![i64::MAX; 9]);
        assert_eq!(ss.sum(0, 1), Ok(9 * i128::from(i64::MAX)));
        assert_eq!(ss.sum(0, 4), Ok(3 * i128::from(i64::MAX)));
    }

    proptest! {
        #[test]
        fn matches_naive(
            a in prop::collection::vec(any::<i64>(), 1..60),
            t in 0_usize..10,
            start in 0_usize..60,
            step in 1_usize..70,
        ) {
            let ss = StepSums::with_threshold(a.clone(), BlockSize::Fixed(t));
            let start = start % a.len();
            prop_assert_eq!(ss.sum(start, step), Ok(naive(&a, start, step)));
        }
    }
}
