//! Square-root decomposition and friends.
//!
//! The sequence is cut into blocks of size $`B`$ (by default
//! $`\lceil\sqrt{n}\rceil`$, see [`ds::BlockSize`]). Each block keeps a
//! summary, and a range operation touches at most two blocks element by
//! element and the rest through their summaries.
//!
//! - [`ds::BlockIndex`]: point assign, range add, range sum and min.
//! - [`ds::BlockFrequency`]: counts and frequent values of a range.
//! - [`ds::SortedBuckets`]: order statistics of a range.
//! - [`ds::SqrtBucket`]: the generic engine with user-defined summaries.
//! - [`seq::StepSums`], [`graph::KPaths`]: the same balancing applied to a
//!   parameter instead of a position.
//!
//! ```
//! use blocklib_doc::ds::{BlockIndex, BlockSize};
//!
//! let mut index = BlockIndex::with_block_size(
//!     vec![5, 3, 8, 1, 9, 2, 7, 4, 6, 0],
//!     BlockSize::Fixed(3),
//! )?;
//! assert_eq!(index.sum(2..8)?, 31);
//! index.add(2..8, 10)?;
//! assert_eq!(index.min(..)?, Some(0));
//! assert_eq!(index.sum(..)?, 105);
//! # Ok::<(), blocklib_doc::ds::Error>(())
//! ```

pub use algo;
pub use ds;
pub use graph;
pub use integer;
pub use ops;
pub use random;
pub use seq;
