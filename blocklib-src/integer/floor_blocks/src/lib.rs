//! Runs of $`i`$ on which $`\lfloor n/i\rfloor`$ is constant.

use std::ops::RangeInclusive;

/// Splits `1..=n` into the maximal runs on which $`\lfloor n/i\rfloor`$ is
/// constant.
///
/// There are $`O(\sqrt{n})`$ runs, yielded as `(quotient, lo..=hi)` in
/// increasing `i`.
///
/// ```
/// use floor_blocks::FloorBlocks;
///
/// assert!(10_u32.floor_blocks().eq([
///     (10, 1..=1),
///     (5, 2..=2),
///     (3, 3..=3),
///     (2, 4..=5),
///     (1, 6..=10),
/// ]));
/// assert!(0_u32.floor_blocks().eq([]));
/// ```
pub trait FloorBlocks: Sized {
    fn floor_blocks(self) -> impl Iterator<Item = (Self, RangeInclusive<Self>)>;
}

macro_rules! impl_uint {
    ( $($ty:ty)* ) => { $(
        impl FloorBlocks for $ty {
            fn floor_blocks(self) -> impl Iterator<Item = (Self, RangeInclusive<Self>)> {
                let n = self;
                let mut next = (n > 0).then_some(1);
                std::iter::from_fn(move || {
                    let lo = next?;
                    let q = n / lo;
                    let hi = n / q;
                    next = (hi < n).then(|| hi + 1);
                    Some((q, lo..=hi))
                })
            }
        }
    )* };
}

impl_uint! { u8 u16 u32 u64 u128 usize }

#[test]
fn sanity_check() {
    for n in 0_u32..300 {
        let mut expected: Vec<(u32, RangeInclusive<u32>)> = vec![];
        for i in 1..=n {
            match expected.last_mut() {
                Some((q, r)) if *q == n / i => *r = *r.start()..=i,
                _ => expected.push((n / i, i..=i)),
            }
        }
        assert!(n.floor_blocks().eq(expected), "n = {n}");
    }
}

#[test]
fn type_max() {
    let last = u8::MAX.floor_blocks().last();
    assert_eq!(last, Some((1, 128..=255)));
    assert_eq!(u8::MAX.floor_blocks().map(|(_, r)| r.count()).sum::<usize>(), 255);

    let blocks = u64::MAX.floor_blocks().take(3).collect::<Vec<_>>();
    assert_eq!(blocks, [
        (u64::MAX, 1..=1),
        (u64::MAX / 2, 2..=2),
        (u64::MAX / 3, 3..=3),
    ]);
    assert_eq!(u16::MAX.floor_blocks().last(), Some((1, (1 << 15)..=u16::MAX)));
    assert_eq!(u32::MAX.floor_blocks().last(), Some((1, (1 << 31)..=u32::MAX)));
    let covered: u64 = u32::MAX
        .floor_blocks()
        .map(|(_, r)| u64::from(r.end() - r.start()) + 1)
        .sum();
    assert_eq!(covered, u64::from(u32::MAX));

    // too many runs to walk; the prefix is still exact
    assert!(u128::MAX.floor_blocks().take(4).eq([
        (u128::MAX, 1..=1),
        (u128::MAX / 2, 2..=2),
        (u128::MAX / 3, 3..=3),
        (u128::MAX / 4, 4..=4),
    ]));
    assert!(usize::MAX.floor_blocks().nth(1000).is_some());
}

#[test]
fn count() {
    for n in [1_u64, 2, 99, 100, 10_u64.pow(6), 10_u64.pow(12)] {
        let len = n.floor_blocks().count() as u64;
        let r = (n as f64).sqrt() as u64;
        assert!(len <= 2 * r + 1, "n = {n}");
    }
}
