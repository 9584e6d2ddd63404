//! Subsets of a bit mask.
//!
//! ```
//! use word_set::{combinations, WordSet};
//!
//! assert!(0b101_u8.subset().eq([0b000, 0b001, 0b100, 0b101]));
//! assert!(0b001_u8.superset(0b011).eq([0b001, 0b011]));
//! assert!(combinations(4, 2).eq([0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]));
//! ```

pub trait WordSet: Sized {
    /// Every `x` with `x & self == x`, in increasing order.
    fn subset(self) -> impl Iterator<Item = Self>;
    /// Every `x` containing `self` and contained in `self | universe`, in
    /// increasing order.
    fn superset(self, universe: Self) -> impl Iterator<Item = Self>;
}

macro_rules! impl_uint {
    ( $($ty:ty)* ) => { $(
        impl WordSet for $ty {
            fn subset(self) -> impl Iterator<Item = Self> {
                let mask = self;
                // next submask: carry into the lowest bit of `mask` not
                // yet set, clearing the set bits below it
                std::iter::successors(Some(0), move |&x| {
                    let rest = mask ^ x;
                    (rest != 0).then(|| {
                        let low = rest & rest.wrapping_neg();
                        (x & !(low - 1)) | low
                    })
                })
            }
            fn superset(self, universe: Self) -> impl Iterator<Item = Self> {
                let base = self;
                (universe & !base).subset().map(move |x| base | x)
            }
        }
    )* };
}

impl_uint! { u8 u16 u32 u64 u128 usize }

/// The `k`-element subsets of `0..n` as masks, in increasing order.
///
/// # Panics
/// If `n > usize::BITS`.
pub fn combinations(n: u32, k: u32) -> impl Iterator<Item = usize> {
    assert!(n <= usize::BITS, "{n} exceeds the word size");
    let first = match k {
        0 => Some(0),
        _ if k > n => None,
        _ => Some(usize::MAX >> (usize::BITS - k)),
    };
    std::iter::successors(first, move |&x| {
        if x == 0 {
            return None;
        }
        let low = x & x.wrapping_neg();
        let carried = x.checked_add(low)?;
        let next = (((carried ^ x) >> 2) / low) | carried;
        (next.checked_shr(n).unwrap_or(0) == 0).then_some(next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanity_check() {
        assert!(0_usize.subset().eq([0]));
        assert!(0b1101_usize.subset().eq([
            0b0000, 0b0001, 0b0100, 0b0101, 0b1000, 0b1001, 0b1100, 0b1101
        ]));
        assert_eq!(u8::MAX.subset().count(), 256);
        assert!(u128::MAX.subset().take(5).eq(0..5));
    }

    #[test]
    fn superset() {
        for universe in 0_u32..64 {
            for mask in 0_u32..64 {
                let expected = (0..128).filter(|&x| {
                    x & mask == mask && x & !(mask | universe) == 0
                });
                assert!(mask.superset(universe).eq(expected));
            }
        }
        assert!(u64::MAX.superset(0).eq([u64::MAX]));
    }

    #[test]
    fn gosper() {
        for n in 0..=10 {
            for k in 0..=11 {
                let expected = (0_usize..1 << n).filter(|x| x.count_ones() == k);
                assert!(combinations(n, k).eq(expected), "n = {n}, k = {k}");
            }
        }
        assert!(combinations(usize::BITS, usize::BITS).eq([usize::MAX]));
        assert_eq!(combinations(usize::BITS, 1).count(), usize::BITS as usize);
        assert_eq!(
            combinations(usize::BITS, 1).last(),
            Some(1 << (usize::BITS - 1))
        );
        let bits = usize::BITS as usize;
        assert_eq!(combinations(usize::BITS, 2).count(), bits * (bits - 1) / 2);
    }
}
