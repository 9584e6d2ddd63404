//! Randomized selection.
//!
//! ```
//! use quickselect::QuickSelect;
//! use rand::thread_rng;
//!
//! let mut a = [5, 3, 8, 1, 9, 2, 7, 4, 6, 0];
//! assert_eq!(a.quickselect(3, &mut thread_rng()), Some(&3));
//! assert!(a[..3].iter().all(|&x| x < 3));
//! assert!(a[4..].iter().all(|&x| x > 3));
//! assert_eq!(a.quickselect(10, &mut thread_rng()), None);
//! ```

use std::cmp::Ordering::{Equal, Greater, Less};

use rand::Rng;

pub trait QuickSelect {
    type Item;
    /// The `k`-th smallest element (0-based).
    ///
    /// The slice is reordered so that `self[..k] <= self[k] <= self[k + 1..]`.
    /// Expected $`O(n)`$.
    fn quickselect<R: Rng + ?Sized>(
        &mut self,
        k: usize,
        rng: &mut R,
    ) -> Option<&Self::Item>;
}

impl<T: Ord> QuickSelect for [T] {
    type Item = T;
    fn quickselect<R: Rng + ?Sized>(
        &mut self,
        k: usize,
        rng: &mut R,
    ) -> Option<&T> {
        if k >= self.len() {
            return None;
        }
        let (mut lo, mut hi) = (0, self.len());
        while hi - lo > 1 {
            self.swap(lo, rng.gen_range(lo..hi));
            let (lt, gt) = partition3(&mut self[lo..hi]);
            let (lt, gt) = (lo + lt, lo + gt);
            if k < lt {
                hi = lt;
            } else if k >= gt {
                lo = gt;
            } else {
                break;
            }
        }
        Some(&self[k])
    }
}

/// Three-way partition around `a[0]`, returning `(lt, gt)` with
/// `a[..lt] < pivot`, `a[lt..gt] == pivot` and `a[gt..] > pivot`.
fn partition3<T: Ord>(a: &mut [T]) -> (usize, usize) {
    let (mut lt, mut i, mut gt) = (0, 1, a.len());
    // a[lt] is always a copy of the pivot
    while i < gt {
        match a[i].cmp(&a[lt]) {
            Less => {
                a.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Equal => i += 1,
            Greater => {
                gt -= 1;
                a.swap(i, gt);
            }
        }
    }
    (lt, gt)
}
