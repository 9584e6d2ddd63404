//! Random test data.

use std::ops::{Range, RangeInclusive};

use rand::{
    distributions::{Distribution, Uniform},
    seq::SliceRandom,
    Rng,
};

pub trait Gen {
    type Output;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output;
}

/// `len` values drawn from `gen`.
pub struct VecOf<G> {
    pub gen: G,
    pub len: usize,
}

/// A valid, possibly empty, range `l..r` with `r <= len`.
pub struct SubRange {
    pub len: usize,
}

/// Edge list of a uniformly relabelled random tree on `n` vertices.
pub struct Tree {
    pub n: usize,
}

macro_rules! impl_range {
    ( $($ty:ty)* ) => { $(
        impl Gen for Range<$ty> {
            type Output = $ty;
            fn generate<R: Rng>(&self, rng: &mut R) -> $ty {
                Uniform::from(self.clone()).sample(rng)
            }
        }
        impl Gen for RangeInclusive<$ty> {
            type Output = $ty;
            fn generate<R: Rng>(&self, rng: &mut R) -> $ty {
                Uniform::from(self.clone()).sample(rng)
            }
        }
    )* }
}

impl_range! { i32 i64 u32 u64 usize }

impl<G: Gen> Gen for VecOf<G> {
    type Output = Vec<G::Output>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output {
        (0..self.len).map(|_| self.gen.generate(rng)).collect()
    }
}

impl Gen for SubRange {
    type Output = Range<usize>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Range<usize> {
        let l = (0..=self.len).generate(rng);
        let r = (0..=self.len).generate(rng);
        l.min(r)..l.max(r)
    }
}

impl Gen for Tree {
    type Output = Vec<(usize, usize)>;
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Output {
        let n = self.n;
        let mut label: Vec<_> = (0..n).collect();
        label.shuffle(rng);
        let mut edges: Vec<_> = (1..n)
            .map(|v| {
                let p = (0..v).generate(rng);
                let (u, v) = (label[p], label[v]);
                if rng.gen() { (u, v) } else { (v, u) }
            })
            .collect();
        edges.shuffle(rng);
        edges
    }
}
