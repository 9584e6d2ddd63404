//! Packing vertex-disjoint paths of a fixed size into a tree.
//!
//! For each $`k`$, the maximum number of vertex-disjoint simple paths with
//! exactly $`k`$ vertices. One $`k`$ takes $`O(n)`$ by a bottom-up greedy.
//! Since the answer for $`k`$ is at most $`n/k`$ and non-increasing in
//! $`k`$, all of $`k = 1, \dots, n`$ take $`O(n\sqrt{n\log n})`$ with a
//! suitable threshold.
//!
//! ```
//! use k_paths::{BlockSize, KPaths};
//!
//! // 0 - 1 - 2 - 3
//! //     |
//! //     4 - 5
//! let tree = KPaths::new(6, &[(0, 1), (1, 2), (2, 3), (1, 4), (4, 5)])?;
//! assert_eq!(tree.max_paths(2), 3);
//! assert_eq!(tree.max_paths(3), 1);
//! assert_eq!(tree.max_paths(5), 1);
//! assert_eq!(tree.max_paths_all(BlockSize::Sqrt), [0, 6, 3, 1, 1, 1, 0]);
//! # Ok::<(), k_paths::Error>(())
//! ```

use std::{error, fmt};

pub use block_layout::BlockSize;
use log::{debug, trace};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// `(expected, found)`
    EdgeCount(usize, usize),
    /// `(u, v, n)`
    Endpoint(usize, usize, usize),
    Disconnected,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::EdgeCount(expected, found) => write!(
                f,
                "a tree needs {expected} edges but {found} were given"
            ),
            Error::Endpoint(u, v, n) => {
                write!(f, "edge ({u}, {v}) has an endpoint outside 0..{n}")
            }
            Error::Disconnected => write!(f, "the edges do not form a tree"),
        }
    }
}

impl error::Error for Error {}

pub struct KPaths {
    /// Preorder from vertex 0.
    order: Vec<usize>,
    parent: Vec<usize>,
}

impl KPaths {
    pub fn new(n: usize, edges: &[(usize, usize)]) -> Result<Self, Error> {
        let expected = n.saturating_sub(1);
        if edges.len() != expected {
            return Err(Error::EdgeCount(expected, edges.len()));
        }
        let mut g = vec![vec![]; n];
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(Error::Endpoint(u, v, n));
            }
            g[u].push(v);
            g[v].push(u);
        }

        let mut order = Vec::with_capacity(n);
        let mut parent = vec![n; n];
        let mut stack = vec![];
        if n > 0 {
            parent[0] = 0;
            stack.push(0);
        }
        while let Some(v) = stack.pop() {
            order.push(v);
            for &nv in &g[v] {
                if parent[nv] == n {
                    parent[nv] = v;
                    stack.push(nv);
                }
            }
        }
        if order.len() < n {
            return Err(Error::Disconnected);
        }
        Ok(Self { order, parent })
    }

    pub fn len(&self) -> usize { self.order.len() }
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn max_paths(&self, k: usize) -> usize {
        if k == 0 {
            return 0;
        }
        let n = self.len();
        // longest unused chain hanging from each vertex, the vertex included
        let mut top = vec![(0, 0); n];
        let mut res = 0;
        for &v in self.order.iter().rev() {
            let (a, b) = top[v];
            let chain = if a + b + 1 >= k {
                res += 1;
                0
            } else {
                a + 1
            };
            if v != 0 {
                let p = &mut top[self.parent[v]];
                if chain > p.0 {
                    *p = (chain, p.0);
                } else if chain > p.1 {
                    p.1 = chain;
                }
            }
        }
        res
    }

    /// `res[k] == self.max_paths(k)` for `k` in `0..=n`.
    pub fn max_paths_all(&self, threshold: BlockSize) -> Vec<usize> {
        let n = self.len();
        let threshold = threshold.resolve(n).min(n);
        let mut res = vec![0; n + 1];
        for k in 1..=threshold {
            res[k] = self.max_paths(k);
        }
        let mut k = threshold + 1;
        let mut runs = 0;
        while k <= n {
            let value = self.max_paths(k);
            // largest `hi` with the same answer
            let (mut lo, mut hi) = (k, n + 1);
            while hi - lo > 1 {
                let mid = lo + (hi - lo) / 2;
                if self.max_paths(mid) == value {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            res[k..=lo].fill(value);
            trace!("k in {k}..={lo}: {value} paths");
            runs += 1;
            k = lo + 1;
        }
        debug!("k-paths: n = {n}, threshold = {threshold}, runs above = {runs}");
        res
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use randgen::{Gen, Tree};

    use super::*;

    #[test]
    fn path() {
        let n = 10;
        let edges: Vec<_> = (1..n).map(|v| (v - 1, v)).collect();
        let tree = KPaths::new(n, &edges).unwrap();
        for k in 1..=n + 1 {
            assert_eq!(tree.max_paths(k), n / k);
        }
        assert_eq!(tree.max_paths(0), 0);
    }

    #[test]
    fn star() {
        let edges: Vec<_> = (1..6).map(|v| (0, v)).collect();
        let tree = KPaths::new(6, &edges).unwrap();
        assert_eq!(tree.max_paths_all(BlockSize::Fixed(1)), [0, 6, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn errors() {
        assert_eq!(KPaths::new(3, &[(0, 1)]).err(), Some(Error::EdgeCount(2, 1)));
        assert_eq!(
            KPaths::new(3, &[(0, 1), (1, 3)]).err(),
            Some(Error::Endpoint(1, 3, 3))
        );
        assert_eq!(
            KPaths::new(4, &[(0, 1), (1, 0), (2, 3)]).err(),
            Some(Error::Disconnected)
        );
        assert_eq!(KPaths::new(3, &[(0, 1), (2, 2)]).err(), Some(Error::Disconnected));

        let empty = KPaths::new(0, &[]).unwrap();
        assert_eq!(empty.max_paths_all(BlockSize::Sqrt), [0]);
        let single = KPaths::new(1, &[]).unwrap();
        assert_eq!(single.max_paths_all(BlockSize::Sqrt), [0, 1]);
    }

    #[test]
    fn deep() {
        // recursion would overflow the stack here
        let n = 1_000_000;
        let edges: Vec<_> = (1..n).map(|v| (v - 1, v)).collect();
        let tree = KPaths::new(n, &edges).unwrap();
        assert_eq!(tree.max_paths(3), n / 3);
    }

    /// Exhaustive search over every assignment of vertices to paths.
    fn brute(n: usize, edges: &[(usize, usize)], k: usize) -> usize {
        let mut adj = vec![0_u32; n];
        for &(u, v) in edges {
            adj[u] |= 1 << v;
            adj[v] |= 1 << u;
        }
        // masks of connected vertex sets of size k that induce a path
        let is_path = |mask: u32| {
            if mask.count_ones() as usize != k {
                return false;
            }
            let degs: Vec<_> = (0..n)
                .filter(|&v| mask >> v & 1 == 1)
                .map(|v| (adj[v] & mask).count_ones())
                .collect();
            let edges: u32 = degs.iter().sum::<u32>() / 2;
            // a forest with k - 1 edges on k vertices is connected
            edges as usize + 1 == k && degs.iter().all(|&d| d <= 2)
        };
        let paths: Vec<u32> = (1..1_u32 << n).filter(|&m| is_path(m)).collect();
        let mut best = vec![0; 1 << n];
        for used in 0..1_usize << n {
            for &p in &paths {
                if used & p as usize == 0 {
                    let next = used | p as usize;
                    best[next] = best[next].max(best[used] + 1);
                }
            }
        }
        best.into_iter().max().unwrap_or(0)
    }

    #[test]
    fn random_small() {
        let mut rng = ChaCha20Rng::from_seed([5; 32]);
        for _ in 0..200 {
            let n = rng.gen_range(1..=9);
            let edges = Tree { n }.generate(&mut rng);
            let tree = KPaths::new(n, &edges).unwrap();
            for k in 1..=n {
                assert_eq!(tree.max_paths(k), brute(n, &edges, k), "{edges:?}, k = {k}");
            }
        }
    }

    #[test]
    fn random_all() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = ChaCha20Rng::from_seed([5; 32]);
        for n in [2, 10, 100, 500] {
            let edges = Tree { n }.generate(&mut rng);
            let tree = KPaths::new(n, &edges).unwrap();
            let direct: Vec<_> = (0..=n).map(|k| tree.max_paths(k)).collect();
            for threshold in [BlockSize::Sqrt, BlockSize::Fixed(1), BlockSize::Fixed(n)] {
                assert_eq!(tree.max_paths_all(threshold), direct);
            }
        }
    }
}
