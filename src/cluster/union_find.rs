//! Concurrent disjoint-set forest used to merge density-connected points.
//!
//! Parent links live in atomics so merging can run from many workers at
//! once. `find` applies path halving with best-effort CAS writes; a lost
//! race means another worker already rewrote the link. `unite` retries its
//! root CAS until it lands, and the smaller index always survives as the
//! root, so the final forest does not depend on thread scheduling.
//!
//! Memory ordering: parent loads are acquire, successful CAS writes are
//! release (acquire-release where the old value feeds the retry), so a chain
//! produced by one worker is visible to any worker that later observes the
//! merged root.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

/// Lock-free union-find over `0..n` with path halving and index-ordered
/// union.
pub struct UnionFind {
    parent: Vec<AtomicUsize>,
}

impl UnionFind {
    /// Creates a forest of `n` singleton sets.
    pub fn new(n: usize) -> Self {
        let parent = (0..n).into_par_iter().map(AtomicUsize::new).collect();
        Self { parent }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `x`.
    pub fn find(&self, mut x: usize) -> usize {
        loop {
            let p = self.parent[x].load(Ordering::Acquire);
            if p == x {
                return x;
            }
            let gp = self.parent[p].load(Ordering::Acquire);
            if gp == p {
                return p;
            }
            // Path halving: point x at its grandparent. A failed exchange
            // means another worker already shortened this path.
            let _ = self.parent[x].compare_exchange_weak(p, gp, Ordering::Release, Ordering::Relaxed);
            x = gp;
        }
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// The root with the smaller index survives, which makes the surviving
    /// root deterministic across runs regardless of scheduling.
    pub fn unite(&self, x: usize, y: usize) {
        let mut x = x;
        let mut y = y;
        loop {
            x = self.find(x);
            y = self.find(y);
            if x == y {
                return;
            }
            if x > y {
                std::mem::swap(&mut x, &mut y);
            }
            // Link the larger root under the smaller. A failed exchange
            // means y stopped being a root; retry from the new roots.
            if self.parent[y]
                .compare_exchange(y, x, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return;
            }
        }
    }

    /// Checks whether `x` and `y` are in the same set. Only stable once all
    /// concurrent `unite` calls have finished.
    pub fn same_set(&self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}
