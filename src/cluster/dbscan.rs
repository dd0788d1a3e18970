//! Parallel density-based clustering over the uniform grid.
//!
//! The pipeline replaces the textbook breadth-first cluster expansion with a
//! set-merging formulation: every (core point, neighbor) edge feeds a
//! concurrent union-find, which yields the same components in any merge
//! order. Points whose final root is a core point are clustered; the rest
//! are noise.

use std::time::{Duration, Instant};

use bitvec::prelude::*;
use rayon::prelude::*;

use super::distance::Distance;
use super::error::DbscanError;
use super::grid::Grid;
use super::neighborhood::{build_neighbor_list, NeighborList};
use super::point::{Point, NDIM};
use super::union_find::UnionFind;

/// Label assigned to points that belong to no cluster. The only negative
/// value that appears in [`DbscanResult::labels`].
pub const NOISE: i32 = -1;

/// Clustering configuration.
#[derive(Debug, Clone, Copy)]
pub struct DbscanParams {
    /// Neighborhood radius per dimension; must be strictly positive.
    pub eps: [f64; NDIM],
    /// Minimum neighbor count for a core point. The neighborhood excludes
    /// the point itself, and the threshold is compared against that
    /// self-excluded count.
    pub min_pts: usize,
    /// Worker count for the parallel phases.
    pub n_threads: usize,
}

/// Clustering output.
#[derive(Debug, Clone)]
pub struct DbscanResult {
    /// Per-point labels: a cluster id in `0..n_clusters` for clustered
    /// points, [`NOISE`] otherwise. Cluster ids are contiguous and numbered
    /// in order of first appearance.
    pub labels: Vec<i32>,
    /// Number of distinct clusters.
    pub n_clusters: usize,
    /// Number of noise points.
    pub n_noise: usize,
}

/// Callback receiving the name and wall time of each pipeline phase.
pub type PhaseObserver = Box<dyn Fn(&str, Duration) + Send + Sync>;

/// Density-based clusterer with a dedicated worker pool.
///
/// Construction validates the configuration and builds the pool once; the
/// same instance can then cluster any number of point sets.
pub struct Dbscan {
    params: DbscanParams,
    distance: Distance,
    pool: rayon::ThreadPool,
    observer: Option<PhaseObserver>,
}

impl Dbscan {
    /// Validates `params` and builds the worker pool.
    ///
    /// # Errors
    ///
    /// [`DbscanError::InvalidConfig`] for a non-positive (or NaN) radius,
    /// a zero `min_pts`, or a zero `n_threads`.
    pub fn new(params: DbscanParams) -> Result<Self, DbscanError> {
        for d in 0..NDIM {
            if params.eps[d].is_nan() || params.eps[d] <= 0.0 {
                return Err(DbscanError::InvalidConfig(format!(
                    "eps[{}] must be positive, got {}",
                    d, params.eps[d]
                )));
            }
        }
        if params.min_pts == 0 {
            return Err(DbscanError::InvalidConfig("min_pts must be positive".into()));
        }
        if params.n_threads == 0 {
            return Err(DbscanError::InvalidConfig("n_threads must be positive".into()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.n_threads)
            .build()?;

        Ok(Self {
            distance: Distance::new(params.eps),
            params,
            pool,
            observer: None,
        })
    }

    /// Installs a phase-timing callback, replacing any previous one.
    ///
    /// The callback fires once per pipeline phase with the phase name and
    /// its wall time. The core itself never prints.
    pub fn with_observer(
        mut self,
        observer: impl Fn(&str, Duration) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Clusters `points` into density-connected groups and noise.
    ///
    /// The input is borrowed for the duration of the call and never mutated.
    /// An empty input yields an empty label vector and zero counts.
    ///
    /// # Errors
    ///
    /// [`DbscanError::GridTooLarge`] when the input bounding box requires
    /// more grid cells than fit in `usize`.
    pub fn cluster(&self, points: &[Point]) -> Result<DbscanResult, DbscanError> {
        if points.is_empty() {
            return Ok(DbscanResult {
                labels: Vec::new(),
                n_clusters: 0,
                n_noise: 0,
            });
        }

        let grid = self.timed("grid build", || Grid::build(points, self.params.eps))?;
        let neighbors = self.timed("neighborhood", || {
            self.pool
                .install(|| build_neighbor_list(points, &grid, &self.distance))
        });
        Ok(self.assign(&neighbors))
    }

    /// Turns the adjacency list into final labels: core marking, parallel
    /// union of core points with their neighbors, then label compaction.
    fn assign(&self, neighbors: &NeighborList) -> DbscanResult {
        let n = neighbors.len();
        let min_pts = self.params.min_pts;

        // Phase 1: singleton forest plus core flags from the CSR degrees.
        let (forest, is_core) = self.timed("core marking", || {
            let forest = self.pool.install(|| UnionFind::new(n));
            let is_core: BitVec = (0..n).map(|i| neighbors.degree(i) >= min_pts).collect();
            (forest, is_core)
        });

        // Phase 2: merge every core point with all of its neighbors. Border
        // points join through an adjacent core point; points with no core
        // neighbor stay self-rooted.
        self.timed("union", || {
            self.pool.install(|| {
                (0..n).into_par_iter().for_each(|i| {
                    if is_core[i] {
                        for &j in neighbors.neighbors(i) {
                            forest.unite(i, j);
                        }
                    }
                });
            });
        });

        // Phase 3: points rooted at a core point are clustered, the rest are
        // noise. Root ids are then compacted to contiguous cluster ids in
        // first-appearance order.
        self.timed("labeling", || {
            let roots: Vec<usize> = self
                .pool
                .install(|| (0..n).into_par_iter().map(|i| forest.find(i)).collect());

            let mut labels = vec![NOISE; n];
            let mut remap = vec![NOISE; n];
            let mut n_clusters = 0usize;
            let mut n_noise = 0usize;
            for (i, &root) in roots.iter().enumerate() {
                if is_core[root] {
                    if remap[root] == NOISE {
                        remap[root] = n_clusters as i32;
                        n_clusters += 1;
                    }
                    labels[i] = remap[root];
                } else {
                    n_noise += 1;
                }
            }

            DbscanResult {
                labels,
                n_clusters,
                n_noise,
            }
        })
    }

    fn timed<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        if let Some(observer) = &self.observer {
            observer(name, start.elapsed());
        }
        value
    }
}
